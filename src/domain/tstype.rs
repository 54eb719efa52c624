//! TypeScript Type Model
//!
//! The target-side nodes the resolver produces, plus the declaration
//! records handed to the exporters. Rendering lives in the ports layer;
//! these stay plain data and are immutable once produced.

use serde::Serialize;
use serde_json::Number;

/// A TypeScript type node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TsType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `any` — the unconstrained fallback for bare `list`/`tuple` hints.
    Any,
    /// `T[]`
    Array(Box<TsType>),
    /// `[A, B, C]`
    Tuple(Vec<TsType>),
    /// `A | B`
    Union(Vec<TsType>),
    /// `"a"`
    LitStr(String),
    /// `42`
    LitNum(Number),
    /// `true` / `false`
    LitBool(bool),
    /// Reference to another declared interface, kept verbatim.
    Ref(String),
}

/// One `name: type` pair inside an interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSignature {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TsType,
}

/// One emitted interface declaration. Field order preserves the class
/// body; declaration order preserves the module body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub fields: Vec<FieldSignature>,
}
