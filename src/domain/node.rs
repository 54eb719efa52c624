//! Python AST Node Model
//!
//! A tagged subset of Python's grammar, only what TypedDict class bodies
//! need. See https://docs.python.org/3/library/ast.html for the full
//! grammar these variants were taken from.

use serde_json::Number;

/// Base-class name marking a structural record type.
pub const TYPED_DICT_MARKER: &str = "TypedDict";

/// The `...` token as the dump script serializes it.
pub const ELLIPSIS_TOKEN: &str = "...";

/// Whether a name reference is being read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingContext {
    Load,
    Store,
}

/// A scalar literal carried by a `Constant` node.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Str(String),
    Num(Number),
    Bool(bool),
    /// `None` and every scalar kind we do not map.
    Null,
}

impl ConstantValue {
    /// Python's `Ellipsis` arrives as a plain string from the dump script.
    pub fn is_ellipsis(&self) -> bool {
        matches!(self, ConstantValue::Str(s) if s == ELLIPSIS_TOKEN)
    }
}

/// A node in the Python AST subset. Every node except the root is owned
/// exclusively by its parent; there are no back-references.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A whole Python file.
    Module {
        body: Vec<Node>,
    },
    ClassDef {
        name: String,
        bases: Vec<Node>,
        body: Vec<Node>,
        /// Computed once at construction, never recomputed.
        is_typed_dict: bool,
    },
    Name {
        id: String,
        ctx: BindingContext,
    },
    Constant {
        value: ConstantValue,
    },
    /// Generic application, e.g. `List[int]`.
    Subscript {
        value: Box<Node>,
        slice: Box<Node>,
    },
    Tuple {
        elts: Vec<Node>,
        /// Computed once at construction: `Tuple[T, ...]` homogeneous marker.
        trailing_ellipsis: bool,
    },
    /// One typed class field, e.g. `pages: int`.
    AnnAssign {
        target: Box<Node>,
        annotation: Box<Node>,
    },
    /// Bare binding-context markers. Carry nothing beyond their identity.
    Load,
    Store,
    /// Placeholder for tags we do not recognize. Transforms to nothing.
    Any,
}

impl Node {
    /// Discriminant name, used as diagnostic context.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Module { .. } => "Module",
            Node::ClassDef { .. } => "ClassDef",
            Node::Name { .. } => "Name",
            Node::Constant { .. } => "Constant",
            Node::Subscript { .. } => "Subscript",
            Node::Tuple { .. } => "Tuple",
            Node::AnnAssign { .. } => "AnnAssign",
            Node::Load => "Load",
            Node::Store => "Store",
            Node::Any => "Any",
        }
    }

    /// Is any base reference a `Name` equal to the TypedDict marker?
    /// Holds regardless of base-list order or length (zero bases is false).
    pub(crate) fn class_is_typed_dict(bases: &[Node]) -> bool {
        bases
            .iter()
            .any(|base| matches!(base, Node::Name { id, .. } if id == TYPED_DICT_MARKER))
    }

    /// `Tuple[T, ...]` check: more than one element and the last one is the
    /// ellipsis constant. A lone ellipsis is not valid in this grammar and
    /// is never flagged.
    pub(crate) fn tuple_has_trailing_ellipsis(elts: &[Node]) -> bool {
        if elts.len() < 2 {
            return false;
        }
        matches!(elts.last(), Some(Node::Constant { value }) if value.is_ellipsis())
    }
}
