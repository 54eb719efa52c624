//! Type-Expression Resolver
//!
//! Per-variant rules turning a Python type-hint expression into a
//! TypeScript type node. Unsupported shapes resolve to `None` and are
//! recorded in the diagnostics; conversion never aborts here.
//!
//! Fixed tie-breaks: ellipsis-suffixed tuples degrade to arrays, bare
//! `tuple`/`Tuple` degrades to `any`, and unknown identifiers are assumed
//! to be forward references to other declared interfaces.

use crate::domain::diagnostics::{Diagnostics, Severity};
use crate::domain::node::{BindingContext, ConstantValue, Node};
use crate::domain::tstype::{FieldSignature, TsType};

/// Resolve an expression appearing in annotation position. Pure apart
/// from the diagnostics channel: resolving the same node twice yields
/// structurally identical output.
pub fn resolve_annotation(node: &Node, diags: &mut Diagnostics) -> Option<TsType> {
    match node {
        Node::Name { id, ctx } => match ctx {
            BindingContext::Load => Some(resolve_builtin_name(id)),
            BindingContext::Store => {
                diags.unsupported("Name", "write-context name in annotation position");
                None
            }
        },
        Node::Constant { value } => resolve_constant(value, diags),
        Node::Subscript { value, slice } => resolve_subscript(value, slice, diags),
        Node::Tuple { .. } => {
            // Element resolution is exposed through resolve_tuple_elements;
            // the Subscript handler decides what shape to wrap it in. A
            // tuple expression standing alone is not a type.
            diags.unsupported("Tuple", "tuple expression is not a type by itself");
            None
        }
        other => {
            diags.unsupported(other.kind(), "node cannot appear in annotation position");
            None
        }
    }
}

/// Built-in name table for read-context names. Everything unknown is kept
/// as a reference to another declared interface.
fn resolve_builtin_name(id: &str) -> TsType {
    match id {
        "str" => TsType::String,
        "int" => TsType::Number,
        "bool" => TsType::Boolean,
        "list" | "List" => TsType::Any,
        // a bare tuple hint carries no element information
        "tuple" | "Tuple" => TsType::Any,
        other => TsType::Ref(other.to_string()),
    }
}

/// A constant resolves to the literal type of its runtime kind. The
/// ellipsis token is an ordinary string literal at this level; trailing
/// ellipsis collapsing happens in the Subscript handler before we get here.
fn resolve_constant(value: &ConstantValue, diags: &mut Diagnostics) -> Option<TsType> {
    match value {
        ConstantValue::Str(s) => Some(TsType::LitStr(s.clone())),
        ConstantValue::Num(n) => Some(TsType::LitNum(n.clone())),
        ConstantValue::Bool(b) => Some(TsType::LitBool(*b)),
        ConstantValue::Null => {
            diags.unsupported("Constant", "constant is not a string, number, or boolean");
            None
        }
    }
}

/// The central generic-resolution rule, dispatched on the base name.
fn resolve_subscript(base: &Node, slice: &Node, diags: &mut Diagnostics) -> Option<TsType> {
    let Node::Name { id, .. } = base else {
        diags.unsupported("Subscript", "subscript base is not a simple name");
        return None;
    };

    match id.as_str() {
        "List" | "list" => match slice {
            Node::Tuple { .. } => {
                diags.unsupported("Subscript", "List[...] does not take a tuple argument");
                None
            }
            other => resolve_annotation(other, diags).map(|t| TsType::Array(Box::new(t))),
        },
        "Tuple" | "tuple" => match slice {
            Node::Tuple {
                elts,
                trailing_ellipsis,
            } => {
                if *trailing_ellipsis {
                    // Tuple[T, ...] denotes a homogeneous variable-length
                    // sequence; the ellipsis marker never becomes an element.
                    let Some(first) = elts.first() else {
                        diags.unsupported("Subscript", "homogeneous tuple has no element type");
                        return None;
                    };
                    resolve_annotation(first, diags).map(|t| TsType::Array(Box::new(t)))
                } else {
                    Some(TsType::Tuple(resolve_tuple_elements(elts, diags)))
                }
            }
            other => {
                // Tuple[int] is a fixed one-element tuple
                resolve_annotation(other, diags).map(|t| TsType::Tuple(vec![t]))
            }
        },
        "Literal" => match slice {
            Node::Constant { value } => resolve_constant(value, diags),
            Node::Tuple { elts, .. } => union_of(resolve_tuple_elements(elts, diags), diags),
            _ => {
                diags.unsupported("Subscript", "unsupported expression inside Literal[...]");
                None
            }
        },
        "Union" => match slice {
            Node::Tuple { elts, .. } => union_of(resolve_tuple_elements(elts, diags), diags),
            _ => {
                // a union needs at least two alternatives, which always
                // arrive as a tuple slice
                diags.unsupported("Subscript", "unsupported expression inside Union[...]");
                None
            }
        },
        other => {
            diags.unsupported(
                "Subscript",
                format!("unsupported generic base `{}`", other),
            );
            None
        }
    }
}

/// Resolve each tuple element independently, preserving order. Elements
/// that fail to resolve have already been reported and drop out.
pub fn resolve_tuple_elements(elts: &[Node], diags: &mut Diagnostics) -> Vec<TsType> {
    elts.iter()
        .filter_map(|elt| resolve_annotation(elt, diags))
        .collect()
}

fn union_of(alternatives: Vec<TsType>, diags: &mut Diagnostics) -> Option<TsType> {
    if alternatives.is_empty() {
        diags.unsupported("Subscript", "no resolvable alternatives in union");
        return None;
    }
    Some(TsType::Union(alternatives))
}

/// Resolve one `AnnAssign` into a field pair. The target must be a
/// write-context name; the field is dropped when either side fails.
pub fn resolve_field(
    target: &Node,
    annotation: &Node,
    diags: &mut Diagnostics,
) -> Option<FieldSignature> {
    let Node::Name {
        id,
        ctx: BindingContext::Store,
    } = target
    else {
        diags.unsupported("AnnAssign", "field target is not a write-context name");
        return None;
    };

    let Some(ty) = resolve_annotation(annotation, diags) else {
        diags.push(
            Severity::Warning,
            format!("field `{}`", id),
            "annotation did not resolve, field dropped",
        );
        return None;
    };

    Some(FieldSignature {
        name: id.clone(),
        ty,
    })
}
