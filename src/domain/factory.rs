//! Node Factory
//!
//! Rebuilds the typed node tree from a generic tagged-JSON document. Each
//! variant's constructor extracts only the fields it needs from the record
//! and computes its derived properties before returning; unrecognized tags
//! degrade to `Node::Any` instead of failing the conversion.

use serde_json::{Map, Value};

use crate::domain::node::{BindingContext, ConstantValue, Node};

/// Discriminant key carried by every tagged record. Distinct from all
/// semantic field names in the dump format.
pub const TYPE_TAG_KEY: &str = "_PyType";

/// Fatal input-format errors. Everything below the root degrades locally
/// and is reported through diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("document root is a {found} node, expected Module")]
    NotAModule { found: String },

    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the document root, requiring a `Module` node.
pub fn build_module(document: &Value) -> Result<Node, ConvertError> {
    let root = build_node(document);
    match root {
        Node::Module { .. } => Ok(root),
        other => Err(ConvertError::NotAModule {
            found: other.kind().to_string(),
        }),
    }
}

/// Convert one tagged record, or any JSON value in node position, into a
/// typed node. Total: never fails.
pub fn build_node(value: &Value) -> Node {
    let Some(record) = value.as_object() else {
        tracing::debug!("non-record value in node position, treating as opaque");
        return Node::Any;
    };
    let Some(tag) = record.get(TYPE_TAG_KEY).and_then(Value::as_str) else {
        tracing::debug!("record without a node tag, treating as opaque");
        return Node::Any;
    };

    match tag {
        "Module" => Node::Module {
            body: node_list(record, "body"),
        },
        "ClassDef" => {
            let bases = node_list(record, "bases");
            let is_typed_dict = Node::class_is_typed_dict(&bases);
            Node::ClassDef {
                name: string_field(record, "name"),
                bases,
                body: node_list(record, "body"),
                is_typed_dict,
            }
        }
        "Name" => Node::Name {
            id: string_field(record, "id"),
            ctx: binding_context(record.get("ctx")),
        },
        "Constant" => Node::Constant {
            value: constant_value(record.get("value")),
        },
        "Subscript" => Node::Subscript {
            value: Box::new(child(record, "value")),
            slice: Box::new(child(record, "slice")),
        },
        "Tuple" => {
            let elts = node_list(record, "elts");
            let trailing_ellipsis = Node::tuple_has_trailing_ellipsis(&elts);
            Node::Tuple {
                elts,
                trailing_ellipsis,
            }
        }
        "AnnAssign" => Node::AnnAssign {
            target: Box::new(child(record, "target")),
            annotation: Box::new(child(record, "annotation")),
        },
        "Load" => Node::Load,
        "Store" => Node::Store,
        other => {
            tracing::debug!(tag = other, "ignored irrelevant Python node");
            Node::Any
        }
    }
}

fn child(record: &Map<String, Value>, key: &str) -> Node {
    record.get(key).map(build_node).unwrap_or(Node::Any)
}

fn node_list(record: &Map<String, Value>, key: &str) -> Vec<Node> {
    match record.get(key).and_then(Value::as_array) {
        Some(items) => items.iter().map(build_node).collect(),
        None => Vec::new(),
    }
}

fn string_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn binding_context(value: Option<&Value>) -> BindingContext {
    match value
        .and_then(|v| v.get(TYPE_TAG_KEY))
        .and_then(Value::as_str)
    {
        Some("Store") => BindingContext::Store,
        Some("Load") | None => BindingContext::Load,
        Some(other) => {
            // Del and friends never reach annotation position; their
            // enclosing statements are already opaque.
            tracing::debug!(ctx = other, "unrecognized binding context, assuming Load");
            BindingContext::Load
        }
    }
}

fn constant_value(value: Option<&Value>) -> ConstantValue {
    match value {
        Some(Value::String(s)) => ConstantValue::Str(s.clone()),
        Some(Value::Number(n)) => ConstantValue::Num(n.clone()),
        Some(Value::Bool(b)) => ConstantValue::Bool(*b),
        _ => ConstantValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_tag_degrades_to_opaque() {
        let node = build_node(&json!({ "_PyType": "FunctionDef", "name": "method" }));
        assert_eq!(node, Node::Any);
    }

    #[test]
    fn test_untagged_value_degrades_to_opaque() {
        assert_eq!(build_node(&json!(42)), Node::Any);
        assert_eq!(build_node(&json!({ "id": "x" })), Node::Any);
    }

    #[test]
    fn test_name_extracts_id_and_context() {
        let node = build_node(&json!({
            "_PyType": "Name",
            "id": "pages",
            "ctx": { "_PyType": "Store" }
        }));
        assert_eq!(
            node,
            Node::Name {
                id: "pages".to_string(),
                ctx: BindingContext::Store
            }
        );
    }

    #[test]
    fn test_class_def_computes_typed_dict_flag() {
        let node = build_node(&json!({
            "_PyType": "ClassDef",
            "name": "Book",
            "bases": [{ "_PyType": "Name", "id": "TypedDict", "ctx": { "_PyType": "Load" } }],
            "body": []
        }));
        match node {
            Node::ClassDef {
                name, is_typed_dict, ..
            } => {
                assert_eq!(name, "Book");
                assert!(is_typed_dict);
            }
            other => panic!("expected ClassDef, got {:?}", other),
        }
    }

    #[test]
    fn test_tuple_computes_ellipsis_flag() {
        let node = build_node(&json!({
            "_PyType": "Tuple",
            "elts": [
                { "_PyType": "Name", "id": "int", "ctx": { "_PyType": "Load" } },
                { "_PyType": "Constant", "value": "...", "kind": null }
            ],
            "ctx": { "_PyType": "Load" }
        }));
        match node {
            Node::Tuple {
                trailing_ellipsis, ..
            } => assert!(trailing_ellipsis),
            other => panic!("expected Tuple, got {:?}", other),
        }
    }

    #[test]
    fn test_root_must_be_module() {
        let doc = json!({ "_PyType": "ClassDef", "name": "X", "bases": [], "body": [] });
        let err = build_module(&doc).unwrap_err();
        assert!(matches!(err, ConvertError::NotAModule { ref found } if found == "ClassDef"));
    }

    #[test]
    fn test_module_root_passes() {
        let doc = json!({ "_PyType": "Module", "body": [] });
        assert!(matches!(
            build_module(&doc),
            Ok(Node::Module { ref body }) if body.is_empty()
        ));
    }

    #[test]
    fn test_constant_scalar_kinds() {
        let s = build_node(&json!({ "_PyType": "Constant", "value": "a" }));
        assert_eq!(
            s,
            Node::Constant {
                value: ConstantValue::Str("a".to_string())
            }
        );

        let none = build_node(&json!({ "_PyType": "Constant", "value": null }));
        assert_eq!(
            none,
            Node::Constant {
                value: ConstantValue::Null
            }
        );
    }
}
