/// Conversion pipeline tests: tagged-JSON AST documents in, declaration
/// records out.

use py2ts::domain::emit::{convert_document, convert_value};
use py2ts::domain::factory::ConvertError;
use py2ts::domain::tstype::TsType;
use serde_json::{json, Value};

/// Helper to build a Name record in the given context
fn name(id: &str, ctx: &str) -> Value {
    json!({ "_PyType": "Name", "id": id, "ctx": { "_PyType": ctx } })
}

/// Helper to build one annotated class field
fn ann_assign(field: &str, annotation: Value) -> Value {
    json!({
        "_PyType": "AnnAssign",
        "target": name(field, "Store"),
        "annotation": annotation,
        "simple": 1
    })
}

fn subscript(base: &str, slice: Value) -> Value {
    json!({
        "_PyType": "Subscript",
        "value": name(base, "Load"),
        "slice": slice,
        "ctx": { "_PyType": "Load" }
    })
}

fn tuple(elts: Vec<Value>) -> Value {
    json!({ "_PyType": "Tuple", "elts": elts, "ctx": { "_PyType": "Load" } })
}

fn constant(value: Value) -> Value {
    json!({ "_PyType": "Constant", "value": value, "kind": null })
}

fn typed_dict_class(class: &str, fields: Vec<Value>) -> Value {
    json!({
        "_PyType": "ClassDef",
        "name": class,
        "bases": [name("TypedDict", "Load")],
        "keywords": [],
        "body": fields,
        "decorator_list": []
    })
}

fn module(body: Vec<Value>) -> Value {
    json!({ "_PyType": "Module", "body": body, "type_ignores": [] })
}

#[test]
fn book_module_produces_single_interface() {
    let doc = module(vec![
        typed_dict_class(
            "Book",
            vec![
                ann_assign("pages", name("int", "Load")),
                ann_assign("title", name("str", "Load")),
            ],
        ),
        json!({
            "_PyType": "ClassDef",
            "name": "Helper",
            "bases": [],
            "body": [ann_assign("x", name("int", "Load"))]
        }),
    ]);

    let conversion = convert_value(&doc).unwrap();
    assert_eq!(
        conversion.declarations.len(),
        1,
        "Helper must be absent, found: {:?}",
        conversion.declarations
    );

    let book = &conversion.declarations[0];
    assert_eq!(book.name, "Book");
    assert_eq!(book.fields[0].name, "pages");
    assert_eq!(book.fields[0].ty, TsType::Number);
    assert_eq!(book.fields[1].name, "title");
    assert_eq!(book.fields[1].ty, TsType::String);
}

#[test]
fn list_of_homogeneous_tuples_resolves_to_nested_array() {
    // List[Tuple[int, ...]] -> number[][]
    let annotation = subscript(
        "List",
        subscript(
            "Tuple",
            tuple(vec![name("int", "Load"), constant(json!("..."))]),
        ),
    );
    let doc = module(vec![typed_dict_class(
        "Matrix",
        vec![ann_assign("rows", annotation)],
    )]);

    let conversion = convert_value(&doc).unwrap();
    let rows = &conversion.declarations[0].fields[0];
    assert_eq!(
        rows.ty,
        TsType::Array(Box::new(TsType::Array(Box::new(TsType::Number))))
    );
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn ellipsis_tuple_collapses_to_array_not_tuple() {
    let doc = module(vec![typed_dict_class(
        "Series",
        vec![ann_assign(
            "points",
            subscript(
                "Tuple",
                tuple(vec![name("int", "Load"), constant(json!("..."))]),
            ),
        )],
    )]);

    let conversion = convert_value(&doc).unwrap();
    assert_eq!(
        conversion.declarations[0].fields[0].ty,
        TsType::Array(Box::new(TsType::Number))
    );
}

#[test]
fn fixed_tuple_keeps_arity() {
    let doc = module(vec![typed_dict_class(
        "Pair",
        vec![ann_assign(
            "value",
            subscript(
                "Tuple",
                tuple(vec![name("int", "Load"), name("str", "Load")]),
            ),
        )],
    )]);

    let conversion = convert_value(&doc).unwrap();
    assert_eq!(
        conversion.declarations[0].fields[0].ty,
        TsType::Tuple(vec![TsType::Number, TsType::String])
    );
}

#[test]
fn literal_strings_become_a_union_of_string_literals() {
    let doc = module(vec![typed_dict_class(
        "Flag",
        vec![ann_assign(
            "state",
            subscript(
                "Literal",
                tuple(vec![constant(json!("a")), constant(json!("b"))]),
            ),
        )],
    )]);

    let conversion = convert_value(&doc).unwrap();
    assert_eq!(
        conversion.declarations[0].fields[0].ty,
        TsType::Union(vec![
            TsType::LitStr("a".to_string()),
            TsType::LitStr("b".to_string())
        ])
    );
}

#[test]
fn union_of_builtins_resolves_each_alternative() {
    let doc = module(vec![typed_dict_class(
        "Id",
        vec![ann_assign(
            "value",
            subscript(
                "Union",
                tuple(vec![name("int", "Load"), name("str", "Load")]),
            ),
        )],
    )]);

    let conversion = convert_value(&doc).unwrap();
    assert_eq!(
        conversion.declarations[0].fields[0].ty,
        TsType::Union(vec![TsType::Number, TsType::String])
    );
}

#[test]
fn forward_references_pass_through() {
    let doc = module(vec![
        typed_dict_class("Author", vec![ann_assign("name", name("str", "Load"))]),
        typed_dict_class(
            "Book",
            vec![ann_assign("author", name("Author", "Load"))],
        ),
    ]);

    let conversion = convert_value(&doc).unwrap();
    assert_eq!(conversion.declarations.len(), 2);
    assert_eq!(
        conversion.declarations[1].fields[0].ty,
        TsType::Ref("Author".to_string())
    );
}

#[test]
fn non_module_root_is_fatal() {
    let doc = typed_dict_class("Book", vec![]);
    let err = convert_value(&doc).unwrap_err();
    assert!(matches!(err, ConvertError::NotAModule { ref found } if found == "ClassDef"));
}

#[test]
fn module_without_typed_dicts_is_empty_not_an_error() {
    let doc = module(vec![json!({ "_PyType": "Import", "names": [] })]);
    let conversion = convert_value(&doc).unwrap();
    assert!(conversion.declarations.is_empty());
}

#[test]
fn unsupported_annotations_drop_fields_but_keep_the_class() {
    let doc = module(vec![typed_dict_class(
        "Config",
        vec![
            ann_assign("mapping", subscript("Dict", name("str", "Load"))),
            ann_assign("name", name("str", "Load")),
        ],
    )]);

    let conversion = convert_value(&doc).unwrap();
    assert_eq!(conversion.declarations.len(), 1);
    assert_eq!(conversion.declarations[0].fields.len(), 1);
    assert_eq!(conversion.declarations[0].fields[0].name, "name");
    assert!(
        conversion.diagnostics.has_errors(),
        "dropped field must be reported, got: {:?}",
        conversion.diagnostics
    );
}

#[test]
fn conversion_from_document_text() {
    // exactly what the dump script writes for the two-class readme example
    let document = r#"{
        "_PyType": "Module",
        "body": [
            {
                "_PyType": "ClassDef",
                "name": "Book",
                "bases": [{ "_PyType": "Name", "id": "TypedDict", "ctx": { "_PyType": "Load" } }],
                "keywords": [],
                "body": [
                    {
                        "_PyType": "AnnAssign",
                        "target": { "_PyType": "Name", "id": "pages", "ctx": { "_PyType": "Store" } },
                        "annotation": { "_PyType": "Name", "id": "int", "ctx": { "_PyType": "Load" } },
                        "simple": 1
                    }
                ],
                "decorator_list": []
            }
        ],
        "type_ignores": []
    }"#;

    let conversion = convert_document(document).unwrap();
    assert_eq!(conversion.declarations.len(), 1);
    assert_eq!(conversion.declarations[0].name, "Book");
}

#[test]
fn documents_convert_independently() {
    let first = module(vec![typed_dict_class(
        "A",
        vec![ann_assign("x", name("int", "Load"))],
    )]);
    let second = module(vec![typed_dict_class(
        "B",
        vec![ann_assign("y", name("str", "Load"))],
    )]);

    let a = convert_value(&first).unwrap();
    let b = convert_value(&second).unwrap();
    assert_eq!(a.declarations[0].name, "A");
    assert_eq!(b.declarations[0].name, "B");

    // converting the first document again is unaffected by the second
    let a_again = convert_value(&first).unwrap();
    assert_eq!(a.declarations, a_again.declarations);
}
