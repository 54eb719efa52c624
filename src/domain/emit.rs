//! Declaration Emitter
//!
//! Walks a module's direct top-level statements, selects every TypedDict
//! subclass, and turns its annotated fields into interface declarations.
//! Methods, other statement kinds, and nested classes stay invisible.

use serde_json::Value;

use crate::domain::diagnostics::Diagnostics;
use crate::domain::factory::{build_module, ConvertError};
use crate::domain::node::Node;
use crate::domain::resolve::resolve_field;
use crate::domain::tstype::InterfaceDecl;

/// Result of converting one module document.
#[derive(Debug)]
pub struct ModuleConversion {
    pub declarations: Vec<InterfaceDecl>,
    pub diagnostics: Diagnostics,
}

/// Emit one declaration per TypedDict subclass among the module's direct
/// top-level statements, preserving module order. A qualifying class with
/// no resolvable fields still yields a declaration with an empty field
/// list.
pub fn emit_declarations(module: &Node, diags: &mut Diagnostics) -> Vec<InterfaceDecl> {
    let Node::Module { body } = module else {
        return Vec::new();
    };

    let mut declarations = Vec::new();
    for statement in body {
        let Node::ClassDef {
            name,
            body: class_body,
            is_typed_dict,
            ..
        } = statement
        else {
            continue;
        };
        if !is_typed_dict {
            continue;
        }

        let mut fields = Vec::new();
        for member in class_body {
            // methods and any other statement kind in the class body are
            // skipped silently
            if let Node::AnnAssign { target, annotation } = member {
                if let Some(field) = resolve_field(target, annotation, diags) {
                    fields.push(field);
                }
            }
        }

        declarations.push(InterfaceDecl {
            name: name.clone(),
            fields,
        });
    }
    declarations
}

/// Convert an already-parsed tagged-JSON document. Pure apart from the
/// diagnostics it returns; independent documents can convert in parallel.
pub fn convert_value(document: &Value) -> Result<ModuleConversion, ConvertError> {
    let module = build_module(document)?;
    let mut diagnostics = Diagnostics::new();
    let declarations = emit_declarations(&module, &mut diagnostics);
    Ok(ModuleConversion {
        declarations,
        diagnostics,
    })
}

/// Convert a tagged-JSON document from its serialized text.
pub fn convert_document(document: &str) -> Result<ModuleConversion, ConvertError> {
    let value: Value = serde_json::from_str(document)?;
    convert_value(&value)
}
