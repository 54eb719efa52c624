//! TypeScript Printer
//!
//! Renders declaration records as TypeScript interface source text.

use crate::domain::tstype::{InterfaceDecl, TsType};
use crate::ports::DeclarationExporter;

pub struct TypeScriptPrinter;

impl TypeScriptPrinter {
    /// Render all declarations as one TypeScript source string.
    pub fn to_source(decls: &[InterfaceDecl]) -> String {
        let mut lines = Vec::new();

        for decl in decls {
            lines.push(format!("interface {} {{", decl.name));
            for field in &decl.fields {
                lines.push(format!(
                    "    {}: {};",
                    field.name,
                    Self::render_type(&field.ty)
                ));
            }
            lines.push("}".to_string());
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// Render a single type node.
    pub fn render_type(ty: &TsType) -> String {
        match ty {
            TsType::String => "string".to_string(),
            TsType::Number => "number".to_string(),
            TsType::Boolean => "boolean".to_string(),
            TsType::Any => "any".to_string(),
            TsType::Array(elem) => {
                let inner = Self::render_type(elem);
                // union elements bind looser than [] and need parentheses
                if matches!(**elem, TsType::Union(_)) {
                    format!("({})[]", inner)
                } else {
                    format!("{}[]", inner)
                }
            }
            TsType::Tuple(elems) => {
                let rendered: Vec<String> = elems.iter().map(Self::render_type).collect();
                format!("[{}]", rendered.join(", "))
            }
            TsType::Union(alts) => {
                let rendered: Vec<String> = alts.iter().map(Self::render_type).collect();
                rendered.join(" | ")
            }
            TsType::LitStr(s) => format!("\"{}\"", Self::escape_string(s)),
            TsType::LitNum(n) => n.to_string(),
            TsType::LitBool(b) => b.to_string(),
            TsType::Ref(name) => name.clone(),
        }
    }

    fn escape_string(s: &str) -> String {
        s.replace('\\', "\\\\").replace('"', "\\\"")
    }
}

impl DeclarationExporter for TypeScriptPrinter {
    fn export(&self, decls: &[InterfaceDecl], path: &str) -> std::io::Result<()> {
        std::fs::write(path, Self::to_source(decls))
    }
}
