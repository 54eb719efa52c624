//! JSON Exporter
//!
//! Serializes declaration records as JSON for programmatic consumers that
//! want the structured form instead of rendered TypeScript.

use std::io;

use crate::domain::tstype::InterfaceDecl;
use crate::ports::DeclarationExporter;

pub struct JsonExporter;

impl JsonExporter {
    /// Render all declarations as pretty-printed JSON.
    pub fn to_json(decls: &[InterfaceDecl]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(decls)
    }
}

impl DeclarationExporter for JsonExporter {
    fn export(&self, decls: &[InterfaceDecl], path: &str) -> io::Result<()> {
        let rendered = Self::to_json(decls).map_err(io::Error::other)?;
        std::fs::write(path, rendered)
    }
}
