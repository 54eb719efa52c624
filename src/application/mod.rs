use crate::domain::emit::{convert_document, ModuleConversion};
use crate::ports::DeclarationExporter;

/// Wires a tagged-JSON AST document through conversion and out through an
/// injected exporter.
pub struct ConvertUsecase<'a> {
    pub exporter: &'a dyn DeclarationExporter,
}

impl<'a> ConvertUsecase<'a> {
    pub fn run(&self, document: &str, export_path: &str) -> anyhow::Result<ModuleConversion> {
        let conversion = convert_document(document)?;
        self.exporter.export(&conversion.declarations, export_path)?;
        Ok(conversion)
    }
}
