/// Input Source Handling.
///
/// Inputs are either Python sources (dumped to tagged JSON through the
/// bundled script) or pre-dumped AST JSON documents, told apart by file
/// extension.

use std::fs;
use std::path::Path;
use anyhow::{bail, Context, Result};

use crate::infrastructure::python_runner;

/// What kind of input file we were handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    PythonSource,
    AstJson,
}

impl InputKind {
    /// Infer input kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<InputKind> {
        match ext.to_lowercase().as_str() {
            "py" => Some(InputKind::PythonSource),
            "json" => Some(InputKind::AstJson),
            _ => None,
        }
    }

    /// Infer input kind from a file path.
    pub fn from_path(path: &Path) -> Option<InputKind> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Load the tagged-JSON AST document for any supported input file.
pub fn load_ast_json(path: &Path, interpreter: &str) -> Result<String> {
    match InputKind::from_path(path) {
        Some(InputKind::AstJson) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read AST document {}", path.display())),
        Some(InputKind::PythonSource) => python_runner::dump_module_ast(path, interpreter),
        None => bail!(
            "unsupported input extension for {} (expected .py or .json)",
            path.display()
        ),
    }
}
