/// Python AST Dump Runner.
///
/// Invokes an external Python interpreter on the bundled dump script to
/// serialize a module's AST as tagged JSON. The script and its output live
/// in a temp directory that is cleaned up when the dump completes.

use std::fs;
use std::path::Path;
use std::process::Command;
use anyhow::{bail, Context, Result};

/// Bundled dump script, materialized into a temp dir per run.
const DUMP_SCRIPT: &str = include_str!("../../scripts/ast_dump.py");
const DUMP_SCRIPT_NAME: &str = "ast_dump.py";
const DUMP_OUTPUT_NAME: &str = "module_ast.json";

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

/// Dump the AST of a Python source file, returning the tagged-JSON text.
pub fn dump_module_ast(source: &Path, interpreter: &str) -> Result<String> {
    check_interpreter_available(interpreter)?;

    let workdir = tempfile::tempdir().context("Failed to create temp dir for AST dump")?;
    let script_path = workdir.path().join(DUMP_SCRIPT_NAME);
    fs::write(&script_path, DUMP_SCRIPT)
        .with_context(|| format!("Failed to write dump script to {}", script_path.display()))?;
    let output_path = workdir.path().join(DUMP_OUTPUT_NAME);

    println!("[ast-dump] Dumping AST for: {}", source.display());

    let spec = build_command_spec(interpreter, &script_path, source, &output_path);
    let status = Command::new(&spec.program)
        .args(&spec.args)
        .status()
        .with_context(|| format!("Failed to execute {}", spec.program))?;

    if !status.success() {
        bail!(
            "{} exited with code {:?} while dumping {}",
            interpreter,
            status.code(),
            source.display()
        );
    }
    if !output_path.exists() {
        bail!(
            "Expected AST dump was not created at: {}",
            output_path.display()
        );
    }

    // the temp dir (script + dump) is removed when `workdir` drops
    fs::read_to_string(&output_path).context("Failed to read AST dump")
}

/// Check that the Python interpreter is reachable before doing any work.
fn check_interpreter_available(interpreter: &str) -> Result<()> {
    let check = Command::new(interpreter).arg("--version").output();

    match check {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let version = if version.trim().is_empty() {
                // Python 2 printed --version to stderr
                String::from_utf8_lossy(&output.stderr).trim().to_string()
            } else {
                version.trim().to_string()
            };
            println!("[ast-dump] Using {}: {}", interpreter, version);
            Ok(())
        }
        Ok(output) => {
            bail!(
                "{} found but returned error: {:?}",
                interpreter,
                output.status.code()
            );
        }
        Err(_) => {
            bail!(
                "{} not found in PATH. Install Python 3 or pass --python-interpreter",
                interpreter
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Testable Command Builder
// ═══════════════════════════════════════════════════════════════════════════

/// Describes the dump command without executing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpCommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

/// Build the dump command line (testable function).
pub fn build_command_spec(
    interpreter: &str,
    script: &Path,
    source: &Path,
    output: &Path,
) -> DumpCommandSpec {
    DumpCommandSpec {
        program: interpreter.to_string(),
        args: vec![
            script.display().to_string(),
            source.display().to_string(),
            output.display().to_string(),
        ],
    }
}
