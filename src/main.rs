// Command-line entry point for py2ts.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use py2ts::application::ConvertUsecase;
use py2ts::domain::emit::{convert_document, ModuleConversion};
use py2ts::infrastructure::{ast_source, concurrency};
use py2ts::ports::json_exporter::JsonExporter;
use py2ts::ports::typescript_printer::TypeScriptPrinter;
use py2ts::ports::DeclarationExporter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input files: Python sources (.py) or pre-dumped AST JSON (.json)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file path (single input only; prints to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format (ts, json)
    #[arg(short, long, default_value = "ts")]
    format: String,

    /// Path to the Python interpreter used for the AST dump step
    #[arg(short = 'p', long, default_value = "python3")]
    python_interpreter: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let exporter: &'static dyn DeclarationExporter = match cli.format.as_str() {
        "ts" => &TypeScriptPrinter,
        "json" => &JsonExporter,
        other => {
            eprintln!(
                "Error: unknown output format `{}` (expected ts or json)",
                other
            );
            process::exit(2);
        }
    };

    if cli.inputs.len() > 1 && cli.output.is_some() {
        eprintln!("Error: --output applies to a single input; batch outputs are derived per file");
        process::exit(2);
    }

    let result = if cli.inputs.len() == 1 {
        convert_single(&cli, exporter)
    } else {
        convert_batch(&cli, exporter)
    };

    match result {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {:?}", e);
            process::exit(1);
        }
    }
}

fn convert_single(cli: &Cli, exporter: &dyn DeclarationExporter) -> Result<()> {
    let input = &cli.inputs[0];
    let document = ast_source::load_ast_json(Path::new(input), &cli.python_interpreter)?;

    match &cli.output {
        Some(output) => {
            let usecase = ConvertUsecase { exporter };
            let conversion = usecase.run(&document, output)?;
            report_diagnostics(input, &conversion);
            println!(
                "[py2ts] {} -> {} ({} interfaces)",
                input,
                output,
                conversion.declarations.len()
            );
        }
        None => {
            let conversion = convert_document(&document)?;
            report_diagnostics(input, &conversion);
            print!("{}", render_for_stdout(cli, &conversion)?);
        }
    }
    Ok(())
}

fn convert_batch(cli: &Cli, exporter: &'static dyn DeclarationExporter) -> Result<()> {
    if let Err(e) = concurrency::init_thread_pool() {
        eprintln!("[py2ts] Warning: could not configure thread pool: {}", e);
    }

    let failures: Vec<(String, anyhow::Error)> = cli
        .inputs
        .par_iter()
        .filter_map(|input| {
            match convert_batch_entry(input, cli, exporter) {
                Ok(()) => None,
                Err(e) => Some((input.clone(), e)),
            }
        })
        .collect();

    if !failures.is_empty() {
        for (input, error) in &failures {
            eprintln!("[py2ts] {} failed: {:?}", input, error);
        }
        bail!("{} of {} inputs failed", failures.len(), cli.inputs.len());
    }
    Ok(())
}

fn convert_batch_entry(
    input: &str,
    cli: &Cli,
    exporter: &dyn DeclarationExporter,
) -> Result<()> {
    let document = ast_source::load_ast_json(Path::new(input), &cli.python_interpreter)?;
    let output = derived_output_path(input, &cli.format);
    let output = output
        .to_str()
        .with_context(|| format!("non-UTF-8 output path for {}", input))?
        .to_string();

    let usecase = ConvertUsecase { exporter };
    let conversion = usecase.run(&document, &output)?;
    report_diagnostics(input, &conversion);
    println!(
        "[py2ts] {} -> {} ({} interfaces)",
        input,
        output,
        conversion.declarations.len()
    );
    Ok(())
}

/// Batch outputs land next to their inputs with the format's extension.
fn derived_output_path(input: &str, format: &str) -> PathBuf {
    Path::new(input).with_extension(format)
}

fn render_for_stdout(cli: &Cli, conversion: &ModuleConversion) -> Result<String> {
    match cli.format.as_str() {
        "json" => JsonExporter::to_json(&conversion.declarations)
            .context("Failed to serialize declarations"),
        _ => Ok(TypeScriptPrinter::to_source(&conversion.declarations)),
    }
}

fn report_diagnostics(input: &str, conversion: &ModuleConversion) {
    for diag in conversion.diagnostics.entries() {
        eprintln!(
            "[diag] {}: {} at {}: {}",
            input, diag.severity, diag.context, diag.message
        );
    }
}
