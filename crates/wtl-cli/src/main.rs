mod error_map;
mod source_loader;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use wtl_api::{
    build_catalog_from_payload, compile_document, document_diagnostics,
    document_structural_diagnostics,
};
use wtl_core::{Diagnostic, FunctionCatalog, Severity, WtlError};

use error_map::{emit_error, map_cli_catalog_read, map_cli_output_write, map_cli_source_read};
use source_loader::collect_source_files;

#[derive(Debug, Parser)]
#[command(name = "wtl-lint")]
#[command(about = "Lint and compile Wynntils overlay template scripts")]
struct Cli {
    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    Lint(LintArgs),
    Compile(CompileArgs),
}

#[derive(Debug, Args)]
struct LintArgs {
    /// JSON file with the host's function metadata. Without it, function
    /// calls are not validated.
    #[arg(long = "catalog")]
    catalog: Option<String>,
    #[arg(required = true)]
    paths: Vec<String>,
}

#[derive(Debug, Args)]
struct CompileArgs {
    #[arg(required = true)]
    paths: Vec<String>,
    /// Write each compiled script into this directory instead of stdout.
    #[arg(long = "out")]
    out: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32, WtlError> {
    match cli.command {
        Mode::Lint(args) => run_lint(args),
        Mode::Compile(args) => run_compile(args),
    }
}

fn run_lint(args: LintArgs) -> Result<i32, WtlError> {
    let catalog = args
        .catalog
        .as_deref()
        .map(load_catalog_file)
        .transpose()?;
    let files = collect_source_files(&args.paths)?;

    let mut failed = false;
    for path in files {
        let document = fs::read_to_string(&path).map_err(map_cli_source_read)?;
        let diagnostics = match &catalog {
            Some(catalog) => document_diagnostics(&document, catalog),
            None => document_structural_diagnostics(&document),
        };

        for diagnostic in &diagnostics {
            print_diagnostic(&path, diagnostic);
            if diagnostic.severity == Severity::Error {
                failed = true;
            }
        }

        // The compiler re-checks declarations with its stricter scanner and
        // adds circular-reference errors the editor passes cannot see. Lines
        // already reported above are not repeated.
        for error in compile_document(&document).errors {
            let already_reported = diagnostics.iter().any(|diagnostic| {
                diagnostic.start_offset == error.offset && diagnostic.message == error.message
            });
            if already_reported {
                continue;
            }
            println!("{}:{}: error: {}", path.display(), error.offset, error.message);
            failed = true;
        }
    }

    Ok(if failed { 1 } else { 0 })
}

fn run_compile(args: CompileArgs) -> Result<i32, WtlError> {
    let files = collect_source_files(&args.paths)?;
    let out_dir = args.out.map(PathBuf::from);
    if let Some(directory) = &out_dir {
        fs::create_dir_all(directory).map_err(map_cli_output_write)?;
    }

    let mut failed = false;
    for path in files {
        let source = fs::read_to_string(&path).map_err(map_cli_source_read)?;
        let compiled = compile_document(&source);

        for error in &compiled.errors {
            eprintln!("{}:{}: error: {}", path.display(), error.offset, error.message);
            failed = true;
        }

        match &out_dir {
            Some(directory) => {
                let file_name = path.file_name().unwrap_or_else(|| OsStr::new("out.wtl"));
                let target = directory.join(file_name);
                fs::write(&target, format!("{}\n", compiled.code))
                    .map_err(map_cli_output_write)?;
            }
            None => println!("{}", compiled.code),
        }
    }

    Ok(if failed { 1 } else { 0 })
}

fn load_catalog_file(path: &str) -> Result<FunctionCatalog, WtlError> {
    let payload = fs::read_to_string(path).map_err(map_cli_catalog_read)?;
    build_catalog_from_payload(&payload)
}

fn print_diagnostic(path: &Path, diagnostic: &Diagnostic) {
    println!(
        "{}:{}: {}: {}",
        path.display(),
        diagnostic.start_offset,
        severity_label(diagnostic.severity),
        diagnostic.message
    );
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Information => "info",
        Severity::Hint => "hint",
    }
}
