use std::fmt::Display;

use wtl_core::WtlError;

fn map_error(code: &'static str, error: impl Display) -> WtlError {
    WtlError::new(code, error.to_string())
}

/// Usage and I/O failures exit with 2, leaving 1 for "the input linted or
/// compiled with errors".
pub(crate) fn emit_error(error: WtlError) -> i32 {
    eprintln!("error[{}]: {}", error.code, error.message);
    2
}

pub(crate) fn map_cli_source_read(error: std::io::Error) -> WtlError {
    map_error("CLI_SOURCE_READ", error)
}

pub(crate) fn map_cli_source_scan(error: walkdir::Error) -> WtlError {
    map_error("CLI_SOURCE_SCAN", error)
}

pub(crate) fn map_cli_catalog_read(error: std::io::Error) -> WtlError {
    map_error("CLI_CATALOG_READ", error)
}

pub(crate) fn map_cli_output_write(error: std::io::Error) -> WtlError {
    map_error("CLI_OUTPUT_WRITE", error)
}
