use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wtl_core::WtlError;

use crate::error_map::map_cli_source_scan;

/// Expands the command-line path list: files are taken as-is, directories
/// are walked recursively for `*.wtl` sources in file-name order.
pub(crate) fn collect_source_files(paths: &[String]) -> Result<Vec<PathBuf>, WtlError> {
    let mut files = Vec::new();

    for raw in paths {
        let path = PathBuf::from(raw);
        if path.is_dir() {
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = entry.map_err(map_cli_source_scan)?;
                if entry.file_type().is_file() && has_template_extension(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else if path.is_file() {
            files.push(path);
        } else {
            return Err(WtlError::new(
                "CLI_SOURCE_NOT_FOUND",
                format!("source path does not exist: {}", path.display()),
            ));
        }
    }

    Ok(files)
}

fn has_template_extension(path: &Path) -> bool {
    path.extension().and_then(|extension| extension.to_str()) == Some("wtl")
}

#[cfg(test)]
mod source_loader_tests {
    use super::*;

    #[test]
    fn template_extension_matches_wtl_only() {
        assert!(has_template_extension(Path::new("overlay/health.wtl")));
        assert!(!has_template_extension(Path::new("overlay/health.txt")));
        assert!(!has_template_extension(Path::new("overlay/wtl")));
        assert!(!has_template_extension(Path::new("overlay/health.WTL")));
    }

    #[test]
    fn missing_path_reports_its_code() {
        let error = collect_source_files(&["/nonexistent/definitely-missing.wtl".to_string()])
            .expect_err("missing path should fail");
        assert_eq!(error.code, "CLI_SOURCE_NOT_FOUND");
    }
}
