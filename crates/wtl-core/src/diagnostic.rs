use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// One positioned issue for the editor. Offsets are UTF-16 code units into
/// the analyzed document; `end_offset` is always at least one unit past
/// `start_offset` so the host can render a non-empty marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub start_offset: usize,
    pub end_offset: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        start_offset: usize,
        end_offset: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            start_offset,
            end_offset: end_offset.max(start_offset + 1),
            severity,
            message: message.into(),
        }
    }

    pub fn error(start_offset: usize, end_offset: usize, message: impl Into<String>) -> Self {
        Self::new(start_offset, end_offset, Severity::Error, message)
    }

    pub fn warning(start_offset: usize, end_offset: usize, message: impl Into<String>) -> Self {
        Self::new(start_offset, end_offset, Severity::Warning, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_widens_empty_spans_to_one_unit() {
        let diagnostic = Diagnostic::error(4, 4, "oops");
        assert_eq!(diagnostic.start_offset, 4);
        assert_eq!(diagnostic.end_offset, 5);
    }

    #[test]
    fn new_keeps_non_empty_spans() {
        let diagnostic = Diagnostic::warning(2, 9, "hm");
        assert_eq!(diagnostic.end_offset, 9);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let payload =
            serde_json::to_string(&Severity::Warning).expect("severity should serialize");
        assert_eq!(payload, "\"warning\"");
    }
}
