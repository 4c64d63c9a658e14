use thiserror::Error;

#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct WtlError {
    pub code: String,
    pub message: String,
    pub offset: Option<usize>,
}

impl WtlError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            offset: None,
        }
    }

    pub fn with_offset(
        code: impl Into<String>,
        message: impl Into<String>,
        offset: usize,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            offset: Some(offset),
        }
    }
}
