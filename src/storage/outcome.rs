use crate::error::AppError;
use serde::Serialize;
use std::fmt;

/// Success flag plus a human-readable message, for callers that render results
/// instead of handling errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(error: &AppError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
        }
    }

    /// Collapse a store result, describing the success value with `describe`
    pub fn from_result<T>(result: Result<T, AppError>, describe: impl FnOnce(&T) -> String) -> Self {
        match result {
            Ok(value) => Self::ok(describe(&value)),
            Err(e) => Self::failed(&e),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
