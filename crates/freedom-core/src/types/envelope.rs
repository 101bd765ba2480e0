//! Result envelope for callers that cannot consume a Rust `Result` directly
//! (JSON output, foreign callers).

use serde::{Deserialize, Serialize};

/// Errors that map onto a nonzero envelope status code.
pub trait ErrorStatus {
    /// Nonzero status code for this error.
    fn status_code(&self) -> i32;
}

/// Tagged outcome: `status == 0` with a payload, or a nonzero status with an
/// error message. Exactly one of `payload` and `error` is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: i32,
    pub payload: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Wrap a successful payload.
    #[must_use]
    pub fn success(payload: T) -> Self {
        Self {
            status: 0,
            payload: Some(payload),
            error: None,
        }
    }

    /// Wrap an error. A zero status is bumped to 1 so failures stay nonzero.
    #[must_use]
    pub fn failure(error: impl Into<String>, status: i32) -> Self {
        Self {
            status: if status == 0 { 1 } else { status },
            payload: None,
            error: Some(error.into()),
        }
    }

    /// Check the tag.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Convert back into a `Result`, keeping the status code on failure.
    pub fn into_result(self) -> Result<T, (i32, String)> {
        match (self.status, self.payload) {
            (0, Some(payload)) => Ok(payload),
            (0, None) => Err((1, "Envelope reported success without a payload".to_string())),
            (status, _) => Err((
                status,
                self.error.unwrap_or_else(|| "Unspecified error".to_string()),
            )),
        }
    }
}

impl<T, E> From<Result<T, E>> for Envelope<T>
where
    E: ErrorStatus + std::fmt::Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::failure(e.to_string(), e.status_code()),
        }
    }
}
