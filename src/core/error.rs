//! Centralized error types.
//!
//! Creation failures are absorbed into the [`Unset`](crate::Lifecycle::Unset)
//! state rather than surfaced to the caller; they exist as values so the
//! platform backend and the script host can report the cause before the
//! wrapper degrades to no-ops. Nothing in this crate has a process-fatal
//! error path.

use thiserror::Error;

/// Failure while bringing up the native surface or its script runtime.
#[derive(Error, Debug)]
pub enum CreationError {
    #[error("Window creation failed: {0}")]
    Window(String),

    #[error("Script runtime initialization failed: {0}")]
    Script(#[from] rquickjs::Error),
}

/// Failure decoding a JSON argument array at the handler boundary.
#[derive(Error, Debug)]
pub enum ArgsError {
    #[error("Malformed argument payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type CreationResult<T> = Result<T, CreationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CreationError::Window("no display available".to_string());
        assert_eq!(
            err.to_string(),
            "Window creation failed: no display available"
        );
    }

    #[test]
    fn test_args_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: ArgsError = json_err.into();
        assert!(matches!(err, ArgsError::Malformed(_)));
        assert!(err.to_string().starts_with("Malformed argument payload"));
    }
}
