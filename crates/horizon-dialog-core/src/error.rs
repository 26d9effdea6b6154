//! Error types for dialog operations.

use std::time::Duration;

/// Result type alias for dialog operations.
pub type Result<T> = std::result::Result<T, DialogError>;

/// Settings rejected before any backend is invoked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An options dialog without options.
    #[error("You need at least one option specified.")]
    NoOptions,

    /// An extra button with an empty label.
    #[error("Empty label for extra button {index} is not allowed")]
    EmptyExtraButtonLabel { index: usize },

    /// More extra buttons than the backend can render.
    #[error("Only {allowed} additional button(s) allowed, but {given} given")]
    TooManyExtraButtons { allowed: usize, given: usize },

    /// A default option index outside the option list.
    #[error("Default option {index} is out of range for {count} option(s)")]
    DefaultOptionOutOfRange { index: usize, count: usize },
}

/// Errors that can occur while showing a dialog.
///
/// `Ok`, `Canceled` and extra-button presses are not errors; they are
/// reported through the result types. A deadline that elapsed is reported
/// as [`DialogError::Timeout`] and never as a backend failure.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    /// The settings were rejected.
    #[error("Invalid dialog settings: {0}")]
    Invalid(#[from] ValidationError),

    /// The deadline elapsed before the user responded.
    #[error("Dialog timed out after {limit:?}")]
    Timeout { limit: Duration },

    /// The dialog program could not be started.
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The dialog program exited with an unexpected status.
    #[error("'{program}' exited with status {code:?}: {stderr}")]
    ProcessFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A native OS or COM call failed.
    #[error("Failed call '{call}': status {status:#010x}")]
    Native { call: &'static str, status: u32 },

    /// The backend produced output that could not be decoded.
    #[error("Unexpected dialog output: {0}")]
    Output(String),

    /// A dialog script could not be rendered.
    #[error("Script error: {0}")]
    Script(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested backend or dialog is not available on this platform.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DialogError {
    /// Create a timeout error.
    pub fn timeout(limit: Duration) -> Self {
        Self::Timeout { limit }
    }

    /// Create a launch error.
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    /// Create a process failure.
    pub fn process_failed(
        program: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ProcessFailed {
            program: program.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Create a native call failure.
    pub fn native(call: &'static str, status: u32) -> Self {
        Self::Native { call, status }
    }

    /// Create an output decoding error.
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output(message.into())
    }

    /// Whether this error reports an elapsed deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether the settings were rejected before a backend ran.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}
