//! CLI-specific error types and exit code mapping

use suitehook_core::error::SuitehookError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// At least one case failed, was not run, or hit a configuration error.
    #[error("{failed} case(s) failed")]
    TestsFailed { failed: usize },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from suitehook-core.
    #[error("{0}")]
    Core(#[from] SuitehookError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General / command error         |
    /// | 2    | Configuration error             |
    /// | 5    | One or more cases failed        |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(SuitehookError::Config(_)) => 2,
            Self::TestsFailed { .. } => 5,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}
