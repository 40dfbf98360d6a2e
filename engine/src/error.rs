//! Error types for shell engine operations.
//!
//! Covers the failure modes of the interactive loop and configuration
//! loading. Command-level problems (bad arguments, handler failures) are
//! not errors at this level; they are printed and the loop returns to the
//! prompt.

use thiserror::Error;

/// Errors that can occur while running the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// File or terminal I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line editor failure.
    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Signal handler installation failure.
    #[error("signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),

    /// Options file parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ShellError`].
pub type Result<T> = std::result::Result<T, ShellError>;
