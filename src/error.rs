use thiserror::Error;

/// Unified error type for release-selector operations
#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Missing package name: environment variable {var} is not set")]
    MissingPackageName { var: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error(
        "Command `{command}` failed with exit code {code}{detail}",
        detail = format_stderr(.stderr)
    )]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to execute `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid checkout mode: '{0}'")]
    UnknownMode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid release tag pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Convenience type alias for Results in release-selector
pub type Result<T> = std::result::Result<T, SelectorError>;

impl SelectorError {
    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        SelectorError::Usage(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SelectorError::Config(msg.into())
    }

    /// Process exit status for this failure. Every failure is terminal.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
