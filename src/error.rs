//! Error handling for mailbox

use thiserror::Error;

/// Main error type for mailbox
#[derive(Error, Debug, Clone)]
pub enum MailboxError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid letter '{input}': expected a single letter A-Z")]
    InvalidLetter { input: String },

    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    #[error("Failed to load word list from {source_name}: {message}")]
    CorpusLoad {
        source_name: String,
        message: String,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("CLI error: {message}")]
    Cli { message: String },
}

impl MailboxError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid letter error
    pub fn invalid_letter(input: impl Into<String>) -> Self {
        Self::InvalidLetter {
            input: input.into(),
        }
    }

    /// Create an invalid query error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create a corpus load error
    pub fn corpus_load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorpusLoad {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Errors that end the session instead of being recovered per query
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CorpusLoad { .. }
                | Self::Network { .. }
                | Self::Timeout { .. }
                | Self::Io { .. }
                | Self::Config { .. }
                | Self::Internal { .. }
        )
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or MAILBOX_* variables", message)
            }
            Self::InvalidLetter { input } => {
                format!("⚠️  '{}' is not a letter\n💡 Pick a single letter from A to Z", input)
            }
            Self::InvalidQuery { message } => {
                format!("⚠️  Invalid query: {}", message)
            }
            Self::CorpusLoad { source_name, message } => {
                format!("❌ Could not load the word list from {}: {}\n💡 Use --file to load a local copy", source_name, message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Timeout { operation, timeout_secs } => {
                format!("⏱️  Operation '{}' timed out after {}s\n💡 Try increasing MAILBOX_TIMEOUT_SECS", operation, timeout_secs)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
        }
    }
}

/// Convert from common error types
impl From<reqwest::Error> for MailboxError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::timeout("HTTP request", 30)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_status() {
            Self::network("Unexpected HTTP status", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for MailboxError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for MailboxError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<inquire::InquireError> for MailboxError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => Self::cli("prompt cancelled"),
            other => Self::cli(other.to_string()),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MailboxError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::MailboxError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::MailboxError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! cli_error {
    ($msg:expr) => {
        $crate::error::MailboxError::cli($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::MailboxError::cli(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let error = MailboxError::invalid_letter("7");
        assert!(error.to_string().contains("'7'"));

        let error = MailboxError::corpus_load("words.txt", "missing");
        assert!(error.to_string().contains("words.txt"));
        assert!(error.to_string().contains("missing"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(MailboxError::corpus_load("url", "boom").is_fatal());
        assert!(MailboxError::io("denied", None).is_fatal());
        assert!(!MailboxError::invalid_letter("").is_fatal());
        assert!(!MailboxError::invalid_query("count").is_fatal());
        assert!(!MailboxError::cli("bad flag").is_fatal());
    }

    #[test]
    fn test_macros() {
        let error = config_error!("MAILBOX_COUNT must be {} to {}", 1, 10);
        assert!(matches!(error, MailboxError::Config { .. }));
        assert!(error.to_string().contains("1 to 10"));

        let error = cli_error!("unknown flag");
        assert!(error.user_message().contains("--help"));
    }

    #[test]
    fn test_inquire_cancel_maps_to_cli() {
        let error: MailboxError = inquire::InquireError::OperationCanceled.into();
        assert!(matches!(error, MailboxError::Cli { .. }));
    }
}
