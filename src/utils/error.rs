/*
 * Structured error handling for the response generator.
 * I'm keeping the category/severity/log_error shape of the original
 * AppError but trimming it to the error kinds this crate actually
 * produces (§7) - there is no HTTP layer here to map onto status codes.
 */

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Custom Result type for consistent error handling throughout the crate.
pub type Result<T> = std::result::Result<T, ResponseGenError>;

/// All error kinds the response generator can produce.
#[derive(Debug, thiserror::Error)]
pub enum ResponseGenError {
    #[error("persistence error while resolving '{context}': {source}")]
    Persistence {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to allocate a random cache name: {0}")]
    NameAllocation(String),

    #[error("failed to serialize page {page} of cache '{cache_name}': {source}")]
    Serialization {
        cache_name: String,
        page: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("impossible state: {0}")]
    ImpossibleState(String),

    #[error("filesystem error at '{path}': {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Configuration(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ResponseGenError {
    pub fn persistence<C: Into<String>>(context: C, source: impl Into<anyhow::Error>) -> Self {
        Self::Persistence {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Error severity, used only to pick the tracing level - there's no
    /// HTTP response to shape here.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ResponseGenError::Persistence { .. } => ErrorSeverity::High,
            ResponseGenError::NameAllocation(_) => ErrorSeverity::High,
            ResponseGenError::Serialization { .. } => ErrorSeverity::Medium,
            ResponseGenError::UnknownKind(_) => ErrorSeverity::Low,
            ResponseGenError::ImpossibleState(_) => ErrorSeverity::Critical,
            ResponseGenError::Filesystem { .. } => ErrorSeverity::High,
            ResponseGenError::Configuration(_) => ErrorSeverity::Critical,
        }
    }

    /// Log at the level matching severity, with optional operation context.
    pub fn log_error(&self, context: Option<&str>) {
        let context_info = context.map(|c| format!(" [{}]", c)).unwrap_or_default();
        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::High => {
                error!("{}{}", context_info, self);
            }
            ErrorSeverity::Medium => {
                warn!("{}{}", context_info, self);
            }
            ErrorSeverity::Low => {
                tracing::debug!("{}{}", context_info, self);
            }
        }
    }
}

impl From<std::io::Error> for ResponseGenError {
    fn from(err: std::io::Error) -> Self {
        ResponseGenError::Filesystem {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ResponseGenError {
    fn from(err: serde_json::Error) -> Self {
        ResponseGenError::Serialization {
            cache_name: String::new(),
            page: 0,
            source: err,
        }
    }
}
