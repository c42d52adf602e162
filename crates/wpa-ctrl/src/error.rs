//! Error types for the control-socket client.
//!
//! Every command-issuing operation returns exactly one [`WpaError`] to its
//! caller. Scan-result decoding is the exception: it accumulates one
//! [`ParseError`] per malformed line alongside the entries that did parse.

use std::fmt;
use thiserror::Error;

/// Boxed cause carried by a [`ParseError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the control-socket client.
#[derive(Debug, Error)]
pub enum WpaError {
    /// Socket read or write failure. Fatal to the in-flight operation and
    /// never retried.
    #[error("control socket error: {message}")]
    Transport {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The reply text did not have the expected shape.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The caller supplied a value the `SET_NETWORK` encoder cannot serialize.
    #[error("unsupported value type {kind} for network field {field}")]
    UnsupportedValue { field: String, kind: String },

    /// The engine stopped before a reply arrived.
    #[error("control engine stopped before a reply arrived")]
    Closed,

    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for control-socket operations.
pub type Result<T> = std::result::Result<T, WpaError>;

impl From<std::io::Error> for WpaError {
    fn from(err: std::io::Error) -> Self {
        WpaError::Transport {
            message: err.to_string(),
            source: err,
        }
    }
}

impl WpaError {
    /// Create a transport error with context about what was being attempted.
    pub fn transport(err: std::io::Error, context: impl fmt::Display) -> Self {
        WpaError::Transport {
            message: format!("{}: {}", context, err),
            source: err,
        }
    }

    /// Whether this error came from the socket rather than the reply text.
    pub fn is_transport(&self) -> bool {
        matches!(self, WpaError::Transport { .. } | WpaError::Closed)
    }
}

/// Returned when a wpa_supplicant reply cannot be parsed.
///
/// Carries the offending line verbatim so callers can report exactly which
/// input defeated the decoder. An empty `line` means the reply had no usable
/// content at all (for example, a tabular reply without a header).
#[derive(Debug)]
pub struct ParseError {
    /// The line of output which could not be parsed.
    pub line: String,
    /// Nested cause, if any.
    pub source: Option<BoxError>,
}

impl ParseError {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            source: None,
        }
    }

    pub fn with_source(line: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            line: line.into(),
            source: Some(source.into()),
        }
    }

    /// A parse error for a reply with no content.
    pub fn empty() -> Self {
        Self::new("")
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse wpa_supplicant response")?;
        if !self.line.is_empty() {
            write!(f, ": {:?}", self.line)?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
