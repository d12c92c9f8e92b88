//! Error types for request handling.

use thiserror::Error;

/// Terminal outcome of a failed synthesis request.
///
/// `InvalidInput` and `UnsupportedEngine` are the caller's to fix;
/// `ModelUnavailable` and `SynthesisFailure` are server-side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TtsError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("unsupported engine {0:?}, use 'cloud' or 'local'")]
    UnsupportedEngine(String),

    #[error("local model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("{0}")]
    SynthesisFailure(String),
}

impl TtsError {
    /// Returns true if the caller must change the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TtsError::InvalidInput(_) | TtsError::UnsupportedEngine(_)
        )
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TtsError::InvalidInput(_) => "invalid_input",
            TtsError::UnsupportedEngine(_) => "unsupported_engine",
            TtsError::ModelUnavailable(_) => "model_unavailable",
            TtsError::SynthesisFailure(_) => "synthesis_failure",
        }
    }
}

/// Error reported by an engine adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The backend refused the request's input (language, speaker, text).
    #[error("{0}")]
    Rejected(String),

    /// The backend failed: network, process or inference error.
    #[error("{0}")]
    Backend(String),
}

impl From<AdapterError> for TtsError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Rejected(msg) => TtsError::InvalidInput(msg),
            AdapterError::Backend(msg) => TtsError::SynthesisFailure(msg),
        }
    }
}
