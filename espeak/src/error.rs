//! Error types for the espeak-ng driver.

use thiserror::Error;

/// Errors returned by the espeak-ng driver.
#[derive(Debug, Error)]
pub enum EspeakError {
    #[error("espeak: failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("espeak: {binary} exited with {status}: {stderr}")]
    Command {
        binary: String,
        status: String,
        stderr: String,
    },

    #[error("espeak: unsupported language {0:?}")]
    UnsupportedLanguage(String),

    #[error("espeak: unknown voice variant {0:?}")]
    UnknownVariant(String),

    #[error("espeak: no text to speak")]
    EmptyText,

    #[error("espeak: unexpected audio format: {0}")]
    Format(String),

    #[error("espeak: wav: {0}")]
    Wav(#[from] hound::Error),

    #[error("espeak: io: {0}")]
    Io(#[from] std::io::Error),
}

impl EspeakError {
    /// Returns true if the error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            EspeakError::UnsupportedLanguage(_)
                | EspeakError::UnknownVariant(_)
                | EspeakError::EmptyText
        )
    }
}
