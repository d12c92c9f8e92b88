//! Error types for the Google Translate TTS client.

use thiserror::Error;

/// Result type alias for gTTS operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gTTS operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The TTS endpoint answered with a non-success status.
    #[error("gtts: {status} from TTS API. Probable cause: {cause}")]
    Api { status: u16, cause: String },

    /// The endpoint answered 200 but carried no audio line.
    #[error("gtts: no audio stream in response (language '{lang}')")]
    NoAudio { lang: String },

    /// Language code not in the supported table.
    #[error("language not supported: {0}")]
    UnsupportedLanguage(String),

    /// Nothing speakable left after cleaning the text.
    #[error("no text to speak")]
    EmptyText,

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding error.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Creates an API error from an HTTP status, inferring a probable cause.
    pub fn api(status: u16, tld: &str) -> Self {
        Error::Api {
            status,
            cause: probable_cause(status, tld).to_string(),
        }
    }

    /// Returns true if the error was caused by the caller's input rather
    /// than by the network or the remote service.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::UnsupportedLanguage(_) | Error::EmptyText)
    }

    /// Returns true if this is a server-side error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}

fn probable_cause(status: u16, tld: &str) -> &'static str {
    match status {
        403 => "Bad token or upstream API changes",
        404 if tld != "com" => "Unsupported tld",
        s if s >= 500 => "Upstream API error. Try again later.",
        _ => "Unknown",
    }
}
