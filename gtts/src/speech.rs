//! Speech synthesis service.

use std::sync::Arc;

use tracing::debug;

use super::{
    error::{Error, Result},
    http::HttpClient,
    lang::resolve_language,
    tokenizer::{MAX_CHARS, split_text},
};

/// Speech synthesis service.
pub struct SpeechService {
    http: Arc<HttpClient>,
}

impl SpeechService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Synthesizes the request's text into MP3 audio.
    ///
    /// Long text is split into parts of at most 100 characters; each part
    /// is one request, and the MP3 frames of all parts are concatenated in
    /// order.
    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        let lang = resolve_language(&request.lang)
            .ok_or_else(|| Error::UnsupportedLanguage(request.lang.clone()))?;

        let parts = split_text(&request.text, MAX_CHARS);
        if parts.is_empty() {
            return Err(Error::EmptyText);
        }

        let mut audio = Vec::new();
        for (idx, part) in parts.iter().enumerate() {
            debug!(part = idx, chars = part.chars().count(), lang, "gtts: requesting part");
            let chunk = self.http.speak(part, lang, request.slow).await?;
            audio.extend_from_slice(&chunk);
        }

        Ok(SpeechResponse {
            audio,
            parts: parts.len(),
            lang: lang.to_string(),
        })
    }
}

/// Request for speech synthesis.
#[derive(Debug, Clone, Default)]
pub struct SpeechRequest {
    /// Text to synthesize.
    pub text: String,

    /// Language code, e.g. `en` or `ko`.
    pub lang: String,

    /// Read more slowly.
    pub slow: bool,
}

impl SpeechRequest {
    /// Creates a request at normal speed.
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            slow: false,
        }
    }
}

/// Response from speech synthesis.
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// MP3 audio bytes.
    pub audio: Vec<u8>,

    /// Number of requests the text was split into.
    pub parts: usize,

    /// Canonical language code that was sent.
    pub lang: String,
}
