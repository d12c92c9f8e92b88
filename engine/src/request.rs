//! Synthesis request and result types.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::TtsError;

/// Synthesis backend selected per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Remote TTS service returning compressed audio.
    Cloud,
    /// In-process model returning raw samples.
    #[default]
    Local,
}

impl EngineKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Cloud => "cloud",
            EngineKind::Local => "local",
        }
    }

    /// Media type of this engine's successful output.
    pub const fn media_type(&self) -> MediaType {
        match self {
            EngineKind::Cloud => MediaType::Mpeg,
            EngineKind::Local => MediaType::Wav,
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cloud" => Ok(EngineKind::Cloud),
            "local" => Ok(EngineKind::Local),
            other => Err(TtsError::UnsupportedEngine(other.to_string())),
        }
    }
}

/// Media type of a synthesis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Mpeg,
    Wav,
}

impl MediaType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaType::Mpeg => "audio/mpeg",
            MediaType::Wav => "audio/wav",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of `POST /api/tts`.
///
/// Every field is optional here so that a missing `text` surfaces as
/// [`TtsError::InvalidInput`] instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
}

impl TtsRequest {
    /// Validates the wire request, filling in `default_engine` when the
    /// request has no `engine` field. A present but blank engine is
    /// rejected like any other unknown name.
    ///
    /// Text is checked before the engine, so an empty text is always
    /// reported as `InvalidInput`.
    pub fn into_synthesis(self, default_engine: EngineKind) -> Result<SynthesisRequest, TtsError> {
        let text = self.text.unwrap_or_default();
        check_text(&text)?;

        let engine = match self.engine {
            Some(name) => name.parse()?,
            None => default_engine,
        };

        Ok(SynthesisRequest {
            text,
            engine,
            language: non_blank(self.language),
            speaker: non_blank(self.speaker),
        })
    }
}

/// A validated synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub engine: EngineKind,
    pub language: Option<String>,
    pub speaker: Option<String>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, engine: EngineKind) -> Self {
        Self {
            text: text.into(),
            engine,
            language: None,
            speaker: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// Checks the text invariant; requests built in code skip
    /// [`TtsRequest::into_synthesis`].
    pub fn validate(&self) -> Result<(), TtsError> {
        check_text(&self.text)
    }
}

/// Audio produced for one request.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio: Bytes,
    pub media_type: MediaType,
    /// Sample rate written into the WAV header; `None` for compressed audio.
    pub sample_rate: Option<u32>,
}

fn check_text(text: &str) -> Result<(), TtsError> {
    if text.trim().is_empty() {
        return Err(TtsError::InvalidInput("text must not be empty".to_string()));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(json: &str) -> TtsRequest {
        serde_json::from_str(json).expect("wire request")
    }

    #[test]
    fn test_engine_parse() {
        assert_eq!("cloud".parse::<EngineKind>(), Ok(EngineKind::Cloud));
        assert_eq!(" local ".parse::<EngineKind>(), Ok(EngineKind::Local));
        assert_eq!(
            "carrier-pigeon".parse::<EngineKind>(),
            Err(TtsError::UnsupportedEngine("carrier-pigeon".into()))
        );
        assert!("google".parse::<EngineKind>().is_err());
    }

    #[test]
    fn test_media_types() {
        assert_eq!(EngineKind::Cloud.media_type().as_str(), "audio/mpeg");
        assert_eq!(EngineKind::Local.media_type().as_str(), "audio/wav");
    }

    #[test]
    fn test_into_synthesis_defaults() {
        let req = wire(r#"{"text":"Hello"}"#)
            .into_synthesis(EngineKind::Local)
            .expect("valid");
        assert_eq!(req, SynthesisRequest::new("Hello", EngineKind::Local));
    }

    #[test]
    fn test_into_synthesis_full() {
        let req = wire(r#"{"text":"Hello","engine":"cloud","language":"en","speaker":" "}"#)
            .into_synthesis(EngineKind::Local)
            .expect("valid");
        assert_eq!(
            req,
            SynthesisRequest::new("Hello", EngineKind::Cloud).with_language("en")
        );
    }

    #[test]
    fn test_missing_or_empty_text() {
        for json in [r#"{}"#, r#"{"text":""}"#, r#"{"text":"   "}"#, r#"{"text":null}"#] {
            let err = wire(json).into_synthesis(EngineKind::Cloud).unwrap_err();
            assert!(matches!(err, TtsError::InvalidInput(_)), "{json}: {err:?}");
        }
    }

    #[test]
    fn test_empty_text_wins_over_bad_engine() {
        let err = wire(r#"{"text":"","engine":"carrier-pigeon"}"#)
            .into_synthesis(EngineKind::Local)
            .unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
    }

    #[test]
    fn test_unsupported_engine() {
        let err = wire(r#"{"text":"Hi","engine":"carrier-pigeon"}"#)
            .into_synthesis(EngineKind::Local)
            .unwrap_err();
        assert_eq!(err, TtsError::UnsupportedEngine("carrier-pigeon".into()));

        for blank in [r#"{"text":"Hi","engine":""}"#, r#"{"text":"Hi","engine":"   "}"#] {
            let err = wire(blank).into_synthesis(EngineKind::Local).unwrap_err();
            assert_eq!(err, TtsError::UnsupportedEngine(String::new()));
        }

        let request = wire(r#"{"text":"Hi","engine":null}"#)
            .into_synthesis(EngineKind::Cloud)
            .expect("null engine uses the default");
        assert_eq!(request.engine, EngineKind::Cloud);
    }

    #[test]
    fn test_validate_built_request() {
        assert!(SynthesisRequest::new("", EngineKind::Cloud).validate().is_err());
        assert!(SynthesisRequest::new("ok", EngineKind::Cloud).validate().is_ok());
    }
}
