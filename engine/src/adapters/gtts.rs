use async_trait::async_trait;
use speechgate_gtts as gtts;

use crate::adapter::CloudSynthesizer;
use crate::error::AdapterError;

/// Cloud engine backed by Google Translate TTS.
pub struct GttsAdapter {
    client: gtts::Client,
    slow: bool,
}

impl GttsAdapter {
    pub fn new(client: gtts::Client) -> Self {
        Self {
            client,
            slow: false,
        }
    }

    /// Reads every request at the slower speaking rate.
    pub fn slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }
}

impl From<gtts::Error> for AdapterError {
    fn from(err: gtts::Error) -> Self {
        if err.is_invalid_input() {
            AdapterError::Rejected(err.to_string())
        } else {
            AdapterError::Backend(err.to_string())
        }
    }
}

#[async_trait]
impl CloudSynthesizer for GttsAdapter {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, AdapterError> {
        let request = gtts::SpeechRequest {
            text: text.to_string(),
            lang: language.to_string(),
            slow: self.slow,
        };
        let response = self.client.speech().synthesize(&request).await?;
        Ok(response.audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        let err: AdapterError = gtts::Error::UnsupportedLanguage("xx".into()).into();
        assert!(matches!(err, AdapterError::Rejected(_)));

        let err: AdapterError = gtts::Error::api(503, "com").into();
        assert!(matches!(err, AdapterError::Backend(_)));
    }
}
