//! Engine adapter interfaces.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AdapterError;
use crate::waveform::Synthesized;

/// A remote synthesis backend returning already-encoded audio.
#[async_trait]
pub trait CloudSynthesizer: Send + Sync {
    /// Synthesizes `text` in `language` into MP3 bytes.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, AdapterError>;
}

/// Voice selection passed to a local model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceOptions {
    pub language: Option<String>,
    pub speaker: Option<String>,
}

/// What a local model can honour beyond the text itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelCapabilities {
    /// The model has exactly one voice; a requested speaker is rejected.
    pub single_speaker: bool,
    /// The model speaks exactly one language; a requested language is rejected.
    pub single_language: bool,
}

/// An in-process synthesis model producing raw samples.
///
/// Calls block for the whole inference and are run on the blocking pool.
pub trait LocalModel: Send + Sync {
    fn synthesize(&self, text: &str, options: &VoiceOptions) -> Result<Synthesized, AdapterError>;

    fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::default()
    }

    /// Whether concurrent `synthesize` calls are safe. Non-reentrant
    /// models are serialized by the loader.
    fn is_reentrant(&self) -> bool {
        false
    }
}

/// Builds the local model. Called at most once per loader.
pub trait ModelFactory: Send + Sync {
    fn load(&self) -> Result<Arc<dyn LocalModel>, AdapterError>;
}

impl<F> ModelFactory for F
where
    F: Fn() -> Result<Arc<dyn LocalModel>, AdapterError> + Send + Sync,
{
    fn load(&self) -> Result<Arc<dyn LocalModel>, AdapterError> {
        self()
    }
}
