use std::sync::Arc;

use speechgate_espeak::{EspeakError, Model, ModelConfig, Voice};

use crate::adapter::{LocalModel, ModelFactory, VoiceOptions};
use crate::error::AdapterError;
use crate::waveform::{AudioSpec, Synthesized, Waveform};

/// Local engine backed by espeak-ng.
pub struct EspeakAdapter {
    model: Model,
}

impl EspeakAdapter {
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

impl From<EspeakError> for AdapterError {
    fn from(err: EspeakError) -> Self {
        if err.is_invalid_input() {
            AdapterError::Rejected(err.to_string())
        } else {
            AdapterError::Backend(err.to_string())
        }
    }
}

impl LocalModel for EspeakAdapter {
    fn synthesize(&self, text: &str, options: &VoiceOptions) -> Result<Synthesized, AdapterError> {
        let voice = Voice {
            language: options.language.as_deref(),
            variant: options.speaker.as_deref(),
        };
        let out = self.model.synthesize(text, voice)?;

        Ok(Synthesized {
            spec: AudioSpec {
                sample_rate: out.sample_rate,
                channels: out.channels,
            },
            waveform: Waveform::from_chunks(out.chunks),
        })
    }

    // Each call runs its own child process.
    fn is_reentrant(&self) -> bool {
        true
    }
}

/// Loads an [`EspeakAdapter`] from a [`ModelConfig`].
pub struct EspeakFactory {
    config: ModelConfig,
}

impl EspeakFactory {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

impl ModelFactory for EspeakFactory {
    fn load(&self) -> Result<Arc<dyn LocalModel>, AdapterError> {
        let model = Model::load(self.config.clone()).map_err(|e| AdapterError::Backend(e.to_string()))?;
        Ok(Arc::new(EspeakAdapter::new(model)))
    }
}
