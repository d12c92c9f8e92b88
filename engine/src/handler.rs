//! Request handler: validation, engine routing and audio encoding.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::adapter::{CloudSynthesizer, VoiceOptions};
use crate::error::TtsError;
use crate::loader::ModelLoader;
use crate::request::{EngineKind, MediaType, SynthesisRequest, SynthesisResult, TtsRequest};
use crate::wav::encode_wav;

/// Language used when neither the request nor the config names one.
pub const DEFAULT_LANGUAGE: &str = "ko";

/// Defaults applied to requests that leave fields out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub default_engine: EngineKind,
    pub default_language: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            default_engine: EngineKind::Local,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Routes synthesis requests to the cloud adapter or the local model.
pub struct Handler {
    cloud: Arc<dyn CloudSynthesizer>,
    local: Arc<ModelLoader>,
    config: HandlerConfig,
}

impl Handler {
    pub fn new(cloud: Arc<dyn CloudSynthesizer>, local: Arc<ModelLoader>, config: HandlerConfig) -> Self {
        Self { cloud, local, config }
    }

    pub fn loader(&self) -> &Arc<ModelLoader> {
        &self.local
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Handles a wire request.
    pub async fn handle(&self, request: TtsRequest) -> Result<SynthesisResult, TtsError> {
        let request = request.into_synthesis(self.config.default_engine)?;
        self.synthesize(&request).await
    }

    /// Handles a validated request.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, TtsError> {
        request.validate()?;

        let started = Instant::now();
        let result = match request.engine {
            EngineKind::Cloud => self.synthesize_cloud(request).await,
            EngineKind::Local => self.synthesize_local(request).await,
        };

        match &result {
            Ok(out) => info!(
                engine = %request.engine,
                chars = request.text.chars().count(),
                bytes = out.audio.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "handler: synthesized"
            ),
            Err(e) if e.is_client_error() => {
                warn!(engine = %request.engine, kind = e.kind(), error = %e, "handler: rejected")
            }
            Err(e) => error!(engine = %request.engine, kind = e.kind(), error = %e, "handler: failed"),
        }
        result
    }

    async fn synthesize_cloud(&self, request: &SynthesisRequest) -> Result<SynthesisResult, TtsError> {
        let language = request
            .language
            .as_deref()
            .unwrap_or(&self.config.default_language);
        debug!(language, "handler: cloud request");

        let audio = self.cloud.synthesize(&request.text, language).await?;
        if audio.is_empty() {
            return Err(TtsError::SynthesisFailure("cloud engine returned no audio".to_string()));
        }

        Ok(SynthesisResult {
            audio: Bytes::from(audio),
            media_type: MediaType::Mpeg,
            sample_rate: None,
        })
    }

    async fn synthesize_local(&self, request: &SynthesisRequest) -> Result<SynthesisResult, TtsError> {
        let handle = self.local.get().await?;

        let caps = handle.model().capabilities();
        if caps.single_speaker && request.speaker.is_some() {
            return Err(TtsError::InvalidInput(
                "local model has a single voice, speaker is not supported".to_string(),
            ));
        }
        if caps.single_language && request.language.is_some() {
            return Err(TtsError::InvalidInput(
                "local model has a single language, language is not supported".to_string(),
            ));
        }

        let options = VoiceOptions {
            language: if caps.single_language {
                None
            } else {
                Some(
                    request
                        .language
                        .clone()
                        .unwrap_or_else(|| self.config.default_language.clone()),
                )
            },
            speaker: request.speaker.clone(),
        };
        debug!(language = ?options.language, speaker = ?options.speaker, "handler: local request");

        let text = request.text.clone();
        let synthesized = tokio::task::spawn_blocking(move || handle.synthesize(&text, &options))
            .await
            .map_err(|e| TtsError::SynthesisFailure(format!("inference task failed: {e}")))??;

        synthesized.spec.validate().map_err(TtsError::SynthesisFailure)?;
        if synthesized.waveform.is_empty() {
            return Err(TtsError::SynthesisFailure("local model produced no samples".to_string()));
        }

        let spec = synthesized.spec;
        let samples = synthesized.waveform.into_contiguous();
        let wav = encode_wav(&samples, spec).map_err(|e| TtsError::SynthesisFailure(format!("wav encoding: {e}")))?;

        Ok(SynthesisResult {
            audio: Bytes::from(wav),
            media_type: MediaType::Wav,
            sample_rate: Some(spec.sample_rate),
        })
    }
}
