//! Synthesis engines for speechgate.
//!
//! A [`Handler`] validates a request, picks the cloud or the local engine
//! and returns encoded audio:
//!
//! - **cloud**: a [`CloudSynthesizer`] returns MP3 bytes as-is.
//! - **local**: a [`LocalModel`], loaded once through the [`ModelLoader`],
//!   returns a [`Waveform`] which is concatenated and wrapped in WAV.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use speechgate_engine::{Handler, HandlerConfig, ModelLoader, TtsRequest};
//! use speechgate_engine::adapters::{EspeakFactory, GttsAdapter};
//!
//! let cloud = Arc::new(GttsAdapter::new(speechgate_gtts::Client::new()?));
//! let local = Arc::new(ModelLoader::new(EspeakFactory::new(Default::default())));
//! let handler = Handler::new(cloud, local, HandlerConfig::default());
//!
//! let out = handler.handle(TtsRequest {
//!     text: Some("안녕하세요".into()),
//!     engine: Some("cloud".into()),
//!     ..Default::default()
//! }).await?;
//! assert_eq!(out.media_type.as_str(), "audio/mpeg");
//! ```

mod adapter;
pub mod adapters;
mod error;
mod handler;
mod loader;
mod request;
mod wav;
mod waveform;

pub use adapter::{CloudSynthesizer, LocalModel, ModelCapabilities, ModelFactory, VoiceOptions};
pub use error::{AdapterError, TtsError};
pub use handler::{DEFAULT_LANGUAGE, Handler, HandlerConfig};
pub use loader::{LoaderState, ModelHandle, ModelLoader};
pub use request::{EngineKind, MediaType, SynthesisRequest, SynthesisResult, TtsRequest};
pub use wav::{WAV_HEADER_LEN, encode_wav};
pub use waveform::{AudioSpec, Synthesized, Waveform};
