//! espeak-ng speech synthesizer driver.
//!
//! espeak-ng is driven as a child process. Loading a [`Model`] probes the
//! binary and enumerates the installed languages and voice variants;
//! synthesis renders text sentence by sentence into 16-bit PCM.
//!
//! # Usage
//!
//! ```no_run
//! use speechgate_espeak::{Model, ModelConfig, Voice};
//!
//! let model = Model::load(ModelConfig::default()).unwrap();
//! let out = model
//!     .synthesize("Hello there. How are you?", Voice { language: Some("en"), variant: Some("f3") })
//!     .unwrap();
//! assert_eq!(out.chunks.len(), 2);
//! ```

mod error;
pub mod model;
pub mod text;
pub mod voices;

pub use error::EspeakError;
pub use model::{Model, ModelConfig, Synthesis, Voice};
