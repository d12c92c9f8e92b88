//! Google Translate text-to-speech client for Rust.
//!
//! This crate speaks the same `batchexecute` protocol the Google Translate
//! web page uses to read text aloud, and returns MP3 audio.
//!
//! # Example
//!
//! ```rust,no_run
//! use speechgate_gtts::{Client, SpeechRequest};
//!
//! # async fn run() -> speechgate_gtts::Result<()> {
//! let client = Client::new()?;
//! let response = client
//!     .speech()
//!     .synthesize(&SpeechRequest::new("Hello, world!", "en"))
//!     .await?;
//! std::fs::write("hello.mp3", &response.audio)?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod http;
pub mod lang;
mod speech;
pub mod tokenizer;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use lang::{resolve_language, supported_languages};
pub use speech::{SpeechRequest, SpeechResponse, SpeechService};
