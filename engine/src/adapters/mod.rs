//! Concrete engine adapters.

mod espeak;
mod gtts;

pub use espeak::{EspeakAdapter, EspeakFactory};
pub use gtts::GttsAdapter;
