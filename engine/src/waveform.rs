//! Raw waveform output of local models.

/// Layout of the samples a local model produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioSpec {
    pub const fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".to_string());
        }
        if self.channels == 0 {
            return Err("channel count must be positive".to_string());
        }
        Ok(())
    }
}

/// 16-bit samples, either in one buffer or in ordered chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Waveform {
    Single(Vec<i16>),
    Chunks(Vec<Vec<i16>>),
}

impl Waveform {
    /// Builds a waveform from chunks, collapsing a lone chunk to `Single`.
    pub fn from_chunks(mut chunks: Vec<Vec<i16>>) -> Self {
        if chunks.len() == 1 {
            Waveform::Single(chunks.remove(0))
        } else {
            Waveform::Chunks(chunks)
        }
    }

    /// Total number of samples across all chunks.
    pub fn len(&self) -> usize {
        match self {
            Waveform::Single(samples) => samples.len(),
            Waveform::Chunks(chunks) => chunks.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates chunks in order into one buffer.
    pub fn into_contiguous(self) -> Vec<i16> {
        match self {
            Waveform::Single(samples) => samples,
            Waveform::Chunks(chunks) => {
                let mut out = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
                for chunk in chunks {
                    out.extend_from_slice(&chunk);
                }
                out
            }
        }
    }
}

/// Output of one local synthesis call.
#[derive(Debug, Clone)]
pub struct Synthesized {
    pub spec: AudioSpec,
    pub waveform: Waveform,
}
