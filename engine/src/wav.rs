//! WAV container encoding.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::waveform::AudioSpec;

/// Size of the canonical PCM WAV header.
pub const WAV_HEADER_LEN: usize = 44;

/// Encodes interleaved 16-bit samples into an in-memory PCM WAV file.
pub fn encode_wav(samples: &[i16], spec: AudioSpec) -> Result<Vec<u8>, hound::Error> {
    let wav_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_LEN + samples.len() * 2));
    let mut writer = WavWriter::new(&mut cursor, wav_spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}
