//! Parsing of `espeak-ng --voices` listings.
//!
//! Both the language listing and the `--voices=variant` listing share one
//! column layout:
//!
//! ```text
//! Pty Language       Age/Gender VoiceName          File                 Other Languages
//!  5  af              --/M      Afrikaans          gmw/af
//!  5  variant         --/F      f3                 !v/f3
//! ```

/// One row of a voice listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceEntry {
    pub language: String,
    pub name: String,
    pub file: String,
}

impl VoiceEntry {
    /// The identifier used after `+` to select a variant, e.g. `f3`.
    pub fn variant_id(&self) -> &str {
        self.file.rsplit('/').next().unwrap_or(&self.file)
    }
}

/// Parses a listing, skipping the header and malformed rows.
pub fn parse_voice_list(output: &str) -> Vec<VoiceEntry> {
    output
        .lines()
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 5 || cols[0] == "Pty" {
                return None;
            }
            Some(VoiceEntry {
                language: cols[1].to_string(),
                name: cols[3].to_string(),
                file: cols[4].to_string(),
            })
        })
        .collect()
}
