//! The espeak-ng synthesizer model.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use hound::{SampleFormat, WavReader};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::EspeakError;
use crate::text::split_sentences;
use crate::voices::parse_voice_list;

/// Default binary looked up on `PATH`.
pub const DEFAULT_BINARY: &str = "espeak-ng";

/// Default language when a request names none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default upper bound on one synthesized sentence.
pub const DEFAULT_MAX_SENTENCE_CHARS: usize = 300;

/// Settings used to load a [`Model`].
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// espeak-ng executable, either a path or a name on `PATH`.
    pub binary: PathBuf,
    /// Language used when a request names none.
    pub default_language: String,
    /// Speaking rate in words per minute; espeak's own default when unset.
    pub words_per_minute: Option<u32>,
    /// Sentences longer than this are cut at whitespace before synthesis.
    pub max_sentence_chars: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            default_language: DEFAULT_LANGUAGE.to_string(),
            words_per_minute: None,
            max_sentence_chars: DEFAULT_MAX_SENTENCE_CHARS,
        }
    }
}

/// Voice selection for one synthesis call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Voice<'a> {
    /// Language code, e.g. `en-us` or `ko`.
    pub language: Option<&'a str>,
    /// Voice variant, e.g. `f3`.
    pub variant: Option<&'a str>,
}

/// Output of one synthesis call: one chunk of 16-bit samples per sentence.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub sample_rate: u32,
    pub channels: u16,
    pub chunks: Vec<Vec<i16>>,
}

/// A loaded espeak-ng installation.
///
/// Loading probes the binary and enumerates its languages and variants.
/// Every synthesis call is an independent child process, so one `Model`
/// may be used from many threads at once.
#[derive(Debug)]
pub struct Model {
    config: ModelConfig,
    version: String,
    languages: Vec<String>,
    variants: Vec<String>,
}

impl Model {
    /// Probes the configured binary and enumerates installed voices.
    pub fn load(config: ModelConfig) -> Result<Self, EspeakError> {
        let version = run_capture(&config.binary, &["--version"])?;
        let version = version.lines().next().unwrap_or_default().trim().to_string();

        let mut languages: Vec<String> = parse_voice_list(&run_capture(&config.binary, &["--voices"])?)
            .into_iter()
            .map(|e| e.language.to_ascii_lowercase())
            .collect();
        languages.sort();
        languages.dedup();

        let mut variants: Vec<String> =
            parse_voice_list(&run_capture(&config.binary, &["--voices=variant"])?)
                .iter()
                .map(|e| e.variant_id().to_string())
                .collect();
        variants.sort();
        variants.dedup();

        if languages.is_empty() {
            return Err(EspeakError::Format(format!(
                "{} reports no installed voices",
                config.binary.display()
            )));
        }

        info!(
            version = %version,
            languages = languages.len(),
            variants = variants.len(),
            "espeak: model loaded"
        );

        Ok(Self {
            config,
            version,
            languages,
            variants,
        })
    }

    /// Builds a model from already-known voice tables without probing.
    pub fn from_parts(
        config: ModelConfig,
        version: impl Into<String>,
        languages: Vec<String>,
        variants: Vec<String>,
    ) -> Self {
        Self {
            config,
            version: version.into(),
            languages,
            variants,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Resolves a requested language to an installed one.
    ///
    /// Accepts an exact (case-insensitive) match, or a bare code such as
    /// `en` when a regional voice like `en-us` is installed.
    pub fn resolve_language(&self, code: &str) -> Result<String, EspeakError> {
        let wanted = code.trim().replace('_', "-").to_ascii_lowercase();
        if wanted.is_empty() {
            return Err(EspeakError::UnsupportedLanguage(code.to_string()));
        }
        if self.languages.iter().any(|l| *l == wanted) {
            return Ok(wanted);
        }
        let prefix = format!("{wanted}-");
        if let Some(regional) = self.languages.iter().find(|l| l.starts_with(&prefix)) {
            return Ok(regional.clone());
        }
        Err(EspeakError::UnsupportedLanguage(code.to_string()))
    }

    /// Resolves a requested variant to an installed one.
    pub fn resolve_variant(&self, variant: &str) -> Result<String, EspeakError> {
        self.variants
            .iter()
            .find(|v| v.eq_ignore_ascii_case(variant.trim()))
            .cloned()
            .ok_or_else(|| EspeakError::UnknownVariant(variant.to_string()))
    }

    /// Builds the `-v` argument for a voice selection.
    pub fn voice_arg(&self, voice: Voice<'_>) -> Result<String, EspeakError> {
        let language = self.resolve_language(voice.language.unwrap_or(&self.config.default_language))?;
        match voice.variant {
            Some(v) => Ok(format!("{}+{}", language, self.resolve_variant(v)?)),
            None => Ok(language),
        }
    }

    /// Synthesizes `text` sentence by sentence.
    ///
    /// Blocks until every sentence has been rendered.
    pub fn synthesize(&self, text: &str, voice: Voice<'_>) -> Result<Synthesis, EspeakError> {
        let voice_arg = self.voice_arg(voice)?;
        let sentences = split_sentences(text, self.config.max_sentence_chars);
        if sentences.is_empty() {
            return Err(EspeakError::EmptyText);
        }

        let mut chunks = Vec::with_capacity(sentences.len());
        let mut layout: Option<(u32, u16)> = None;
        for (idx, sentence) in sentences.iter().enumerate() {
            let (spec, samples) = self.render(&voice_arg, sentence)?;
            debug!(sentence = idx, samples = samples.len(), voice = %voice_arg, "espeak: rendered");

            match layout {
                None => layout = Some((spec.sample_rate, spec.channels)),
                Some((rate, channels)) if rate == spec.sample_rate && channels == spec.channels => {}
                Some((rate, channels)) => {
                    return Err(EspeakError::Format(format!(
                        "sentence {} rendered at {} Hz/{} ch, expected {} Hz/{} ch",
                        idx, spec.sample_rate, spec.channels, rate, channels
                    )));
                }
            }
            chunks.push(samples);
        }

        let (sample_rate, channels) = layout.ok_or(EspeakError::EmptyText)?;
        Ok(Synthesis {
            sample_rate,
            channels,
            chunks,
        })
    }

    /// Renders one sentence into a scoped temporary WAV file and decodes it.
    fn render(&self, voice_arg: &str, sentence: &str) -> Result<(hound::WavSpec, Vec<i16>), EspeakError> {
        let staged = NamedTempFile::new()?;

        let mut cmd = Command::new(&self.config.binary);
        cmd.arg("-v").arg(voice_arg);
        if let Some(wpm) = self.config.words_per_minute {
            cmd.arg("-s").arg(wpm.to_string());
        }
        cmd.arg("-w")
            .arg(staged.path())
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| EspeakError::Spawn {
            binary: self.config.binary.display().to_string(),
            source,
        })?;
        let output = feed_and_wait(child, sentence.as_bytes())?;
        if !output.status.success() {
            return Err(EspeakError::Command {
                binary: self.config.binary.display().to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        decode_wav(staged.path())
    }
}

/// Writes `input` to the child's stdin, then waits for it to exit.
///
/// The child is reaped even when the write fails.
fn feed_and_wait(mut child: Child, input: &[u8]) -> Result<Output, EspeakError> {
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(input) {
            drop(stdin);
            let _ = child.wait_with_output();
            return Err(e.into());
        }
    }
    Ok(child.wait_with_output()?)
}

fn decode_wav(path: &Path) -> Result<(hound::WavSpec, Vec<i16>), EspeakError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(EspeakError::Format(format!(
            "{:?} at {} bits",
            spec.sample_format, spec.bits_per_sample
        )));
    }
    let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
    Ok((spec, samples))
}

/// Runs the binary with `args` and returns its stdout.
fn run_capture(binary: &Path, args: &[&str]) -> Result<String, EspeakError> {
    let output = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| EspeakError::Spawn {
            binary: binary.display().to_string(),
            source,
        })?;
    if !output.status.success() {
        return Err(EspeakError::Command {
            binary: binary.display().to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
