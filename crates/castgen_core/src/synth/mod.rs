//! Speech synthesis seam.
//!
//! The core never talks to a speech service directly. It consumes the
//! [`SpeechSynthesizer`] trait and reads durations off the returned audio
//! handles. Which backend to use is explicit configuration
//! ([`TtsBackend`]), selected by the caller rather than discovered from the
//! process environment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AudioTrack;

/// Errors from a speech synthesis backend.
///
/// Synthesis failures are never retried by the core; they propagate to the
/// driver unchanged.
#[derive(Debug, Error)]
pub enum SpeechSynthesisError {
    /// The speech service could not produce audio.
    #[error("Speech service failure: {0}")]
    Service(String),

    /// Writing the synthesized audio to disk failed.
    #[error("Failed to write synthesized audio: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the synthesized audio failed.
    #[error("Failed to encode synthesized audio: {0}")]
    Encode(#[from] hound::Error),
}

/// A collaborator that turns narration text into an audio handle with a
/// known duration.
pub trait SpeechSynthesizer {
    fn generate_audio(&self, text: &str) -> Result<AudioTrack, SpeechSynthesisError>;
}

/// Which speech backend a run uses.
///
/// Credentials live in the configuration, not in environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum TtsBackend {
    /// Google text-to-speech.
    Google,
    /// Voicemaker text-to-speech with an API token.
    Voicemaker { token: String },
    /// The built-in offline backend that paces narration by word count.
    #[default]
    Paced,
}

impl std::fmt::Display for TtsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsBackend::Google => write!(f, "google"),
            TtsBackend::Voicemaker { .. } => write!(f, "voicemaker"),
            TtsBackend::Paced => write!(f, "paced"),
        }
    }
}

/// Offline backend that estimates narration duration from a speaking rate
/// and writes a silence WAV of that length to a scratch file.
///
/// Deterministic for a given text, so timing calculations over it are
/// reproducible. Used by the planning CLI and by tests.
#[derive(Debug, Clone)]
pub struct PacedSynthesizer {
    words_per_minute: f64,
    sample_rate: u32,
}

impl Default for PacedSynthesizer {
    fn default() -> Self {
        Self {
            words_per_minute: 150.0,
            sample_rate: 24_000,
        }
    }
}

impl PacedSynthesizer {
    pub fn new(words_per_minute: f64) -> Self {
        Self {
            words_per_minute,
            ..Self::default()
        }
    }

    /// Number of samples the silence file needs for the given text.
    fn sample_count(&self, text: &str) -> usize {
        let words = text.split_whitespace().count().max(1);
        let secs = words as f64 * 60.0 / self.words_per_minute;
        (secs * self.sample_rate as f64).round() as usize
    }
}

impl SpeechSynthesizer for PacedSynthesizer {
    fn generate_audio(&self, text: &str) -> Result<AudioTrack, SpeechSynthesisError> {
        if text.trim().is_empty() {
            return Err(SpeechSynthesisError::Service(
                "narration text is empty".to_string(),
            ));
        }

        let samples = self.sample_count(text);

        let file = tempfile::Builder::new()
            .prefix("castgen-narration-")
            .suffix(".wav")
            .tempfile()?;

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(file.path(), spec)?;
        for _ in 0..samples {
            writer.write_sample(0i16)?;
        }
        writer.finalize()?;

        // Duration is quantized to whole samples so the handle's duration
        // matches the file exactly.
        let duration_secs = samples as f64 / self.sample_rate as f64;
        tracing::debug!(duration_secs, "Synthesized paced narration audio");

        Ok(AudioTrack::from_scratch(file.into_temp_path(), duration_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{durations_match, AudioSource};

    #[test]
    fn paced_duration_follows_word_count() {
        let synth = PacedSynthesizer::new(120.0);
        let audio = synth.generate_audio("one two three four").unwrap();
        // 4 words at 120 wpm = 2 seconds.
        assert!(durations_match(audio.duration_secs(), 2.0));
    }

    #[test]
    fn paced_output_is_scratch_backed() {
        let synth = PacedSynthesizer::default();
        let audio = synth.generate_audio("hello world").unwrap();
        match audio.source() {
            AudioSource::Scratch(path) => assert!(path.exists()),
            other => panic!("expected scratch-backed audio, got {:?}", other),
        }
    }

    #[test]
    fn scratch_file_removed_when_last_handle_drops() {
        let synth = PacedSynthesizer::default();
        let audio = synth.generate_audio("hello world").unwrap();
        let path = match audio.source() {
            AudioSource::Scratch(path) => path.to_path_buf(),
            other => panic!("expected scratch-backed audio, got {:?}", other),
        };
        let copy = audio.clone();
        drop(audio);
        assert!(path.exists());
        drop(copy);
        assert!(!path.exists());
    }

    #[test]
    fn empty_text_is_a_service_error() {
        let synth = PacedSynthesizer::default();
        let err = synth.generate_audio("   ").unwrap_err();
        assert!(matches!(err, SpeechSynthesisError::Service(_)));
    }

    #[test]
    fn same_text_synthesizes_same_duration() {
        let synth = PacedSynthesizer::default();
        let a = synth.generate_audio("repeatable narration text").unwrap();
        let b = synth.generate_audio("repeatable narration text").unwrap();
        assert!(durations_match(a.duration_secs(), b.duration_secs()));
    }
}
