//! Duration oracle and per-segment timing calculation.
//!
//! For every narration/visual pair this module decides how long the shorter
//! track must be padded so both finish together. The visual duration is a
//! fixed-rate typing model (ms per character); the narration duration is
//! whatever the speech backend actually produced. The two are reconciled
//! toward the audio, never the other way around.

use thiserror::Error;

use crate::models::{Segment, TimingRecord};
use crate::synth::{SpeechSynthesisError, SpeechSynthesizer};

/// Errors from timing calculation.
#[derive(Debug, Error)]
pub enum TimingError {
    #[error(transparent)]
    Synthesis(#[from] SpeechSynthesisError),
}

/// Duration of the typing animation for the given visual content, in
/// milliseconds.
///
/// Models a fixed-rate character-by-character animation; it has no awareness
/// of the rendering engine's real timing.
pub fn visual_duration_ms(visual_content: &str, typing_speed_ms_per_char: u64) -> u64 {
    typing_speed_ms_per_char * visual_content.chars().count() as u64
}

/// Computes wait/pad durations for an ordered list of segments.
pub struct TimingCalculator<'a> {
    synthesizer: &'a dyn SpeechSynthesizer,
    typing_speed_ms_per_char: u64,
}

impl<'a> TimingCalculator<'a> {
    pub fn new(synthesizer: &'a dyn SpeechSynthesizer, typing_speed_ms_per_char: u64) -> Self {
        Self {
            synthesizer,
            typing_speed_ms_per_char,
        }
    }

    /// Compute one [`TimingRecord`] per segment, in input order.
    ///
    /// Segments are independent: no wait value depends on another segment.
    /// The result is a pure function of the segment list and the
    /// synthesizer's responses.
    pub fn compute_timing(&self, segments: &[Segment]) -> Result<Vec<TimingRecord>, TimingError> {
        segments
            .iter()
            .map(|segment| self.time_segment(segment))
            .collect()
    }

    fn time_segment(&self, segment: &Segment) -> Result<TimingRecord, TimingError> {
        let visual_content = segment.visual_content();
        let narration_audio = self.synthesizer.generate_audio(&segment.narration_text)?;

        let visual_ms = visual_duration_ms(&visual_content, self.typing_speed_ms_per_char);
        let narration_ms = (narration_audio.duration_secs() * 1000.0).round() as u64;

        // At most one of these is non-zero; both are zero on an exact tie.
        let wait_for_visual_ms = visual_ms.saturating_sub(narration_ms);
        let wait_for_narration_ms = narration_ms.saturating_sub(visual_ms);

        tracing::debug!(
            visual_ms,
            narration_ms,
            wait_for_visual_ms,
            wait_for_narration_ms,
            "Computed segment timing"
        );

        Ok(TimingRecord {
            wait_for_visual_ms,
            wait_for_narration_ms,
            narration_audio,
            narration_text: segment.narration_text.clone(),
            visual_content,
        })
    }
}
