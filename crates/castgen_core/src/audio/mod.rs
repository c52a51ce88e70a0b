//! Narration track assembly.
//!
//! Takes the per-segment timing records and merges their narration audio
//! into one continuous track, inserting the inter-segment pause each record
//! calls for. Concatenation is strictly sequential; there is no overlap and
//! no cross-fade.

use crate::models::{ms_to_secs, AudioTrack, TimingRecord};

/// Fixed pause between segments, in milliseconds, on top of the computed
/// per-segment wait.
pub const DEFAULT_BASE_DELAY_MS: u64 = 500;

/// Merges per-segment narration clips into one track.
#[derive(Debug, Clone)]
pub struct NarrationAssembler {
    base_delay_ms: u64,
}

impl Default for NarrationAssembler {
    fn default() -> Self {
        Self {
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }
}

impl NarrationAssembler {
    pub fn new(base_delay_ms: u64) -> Self {
        Self { base_delay_ms }
    }

    /// Concatenate narration audio for the given records, in input order.
    ///
    /// Each record's narration gets `base_delay + wait_for_visual` ms of
    /// silence appended before the next one starts. An empty record list
    /// means there is no narration to merge, which is `None` rather than an
    /// error.
    pub fn assemble(&self, records: &[TimingRecord]) -> Option<AudioTrack> {
        if records.is_empty() {
            tracing::debug!("No narration clips to merge");
            return None;
        }

        let mut padded = Vec::with_capacity(records.len());
        for record in records {
            let pause_ms = self.base_delay_ms + record.wait_for_visual_ms;
            tracing::debug!(pause_ms, "Appending pause to narration clip");

            padded.push(AudioTrack::concat(vec![
                record.narration_audio.clone(),
                AudioTrack::silence(ms_to_secs(pause_ms)),
            ]));
        }

        let merged = AudioTrack::concat(padded);
        tracing::debug!(
            duration_secs = merged.duration_secs(),
            clips = records.len(),
            "Merged narration track"
        );
        Some(merged)
    }
}
