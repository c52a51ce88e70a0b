//! Per-segment timing results.

use super::clip::AudioTrack;

/// Wait/pad durations for one segment, plus the narration audio they were
/// computed against.
///
/// At most one of the two wait fields is non-zero; both are zero when the
/// narration and visual durations tie exactly.
#[derive(Debug, Clone)]
pub struct TimingRecord {
    /// Extra idle time (ms) the visual track holds after typing completes,
    /// so the narration can finish.
    pub wait_for_visual_ms: u64,
    /// Extra pause (ms) inserted into the narration track so it does not
    /// move on before this segment's visual content finishes rendering.
    pub wait_for_narration_ms: u64,
    /// The synthesized narration audio for this segment.
    pub narration_audio: AudioTrack,
    /// The narration text the audio was synthesized from.
    pub narration_text: String,
    /// The newline-joined visual content the typing duration was computed
    /// from.
    pub visual_content: String,
}
