//! Clip sequencing.
//!
//! Accumulates heterogeneous clips (code-animation renders, browser
//! recordings) in arrival order into one final video. Every admitted clip
//! must carry audio matching its video duration, and every concatenation is
//! re-checked so a desynced video is never silently accumulated.

use thiserror::Error;

use crate::models::{durations_match, AudioTrack, Clip, VideoTrack};

/// Errors from the clip sequencer.
///
/// `MissingAudio` and `AudioVideoMismatch` are contract violations by the
/// caller; `Integrity` means an upstream component lied about a duration.
/// All of them abort the run.
#[derive(Debug, Error)]
pub enum SequencerError {
    /// The clip has no audio track; audio is required for concatenation.
    #[error("Clip has no audio track; audio is required for concatenation")]
    MissingAudio,

    /// The clip's audio and video durations disagree.
    #[error("Clip audio duration {audio_secs}s does not match video duration {video_secs}s")]
    AudioVideoMismatch { audio_secs: f64, video_secs: f64 },

    /// A concatenation produced a total duration other than the sum of its
    /// parts, or left the audio and video totals out of step.
    #[error("Concatenation integrity failure on {track} track: expected {expected}s, got {actual}s")]
    Integrity {
        track: &'static str,
        expected: f64,
        actual: f64,
    },
}

/// Receives clips in arrival order and owns the running final video.
///
/// Each generation run gets its own sequencer; nothing is shared across
/// runs.
#[derive(Debug, Default)]
pub struct ClipSequencer {
    final_video: Option<(VideoTrack, AudioTrack)>,
    clips_added: usize,
}

impl ClipSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clips appended so far.
    pub fn clip_count(&self) -> usize {
        self.clips_added
    }

    /// Duration of the running output, in seconds (0 when empty).
    pub fn total_duration_secs(&self) -> f64 {
        self.final_video
            .as_ref()
            .map(|(video, _)| video.duration_secs())
            .unwrap_or(0.0)
    }

    /// Append a clip to the running output.
    ///
    /// Precondition, checked before any state changes: the clip carries an
    /// audio track whose duration equals the video track's. The first clip
    /// becomes the output verbatim; later clips are concatenated end-to-end,
    /// video with video and audio with audio.
    ///
    /// Postcondition, checked after every concatenation: the new totals are
    /// the old totals plus the appended durations, and the audio and video
    /// totals agree. Any mismatch is fatal.
    pub fn add_clip(&mut self, clip: Clip) -> Result<(), SequencerError> {
        let video_secs = clip.duration_secs();
        let (video, audio) = clip.into_parts();
        let audio = audio.ok_or(SequencerError::MissingAudio)?;

        if !durations_match(audio.duration_secs(), video_secs) {
            return Err(SequencerError::AudioVideoMismatch {
                audio_secs: audio.duration_secs(),
                video_secs,
            });
        }

        match self.final_video.take() {
            None => {
                tracing::debug!(duration_secs = video_secs, "Adding first clip");
                self.final_video = Some((video, audio));
            }
            Some((current_video, current_audio)) => {
                tracing::debug!(duration_secs = video_secs, "Adding next clip");

                let expected_video = current_video.duration_secs() + video.duration_secs();
                let expected_audio = current_audio.duration_secs() + audio.duration_secs();

                let merged_video = VideoTrack::concat(vec![current_video, video]);
                let merged_audio = AudioTrack::concat(vec![current_audio, audio]);

                if !durations_match(merged_video.duration_secs(), expected_video) {
                    return Err(SequencerError::Integrity {
                        track: "video",
                        expected: expected_video,
                        actual: merged_video.duration_secs(),
                    });
                }
                if !durations_match(merged_audio.duration_secs(), expected_audio) {
                    return Err(SequencerError::Integrity {
                        track: "audio",
                        expected: expected_audio,
                        actual: merged_audio.duration_secs(),
                    });
                }
                if !durations_match(merged_audio.duration_secs(), merged_video.duration_secs()) {
                    return Err(SequencerError::Integrity {
                        track: "audio-vs-video",
                        expected: merged_video.duration_secs(),
                        actual: merged_audio.duration_secs(),
                    });
                }

                self.final_video = Some((merged_video, merged_audio));
            }
        }

        self.clips_added += 1;
        Ok(())
    }

    /// Take the assembled final video.
    ///
    /// `None` means no clips were ever added; callers must treat that as the
    /// defined empty result, not persist it as output.
    pub fn finalize(self) -> Option<Clip> {
        self.final_video
            .map(|(video, audio)| Clip::new(video, Some(audio)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(video_secs: f64, audio_secs: f64) -> Clip {
        Clip::new(
            VideoTrack::planned(video_secs),
            Some(AudioTrack::silence(audio_secs)),
        )
    }

    #[test]
    fn finalize_without_clips_is_empty() {
        let sequencer = ClipSequencer::new();
        assert!(sequencer.finalize().is_none());
    }

    #[test]
    fn first_clip_becomes_output_verbatim() {
        let mut sequencer = ClipSequencer::new();
        sequencer.add_clip(clip(3.0, 3.0)).unwrap();

        assert_eq!(sequencer.clip_count(), 1);
        let out = sequencer.finalize().unwrap();
        assert!(durations_match(out.duration_secs(), 3.0));
    }

    #[test]
    fn appended_clips_sum_durations() {
        let mut sequencer = ClipSequencer::new();
        sequencer.add_clip(clip(3.0, 3.0)).unwrap();
        sequencer.add_clip(clip(2.0, 2.0)).unwrap();

        let out = sequencer.finalize().unwrap();
        assert!(durations_match(out.duration_secs(), 5.0));
        assert!(durations_match(out.audio().unwrap().duration_secs(), 5.0));
    }

    #[test]
    fn mismatched_clip_rejected_before_mutation() {
        let mut sequencer = ClipSequencer::new();
        sequencer.add_clip(clip(3.0, 3.0)).unwrap();

        let err = sequencer.add_clip(clip(3.0, 2.9)).unwrap_err();
        assert!(matches!(err, SequencerError::AudioVideoMismatch { .. }));

        // Running total unchanged.
        assert_eq!(sequencer.clip_count(), 1);
        assert!(durations_match(sequencer.total_duration_secs(), 3.0));
    }

    #[test]
    fn clip_without_audio_rejected() {
        let mut sequencer = ClipSequencer::new();
        let silent = Clip::new(VideoTrack::planned(1.0), None);
        let err = sequencer.add_clip(silent).unwrap_err();
        assert!(matches!(err, SequencerError::MissingAudio));
        assert_eq!(sequencer.clip_count(), 0);
    }

    #[test]
    fn order_of_appends_is_preserved() {
        let mut sequencer = ClipSequencer::new();
        sequencer.add_clip(clip(1.0, 1.0)).unwrap();
        sequencer.add_clip(clip(2.0, 2.0)).unwrap();
        sequencer.add_clip(clip(0.5, 0.5)).unwrap();

        let out = sequencer.finalize().unwrap();
        match out.video().source() {
            crate::models::VideoSource::Concat(parts) => {
                // ((1.0 + 2.0) + 0.5): the last appended clip is the tail.
                assert_eq!(parts.len(), 2);
                assert!(durations_match(parts[0].duration_secs(), 3.0));
                assert!(durations_match(parts[1].duration_secs(), 0.5));
            }
            other => panic!("expected concatenated video, got {:?}", other),
        }
    }
}
