//! Track and clip handles.
//!
//! Tracks are opaque to the core: a source descriptor plus a duration.
//! The core only reasons about durations; decoding and rendering the
//! underlying media belongs to the engines behind the collaborator traits.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempPath;

/// Tolerance for comparing track durations, in seconds.
///
/// Track durations come from external engines as floating-point seconds,
/// so equality checks allow a microsecond of slack instead of requiring
/// bit-exact values.
pub const DURATION_EPSILON: f64 = 1e-6;

/// Compare two durations (in seconds) within [`DURATION_EPSILON`].
pub fn durations_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= DURATION_EPSILON
}

/// Convert a millisecond count to floating-point seconds.
pub fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Where an audio track's content comes from.
#[derive(Clone)]
pub enum AudioSource {
    /// Encoded audio on disk, owned by the caller.
    File(PathBuf),
    /// Audio staged in a scratch file. The file is deleted when the last
    /// handle referencing it drops, including on error paths.
    Scratch(Arc<TempPath>),
    /// Generated silence.
    Silence,
    /// Ordered, strictly sequential concatenation of other tracks.
    Concat(Vec<AudioTrack>),
}

impl fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioSource::File(path) => f.debug_tuple("File").field(path).finish(),
            AudioSource::Scratch(path) => {
                f.debug_tuple("Scratch").field(&path.to_path_buf()).finish()
            }
            AudioSource::Silence => write!(f, "Silence"),
            AudioSource::Concat(tracks) => f.debug_tuple("Concat").field(tracks).finish(),
        }
    }
}

/// An opaque audio handle with a known duration.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    source: AudioSource,
    duration_secs: f64,
}

impl AudioTrack {
    /// Audio backed by a caller-owned file.
    pub fn from_file(path: impl Into<PathBuf>, duration_secs: f64) -> Self {
        Self {
            source: AudioSource::File(path.into()),
            duration_secs,
        }
    }

    /// Audio backed by a scratch file that lives as long as any handle to it.
    pub fn from_scratch(path: TempPath, duration_secs: f64) -> Self {
        Self {
            source: AudioSource::Scratch(Arc::new(path)),
            duration_secs,
        }
    }

    /// A silent track of the given duration.
    pub fn silence(duration_secs: f64) -> Self {
        Self {
            source: AudioSource::Silence,
            duration_secs,
        }
    }

    /// Concatenate tracks end-to-end. The result's duration is the sum of
    /// the inputs' durations; no overlap, no cross-fade.
    pub fn concat(tracks: Vec<AudioTrack>) -> Self {
        let duration_secs = tracks.iter().map(|t| t.duration_secs).sum();
        Self {
            source: AudioSource::Concat(tracks),
            duration_secs,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn source(&self) -> &AudioSource {
        &self.source
    }
}

/// Where a video track's content comes from.
#[derive(Debug, Clone)]
pub enum VideoSource {
    /// Encoded video on disk.
    File(PathBuf),
    /// A planned track: duration is known, no frames rendered yet.
    Planned,
    /// Ordered concatenation of other tracks.
    Concat(Vec<VideoTrack>),
}

/// An opaque video handle with a known duration.
#[derive(Debug, Clone)]
pub struct VideoTrack {
    source: VideoSource,
    duration_secs: f64,
}

impl VideoTrack {
    /// Video backed by a file on disk.
    pub fn from_file(path: impl Into<PathBuf>, duration_secs: f64) -> Self {
        Self {
            source: VideoSource::File(path.into()),
            duration_secs,
        }
    }

    /// A planned track of the given duration.
    pub fn planned(duration_secs: f64) -> Self {
        Self {
            source: VideoSource::Planned,
            duration_secs,
        }
    }

    /// Concatenate tracks end-to-end; duration is the sum of the inputs'.
    pub fn concat(tracks: Vec<VideoTrack>) -> Self {
        let duration_secs = tracks.iter().map(|t| t.duration_secs).sum();
        Self {
            source: VideoSource::Concat(tracks),
            duration_secs,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn source(&self) -> &VideoSource {
        &self.source
    }
}

/// A paired audio + video unit.
///
/// Every clip admitted into the sequencer carries an audio track whose
/// duration equals the video track's; the sequencer enforces that.
#[derive(Debug, Clone)]
pub struct Clip {
    video: VideoTrack,
    audio: Option<AudioTrack>,
}

impl Clip {
    pub fn new(video: VideoTrack, audio: Option<AudioTrack>) -> Self {
        Self { video, audio }
    }

    /// The clip's duration, defined by its video track.
    pub fn duration_secs(&self) -> f64 {
        self.video.duration_secs()
    }

    pub fn video(&self) -> &VideoTrack {
        &self.video
    }

    pub fn audio(&self) -> Option<&AudioTrack> {
        self.audio.as_ref()
    }

    pub fn into_parts(self) -> (VideoTrack, Option<AudioTrack>) {
        (self.video, self.audio)
    }
}
