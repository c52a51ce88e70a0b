//! Core data structures: tracks, clips, segments, commands, timing records.

mod clip;
mod segment;
mod timing;

pub use clip::{
    durations_match, ms_to_secs, AudioSource, AudioTrack, Clip, VideoSource, VideoTrack,
    DURATION_EPSILON,
};
pub use segment::{Command, Segment};
pub use timing::TimingRecord;
