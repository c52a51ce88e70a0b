//! castgen core - timing and clip assembly for narrated tutorial videos.
//!
//! This crate contains the synchronization logic that keeps narration audio
//! and visual tracks (code-typing animations, browser recordings) aligned,
//! and the sequencer that concatenates the resulting clips into one video.
//! Real speech synthesis, rendering engines, and subshell control plug in
//! behind the traits in [`synth`], [`render`], and [`shell`].

pub mod audio;
pub mod config;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod sequencer;
pub mod shell;
pub mod synth;
pub mod timing;

pub use audio::NarrationAssembler;
pub use config::{ConfigError, ProjectConfig, Settings};
pub use models::{AudioTrack, Clip, Command, Segment, TimingRecord, VideoTrack};
pub use pipeline::{GenerationPipeline, PipelineError};
pub use sequencer::{ClipSequencer, SequencerError};
pub use timing::TimingCalculator;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
