//! Visual renderer seam.
//!
//! The core hands a renderer everything it needs (the segment timing, the
//! intro/outro scripts, the URL to visit) plus a target duration hint, and
//! expects back a silent video track. A renderer must honor the hint closely
//! enough that the sequencer's duration checks pass; the core does not
//! correct renderer drift.

use thiserror::Error;

use crate::models::{TimingRecord, VideoTrack};

/// Errors from a visual renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The rendering engine failed.
    #[error("Render engine failure: {0}")]
    Engine(String),

    /// The renderer could not read or write its working files.
    #[error("Render I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// What to render.
#[derive(Debug)]
pub enum RenderSpec<'a> {
    /// A terminal typing animation over the given timing records.
    CodeAnimation {
        records: &'a [TimingRecord],
        intro_code: &'a str,
        outro_code: &'a str,
    },
    /// A recorded browser visit.
    BrowserVisit { url: &'a str },
}

/// One render request: the content plus the duration the resulting track
/// must have for the narration to line up.
#[derive(Debug)]
pub struct RenderRequest<'a> {
    pub spec: RenderSpec<'a>,
    /// Target duration of the rendered track, in seconds.
    pub target_duration_secs: f64,
}

/// A collaborator that renders a silent video track.
pub trait VisualRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<VideoTrack, RenderError>;
}

/// Display profile handed to renderers at construction.
#[derive(Debug, Clone)]
pub struct RenderProfile {
    pub theme: String,
    pub width: u32,
    pub height: u32,
}

/// Renderer that plans tracks instead of drawing frames.
///
/// Emits a metadata-only track of exactly the hinted duration. Used for
/// dry runs and tests; a real terminal or browser engine slots in behind
/// the same trait.
#[derive(Debug, Clone)]
pub struct PlanRenderer {
    profile: RenderProfile,
}

impl PlanRenderer {
    pub fn new(profile: RenderProfile) -> Self {
        Self { profile }
    }
}

impl VisualRenderer for PlanRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<VideoTrack, RenderError> {
        match &request.spec {
            RenderSpec::CodeAnimation { records, .. } => {
                tracing::info!(
                    segments = records.len(),
                    target_secs = request.target_duration_secs,
                    theme = %self.profile.theme,
                    width = self.profile.width,
                    height = self.profile.height,
                    "Planned code animation"
                );
            }
            RenderSpec::BrowserVisit { url } => {
                tracing::info!(
                    url,
                    target_secs = request.target_duration_secs,
                    width = self.profile.width,
                    height = self.profile.height,
                    "Planned browser recording"
                );
            }
        }
        Ok(VideoTrack::planned(request.target_duration_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::durations_match;

    fn profile() -> RenderProfile {
        RenderProfile {
            theme: "Cobalt Neon".into(),
            width: 1920,
            height: 1080,
        }
    }

    #[test]
    fn plan_renderer_honors_the_hint_exactly() {
        let mut renderer = PlanRenderer::new(profile());
        let track = renderer
            .render(&RenderRequest {
                spec: RenderSpec::BrowserVisit {
                    url: "http://localhost:5000/",
                },
                target_duration_secs: 4.25,
            })
            .unwrap();
        assert!(durations_match(track.duration_secs(), 4.25));
    }

    #[test]
    fn plan_renderer_handles_code_animations() {
        let mut renderer = PlanRenderer::new(profile());
        let track = renderer
            .render(&RenderRequest {
                spec: RenderSpec::CodeAnimation {
                    records: &[],
                    intro_code: "clear",
                    outro_code: "clear",
                },
                target_duration_secs: 1.0,
            })
            .unwrap();
        assert!(durations_match(track.duration_secs(), 1.0));
    }
}
