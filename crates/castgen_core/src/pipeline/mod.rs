//! Generation pipeline.
//!
//! Drives one run end-to-end: for each command in file order, compute
//! segment timing, merge the narration track, render the matching visual
//! track, and hand the combined clip to the sequencer. Strictly sequential;
//! narration and visual content for segment *i* always land at the same
//! position in the output.

use thiserror::Error;

use crate::audio::NarrationAssembler;
use crate::config::{ProjectConfig, Settings};
use crate::models::{Clip, Command};
use crate::render::{RenderError, RenderRequest, RenderSpec, VisualRenderer};
use crate::sequencer::{ClipSequencer, SequencerError};
use crate::shell::{SessionTable, ShellError, SubshellController};
use crate::synth::{SpeechSynthesisError, SpeechSynthesizer};
use crate::timing::{TimingCalculator, TimingError};

/// Top-level pipeline error with command context.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A command failed during execution.
    #[error("Command {index} ({kind}) failed: {source}")]
    CommandFailed {
        index: usize,
        kind: &'static str,
        #[source]
        source: CommandError,
    },
}

/// Error from executing a single command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Timing(#[from] TimingError),

    #[error(transparent)]
    Synthesis(#[from] SpeechSynthesisError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Sequence(#[from] SequencerError),

    /// A code animation produced no narration to merge.
    #[error("Code animation produced no narration to merge")]
    EmptyNarration,
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Runs a project's commands against the injected collaborators.
///
/// Each run owns its own sequencer and session table; nothing is shared
/// across runs.
pub struct GenerationPipeline<'a> {
    settings: Settings,
    synthesizer: &'a dyn SpeechSynthesizer,
    renderer: &'a mut dyn VisualRenderer,
    shell: &'a mut dyn SubshellController,
}

impl<'a> GenerationPipeline<'a> {
    pub fn new(
        settings: Settings,
        synthesizer: &'a dyn SpeechSynthesizer,
        renderer: &'a mut dyn VisualRenderer,
        shell: &'a mut dyn SubshellController,
    ) -> Self {
        Self {
            settings,
            synthesizer,
            renderer,
            shell,
        }
    }

    /// Execute every command in order and return the assembled final video.
    ///
    /// `Ok(None)` is the defined empty result: the project produced no
    /// clips. Any failure aborts the run; there is no partial success.
    pub fn run(&mut self, project: &ProjectConfig) -> PipelineResult<Option<Clip>> {
        let mut sessions = SessionTable::new();
        let mut sequencer = ClipSequencer::new();

        for (index, command) in project.commands.iter().enumerate() {
            tracing::info!(index, kind = command.kind(), "Executing command");
            self.execute(command, project, &mut sessions, &mut sequencer)
                .map_err(|source| PipelineError::CommandFailed {
                    index,
                    kind: command.kind(),
                    source,
                })?;
        }

        for label in sessions.active() {
            tracing::warn!(label, "Subshell still running at end of project");
        }

        tracing::info!(
            clips = sequencer.clip_count(),
            duration_secs = sequencer.total_duration_secs(),
            "Run complete"
        );
        Ok(sequencer.finalize())
    }

    fn execute(
        &mut self,
        command: &Command,
        project: &ProjectConfig,
        sessions: &mut SessionTable,
        sequencer: &mut ClipSequencer,
    ) -> Result<(), CommandError> {
        match command {
            Command::CodeAnimation { segments } => {
                let calculator =
                    TimingCalculator::new(self.synthesizer, self.settings.typing_speed_ms_per_char);
                let records = calculator.compute_timing(segments)?;

                let assembler = NarrationAssembler::new(self.settings.base_delay_ms);
                let audio = assembler
                    .assemble(&records)
                    .ok_or(CommandError::EmptyNarration)?;

                let intro_code = project.intro_script();
                let outro_code = project.outro_script();
                let video = self.renderer.render(&RenderRequest {
                    spec: RenderSpec::CodeAnimation {
                        records: &records,
                        intro_code: &intro_code,
                        outro_code: &outro_code,
                    },
                    target_duration_secs: audio.duration_secs(),
                })?;

                sequencer.add_clip(Clip::new(video, Some(audio)))?;
            }
            Command::BrowserInteraction { url, narration } => {
                let audio = self.synthesizer.generate_audio(narration)?;
                let video = self.renderer.render(&RenderRequest {
                    spec: RenderSpec::BrowserVisit { url },
                    target_duration_secs: audio.duration_secs(),
                })?;

                sequencer.add_clip(Clip::new(video, Some(audio)))?;
            }
            Command::StartSubshell { name } => {
                sessions.register(name)?;
                self.shell.start(name)?;
            }
            Command::RunInSubshell {
                subshell,
                command,
                expect,
            } => {
                sessions.ensure(subshell)?;
                self.shell.run(subshell, command, expect.as_deref())?;
            }
            Command::TerminateSubshell { name } => {
                sessions.release(name)?;
                self.shell.terminate(name)?;
            }
        }
        Ok(())
    }
}
