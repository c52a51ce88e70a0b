use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;

use castgen_core::logging::{init_tracing, LogLevel};
use castgen_core::render::{PlanRenderer, RenderProfile};
use castgen_core::shell::{ShellError, SubshellController};
use castgen_core::synth::{PacedSynthesizer, TtsBackend};
use castgen_core::{GenerationPipeline, ProjectConfig, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "castgen",
    version,
    about = "Assemble a narrated tutorial video plan from a JSON project file"
)]
struct Cli {
    /// Path to the JSON project file.
    project: PathBuf,

    /// Where to write the assembly manifest (default: <output_video_name>.plan.json).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Typing speed of the code animation, in milliseconds per character.
    #[arg(long)]
    typing_speed: Option<u64>,

    /// Pause between narrated segments, in milliseconds.
    #[arg(long)]
    base_delay: Option<u64>,

    /// Increase log verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Summary of an assembled run, written next to the configured output name.
#[derive(Debug, Serialize)]
struct AssemblyManifest {
    output_video_name: String,
    duration_secs: f64,
    audio_duration_secs: f64,
    commands: usize,
    typing_speed_ms_per_char: u64,
    base_delay_ms: u64,
}

/// Subshell controller for planning runs: logs each action instead of
/// driving a PTY.
#[derive(Debug, Default)]
struct PlanShell;

impl SubshellController for PlanShell {
    fn start(&mut self, label: &str) -> Result<(), ShellError> {
        tracing::info!(label, "Planned: start subshell");
        Ok(())
    }

    fn run(&mut self, label: &str, command: &str, expect: Option<&str>) -> Result<(), ShellError> {
        tracing::info!(label, command, ?expect, "Planned: run in subshell");
        Ok(())
    }

    fn terminate(&mut self, label: &str) -> Result<(), ShellError> {
        tracing::info!(label, "Planned: terminate subshell");
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(if cli.verbose > 0 {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    let project = ProjectConfig::load(&cli.project)
        .with_context(|| format!("loading project {}", cli.project.display()))?;

    let mut settings = Settings::default();
    if let Some(speed) = cli.typing_speed {
        settings.typing_speed_ms_per_char = speed;
    }
    if let Some(delay) = cli.base_delay {
        settings.base_delay_ms = delay;
    }

    let synthesizer = match &settings.tts {
        TtsBackend::Paced => PacedSynthesizer::default(),
        other => bail!(
            "the '{other}' speech backend needs its external engine; \
             only the built-in paced backend is available here"
        ),
    };

    let mut renderer = PlanRenderer::new(RenderProfile {
        theme: settings.theme.clone(),
        width: settings.width,
        height: settings.height,
    });
    let mut shell = PlanShell;

    let typing_speed = settings.typing_speed_ms_per_char;
    let base_delay = settings.base_delay_ms;

    let mut pipeline = GenerationPipeline::new(settings, &synthesizer, &mut renderer, &mut shell);
    let final_clip = pipeline.run(&project)?;

    let Some(clip) = final_clip else {
        println!("No clips were produced; nothing to write.");
        return Ok(());
    };

    let audio_duration_secs = clip
        .audio()
        .map(|audio| audio.duration_secs())
        .unwrap_or(0.0);

    let manifest = AssemblyManifest {
        output_video_name: project.output_video_name.clone(),
        duration_secs: clip.duration_secs(),
        audio_duration_secs,
        commands: project.commands.len(),
        typing_speed_ms_per_char: typing_speed,
        base_delay_ms: base_delay,
    };

    let manifest_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.plan.json", project.output_video_name)));
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&manifest_path, json)
        .with_context(|| format!("writing manifest {}", manifest_path.display()))?;

    println!(
        "Assembled {:.2}s of video ({} commands); manifest written to {}",
        manifest.duration_secs,
        manifest.commands,
        manifest_path.display()
    );

    Ok(())
}
