//! JSON project file: the ordered list of commands plus intro/outro code.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult};
use crate::models::Command;

fn default_output_video_name() -> String {
    "final_video.mp4".to_string()
}

/// A tutorial project as read from disk.
///
/// Commands execute in file order; that order is also the clip order of the
/// final video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Commands to execute, in order.
    #[serde(default)]
    pub commands: Vec<Command>,

    /// Code run before the first animation segment (also shown typed out).
    #[serde(default)]
    pub intro_code: Vec<String>,

    /// Code run after the last animation segment.
    #[serde(default)]
    pub outro_code: Vec<String>,

    /// File name of the assembled video.
    #[serde(default = "default_output_video_name")]
    pub output_video_name: String,
}

impl ProjectConfig {
    /// Load and validate a project from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate a project from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the constraints the pipeline relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        for (index, command) in self.commands.iter().enumerate() {
            match command {
                Command::CodeAnimation { segments } => {
                    if segments.is_empty() {
                        return Err(ConfigError::validation(format!(
                            "command {index}: code animation has no segments"
                        )));
                    }
                    for (seg_index, segment) in segments.iter().enumerate() {
                        if segment.narration_text.trim().is_empty() {
                            return Err(ConfigError::validation(format!(
                                "command {index}, segment {seg_index}: narration text is empty"
                            )));
                        }
                    }
                }
                Command::BrowserInteraction { url, narration } => {
                    if url.trim().is_empty() {
                        return Err(ConfigError::validation(format!(
                            "command {index}: browser interaction has no URL"
                        )));
                    }
                    if narration.trim().is_empty() {
                        return Err(ConfigError::validation(format!(
                            "command {index}: browser narration is empty"
                        )));
                    }
                }
                Command::StartSubshell { name } | Command::TerminateSubshell { name } => {
                    if name.trim().is_empty() {
                        return Err(ConfigError::validation(format!(
                            "command {index}: subshell label is empty"
                        )));
                    }
                }
                Command::RunInSubshell {
                    subshell, command, ..
                } => {
                    if subshell.trim().is_empty() {
                        return Err(ConfigError::validation(format!(
                            "command {index}: subshell label is empty"
                        )));
                    }
                    if command.trim().is_empty() {
                        return Err(ConfigError::validation(format!(
                            "command {index}: subshell command is empty"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Intro code joined into one script.
    pub fn intro_script(&self) -> String {
        self.intro_code.join("\n")
    }

    /// Outro code joined into one script.
    pub fn outro_script(&self) -> String {
        self.outro_code.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    const SAMPLE: &str = r#"{
        "intro_code": ["export BLAH=1", "clear"],
        "outro_code": ["clear"],
        "output_video_name": "tutorial.mp4",
        "commands": [
            { "type": "StartSubshell", "name": "server" },
            {
                "type": "RunInSubshell",
                "subshell": "server",
                "command": "python3 -m http.server &",
                "expect": "Serving HTTP"
            },
            {
                "type": "CodeAnimation",
                "segments": [
                    { "narration_text": "Print the variable.", "visual_lines": "echo $BLAH" }
                ]
            },
            {
                "type": "BrowserInteraction",
                "url": "http://localhost:8000/",
                "narration": "Here is the page we just served."
            },
            { "type": "TerminateSubshell", "name": "server" }
        ]
    }"#;

    #[test]
    fn parses_all_command_kinds() {
        let config = ProjectConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.commands.len(), 5);
        assert_eq!(config.output_video_name, "tutorial.mp4");
        assert_eq!(config.intro_script(), "export BLAH=1\nclear");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ProjectConfig::from_json(r#"{ "commands": [] }"#).unwrap();
        assert_eq!(config.output_video_name, "final_video.mp4");
        assert!(config.intro_code.is_empty());
    }

    #[test]
    fn empty_code_animation_rejected() {
        let config = ProjectConfig {
            commands: vec![Command::CodeAnimation { segments: vec![] }],
            intro_code: vec![],
            outro_code: vec![],
            output_video_name: default_output_video_name(),
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn empty_narration_rejected() {
        let config = ProjectConfig {
            commands: vec![Command::CodeAnimation {
                segments: vec![Segment::new("  ", vec!["echo hi".into()])],
            }],
            intro_code: vec![],
            outro_code: vec![],
            output_video_name: default_output_video_name(),
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ProjectConfig::load("/nonexistent/project.json").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
