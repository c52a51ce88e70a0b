//! Segments and the command set of a tutorial project.

use serde::{Deserialize, Serialize};

/// One narration + visual unit of the tutorial.
///
/// Produced from the project configuration; immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Text spoken over this segment.
    pub narration_text: String,
    /// Lines typed out on screen while the narration plays.
    #[serde(deserialize_with = "string_or_lines")]
    pub visual_lines: Vec<String>,
}

impl Segment {
    pub fn new(narration_text: impl Into<String>, visual_lines: Vec<String>) -> Self {
        Self {
            narration_text: narration_text.into(),
            visual_lines,
        }
    }

    /// The visual lines joined with newlines, as the typing animation
    /// renders them.
    pub fn visual_content(&self) -> String {
        self.visual_lines.join("\n")
    }
}

/// Accept either a single string or a list of lines for the visual content.
fn string_or_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lines {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Lines::deserialize(deserializer)? {
        Lines::One(line) => vec![line],
        Lines::Many(lines) => lines,
    })
}

/// A single step of the generation run.
///
/// Matched exhaustively by the pipeline; adding a variant is a compile-time
/// event everywhere commands are handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Record a code-typing animation narrated segment by segment.
    CodeAnimation { segments: Vec<Segment> },
    /// Record a browser visit narrated with a single text.
    BrowserInteraction { url: String, narration: String },
    /// Start a labelled subshell for later commands to use.
    StartSubshell { name: String },
    /// Run a command inside a previously started subshell, optionally
    /// waiting for an expected output line.
    RunInSubshell {
        subshell: String,
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect: Option<String>,
    },
    /// Terminate a previously started subshell.
    TerminateSubshell { name: String },
}

impl Command {
    /// Short name for logs and error context.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::CodeAnimation { .. } => "code_animation",
            Command::BrowserInteraction { .. } => "browser_interaction",
            Command::StartSubshell { .. } => "start_subshell",
            Command::RunInSubshell { .. } => "run_in_subshell",
            Command::TerminateSubshell { .. } => "terminate_subshell",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_content_joins_lines() {
        let segment = Segment::new(
            "Loop over five numbers.",
            vec!["for i in range(5):".into(), "    print(i)".into()],
        );
        assert_eq!(segment.visual_content(), "for i in range(5):\n    print(i)");
    }

    #[test]
    fn segment_accepts_string_or_list() {
        let one: Segment = serde_json::from_str(
            r#"{ "narration_text": "n", "visual_lines": "echo $BLAH" }"#,
        )
        .unwrap();
        assert_eq!(one.visual_lines, vec!["echo $BLAH"]);

        let many: Segment = serde_json::from_str(
            r#"{ "narration_text": "n", "visual_lines": ["a", "b"] }"#,
        )
        .unwrap();
        assert_eq!(many.visual_lines, vec!["a", "b"]);
    }

    #[test]
    fn command_tag_round_trip() {
        let json = r#"{ "type": "RunInSubshell", "subshell": "server", "command": "ls" }"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            Command::RunInSubshell {
                subshell: "server".into(),
                command: "ls".into(),
                expect: None,
            }
        );
        assert_eq!(command.kind(), "run_in_subshell");
    }
}
