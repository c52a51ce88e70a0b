//! Run settings with per-field defaults.

use serde::{Deserialize, Serialize};

use crate::synth::TtsBackend;

/// Settings for one generation run.
///
/// Every field has a default so a settings file only needs to name what it
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Typing speed of the code animation, in milliseconds per character.
    #[serde(default = "default_typing_speed")]
    pub typing_speed_ms_per_char: u64,

    /// Fixed pause between narrated segments, in milliseconds.
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,

    /// Terminal theme for the code animation.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Recording width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Recording height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Which speech backend to synthesize narration with.
    #[serde(default)]
    pub tts: TtsBackend,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            typing_speed_ms_per_char: default_typing_speed(),
            base_delay_ms: default_base_delay(),
            theme: default_theme(),
            width: default_width(),
            height: default_height(),
            tts: TtsBackend::default(),
        }
    }
}

fn default_typing_speed() -> u64 {
    75
}

fn default_base_delay() -> u64 {
    500
}

fn default_theme() -> String {
    "Cobalt Neon".to_string()
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.typing_speed_ms_per_char, 75);
        assert_eq!(settings.base_delay_ms, 500);
        assert_eq!(settings.theme, "Cobalt Neon");
        assert_eq!(settings.width, 1920);
        assert_eq!(settings.height, 1080);
        assert_eq!(settings.tts, TtsBackend::Paced);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "typing_speed_ms_per_char": 100 }"#).unwrap();
        assert_eq!(settings.typing_speed_ms_per_char, 100);
        assert_eq!(settings.base_delay_ms, 500);
    }

    #[test]
    fn backend_tag_parses() {
        let settings: Settings = serde_json::from_str(
            r#"{ "tts": { "backend": "voicemaker", "token": "abc123" } }"#,
        )
        .unwrap();
        assert_eq!(
            settings.tts,
            TtsBackend::Voicemaker {
                token: "abc123".into()
            }
        );
    }
}
