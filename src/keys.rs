//! Addressing individual settings by name, for the command-line tool and
//! anything else that edits one field at a time.

use crate::config::{CueMode, ModSettings, PlayMode};
use anyhow::{Result, anyhow, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    MenuNarrationEnabled,
    PlayMode,
    PatternPreviewBeatsAhead,
    ListenRepeatAudioDuckingEnabled,
    ListenRepeatStartEndCueMode,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::MenuNarrationEnabled,
        SettingKey::PlayMode,
        SettingKey::PatternPreviewBeatsAhead,
        SettingKey::ListenRepeatAudioDuckingEnabled,
        SettingKey::ListenRepeatStartEndCueMode,
    ];

    /// Key as written in the settings file.
    pub fn file_name(self) -> &'static str {
        match self {
            SettingKey::MenuNarrationEnabled => "menuNarrationEnabled",
            SettingKey::PlayMode => "playMode",
            SettingKey::PatternPreviewBeatsAhead => "patternPreviewBeatsAhead",
            SettingKey::ListenRepeatAudioDuckingEnabled => "listenRepeatAudioDuckingEnabled",
            SettingKey::ListenRepeatStartEndCueMode => "listenRepeatStartEndCueMode",
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            SettingKey::MenuNarrationEnabled => "menu_narration_enabled",
            SettingKey::PlayMode => "play_mode",
            SettingKey::PatternPreviewBeatsAhead => "pattern_preview_beats_ahead",
            SettingKey::ListenRepeatAudioDuckingEnabled => "listen_repeat_audio_ducking_enabled",
            SettingKey::ListenRepeatStartEndCueMode => "listen_repeat_start_end_cue_mode",
        }
    }

    /// Accepts either the camelCase file key or the snake_case field name.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.file_name().eq_ignore_ascii_case(name) || key.field_name() == name)
            .ok_or_else(|| anyhow!("Unknown setting: {name}"))
    }

    pub fn get(self, settings: &ModSettings) -> String {
        match self {
            SettingKey::MenuNarrationEnabled => settings.menu_narration_enabled.to_string(),
            SettingKey::PlayMode => settings.play_mode.name().to_string(),
            SettingKey::PatternPreviewBeatsAhead => {
                settings.pattern_preview_beats_ahead.to_string()
            }
            SettingKey::ListenRepeatAudioDuckingEnabled => {
                settings.listen_repeat_audio_ducking_enabled.to_string()
            }
            SettingKey::ListenRepeatStartEndCueMode => {
                settings.listen_repeat_start_end_cue_mode.name().to_string()
            }
        }
    }

    /// Parse `value` and store it. Range checks are left to sanitizing.
    pub fn set(self, settings: &mut ModSettings, value: &str) -> Result<()> {
        match self {
            SettingKey::MenuNarrationEnabled => {
                settings.menu_narration_enabled = parse_bool(value)?
            }
            SettingKey::PlayMode => {
                settings.play_mode = parse_enum(value, PlayMode::from_code, PlayMode::from_name)?
            }
            SettingKey::PatternPreviewBeatsAhead => {
                settings.pattern_preview_beats_ahead = value
                    .trim()
                    .parse()
                    .map_err(|err| anyhow!("Invalid beat count {value:?}: {err}"))?
            }
            SettingKey::ListenRepeatAudioDuckingEnabled => {
                settings.listen_repeat_audio_ducking_enabled = parse_bool(value)?
            }
            SettingKey::ListenRepeatStartEndCueMode => {
                settings.listen_repeat_start_end_cue_mode =
                    parse_enum(value, CueMode::from_code, CueMode::from_name)?
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        other => bail!("Expected a boolean, got {other:?}"),
    }
}

fn parse_enum<T>(
    value: &str,
    from_code: fn(i64) -> Option<T>,
    from_name: fn(&str) -> Option<T>,
) -> Result<T> {
    let value = value.trim();
    let parsed = match value.parse::<i64>() {
        Ok(code) => from_code(code),
        Err(_) => from_name(value),
    };
    parsed.ok_or_else(|| anyhow!("Unknown value: {value}"))
}
