//! JSON document stored at `UserData/ADOFAI_Access/settings.json`.
//!
//! The on-disk shape differs from [`ModSettings`]: keys are camelCase and
//! enums are integer codes. Enum values are kept loose here so an unknown
//! code resets one field instead of rejecting the whole file.
//!
//! Reading is lenient the way the game's own JSON reader is: keys match
//! regardless of case, a repeated key overrides the earlier one, and enum
//! codes may be quoted.

use super::defaults;
use super::models::{CueMode, ModSettings, PlayMode};
use super::sanitize::Correction;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const FILE_KEYS: [&str; 5] = [
    "menuNarrationEnabled",
    "playMode",
    "patternPreviewBeatsAhead",
    "listenRepeatAudioDuckingEnabled",
    "listenRepeatStartEndCueMode",
];

/// An enum as it may appear on disk: a numeric code or a variant name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    Code(i64),
    Name(String),
}

impl std::fmt::Display for EnumValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumValue::Code(code) => write!(f, "{code}"),
            EnumValue::Name(name) => write!(f, "{name:?}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SettingsFile {
    #[serde(default = "defaults::default_menu_narration_enabled")]
    menu_narration_enabled: bool,
    #[serde(default = "defaults::default_play_mode_code")]
    play_mode: EnumValue,
    #[serde(default = "defaults::default_pattern_preview_beats_ahead")]
    pattern_preview_beats_ahead: i32,
    #[serde(default = "defaults::default_listen_repeat_audio_ducking_enabled")]
    listen_repeat_audio_ducking_enabled: bool,
    #[serde(default = "defaults::default_cue_mode_code")]
    listen_repeat_start_end_cue_mode: EnumValue,
}

impl SettingsFile {
    /// Resolve loose enum values, reporting every field that fell back.
    fn resolve(self) -> (ModSettings, Vec<Correction>) {
        let mut corrections = Vec::new();

        let play_mode = resolve_enum(
            "playMode",
            &self.play_mode,
            PlayMode::from_code,
            PlayMode::from_name,
            &mut corrections,
        );
        let cue_mode = resolve_enum(
            "listenRepeatStartEndCueMode",
            &self.listen_repeat_start_end_cue_mode,
            CueMode::from_code,
            CueMode::from_name,
            &mut corrections,
        );

        let settings = ModSettings {
            menu_narration_enabled: self.menu_narration_enabled,
            play_mode,
            pattern_preview_beats_ahead: self.pattern_preview_beats_ahead,
            listen_repeat_audio_ducking_enabled: self.listen_repeat_audio_ducking_enabled,
            listen_repeat_start_end_cue_mode: cue_mode,
        };
        (settings, corrections)
    }
}

impl From<&ModSettings> for SettingsFile {
    fn from(settings: &ModSettings) -> Self {
        SettingsFile {
            menu_narration_enabled: settings.menu_narration_enabled,
            play_mode: EnumValue::Code(settings.play_mode.code()),
            pattern_preview_beats_ahead: settings.pattern_preview_beats_ahead,
            listen_repeat_audio_ducking_enabled: settings.listen_repeat_audio_ducking_enabled,
            listen_repeat_start_end_cue_mode: EnumValue::Code(
                settings.listen_repeat_start_end_cue_mode.code(),
            ),
        }
    }
}

fn resolve_enum<T: Default + std::fmt::Debug>(
    field: &'static str,
    value: &EnumValue,
    from_code: fn(i64) -> Option<T>,
    from_name: fn(&str) -> Option<T>,
    corrections: &mut Vec<Correction>,
) -> T {
    let resolved = match value {
        EnumValue::Code(code) => from_code(*code),
        EnumValue::Name(name) => match name.trim().parse::<i64>() {
            Ok(code) => from_code(code),
            Err(_) => from_name(name),
        },
    };
    match resolved {
        Some(inner) => inner,
        None => {
            let fallback = T::default();
            corrections.push(Correction::new(field, value, format!("{fallback:?}")));
            fallback
        }
    }
}

/// Result of parsing a settings document that was not empty or `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSettings {
    pub settings: ModSettings,
    pub corrections: Vec<Correction>,
}

/// Parse a settings document.
///
/// Returns `Ok(None)` for an empty document or a literal `null`; the caller
/// keeps whatever it already has in that case.
pub fn parse_settings(contents: &str) -> Result<Option<ParsedSettings>> {
    if contents.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(contents)
        .context("Invalid settings JSON")?;
    let value = match value {
        Value::Null => return Ok(None),
        Value::Object(map) => Value::Object(canonicalize_keys(map)),
        other => other,
    };
    let file: SettingsFile = serde_json::from_value(value)
        .context("Invalid settings JSON")?;
    let (settings, corrections) = file.resolve();
    Ok(Some(ParsedSettings {
        settings,
        corrections,
    }))
}

/// Rewrite known keys to their canonical spelling. Entries arrive in
/// document order, so the last spelling of a key wins.
fn canonicalize_keys(map: Map<String, Value>) -> Map<String, Value> {
    let mut canonical = Map::new();
    for (key, value) in map {
        let key = FILE_KEYS
            .into_iter()
            .find(|known| known.eq_ignore_ascii_case(&key))
            .map(str::to_string)
            .unwrap_or(key);
        canonical.insert(key, value);
    }
    canonical
}

/// Serialize settings as indented JSON with a trailing newline.
pub fn serialize_settings(settings: &ModSettings) -> Result<String> {
    let file = SettingsFile::from(settings);
    let mut contents =
        serde_json::to_string_pretty(&file).context("Failed to serialize settings")?;
    contents.push('\n');
    Ok(contents)
}
