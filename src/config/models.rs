use super::defaults;

/// In-memory settings record shared by every mod feature.
///
/// The record is plain data: all fields are `Copy`, so readers take a
/// snapshot instead of holding the store lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModSettings {
    pub menu_narration_enabled: bool,
    pub play_mode: PlayMode,
    pub pattern_preview_beats_ahead: i32,
    pub listen_repeat_audio_ducking_enabled: bool,
    pub listen_repeat_start_end_cue_mode: CueMode,
}

impl Default for ModSettings {
    fn default() -> Self {
        ModSettings {
            menu_narration_enabled: defaults::default_menu_narration_enabled(),
            play_mode: PlayMode::default(),
            pattern_preview_beats_ahead: defaults::default_pattern_preview_beats_ahead(),
            listen_repeat_audio_ducking_enabled:
                defaults::default_listen_repeat_audio_ducking_enabled(),
            listen_repeat_start_end_cue_mode: CueMode::default(),
        }
    }
}

/// How gameplay is presented to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayMode {
    #[default]
    Vanilla,
    PatternPreview,
    ListenRepeat,
}

impl PlayMode {
    pub const ALL: [PlayMode; 3] = [
        PlayMode::Vanilla,
        PlayMode::PatternPreview,
        PlayMode::ListenRepeat,
    ];

    /// Numeric code written to the settings file.
    pub fn code(self) -> i64 {
        match self {
            PlayMode::Vanilla => 0,
            PlayMode::PatternPreview => 1,
            PlayMode::ListenRepeat => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.code() == code)
    }

    /// Case-insensitive match on the variant name, e.g. `"PatternPreview"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayMode::Vanilla => "Vanilla",
            PlayMode::PatternPreview => "PatternPreview",
            PlayMode::ListenRepeat => "ListenRepeat",
        }
    }

    /// Next mode in menu order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            PlayMode::Vanilla => PlayMode::PatternPreview,
            PlayMode::PatternPreview => PlayMode::ListenRepeat,
            PlayMode::ListenRepeat => PlayMode::Vanilla,
        }
    }
}

impl std::fmt::Display for PlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PlayMode::Vanilla => "Vanilla",
            PlayMode::PatternPreview => "Pattern Preview",
            PlayMode::ListenRepeat => "Listen and Repeat",
        };
        write!(f, "{}", label)
    }
}

/// Cue played at the start and end of a listen-repeat phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CueMode {
    None,
    Speech,
    #[default]
    Sound,
    Both,
}

impl CueMode {
    pub const ALL: [CueMode; 4] = [
        CueMode::None,
        CueMode::Speech,
        CueMode::Sound,
        CueMode::Both,
    ];

    pub fn code(self) -> i64 {
        match self {
            CueMode::None => 0,
            CueMode::Speech => 1,
            CueMode::Sound => 2,
            CueMode::Both => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            CueMode::None => "None",
            CueMode::Speech => "Speech",
            CueMode::Sound => "Sound",
            CueMode::Both => "Both",
        }
    }

    pub fn next(self) -> Self {
        match self {
            CueMode::None => CueMode::Speech,
            CueMode::Speech => CueMode::Sound,
            CueMode::Sound => CueMode::Both,
            CueMode::Both => CueMode::None,
        }
    }
}

impl std::fmt::Display for CueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CueMode::None => "None",
            CueMode::Speech => "Speech",
            CueMode::Sound => "Sound",
            CueMode::Both => "Speech and Sound",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_values() {
        let settings = ModSettings::default();
        assert!(settings.menu_narration_enabled);
        assert_eq!(settings.play_mode, PlayMode::Vanilla);
        assert_eq!(settings.pattern_preview_beats_ahead, 4);
        assert!(settings.listen_repeat_audio_ducking_enabled);
        assert_eq!(settings.listen_repeat_start_end_cue_mode, CueMode::Sound);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(PlayMode::from_code(2), Some(PlayMode::ListenRepeat));
        assert_eq!(PlayMode::from_code(3), None);
        assert_eq!(PlayMode::from_code(-1), None);
        assert_eq!(CueMode::from_code(3), Some(CueMode::Both));
        assert_eq!(CueMode::from_code(4), None);
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(
            PlayMode::from_name("patternpreview"),
            Some(PlayMode::PatternPreview)
        );
        assert_eq!(CueMode::from_name(" SPEECH "), Some(CueMode::Speech));
        assert_eq!(CueMode::from_name("Pattern Preview"), None);
    }

    #[test]
    fn next_cycles_through_every_variant() {
        let mut mode = PlayMode::Vanilla;
        for _ in 0..PlayMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, PlayMode::Vanilla);

        assert_eq!(CueMode::Both.next(), CueMode::None);
    }
}
