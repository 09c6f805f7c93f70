pub const MIN_BEATS_AHEAD: i32 = 1;
pub const MAX_BEATS_AHEAD: i32 = 16;
pub const DEFAULT_BEATS_AHEAD: i32 = 4;

pub(crate) fn default_menu_narration_enabled() -> bool {
    true
}

pub(crate) fn default_play_mode_code() -> crate::config::EnumValue {
    crate::config::EnumValue::Code(crate::config::PlayMode::default().code())
}

pub(crate) fn default_pattern_preview_beats_ahead() -> i32 {
    DEFAULT_BEATS_AHEAD
}

pub(crate) fn default_listen_repeat_audio_ducking_enabled() -> bool {
    true
}

pub(crate) fn default_cue_mode_code() -> crate::config::EnumValue {
    crate::config::EnumValue::Code(crate::config::CueMode::default().code())
}
