use super::defaults::{DEFAULT_BEATS_AHEAD, MAX_BEATS_AHEAD, MIN_BEATS_AHEAD};
use super::models::ModSettings;

/// One field value replaced while loading or sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub field: &'static str,
    pub rejected: String,
    pub replacement: String,
}

impl Correction {
    pub(crate) fn new(
        field: &'static str,
        rejected: impl ToString,
        replacement: impl ToString,
    ) -> Self {
        Correction {
            field,
            rejected: rejected.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} replaced with {}",
            self.field, self.rejected, self.replacement
        )
    }
}

/// Bring every field back into its valid domain.
///
/// Non-positive look-ahead resets to the default; anything above the
/// maximum is clamped to the maximum. Enum fields are valid once typed.
pub fn sanitize(settings: &mut ModSettings) -> Vec<Correction> {
    let mut corrections = Vec::new();

    let beats = settings.pattern_preview_beats_ahead;
    let fixed = if beats < MIN_BEATS_AHEAD {
        DEFAULT_BEATS_AHEAD
    } else {
        beats.min(MAX_BEATS_AHEAD)
    };
    if fixed != beats {
        corrections.push(Correction::new("patternPreviewBeatsAhead", beats, fixed));
        settings.pattern_preview_beats_ahead = fixed;
    }

    corrections
}
