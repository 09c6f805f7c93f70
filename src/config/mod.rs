//! Settings schema and persistence for ADOFAI Access.
//!
//! Settings live in one JSON file under the game's `UserData` folder. Any
//! missing or invalid entries fall back to defaults so the mod can still run.

mod defaults;
mod file;
mod io;
mod models;
mod sanitize;

pub use defaults::{DEFAULT_BEATS_AHEAD, MAX_BEATS_AHEAD, MIN_BEATS_AHEAD};
pub use file::{EnumValue, ParsedSettings, parse_settings, serialize_settings};
pub use io::{load_settings, save_settings};
pub use models::{CueMode, ModSettings, PlayMode};
pub use sanitize::{Correction, sanitize};
