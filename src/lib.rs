//! Persistent settings for the ADOFAI Access mod.
//!
//! Settings are loaded lazily from `<game>/UserData/ADOFAI_Access/settings.json`
//! on first access, sanitized, and written back whenever they change.

pub mod config;
pub mod keys;
pub mod paths;
pub mod store;

pub use config::{CueMode, ModSettings, PlayMode};
pub use store::{SettingsStore, current, save, settings, update};
