//! Locating the game root and the settings file beneath it.
//!
//! The host hands us its data directory (`<game>/A Dance of Fire and
//! Ice_Data`); the game root is its parent. Without a usable data path we
//! fall back to the directory of the running executable.

use once_cell::sync::OnceCell;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DATA_PATH_ENV: &str = "ADOFAI_DATA_PATH";
pub const USER_DATA_DIR: &str = "UserData";
pub const MOD_DIR: &str = "ADOFAI_Access";
pub const SETTINGS_FILE: &str = "settings.json";

static HOST_DATA_PATH: OnceCell<Option<PathBuf>> = OnceCell::new();

/// Register the host's data path.
///
/// Returns `false` when a path was already registered or already read by
/// [`host_data_path`]; the registration has no effect then.
pub fn set_host_data_path(path: impl Into<PathBuf>) -> bool {
    HOST_DATA_PATH.set(Some(path.into())).is_ok()
}

/// Registered data path, else `ADOFAI_DATA_PATH` when set and non-empty.
///
/// The answer is fixed on first call.
pub fn host_data_path() -> Option<PathBuf> {
    HOST_DATA_PATH
        .get_or_init(|| data_path_from_env(env::var_os(DATA_PATH_ENV)))
        .clone()
}

fn data_path_from_env(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

pub fn game_root(data_path: Option<&Path>) -> PathBuf {
    data_path
        .filter(|path| !path.as_os_str().is_empty())
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(base_directory)
}

pub fn settings_path(game_root: &Path) -> PathBuf {
    game_root
        .join(USER_DATA_DIR)
        .join(MOD_DIR)
        .join(SETTINGS_FILE)
}

fn base_directory() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_root_is_parent_of_data_path() {
        let data = Path::new("/games/ADOFAI/A Dance of Fire and Ice_Data");
        assert_eq!(game_root(Some(data)), PathBuf::from("/games/ADOFAI"));
    }

    #[test]
    fn unusable_data_path_falls_back_to_base_directory() {
        let fallback = base_directory();
        assert_eq!(game_root(None), fallback);
        assert_eq!(game_root(Some(Path::new(""))), fallback);
        assert_eq!(game_root(Some(Path::new("Data_Only"))), fallback);
        assert_eq!(game_root(Some(Path::new("/"))), fallback);
    }

    #[test]
    fn settings_file_lives_under_mod_folder() {
        let path = settings_path(Path::new("/games/ADOFAI"));
        assert_eq!(
            path,
            PathBuf::from("/games/ADOFAI/UserData/ADOFAI_Access/settings.json")
        );
    }

    #[test]
    fn env_data_path_ignores_empty_value() {
        assert_eq!(data_path_from_env(None), None);
        assert_eq!(data_path_from_env(Some(OsString::new())), None);
        assert_eq!(
            data_path_from_env(Some("/games/ADOFAI/Game_Data".into())),
            Some(PathBuf::from("/games/ADOFAI/Game_Data"))
        );
    }
}
