//! Process-wide settings, loaded from disk on first access.
//!
//! A single mutex guards both the lazy load and every save. The load is
//! attempted once; on failure the defaults stay in place and are written back
//! so the file on disk is always normalized after startup.

use crate::config::{self, Correction, ModSettings};
use crate::paths;
use anyhow::Result;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

static GLOBAL: Lazy<SettingsStore> = Lazy::new(|| {
    let data_path = paths::host_data_path();
    let root = paths::game_root(data_path.as_deref());
    let path = paths::settings_path(&root);
    info!(path = %path.display(), "Using settings file");
    SettingsStore::new(path)
});

/// The store shared by the whole process.
pub fn settings() -> &'static SettingsStore {
    &GLOBAL
}

pub fn current() -> ModSettings {
    settings().current()
}

pub fn update(apply: impl FnOnce(&mut ModSettings)) -> ModSettings {
    settings().update(apply)
}

pub fn save() {
    settings().save()
}

#[derive(Debug, Default)]
struct StoreState {
    loaded: bool,
    current: ModSettings,
}

#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SettingsStore {
            path: path.into(),
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().loaded
    }

    pub fn ensure_loaded(&self) {
        let mut state = self.lock();
        self.load_locked(&mut state);
    }

    /// Snapshot of the current settings, loading them first if needed.
    pub fn current(&self) -> ModSettings {
        let mut state = self.lock();
        self.load_locked(&mut state);
        state.current
    }

    /// Mutate the settings under the lock, then sanitize and persist.
    pub fn update(&self, apply: impl FnOnce(&mut ModSettings)) -> ModSettings {
        let mut state = self.lock();
        self.load_locked(&mut state);
        apply(&mut state.current);
        self.save_locked(&mut state);
        state.current
    }

    /// Like [`update`](Self::update), but `apply` may reject the change and
    /// save errors are returned. A rejected change leaves the settings as
    /// they were.
    pub fn try_update(
        &self,
        apply: impl FnOnce(&mut ModSettings) -> Result<()>,
    ) -> Result<ModSettings> {
        let mut state = self.lock();
        self.load_locked(&mut state);
        let mut staged = state.current;
        apply(&mut staged)?;
        state.current = staged;
        self.try_save_locked(&mut state)?;
        Ok(state.current)
    }

    /// Persist the current settings. Failures are logged, not returned.
    pub fn save(&self) {
        if let Err(err) = self.try_save() {
            warn!(path = %self.path.display(), "Failed to save settings: {err:#}");
        }
    }

    pub fn try_save(&self) -> Result<()> {
        let mut state = self.lock();
        if !state.loaded {
            // Loading writes the file itself; saving before it would clobber
            // the user's settings with defaults.
            state.loaded = true;
            self.read_locked(&mut state);
        }
        self.try_save_locked(&mut state)
    }

    /// Restore defaults and persist them. Save failures are logged.
    pub fn reset_to_defaults(&self) -> ModSettings {
        if let Err(err) = self.try_reset_to_defaults() {
            warn!(path = %self.path.display(), "Failed to save settings: {err:#}");
        }
        ModSettings::default()
    }

    pub fn try_reset_to_defaults(&self) -> Result<()> {
        let mut state = self.lock();
        state.loaded = true;
        state.current = ModSettings::default();
        self.try_save_locked(&mut state)?;
        info!(path = %self.path.display(), "Settings reset to defaults");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_locked(&self, state: &mut StoreState) {
        if state.loaded {
            return;
        }
        state.loaded = true;
        self.read_locked(state);
        self.save_locked(state);
    }

    fn read_locked(&self, state: &mut StoreState) {
        match config::load_settings(&self.path) {
            Ok(Some(parsed)) => {
                log_corrections(&self.path, &parsed.corrections);
                state.current = parsed.settings;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(path = %self.path.display(), "Failed to load settings: {err:#}");
            }
        }
    }

    fn save_locked(&self, state: &mut StoreState) {
        if let Err(err) = self.try_save_locked(state) {
            warn!(path = %self.path.display(), "Failed to save settings: {err:#}");
        }
    }

    fn try_save_locked(&self, state: &mut StoreState) -> Result<()> {
        let corrections = config::sanitize(&mut state.current);
        log_corrections(&self.path, &corrections);
        config::save_settings(&self.path, &state.current)
    }
}

fn log_corrections(path: &Path, corrections: &[Correction]) {
    for correction in corrections {
        warn!(
            path = %path.display(),
            field = correction.field,
            rejected = %correction.rejected,
            replacement = %correction.replacement,
            "Replaced invalid setting"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CueMode, PlayMode};
    use std::fs;
    use std::sync::Arc;
    use std::thread;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("adofai_access_store_{name}_{nanos}"))
    }

    fn store_in(dir: &Path) -> SettingsStore {
        SettingsStore::new(dir.join("UserData/ADOFAI_Access/settings.json"))
    }

    fn write_settings(store: &SettingsStore, contents: &str) {
        fs::create_dir_all(store.path().parent().expect("parent"))
            .expect("mkdir");
        fs::write(store.path(), contents).expect("write settings");
    }

    fn read_back(store: &SettingsStore) -> ModSettings {
        config::load_settings(store.path())
            .expect("load")
            .expect("settings present")
            .settings
    }

    #[test]
    fn first_access_writes_defaults_when_file_is_missing() {
        let dir = unique_temp_dir("missing");
        let store = store_in(&dir);
        assert!(!store.is_loaded());

        let settings = store.current();

        assert!(store.is_loaded());
        assert_eq!(settings, ModSettings::default());
        assert_eq!(read_back(&store), ModSettings::default());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn loaded_values_are_sanitized_and_rewritten() {
        let dir = unique_temp_dir("sanitize");
        let store = store_in(&dir);
        write_settings(
            &store,
            r#"{ "playMode": 2, "patternPreviewBeatsAhead": 64, "listenRepeatStartEndCueMode": 9 }"#,
        );

        let settings = store.current();

        assert_eq!(settings.play_mode, PlayMode::ListenRepeat);
        assert_eq!(settings.pattern_preview_beats_ahead, 16);
        assert_eq!(settings.listen_repeat_start_end_cue_mode, CueMode::Sound);
        assert_eq!(read_back(&store), settings);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn malformed_file_keeps_defaults_and_is_replaced() {
        let dir = unique_temp_dir("malformed");
        let store = store_in(&dir);
        write_settings(&store, "{ \"playMode\": ");

        assert_eq!(store.current(), ModSettings::default());
        assert_eq!(read_back(&store), ModSettings::default());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn file_is_read_only_once() {
        let dir = unique_temp_dir("once");
        let store = store_in(&dir);
        write_settings(&store, r#"{ "menuNarrationEnabled": false }"#);
        assert!(!store.current().menu_narration_enabled);

        write_settings(&store, r#"{ "menuNarrationEnabled": true }"#);
        assert!(!store.current().menu_narration_enabled);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn update_persists_sanitized_values() {
        let dir = unique_temp_dir("update");
        let store = store_in(&dir);

        let updated = store.update(|settings| {
            settings.play_mode = PlayMode::PatternPreview;
            settings.pattern_preview_beats_ahead = -2;
        });

        assert_eq!(updated.play_mode, PlayMode::PatternPreview);
        assert_eq!(updated.pattern_preview_beats_ahead, 4);
        assert_eq!(read_back(&store), updated);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn rejected_update_changes_nothing() {
        let dir = unique_temp_dir("rejected");
        let store = store_in(&dir);

        let result = store.try_update(|settings| {
            settings.menu_narration_enabled = false;
            anyhow::bail!("rejected")
        });

        assert!(result.is_err());
        assert!(store.current().menu_narration_enabled);
        assert_eq!(read_back(&store), ModSettings::default());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn save_before_access_keeps_existing_file() {
        let dir = unique_temp_dir("save_first");
        let store = store_in(&dir);
        write_settings(&store, r#"{ "listenRepeatAudioDuckingEnabled": false }"#);

        store.save();

        assert!(store.is_loaded());
        assert!(!read_back(&store).listen_repeat_audio_ducking_enabled);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn reset_restores_defaults_on_disk() {
        let dir = unique_temp_dir("reset");
        let store = store_in(&dir);
        store.update(|settings| settings.listen_repeat_start_end_cue_mode = CueMode::Both);

        assert_eq!(store.reset_to_defaults(), ModSettings::default());
        assert_eq!(read_back(&store), ModSettings::default());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn failed_reset_reports_error_but_keeps_defaults_in_memory() {
        let dir = unique_temp_dir("reset_blocked");
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join("UserData"), "not a directory").expect("write blocker");
        let store = store_in(&dir);
        store.update(|settings| settings.menu_narration_enabled = false);

        assert!(store.try_reset_to_defaults().is_err());
        assert_eq!(store.current(), ModSettings::default());
        let _ = fs::remove_dir_all(dir);
    }

    // The only test that touches the process-wide store and the registered
    // host data path.
    #[test]
    fn global_store_uses_registered_data_path() {
        let dir = unique_temp_dir("global");
        let data_path = dir.join("A Dance of Fire and Ice_Data");

        assert!(paths::set_host_data_path(&data_path));
        assert!(!paths::set_host_data_path(dir.join("Other_Data")));
        assert_eq!(paths::host_data_path(), Some(data_path));
        assert_eq!(settings().path(), paths::settings_path(&dir));

        assert_eq!(current(), ModSettings::default());
        assert!(settings().is_loaded());
        let updated = update(|settings| settings.play_mode = PlayMode::PatternPreview);
        assert_eq!(updated.play_mode, PlayMode::PatternPreview);
        save();
        assert_eq!(read_back(settings()), updated);
        assert!(!paths::set_host_data_path(dir.join("Late_Data")));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn unwritable_location_still_serves_defaults() {
        let dir = unique_temp_dir("blocked");
        fs::create_dir_all(&dir).expect("mkdir");
        let blocker = dir.join("UserData");
        fs::write(&blocker, "not a directory").expect("write blocker");
        let store = store_in(&dir);

        assert_eq!(store.current(), ModSettings::default());
        assert!(store.try_save().is_err());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn concurrent_first_access_loads_once() {
        let dir = unique_temp_dir("threads");
        let store = Arc::new(store_in(&dir));
        write_settings(&store, r#"{ "patternPreviewBeatsAhead": 12 }"#);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.current().pattern_preview_beats_ahead)
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("thread"), 12);
        }
        let _ = fs::remove_dir_all(dir);
    }
}
