use super::file::{ParsedSettings, parse_settings, serialize_settings};
use super::models::ModSettings;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read and parse the settings file.
///
/// `Ok(None)` means there is nothing to apply: the file is absent, empty or
/// holds a literal `null`.
pub fn load_settings(path: &Path) -> Result<Option<ParsedSettings>> {
    let contents = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No settings file yet");
            return Ok(None);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read settings from {}", path.display()));
        }
    };

    let parsed = parse_settings(&contents)
        .with_context(|| format!("Failed to parse settings at {}", path.display()))?;
    info!(path = %path.display(), "Loaded settings");
    Ok(parsed)
}

/// Write settings, creating the parent directory as needed.
///
/// The document goes to a sibling temp file first and is renamed over the
/// target.
pub fn save_settings(path: &Path, settings: &ModSettings) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let contents = serialize_settings(settings)?;
    let tmp = temp_path(path);
    fs::write(&tmp, contents)
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err)
            .with_context(|| format!("Failed to replace {}", path.display()));
    }
    debug!(path = %path.display(), "Saved settings");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "settings.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
