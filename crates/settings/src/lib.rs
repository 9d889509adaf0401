//! # Beaker Settings
//!
//! Persisted user preferences: a flat key/value JSON file under the user
//! config dir, read once at startup and written through on every change.
//! A missing file or key falls back to the built-in default; load and
//! save failures degrade with a warning, never a crash.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Preference key for the theme flag
pub const THEME_KEY: &str = "beaker.theme";
/// Preference key for the last-edited buffer text
pub const CODE_KEY: &str = "beaker.editor.code";

/// Flat preference store
pub struct PreferenceStore {
    /// Backing file; None keeps the store in memory only
    path: Option<PathBuf>,
    values: HashMap<String, Value>,
}

impl PreferenceStore {
    /// In-memory store, nothing persisted
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: HashMap::new(),
        }
    }

    /// Store backed by the user preferences file
    pub fn load_user() -> Self {
        match user_preferences_path() {
            Some(path) => Self::from_file(path),
            None => {
                tracing::warn!("no user config dir; preferences will not persist");
                Self::in_memory()
            }
        }
    }

    /// Store backed by a specific file, loading it when present
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match load_values(&path) {
            Ok(values) => values,
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "preferences unreadable, using defaults");
                HashMap::new()
            }
        };
        Self {
            path: Some(path),
            values,
        }
    }

    /// Typed value for a key, None when absent or of the wrong shape
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Typed value for a key, falling back to the built-in default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Set a value and write the store through to disk
    pub fn set(&mut self, key: &str, value: impl Serialize) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.values.insert(key.to_string(), value);
                self.save();
            }
            Err(error) => {
                tracing::warn!(%error, key, "unserializable preference value dropped");
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(error) = save_values(path, &self.values) {
            tracing::warn!(%error, path = %path.display(), "failed to persist preferences");
        }
    }
}

fn load_values(path: &Path) -> anyhow::Result<HashMap<String, Value>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn save_values(path: &Path, values: &HashMap<String, Value>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(values)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Path of the user preferences file
pub fn user_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("beaker").join("preferences.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("beaker-settings-{}-{name}", std::process::id()))
            .join("preferences.json")
    }

    #[test]
    fn test_absent_key_falls_back_to_default() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.get::<String>(THEME_KEY), None);
        assert_eq!(store.get_or(THEME_KEY, "light".to_string()), "light");
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let mut store = PreferenceStore::in_memory();
        store.set(CODE_KEY, "print(1)");
        assert_eq!(store.get::<String>(CODE_KEY).as_deref(), Some("print(1)"));
    }

    #[test]
    fn test_write_through_and_reload() {
        let path = scratch_path("reload");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());

        let mut store = PreferenceStore::from_file(&path);
        store.set(THEME_KEY, "dark");

        let reloaded = PreferenceStore::from_file(&path);
        assert_eq!(reloaded.get::<String>(THEME_KEY).as_deref(), Some("dark"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_unreadable_file_degrades_to_defaults() {
        let path = scratch_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let store = PreferenceStore::from_file(&path);
        assert!(!store.contains(THEME_KEY));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
