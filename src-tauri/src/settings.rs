use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::translate::client::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    pub prefer_front: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self { prefer_front: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSettings {
    pub base_url: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    #[serde(default)]
    camera: CameraSettings,
    #[serde(default)]
    translation: TranslationSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn camera(&self) -> CameraSettings {
        self.data.read().unwrap().camera.clone()
    }

    pub fn translation(&self) -> TranslationSettings {
        self.data.read().unwrap().translation.clone()
    }

    pub fn update_camera(&self, settings: CameraSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.camera = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_is_absent() {
        let path = std::env::temp_dir().join(format!("librasil-settings-{}.json", uuid::Uuid::new_v4()));
        let store = SettingsStore::new(path).unwrap();
        assert!(store.camera().prefer_front);
        assert_eq!(store.translation().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn camera_update_persists_and_reloads() {
        let path = std::env::temp_dir().join(format!("librasil-settings-{}.json", uuid::Uuid::new_v4()));
        {
            let store = SettingsStore::new(path.clone()).unwrap();
            store
                .update_camera(CameraSettings { prefer_front: false })
                .unwrap();
        }
        let reloaded = SettingsStore::new(path.clone()).unwrap();
        assert!(!reloaded.camera().prefer_front);
        let _ = fs::remove_file(path);
    }
}
