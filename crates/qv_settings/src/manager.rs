use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use qv_core::LaunchConfig;

use crate::Settings;

/// Settings loaded once at start-up, plus the file they are written back to.
pub struct ConfigManager {
    settings: RwLock<Settings>,
    path: PathBuf,
}

impl ConfigManager {
    /// Load from the user's settings file.
    pub fn new() -> Self {
        Self::open(&Settings::settings_path())
    }

    /// Load from `path`, falling back to (and persisting) defaults.
    pub fn open(path: &Path) -> Self {
        Self {
            settings: RwLock::new(Settings::load_from(path)),
            path: path.to_path_buf(),
        }
    }

    /// Apply `f` to the cached settings and persist the result.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> anyhow::Result<()> {
        let mut guard = self.settings.write();
        f(&mut guard);
        guard.save_to(&self.path)
    }

    // Convenience accessors.

    #[inline]
    pub fn launch_config(&self) -> LaunchConfig {
        self.settings.read().launch_config()
    }

    #[inline]
    pub fn content_aspect_ratio(&self) -> f32 {
        self.settings.read().content_aspect_ratio()
    }

    #[inline]
    pub fn windowed_size(&self) -> (u32, u32) {
        self.settings.read().windowed_size()
    }

    #[inline]
    pub fn show_setup_dialog(&self) -> bool {
        self.settings.read().show_setup_dialog
    }

    #[inline]
    pub fn shader_dir(&self) -> Option<String> {
        self.settings.read().shader_dir.clone()
    }

    #[inline]
    pub fn debug_device(&self) -> bool {
        self.settings.read().debug_device
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qv_core::{AspectSelection, DisplayMode};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("qv_manager_{}_{name}", std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_open_missing_file_uses_defaults() {
        let path = temp_path("defaults");
        let _ = std::fs::remove_file(&path);

        let manager = ConfigManager::open(&path);
        assert_eq!(manager.windowed_size(), (1280, 720));
        assert!(manager.show_setup_dialog());
        assert!((manager.content_aspect_ratio() - 16.0 / 9.0).abs() < f32::EPSILON);
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_update_remembers_choice_across_runs() {
        let path = temp_path("update");
        let _ = std::fs::remove_file(&path);

        let chosen = LaunchConfig {
            adapter: 1,
            display_mode: Some(DisplayMode::windowed(1920, 1200)),
            aspect: AspectSelection::Forced(1.6),
            ..LaunchConfig::primary(false, true)
        };
        let manager = ConfigManager::open(&path);
        manager.update(|s| s.remember(&chosen)).unwrap();
        assert_eq!(manager.launch_config().adapter, 1);

        let next_run = ConfigManager::open(&path).launch_config();
        assert!(!next_run.windowed);
        assert_eq!(next_run.adapter, 1);
        assert_eq!(next_run.aspect, AspectSelection::Forced(1.6));
        assert_eq!(next_run.preferred_mode.map(|m| m.height), Some(1200));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
