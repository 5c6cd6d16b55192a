use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use qv_core::{AspectSelection, DisplayMode, LaunchConfig, MultiSample, RefreshRate};

use crate::defaults::*;

const SETTINGS_DIR: &str = ".quadview";
const SETTINGS_FILE: &str = "settings.json";

/// Launch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Aspect ratio the scene is authored for (width, height).
    #[serde(default = "default_content_aspect")]
    pub content_aspect: (u32, u32),

    // Window
    #[serde(default = "default_windowed")]
    pub windowed: bool,
    #[serde(default = "default_windowed_width")]
    pub windowed_width: u32,
    #[serde(default = "default_windowed_height")]
    pub windowed_height: u32,

    // Presentation
    #[serde(default = "default_vsync")]
    pub vsync: bool,
    /// 1 (off), 2, 4 or 8.
    #[serde(default = "default_multi_samples")]
    pub multi_samples: u32,

    // Display selection (full screen only)
    #[serde(default = "default_adapter")]
    pub adapter: u32,
    #[serde(default = "default_output")]
    pub output: u32,
    /// Physical display aspect override; `None` derives it from the mode.
    #[serde(default = "default_display_aspect")]
    pub display_aspect: Option<f32>,
    /// Last full-screen mode confirmed in the setup dialog; `None` uses the desktop mode.
    #[serde(default = "default_full_screen_mode")]
    pub full_screen_mode: Option<SavedMode>,

    #[serde(default = "default_show_setup_dialog")]
    pub show_setup_dialog: bool,

    /// Directory with precompiled `quad_vs.cso` / `quad_ps.cso`.
    #[serde(default = "default_shader_dir")]
    pub shader_dir: Option<String>,

    /// Enable the Direct3D debug layer.
    #[serde(default = "default_debug_device")]
    pub debug_device: bool,
}

/// Resolution and refresh rate of a full-screen mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMode {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub refresh_numerator: u32,
    #[serde(default)]
    pub refresh_denominator: u32,
}

impl SavedMode {
    fn from_mode(mode: &DisplayMode) -> Self {
        Self {
            width: mode.width,
            height: mode.height,
            refresh_numerator: mode.refresh_rate.numerator,
            refresh_denominator: mode.refresh_rate.denominator,
        }
    }

    /// Template for a closest-match lookup.
    fn to_mode(self) -> DisplayMode {
        DisplayMode {
            refresh_rate: RefreshRate::new(self.refresh_numerator, self.refresh_denominator),
            ..DisplayMode::windowed(self.width, self.height)
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content_aspect: default_content_aspect(),
            windowed: default_windowed(),
            windowed_width: default_windowed_width(),
            windowed_height: default_windowed_height(),
            vsync: default_vsync(),
            multi_samples: default_multi_samples(),
            adapter: default_adapter(),
            output: default_output(),
            display_aspect: default_display_aspect(),
            full_screen_mode: default_full_screen_mode(),
            show_setup_dialog: default_show_setup_dialog(),
            shader_dir: default_shader_dir(),
            debug_device: default_debug_device(),
        }
    }
}

impl Settings {
    pub fn settings_path() -> PathBuf {
        default_home_dir().join(SETTINGS_DIR).join(SETTINGS_FILE)
    }

    /// Falls back to defaults (and persists them) if loading fails.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Settings>(&content) {
                Ok(settings) => return settings,
                Err(e) => log::warn!("Ignoring malformed settings {}: {e}", path.display()),
            },
            Err(e) => log::debug!("No settings at {}: {e}", path.display()),
        }

        let default_settings = Self::default();
        if let Err(e) = default_settings.save_to(path) {
            log::warn!("Could not persist default settings: {e}");
        }
        default_settings
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn content_aspect_ratio(&self) -> f32 {
        let (w, h) = self.content_aspect;
        if w == 0 || h == 0 {
            let (w, h) = default_content_aspect();
            return w as f32 / h as f32;
        }
        w as f32 / h as f32
    }

    pub fn windowed_size(&self) -> (u32, u32) {
        (self.windowed_width.max(1), self.windowed_height.max(1))
    }

    /// Launch configuration used when the setup dialog is skipped.
    pub fn launch_config(&self) -> LaunchConfig {
        let multi_sample = MultiSample::from_count(self.multi_samples).unwrap_or_else(|e| {
            log::warn!("{e}; multi-sampling disabled");
            MultiSample::off()
        });

        let aspect = match self.display_aspect {
            Some(ratio) if ratio > 0.0 => AspectSelection::Forced(ratio),
            _ => AspectSelection::Automatic,
        };

        if self.windowed {
            return LaunchConfig {
                multi_sample,
                ..LaunchConfig::primary(true, self.vsync)
            };
        }

        LaunchConfig {
            adapter: self.adapter,
            output: self.output,
            display_mode: None,
            preferred_mode: self
                .full_screen_mode
                .filter(|m| m.width > 0 && m.height > 0)
                .map(SavedMode::to_mode),
            aspect,
            multi_sample,
            windowed: false,
            vsync: self.vsync,
        }
    }

    /// 记住对话框中确认的选择，下次启动沿用
    pub fn remember(&mut self, config: &LaunchConfig) {
        self.windowed = config.windowed;
        self.vsync = config.vsync;
        self.multi_samples = config.multi_sample.count;
        self.adapter = config.adapter;
        self.output = config.output;
        self.display_aspect = match config.aspect {
            AspectSelection::Forced(ratio) => Some(ratio),
            AspectSelection::Automatic => None,
        };

        // Windowed runs do not pick a mode; keep the last full-screen one.
        if !config.windowed
            && let Some(mode) = config.display_mode.or(config.preferred_mode)
        {
            self.full_screen_mode = Some(SavedMode::from_mode(&mode));
        }
    }
}
