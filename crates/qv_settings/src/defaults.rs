use std::path::PathBuf;

use crate::settings::SavedMode;

// Content defaults
pub fn default_content_aspect() -> (u32, u32) {
    (16, 9)
}

// Window defaults
pub fn default_windowed() -> bool {
    true
}

pub fn default_windowed_width() -> u32 {
    1280
}

pub fn default_windowed_height() -> u32 {
    720
}

// Presentation defaults
pub fn default_vsync() -> bool {
    true
}

pub fn default_multi_samples() -> u32 {
    1 // off
}

// Display selection defaults (primary adapter & output)
pub fn default_adapter() -> u32 {
    0
}

pub fn default_output() -> u32 {
    0
}

pub fn default_display_aspect() -> Option<f32> {
    None // automatic, square pixels
}

pub fn default_full_screen_mode() -> Option<SavedMode> {
    None // desktop mode
}

pub fn default_show_setup_dialog() -> bool {
    true
}

pub fn default_shader_dir() -> Option<String> {
    None // compile the embedded shaders
}

pub fn default_debug_device() -> bool {
    cfg!(debug_assertions)
}

/// Directory holding `.quadview/`: the user's home, else the executable's directory,
/// else the working directory.
pub fn default_home_dir() -> PathBuf {
    for var in ["USERPROFILE", "HOME"] {
        if let Some(home) = std::env::var_os(var).filter(|v| !v.is_empty()) {
            return PathBuf::from(home);
        }
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.to_path_buf();
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
