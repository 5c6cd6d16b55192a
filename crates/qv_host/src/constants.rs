/// 消息框标题与设置目录名
pub const APP_ID: &str = "quadview";

pub const APP_TITLE: &str = "QuadView";

pub const WINDOW_CLASS_NAME: &str = "quadview_render_window";

// ==================== Frame loop ====================

/// Frames averaged per FPS title update (windowed mode only).
pub const FPS_SAMPLE_FRAMES: u32 = 60;
