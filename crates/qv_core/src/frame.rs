// Frame loop policy
//
// Decisions the message pump makes between OS messages: render or yield, swap chain
// sync interval, full-screen z-order and cursor handling, FPS reporting

use std::time::Duration;

/// Frames between FPS title updates.
pub const FPS_FRAME_WINDOW: u32 = 60;

/// What to do when no window message is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecision {
    Render,
    /// Full-screen window without focus: give up the rest of the time slice.
    Yield,
}

impl FrameDecision {
    pub const fn new(windowed: bool, active: bool) -> Self {
        if windowed || active {
            FrameDecision::Render
        } else {
            FrameDecision::Yield
        }
    }
}

/// Z-order adjustment on window activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrderChange {
    Topmost,
    Bottom,
    Unchanged,
}

/// Full-screen windows re-assert top-most on activation and drop to the bottom on
/// deactivation once a swap chain exists. Windowed mode never touches the z-order.
pub const fn activation_z_order(windowed: bool, activated: bool, has_swap_chain: bool) -> ZOrderChange {
    if windowed {
        ZOrderChange::Unchanged
    } else if activated {
        ZOrderChange::Topmost
    } else if has_swap_chain {
        ZOrderChange::Bottom
    } else {
        ZOrderChange::Unchanged
    }
}

/// The cursor is hidden while an active full-screen window renders.
pub const fn hide_cursor(windowed: bool, active: bool) -> bool {
    !windowed && active
}

/// Desktop presentation ignores v-sync; full screen follows the preference.
pub const fn sync_interval(windowed: bool, vsync: bool) -> u32 {
    if !windowed && vsync { 1 } else { 0 }
}

/// Averages frame times over a fixed number of frames.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: u32,
    frames: u32,
    elapsed: Duration,
}

impl FpsCounter {
    pub fn new(window: u32) -> Self {
        debug_assert!(window > 0);
        Self {
            window: window.max(1),
            frames: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Records one frame; returns the average FPS every `window` frames.
    pub fn tick(&mut self, frame_time: Duration) -> Option<f32> {
        self.elapsed += frame_time;
        self.frames += 1;

        if self.frames < self.window {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let fps = if seconds > 0.0 {
            self.window as f32 / seconds
        } else {
            0.0
        };

        self.frames = 0;
        self.elapsed = Duration::ZERO;
        Some(fps)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(FPS_FRAME_WINDOW)
    }
}

/// "{title} ({fps} FPS)"
pub fn fps_title(title: &str, fps: f32) -> String {
    format!("{title} ({fps:.2} FPS)")
}
