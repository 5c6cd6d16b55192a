//! 启动失败时的错误提示框

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    MB_ICONEXCLAMATION, MB_OK, MB_SETFOREGROUND, MB_TOPMOST, MessageBoxW,
};
use windows::core::PCWSTR;

use crate::win_api::to_wide_chars;

/// Blocks until dismissed. `owner` is `None` once the render window is gone, in which
/// case the box is forced to the foreground so it is not hidden behind other windows.
pub fn show_error(owner: Option<HWND>, caption: &str, text: &str) {
    let caption_w = to_wide_chars(caption);
    let text_w = to_wide_chars(text);

    let mut style = MB_OK | MB_ICONEXCLAMATION;
    if owner.is_none() {
        style |= MB_SETFOREGROUND | MB_TOPMOST;
    }

    let _ = unsafe {
        MessageBoxW(
            owner,
            PCWSTR(text_w.as_ptr()),
            PCWSTR(caption_w.as_ptr()),
            style,
        )
    };
}
