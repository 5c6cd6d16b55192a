use std::{ffi::OsStr, iter::once, os::windows::ffi::OsStrExt};

use windows::Win32::Foundation::*;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::Sleep;
use windows::Win32::UI::HiDpi::{PROCESS_PER_MONITOR_DPI_AWARE, SetProcessDpiAwareness};
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

#[inline]
pub fn set_process_per_monitor_dpi_aware() -> windows::core::Result<()> {
    unsafe { SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE) }
}

#[inline]
pub fn get_window_user_data(hwnd: HWND) -> isize {
    unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) }
}

#[inline]
pub fn set_window_user_data(hwnd: HWND, data: isize) -> isize {
    unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, data) }
}

#[inline]
pub fn def_window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

#[inline]
pub fn get_module_handle() -> windows::core::Result<HMODULE> {
    unsafe { GetModuleHandleW(None) }
}

#[inline]
pub fn load_cursor_arrow() -> windows::core::Result<HCURSOR> {
    unsafe { LoadCursorW(None, IDC_ARROW) }
}

/// 加载可执行文件中的第一个图标资源（ID 1），没有时使用系统默认图标
pub fn load_app_icon(instance: HMODULE) -> HICON {
    unsafe {
        LoadIconW(Some(instance.into()), PCWSTR(1 as *const u16))
            .or_else(|_| LoadIconW(None, IDI_APPLICATION))
            .unwrap_or_default()
    }
}

#[inline]
pub fn register_class(window_class: &WNDCLASSEXW) -> u16 {
    unsafe { RegisterClassExW(window_class) }
}

#[inline]
pub fn unregister_class(class_name: PCWSTR, instance: HMODULE) -> windows::core::Result<()> {
    unsafe { UnregisterClassW(class_name, Some(instance.into())) }
}

/// Outer window size for a client area of `width` x `height`.
pub fn adjust_window_rect(
    width: i32,
    height: i32,
    style: WINDOW_STYLE,
    ex_style: WINDOW_EX_STYLE,
) -> windows::core::Result<(i32, i32)> {
    let mut rect = RECT {
        left: 0,
        top: 0,
        right: width,
        bottom: height,
    };
    unsafe {
        AdjustWindowRectEx(&mut rect, style, false, ex_style)?;
    }
    Ok((rect.right - rect.left, rect.bottom - rect.top))
}

/// 安全地显示窗口
#[inline]
pub fn show_window(hwnd: HWND, cmd: SHOW_WINDOW_CMD) -> windows::core::Result<()> {
    unsafe {
        let _ = ShowWindow(hwnd, cmd);
    }
    Ok(())
}

/// 更新窗口
#[inline]
pub fn update_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        let _ = UpdateWindow(hwnd);
    }
    Ok(())
}

/// 销毁窗口
#[inline]
pub fn destroy_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        DestroyWindow(hwnd)?;
    }
    Ok(())
}

#[inline]
pub fn is_window(hwnd: HWND) -> bool {
    unsafe { IsWindow(Some(hwnd)).as_bool() }
}

#[inline]
pub fn enable_window(hwnd: HWND, enable: bool) {
    unsafe {
        let _ = EnableWindow(hwnd, enable);
    }
}

#[inline]
pub fn set_window_text(hwnd: HWND, text: &str) -> windows::core::Result<()> {
    let text = to_wide_chars(text);
    unsafe { SetWindowTextW(hwnd, PCWSTR(text.as_ptr())) }
}

/// 退出消息循环
#[inline]
pub fn quit_message_loop(exit_code: i32) {
    unsafe {
        PostQuitMessage(exit_code);
    }
}

/// Removes one pending message from the thread queue, if any.
#[inline]
pub fn peek_message() -> Option<MSG> {
    let mut msg = MSG::default();
    let found = unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() };
    found.then_some(msg)
}

#[inline]
pub fn dispatch_message(msg: &MSG) {
    unsafe {
        let _ = TranslateMessage(msg);
        DispatchMessageW(msg);
    }
}

/// 发送自定义消息到窗口
#[inline]
pub fn post_message(
    hwnd: HWND,
    msg: u32,
    wparam: usize,
    lparam: isize,
) -> windows::core::Result<()> {
    unsafe {
        PostMessageW(Some(hwnd), msg, WPARAM(wparam), LPARAM(lparam))?;
    }
    Ok(())
}

/// 发送同步消息到窗口
#[inline]
pub fn send_message(hwnd: HWND, msg: u32, wparam: usize, lparam: isize) -> LRESULT {
    unsafe { SendMessageW(hwnd, msg, Some(WPARAM(wparam)), Some(LPARAM(lparam))) }
}

/// Change z-order only.
#[inline]
pub fn set_window_z_order(hwnd: HWND, insert_after: HWND) -> windows::core::Result<()> {
    unsafe { SetWindowPos(hwnd, Some(insert_after), 0, 0, 0, 0, SWP_NOMOVE | SWP_NOSIZE) }
}

#[inline]
pub fn hide_cursor() {
    unsafe {
        let _ = SetCursor(None);
    }
}

/// 放弃当前线程剩余的时间片
#[inline]
pub fn yield_time_slice() {
    unsafe { Sleep(0) }
}

#[inline]
pub fn screen_size() -> (i32, i32) {
    unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
}

/// Convert a Rust string to a NUL-terminated UTF-16 buffer for Win32 APIs.
#[inline]
pub fn to_wide_chars(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(once(0)).collect()
}

/// UTF-16 buffer (possibly NUL-terminated) to a Rust string.
pub fn from_wide_chars(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}
