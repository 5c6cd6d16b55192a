//! 渲染窗口
//!
//! 窗口化时为带标题栏的弹出窗口（客户区大小等于显示模式），全屏时为无边框弹出窗口。
//! 窗口过程只处理关闭、ESC 与激活状态；渲染循环通过 `RenderWindow::pump` 驱动。

use std::cell::Cell;
use std::ffi::c_void;

use qv_core::frame::{activation_z_order, hide_cursor};
use qv_core::{FrameDecision, ZOrderChange};
use windows::Win32::Foundation::{E_FAIL, HINSTANCE, HMODULE};
use windows::Win32::Graphics::Gdi::{BLACK_BRUSH, GetStockObject, HBRUSH};
use windows::Win32::UI::Input::KeyboardAndMouse::VK_ESCAPE;
use windows::Win32::UI::WindowsAndMessaging::{
    CREATESTRUCTW, CreateWindowExW, HCURSOR, HWND_BOTTOM, HWND_TOPMOST, SW_SHOW, WA_INACTIVE,
    WINDOW_EX_STYLE, WINDOW_STYLE, WM_QUIT, WNDCLASSEXW, WS_CAPTION, WS_POPUP, WS_SYSMENU,
};
use windows::core::PCWSTR;

use crate::win_api;
use crate::win32::{
    HWND, LPARAM, LRESULT, WM_ACTIVATE, WM_CLOSE, WM_CREATE, WM_DESTROY, WM_KEYDOWN, WPARAM,
};

/// What one turn of the message pump produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpResult {
    /// `WM_QUIT` arrived; leave the loop.
    Quit,
    /// A message was dispatched.
    Dispatched,
    /// Queue empty. `Render` means a frame should be drawn and presented now.
    Idle(FrameDecision),
}

/// Shared between `RenderWindow` and the window procedure through `GWLP_USERDATA`.
struct WindowState {
    windowed: bool,
    alive: Cell<bool>,
    active: Cell<bool>,
    has_swap_chain: Cell<bool>,
}

pub struct RenderWindow {
    hwnd: HWND,
    instance: HMODULE,
    class_name: Vec<u16>,
    title: String,
    // Boxed so the address handed to the window procedure stays put.
    state: Box<WindowState>,
}

impl RenderWindow {
    /// Create and show a window whose client area is `width` x `height`, at the desktop origin.
    pub fn create(
        class_name: &str,
        title: &str,
        width: u32,
        height: u32,
        windowed: bool,
    ) -> windows::core::Result<Self> {
        let instance = win_api::get_module_handle()?;
        let class_name_w = win_api::to_wide_chars(class_name);
        let title_w = win_api::to_wide_chars(title);

        let icon = win_api::load_app_icon(instance);
        let window_class = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            lpfnWndProc: Some(window_proc),
            hInstance: instance.into(),
            hIcon: icon,
            hIconSm: icon,
            // 全屏时不设置光标，由渲染循环隐藏
            hCursor: if windowed {
                win_api::load_cursor_arrow()?
            } else {
                HCURSOR::default()
            },
            hbrBackground: if windowed {
                HBRUSH(unsafe { GetStockObject(BLACK_BRUSH) }.0)
            } else {
                HBRUSH::default()
            },
            lpszClassName: PCWSTR(class_name_w.as_ptr()),
            ..Default::default()
        };

        if win_api::register_class(&window_class) == 0 {
            return Err(windows::core::Error::new(
                E_FAIL,
                "Can not create application window (RegisterClassEx() failed).",
            ));
        }

        let (style, ex_style) = window_styles(windowed);
        let (outer_width, outer_height) =
            win_api::adjust_window_rect(width as i32, height as i32, style, ex_style)?;

        let state = Box::new(WindowState {
            windowed,
            alive: Cell::new(true),
            active: Cell::new(false),
            has_swap_chain: Cell::new(false),
        });

        // Always at (0, 0): the primary desktop, and DXGI moves a full-screen window as needed.
        let hwnd = unsafe {
            CreateWindowExW(
                ex_style,
                PCWSTR(class_name_w.as_ptr()),
                PCWSTR(title_w.as_ptr()),
                style,
                0,
                0,
                outer_width,
                outer_height,
                None,
                None,
                Some(HINSTANCE::from(instance)),
                Some(&*state as *const WindowState as *const c_void),
            )
        };

        let hwnd = match hwnd {
            Ok(hwnd) => hwnd,
            Err(e) => {
                let _ = win_api::unregister_class(PCWSTR(class_name_w.as_ptr()), instance);
                log::error!("CreateWindowExW failed: {e}");
                return Err(windows::core::Error::new(
                    E_FAIL,
                    "Can not create application window (CreateWindowEx() failed).",
                ));
            }
        };

        win_api::show_window(hwnd, SW_SHOW)?;
        let _ = win_api::update_window(hwnd);

        log::info!(
            "Render window {}x{} ({})",
            width,
            height,
            if windowed { "windowed" } else { "full screen" }
        );

        Ok(Self {
            hwnd,
            instance,
            class_name: class_name_w,
            title: title.to_string(),
            state,
        })
    }

    #[inline]
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn is_windowed(&self) -> bool {
        self.state.windowed
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.active.get()
    }

    /// Deactivation only pushes a full-screen window to the bottom once a swap chain exists.
    pub fn set_swap_chain_ready(&self, ready: bool) {
        self.state.has_swap_chain.set(ready);
    }

    pub fn set_title(&self, text: &str) {
        if self.state.alive.get() {
            let _ = win_api::set_window_text(self.hwnd, text);
        }
    }

    /// Handle at most one pending message; otherwise decide whether to render.
    pub fn pump(&self) -> PumpResult {
        if let Some(msg) = win_api::peek_message() {
            if msg.message == WM_QUIT {
                return PumpResult::Quit;
            }
            win_api::dispatch_message(&msg);
            return PumpResult::Dispatched;
        }

        if !self.state.alive.get() {
            return PumpResult::Idle(FrameDecision::Yield);
        }

        let windowed = self.state.windowed;
        let active = self.state.active.get();
        if hide_cursor(windowed, active) {
            win_api::hide_cursor();
        }

        let decision = FrameDecision::new(windowed, active);
        if decision == FrameDecision::Yield {
            // Keeps an unfocused full-screen loop from spinning a core.
            win_api::yield_time_slice();
        }
        PumpResult::Idle(decision)
    }
}

impl Drop for RenderWindow {
    fn drop(&mut self) {
        if win_api::is_window(self.hwnd) {
            let _ = win_api::destroy_window(self.hwnd);
        }
        if let Err(e) = win_api::unregister_class(PCWSTR(self.class_name.as_ptr()), self.instance)
        {
            log::debug!("UnregisterClass: {e}");
        }
    }
}

pub fn window_styles(windowed: bool) -> (WINDOW_STYLE, WINDOW_EX_STYLE) {
    if windowed {
        (WS_POPUP | WS_CAPTION | WS_SYSMENU, WINDOW_EX_STYLE::default())
    } else {
        // WS_EX_TOPMOST is (re-)assigned on activation.
        (WS_POPUP, WINDOW_EX_STYLE::default())
    }
}

fn window_state<'a>(hwnd: HWND) -> Option<&'a WindowState> {
    let ptr = win_api::get_window_user_data(hwnd) as *const WindowState;
    // SAFETY: 指针在 WM_CREATE 中写入，RenderWindow 在销毁窗口之后才释放它
    unsafe { ptr.as_ref() }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
            win_api::set_window_user_data(hwnd, create_struct.lpCreateParams as isize);
            LRESULT(0)
        }

        WM_CLOSE => {
            win_api::quit_message_loop(0);
            if let Some(state) = window_state(hwnd) {
                state.alive.set(false);
            }
            // DefWindowProc destroys the window.
            win_api::def_window_proc(hwnd, msg, wparam, lparam)
        }

        WM_DESTROY => {
            if let Some(state) = window_state(hwnd) {
                state.alive.set(false);
            }
            win_api::set_window_user_data(hwnd, 0);
            LRESULT(0)
        }

        WM_KEYDOWN => {
            if wparam.0 as u16 == VK_ESCAPE.0 {
                let _ = win_api::post_message(hwnd, WM_CLOSE, 0, 0);
            }
            win_api::def_window_proc(hwnd, msg, wparam, lparam)
        }

        WM_ACTIVATE => {
            if let Some(state) = window_state(hwnd) {
                let activated = (wparam.0 & 0xFFFF) as u32 != WA_INACTIVE;
                match activation_z_order(state.windowed, activated, state.has_swap_chain.get()) {
                    ZOrderChange::Topmost => {
                        let _ = win_api::set_window_z_order(hwnd, HWND_TOPMOST);
                    }
                    ZOrderChange::Bottom => {
                        let _ = win_api::set_window_z_order(hwnd, HWND_BOTTOM);
                    }
                    ZOrderChange::Unchanged => {}
                }
                state.active.set(activated);
            }
            win_api::def_window_proc(hwnd, msg, wparam, lparam)
        }

        _ => win_api::def_window_proc(hwnd, msg, wparam, lparam),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_styles() {
        let (style, ex_style) = window_styles(true);
        assert_eq!(style, WS_POPUP | WS_CAPTION | WS_SYSMENU);
        assert_eq!(ex_style, WINDOW_EX_STYLE::default());

        let (style, _) = window_styles(false);
        assert_eq!(style, WS_POPUP);
    }

    #[test]
    fn test_client_area_grows_with_caption() {
        let (style, ex_style) = window_styles(true);
        let (w, h) = win_api::adjust_window_rect(1280, 720, style, ex_style).unwrap();
        assert!(w >= 1280);
        assert!(h > 720);

        let (style, ex_style) = window_styles(false);
        assert_eq!(
            win_api::adjust_window_rect(1280, 720, style, ex_style).unwrap(),
            (1280, 720)
        );
    }

    #[test]
    fn test_close_unwinds_pump() {
        let window =
            RenderWindow::create("quadview_test_window", "quadview test", 320, 240, true).unwrap();
        assert!(window.is_windowed());

        win_api::post_message(window.hwnd(), WM_CLOSE, 0, 0).unwrap();

        let mut quit = false;
        for _ in 0..64 {
            if window.pump() == PumpResult::Quit {
                quit = true;
                break;
            }
        }
        assert!(quit);
        assert!(!win_api::is_window(window.hwnd()));
    }
}
