use qv_core::{OutputInfo, OutputModes};
use windows::Win32::UI::WindowsAndMessaging::{BN_CLICKED, CBN_SELCHANGE, CREATESTRUCTW};

use super::window::{SetupDialogState, check_get, combo_fill, combo_select, combo_selection};
use super::{ID_ADAPTER_COMBO, ID_CANCEL, ID_OK, ID_OUTPUT_COMBO, ID_WINDOWED_CHECK};
use crate::win_api;
use crate::win32::{
    HWND, LPARAM, LRESULT, WM_CLOSE, WM_COMMAND, WM_CREATE, WM_DESTROY, WPARAM,
};

impl SetupDialogState<'_> {
    pub(super) unsafe extern "system" fn window_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_CREATE => {
                let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
                let ptr = create_struct.lpCreateParams as *mut Self;
                let Some(state) = (unsafe { ptr.as_mut() }) else {
                    return LRESULT(-1);
                };

                state.hwnd = hwnd;
                if let Err(e) = state.create_controls() {
                    log::error!("Setup dialog controls: {e}");
                    return LRESULT(-1);
                }
                state.load_values();

                win_api::set_window_user_data(hwnd, ptr as isize);
                return LRESULT(0);
            }

            // Closing without OK is a cancel.
            WM_CLOSE => {
                let _ = win_api::destroy_window(hwnd);
                return LRESULT(0);
            }

            WM_DESTROY => {
                win_api::set_window_user_data(hwnd, 0);
                return LRESULT(0);
            }

            _ => {}
        }

        let ptr = win_api::get_window_user_data(hwnd) as *mut Self;
        // SAFETY: 状态由 SetupDialog::show 持有，直到模态循环结束
        let Some(state) = (unsafe { ptr.as_mut() }) else {
            return win_api::def_window_proc(hwnd, msg, wparam, lparam);
        };

        if msg == WM_COMMAND {
            let command_id = (wparam.0 & 0xFFFF) as i32;
            let notification = ((wparam.0 >> 16) & 0xFFFF) as u32;
            state.handle_command(command_id, notification);
            return LRESULT(0);
        }

        win_api::def_window_proc(hwnd, msg, wparam, lparam)
    }

    fn handle_command(&mut self, command_id: i32, notification: u32) {
        match (command_id, notification) {
            (ID_ADAPTER_COMBO, CBN_SELCHANGE) => self.on_adapter_changed(),
            (ID_OUTPUT_COMBO, CBN_SELCHANGE) => {
                self.on_output_changed();
                self.refresh_enabled();
            }
            (ID_WINDOWED_CHECK, BN_CLICKED) => self.refresh_enabled(),
            (ID_OK, BN_CLICKED) => self.on_ok(),
            (ID_CANCEL, BN_CLICKED) => {
                let _ = win_api::destroy_window(self.hwnd);
            }
            _ => {}
        }
    }

    /// Re-list the outputs of the selected adapter.
    pub(super) fn on_adapter_changed(&mut self) {
        let adapter = combo_selection(self.adapter_combo).unwrap_or(0) as u32;

        self.outputs = self.displays.outputs(adapter).unwrap_or_else(|e| {
            log::warn!("Listing outputs of adapter {adapter} failed: {e}");
            Vec::new()
        });

        if self.has_outputs() {
            let labels: Vec<String> = self.outputs.iter().map(OutputInfo::label).collect();
            combo_fill(self.output_combo, &labels);
            combo_select(self.output_combo, 0);
            self.on_output_changed();
        } else {
            log::info!("Adapter {adapter} has no display attached");
            self.set_no_outputs();
        }

        self.refresh_enabled();
    }

    /// Re-list display modes and aspect ratios of the selected output.
    pub(super) fn on_output_changed(&mut self) {
        let adapter = combo_selection(self.adapter_combo).unwrap_or(0) as u32;
        let output = combo_selection(self.output_combo).unwrap_or(0) as u32;

        match OutputModes::query(self.displays, adapter, output) {
            Ok(modes) => {
                combo_fill(self.mode_combo, &modes.mode_labels());
                combo_select(self.mode_combo, modes.current);
                combo_fill(self.aspect_combo, &modes.aspect_labels());
                combo_select(self.aspect_combo, 0);
                self.output_modes = Some(modes);
            }
            Err(e) => {
                log::warn!("Listing display modes of {adapter}/{output} failed: {e}");
                self.output_modes = None;
                combo_fill::<&str>(self.mode_combo, &[]);
                combo_fill::<&str>(self.aspect_combo, &[]);
            }
        }
    }

    fn on_ok(&mut self) {
        let windowed = check_get(self.windowed_check);
        if !windowed && !self.can_go_full_screen() {
            return;
        }

        self.selection = Some(self.current_selection());
        let _ = win_api::destroy_window(self.hwnd);
    }
}
