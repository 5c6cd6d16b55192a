use std::ffi::c_void;

use qv_core::setup::{MULTI_SAMPLE_LABELS, NO_OUTPUT_LABEL, index_for_multi_sample};
use qv_core::{
    AdapterInfo, DisplayEnumerator, GraphicsError, LaunchConfig, OutputInfo, OutputModes,
    SetupSelection,
};
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::{COLOR_BTNFACE, DEFAULT_GUI_FONT, GetStockObject, HBRUSH, HFONT};
use windows::Win32::UI::Controls::{BST_CHECKED, BST_UNCHECKED};
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

use super::{
    BUTTON_HEIGHT, BUTTON_WIDTH, CLASS_NAME, CLIENT_HEIGHT, CLIENT_WIDTH, COMBO_DROP_HEIGHT,
    CONTROL_HEIGHT, CONTROL_WIDTH, ID_ADAPTER_COMBO, ID_ASPECT_COMBO, ID_CANCEL, ID_MODE_COMBO,
    ID_MULTI_SAMPLE_COMBO, ID_OK, ID_OUTPUT_COMBO, ID_VSYNC_CHECK, ID_WINDOWED_CHECK,
    LABEL_WIDTH, MARGIN, ROW_HEIGHT, SetupDialogError,
};
use crate::win_api::{self, to_wide_chars};

/// Modal setup dialog shown before the render window is created.
pub struct SetupDialog;

impl SetupDialog {
    /// Returns `Ok(None)` when the user cancels.
    ///
    /// `defaults` pre-selects adapter, multi-sampling, windowed and v-sync.
    pub fn show(
        displays: &dyn DisplayEnumerator,
        title: &str,
        defaults: &LaunchConfig,
    ) -> Result<Option<LaunchConfig>, SetupDialogError> {
        let adapters = displays.adapters()?;
        if adapters.is_empty() {
            return Err(GraphicsError::NoAdapterFound.into());
        }

        let mut state = SetupDialogState::new(displays, adapters, defaults);
        state.run(title).map_err(SetupDialogError::Spawn)?;

        match state.selection {
            Some(selection) => {
                log::info!("Setup confirmed: {selection:?}");
                Ok(Some(selection.into_launch_config(state.output_modes.as_ref())?))
            }
            None => {
                log::info!("Setup cancelled");
                Ok(None)
            }
        }
    }
}

pub(super) struct SetupDialogState<'a> {
    pub(super) displays: &'a dyn DisplayEnumerator,
    pub(super) hwnd: HWND,
    font: HFONT,

    pub(super) adapters: Vec<AdapterInfo>,
    pub(super) outputs: Vec<OutputInfo>,
    pub(super) output_modes: Option<OutputModes>,
    defaults: LaunchConfig,

    pub(super) adapter_combo: HWND,
    pub(super) output_combo: HWND,
    pub(super) mode_combo: HWND,
    pub(super) aspect_combo: HWND,
    pub(super) multi_sample_combo: HWND,
    pub(super) windowed_check: HWND,
    pub(super) vsync_check: HWND,
    pub(super) ok_button: HWND,

    /// Set when the dialog is confirmed.
    pub(super) selection: Option<SetupSelection>,
}

impl<'a> SetupDialogState<'a> {
    fn new(
        displays: &'a dyn DisplayEnumerator,
        adapters: Vec<AdapterInfo>,
        defaults: &LaunchConfig,
    ) -> Self {
        Self {
            displays,
            hwnd: HWND::default(),
            font: HFONT::default(),
            adapters,
            outputs: Vec::new(),
            output_modes: None,
            defaults: *defaults,
            adapter_combo: HWND::default(),
            output_combo: HWND::default(),
            mode_combo: HWND::default(),
            aspect_combo: HWND::default(),
            multi_sample_combo: HWND::default(),
            windowed_check: HWND::default(),
            vsync_check: HWND::default(),
            ok_button: HWND::default(),
            selection: None,
        }
    }

    /// Create the dialog window and run its modal loop until it is destroyed.
    fn run(&mut self, title: &str) -> windows::core::Result<()> {
        let instance = win_api::get_module_handle()?;
        let class_name = to_wide_chars(CLASS_NAME);
        let title_w = to_wide_chars(title);

        let window_class = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            lpfnWndProc: Some(Self::window_proc),
            hInstance: instance.into(),
            hIcon: win_api::load_app_icon(instance),
            hCursor: win_api::load_cursor_arrow()?,
            hbrBackground: HBRUSH((COLOR_BTNFACE.0 + 1) as *mut _),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };
        // A second dialog in the same process finds the class already registered.
        let _ = win_api::register_class(&window_class);

        let style = WS_POPUP | WS_CAPTION | WS_SYSMENU;
        let ex_style = WS_EX_DLGMODALFRAME | WS_EX_CONTROLPARENT;
        let (width, height) =
            win_api::adjust_window_rect(CLIENT_WIDTH, CLIENT_HEIGHT, style, ex_style)?;
        let (screen_width, screen_height) = win_api::screen_size();

        let hwnd = unsafe {
            CreateWindowExW(
                ex_style,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title_w.as_ptr()),
                style,
                (screen_width - width) / 2,
                (screen_height - height) / 2,
                width,
                height,
                None,
                None,
                Some(instance.into()),
                Some(self as *mut Self as *const c_void),
            )?
        };

        win_api::show_window(hwnd, SW_SHOW)?;
        let _ = win_api::update_window(hwnd);

        // Modal loop: process messages until the dialog is destroyed.
        unsafe {
            let mut msg = MSG::default();
            while win_api::is_window(hwnd) && GetMessageW(&mut msg, None, 0, 0).as_bool() {
                if IsDialogMessageW(hwnd, &msg).as_bool() {
                    continue;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        let _ = win_api::unregister_class(PCWSTR(class_name.as_ptr()), instance);
        Ok(())
    }

    pub(super) fn create_controls(&mut self) -> windows::core::Result<()> {
        self.font = HFONT(unsafe { GetStockObject(DEFAULT_GUI_FONT) }.0);

        let labels = [
            "Adapter:",
            "Display:",
            "Resolution:",
            "Aspect ratio:",
            "Multi-sampling:",
        ];
        for (row, text) in labels.iter().enumerate() {
            self.create_control(
                "STATIC",
                text,
                WINDOW_STYLE::default(),
                MARGIN,
                row_y(row) + 4,
                LABEL_WIDTH,
                CONTROL_HEIGHT,
                0,
            )?;
        }

        let combo_x = MARGIN * 2 + LABEL_WIDTH;
        let combo_style = WS_TABSTOP | WS_VSCROLL | WINDOW_STYLE(CBS_DROPDOWNLIST as u32);
        let combo = |state: &mut Self, row: usize, id: i32| {
            state.create_control(
                "COMBOBOX",
                "",
                combo_style,
                combo_x,
                row_y(row),
                CONTROL_WIDTH,
                COMBO_DROP_HEIGHT,
                id,
            )
        };
        self.adapter_combo = combo(self, 0, ID_ADAPTER_COMBO)?;
        self.output_combo = combo(self, 1, ID_OUTPUT_COMBO)?;
        self.mode_combo = combo(self, 2, ID_MODE_COMBO)?;
        self.aspect_combo = combo(self, 3, ID_ASPECT_COMBO)?;
        self.multi_sample_combo = combo(self, 4, ID_MULTI_SAMPLE_COMBO)?;

        let check_style = WS_TABSTOP | WINDOW_STYLE(BS_AUTOCHECKBOX as u32);
        self.windowed_check = self.create_control(
            "BUTTON",
            "Windowed",
            check_style,
            combo_x,
            row_y(5),
            CONTROL_WIDTH,
            CONTROL_HEIGHT,
            ID_WINDOWED_CHECK,
        )?;
        self.vsync_check = self.create_control(
            "BUTTON",
            "Vertical sync.",
            check_style,
            combo_x,
            row_y(6),
            CONTROL_WIDTH,
            CONTROL_HEIGHT,
            ID_VSYNC_CHECK,
        )?;

        let button_y = CLIENT_HEIGHT - MARGIN - BUTTON_HEIGHT;
        let cancel_x = CLIENT_WIDTH - MARGIN - BUTTON_WIDTH;
        self.ok_button = self.create_control(
            "BUTTON",
            "OK",
            WS_TABSTOP | WINDOW_STYLE(BS_DEFPUSHBUTTON as u32),
            cancel_x - MARGIN / 2 - BUTTON_WIDTH,
            button_y,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
            ID_OK,
        )?;
        self.create_control(
            "BUTTON",
            "Cancel",
            WS_TABSTOP,
            cancel_x,
            button_y,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
            ID_CANCEL,
        )?;

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn create_control(
        &self,
        class: &str,
        text: &str,
        style: WINDOW_STYLE,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        id: i32,
    ) -> windows::core::Result<HWND> {
        let instance = win_api::get_module_handle()?;
        let class_w = to_wide_chars(class);
        let text_w = to_wide_chars(text);

        let control = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                PCWSTR(class_w.as_ptr()),
                PCWSTR(text_w.as_ptr()),
                WS_CHILD | WS_VISIBLE | style,
                x,
                y,
                width,
                height,
                Some(self.hwnd),
                Some(HMENU(id as isize as *mut _)),
                Some(instance.into()),
                None,
            )?
        };
        win_api::send_message(control, WM_SETFONT, self.font.0 as usize, 1);
        Ok(control)
    }

    /// Fill the controls from `defaults` and the enumerated adapters.
    pub(super) fn load_values(&mut self) {
        let labels: Vec<String> = self
            .adapters
            .iter()
            .map(|a| a.description.clone())
            .collect();
        combo_fill(self.adapter_combo, &labels);

        let adapter = (self.defaults.adapter as usize).min(self.adapters.len().saturating_sub(1));
        combo_select(self.adapter_combo, adapter);

        combo_fill(self.multi_sample_combo, &MULTI_SAMPLE_LABELS);
        combo_select(
            self.multi_sample_combo,
            index_for_multi_sample(&self.defaults.multi_sample),
        );

        check_set(self.windowed_check, self.defaults.windowed);
        check_set(self.vsync_check, self.defaults.vsync);

        self.on_adapter_changed();
    }

    pub(super) fn has_outputs(&self) -> bool {
        !self.outputs.is_empty()
    }

    /// Full screen needs at least one listed display mode.
    pub(super) fn can_go_full_screen(&self) -> bool {
        self.output_modes
            .as_ref()
            .is_some_and(|modes| !modes.modes.is_empty())
    }

    /// Re-evaluate which controls are usable.
    ///
    /// Windowed mode always runs on the primary adapter/output, so the display
    /// selection is greyed out there.
    pub(super) fn refresh_enabled(&self) {
        let windowed = check_get(self.windowed_check);
        let outputs = self.has_outputs();

        win_api::enable_window(self.adapter_combo, !windowed);
        win_api::enable_window(self.output_combo, !windowed && outputs);
        win_api::enable_window(self.mode_combo, !windowed && outputs);
        win_api::enable_window(self.aspect_combo, !windowed && outputs);
        win_api::enable_window(self.vsync_check, !windowed);
        win_api::enable_window(self.windowed_check, outputs || windowed);
        win_api::enable_window(self.ok_button, windowed || self.can_go_full_screen());
    }

    pub(super) fn set_no_outputs(&mut self) {
        self.output_modes = None;
        combo_fill(self.output_combo, &[NO_OUTPUT_LABEL]);
        combo_select(self.output_combo, 0);
        combo_fill::<&str>(self.mode_combo, &[]);
        combo_fill::<&str>(self.aspect_combo, &[]);
    }

    pub(super) fn current_selection(&self) -> SetupSelection {
        SetupSelection {
            adapter: combo_selection(self.adapter_combo).unwrap_or(0) as u32,
            output: combo_selection(self.output_combo).unwrap_or(0) as u32,
            mode_index: combo_selection(self.mode_combo).unwrap_or(0),
            aspect_index: combo_selection(self.aspect_combo).unwrap_or(0),
            multi_sample_index: combo_selection(self.multi_sample_combo).unwrap_or(0),
            windowed: check_get(self.windowed_check),
            vsync: check_get(self.vsync_check),
        }
    }
}

const fn row_y(row: usize) -> i32 {
    MARGIN + row as i32 * ROW_HEIGHT
}

pub(super) fn combo_fill<S: AsRef<str>>(combo: HWND, items: &[S]) {
    win_api::send_message(combo, CB_RESETCONTENT, 0, 0);
    for item in items {
        let text = to_wide_chars(item.as_ref());
        win_api::send_message(combo, CB_ADDSTRING, 0, text.as_ptr() as isize);
    }
}

pub(super) fn combo_select(combo: HWND, index: usize) {
    win_api::send_message(combo, CB_SETCURSEL, index, 0);
}

pub(super) fn combo_selection(combo: HWND) -> Option<usize> {
    let result = win_api::send_message(combo, CB_GETCURSEL, 0, 0).0;
    (result != CB_ERR as isize).then_some(result as usize)
}

pub(super) fn check_set(button: HWND, checked: bool) {
    let state = if checked { BST_CHECKED } else { BST_UNCHECKED };
    win_api::send_message(button, BM_SETCHECK, state.0 as usize, 0);
}

pub(super) fn check_get(button: HWND) -> bool {
    win_api::send_message(button, BM_GETCHECK, 0, 0).0 as u32 == BST_CHECKED.0
}
