//! 启动设置对话框
//!
//! 选择适配器、输出、分辨率、宽高比、多重采样以及窗口化/垂直同步。
//! 对话框以程序方式创建（不依赖 .rc 资源），在自己的模态消息循环中运行。

use qv_core::GraphicsError;
use thiserror::Error;
use windows::Win32::UI::WindowsAndMessaging::{IDCANCEL, IDOK};

mod events;
mod window;

pub use window::SetupDialog;

#[derive(Debug, Error)]
pub enum SetupDialogError {
    #[error("Can't spawn setup dialog.")]
    Spawn(#[source] windows::core::Error),

    #[error(transparent)]
    Graphics(#[from] GraphicsError),
}

// Control IDs. OK/Cancel reuse IDOK/IDCANCEL so Enter and ESC work.
const ID_OK: i32 = IDOK.0;
const ID_CANCEL: i32 = IDCANCEL.0;
const ID_ADAPTER_COMBO: i32 = 1001;
const ID_OUTPUT_COMBO: i32 = 1002;
const ID_MODE_COMBO: i32 = 1003;
const ID_ASPECT_COMBO: i32 = 1004;
const ID_MULTI_SAMPLE_COMBO: i32 = 1005;
const ID_WINDOWED_CHECK: i32 = 1006;
const ID_VSYNC_CHECK: i32 = 1007;

// Layout (client coordinates).
const MARGIN: i32 = 12;
const LABEL_WIDTH: i32 = 110;
const CONTROL_WIDTH: i32 = 340;
const ROW_HEIGHT: i32 = 30;
const CONTROL_HEIGHT: i32 = 24;
const COMBO_DROP_HEIGHT: i32 = 240;
const BUTTON_WIDTH: i32 = 88;
const BUTTON_HEIGHT: i32 = 26;
const CLIENT_WIDTH: i32 = MARGIN * 3 + LABEL_WIDTH + CONTROL_WIDTH;
const CLIENT_HEIGHT: i32 = MARGIN * 3 + ROW_HEIGHT * 7 + BUTTON_HEIGHT;

const CLASS_NAME: &str = "quadview_setup_dialog";
