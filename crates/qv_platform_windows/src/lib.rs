#![cfg(target_os = "windows")]

pub mod d3d;
pub mod dxgi;
pub mod message_box;
pub mod setup_dialog;
pub mod win32;
pub mod win_api;
pub mod window;

pub use d3d::device::DeviceDesc;
pub use d3d::{GpuBuffer, GraphicsDevice, QuadRenderer, RenderTarget, ShaderBytecode};
pub use dxgi::DxgiDisplays;
pub use setup_dialog::{SetupDialog, SetupDialogError};
pub use window::{PumpResult, RenderWindow};
