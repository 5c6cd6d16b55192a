#![cfg(target_os = "windows")]

pub mod app;
pub mod constants;
pub mod error;

pub use app::run;
pub use constants::{APP_ID, APP_TITLE, WINDOW_CLASS_NAME};
pub use error::{AppError, AppResult};
