// Application error type
//
// Every start-up failure ends up here before it is shown to the user

use qv_core::GraphicsError;
use qv_platform_windows::SetupDialogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Graphics(#[from] GraphicsError),

    #[error("{0}")]
    Window(String),

    #[error(transparent)]
    Dialog(#[from] SetupDialogError),

    #[error("Windows API error: {0}")]
    Windows(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<windows::core::Error> for AppError {
    fn from(err: windows::core::Error) -> Self {
        AppError::Windows(err.message())
    }
}
