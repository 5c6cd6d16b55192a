// Graphics error types
//
// Environment failures raised while discovering displays and creating the device

use std::fmt;
use thiserror::Error;

use crate::multisample::MultiSample;

/// Errors raised by display discovery, device creation and resource creation
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("No graphics adapter found.")]
    NoAdapterFound,

    #[error("Adapter {adapter} has no output attached.")]
    NoOutputAttached { adapter: u32 },

    #[error("{0}")]
    DeviceCreationFailed(DeviceDiagnostics),

    #[error("Unsupported multi-sample count: {0} (expected 1, 2, 4 or 8)")]
    UnsupportedSampleCount(u32),

    #[error("Resource creation failed: {0}")]
    ResourceCreation(String),

    #[error("Graphics API error: {0}")]
    Api(String),
}

pub type GraphicsResult<T> = std::result::Result<T, GraphicsError>;

/// What was requested when device creation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDiagnostics {
    pub windowed: bool,
    pub width: u32,
    pub height: u32,
    pub multi_sample: MultiSample,
}

impl fmt::Display for DeviceDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Can't create Direct3D 11.0 device.\n\n")?;
        if self.windowed {
            f.write_str("Type: windowed.\n")?;
        } else {
            f.write_str("Type: full screen.\n")?;
        }
        writeln!(f, "Resolution: {}*{}.", self.width, self.height)?;
        if self.multi_sample.is_enabled() {
            writeln!(
                f,
                "Multi-sampling enabled ({} taps).",
                self.multi_sample.count
            )?;
        }
        Ok(())
    }
}
