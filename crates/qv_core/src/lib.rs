//! Platform-neutral core of quadview: display model, letterbox viewport arithmetic,
//! multi-sampling, quad geometry and frame loop policy.

pub mod aspect;
pub mod display;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod launch;
pub mod multisample;
pub mod setup;
pub mod viewport;

pub use aspect::{AspectRatio, AspectSelection};
pub use display::{
    AdapterInfo, DisplayEnumerator, DisplayMode, OutputInfo, PixelFormat, RefreshRate,
    ScalingMode, ScanlineOrder, primary_display_mode,
};
pub use error::{DeviceDiagnostics, GraphicsError, GraphicsResult};
pub use frame::{FpsCounter, FrameDecision, ZOrderChange};
pub use geometry::{
    CLEAR_COLOR, QUAD_VERTEX_COUNT, QUAD_VERTICES, VERTEX_STRIDE, constant_buffer_size_valid,
    quad_vertex_bytes,
};
pub use launch::LaunchConfig;
pub use multisample::MultiSample;
pub use setup::{OutputModes, SetupSelection};
pub use viewport::{Viewport, ViewportSet, compute_adjusted_viewport};
