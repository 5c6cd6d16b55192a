use crate::aspect::AspectSelection;
use crate::display::{DisplayEnumerator, DisplayMode, primary_display_mode};
use crate::error::GraphicsResult;
use crate::multisample::MultiSample;

/// Everything resolved before the device is created.
///
/// `display_mode` of `None` means the primary output's desktop mode (or the windowed
/// resolution in windowed mode).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchConfig {
    pub adapter: u32,
    pub output: u32,
    pub display_mode: Option<DisplayMode>,
    /// Full-screen mode remembered from an earlier run. Matched against what the output
    /// supports now, since the monitor may have changed in between.
    pub preferred_mode: Option<DisplayMode>,
    pub aspect: AspectSelection,
    pub multi_sample: MultiSample,
    pub windowed: bool,
    pub vsync: bool,
}

impl LaunchConfig {
    /// Primary adapter and output, automatic aspect, no multi-sampling.
    pub fn primary(windowed: bool, vsync: bool) -> Self {
        Self {
            adapter: 0,
            output: 0,
            display_mode: None,
            preferred_mode: None,
            aspect: AspectSelection::Automatic,
            multi_sample: MultiSample::off(),
            windowed,
            vsync,
        }
    }

    pub fn sync_interval(&self) -> u32 {
        crate::frame::sync_interval(self.windowed, self.vsync)
    }

    /// The mode the swap chain is created with.
    ///
    /// An explicit mode wins. Windowed mode uses `primary_display_mode`. In full screen
    /// the closest match to `preferred_mode` is used when one is remembered, otherwise the
    /// desktop mode of the chosen output. Matched modes get the gamma-corrected format.
    pub fn resolve_display_mode<E: DisplayEnumerator + ?Sized>(
        &self,
        enumerator: &E,
        windowed_size: (u32, u32),
    ) -> GraphicsResult<DisplayMode> {
        if let Some(mode) = self.display_mode {
            return Ok(mode);
        }
        if self.windowed {
            return primary_display_mode(enumerator, true, windowed_size);
        }
        if let Some(preferred) = self.preferred_mode {
            let wanted = preferred.with_format(preferred.format.linear());
            let mode = enumerator.closest_mode(self.adapter, self.output, &wanted)?;
            return Ok(mode.with_format(mode.format.gamma()));
        }
        if (self.adapter, self.output) == (0, 0) {
            return primary_display_mode(enumerator, false, windowed_size);
        }

        let mode = enumerator.desktop_mode(self.adapter, self.output)?;
        Ok(mode.with_format(mode.format.gamma()))
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self::primary(true, true)
    }
}
