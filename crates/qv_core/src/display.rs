// Display discovery model
//
// Adapter, output and display mode descriptions independent of the graphics API

use crate::error::{GraphicsError, GraphicsResult};

/// 后台缓冲区像素格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// DXGI_FORMAT_B8G8R8A8_UNORM（枚举显示模式时使用）
    #[default]
    Bgra8Unorm,
    /// DXGI_FORMAT_B8G8R8A8_UNORM_SRGB（伽马校正后的后台缓冲区）
    Bgra8UnormSrgb,
    /// 其他 DXGI 格式的原始值
    Other(u32),
}

impl PixelFormat {
    const DXGI_B8G8R8A8_UNORM: u32 = 87;
    const DXGI_B8G8R8A8_UNORM_SRGB: u32 = 91;

    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            Self::DXGI_B8G8R8A8_UNORM => PixelFormat::Bgra8Unorm,
            Self::DXGI_B8G8R8A8_UNORM_SRGB => PixelFormat::Bgra8UnormSrgb,
            other => PixelFormat::Other(other),
        }
    }

    pub const fn to_raw(self) -> u32 {
        match self {
            PixelFormat::Bgra8Unorm => Self::DXGI_B8G8R8A8_UNORM,
            PixelFormat::Bgra8UnormSrgb => Self::DXGI_B8G8R8A8_UNORM_SRGB,
            PixelFormat::Other(raw) => raw,
        }
    }

    /// 对应的伽马校正格式
    pub const fn gamma(self) -> Self {
        match self {
            PixelFormat::Bgra8Unorm => PixelFormat::Bgra8UnormSrgb,
            other => other,
        }
    }

    /// 枚举显示模式所用的线性格式
    pub const fn linear(self) -> Self {
        match self {
            PixelFormat::Bgra8UnormSrgb => PixelFormat::Bgra8Unorm,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanlineOrder {
    #[default]
    Unspecified,
    Progressive,
    UpperFieldFirst,
    LowerFieldFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalingMode {
    #[default]
    Unspecified,
    Centered,
    Stretched,
}

/// Refresh rate as a rational; 0/0 means "any" when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RefreshRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl RefreshRate {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Whole hertz, truncated. An unspecified rate reads as 0.
    pub const fn hz(&self) -> u32 {
        if self.denominator == 0 {
            0
        } else {
            self.numerator / self.denominator
        }
    }
}

/// A display mode, sourced from enumeration or synthesised for windowed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: RefreshRate,
    pub format: PixelFormat,
    pub scanline_order: ScanlineOrder,
    pub scaling: ScalingMode,
}

impl DisplayMode {
    /// Mode template used for closest-match lookups and windowed back buffers.
    pub const fn windowed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            refresh_rate: RefreshRate::new(0, 0),
            format: PixelFormat::Bgra8Unorm,
            scanline_order: ScanlineOrder::Unspecified,
            scaling: ScalingMode::Unspecified,
        }
    }

    pub const fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub const fn refresh_rate_hz(&self) -> u32 {
        self.refresh_rate.hz()
    }

    /// "WxH @ NHz"
    pub fn describe(&self) -> String {
        format!(
            "{}x{} @ {}Hz",
            self.width,
            self.height,
            self.refresh_rate_hz()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    pub index: u32,
    pub description: String,
    pub dedicated_video_memory: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputInfo {
    pub index: u32,
    pub name: String,
    /// Current desktop resolution of the output.
    pub desktop_width: u32,
    pub desktop_height: u32,
}

impl OutputInfo {
    /// "#N: name", numbered from 1 as shown in the setup dialog.
    pub fn label(&self) -> String {
        format!("#{}: {}", self.index + 1, self.name)
    }
}

/// Enumerates adapters, outputs and display modes.
pub trait DisplayEnumerator {
    fn adapters(&self) -> GraphicsResult<Vec<AdapterInfo>>;

    /// Outputs attached to `adapter`. An empty list is valid (no monitor attached).
    fn outputs(&self, adapter: u32) -> GraphicsResult<Vec<OutputInfo>>;

    /// Supported modes for the fixed back buffer format.
    fn display_modes(&self, adapter: u32, output: u32) -> GraphicsResult<Vec<DisplayMode>>;

    /// Closest supported mode to `wanted`.
    fn closest_mode(
        &self,
        adapter: u32,
        output: u32,
        wanted: &DisplayMode,
    ) -> GraphicsResult<DisplayMode>;

    /// Supported mode closest to the output's current desktop resolution.
    fn desktop_mode(&self, adapter: u32, output: u32) -> GraphicsResult<DisplayMode> {
        let outputs = self.outputs(adapter)?;
        let info = outputs
            .iter()
            .find(|o| o.index == output)
            .ok_or(GraphicsError::NoOutputAttached { adapter })?;

        let wanted = DisplayMode::windowed(info.desktop_width, info.desktop_height);
        self.closest_mode(adapter, output, &wanted)
    }
}

/// Primary adapter/output mode: the desktop mode in the gamma-corrected format, or a fixed
/// resolution when windowed.
pub fn primary_display_mode<E: DisplayEnumerator + ?Sized>(
    enumerator: &E,
    windowed: bool,
    windowed_size: (u32, u32),
) -> GraphicsResult<DisplayMode> {
    if enumerator.adapters()?.is_empty() {
        return Err(GraphicsError::NoAdapterFound);
    }
    if enumerator.outputs(0)?.is_empty() {
        return Err(GraphicsError::NoOutputAttached { adapter: 0 });
    }

    let mode = enumerator.desktop_mode(0, 0)?;
    let mode = mode.with_format(mode.format.gamma());

    if windowed {
        Ok(mode.with_size(windowed_size.0, windowed_size.1))
    } else {
        Ok(mode)
    }
}

/// Index of the mode in `modes` equal to `mode`.
pub fn index_of_mode(modes: &[DisplayMode], mode: &DisplayMode) -> Option<usize> {
    modes.iter().position(|m| m == mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeDisplays {
        outputs: Vec<OutputInfo>,
        modes: Vec<DisplayMode>,
    }

    fn mode(width: u32, height: u32, hz: u32) -> DisplayMode {
        DisplayMode {
            refresh_rate: RefreshRate::new(hz * 1000, 1000),
            scanline_order: ScanlineOrder::Progressive,
            ..DisplayMode::windowed(width, height)
        }
    }

    impl DisplayEnumerator for FakeDisplays {
        fn adapters(&self) -> GraphicsResult<Vec<AdapterInfo>> {
            Ok(vec![AdapterInfo {
                index: 0,
                description: "Fake Adapter".to_string(),
                dedicated_video_memory: 0,
            }])
        }

        fn outputs(&self, _adapter: u32) -> GraphicsResult<Vec<OutputInfo>> {
            Ok(self.outputs.clone())
        }

        fn display_modes(&self, _adapter: u32, _output: u32) -> GraphicsResult<Vec<DisplayMode>> {
            Ok(self.modes.clone())
        }

        fn closest_mode(
            &self,
            _adapter: u32,
            _output: u32,
            wanted: &DisplayMode,
        ) -> GraphicsResult<DisplayMode> {
            self.modes
                .iter()
                .filter(|m| m.width == wanted.width && m.height == wanted.height)
                .max_by_key(|m| m.refresh_rate_hz())
                .copied()
                .ok_or_else(|| GraphicsError::Api("no match".to_string()))
        }
    }

    fn fake() -> FakeDisplays {
        FakeDisplays {
            outputs: vec![OutputInfo {
                index: 0,
                name: "Generic PnP Monitor".to_string(),
                desktop_width: 1920,
                desktop_height: 1080,
            }],
            modes: vec![mode(1280, 720, 60), mode(1920, 1080, 60), mode(1920, 1080, 144)],
        }
    }

    #[test]
    fn test_gamma_and_linear_are_inverse() {
        assert_eq!(PixelFormat::Bgra8Unorm.gamma().linear(), PixelFormat::Bgra8Unorm);
        assert_eq!(PixelFormat::Bgra8UnormSrgb.linear(), PixelFormat::Bgra8Unorm);
        assert_eq!(PixelFormat::Other(2).linear(), PixelFormat::Other(2));
    }

    #[test]
    fn test_describe_mode() {
        assert_eq!(mode(1920, 1080, 60).describe(), "1920x1080 @ 60Hz");
        assert_eq!(DisplayMode::windowed(800, 600).describe(), "800x600 @ 0Hz");
    }

    #[test]
    fn test_primary_full_screen_uses_desktop_mode_with_gamma() {
        let primary = primary_display_mode(&fake(), false, (1280, 720)).unwrap();
        assert_eq!((primary.width, primary.height), (1920, 1080));
        assert_eq!(primary.refresh_rate_hz(), 144);
        assert_eq!(primary.format, PixelFormat::Bgra8UnormSrgb);
    }

    #[test]
    fn test_primary_windowed_uses_fixed_size() {
        let primary = primary_display_mode(&fake(), true, (1280, 720)).unwrap();
        assert_eq!((primary.width, primary.height), (1280, 720));
        assert_eq!(primary.format, PixelFormat::Bgra8UnormSrgb);
    }

    #[test]
    fn test_no_output_attached() {
        let displays = FakeDisplays {
            outputs: Vec::new(),
            modes: Vec::new(),
        };
        assert!(matches!(
            primary_display_mode(&displays, true, (1280, 720)),
            Err(GraphicsError::NoOutputAttached { adapter: 0 })
        ));
    }

    #[test]
    fn test_index_of_desktop_mode() {
        let displays = fake();
        let desktop = displays.desktop_mode(0, 0).unwrap();
        assert_eq!(index_of_mode(&displays.modes, &desktop), Some(2));
    }

    #[test]
    fn test_format_roundtrip_raw() {
        assert_eq!(PixelFormat::from_raw(87), PixelFormat::Bgra8Unorm);
        assert_eq!(PixelFormat::Bgra8UnormSrgb.to_raw(), 91);
        assert_eq!(PixelFormat::from_raw(28), PixelFormat::Other(28));
    }
}
