// Setup dialog model
//
// List contents and selection handling behind the setup dialog, kept free of window code

use crate::aspect::{AspectRatio, AspectSelection, aspect_ratios_for_modes};
use crate::display::{DisplayEnumerator, DisplayMode, index_of_mode};
use crate::error::{GraphicsError, GraphicsResult};
use crate::launch::LaunchConfig;
use crate::multisample::{MultiSample, SUPPORTED_SAMPLE_COUNTS};

pub const AUTOMATIC_ASPECT_LABEL: &str = "Automatic (recommended)";
pub const NO_OUTPUT_LABEL: &str = "No display attached to adapter (attach and/or re-select).";
pub const MULTI_SAMPLE_LABELS: [&str; 4] = ["Off", "2x", "4x", "8x"];

/// 多重采样下拉框索引 -> 采样设置
pub fn multi_sample_for_index(index: usize) -> MultiSample {
    debug_assert!(index < SUPPORTED_SAMPLE_COUNTS.len());
    SUPPORTED_SAMPLE_COUNTS
        .get(index)
        .and_then(|&count| MultiSample::from_count(count).ok())
        .unwrap_or_default()
}

/// 采样数 -> 多重采样下拉框索引
pub fn index_for_multi_sample(multi_sample: &MultiSample) -> usize {
    SUPPORTED_SAMPLE_COUNTS
        .iter()
        .position(|&c| c == multi_sample.count)
        .unwrap_or(0)
}

/// 宽高比下拉框索引 -> 选择（索引 0 为自动）
pub fn aspect_for_index(index: usize, ratios: &[AspectRatio]) -> AspectSelection {
    match index.checked_sub(1).and_then(|i| ratios.get(i)) {
        Some(ratio) => AspectSelection::Forced(ratio.ratio()),
        None => AspectSelection::Automatic,
    }
}

/// Modes and derived aspect ratios of one output.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputModes {
    pub modes: Vec<DisplayMode>,
    pub aspect_ratios: Vec<AspectRatio>,
    /// Mode matching the output's desktop resolution, or the first mode.
    pub current: usize,
}

impl OutputModes {
    pub fn query<E: DisplayEnumerator + ?Sized>(
        enumerator: &E,
        adapter: u32,
        output: u32,
    ) -> GraphicsResult<Self> {
        let modes = enumerator.display_modes(adapter, output)?;
        let aspect_ratios = aspect_ratios_for_modes(&modes);

        // 找不到桌面模式时保持第一项
        let current = enumerator
            .desktop_mode(adapter, output)
            .ok()
            .and_then(|desktop| index_of_mode(&modes, &desktop))
            .unwrap_or(0);

        Ok(Self {
            modes,
            aspect_ratios,
            current,
        })
    }

    pub fn mode_labels(&self) -> Vec<String> {
        self.modes.iter().map(DisplayMode::describe).collect()
    }

    /// Automatic first, then the sorted ratios.
    pub fn aspect_labels(&self) -> Vec<String> {
        std::iter::once(AUTOMATIC_ASPECT_LABEL.to_string())
            .chain(self.aspect_ratios.iter().map(|r| r.to_string()))
            .collect()
    }
}

/// Raw control state when OK is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupSelection {
    pub adapter: u32,
    pub output: u32,
    pub mode_index: usize,
    pub aspect_index: usize,
    pub multi_sample_index: usize,
    pub windowed: bool,
    pub vsync: bool,
}

impl SetupSelection {
    /// Windowed mode always runs on the primary adapter and output with automatic
    /// aspect; full screen uses the chosen mode in the gamma-corrected format.
    pub fn into_launch_config(self, output_modes: Option<&OutputModes>) -> GraphicsResult<LaunchConfig> {
        let multi_sample = multi_sample_for_index(self.multi_sample_index);

        if self.windowed {
            return Ok(LaunchConfig {
                multi_sample,
                ..LaunchConfig::primary(true, self.vsync)
            });
        }

        let output_modes = output_modes.ok_or(GraphicsError::NoOutputAttached {
            adapter: self.adapter,
        })?;
        let mode = output_modes
            .modes
            .get(self.mode_index)
            .copied()
            .ok_or_else(|| {
                GraphicsError::Api(format!("display mode #{} not listed", self.mode_index))
            })?;

        Ok(LaunchConfig {
            adapter: self.adapter,
            output: self.output,
            display_mode: Some(mode.with_format(mode.format.gamma())),
            preferred_mode: None,
            aspect: aspect_for_index(self.aspect_index, &output_modes.aspect_ratios),
            multi_sample,
            windowed: false,
            vsync: self.vsync,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{AdapterInfo, OutputInfo, PixelFormat, RefreshRate};

    struct TwoModes;

    impl DisplayEnumerator for TwoModes {
        fn adapters(&self) -> GraphicsResult<Vec<AdapterInfo>> {
            Ok(Vec::new())
        }

        fn outputs(&self, _adapter: u32) -> GraphicsResult<Vec<OutputInfo>> {
            Ok(vec![OutputInfo {
                index: 0,
                name: "Monitor".to_string(),
                desktop_width: 1600,
                desktop_height: 1024,
            }])
        }

        fn display_modes(&self, _adapter: u32, _output: u32) -> GraphicsResult<Vec<DisplayMode>> {
            Ok(vec![
                DisplayMode {
                    refresh_rate: RefreshRate::new(60, 1),
                    ..DisplayMode::windowed(1280, 720)
                },
                DisplayMode {
                    refresh_rate: RefreshRate::new(60, 1),
                    ..DisplayMode::windowed(1600, 1024)
                },
            ])
        }

        fn closest_mode(
            &self,
            _adapter: u32,
            _output: u32,
            wanted: &DisplayMode,
        ) -> GraphicsResult<DisplayMode> {
            Ok(DisplayMode {
                refresh_rate: RefreshRate::new(60, 1),
                ..*wanted
            })
        }
    }

    fn full_screen(mode_index: usize, aspect_index: usize) -> SetupSelection {
        SetupSelection {
            adapter: 0,
            output: 0,
            mode_index,
            aspect_index,
            multi_sample_index: 2,
            windowed: false,
            vsync: true,
        }
    }

    #[test]
    fn test_output_modes_lists() {
        let modes = OutputModes::query(&TwoModes, 0, 0).unwrap();

        assert_eq!(modes.current, 1);
        assert_eq!(modes.mode_labels(), vec!["1280x720 @ 60Hz", "1600x1024 @ 60Hz"]);
        assert_eq!(
            modes.aspect_labels(),
            vec![
                AUTOMATIC_ASPECT_LABEL.to_string(),
                "16:9".to_string(),
                "25:16 (1600x1024, ratio: 1.56)".to_string(),
            ]
        );
    }

    #[test]
    fn test_multi_sample_indices() {
        assert_eq!(multi_sample_for_index(0), MultiSample::off());
        assert_eq!(multi_sample_for_index(3).count, 8);
        assert_eq!(index_for_multi_sample(&multi_sample_for_index(1)), 1);
    }

    #[test]
    fn test_windowed_selection_uses_primary() {
        let selection = SetupSelection {
            adapter: 1,
            output: 2,
            windowed: true,
            ..full_screen(0, 1)
        };

        let config = selection.into_launch_config(None).unwrap();
        assert_eq!((config.adapter, config.output), (0, 0));
        assert!(config.display_mode.is_none());
        assert_eq!(config.aspect, AspectSelection::Automatic);
        assert_eq!(config.multi_sample.count, 4);
    }

    #[test]
    fn test_full_screen_selection_forces_gamma_format() {
        let modes = OutputModes::query(&TwoModes, 0, 0).unwrap();
        let config = full_screen(0, 1).into_launch_config(Some(&modes)).unwrap();

        let mode = config.display_mode.unwrap();
        assert_eq!((mode.width, mode.height), (1280, 720));
        assert_eq!(mode.format, PixelFormat::Bgra8UnormSrgb);
        assert_eq!(config.aspect, AspectSelection::Forced(16.0 / 9.0));
        assert!(!config.windowed);
    }

    #[test]
    fn test_full_screen_without_output_fails() {
        assert!(matches!(
            full_screen(0, 0).into_launch_config(None),
            Err(GraphicsError::NoOutputAttached { adapter: 0 })
        ));
    }
}
