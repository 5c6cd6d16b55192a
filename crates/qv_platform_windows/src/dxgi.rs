//! DXGI 适配器、输出与显示模式枚举
//!
//! `DxgiDisplays` 持有 DXGI 1.1 工厂，按索引访问适配器与输出，
//! 并实现 `qv_core::DisplayEnumerator`，供设置对话框和设备创建使用。
//!
//! # 注意事项
//! - 枚举到末尾时 DXGI 返回 `DXGI_ERROR_NOT_FOUND`，这里将其视为列表结束
//! - 没有连接显示器的副适配器是合法情况（输出列表为空）

use qv_core::{
    AdapterInfo, DisplayEnumerator, DisplayMode, GraphicsError, GraphicsResult, OutputInfo,
    PixelFormat, RefreshRate, ScalingMode, ScanlineOrder,
};
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;
use windows::Win32::Graphics::Gdi::{
    DISPLAY_DEVICEW, EnumDisplayDevicesW, GetMonitorInfoW, MONITORINFO, MONITORINFOEXW,
};
use windows::core::PCWSTR;

use crate::d3d::ApiResultExt;
use crate::win_api::from_wide_chars;

/// 枚举显示模式时使用的后台缓冲区格式
pub const BACK_BUFFER_FORMAT: PixelFormat = PixelFormat::Bgra8Unorm;

const UNIDENTIFIED_OUTPUT: &str = "Unidentified output device";

pub struct DxgiDisplays {
    factory: IDXGIFactory1,
}

impl DxgiDisplays {
    pub fn new() -> GraphicsResult<Self> {
        let factory: IDXGIFactory1 =
            unsafe { CreateDXGIFactory1() }.api("Can not create DXGI 1.1 factory")?;
        Ok(Self { factory })
    }

    pub fn factory(&self) -> &IDXGIFactory1 {
        &self.factory
    }

    pub fn adapter(&self, index: u32) -> GraphicsResult<IDXGIAdapter1> {
        match unsafe { self.factory.EnumAdapters1(index) } {
            Ok(adapter) => Ok(adapter),
            Err(e) if e.code() == DXGI_ERROR_NOT_FOUND => Err(GraphicsError::NoAdapterFound),
            Err(e) => Err(GraphicsError::Api(format!("EnumAdapters1({index}): {e}"))),
        }
    }

    pub fn output(&self, adapter: u32, output: u32) -> GraphicsResult<IDXGIOutput> {
        let dxgi_adapter = self.adapter(adapter)?;
        match unsafe { dxgi_adapter.EnumOutputs(output) } {
            Ok(dxgi_output) => Ok(dxgi_output),
            Err(e) if e.code() == DXGI_ERROR_NOT_FOUND => {
                Err(GraphicsError::NoOutputAttached { adapter })
            }
            Err(e) => Err(GraphicsError::Api(format!("EnumOutputs({output}): {e}"))),
        }
    }
}

impl DisplayEnumerator for DxgiDisplays {
    fn adapters(&self) -> GraphicsResult<Vec<AdapterInfo>> {
        let mut adapters = Vec::new();
        for index in 0.. {
            let adapter = match self.adapter(index) {
                Ok(adapter) => adapter,
                Err(GraphicsError::NoAdapterFound) => break,
                Err(e) => return Err(e),
            };

            let desc = unsafe { adapter.GetDesc1() }.api("IDXGIAdapter1::GetDesc1")?;
            adapters.push(AdapterInfo {
                index,
                description: from_wide_chars(&desc.Description),
                dedicated_video_memory: desc.DedicatedVideoMemory,
            });
        }
        Ok(adapters)
    }

    fn outputs(&self, adapter: u32) -> GraphicsResult<Vec<OutputInfo>> {
        let dxgi_adapter = self.adapter(adapter)?;

        let mut outputs = Vec::new();
        for index in 0.. {
            let output = match unsafe { dxgi_adapter.EnumOutputs(index) } {
                Ok(output) => output,
                Err(e) if e.code() == DXGI_ERROR_NOT_FOUND => break,
                Err(e) => return Err(GraphicsError::Api(format!("EnumOutputs({index}): {e}"))),
            };

            let desc = unsafe { output.GetDesc() }.api("IDXGIOutput::GetDesc")?;
            let rect = desc.DesktopCoordinates;
            outputs.push(OutputInfo {
                index,
                name: monitor_name(&desc),
                desktop_width: (rect.right - rect.left).max(0) as u32,
                desktop_height: (rect.bottom - rect.top).max(0) as u32,
            });
        }
        Ok(outputs)
    }

    fn display_modes(&self, adapter: u32, output: u32) -> GraphicsResult<Vec<DisplayMode>> {
        let dxgi_output = self.output(adapter, output)?;
        let format = dxgi_format(BACK_BUFFER_FORMAT);

        let mut count = 0u32;
        unsafe {
            dxgi_output.GetDisplayModeList(format, DXGI_ENUM_MODES::default(), &mut count, None)
        }
        .api("GetDisplayModeList")?;

        let mut descs = vec![DXGI_MODE_DESC::default(); count as usize];
        if count > 0 {
            unsafe {
                dxgi_output.GetDisplayModeList(
                    format,
                    DXGI_ENUM_MODES::default(),
                    &mut count,
                    Some(descs.as_mut_ptr()),
                )
            }
            .api("GetDisplayModeList")?;
            descs.truncate(count as usize);
        }

        Ok(descs.iter().map(from_dxgi_mode).collect())
    }

    fn closest_mode(
        &self,
        adapter: u32,
        output: u32,
        wanted: &DisplayMode,
    ) -> GraphicsResult<DisplayMode> {
        let dxgi_output = self.output(adapter, output)?;
        let to_match = to_dxgi_mode(wanted);
        let mut closest = DXGI_MODE_DESC::default();

        unsafe { dxgi_output.FindClosestMatchingMode(&to_match, &mut closest, None) }
            .api("Can not retrieve the output's display mode")?;

        Ok(from_dxgi_mode(&closest))
    }
}

/// Driver-provided monitor name ("Generic PnP Monitor" and the like).
fn monitor_name(desc: &DXGI_OUTPUT_DESC) -> String {
    let mut monitor = MONITORINFOEXW::default();
    monitor.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

    let mut device = DISPLAY_DEVICEW {
        cb: std::mem::size_of::<DISPLAY_DEVICEW>() as u32,
        ..Default::default()
    };

    let found = unsafe {
        GetMonitorInfoW(
            desc.Monitor,
            &mut monitor as *mut MONITORINFOEXW as *mut MONITORINFO,
        )
        .as_bool()
            && EnumDisplayDevicesW(PCWSTR(monitor.szDevice.as_ptr()), 0, &mut device, 0).as_bool()
    };

    if found {
        from_wide_chars(&device.DeviceString)
    } else {
        let device_name = from_wide_chars(&desc.DeviceName);
        if device_name.is_empty() {
            UNIDENTIFIED_OUTPUT.to_string()
        } else {
            device_name
        }
    }
}

pub fn dxgi_format(format: PixelFormat) -> DXGI_FORMAT {
    DXGI_FORMAT(format.to_raw() as i32)
}

pub fn to_dxgi_mode(mode: &DisplayMode) -> DXGI_MODE_DESC {
    DXGI_MODE_DESC {
        Width: mode.width,
        Height: mode.height,
        RefreshRate: DXGI_RATIONAL {
            Numerator: mode.refresh_rate.numerator,
            Denominator: mode.refresh_rate.denominator,
        },
        Format: dxgi_format(mode.format),
        ScanlineOrdering: match mode.scanline_order {
            ScanlineOrder::Unspecified => DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
            ScanlineOrder::Progressive => DXGI_MODE_SCANLINE_ORDER_PROGRESSIVE,
            ScanlineOrder::UpperFieldFirst => DXGI_MODE_SCANLINE_ORDER_UPPER_FIELD_FIRST,
            ScanlineOrder::LowerFieldFirst => DXGI_MODE_SCANLINE_ORDER_LOWER_FIELD_FIRST,
        },
        Scaling: match mode.scaling {
            ScalingMode::Unspecified => DXGI_MODE_SCALING_UNSPECIFIED,
            ScalingMode::Centered => DXGI_MODE_SCALING_CENTERED,
            ScalingMode::Stretched => DXGI_MODE_SCALING_STRETCHED,
        },
    }
}

pub fn from_dxgi_mode(desc: &DXGI_MODE_DESC) -> DisplayMode {
    DisplayMode {
        width: desc.Width,
        height: desc.Height,
        refresh_rate: RefreshRate::new(desc.RefreshRate.Numerator, desc.RefreshRate.Denominator),
        format: PixelFormat::from_raw(desc.Format.0 as u32),
        scanline_order: match desc.ScanlineOrdering {
            DXGI_MODE_SCANLINE_ORDER_PROGRESSIVE => ScanlineOrder::Progressive,
            DXGI_MODE_SCANLINE_ORDER_UPPER_FIELD_FIRST => ScanlineOrder::UpperFieldFirst,
            DXGI_MODE_SCANLINE_ORDER_LOWER_FIELD_FIRST => ScanlineOrder::LowerFieldFirst,
            _ => ScanlineOrder::Unspecified,
        },
        scaling: match desc.Scaling {
            DXGI_MODE_SCALING_CENTERED => ScalingMode::Centered,
            DXGI_MODE_SCALING_STRETCHED => ScalingMode::Stretched,
            _ => ScalingMode::Unspecified,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_constants_match_dxgi() {
        assert_eq!(dxgi_format(PixelFormat::Bgra8Unorm), DXGI_FORMAT_B8G8R8A8_UNORM);
        assert_eq!(
            dxgi_format(PixelFormat::Bgra8UnormSrgb),
            DXGI_FORMAT_B8G8R8A8_UNORM_SRGB
        );
    }

    #[test]
    fn test_mode_conversion_preserves_fields() {
        let mode = DisplayMode {
            refresh_rate: RefreshRate::new(59_940, 1_000),
            scanline_order: ScanlineOrder::Progressive,
            scaling: ScalingMode::Stretched,
            ..DisplayMode::windowed(2560, 1440).with_format(PixelFormat::Bgra8UnormSrgb)
        };
        assert_eq!(from_dxgi_mode(&to_dxgi_mode(&mode)), mode);
    }

    #[test]
    fn test_enumerates_primary_adapter() {
        // Every Windows machine exposes at least the Basic Render Driver.
        let displays = DxgiDisplays::new().unwrap();
        let adapters = displays.adapters().unwrap();
        assert!(!adapters.is_empty());
        assert_eq!(adapters[0].index, 0);
    }
}
