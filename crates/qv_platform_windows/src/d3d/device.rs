use qv_core::{DeviceDiagnostics, DisplayMode, GraphicsError, GraphicsResult, MultiSample};
use windows::Win32::Foundation::{HMODULE, HWND};
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::DXGI_SAMPLE_DESC;
use windows::Win32::Graphics::Dxgi::*;

use super::ApiResultExt;
use crate::dxgi::{DxgiDisplays, to_dxgi_mode};

/// Accepted in this order; the runtime picks the highest one the adapter supports.
const FEATURE_LEVELS: [D3D_FEATURE_LEVEL; 3] = [
    D3D_FEATURE_LEVEL_11_0,
    D3D_FEATURE_LEVEL_10_1,
    D3D_FEATURE_LEVEL_10_0,
];

const SWAP_CHAIN_BUFFER_COUNT: u32 = 2;

/// Everything `GraphicsDevice::create` needs besides the adapter and window.
#[derive(Debug, Clone, Copy)]
pub struct DeviceDesc {
    pub adapter: u32,
    pub display_mode: DisplayMode,
    pub multi_sample: MultiSample,
    pub windowed: bool,
    /// D3D11 debug layer (needs the SDK layers installed).
    pub debug: bool,
}

impl DeviceDesc {
    fn diagnostics(&self) -> DeviceDiagnostics {
        DeviceDiagnostics {
            windowed: self.windowed,
            width: self.display_mode.width,
            height: self.display_mode.height,
            multi_sample: self.multi_sample,
        }
    }
}

/// Single-threaded D3D11 device, its immediate context and the window's swap chain.
///
/// 字段按创建的相反顺序声明，drop 时依次释放 context、device、swap chain。
pub struct GraphicsDevice {
    context: ID3D11DeviceContext,
    device: ID3D11Device,
    swap_chain: IDXGISwapChain,
    feature_level: D3D_FEATURE_LEVEL,
    desc: DeviceDesc,
}

impl GraphicsDevice {
    pub fn create(displays: &DxgiDisplays, hwnd: HWND, desc: DeviceDesc) -> GraphicsResult<Self> {
        let adapter = displays.adapter(desc.adapter)?;

        let swap_chain_desc = DXGI_SWAP_CHAIN_DESC {
            BufferDesc: to_dxgi_mode(&desc.display_mode),
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: desc.multi_sample.count,
                Quality: desc.multi_sample.quality,
            },
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: SWAP_CHAIN_BUFFER_COUNT,
            OutputWindow: hwnd,
            Windowed: desc.windowed.into(),
            SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
            Flags: 0,
        };

        let mut flags = D3D11_CREATE_DEVICE_SINGLETHREADED;
        if desc.debug {
            flags |= D3D11_CREATE_DEVICE_DEBUG;
        }

        log::info!(
            "Creating device: {} {}, {} sample(s), debug layer {}",
            if desc.windowed { "windowed" } else { "full screen" },
            desc.display_mode.describe(),
            desc.multi_sample.count,
            if desc.debug { "on" } else { "off" },
        );

        let mut swap_chain = None;
        let mut device = None;
        let mut context = None;
        let mut feature_level = D3D_FEATURE_LEVEL::default();

        // The adapter is explicit, so the driver type has to be UNKNOWN.
        let result = unsafe {
            D3D11CreateDeviceAndSwapChain(
                &adapter,
                D3D_DRIVER_TYPE_UNKNOWN,
                HMODULE::default(),
                flags,
                Some(&FEATURE_LEVELS),
                D3D11_SDK_VERSION,
                Some(&swap_chain_desc),
                Some(&mut swap_chain),
                Some(&mut device),
                Some(&mut feature_level),
                Some(&mut context),
            )
        };

        if let Err(e) = result {
            log::error!("D3D11CreateDeviceAndSwapChain failed: {e}");
            return Err(GraphicsError::DeviceCreationFailed(desc.diagnostics()));
        }
        let (Some(swap_chain), Some(device), Some(context)) = (swap_chain, device, context) else {
            return Err(GraphicsError::DeviceCreationFailed(desc.diagnostics()));
        };

        log::info!("Device created, feature level {}", feature_level_name(feature_level));

        // We handle ALT+ENTER and friends ourselves (or not at all).
        unsafe {
            displays
                .factory()
                .MakeWindowAssociation(hwnd, DXGI_MWA_NO_WINDOW_CHANGES)
        }
        .api("MakeWindowAssociation")?;

        Ok(Self {
            context,
            device,
            swap_chain,
            feature_level,
            desc,
        })
    }

    #[inline]
    pub fn device(&self) -> &ID3D11Device {
        &self.device
    }

    #[inline]
    pub fn context(&self) -> &ID3D11DeviceContext {
        &self.context
    }

    #[inline]
    pub fn swap_chain(&self) -> &IDXGISwapChain {
        &self.swap_chain
    }

    #[inline]
    pub fn feature_level(&self) -> D3D_FEATURE_LEVEL {
        self.feature_level
    }

    #[inline]
    pub fn display_mode(&self) -> &DisplayMode {
        &self.desc.display_mode
    }

    #[inline]
    pub fn multi_sample(&self) -> MultiSample {
        self.desc.multi_sample
    }

    #[inline]
    pub fn is_windowed(&self) -> bool {
        self.desc.windowed
    }

    /// Flip the back buffer. 0 presents immediately, 1 waits for the vertical blank.
    ///
    /// Only call after a frame was rendered (and, in full screen, while the window has focus).
    pub fn present(&self, sync_interval: u32) {
        let hr = unsafe { self.swap_chain.Present(sync_interval, DXGI_PRESENT(0)) };
        if let Err(e) = hr.ok() {
            log::warn!("Present({sync_interval}) failed: {e}");
        }
    }
}

impl Drop for GraphicsDevice {
    fn drop(&mut self) {
        // A full-screen swap chain must not be released while full screen.
        if !self.desc.windowed {
            if let Err(e) = unsafe { self.swap_chain.SetFullscreenState(false, None) } {
                log::warn!("Leaving full screen failed: {e}");
            }
        }
        log::debug!("Releasing Direct3D device");
    }
}

pub fn feature_level_name(level: D3D_FEATURE_LEVEL) -> &'static str {
    match level {
        D3D_FEATURE_LEVEL_11_0 => "11.0",
        D3D_FEATURE_LEVEL_10_1 => "10.1",
        D3D_FEATURE_LEVEL_10_0 => "10.0",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_level_names() {
        assert_eq!(feature_level_name(D3D_FEATURE_LEVEL_11_0), "11.0");
        assert_eq!(feature_level_name(D3D_FEATURE_LEVEL_10_0), "10.0");
        assert_eq!(feature_level_name(D3D_FEATURE_LEVEL_9_3), "unknown");
    }

    #[test]
    fn test_diagnostics_from_desc() {
        let desc = DeviceDesc {
            adapter: 0,
            display_mode: DisplayMode::windowed(1920, 1080),
            multi_sample: MultiSample::from_count(4).unwrap(),
            windowed: false,
            debug: false,
        };
        let message = GraphicsError::DeviceCreationFailed(desc.diagnostics()).to_string();
        assert!(message.contains("Type: full screen."));
        assert!(message.contains("Resolution: 1920*1080."));
        assert!(message.contains("(4 taps)"));
    }
}
