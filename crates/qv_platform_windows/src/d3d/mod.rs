//! Direct3D 11 设备与渲染资源
//!
//! - `device`: 设备、立即上下文与交换链
//! - `render_target`: 纹理 + 渲染目标视图 + 着色器资源视图的组合
//! - `buffers`: 顶点缓冲与常量缓冲
//! - `shaders`: 顶点/像素着色器字节码
//! - `renderer`: 全屏四边形渲染

pub mod buffers;
pub mod device;
pub mod render_target;
pub mod renderer;
pub mod shaders;

pub use buffers::GpuBuffer;
pub use device::GraphicsDevice;
pub use render_target::RenderTarget;
pub use renderer::QuadRenderer;
pub use shaders::ShaderBytecode;

use qv_core::{GraphicsError, GraphicsResult};

/// Attach the failing call to a `windows::core::Error`.
pub(crate) trait ApiResultExt<T> {
    fn api(self, what: &str) -> GraphicsResult<T>;
}

impl<T> ApiResultExt<T> for windows::core::Result<T> {
    #[inline]
    fn api(self, what: &str) -> GraphicsResult<T> {
        self.map_err(|e| GraphicsError::Api(format!("{what}: {e}")))
    }
}

/// COM out-parameters may come back empty even when the call succeeds.
#[inline]
pub(crate) fn created<T>(object: Option<T>, what: &str) -> GraphicsResult<T> {
    object.ok_or_else(|| GraphicsError::ResourceCreation(what.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use windows::Win32::Foundation::HMODULE;
    use windows::Win32::Graphics::Direct3D::*;
    use windows::Win32::Graphics::Direct3D11::*;

    /// Software (WARP) device without a window or swap chain.
    pub fn warp_device() -> (ID3D11Device, ID3D11DeviceContext) {
        let mut device = None;
        let mut context = None;
        unsafe {
            D3D11CreateDevice(
                None,
                D3D_DRIVER_TYPE_WARP,
                HMODULE::default(),
                D3D11_CREATE_DEVICE_SINGLETHREADED,
                Some(&[D3D_FEATURE_LEVEL_11_0, D3D_FEATURE_LEVEL_10_0]),
                D3D11_SDK_VERSION,
                Some(&mut device),
                None,
                Some(&mut context),
            )
            .unwrap();
        }
        (device.unwrap(), context.unwrap())
    }

    /// BGRA bytes of one texel, read back through a staging copy.
    pub fn read_pixel(
        device: &ID3D11Device,
        context: &ID3D11DeviceContext,
        texture: &ID3D11Texture2D,
        x: u32,
        y: u32,
    ) -> [u8; 4] {
        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { texture.GetDesc(&mut desc) };
        assert_eq!(desc.SampleDesc.Count, 1, "resolve before reading back");
        assert!(x < desc.Width && y < desc.Height);

        desc.Usage = D3D11_USAGE_STAGING;
        desc.BindFlags = 0;
        desc.CPUAccessFlags = D3D11_CPU_ACCESS_READ.0 as u32;
        desc.MiscFlags = 0;

        let mut staging = None;
        unsafe { device.CreateTexture2D(&desc, None, Some(&mut staging)) }.unwrap();
        let staging = staging.unwrap();

        let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
        unsafe {
            context.CopyResource(&staging, texture);
            context
                .Map(&staging, 0, D3D11_MAP_READ, 0, Some(&mut mapped))
                .unwrap();
            let offset = (y * mapped.RowPitch + x * 4) as usize;
            let texel = std::slice::from_raw_parts(mapped.pData.cast::<u8>().add(offset), 4);
            let bgra = [texel[0], texel[1], texel[2], texel[3]];
            context.Unmap(&staging, 0);
            bgra
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::Foundation::E_FAIL;

    #[test]
    fn test_api_error_names_call() {
        let result: windows::core::Result<()> = Err(windows::core::Error::new(E_FAIL, "boom"));
        let err = result.api("CreateSamplerState").unwrap_err();
        assert!(err.to_string().contains("CreateSamplerState"));
    }

    #[test]
    fn test_created_none_is_resource_error() {
        assert!(matches!(
            created::<u32>(None, "vertex buffer"),
            Err(GraphicsError::ResourceCreation(_))
        ));
        assert_eq!(created(Some(3), "x").unwrap(), 3);
    }
}
