use qv_core::{GraphicsError, GraphicsResult, MultiSample, PixelFormat};
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::IDXGISwapChain;

use super::{ApiResultExt, created};
use crate::dxgi::dxgi_format;

/// 渲染目标：纹理 + 渲染目标视图 + 可选的着色器资源视图
///
/// 三者一起创建、一起释放；`release` 可以重复调用。
pub struct RenderTarget {
    format: DXGI_FORMAT,
    texture: Option<ID3D11Texture2D>,
    target_view: Option<ID3D11RenderTargetView>,
    shader_view: Option<ID3D11ShaderResourceView>,
}

impl RenderTarget {
    /// Target view on the swap chain's first buffer.
    pub fn from_back_buffer(
        device: &ID3D11Device,
        swap_chain: &IDXGISwapChain,
        format: PixelFormat,
    ) -> GraphicsResult<Self> {
        let texture: ID3D11Texture2D =
            unsafe { swap_chain.GetBuffer(0) }.api("IDXGISwapChain::GetBuffer")?;

        let mut target_view = None;
        unsafe { device.CreateRenderTargetView(&texture, None, Some(&mut target_view)) }
            .api("CreateRenderTargetView (back buffer)")?;

        Ok(Self {
            format: dxgi_format(format),
            texture: Some(texture),
            target_view: Some(created(target_view, "back buffer target view")?),
            shader_view: None,
        })
    }

    /// Offscreen target, e.g. sized to the scene viewport.
    pub fn create(
        device: &ID3D11Device,
        width: u32,
        height: u32,
        format: PixelFormat,
        multi_sample: MultiSample,
        with_shader_view: bool,
    ) -> GraphicsResult<Self> {
        debug_assert!(width > 0 && height > 0);

        let mut bind_flags = D3D11_BIND_RENDER_TARGET.0 as u32;
        if with_shader_view {
            bind_flags |= D3D11_BIND_SHADER_RESOURCE.0 as u32;
        }

        let format = dxgi_format(format);
        let desc = D3D11_TEXTURE2D_DESC {
            Width: width,
            Height: height,
            MipLevels: 1,
            ArraySize: 1,
            Format: format,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: multi_sample.count,
                Quality: multi_sample.quality,
            },
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: bind_flags,
            CPUAccessFlags: 0,
            MiscFlags: 0,
        };

        let mut texture = None;
        unsafe { device.CreateTexture2D(&desc, None, Some(&mut texture)) }
            .api("CreateTexture2D (render target)")?;
        let texture = created(texture, "render target texture")?;

        let mut target_view = None;
        unsafe { device.CreateRenderTargetView(&texture, None, Some(&mut target_view)) }
            .api("CreateRenderTargetView")?;
        let target_view = created(target_view, "render target view")?;

        let shader_view = if with_shader_view {
            let mut view = None;
            unsafe { device.CreateShaderResourceView(&texture, None, Some(&mut view)) }
                .api("CreateShaderResourceView")?;
            Some(created(view, "render target shader view")?)
        } else {
            None
        };

        Ok(Self {
            format,
            texture: Some(texture),
            target_view: Some(target_view),
            shader_view,
        })
    }

    #[inline]
    pub fn texture(&self) -> Option<&ID3D11Texture2D> {
        self.texture.as_ref()
    }

    #[inline]
    pub fn target_view(&self) -> Option<&ID3D11RenderTargetView> {
        self.target_view.as_ref()
    }

    #[inline]
    pub fn shader_view(&self) -> Option<&ID3D11ShaderResourceView> {
        self.shader_view.as_ref()
    }

    /// Size of the underlying texture, `(0, 0)` once released.
    pub fn size(&self) -> (u32, u32) {
        let Some(texture) = &self.texture else {
            return (0, 0);
        };
        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { texture.GetDesc(&mut desc) };
        (desc.Width, desc.Height)
    }

    /// Multi-sample resolve into `dest` (same format, single sample).
    pub fn resolve_into(
        &self,
        context: &ID3D11DeviceContext,
        dest: &RenderTarget,
    ) -> GraphicsResult<()> {
        let (Some(source), Some(target)) = (&self.texture, &dest.texture) else {
            return Err(GraphicsError::ResourceCreation(
                "resolve involving a released render target".to_string(),
            ));
        };
        unsafe { context.ResolveSubresource(target, 0, source, 0, self.format) };
        Ok(())
    }

    pub fn release(&mut self) {
        self.shader_view = None;
        self.target_view = None;
        self.texture = None;
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.texture.is_none() && self.target_view.is_none() && self.shader_view.is_none()
    }
}
