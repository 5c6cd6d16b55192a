use qv_core::{
    CLEAR_COLOR, GraphicsResult, MultiSample, PixelFormat, QUAD_VERTEX_COUNT, VERTEX_STRIDE,
    Viewport, ViewportSet, quad_vertex_bytes,
};
use windows::Win32::Graphics::Direct3D::D3D11_PRIMITIVE_TOPOLOGY_TRIANGLELIST;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_R32G32B32_FLOAT;
use windows::core::s;

use super::{ApiResultExt, GpuBuffer, GraphicsDevice, RenderTarget, ShaderBytecode, created};

/// Draws the full-screen quad into the letterboxed area of the back buffer.
///
/// 字段声明顺序即释放顺序（与创建顺序相反），后台缓冲区最后释放。
pub struct QuadRenderer {
    pixel_shader: ID3D11PixelShader,
    vertex_shader: ID3D11VertexShader,
    input_layout: ID3D11InputLayout,
    vertex_buffer: GpuBuffer,
    _sampler_state: ID3D11SamplerState,
    _rasterizer_state: ID3D11RasterizerState,
    back_buffer: RenderTarget,
    viewports: ViewportSet,
}

impl QuadRenderer {
    /// `content_aspect` is what the scene is authored for, `display_aspect` what the
    /// monitor physically shows.
    pub fn create(
        device: &GraphicsDevice,
        shaders: &ShaderBytecode,
        content_aspect: f32,
        display_aspect: f32,
    ) -> GraphicsResult<Self> {
        let back_buffer = RenderTarget::from_back_buffer(
            device.device(),
            device.swap_chain(),
            device.display_mode().format,
        )?;

        Self::with_target(
            device.device(),
            device.context(),
            back_buffer,
            shaders,
            content_aspect,
            display_aspect,
        )
    }

    /// Same as `create`, rendering into any target instead of the swap chain.
    pub fn with_target(
        device: &ID3D11Device,
        context: &ID3D11DeviceContext,
        back_buffer: RenderTarget,
        shaders: &ShaderBytecode,
        content_aspect: f32,
        display_aspect: f32,
    ) -> GraphicsResult<Self> {
        let target_view = created(back_buffer.target_view().cloned(), "back buffer target view")?;
        unsafe {
            context.OMSetRenderTargets(Some(&[Some(target_view)]), None);
            context.IASetPrimitiveTopology(D3D11_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
        }

        let rasterizer_state = create_rasterizer_state(device)?;
        unsafe { context.RSSetState(&rasterizer_state) };

        let (width, height) = back_buffer.size();
        let viewports = ViewportSet::new(width, height, content_aspect, display_aspect);
        log::debug!(
            "Viewports: full {}x{}, adjusted {:?}",
            width,
            height,
            viewports.adjusted
        );
        unsafe { context.RSSetViewports(Some(&[to_d3d_viewport(&viewports.full)])) };

        // 默认（不透明）混合状态
        unsafe { context.OMSetBlendState(None, None, u32::MAX) };

        let sampler_state = create_sampler_state(device)?;
        unsafe { context.PSSetSamplers(0, Some(&[Some(sampler_state.clone())])) };

        let vertex_buffer = GpuBuffer::vertex(device, &quad_vertex_bytes())?;

        // Validated against the vertex shader's input signature.
        let elements = [D3D11_INPUT_ELEMENT_DESC {
            SemanticName: s!("POSITION"),
            SemanticIndex: 0,
            Format: DXGI_FORMAT_R32G32B32_FLOAT,
            InputSlot: 0,
            AlignedByteOffset: 0,
            InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
            InstanceDataStepRate: 0,
        }];
        let mut input_layout = None;
        unsafe { device.CreateInputLayout(&elements, &shaders.vertex, Some(&mut input_layout)) }
            .api("CreateInputLayout")?;

        let mut vertex_shader = None;
        unsafe { device.CreateVertexShader(&shaders.vertex, None, Some(&mut vertex_shader)) }
            .api("CreateVertexShader")?;

        let mut pixel_shader = None;
        unsafe { device.CreatePixelShader(&shaders.pixel, None, Some(&mut pixel_shader)) }
            .api("CreatePixelShader")?;

        Ok(Self {
            pixel_shader: created(pixel_shader, "pixel shader")?,
            vertex_shader: created(vertex_shader, "vertex shader")?,
            input_layout: created(input_layout, "input layout")?,
            vertex_buffer,
            _sampler_state: sampler_state,
            _rasterizer_state: rasterizer_state,
            back_buffer,
            viewports,
        })
    }

    #[inline]
    pub fn viewports(&self) -> &ViewportSet {
        &self.viewports
    }

    #[inline]
    pub fn back_buffer(&self) -> &RenderTarget {
        &self.back_buffer
    }

    pub fn render_frame(&self, context: &ID3D11DeviceContext) {
        debug_assert!(!self.back_buffer.is_released());
        let Some(target_view) = self.back_buffer.target_view() else {
            return;
        };

        let full = to_d3d_viewport(&self.viewports.full);
        let adjusted = to_d3d_viewport(&self.viewports.adjusted);

        unsafe {
            // Bars are whatever the clear leaves behind.
            context.RSSetViewports(Some(&[full]));
            context.ClearRenderTargetView(target_view, &CLEAR_COLOR);

            context.RSSetViewports(Some(&[adjusted]));

            let stride = VERTEX_STRIDE;
            let offset = 0u32;
            context.IASetVertexBuffers(
                0,
                1,
                Some(&Some(self.vertex_buffer.buffer().clone())),
                Some(&stride),
                Some(&offset),
            );
            context.IASetInputLayout(&self.input_layout);
            context.VSSetShader(&self.vertex_shader, None);
            context.PSSetShader(&self.pixel_shader, None);

            context.Draw(QUAD_VERTEX_COUNT, 0);

            context.RSSetViewports(Some(&[full]));
        }
    }

    /// Offscreen target the size of the scene viewport.
    pub fn create_scene_target(
        &self,
        device: &ID3D11Device,
        format: PixelFormat,
        multi_sample: MultiSample,
    ) -> GraphicsResult<RenderTarget> {
        let (width, height) = self.viewports.scene_size();
        RenderTarget::create(device, width, height, format, multi_sample, true)
    }
}

fn create_rasterizer_state(device: &ID3D11Device) -> GraphicsResult<ID3D11RasterizerState> {
    let desc = D3D11_RASTERIZER_DESC {
        FillMode: D3D11_FILL_SOLID,
        CullMode: D3D11_CULL_BACK,
        FrontCounterClockwise: false.into(),
        DepthBias: 0,
        DepthBiasClamp: 0.0,
        SlopeScaledDepthBias: 0.0,
        DepthClipEnable: true.into(),
        ScissorEnable: false.into(),
        MultisampleEnable: true.into(),
        AntialiasedLineEnable: false.into(),
    };

    let mut state = None;
    unsafe { device.CreateRasterizerState(&desc, Some(&mut state)) }
        .api("CreateRasterizerState")?;
    created(state, "rasterizer state")
}

/// Tri-linear, wrapping.
fn create_sampler_state(device: &ID3D11Device) -> GraphicsResult<ID3D11SamplerState> {
    let desc = D3D11_SAMPLER_DESC {
        Filter: D3D11_FILTER_MIN_MAG_MIP_LINEAR,
        AddressU: D3D11_TEXTURE_ADDRESS_WRAP,
        AddressV: D3D11_TEXTURE_ADDRESS_WRAP,
        AddressW: D3D11_TEXTURE_ADDRESS_WRAP,
        MipLODBias: 0.0,
        MaxAnisotropy: 4,
        ComparisonFunc: D3D11_COMPARISON_ALWAYS,
        BorderColor: [0.0; 4],
        MinLOD: 0.0,
        MaxLOD: f32::MAX,
    };

    let mut state = None;
    unsafe { device.CreateSamplerState(&desc, Some(&mut state)) }.api("CreateSamplerState")?;
    created(state, "sampler state")
}

pub fn to_d3d_viewport(viewport: &Viewport) -> D3D11_VIEWPORT {
    D3D11_VIEWPORT {
        TopLeftX: viewport.origin_x,
        TopLeftY: viewport.origin_y,
        Width: viewport.width,
        Height: viewport.height,
        MinDepth: viewport.min_depth,
        MaxDepth: viewport.max_depth,
    }
}
