use qv_core::{GraphicsError, GraphicsResult, constant_buffer_size_valid};
use windows::Win32::Graphics::Direct3D11::*;

use super::{ApiResultExt, created};

/// GPU buffer that remembers its byte size.
///
/// Uploads always replace the whole buffer.
pub struct GpuBuffer {
    buffer: ID3D11Buffer,
    size: usize,
}

impl GpuBuffer {
    /// Vertex buffer initialised from `bytes` (default usage, no CPU access).
    pub fn vertex(device: &ID3D11Device, bytes: &[u8]) -> GraphicsResult<Self> {
        let desc = D3D11_BUFFER_DESC {
            ByteWidth: bytes.len() as u32,
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: D3D11_BIND_VERTEX_BUFFER.0 as u32,
            CPUAccessFlags: 0,
            MiscFlags: 0,
            StructureByteStride: 0,
        };
        let data = D3D11_SUBRESOURCE_DATA {
            pSysMem: bytes.as_ptr().cast(),
            SysMemPitch: 0,
            SysMemSlicePitch: 0,
        };

        let mut buffer = None;
        unsafe { device.CreateBuffer(&desc, Some(&data), Some(&mut buffer)) }
            .api("CreateBuffer (vertex)")?;

        Ok(Self {
            buffer: created(buffer, "vertex buffer")?,
            size: bytes.len(),
        })
    }

    /// CPU-writable constant buffer. `size` must be a multiple of 16 bytes.
    pub fn constant_dynamic(device: &ID3D11Device, size: usize) -> GraphicsResult<Self> {
        debug_assert!(constant_buffer_size_valid(size));

        let desc = D3D11_BUFFER_DESC {
            ByteWidth: size as u32,
            Usage: D3D11_USAGE_DYNAMIC,
            BindFlags: D3D11_BIND_CONSTANT_BUFFER.0 as u32,
            CPUAccessFlags: D3D11_CPU_ACCESS_WRITE.0 as u32,
            MiscFlags: 0,
            StructureByteStride: 0,
        };

        let mut buffer = None;
        unsafe { device.CreateBuffer(&desc, None, Some(&mut buffer)) }
            .api("CreateBuffer (constant)")?;

        Ok(Self {
            buffer: created(buffer, "constant buffer")?,
            size,
        })
    }

    /// Replace the buffer contents. Only valid for dynamic buffers.
    pub fn upload(&self, context: &ID3D11DeviceContext, bytes: &[u8]) -> GraphicsResult<()> {
        if bytes.len() != self.size {
            return Err(GraphicsError::ResourceCreation(format!(
                "buffer upload of {} bytes into a {}-byte buffer",
                bytes.len(),
                self.size
            )));
        }

        let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
        unsafe {
            context
                .Map(&self.buffer, 0, D3D11_MAP_WRITE_DISCARD, 0, Some(&mut mapped))
                .api("ID3D11DeviceContext::Map")?;
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), mapped.pData.cast::<u8>(), self.size);
            context.Unmap(&self.buffer, 0);
        }
        Ok(())
    }

    #[inline]
    pub fn buffer(&self) -> &ID3D11Buffer {
        &self.buffer
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::d3d::test_support::warp_device;
    use qv_core::{QUAD_VERTEX_COUNT, VERTEX_STRIDE, quad_vertex_bytes};

    #[test]
    fn test_quad_vertex_buffer_size() {
        let (device, _context) = warp_device();
        let buffer = GpuBuffer::vertex(&device, &quad_vertex_bytes()).unwrap();
        assert_eq!(buffer.size(), (QUAD_VERTEX_COUNT * VERTEX_STRIDE) as usize);
    }

    #[test]
    fn test_constant_buffer_upload() {
        let (device, context) = warp_device();
        let buffer = GpuBuffer::constant_dynamic(&device, 32).unwrap();

        let payload = [7u8; 32];
        buffer.upload(&context, &payload).unwrap();
        buffer.upload(&context, &payload).unwrap();
        assert_eq!(buffer.size(), 32);
    }

    #[test]
    fn test_upload_size_mismatch_is_an_error() {
        let (device, context) = warp_device();
        let buffer = GpuBuffer::constant_dynamic(&device, 32).unwrap();

        assert!(matches!(
            buffer.upload(&context, &[0u8; 16]),
            Err(GraphicsError::ResourceCreation(_))
        ));
        assert!(buffer.upload(&context, &[0u8; 48]).is_err());
        assert!(buffer.upload(&context, &[0u8; 32]).is_ok());
    }
}
