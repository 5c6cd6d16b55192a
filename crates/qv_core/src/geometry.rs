/// 全屏四边形（两个三角形，z = 0）
pub const QUAD_VERTICES: [[f32; 3]; 6] = [
    [-1.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
];

pub const QUAD_VERTEX_COUNT: u32 = QUAD_VERTICES.len() as u32;

/// 一个 float3 顶点的字节跨度
pub const VERTEX_STRIDE: u32 = std::mem::size_of::<[f32; 3]>() as u32;

/// 后台缓冲区清除色 (R, G, B, A)
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.4, 0.0];

/// Constant buffers must be a multiple of 16 bytes.
pub const fn constant_buffer_size_valid(size: usize) -> bool {
    size != 0 && size % 16 == 0
}

/// The quad vertices as raw bytes for buffer upload.
pub fn quad_vertex_bytes() -> Vec<u8> {
    QUAD_VERTICES
        .iter()
        .flat_map(|v| v.iter().flat_map(|c| c.to_ne_bytes()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_clip_space() {
        let xs = QUAD_VERTICES.iter().map(|v| v[0]);
        let ys = QUAD_VERTICES.iter().map(|v| v[1]);
        assert_eq!(xs.clone().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(xs.fold(f32::MIN, f32::max), 1.0);
        assert_eq!(ys.clone().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(ys.fold(f32::MIN, f32::max), 1.0);
        assert!(QUAD_VERTICES.iter().all(|v| v[2] == 0.0));
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(QUAD_VERTEX_COUNT, 6);
        assert_eq!(VERTEX_STRIDE, 12);
        assert_eq!(quad_vertex_bytes().len(), 72);
    }

    #[test]
    fn test_constant_buffer_sizes() {
        assert!(constant_buffer_size_valid(16));
        assert!(constant_buffer_size_valid(64));
        assert!(!constant_buffer_size_valid(0));
        assert!(!constant_buffer_size_valid(12));
    }
}
