use crate::error::{GraphicsError, GraphicsResult};

/// D3D11_STANDARD_MULTISAMPLE_PATTERN
pub const STANDARD_MULTISAMPLE_PATTERN: u32 = 0xffff_ffff;

/// 支持的采样数（对应设置对话框中的 Off/2x/4x/8x）
pub const SUPPORTED_SAMPLE_COUNTS: [u32; 4] = [1, 2, 4, 8];

/// 多重采样描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiSample {
    pub count: u32,
    pub quality: u32,
}

impl MultiSample {
    /// 关闭多重采样（1 个采样，质量 0）
    pub const fn off() -> Self {
        Self {
            count: 1,
            quality: 0,
        }
    }

    /// 根据采样数构造；大于 1 时使用标准采样模式
    pub fn from_count(count: u32) -> GraphicsResult<Self> {
        match count {
            1 => Ok(Self::off()),
            2 | 4 | 8 => Ok(Self {
                count,
                quality: STANDARD_MULTISAMPLE_PATTERN,
            }),
            other => Err(GraphicsError::UnsupportedSampleCount(other)),
        }
    }

    #[inline]
    pub const fn is_enabled(&self) -> bool {
        self.quality != 0
    }
}

impl Default for MultiSample {
    fn default() -> Self {
        Self::off()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off() {
        let ms = MultiSample::from_count(1).unwrap();
        assert_eq!(ms, MultiSample::off());
        assert!(!ms.is_enabled());
    }

    #[test]
    fn test_supported_counts_use_standard_pattern() {
        for count in [2, 4, 8] {
            let ms = MultiSample::from_count(count).unwrap();
            assert_eq!(ms.count, count);
            assert_eq!(ms.quality, STANDARD_MULTISAMPLE_PATTERN);
            assert!(ms.is_enabled());
        }
    }

    #[test]
    fn test_unsupported_counts() {
        for count in [0, 3, 16] {
            assert!(matches!(
                MultiSample::from_count(count),
                Err(GraphicsError::UnsupportedSampleCount(c)) if c == count
            ));
        }
    }
}
