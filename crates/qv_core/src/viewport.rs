/// 视口定义（与 D3D11_VIEWPORT 一一对应）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// 创建深度范围为 0..1 的视口
    pub const fn new(origin_x: f32, origin_y: f32, width: f32, height: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// 覆盖整个表面的视口
    pub const fn full(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// 同尺寸、原点为零的视口
    pub const fn at_origin(&self) -> Self {
        Self::new(0.0, 0.0, self.width, self.height)
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::full(0.0, 0.0)
    }
}

/// Computes the aspect-adjusted back buffer viewport and the matching scene viewport.
///
/// `content_aspect` is the ratio the scene is authored for, `display_aspect` the physical
/// ratio of the output. Bars are added on one axis only: top/bottom when the display is
/// relatively narrower than the content, left/right when it is wider. A mismatch that would
/// need bars on all four sides is not handled.
///
/// The scene viewport has the adjusted size and a zero origin, for render targets sized to
/// exactly fit the adjusted area.
pub fn compute_adjusted_viewport(
    full_width: f32,
    full_height: f32,
    content_aspect: f32,
    display_aspect: f32,
) -> (Viewport, Viewport) {
    let (width, height) = if display_aspect < content_aspect {
        let scale = display_aspect / content_aspect;
        (full_width, full_height * scale)
    } else if display_aspect > content_aspect {
        let scale = content_aspect / display_aspect;
        (full_width * scale, full_height)
    } else {
        (full_width, full_height)
    };

    let adjusted = Viewport::new(
        (full_width - width) / 2.0,
        (full_height - height) / 2.0,
        width,
        height,
    );

    (adjusted, adjusted.at_origin())
}

/// The three viewports a renderer keeps for its back buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSet {
    /// Whole back buffer.
    pub full: Viewport,
    /// Centred, letterboxed area of the back buffer.
    pub adjusted: Viewport,
    /// Adjusted size at the origin (custom render targets).
    pub scene: Viewport,
}

impl ViewportSet {
    pub fn new(
        back_buffer_width: u32,
        back_buffer_height: u32,
        content_aspect: f32,
        display_aspect: f32,
    ) -> Self {
        let full = Viewport::full(back_buffer_width as f32, back_buffer_height as f32);
        let (adjusted, scene) =
            compute_adjusted_viewport(full.width, full.height, content_aspect, display_aspect);

        Self {
            full,
            adjusted,
            scene,
        }
    }

    /// Pixel size of the scene viewport, rounded to whole texels.
    pub fn scene_size(&self) -> (u32, u32) {
        (
            self.scene.width.round().max(1.0) as u32,
            self.scene.height.round().max(1.0) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_letterbox_top_bottom() {
        let (adjusted, scene) = compute_adjusted_viewport(1280.0, 720.0, 16.0 / 9.0, 4.0 / 3.0);

        assert_eq!(adjusted.width, 1280.0);
        assert_relative_eq!(adjusted.height, 540.0, epsilon = 1e-3);
        assert_eq!(adjusted.origin_x, 0.0);
        assert_relative_eq!(adjusted.origin_y, 90.0, epsilon = 1e-3);

        assert_eq!(scene.origin_x, 0.0);
        assert_eq!(scene.origin_y, 0.0);
        assert_eq!(scene.width, adjusted.width);
        assert_eq!(scene.height, adjusted.height);
    }

    #[test]
    fn test_pillarbox_left_right() {
        let (adjusted, _) = compute_adjusted_viewport(1920.0, 1080.0, 4.0 / 3.0, 16.0 / 9.0);

        assert_relative_eq!(adjusted.width, 1440.0, epsilon = 1e-3);
        assert_eq!(adjusted.height, 1080.0);
        assert_relative_eq!(adjusted.origin_x, 240.0, epsilon = 1e-3);
        assert_eq!(adjusted.origin_y, 0.0);
    }

    #[test]
    fn test_equal_aspect_is_identity() {
        let (adjusted, scene) = compute_adjusted_viewport(800.0, 600.0, 1.0, 1.0);

        assert_eq!(adjusted, Viewport::full(800.0, 600.0));
        assert_eq!(scene, Viewport::full(800.0, 600.0));
    }

    #[test]
    fn test_depth_range() {
        let (adjusted, scene) = compute_adjusted_viewport(640.0, 480.0, 2.0, 1.0);
        assert_eq!((adjusted.min_depth, adjusted.max_depth), (0.0, 1.0));
        assert_eq!((scene.min_depth, scene.max_depth), (0.0, 1.0));
    }

    #[test]
    fn test_viewport_set_from_back_buffer() {
        let set = ViewportSet::new(1280, 720, 16.0 / 9.0, 4.0 / 3.0);

        assert_eq!(set.full, Viewport::full(1280.0, 720.0));
        assert_eq!(set.scene.width, set.adjusted.width);
        assert_eq!(set.scene_size(), (1280, 540));
    }
}
