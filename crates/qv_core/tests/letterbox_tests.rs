use approx::assert_relative_eq;
use qv_core::{AspectRatio, Viewport, ViewportSet, compute_adjusted_viewport};

const EPS: f32 = 1e-3;

#[test]
fn widescreen_content_on_4_3_display() {
    let (adjusted, scene) = compute_adjusted_viewport(1280.0, 720.0, 16.0 / 9.0, 4.0 / 3.0);
    assert_relative_eq!(adjusted.width, 1280.0, epsilon = EPS);
    assert_relative_eq!(adjusted.height, 540.0, epsilon = EPS);
    assert_relative_eq!(adjusted.origin_x, 0.0, epsilon = EPS);
    assert_relative_eq!(adjusted.origin_y, 90.0, epsilon = EPS);
    assert_eq!((scene.origin_x, scene.origin_y), (0.0, 0.0));
}

#[test]
fn square_content_on_square_display() {
    let (adjusted, _) = compute_adjusted_viewport(800.0, 600.0, 1.0, 1.0);
    assert_eq!(adjusted, Viewport::full(800.0, 600.0));
}

#[test]
fn classic_content_on_widescreen_display() {
    let (adjusted, _) = compute_adjusted_viewport(1920.0, 1080.0, 4.0 / 3.0, 16.0 / 9.0);
    assert_relative_eq!(adjusted.width, 1440.0, epsilon = EPS);
    assert_relative_eq!(adjusted.height, 1080.0, epsilon = EPS);
    assert_relative_eq!(adjusted.origin_x, 240.0, epsilon = EPS);
    assert_relative_eq!(adjusted.origin_y, 0.0, epsilon = EPS);
}

#[test]
fn adjusted_viewport_fits_and_is_centred() {
    let sizes = [(640.0, 480.0), (1280.0, 720.0), (1920.0, 1200.0), (2560.0, 1080.0)];
    let aspects = [1.0, 5.0 / 4.0, 4.0 / 3.0, 16.0 / 10.0, 16.0 / 9.0, 21.0 / 9.0];

    for &(w, h) in &sizes {
        for &content in &aspects {
            for &display in &aspects {
                let (adjusted, scene) = compute_adjusted_viewport(w, h, content, display);

                assert!(adjusted.width <= w + EPS);
                assert!(adjusted.height <= h + EPS);

                let width_full = (adjusted.width - w).abs() < EPS;
                let height_full = (adjusted.height - h).abs() < EPS;
                if content == display {
                    assert!(width_full && height_full);
                } else {
                    assert!(width_full ^ height_full, "{w}x{h} {content} on {display}");
                }

                assert_relative_eq!(
                    adjusted.origin_x * 2.0 + adjusted.width,
                    w,
                    epsilon = EPS
                );
                assert_relative_eq!(
                    adjusted.origin_y * 2.0 + adjusted.height,
                    h,
                    epsilon = EPS
                );

                assert_eq!(scene.width, adjusted.width);
                assert_eq!(scene.height, adjusted.height);
                assert_eq!((scene.min_depth, scene.max_depth), (0.0, 1.0));
            }
        }
    }
}

#[test]
fn viewport_set_with_automatic_display_aspect() {
    // square pixels on a 16:10 desktop
    let set = ViewportSet::new(1680, 1050, 16.0 / 9.0, 1680.0 / 1050.0);
    assert_eq!(set.full, Viewport::full(1680.0, 1050.0));
    assert_relative_eq!(set.adjusted.width, 1680.0, epsilon = EPS);
    assert_relative_eq!(set.adjusted.height, 945.0, epsilon = EPS);
    assert_relative_eq!(set.adjusted.origin_y, 52.5, epsilon = EPS);
}

#[test]
fn odd_resolution_reduces_via_gcd() {
    let ratio = AspectRatio::new(1600, 1024);
    assert_eq!((ratio.numerator(), ratio.denominator()), (25, 16));
    assert_relative_eq!(ratio.ratio(), 1.5625, epsilon = 1e-6);
}
