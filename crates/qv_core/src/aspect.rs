use std::cmp::Ordering;
use std::fmt;

use crate::display::DisplayMode;

/// 由分辨率约分得到的宽高比
///
/// 保留原始分辨率，用于描述那些约分后不直观的比例（例如 1600x1024 -> 25:16）。
#[derive(Debug, Clone, Copy)]
pub struct AspectRatio {
    width: u32,
    height: u32,
    numerator: u32,
    denominator: u32,
}

impl AspectRatio {
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width != 0 && height != 0);

        let divisor = gcd(width, height).max(1);
        Self {
            width,
            height,
            numerator: width / divisor,
            denominator: height / divisor,
        }
    }

    #[inline]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    #[inline]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    #[inline]
    pub fn ratio(&self) -> f32 {
        self.numerator as f32 / self.denominator as f32
    }

    /// 约分结果可能不直观时附带原始分辨率与比值
    fn needs_detail(&self) -> bool {
        self.numerator > 16 || self.denominator > 10
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)?;
        if self.needs_detail() {
            write!(
                f,
                " ({}x{}, ratio: {})",
                self.width,
                self.height,
                significant_digits(self.ratio(), 3)
            )?;
        }
        Ok(())
    }
}

impl PartialEq for AspectRatio {
    fn eq(&self, other: &Self) -> bool {
        self.numerator == other.numerator && self.denominator == other.denominator
    }
}

impl Eq for AspectRatio {}

impl PartialOrd for AspectRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AspectRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numerator, self.denominator).cmp(&(other.numerator, other.denominator))
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Formats `value` with at most `digits` significant digits, dropping trailing zeros.
fn significant_digits(value: f32, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");

    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Sorted, de-duplicated aspect ratios derived from a mode list.
pub fn aspect_ratios_for_modes(modes: &[DisplayMode]) -> Vec<AspectRatio> {
    let mut ratios: Vec<AspectRatio> = modes
        .iter()
        .filter(|m| m.width != 0 && m.height != 0)
        .map(|m| AspectRatio::new(m.width, m.height))
        .collect();
    ratios.sort();
    ratios.dedup();
    ratios
}

/// Display aspect ratio choice: derived from the mode, or overridden.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AspectSelection {
    /// Square pixels: the display aspect is the mode's width / height.
    #[default]
    Automatic,
    Forced(f32),
}

impl AspectSelection {
    pub fn resolve(&self, mode: &DisplayMode) -> f32 {
        match *self {
            AspectSelection::Forced(ratio) if ratio > 0.0 => ratio,
            _ => mode.width as f32 / mode.height.max(1) as f32,
        }
    }

    pub fn is_automatic(&self) -> bool {
        matches!(self, AspectSelection::Automatic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_reduction() {
        let ratio = AspectRatio::new(1600, 1024);
        assert_eq!((ratio.numerator(), ratio.denominator()), (25, 16));

        let ratio = AspectRatio::new(1920, 1080);
        assert_eq!((ratio.numerator(), ratio.denominator()), (16, 9));
    }

    #[test]
    fn test_description() {
        assert_eq!(AspectRatio::new(1920, 1080).to_string(), "16:9");
        assert_eq!(AspectRatio::new(1024, 768).to_string(), "4:3");
        assert_eq!(
            AspectRatio::new(1600, 1024).to_string(),
            "25:16 (1600x1024, ratio: 1.56)"
        );
        assert_eq!(
            AspectRatio::new(1366, 768).to_string(),
            "683:384 (1366x768, ratio: 1.78)"
        );
    }

    #[test]
    fn test_equality_ignores_resolution() {
        assert_eq!(AspectRatio::new(1280, 720), AspectRatio::new(1920, 1080));
        assert_ne!(AspectRatio::new(1280, 720), AspectRatio::new(1280, 800));
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(significant_digits(1.5625, 3), "1.56");
        assert_eq!(significant_digits(2.0, 3), "2");
        assert_eq!(significant_digits(1.6, 3), "1.6");
        assert_eq!(significant_digits(12.345, 3), "12.3");
    }

    #[test]
    fn test_aspect_list_sorted_and_unique() {
        let modes = [
            DisplayMode::windowed(1920, 1080),
            DisplayMode::windowed(1024, 768),
            DisplayMode::windowed(1280, 720),
            DisplayMode::windowed(800, 600),
            DisplayMode::windowed(1280, 1024),
        ];

        let ratios = aspect_ratios_for_modes(&modes);
        let names: Vec<String> = ratios.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["4:3", "5:4", "16:9"]);
    }

    #[test]
    fn test_selection_resolve() {
        let mode = DisplayMode::windowed(1280, 1024);
        assert_eq!(AspectSelection::Automatic.resolve(&mode), 1.25);
        assert_eq!(AspectSelection::Forced(16.0 / 9.0).resolve(&mode), 16.0 / 9.0);
    }
}
