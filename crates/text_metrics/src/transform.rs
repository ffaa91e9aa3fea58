//! Pure scale-space conversion functions.
//!
//! Width emulation draws text through a scaled coordinate space. Instead of
//! mutating a transform on a shared drawing context, the conversions here
//! are pure functions composed per call: the caller's rectangle is converted
//! into the scaled space before the native draw, and native measurements are
//! converted back into caller space afterwards.

use crate::{Rect, Size};
use serde::{Deserialize, Serialize};

/// An axis-aligned scale factor pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub sx: f32,
    pub sy: f32,
}

impl Scale {
    pub fn new(sx: f32, sy: f32) -> Self {
        Self { sx, sy }
    }

    pub fn identity() -> Self {
        Self { sx: 1.0, sy: 1.0 }
    }

    /// Scale only the horizontal axis
    pub fn horizontal(sx: f32) -> Self {
        Self { sx, sy: 1.0 }
    }

    pub fn is_identity(&self) -> bool {
        self.sx == 1.0 && self.sy == 1.0
    }

    /// Inverse scale. A degenerate axis (zero or non-finite) inverts to 1.0
    /// so the conversion never divides by zero.
    pub fn inverse(&self) -> Scale {
        Scale {
            sx: safe_invert(self.sx),
            sy: safe_invert(self.sy),
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::identity()
    }
}

fn safe_invert(factor: f32) -> f32 {
    if factor.is_finite() && factor != 0.0 {
        1.0 / factor
    } else {
        1.0
    }
}

/// Convert a caller-space rectangle into the scaled space the backend draws
/// in. The backend applies `scale` to its output surface, so coordinates are
/// divided here to land at the intended caller-space position.
pub fn to_emulated_space(rect: Rect, scale: Scale) -> Rect {
    let inv = scale.inverse();
    Rect::new(
        rect.x * inv.sx,
        rect.y * inv.sy,
        rect.width * inv.sx,
        rect.height * inv.sy,
    )
}

/// Convert a size measured in native (unscaled) space back into caller space
pub fn from_emulated_space(size: Size, scale: Scale) -> Size {
    Size::new(size.width * scale.sx, size.height * scale.sy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_no_op() {
        let rect = Rect::new(3.0, 4.0, 10.0, 20.0);
        assert_eq!(to_emulated_space(rect, Scale::identity()), rect);
    }

    #[test]
    fn test_round_trip() {
        let scale = Scale::new(0.5, 2.0);
        let size = Size::new(40.0, 12.0);
        let scaled = Size::new(size.width / scale.sx, size.height / scale.sy);
        assert_eq!(from_emulated_space(scaled, scale), size);
    }

    #[test]
    fn test_rect_converts_both_axes() {
        let scale = Scale::new(2.0, 1.0);
        let rect = Rect::new(10.0, 7.0, 100.0, 20.0);
        let converted = to_emulated_space(rect, scale);
        assert_eq!(converted.x, 5.0);
        assert_eq!(converted.width, 50.0);
        assert_eq!(converted.y, 7.0);
        assert_eq!(converted.height, 20.0);
    }

    #[test]
    fn test_zero_scale_never_divides_by_zero() {
        let scale = Scale::new(0.0, 1.0);
        let rect = Rect::new(10.0, 0.0, 100.0, 10.0);
        let converted = to_emulated_space(rect, scale);
        assert!(converted.x.is_finite());
        assert!(converted.width.is_finite());
    }
}
