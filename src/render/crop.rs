use crate::surface::PixelRect;
use macroquad::math::{vec2, Vec2};

/// Region of the composite to sample and where it lands on the camera
/// surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crop {
    /// Source rectangle inside the composite, always within bounds
    pub src: PixelRect,
    /// Offset on the camera surface; non-zero only when the anchor is
    /// left of / above the level origin
    pub dest: Vec2,
}

fn clamp_axis(anchor: f32, extent: u32) -> (u32, u32, f32) {
    let a = anchor.floor();
    if a.is_nan() {
        return (0, extent, 0.0);
    }
    if a < 0.0 {
        // composite starts further right on the surface, by the overshoot
        return (0, extent, -a);
    }
    let start = (a as u32).min(extent);
    (start, extent - start, 0.0)
}

/// Crop anchored at the camera position and extending to the level's far
/// edge, clamped to the composite.
///
/// `level` and `bounds` normally agree; the smaller of the two wins.
pub fn crop_rect(anchor: Vec2, level: (u32, u32), bounds: (u32, u32)) -> Crop {
    let ew = level.0.min(bounds.0);
    let eh = level.1.min(bounds.1);
    let (x, w, dx) = clamp_axis(anchor.x, ew);
    let (y, h, dy) = clamp_axis(anchor.y, eh);
    Crop {
        src: PixelRect::new(x, y, w, h),
        dest: vec2(dx, dy),
    }
}
