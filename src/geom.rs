use macroquad::math::{vec2, Affine2, Vec2};

/// Ordered affine builder. Every call applies *after* the operations
/// already recorded, so `GeoM::new().translate(..).rotate(..)` first moves,
/// then rotates the result around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoM(Affine2);

impl Default for GeoM {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoM {
    /// Identity transform
    pub fn new() -> Self {
        GeoM(Affine2::IDENTITY)
    }

    /// Append a translation
    pub fn translate(self, tx: f32, ty: f32) -> Self {
        GeoM(Affine2::from_translation(vec2(tx, ty)) * self.0)
    }

    /// Append a (possibly negative, i.e. mirroring) scale
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        GeoM(Affine2::from_scale(vec2(sx, sy)) * self.0)
    }

    /// Append a rotation by `theta` radians around the origin
    pub fn rotate(self, theta: f32) -> Self {
        GeoM(Affine2::from_angle(theta) * self.0)
    }

    /// Append another chain after this one
    pub fn then(self, other: GeoM) -> Self {
        GeoM(other.0 * self.0)
    }

    /// Map a point through the chain
    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        self.0.transform_point2(p)
    }

    /// Inverse chain, or `None` for a degenerate (zero-determinant) transform
    pub fn invert(&self) -> Option<GeoM> {
        let det = self.0.matrix2.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(GeoM(self.0.inverse()))
    }

    /// Underlying glam affine
    pub fn affine(&self) -> Affine2 {
        self.0
    }
}
