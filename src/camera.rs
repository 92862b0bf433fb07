use crate::error::{Error, Result};
use crate::geom::GeoM;
use crate::surface::{DrawOptions, Surface};
use macroquad::math::{vec2, Vec2};

/// World ↔ screen projection plus the viewport-sized surface it owns.
///
/// Forward projection: subtract position, rotate, scale, then move the
/// origin to the middle of the viewport.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World X of the camera anchor
    pub x: f32,
    /// World Y of the camera anchor
    pub y: f32,
    rotation: f32,
    scale: f32,
    width: u32,
    height: u32,
    surface: Surface,
}

fn check_scale(scale: f32) -> Result<f32> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(Error::InvalidScale(scale))
    }
}

impl Camera {
    /// Create a camera with a `width` x `height` viewport.
    ///
    /// Fails with [`Error::InvalidScale`] unless `scale` is finite and
    /// strictly positive.
    pub fn new(
        width: u32,
        height: u32,
        x: f32,
        y: f32,
        rotation: f32,
        scale: f32,
    ) -> Result<Self> {
        Ok(Camera {
            x,
            y,
            rotation,
            scale: check_scale(scale)?,
            width,
            height,
            surface: Surface::new(width, height),
        })
    }

    /// Jump to an absolute world position
    pub fn set_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Move relative to the current position
    pub fn move_position(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Camera anchor in world space
    pub fn position(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set the rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Uniform zoom factor
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Change the zoom; rejected (camera unchanged) unless finite and > 0
    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        self.scale = check_scale(scale)?;
        Ok(())
    }

    /// Viewport size in device pixels
    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn half_viewport(&self) -> Vec2 {
        vec2(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Surface the renderer draws into each frame
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mutable access to the owned surface
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Project a world point to screen coordinates
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        let (si, co) = self.rotation.sin_cos();
        let (x, y) = (p.x - self.x, p.y - self.y);
        let (x, y) = (co * x - si * y, si * x + co * y);
        vec2(x, y) * self.scale + self.half_viewport()
    }

    /// Inverse of [`Camera::world_to_screen`]
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        let (si, co) = (-self.rotation).sin_cos();
        let v = (p - self.half_viewport()) / self.scale;
        let (x, y) = (co * v.x - si * v.y, si * v.x + co * v.y);
        vec2(x + self.x, y + self.y)
    }

    /// Chain used by [`Camera::blit`]: rotation and zoom pivot on the
    /// surface centre.
    pub fn blit_transform(&self) -> GeoM {
        let cx = self.surface.width() as f32 / 2.0;
        let cy = self.surface.height() as f32 / 2.0;
        GeoM::new()
            .translate(-cx, -cy)
            .scale(self.scale, self.scale)
            .rotate(self.rotation)
            .translate(cx * self.scale, cy * self.scale)
    }

    /// Composite the camera surface onto `dest`
    pub fn blit(&self, dest: &mut Surface) {
        let opts = DrawOptions {
            geom: self.blit_transform(),
            alpha: 1.0,
        };
        dest.draw(&self.surface.full_view(), &opts);
    }

    /// Log viewport and surface dimensions
    pub fn info(&self) {
        log::info!(
            "camera viewport={}x{} surface={}x{} pos=({}, {}) rot={} scale={}",
            self.width,
            self.height,
            self.surface.width(),
            self.surface.height(),
            self.x,
            self.y,
            self.rotation,
            self.scale
        );
    }
}
