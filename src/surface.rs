//! CPU-side RGBA image buffers with affine blits.
//!
//! Everything the runtime draws goes through a [`Surface`]: tileset atlases,
//! the per-level composite, the camera's viewport and the final screen. Only
//! the finished frame is uploaded to the GPU.

use crate::error::{Error, Result};
use crate::geom::GeoM;
use macroquad::color::Color;
use macroquad::math::vec2;
use std::path::Path;

/// Integer rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl PixelRect {
    /// Build a rectangle from its origin and size
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        PixelRect { x, y, w, h }
    }

    /// `true` when the rectangle covers no pixel
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Intersection with `0..width x 0..height`
    pub fn clamp_to(&self, width: u32, height: u32) -> PixelRect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let w = self.w.min(width - x);
        let h = self.h.min(height - y);
        PixelRect { x, y, w, h }
    }
}

/// Per-blit options: geometry chain plus an alpha multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Maps source-local pixel space to destination pixel space
    pub geom: GeoM,
    /// Multiplies the source alpha, `1.0` draws unchanged
    pub alpha: f32,
}

impl Default for DrawOptions {
    fn default() -> Self {
        DrawOptions {
            geom: GeoM::new(),
            alpha: 1.0,
        }
    }
}

/// Owned RGBA8 image, 4 bytes per pixel, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Borrowed sub-rectangle of a [`Surface`]; no pixels are copied
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    surface: &'a Surface,
    rect: PixelRect,
}

impl<'a> SurfaceView<'a> {
    /// Region of the parent surface this view covers
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// View width
    pub fn width(&self) -> u32 {
        self.rect.w
    }

    /// View height
    pub fn height(&self) -> u32 {
        self.rect.h
    }

    /// `true` when the view covers no pixel
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Pixel at view-local coordinates
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.surface.pixel(self.rect.x + x, self.rect.y + y)
    }
}

pub(crate) fn color_bytes(c: Color) -> [u8; 4] {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(c.r), q(c.g), q(c.b), q(c.a)]
}

impl Surface {
    /// Allocate a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Surface {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap raw RGBA bytes; `None` if the length does not match
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Surface {
            width,
            height,
            pixels,
        })
    }

    /// Decode an encoded image (PNG) held in memory
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, image::ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Surface {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Read and decode an image file
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel at `(x, y)`; panics when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Overwrite the pixel at `(x, y)`; ignored when out of bounds
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Reset every pixel to transparent black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Color) {
        let rgba = color_bytes(color);
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Whole-surface view
    pub fn full_view(&self) -> SurfaceView<'_> {
        SurfaceView {
            surface: self,
            rect: PixelRect::new(0, 0, self.width, self.height),
        }
    }

    /// Sub-rectangle view, clamped to the surface bounds
    pub fn view(&self, rect: PixelRect) -> SurfaceView<'_> {
        SurfaceView {
            surface: self,
            rect: rect.clamp_to(self.width, self.height),
        }
    }

    /// Draw `src` through `opts.geom` with source-over blending.
    ///
    /// Each destination pixel centre is mapped back into the source and the
    /// nearest source pixel is sampled, so mirrored and rotated blits never
    /// leave holes.
    pub fn draw(&mut self, src: &SurfaceView<'_>, opts: &DrawOptions) {
        if src.is_empty() || opts.alpha <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let Some(inv) = opts.geom.invert() else {
            return;
        };

        let (sw, sh) = (src.width() as f32, src.height() as f32);
        let corners = [
            opts.geom.apply(vec2(0.0, 0.0)),
            opts.geom.apply(vec2(sw, 0.0)),
            opts.geom.apply(vec2(0.0, sh)),
            opts.geom.apply(vec2(sw, sh)),
        ];
        let min = corners.iter().fold(corners[0], |m, c| m.min(*c));
        let max = corners.iter().fold(corners[0], |m, c| m.max(*c));

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().min(self.width as f32)).max(0.0) as u32;
        let y1 = (max.y.ceil().min(self.height as f32)).max(0.0) as u32;

        for dy in y0..y1 {
            for dx in x0..x1 {
                let local = inv.apply(vec2(dx as f32 + 0.5, dy as f32 + 0.5));
                if local.x < 0.0 || local.y < 0.0 || local.x >= sw || local.y >= sh {
                    continue;
                }
                let s = src.pixel(local.x as u32, local.y as u32);
                self.blend(dx, dy, s, opts.alpha);
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, s: [u8; 4], alpha: f32) {
        let sa = s[3] as f32 / 255.0 * alpha.min(1.0);
        if sa <= 0.0 {
            return;
        }
        let i = self.offset(x, y);
        let d = &mut self.pixels[i..i + 4];
        if sa >= 1.0 {
            d.copy_from_slice(&s);
            return;
        }
        let da = d[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            let v = (s[c] as f32 * sa + d[c] as f32 * da * (1.0 - sa)) / out_a;
            d[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        d[3] = (out_a * 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn checker() -> Surface {
        // 2x2: red, blue / blue, red
        let mut s = Surface::new(2, 2);
        s.set_pixel(0, 0, RED);
        s.set_pixel(1, 0, BLUE);
        s.set_pixel(0, 1, BLUE);
        s.set_pixel(1, 1, RED);
        s
    }

    #[test]
    fn view_is_clamped_to_bounds() {
        let s = Surface::new(10, 8);
        let v = s.view(PixelRect::new(6, 4, 100, 100));
        assert_eq!(v.rect(), PixelRect::new(6, 4, 4, 4));

        let v = s.view(PixelRect::new(20, 20, 5, 5));
        assert!(v.is_empty());
    }

    #[test]
    fn identity_blit_copies_pixels() {
        let src = checker();
        let mut dst = Surface::new(4, 4);
        let opts = DrawOptions {
            geom: GeoM::new().translate(1.0, 1.0),
            alpha: 1.0,
        };
        dst.draw(&src.full_view(), &opts);
        assert_eq!(dst.pixel(1, 1), RED);
        assert_eq!(dst.pixel(2, 1), BLUE);
        assert_eq!(dst.pixel(2, 2), RED);
        assert_eq!(dst.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn blit_outside_destination_is_ignored() {
        let src = checker();
        let mut dst = Surface::new(4, 4);
        let opts = DrawOptions {
            geom: GeoM::new().translate(-10.0, 50.0),
            alpha: 1.0,
        };
        dst.draw(&src.full_view(), &opts);
        assert!(dst.pixels().iter().all(|b| *b == 0));
    }

    #[test]
    fn alpha_scale_blends_over_destination() {
        let mut src = Surface::new(1, 1);
        src.set_pixel(0, 0, [255, 255, 255, 255]);
        let mut dst = Surface::new(1, 1);
        dst.set_pixel(0, 0, [0, 0, 0, 255]);
        dst.draw(
            &src.full_view(),
            &DrawOptions {
                geom: GeoM::new(),
                alpha: 0.4,
            },
        );
        assert_eq!(dst.pixel(0, 0), [102, 102, 102, 255]);
    }

    #[test]
    fn transparent_source_leaves_destination() {
        let src = Surface::new(2, 2);
        let mut dst = Surface::new(2, 2);
        dst.fill(Color::from_rgba(10, 20, 30, 255));
        dst.draw(&src.full_view(), &DrawOptions::default());
        assert_eq!(dst.pixel(1, 1), [10, 20, 30, 255]);
    }

    #[test]
    fn fill_then_clear() {
        let mut s = Surface::new(3, 1);
        s.fill(Color::from_rgba(255, 128, 128, 255));
        assert_eq!(s.pixel(2, 0), [255, 128, 128, 255]);
        s.clear();
        assert_eq!(s.pixel(2, 0), [0, 0, 0, 0]);
    }
}
