//! Sprite-sheet playback: a frame grid, frame-range selection and a looping
//! timer.

use crate::error::{Error, Result};
use crate::geom::GeoM;
use crate::surface::{DrawOptions, PixelRect, Surface};
use macroquad::math::Vec2;
use std::time::Duration;

/// Regular grid of equally sized frames on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    frame_w: u32,
    frame_h: u32,
    cols: u32,
    rows: u32,
    left: u32,
    top: u32,
    border: u32,
}

fn parse_range(range: &str) -> Result<Vec<u32>> {
    let bad = || Error::InvalidFrameRange(range.to_owned());
    let num = |s: &str| s.trim().parse::<u32>().map_err(|_| bad());

    match range.split_once('-') {
        None => Ok(vec![num(range)?]),
        Some((a, b)) => {
            let (a, b) = (num(a)?, num(b)?);
            if a <= b {
                Ok((a..=b).collect())
            } else {
                Ok((b..=a).rev().collect())
            }
        }
    }
}

impl Grid {
    /// Grid of `frame_w` x `frame_h` frames over an `image_w` x `image_h` sheet
    pub fn new(frame_w: u32, frame_h: u32, image_w: u32, image_h: u32) -> Self {
        Self::with_layout(frame_w, frame_h, image_w, image_h, 0, 0, 0)
    }

    /// Grid starting at (`left`, `top`) with `border` pixels between frames
    pub fn with_layout(
        frame_w: u32,
        frame_h: u32,
        image_w: u32,
        image_h: u32,
        left: u32,
        top: u32,
        border: u32,
    ) -> Self {
        let cols = image_w.saturating_sub(left) / (frame_w + border).max(1);
        let rows = image_h.saturating_sub(top) / (frame_h + border).max(1);
        Grid {
            frame_w,
            frame_h,
            cols,
            rows,
            left,
            top,
            border,
        }
    }

    /// Columns and rows available on the sheet
    pub fn dimensions(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }

    /// Frame at 1-based (`col`, `row`)
    fn frame(&self, col: u32, row: u32) -> PixelRect {
        PixelRect::new(
            self.left + (col - 1) * self.frame_w + col * self.border,
            self.top + (row - 1) * self.frame_h + row * self.border,
            self.frame_w,
            self.frame_h,
        )
    }

    /// Select frames by `(columns, rows)` pairs of 1-based ranges.
    ///
    /// Each side is either a single index (`"3"`) or an inclusive range
    /// (`"1-10"`, `"10-1"` for reverse order). Within a pair rows are walked
    /// outermost, so `("1-2", "1-2")` yields (1,1), (2,1), (1,2), (2,2).
    pub fn frames(&self, layout: &[(&str, &str)]) -> Result<Vec<PixelRect>> {
        let mut out = Vec::new();
        for (cols, rows) in layout {
            let cols_v = parse_range(cols)?;
            let rows_v = parse_range(rows)?;
            for &row in &rows_v {
                if row == 0 || row > self.rows {
                    return Err(Error::InvalidFrameRange(format!(
                        "row {} outside 1..={} in ({}, {})",
                        row, self.rows, cols, rows
                    )));
                }
                for &col in &cols_v {
                    if col == 0 || col > self.cols {
                        return Err(Error::InvalidFrameRange(format!(
                            "column {} outside 1..={} in ({}, {})",
                            col, self.cols, cols, rows
                        )));
                    }
                    out.push(self.frame(col, row));
                }
            }
        }
        Ok(out)
    }
}

/// Looping frame sequence with a fixed per-frame duration
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: Vec<PixelRect>,
    frame_duration: f32,
    timer: f32,
    position: usize,
}

impl Animation {
    /// Animation over `frames`, each shown for `frame_duration`
    pub fn new(frames: Vec<PixelRect>, frame_duration: Duration) -> Self {
        Animation {
            frames,
            frame_duration: frame_duration.as_secs_f32(),
            timer: 0.0,
            position: 0,
        }
    }

    /// Advance playback by `dt` seconds, wrapping past the last frame
    pub fn update(&mut self, dt: f32) {
        if self.frames.is_empty() || self.frame_duration <= 0.0 {
            return;
        }
        let total = self.frame_duration * self.frames.len() as f32;
        self.timer = (self.timer + dt.max(0.0)) % total;
        self.position = ((self.timer / self.frame_duration) as usize).min(self.frames.len() - 1);
    }

    /// Index of the frame currently shown
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` for an animation without frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sheet rectangle of the current frame
    pub fn frame(&self) -> Option<PixelRect> {
        self.frames.get(self.position).copied()
    }

    /// Back to the first frame
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.position = 0;
    }

    /// Draw the current frame of `sheet` at `at`.
    ///
    /// `scale_x = -1.0` mirrors around the left edge, callers shift `at`
    /// by the frame width to keep the footprint.
    pub fn draw(&self, sheet: &Surface, dest: &mut Surface, at: Vec2, scale_x: f32) {
        let Some(frame) = self.frame() else {
            return;
        };
        let opts = DrawOptions {
            geom: GeoM::new().scale(scale_x, 1.0).translate(at.x, at.y),
            alpha: 1.0,
        };
        dest.draw(&sheet.view(frame), &opts);
    }
}
