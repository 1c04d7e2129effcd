//! A CPU [`DrawSurface`] backed by a premultiplied RGBA buffer.

use glam::DVec2;
use halo_core::color::Rgba;
use halo_core::error::HaloError;
use halo_core::surface::{DrawSurface, RadialGradient};

use crate::path::PathBuilder;
use crate::pixel::{self, mix_premultiplied, source_over, Pixel};

/// Offscreen drawing surface.
///
/// Fills sample each pixel once at its centre (no anti-aliasing) and
/// composite with source-over. Pixel `(x, y)` covers `[x, x+1) x [y, y+1)`.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
    path: PathBuilder,
}

impl Raster {
    /// Creates a fully transparent raster.
    ///
    /// Returns `HaloError::InvalidDimensions` if either dimension is zero or
    /// the pixel count overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, HaloError> {
        if width == 0 || height == 0 {
            return Err(HaloError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4).map(|_| n))
            .ok_or(HaloError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![[0.0; 4]; len],
            path: PathBuilder::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Straight-alpha color at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(pixel::unpremultiply(self.pixels[y * self.width + x]))
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        pixel::to_rgba8(&self.pixels)
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] > 0.0).count()
    }
}

impl DrawSurface for Raster {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let x0 = x.floor().clamp(0.0, self.width as f64) as usize;
        let x1 = (x + width).ceil().clamp(0.0, self.width as f64) as usize;
        let y0 = y.floor().clamp(0.0, self.height as f64) as usize;
        let y1 = (y + height).ceil().clamp(0.0, self.height as f64) as usize;
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1.max(x0)].fill([0.0; 4]);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: DVec2) {
        self.path.move_to(point);
    }

    fn quadratic_curve_to(&mut self, ctrl: DVec2, to: DVec2) {
        self.path.quadratic_curve_to(ctrl, to);
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn fill_radial(&mut self, gradient: &RadialGradient) {
        for (row, start, end) in self.path.spans(self.width, self.height) {
            let y = row as f64 + 0.5;
            let base = row * self.width;
            for col in start..end {
                let t = gradient.offset_at(DVec2::new(col as f64 + 0.5, y));
                let src = mix_premultiplied(gradient.inner, gradient.outer, t);
                let dst = &mut self.pixels[base + col];
                *dst = source_over(*dst, src);
            }
        }
    }
}
