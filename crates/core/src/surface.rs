//! The drawing-surface boundary.
//!
//! [`DrawSurface`] is the minimal 2D-context capability set the blobs need:
//! clearing, a single path built from move/quadratic/close commands, and a
//! fill with a two-stop radial gradient. Hosts implement it over a browser
//! canvas or a CPU raster; [`RecordingSurface`] captures the calls for tests
//! and tooling.
//!
//! The trait is object-safe, so a scene can draw through `&mut dyn DrawSurface`.

use glam::DVec2;

use crate::color::Rgba;

/// A radial gradient between two concentric circles.
///
/// Distances up to `inner_radius` get `inner`, distances from `outer_radius`
/// on get `outer`, and the band in between is interpolated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: DVec2,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub inner: Rgba,
    pub outer: Rgba,
}

impl RadialGradient {
    /// Position of `point` along the gradient, clamped to [0, 1].
    ///
    /// Degenerate gradients (`outer_radius <= inner_radius`) switch hard from
    /// 0 to 1 at the outer radius.
    pub fn offset_at(&self, point: DVec2) -> f64 {
        let d = point.distance(self.center);
        let span = self.outer_radius - self.inner_radius;
        if span <= 0.0 {
            return if d < self.outer_radius { 0.0 } else { 1.0 };
        }
        ((d - self.inner_radius) / span).clamp(0.0, 1.0)
    }
}

/// Capabilities the renderer consumes from the host's 2D drawing context.
///
/// Surface failures are the host's concern; methods do not return errors.
pub trait DrawSurface {
    /// Resets the rectangle to fully transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Discards the current path and starts a new one.
    fn begin_path(&mut self);

    /// Starts a new subpath at `point`.
    fn move_to(&mut self, point: DVec2);

    /// Adds a quadratic Bézier from the current point to `to`, pulled toward `ctrl`.
    fn quadratic_curve_to(&mut self, ctrl: DVec2, to: DVec2);

    /// Connects the current point back to the start of the subpath.
    fn close_path(&mut self);

    /// Fills the current path (nonzero winding) with `gradient`.
    fn fill_radial(&mut self, gradient: &RadialGradient);
}

/// A single recorded [`DrawSurface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    MoveTo(DVec2),
    QuadraticCurveTo {
        ctrl: DVec2,
        to: DVec2,
    },
    ClosePath,
    FillRadial(RadialGradient),
}

/// A [`DrawSurface`] that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls, oldest first.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of `fill_radial` calls recorded.
    pub fn fill_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::FillRadial(_)))
            .count()
    }

    /// Forgets all recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(SurfaceOp::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, point: DVec2) {
        self.ops.push(SurfaceOp::MoveTo(point));
    }

    fn quadratic_curve_to(&mut self, ctrl: DVec2, to: DVec2) {
        self.ops.push(SurfaceOp::QuadraticCurveTo { ctrl, to });
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::ClosePath);
    }

    fn fill_radial(&mut self, gradient: &RadialGradient) {
        self.ops.push(SurfaceOp::FillRadial(*gradient));
    }
}
