//! A single translucent, noise-deformed shape that glides toward a target.
//!
//! Each tick a [`Blob`] moves 3% of the remaining distance to the target on
//! each axis and advances its phase by 0.005. Its outline samples the noise
//! field on a radius-2 circle centred at (1, 1) in the noise domain, shifted
//! diagonally by the phase, and scales the base radius by `1 + 0.2 * v`.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::color::Rgba;
use crate::error::HaloError;
use crate::noise::{AngleSource, NoiseField};
use crate::outline::Outline;
use crate::surface::{DrawSurface, RadialGradient};

/// Fraction of the remaining distance to the target covered per tick.
pub const EASING: f64 = 0.03;
/// Phase advance per tick.
pub const PHASE_STEP: f64 = 0.005;
/// Maximum relative radius perturbation for a noise value of ±1.
pub const RADIUS_JITTER: f64 = 0.2;
/// Inner gradient stop as a fraction of the base radius.
pub const INNER_STOP: f64 = 0.8;
/// Outline resolution used by the scene.
pub const DEFAULT_OUTLINE_POINTS: usize = 32;

/// Radius of the sampling circle in the noise domain.
const NOISE_RING_RADIUS: f64 = 2.0;
/// Offset of the sampling circle's centre on both noise axes.
const NOISE_RING_OFFSET: f64 = 1.0;

/// One animated shape: position, base radius, gradient colors and phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    position: DVec2,
    radius: f64,
    inner: Rgba,
    outer: Rgba,
    phase: f64,
}

impl Blob {
    /// Creates a blob at `position` with phase 0.
    ///
    /// Returns `HaloError::InvalidRadius` unless `radius` is finite and positive.
    pub fn new(position: DVec2, radius: f64, inner: Rgba, outer: Rgba) -> Result<Self, HaloError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(HaloError::InvalidRadius(radius));
        }
        Ok(Self {
            position,
            radius,
            inner,
            outer,
            phase: 0.0,
        })
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Color of the inner gradient stop.
    pub fn inner(&self) -> Rgba {
        self.inner
    }

    /// Color of the outer gradient stop.
    pub fn outer(&self) -> Rgba {
        self.outer
    }

    /// Noise-domain time offset. Grows without wrapping.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Advances one tick: eases toward `target` and advances the phase.
    ///
    /// The approach is exponential (distance shrinks by a factor of 0.97 per
    /// tick) and never overshoots.
    pub fn update(&mut self, target: DVec2) {
        self.position += (target - self.position) * EASING;
        self.phase += PHASE_STEP;
    }

    /// Samples `noise` to build `num_points` perturbed outline points.
    ///
    /// Point `i` sits at angle `i * 2π / num_points` from the position, at
    /// distance `radius * (1 + 0.2 * v)`. An empty outline is returned for
    /// `num_points == 0`.
    pub fn compute_outline<S: AngleSource>(
        &self,
        noise: &mut NoiseField<S>,
        num_points: usize,
    ) -> Outline {
        if num_points == 0 {
            return Outline::new(Vec::new());
        }
        let step = TAU / num_points as f64;
        let points = (0..num_points)
            .map(|i| {
                let (sin, cos) = (i as f64 * step).sin_cos();
                let v = noise.sample(
                    cos * NOISE_RING_RADIUS + NOISE_RING_OFFSET + self.phase,
                    sin * NOISE_RING_RADIUS + NOISE_RING_OFFSET + self.phase,
                );
                let r = self.radius * (1.0 + v * RADIUS_JITTER);
                self.position + DVec2::new(cos, sin) * r
            })
            .collect();
        Outline::new(points)
    }

    /// The concentric fill gradient: `inner` up to 80% of the base radius,
    /// fading to `outer` at the full radius.
    pub fn gradient(&self) -> RadialGradient {
        RadialGradient {
            center: self.position,
            inner_radius: self.radius * INNER_STOP,
            outer_radius: self.radius,
            inner: self.inner,
            outer: self.outer,
        }
    }

    /// Fills the smoothed `outline` with this blob's gradient.
    pub fn render<D: DrawSurface + ?Sized>(&self, outline: &Outline, surface: &mut D) {
        surface.begin_path();
        outline.trace(surface);
        surface.fill_radial(&self.gradient());
    }
}
