//! Memoized 2D gradient noise.
//!
//! [`NoiseField`] assigns a random unit gradient to every integer lattice
//! point it touches and blends the four surrounding corner contributions with
//! a quintic smootherstep. Both the gradients and every computed sample are
//! cached until the next [`NoiseField::seed`] call, which starts a new epoch
//! with fresh gradients.
//!
//! Randomness comes from an [`AngleSource`]; the default is
//! [`Xorshift64`](crate::prng::Xorshift64), and tests inject fixed sequences.

use std::collections::HashMap;

use glam::DVec2;
use tracing::{debug, trace};

use crate::prng::Xorshift64;

/// Supplies the random angles that become lattice gradients.
pub trait AngleSource {
    /// Returns an angle in radians. Production sources are uniform over [0, 2π).
    fn next_angle(&mut self) -> f64;
}

/// Integer coordinate in the noise domain, anchor for one cached gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticePoint {
    pub x: i64,
    pub y: i64,
}

impl LatticePoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Value-cache key: the bit patterns of the queried point.
///
/// `-0.0` is folded into `0.0` so the key agrees with numeric equality for
/// every finite input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SampleKey {
    x: u64,
    y: u64,
}

impl SampleKey {
    fn new(x: f64, y: f64) -> Self {
        Self {
            x: (x + 0.0).to_bits(),
            y: (y + 0.0).to_bits(),
        }
    }
}

/// Quintic smootherstep `6t^5 - 15t^4 + 10t^3`.
///
/// Maps 0 to 0, 1 to 1 and 0.5 to 0.5, with zero first and second
/// derivatives at both ends.
pub fn smootherstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Interpolates from `a` to `b` with the smootherstep weight of `t`.
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + smootherstep(t) * (b - a)
}

/// Perlin-style gradient noise over a continuous 2D domain.
///
/// Within one seed epoch `sample(x, y)` is a pure function of its inputs: the
/// gradient for a lattice point is created once and reused, and every result
/// is memoized under its exact input. Outputs lie within `[-√2, √2]` and in
/// practice stay close to `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct NoiseField<S = Xorshift64> {
    source: S,
    gradients: HashMap<LatticePoint, DVec2>,
    values: HashMap<SampleKey, f64>,
    value_cache_limit: Option<usize>,
    epoch: u64,
}

impl NoiseField<Xorshift64> {
    /// Creates a seeded field whose gradients come from `Xorshift64::new(seed)`.
    pub fn new(seed: u64) -> Self {
        Self::with_source(Xorshift64::new(seed))
    }
}

impl<S: AngleSource> NoiseField<S> {
    /// Creates a seeded field drawing gradient angles from `source`.
    ///
    /// The field starts in epoch 0 with empty caches, so it is ready to sample.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            gradients: HashMap::new(),
            values: HashMap::new(),
            value_cache_limit: None,
            epoch: 0,
        }
    }

    /// Bounds the value cache. When a new sample would exceed `limit`, the
    /// value cache is flushed first; gradients are never evicted within an
    /// epoch. `None` keeps every value until the next reseed, and `Some(0)`
    /// disables value memoization entirely.
    pub fn with_value_cache_limit(mut self, limit: Option<usize>) -> Self {
        self.value_cache_limit = limit;
        self
    }

    /// Starts a new seed epoch: clears the gradient and value caches.
    ///
    /// The angle source keeps advancing, so lattice points get new gradients
    /// and the texture changes.
    pub fn seed(&mut self) {
        debug!(
            epoch = self.epoch,
            gradients = self.gradients.len(),
            values = self.values.len(),
            "reseeding noise field"
        );
        self.gradients.clear();
        self.values.clear();
        self.epoch += 1;
    }

    /// Samples the noise at `(x, y)`.
    ///
    /// The four corners are evaluated in the order (xf, yf), (xf+1, yf),
    /// (xf, yf+1), (xf+1, yf+1), which is also the order in which missing
    /// gradients are drawn from the angle source.
    pub fn sample(&mut self, x: f64, y: f64) -> f64 {
        let key = SampleKey::new(x, y);
        if let Some(&v) = self.values.get(&key) {
            return v;
        }

        let xf = x.floor();
        let yf = y.floor();
        // Casts saturate far outside the i64 range; keys must not overflow.
        let (ix, iy) = (xf as i64, yf as i64);
        let (ix1, iy1) = (ix.saturating_add(1), iy.saturating_add(1));
        let (dx, dy) = (x - xf, y - yf);

        let top_left = self.corner(DVec2::new(dx, dy), LatticePoint::new(ix, iy));
        let top_right = self.corner(DVec2::new(dx - 1.0, dy), LatticePoint::new(ix1, iy));
        let bottom_left = self.corner(DVec2::new(dx, dy - 1.0), LatticePoint::new(ix, iy1));
        let bottom_right =
            self.corner(DVec2::new(dx - 1.0, dy - 1.0), LatticePoint::new(ix1, iy1));

        let top = lerp(dx, top_left, top_right);
        let bottom = lerp(dx, bottom_left, bottom_right);
        let v = lerp(dy, top, bottom);

        self.remember(key, v);
        v
    }

    /// Returns the gradient for `point`, drawing a new one if it has none yet.
    pub fn gradient(&mut self, point: LatticePoint) -> DVec2 {
        let source = &mut self.source;
        *self.gradients.entry(point).or_insert_with(|| {
            let theta = source.next_angle();
            DVec2::new(theta.cos(), theta.sin())
        })
    }

    /// Returns the gradient for `point` if the current epoch assigned one.
    pub fn cached_gradient(&self, point: LatticePoint) -> Option<DVec2> {
        self.gradients.get(&point).copied()
    }

    /// Number of lattice points with a gradient in the current epoch.
    pub fn gradient_count(&self) -> usize {
        self.gradients.len()
    }

    /// Number of memoized samples in the current epoch.
    pub fn cached_values(&self) -> usize {
        self.values.len()
    }

    /// How many times [`seed`](Self::seed) has run since construction.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Dot product of the displacement `offset` from `corner` with its gradient.
    fn corner(&mut self, offset: DVec2, corner: LatticePoint) -> f64 {
        self.gradient(corner).dot(offset)
    }

    fn remember(&mut self, key: SampleKey, v: f64) {
        if let Some(limit) = self.value_cache_limit {
            if limit == 0 {
                return;
            }
            if self.values.len() >= limit {
                trace!(limit, "value cache full, flushing");
                self.values.clear();
            }
        }
        self.values.insert(key, v);
    }
}
