//! Scene configuration: the ring set plus the few knobs around it.
//!
//! [`SceneConfig::default`] is the hero background as shipped: nine rings
//! from radius 170 to 770, each fading from a transparent cyan core to a
//! translucent violet or blue rim. Configs round-trip through JSON so the CLI
//! can load them from disk and print the default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blob::DEFAULT_OUTLINE_POINTS;
use crate::color::Rgba;
use crate::error::HaloError;
use crate::params::{param_f64, param_u64, param_usize};

/// Vertical nudge applied to the focal point, in surface units (negative is up).
pub const DEFAULT_TARGET_OFFSET_Y: f64 = -90.0;
/// Seed for the noise field's gradient angles.
pub const DEFAULT_SEED: u64 = 42;

/// Radius and gradient colors for one blob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    pub radius: f64,
    pub inner: Rgba,
    pub outer: Rgba,
}

impl RingSpec {
    pub fn new(radius: f64, inner: Rgba, outer: Rgba) -> Self {
        Self {
            radius,
            inner,
            outer,
        }
    }
}

/// Everything a [`Scene`](crate::scene::Scene) needs to build its blobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Rings in paint order, back to front.
    pub rings: Vec<RingSpec>,
    pub outline_points: usize,
    pub target_offset_y: f64,
    pub seed: u64,
    /// Upper bound on memoized noise samples; `None` never evicts.
    pub value_cache_limit: Option<usize>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let core = Rgba::from_rgba8(5, 215, 243, 0.0);
        let violet = Rgba::from_rgba8(123, 16, 230, 0.79);
        let indigo = Rgba::from_rgba8(91, 16, 230, 0.79);
        let blue = Rgba::from_rgba8(16, 187, 230, 0.79);
        let rings = [
            (170.0, blue),
            (220.0, indigo),
            (270.0, violet),
            (320.0, blue),
            (390.0, indigo),
            (470.0, violet),
            (570.0, blue),
            (670.0, indigo),
            (770.0, violet),
        ]
        .into_iter()
        .map(|(radius, outer)| RingSpec::new(radius, core, outer))
        .collect();

        Self {
            rings,
            outline_points: DEFAULT_OUTLINE_POINTS,
            target_offset_y: DEFAULT_TARGET_OFFSET_Y,
            seed: DEFAULT_SEED,
            value_cache_limit: None,
        }
    }
}

impl SceneConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, HaloError> {
        let config: SceneConfig =
            serde_json::from_str(json).map_err(|e| HaloError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies scalar overrides from a JSON object.
    ///
    /// Recognized keys: `outline_points`, `target_offset_y`, `seed`,
    /// `value_cache_limit`. Unknown keys and values of the wrong type are
    /// ignored.
    pub fn with_overrides(mut self, params: &Value) -> Self {
        if let Some(n) = param_usize(params, "outline_points") {
            self.outline_points = n;
        }
        if let Some(dy) = param_f64(params, "target_offset_y") {
            self.target_offset_y = dy;
        }
        if let Some(seed) = param_u64(params, "seed") {
            self.seed = seed;
        }
        if let Some(limit) = param_usize(params, "value_cache_limit") {
            self.value_cache_limit = Some(limit);
        }
        self
    }

    /// Checks that the config can build a scene.
    pub fn validate(&self) -> Result<(), HaloError> {
        if self.rings.is_empty() {
            return Err(HaloError::InvalidConfig("at least one ring is required".into()));
        }
        if let Some(ring) = self
            .rings
            .iter()
            .find(|r| !r.radius.is_finite() || r.radius <= 0.0)
        {
            return Err(HaloError::InvalidRadius(ring.radius));
        }
        if self.outline_points < 3 {
            return Err(HaloError::InvalidOutlinePoints(self.outline_points));
        }
        if !self.target_offset_y.is_finite() {
            return Err(HaloError::InvalidConfig(format!(
                "target_offset_y must be finite, got {}",
                self.target_offset_y
            )));
        }
        Ok(())
    }
}
