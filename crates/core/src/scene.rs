//! The scene driver: owns the blobs, the noise field and the shared target.
//!
//! A host forwards three signals: [`Scene::on_load`] once the page layout is
//! known, [`Scene::on_resize`] whenever the surface changes size, and
//! [`Scene::tick`] once per animation frame. Geometry arrives through the
//! [`Layout`] trait, so the driver has no hidden global state.

use glam::DVec2;
use tracing::{debug, debug_span, info};

use crate::blob::Blob;
use crate::config::SceneConfig;
use crate::error::HaloError;
use crate::noise::{AngleSource, NoiseField};
use crate::prng::Xorshift64;
use crate::surface::DrawSurface;

/// Size of the drawing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Bounding rectangle of the focal element, in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Geometry queries the scene makes of its host.
pub trait Layout {
    /// Current size of the drawing surface.
    fn viewport(&self) -> Viewport;

    /// Bounding rectangle of the focal element, or `None` if it is absent.
    fn target_rect(&self) -> Option<Rect>;
}

/// A [`Layout`] with fixed answers, for offline rendering and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticLayout {
    pub viewport: Viewport,
    pub target: Option<Rect>,
}

impl Layout for StaticLayout {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn target_rect(&self) -> Option<Rect> {
        self.target
    }
}

/// The focal point for `rect`: its centre nudged vertically by `offset_y`.
pub fn target_for(rect: &Rect, offset_y: f64) -> DVec2 {
    rect.center() + DVec2::new(0.0, offset_y)
}

/// Owns every blob and the noise field, and draws them once per tick.
#[derive(Debug)]
pub struct Scene<S = Xorshift64> {
    config: SceneConfig,
    noise: NoiseField<S>,
    blobs: Vec<Blob>,
    target: DVec2,
    viewport: Viewport,
    ticks: u64,
}

impl Scene<Xorshift64> {
    /// Creates an unloaded scene seeded from `config.seed`.
    ///
    /// Returns an error if `config` fails [`SceneConfig::validate`].
    pub fn new(config: SceneConfig) -> Result<Self, HaloError> {
        let noise =
            NoiseField::new(config.seed).with_value_cache_limit(config.value_cache_limit);
        Self::with_noise(config, noise)
    }
}

impl<S: AngleSource> Scene<S> {
    /// Creates an unloaded scene around an existing noise field.
    pub fn with_noise(config: SceneConfig, noise: NoiseField<S>) -> Result<Self, HaloError> {
        config.validate()?;
        Ok(Self {
            config,
            noise,
            blobs: Vec::new(),
            target: DVec2::ZERO,
            viewport: Viewport::default(),
            ticks: 0,
        })
    }

    /// Handles the content-loaded signal: measures the layout and rebuilds
    /// the blob list, every blob starting at the target.
    pub fn on_load<L: Layout + ?Sized>(&mut self, layout: &L) -> Result<(), HaloError> {
        self.viewport = layout.viewport();
        self.update_target(layout);
        self.blobs = self
            .config
            .rings
            .iter()
            .map(|ring| Blob::new(self.target, ring.radius, ring.inner, ring.outer))
            .collect::<Result<_, _>>()?;
        self.ticks = 0;
        info!(
            blobs = self.blobs.len(),
            target_x = self.target.x,
            target_y = self.target.y,
            width = self.viewport.width,
            height = self.viewport.height,
            "scene loaded"
        );
        Ok(())
    }

    /// Handles the surface-resized signal: re-measures, retargets, and
    /// reseeds the noise so the texture changes. Takes effect on the next tick.
    pub fn on_resize<L: Layout + ?Sized>(&mut self, layout: &L) {
        self.viewport = layout.viewport();
        self.update_target(layout);
        self.noise.seed();
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            epoch = self.noise.epoch(),
            "scene resized"
        );
    }

    /// Recomputes the target from the layout.
    ///
    /// Returns `false` and keeps the previous target if the focal element is
    /// missing.
    pub fn update_target<L: Layout + ?Sized>(&mut self, layout: &L) -> bool {
        match layout.target_rect() {
            Some(rect) => {
                self.target = target_for(&rect, self.config.target_offset_y);
                true
            }
            None => {
                debug!(
                    target_x = self.target.x,
                    target_y = self.target.y,
                    "focal element missing, keeping target"
                );
                false
            }
        }
    }

    /// Draws one frame: clears the viewport, then updates, outlines and
    /// renders each blob in list order (first is painted at the back).
    pub fn tick<D: DrawSurface + ?Sized>(&mut self, surface: &mut D) {
        let _span = debug_span!("tick", n = self.ticks).entered();
        surface.clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        for blob in &mut self.blobs {
            blob.update(self.target);
            let outline = blob.compute_outline(&mut self.noise, self.config.outline_points);
            blob.render(&outline, surface);
        }
        self.ticks += 1;
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// The point every blob eases toward. Origin until a target is found.
    pub fn target(&self) -> DVec2 {
        self.target
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames drawn since the last load.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn noise(&self) -> &NoiseField<S> {
        &self.noise
    }
}
