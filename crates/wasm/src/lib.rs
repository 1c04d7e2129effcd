#![deny(unsafe_code)]
//! Browser bindings for the halo blob background.
//!
//! [`HaloBackground`] owns a [`Scene`] and draws it onto a `<canvas>` through
//! [`CanvasSurface`]. The page drives it: call `tick()` from a
//! `requestAnimationFrame` loop and `resize()` from the window's resize event.

use glam::DVec2;
use halo_core::{DrawSurface, Layout, RadialGradient, Rect, Scene, SceneConfig, Viewport};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

/// [`DrawSurface`] over a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, point: DVec2) {
        self.ctx.move_to(point.x, point.y);
    }

    fn quadratic_curve_to(&mut self, ctrl: DVec2, to: DVec2) {
        self.ctx.quadratic_curve_to(ctrl.x, ctrl.y, to.x, to.y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill_radial(&mut self, gradient: &RadialGradient) {
        let c = gradient.center;
        let fill = match self.ctx.create_radial_gradient(
            c.x,
            c.y,
            gradient.inner_radius,
            c.x,
            c.y,
            gradient.outer_radius,
        ) {
            Ok(fill) => fill,
            Err(e) => {
                warn!(error = ?e, "createRadialGradient failed, skipping fill");
                return;
            }
        };
        for (offset, color) in [(0.0, gradient.inner), (1.0, gradient.outer)] {
            if let Err(e) = fill.add_color_stop(offset, &color.to_css()) {
                warn!(error = ?e, offset, "addColorStop failed");
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&fill);
        self.ctx.fill();
    }
}

/// [`Layout`] read from the live DOM.
///
/// The viewport is `window.innerWidth` by the canvas's rendered height; the
/// target is the bounding rect of the first element matching a selector.
pub struct DomLayout {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    target_selector: String,
}

impl DomLayout {
    /// Sizes the canvas backing store to the current viewport.
    fn sync_canvas_size(&self) -> Viewport {
        let viewport = self.viewport();
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);
        viewport
    }
}

impl Layout for DomLayout {
    fn viewport(&self) -> Viewport {
        let width = match self.window.inner_width() {
            Ok(w) => w.as_f64().unwrap_or(0.0),
            Err(e) => {
                warn!(error = ?e, "window.innerWidth unavailable");
                0.0
            }
        };
        let height = self.canvas.get_bounding_client_rect().height();
        Viewport::new(width, height)
    }

    fn target_rect(&self) -> Option<Rect> {
        let element = self
            .document
            .query_selector(&self.target_selector)
            .ok()
            .flatten()?;
        let r = element.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }
}

/// The animated background bound to one canvas.
#[wasm_bindgen]
pub struct HaloBackground {
    scene: Scene,
    layout: DomLayout,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl HaloBackground {
    /// Binds to the canvas with id `canvas_id`, follows the element matching
    /// `target_selector`, and loads the default scene. The noise seed is
    /// taken from `performance.now()`, so every page load looks different.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, target_selector: &str) -> Result<HaloBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let seed = window
            .performance()
            .map(|p| p.now().to_bits())
            .unwrap_or(halo_core::config::DEFAULT_SEED);
        let config = SceneConfig {
            seed,
            ..SceneConfig::default()
        };

        let layout = DomLayout {
            window,
            document,
            canvas,
            target_selector: target_selector.to_owned(),
        };
        layout.sync_canvas_size();

        let mut scene = Scene::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        scene
            .on_load(&layout)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(HaloBackground {
            scene,
            layout,
            surface: CanvasSurface::new(ctx),
        })
    }

    /// Re-sizes the canvas, recomputes the target and reseeds the noise.
    pub fn resize(&mut self) {
        self.layout.sync_canvas_size();
        self.scene.on_resize(&self.layout);
    }

    /// Draws one frame.
    pub fn tick(&mut self) {
        self.scene.tick(&mut self.surface);
    }

    /// Frames drawn since load.
    pub fn ticks(&self) -> f64 {
        self.scene.ticks() as f64
    }
}
