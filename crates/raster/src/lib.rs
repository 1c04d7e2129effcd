#![deny(unsafe_code)]
//! Offscreen rendering for the halo blob background.
//!
//! [`Raster`] implements [`halo_core::DrawSurface`] on a premultiplied RGBA
//! buffer: quadratic paths are flattened, filled with the nonzero rule at
//! pixel centres, and shaded by the radial gradient. With the `png` feature,
//! [`snapshot::write_png`] exports a frame.

pub mod path;
pub mod pixel;
pub mod raster;
#[cfg(feature = "png")]
pub mod snapshot;

pub use raster::Raster;
