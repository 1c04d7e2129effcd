#![deny(unsafe_code)]
//! Core types for the halo blob background.
//!
//! Provides the memoized gradient-noise generator ([`NoiseField`]), the
//! animated [`Blob`] shape and its smoothed [`Outline`], the [`DrawSurface`]
//! trait the host implements, the [`Scene`] driver that ticks every blob once
//! per frame, plus colors ([`Rgba`]), the `Xorshift64` PRNG, and
//! [`SceneConfig`].

pub mod blob;
pub mod color;
pub mod config;
pub mod error;
pub mod noise;
pub mod outline;
pub mod params;
pub mod prng;
pub mod scene;
pub mod surface;

pub use blob::Blob;
pub use color::Rgba;
pub use config::{RingSpec, SceneConfig};
pub use error::HaloError;
pub use glam::DVec2;
pub use noise::{AngleSource, LatticePoint, NoiseField};
pub use outline::{Outline, PathCommand};
pub use prng::Xorshift64;
pub use scene::{Layout, Rect, Scene, StaticLayout, Viewport};
pub use surface::{DrawSurface, RadialGradient, RecordingSurface, SurfaceOp};
