//! PNG export of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! pixel buffer do not pull in the `image` crate.

use std::path::Path;

use halo_core::error::HaloError;

use crate::raster::Raster;

/// Writes `raster` as a straight-alpha RGBA PNG.
///
/// Returns `HaloError::InvalidDimensions` if the raster is too large for a
/// PNG, or `HaloError::Io` if encoding or writing fails.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), HaloError> {
    let w = u32::try_from(raster.width()).map_err(|_| HaloError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| HaloError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.to_rgba8())
        .ok_or_else(|| HaloError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| HaloError::Io(e.to_string()))
}
