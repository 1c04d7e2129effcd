//! Error types for the halo core.

use thiserror::Error;

/// Errors produced while constructing or validating halo values.
///
/// Sampling noise, updating blobs, and building outlines are total over
/// finite inputs and never produce these.
#[derive(Debug, Error)]
pub enum HaloError {
    /// Width or height was zero when creating a viewport-sized buffer.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A blob radius was zero, negative, or not finite.
    #[error("invalid radius {0}: must be finite and greater than zero")]
    InvalidRadius(f64),

    /// An outline needs at least three points to enclose an area.
    #[error("invalid outline point count {0}: need at least 3")]
    InvalidOutlinePoints(usize),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A scene configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Writing a snapshot or reading a config file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = HaloError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_radius_includes_value() {
        let msg = HaloError::InvalidRadius(-3.5).to_string();
        assert!(msg.contains("-3.5"), "missing radius in: {msg}");
    }

    #[test]
    fn invalid_outline_points_includes_count() {
        let msg = HaloError::InvalidOutlinePoints(2).to_string();
        assert!(msg.contains('2'), "missing count in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = HaloError::InvalidColor("rgba(1, 2)".into()).to_string();
        assert!(msg.contains("rgba(1, 2)"), "missing input in: {msg}");
    }

    #[test]
    fn invalid_config_and_io_include_message() {
        assert!(HaloError::InvalidConfig("no rings".into())
            .to_string()
            .contains("no rings"));
        assert!(HaloError::Io("disk full".into())
            .to_string()
            .contains("disk full"));
    }

    #[test]
    fn halo_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HaloError>();
    }

    #[test]
    fn halo_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<HaloError>();
    }
}
