//! Premultiplied pixel math shared by the rasterizer and the exporters.

use halo_core::color::Rgba;

/// A premultiplied RGBA pixel, components in [0, 1].
pub type Pixel = [f64; 4];

/// Composites `src` over `dst` (Porter-Duff source-over, premultiplied).
pub fn source_over(dst: Pixel, src: Pixel) -> Pixel {
    let keep = 1.0 - src[3];
    [
        src[0] + dst[0] * keep,
        src[1] + dst[1] * keep,
        src[2] + dst[2] * keep,
        src[3] + dst[3] * keep,
    ]
}

/// Interpolates two colors at `t` in premultiplied space, as canvas
/// gradients do, so a transparent stop does not darken its neighbour.
pub fn mix_premultiplied(a: Rgba, b: Rgba, t: f64) -> Pixel {
    let (pa, pb) = (a.premultiplied(), b.premultiplied());
    std::array::from_fn(|i| pa[i] + (pb[i] - pa[i]) * t)
}

/// Converts a premultiplied pixel back to a straight-alpha color.
pub fn unpremultiply(p: Pixel) -> Rgba {
    let a = p[3];
    if a <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    Rgba {
        r: (p[0] / a).clamp(0.0, 1.0),
        g: (p[1] / a).clamp(0.0, 1.0),
        b: (p[2] / a).clamp(0.0, 1.0),
        a: a.clamp(0.0, 1.0),
    }
}

/// Packs premultiplied pixels into a straight-alpha RGBA8 buffer of length
/// `pixels.len() * 4`.
pub fn to_rgba8(pixels: &[Pixel]) -> Vec<u8> {
    let quantize = |c: f64| (c * 255.0).round() as u8;
    pixels
        .iter()
        .flat_map(|&p| {
            let c = unpremultiply(p);
            [quantize(c.r), quantize(c.g), quantize(c.b), quantize(c.a)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_over_opaque_replaces_destination() {
        let dst = [0.2, 0.3, 0.4, 1.0];
        let src = [1.0, 0.0, 0.0, 1.0];
        assert_eq!(source_over(dst, src), src);
    }

    #[test]
    fn source_over_accumulates_alpha() {
        let half = [0.5, 0.0, 0.0, 0.5];
        let once = source_over([0.0; 4], half);
        let twice = source_over(once, half);
        assert!((twice[3] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn mix_with_transparent_stop_keeps_hue() {
        let clear = Rgba::from_rgba8(5, 215, 243, 0.0);
        let violet = Rgba::from_rgba8(123, 16, 230, 0.79);
        let mid = unpremultiply(mix_premultiplied(clear, violet, 0.5));
        assert!((mid.r - violet.r).abs() < 1e-12);
        assert!((mid.a - 0.395).abs() < 1e-12);
    }

    #[test]
    fn to_rgba8_has_four_bytes_per_pixel() {
        let buf = to_rgba8(&[[0.0; 4], [0.5, 0.25, 0.0, 0.5]]);
        assert_eq!(buf.len(), 8);
        assert_eq!(&buf[0..4], &[0, 0, 0, 0]);
        assert_eq!(&buf[4..8], &[255, 128, 0, 128]);
    }
}
