//! Path flattening and nonzero-winding scanline coverage.

use glam::DVec2;

/// Line segments used to approximate each quadratic curve.
pub const CURVE_SEGMENTS: usize = 16;

/// A path being built from canvas-style commands, stored as flattened
/// polylines. Every subpath is treated as closed when filled.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    subpaths: Vec<Vec<DVec2>>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every subpath.
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    pub fn move_to(&mut self, point: DVec2) {
        self.subpaths.push(vec![point]);
    }

    /// Appends a flattened quadratic. With no current point the curve starts
    /// at `ctrl`, as a canvas context does.
    pub fn quadratic_curve_to(&mut self, ctrl: DVec2, to: DVec2) {
        let from = match self.current() {
            Some(p) => p,
            None => {
                self.move_to(ctrl);
                ctrl
            }
        };
        if let Some(sub) = self.subpaths.last_mut() {
            sub.extend((1..=CURVE_SEGMENTS).map(|i| {
                let t = i as f64 / CURVE_SEGMENTS as f64;
                let u = 1.0 - t;
                from * (u * u) + ctrl * (2.0 * u * t) + to * (t * t)
            }));
        }
    }

    /// Closes the current subpath and starts a new one at its first point.
    pub fn close_path(&mut self) {
        if let Some(&start) = self.subpaths.last().and_then(|sub| sub.first()) {
            self.subpaths.push(vec![start]);
        }
    }

    pub fn subpaths(&self) -> &[Vec<DVec2>] {
        &self.subpaths
    }

    fn current(&self) -> Option<DVec2> {
        self.subpaths.last().and_then(|sub| sub.last()).copied()
    }

    /// Every edge of every subpath, including the implicit closing edge.
    fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.subpaths
            .iter()
            .filter(|sub| sub.len() >= 2)
            .flat_map(|sub| {
                let n = sub.len();
                (0..n).map(move |i| (sub[i], sub[(i + 1) % n]))
            })
    }

    /// Horizontal pixel spans covered under the nonzero rule, sampled at pixel
    /// centres, clipped to `width` x `height`. Yields `(row, x_start, x_end)`
    /// with `x_end` exclusive.
    pub fn spans(&self, width: usize, height: usize) -> Vec<(usize, usize, usize)> {
        let edges: Vec<(DVec2, DVec2)> = self.edges().filter(|(a, b)| a.y != b.y).collect();
        if edges.is_empty() {
            return Vec::new();
        }
        let (min_y, max_y) = edges.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (a, b)| {
            (lo.min(a.y).min(b.y), hi.max(a.y).max(b.y))
        });
        let first_row = (min_y - 0.5).ceil().max(0.0) as usize;
        let last_row = ((max_y - 0.5).floor().min(height as f64 - 1.0)).max(-1.0);
        if last_row < 0.0 {
            return Vec::new();
        }
        let last_row = last_row as usize;

        let mut spans = Vec::new();
        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for row in first_row..=last_row {
            let sy = row as f64 + 0.5;
            crossings.clear();
            for (a, b) in &edges {
                let (dir, lo, hi) = if a.y < b.y { (1, a, b) } else { (-1, b, a) };
                if sy >= lo.y && sy < hi.y {
                    let x = lo.x + (sy - lo.y) * (hi.x - lo.x) / (hi.y - lo.y);
                    crossings.push((x, dir));
                }
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let start = (pair[0].0 - 0.5).ceil().max(0.0);
                let end = (pair[1].0 - 0.5).ceil().min(width as f64);
                if end > start {
                    spans.push((row, start as usize, end as usize));
                }
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> PathBuilder {
        let mut p = PathBuilder::new();
        p.move_to(DVec2::new(x0, y0));
        // Degenerate quadratics (control on the segment) make straight edges.
        for (a, b) in [
            (DVec2::new(x0, y0), DVec2::new(x1, y0)),
            (DVec2::new(x1, y0), DVec2::new(x1, y1)),
            (DVec2::new(x1, y1), DVec2::new(x0, y1)),
        ] {
            p.quadratic_curve_to((a + b) * 0.5, b);
        }
        p.close_path();
        p
    }

    fn covered(spans: &[(usize, usize, usize)]) -> usize {
        spans.iter().map(|(_, s, e)| e - s).sum()
    }

    #[test]
    fn quadratic_ends_on_its_endpoint() {
        let mut p = PathBuilder::new();
        p.move_to(DVec2::ZERO);
        p.quadratic_curve_to(DVec2::new(10.0, 0.0), DVec2::new(10.0, 10.0));
        let sub = &p.subpaths()[0];
        assert_eq!(sub.len(), CURVE_SEGMENTS + 1);
        assert!(sub.last().unwrap().distance(DVec2::new(10.0, 10.0)) < 1e-12);
    }

    #[test]
    fn quadratic_without_current_point_starts_at_control() {
        let mut p = PathBuilder::new();
        p.quadratic_curve_to(DVec2::new(3.0, 4.0), DVec2::new(5.0, 6.0));
        assert_eq!(p.subpaths()[0][0], DVec2::new(3.0, 4.0));
    }

    #[test]
    fn close_path_starts_new_subpath_at_start() {
        let p = rect_path(1.0, 1.0, 3.0, 3.0);
        assert_eq!(p.subpaths().len(), 2);
        assert_eq!(p.subpaths()[1], vec![DVec2::new(1.0, 1.0)]);
    }

    #[test]
    fn rectangle_covers_its_pixel_centres() {
        let spans = rect_path(2.0, 2.0, 6.0, 5.0).spans(10, 10);
        assert_eq!(covered(&spans), 4 * 3);
        assert!(spans.iter().all(|&(row, s, e)| (2..5).contains(&row) && s == 2 && e == 6));
    }

    #[test]
    fn spans_are_clipped_to_the_surface() {
        let spans = rect_path(-5.0, -5.0, 20.0, 20.0).spans(8, 4);
        assert_eq!(covered(&spans), 8 * 4);
    }

    #[test]
    fn overlapping_same_direction_subpaths_use_nonzero_rule() {
        let mut p = rect_path(0.0, 0.0, 4.0, 4.0);
        let inner = rect_path(1.0, 1.0, 3.0, 3.0);
        for sub in inner.subpaths() {
            p.subpaths.push(sub.clone());
        }
        // Even-odd would leave a hole; nonzero fills the full 4x4.
        assert_eq!(covered(&p.spans(4, 4)), 16);
    }

    #[test]
    fn empty_or_offscreen_path_has_no_spans() {
        assert!(PathBuilder::new().spans(10, 10).is_empty());
        assert!(rect_path(0.0, 20.0, 5.0, 30.0).spans(10, 10).is_empty());
    }

    #[test]
    fn clear_drops_subpaths() {
        let mut p = rect_path(0.0, 0.0, 1.0, 1.0);
        p.clear();
        assert!(p.subpaths().is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spans_stay_inside_the_surface(
                x0 in -100.0_f64..100.0,
                y0 in -100.0_f64..100.0,
                w in 0.5_f64..150.0,
                h in 0.5_f64..150.0,
                width in 1_usize..64,
                height in 1_usize..64,
            ) {
                let spans = rect_path(x0, y0, x0 + w, y0 + h).spans(width, height);
                for (row, start, end) in spans {
                    prop_assert!(row < height);
                    prop_assert!(start < end && end <= width, "span {start}..{end} in width {width}");
                }
            }

            #[test]
            fn aligned_rectangle_covers_exactly_its_pixels(
                x0 in 0_u32..30,
                y0 in 0_u32..30,
                w in 1_u32..30,
                h in 1_u32..30,
            ) {
                let (x0, y0, w, h) = (x0 as f64, y0 as f64, w as f64, h as f64);
                let spans = rect_path(x0, y0, x0 + w, y0 + h).spans(64, 64);
                prop_assert_eq!(covered(&spans), (w * h) as usize);
            }
        }
    }
}
