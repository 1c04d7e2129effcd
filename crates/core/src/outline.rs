//! Perturbed blob outlines and the midpoint-quadratic smoothing that turns
//! them into an organic path.
//!
//! Given raw points `p[0..n]`, the smoothed path is
//!
//! ```text
//! MoveTo(p[0])
//! QuadTo { ctrl: p[i-1], to: mid(p[i-1], p[i]) }   for i in 1..n
//! Close
//! ```
//!
//! so every raw point except the first acts as a control point, and the
//! closing segment is a straight line from `mid(p[n-2], p[n-1])` back to `p[0]`.

use glam::DVec2;

use crate::surface::DrawSurface;

/// One step of a smoothed outline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    QuadTo { ctrl: DVec2, to: DVec2 },
    Close,
}

/// The ordered, closed ring of perturbed points around a blob.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    points: Vec<DVec2>,
}

impl Outline {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    /// Raw perturbed points in angle order.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The midpoint-quadratic path for this outline. Empty outlines yield no
    /// commands.
    pub fn smoothed_path(&self) -> Vec<PathCommand> {
        let Some(&first) = self.points.first() else {
            return Vec::new();
        };
        let mut path = Vec::with_capacity(self.points.len() + 1);
        path.push(PathCommand::MoveTo(first));
        path.extend(self.points.windows(2).map(|w| PathCommand::QuadTo {
            ctrl: w[0],
            to: (w[0] + w[1]) * 0.5,
        }));
        path.push(PathCommand::Close);
        path
    }

    /// Replays [`smoothed_path`](Self::smoothed_path) onto `surface`.
    ///
    /// Does not begin the path or fill it.
    pub fn trace<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for command in self.smoothed_path() {
            match command {
                PathCommand::MoveTo(p) => surface.move_to(p),
                PathCommand::QuadTo { ctrl, to } => surface.quadratic_curve_to(ctrl, to),
                PathCommand::Close => surface.close_path(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceOp};

    fn square() -> Outline {
        Outline::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
        ])
    }

    #[test]
    fn smoothed_path_uses_previous_point_as_control_and_midpoint_as_end() {
        let path = square().smoothed_path();
        assert_eq!(
            path,
            vec![
                PathCommand::MoveTo(DVec2::new(0.0, 0.0)),
                PathCommand::QuadTo {
                    ctrl: DVec2::new(0.0, 0.0),
                    to: DVec2::new(1.0, 0.0),
                },
                PathCommand::QuadTo {
                    ctrl: DVec2::new(2.0, 0.0),
                    to: DVec2::new(2.0, 1.0),
                },
                PathCommand::QuadTo {
                    ctrl: DVec2::new(2.0, 2.0),
                    to: DVec2::new(1.0, 2.0),
                },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn smoothed_path_has_one_curve_per_point_after_the_first() {
        let points: Vec<DVec2> = (0..32).map(|i| DVec2::new(i as f64, 0.0)).collect();
        let path = Outline::new(points).smoothed_path();
        assert_eq!(path.len(), 33);
        assert!(matches!(path[0], PathCommand::MoveTo(_)));
        assert!(matches!(path[32], PathCommand::Close));
    }

    #[test]
    fn empty_outline_has_no_path() {
        assert!(Outline::new(Vec::new()).smoothed_path().is_empty());
    }

    #[test]
    fn path_closes_from_last_midpoint_back_to_first_point() {
        let outline = square();
        let path = outline.smoothed_path();
        let n = outline.len();
        assert_eq!(path[0], PathCommand::MoveTo(outline.points()[0]));
        match path[path.len() - 2] {
            PathCommand::QuadTo { ctrl, to } => {
                assert_eq!(ctrl, outline.points()[n - 2]);
                assert_eq!(to, (outline.points()[n - 2] + outline.points()[n - 1]) * 0.5);
            }
            other => panic!("expected a curve before close, got {other:?}"),
        }
        assert_eq!(path[path.len() - 1], PathCommand::Close);
    }

    #[test]
    fn trace_replays_commands_on_surface() {
        let mut surface = RecordingSurface::new();
        square().trace(&mut surface);
        let ops = surface.ops();
        assert_eq!(ops.len(), 5);
        assert_eq!(ops[0], SurfaceOp::MoveTo(DVec2::ZERO));
        assert_eq!(
            ops[2],
            SurfaceOp::QuadraticCurveTo {
                ctrl: DVec2::new(2.0, 0.0),
                to: DVec2::new(2.0, 1.0),
            }
        );
        assert_eq!(ops[4], SurfaceOp::ClosePath);
    }
}
