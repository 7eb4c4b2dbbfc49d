//! Stroke module - the committed stroke data model and the live gesture tracker

mod tracker;

pub use tracker::{LiveSegment, StrokeTracker, MOVE_THRESHOLD};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Tool mode for a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeMode {
    /// Increase transparency along the stroke (reveal what is behind)
    #[default]
    Erase,
    /// Restore opacity along the stroke (reveal the foreground again)
    Draw,
}

/// One smoothed quadratic Bézier segment of a stroke path
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuadSegment {
    /// Segment start point
    pub from: Point,
    /// Bézier control point
    pub ctrl: Point,
    /// Segment end point
    pub to: Point,
}

impl QuadSegment {
    /// Evaluate the curve at parameter `t` in [0, 1]
    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let a = u * u;
        let b = 2.0 * u * t;
        let c = t * t;
        Point {
            x: a * self.from.x + b * self.ctrl.x + c * self.to.x,
            y: a * self.from.y + b * self.ctrl.y + c * self.to.y,
        }
    }

    /// Upper bound on curve length: chord via the control polygon.
    ///
    /// A quadratic Bézier never exceeds its control polygon, which is
    /// all the rasterizer needs to pick a flattening step count.
    pub fn polygon_length(&self) -> f32 {
        self.from.distance_to(self.ctrl) + self.ctrl.distance_to(self.to)
    }
}

/// One committed gesture: smoothed path, tool mode and brush width.
///
/// Immutable once created; owned by exactly one of the history's two
/// stacks at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    /// Ordered smoothed curve segments
    pub segments: Vec<QuadSegment>,
    /// Tool mode captured at gesture start
    pub mode: StrokeMode,
    /// Brush width in pixels, captured at gesture start
    pub width: f32,
}

impl Stroke {
    /// Whether the stroke carries no geometry (degenerate gesture)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_segment_endpoints() {
        let seg = QuadSegment {
            from: Point::new(0.0, 0.0),
            ctrl: Point::new(5.0, 10.0),
            to: Point::new(10.0, 0.0),
        };
        let start = seg.point_at(0.0);
        let end = seg.point_at(1.0);
        assert_eq!(start.x, 0.0);
        assert_eq!(start.y, 0.0);
        assert_eq!(end.x, 10.0);
        assert_eq!(end.y, 0.0);
    }

    #[test]
    fn test_quad_segment_midpoint_pull() {
        let seg = QuadSegment {
            from: Point::new(0.0, 0.0),
            ctrl: Point::new(5.0, 10.0),
            to: Point::new(10.0, 0.0),
        };
        // At t=0.5 the curve sits halfway between chord and control point
        let mid = seg.point_at(0.5);
        assert_eq!(mid.x, 5.0);
        assert_eq!(mid.y, 5.0);
    }

    #[test]
    fn test_polygon_length_bounds_chord() {
        let seg = QuadSegment {
            from: Point::new(0.0, 0.0),
            ctrl: Point::new(5.0, 10.0),
            to: Point::new(10.0, 0.0),
        };
        assert!(seg.polygon_length() >= seg.from.distance_to(seg.to));
    }

    #[test]
    fn test_default_mode_is_erase() {
        assert_eq!(StrokeMode::default(), StrokeMode::Erase);
    }
}
