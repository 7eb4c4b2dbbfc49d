//! Gesture tracker - smooths raw pointer samples into a quadratic curve path

use crate::geometry::Point;

use super::{QuadSegment, Stroke, StrokeMode};

/// Samples closer than this to the last accepted point are dropped.
///
/// Touch input is noisy; the threshold both denoises and keeps the
/// segment count of a slow gesture bounded.
pub const MOVE_THRESHOLD: f32 = 3.0;

/// Micro-segment emitted per accepted sample for live preview.
///
/// This is the straight line from the previous accepted sample to the
/// newest one, not part of the committed stroke geometry.
#[derive(Debug, Clone, Copy)]
pub struct LiveSegment {
    pub from: Point,
    pub to: Point,
}

/// Incremental smoother for one in-progress gesture.
///
/// Keeps a three-sample window (`current`, `prev1`, `prev2`) and, for
/// each accepted sample, appends a quadratic segment running between
/// the midpoints of the two most recent sample pairs with the middle
/// sample as control point. Consecutive segments therefore join with
/// matching tangents, which is what smooths the noisy polyline.
#[derive(Debug, Clone)]
pub struct StrokeTracker {
    current: Point,
    prev1: Point,
    prev2: Point,
    segments: Vec<QuadSegment>,
    mode: StrokeMode,
    width: f32,
    active: bool,
}

impl StrokeTracker {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self {
            current: Point::new(0.0, 0.0),
            prev1: Point::new(0.0, 0.0),
            prev2: Point::new(0.0, 0.0),
            segments: Vec::with_capacity(64),
            mode: StrokeMode::default(),
            width: 1.0,
            active: false,
        }
    }

    /// Start a new gesture at `start`, capturing the session's current
    /// tool mode and brush width for the whole stroke.
    pub fn begin(&mut self, start: Point, mode: StrokeMode, width: f32) {
        self.current = start;
        self.prev1 = start;
        self.prev2 = start;
        self.segments.clear();
        self.mode = mode;
        self.width = width;
        self.active = true;
    }

    /// Feed one raw pointer sample.
    ///
    /// Returns the live preview micro-segment when the sample was
    /// accepted, `None` when it was filtered out (idle tracker or
    /// movement below [`MOVE_THRESHOLD`]).
    pub fn update(&mut self, sample: Point) -> Option<LiveSegment> {
        if !self.active {
            return None;
        }
        if sample.distance_to(self.current) < MOVE_THRESHOLD {
            return None;
        }

        self.prev2 = self.prev1;
        self.prev1 = self.current;
        self.current = sample;

        self.segments.push(QuadSegment {
            from: self.prev1.midpoint(self.prev2),
            ctrl: self.prev1,
            to: self.current.midpoint(self.prev1),
        });

        Some(LiveSegment {
            from: self.prev1,
            to: self.current,
        })
    }

    /// End the gesture and freeze the path into a committed stroke.
    ///
    /// A gesture that never crossed the movement threshold has an empty
    /// path and yields `None`; the caller drops it silently.
    pub fn finish(&mut self) -> Option<Stroke> {
        if !self.active {
            return None;
        }
        self.active = false;

        if self.segments.is_empty() {
            return None;
        }

        Some(Stroke {
            segments: std::mem::take(&mut self.segments),
            mode: self.mode,
            width: self.width,
        })
    }

    /// Whether a gesture is currently in progress
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for StrokeTracker {
    fn default() -> Self {
        Self::new()
    }
}
