//! Mask rasterizer - strokes smoothed paths onto the visibility mask
//!
//! Stroking is done by stamping filled discs along the flattened curve,
//! which gives round caps and round joins for free. Edges stay hard
//! here; anti-aliasing comes from the soften pass before compositing.

use image::Luma;

use crate::geometry::Point;
use crate::stroke::{LiveSegment, Stroke, StrokeMode};

use super::{MaskBitmap, ERASED, VISIBLE};

/// Flattening step length in pixels. Stamps half this far apart leave
/// no visible scalloping at any brush width above 1 px.
const FLATTEN_STEP: f32 = 1.0;

/// Full replay: rebuild the authoritative mask from a blank canvas.
///
/// Replays `strokes` bottom to top onto a fresh fully visible bitmap.
/// Fails only when the extent is empty, which callers treat as
/// "unconfigured, do nothing".
pub fn replay(strokes: &[Stroke], width: u32, height: u32) -> Option<MaskBitmap> {
    let mut mask = match MaskBitmap::opaque(width, height) {
        Ok(mask) => mask,
        Err(err) => {
            tracing::warn!("mask replay skipped: {err}");
            return None;
        }
    };

    for stroke in strokes {
        paint_stroke(&mut mask, stroke);
    }

    Some(mask)
}

/// Stroke one committed path onto the mask with round caps
pub fn paint_stroke(mask: &mut MaskBitmap, stroke: &Stroke) {
    let value = mode_value(stroke.mode);
    let radius = stroke.width * 0.5;

    for segment in &stroke.segments {
        let steps = (segment.polygon_length() / FLATTEN_STEP).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            stamp_disc(mask, segment.point_at(t), radius, value);
        }
    }
}

/// Preview-only incremental update: stroke just the newest micro-segment
/// onto the live mask. Never authoritative; the full replay at gesture
/// end supersedes whatever this drew.
pub fn paint_live_segment(mask: &mut MaskBitmap, live: &LiveSegment, mode: StrokeMode, width: f32) {
    let value = mode_value(mode);
    let radius = width * 0.5;

    let length = live.from.distance_to(live.to);
    let steps = (length / FLATTEN_STEP).ceil().max(1.0) as usize;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let p = Point {
            x: live.from.x + (live.to.x - live.from.x) * t,
            y: live.from.y + (live.to.y - live.from.y) * t,
        };
        stamp_disc(mask, p, radius, value);
    }
}

fn mode_value(mode: StrokeMode) -> u8 {
    match mode {
        StrokeMode::Draw => VISIBLE,
        StrokeMode::Erase => ERASED,
    }
}

/// Stamp one filled disc, clipped to the mask extent
fn stamp_disc(mask: &mut MaskBitmap, center: Point, radius: f32, value: u8) {
    let radius = radius.max(0.5);
    let r2 = radius * radius;

    let width = mask.width() as i32;
    let height = mask.height() as i32;

    let left = ((center.x - radius).floor() as i32).max(0);
    let top = ((center.y - radius).floor() as i32).max(0);
    let right = ((center.x + radius).ceil() as i32).min(width - 1);
    let bottom = ((center.y + radius).ceil() as i32).min(height - 1);

    let pixels = mask.image_mut();
    for y in top..=bottom {
        let dy = y as f32 + 0.5 - center.y;
        for x in left..=right {
            let dx = x as f32 + 0.5 - center.x;
            if dx * dx + dy * dy <= r2 {
                pixels.put_pixel(x as u32, y as u32, Luma([value]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::QuadSegment;

    fn vertical_stroke(mode: StrokeMode) -> Stroke {
        // Straight line from (10,10) to (10,50), as the tracker would
        // smooth it from evenly spaced samples
        Stroke {
            segments: vec![QuadSegment {
                from: Point::new(10.0, 10.0),
                ctrl: Point::new(10.0, 30.0),
                to: Point::new(10.0, 50.0),
            }],
            mode,
            width: 20.0,
        }
    }

    #[test]
    fn test_replay_empty_history_is_all_white() {
        let mask = replay(&[], 100, 100).unwrap();
        assert!(mask.image().pixels().all(|p| p.0[0] == VISIBLE));
    }

    #[test]
    fn test_replay_zero_extent_is_none() {
        assert!(replay(&[], 0, 100).is_none());
        assert!(replay(&[], 100, 0).is_none());
    }

    #[test]
    fn test_erase_stroke_punches_transparency() {
        let mask = replay(&[vertical_stroke(StrokeMode::Erase)], 100, 100).unwrap();
        assert_eq!(mask.alpha_at(10, 30), ERASED);
        // Well outside the 20 px brush stays visible
        assert_eq!(mask.alpha_at(60, 30), VISIBLE);
    }

    #[test]
    fn test_draw_stroke_restores_visibility() {
        let erase = vertical_stroke(StrokeMode::Erase);
        let mut draw = vertical_stroke(StrokeMode::Draw);
        draw.width = 30.0;

        let mask = replay(&[erase, draw], 100, 100).unwrap();
        assert_eq!(mask.alpha_at(10, 30), VISIBLE);
    }

    #[test]
    fn test_replay_order_matters() {
        // Draw first, then erase on top: the erase wins
        let mask = replay(
            &[
                vertical_stroke(StrokeMode::Draw),
                vertical_stroke(StrokeMode::Erase),
            ],
            100,
            100,
        )
        .unwrap();
        assert_eq!(mask.alpha_at(10, 30), ERASED);
    }

    #[test]
    fn test_round_caps_extend_past_endpoints() {
        let mask = replay(&[vertical_stroke(StrokeMode::Erase)], 100, 100).unwrap();
        // Cap reaches half a brush width above the start point
        assert_eq!(mask.alpha_at(10, 4), ERASED);
        assert_eq!(mask.alpha_at(10, 56), ERASED);
    }

    #[test]
    fn test_stamp_clips_to_extent() {
        let mut mask = MaskBitmap::opaque(20, 20).unwrap();
        // Center outside the bitmap; only the overlapping part lands
        stamp_disc(&mut mask, Point::new(-2.0, 10.0), 5.0, ERASED);
        assert_eq!(mask.alpha_at(0, 10), ERASED);
        assert_eq!(mask.alpha_at(10, 10), VISIBLE);
    }

    #[test]
    fn test_live_segment_matches_committed_look() {
        // A straight stroke painted incrementally must cover the same
        // core pixels as the committed replay does
        let mut live_mask = MaskBitmap::opaque(100, 100).unwrap();
        paint_live_segment(
            &mut live_mask,
            &LiveSegment {
                from: Point::new(10.0, 10.0),
                to: Point::new(10.0, 50.0),
            },
            StrokeMode::Erase,
            20.0,
        );

        let replayed = replay(&[vertical_stroke(StrokeMode::Erase)], 100, 100).unwrap();
        assert_eq!(live_mask.alpha_at(10, 30), replayed.alpha_at(10, 30));
        assert_eq!(live_mask.alpha_at(10, 30), ERASED);
    }

    #[test]
    fn test_flatten_step_leaves_no_gaps() {
        let mask = replay(&[vertical_stroke(StrokeMode::Erase)], 100, 100).unwrap();
        for y in 10..=50 {
            assert_eq!(mask.alpha_at(10, y), ERASED, "gap at y={y}");
        }
    }
}
