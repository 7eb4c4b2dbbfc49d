//! Session controller - orchestrates gesture, history, mask and composite
//!
//! Single-threaded by design: every operation runs to completion on the
//! caller's context before the next is accepted. Failures (empty
//! extent, missing source, degenerate gesture, filter failure) are
//! absorbed here and logged; the worst observable effect is a stale
//! frame, never an error surfaced to the embedder.

use image::RgbaImage;

use crate::composite::composite;
use crate::geometry::Point;
use crate::history::StrokeHistory;
use crate::mask::{paint_live_segment, replay, MaskBitmap};
use crate::stroke::{StrokeMode, StrokeTracker};

/// Outbound undo/redo-availability notification
pub type HistoryListener = Box<dyn FnMut(bool, bool)>;

/// One mask-editing session over one or two source images.
///
/// Owns the tool state, the stroke history, the authoritative mask and
/// the last composited frame. The embedder feeds pointer samples into
/// `begin_stroke`/`continue_stroke`/`end_stroke` and reads frames back
/// out of [`MaskSession::composited`].
pub struct MaskSession {
    view_width: u32,
    view_height: u32,
    mode: StrokeMode,
    brush_width: f32,
    foreground: Option<RgbaImage>,
    background: Option<RgbaImage>,
    history: StrokeHistory,
    tracker: StrokeTracker,
    mask: Option<MaskBitmap>,
    frame: Option<RgbaImage>,
    listener: Option<HistoryListener>,
    notified: (bool, bool),
}

impl MaskSession {
    /// Create an unconfigured session. `view_width`/`view_height` are
    /// the embedding view's bounds, used as the mask extent in
    /// two-image mode.
    pub fn new(view_width: u32, view_height: u32) -> Self {
        Self {
            view_width,
            view_height,
            mode: StrokeMode::default(),
            brush_width: 20.0,
            foreground: None,
            background: None,
            history: StrokeHistory::new(),
            tracker: StrokeTracker::new(),
            mask: None,
            frame: None,
            listener: None,
            notified: (false, false),
        }
    }

    /// (Re)initialize the session with one or two source images.
    ///
    /// Derives the mask extent (single-image: foreground pixel size,
    /// two-image: view bounds), allocates a fresh full-white mask,
    /// clears the history and recomposites. The previous mask is
    /// dropped before the new one is allocated. A zero extent leaves
    /// the session unconfigured; every later operation is then a no-op.
    pub fn configure(&mut self, foreground: RgbaImage, background: Option<RgbaImage>) {
        let (mask_w, mask_h) = if background.is_some() {
            (self.view_width, self.view_height)
        } else {
            foreground.dimensions()
        };

        self.foreground = Some(foreground);
        self.background = background;
        self.history.reset();
        self.tracker = StrokeTracker::new();
        self.frame = None;
        self.mask = None;

        match MaskBitmap::opaque(mask_w, mask_h) {
            Ok(mask) => {
                tracing::info!(width = mask_w, height = mask_h, "session configured");
                self.mask = Some(mask);
                self.recomposite();
            }
            Err(err) => {
                tracing::warn!("configure left session unconfigured: {err}");
            }
        }

        self.notify();
    }

    /// Swap the foreground image, preserving the current background
    /// mode. Re-runs configure, so history is cleared along with the
    /// old mask.
    pub fn change_source(&mut self, foreground: RgbaImage) {
        let background = self.background.take();
        self.configure(foreground, background);
    }

    /// Set the tool mode, effective from the next gesture
    pub fn set_mode(&mut self, mode: StrokeMode) {
        self.mode = mode;
    }

    /// Set the brush width, effective from the next gesture.
    /// Non-positive or non-finite widths are rejected.
    pub fn set_brush_width(&mut self, width: f32) {
        if !width.is_finite() || width <= 0.0 {
            tracing::warn!(width, "ignoring invalid brush width");
            return;
        }
        self.brush_width = width;
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    pub fn brush_width(&self) -> f32 {
        self.brush_width
    }

    /// Register the undo/redo-availability listener. Called once with
    /// the current availability whenever it changes.
    pub fn set_history_listener(&mut self, listener: impl FnMut(bool, bool) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of committed strokes
    pub fn stroke_count(&self) -> usize {
        self.history.len()
    }

    /// Authoritative mask, if the session is configured
    pub fn mask(&self) -> Option<&MaskBitmap> {
        self.mask.as_ref()
    }

    /// Last good composited frame
    pub fn composited(&self) -> Option<&RgbaImage> {
        self.frame.as_ref()
    }

    /// Pointer down: start a gesture with the current tool settings
    pub fn begin_stroke(&mut self, at: Point) {
        if self.mask.is_none() {
            return;
        }
        self.tracker.begin(at, self.mode, self.brush_width);
    }

    /// Pointer move: feed the tracker and, when the sample is accepted,
    /// paint the live micro-segment for immediate feedback. Preview
    /// only; the full replay at gesture end is authoritative.
    pub fn continue_stroke(&mut self, at: Point) {
        let Some(live) = self.tracker.update(at) else {
            return;
        };
        let Some(mask) = self.mask.as_mut() else {
            return;
        };
        paint_live_segment(mask, &live, self.mode, self.brush_width);
        self.recomposite();
    }

    /// Pointer up: commit the finished stroke and rebuild the mask from
    /// history. A gesture that never crossed the movement threshold is
    /// dropped without touching history or firing the listener.
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.tracker.finish() else {
            tracing::debug!("degenerate gesture dropped");
            return;
        };
        self.history.commit(stroke);
        self.rebuild_mask();
        self.notify();
    }

    /// Undo the most recent stroke. Returns whether anything happened.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        tracing::debug!(remaining = self.history.len(), "undo");
        self.rebuild_mask();
        self.notify();
        true
    }

    /// Redo the most recently undone stroke. Returns whether anything
    /// happened.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        tracing::debug!(remaining = self.history.len(), "redo");
        self.rebuild_mask();
        self.notify();
        true
    }

    /// Clear the whole history and return the mask to full visibility
    pub fn reset(&mut self) {
        self.history.reset();
        self.rebuild_mask();
        self.notify();
    }

    /// Full replay into a fresh bitmap; the old one is dropped first
    fn rebuild_mask(&mut self) {
        let Some(old) = self.mask.take() else {
            return;
        };
        let (w, h) = (old.width(), old.height());
        drop(old);
        self.mask = replay(self.history.strokes(), w, h);
        self.recomposite();
    }

    fn recomposite(&mut self) {
        let Some(foreground) = self.foreground.as_ref() else {
            return;
        };
        let Some(mask) = self.mask.as_ref() else {
            return;
        };
        match composite(foreground, self.background.as_ref(), mask) {
            Ok(frame) => self.frame = Some(frame),
            Err(err) => {
                // Keep the last good frame on screen
                tracing::warn!("composite skipped: {err}");
            }
        }
    }

    fn notify(&mut self) {
        let availability = (self.history.can_undo(), self.history.can_redo());
        if availability == self.notified {
            return;
        }
        self.notified = availability;
        if let Some(listener) = self.listener.as_mut() {
            listener(availability.0, availability.1);
        }
    }
}
