//! History store - two-stack undo/redo over committed strokes

use crate::stroke::Stroke;

/// Ordered undo and redo stacks of committed strokes.
///
/// The `undone` stack, bottom to top, is always exactly the sequence of
/// strokes that rebuilds the authoritative mask from a blank canvas.
/// A stroke is owned by exactly one stack at a time; `undo`/`redo`
/// move it between them without cloning.
#[derive(Debug, Default)]
pub struct StrokeHistory {
    undone: Vec<Stroke>,
    redone: Vec<Stroke>,
}

impl StrokeHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a committed stroke. Discards the redo branch: once a new
    /// stroke lands after an undo, the undone strokes are gone for good.
    pub fn commit(&mut self, stroke: Stroke) {
        self.undone.push(stroke);
        self.redone.clear();
    }

    /// Move the most recent stroke onto the redo stack.
    /// Returns whether anything happened.
    pub fn undo(&mut self) -> bool {
        match self.undone.pop() {
            Some(stroke) => {
                self.redone.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone stroke back onto the undo stack.
    /// Returns whether anything happened.
    pub fn redo(&mut self) -> bool {
        match self.redone.pop() {
            Some(stroke) => {
                self.undone.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Drop both stacks
    pub fn reset(&mut self) {
        self.undone.clear();
        self.redone.clear();
    }

    /// Strokes to replay, bottom to top
    pub fn strokes(&self) -> &[Stroke] {
        &self.undone
    }

    pub fn can_undo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redone.is_empty()
    }

    /// Number of committed strokes
    pub fn len(&self) -> usize {
        self.undone.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeMode;

    fn stroke() -> Stroke {
        Stroke {
            segments: vec![],
            mode: StrokeMode::Erase,
            width: 20.0,
        }
    }

    #[test]
    fn test_commit_grows_undo_stack() {
        let mut history = StrokeHistory::new();
        assert!(!history.can_undo());

        history.commit(stroke());
        history.commit(stroke());

        assert_eq!(history.len(), 2);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_moves_stroke_to_redo_stack() {
        let mut history = StrokeHistory::new();
        history.commit(stroke());

        assert!(history.undo());
        assert_eq!(history.len(), 0);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = StrokeHistory::new();
        assert!(!history.undo());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_redo_is_inverse_of_undo() {
        let mut history = StrokeHistory::new();
        history.commit(stroke());
        history.commit(stroke());

        history.undo();
        assert!(history.redo());

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_discards_redo_branch() {
        let mut history = StrokeHistory::new();
        history.commit(stroke());
        history.undo();
        assert!(history.can_redo());

        history.commit(stroke());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_reset_clears_both_stacks() {
        let mut history = StrokeHistory::new();
        history.commit(stroke());
        history.commit(stroke());
        history.undo();

        history.reset();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.is_empty());
    }

    #[test]
    fn test_undo_beyond_depth_never_panics() {
        let mut history = StrokeHistory::new();
        history.commit(stroke());
        for _ in 0..10 {
            history.undo();
        }
        assert!(!history.can_undo());
        assert_eq!(history.strokes().len(), 0);
    }
}
