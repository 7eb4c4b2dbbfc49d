use thiserror::Error;

/// Errors raised by the mask engine's internal seams.
///
/// None of these cross the session boundary: the session absorbs them
/// and keeps the last good state (see the failure policy on
/// [`crate::session::MaskSession`]).
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("mask extent is empty: {width}x{height}")]
    EmptyExtent { width: u32, height: u32 },

    #[error("mask softening produced no output")]
    FilterFailed,
}
