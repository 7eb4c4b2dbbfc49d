//! Mask softening - Gaussian feather applied before compositing

use image::{imageops, GrayImage};

use super::MaskBitmap;

/// Gaussian sigma for the soften pass, roughly a 3 px feather at the
/// stroke edge.
pub const SOFTEN_SIGMA: f32 = 1.5;

/// Soften the mask's stroke edges for anti-aliasing.
///
/// The blur output keeps the mask's exact extent, so no bleed past the
/// original bounds is possible. Returns `None` for an empty mask; the
/// compositor skips the frame and keeps the last good one.
pub fn soften(mask: &MaskBitmap, sigma: f32) -> Option<GrayImage> {
    if mask.width() == 0 || mask.height() == 0 || !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }
    Some(imageops::blur(mask.image(), sigma))
}
