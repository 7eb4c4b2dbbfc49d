//! Mask module - single-channel visibility mask and its rasterizer

mod blur;
mod painter;

pub use blur::{soften, SOFTEN_SIGMA};
pub use painter::{paint_live_segment, paint_stroke, replay};

use image::{GrayImage, Luma};

use crate::error::MaskError;

/// Mask value for fully visible pixels
pub const VISIBLE: u8 = 255;
/// Mask value for fully erased pixels
pub const ERASED: u8 = 0;

/// Owned single-channel visibility mask.
///
/// White is fully visible, black fully erased; intermediate values only
/// appear after softening. The extent is fixed for the lifetime of one
/// session configuration; full replay always produces a fresh bitmap
/// rather than mutating an old one, so the preview painter is the only
/// code that writes into a live mask.
#[derive(Debug, Clone)]
pub struct MaskBitmap {
    pixels: GrayImage,
}

impl MaskBitmap {
    /// Allocate a fully visible mask. Refuses an empty extent.
    pub fn opaque(width: u32, height: u32) -> Result<Self, MaskError> {
        if width == 0 || height == 0 {
            return Err(MaskError::EmptyExtent { width, height });
        }
        Ok(Self {
            pixels: GrayImage::from_pixel(width, height, Luma([VISIBLE])),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Mask value at a pixel; out-of-bounds reads as erased
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return ERASED;
        }
        self.pixels.get_pixel(x, y).0[0]
    }

    /// Borrow the raster for compositing/softening
    pub fn image(&self) -> &GrayImage {
        &self.pixels
    }

    pub(crate) fn image_mut(&mut self) -> &mut GrayImage {
        &mut self.pixels
    }
}
