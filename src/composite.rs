//! Compositor - applies the softened mask to the source image(s)

use image::{imageops, imageops::FilterType, GrayImage, RgbaImage};

use crate::error::MaskError;
use crate::mask::{soften, MaskBitmap, SOFTEN_SIGMA};

/// Composite one frame.
///
/// Single-image mode (`background` is `None`): the mask becomes the
/// foreground's alpha channel, so erased regions reveal whatever the
/// embedder draws behind the view.
///
/// Two-image mode: the mask is the top layer's alpha and the bottom
/// layer is always fully opaque, so erased regions reveal the bottom
/// image instead.
///
/// The mask is softened first and, when its pixel extent differs from
/// the foreground's (two-image masks are view sized), resized to match
/// before per-pixel masking.
pub fn composite(
    foreground: &RgbaImage,
    background: Option<&RgbaImage>,
    mask: &MaskBitmap,
) -> Result<RgbaImage, MaskError> {
    let (fw, fh) = foreground.dimensions();
    if fw == 0 || fh == 0 {
        return Err(MaskError::EmptyExtent {
            width: fw,
            height: fh,
        });
    }

    let soft = soften(mask, SOFTEN_SIGMA).ok_or(MaskError::FilterFailed)?;
    let soft = fit_to(soft, fw, fh);

    let mut frame = foreground.clone();

    match background {
        None => {
            for (x, y, pixel) in frame.enumerate_pixels_mut() {
                let alpha = soft.get_pixel(x, y).0[0] as u16;
                pixel.0[3] = ((pixel.0[3] as u16 * alpha) / 255) as u8;
            }
        }
        Some(bottom) => {
            let bottom = if bottom.dimensions() == (fw, fh) {
                bottom.clone()
            } else {
                imageops::resize(bottom, fw, fh, FilterType::Nearest)
            };
            for (x, y, pixel) in frame.enumerate_pixels_mut() {
                let alpha =
                    (pixel.0[3] as u32 * soft.get_pixel(x, y).0[0] as u32) as f32 / (255.0 * 255.0);
                let under = bottom.get_pixel(x, y).0;
                for c in 0..3 {
                    let top = pixel.0[c] as f32;
                    pixel.0[c] = (top * alpha + under[c] as f32 * (1.0 - alpha))
                        .round()
                        .clamp(0.0, 255.0) as u8;
                }
                // Bottom layer fills the bounds, so the result is opaque
                pixel.0[3] = 255;
            }
        }
    }

    Ok(frame)
}

/// Resize the softened mask to the source's pixel extent when they differ
fn fit_to(mask: GrayImage, width: u32, height: u32) -> GrayImage {
    if mask.dimensions() == (width, height) {
        mask
    } else {
        imageops::resize(&mask, width, height, FilterType::Nearest)
    }
}
