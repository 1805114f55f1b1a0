//! PNG encoding of rendered surfaces.

use image::{ImageEncoder, RgbaImage};

/// PNG encoding failed.
#[derive(Debug, thiserror::Error)]
#[error("PNG encoding failed: {0}")]
pub struct EncodeError(#[from] image::ImageError);

/// Encode an RGBA raster as PNG bytes.
///
/// # Errors
///
/// Returns [`EncodeError`] if the encoder rejects the image.
pub fn encode_rgba(image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(png_bytes)
}
