//! Logo decoding: the native display handle for the renderer.
//!
//! Raster formats go through `image`; SVG documents are rasterized at
//! their intrinsic size with `resvg`.

use image::{Rgba, RgbaImage};
use qrsmith_core::{HandleAllocator, LogoFile};
use resvg::{tiny_skia, usvg};

/// Errors that can occur when decoding an uploaded logo.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The uploaded file was empty.
    #[error("logo file is empty")]
    EmptyInput,

    /// The SVG document could not be parsed.
    #[error("failed to parse SVG logo: {0}")]
    Svg(#[from] usvg::Error),

    /// The SVG document has no drawable area, or one too large to rasterize.
    #[error("SVG logo has unusable dimensions {width}x{height}")]
    SvgSize {
        /// Intrinsic width, in pixels.
        width: u32,
        /// Intrinsic height, in pixels.
        height: u32,
    },

    /// The raster data could not be decoded.
    #[error("failed to decode logo: {0}")]
    Image(#[from] image::ImageError),
}

/// A decoded logo ready to be composited onto a symbol.
#[derive(Debug, Clone)]
pub struct LogoImage {
    image: RgbaImage,
}

impl LogoImage {
    /// Wrap an already decoded raster.
    #[must_use]
    pub const fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// The decoded pixels.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Decodes [`LogoFile`]s into [`LogoImage`] handles.
///
/// Releasing a handle just drops the decoded pixels.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogoDecoder;

impl LogoDecoder {
    /// Decode raw logo bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::EmptyInput`] for empty data,
    /// [`DecodeError::Svg`] or [`DecodeError::SvgSize`] for SVG files
    /// that cannot be rasterized, and [`DecodeError::Image`] for
    /// unrecognized or corrupt raster data.
    pub fn decode(name: &str, mime_type: &str, bytes: &[u8]) -> Result<LogoImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyInput);
        }
        let image = if is_svg(name, mime_type) {
            rasterize_svg(bytes)?
        } else {
            image::load_from_memory(bytes)?.to_rgba8()
        };
        Ok(LogoImage::new(image))
    }
}

/// Render an SVG document at its intrinsic size.
fn rasterize_svg(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())?;
    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    if width > crate::symbol::MAX_SIDE || height > crate::symbol::MAX_SIDE {
        return Err(DecodeError::SvgSize { width, height });
    }
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(DecodeError::SvgSize { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; `image` expects straight alpha.
    let mut image = RgbaImage::new(width, height);
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(image)
}

impl HandleAllocator for LogoDecoder {
    type Handle = LogoImage;
    type Error = DecodeError;

    fn acquire(&mut self, logo: &LogoFile) -> Result<LogoImage, DecodeError> {
        Self::decode(logo.name(), logo.mime_type(), logo.bytes())
    }

    fn release(&mut self, handle: LogoImage) {
        drop(handle);
    }
}

fn is_svg(name: &str, mime_type: &str) -> bool {
    mime_type.eq_ignore_ascii_case("image/svg+xml")
        || name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("svg"))
}
