//! Symbol rasterization.
//!
//! The `qrcode` crate supplies the module matrix. Everything after that
//! happens on a module grid (a `GrayImage`, one pixel per module, white =
//! dark module) and then on the output raster:
//!
//! 1. pad the grid with the quiet zone when a margin is requested
//! 2. excavate: clear every module touched by the centered logo rectangle
//! 3. sample the grid into a `size`x`size` RGBA image
//! 4. alpha-composite the logo, resized to the overlay dimensions

use image::imageops::FilterType;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use qrsmith_core::{EncodeSurface, Level, Overlay, RenderRequest, Renderer};

use crate::color::parse_hex_color;
use crate::logo::LogoImage;
use crate::png::{self, EncodeError};

/// Width of the quiet zone, in modules, drawn when a margin is requested.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Largest symbol or logo side, in pixels, the renderer will allocate.
pub const MAX_SIDE: u32 = 16_384;

const DARK: Luma<u8> = Luma([255]);
const LIGHT: Luma<u8> = Luma([0]);

/// Errors that can occur while rendering a symbol.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The requested size was zero pixels.
    #[error("symbol size must be at least 1 pixel")]
    ZeroSize,

    /// The symbol or logo is larger than [`MAX_SIDE`] pixels per side.
    #[error("{what} of {pixels} px exceeds the 16384 px limit")]
    TooLarge {
        /// Which dimension was too large.
        what: &'static str,
        /// The requested side length.
        pixels: u32,
    },

    /// The foreground color text is not a hex color.
    #[error("foreground color {0:?} is not a hex color")]
    Foreground(String),

    /// The background color text is not a hex color.
    #[error("background color {0:?} is not a hex color")]
    Background(String),

    /// The content does not fit in a symbol at the chosen tier.
    #[error("cannot encode content: {0}")]
    Encode(#[from] QrError),
}

/// A rendered symbol: the visual surface exported as PNG.
#[derive(Debug, Clone)]
pub struct RenderedSymbol {
    image: RgbaImage,
    modules: u32,
}

impl RenderedSymbol {
    /// The rendered pixels.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Modules per side of the symbol, quiet zone excluded.
    #[must_use]
    pub const fn modules(&self) -> u32 {
        self.modules
    }

    /// Consume the symbol and return its pixels.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl EncodeSurface for RenderedSymbol {
    type Error = EncodeError;

    fn encode_png(&self) -> Result<Vec<u8>, EncodeError> {
        png::encode_rgba(&self.image)
    }
}

/// Renders QR symbols with optional quiet zone and logo overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrRenderer {
    quiet_zone: u32,
}

impl QrRenderer {
    /// A renderer with the standard four-module quiet zone.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quiet_zone: QUIET_ZONE_MODULES,
        }
    }

    /// Override the quiet-zone width used when a margin is requested.
    #[must_use]
    pub const fn with_quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for QrRenderer {
    type Handle = LogoImage;
    type Surface = RenderedSymbol;
    type Error = RenderError;

    fn render(
        &self,
        request: &RenderRequest<'_, LogoImage>,
    ) -> Result<RenderedSymbol, RenderError> {
        if request.size == 0 {
            return Err(RenderError::ZeroSize);
        }
        check_side("size", request.size)?;
        if let Some(overlay) = &request.overlay {
            check_side("logo width", overlay.width)?;
            check_side("logo height", overlay.height)?;
        }
        let fg = parse_hex_color(request.fg_color)
            .map_err(|_| RenderError::Foreground(request.fg_color.to_owned()))?;
        let bg = parse_hex_color(request.bg_color)
            .map_err(|_| RenderError::Background(request.bg_color.to_owned()))?;

        let code = QrCode::with_error_correction_level(
            request.content.as_bytes(),
            ec_level(request.level),
        )?;
        #[allow(clippy::cast_possible_truncation)] // at most 177 modules per side
        let modules = code.width() as u32;

        let margin = if request.include_margin {
            self.quiet_zone
        } else {
            0
        };
        let mut grid = module_grid(&code, modules, margin);

        if let Some(overlay) = &request.overlay
            && overlay.excavate
        {
            excavate(&mut grid, request.size, overlay.width, overlay.height);
        }

        let mut image = rasterize(&grid, request.size, fg, bg);

        if let Some(overlay) = &request.overlay {
            composite_logo(&mut image, overlay);
        }

        tracing::debug!(
            modules,
            size = request.size,
            level = %request.level,
            logo = request.overlay.is_some(),
            "rendered symbol"
        );

        Ok(RenderedSymbol { image, modules })
    }
}

const fn check_side(what: &'static str, pixels: u32) -> Result<(), RenderError> {
    if pixels > MAX_SIDE {
        return Err(RenderError::TooLarge { what, pixels });
    }
    Ok(())
}

const fn ec_level(level: Level) -> EcLevel {
    match level {
        Level::L => EcLevel::L,
        Level::M => EcLevel::M,
        Level::Q => EcLevel::Q,
        Level::H => EcLevel::H,
    }
}

/// Build the module grid, padded by `margin` light modules on each side.
fn module_grid(code: &QrCode, modules: u32, margin: u32) -> GrayImage {
    let colors = code.to_colors();
    let cells = modules + 2 * margin;
    GrayImage::from_fn(cells, cells, |x, y| {
        let (Some(mx), Some(my)) = (x.checked_sub(margin), y.checked_sub(margin)) else {
            return LIGHT;
        };
        if mx >= modules || my >= modules {
            return LIGHT;
        }
        match colors[(my * modules + mx) as usize] {
            qrcode::Color::Dark => DARK,
            qrcode::Color::Light => LIGHT,
        }
    })
}

/// Clear every module that the centered `width`x`height` pixel rectangle
/// touches, so the logo never sits on top of partial modules.
fn excavate(grid: &mut GrayImage, size: u32, width: u32, height: u32) {
    if width == 0 || height == 0 {
        return;
    }
    let cells = f64::from(grid.width());
    let scale = cells / f64::from(size);
    let w = f64::from(width) * scale;
    let h = f64::from(height) * scale;
    let x = (cells - w) / 2.0;
    let y = (cells - h) / 2.0;

    let x0 = x.floor().max(0.0);
    let y0 = y.floor().max(0.0);
    let x1 = (x + w).ceil().min(cells);
    let y1 = (y + h).ceil().min(cells);
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
    draw_filled_rect_mut(grid, rect, LIGHT);
}

/// Sample the module grid into a `size`x`size` image.
fn rasterize(grid: &GrayImage, size: u32, fg: Rgba<u8>, bg: Rgba<u8>) -> RgbaImage {
    let cells = u64::from(grid.width());
    let size64 = u64::from(size);
    RgbaImage::from_fn(size, size, |x, y| {
        #[allow(clippy::cast_possible_truncation)] // < cells
        let (cx, cy) = (
            (u64::from(x) * cells / size64) as u32,
            (u64::from(y) * cells / size64) as u32,
        );
        if *grid.get_pixel(cx, cy) == DARK { fg } else { bg }
    })
}

/// Draw the logo, resized to the overlay dimensions, at the center.
fn composite_logo(image: &mut RgbaImage, overlay: &Overlay<'_, LogoImage>) {
    if overlay.width == 0 || overlay.height == 0 {
        return;
    }
    let logo = image::imageops::resize(
        overlay.handle.image(),
        overlay.width,
        overlay.height,
        FilterType::Triangle,
    );
    let x = (i64::from(image.width()) - i64::from(overlay.width)) / 2;
    let y = (i64::from(image.height()) - i64::from(overlay.height)) / 2;
    image::imageops::overlay(image, &logo, x, y);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn request(content: &str) -> RenderRequest<'_, LogoImage> {
        RenderRequest {
            content,
            size: 300,
            fg_color: "#000000",
            bg_color: "#FFFFFF",
            level: Level::H,
            include_margin: true,
            overlay: None,
        }
    }

    fn solid_logo(color: Rgba<u8>) -> LogoImage {
        LogoImage::new(RgbaImage::from_pixel(8, 8, color))
    }

    /// Pixel box `[x0, x1) x [y0, y1)` as an iterator of pixels.
    fn pixels_in(
        image: &RgbaImage,
        x0: u32,
        y0: u32,
        x1: u32,
        y1: u32,
    ) -> impl Iterator<Item = Rgba<u8>> + '_ {
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| *image.get_pixel(x, y)))
    }

    #[test]
    fn output_is_exactly_size_by_size() {
        for size in [100, 300, 333, 1000] {
            let req = RenderRequest {
                size,
                ..request("hello")
            };
            let symbol = QrRenderer::new().render(&req).unwrap();
            assert_eq!(symbol.image().dimensions(), (size, size));
        }
    }

    #[test]
    fn margin_corners_are_background() {
        let symbol = QrRenderer::new().render(&request("hello")).unwrap();
        let img = symbol.image();
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(299, 0), WHITE);
        assert_eq!(*img.get_pixel(0, 299), WHITE);
    }

    #[test]
    fn without_margin_finder_pattern_touches_corner() {
        let req = RenderRequest {
            include_margin: false,
            ..request("hello")
        };
        let symbol = QrRenderer::new().render(&req).unwrap();
        assert_eq!(*symbol.image().get_pixel(0, 0), BLACK);
        assert_eq!(*symbol.image().get_pixel(299, 0), BLACK);
    }

    #[test]
    fn colors_are_applied() {
        let req = RenderRequest {
            fg_color: "#f00",
            bg_color: "#00ff00",
            include_margin: false,
            ..request("hello")
        };
        let symbol = QrRenderer::new().render(&req).unwrap();
        let img = symbol.image();
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert!(img.pixels().all(|p| *p == Rgba([255, 0, 0, 255]) || *p == Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn invalid_colors_are_reported() {
        let req = RenderRequest {
            fg_color: "black",
            ..request("hello")
        };
        assert!(matches!(
            QrRenderer::new().render(&req),
            Err(RenderError::Foreground(ref c)) if c == "black"
        ));

        let req = RenderRequest {
            bg_color: "#12",
            ..request("hello")
        };
        assert!(matches!(
            QrRenderer::new().render(&req),
            Err(RenderError::Background(_))
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        let req = RenderRequest {
            size: 0,
            ..request("hello")
        };
        assert!(matches!(
            QrRenderer::new().render(&req),
            Err(RenderError::ZeroSize)
        ));
    }

    #[test]
    fn oversized_symbol_is_rejected_before_allocating() {
        let req = RenderRequest {
            size: 70_000,
            ..request("hello")
        };
        assert!(matches!(
            QrRenderer::new().render(&req),
            Err(RenderError::TooLarge {
                what: "size",
                pixels: 70_000
            })
        ));

        let at_limit = RenderRequest {
            size: MAX_SIDE + 1,
            ..request("hello")
        };
        assert!(QrRenderer::new().render(&at_limit).is_err());
    }

    #[test]
    fn oversized_logo_is_rejected() {
        let logo = solid_logo(Rgba([255, 0, 0, 255]));
        let req = RenderRequest {
            overlay: Some(Overlay {
                handle: &logo,
                excavate: true,
                width: 50,
                height: 1_000_000,
            }),
            ..request("abc")
        };
        let err = QrRenderer::new().render(&req).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TooLarge {
                what: "logo height",
                ..
            }
        ));
        assert!(err.to_string().contains("1000000 px"));
    }

    #[test]
    fn higher_tier_needs_more_modules() {
        let content = "https://example.com/some/forty/char/path";
        let low = QrRenderer::new()
            .render(&RenderRequest {
                level: Level::L,
                ..request(content)
            })
            .unwrap();
        let high = QrRenderer::new().render(&request(content)).unwrap();
        assert!(high.modules() > low.modules());
    }

    #[test]
    fn oversized_content_fails_to_encode() {
        let content = "x".repeat(3000);
        assert!(matches!(
            QrRenderer::new().render(&request(&content)),
            Err(RenderError::Encode(_))
        ));
    }

    #[test]
    fn opaque_logo_covers_center() {
        let red = Rgba([255, 0, 0, 255]);
        let logo = solid_logo(red);
        let req = RenderRequest {
            overlay: Some(Overlay {
                handle: &logo,
                excavate: true,
                width: 50,
                height: 50,
            }),
            ..request("hello")
        };
        let symbol = QrRenderer::new().render(&req).unwrap();
        let img = symbol.image();
        assert!(pixels_in(img, 125, 125, 175, 175).all(|p| p == red));
        assert_ne!(*img.get_pixel(124, 150), red);
        assert_ne!(*img.get_pixel(175, 150), red);
    }

    #[test]
    fn excavation_clears_modules_under_transparent_logo() {
        let logo = solid_logo(Rgba([0, 0, 0, 0]));
        let req = RenderRequest {
            overlay: Some(Overlay {
                handle: &logo,
                excavate: true,
                width: 60,
                height: 60,
            }),
            ..request("https://calpa.me/")
        };
        let symbol = QrRenderer::new().render(&req).unwrap();
        assert!(pixels_in(symbol.image(), 120, 120, 180, 180).all(|p| p == WHITE));
    }

    #[test]
    fn no_excavation_leaves_modules_in_place() {
        let logo = solid_logo(Rgba([0, 0, 0, 0]));
        let plain = QrRenderer::new().render(&request("https://calpa.me/")).unwrap();
        let req = RenderRequest {
            overlay: Some(Overlay {
                handle: &logo,
                excavate: false,
                width: 60,
                height: 60,
            }),
            ..request("https://calpa.me/")
        };
        let overlaid = QrRenderer::new().render(&req).unwrap();
        assert_eq!(plain.image().as_raw(), overlaid.image().as_raw());
    }

    #[test]
    fn zero_sized_overlay_draws_nothing() {
        let logo = solid_logo(Rgba([255, 0, 0, 255]));
        let plain = QrRenderer::new().render(&request("abc")).unwrap();
        let req = RenderRequest {
            overlay: Some(Overlay {
                handle: &logo,
                excavate: true,
                width: 0,
                height: 0,
            }),
            ..request("abc")
        };
        let overlaid = QrRenderer::new().render(&req).unwrap();
        assert_eq!(plain.image().as_raw(), overlaid.image().as_raw());
    }

    #[test]
    fn logo_larger_than_symbol_is_clipped() {
        let logo = solid_logo(Rgba([0, 0, 255, 255]));
        let req = RenderRequest {
            size: 100,
            overlay: Some(Overlay {
                handle: &logo,
                excavate: true,
                width: 150,
                height: 150,
            }),
            ..request("abc")
        };
        let symbol = QrRenderer::new().render(&req).unwrap();
        assert_eq!(symbol.image().dimensions(), (100, 100));
        assert!(symbol.image().pixels().all(|p| *p == Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn custom_quiet_zone() {
        let req = RenderRequest {
            include_margin: true,
            ..request("hello")
        };
        let bare = QrRenderer::new().with_quiet_zone(0).render(&req).unwrap();
        assert_eq!(*bare.image().get_pixel(0, 0), BLACK);
    }

    #[test]
    fn surface_encodes_to_png() {
        let symbol = QrRenderer::new().render(&request("hello")).unwrap();
        let png = symbol.encode_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (300, 300));
        assert_eq!(decoded.as_raw(), symbol.image().as_raw());
    }
}
