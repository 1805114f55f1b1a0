//! qrsmith-render: QR symbol rasterizer (sans-IO).
//!
//! Implements [`qrsmith_core::Renderer`] on top of the `qrcode` crate's
//! module matrix:
//!
//! module matrix -> optional quiet zone -> optional excavation ->
//! rasterize to `size`x`size` RGBA -> optional logo composite.
//!
//! Logos are decoded once per upload by [`LogoDecoder`], which serves as
//! the preview adapter's display-handle allocator. Surfaces encode to PNG
//! via [`qrsmith_core::EncodeSurface`].

pub mod color;
pub mod logo;
pub mod png;
pub mod symbol;

pub use color::{ColorError, parse_hex_color};
pub use logo::{DecodeError, LogoDecoder, LogoImage};
pub use png::EncodeError;
pub use symbol::{MAX_SIDE, QUIET_ZONE_MODULES, QrRenderer, RenderError, RenderedSymbol};
