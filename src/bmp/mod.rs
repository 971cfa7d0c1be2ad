//! Uncompressed, indexed BMP decoding in three independent stages.
//!
//! [`read_header`] must run first; [`read_palette`] and [`read_pixels`] each
//! take its result and may be called in either order, or not at all.

mod header;
mod palette;
mod pixels;
mod utils;

pub use header::{BitmapHeader, read_header};
pub use palette::{MAX_PALETTE_ENTRIES, PaletteEntry, read_palette};
pub use pixels::{PixelBuffer, read_pixels};
