//! # pc98bmp
//!
//! Decoder for uncompressed, indexed Windows BMP files and for bitmap fonts
//! stored as 8bpp sprite sheets.
//!
//! ## Stages
//!
//! Decoding is split into independent stages that each seek and read
//! against any `Read + Seek` source:
//!
//! - [`read_header`] — fixed-offset header fields and row geometry
//! - [`read_palette`] — the B,G,R colour table, as [`PaletteEntry`] values
//! - [`read_pixels`] — scanlines flipped to top-down order, padding removed
//! - [`extract_font`] — glyph tiles from a decoded 8bpp sheet
//!
//! [`ImageHandle`] and [`DecodeRequest`] run any subset of the image stages;
//! [`FontRequest`] goes from a file straight to a [`FontSheet`].
//!
//! ## Supported Files
//!
//! - 1, 4 and 8 bits per pixel, uncompressed (`BI_RGB`)
//! - 16bpp headers parse, but pixel decoding rejects them
//!
//! ## Non-Goals
//!
//! - Encoding
//! - RLE and bitfield compression
//! - Colour conversion; pixels stay palette indices
//! - Allocating a shared hardware palette. Callers that remap indices keep
//!   their own table and rewrite a copy of the pixels.
//!
//! ## Usage
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use pc98bmp::{FontRequest, read_image};
//!
//! let mut file = BufReader::new(File::open("background.bmp")?);
//! let image = read_image(&mut file)?;
//! let header = image.header().unwrap();
//! println!("{}x{} {}bpp", header.width, header.height, header.bits_per_pixel);
//!
//! let mut file = BufReader::new(File::open("font.bmp")?);
//! let font = FontRequest::new(8, 16).read(&mut file)?;
//! for row in font.glyph_rows(b'A') {
//!     println!("{row:?}");
//! }
//! # Ok::<(), pc98bmp::BmpError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;
mod pixel;

pub mod bmp;
pub mod font;

mod decode;

// Re-exports
pub use bmp::{
    BitmapHeader, MAX_PALETTE_ENTRIES, PaletteEntry, PixelBuffer, read_header, read_palette,
    read_pixels,
};
pub use decode::{DecodeRequest, HandleState, ImageHandle, read_image};
pub use error::BmpError;
pub use font::{FontRequest, FontSheet, Tile, extract_font};
pub use limits::Limits;
pub use pixel::BitDepth;
