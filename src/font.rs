//! Fixed-grid bitmap fonts carved out of 8bpp sprite sheets.
//!
//! A sheet is a grid of equally sized cells. Cells are numbered left to
//! right, then top to bottom; cell 0 holds the glyph for
//! [`FontSheet::ascii_start`]. Remainder strips to the right or below the
//! last full cell are ignored.

use std::io::{Read, Seek};

use log::{debug, trace, warn};

use crate::bmp::{self, BitmapHeader, PixelBuffer};
use crate::error::BmpError;
use crate::limits::Limits;

/// Largest glyph width or height, in pixels.
pub const MAX_GLYPH_DIM: usize = 16;
/// Most symbols a font table holds.
pub const MAX_SYMBOLS: usize = 96;
/// ASCII code of symbol 0 unless told otherwise (space).
pub const DEFAULT_ASCII_START: u8 = b' ';

/// One glyph cell, indexed `[row][col]`. Cells past the glyph size are 0.
pub type Tile = [[u8; MAX_GLYPH_DIM]; MAX_GLYPH_DIM];

/// Glyph tiles extracted from a sprite sheet, plus the ASCII mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSheet {
    glyph_width: u8,
    glyph_height: u8,
    ascii_start: u8,
    symbol_count: u8,
    unknown_symbol: u8,
    columns: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

/// The `'?'` cell for a table starting at `ascii_start`, else symbol 0.
fn default_unknown_symbol(ascii_start: u8, symbol_count: u8) -> u8 {
    match b'?'.checked_sub(ascii_start) {
        Some(q) if q < symbol_count => q,
        _ => 0,
    }
}

impl FontSheet {
    /// Remap symbol 0 to `ascii_start` and pick the fallback symbol.
    pub fn with_ascii_mapping(
        mut self,
        ascii_start: u8,
        unknown_symbol: u8,
    ) -> Result<Self, BmpError> {
        if unknown_symbol >= self.symbol_count {
            return Err(BmpError::FontTableOverflow {
                symbols: usize::from(unknown_symbol) + 1,
                max: usize::from(self.symbol_count),
            });
        }
        self.ascii_start = ascii_start;
        self.unknown_symbol = unknown_symbol;
        Ok(self)
    }

    pub fn glyph_width(&self) -> u8 {
        self.glyph_width
    }

    pub fn glyph_height(&self) -> u8 {
        self.glyph_height
    }

    /// ASCII code mapped to symbol 0.
    pub fn ascii_start(&self) -> u8 {
        self.ascii_start
    }

    pub fn symbol_count(&self) -> u8 {
        self.symbol_count
    }

    /// Symbol drawn for bytes outside the table.
    pub fn unknown_symbol(&self) -> u8 {
        self.unknown_symbol
    }

    /// Glyph columns in the sheet.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Glyph rows in the sheet.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, symbol: usize) -> Option<&Tile> {
        self.tiles.get(symbol)
    }

    /// Symbol for an ASCII byte, or [`unknown_symbol`](Self::unknown_symbol())
    /// when the byte falls outside the table.
    pub fn symbol_index(&self, byte: u8) -> usize {
        match byte.checked_sub(self.ascii_start) {
            Some(offset) if offset < self.symbol_count => usize::from(offset),
            _ => usize::from(self.unknown_symbol),
        }
    }

    /// The tile drawn for `byte`. `None` only after [`release`](Self::release),
    /// since extraction never yields an empty table.
    pub fn glyph(&self, byte: u8) -> Option<&Tile> {
        self.tile(self.symbol_index(byte))
    }

    /// Rows of the glyph for `byte`, trimmed to the glyph size.
    pub fn glyph_rows(&self, byte: u8) -> impl Iterator<Item = &[u8]> {
        let width = usize::from(self.glyph_width);
        self.glyph(byte)
            .into_iter()
            .flat_map(|tile| tile.iter())
            .take(usize::from(self.glyph_height))
            .map(move |row| &row[..width])
    }

    /// Drop the tile storage. Calling it again is a no-op.
    pub fn release(&mut self) {
        self.tiles = Vec::new();
    }
}

/// Carve a decoded 8bpp sheet into `glyph_width` x `glyph_height` tiles.
pub fn extract_font(
    header: &BitmapHeader,
    pixels: &PixelBuffer,
    glyph_width: u8,
    glyph_height: u8,
) -> Result<FontSheet, BmpError> {
    if header.bits_per_pixel != 8 {
        return Err(BmpError::UnsupportedBitDepth(header.bits_per_pixel));
    }
    let (gw, gh) = (usize::from(glyph_width), usize::from(glyph_height));
    if gw == 0 || gh == 0 || gw > MAX_GLYPH_DIM || gh > MAX_GLYPH_DIM {
        return Err(BmpError::UnsupportedFontDimensions {
            width: glyph_width,
            height: glyph_height,
        });
    }

    let width = usize::try_from(header.width).unwrap_or(0);
    let height = usize::try_from(header.height).unwrap_or(0);
    let columns = width / gw;
    let rows = height / gh;
    let symbols = columns.saturating_mul(rows);
    if symbols == 0 {
        // The sheet is smaller than a single glyph.
        return Err(BmpError::UnsupportedFontDimensions {
            width: glyph_width,
            height: glyph_height,
        });
    }
    if symbols > MAX_SYMBOLS {
        return Err(BmpError::FontTableOverflow {
            symbols,
            max: MAX_SYMBOLS,
        });
    }
    if width % gw != 0 || height % gh != 0 {
        warn!(
            "font sheet {}x{} is not a multiple of {}x{}, ignoring the remainder",
            width, height, gw, gh
        );
    }

    let stride = header.row_stride_unpadded as usize;
    let source = pixels.as_bytes();
    let needed = stride * height;
    if stride < width || source.len() < needed {
        return Err(BmpError::BufferTooSmall {
            needed,
            actual: source.len(),
        });
    }

    debug!("font sheet holds {rows} rows of {columns} glyphs ({symbols} symbols)");
    let mut tiles = vec![[[0u8; MAX_GLYPH_DIM]; MAX_GLYPH_DIM]; symbols];
    let mut cells = tiles.iter_mut();
    for glyph_row in 0..rows {
        trace!("decoding glyph row {glyph_row}");
        for glyph_col in 0..columns {
            let Some(tile) = cells.next() else { break };
            for (row, dest) in tile.iter_mut().take(gh).enumerate() {
                let start = (glyph_row * gh + row) * stride + glyph_col * gw;
                dest[..gw].copy_from_slice(&source[start..start + gw]);
            }
        }
    }

    // `symbols` is at most MAX_SYMBOLS, so this fits.
    let symbol_count = symbols as u8;
    Ok(FontSheet {
        glyph_width,
        glyph_height,
        ascii_start: DEFAULT_ASCII_START,
        symbol_count,
        unknown_symbol: default_unknown_symbol(DEFAULT_ASCII_START, symbol_count),
        columns,
        rows,
        tiles,
    })
}

/// Loads a font straight from a BMP source.
///
/// Reads the header and pixels, extracts the tiles, then drops the image.
#[derive(Clone, Debug)]
pub struct FontRequest<'a> {
    glyph_width: u8,
    glyph_height: u8,
    ascii_start: u8,
    unknown_symbol: Option<u8>,
    limits: Option<&'a Limits>,
}

impl<'a> FontRequest<'a> {
    pub fn new(glyph_width: u8, glyph_height: u8) -> Self {
        Self {
            glyph_width,
            glyph_height,
            ascii_start: DEFAULT_ASCII_START,
            unknown_symbol: None,
            limits: None,
        }
    }

    pub fn ascii_start(mut self, ascii_start: u8) -> Self {
        self.ascii_start = ascii_start;
        self
    }

    pub fn unknown_symbol(mut self, symbol: u8) -> Self {
        self.unknown_symbol = Some(symbol);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn read<R: Read + Seek>(&self, source: &mut R) -> Result<FontSheet, BmpError> {
        let header = bmp::read_header(source)?;
        if let Some(limits) = self.limits {
            limits.check_header(&header)?;
        }
        let pixels = bmp::read_pixels(source, &header)?;
        let font = extract_font(&header, &pixels, self.glyph_width, self.glyph_height)?;
        drop(pixels);

        let unknown = self
            .unknown_symbol
            .unwrap_or_else(|| default_unknown_symbol(self.ascii_start, font.symbol_count));
        font.with_ascii_mapping(self.ascii_start, unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// 8bpp header for a `width` x `height` sheet stored at byte 4.
    fn sheet_header(width: i32, height: i32) -> BitmapHeader {
        let stride = width as u32;
        BitmapHeader {
            width,
            height,
            bits_per_pixel: 8,
            bytes_per_pixel: 1,
            palette_offset: 4,
            pixel_data_offset: 4,
            row_stride_unpadded: stride,
            row_stride_padded: stride.next_multiple_of(4),
            pixel_buffer_size: stride * height as u32,
            pixel_count: (width * height) as u32,
            ..Default::default()
        }
    }

    /// Decode a sheet whose top-down pixel at (x, y) is `f(x, y)`.
    fn sheet(
        width: i32,
        height: i32,
        f: impl Fn(usize, usize) -> u8,
    ) -> (BitmapHeader, PixelBuffer) {
        let header = sheet_header(width, height);
        let padded = header.row_stride_padded as usize;
        let mut file = vec![0u8; 4];
        for y in (0..height as usize).rev() {
            let start = file.len();
            file.extend((0..width as usize).map(|x| f(x, y)));
            file.resize(start + padded, 0);
        }
        let pixels = bmp::read_pixels(&mut Cursor::new(file), &header).unwrap();
        (header, pixels)
    }

    #[test]
    fn ninety_six_by_sixteen_gives_twelve_symbols() {
        let (header, pixels) = sheet(96, 16, |x, _| (x / 8) as u8);
        let font = extract_font(&header, &pixels, 8, 16).unwrap();
        assert_eq!(font.symbol_count(), 12);
        assert_eq!(font.columns(), 12);
        assert_eq!(font.rows(), 1);
        assert_eq!(font.tiles().len(), 12);
        for (s, tile) in font.tiles().iter().enumerate() {
            assert!(tile.iter().all(|row| row[..8].iter().all(|&p| p == s as u8)));
            assert!(tile.iter().all(|row| row[8..].iter().all(|&p| p == 0)));
        }
    }

    #[test]
    fn symbols_run_row_major() {
        // Each pixel encodes its glyph cell: column in the low nibble, row in the high.
        let (header, pixels) = sheet(24, 16, |x, y| ((y / 8) << 4 | (x / 8)) as u8);
        let font = extract_font(&header, &pixels, 8, 8).unwrap();
        assert_eq!((font.columns(), font.rows()), (3, 2));
        let firsts: Vec<u8> = font.tiles().iter().map(|t| t[0][0]).collect();
        assert_eq!(firsts, [0x00, 0x01, 0x02, 0x10, 0x11, 0x12]);
    }

    #[test]
    fn symbol_zero_is_top_left_cell() {
        let (header, pixels) = sheet(16, 8, |x, y| (y * 16 + x) as u8);
        let font = extract_font(&header, &pixels, 4, 4).unwrap();
        let tile = font.tile(0).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(tile[row][col], (row * 16 + col) as u8);
            }
        }
        let again = extract_font(&header, &pixels, 4, 4).unwrap();
        assert_eq!(font, again);
    }

    #[test]
    fn remainder_strips_are_ignored() {
        let (header, pixels) = sheet(20, 11, |x, y| (x + y) as u8);
        let font = extract_font(&header, &pixels, 8, 5).unwrap();
        assert_eq!((font.columns(), font.rows()), (2, 2));
        assert_eq!(font.symbol_count(), 4);
        assert_eq!(font.tile(3).unwrap()[4][7], (15 + 9) as u8);
    }

    #[test]
    fn too_many_symbols_overflow() {
        let (header, pixels) = sheet(104, 8, |_, _| 0);
        assert!(matches!(
            extract_font(&header, &pixels, 1, 8),
            Err(BmpError::FontTableOverflow { symbols: 104, max: 96 })
        ));
        let (header, pixels) = sheet(96, 8, |_, _| 0);
        assert_eq!(extract_font(&header, &pixels, 1, 8).unwrap().symbol_count(), 96);
    }

    #[test]
    fn glyph_dimensions_are_bounded() {
        let (header, pixels) = sheet(32, 32, |_, _| 0);
        for (w, h) in [(17, 8), (8, 17), (0, 8), (8, 0)] {
            assert!(matches!(
                extract_font(&header, &pixels, w, h),
                Err(BmpError::UnsupportedFontDimensions { .. })
            ));
        }
        assert!(extract_font(&header, &pixels, 16, 16).is_ok());
    }

    #[test]
    fn sheet_smaller_than_a_glyph_is_rejected() {
        let (header, pixels) = sheet(6, 16, |_, _| 0);
        assert!(matches!(
            extract_font(&header, &pixels, 8, 8),
            Err(BmpError::UnsupportedFontDimensions { width: 8, height: 8 })
        ));
    }

    #[test]
    fn default_fallback_tracks_ascii_start() {
        assert_eq!(default_unknown_symbol(b' ', 96), 31);
        assert_eq!(default_unknown_symbol(b'!', 96), 30);
        assert_eq!(default_unknown_symbol(b' ', 31), 0);
        assert_eq!(default_unknown_symbol(b'A', 26), 0);
    }

    #[test]
    fn only_eight_bit_sheets() {
        let (mut header, pixels) = sheet(16, 16, |_, _| 0);
        header.bits_per_pixel = 4;
        assert!(matches!(
            extract_font(&header, &pixels, 8, 8),
            Err(BmpError::UnsupportedBitDepth(4))
        ));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let (_, pixels) = sheet(8, 8, |_, _| 0);
        let header = sheet_header(8, 16);
        assert!(matches!(
            extract_font(&header, &pixels, 8, 8),
            Err(BmpError::BufferTooSmall { needed: 128, actual: 64 })
        ));
    }

    #[test]
    fn ascii_lookup() {
        let (header, pixels) = sheet(96 * 2, 2, |x, _| (x / 2) as u8);
        let font = extract_font(&header, &pixels, 2, 2).unwrap();
        assert_eq!(font.ascii_start(), b' ');
        assert_eq!(font.unknown_symbol(), b'?' - b' ');
        assert_eq!(font.symbol_index(b' '), 0);
        assert_eq!(font.symbol_index(b'A'), 33);
        assert_eq!(font.symbol_index(b' ' + 95), 95);
        assert_eq!(font.symbol_index(b' ' + 96), 31);
        assert_eq!(font.symbol_index(b'\n'), 31);
        assert_eq!(font.glyph(b'A').unwrap()[1][1], 33);

        let rows: Vec<&[u8]> = font.glyph_rows(b'B').collect();
        assert_eq!(rows, [&[34u8, 34][..], &[34, 34][..]]);
    }

    #[test]
    fn small_font_falls_back_to_symbol_zero() {
        let (header, pixels) = sheet(16, 8, |_, _| 1);
        let font = extract_font(&header, &pixels, 8, 8).unwrap();
        assert_eq!(font.unknown_symbol(), 0);
        assert_eq!(font.symbol_index(b'z'), 0);
    }

    #[test]
    fn ascii_mapping_is_validated() {
        let (header, pixels) = sheet(16, 8, |_, _| 1);
        let font = extract_font(&header, &pixels, 8, 8).unwrap();
        let remapped = font.clone().with_ascii_mapping(b'0', 1).unwrap();
        assert_eq!(remapped.symbol_index(b'1'), 1);
        assert_eq!(remapped.symbol_index(b'2'), 1);
        assert!(matches!(
            font.with_ascii_mapping(b'0', 2),
            Err(BmpError::FontTableOverflow { .. })
        ));
    }

    #[test]
    fn release_is_idempotent() {
        let (header, pixels) = sheet(16, 8, |_, _| 1);
        let mut font = extract_font(&header, &pixels, 8, 8).unwrap();
        font.release();
        font.release();
        assert!(font.tiles().is_empty());
        assert!(font.glyph(b' ').is_none());
        assert_eq!(font.glyph_rows(b' ').count(), 0);
    }
}
