//! Fixed-offset BMP header fields and derived row geometry.

use std::io::{Read, Seek};

use log::{debug, trace};

use super::utils::{read_i32_at, read_u16_at, read_u32_at};
use crate::error::BmpError;
use crate::pixel::BitDepth;

// ── Field offsets ───────────────────────────────────────────────────

/// Offset of the pixel array, from the start of the file.
const DATA_OFFSET_OFFSET: u64 = 0x0A;
/// Start of the DIB header; its first field is the DIB header size.
const DIB_HEADER_OFFSET: u32 = 0x0E;
const WIDTH_OFFSET: u64 = 0x12;
const HEIGHT_OFFSET: u64 = 0x16;
const BITS_PER_PIXEL_OFFSET: u64 = 0x1C;
const COMPRESSION_OFFSET: u64 = 0x1E;
const COLOUR_COUNT_OFFSET: u64 = 0x2E;

/// `BI_RGB`.
const UNCOMPRESSED: i32 = 0;

// ── Header ──────────────────────────────────────────────────────────

/// Header fields of an uncompressed, indexed BMP plus derived geometry.
///
/// The all-zero [`Default`] value stands for "no header loaded"; the palette
/// and pixel readers reject it with [`BmpError::HeaderNotLoaded`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitmapHeader {
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
    pub compression: i32,
    pub dib_header_size: u32,
    /// Start of the colour table: `0x0E + dib_header_size`.
    pub palette_offset: u32,
    pub pixel_data_offset: u32,
    pub colour_count: u32,
    /// `bits_per_pixel >> 3`; zero for 1bpp and 4bpp.
    pub bytes_per_pixel: u16,
    /// Row size in the file, rounded up to a multiple of 4 bytes.
    pub row_stride_padded: u32,
    /// Row size in the decoded buffer.
    pub row_stride_unpadded: u32,
    pub pixel_buffer_size: u32,
    pub pixel_count: u32,
}

impl BitmapHeader {
    /// Bit depth, if the header holds one of the accepted depths.
    pub fn depth(&self) -> Option<BitDepth> {
        BitDepth::from_bits(self.bits_per_pixel)
    }

    /// Whether this header came out of [`read_header`] rather than `Default`.
    pub fn is_loaded(&self) -> bool {
        self.palette_offset != 0 && self.pixel_data_offset != 0
    }

    /// Padding bytes at the end of every file row.
    pub fn row_padding(&self) -> u32 {
        self.row_stride_padded.saturating_sub(self.row_stride_unpadded)
    }

    /// Fill in the derived fields from width, height and depth.
    fn derive_geometry(&mut self, depth: BitDepth) -> Result<(), BmpError> {
        let (w, h) = (self.width, self.height);
        let invalid = || BmpError::InvalidDimensions {
            width: w,
            height: h,
        };
        if w <= 0 || h <= 0 {
            return Err(invalid());
        }
        let (width, height) = (w as u32, h as u32);

        let unpadded = depth.row_bytes(width).ok_or_else(invalid)?;
        let padded = unpadded.checked_next_multiple_of(4).ok_or_else(invalid)?;
        let size = unpadded.checked_mul(height).ok_or_else(invalid)?;
        let count = width.checked_mul(height).ok_or_else(invalid)?;

        self.bytes_per_pixel = depth.bytes_per_pixel();
        self.row_stride_unpadded = unpadded;
        self.row_stride_padded = padded;
        self.pixel_buffer_size = size;
        self.pixel_count = count;
        Ok(())
    }
}

/// Read the header fields at their fixed offsets and derive row geometry.
///
/// Each field is fetched with its own seek and read, so files whose DIB
/// header is longer than `BITMAPINFOHEADER` still parse.
pub fn read_header<R: Read + Seek>(source: &mut R) -> Result<BitmapHeader, BmpError> {
    let mut header = BitmapHeader {
        pixel_data_offset: read_u32_at(source, DATA_OFFSET_OFFSET)?,
        dib_header_size: read_u32_at(source, u64::from(DIB_HEADER_OFFSET))?,
        ..Default::default()
    };
    header.palette_offset = DIB_HEADER_OFFSET
        .checked_add(header.dib_header_size)
        .ok_or_else(|| {
            BmpError::InvalidHeader(alloc::format!(
                "DIB header size {} puts the colour table past 4 GiB",
                header.dib_header_size
            ))
        })?;
    header.width = read_i32_at(source, WIDTH_OFFSET)?;
    header.height = read_i32_at(source, HEIGHT_OFFSET)?;

    header.bits_per_pixel = read_u16_at(source, BITS_PER_PIXEL_OFFSET)?;
    let depth = header
        .depth()
        .ok_or(BmpError::UnsupportedBitDepth(header.bits_per_pixel))?;

    header.colour_count = read_u32_at(source, COLOUR_COUNT_OFFSET)?;
    header.compression = read_i32_at(source, COMPRESSION_OFFSET)?;
    if header.compression != UNCOMPRESSED {
        return Err(BmpError::CompressedNotSupported(header.compression));
    }

    header.derive_geometry(depth)?;

    trace!("DIB header size: {}", header.dib_header_size);
    trace!("Resolution: {}x{}", header.width, header.height);
    trace!("Colour depth: {}bpp", header.bits_per_pixel);
    trace!("Colour count: {}", header.colour_count);
    trace!("Colour table @ {:#x}", header.palette_offset);
    trace!("Pixel data @ {:#x}", header.pixel_data_offset);
    debug!(
        "bitmap header loaded: {}x{} {}bpp, row {} bytes ({} padded), {} bytes of pixels",
        header.width,
        header.height,
        header.bits_per_pixel,
        header.row_stride_unpadded,
        header.row_stride_padded,
        header.pixel_buffer_size
    );

    Ok(header)
}
