//! Bottom-up, row-padded scanline decoding into a top-down buffer.

use std::io::{self, Read, Seek, SeekFrom};

use log::{debug, trace};

use super::header::BitmapHeader;
use super::utils::expand_bits_to_byte;
use crate::error::BmpError;
use crate::pixel::BitDepth;

/// Decoded pixel rows, top row first, `stride` bytes per row with no padding.
///
/// Bytes are palette indices. At 1bpp and 4bpp they stay packed as in the
/// file (leftmost pixel in the high bits); see [`PixelBuffer::to_indices`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    stride: usize,
    height: usize,
}

impl PixelBuffer {
    /// All rows back to back.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes per decoded row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row `r`, counted from the top of the image.
    pub fn row(&self, r: usize) -> Option<&[u8]> {
        let start = r.checked_mul(self.stride)?;
        self.data.get(start..start + self.stride)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.stride)
    }

    /// One palette index per byte, `header.width` bytes per row.
    ///
    /// 8bpp buffers are copied as is.
    pub fn to_indices(&self, header: &BitmapHeader) -> Result<Vec<u8>, BmpError> {
        let depth = header
            .depth()
            .filter(BitDepth::is_indexed)
            .ok_or(BmpError::UnsupportedBitDepth(header.bits_per_pixel))?;
        let width = usize::try_from(header.width).unwrap_or(0);
        let needed = width
            .checked_mul(self.height)
            .ok_or(BmpError::InvalidDimensions {
                width: header.width,
                height: header.height,
            })?;

        if depth == BitDepth::Eight {
            if self.stride < width {
                return Err(BmpError::BufferTooSmall {
                    needed,
                    actual: self.data.len(),
                });
            }
            let mut out = Vec::with_capacity(needed);
            for row in self.rows() {
                out.extend_from_slice(&row[..width]);
            }
            return Ok(out);
        }

        let mut out = vec![0u8; needed];
        if width == 0 {
            return Ok(out);
        }
        for (src, dst) in self.rows().zip(out.chunks_exact_mut(width)) {
            expand_bits_to_byte(usize::from(depth.bits()), src, dst);
        }
        Ok(out)
    }

    /// Borrow an 8bpp buffer as a 2-D image of palette indices.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self, header: &BitmapHeader) -> Result<imgref::ImgRef<'_, u8>, BmpError> {
        if header.bits_per_pixel != 8 {
            return Err(BmpError::UnsupportedBitDepth(header.bits_per_pixel));
        }
        let width = usize::try_from(header.width).unwrap_or(0);
        if width > self.stride {
            return Err(BmpError::BufferTooSmall {
                needed: width * self.height,
                actual: self.data.len(),
            });
        }
        Ok(imgref::ImgRef::new_stride(
            &self.data,
            width,
            self.height,
            self.stride,
        ))
    }
}

/// Read every scanline and return the rows top-down with the padding removed.
///
/// 16bpp headers are accepted by [`read_header`](super::read_header) but fail
/// here with [`BmpError::UnsupportedBitDepth`] once the rows have been read.
pub fn read_pixels<R: Read + Seek>(
    source: &mut R,
    header: &BitmapHeader,
) -> Result<PixelBuffer, BmpError> {
    if header.pixel_data_offset == 0 {
        return Err(BmpError::HeaderNotLoaded);
    }

    let stride = header.row_stride_unpadded as usize;
    let height = usize::try_from(header.height).unwrap_or(0);
    let size = header.pixel_buffer_size as usize;
    if stride == 0 || height == 0 || stride.checked_mul(height) != Some(size) {
        return Err(BmpError::InvalidDimensions {
            width: header.width,
            height: header.height,
        });
    }

    let mut data = Vec::new();
    data.try_reserve_exact(size)
        .map_err(|_| BmpError::OutOfMemory { bytes: size })?;
    data.resize(size, 0);

    let padding = i64::from(header.row_padding());
    if padding != 0 {
        debug!("skipping {padding} padding bytes per row");
    }

    source.seek(SeekFrom::Start(u64::from(header.pixel_data_offset)))?;

    // File rows run bottom to top, so walk the destination from its last row.
    for (file_row, dest) in data.rchunks_exact_mut(stride).enumerate() {
        source.read_exact(dest).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => BmpError::TruncatedPixelData {
                row: file_row,
                expected: stride,
            },
            _ => BmpError::Io(e),
        })?;
        if padding != 0 {
            source.seek(SeekFrom::Current(padding))?;
        }
    }
    trace!("read {height} rows of {stride} bytes");

    match header.depth() {
        Some(depth) if depth.is_indexed() => Ok(PixelBuffer {
            data,
            stride,
            height,
        }),
        _ => Err(BmpError::UnsupportedBitDepth(header.bits_per_pixel)),
    }
}
