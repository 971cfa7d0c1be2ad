//! Positioned little-endian field reads and sub-byte index expansion.

use std::io::{Read, Seek, SeekFrom};

use crate::error::BmpError;

/// Seek to an absolute `offset` and fill `buf` from there.
pub(crate) fn read_at<R: Read + Seek>(
    source: &mut R,
    offset: u64,
    buf: &mut [u8],
) -> Result<(), BmpError> {
    source.seek(SeekFrom::Start(offset))?;
    source.read_exact(buf)?;
    Ok(())
}

pub(crate) fn read_u16_at<R: Read + Seek>(source: &mut R, offset: u64) -> Result<u16, BmpError> {
    let mut buf = [0u8; 2];
    read_at(source, offset, &mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

pub(crate) fn read_u32_at<R: Read + Seek>(source: &mut R, offset: u64) -> Result<u32, BmpError> {
    let mut buf = [0u8; 4];
    read_at(source, offset, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

pub(crate) fn read_i32_at<R: Read + Seek>(source: &mut R, offset: u64) -> Result<i32, BmpError> {
    let mut buf = [0u8; 4];
    read_at(source, offset, &mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Expand packed 1bpp or 4bpp palette indices to one index per byte.
///
/// The leftmost pixel sits in the high bits. `out.len()` is the pixel count
/// of the row; trailing bits of the last input byte past it are ignored.
pub(crate) fn expand_bits_to_byte(depth: usize, input: &[u8], out: &mut [u8]) {
    if depth == 1 {
        let mut in_iter = input.iter();
        let mut out_iter = out.chunks_exact_mut(8);

        (&mut out_iter)
            .zip(&mut in_iter)
            .for_each(|(cur, in_val)| {
                for (pos, out_val) in cur.iter_mut().enumerate() {
                    *out_val = (in_val >> (7 - pos)) & 0x01;
                }
            });

        if let Some(in_val) = in_iter.next() {
            let remainder_iter = out_iter.into_remainder().iter_mut();
            remainder_iter.enumerate().for_each(|(pos, out_val)| {
                *out_val = (in_val >> (7 - pos)) & 0x01;
            });
        }
    } else if depth == 4 {
        let mut in_iter = input.iter();
        let mut out_iter = out.chunks_exact_mut(2);

        (&mut out_iter)
            .zip(&mut in_iter)
            .for_each(|(cur, in_val)| {
                cur[0] = (in_val >> 4) & 0x0f;
                cur[1] = in_val & 0x0f;
            });

        if let Some(in_val) = in_iter.next() {
            if let Some(out_val) = out_iter.into_remainder().first_mut() {
                *out_val = (in_val >> 4) & 0x0f;
            }
        }
    }
}
