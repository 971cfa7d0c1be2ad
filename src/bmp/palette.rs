//! Colour table reader.

use std::io::{Read, Seek};

use log::debug;

use super::header::BitmapHeader;
use super::utils::read_at;
use crate::error::BmpError;

/// Largest colour table an indexed BMP can carry.
pub const MAX_PALETTE_ENTRIES: u32 = 256;

/// One colour table entry.
///
/// Only the colour is stored. Remapping these indices onto a shared hardware
/// palette belongs to the caller, which keeps its own index table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[cfg(feature = "rgb")]
impl From<PaletteEntry> for rgb::RGB8 {
    fn from(e: PaletteEntry) -> Self {
        rgb::RGB8::new(e.red, e.green, e.blue)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for PaletteEntry {
    fn from(c: rgb::RGB8) -> Self {
        PaletteEntry {
            red: c.r,
            green: c.g,
            blue: c.b,
        }
    }
}

/// Read `header.colour_count` entries from the colour table.
///
/// Entries are stored as B, G, R, reserved. The reserved byte is never read.
/// On any failure nothing is returned; there is no partial palette.
pub fn read_palette<R: Read + Seek>(
    source: &mut R,
    header: &BitmapHeader,
) -> Result<Vec<PaletteEntry>, BmpError> {
    if header.palette_offset == 0 {
        return Err(BmpError::HeaderNotLoaded);
    }
    if header.colour_count > MAX_PALETTE_ENTRIES {
        return Err(BmpError::PaletteTooLarge(header.colour_count));
    }

    let base = u64::from(header.palette_offset);
    let mut palette = Vec::with_capacity(header.colour_count as usize);
    for i in 0..u64::from(header.colour_count) {
        let mut bgr = [0u8; 3];
        read_at(source, base + i * 4, &mut bgr)?;
        let [blue, green, red] = bgr;
        palette.push(PaletteEntry { red, green, blue });
    }

    debug!("extracted {} palette entries", palette.len());
    Ok(palette)
}
