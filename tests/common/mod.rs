//! In-memory indexed BMP fixtures.

#![allow(dead_code)]

/// Description of an indexed BMP to build.
pub struct Fixture {
    pub width: u32,
    pub height: u32,
    pub bpp: u16,
    pub compression: u32,
    /// Extra DIB header bytes beyond BITMAPINFOHEADER (e.g. 84 for a V5 header).
    pub extra_dib: u32,
    pub palette: Vec<[u8; 3]>,
    /// Top-down rows, already packed for the bit depth, without padding.
    pub rows: Vec<Vec<u8>>,
}

impl Fixture {
    pub fn new(width: u32, height: u32, bpp: u16) -> Self {
        let row_bytes = (width as usize * bpp as usize).div_ceil(8);
        Self {
            width,
            height,
            bpp,
            compression: 0,
            extra_dib: 0,
            palette: Vec::new(),
            rows: vec![vec![0u8; row_bytes]; height as usize],
        }
    }

    pub fn padded_row(&self) -> usize {
        (self.width as usize * self.bpp as usize).div_ceil(32) * 4
    }

    pub fn palette_offset(&self) -> usize {
        14 + 40 + self.extra_dib as usize
    }

    pub fn data_offset(&self) -> usize {
        self.palette_offset() + 4 * self.palette.len()
    }

    /// Serialize, storing rows bottom-up with 0xEE padding bytes.
    pub fn build(&self) -> Vec<u8> {
        let padded = self.padded_row();
        let pixel_data_size = padded * self.height as usize;
        let data_offset = self.data_offset();
        let file_size = data_offset + pixel_data_size;

        let mut out = Vec::with_capacity(file_size);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&(data_offset as u32).to_le_bytes());

        out.extend_from_slice(&(40 + self.extra_dib).to_le_bytes());
        out.extend_from_slice(&(self.width as i32).to_le_bytes());
        out.extend_from_slice(&(self.height as i32).to_le_bytes()); // positive = bottom-up
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&self.bpp.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
        out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
        out.extend_from_slice(&(self.palette.len() as u32).to_le_bytes()); // colours used
        out.extend_from_slice(&0u32.to_le_bytes()); // important colours
        out.resize(out.len() + self.extra_dib as usize, 0);

        for [r, g, b] in &self.palette {
            out.extend_from_slice(&[*b, *g, *r, 0xAA]);
        }
        for row in self.rows.iter().rev() {
            let start = out.len();
            out.extend_from_slice(row);
            out.resize(start + padded, 0xEE);
        }
        out
    }
}

/// `n` grey palette entries.
pub fn grey_palette(n: usize) -> Vec<[u8; 3]> {
    (0..n).map(|i| [i as u8; 3]).collect()
}

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
