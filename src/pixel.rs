/// Bit depths accepted by the header reader.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 1 bit per pixel, 8 palette indices packed per byte.
    One,
    /// 4 bits per pixel, 2 palette indices packed per byte.
    Four,
    /// 8 bits per pixel, one palette index per byte.
    Eight,
    /// 16 bits per pixel. Accepted by the header, rejected by the pixel decoder.
    Sixteen,
}

impl BitDepth {
    /// Map a raw `biBitCount` value. Returns `None` for unsupported depths.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(Self::One),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            16 => Some(Self::Sixteen),
            _ => None,
        }
    }

    /// Bits per pixel.
    pub fn bits(&self) -> u16 {
        match self {
            Self::One => 1,
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }

    /// Whole bytes per pixel (`bits >> 3`). Zero for the packed depths.
    pub fn bytes_per_pixel(&self) -> u16 {
        self.bits() >> 3
    }

    /// Whether pixel values are palette indices that the pixel decoder returns.
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::One | Self::Four | Self::Eight)
    }

    /// Bytes occupied by `width` pixels, before row padding.
    pub(crate) fn row_bytes(&self, width: u32) -> Option<u32> {
        width
            .checked_mul(u32::from(self.bits()))
            .map(|bits| bits.div_ceil(8))
    }
}
