use alloc::string::String;

/// Errors from BMP header, palette, pixel and font decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("header not loaded")]
    HeaderNotLoaded,

    #[error("unsupported bit depth: {0}bpp")]
    UnsupportedBitDepth(u16),

    #[error("compressed BMP not supported (compression {0})")]
    CompressedNotSupported(i32),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("colour table too large: {0} entries")]
    PaletteTooLarge(u32),

    #[error("unable to allocate {bytes} bytes for pixel data")]
    OutOfMemory { bytes: usize },

    #[error("pixel data truncated at file row {row}, expected {expected} bytes")]
    TruncatedPixelData { row: usize, expected: usize },

    #[error("unsupported font dimensions: {width}x{height}")]
    UnsupportedFontDimensions { width: u8, height: u8 },

    #[error("font table overflow: {symbols} symbols, max {max}")]
    FontTableOverflow { symbols: usize, max: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
}
