use std::io::{Read, Seek};

use log::debug;

use crate::bmp::{self, BitmapHeader, PaletteEntry, PixelBuffer};
use crate::error::BmpError;
use crate::limits::Limits;

/// How far an [`ImageHandle`] has been loaded.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleState {
    /// Nothing loaded.
    Empty,
    /// Header only.
    HeaderLoaded,
    /// Header and palette.
    PaletteLoaded,
    /// Header and pixels.
    PixelsLoaded,
    /// Header, palette and pixels.
    Complete,
}

/// Header, colour table and pixel rows of one BMP, each loaded on demand.
#[derive(Clone, Debug, Default)]
pub struct ImageHandle {
    header: Option<BitmapHeader>,
    palette: Option<Vec<PaletteEntry>>,
    pixels: Option<PixelBuffer>,
}

impl ImageHandle {
    /// An empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HandleState {
        match (&self.header, &self.palette, &self.pixels) {
            (None, _, _) => HandleState::Empty,
            (Some(_), None, None) => HandleState::HeaderLoaded,
            (Some(_), Some(_), None) => HandleState::PaletteLoaded,
            (Some(_), None, Some(_)) => HandleState::PixelsLoaded,
            (Some(_), Some(_), Some(_)) => HandleState::Complete,
        }
    }

    pub fn header(&self) -> Option<&BitmapHeader> {
        self.header.as_ref()
    }

    pub fn palette(&self) -> Option<&[PaletteEntry]> {
        self.palette.as_deref()
    }

    pub fn pixels(&self) -> Option<&PixelBuffer> {
        self.pixels.as_ref()
    }

    /// Take the pixel buffer out, leaving the handle without pixels.
    pub fn take_pixels(&mut self) -> Option<PixelBuffer> {
        self.pixels.take()
    }

    /// Read the header. A previously loaded palette and pixel buffer are
    /// discarded, since they belonged to the old header.
    pub fn load_header<R: Read + Seek>(&mut self, source: &mut R) -> Result<(), BmpError> {
        let header = bmp::read_header(source)?;
        self.palette = None;
        self.pixels = None;
        self.header = Some(header);
        Ok(())
    }

    pub fn load_palette<R: Read + Seek>(&mut self, source: &mut R) -> Result<(), BmpError> {
        let header = self.header.as_ref().ok_or(BmpError::HeaderNotLoaded)?;
        self.palette = Some(bmp::read_palette(source, header)?);
        Ok(())
    }

    pub fn load_pixels<R: Read + Seek>(&mut self, source: &mut R) -> Result<(), BmpError> {
        let header = self.header.as_ref().ok_or(BmpError::HeaderNotLoaded)?;
        self.pixels = Some(bmp::read_pixels(source, header)?);
        Ok(())
    }

    /// Free the pixel buffer. Calling it again is a no-op.
    pub fn release(&mut self) {
        if self.pixels.take().is_some() {
            debug!("pixel buffer released");
        }
    }
}

/// Header, palette and pixels in one call.
pub fn read_image<R: Read + Seek>(source: &mut R) -> Result<ImageHandle, BmpError> {
    DecodeRequest::new().decode(source)
}

/// Builder for a combined decode with limits and optional stages.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
    palette: bool,
    pixels: bool,
}

impl Default for DecodeRequest<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DecodeRequest<'a> {
    /// Decode header, palette and pixels with no limits.
    pub fn new() -> Self {
        Self {
            limits: None,
            palette: true,
            pixels: true,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Whether to read the colour table.
    pub fn palette(mut self, yes: bool) -> Self {
        self.palette = yes;
        self
    }

    /// Whether to read the pixel rows.
    pub fn pixels(mut self, yes: bool) -> Self {
        self.pixels = yes;
        self
    }

    pub fn decode<R: Read + Seek>(&self, source: &mut R) -> Result<ImageHandle, BmpError> {
        let mut handle = ImageHandle::new();
        handle.load_header(source)?;
        if let (Some(limits), Some(header)) = (self.limits, handle.header()) {
            limits.check_header(header)?;
        }
        if self.palette {
            handle.load_palette(source)?;
        }
        if self.pixels {
            handle.load_pixels(source)?;
        }
        Ok(handle)
    }
}
