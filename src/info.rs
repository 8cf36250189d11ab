use std::io::Read;

use enough::Unstoppable;

use crate::error::PnmError;
use crate::pixel::PixelLayout;
use crate::pnm::{PnmFormat, PnmHeader};

/// Image metadata from a header-only read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PnmFormat,
    pub maxval: u32,
    /// Layout a full decode would produce.
    pub native_layout: PixelLayout,
}

impl ImageInfo {
    /// Read just the header from `reader`.
    ///
    /// Validation is identical to a full decode; no pixel data is read.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PnmError> {
        crate::pnm::probe(reader, &Unstoppable)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, PnmError> {
        Self::from_reader(data)
    }
}

impl From<&PnmHeader> for ImageInfo {
    fn from(header: &PnmHeader) -> Self {
        Self {
            width: header.width(),
            height: header.height(),
            format: header.format(),
            maxval: header.maxval(),
            native_layout: header.layout(),
        }
    }
}
