//! Netpbm family: P1-P6 (PBM, PGM, PPM in plain and raw encodings).
//!
//! P7 (PAM) is recognized and rejected with [`PnmError::UnsupportedFormat`].
//!
//! Credits: the header scanning draws from [zune-ppm](https://github.com/etemesi254/zune-image)
//! by Caleb Etemesi (MIT/Apache-2.0/Zlib licensed).

mod bits;
mod decode;
mod header;
pub(crate) mod scan;

pub use decode::decode_pixels;
pub use header::{PnmHeader, parse_header};

use std::io::{BufReader, Read};

use crate::decode::DecodeOutput;
use crate::error::PnmError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::stop::StopReader;
use enough::Stop;

/// Netpbm sub-format, one per magic token.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P1 — ASCII bitmap (PBM).
    PlainPbm,
    /// P2 — ASCII grayscale (PGM).
    PlainPgm,
    /// P3 — ASCII RGB (PPM).
    PlainPpm,
    /// P4 — packed binary bitmap (PBM).
    RawPbm,
    /// P5 — binary grayscale (PGM).
    RawPgm,
    /// P6 — binary RGB (PPM).
    RawPpm,
    /// P7 — PAM. Recognized, never decoded.
    Pam,
}

/// Pixel model of a format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFamily {
    /// P1, P4: one bit per pixel.
    Bitmap,
    /// P2, P5: one gray sample per pixel.
    Graymap,
    /// P3, P6: RGB samples per pixel.
    Pixmap,
    /// P7.
    Arbitrary,
}

/// How samples are stored in the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleEncoding {
    /// Whitespace-separated ASCII decimal.
    Plain,
    /// Packed binary, big endian.
    Raw,
}

impl PnmFormat {
    /// Parse a two-byte magic token. Anything but `P1`..`P7` is `None`.
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"P1" => Some(Self::PlainPbm),
            b"P2" => Some(Self::PlainPgm),
            b"P3" => Some(Self::PlainPpm),
            b"P4" => Some(Self::RawPbm),
            b"P5" => Some(Self::RawPgm),
            b"P6" => Some(Self::RawPpm),
            b"P7" => Some(Self::Pam),
            _ => None,
        }
    }

    pub const fn magic(self) -> &'static [u8; 2] {
        match self {
            Self::PlainPbm => b"P1",
            Self::PlainPgm => b"P2",
            Self::PlainPpm => b"P3",
            Self::RawPbm => b"P4",
            Self::RawPgm => b"P5",
            Self::RawPpm => b"P6",
            Self::Pam => b"P7",
        }
    }

    pub fn family(self) -> PnmFamily {
        match self {
            Self::PlainPbm | Self::RawPbm => PnmFamily::Bitmap,
            Self::PlainPgm | Self::RawPgm => PnmFamily::Graymap,
            Self::PlainPpm | Self::RawPpm => PnmFamily::Pixmap,
            Self::Pam => PnmFamily::Arbitrary,
        }
    }

    pub fn encoding(self) -> SampleEncoding {
        match self {
            Self::PlainPbm | Self::PlainPgm | Self::PlainPpm => SampleEncoding::Plain,
            Self::RawPbm | Self::RawPgm | Self::RawPpm | Self::Pam => SampleEncoding::Raw,
        }
    }

    /// Short human-readable name, e.g. `"pgm raw"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlainPbm => "pbm plain",
            Self::PlainPgm => "pgm plain",
            Self::PlainPpm => "ppm plain",
            Self::RawPbm => "pbm raw",
            Self::RawPgm => "pgm raw",
            Self::RawPpm => "ppm raw",
            Self::Pam => "pam",
        }
    }
}

/// Probe header for ImageInfo without decoding.
pub(crate) fn probe<R: Read>(reader: R, stop: &dyn Stop) -> Result<ImageInfo, PnmError> {
    let mut reader = BufReader::new(StopReader::new(reader, stop));
    let header = parse_header(&mut reader)?;
    Ok(ImageInfo::from(&header))
}

/// Decode a PNM stream (called from DecodeRequest).
pub(crate) fn decode<R: Read>(
    reader: R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, PnmError> {
    let mut reader = BufReader::new(StopReader::new(reader, stop));
    let header = parse_header(&mut reader)?;

    if let Some(limits) = limits {
        limits.check_header(&header)?;
    }

    log::debug!(
        "decoding {} {}x{} maxval {}",
        header.format().name(),
        header.width(),
        header.height(),
        header.maxval()
    );
    decode::decode_with_limits(&mut reader, &header, limits)
}
