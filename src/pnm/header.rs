use core::fmt;
use std::io::{self, BufRead};

use super::scan::{Delimiter, PnmRead, ScanError};
use super::{PnmFamily, PnmFormat};
use crate::error::PnmError;
use crate::pixel::PixelLayout;

/// Maxval implied by the bitmap formats, which carry no maxval token.
const BITMAP_MAXVAL: u32 = 2;
const MAX_MAXVAL: u64 = 65535;

/// Validated PNM header.
///
/// Only [`parse_header`] constructs one, so the format, maxval and layout are
/// always consistent with each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PnmHeader {
    format: PnmFormat,
    width: u32,
    height: u32,
    maxval: u32,
    layout: PixelLayout,
}

impl PnmHeader {
    pub fn format(&self) -> PnmFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Declared maximum sample value; always 2 for bitmaps.
    pub fn maxval(&self) -> u32 {
        self.maxval
    }

    /// Layout the pixel decoder will produce.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }
}

/// Renders the minimal textual header, e.g. `P4 3 2` or `P5 3 2 255`.
impl fmt::Display for PnmHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magic = self.format.magic();
        write!(
            f,
            "{}{} {} {}",
            magic[0] as char, magic[1] as char, self.width, self.height
        )?;
        if self.format.family() != PnmFamily::Bitmap {
            write!(f, " {}", self.maxval)?;
        }
        Ok(())
    }
}

/// Read and validate a PNM header, leaving `reader` at the first raster byte.
pub fn parse_header<R: BufRead + ?Sized>(reader: &mut R) -> Result<PnmHeader, PnmError> {
    let format = read_magic(reader)?;

    let width = read_dimension(reader).map_err(|e| e.into_error(PnmError::InvalidWidth))?;
    let height = read_dimension(reader).map_err(|e| e.into_error(PnmError::InvalidHeight))?;

    let maxval = if format.family() == PnmFamily::Bitmap {
        u64::from(BITMAP_MAXVAL)
    } else {
        reader
            .skip_comments(Delimiter::Run)
            .and_then(|()| reader.read_decimal())
            .map_err(|e| FieldError::from(e).into_error(PnmError::InvalidMaxval))?
    };
    if !(1..=MAX_MAXVAL).contains(&maxval) {
        return Err(PnmError::MaxvalOutOfRange(maxval));
    }
    let maxval = maxval as u32;

    reader
        .skip_comments(Delimiter::Single)
        .map_err(|e| FieldError::from(e).into_error(PnmError::MalformedHeader))?;

    let wide = maxval > 255;
    let layout = match format.family() {
        PnmFamily::Bitmap => PixelLayout::Gray8,
        PnmFamily::Graymap if wide => PixelLayout::Gray16,
        PnmFamily::Graymap => PixelLayout::Gray8,
        PnmFamily::Pixmap if wide => PixelLayout::Rgba16,
        PnmFamily::Pixmap => PixelLayout::Rgba8,
        // read_magic already turned P7 away.
        PnmFamily::Arbitrary => return Err(unsupported(format)),
    };

    log::trace!("parsed {format:?} header: {width}x{height}, maxval {maxval}");
    Ok(PnmHeader {
        format,
        width,
        height,
        maxval,
        layout,
    })
}

fn read_magic<R: BufRead + ?Sized>(reader: &mut R) -> Result<PnmFormat, PnmError> {
    let (word, truncated) = reader.read_word(2).map_err(|e| {
        FieldError::from(e).into_error(|msg| PnmError::MalformedHeader(format!("magic: {msg}")))
    })?;
    let format = if truncated {
        None
    } else {
        PnmFormat::from_magic(&word)
    };
    match format {
        Some(format) if format.family() == PnmFamily::Arbitrary => Err(unsupported(format)),
        Some(format) => Ok(format),
        None => Err(PnmError::MalformedHeader(format!(
            "invalid magic {:?}{}, expected P1 through P7",
            String::from_utf8_lossy(&word),
            if truncated { "..." } else { "" }
        ))),
    }
}

/// Recognized but never decoded.
fn unsupported(format: PnmFormat) -> PnmError {
    let magic = format.magic();
    PnmError::UnsupportedFormat(format!(
        "{} ({}{}) is not supported",
        format.name(),
        magic[0] as char,
        magic[1] as char
    ))
}

fn read_dimension<R: BufRead + ?Sized>(reader: &mut R) -> Result<u32, FieldError> {
    reader.skip_comments(Delimiter::Run)?;
    match u32::try_from(reader.read_decimal()?) {
        Ok(0) => Err(FieldError::Zero),
        Ok(v) => Ok(v),
        Err(_) => Err(FieldError::Scan(ScanError::Overflow)),
    }
}

/// A failure while reading one numeric header field.
enum FieldError {
    Scan(ScanError),
    Zero,
}

impl From<ScanError> for FieldError {
    fn from(e: ScanError) -> Self {
        FieldError::Scan(e)
    }
}

impl FieldError {
    /// Map to the field's error kind. Cancellation and I/O failures other
    /// than end of stream keep their own variants.
    fn into_error(self, kind: impl FnOnce(String) -> PnmError) -> PnmError {
        match self {
            FieldError::Scan(ScanError::Io(e)) if e.kind() != io::ErrorKind::UnexpectedEof => {
                PnmError::from(e)
            }
            FieldError::Scan(e) => kind(e.to_string()),
            FieldError::Zero => kind("must be positive".into()),
        }
    }
}
