//! Raster decoding for P1-P6.
//!
//! The output buffer grows as raster data arrives, so a header that declares
//! far more pixels than the stream holds costs no more than the stream itself.
//! On error the buffer is dropped, so callers never see partial pixels.

use std::io::{self, BufRead};

use super::bits::{self, token_to_sample};
use super::header::PnmHeader;
use super::scan::{PnmRead, ScanError};
use super::PnmFormat;
use crate::decode::DecodeOutput;
use crate::error::PnmError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Pixels converted per raw read. A multiple of 8, so bitmap chunks start on
/// a byte boundary.
const CHUNK_PIXELS: usize = 8192;

/// Cap on the up-front output reservation.
const MAX_PREALLOC: usize = 16 << 20;

/// Decoding routine, keyed by format and sample depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    PlainBitmap,
    PlainGray8,
    PlainGray16,
    PlainRgb8,
    PlainRgb16,
    RawBitmap,
    RawGray8,
    RawGray16,
    RawRgb8,
    RawRgb16,
}

impl Strategy {
    fn select(header: &PnmHeader) -> Result<Self, PnmError> {
        use PixelLayout::*;
        use PnmFormat::*;
        let strategy = match (header.format(), header.layout()) {
            (PlainPbm, Gray8) => Self::PlainBitmap,
            (PlainPgm, Gray8) => Self::PlainGray8,
            (PlainPgm, Gray16) => Self::PlainGray16,
            (PlainPpm, Rgba8) => Self::PlainRgb8,
            (PlainPpm, Rgba16) => Self::PlainRgb16,
            (RawPbm, Gray8) => Self::RawBitmap,
            (RawPgm, Gray8) => Self::RawGray8,
            (RawPgm, Gray16) => Self::RawGray16,
            (RawPpm, Rgba8) => Self::RawRgb8,
            (RawPpm, Rgba16) => Self::RawRgb16,
            (format, layout) => {
                return Err(PnmError::UnsupportedFormat(format!(
                    "no decoder for {} with {layout:?} output",
                    format.name()
                )));
            }
        };
        Ok(strategy)
    }
}

/// How raw samples are packed in the stream.
#[derive(Clone, Copy, Debug)]
enum Packing {
    /// One bit per pixel, rows padded to a whole byte.
    Bits,
    /// A fixed number of bytes per pixel.
    Bytes(usize),
}

impl Packing {
    /// Stream bytes holding `pixels` pixels from a byte-aligned start.
    fn src_len(self, pixels: usize) -> usize {
        match self {
            Self::Bits => pixels.div_ceil(8),
            Self::Bytes(n) => pixels * n,
        }
    }

    /// Whole pixels covered by `bytes` stream bytes.
    fn whole_pixels(self, bytes: usize) -> usize {
        match self {
            Self::Bits => bytes * 8,
            Self::Bytes(n) => bytes / n,
        }
    }
}

/// Decode the raster that follows `header` in `reader`.
///
/// `reader` must be positioned where [`super::parse_header`] left it.
pub fn decode_pixels<R: BufRead + ?Sized>(
    reader: &mut R,
    header: &PnmHeader,
) -> Result<DecodeOutput, PnmError> {
    decode_with_limits(reader, header, None)
}

pub(crate) fn decode_with_limits<R: BufRead + ?Sized>(
    reader: &mut R,
    header: &PnmHeader,
    limits: Option<&Limits>,
) -> Result<DecodeOutput, PnmError> {
    let strategy = Strategy::select(header)?;
    let too_large = || PnmError::DimensionsTooLarge {
        width: header.width(),
        height: header.height(),
    };
    let bpp = header.layout().bytes_per_pixel();
    let w = header.width() as usize;
    let h = header.height() as usize;
    let out_bytes = w
        .checked_mul(bpp)
        .and_then(|stride| stride.checked_mul(h))
        .ok_or_else(too_large)?;
    if let Some(limits) = limits {
        limits.check_output(out_bytes)?;
    }

    log::trace!("{strategy:?}: {out_bytes} output bytes");
    let mut out = Vec::<u8>::new();
    out.try_reserve_exact(out_bytes.min(MAX_PREALLOC))
        .map_err(|_| too_large())?;

    match strategy {
        Strategy::PlainBitmap => plain_bitmap(reader, &mut out, w, h)?,
        Strategy::PlainGray8 => plain_samples(reader, &mut out, w, h, 1, 1)?,
        Strategy::PlainGray16 => plain_samples(reader, &mut out, w, h, 1, 2)?,
        Strategy::PlainRgb8 => plain_samples(reader, &mut out, w, h, 3, 1)?,
        Strategy::PlainRgb16 => plain_samples(reader, &mut out, w, h, 3, 2)?,
        Strategy::RawBitmap => {
            raw_rows(reader, &mut out, (w, h), Packing::Bits, bpp, bits::expand_row)?
        }
        Strategy::RawGray8 => raw_rows(reader, &mut out, (w, h), Packing::Bytes(1), bpp, copy_row)?,
        Strategy::RawGray16 => {
            raw_rows(reader, &mut out, (w, h), Packing::Bytes(2), bpp, be16_to_ne)?
        }
        Strategy::RawRgb8 => {
            raw_rows(reader, &mut out, (w, h), Packing::Bytes(3), bpp, rgb8_to_rgba8)?
        }
        Strategy::RawRgb16 => {
            raw_rows(reader, &mut out, (w, h), Packing::Bytes(6), bpp, rgb16_to_rgba16)?
        }
    }

    debug_assert_eq!(out.len(), out_bytes);
    Ok(DecodeOutput::new(out, header))
}

// ── Plain (ASCII) ────────────────────────────────────────────────────

/// P1: one decimal token per pixel. 0 is white, any other value is ink.
fn plain_bitmap<R: BufRead + ?Sized>(
    reader: &mut R,
    out: &mut Vec<u8>,
    width: usize,
    height: usize,
) -> Result<(), PnmError> {
    for y in 0..height {
        for x in 0..width {
            let token = reader.read_decimal().map_err(|e| pixel_error(e, x, y))?;
            out.push(token_to_sample(token));
        }
    }
    Ok(())
}

/// P2/P3: `channels` decimal tokens per pixel, stored verbatim as
/// `sample_bytes`-wide native-endian samples. RGB gets an opaque alpha.
fn plain_samples<R: BufRead + ?Sized>(
    reader: &mut R,
    out: &mut Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
    sample_bytes: usize,
) -> Result<(), PnmError> {
    let max = if sample_bytes == 1 {
        u64::from(u8::MAX)
    } else {
        u64::from(u16::MAX)
    };

    for y in 0..height {
        for x in 0..width {
            for _ in 0..channels {
                let value = match reader.read_decimal() {
                    Ok(v) if v <= max => v as u16,
                    Ok(v) => {
                        return Err(PnmError::InvalidSample {
                            x: x as u32,
                            y: y as u32,
                            detail: format!("{v} does not fit in {} bits", sample_bytes * 8),
                        });
                    }
                    Err(e) => return Err(pixel_error(e, x, y)),
                };
                push_sample(out, value, sample_bytes);
            }
            if channels == 3 {
                push_sample(out, u16::MAX, sample_bytes);
            }
        }
    }
    Ok(())
}

/// Append a sample as one byte or as a native-endian u16.
fn push_sample(out: &mut Vec<u8>, value: u16, sample_bytes: usize) {
    if sample_bytes == 1 {
        out.push(value as u8);
    } else {
        out.extend_from_slice(&value.to_ne_bytes());
    }
}

// ── Raw (binary) ─────────────────────────────────────────────────────

/// Read each row in bounded fills of at most [`CHUNK_PIXELS`] pixels and
/// append the converted pixels to `out`.
///
/// `convert` turns one chunk of stream bytes into `bpp`-byte output pixels.
fn raw_rows<R: BufRead + ?Sized>(
    reader: &mut R,
    out: &mut Vec<u8>,
    (width, height): (usize, usize),
    packing: Packing,
    bpp: usize,
    convert: fn(&[u8], &mut [u8]),
) -> Result<(), PnmError> {
    let mut scratch = vec![0u8; packing.src_len(width.min(CHUNK_PIXELS))];
    for y in 0..height {
        let mut x = 0;
        while x < width {
            let n = (width - x).min(CHUNK_PIXELS);
            let src = &mut scratch[..packing.src_len(n)];
            let got = reader.fill(src).map_err(|e| pixel_error(e.into(), x, y))?;
            if got < src.len() {
                return Err(truncated(x + packing.whole_pixels(got), y));
            }
            let start = out.len();
            out.resize(start + n * bpp, 0);
            convert(src, &mut out[start..]);
            x += n;
        }
    }
    Ok(())
}

fn copy_row(src: &[u8], dst: &mut [u8]) {
    dst.copy_from_slice(src);
}

fn be16_to_ne(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(2).zip(dst.chunks_exact_mut(2)) {
        d.copy_from_slice(&u16::from_be_bytes([s[0], s[1]]).to_ne_bytes());
    }
}

fn rgb8_to_rgba8(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[..3].copy_from_slice(s);
        d[3] = u8::MAX;
    }
}

fn rgb16_to_rgba16(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(6).zip(dst.chunks_exact_mut(8)) {
        be16_to_ne(s, &mut d[..6]);
        d[6..].copy_from_slice(&u16::MAX.to_ne_bytes());
    }
}

// ── Errors ───────────────────────────────────────────────────────────

fn truncated(x: usize, y: usize) -> PnmError {
    PnmError::TruncatedData {
        x: x as u32,
        y: y as u32,
    }
}

fn pixel_error(err: ScanError, x: usize, y: usize) -> PnmError {
    match err {
        ScanError::Eof => truncated(x, y),
        ScanError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof => truncated(x, y),
        ScanError::Io(e) => PnmError::from(e),
        other => PnmError::InvalidSample {
            x: x as u32,
            y: y as u32,
            detail: other.to_string(),
        },
    }
}
