//! # zennetpbm
//!
//! Streaming decoder for the Netpbm formats: PBM, PGM and PPM in both plain
//! (ASCII) and raw (binary) encodings.
//!
//! ## Supported Formats
//!
//! - **P1** / **P4** (PBM) — bitmap, decoded to `Gray8` with 1 = black (0) and
//!   0 = white (255)
//! - **P2** / **P5** (PGM) — grayscale, `Gray8` for maxval < 256, else `Gray16`
//! - **P3** / **P6** (PPM) — RGB, decoded to `Rgba8` / `Rgba16` with opaque alpha
//!
//! Samples are copied as stored; they are never rescaled by maxval.
//!
//! ## Non-Goals
//!
//! - PAM (P7) — detected and rejected with [`PnmError::UnsupportedFormat`]
//! - Encoding
//! - Gamma and color management
//!
//! ## Credits
//!
//! Header scanning draws from [zune-ppm](https://github.com/etemesi254/zune-image)
//! by Caleb Etemesi (MIT/Apache-2.0/Zlib licensed).
//!
//! ## Usage
//!
//! ```
//! use zennetpbm::{DecodeRequest, ImageInfo, PixelLayout, Unstoppable};
//!
//! let data: &[u8] = b"P3 2 1 255\n255 0 0  0 255 0\n";
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! assert_eq!((info.width, info.height), (2, 1));
//!
//! // Decode from any `std::io::Read`
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! assert_eq!(decoded.layout, PixelLayout::Rgba8);
//! assert_eq!(decoded.pixels(), &[255, 0, 0, 255, 0, 255, 0, 255]);
//! # Ok::<(), zennetpbm::PnmError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod error;
mod info;
mod limits;
mod pixel;
mod stop;

pub mod pnm;
pub mod registry;

use std::io::Read;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::PnmError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::PixelLayout;
pub use stop::StopReader;

/// Decode a PNM image from a stream with no limits and no cancellation.
pub fn decode<R: Read>(reader: R) -> Result<DecodeOutput, PnmError> {
    DecodeRequest::new(reader).decode(Unstoppable)
}

/// Decode a PNM image held in memory.
pub fn decode_bytes(data: &[u8]) -> Result<DecodeOutput, PnmError> {
    decode(data)
}

/// Read only the header: dimensions, format and native layout.
pub fn probe<R: Read>(reader: R) -> Result<ImageInfo, PnmError> {
    ImageInfo::from_reader(reader)
}
