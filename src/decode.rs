use std::io::Read;

use enough::Stop;
#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::PnmError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::pnm::{PnmFormat, PnmHeader};

/// Decoded image. Pixels are row-major with no row padding; 16-bit layouts
/// hold native-endian samples.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub format: PnmFormat,
    /// Declared maxval; samples are not rescaled to it.
    pub maxval: u32,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u8>, header: &PnmHeader) -> Self {
        Self {
            pixels,
            width: header.width(),
            height: header.height(),
            layout: header.layout(),
            format: header.format(),
            maxval: header.maxval(),
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.layout.bytes_per_pixel()
    }

    /// Bytes of row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        self.pixels.get(start..start + stride)
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.stride().max(1))
    }

    /// Samples of a 16-bit layout as `u16`, or `None` for 8-bit layouts.
    pub fn samples_u16(&self) -> Option<Vec<u16>> {
        if self.layout.bytes_per_sample() != 2 {
            return None;
        }
        Some(
            self.pixels
                .chunks_exact(2)
                .map(|c| u16::from_ne_bytes([c[0], c[1]]))
                .collect(),
        )
    }

    /// Borrow an `Rgba8` image as typed pixels, without copying.
    ///
    /// Returns [`PnmError::LayoutMismatch`] for any other layout.
    #[cfg(feature = "rgb")]
    pub fn as_rgba8(&self) -> Result<&[rgb::RGBA8], PnmError> {
        self.expect_layout(PixelLayout::Rgba8)?;
        Ok(self.pixels.as_pixels())
    }

    /// Copy an `Rgba8` image out as typed pixels.
    #[cfg(feature = "rgb")]
    pub fn to_rgba8(&self) -> Result<Vec<rgb::RGBA8>, PnmError> {
        self.as_rgba8().map(<[_]>::to_vec)
    }

    /// Convert an `Rgba16` image to typed pixels.
    ///
    /// Returns [`PnmError::LayoutMismatch`] for any other layout.
    #[cfg(feature = "rgb")]
    pub fn to_rgba16(&self) -> Result<Vec<rgb::RGBA16>, PnmError> {
        self.expect_layout(PixelLayout::Rgba16)?;
        let samples = self.samples_u16().unwrap_or_default();
        let pixels: &[rgb::RGBA16] = samples.as_pixels();
        Ok(pixels.to_vec())
    }

    /// Zero-copy [`imgref::ImgRef`] view of an `Rgba8` image.
    #[cfg(feature = "imgref")]
    pub fn as_imgref_rgba8(&self) -> Result<imgref::ImgRef<'_, rgb::RGBA8>, PnmError> {
        let pixels = self.as_rgba8()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Copy a `Gray8` image into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec_gray8(&self) -> Result<imgref::ImgVec<u8>, PnmError> {
        self.expect_layout(PixelLayout::Gray8)?;
        Ok(self.imgvec(self.pixels.clone()))
    }

    /// Copy a `Gray16` image into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec_gray16(&self) -> Result<imgref::ImgVec<u16>, PnmError> {
        self.expect_layout(PixelLayout::Gray16)?;
        let samples = self.samples_u16().unwrap_or_default();
        Ok(self.imgvec(samples))
    }

    /// Copy an `Rgba8` image into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec_rgba8(&self) -> Result<imgref::ImgVec<rgb::RGBA8>, PnmError> {
        let pixels = self.to_rgba8()?;
        Ok(self.imgvec(pixels))
    }

    /// Copy an `Rgba16` image into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec_rgba16(&self) -> Result<imgref::ImgVec<rgb::RGBA16>, PnmError> {
        let pixels = self.to_rgba16()?;
        Ok(self.imgvec(pixels))
    }

    #[cfg(feature = "imgref")]
    fn imgvec<P>(&self, pixels: Vec<P>) -> imgref::ImgVec<P> {
        imgref::ImgVec::new(pixels, self.width as usize, self.height as usize)
    }

    #[cfg(feature = "rgb")]
    fn expect_layout(&self, expected: PixelLayout) -> Result<(), PnmError> {
        if self.layout != expected {
            return Err(PnmError::LayoutMismatch {
                expected,
                actual: self.layout,
            });
        }
        Ok(())
    }
}

/// Decode request builder.
///
/// ```no_run
/// use zennetpbm::{DecodeRequest, Limits, Unstoppable};
///
/// let file = std::fs::File::open("image.pgm")?;
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let decoded = DecodeRequest::new(file)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{} {:?}", decoded.width, decoded.height, decoded.layout);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DecodeRequest<'a, R> {
    reader: R,
    limits: Option<&'a Limits>,
}

impl<'a, R: Read> DecodeRequest<'a, R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the whole image.
    ///
    /// `stop` is checked before every read of the underlying stream; once it
    /// fires, decoding fails with [`PnmError::Cancelled`].
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, PnmError> {
        crate::pnm::decode(self.reader, self.limits, &stop)
    }
}
