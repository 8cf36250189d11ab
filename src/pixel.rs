/// Pixel memory layout of a decoded image.
///
/// Bitmaps decode to `Gray8`, graymaps to `Gray8`/`Gray16`, pixmaps to
/// `Rgba8`/`Rgba16` with an opaque alpha channel.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// Single channel, 16-bit grayscale (native endian).
    Gray16,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 4 channels, 16-bit RGBA (native endian).
    Rgba16,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.bytes_per_sample()
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 => 1,
            Self::Rgba8 | Self::Rgba16 => 4,
        }
    }

    /// Bytes per channel sample: 1 or 2.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            Self::Gray8 | Self::Rgba8 => 1,
            Self::Gray16 | Self::Rgba16 => 2,
        }
    }

    /// Bits per channel sample: 8 or 16.
    pub fn bit_depth(&self) -> u32 {
        self.bytes_per_sample() as u32 * 8
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba8 | Self::Rgba16)
    }
}
