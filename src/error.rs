use std::io;

use enough::StopReason;

use crate::stop::StopRequested;

/// Errors from Netpbm decoding.
///
/// Header-stage and pixel-stage failures are separate variants; use
/// [`PnmError::is_header_error`] and [`PnmError::is_data_error`] to tell a bad
/// file apart from bad or short raster data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid width: {0}")]
    InvalidWidth(String),

    #[error("invalid height: {0}")]
    InvalidHeight(String),

    #[error("invalid maxval: {0}")]
    InvalidMaxval(String),

    #[error("maxval {0} out of range: samples are at most 16-bit (1..=65535)")]
    MaxvalOutOfRange(u64),

    #[error("pixel data ended early at ({x}, {y})")]
    TruncatedData { x: u32, y: u32 },

    #[error("invalid sample at ({x}, {y}): {detail}")]
    InvalidSample { x: u32, y: u32, detail: String },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("i/o error: {0}")]
    Io(#[source] io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl PnmError {
    /// Whether the error came from parsing the header.
    pub fn is_header_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader(_)
                | Self::UnsupportedFormat(_)
                | Self::InvalidWidth(_)
                | Self::InvalidHeight(_)
                | Self::InvalidMaxval(_)
                | Self::MaxvalOutOfRange(_)
        )
    }

    /// Whether the error came from reading raster data after a valid header.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::TruncatedData { .. } | Self::InvalidSample { .. })
    }
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}

impl From<io::Error> for PnmError {
    fn from(err: io::Error) -> Self {
        if !err.get_ref().is_some_and(|inner| inner.is::<StopRequested>()) {
            return PnmError::Io(err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<StopRequested>()) {
            Some(Ok(stop)) => PnmError::Cancelled(stop.0),
            Some(Err(inner)) => PnmError::Io(io::Error::new(kind, inner)),
            None => PnmError::Io(kind.into()),
        }
    }
}
