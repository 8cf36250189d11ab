use crate::error::PnmError;
use crate::pnm::PnmHeader;

/// Caps applied after the header is parsed and before the output buffer is
/// allocated.
///
/// `Limits::default()` imposes nothing.
///
/// ```
/// use zennetpbm::{DecodeRequest, Limits, PnmError, Unstoppable};
///
/// let limits = Limits {
///     max_pixels: Some(1_000_000),
///     ..Default::default()
/// };
/// let result = DecodeRequest::new(&b"P5 2000 2000 255\n"[..])
///     .with_limits(&limits)
///     .decode(Unstoppable);
/// assert!(matches!(result, Err(PnmError::LimitExceeded(_))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded pixel buffer, in bytes.
    pub max_memory_bytes: Option<u64>,
}

fn exceeds(what: &str, value: u64, max: Option<u64>) -> Result<(), PnmError> {
    match max {
        Some(max) if value > max => Err(PnmError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check the header's dimensions.
    pub(crate) fn check_header(&self, header: &PnmHeader) -> Result<(), PnmError> {
        let (w, h) = (u64::from(header.width()), u64::from(header.height()));
        exceeds("width", w, self.max_width)?;
        exceeds("height", h, self.max_height)?;
        exceeds("pixel count", w * h, self.max_pixels)
    }

    /// Check the size of the buffer a decode is about to allocate.
    pub(crate) fn check_output(&self, bytes: usize) -> Result<(), PnmError> {
        exceeds("output buffer bytes", bytes as u64, self.max_memory_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnm::parse_header;

    fn header(text: &[u8]) -> PnmHeader {
        let mut src = text;
        parse_header(&mut src).unwrap()
    }

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check_header(&header(b"P4 4294967295 4294967295\n")).is_ok());
        assert!(limits.check_output(usize::MAX).is_ok());
    }

    #[test]
    fn each_limit_applies() {
        let limits = Limits {
            max_width: Some(10),
            max_height: Some(20),
            max_pixels: Some(100),
            max_memory_bytes: Some(400),
        };
        assert!(limits.check_header(&header(b"P5 10 10 255\n")).is_ok());
        for over in [&b"P5 11 1 255\n"[..], b"P5 1 21 255\n", b"P5 10 11 255\n"] {
            let err = limits.check_header(&header(over)).unwrap_err();
            assert!(matches!(err, PnmError::LimitExceeded(_)), "{over:?}");
        }
        assert!(limits.check_output(400).is_ok());
        let err = limits.check_output(401).unwrap_err();
        assert!(err.to_string().contains("401"), "{err}");
    }
}
