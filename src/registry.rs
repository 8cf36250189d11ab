//! Registration records for a generic image-codec registry.
//!
//! One record per supported magic token. P7 is recognized by the header
//! parser but deliberately has no record here.

use std::io::Read;

use crate::decode::DecodeOutput;
use crate::error::PnmError;
use crate::info::ImageInfo;
use crate::pnm::PnmFormat;

/// Full decode entry point of a registration.
pub type DecodeFn = fn(&mut dyn Read) -> Result<DecodeOutput, PnmError>;
/// Header-only entry point of a registration.
pub type ProbeFn = fn(&mut dyn Read) -> Result<ImageInfo, PnmError>;

/// What a registry needs to sniff and dispatch one sub-format.
#[derive(Clone, Copy, Debug)]
pub struct CodecRegistration {
    pub name: &'static str,
    /// Two-byte prefix that identifies the format.
    pub magic: &'static [u8; 2],
    pub decode: DecodeFn,
    pub probe: ProbeFn,
}

impl CodecRegistration {
    const fn new(format: PnmFormat) -> Self {
        Self {
            name: format.name(),
            magic: format.magic(),
            decode: decode_stream,
            probe: probe_stream,
        }
    }

    /// Whether `prefix` starts with this registration's magic.
    pub fn matches(&self, prefix: &[u8]) -> bool {
        prefix.starts_with(self.magic)
    }
}

fn decode_stream(reader: &mut dyn Read) -> Result<DecodeOutput, PnmError> {
    crate::decode(reader)
}

fn probe_stream(reader: &mut dyn Read) -> Result<ImageInfo, PnmError> {
    ImageInfo::from_reader(reader)
}

static REGISTRATIONS: [CodecRegistration; 6] = [
    CodecRegistration::new(PnmFormat::PlainPbm),
    CodecRegistration::new(PnmFormat::PlainPgm),
    CodecRegistration::new(PnmFormat::PlainPpm),
    CodecRegistration::new(PnmFormat::RawPbm),
    CodecRegistration::new(PnmFormat::RawPgm),
    CodecRegistration::new(PnmFormat::RawPpm),
];

/// All registrations, P1 through P6.
pub fn registrations() -> &'static [CodecRegistration] {
    &REGISTRATIONS
}

/// Find the registration whose magic starts `prefix`.
pub fn sniff(prefix: &[u8]) -> Option<&'static CodecRegistration> {
    REGISTRATIONS.iter().find(|r| r.matches(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_formats_registered() {
        let names: Vec<_> = registrations().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["pbm plain", "pgm plain", "ppm plain", "pbm raw", "pgm raw", "ppm raw"]
        );
        for r in registrations() {
            let format = PnmFormat::from_magic(r.magic).unwrap();
            assert_eq!(format.name(), r.name);
        }
    }

    #[test]
    fn sniff_by_prefix() {
        assert_eq!(sniff(b"P5\n1 1 255\n").unwrap().name, "pgm raw");
        assert_eq!(sniff(b"P1").unwrap().name, "pbm plain");
        assert!(sniff(b"P7\nWIDTH 1").is_none());
        assert!(sniff(b"P").is_none());
        assert!(sniff(b"BM").is_none());
    }

    #[test]
    fn registered_functions_decode() {
        let reg = sniff(b"P5").unwrap();
        let mut src: &[u8] = b"P5 2 1 255\n\x10\x20";
        let out = (reg.decode)(&mut src).unwrap();
        assert_eq!(out.pixels(), &[0x10, 0x20]);

        let mut src: &[u8] = b"P3 4 5 255\n";
        let info = (sniff(b"P3").unwrap().probe)(&mut src).unwrap();
        assert_eq!((info.width, info.height), (4, 5));
    }
}
