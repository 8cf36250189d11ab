#![no_main]
use libfuzzer_sys::fuzz_target;
use zennetpbm::{DecodeRequest, Limits, PnmError};

fuzz_target!(|data: &[u8]| {
    // Tight limits keep hostile headers from allocating.
    let limits = Limits {
        max_width: Some(512),
        max_height: Some(512),
        max_pixels: Some(64 * 1024),
        max_memory_bytes: Some(1024 * 1024),
    };
    match DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    {
        Ok(out) => assert!(out.pixels().len() <= 1024 * 1024),
        Err(PnmError::Cancelled(_)) => panic!("never cancelled"),
        Err(_) => {}
    }
});
