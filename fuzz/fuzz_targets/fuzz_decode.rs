#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // No limits: whatever the header declares, memory follows the input.
    // Decode and probe must never panic, and must agree on header validity.
    let decoded = zennetpbm::decode_bytes(data);
    let probed = zennetpbm::probe(data);

    match (&decoded, &probed) {
        (Ok(out), Ok(info)) => {
            assert_eq!((out.width, out.height), (info.width, info.height));
            assert_eq!(out.layout, info.native_layout);
            let expected = out.width as usize * out.height as usize * out.layout.bytes_per_pixel();
            assert_eq!(out.pixels().len(), expected);
        }
        (Ok(_), Err(e)) => panic!("probe failed where decode succeeded: {e}"),
        (Err(e), Ok(_)) => assert!(!e.is_header_error(), "header error only on decode: {e}"),
        (Err(_), Err(_)) => {}
    }

    if let Some(reg) = zennetpbm::registry::sniff(data) {
        let mut src = data;
        let via_registry = (reg.decode)(&mut src);
        assert_eq!(via_registry.is_ok(), decoded.is_ok());
    }
});
