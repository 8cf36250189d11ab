#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let seeds: &[(&str, &[u8])] = &[
        ("p1_3x2.pbm", b"P1\n# plain bitmap\n3 2\n1 0 1\n0 1 0\n"),
        ("p2_2x2.pgm", b"P2\n2 2\n15\n0 5\n10 15\n"),
        ("p2_16bit.pgm", b"P2 2 1 65535\n0 65535\n"),
        ("p3_2x1.ppm", b"P3 2 1 255\n255 0 0  0 255 0\n"),
        ("p4_9x2.pbm", b"P4\n9 2\n\xAA\x80\x55\x00"),
        ("p5_3x2.pgm", b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64"),
        ("p5_16bit.pgm", b"P5 2 1 1023\n\x03\xff\x00\x01"),
        ("p6_2x2.ppm", b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80"),
        ("p6_16bit.ppm", b"P6 1 1 65535\n\x12\x34\x56\x78\x9a\xbc"),
        ("comments.pgm", b"P5#a\n#b\n2#c\n1#d\n255#e\n\x01\x02"),
        // Truncated/malformed seeds for edge coverage
        ("empty.bin", b""),
        ("just_p6.bin", b"P6"),
        ("p7.bin", b"P7\nWIDTH 1\nHEIGHT 1\n"),
        ("maxval_zero.bin", b"P5 1 1 0\n\x00"),
        ("maxval_big.bin", b"P5 1 1 70000\n"),
        ("short_raster.bin", b"P6 2 2 255\n\x00\x00\x00"),
        ("bad_token.bin", b"P2 2 1 255\n12 x\n"),
    ];
    for (name, data) in seeds {
        fs::write(format!("{dir}/{name}"), data).unwrap();
    }

    println!("Generated seed corpus in {dir}/");
}
