//! Test corpus: the same sample patterns written as plain and raw PNM must
//! decode identically, across sizes, depths and header styles.

use zennetpbm::*;

fn checkerboard(w: usize, h: usize, channels: usize, maxval: u16) -> Vec<u16> {
    let mut samples = vec![0u16; w * h * channels];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * channels;
            for c in 0..channels {
                samples[off + c] = if (x + y) % 2 == 0 {
                    maxval - c as u16
                } else {
                    c as u16 * 3
                };
            }
        }
    }
    samples
}

fn noise_pattern(len: usize, maxval: u16) -> Vec<u16> {
    let mut state: u32 = 0xDEAD_BEEF;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % (u32::from(maxval) + 1)) as u16
        })
        .collect()
}

fn plain(magic: &str, w: usize, h: usize, maxval: u16, samples: &[u16]) -> Vec<u8> {
    let mut out = format!("{magic}\n# generated\n{w} {h}\n{maxval}\n");
    for (i, s) in samples.iter().enumerate() {
        out.push_str(&s.to_string());
        out.push(if i % 7 == 6 { '\n' } else { ' ' });
    }
    out.into_bytes()
}

fn raw(magic: &str, w: usize, h: usize, maxval: u16, samples: &[u16]) -> Vec<u8> {
    let mut out = format!("{magic}\n{w} {h}\n{maxval}\n").into_bytes();
    for &s in samples {
        if maxval > 255 {
            out.extend_from_slice(&s.to_be_bytes());
        } else {
            out.push(s as u8);
        }
    }
    out
}

fn expected(samples: &[u16], channels: usize, wide: bool) -> Vec<u8> {
    let alpha = if wide { u16::MAX } else { 255 };
    let mut out = Vec::new();
    for px in samples.chunks_exact(channels) {
        let mut push = |v: u16| {
            if wide {
                out.extend_from_slice(&v.to_ne_bytes());
            } else {
                out.push(v as u8);
            }
        };
        px.iter().for_each(|&v| push(v));
        if channels == 3 {
            push(alpha);
        }
    }
    out
}

fn bits(w: usize, h: usize) -> Vec<u8> {
    noise_pattern(w * h, 1).into_iter().map(|v| v as u8).collect()
}

fn pack_bits(w: usize, bits: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for row in bits.chunks_exact(w) {
        for chunk in row.chunks(8) {
            let mut byte = 0u8;
            for (i, &b) in chunk.iter().enumerate() {
                byte |= b << (7 - i);
            }
            // Set the pad bits to catch any leak into the output.
            byte |= 0xFFu8.checked_shr(chunk.len() as u32).unwrap_or(0);
            out.push(byte);
        }
    }
    out
}

// ── Graymap / pixmap ─────────────────────────────────────────────────

#[test]
fn plain_and_raw_agree() {
    for &(w, h) in &[(1, 1), (3, 2), (8, 8), (17, 5), (64, 3)] {
        for &maxval in &[1u16, 15, 255, 256, 1023, 65535] {
            for &(plain_magic, raw_magic, channels) in &[("P2", "P5", 1), ("P3", "P6", 3)] {
                let mut samples = noise_pattern(w * h * channels, maxval);
                // A raw raster starting with '#' would read as a comment.
                samples[0] = 0;
                let a = decode_bytes(&plain(plain_magic, w, h, maxval, &samples)).unwrap();
                let b = decode_bytes(&raw(raw_magic, w, h, maxval, &samples)).unwrap();
                assert_eq!(a.pixels(), b.pixels(), "{raw_magic} {w}x{h} maxval {maxval}");
                assert_eq!(a.layout, b.layout);
                assert_eq!(
                    b.pixels(),
                    &expected(&samples, channels, maxval > 255)[..],
                    "{raw_magic} {w}x{h} maxval {maxval}"
                );
            }
        }
    }
}

#[test]
fn checkerboard_pixmap_rows() {
    let (w, h) = (6, 4);
    let samples = checkerboard(w, h, 3, 255);
    let decoded = decode_bytes(&raw("P6", w, h, 255, &samples)).unwrap();
    assert_eq!(decoded.rows().count(), h);
    for (y, row) in decoded.rows().enumerate() {
        assert_eq!(row.len(), w * 4);
        for (x, px) in row.chunks_exact(4).enumerate() {
            let want: [u8; 4] = if (x + y) % 2 == 0 {
                [255, 254, 253, 255]
            } else {
                [0, 3, 6, 255]
            };
            assert_eq!(px, &want[..], "pixel ({x}, {y})");
        }
    }
}

#[test]
fn every_short_raw_stream_is_truncated() {
    let samples = checkerboard(4, 3, 3, 65535);
    let full = raw("P6", 4, 3, 65535, &samples);
    let header_len = "P6\n4 3\n65535\n".len();
    for cut in header_len..full.len() {
        let err = decode_bytes(&full[..cut]).unwrap_err();
        assert!(matches!(err, PnmError::TruncatedData { .. }), "cut {cut}: {err:?}");
    }
    assert!(decode_bytes(&full).is_ok());
}

#[test]
fn every_short_plain_stream_fails_cleanly() {
    let samples = checkerboard(3, 2, 1, 9);
    let full = plain("P2", 3, 2, 9, &samples);
    let text = String::from_utf8(full.clone()).unwrap();
    let last_token_start = text.trim_end().rfind(|c: char| c.is_ascii_whitespace()).unwrap() + 1;
    for cut in 0..last_token_start {
        assert!(decode_bytes(&full[..cut]).is_err(), "cut {cut}");
    }
}

// ── Bitmaps ──────────────────────────────────────────────────────────

#[test]
fn bitmap_plain_and_raw_agree() {
    for &(w, h) in &[(1, 1), (7, 3), (8, 2), (9, 4), (31, 5), (64, 1)] {
        let mut bits = bits(w, h);
        // Keep the first packed byte clear of '#' (0x23).
        bits[0] = 1;
        let mut plain_text = format!("P1\n{w} {h}\n");
        for row in bits.chunks_exact(w) {
            for b in row {
                plain_text.push(if *b == 1 { '1' } else { '0' });
                plain_text.push(' ');
            }
            plain_text.push('\n');
        }
        let mut raw_data = format!("P4\n{w} {h}\n").into_bytes();
        raw_data.extend_from_slice(&pack_bits(w, &bits));

        let a = decode_bytes(plain_text.as_bytes()).unwrap();
        let b = decode_bytes(&raw_data).unwrap();
        let want: Vec<u8> = bits.iter().map(|&b| if b == 1 { 0 } else { 255 }).collect();
        assert_eq!(a.pixels(), &want[..], "P1 {w}x{h}");
        assert_eq!(b.pixels(), &want[..], "P4 {w}x{h}");
    }
}

#[test]
fn bitmap_rows_never_overrun() {
    let (w, h) = (3, 4);
    let bits = vec![0u8; w * h];
    let mut data = format!("P4 {w} {h}\n").into_bytes();
    data.extend_from_slice(&pack_bits(w, &bits));
    let decoded = decode_bytes(&data).unwrap();
    // All pad bits are 1 (black); only white may appear.
    assert_eq!(decoded.pixels(), &vec![255u8; w * h][..]);
}

// ── Header styles ────────────────────────────────────────────────────

#[test]
fn header_whitespace_variants() {
    let variants: &[&[u8]] = &[
        b"P5 2 1 255\n\x01\x02",
        b"P5\n2\n1\n255\n\x01\x02",
        b"P5\t2\t1\t255\t\x01\x02",
        b"P5\r\n2 1\r\n255\r\x01\x02",
        b"P5 \x0b 2 \x0c 1  255 \x01\x02",
        b"P5#a\n#b\n2#c\n1#d\n255#e\n\x01\x02",
    ];
    for data in variants {
        let decoded = decode_bytes(data).unwrap_or_else(|e| panic!("{data:?}: {e}"));
        assert_eq!(decoded.pixels(), &[1, 2], "{data:?}");
    }
}
