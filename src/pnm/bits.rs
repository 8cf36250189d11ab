//! Packed bitmap expansion.
//!
//! Adapted from the 1-bit path of zune-bmp's bit expansion by Caleb Etemesi
//! (MIT/Apache-2.0/Zlib), with PBM polarity.

/// Sample for a 0 bit (and a zero plain token): white.
pub(crate) const WHITE: u8 = 0xFF;
/// Sample for a 1 bit (and a nonzero plain token): black.
pub(crate) const BLACK: u8 = 0x00;

/// Map one PBM bit to its sample. 1 is ink, so the value is inverted.
#[inline]
pub(crate) fn bit_to_sample(bit: u8) -> u8 {
    if bit & 1 == 0 { WHITE } else { BLACK }
}

/// Map a plain `P1` token to its sample. Any nonzero value is ink.
#[inline]
pub(crate) fn token_to_sample(token: u64) -> u8 {
    if token == 0 { WHITE } else { BLACK }
}

/// Expand a packed row, most significant bit first, into `out`.
///
/// Writes exactly `out.len()` samples; pad bits in the last input byte are
/// never looked at. `input` must hold at least `out.len().div_ceil(8)` bytes.
pub(crate) fn expand_row(input: &[u8], out: &mut [u8]) {
    let mut in_iter = input.iter();
    let mut out_iter = out.chunks_exact_mut(8);

    (&mut out_iter)
        .zip(&mut in_iter)
        .for_each(|(out_vals, &in_val)| {
            for (pos, out_val) in out_vals.iter_mut().enumerate() {
                *out_val = bit_to_sample(in_val >> (7 - pos));
            }
        });

    let remainder = out_iter.into_remainder();
    if remainder.is_empty() {
        return;
    }
    if let Some(&in_val) = in_iter.next() {
        remainder.iter_mut().enumerate().for_each(|(pos, out_val)| {
            *out_val = bit_to_sample(in_val >> (7 - pos));
        });
    }
}
