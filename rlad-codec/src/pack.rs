// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `pack` module packs and unpacks chunks of eight signed deltas at the five coded bit
//! widths.
//!
//! Fields are laid down LSB-first in little-endian order: delta `i` occupies bits
//! `[i * width, (i + 1) * width)` of the chunk, so a chunk always occupies exactly `width` bytes.

use rlad_core::util::bits::sign_extend_leq16_to_i16;

use crate::SAMPLES_PER_CHUNK;

/// Packs eight deltas into `out` at `width` bits per delta, and returns the number of bytes
/// written. `out` must hold at least `width` bytes.
///
/// Panics if `width` is not one of the coded bit widths.
pub fn pack_chunk(width: u32, deltas: &[i16; SAMPLES_PER_CHUNK], out: &mut [u8]) -> usize {
    match width {
        2 => pack_2(deltas, out),
        4 => pack_4(deltas, out),
        8 => pack_8(deltas, out),
        12 => pack_12(deltas, out),
        16 => pack_16(deltas, out),
        _ => panic!("invalid coded bit width"),
    }
    width as usize
}

/// Unpacks eight deltas from `src` at `width` bits per delta, sign extending each field, and
/// returns the number of bytes consumed. `src` must hold at least `width` bytes.
///
/// Panics if `width` is not one of the coded bit widths.
pub fn unpack_chunk(width: u32, src: &[u8], deltas: &mut [i16; SAMPLES_PER_CHUNK]) -> usize {
    match width {
        2 => unpack_2(src, deltas),
        4 => unpack_4(src, deltas),
        8 => unpack_8(src, deltas),
        12 => unpack_12(src, deltas),
        16 => unpack_16(src, deltas),
        _ => panic!("invalid coded bit width"),
    }
    width as usize
}

fn pack_2(deltas: &[i16; 8], out: &mut [u8]) {
    let mut lo = 0u8;
    let mut hi = 0u8;

    for i in 0..4 {
        lo |= ((deltas[i] as u8) & 0x3) << (2 * i);
        hi |= ((deltas[i + 4] as u8) & 0x3) << (2 * i);
    }

    out[0] = lo;
    out[1] = hi;
}

fn unpack_2(src: &[u8], deltas: &mut [i16; 8]) {
    for i in 0..4 {
        deltas[i] = sign_extend_leq16_to_i16(u16::from(src[0] >> (2 * i)) & 0x3, 2);
        deltas[i + 4] = sign_extend_leq16_to_i16(u16::from(src[1] >> (2 * i)) & 0x3, 2);
    }
}

fn pack_4(deltas: &[i16; 8], out: &mut [u8]) {
    for i in 0..4 {
        out[i] = ((deltas[2 * i] as u8) & 0xf) | ((deltas[2 * i + 1] as u8) << 4);
    }
}

fn unpack_4(src: &[u8], deltas: &mut [i16; 8]) {
    for i in 0..4 {
        deltas[2 * i] = sign_extend_leq16_to_i16(u16::from(src[i]) & 0xf, 4);
        deltas[2 * i + 1] = sign_extend_leq16_to_i16(u16::from(src[i] >> 4), 4);
    }
}

fn pack_8(deltas: &[i16; 8], out: &mut [u8]) {
    for i in 0..8 {
        out[i] = deltas[i] as u8;
    }
}

fn unpack_8(src: &[u8], deltas: &mut [i16; 8]) {
    for i in 0..8 {
        deltas[i] = sign_extend_leq16_to_i16(u16::from(src[i]), 8);
    }
}

// Eight 12-bit fields occupy 96 bits, assembled as three little-endian 32-bit words. Fields two
// and five straddle the word boundaries.
fn pack_12(deltas: &[i16; 8], out: &mut [u8]) {
    let d: [u32; 8] = [
        u32::from(deltas[0] as u16) & 0xfff,
        u32::from(deltas[1] as u16) & 0xfff,
        u32::from(deltas[2] as u16) & 0xfff,
        u32::from(deltas[3] as u16) & 0xfff,
        u32::from(deltas[4] as u16) & 0xfff,
        u32::from(deltas[5] as u16) & 0xfff,
        u32::from(deltas[6] as u16) & 0xfff,
        u32::from(deltas[7] as u16) & 0xfff,
    ];

    let w0 = d[0] | (d[1] << 12) | (d[2] << 24);
    let w1 = (d[2] >> 8) | (d[3] << 4) | (d[4] << 16) | (d[5] << 28);
    let w2 = (d[5] >> 4) | (d[6] << 8) | (d[7] << 20);

    out[0..4].copy_from_slice(&w0.to_le_bytes());
    out[4..8].copy_from_slice(&w1.to_le_bytes());
    out[8..12].copy_from_slice(&w2.to_le_bytes());
}

fn unpack_12(src: &[u8], deltas: &mut [i16; 8]) {
    let w0 = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
    let w1 = u32::from_le_bytes([src[4], src[5], src[6], src[7]]);
    let w2 = u32::from_le_bytes([src[8], src[9], src[10], src[11]]);

    let fields: [u32; 8] = [
        w0 & 0xfff,
        (w0 >> 12) & 0xfff,
        (w0 >> 24) | ((w1 & 0xf) << 8),
        (w1 >> 4) & 0xfff,
        (w1 >> 16) & 0xfff,
        (w1 >> 28) | ((w2 & 0xff) << 4),
        (w2 >> 8) & 0xfff,
        w2 >> 20,
    ];

    for (d, &field) in deltas.iter_mut().zip(fields.iter()) {
        *d = sign_extend_leq16_to_i16(field as u16, 12);
    }
}

fn pack_16(deltas: &[i16; 8], out: &mut [u8]) {
    for i in 0..8 {
        out[2 * i..2 * i + 2].copy_from_slice(&deltas[i].to_le_bytes());
    }
}

fn unpack_16(src: &[u8], deltas: &mut [i16; 8]) {
    for i in 0..8 {
        deltas[i] = i16::from_le_bytes([src[2 * i], src[2 * i + 1]]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn field_range(width: u32) -> std::ops::RangeInclusive<i16> {
        let half = 1i32 << (width - 1);
        ((-half) as i16)..=((half - 1) as i16)
    }

    #[test]
    fn verify_round_trip_at_range_limits() {
        for &width in &[2u32, 4, 8, 12, 16] {
            let range = field_range(width);
            let deltas = [
                *range.start(),
                *range.end(),
                0,
                -1,
                1,
                *range.end() - 1,
                *range.start() + 1,
                *range.end(),
            ];

            let mut packed = [0u8; 16];
            assert_eq!(pack_chunk(width, &deltas, &mut packed), width as usize);

            let mut unpacked = [0i16; 8];
            assert_eq!(unpack_chunk(width, &packed, &mut unpacked), width as usize);
            assert_eq!(unpacked, deltas, "width {}", width);
        }
    }

    #[test]
    fn verify_round_trip_random() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_0010);

        for &width in &[2u32, 4, 8, 12, 16] {
            let range = field_range(width);

            for _ in 0..1000 {
                let mut deltas = [0i16; 8];
                for d in deltas.iter_mut() {
                    *d = rng.random_range(range.clone());
                }

                let mut packed = [0u8; 16];
                pack_chunk(width, &deltas, &mut packed);

                let mut unpacked = [0i16; 8];
                unpack_chunk(width, &packed, &mut unpacked);
                assert_eq!(unpacked, deltas, "width {}", width);
            }
        }
    }

    // Pin the exact 96-bit layout: word0 holds d0, d1, and the low byte of d2; word1 holds the
    // high nibble of d2, d3, d4, and the low nibble of d5; word2 holds the high byte of d5, d6,
    // and d7.
    #[test]
    fn verify_12_bit_layout() {
        let deltas: [i16; 8] = [0x001, 0x002, 0x7ab, -1, 0x004, 0x5cd, 0x006, 0x007];

        let mut packed = [0u8; 12];
        pack_chunk(12, &deltas, &mut packed);

        let w0 = u32::from_le_bytes([packed[0], packed[1], packed[2], packed[3]]);
        let w1 = u32::from_le_bytes([packed[4], packed[5], packed[6], packed[7]]);
        let w2 = u32::from_le_bytes([packed[8], packed[9], packed[10], packed[11]]);

        assert_eq!(w0 & 0xfff, 0x001);
        assert_eq!((w0 >> 12) & 0xfff, 0x002);
        assert_eq!(w0 >> 24, 0xab);

        assert_eq!(w1 & 0xf, 0x7);
        assert_eq!((w1 >> 4) & 0xfff, 0xfff);
        assert_eq!((w1 >> 16) & 0xfff, 0x004);
        assert_eq!(w1 >> 28, 0xd);

        assert_eq!(w2 & 0xff, 0x5c);
        assert_eq!((w2 >> 8) & 0xfff, 0x006);
        assert_eq!(w2 >> 20, 0x007);
    }

    #[test]
    fn verify_16_bit_wrap_values() {
        let deltas = [i16::MIN, i16::MAX, -1, 1, 0, 0x7f00, -0x7f00, 0x0102];

        let mut packed = [0u8; 16];
        pack_chunk(16, &deltas, &mut packed);
        assert_eq!(&packed[0..2], &[0x00, 0x80]);
        assert_eq!(&packed[2..4], &[0xff, 0x7f]);

        let mut unpacked = [0i16; 8];
        unpack_chunk(16, &packed, &mut unpacked);
        assert_eq!(unpacked, deltas);
    }
}
