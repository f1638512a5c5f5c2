// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use wide::{i16x16, i16x8};

use super::QUANT_BITS;

// The wide main loop shifts sixteen samples per iteration, an eight-lane pass takes the mid-sized
// remainder, and anything shorter falls through to scalar code. One decoded block is always a
// multiple of sixteen samples, so the narrow paths only run for odd-sized caller buffers.

pub(super) fn shift_right(samples: &mut [i16]) {
    let mut chunks = samples.chunks_exact_mut(16);

    for chunk in &mut chunks {
        let mut lanes = [0i16; 16];
        lanes.copy_from_slice(chunk);
        chunk.copy_from_slice(&(i16x16::from(lanes) >> QUANT_BITS).to_array());
    }

    let rest = chunks.into_remainder();
    let mut chunks = rest.chunks_exact_mut(8);

    for chunk in &mut chunks {
        let mut lanes = [0i16; 8];
        lanes.copy_from_slice(chunk);
        chunk.copy_from_slice(&(i16x8::from(lanes) >> QUANT_BITS).to_array());
    }

    for s in chunks.into_remainder() {
        *s >>= QUANT_BITS;
    }
}

pub(super) fn shift_left(samples: &mut [i16]) {
    let mut chunks = samples.chunks_exact_mut(16);

    for chunk in &mut chunks {
        let mut lanes = [0i16; 16];
        lanes.copy_from_slice(chunk);
        chunk.copy_from_slice(&(i16x16::from(lanes) << QUANT_BITS).to_array());
    }

    let rest = chunks.into_remainder();
    let mut chunks = rest.chunks_exact_mut(8);

    for chunk in &mut chunks {
        let mut lanes = [0i16; 8];
        lanes.copy_from_slice(chunk);
        chunk.copy_from_slice(&(i16x8::from(lanes) << QUANT_BITS).to_array());
    }

    for s in chunks.into_remainder() {
        *s <<= QUANT_BITS;
    }
}
