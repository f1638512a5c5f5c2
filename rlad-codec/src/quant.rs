// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `quant` module implements the lossy requantization pass: samples are divided by 16 with an
//! arithmetic shift before encoding and multiplied back by 16 after decoding.

#[cfg(not(feature = "opt-simd"))]
mod no_simd;
#[cfg(feature = "opt-simd")]
mod simd;

#[cfg(not(feature = "opt-simd"))]
use no_simd as imp;
#[cfg(feature = "opt-simd")]
use simd as imp;

/// The number of low-order bits discarded by the lossy mode.
pub const QUANT_BITS: u32 = 4;

/// Shifts every sample right by four bits, arithmetically, in place.
pub fn shift_right(samples: &mut [i16]) {
    imp::shift_right(samples);
}

/// Shifts every sample left by four bits in place, restoring the decoded range.
pub fn shift_left(samples: &mut [i16]) {
    imp::shift_left(samples);
}
