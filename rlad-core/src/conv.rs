// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `conv` module provides conversions between the signed 16-bit and normalized 32-bit
//! floating-point sample domains.
//!
//! When the `opt-simd` feature is enabled the conversions run on explicit SIMD lanes, otherwise a
//! scalar implementation is used. Both implementations share this module's interface and agree to
//! within one least-significant bit of the short domain.

use std::cmp;

#[cfg(not(feature = "opt-simd"))]
mod no_simd;
#[cfg(feature = "opt-simd")]
mod simd;

#[cfg(not(feature = "opt-simd"))]
use no_simd as imp;
#[cfg(feature = "opt-simd")]
use simd as imp;

/// The scale factor mapping the signed 16-bit sample domain onto [-1.0, 1.0].
pub const SHORT_SCALE: f32 = 32767.0;

/// Converts signed 16-bit samples to normalized 32-bit floating-point samples, `dst[i] = src[i] /
/// 32767.0`. The conversion stops at the end of the shorter of the two buffers, and the number of
/// samples converted is returned.
pub fn short_to_float(src: &[i16], dst: &mut [f32]) -> usize {
    let count = cmp::min(src.len(), dst.len());
    imp::short_to_float(&src[..count], &mut dst[..count]);
    count
}

/// Converts normalized 32-bit floating-point samples to signed 16-bit samples,
/// `dst[i] = round(src[i] * 32767.0)` saturated to the signed 16-bit range. The conversion stops
/// at the end of the shorter of the two buffers, and the number of samples converted is returned.
///
/// Non-finite inputs are not meaningful samples and their conversion is unspecified; with the
/// current implementations a NaN converts to 0 and infinities saturate.
pub fn float_to_short(src: &[f32], dst: &mut [i16]) -> usize {
    let count = cmp::min(src.len(), dst.len());
    imp::float_to_short(&src[..count], &mut dst[..count]);
    count
}
