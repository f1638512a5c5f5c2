// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use wide::{f32x4, f32x8};

use crate::util::clamp::clamp_i16;

use super::SHORT_SCALE;

// The wide main loop converts eight samples per iteration, a four-lane pass takes the mid-sized
// remainder, and anything shorter falls through to scalar code.

pub(super) fn short_to_float(src: &[i16], dst: &mut [f32]) {
    debug_assert_eq!(src.len(), dst.len());

    let mut i = 0;

    while src.len() - i >= 8 {
        let v = f32x8::from([
            f32::from(src[i]),
            f32::from(src[i + 1]),
            f32::from(src[i + 2]),
            f32::from(src[i + 3]),
            f32::from(src[i + 4]),
            f32::from(src[i + 5]),
            f32::from(src[i + 6]),
            f32::from(src[i + 7]),
        ]);

        dst[i..i + 8].copy_from_slice(&(v / f32x8::splat(SHORT_SCALE)).to_array());
        i += 8;
    }

    if src.len() - i >= 4 {
        let v = f32x4::from([
            f32::from(src[i]),
            f32::from(src[i + 1]),
            f32::from(src[i + 2]),
            f32::from(src[i + 3]),
        ]);

        dst[i..i + 4].copy_from_slice(&(v / f32x4::splat(SHORT_SCALE)).to_array());
        i += 4;
    }

    while i < src.len() {
        dst[i] = f32::from(src[i]) / SHORT_SCALE;
        i += 1;
    }
}

pub(super) fn float_to_short(src: &[f32], dst: &mut [i16]) {
    debug_assert_eq!(src.len(), dst.len());

    let mut i = 0;

    while src.len() - i >= 8 {
        let v = f32x8::from([
            src[i],
            src[i + 1],
            src[i + 2],
            src[i + 3],
            src[i + 4],
            src[i + 5],
            src[i + 6],
            src[i + 7],
        ]);

        let scaled = (v * f32x8::splat(SHORT_SCALE)).round().to_array();

        for (d, &s) in dst[i..i + 8].iter_mut().zip(scaled.iter()) {
            *d = clamp_i16(s as i32);
        }

        i += 8;
    }

    if src.len() - i >= 4 {
        let v = f32x4::from([src[i], src[i + 1], src[i + 2], src[i + 3]]);

        let scaled = (v * f32x4::splat(SHORT_SCALE)).round().to_array();

        for (d, &s) in dst[i..i + 4].iter_mut().zip(scaled.iter()) {
            *d = clamp_i16(s as i32);
        }

        i += 4;
    }

    while i < src.len() {
        dst[i] = clamp_i16((src[i] * SHORT_SCALE).round() as i32);
        i += 1;
    }
}
