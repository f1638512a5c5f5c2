// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::util::clamp::clamp_i16;

use super::SHORT_SCALE;

pub(super) fn short_to_float(src: &[i16], dst: &mut [f32]) {
    debug_assert_eq!(src.len(), dst.len());

    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = f32::from(s) / SHORT_SCALE;
    }
}

pub(super) fn float_to_short(src: &[f32], dst: &mut [i16]) {
    debug_assert_eq!(src.len(), dst.len());

    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = clamp_i16((s * SHORT_SCALE).round() as i32);
    }
}
