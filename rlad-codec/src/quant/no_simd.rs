// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::QUANT_BITS;

pub(super) fn shift_right(samples: &mut [i16]) {
    for s in samples.iter_mut() {
        *s >>= QUANT_BITS;
    }
}

pub(super) fn shift_left(samples: &mut [i16]) {
    for s in samples.iter_mut() {
        *s <<= QUANT_BITS;
    }
}
