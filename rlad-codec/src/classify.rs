// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `classify` module computes per-channel delta sequences and groups them into runs of
//! equal-precision chunks.

use std::fmt;

use rlad_core::errors::{out_of_range_error, Result};

use crate::{CHUNKS_PER_BLOCK, SAMPLES_PER_CHUNK};

/// `Tier` is the precision class of one chunk of deltas. Each tier maps to a coded bit width, one
/// notch narrower in lossy mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// The narrowest tier: 4 coded bits, or 2 in lossy mode.
    Tiny = 0,
    /// 8 coded bits, or 4 in lossy mode.
    Small = 1,
    /// 12 coded bits, or 8 in lossy mode.
    Medium = 2,
    /// The widest tier: 16 coded bits, or 12 in lossy mode.
    Full = 3,
}

impl Tier {
    /// All tiers, narrowest first.
    const ALL: [Tier; 4] = [Tier::Tiny, Tier::Small, Tier::Medium, Tier::Full];

    /// Gets the coded bits per delta for this tier.
    pub fn width(&self, lossless: bool) -> u32 {
        match (*self, lossless) {
            (Tier::Tiny, true) => 4,
            (Tier::Small, true) => 8,
            (Tier::Medium, true) => 12,
            (Tier::Full, true) => 16,
            (Tier::Tiny, false) => 2,
            (Tier::Small, false) => 4,
            (Tier::Medium, false) => 8,
            (Tier::Full, false) => 12,
        }
    }

    /// Gets the tier stored at the given two-bit index.
    fn from_index(index: u8) -> Tier {
        match index & 0x3 {
            0 => Tier::Tiny,
            1 => Tier::Small,
            2 => Tier::Medium,
            _ => Tier::Full,
        }
    }

    /// Returns true if every delta of the chunk fits this tier's signed coded range.
    fn fits(&self, chunk: &[i16], lossless: bool) -> bool {
        let width = self.width(lossless);
        let min = -(1i32 << (width - 1));
        let max = (1i32 << (width - 1)) - 1;

        chunk.iter().all(|&d| i32::from(d) >= min && i32::from(d) <= max)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Tier::Tiny => write!(f, "tiny"),
            Tier::Small => write!(f, "small"),
            Tier::Medium => write!(f, "medium"),
            Tier::Full => write!(f, "full"),
        }
    }
}

/// A `RunHeader` packs the tier and chunk count of one run into a single byte: bits 6..7 hold the
/// tier, bits 0..5 the chunk count minus one. Every byte value is a valid run header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunHeader(u8);

impl RunHeader {
    /// Builds a run header from a tier and a chunk count in [1, 64].
    pub fn new(tier: Tier, count: u32) -> RunHeader {
        debug_assert!(count >= 1 && count <= CHUNKS_PER_BLOCK as u32);
        RunHeader(((tier as u8) << 6) | (((count - 1) as u8) & 0x3f))
    }

    /// Builds a run header from its wire byte.
    pub fn from_byte(byte: u8) -> RunHeader {
        RunHeader(byte)
    }

    /// Gets the wire byte of the run header.
    pub fn byte(&self) -> u8 {
        self.0
    }

    /// Gets the precision tier of the run.
    pub fn tier(&self) -> Tier {
        Tier::from_index(self.0 >> 6)
    }

    /// Gets the number of chunks in the run, in [1, 64].
    pub fn count(&self) -> u32 {
        u32::from(self.0 & 0x3f) + 1
    }

    /// Gets the number of samples covered by the run.
    pub fn total_samples(&self) -> u32 {
        self.count() * SAMPLES_PER_CHUNK as u32
    }
}

/// Computes the delta sequence of one channel. The accumulator is seeded at zero, so the first
/// delta is the first sample itself. Differences wrap in 16 bits; the decoder's wrapping running
/// sum reverses them exactly.
pub fn compute_deltas(samples: &[i16], deltas: &mut [i16]) {
    debug_assert_eq!(samples.len(), deltas.len());

    let mut last = 0i16;

    for (d, &s) in deltas.iter_mut().zip(samples.iter()) {
        *d = s.wrapping_sub(last);
        last = s;
    }
}

/// Classifies each chunk of deltas into the narrowest tier whose signed range contains every
/// delta of the chunk. In lossy mode a delta outside the widest (12-bit) coded range cannot be
/// represented and classification fails.
pub fn classify_chunks(deltas: &[i16], lossless: bool, tiers: &mut [Tier]) -> Result<()> {
    debug_assert_eq!(deltas.len(), tiers.len() * SAMPLES_PER_CHUNK);

    for (chunk, tier) in deltas.chunks_exact(SAMPLES_PER_CHUNK).zip(tiers.iter_mut()) {
        *tier = match Tier::ALL.iter().find(|t| t.fits(chunk, lossless)) {
            Some(&t) => t,
            None => return out_of_range_error("rlad: delta overflows the widest lossy tier"),
        };
    }

    Ok(())
}

/// Folds adjacent equal tiers into run headers, writing them into `runs` and returning the number
/// of runs produced.
pub fn compress_runs(tiers: &[Tier], runs: &mut [RunHeader; CHUNKS_PER_BLOCK]) -> usize {
    debug_assert!(tiers.len() <= CHUNKS_PER_BLOCK);

    let mut len = 0;
    let mut current: Option<(Tier, u32)> = None;

    for &tier in tiers {
        current = match current {
            Some((t, count)) if t == tier => Some((t, count + 1)),
            Some((t, count)) => {
                runs[len] = RunHeader::new(t, count);
                len += 1;
                Some((tier, 1))
            }
            None => Some((tier, 1)),
        };
    }

    if let Some((t, count)) = current {
        runs[len] = RunHeader::new(t, count);
        len += 1;
    }

    len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_one(chunk: [i16; 8], lossless: bool) -> Result<Tier> {
        let mut tiers = [Tier::Tiny; 1];
        classify_chunks(&chunk, lossless, &mut tiers)?;
        Ok(tiers[0])
    }

    #[test]
    fn verify_narrowest_tier_selection() {
        // All-zero chunks are always tiny.
        assert_eq!(classify_one([0; 8], true).unwrap(), Tier::Tiny);
        assert_eq!(classify_one([0; 8], false).unwrap(), Tier::Tiny);

        // Lossless boundaries.
        assert_eq!(classify_one([7, 0, 0, 0, 0, 0, 0, -8], true).unwrap(), Tier::Tiny);
        assert_eq!(classify_one([8, 0, 0, 0, 0, 0, 0, 0], true).unwrap(), Tier::Small);
        assert_eq!(classify_one([-9, 0, 0, 0, 0, 0, 0, 0], true).unwrap(), Tier::Small);
        assert_eq!(classify_one([127, -128, 0, 0, 0, 0, 0, 0], true).unwrap(), Tier::Small);
        assert_eq!(classify_one([128, 0, 0, 0, 0, 0, 0, 0], true).unwrap(), Tier::Medium);
        assert_eq!(classify_one([2047, -2048, 0, 0, 0, 0, 0, 0], true).unwrap(), Tier::Medium);
        assert_eq!(classify_one([2048, 0, 0, 0, 0, 0, 0, 0], true).unwrap(), Tier::Full);
        assert_eq!(classify_one([i16::MIN, i16::MAX, 0, 0, 0, 0, 0, 0], true).unwrap(), Tier::Full);

        // Lossy boundaries are one notch narrower.
        assert_eq!(classify_one([1, -2, 0, 0, 0, 0, 0, 0], false).unwrap(), Tier::Tiny);
        assert_eq!(classify_one([2, 0, 0, 0, 0, 0, 0, 0], false).unwrap(), Tier::Small);
        assert_eq!(classify_one([7, -8, 0, 0, 0, 0, 0, 0], false).unwrap(), Tier::Small);
        assert_eq!(classify_one([8, 0, 0, 0, 0, 0, 0, 0], false).unwrap(), Tier::Medium);
        assert_eq!(classify_one([127, -128, 0, 0, 0, 0, 0, 0], false).unwrap(), Tier::Medium);
        assert_eq!(classify_one([2047, -2048, 0, 0, 0, 0, 0, 0], false).unwrap(), Tier::Full);
    }

    #[test]
    fn verify_lossy_overflow_is_rejected() {
        assert!(classify_one([2048, 0, 0, 0, 0, 0, 0, 0], false).is_err());
        assert!(classify_one([-2049, 0, 0, 0, 0, 0, 0, 0], false).is_err());
    }

    #[test]
    fn verify_deltas_wrap() {
        let samples = [100i16, 90, 32767, -32768, -32768];
        let mut deltas = [0i16; 5];
        compute_deltas(&samples, &mut deltas);

        // Seeded at zero, then wrapping differences.
        assert_eq!(deltas, [100, -10, 32677, 1, 0]);

        // The decoder's wrapping sum reverses them.
        let mut acc = 0i16;
        for (&d, &s) in deltas.iter().zip(samples.iter()) {
            acc = acc.wrapping_add(d);
            assert_eq!(acc, s);
        }
    }

    #[test]
    fn verify_run_compression() {
        use Tier::{Full, Small, Tiny};

        let tiers = [Tiny, Tiny, Small, Small, Small, Full];
        let mut runs = [RunHeader::from_byte(0); CHUNKS_PER_BLOCK];
        let count = compress_runs(&tiers, &mut runs);

        assert_eq!(count, 3);
        assert_eq!((runs[0].tier(), runs[0].count()), (Tiny, 2));
        assert_eq!((runs[1].tier(), runs[1].count()), (Small, 3));
        assert_eq!((runs[2].tier(), runs[2].count()), (Full, 1));

        let total: u32 = runs[..count].iter().map(|r| r.total_samples()).sum();
        assert_eq!(total, tiers.len() as u32 * SAMPLES_PER_CHUNK as u32);
    }

    #[test]
    fn verify_single_run_covers_block() {
        let tiers = [Tier::Medium; CHUNKS_PER_BLOCK];
        let mut runs = [RunHeader::from_byte(0); CHUNKS_PER_BLOCK];
        let count = compress_runs(&tiers, &mut runs);

        assert_eq!(count, 1);
        assert_eq!(runs[0].count(), 64);
        assert_eq!(runs[0].total_samples(), 512);
    }

    #[test]
    fn verify_run_header_byte() {
        assert_eq!(RunHeader::new(Tier::Tiny, 1).byte(), 0x00);
        assert_eq!(RunHeader::new(Tier::Full, 64).byte(), 0xff);
        assert_eq!(RunHeader::new(Tier::Small, 17).byte(), 0x50);

        for byte in 0..=u8::MAX {
            let run = RunHeader::from_byte(byte);
            assert_eq!(RunHeader::new(run.tier(), run.count()).byte(), byte);
        }
    }
}
