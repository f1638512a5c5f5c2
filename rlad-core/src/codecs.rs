// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `codecs` module provides the traits and support structures necessary to implement audio
//! sample codecs.

use std::fmt;

use crate::audio::{Channels, SampleBufMut};
use crate::errors::Result;

/// An `Encoding` identifies the scheme used to code the samples of an audio stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Uncompressed signed 16-bit interleaved LPCM.
    RawPcm,
    /// Uncompressed 32-bit floating-point interleaved LPCM.
    RawFloat,
    /// Run-length accumulating deltas, bit-exact.
    RladLossless,
    /// Run-length accumulating deltas with a 4-bit requantization pass.
    RladLossy,
}

impl Encoding {
    /// Returns true if the encoding reconstructs its input bit-exactly.
    pub fn is_lossless(&self) -> bool {
        !matches!(*self, Encoding::RladLossy)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Encoding::RawPcm => write!(f, "raw_pcm"),
            Encoding::RawFloat => write!(f, "raw_float"),
            Encoding::RladLossless => write!(f, "rlad_lossless"),
            Encoding::RladLossy => write!(f, "rlad_lossy"),
        }
    }
}

/// A `SampleCodec` implements one encoding's block coding algorithm. It consumes blocks of
/// interleaved signed 16-bit samples and produces coded payloads, and vice versa.
pub trait SampleCodec {
    /// The channel layout the codec was instantiated for.
    fn channels(&self) -> Channels;

    /// The encoding read and written by this codec.
    fn encoding(&self) -> Encoding;

    /// Encodes one block of interleaved samples into `dst`, and returns the number of payload
    /// bytes written.
    fn encode(&mut self, samples: &[i16], dst: &mut [u8]) -> Result<usize>;

    /// Decodes one coded payload into the destination buffer, and returns the number of samples
    /// written.
    fn decode(&mut self, src: &[u8], dst: SampleBufMut<'_>) -> Result<usize>;
}
