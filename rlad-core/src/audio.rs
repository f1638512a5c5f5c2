// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `audio` module provides the channel and signal descriptions shared by the Rlad family.

use std::fmt;

/// The maximum number of channels any Rlad stream may carry.
pub const MAX_CHANNELS: usize = 8;

/// `Channels` is the set of fixed channel layouts supported by the Rlad family. The integer value
/// of each layout is its channel count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channels {
    /// Single channel.
    Mono = 1,
    /// Left and right channels.
    Stereo = 2,
    /// Front and rear channel pairs.
    Quadraphonic = 4,
    /// Front pair, centre, low-frequency effects, and rear pair.
    FiveOne = 6,
    /// Front pair, centre, low-frequency effects, side pair, and rear pair.
    SevenOne = 8,
}

impl Channels {
    /// Gets the number of channels in the layout.
    pub fn count(&self) -> usize {
        *self as usize
    }

    /// Gets the layout with the given channel count, if one exists.
    pub fn try_from_count(count: u8) -> Option<Channels> {
        match count {
            1 => Some(Channels::Mono),
            2 => Some(Channels::Stereo),
            4 => Some(Channels::Quadraphonic),
            6 => Some(Channels::FiveOne),
            8 => Some(Channels::SevenOne),
            _ => None,
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Channels::Mono => write!(f, "mono"),
            Channels::Stereo => write!(f, "stereo"),
            Channels::Quadraphonic => write!(f, "quad"),
            Channels::FiveOne => write!(f, "5.1"),
            Channels::SevenOne => write!(f, "7.1"),
        }
    }
}

/// `SignalSpec` describes the basic characteristics of a signal: its sample rate and channel
/// layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SignalSpec {
    /// The signal's sample rate in Hz.
    pub rate: u32,
    /// The signal's channel layout.
    pub channels: Channels,
}

impl SignalSpec {
    pub fn new(rate: u32, channels: Channels) -> Self {
        SignalSpec { rate, channels }
    }
}

/// `SampleBufMut` is a mutable destination for decoded interleaved samples in either the signed
/// 16-bit or normalized 32-bit floating-point domain.
pub enum SampleBufMut<'a> {
    /// Decode to signed 16-bit samples.
    Short(&'a mut [i16]),
    /// Decode to normalized 32-bit floating-point samples.
    Float(&'a mut [f32]),
}

impl<'a> SampleBufMut<'a> {
    /// Gets the length of the destination in samples.
    pub fn len(&self) -> usize {
        match self {
            SampleBufMut::Short(buf) => buf.len(),
            SampleBufMut::Float(buf) => buf.len(),
        }
    }

    /// Returns true if the destination holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reborrows a sub-range of the destination, starting at sample index `start` and spanning
    /// `len` samples.
    pub fn slice_mut(&mut self, start: usize, len: usize) -> SampleBufMut<'_> {
        match self {
            SampleBufMut::Short(buf) => SampleBufMut::Short(&mut buf[start..start + len]),
            SampleBufMut::Float(buf) => SampleBufMut::Float(&mut buf[start..start + len]),
        }
    }
}
