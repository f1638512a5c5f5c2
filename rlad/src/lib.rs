// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! # Project Rlad
//!
//! Rlad is a 100% pure Rust implementation of the Rlad audio codec: a block format coding
//! interleaved 16-bit LPCM as run-length compressed accumulating deltas, in a bit-exact lossless
//! variant and a lossy variant that trades the low four bits of every sample for half the coded
//! size.
//!
//! The family is split the same way the format is layered:
//!
//! * [`core`]: shared error, I/O, channel, and sample-conversion primitives.
//! * [`codec`]: the block codec with delta classification, run compression, and bit packing.
//! * [`format`]: the stream container with the file header, block-stream reader, and writer.
//!
//! # Usage
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use rlad::core::audio::SampleBufMut;
//! use rlad::format::RladReader;
//!
//! fn main() -> rlad::core::errors::Result<()> {
//!     let file = File::open("tone.rlad")?;
//!     let mut reader = RladReader::open(BufReader::new(file))?;
//!
//!     let channels = reader.channels().count();
//!     let mut frames = vec![0i16; 1024 * channels];
//!
//!     loop {
//!         let read = reader.read(SampleBufMut::Short(&mut frames))?;
//!         if read == 0 {
//!             break;
//!         }
//!         // Use frames[..read * channels].
//!     }
//!
//!     Ok(())
//! }
//! ```

pub use rlad_codec as codec;
pub use rlad_core as core;
pub use rlad_format as format;
