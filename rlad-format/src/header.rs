// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rlad_core::audio::Channels;
use rlad_core::codecs::Encoding;
use rlad_core::errors::{bad_format_error, incomplete_header_error, Result};
use rlad_core::io::{ReadBytes, WriteBytes};

use rlad_codec::FRAMES_PER_BLOCK;

/// The Rlad start of stream marker: "RLAD" in ASCII.
const RLAD_STREAM_MARKER: [u8; 4] = *b"RLAD";

/// The flag byte marking a lossless stream. Lossy streams carry 0x00.
const LOSSLESS_FLAG: u8 = 0xff;

/// A `StreamHeader` is the 16-byte header opening every Rlad stream: the stream marker, the
/// lossless flag, the channel count, the number of live frames in the terminal block, the sample
/// rate, and the block count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StreamHeader {
    /// The encoding of every block in the stream.
    pub encoding: Encoding,
    /// The channel layout.
    pub channels: Channels,
    /// The number of live frames in the terminal block, in [1, 512].
    pub last_block_frames: u16,
    /// The sample rate in Hz.
    pub sample_rate: u32,
    /// The total number of blocks in the stream.
    pub block_count: u32,
}

impl StreamHeader {
    /// Gets the total number of live frames in the stream.
    pub fn frame_count(&self) -> u64 {
        u64::from(self.block_count - 1) * FRAMES_PER_BLOCK as u64
            + u64::from(self.last_block_frames)
    }

    /// Reads and validates a stream header.
    pub fn read_from<B: ReadBytes>(reader: &mut B) -> Result<StreamHeader> {
        let mut bytes = [0u8; 16];
        if reader.read_buf(&mut bytes)? < bytes.len() {
            return incomplete_header_error("stream header");
        }

        if bytes[0..4] != RLAD_STREAM_MARKER {
            return bad_format_error("RLAD", "missing stream marker");
        }

        let encoding = match bytes[4] {
            LOSSLESS_FLAG => Encoding::RladLossless,
            0x00 => Encoding::RladLossy,
            _ => return bad_format_error("RLAD", "invalid lossless flag"),
        };

        let channels = match Channels::try_from_count(bytes[5]) {
            Some(channels) => channels,
            None => return bad_format_error("RLAD", "invalid channel count"),
        };

        let last_block_frames = u16::from_le_bytes([bytes[6], bytes[7]]);
        if last_block_frames < 1 || last_block_frames > FRAMES_PER_BLOCK as u16 {
            return bad_format_error("RLAD", "invalid terminal block frame count");
        }

        let sample_rate = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        if sample_rate == 0 {
            return bad_format_error("RLAD", "invalid sample rate");
        }

        let block_count = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
        if block_count == 0 {
            return bad_format_error("RLAD", "invalid block count");
        }

        Ok(StreamHeader { encoding, channels, last_block_frames, sample_rate, block_count })
    }

    /// Writes the stream header.
    pub fn write_to<B: WriteBytes>(&self, writer: &mut B) -> Result<()> {
        writer.write_buf_exact(&RLAD_STREAM_MARKER)?;
        writer.write_u8(if self.encoding.is_lossless() { LOSSLESS_FLAG } else { 0x00 })?;
        writer.write_u8(self.channels.count() as u8)?;
        writer.write_u16(self.last_block_frames)?;
        writer.write_u32(self.sample_rate)?;
        writer.write_u32(self.block_count)?;
        Ok(())
    }
}
