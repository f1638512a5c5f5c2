// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `header` module provides the in-memory and wire representation of a block header.
//!
//! On the wire a block header is a 16-bit size word (bit 15 the terminal flag, bits 0..14 the
//! payload byte length), one run count byte per channel, then each channel's run header bytes in
//! channel order. The packed payload follows immediately.

use rlad_core::audio::{Channels, MAX_CHANNELS};
use rlad_core::errors::{
    bad_format_error, incomplete_header_error, out_of_range_error, Result,
};
use rlad_core::io::{ReadBytes, WriteBytes};

use crate::classify::RunHeader;
use crate::{CHUNKS_PER_BLOCK, FRAMES_PER_BLOCK};

/// The hard format limit on the packed payload size of one block.
pub const MAX_BLOCK_DATA_SIZE: usize = 0x7fff;

/// The terminal flag bit of the block size word.
const LAST_BLOCK_FLAG: u16 = 0x8000;

/// A `BlockHeader` describes one block: its payload size, whether it terminates the stream, and
/// the per-channel run tables that drive unpacking. The run tables are fixed-capacity and live
/// inline; a header never allocates.
#[derive(Clone, Debug)]
pub struct BlockHeader {
    channels: Channels,
    data_size: usize,
    is_last: bool,
    run_counts: [u8; MAX_CHANNELS],
    runs: [[RunHeader; CHUNKS_PER_BLOCK]; MAX_CHANNELS],
}

impl BlockHeader {
    /// Creates an empty header for the given channel layout.
    pub fn new(channels: Channels) -> BlockHeader {
        BlockHeader {
            channels,
            data_size: 0,
            is_last: false,
            run_counts: [0; MAX_CHANNELS],
            runs: [[RunHeader::from_byte(0); CHUNKS_PER_BLOCK]; MAX_CHANNELS],
        }
    }

    /// Gets the channel layout the header describes.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Gets the packed payload size in bytes.
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Sets the packed payload size in bytes.
    pub fn set_data_size(&mut self, data_size: usize) {
        debug_assert!(data_size <= MAX_BLOCK_DATA_SIZE);
        self.data_size = data_size;
    }

    /// Returns true if the block terminates the stream.
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// Sets whether the block terminates the stream.
    pub fn set_last(&mut self, is_last: bool) {
        self.is_last = is_last;
    }

    /// Gets the run table of the given channel.
    pub fn runs(&self, channel: usize) -> Result<&[RunHeader]> {
        if channel >= self.channels.count() {
            return out_of_range_error("rlad: channel index exceeds the channel layout");
        }

        Ok(&self.runs[channel][..usize::from(self.run_counts[channel])])
    }

    /// Replaces the run table of the given channel.
    pub fn set_runs(&mut self, channel: usize, runs: &[RunHeader]) -> Result<()> {
        if channel >= self.channels.count() {
            return out_of_range_error("rlad: channel index exceeds the channel layout");
        }
        if runs.len() > CHUNKS_PER_BLOCK {
            return out_of_range_error("rlad: channel run table exceeds 64 runs");
        }

        self.runs[channel][..runs.len()].copy_from_slice(runs);
        self.run_counts[channel] = runs.len() as u8;
        Ok(())
    }

    /// Gets the delta accumulator seed of the given channel. Every block anchors each channel's
    /// delta chain at zero, which is what makes blocks independently decodable.
    pub fn channel_seed(&self, channel: usize) -> Result<i16> {
        if channel >= self.channels.count() {
            return out_of_range_error("rlad: channel index exceeds the channel layout");
        }

        Ok(0)
    }

    /// Computes the payload size implied by the run tables for the given mode, in bytes.
    pub fn payload_bytes(&self, lossless: bool) -> usize {
        let mut bits = 0usize;

        for channel in 0..self.channels.count() {
            for run in &self.runs[channel][..usize::from(self.run_counts[channel])] {
                bits += run.tier().width(lossless) as usize * run.total_samples() as usize;
            }
        }

        bits / 8
    }

    /// Computes the number of samples covered by the given channel's run table.
    pub fn channel_samples(&self, channel: usize) -> Result<usize> {
        Ok(self.runs(channel)?.iter().map(|r| r.total_samples() as usize).sum())
    }

    /// Checks the structural invariants the decoder relies on: every channel's runs must cover
    /// exactly one block, and the run tables must agree with the stated payload size.
    pub fn validate(&self, lossless: bool) -> Result<()> {
        for channel in 0..self.channels.count() {
            if self.channel_samples(channel)? != FRAMES_PER_BLOCK {
                return bad_format_error("RLAD", "channel runs do not cover the block");
            }
        }

        if self.payload_bytes(lossless) != self.data_size {
            return bad_format_error("RLAD", "run tables disagree with the block size");
        }

        Ok(())
    }

    /// Reads a block header from the stream.
    pub fn read_from<B: ReadBytes>(reader: &mut B, channels: Channels) -> Result<BlockHeader> {
        let mut word = [0u8; 2];
        if reader.read_buf(&mut word)? < word.len() {
            return incomplete_header_error("block size");
        }
        let word = u16::from_le_bytes(word);

        let mut header = BlockHeader::new(channels);
        header.data_size = usize::from(word & !LAST_BLOCK_FLAG);
        header.is_last = word & LAST_BLOCK_FLAG != 0;

        let count = channels.count();
        let mut run_counts = [0u8; MAX_CHANNELS];
        if reader.read_buf(&mut run_counts[..count])? < count {
            return incomplete_header_error("run counts");
        }

        for (channel, &run_count) in run_counts[..count].iter().enumerate() {
            if usize::from(run_count) > CHUNKS_PER_BLOCK {
                return bad_format_error("RLAD", "channel run count exceeds 64");
            }

            let mut bytes = [0u8; CHUNKS_PER_BLOCK];
            let len = usize::from(run_count);
            if reader.read_buf(&mut bytes[..len])? < len {
                return incomplete_header_error("run headers");
            }

            for (run, &byte) in header.runs[channel][..len].iter_mut().zip(bytes.iter()) {
                *run = RunHeader::from_byte(byte);
            }
            header.run_counts[channel] = run_count;
        }

        Ok(header)
    }

    /// Writes the block header to the stream.
    pub fn write_to<B: WriteBytes>(&self, writer: &mut B) -> Result<()> {
        let mut word = self.data_size as u16 & !LAST_BLOCK_FLAG;
        if self.is_last {
            word |= LAST_BLOCK_FLAG;
        }
        writer.write_u16(word)?;

        let count = self.channels.count();
        writer.write_buf_exact(&self.run_counts[..count])?;

        for channel in 0..count {
            let mut bytes = [0u8; CHUNKS_PER_BLOCK];
            let len = usize::from(self.run_counts[channel]);

            for (byte, run) in bytes[..len].iter_mut().zip(self.runs[channel].iter()) {
                *byte = run.byte();
            }
            writer.write_buf_exact(&bytes[..len])?;
        }

        Ok(())
    }
}
