// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp;
use std::io;

use rlad_core::audio::{Channels, SampleBufMut, SignalSpec};
use rlad_core::codecs::{Encoding, SampleCodec};
use rlad_core::conv;
use rlad_core::errors::{incomplete_data_error, Result};
use rlad_core::io::{ReadBytes, SourceStream};

use rlad_codec::{BlockHeader, RladCodec, FRAMES_PER_BLOCK, MAX_BLOCK_DATA_SIZE};

use log::{debug, warn};

use super::header::StreamHeader;

/// An `RladReader` decodes an Rlad stream block by block.
///
/// Blocks are read strictly in stream order from a sequential byte source; there is no seeking.
/// Reads may request any number of frames: whole blocks are decoded straight into the caller's
/// buffer, and any decoded frames the caller had no room for are carried in an overflow buffer
/// for the next call. After a failed read the stream position and the overflow are undefined and
/// the reader should be discarded.
pub struct RladReader<R: io::Read> {
    stream: SourceStream<R>,
    header: StreamHeader,
    codec: RladCodec,
    payload: Box<[u8]>,
    scratch: Box<[i16]>,
    overflow: Box<[i16]>,
    overflow_pos: usize,
    overflow_len: usize,
    next_block: u32,
    frames_read: u64,
}

impl<R: io::Read> RladReader<R> {
    /// Opens an Rlad stream, parsing and validating its header.
    pub fn open(source: R) -> Result<RladReader<R>> {
        let mut stream = SourceStream::new(source);
        let header = StreamHeader::read_from(&mut stream)?;

        debug!(
            "rlad stream: {}, {} ch, {} Hz, {} block(s), {} live frame(s) in the last",
            header.encoding,
            header.channels,
            header.sample_rate,
            header.block_count,
            header.last_block_frames,
        );

        let codec = RladCodec::try_new(header.encoding, header.channels)?;
        let count = header.channels.count();

        Ok(RladReader {
            stream,
            header,
            codec,
            payload: vec![0u8; MAX_BLOCK_DATA_SIZE].into_boxed_slice(),
            scratch: vec![0i16; FRAMES_PER_BLOCK * count].into_boxed_slice(),
            overflow: vec![0i16; FRAMES_PER_BLOCK * count].into_boxed_slice(),
            overflow_pos: 0,
            overflow_len: 0,
            next_block: 0,
            frames_read: 0,
        })
    }

    /// Gets the stream's channel layout.
    pub fn channels(&self) -> Channels {
        self.header.channels
    }

    /// Gets the stream's sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    /// Gets the stream's encoding.
    pub fn encoding(&self) -> Encoding {
        self.header.encoding
    }

    /// Gets the stream's signal specification.
    pub fn spec(&self) -> SignalSpec {
        SignalSpec::new(self.header.sample_rate, self.header.channels)
    }

    /// Gets the total number of frames in the stream.
    pub fn frame_count(&self) -> u64 {
        self.header.frame_count()
    }

    /// Gets the number of frames that have not been read yet.
    pub fn remaining(&self) -> u64 {
        self.header.frame_count() - self.frames_read
    }

    /// Reads decoded frames into the destination and returns the number of frames read. The
    /// destination length is rounded down to a whole number of frames. Returns 0 once the stream
    /// is exhausted.
    pub fn read(&mut self, mut dst: SampleBufMut<'_>) -> Result<usize> {
        let count = self.header.channels.count();
        let max_frames = dst.len() / count;

        let mut done = 0;

        // Serve the overflow of the previous call first.
        if self.overflow_pos < self.overflow_len {
            let avail = (self.overflow_len - self.overflow_pos) / count;
            let take = cmp::min(avail, max_frames);

            emit(&mut dst, 0, &self.overflow[self.overflow_pos..self.overflow_pos + take * count]);
            self.overflow_pos += take * count;
            done += take;
        }

        while done < max_frames && self.next_block < self.header.block_count {
            let block_header = BlockHeader::read_from(&mut self.stream, self.header.channels)?;

            let data_size = block_header.data_size();
            let got = self.stream.read_buf(&mut self.payload[..data_size])?;
            if got < data_size {
                return incomplete_data_error("block data read", data_size - got);
            }

            let is_last = self.next_block + 1 == self.header.block_count;
            if block_header.is_last() != is_last {
                // The terminal flag is redundant with the block count; trust the count.
                warn!("rlad: block {} terminal flag disagrees with the block count", self.next_block);
            }

            let live =
                if is_last { usize::from(self.header.last_block_frames) } else { FRAMES_PER_BLOCK };

            self.codec.set_block_header(block_header)?;

            let want = max_frames - done;

            if live == FRAMES_PER_BLOCK && want >= FRAMES_PER_BLOCK {
                // A whole live block fits: decode straight into the caller's buffer.
                let block_dst = dst.slice_mut(done * count, FRAMES_PER_BLOCK * count);
                self.codec.decode(&self.payload[..data_size], block_dst)?;
                done += FRAMES_PER_BLOCK;
            }
            else {
                // Stage the block, hand over what fits, and carry the rest in the overflow. A
                // short terminal block always stages so its dead tail is dropped here.
                self.codec
                    .decode(&self.payload[..data_size], SampleBufMut::Short(&mut self.scratch[..]))?;

                let take = cmp::min(want, live);
                emit(&mut dst, done * count, &self.scratch[..take * count]);
                done += take;

                let rest = live - take;
                self.overflow[..rest * count]
                    .copy_from_slice(&self.scratch[take * count..live * count]);
                self.overflow_pos = 0;
                self.overflow_len = rest * count;
            }

            self.next_block += 1;
        }

        self.frames_read += done as u64;
        Ok(done)
    }

    /// Unwraps this `RladReader`, returning the underlying byte source.
    pub fn into_inner(self) -> R {
        self.stream.into_inner()
    }
}

/// Copies decoded samples into the destination, converting when the destination is floating
/// point.
fn emit(dst: &mut SampleBufMut<'_>, offset: usize, src: &[i16]) {
    match dst {
        SampleBufMut::Short(buf) => {
            buf[offset..offset + src.len()].copy_from_slice(src);
        }
        SampleBufMut::Float(buf) => {
            conv::short_to_float(src, &mut buf[offset..offset + src.len()]);
        }
    }
}
