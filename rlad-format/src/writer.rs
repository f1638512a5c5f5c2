// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp;
use std::io;

use rlad_core::audio::SignalSpec;
use rlad_core::codecs::{Encoding, SampleCodec};
use rlad_core::errors::{
    incomplete_frame_error, invalid_operation_error, out_of_range_error, Result,
};
use rlad_core::io::{SinkStream, WriteBytes};

use rlad_codec::{RladCodec, FRAMES_PER_BLOCK, MAX_BLOCK_DATA_SIZE};

use super::header::StreamHeader;

/// An `RladWriter` encodes interleaved samples into an Rlad stream.
///
/// The stream header carries the block count, so the total number of frames must be known when
/// the writer is created; the header is then written immediately and the sink is never seeked.
/// Samples are accumulated into 512-frame blocks and each block is encoded and written as it
/// fills. The terminal block is zero padded past its live frames.
pub struct RladWriter<W: io::Write> {
    stream: SinkStream<W>,
    header: StreamHeader,
    codec: RladCodec,
    pending: Box<[i16]>,
    pending_len: usize,
    payload: Box<[u8]>,
    frames_written: u64,
    blocks_written: u32,
}

impl<W: io::Write> RladWriter<W> {
    /// Creates a writer promising exactly `n_frames` frames, and writes the stream header.
    pub fn new(sink: W, spec: SignalSpec, encoding: Encoding, n_frames: u64) -> Result<RladWriter<W>> {
        if n_frames == 0 {
            return invalid_operation_error("rlad: a stream must code at least one frame");
        }

        let blocks = (n_frames + FRAMES_PER_BLOCK as u64 - 1) / FRAMES_PER_BLOCK as u64;
        let block_count = match u32::try_from(blocks) {
            Ok(count) => count,
            Err(_) => return out_of_range_error("rlad: frame count exceeds the format limit"),
        };

        let last_block_frames =
            (n_frames - u64::from(block_count - 1) * FRAMES_PER_BLOCK as u64) as u16;

        let codec = RladCodec::try_new(encoding, spec.channels)?;

        let header = StreamHeader {
            encoding,
            channels: spec.channels,
            last_block_frames,
            sample_rate: spec.rate,
            block_count,
        };

        let mut stream = SinkStream::new(sink);
        header.write_to(&mut stream)?;

        let count = spec.channels.count();

        Ok(RladWriter {
            stream,
            header,
            codec,
            pending: vec![0i16; FRAMES_PER_BLOCK * count].into_boxed_slice(),
            pending_len: 0,
            payload: vec![0u8; MAX_BLOCK_DATA_SIZE].into_boxed_slice(),
            frames_written: 0,
            blocks_written: 0,
        })
    }

    /// Gets the total number of frames the stream was created for.
    pub fn frame_count(&self) -> u64 {
        self.header.frame_count()
    }

    /// Submits interleaved samples. The slice must hold a whole number of frames, and the total
    /// submitted may not exceed the frame count the writer was created with.
    pub fn write(&mut self, samples: &[i16]) -> Result<()> {
        let count = self.header.channels.count();

        if samples.len() % count != 0 {
            return incomplete_frame_error("RLAD frame write", samples.len() % count);
        }

        let frames = (samples.len() / count) as u64;
        if self.frames_written + frames > self.header.frame_count() {
            return invalid_operation_error("rlad: more frames submitted than promised");
        }

        let mut consumed = 0;

        while consumed < samples.len() {
            let space = self.pending.len() - self.pending_len;
            let take = cmp::min(space, samples.len() - consumed);

            self.pending[self.pending_len..self.pending_len + take]
                .copy_from_slice(&samples[consumed..consumed + take]);
            self.pending_len += take;
            consumed += take;

            if self.pending_len == self.pending.len() {
                self.flush_block()?;
            }
        }

        self.frames_written += frames;
        Ok(())
    }

    /// Encodes and writes the pending block, zero padding any dead tail.
    fn flush_block(&mut self) -> Result<()> {
        for s in self.pending[self.pending_len..].iter_mut() {
            *s = 0;
        }

        let written = self.codec.encode(&self.pending, &mut self.payload)?;

        let mut block_header = match self.codec.block_header() {
            Some(header) => header.clone(),
            None => return invalid_operation_error("rlad: encoder produced no block header"),
        };
        block_header.set_last(self.blocks_written + 1 == self.header.block_count);

        block_header.write_to(&mut self.stream)?;
        self.stream.write_buf_exact(&self.payload[..written])?;

        self.blocks_written += 1;
        self.pending_len = 0;
        Ok(())
    }

    /// Flushes the terminal block and finishes the stream, returning the underlying sink. Fails
    /// if fewer frames were submitted than promised.
    pub fn finish(mut self) -> Result<W> {
        if self.pending_len > 0 {
            self.flush_block()?;
        }

        if self.frames_written != self.header.frame_count()
            || self.blocks_written != self.header.block_count
        {
            return invalid_operation_error("rlad: stream finished short of the promised frames");
        }

        self.stream.flush()?;
        Ok(self.stream.into_inner())
    }
}
