// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
// The following lints are allowed in all Rlad crates. Please see the workspace manifest for their
// justification.
#![allow(clippy::comparison_chain)]
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]

//! The Rlad block codec.
//!
//! A block codes 512 frames. Within each channel, samples are reduced to accumulating deltas,
//! grouped into chunks of eight, classified into one of four precision tiers, and bit packed. The
//! per-channel sequence of tiers is run-length compressed into the block header. The lossy
//! variant additionally drops the low four bits of every sample before coding, halving every
//! tier's coded width.

use rlad_core::audio::{Channels, SampleBufMut, MAX_CHANNELS};
use rlad_core::codecs::{Encoding, SampleCodec};
use rlad_core::conv;
use rlad_core::errors::{
    incomplete_data_error, invalid_operation_error, out_of_range_error, unsupported_error, Result,
};

pub mod classify;
pub mod header;
pub mod pack;

mod quant;

pub use classify::{RunHeader, Tier};
pub use header::{BlockHeader, MAX_BLOCK_DATA_SIZE};

use classify::{classify_chunks, compress_runs, compute_deltas};
use pack::{pack_chunk, unpack_chunk};

/// The number of frames coded by every block.
pub const FRAMES_PER_BLOCK: usize = 512;

/// The number of samples in one packed chunk.
pub const SAMPLES_PER_CHUNK: usize = 8;

/// The number of chunks per channel in one block.
pub const CHUNKS_PER_BLOCK: usize = FRAMES_PER_BLOCK / SAMPLES_PER_CHUNK;

/// Rlad block codec supporting the lossless and lossy encodings.
///
/// A codec instance owns its scratch buffers and the header of the block it most recently encoded
/// or was given to decode. Reusing the instance overwrites that header.
pub struct RladCodec {
    channels: Channels,
    encoding: Encoding,
    header: Option<BlockHeader>,
    // One interleaved block: the quantized working copy on encode, the decode staging buffer for
    // floating-point output.
    block: Box<[i16]>,
    // One deinterleaved channel.
    chan: Box<[i16]>,
    // Per-channel delta sequences, concatenated channel by channel.
    deltas: Box<[i16]>,
}

impl RladCodec {
    /// Attempts to instantiate a codec for the given encoding and channel layout. Only the two
    /// Rlad encodings are block coded.
    pub fn try_new(encoding: Encoding, channels: Channels) -> Result<RladCodec> {
        match encoding {
            Encoding::RladLossless | Encoding::RladLossy => (),
            _ => return unsupported_error("rlad: only the rlad encodings are block coded"),
        }

        let count = channels.count();

        Ok(RladCodec {
            channels,
            encoding,
            header: None,
            block: vec![0i16; FRAMES_PER_BLOCK * count].into_boxed_slice(),
            chan: vec![0i16; FRAMES_PER_BLOCK].into_boxed_slice(),
            deltas: vec![0i16; FRAMES_PER_BLOCK * count].into_boxed_slice(),
        })
    }

    /// Gets the header produced by the last encode, or set for the next decode.
    pub fn block_header(&self) -> Option<&BlockHeader> {
        self.header.as_ref()
    }

    /// Sets the header driving the next decode.
    pub fn set_block_header(&mut self, header: BlockHeader) -> Result<()> {
        if header.channels() != self.channels {
            return invalid_operation_error("rlad: block header channel layout mismatch");
        }

        self.header = Some(header);
        Ok(())
    }
}

impl SampleCodec for RladCodec {
    fn channels(&self) -> Channels {
        self.channels
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn encode(&mut self, samples: &[i16], dst: &mut [u8]) -> Result<usize> {
        let RladCodec { channels, encoding, header, block, chan, deltas } = self;

        let count = channels.count();
        let lossless = encoding.is_lossless();

        if samples.len() != FRAMES_PER_BLOCK * count {
            return invalid_operation_error("RLAD encoding must be given exactly 512 frames");
        }

        block.copy_from_slice(samples);
        if !lossless {
            quant::shift_right(block);
        }

        // First pass: deinterleave, reduce to deltas, and classify every channel, producing the
        // run tables and, from them, the payload size.
        let mut new_header = BlockHeader::new(*channels);
        let mut tiers = [[Tier::Tiny; CHUNKS_PER_BLOCK]; MAX_CHANNELS];

        for channel in 0..count {
            for (i, s) in chan.iter_mut().enumerate() {
                *s = block[i * count + channel];
            }

            let chan_deltas =
                &mut deltas[channel * FRAMES_PER_BLOCK..(channel + 1) * FRAMES_PER_BLOCK];

            compute_deltas(chan, chan_deltas);
            classify_chunks(chan_deltas, lossless, &mut tiers[channel])?;

            let mut runs = [RunHeader::from_byte(0); CHUNKS_PER_BLOCK];
            let n_runs = compress_runs(&tiers[channel], &mut runs);
            new_header.set_runs(channel, &runs[..n_runs])?;
        }

        let data_size = new_header.payload_bytes(lossless);
        if dst.len() < data_size {
            return out_of_range_error("rlad: packed destination is smaller than the block payload");
        }

        // Second pass: pack each chunk at its tier's width.
        let mut cursor = 0;

        for channel in 0..count {
            let chan_deltas =
                &deltas[channel * FRAMES_PER_BLOCK..(channel + 1) * FRAMES_PER_BLOCK];

            let chunks = chan_deltas.chunks_exact(SAMPLES_PER_CHUNK);
            for (chunk, tier) in chunks.zip(tiers[channel].iter()) {
                let mut fields = [0i16; SAMPLES_PER_CHUNK];
                fields.copy_from_slice(chunk);
                cursor += pack_chunk(tier.width(lossless), &fields, &mut dst[cursor..]);
            }
        }

        debug_assert_eq!(cursor, data_size);

        new_header.set_data_size(data_size);
        *header = Some(new_header);

        Ok(data_size)
    }

    fn decode(&mut self, src: &[u8], mut dst: SampleBufMut<'_>) -> Result<usize> {
        let RladCodec { channels, encoding, header, block, .. } = self;

        let header = match header.as_ref() {
            Some(header) => header,
            None => return invalid_operation_error("No block header has been set for decoding"),
        };

        let count = channels.count();
        let lossless = encoding.is_lossless();
        let n_samples = FRAMES_PER_BLOCK * count;

        if src.len() < header.data_size() {
            return incomplete_data_error("RLAD data decode", header.data_size() - src.len());
        }
        if dst.len() < n_samples {
            return invalid_operation_error("rlad: decode destination is smaller than one block");
        }

        // The unpack loop below indexes the payload and the destination by the run tables, so the
        // tables must be internally consistent first.
        header.validate(lossless)?;

        // Decode straight into a short destination; stage through the block scratch for
        // floating-point output.
        let out = match &mut dst {
            SampleBufMut::Short(buf) => &mut buf[..n_samples],
            SampleBufMut::Float(_) => &mut block[..n_samples],
        };

        let mut cursor = 0;

        for channel in 0..count {
            let mut acc = header.channel_seed(channel)?;
            let mut sample = channel;

            for run in header.runs(channel)? {
                let width = run.tier().width(lossless);

                for _ in 0..run.count() {
                    let mut fields = [0i16; SAMPLES_PER_CHUNK];
                    cursor += unpack_chunk(width, &src[cursor..], &mut fields);

                    for &delta in fields.iter() {
                        acc = acc.wrapping_add(delta);
                        out[sample] = acc;
                        sample += count;
                    }
                }
            }
        }

        if !lossless {
            quant::shift_left(out);
        }

        if let SampleBufMut::Float(buf) = dst {
            conv::short_to_float(&block[..n_samples], &mut buf[..n_samples]);
        }

        Ok(n_samples)
    }
}

/// Attempts to instantiate the codec for an encoding. The raw LPCM encodings are recognized
/// discriminators but have no block codec.
pub fn make_codec(encoding: Encoding, channels: Channels) -> Result<Box<dyn SampleCodec>> {
    match encoding {
        Encoding::RladLossless | Encoding::RladLossy => {
            Ok(Box::new(RladCodec::try_new(encoding, channels)?))
        }
        Encoding::RawPcm => unsupported_error("raw 16-bit pcm block coding"),
        Encoding::RawFloat => unsupported_error("raw floating-point block coding"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rlad_core::errors::Error;

    fn encode_block(
        encoding: Encoding,
        channels: Channels,
        samples: &[i16],
    ) -> (RladCodec, Vec<u8>) {
        let mut codec = RladCodec::try_new(encoding, channels).unwrap();
        let mut payload = vec![0u8; MAX_BLOCK_DATA_SIZE];

        let written = codec.encode(samples, &mut payload).unwrap();
        payload.truncate(written);

        (codec, payload)
    }

    // Four quarters of rising amplitude: zero on even indices, 5 * 10^(i / 128) on odd indices.
    fn quarters_signal() -> Vec<i16> {
        (0..FRAMES_PER_BLOCK)
            .map(|i| if i % 2 == 0 { 0 } else { (5 * 10i32.pow(i as u32 / 128)) as i16 })
            .collect()
    }

    // A new amplitude every chunk, cycling 5, 50, 500, 5000: the amplitude on each chunk's first
    // sample, zero elsewhere.
    fn all_different_signal() -> Vec<i16> {
        (0..FRAMES_PER_BLOCK)
            .map(|i| {
                if i % 8 == 0 {
                    (5 * 10i32.pow((i as u32 % 32) / 8)) as i16
                }
                else {
                    0
                }
            })
            .collect()
    }

    fn interleave(left: &[i16], right: &[i16]) -> Vec<i16> {
        left.iter().zip(right.iter()).flat_map(|(&l, &r)| [l, r]).collect()
    }

    #[test]
    fn verify_quarters_layout() {
        let (codec, payload) = encode_block(Encoding::RladLossless, Channels::Mono, &quarters_signal());

        assert_eq!(payload.len(), 64 + 128 + 192 + 256);

        let header = codec.block_header().unwrap();
        assert_eq!(header.data_size(), 640);

        let runs = header.runs(0).unwrap();
        assert_eq!(runs.len(), 4);

        for (i, run) in runs.iter().enumerate() {
            assert_eq!(run.tier() as usize, i);
            assert_eq!(run.count(), 16);
            assert_eq!(run.total_samples(), 128);
        }
    }

    #[test]
    fn verify_all_different_layout() {
        let signal = all_different_signal();

        let (codec, payload) = encode_block(Encoding::RladLossless, Channels::Mono, &signal);
        assert_eq!(payload.len(), 640);

        let runs = codec.block_header().unwrap().runs(0).unwrap();
        assert_eq!(runs.len(), 64);

        for (i, run) in runs.iter().enumerate() {
            assert_eq!(run.count(), 1);
            assert_eq!(run.tier() as usize, i % 4);
        }

        // In lossy mode every tier is one notch narrower.
        let (_, payload) = encode_block(Encoding::RladLossy, Channels::Mono, &signal);
        assert_eq!(payload.len(), 32 + 64 + 128 + 192);
    }

    #[test]
    fn verify_stereo_duplicate_layout() {
        let signal = all_different_signal();
        let interleaved = interleave(&signal, &signal);

        let (codec, _) = encode_block(Encoding::RladLossless, Channels::Stereo, &interleaved);

        let header = codec.block_header().unwrap();
        assert_eq!(header.runs(0).unwrap(), header.runs(1).unwrap());
    }

    #[test]
    fn verify_stereo_asymmetric_layout() {
        let left: Vec<i16> =
            (0..FRAMES_PER_BLOCK).map(|i| if i % 2 == 1 { 5 } else { 0 }).collect();
        let right: Vec<i16> =
            (0..FRAMES_PER_BLOCK).map(|i| if i % 2 == 1 { 5000 } else { 0 }).collect();

        let (codec, payload) =
            encode_block(Encoding::RladLossless, Channels::Stereo, &interleave(&left, &right));

        assert_eq!(payload.len(), 256 + 1024);

        let header = codec.block_header().unwrap();

        let left_runs = header.runs(0).unwrap();
        assert_eq!(left_runs.len(), 1);
        assert_eq!(left_runs[0].tier(), Tier::Tiny);
        assert_eq!(left_runs[0].count(), 64);
        assert_eq!(left_runs[0].total_samples(), 512);

        let right_runs = header.runs(1).unwrap();
        assert_eq!(right_runs.len(), 1);
        assert_eq!(right_runs[0].tier(), Tier::Full);
    }

    #[test]
    fn verify_lossless_round_trip() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_0040);

        for &channels in &[Channels::Mono, Channels::Stereo, Channels::FiveOne] {
            let count = channels.count();
            let samples: Vec<i16> =
                (0..FRAMES_PER_BLOCK * count).map(|_| rng.random()).collect();

            let (mut codec, payload) = encode_block(Encoding::RladLossless, channels, &samples);

            let mut decoded = vec![0i16; samples.len()];
            let written = codec.decode(&payload, SampleBufMut::Short(&mut decoded)).unwrap();

            assert_eq!(written, samples.len());
            assert_eq!(decoded, samples, "{}", channels);
        }
    }

    #[test]
    fn verify_lossy_round_trip_quantizes() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_0041);

        let samples: Vec<i16> = (0..FRAMES_PER_BLOCK).map(|_| rng.random()).collect();

        let (mut codec, payload) = encode_block(Encoding::RladLossy, Channels::Mono, &samples);

        let mut decoded = vec![0i16; samples.len()];
        codec.decode(&payload, SampleBufMut::Short(&mut decoded)).unwrap();

        for (&s, &d) in samples.iter().zip(decoded.iter()) {
            assert_eq!(d, (s >> 4) << 4);
        }
    }

    #[test]
    fn verify_float_decode() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_0042);

        let samples: Vec<i16> = (0..FRAMES_PER_BLOCK).map(|_| rng.random()).collect();

        let (mut codec, payload) = encode_block(Encoding::RladLossless, Channels::Mono, &samples);

        let mut decoded = vec![0f32; samples.len()];
        codec.decode(&payload, SampleBufMut::Float(&mut decoded)).unwrap();

        let mut expected = vec![0f32; samples.len()];
        rlad_core::conv::short_to_float(&samples, &mut expected);
        assert_eq!(decoded, expected);
    }

    #[test]
    fn verify_structural_invariants() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_0043);

        let count = Channels::Quadraphonic.count();
        let samples: Vec<i16> = (0..FRAMES_PER_BLOCK * count)
            .map(|_| rng.random_range(-6000..=6000))
            .collect();

        let (codec, payload) = encode_block(Encoding::RladLossless, Channels::Quadraphonic, &samples);

        let header = codec.block_header().unwrap();
        assert_eq!(header.data_size(), payload.len());
        assert_eq!(header.payload_bytes(true), payload.len());

        for channel in 0..count {
            assert_eq!(header.channel_samples(channel).unwrap(), FRAMES_PER_BLOCK);
        }
    }

    #[test]
    fn verify_encode_requires_whole_block() {
        let mut codec = RladCodec::try_new(Encoding::RladLossless, Channels::Mono).unwrap();
        let mut payload = vec![0u8; MAX_BLOCK_DATA_SIZE];

        match codec.encode(&[0i16; 1], &mut payload) {
            Err(Error::InvalidOperation(msg)) => {
                assert!(msg.starts_with("RLAD encoding must"), "{}", msg)
            }
            result => panic!("expected invalid operation, got {:?}", result.err()),
        }
    }

    #[test]
    fn verify_decode_requires_header() {
        let mut codec = RladCodec::try_new(Encoding::RladLossless, Channels::Mono).unwrap();
        let mut decoded = vec![0i16; FRAMES_PER_BLOCK];

        match codec.decode(&[0u8; 16], SampleBufMut::Short(&mut decoded)) {
            Err(Error::InvalidOperation(msg)) => {
                assert!(msg.starts_with("No block header"), "{}", msg)
            }
            result => panic!("expected invalid operation, got {:?}", result.err()),
        }
    }

    #[test]
    fn verify_decode_requires_whole_payload() {
        let (mut codec, payload) =
            encode_block(Encoding::RladLossless, Channels::Mono, &quarters_signal());

        let mut decoded = vec![0i16; FRAMES_PER_BLOCK];

        match codec.decode(&payload[..payload.len() - 3], SampleBufMut::Short(&mut decoded)) {
            Err(Error::IncompleteData { op, missing }) => {
                assert_eq!(op, "RLAD data decode");
                assert_eq!(missing, 3);
            }
            result => panic!("expected incomplete data, got {:?}", result.err()),
        }
    }

    #[test]
    fn verify_decode_rejects_inconsistent_run_tables() {
        let (mut codec, payload) =
            encode_block(Encoding::RladLossless, Channels::Mono, &quarters_signal());

        // Shrink the run table so it no longer covers the block.
        let mut header = codec.block_header().unwrap().clone();
        header.set_runs(0, &[RunHeader::new(Tier::Full, 32)]).unwrap();
        codec.set_block_header(header).unwrap();

        let mut decoded = vec![0i16; FRAMES_PER_BLOCK];
        assert!(matches!(
            codec.decode(&payload, SampleBufMut::Short(&mut decoded)),
            Err(Error::BadFormat { .. })
        ));
    }

    #[test]
    fn verify_lossy_overflow_is_rejected() {
        // Post-quantization deltas of +/-4095 exceed the widest lossy tier.
        let mut samples = vec![0i16; FRAMES_PER_BLOCK];
        samples[0] = i16::MIN;
        samples[1] = i16::MAX;

        let mut codec = RladCodec::try_new(Encoding::RladLossy, Channels::Mono).unwrap();
        let mut payload = vec![0u8; MAX_BLOCK_DATA_SIZE];

        assert!(matches!(codec.encode(&samples, &mut payload), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn verify_raw_encodings_are_unsupported() {
        assert!(matches!(
            make_codec(Encoding::RawPcm, Channels::Mono),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            make_codec(Encoding::RawFloat, Channels::Mono),
            Err(Error::Unsupported(_))
        ));

        let codec = make_codec(Encoding::RladLossy, Channels::Stereo).unwrap();
        assert_eq!(codec.encoding(), Encoding::RladLossy);
        assert_eq!(codec.channels(), Channels::Stereo);
    }
}
