// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp;
use std::io;

use crate::errors::{Error, Result};

use super::ReadBytes;

/// A `SourceStream` adapts any sequential byte source implementing [`std::io::Read`] to the
/// [`ReadBytes`] trait, tracking the absolute stream position.
///
/// The source may be unseekable; a `SourceStream` never seeks.
pub struct SourceStream<R: io::Read> {
    inner: R,
    pos: u64,
}

impl<R: io::Read> SourceStream<R> {
    /// Instantiates a new `SourceStream` by taking ownership of the provided source.
    pub fn new(inner: R) -> Self {
        SourceStream { inner, pos: 0 }
    }

    /// Unwraps this `SourceStream`, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Pulls bytes from the source until `buf` is full or the source is exhausted. Interrupted
    /// reads are retried.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut total = 0;

        while total < buf.len() {
            match self.inner.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(count) => total += count,
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => (),
                Err(err) => return Err(Error::IoError(err)),
            }
        }

        self.pos += total as u64;
        Ok(total)
    }
}

impl<R: io::Read> ReadBytes for SourceStream<R> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_buf_exact(&mut byte)?;
        Ok(byte[0])
    }

    #[inline(always)]
    fn read_double_bytes(&mut self) -> Result<[u8; 2]> {
        let mut bytes = [0u8; 2];
        self.read_buf_exact(&mut bytes)?;
        Ok(bytes)
    }

    #[inline(always)]
    fn read_quad_bytes(&mut self) -> Result<[u8; 4]> {
        let mut bytes = [0u8; 4];
        self.read_buf_exact(&mut bytes)?;
        Ok(bytes)
    }

    fn read_buf(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.fill(buf)
    }

    fn read_buf_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let count = self.fill(buf)?;

        if count < buf.len() {
            return Err(Error::IoError(io::Error::from(io::ErrorKind::UnexpectedEof)));
        }

        Ok(())
    }

    fn ignore_bytes(&mut self, count: u64) -> Result<()> {
        let mut scratch = [0u8; 1024];
        let mut remaining = count;

        while remaining > 0 {
            let len = cmp::min(remaining, scratch.len() as u64) as usize;
            self.read_buf_exact(&mut scratch[..len])?;
            remaining -= len as u64;
        }

        Ok(())
    }

    #[inline(always)]
    fn pos(&self) -> u64 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn verify_read_accessors() {
        let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xff];
        let mut stream = SourceStream::new(Cursor::new(data));

        assert_eq!(stream.read_u8().unwrap(), 0x01);
        assert_eq!(stream.read_u16().unwrap(), 0x1234);
        assert_eq!(stream.read_u32().unwrap(), 0x12345678);
        assert_eq!(stream.pos(), 7);

        let mut rest = [0u8; 4];
        assert_eq!(stream.read_buf(&mut rest).unwrap(), 1);
        assert_eq!(rest[0], 0xff);
    }

    #[test]
    fn verify_exact_read_fails_at_eos() {
        let mut stream = SourceStream::new(Cursor::new([0u8; 3]));

        let mut buf = [0u8; 4];
        assert!(matches!(stream.read_buf_exact(&mut buf), Err(Error::IoError(_))));
    }
}
