// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io;

use crate::errors::Result;

use super::WriteBytes;

/// A `SinkStream` adapts any sequential byte sink implementing [`std::io::Write`] to the
/// [`WriteBytes`] trait, tracking the absolute stream position.
pub struct SinkStream<W: io::Write> {
    inner: W,
    pos: u64,
}

impl<W: io::Write> SinkStream<W> {
    /// Instantiates a new `SinkStream` by taking ownership of the provided sink.
    pub fn new(inner: W) -> Self {
        SinkStream { inner, pos: 0 }
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Unwraps this `SinkStream`, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> WriteBytes for SinkStream<W> {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_buf_exact(&[byte])
    }

    fn write_buf_exact(&mut self, buf: &[u8]) -> Result<()> {
        self.inner.write_all(buf)?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    #[inline(always)]
    fn pos(&self) -> u64 {
        self.pos
    }
}
