// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `io` module implements byte-level I/O over sequential byte sources and sinks.
//!
//! All multi-byte integers read and written by the Rlad family are little-endian. Readers and
//! writers operating on bytes of data implement the [`ReadBytes`] and [`WriteBytes`] traits
//! respectively. Arbitrary `std::io` sources and sinks are adapted to these traits by
//! [`SourceStream`] and [`SinkStream`].

mod sink_stream;
mod source_stream;

pub use sink_stream::SinkStream;
pub use source_stream::SourceStream;

use crate::errors::Result;

/// `ReadBytes` provides methods to read bytes and interpret them as little-endian unsigned or
/// signed integers of standard widths.
pub trait ReadBytes {
    /// Reads a single byte from the stream and returns it or an error.
    fn read_byte(&mut self) -> Result<u8>;

    /// Reads two bytes from the stream and returns them in read-order or an error.
    fn read_double_bytes(&mut self) -> Result<[u8; 2]>;

    /// Reads four bytes from the stream and returns them in read-order or an error.
    fn read_quad_bytes(&mut self) -> Result<[u8; 4]>;

    /// Reads up-to the number of bytes required to fill `buf`, and returns the number of bytes
    /// actually read. A count smaller than the buffer length indicates the end of the stream.
    fn read_buf(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Reads exactly the number of bytes required to fill the provided buffer or returns an
    /// error.
    fn read_buf_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Reads a single unsigned byte from the stream and returns it or an error.
    #[inline(always)]
    fn read_u8(&mut self) -> Result<u8> {
        self.read_byte()
    }

    /// Reads two bytes from the stream and interprets them as an unsigned 16-bit little-endian
    /// integer or returns an error.
    #[inline(always)]
    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_double_bytes()?))
    }

    /// Reads two bytes from the stream and interprets them as a signed 16-bit little-endian
    /// integer or returns an error.
    #[inline(always)]
    fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_double_bytes()?))
    }

    /// Reads four bytes from the stream and interprets them as an unsigned 32-bit little-endian
    /// integer or returns an error.
    #[inline(always)]
    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_quad_bytes()?))
    }

    /// Ignores the specified number of bytes from the stream or returns an error.
    fn ignore_bytes(&mut self, count: u64) -> Result<()>;

    /// Gets the position of the stream.
    fn pos(&self) -> u64;
}

impl<'b, R: ReadBytes> ReadBytes for &'b mut R {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8> {
        (*self).read_byte()
    }

    #[inline(always)]
    fn read_double_bytes(&mut self) -> Result<[u8; 2]> {
        (*self).read_double_bytes()
    }

    #[inline(always)]
    fn read_quad_bytes(&mut self) -> Result<[u8; 4]> {
        (*self).read_quad_bytes()
    }

    #[inline(always)]
    fn read_buf(&mut self, buf: &mut [u8]) -> Result<usize> {
        (*self).read_buf(buf)
    }

    #[inline(always)]
    fn read_buf_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (*self).read_buf_exact(buf)
    }

    #[inline(always)]
    fn ignore_bytes(&mut self, count: u64) -> Result<()> {
        (*self).ignore_bytes(count)
    }

    #[inline(always)]
    fn pos(&self) -> u64 {
        (**self).pos()
    }
}

/// `WriteBytes` provides methods to write bytes and encode little-endian unsigned integers of
/// standard widths.
pub trait WriteBytes {
    /// Writes a single byte to the stream or returns an error.
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// Writes the entire buffer to the stream or returns an error.
    fn write_buf_exact(&mut self, buf: &[u8]) -> Result<()>;

    /// Writes a single unsigned byte to the stream or returns an error.
    #[inline(always)]
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_byte(value)
    }

    /// Writes an unsigned 16-bit integer to the stream in little-endian byte order or returns an
    /// error.
    #[inline(always)]
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_buf_exact(&value.to_le_bytes())
    }

    /// Writes an unsigned 32-bit integer to the stream in little-endian byte order or returns an
    /// error.
    #[inline(always)]
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_buf_exact(&value.to_le_bytes())
    }

    /// Gets the position of the stream.
    fn pos(&self) -> u64;
}

impl<'b, W: WriteBytes> WriteBytes for &'b mut W {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (*self).write_byte(byte)
    }

    #[inline(always)]
    fn write_buf_exact(&mut self, buf: &[u8]) -> Result<()> {
        (*self).write_buf_exact(buf)
    }

    #[inline(always)]
    fn pos(&self) -> u64 {
        (**self).pos()
    }
}
