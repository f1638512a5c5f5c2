// Rlad
// Copyright (c) 2026 The Project Rlad Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::io;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by Rlad.
#[derive(Debug)]
pub enum Error {
    /// An IO error occurred while reading or writing the underlying byte stream.
    IoError(io::Error),
    /// A magic number, tag, or enumerated field failed validation.
    BadFormat {
        /// The format or structure that was being parsed.
        expected: &'static str,
        /// What failed validation.
        reason: &'static str,
    },
    /// The stream ended while a stream or block header was being parsed. The payload names the
    /// header section that could not be completed.
    IncompleteHeader(&'static str),
    /// The stream ended while bulk data was being fetched.
    IncompleteData {
        /// The operation that was starved of data.
        op: &'static str,
        /// The number of bytes that were still expected.
        missing: usize,
    },
    /// A byte or sample count did not divide into whole frames at a boundary where whole frames
    /// are required.
    IncompleteFrame {
        /// The operation that received the partial frame.
        op: &'static str,
        /// The number of trailing values that did not form a frame.
        remainder: usize,
    },
    /// A format discriminator was recognized but is not implemented.
    Unsupported(&'static str),
    /// The codec or reader API was misused.
    InvalidOperation(&'static str),
    /// A channel index or value fell outside its structural range.
    OutOfRange(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => {
                write!(f, "io error: {}", err)
            }
            Error::BadFormat { expected, reason } => {
                write!(f, "malformed {} stream: {}", expected, reason)
            }
            Error::IncompleteHeader(section) => {
                write!(f, "incomplete header: {}", section)
            }
            Error::IncompleteData { op, missing } => {
                write!(f, "incomplete data: {} ({} bytes missing)", op, missing)
            }
            Error::IncompleteFrame { op, remainder } => {
                write!(f, "incomplete frame: {} ({} trailing values)", op, remainder)
            }
            Error::Unsupported(feature) => {
                write!(f, "unsupported feature: {}", feature)
            }
            Error::InvalidOperation(msg) => {
                write!(f, "invalid operation: {}", msg)
            }
            Error::OutOfRange(msg) => {
                write!(f, "out of range: {}", msg)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a bad format error.
pub fn bad_format_error<T>(expected: &'static str, reason: &'static str) -> Result<T> {
    Err(Error::BadFormat { expected, reason })
}

/// Convenience function to create an incomplete header error.
pub fn incomplete_header_error<T>(section: &'static str) -> Result<T> {
    Err(Error::IncompleteHeader(section))
}

/// Convenience function to create an incomplete data error.
pub fn incomplete_data_error<T>(op: &'static str, missing: usize) -> Result<T> {
    Err(Error::IncompleteData { op, missing })
}

/// Convenience function to create an incomplete frame error.
pub fn incomplete_frame_error<T>(op: &'static str, remainder: usize) -> Result<T> {
    Err(Error::IncompleteFrame { op, remainder })
}

/// Convenience function to create an unsupported feature error.
pub fn unsupported_error<T>(feature: &'static str) -> Result<T> {
    Err(Error::Unsupported(feature))
}

/// Convenience function to create an invalid operation error.
pub fn invalid_operation_error<T>(msg: &'static str) -> Result<T> {
    Err(Error::InvalidOperation(msg))
}

/// Convenience function to create an out of range error.
pub fn out_of_range_error<T>(msg: &'static str) -> Result<T> {
    Err(Error::OutOfRange(msg))
}
