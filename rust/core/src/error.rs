// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for shape stream decoding
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a shape stream.
///
/// Every variant describes a malformed stream and is fatal to the decode
/// call that produced it. Mesh data appended before the failure stays in
/// the target buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unexpected end of stream reading {context}: need {needed} bytes at offset {offset}, stream has {len}")]
    UnexpectedEof {
        context: &'static str,
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Invalid {context} in header: {value}")]
    InvalidHeader { context: &'static str, value: i64 },

    #[error("Unknown geometry command '{command}' on line {line}")]
    UnknownCommand { line: usize, command: String },

    #[error("Invalid triangle definition '{token}' on line {line}")]
    InvalidTriangle { line: usize, token: String },

    #[error("Invalid {context} '{token}' on line {line}")]
    InvalidToken {
        line: usize,
        context: &'static str,
        token: String,
    },

    #[error("Missing {context} on line {line}")]
    MissingToken { line: usize, context: &'static str },

    #[error("{context} index {index} out of range for length {len}")]
    IndexOutOfRange {
        context: &'static str,
        index: u64,
        len: usize,
    },

    #[error("Failed to parse number '{token}' on line {line}")]
    NumericParse { line: usize, token: String },
}

impl Error {
    /// All stream errors are structural; numeric parse failures are a
    /// sub-kind of them.
    #[inline]
    pub fn is_structural(&self) -> bool {
        true
    }

    /// True when a textual number failed to parse
    #[inline]
    pub fn is_numeric_parse(&self) -> bool {
        matches!(self, Error::NumericParse { .. })
    }

    pub fn numeric(line: usize, token: impl Into<String>) -> Self {
        Error::NumericParse {
            line,
            token: token.into(),
        }
    }
}
