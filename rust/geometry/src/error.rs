// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding shape geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Shape stream error: {0}")]
    CoreError(#[from] ifc_shape_core::Error),

    #[error("Invalid mesh buffer: {0}")]
    InvalidBuffer(String),
}

impl Error {
    /// True when the failure came from a malformed textual number
    pub fn is_numeric_parse(&self) -> bool {
        matches!(self, Error::CoreError(e) if e.is_numeric_parse())
    }

    /// The underlying stream error, if any
    pub fn stream_error(&self) -> Option<&ifc_shape_core::Error> {
        match self {
            Error::CoreError(e) => Some(e),
            Error::InvalidBuffer(_) => None,
        }
    }
}
