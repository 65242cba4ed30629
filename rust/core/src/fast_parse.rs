// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fast Token Parsing Module
//!
//! Number parsing for the line-oriented shape format. Floats go through
//! fast-float, integers through lexical-core; both reject trailing garbage
//! so `1.5x` or `12a` surface as [`Error::NumericParse`].

use crate::error::{Error, Result};

/// Parse a whole token as an f64
#[inline]
pub fn parse_f64(token: &str, line: usize) -> Result<f64> {
    fast_float::parse::<f64, _>(token).map_err(|_| Error::numeric(line, token))
}

/// Parse a whole token as an unsigned 32-bit integer
#[inline]
pub fn parse_u32(token: &str, line: usize) -> Result<u32> {
    lexical_core::parse::<u32>(token.as_bytes()).map_err(|_| Error::numeric(line, token))
}

/// Parse a whole token as an unsigned 16-bit integer
#[inline]
pub fn parse_u16(token: &str, line: usize) -> Result<u16> {
    lexical_core::parse::<u16>(token.as_bytes()).map_err(|_| Error::numeric(line, token))
}

/// Parse an `x,y,z` token into three f64 components
///
/// Exactly three comma-separated components are required.
pub fn parse_triple(token: &str, line: usize) -> Result<(f64, f64, f64)> {
    let mut parts = token.split(',');
    let (Some(x), Some(y), Some(z), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::InvalidToken {
            line,
            context: "coordinate triple",
            token: token.to_string(),
        });
    };

    Ok((parse_f64(x, line)?, parse_f64(y, line)?, parse_f64(z, line)?))
}
