// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Little-endian byte cursor and variable-width vertex index reading
//!
//! The binary shape stream stores vertex references in the narrowest
//! width able to address every vertex in the stream's unique-vertex table.
//! The width is decided once from the header's vertex count.

use crate::error::{Error, Result};
use crate::packed_normal::PackedNormal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// On-wire width of a vertex index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexWidth {
    /// 1 byte, streams with at most 255 vertices
    U8,
    /// 2 bytes little-endian, at most 65535 vertices
    U16,
    /// 4 bytes little-endian
    U32,
}

impl IndexWidth {
    /// Select the index width for a stream declaring `vertex_count` vertices
    #[inline]
    pub fn for_vertex_count(vertex_count: u32) -> Self {
        if vertex_count <= 0xFF {
            IndexWidth::U8
        } else if vertex_count <= 0xFFFF {
            IndexWidth::U16
        } else {
            IndexWidth::U32
        }
    }

    /// Number of bytes one index occupies
    #[inline]
    pub fn byte_len(self) -> usize {
        match self {
            IndexWidth::U8 => 1,
            IndexWidth::U16 => 2,
            IndexWidth::U32 => 4,
        }
    }
}

/// Forward-only reader over a borrowed byte stream
///
/// Every read is bounds checked against the slice length; running past
/// the end yields [`Error::UnexpectedEof`] and leaves the cursor where it
/// was.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current offset from the start of the stream
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    fn take<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N]> {
        let end = self.pos.checked_add(N).filter(|&end| end <= self.bytes.len());
        let Some(end) = end else {
            return Err(Error::UnexpectedEof {
                context,
                offset: self.pos,
                needed: N,
                len: self.bytes.len(),
            });
        };
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..end]);
        self.pos = end;
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8> {
        Ok(self.take::<1>(context)?[0])
    }

    #[inline]
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take(context)?))
    }

    #[inline]
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take(context)?))
    }

    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take(context)?))
    }

    #[inline]
    pub fn read_f32(&mut self, context: &'static str) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take(context)?))
    }

    /// Read three consecutive f32 values (x, y, z)
    #[inline]
    pub fn read_f32_triple(&mut self, context: &'static str) -> Result<(f32, f32, f32)> {
        let raw: [u8; 12] = self.take(context)?;
        let component = |i: usize| f32::from_le_bytes([raw[i], raw[i + 1], raw[i + 2], raw[i + 3]]);
        Ok((component(0), component(4), component(8)))
    }

    /// Read a vertex index of the given width
    #[inline]
    pub fn read_index(&mut self, width: IndexWidth) -> Result<u32> {
        const CONTEXT: &str = "vertex index";
        match width {
            IndexWidth::U8 => self.read_u8(CONTEXT).map(u32::from),
            IndexWidth::U16 => self.read_u16(CONTEXT).map(u32::from),
            IndexWidth::U32 => self.read_u32(CONTEXT),
        }
    }

    /// Read a two-byte packed normal (u then v)
    #[inline]
    pub fn read_packed_normal(&mut self) -> Result<PackedNormal> {
        let [u, v] = self.take::<2>("packed normal")?;
        Ok(PackedNormal::new(u, v))
    }
}

/// Reads vertex indices at the width fixed by a stream's declared vertex count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexReader {
    width: IndexWidth,
}

impl IndexReader {
    pub fn new(declared_vertex_count: u32) -> Self {
        Self {
            width: IndexWidth::for_vertex_count(declared_vertex_count),
        }
    }

    #[inline]
    pub fn width(&self) -> IndexWidth {
        self.width
    }

    #[inline]
    pub fn read(&self, cursor: &mut ByteCursor<'_>) -> Result<u32> {
        cursor.read_index(self.width)
    }
}
