// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Shape Core
//!
//! Low-level primitives shared by the shape-geometry decoders:
//!
//! - **Byte cursor**: bounds-checked little-endian reads over a borrowed stream
//! - **Index widths**: 1/2/4-byte vertex references chosen from the
//!   stream's declared vertex count
//! - **Packed normals**: two-byte unit direction encoding
//! - **Token parsing**: fast float/integer parsing for the text format
//!
//! ## Quick Start
//!
//! ```rust
//! use ifc_shape_core::{ByteCursor, IndexReader, PackedNormal};
//!
//! let stream = [3u8, 63, 126];
//! let mut cursor = ByteCursor::new(&stream);
//!
//! let reader = IndexReader::new(200); // 200 vertices -> 1-byte indices
//! assert_eq!(reader.read(&mut cursor).unwrap(), 3);
//!
//! let (x, _, _) = cursor.read_packed_normal().unwrap().decode();
//! assert!((x - 1.0).abs() < 1e-12);
//! ```

pub mod cursor;
pub mod error;
pub mod fast_parse;
pub mod packed_normal;

pub use cursor::{ByteCursor, IndexReader, IndexWidth};
pub use error::{Error, Result};
pub use fast_parse::{parse_f64, parse_triple, parse_u16, parse_u32};
pub use packed_normal::{PackedNormal, PACK_SIZE};
