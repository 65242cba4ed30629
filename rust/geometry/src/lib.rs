// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Shape Geometry
//!
//! Decodes the shape geometry streams written by a building-model geometry
//! engine into triangle mesh buffers, using nalgebra for positions, normals
//! and placements.
//!
//! Two formats are supported: a compact binary stream with packed normals
//! and variable-width vertex indices, and a legacy line-oriented text
//! stream. Both append into a caller-owned [`MeshBuffer`]; indices of new
//! triangles are offset by the vertex count the buffer had when the call
//! started, so many shapes can be accumulated into one mesh.
//!
//! ```rust
//! use ifc_shape_geometry::{read_shape, MeshBuffer, ShapeData, Transform};
//!
//! let mut mesh = MeshBuffer::new();
//! let shape = "P 1\nV 0,0,0 1,0,0 0,1,0\nT 0/U,1/U,2/U";
//!
//! read_shape(&mut mesh, ShapeData::Text(shape), None).unwrap();
//! let placed = Transform::translation(10.0, 0.0, 0.0);
//! read_shape(&mut mesh, ShapeData::Text(shape), Some(&placed)).unwrap();
//!
//! assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
//! assert_eq!(mesh.positions[3].x, 10.0);
//! ```

pub mod binary;
pub mod config;
mod dedup;
pub mod error;
pub mod mesh;
pub mod reader;
pub mod text;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use binary::read_binary;
pub use config::{DecodeConfig, NormalDedup};
pub use error::{Error, Result};
pub use ifc_shape_core::{IndexWidth, PackedNormal};
pub use mesh::{DecodeSummary, FlatMesh, MeshBuffer};
pub use reader::{read_shape, ShapeData, ShapeInput, ShapeReader};
pub use text::{read_text, NormalEncoding};
pub use transform::Transform;
