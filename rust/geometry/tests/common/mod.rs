// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary shape stream builder for tests

#![allow(dead_code)]

use ifc_shape_geometry::{IndexWidth, PackedNormal, Vector3};

pub enum Face {
    Planar {
        normal: PackedNormal,
        indices: Vec<u32>,
    },
    NonPlanar {
        corners: Vec<(u32, PackedNormal)>,
    },
    Empty,
}

#[derive(Default)]
pub struct BinaryShape {
    pub vertices: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
}

impl BinaryShape {
    pub fn new(vertices: &[[f32; 3]]) -> Self {
        Self {
            vertices: vertices.to_vec(),
            faces: Vec::new(),
        }
    }

    pub fn planar(mut self, normal: PackedNormal, indices: &[u32]) -> Self {
        self.faces.push(Face::Planar {
            normal,
            indices: indices.to_vec(),
        });
        self
    }

    pub fn non_planar(mut self, corners: &[(u32, PackedNormal)]) -> Self {
        self.faces.push(Face::NonPlanar {
            corners: corners.to_vec(),
        });
        self
    }

    pub fn empty_face(mut self) -> Self {
        self.faces.push(Face::Empty);
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|face| match face {
                Face::Planar { indices, .. } => indices.len() / 3,
                Face::NonPlanar { corners } => corners.len() / 3,
                Face::Empty => 0,
            })
            .sum()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let vertex_count = self.vertices.len() as u32;
        let width = IndexWidth::for_vertex_count(vertex_count);

        let mut bytes = vec![1u8];
        bytes.extend_from_slice(&(vertex_count as i32).to_le_bytes());
        bytes.extend_from_slice(&(self.triangle_count() as i32).to_le_bytes());
        for v in &self.vertices {
            for c in v {
                bytes.extend_from_slice(&c.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&(self.faces.len() as i32).to_le_bytes());

        for face in &self.faces {
            match face {
                Face::Planar { normal, indices } => {
                    bytes.extend_from_slice(&((indices.len() / 3) as i32).to_le_bytes());
                    bytes.extend_from_slice(&[normal.u(), normal.v()]);
                    for &i in indices {
                        write_index(&mut bytes, width, i);
                    }
                }
                Face::NonPlanar { corners } => {
                    bytes.extend_from_slice(&(-((corners.len() / 3) as i32)).to_le_bytes());
                    for &(i, normal) in corners {
                        write_index(&mut bytes, width, i);
                        bytes.extend_from_slice(&[normal.u(), normal.v()]);
                    }
                }
                Face::Empty => bytes.extend_from_slice(&0i32.to_le_bytes()),
            }
        }
        bytes
    }
}

fn write_index(bytes: &mut Vec<u8>, width: IndexWidth, index: u32) {
    match width {
        IndexWidth::U8 => bytes.push(index as u8),
        IndexWidth::U16 => bytes.extend_from_slice(&(index as u16).to_le_bytes()),
        IndexWidth::U32 => bytes.extend_from_slice(&index.to_le_bytes()),
    }
}

/// Route decoder logs to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Decoded direction of a packed normal, as the decoders produce it
pub fn normal_of(packed: PackedNormal) -> Vector3<f64> {
    let (x, y, z) = packed.decode();
    Vector3::new(x, y, z)
}

/// Unit square in the XY plane
pub const SQUARE: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// +Z
pub const UP: PackedNormal = PackedNormal::new(0, 126);
/// +X
pub const EAST: PackedNormal = PackedNormal::new(63, 126);
/// +Y
pub const NORTH: PackedNormal = PackedNormal::new(0, 0);
