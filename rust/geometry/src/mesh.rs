// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Append-only triangle mesh that decoders accumulate into
///
/// `positions` and `normals` are parallel; every entry of `indices` points
/// into them and `indices.len()` is a multiple of 3. Decoders never touch
/// entries that existed before they were called, they only append.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshBuffer {
    /// Vertex positions
    pub positions: Vec<Point3<f64>>,
    /// Vertex normals, one per position
    pub normals: Vec<Vector3<f64>>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

/// Flattened f32 mesh arrays for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

/// What a single decode call added to a [`MeshBuffer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeSummary {
    /// Source vertices read from the stream (binary table / text `V` entries)
    pub unique_vertices: usize,
    /// Mesh vertices appended
    pub vertices_added: usize,
    /// Triangles appended
    pub triangles_added: usize,
    /// Vertices appended only because a source vertex reappeared with a different normal
    pub duplicated_vertices: usize,
}

impl MeshBuffer {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Reserve room for additional vertices and indices
    #[inline]
    pub fn reserve(&mut self, vertex_count: usize, index_count: usize) {
        self.positions.reserve(vertex_count);
        self.normals.reserve(vertex_count);
        self.indices.reserve(index_count);
    }

    /// Add a vertex with normal, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Append another mesh, offsetting its indices by this mesh's vertex count
    #[inline]
    pub fn merge(&mut self, other: &MeshBuffer) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = self.positions.len() as u32;

        self.reserve(other.positions.len(), other.indices.len());
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Batch merge multiple meshes at once (more efficient than individual merges)
    pub fn merge_all(&mut self, meshes: &[MeshBuffer]) {
        let total_vertices: usize = meshes.iter().map(|m| m.positions.len()).sum();
        let total_indices: usize = meshes.iter().map(|m| m.indices.len()).sum();
        self.reserve(total_vertices, total_indices);

        for mesh in meshes {
            self.merge(mesh);
        }
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);
        for p in &self.positions {
            min = min.inf(p);
            max = max.sup(p);
        }

        (min, max)
    }

    /// Check the buffer invariants: parallel position/normal arrays, whole
    /// triangles, and every index in range
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() != self.normals.len() {
            return Err(Error::InvalidBuffer(format!(
                "{} positions but {} normals",
                self.positions.len(),
                self.normals.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::InvalidBuffer(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.positions.len();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidBuffer(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }
        Ok(())
    }

    /// Flatten to f32 arrays (positions and normals as xyz triples)
    pub fn to_flat(&self) -> FlatMesh {
        let flatten = |x: f64, y: f64, z: f64| [x as f32, y as f32, z as f32];
        FlatMesh {
            positions: self
                .positions
                .iter()
                .flat_map(|p| flatten(p.x, p.y, p.z))
                .collect(),
            normals: self
                .normals
                .iter()
                .flat_map(|n| flatten(n.x, n.y, n.z))
                .collect(),
            indices: self.indices.clone(),
        }
    }

    /// Clear the mesh
    #[inline]
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }
}
