// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary shape stream decoder
//!
//! Layout (little-endian):
//!
//! ```text
//! u8    version          format discriminator, consumed only
//! i32   vertex_count     sizes the index width and the vertex table
//! i32   triangle_count   pre-sizing hint
//! f32x3 * vertex_count   unique vertex table
//! i32   face_count
//! face  * face_count
//! ```
//!
//! Each face starts with a signed triangle count. Positive faces are
//! planar: one packed normal followed by `count * 3` vertex indices.
//! Negative faces are non-planar: `count * 3` corners, each a vertex index
//! immediately followed by its own packed normal. Zero-count faces are
//! skipped.

use crate::config::DecodeConfig;
use crate::dedup::CornerDedup;
use crate::error::Result;
use crate::mesh::{DecodeSummary, MeshBuffer};
use crate::transform::Transform;
use ifc_shape_core::{ByteCursor, Error as CoreError, IndexReader, PackedNormal};
use nalgebra::{Point3, Vector3};

/// Decode a binary shape stream, appending to `mesh`
///
/// Vertex positions get the full transform, normals only its rotation.
/// Zero-length input is a no-op returning an empty summary, not an
/// `UnexpectedEof`. On error the vertices and indices appended so far stay
/// in `mesh`.
#[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn read_binary(
    mesh: &mut MeshBuffer,
    bytes: &[u8],
    transform: Option<&Transform>,
    config: &DecodeConfig,
) -> Result<DecodeSummary> {
    if bytes.is_empty() {
        return Ok(DecodeSummary::default());
    }

    let vertices_before = mesh.vertex_count();
    let triangles_before = mesh.triangle_count();

    let mut cursor = ByteCursor::new(bytes);
    let version = cursor.read_u8("format version")?;
    let vertex_count = read_count(&mut cursor, "vertex count")?;
    let triangle_count = read_count(&mut cursor, "triangle count")?;
    tracing::trace!(version, vertex_count, triangle_count, "binary shape header");

    let unique = read_vertex_table(&mut cursor, vertex_count, transform, config)?;

    // A header-only stream with no vertices may omit the face count
    let face_count = if vertex_count == 0 && cursor.is_at_end() {
        0
    } else {
        read_count(&mut cursor, "face count")?
    };

    let vertex_hint = config.reserve_hint(vertex_count as usize);
    let index_hint = config.reserve_hint(triangle_count as usize).saturating_mul(3);
    mesh.reserve(vertex_hint, index_hint);

    let indices = IndexReader::new(vertex_count);
    let mut dedup = CornerDedup::new(config.normal_dedup);
    let rotate = |packed: PackedNormal| {
        let (x, y, z) = packed.decode();
        let normal = Vector3::new(x, y, z);
        transform.map_or(normal, |t| t.apply_normal(&normal))
    };

    for _ in 0..face_count {
        let face_triangles = cursor.read_i32("face triangle count")?;
        if face_triangles == 0 {
            continue;
        }
        let planar = face_triangles > 0;
        let corners = face_triangles.unsigned_abs() as usize * 3;
        dedup.reset();

        if planar {
            let normal = rotate(cursor.read_packed_normal()?);
            for _ in 0..corners {
                let source = indices.read(&mut cursor)?;
                let position = lookup(&unique, source)?;
                let index = dedup.resolve(mesh, source, position, normal);
                mesh.indices.push(index);
            }
        } else {
            for _ in 0..corners {
                let source = indices.read(&mut cursor)?;
                let normal = rotate(cursor.read_packed_normal()?);
                let position = lookup(&unique, source)?;
                let index = dedup.resolve(mesh, source, position, normal);
                mesh.indices.push(index);
            }
        }
    }

    let summary = DecodeSummary {
        unique_vertices: unique.len(),
        vertices_added: mesh.vertex_count() - vertices_before,
        triangles_added: mesh.triangle_count() - triangles_before,
        duplicated_vertices: dedup.duplicated(),
    };
    tracing::debug!(
        face_count,
        unique_vertices = summary.unique_vertices,
        vertices_added = summary.vertices_added,
        triangles_added = summary.triangles_added,
        duplicated = summary.duplicated_vertices,
        "decoded binary shape"
    );
    Ok(summary)
}

/// Read a signed 32-bit count, rejecting negative values
fn read_count(cursor: &mut ByteCursor<'_>, context: &'static str) -> Result<u32> {
    let value = cursor.read_i32(context)?;
    u32::try_from(value).map_err(|_| {
        CoreError::InvalidHeader {
            context,
            value: i64::from(value),
        }
        .into()
    })
}

fn read_vertex_table(
    cursor: &mut ByteCursor<'_>,
    vertex_count: u32,
    transform: Option<&Transform>,
    config: &DecodeConfig,
) -> Result<Vec<Point3<f64>>> {
    let mut unique = Vec::with_capacity(config.reserve_hint(vertex_count as usize));
    for _ in 0..vertex_count {
        let (x, y, z) = cursor.read_f32_triple("vertex")?;
        let point = Point3::new(f64::from(x), f64::from(y), f64::from(z));
        unique.push(transform.map_or(point, |t| t.apply_point(&point)));
    }
    Ok(unique)
}

#[inline]
fn lookup(unique: &[Point3<f64>], source: u32) -> Result<Point3<f64>> {
    unique.get(source as usize).copied().ok_or_else(|| {
        CoreError::IndexOutOfRange {
            context: "vertex",
            index: u64::from(source),
            len: unique.len(),
        }
        .into()
    })
}
