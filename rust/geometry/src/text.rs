// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Text shape stream decoder
//!
//! Line-oriented format, whitespace separated, first token is a one-letter
//! command (case-insensitive):
//!
//! - `P <version>` starts a new group and clears the vertex/normal lists
//! - `V x,y,z ...` adds positions
//! - `N x,y,z ...` adds normals (version 1)
//! - `T a/n,b/n,c/n ...` emits triangles, one per token
//! - `F ...` face outlines, ignored
//!
//! In version 1 a corner's normal reference is a direction letter
//! (`F B L R U D`) or an index into the `N` list. From version 2 on it is a
//! 16-bit packed normal.

use crate::config::DecodeConfig;
use crate::dedup::CornerDedup;
use crate::error::Result;
use crate::mesh::{DecodeSummary, MeshBuffer};
use crate::transform::Transform;
use ifc_shape_core::{parse_triple, parse_u16, parse_u32, Error as CoreError, PackedNormal};
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

/// How `T` corners reference their normals, fixed per `P` group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalEncoding {
    /// Direction letters or indices into the `N` list
    Directional,
    /// 16-bit packed normals
    Packed,
}

impl NormalEncoding {
    pub fn for_version(version: u32) -> Self {
        if version == 1 {
            NormalEncoding::Directional
        } else {
            NormalEncoding::Packed
        }
    }
}

/// Unit vector for a version-1 direction letter
pub fn direction_code(code: &str) -> Option<Vector3<f64>> {
    let v = match code {
        "F" => Vector3::new(0.0, -1.0, 0.0),
        "B" => Vector3::new(0.0, 1.0, 0.0),
        "L" => Vector3::new(-1.0, 0.0, 0.0),
        "R" => Vector3::new(1.0, 0.0, 0.0),
        "U" => Vector3::new(0.0, 0.0, 1.0),
        "D" => Vector3::new(0.0, 0.0, -1.0),
        _ => return None,
    };
    Some(v)
}

struct TextDecoder<'a> {
    transform: Option<&'a Transform>,
    encoding: NormalEncoding,
    vertices: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    dedup: CornerDedup,
    unique_vertices: usize,
}

impl TextDecoder<'_> {
    fn start_group(&mut self, version: u32) {
        self.encoding = NormalEncoding::for_version(version);
        self.vertices.clear();
        self.normals.clear();
    }

    fn add_vertices<'t>(&mut self, tokens: impl Iterator<Item = &'t str>, line: usize) -> Result<()> {
        for token in tokens {
            let (x, y, z) = parse_triple(token, line)?;
            let point = Point3::new(x, y, z);
            self.vertices
                .push(self.transform.map_or(point, |t| t.apply_point(&point)));
            self.unique_vertices += 1;
        }
        Ok(())
    }

    fn add_normals<'t>(&mut self, tokens: impl Iterator<Item = &'t str>, line: usize) -> Result<()> {
        for token in tokens {
            let (x, y, z) = parse_triple(token, line)?;
            self.normals.push(Vector3::new(x, y, z));
        }
        Ok(())
    }

    fn resolve_normal(&self, reference: &str, line: usize) -> Result<Vector3<f64>> {
        let normal = match self.encoding {
            NormalEncoding::Directional => match direction_code(reference) {
                Some(direction) => direction,
                None => {
                    let index = parse_u32(reference, line)?;
                    *self.normals.get(index as usize).ok_or(CoreError::IndexOutOfRange {
                        context: "normal",
                        index: u64::from(index),
                        len: self.normals.len(),
                    })?
                }
            },
            NormalEncoding::Packed => {
                let (x, y, z) = PackedNormal::from_u16(parse_u16(reference, line)?).decode();
                Vector3::new(x, y, z)
            }
        };
        Ok(self.transform.map_or(normal, |t| t.apply_normal(&normal)))
    }

    /// Emit the triangles of one `T` line with a fresh dedup scope
    fn add_triangles<'t>(
        &mut self,
        mesh: &mut MeshBuffer,
        tokens: impl Iterator<Item = &'t str>,
        line: usize,
    ) -> Result<()> {
        self.dedup.reset();
        // Corners without a normal reference keep the last one seen on this line
        let mut current_normal = Vector3::zeros();

        for token in tokens {
            let corners: SmallVec<[&str; 3]> = token.split(',').filter(|c| !c.is_empty()).collect();
            if corners.len() != 3 {
                return Err(invalid_triangle(line, token));
            }

            for corner in corners {
                let mut parts = corner.split('/').filter(|p| !p.is_empty());
                let (Some(index), reference, None) = (parts.next(), parts.next(), parts.next())
                else {
                    return Err(invalid_triangle(line, token));
                };

                if let Some(reference) = reference {
                    current_normal = self.resolve_normal(reference, line)?;
                }

                let source = parse_u32(index, line)?;
                let position = *self.vertices.get(source as usize).ok_or(CoreError::IndexOutOfRange {
                    context: "vertex",
                    index: u64::from(source),
                    len: self.vertices.len(),
                })?;

                let output = self.dedup.resolve(mesh, source, position, current_normal);
                mesh.indices.push(output);
            }
        }
        Ok(())
    }
}

fn invalid_triangle(line: usize, token: &str) -> crate::error::Error {
    CoreError::InvalidTriangle {
        line,
        token: token.to_string(),
    }
    .into()
}

/// Decode a text shape stream, appending to `mesh`
///
/// On error the vertices and indices appended so far stay in `mesh`.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn read_text(
    mesh: &mut MeshBuffer,
    text: &str,
    transform: Option<&Transform>,
    config: &DecodeConfig,
) -> Result<DecodeSummary> {
    let vertices_before = mesh.vertex_count();
    let triangles_before = mesh.triangle_count();

    let mut decoder = TextDecoder {
        transform,
        encoding: NormalEncoding::for_version(config.default_text_version),
        vertices: Vec::new(),
        normals: Vec::new(),
        dedup: CornerDedup::new(config.normal_dedup),
        unique_vertices: 0,
    };

    for (line_index, line) in text.lines().enumerate() {
        let line_no = line_index + 1;
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            continue;
        };

        let letter = match command.as_bytes() {
            [c] => c.to_ascii_uppercase(),
            _ => 0,
        };
        match letter {
            b'P' => {
                let version = tokens.next().ok_or(CoreError::MissingToken {
                    line: line_no,
                    context: "format version",
                })?;
                let version = parse_u32(version, line_no)?;
                tracing::trace!(line = line_no, version, "text shape group");
                decoder.start_group(version);
            }
            b'V' => decoder.add_vertices(tokens, line_no)?,
            b'N' => decoder.add_normals(tokens, line_no)?,
            b'T' => decoder.add_triangles(mesh, tokens, line_no)?,
            b'F' => {}
            _ => {
                return Err(CoreError::UnknownCommand {
                    line: line_no,
                    command: command.to_string(),
                }
                .into())
            }
        }
    }

    let summary = DecodeSummary {
        unique_vertices: decoder.unique_vertices,
        vertices_added: mesh.vertex_count() - vertices_before,
        triangles_added: mesh.triangle_count() - triangles_before,
        duplicated_vertices: decoder.dedup.duplicated(),
    };
    tracing::debug!(
        unique_vertices = summary.unique_vertices,
        vertices_added = summary.vertices_added,
        triangles_added = summary.triangles_added,
        duplicated = summary.duplicated_vertices,
        "decoded text shape"
    );
    Ok(summary)
}
