// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape reader - dispatch to the binary or text decoder
//!
//! Also provides parallel decoding of independent shapes: each shape is
//! decoded into its own buffer on the rayon pool and the results are merged
//! in input order with index offsetting.

use crate::binary::read_binary;
use crate::config::DecodeConfig;
use crate::error::Result;
use crate::mesh::{DecodeSummary, MeshBuffer};
use crate::text::read_text;
use crate::transform::Transform;
use rayon::prelude::*;

/// Raw shape geometry in one of the two stream formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeData<'a> {
    /// Packed binary stream
    Binary(&'a [u8]),
    /// Line-oriented text stream
    Text(&'a str),
}

impl ShapeData<'_> {
    /// True when the stream carries no data at all
    pub fn is_empty(&self) -> bool {
        match self {
            ShapeData::Binary(bytes) => bytes.is_empty(),
            ShapeData::Text(text) => text.trim().is_empty(),
        }
    }
}

impl<'a> From<&'a [u8]> for ShapeData<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ShapeData::Binary(bytes)
    }
}

impl<'a> From<&'a str> for ShapeData<'a> {
    fn from(text: &'a str) -> Self {
        ShapeData::Text(text)
    }
}

/// One shape plus the placement to apply while decoding it
#[derive(Debug, Clone)]
pub struct ShapeInput<'a> {
    pub data: ShapeData<'a>,
    pub transform: Option<Transform>,
}

impl<'a> ShapeInput<'a> {
    pub fn new(data: impl Into<ShapeData<'a>>) -> Self {
        Self {
            data: data.into(),
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Decodes shape streams into mesh buffers with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct ShapeReader {
    config: DecodeConfig,
}

impl ShapeReader {
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Append one shape to `mesh`
    pub fn read(
        &self,
        mesh: &mut MeshBuffer,
        data: ShapeData<'_>,
        transform: Option<&Transform>,
    ) -> Result<DecodeSummary> {
        match data {
            ShapeData::Binary(bytes) => read_binary(mesh, bytes, transform, &self.config),
            ShapeData::Text(text) => read_text(mesh, text, transform, &self.config),
        }
    }

    /// Decode one shape into a fresh buffer
    pub fn decode(&self, data: ShapeData<'_>, transform: Option<&Transform>) -> Result<MeshBuffer> {
        let mut mesh = MeshBuffer::new();
        self.read(&mut mesh, data, transform)?;
        Ok(mesh)
    }

    /// Decode independent shapes in parallel and merge them in input order
    ///
    /// Fails if any shape fails; nothing is merged in that case.
    pub fn decode_parallel(&self, shapes: &[ShapeInput<'_>]) -> Result<MeshBuffer> {
        let meshes = shapes
            .par_iter()
            .map(|shape| self.decode(shape.data, shape.transform.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut combined = MeshBuffer::new();
        combined.merge_all(&meshes);
        tracing::debug!(
            shapes = shapes.len(),
            vertices = combined.vertex_count(),
            triangles = combined.triangle_count(),
            "merged shapes"
        );
        Ok(combined)
    }
}

/// Append one shape to `mesh` with the default configuration
pub fn read_shape(
    mesh: &mut MeshBuffer,
    data: ShapeData<'_>,
    transform: Option<&Transform>,
) -> Result<DecodeSummary> {
    ShapeReader::default().read(mesh, data, transform)
}
