// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-face vertex sharing
//!
//! Each face of the binary stream (or `T` line of the text stream) gets a
//! fresh map from source vertex index to the mesh vertices emitted for it.
//! A corner reuses a mesh vertex only when the normals match exactly;
//! otherwise a duplicate with the new normal is appended so shading stays
//! correct across creases.

use crate::config::NormalDedup;
use crate::mesh::MeshBuffer;
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use std::collections::hash_map::Entry;

pub(crate) struct CornerDedup {
    policy: NormalDedup,
    /// Source index -> mesh vertices emitted for it, first-seen first
    written: FxHashMap<u32, SmallVec<[u32; 2]>>,
    duplicated: usize,
}

impl CornerDedup {
    pub(crate) fn new(policy: NormalDedup) -> Self {
        Self {
            policy,
            written: FxHashMap::default(),
            duplicated: 0,
        }
    }

    /// Start a new face, keeping the map's allocation
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.written.clear();
    }

    /// Vertices emitted only because of a normal mismatch, across all faces
    #[inline]
    pub(crate) fn duplicated(&self) -> usize {
        self.duplicated
    }

    /// Resolve one corner to a mesh vertex index, appending to `mesh` when
    /// no existing vertex can be shared
    pub(crate) fn resolve(
        &mut self,
        mesh: &mut MeshBuffer,
        source: u32,
        position: Point3<f64>,
        normal: Vector3<f64>,
    ) -> u32 {
        match self.written.entry(source) {
            Entry::Vacant(slot) => {
                let index = mesh.add_vertex(position, normal);
                slot.insert(smallvec![index]);
                index
            }
            Entry::Occupied(mut slot) => {
                let emitted = slot.get_mut();
                let candidates = match self.policy {
                    NormalDedup::FirstSeen => &emitted[..1],
                    NormalDedup::AnySeen => &emitted[..],
                };
                if let Some(&index) = candidates
                    .iter()
                    .find(|&&i| mesh.normals[i as usize] == normal)
                {
                    return index;
                }

                let index = mesh.add_vertex(position, normal);
                self.duplicated += 1;
                if self.policy == NormalDedup::AnySeen {
                    emitted.push(index);
                }
                index
            }
        }
    }
}
