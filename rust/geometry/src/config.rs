// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoder configuration

/// How a repeated source vertex decides whether an earlier mesh vertex can
/// be shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalDedup {
    /// Share only the first mesh vertex emitted for the source index, and
    /// only when its normal matches exactly. Later duplicates are never
    /// candidates for reuse. This is what the geometry engine's own
    /// readers do.
    #[default]
    FirstSeen,
    /// Share any mesh vertex already emitted for the source index within
    /// the same face (or `T` line) whose normal matches exactly.
    AnySeen,
}

/// Configuration for shape decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Vertex sharing policy inside one face / `T` line
    pub normal_dedup: NormalDedup,
    /// Upper bound on up-front allocation driven by header hints
    pub max_reserve_vertices: usize,
    /// Text format version assumed before the first `P` command
    pub default_text_version: u32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            normal_dedup: NormalDedup::FirstSeen,
            max_reserve_vertices: 1 << 20,
            default_text_version: 1,
        }
    }
}

impl DecodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normal_dedup(mut self, policy: NormalDedup) -> Self {
        self.normal_dedup = policy;
        self
    }

    pub fn with_max_reserve_vertices(mut self, max: usize) -> Self {
        self.max_reserve_vertices = max;
        self
    }

    pub fn with_default_text_version(mut self, version: u32) -> Self {
        self.default_text_version = version;
        self
    }

    /// Clamp a header-declared count to the reservation limit
    #[inline]
    pub(crate) fn reserve_hint(&self, declared: usize) -> usize {
        declared.min(self.max_reserve_vertices)
    }
}
