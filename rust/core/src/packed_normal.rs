// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-byte packed unit normals
//!
//! A packed normal stores a direction on the unit sphere as a pair of
//! bytes: `u` is the longitude around +Y (measured from +Z towards +X)
//! and `v` is the latitude measured from +Y. Both are quantised to
//! [`PACK_SIZE`] steps. Decoding is a pure function of `(u, v)` so every
//! byte pair maps to exactly one unit vector.

use std::f64::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quantisation steps for a full longitude turn / half latitude turn
pub const PACK_SIZE: f64 = 252.0;

/// Tolerance below which a direction is treated as a pole when encoding
const POLE_TOLERANCE: f64 = 1e-4;

/// A unit direction packed into two bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackedNormal {
    u: u8,
    v: u8,
}

impl PackedNormal {
    #[inline]
    pub const fn new(u: u8, v: u8) -> Self {
        Self { u, v }
    }

    /// Split a 16-bit packed value: high byte is `u`, low byte is `v`
    #[inline]
    pub const fn from_u16(packed: u16) -> Self {
        Self {
            u: (packed >> 8) as u8,
            v: (packed & 0xFF) as u8,
        }
    }

    #[inline]
    pub const fn to_u16(self) -> u16 {
        ((self.u as u16) << 8) | self.v as u16
    }

    #[inline]
    pub const fn u(self) -> u8 {
        self.u
    }

    #[inline]
    pub const fn v(self) -> u8 {
        self.v
    }

    /// Decode to a unit vector `(x, y, z)`
    #[inline]
    pub fn decode(self) -> (f64, f64, f64) {
        let lon = f64::from(self.u) / PACK_SIZE * TAU;
        let lat = f64::from(self.v) / PACK_SIZE * PI;

        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        (sin_lat * sin_lon, cos_lat, sin_lat * cos_lon)
    }

    /// Quantise a direction to the nearest packed pair
    ///
    /// The input is normalised first; a zero vector encodes as +Y.
    pub fn encode(x: f64, y: f64, z: f64) -> Self {
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 || !len.is_finite() {
            return Self::default();
        }
        let (x, y, z) = (x / len, y / len, z / len);

        let lat = y.clamp(-1.0, 1.0).acos();
        let lon = if (1.0 - y.abs()) < POLE_TOLERANCE {
            0.0
        } else {
            let lon = x.atan2(z);
            if lon < 0.0 {
                lon + TAU
            } else {
                lon
            }
        };

        // Both ratios are in [0, 1], so the rounded values fit in a byte
        let u = (lon / TAU * PACK_SIZE).round() as u32 % PACK_SIZE as u32;
        let v = (lat / PI * PACK_SIZE).round() as u32;
        Self::new(u as u8, v as u8)
    }
}

impl From<u16> for PackedNormal {
    fn from(packed: u16) -> Self {
        Self::from_u16(packed)
    }
}
