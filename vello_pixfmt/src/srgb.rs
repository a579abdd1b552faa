// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sRGB transfer function and lookup tables for 8-bit sRGB values.
//!
//! Each [`SrgbLut`] maps the 256 possible sRGB-encoded bytes to linear values of some depth and
//! back. One instance per depth is shared process-wide, see [`SrgbLut::shared`].

use crate::gamma::GammaCorrection;
use crate::math::uround;
use core::fmt::Debug;
use std::sync::LazyLock;

/// Decode a normalized sRGB value to linear intensity.
#[inline]
pub fn srgb_to_linear(x: f64) -> f64 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode a normalized linear intensity with the sRGB transfer function.
#[inline]
pub fn linear_to_srgb(x: f64) -> f64 {
    if x <= 0.003_130_8 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

/// Lookup tables between 8-bit sRGB values and linear values of type `T`.
#[derive(Clone, Debug)]
pub struct SrgbLut<T> {
    dir: [T; 256],
    inv: [T; 256],
}

/// A linear depth that sRGB lookup tables exist for.
///
/// This is implemented for [`u8`], [`u16`] and [`f32`].
pub trait SrgbDepth: Copy + PartialOrd + Debug + Send + Sync + Sized + 'static {
    #[doc(hidden)]
    fn build() -> SrgbLut<Self>;

    #[doc(hidden)]
    fn shared() -> &'static SrgbLut<Self>;

    #[doc(hidden)]
    fn lookup_inv(lut: &SrgbLut<Self>, val: Self) -> u8;
}

impl<T: SrgbDepth> SrgbLut<T> {
    /// Build a new set of tables.
    ///
    /// Prefer [`SrgbLut::shared`], which builds the tables only once per process.
    pub fn new() -> Self {
        T::build()
    }

    /// The process-wide tables for this depth, built on first use.
    pub fn shared() -> &'static Self {
        T::shared()
    }

    /// Convert an sRGB-encoded byte to linear.
    #[inline(always)]
    pub fn dir(&self, val: u8) -> T {
        self.dir[usize::from(val)]
    }

    /// Convert a linear value to the nearest sRGB-encoded byte.
    #[inline(always)]
    pub fn inv(&self, val: T) -> u8 {
        T::lookup_inv(self, val)
    }
}

impl<T: SrgbDepth> Default for SrgbLut<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the largest index whose threshold is below `val`.
///
/// `table[i]` holds the linear value halfway between sRGB values `i - 1` and `i`, so the
/// result is the nearest sRGB value. The table must be non-decreasing.
#[inline]
fn search<T: PartialOrd + Copy>(table: &[T; 256], val: T) -> u8 {
    let mut x = 0;
    if val > table[128] {
        x = 128;
    }
    if val > table[x + 64] {
        x += 64;
    }
    if val > table[x + 32] {
        x += 32;
    }
    if val > table[x + 16] {
        x += 16;
    }
    if val > table[x + 8] {
        x += 8;
    }
    if val > table[x + 4] {
        x += 4;
    }
    if val > table[x + 2] {
        x += 2;
    }
    if val > table[x + 1] {
        x += 1;
    }
    x as u8
}

static SRGB_LUT_U8: LazyLock<SrgbLut<u8>> = LazyLock::new(|| {
    log::debug!("building shared 8-bit sRGB tables");
    u8::build()
});

static SRGB_LUT_U16: LazyLock<SrgbLut<u16>> = LazyLock::new(|| {
    log::debug!("building shared 16-bit sRGB tables");
    u16::build()
});

static SRGB_LUT_F32: LazyLock<SrgbLut<f32>> = LazyLock::new(|| {
    log::debug!("building shared f32 sRGB tables");
    f32::build()
});

impl SrgbDepth for u8 {
    fn build() -> SrgbLut<Self> {
        // At 8 bits both directions fit into direct tables.
        SrgbLut {
            dir: core::array::from_fn(|i| {
                uround(255.0 * srgb_to_linear(i as f64 / 255.0)) as Self
            }),
            inv: core::array::from_fn(|i| {
                uround(255.0 * linear_to_srgb(i as f64 / 255.0)) as Self
            }),
        }
    }

    fn shared() -> &'static SrgbLut<Self> {
        &SRGB_LUT_U8
    }

    #[inline(always)]
    fn lookup_inv(lut: &SrgbLut<Self>, val: Self) -> u8 {
        lut.inv[usize::from(val)]
    }
}

impl SrgbDepth for u16 {
    fn build() -> SrgbLut<Self> {
        SrgbLut {
            dir: core::array::from_fn(|i| {
                uround(65535.0 * srgb_to_linear(i as f64 / 255.0)) as Self
            }),
            inv: core::array::from_fn(|i| {
                if i == 0 {
                    0
                } else {
                    uround(65535.0 * srgb_to_linear((i as f64 - 0.5) / 255.0)) as Self
                }
            }),
        }
    }

    fn shared() -> &'static SrgbLut<Self> {
        &SRGB_LUT_U16
    }

    #[inline(always)]
    fn lookup_inv(lut: &SrgbLut<Self>, val: Self) -> u8 {
        search(&lut.inv, val)
    }
}

impl SrgbDepth for f32 {
    fn build() -> SrgbLut<Self> {
        SrgbLut {
            dir: core::array::from_fn(|i| srgb_to_linear(i as f64 / 255.0) as Self),
            inv: core::array::from_fn(|i| {
                if i == 0 {
                    0.0
                } else {
                    srgb_to_linear((i as f64 - 0.5) / 255.0) as Self
                }
            }),
        }
    }

    fn shared() -> &'static SrgbLut<Self> {
        &SRGB_LUT_F32
    }

    #[inline(always)]
    fn lookup_inv(lut: &SrgbLut<Self>, val: Self) -> u8 {
        search(&lut.inv, val)
    }
}

impl GammaCorrection for SrgbLut<u8> {
    type Lo = u8;
    type Hi = u8;

    #[inline(always)]
    fn dir(&self, val: u8) -> u8 {
        Self::dir(self, val)
    }

    #[inline(always)]
    fn inv(&self, val: u8) -> u8 {
        Self::inv(self, val)
    }
}

impl GammaCorrection for SrgbLut<u16> {
    type Lo = u8;
    type Hi = u16;

    #[inline(always)]
    fn dir(&self, val: u8) -> u16 {
        Self::dir(self, val)
    }

    #[inline(always)]
    fn inv(&self, val: u16) -> u8 {
        Self::inv(self, val)
    }
}
