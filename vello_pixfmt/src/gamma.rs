// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Power-law gamma lookup tables.
//!
//! A [`GammaLut`] converts gamma-encoded values of a low resolution into linear values of a
//! (usually) higher resolution and back, so that blending can happen on linear intensities
//! while the framebuffer keeps its gamma-encoded representation. Both tables are built once
//! and are read-only afterwards, so a table can be shared between pixel formats and threads
//! through an [`Arc`].

use crate::error::Error;
use crate::math::{Component, uround};
use core::fmt;
use std::sync::Arc;

/// A forward/inverse gamma correction, as consumed by
/// [`BlendGamma`](crate::blend::BlendGamma).
pub trait GammaCorrection {
    /// The gamma-encoded, stored representation.
    type Lo: Component;
    /// The linear representation blending happens in.
    type Hi: Component;

    /// Convert a stored value to linear.
    fn dir(&self, val: Self::Lo) -> Self::Hi;

    /// Convert a linear value back to its stored representation.
    fn inv(&self, val: Self::Hi) -> Self::Lo;
}

impl<G: GammaCorrection + ?Sized> GammaCorrection for &G {
    type Lo = G::Lo;
    type Hi = G::Hi;

    #[inline(always)]
    fn dir(&self, val: Self::Lo) -> Self::Hi {
        (**self).dir(val)
    }

    #[inline(always)]
    fn inv(&self, val: Self::Hi) -> Self::Lo {
        (**self).inv(val)
    }
}

impl<G: GammaCorrection + ?Sized> GammaCorrection for Arc<G> {
    type Lo = G::Lo;
    type Hi = G::Hi;

    #[inline(always)]
    fn dir(&self, val: Self::Lo) -> Self::Hi {
        (**self).dir(val)
    }

    #[inline(always)]
    fn inv(&self, val: Self::Hi) -> Self::Lo {
        (**self).inv(val)
    }
}

/// Lookup tables for a power-law gamma.
///
/// The forward table has `2^gamma_shift` entries indexed by `Lo` values and yields `Hi` values
/// in `[0, 2^hi_res_shift)`. The inverse table has `2^hi_res_shift` entries and maps back.
/// Inputs beyond the last table entry are clamped to it.
#[derive(Clone)]
pub struct GammaLut<Lo = u8, Hi = u8> {
    gamma: f64,
    gamma_shift: u32,
    hi_res_shift: u32,
    dir: Box<[Hi]>,
    inv: Box<[Lo]>,
}

impl<Lo: Component, Hi: Component> GammaLut<Lo, Hi> {
    /// Create identity tables with the full resolution of `Lo` and `Hi`.
    pub fn new() -> Self {
        let (dir, inv) = build_tables(1.0, Lo::BITS, Hi::BITS);
        Self {
            gamma: 1.0,
            gamma_shift: Lo::BITS,
            hi_res_shift: Hi::BITS,
            dir,
            inv,
        }
    }

    /// Create tables for `gamma` with the full resolution of `Lo` and `Hi`.
    pub fn with_gamma(gamma: f64) -> Result<Self, Error> {
        Self::with_shifts(gamma, Lo::BITS, Hi::BITS)
    }

    /// Create tables for `gamma` with `2^gamma_shift` forward and `2^hi_res_shift` inverse
    /// entries.
    pub fn with_shifts(gamma: f64, gamma_shift: u32, hi_res_shift: u32) -> Result<Self, Error> {
        check_shift(gamma_shift, Lo::BITS)?;
        check_shift(hi_res_shift, Hi::BITS)?;
        check_gamma(gamma)?;

        let (dir, inv) = build_tables(gamma, gamma_shift, hi_res_shift);
        Ok(Self {
            gamma,
            gamma_shift,
            hi_res_shift,
            dir,
            inv,
        })
    }

    /// Rebuild both tables for a new gamma, keeping the resolutions.
    ///
    /// On error the current tables are left untouched.
    pub fn set_gamma(&mut self, gamma: f64) -> Result<(), Error> {
        check_gamma(gamma)?;

        let (dir, inv) = build_tables(gamma, self.gamma_shift, self.hi_res_shift);
        self.dir = dir;
        self.inv = inv;
        self.gamma = gamma;

        Ok(())
    }

    /// The gamma exponent the tables were built for.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// The base-2 logarithm of the forward table size.
    pub fn gamma_shift(&self) -> u32 {
        self.gamma_shift
    }

    /// The base-2 logarithm of the inverse table size.
    pub fn hi_res_shift(&self) -> u32 {
        self.hi_res_shift
    }

    /// Convert a gamma-encoded value to linear.
    #[inline(always)]
    pub fn dir(&self, val: Lo) -> Hi {
        self.dir[(val.to_u32() as usize).min(self.dir.len() - 1)]
    }

    /// Convert a linear value back to gamma-encoded.
    #[inline(always)]
    pub fn inv(&self, val: Hi) -> Lo {
        self.inv[(val.to_u32() as usize).min(self.inv.len() - 1)]
    }
}

impl<Lo: Component, Hi: Component> Default for GammaLut<Lo, Hi> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Lo, Hi> fmt::Debug for GammaLut<Lo, Hi> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GammaLut")
            .field("gamma", &self.gamma)
            .field("gamma_shift", &self.gamma_shift)
            .field("hi_res_shift", &self.hi_res_shift)
            .finish_non_exhaustive()
    }
}

impl<Lo: Component, Hi: Component> GammaCorrection for GammaLut<Lo, Hi> {
    type Lo = Lo;
    type Hi = Hi;

    #[inline(always)]
    fn dir(&self, val: Lo) -> Hi {
        Self::dir(self, val)
    }

    #[inline(always)]
    fn inv(&self, val: Hi) -> Lo {
        Self::inv(self, val)
    }
}

fn check_gamma(gamma: f64) -> Result<(), Error> {
    if gamma.is_finite() && gamma > 0.0 {
        Ok(())
    } else {
        log::warn!("rejecting gamma {gamma}");
        Err(Error::InvalidGamma(gamma))
    }
}

fn check_shift(shift: u32, bits: u32) -> Result<(), Error> {
    if (1..=bits).contains(&shift) {
        Ok(())
    } else {
        Err(Error::InvalidShift { shift, bits })
    }
}

fn build_tables<Lo: Component, Hi: Component>(
    gamma: f64,
    gamma_shift: u32,
    hi_res_shift: u32,
) -> (Box<[Hi]>, Box<[Lo]>) {
    log::debug!(
        "building gamma tables: gamma = {gamma}, gamma_shift = {gamma_shift}, hi_res_shift = {hi_res_shift}"
    );

    let gamma_size = 1_u32 << gamma_shift;
    let hi_res_size = 1_u32 << hi_res_shift;

    // The identity is a pure rescaling between the two resolutions.
    if gamma == 1.0 {
        let rescale = |val: u32, from: u32, to: u32| {
            if to >= from {
                val << (to - from)
            } else {
                val >> (from - to)
            }
        };

        let dir = (0..gamma_size)
            .map(|i| Hi::from_u32(rescale(i, gamma_shift, hi_res_shift)))
            .collect::<Box<[_]>>();
        let inv = (0..hi_res_size)
            .map(|i| Lo::from_u32(rescale(i, hi_res_shift, gamma_shift)))
            .collect::<Box<[_]>>();

        return (dir, inv);
    }

    let gamma_mask = f64::from(gamma_size - 1);
    let hi_res_mask = f64::from(hi_res_size - 1);
    let inv_gamma = 1.0 / gamma;

    let dir = (0..gamma_size)
        .map(|i| Hi::from_u32(uround((f64::from(i) / gamma_mask).powf(gamma) * hi_res_mask)))
        .collect::<Box<[_]>>();
    let inv = (0..hi_res_size)
        .map(|i| {
            Lo::from_u32(uround(
                (f64::from(i) / hi_res_mask).powf(inv_gamma) * gamma_mask,
            ))
        })
        .collect::<Box<[_]>>();

    (dir, inv)
}

#[cfg(test)]
mod tests {
    use super::{GammaCorrection, GammaLut};
    use crate::error::Error;
    use std::sync::Arc;
    use std::thread;

    fn assert_monotonic<Lo: crate::math::Component, Hi: crate::math::Component>(
        lut: &GammaLut<Lo, Hi>,
    ) {
        for i in 1..lut.dir.len() {
            assert!(lut.dir[i - 1] <= lut.dir[i], "forward table decreases at {i}");
        }
        for i in 1..lut.inv.len() {
            assert!(lut.inv[i - 1] <= lut.inv[i], "inverse table decreases at {i}");
        }
    }

    #[test]
    fn gamma_two_forward() {
        let lut = GammaLut::<u8, u8>::with_gamma(2.0).unwrap();
        let expected = ((128.0_f64 / 255.0).powf(2.0) * 255.0).round() as u8;
        assert_eq!(lut.dir(128), expected);
        assert_eq!(lut.dir(128), 64);
        assert_eq!(lut.dir(0), 0);
        assert_eq!(lut.dir(255), 255);
        assert_eq!(lut.inv(64), 128);
        assert_monotonic(&lut);
    }

    #[test]
    fn identity_is_exact_rescaling() {
        let lut = GammaLut::<u8, u8>::new();
        for v in 0..=u8::MAX {
            assert_eq!(lut.dir(v), v);
            assert_eq!(lut.inv(v), v);
        }

        let wide = GammaLut::<u8, u16>::with_gamma(1.0).unwrap();
        for v in 0..=u8::MAX {
            assert_eq!(wide.dir(v), u16::from(v) << 8);
            assert_eq!(wide.inv((u16::from(v) << 8) | 0xff), v);
        }
    }

    #[test]
    fn reduced_resolution_clamps_input() {
        let lut = GammaLut::<u8, u16>::with_shifts(2.2, 4, 12).unwrap();
        assert_eq!(lut.dir(15), 4095);
        assert_eq!(lut.dir(200), 4095);
        assert_eq!(lut.inv(u16::MAX), 15);
        assert_monotonic(&lut);
    }

    #[test]
    fn rejects_non_positive_gamma() {
        for gamma in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let res = GammaLut::<u8, u8>::with_gamma(gamma);
            assert!(matches!(res, Err(Error::InvalidGamma(_))), "{gamma} accepted");
        }
    }

    #[test]
    fn extreme_positive_gamma_is_monotonic() {
        for gamma in [1e-3, 0.1, 0.45, 2.2, 10.0, 1e3] {
            assert_monotonic(&GammaLut::<u8, u8>::with_gamma(gamma).unwrap());
            assert_monotonic(&GammaLut::<u8, u16>::with_gamma(gamma).unwrap());
        }
    }

    #[test]
    fn rejects_invalid_shifts() {
        assert_eq!(
            GammaLut::<u8, u8>::with_shifts(2.2, 9, 8).unwrap_err(),
            Error::InvalidShift { shift: 9, bits: 8 }
        );
        assert_eq!(
            GammaLut::<u8, u16>::with_shifts(2.2, 8, 0).unwrap_err(),
            Error::InvalidShift { shift: 0, bits: 16 }
        );
    }

    #[test]
    fn failed_rebuild_keeps_tables() {
        let mut lut = GammaLut::<u8, u8>::with_gamma(2.0).unwrap();
        assert!(lut.set_gamma(-2.0).is_err());
        assert_eq!(lut.gamma(), 2.0);
        assert_eq!(lut.dir(128), 64);

        lut.set_gamma(1.0).unwrap();
        assert_eq!(lut.dir(128), 128);
    }

    #[test]
    fn shared_between_threads() {
        let lut = Arc::new(GammaLut::<u8, u16>::with_gamma(2.2).unwrap());
        let expected: Vec<u16> = (0..=u8::MAX).map(|v| lut.dir(v)).collect();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lut = Arc::clone(&lut);
                thread::spawn(move || (0..=u8::MAX).map(|v| lut.dir(v)).collect::<Vec<_>>())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert_eq!(GammaCorrection::inv(&lut, lut.dir(200)), 200);
    }
}
