// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-point compositing arithmetic.
//!
//! All operators work on unsigned components whose full range maps to `[0, 1]`, i.e. `255`
//! for 8-bit components and `65535` for 16-bit components. Coverage values use the same
//! representation as the component they scale, so a coverage of [`Component::FULL`] is a
//! fully opaque contribution.
//!
//! The operators avoid a true division by the maximum value. Instead they rely on the identity
//! `x / (2^n - 1) ≈ (x + (x >> n)) >> n`, which, combined with a rounding bias of `2^(n - 1)`,
//! yields results that are identical to `round(x / (2^n - 1))` over the whole input domain.
//! Truncating instead of rounding is not an option here: repeated composition would slowly
//! darken the destination.

use bytemuck::Pod;
use core::fmt::Debug;
use core::hash::Hash;

/// An unsigned color component with fixed-point compositing operators.
///
/// This is implemented for [`u8`] and [`u16`].
pub trait Component:
    Pod + Default + Debug + Eq + Ord + Hash + Send + Sync + 'static
{
    /// The number of bits in the component.
    const BITS: u32;
    /// The value representing `0.0`.
    const ZERO: Self;
    /// The value representing `1.0`.
    const FULL: Self;

    /// Widen the component to a `u32`.
    fn to_u32(self) -> u32;

    /// Narrow a `u32` to a component, saturating at [`Component::FULL`].
    fn from_u32(val: u32) -> Self;

    /// Multiply two normalized values, i.e. `round(self * other / FULL)`.
    fn multiply(self, other: Self) -> Self;

    /// Scale a value by a coverage, i.e. `round(self * cover / FULL)`.
    ///
    /// A coverage of zero always yields zero and a full coverage leaves the value unchanged.
    #[inline(always)]
    fn mult_cover(self, cover: Self) -> Self {
        self.multiply(cover)
    }

    /// Interpolate from `self` towards `q` by `alpha`.
    ///
    /// This computes `round(self + (q - self) * alpha / FULL)` using a signed intermediate, so
    /// `lerp(p, q, 0) == p` and `lerp(p, q, FULL) == q` hold exactly and the result is monotonic
    /// in `alpha`.
    fn lerp(self, q: Self, alpha: Self) -> Self;

    /// Interpolate from `self` towards `q` by `alpha`, where `q` is already premultiplied by
    /// `alpha`.
    ///
    /// This computes `q + self * (FULL - alpha) / FULL`. Well-formed input (`q <= alpha`) stays
    /// within range; malformed input saturates at [`Component::FULL`].
    fn prelerp(self, q: Self, alpha: Self) -> Self;

    /// Undo a premultiplication of `self` by `alpha`.
    ///
    /// Values equal to or larger than `alpha` map to [`Component::FULL`], and a zero alpha
    /// yields zero.
    fn demultiply(self, alpha: Self) -> Self;

    /// Return `FULL - self`.
    #[inline(always)]
    fn invert(self) -> Self {
        Self::from_u32(Self::FULL.to_u32() - self.to_u32())
    }

    /// Rescale the component to a component of a different depth, with rounding.
    #[inline]
    fn rescale<D: Component>(self) -> D {
        if D::BITS == Self::BITS {
            return D::from_u32(self.to_u32());
        }

        let src_full = u64::from(Self::FULL.to_u32());
        let dst_full = u64::from(D::FULL.to_u32());
        let scaled = (u64::from(self.to_u32()) * dst_full + src_full / 2) / src_full;

        D::from_u32(u32::try_from(scaled).unwrap_or(u32::MAX))
    }

    /// Convert a normalized float to a component, clamping to `[0, 1]` and rounding.
    fn from_f64(val: f64) -> Self;

    /// Convert the component to a normalized float.
    #[inline(always)]
    fn to_f64(self) -> f64 {
        f64::from(self.to_u32()) / f64::from(Self::FULL.to_u32())
    }
}

macro_rules! component {
    ($ty:ty, $calc:ty, $long:ty) => {
        impl Component for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const FULL: Self = <$ty>::MAX;

            #[inline(always)]
            fn to_u32(self) -> u32 {
                u32::from(self)
            }

            #[inline(always)]
            fn from_u32(val: u32) -> Self {
                <$ty>::try_from(val).unwrap_or(Self::FULL)
            }

            #[inline(always)]
            fn multiply(self, other: Self) -> Self {
                let t = <$calc>::from(self) * <$calc>::from(other) + (1 << (Self::BITS - 1));
                (((t >> Self::BITS) + t) >> Self::BITS) as $ty
            }

            #[inline(always)]
            fn lerp(self, q: Self, alpha: Self) -> Self {
                let p = <$long>::from(self);
                let t = (<$long>::from(q) - p) * <$long>::from(alpha) + (1 << (Self::BITS - 1))
                    - <$long>::from(self > q);
                (p + (((t >> Self::BITS) + t) >> Self::BITS)) as $ty
            }

            #[inline(always)]
            fn prelerp(self, q: Self, alpha: Self) -> Self {
                // `multiply(p, alpha) <= p`, so the subtraction cannot underflow.
                let res = <$calc>::from(self) + <$calc>::from(q)
                    - <$calc>::from(self.multiply(alpha));
                res.min(<$calc>::from(Self::FULL)) as $ty
            }

            #[inline]
            fn demultiply(self, alpha: Self) -> Self {
                if self == 0 || alpha == 0 {
                    0
                } else if self >= alpha {
                    Self::FULL
                } else {
                    let alpha_c = <$calc>::from(alpha);
                    ((<$calc>::from(self) * <$calc>::from(Self::FULL) + (alpha_c >> 1)) / alpha_c)
                        as $ty
                }
            }

            #[inline]
            fn from_f64(val: f64) -> Self {
                // Float to int casts saturate, and NaN maps to zero.
                (val.clamp(0.0, 1.0) * f64::from(Self::FULL) + 0.5) as $ty
            }
        }
    };
}

component!(u8, u32, i32);
component!(u16, u64, i64);

/// Round a non-negative float to the nearest integer.
#[inline(always)]
pub(crate) fn uround(val: f64) -> u32 {
    (val + 0.5) as u32
}

#[cfg(test)]
mod tests {
    use super::Component;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn rounded_div(num: u64, den: u64) -> u64 {
        (2 * num + den) / (2 * den)
    }

    #[test]
    fn multiply_rounds_like_division_u8() {
        for a in 0..=u8::MAX {
            for b in 0..=u8::MAX {
                let expected = rounded_div(u64::from(a) * u64::from(b), 255);
                assert_eq!(u64::from(a.multiply(b)), expected, "{a} * {b}");
            }
        }
    }

    #[test]
    fn multiply_rounds_like_division_u16() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..100_000 {
            let a: u16 = rng.random();
            let b: u16 = rng.random();
            let expected = rounded_div(u64::from(a) * u64::from(b), 65535);
            assert_eq!(u64::from(a.multiply(b)), expected, "{a} * {b}");
        }
    }

    #[test]
    fn mult_cover_bounds() {
        for v in 0..=u8::MAX {
            assert_eq!(v.mult_cover(255), v);
            assert_eq!(v.mult_cover(0), 0);
        }

        for v in 0..=u16::MAX {
            assert_eq!(v.mult_cover(u16::MAX), v);
            assert_eq!(v.mult_cover(0), 0);
        }
    }

    #[test]
    fn lerp_identities_and_monotonicity_u8() {
        for dst in 0..=u8::MAX {
            for src in 0..=u8::MAX {
                assert_eq!(dst.lerp(src, 0), dst);
                assert_eq!(dst.lerp(src, 255), src);

                let mut prev = dst;
                for alpha in 1..=u8::MAX {
                    let cur = dst.lerp(src, alpha);
                    if src >= dst {
                        assert!(cur >= prev, "lerp({dst}, {src}, {alpha}) decreased");
                    } else {
                        assert!(cur <= prev, "lerp({dst}, {src}, {alpha}) increased");
                    }
                    prev = cur;
                }
            }
        }
    }

    #[test]
    fn lerp_matches_rounded_interpolation() {
        for dst in (0..=u8::MAX).step_by(3) {
            for src in 0..=u8::MAX {
                for alpha in 0..=u8::MAX {
                    let exact = f64::from(dst)
                        + (f64::from(src) - f64::from(dst)) * f64::from(alpha) / 255.0;
                    assert_eq!(
                        dst.lerp(src, alpha),
                        (exact + 0.5).floor() as u8,
                        "lerp({dst}, {src}, {alpha})"
                    );
                }
            }
        }
    }

    #[test]
    fn lerp_identities_u16() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100_000 {
            let dst: u16 = rng.random();
            let src: u16 = rng.random();
            assert_eq!(dst.lerp(src, 0), dst);
            assert_eq!(dst.lerp(src, u16::MAX), src);

            let alpha: u16 = rng.random();
            let lo = dst.min(src);
            let hi = dst.max(src);
            let mid = dst.lerp(src, alpha);
            assert!(lo <= mid && mid <= hi);
        }
    }

    #[test]
    fn prelerp_full_alpha_replaces() {
        for dst in 0..=u8::MAX {
            for src in 0..=u8::MAX {
                assert_eq!(dst.prelerp(src, 255), src);
            }
            assert_eq!(dst.prelerp(0, 0), dst);
        }
    }

    #[test]
    fn prelerp_malformed_input_saturates() {
        // Source channel larger than its alpha.
        assert_eq!(200_u8.prelerp(200, 10), 255);
        assert_eq!(60_000_u16.prelerp(60_000, 100), u16::MAX);
    }

    #[test]
    fn demultiply_edges() {
        for v in 0..=u8::MAX {
            assert_eq!(v.demultiply(255), v);
            assert_eq!(v.demultiply(0), 0);
        }
        assert_eq!(0_u8.demultiply(128), 0);
        assert_eq!(200_u8.demultiply(100), 255);
        assert_eq!(64_u8.demultiply(128), 128);
    }

    #[test]
    fn rescale_between_depths() {
        for v in 0..=u8::MAX {
            let wide: u16 = v.rescale();
            assert_eq!(wide, u16::from(v) * 257);
            assert_eq!(wide.rescale::<u8>(), v);
        }
        assert_eq!(0x7fff_u16.rescale::<u8>(), 127);
        assert_eq!(0x8080_u16.rescale::<u8>(), 128);
    }

    #[test]
    fn float_conversion() {
        assert_eq!(u8::from_f64(0.5), 128);
        assert_eq!(u8::from_f64(-1.0), 0);
        assert_eq!(u8::from_f64(2.0), 255);
        assert_eq!(u8::from_f64(f64::NAN), 0);
        assert_eq!(u16::from_f64(1.0), u16::MAX);
        assert_eq!(255_u8.to_f64(), 1.0);
        assert_eq!(3_u8.invert(), 252);
    }
}
