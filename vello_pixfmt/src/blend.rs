// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blender variants.
//!
//! A [`BlendOp`] defines how a source color, weighted by a coverage, is combined with the
//! channels of a destination pixel. It only ever sees channels in logical `[r, g, b, a]` order;
//! the pixel layouts in [`pixel`](crate::pixel) and [`packed`](crate::packed) take care of
//! channel order and encoding, so each variant is written exactly once for every layout.
//!
//! All variants leave the destination untouched if either the source alpha or the coverage is
//! zero.

use crate::gamma::GammaCorrection;
use crate::math::Component;

/// How the alpha of the colors handed to a blender is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageMode {
    /// Straight alpha: color channels are independent of alpha.
    Plain,
    /// Color channels are already multiplied by alpha.
    Premultiplied,
}

/// A compositing operator for source colors weighted by a coverage.
pub trait BlendOp<C: Component> {
    /// How the source colors this operator expects store alpha.
    const STORAGE: StorageMode;

    /// Blend a source color into a pixel with an alpha channel.
    fn blend_rgba(&self, p: &mut [C; 4], c: [C; 4], cover: C);

    /// Blend a source color into a pixel without an alpha channel.
    fn blend_rgb(&self, p: &mut [C; 3], c: [C; 3], alpha: C, cover: C);

    /// Blend a source intensity into a single-channel pixel.
    fn blend_gray(&self, p: &mut C, v: C, alpha: C, cover: C);
}

/// Straight-alpha source colors, interpolated towards by `alpha * cover`.
///
/// The destination alpha accumulates with the "over" operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlendPlain;

impl<C: Component> BlendOp<C> for BlendPlain {
    const STORAGE: StorageMode = StorageMode::Plain;

    #[inline(always)]
    fn blend_rgba(&self, p: &mut [C; 4], c: [C; 4], cover: C) {
        let alpha = c[3].mult_cover(cover);
        if alpha == C::ZERO {
            return;
        }

        p[0] = p[0].lerp(c[0], alpha);
        p[1] = p[1].lerp(c[1], alpha);
        p[2] = p[2].lerp(c[2], alpha);
        p[3] = p[3].prelerp(alpha, alpha);
    }

    #[inline(always)]
    fn blend_rgb(&self, p: &mut [C; 3], c: [C; 3], alpha: C, cover: C) {
        let alpha = alpha.mult_cover(cover);
        if alpha == C::ZERO {
            return;
        }

        p[0] = p[0].lerp(c[0], alpha);
        p[1] = p[1].lerp(c[1], alpha);
        p[2] = p[2].lerp(c[2], alpha);
    }

    #[inline(always)]
    fn blend_gray(&self, p: &mut C, v: C, alpha: C, cover: C) {
        let alpha = alpha.mult_cover(cover);
        if alpha == C::ZERO {
            return;
        }

        *p = p.lerp(v, alpha);
    }
}

/// Premultiplied source colors.
///
/// Every source channel, alpha included, is scaled by the coverage before compositing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlendPremul;

impl<C: Component> BlendOp<C> for BlendPremul {
    const STORAGE: StorageMode = StorageMode::Premultiplied;

    #[inline(always)]
    fn blend_rgba(&self, p: &mut [C; 4], c: [C; 4], cover: C) {
        if c[3] == C::ZERO || cover == C::ZERO {
            return;
        }

        let [r, g, b, a] = if cover == C::FULL {
            c
        } else {
            c.map(|v| v.mult_cover(cover))
        };

        p[0] = p[0].prelerp(r, a);
        p[1] = p[1].prelerp(g, a);
        p[2] = p[2].prelerp(b, a);
        p[3] = p[3].prelerp(a, a);
    }

    #[inline(always)]
    fn blend_rgb(&self, p: &mut [C; 3], c: [C; 3], alpha: C, cover: C) {
        if alpha == C::ZERO || cover == C::ZERO {
            return;
        }

        let ([r, g, b], a) = if cover == C::FULL {
            (c, alpha)
        } else {
            (c.map(|v| v.mult_cover(cover)), alpha.mult_cover(cover))
        };

        p[0] = p[0].prelerp(r, a);
        p[1] = p[1].prelerp(g, a);
        p[2] = p[2].prelerp(b, a);
    }

    #[inline(always)]
    fn blend_gray(&self, p: &mut C, v: C, alpha: C, cover: C) {
        if alpha == C::ZERO || cover == C::ZERO {
            return;
        }

        *p = p.prelerp(v.mult_cover(cover), alpha.mult_cover(cover));
    }
}

/// Straight-alpha source colors into a buffer that also stores straight alpha.
///
/// The destination is premultiplied, composited and demultiplied again. Without a
/// destination alpha channel this is the same as [`BlendPlain`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlendStraight;

impl<C: Component> BlendOp<C> for BlendStraight {
    const STORAGE: StorageMode = StorageMode::Plain;

    #[inline(always)]
    fn blend_rgba(&self, p: &mut [C; 4], c: [C; 4], cover: C) {
        let alpha = c[3].mult_cover(cover);
        if alpha == C::ZERO {
            return;
        }

        let da = p[3];
        let a = da.prelerp(alpha, alpha);
        for (p, c) in p[..3].iter_mut().zip(c) {
            *p = p.multiply(da).lerp(c, alpha).demultiply(a);
        }
        p[3] = a;
    }

    #[inline(always)]
    fn blend_rgb(&self, p: &mut [C; 3], c: [C; 3], alpha: C, cover: C) {
        BlendPlain.blend_rgb(p, c, alpha, cover);
    }

    #[inline(always)]
    fn blend_gray(&self, p: &mut C, v: C, alpha: C, cover: C) {
        BlendPlain.blend_gray(p, v, alpha, cover);
    }
}

/// Straight-alpha source colors, composited on linear intensities.
///
/// Color channels are converted with [`GammaCorrection::dir`] before interpolation and back
/// with [`GammaCorrection::inv`] afterwards. Alpha is never gamma-corrected. Without a gamma
/// correction this blends exactly like [`BlendPlain`].
#[derive(Clone, Debug, Default)]
pub struct BlendGamma<G> {
    gamma: Option<G>,
}

impl<G: GammaCorrection> BlendGamma<G> {
    /// Create a blender that corrects with `gamma`.
    pub fn new(gamma: G) -> Self {
        Self { gamma: Some(gamma) }
    }

    /// Create a blender without a gamma correction.
    pub fn without_gamma() -> Self {
        Self { gamma: None }
    }

    /// The current gamma correction, if any.
    pub fn gamma(&self) -> Option<&G> {
        self.gamma.as_ref()
    }

    /// Replace the gamma correction.
    pub fn set_gamma(&mut self, gamma: Option<G>) {
        self.gamma = gamma;
    }
}

#[inline(always)]
fn lerp_linear<G: GammaCorrection>(gamma: &G, p: G::Lo, c: G::Lo, alpha: G::Hi) -> G::Lo {
    gamma.inv(gamma.dir(p).lerp(gamma.dir(c), alpha))
}

impl<C: Component, G: GammaCorrection<Lo = C>> BlendOp<C> for BlendGamma<G> {
    const STORAGE: StorageMode = StorageMode::Plain;

    #[inline(always)]
    fn blend_rgba(&self, p: &mut [C; 4], c: [C; 4], cover: C) {
        let Some(gamma) = &self.gamma else {
            BlendPlain.blend_rgba(p, c, cover);
            return;
        };

        let alpha = c[3].mult_cover(cover);
        if alpha == C::ZERO {
            return;
        }

        let mut rgb = [p[0], p[1], p[2]];
        blend_rgb_linear(gamma, &mut rgb, [c[0], c[1], c[2]], alpha);
        p[..3].copy_from_slice(&rgb);
        p[3] = p[3].prelerp(alpha, alpha);
    }

    #[inline(always)]
    fn blend_rgb(&self, p: &mut [C; 3], c: [C; 3], alpha: C, cover: C) {
        let Some(gamma) = &self.gamma else {
            BlendPlain.blend_rgb(p, c, alpha, cover);
            return;
        };

        let alpha = alpha.mult_cover(cover);
        if alpha == C::ZERO {
            return;
        }

        blend_rgb_linear(gamma, p, c, alpha);
    }

    #[inline(always)]
    fn blend_gray(&self, p: &mut C, v: C, alpha: C, cover: C) {
        let Some(gamma) = &self.gamma else {
            BlendPlain.blend_gray(p, v, alpha, cover);
            return;
        };

        let alpha = alpha.mult_cover(cover);
        if alpha == C::ZERO {
            return;
        }

        *p = if alpha == C::FULL {
            v
        } else {
            lerp_linear(gamma, *p, v, alpha.rescale())
        };
    }
}

#[inline(always)]
fn blend_rgb_linear<G: GammaCorrection>(
    gamma: &G,
    p: &mut [G::Lo; 3],
    c: [G::Lo; 3],
    alpha: G::Lo,
) {
    // Lossy tables would not reproduce the source exactly.
    if alpha == G::Lo::FULL {
        *p = c;
        return;
    }

    let alpha = alpha.rescale();
    for (p, c) in p.iter_mut().zip(c) {
        *p = lerp_linear(gamma, *p, c, alpha);
    }
}
