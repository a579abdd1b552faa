// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color value types.
//!
//! Colors are plain tuples of components, tagged at the type level with the color space their
//! values are encoded in. Whether a color holds premultiplied or straight alpha is a property of
//! the pixel format it is handed to (see [`Blender::STORAGE`](crate::pixel::Blender::STORAGE)),
//! not of the color value itself.

use crate::math::Component;
use crate::srgb::SrgbLut;
use core::fmt::Debug;
use core::hash::Hash;
use core::marker::PhantomData;

/// The color space a color's components are encoded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpaceKind {
    /// Components are proportional to light intensity.
    Linear,
    /// Components are encoded with the sRGB transfer function.
    Srgb,
}

/// A type-level color space tag.
pub trait ColorSpace:
    Copy + Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// The runtime description of the color space.
    const KIND: ColorSpaceKind;
}

/// Linear color space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Linear;

impl ColorSpace for Linear {
    const KIND: ColorSpaceKind = ColorSpaceKind::Linear;
}

/// sRGB-encoded color space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Srgb;

impl ColorSpace for Srgb {
    const KIND: ColorSpaceKind = ColorSpaceKind::Srgb;
}

/// Common operations on the color types a pixel format reads and writes.
pub trait PixelColor: Copy + Debug + PartialEq {
    /// The component type of the color.
    type Component: Component;

    /// The fully transparent color with all components set to zero.
    fn transparent() -> Self;

    /// The alpha component.
    fn alpha(&self) -> Self::Component;

    /// Multiply all color channels by alpha.
    fn premultiply(self) -> Self;

    /// Divide all color channels by alpha.
    fn demultiply(self) -> Self;

    /// Apply `f` to all color channels, leaving alpha untouched.
    fn map_channels(self, f: impl FnMut(Self::Component) -> Self::Component) -> Self;

    /// Whether the color has zero alpha.
    #[inline(always)]
    fn is_transparent(&self) -> bool {
        self.alpha() == Self::Component::ZERO
    }

    /// Whether the color has full alpha.
    #[inline(always)]
    fn is_opaque(&self) -> bool {
        self.alpha() == Self::Component::FULL
    }
}

/// An RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba<C, S = Linear> {
    /// Red component.
    pub r: C,
    /// Green component.
    pub g: C,
    /// Blue component.
    pub b: C,
    /// Alpha component.
    pub a: C,
    space: PhantomData<S>,
}

/// An 8-bit linear RGBA color.
pub type Rgba8 = Rgba<u8, Linear>;
/// A 16-bit linear RGBA color.
pub type Rgba16 = Rgba<u16, Linear>;
/// An 8-bit sRGB-encoded RGBA color.
pub type Srgba8 = Rgba<u8, Srgb>;

impl<C: Component, S: ColorSpace> Rgba<C, S> {
    /// Create a new color.
    #[inline(always)]
    pub const fn new(r: C, g: C, b: C, a: C) -> Self {
        Self {
            r,
            g,
            b,
            a,
            space: PhantomData,
        }
    }

    /// Create a new, fully opaque color.
    #[inline(always)]
    pub fn opaque(r: C, g: C, b: C) -> Self {
        Self::new(r, g, b, C::FULL)
    }

    /// Create a color from an array in `[r, g, b, a]` order.
    #[inline(always)]
    pub fn from_array([r, g, b, a]: [C; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    /// Return the components in `[r, g, b, a]` order.
    #[inline(always)]
    pub fn to_array(self) -> [C; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Return the same color with a different alpha.
    #[inline(always)]
    pub fn with_alpha(self, a: C) -> Self {
        Self { a, ..self }
    }

    /// Return the color space of the color.
    pub fn space(&self) -> ColorSpaceKind {
        S::KIND
    }

    /// Create a color from normalized floats, clamping each to `[0, 1]`.
    pub fn from_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(C::from_f64(r), C::from_f64(g), C::from_f64(b), C::from_f64(a))
    }

    /// Convert the components to a different depth without changing the color space.
    pub fn rescale<D: Component>(self) -> Rgba<D, S> {
        Rgba::new(
            self.r.rescale(),
            self.g.rescale(),
            self.b.rescale(),
            self.a.rescale(),
        )
    }
}

impl<C: Component, S: ColorSpace> PixelColor for Rgba<C, S> {
    type Component = C;

    #[inline(always)]
    fn transparent() -> Self {
        Self::new(C::ZERO, C::ZERO, C::ZERO, C::ZERO)
    }

    #[inline(always)]
    fn alpha(&self) -> C {
        self.a
    }

    fn premultiply(self) -> Self {
        if self.a == C::FULL {
            self
        } else if self.a == C::ZERO {
            Self::transparent()
        } else {
            let a = self.a;
            self.map_channels(|c| c.multiply(a))
        }
    }

    fn demultiply(self) -> Self {
        if self.a == C::FULL {
            self
        } else if self.a == C::ZERO {
            Self::transparent()
        } else {
            let a = self.a;
            self.map_channels(|c| c.demultiply(a))
        }
    }

    #[inline(always)]
    fn map_channels(self, mut f: impl FnMut(C) -> C) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }
}

impl Rgba<u8, Srgb> {
    /// Decode the color channels to linear 8-bit values. Alpha is unchanged.
    pub fn to_linear(self) -> Rgba<u8, Linear> {
        let lut = SrgbLut::<u8>::shared();
        Rgba::new(lut.dir(self.r), lut.dir(self.g), lut.dir(self.b), self.a)
    }

    /// Decode the color to normalized linear floats in `[r, g, b, a]` order.
    ///
    /// Alpha is not gamma-encoded and is converted linearly.
    pub fn to_linear_f32(self) -> [f32; 4] {
        let lut = SrgbLut::<f32>::shared();
        [
            lut.dir(self.r),
            lut.dir(self.g),
            lut.dir(self.b),
            f32::from(self.a) / 255.0,
        ]
    }

    /// Encode normalized linear floats given in `[r, g, b, a]` order.
    pub fn from_linear_f32([r, g, b, a]: [f32; 4]) -> Self {
        let lut = SrgbLut::<f32>::shared();
        Self::new(
            lut.inv(r),
            lut.inv(g),
            lut.inv(b),
            u8::from_f64(f64::from(a)),
        )
    }
}

impl Rgba<u8, Linear> {
    /// Encode the color channels with the sRGB transfer function. Alpha is unchanged.
    pub fn to_srgb(self) -> Rgba<u8, Srgb> {
        let lut = SrgbLut::<u8>::shared();
        Rgba::new(lut.inv(self.r), lut.inv(self.g), lut.inv(self.b), self.a)
    }
}

impl From<Rgba<u8, Srgb>> for Rgba<u16, Linear> {
    fn from(c: Rgba<u8, Srgb>) -> Self {
        let lut = SrgbLut::<u16>::shared();
        Self::new(lut.dir(c.r), lut.dir(c.g), lut.dir(c.b), c.a.rescale())
    }
}

impl From<Rgba<u16, Linear>> for Rgba<u8, Srgb> {
    fn from(c: Rgba<u16, Linear>) -> Self {
        let lut = SrgbLut::<u16>::shared();
        Self::new(lut.inv(c.r), lut.inv(c.g), lut.inv(c.b), c.a.rescale())
    }
}

#[cfg(feature = "peniko")]
mod peniko_interop {
    use super::{Rgba, Srgb};
    use peniko::color::{PremulRgba8, Rgba8};

    // Peniko's 8-bit colors are sRGB-encoded.
    impl From<Rgba8> for Rgba<u8, Srgb> {
        fn from(c: Rgba8) -> Self {
            Self::new(c.r, c.g, c.b, c.a)
        }
    }

    impl From<Rgba<u8, Srgb>> for Rgba8 {
        fn from(c: Rgba<u8, Srgb>) -> Self {
            Self {
                r: c.r,
                g: c.g,
                b: c.b,
                a: c.a,
            }
        }
    }

    /// The components are taken as-is; hand the result to a premultiplied pixel format.
    impl From<PremulRgba8> for Rgba<u8, Srgb> {
        fn from(c: PremulRgba8) -> Self {
            Self::new(c.r, c.g, c.b, c.a)
        }
    }

    impl From<Rgba<u8, Srgb>> for PremulRgba8 {
        fn from(c: Rgba<u8, Srgb>) -> Self {
            Self {
                r: c.r,
                g: c.g,
                b: c.b,
                a: c.a,
            }
        }
    }
}

/// A grayscale color with alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gray<C, S = Linear> {
    /// Intensity.
    pub v: C,
    /// Alpha component.
    pub a: C,
    space: PhantomData<S>,
}

/// An 8-bit linear gray color.
pub type Gray8 = Gray<u8, Linear>;
/// A 16-bit linear gray color.
pub type Gray16 = Gray<u16, Linear>;

impl<C: Component, S: ColorSpace> Gray<C, S> {
    /// Create a new gray color.
    #[inline(always)]
    pub const fn new(v: C, a: C) -> Self {
        Self {
            v,
            a,
            space: PhantomData,
        }
    }

    /// Create a new, fully opaque gray color.
    #[inline(always)]
    pub fn opaque(v: C) -> Self {
        Self::new(v, C::FULL)
    }

    /// Return the same color with a different alpha.
    #[inline(always)]
    pub fn with_alpha(self, a: C) -> Self {
        Self { a, ..self }
    }
}

impl<S: ColorSpace> From<Rgba<u8, S>> for Gray<u8, S> {
    /// Compute the luminance with integer Rec. 601 weights.
    fn from(c: Rgba<u8, S>) -> Self {
        let v = (u32::from(c.r) * 77 + u32::from(c.g) * 150 + u32::from(c.b) * 29) >> 8;
        Self::new(u8::from_u32(v), c.a)
    }
}

impl<S: ColorSpace> From<Rgba<u16, S>> for Gray<u16, S> {
    /// Compute the luminance with integer Rec. 601 weights.
    fn from(c: Rgba<u16, S>) -> Self {
        let v = (u64::from(c.r) * 19595 + u64::from(c.g) * 38470 + u64::from(c.b) * 7471) >> 16;
        Self::new(u16::from_u32(v as u32), c.a)
    }
}

impl<C: Component, S: ColorSpace> PixelColor for Gray<C, S> {
    type Component = C;

    #[inline(always)]
    fn transparent() -> Self {
        Self::new(C::ZERO, C::ZERO)
    }

    #[inline(always)]
    fn alpha(&self) -> C {
        self.a
    }

    fn premultiply(self) -> Self {
        if self.a == C::ZERO {
            Self::transparent()
        } else {
            Self::new(self.v.multiply(self.a), self.a)
        }
    }

    fn demultiply(self) -> Self {
        if self.a == C::ZERO {
            Self::transparent()
        } else {
            Self::new(self.v.demultiply(self.a), self.a)
        }
    }

    #[inline(always)]
    fn map_channels(self, mut f: impl FnMut(C) -> C) -> Self {
        Self::new(f(self.v), self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::{Gray, Gray8, PixelColor, Rgba, Rgba8, Rgba16, Srgba8};

    #[test]
    fn premultiply_then_demultiply() {
        let c = Rgba8::new(200, 100, 50, 128);
        let p = c.premultiply();
        assert_eq!(p, Rgba8::new(100, 50, 25, 128));
        assert_eq!(p.demultiply(), Rgba8::new(199, 100, 50, 128));

        assert_eq!(Rgba8::new(1, 2, 3, 0).premultiply(), Rgba8::transparent());
        assert_eq!(Rgba8::opaque(1, 2, 3).premultiply(), Rgba8::opaque(1, 2, 3));
    }

    #[test]
    fn srgb_round_trip_through_u16() {
        for v in 0..=u8::MAX {
            let c = Srgba8::new(v, v / 2, 255 - v, v);
            let linear: Rgba16 = c.into();
            assert_eq!(Srgba8::from(linear), c);
        }
    }

    #[test]
    fn srgb_to_linear_u8() {
        let c = Srgba8::new(0, 128, 255, 77);
        let l = c.to_linear();
        assert_eq!(l, Rgba8::new(0, 55, 255, 77));
        assert_eq!(Rgba8::new(0, 128, 255, 9).to_srgb(), Srgba8::new(0, 188, 255, 9));
    }

    #[test]
    fn srgb_to_linear_f32() {
        let c = Srgba8::new(0, 128, 255, 255);
        let [r, g, b, a] = c.to_linear_f32();
        assert_eq!(r, 0.0);
        assert!((g - 0.2158605).abs() < 1e-6);
        assert_eq!(b, 1.0);
        assert_eq!(a, 1.0);
        assert_eq!(Srgba8::from_linear_f32([r, g, b, a]), c);
    }

    #[test]
    fn luminance() {
        assert_eq!(Gray8::from(Rgba8::opaque(255, 255, 255)), Gray8::opaque(255));
        assert_eq!(Gray8::from(Rgba8::opaque(0, 0, 0)), Gray8::opaque(0));
        assert_eq!(
            Gray::<u16>::from(Rgba::<u16>::opaque(65535, 0, 0)).v,
            ((65535_u32 * 19595) >> 16) as u16
        );
    }
}
