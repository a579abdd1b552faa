// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel layouts.
//!
//! A [`Blender`] knows how a single pixel is laid out in storage: how many elements it spans,
//! where each channel lives and how to read, write and blend a color into it. The blending
//! itself is delegated to a [`BlendOp`], so each layout is written once for every blender
//! variant.

use crate::blend::{BlendOp, StorageMode};
use crate::color::{ColorSpace, Gray, PixelColor, Rgba};
use crate::math::Component;
use crate::order::{AlphaOrder, ChannelOrder};
use bytemuck::Pod;
use core::fmt;
use core::marker::PhantomData;

/// The coverage type of a blender, which is the component type of its color.
pub type Cover<B> = <<B as Blender>::Color as PixelColor>::Component;

/// Reads, writes and blends single pixels of one storage layout.
///
/// Every method receives exactly [`Blender::PIX_WIDTH`] elements of storage.
pub trait Blender {
    /// The color type the pixels are read and written as.
    type Color: PixelColor;
    /// The storage element type.
    type Elem: Pod + Default;

    /// The number of storage elements per pixel.
    const PIX_WIDTH: usize;
    /// How the colors handed to [`Blender::blend_pix`] and [`Blender::copy_pix`] store alpha.
    const STORAGE: StorageMode;

    /// Blend `c` into the pixel with the given coverage.
    ///
    /// A coverage of zero or a transparent color never writes to the pixel.
    fn blend_pix(&self, p: &mut [Self::Elem], c: Self::Color, cover: Cover<Self>);

    /// Overwrite the pixel with `c`.
    fn copy_pix(&self, p: &mut [Self::Elem], c: Self::Color);

    /// Read the pixel.
    fn make_color(&self, p: &[Self::Elem]) -> Self::Color;
}

macro_rules! layout_common {
    ($name:ident < $($param:ident),* >) => {
        impl<$($param),*, M> $name<$($param),*, M> {
            /// Create a new blender using `op` to composite.
            pub fn new(op: M) -> Self {
                Self {
                    op,
                    _marker: PhantomData,
                }
            }

            /// The compositing operator.
            pub fn op(&self) -> &M {
                &self.op
            }

            /// The compositing operator, mutably.
            pub fn op_mut(&mut self) -> &mut M {
                &mut self.op
            }
        }

        impl<$($param),*, M: Default> Default for $name<$($param),*, M> {
            fn default() -> Self {
                Self::new(M::default())
            }
        }

        impl<$($param),*, M: Clone> Clone for $name<$($param),*, M> {
            fn clone(&self) -> Self {
                Self::new(self.op.clone())
            }
        }

        impl<$($param),*, M: fmt::Debug> fmt::Debug for $name<$($param),*, M> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).field("op", &self.op).finish()
            }
        }
    };
}

/// Four-channel pixels with alpha, in the channel order `O`.
pub struct RgbaBlender<C, O, S, M> {
    op: M,
    _marker: PhantomData<fn() -> (C, O, S)>,
}

layout_common!(RgbaBlender<C, O, S>);

impl<C, O, S, M> Blender for RgbaBlender<C, O, S, M>
where
    C: Component,
    O: AlphaOrder,
    S: ColorSpace,
    M: BlendOp<C>,
{
    type Color = Rgba<C, S>;
    type Elem = C;

    const PIX_WIDTH: usize = 4;
    const STORAGE: StorageMode = M::STORAGE;

    #[inline(always)]
    fn blend_pix(&self, p: &mut [C], c: Rgba<C, S>, cover: C) {
        if c.a == C::ZERO || cover == C::ZERO {
            return;
        }

        let mut px = [p[O::R], p[O::G], p[O::B], p[O::A]];
        self.op.blend_rgba(&mut px, c.to_array(), cover);
        p[O::R] = px[0];
        p[O::G] = px[1];
        p[O::B] = px[2];
        p[O::A] = px[3];
    }

    #[inline(always)]
    fn copy_pix(&self, p: &mut [C], c: Rgba<C, S>) {
        p[O::R] = c.r;
        p[O::G] = c.g;
        p[O::B] = c.b;
        p[O::A] = c.a;
    }

    #[inline(always)]
    fn make_color(&self, p: &[C]) -> Rgba<C, S> {
        Rgba::new(p[O::R], p[O::G], p[O::B], p[O::A])
    }
}

/// Pixels without alpha, in the channel order `O`.
///
/// Four-channel orders describe padded layouts such as RGBX. The padding channel is never
/// written, and pixels always read back as opaque.
pub struct RgbBlender<C, O, S, M> {
    op: M,
    _marker: PhantomData<fn() -> (C, O, S)>,
}

layout_common!(RgbBlender<C, O, S>);

impl<C, O, S, M> Blender for RgbBlender<C, O, S, M>
where
    C: Component,
    O: ChannelOrder,
    S: ColorSpace,
    M: BlendOp<C>,
{
    type Color = Rgba<C, S>;
    type Elem = C;

    const PIX_WIDTH: usize = O::CHANNELS;
    const STORAGE: StorageMode = M::STORAGE;

    #[inline(always)]
    fn blend_pix(&self, p: &mut [C], c: Rgba<C, S>, cover: C) {
        if c.a == C::ZERO || cover == C::ZERO {
            return;
        }

        let mut px = [p[O::R], p[O::G], p[O::B]];
        self.op.blend_rgb(&mut px, [c.r, c.g, c.b], c.a, cover);
        p[O::R] = px[0];
        p[O::G] = px[1];
        p[O::B] = px[2];
    }

    #[inline(always)]
    fn copy_pix(&self, p: &mut [C], c: Rgba<C, S>) {
        p[O::R] = c.r;
        p[O::G] = c.g;
        p[O::B] = c.b;
    }

    #[inline(always)]
    fn make_color(&self, p: &[C]) -> Rgba<C, S> {
        Rgba::opaque(p[O::R], p[O::G], p[O::B])
    }
}

/// Single-channel gray pixels without alpha.
pub struct GrayBlender<C, S, M> {
    op: M,
    _marker: PhantomData<fn() -> (C, S)>,
}

layout_common!(GrayBlender<C, S>);

impl<C, S, M> Blender for GrayBlender<C, S, M>
where
    C: Component,
    S: ColorSpace,
    M: BlendOp<C>,
{
    type Color = Gray<C, S>;
    type Elem = C;

    const PIX_WIDTH: usize = 1;
    const STORAGE: StorageMode = M::STORAGE;

    #[inline(always)]
    fn blend_pix(&self, p: &mut [C], c: Gray<C, S>, cover: C) {
        if c.a == C::ZERO || cover == C::ZERO {
            return;
        }

        self.op.blend_gray(&mut p[0], c.v, c.a, cover);
    }

    #[inline(always)]
    fn copy_pix(&self, p: &mut [C], c: Gray<C, S>) {
        p[0] = c.v;
    }

    #[inline(always)]
    fn make_color(&self, p: &[C]) -> Gray<C, S> {
        Gray::opaque(p[0])
    }
}
