// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed 16-bit pixels with 5-5-5 and 5-6-5 layouts.
//!
//! Unpacking widens each channel to 8 bits by replicating its high bits into the low bits, so
//! that the maximum of a reduced channel maps to 255. Packing keeps the high bits of each
//! channel. Consequently `pack(unpack(x)) == x` for every pixel, while 8-bit values that are
//! not representable at the reduced depth are quantized.

use crate::blend::{BlendOp, StorageMode};
use crate::color::{ColorSpace, Rgba};
use crate::pixel::Blender;
use core::fmt::Debug;
use core::marker::PhantomData;

/// A codec between packed 16-bit pixels and 8-bit channels.
pub trait PackedCodec: Copy + Debug + Default + Send + Sync + 'static {
    /// Pack three 8-bit channels into a pixel.
    fn pack(r: u8, g: u8, b: u8) -> u16;

    /// Unpack a pixel into three 8-bit channels.
    fn unpack(p: u16) -> (u8, u8, u8);
}

#[inline(always)]
fn expand5(v: u16) -> u8 {
    let v = (v & 0x1f) as u8;
    (v << 3) | (v >> 2)
}

#[inline(always)]
fn expand6(v: u16) -> u8 {
    let v = (v & 0x3f) as u8;
    (v << 2) | (v >> 4)
}

/// 5-5-5 with red in bits 10..15, green in bits 5..10 and blue in bits 0..5.
///
/// Bit 15 is left clear and ignored when unpacking. Anti-Grain Geometry sets it on every
/// packed 5-5-5 pixel, so its buffers differ bitwise from these despite matching colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb555;

impl Rgb555 {
    const R_MASK: u16 = 0b0111_1100_0000_0000;
    const G_MASK: u16 = 0b0000_0011_1110_0000;
    const B_MASK: u16 = 0b0000_0000_0001_1111;
}

impl PackedCodec for Rgb555 {
    #[inline(always)]
    fn pack(r: u8, g: u8, b: u8) -> u16 {
        ((u16::from(r) & 0b1111_1000) << 7)
            | ((u16::from(g) & 0b1111_1000) << 2)
            | (u16::from(b) >> 3)
    }

    #[inline(always)]
    fn unpack(p: u16) -> (u8, u8, u8) {
        (
            expand5((p & Self::R_MASK) >> 10),
            expand5((p & Self::G_MASK) >> 5),
            expand5(p & Self::B_MASK),
        )
    }
}

/// 5-6-5 with red in bits 11..16, green in bits 5..11 and blue in bits 0..5.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb565;

impl Rgb565 {
    const R_MASK: u16 = 0b1111_1000_0000_0000;
    const G_MASK: u16 = 0b0000_0111_1110_0000;
    const B_MASK: u16 = 0b0000_0000_0001_1111;
}

impl PackedCodec for Rgb565 {
    #[inline(always)]
    fn pack(r: u8, g: u8, b: u8) -> u16 {
        ((u16::from(r) & 0b1111_1000) << 8)
            | ((u16::from(g) & 0b1111_1100) << 3)
            | (u16::from(b) >> 3)
    }

    #[inline(always)]
    fn unpack(p: u16) -> (u8, u8, u8) {
        (
            expand5((p & Self::R_MASK) >> 11),
            expand6((p & Self::G_MASK) >> 5),
            expand5(p & Self::B_MASK),
        )
    }
}

/// 5-5-5 with blue in bits 10..15, green in bits 5..10 and red in bits 0..5.
///
/// Bit 15 is left clear and ignored when unpacking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr555;

impl PackedCodec for Bgr555 {
    #[inline(always)]
    fn pack(r: u8, g: u8, b: u8) -> u16 {
        Rgb555::pack(b, g, r)
    }

    #[inline(always)]
    fn unpack(p: u16) -> (u8, u8, u8) {
        let (b, g, r) = Rgb555::unpack(p);
        (r, g, b)
    }
}

/// 5-6-5 with blue in bits 11..16, green in bits 5..11 and red in bits 0..5.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr565;

impl PackedCodec for Bgr565 {
    #[inline(always)]
    fn pack(r: u8, g: u8, b: u8) -> u16 {
        Rgb565::pack(b, g, r)
    }

    #[inline(always)]
    fn unpack(p: u16) -> (u8, u8, u8) {
        let (b, g, r) = Rgb565::unpack(p);
        (r, g, b)
    }
}

/// Packed 16-bit pixels without alpha, blended at 8 bits per channel.
#[derive(Clone, Debug, Default)]
pub struct PackedBlender<P, S, M> {
    op: M,
    _marker: PhantomData<fn() -> (P, S)>,
}

impl<P, S, M> PackedBlender<P, S, M> {
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

impl<P, S, M> Blender for PackedBlender<P, S, M>
where
    P: PackedCodec,
    S: ColorSpace,
    M: BlendOp<u8>,
{
    type Color = Rgba<u8, S>;
    type Elem = u16;

    const PIX_WIDTH: usize = 1;
    const STORAGE: StorageMode = M::STORAGE;

    #[inline(always)]
    fn blend_pix(&self, p: &mut [u16], c: Rgba<u8, S>, cover: u8) {
        if c.a == 0 || cover == 0 {
            return;
        }

        let (r, g, b) = P::unpack(p[0]);
        let mut px = [r, g, b];
        self.op.blend_rgb(&mut px, [c.r, c.g, c.b], c.a, cover);
        p[0] = P::pack(px[0], px[1], px[2]);
    }

    #[inline(always)]
    fn copy_pix(&self, p: &mut [u16], c: Rgba<u8, S>) {
        p[0] = P::pack(c.r, c.g, c.b);
    }

    #[inline(always)]
    fn make_color(&self, p: &[u16]) -> Rgba<u8, S> {
        let (r, g, b) = P::unpack(p[0]);
        Rgba::opaque(r, g, b)
    }
}
