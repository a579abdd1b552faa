// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the individual pixel layouts behind the format aliases.

use crate::util::{RED, accessor, pix, storage};
use std::sync::Arc;
use vello_pixfmt::blend::{BlendGamma, StorageMode};
use vello_pixfmt::buffer::RowAccessor;
use vello_pixfmt::color::{Gray8, Gray16, Rgba8, Rgba16, Srgba8};
use vello_pixfmt::gamma::GammaLut;
use vello_pixfmt::packed::PackedBlender;
use vello_pixfmt::pixel::{Blender, RgbBlender};
use vello_pixfmt::pixfmt::{
    PixFmt, PixFmtAbgr32, PixFmtArgb32, PixFmtBgr24, PixFmtBgr565, PixFmtBgra32,
    PixFmtBgra32Plain, PixFmtGray8, PixFmtGray16, PixFmtRgb24, PixFmtRgb24Gamma, PixFmtRgb48,
    PixFmtRgb555, PixFmtRgb565, PixFmtRgb565Gamma, PixFmtRgba32Pre, PixFmtRgba64, PixFmtRgbx32,
    PixFmtSrgba32, PixFmtXrgb32,
};
use vello_pixfmt::srgb::SrgbLut;

fn storage_mode<B: Blender, R>(_: &PixFmt<B, R>) -> StorageMode {
    B::STORAGE
}

#[test]
fn four_channel_orders() {
    let c = Rgba8::new(1, 2, 3, 4);

    let mut data = storage::<u8>(4);
    PixFmtBgra32::new(accessor(&mut data, 4)).unwrap().copy_pixel(0, 0, c);
    assert_eq!(pix(&data, 4, 0, 0), [3, 2, 1, 4]);

    PixFmtArgb32::new(accessor(&mut data, 4)).unwrap().copy_pixel(0, 0, c);
    assert_eq!(pix(&data, 4, 0, 0), [4, 1, 2, 3]);

    PixFmtAbgr32::new(accessor(&mut data, 4)).unwrap().copy_pixel(0, 0, c);
    assert_eq!(pix(&data, 4, 0, 0), [4, 3, 2, 1]);
}

#[test]
fn three_channel_formats_read_opaque() {
    let mut data = storage::<u8>(3);
    let mut fmt = PixFmtBgr24::new(accessor(&mut data, 3)).unwrap();
    fmt.copy_pixel(1, 0, Rgba8::new(10, 20, 30, 0));
    assert_eq!(fmt.pixel(1, 0), Rgba8::opaque(10, 20, 30));
    drop(fmt);
    assert_eq!(pix(&data, 3, 1, 0), [30, 20, 10]);

    let mut fmt = PixFmtRgb24::new(accessor(&mut data, 3)).unwrap();
    fmt.blend_pixel(1, 0, Rgba8::new(255, 255, 255, 128), 255);
    assert_eq!(fmt.pixel(1, 0), Rgba8::opaque(143, 138, 133));
}

#[test]
fn padded_formats_keep_padding() {
    let mut data = vec![0x55_u8; 4 * 10 * 10];

    PixFmtRgbx32::new(accessor(&mut data, 4))
        .unwrap()
        .clear(Rgba8::new(1, 2, 3, 4));
    assert_eq!(pix(&data, 4, 9, 9), [1, 2, 3, 0x55]);

    let mut fmt = PixFmtXrgb32::new(accessor(&mut data, 4)).unwrap();
    fmt.copy_pixel(0, 0, Rgba8::opaque(7, 8, 9));
    assert_eq!(fmt.pixel(0, 0), Rgba8::opaque(7, 8, 9));
    drop(fmt);
    assert_eq!(pix(&data, 4, 0, 0), [1, 7, 8, 9]);
}

#[test]
fn premultiplied_format() {
    let mut data = storage::<u8>(4);
    let mut fmt = PixFmtRgba32Pre::new(accessor(&mut data, 4)).unwrap();
    assert_eq!(storage_mode(&fmt), StorageMode::Premultiplied);

    let mut rgb = [0_u8; 3];
    let rgb = PixFmtRgb24::new(RowAccessor::new(&mut rgb, 1, 1, 3).unwrap()).unwrap();
    assert_eq!(storage_mode(&rgb), StorageMode::Plain);

    fmt.clear(Rgba8::new(0, 0, 255, 255));
    // Half-transparent red, premultiplied.
    fmt.blend_pixel(0, 0, Rgba8::new(128, 0, 0, 128), 255);
    assert_eq!(fmt.pixel(0, 0), Rgba8::new(128, 0, 127, 255));
}

#[test]
fn straight_alpha_format_keeps_color() {
    let mut data = storage::<u8>(4);
    let mut fmt = PixFmtBgra32Plain::new(accessor(&mut data, 4)).unwrap();
    fmt.blend_pixel(0, 0, Rgba8::new(200, 100, 50, 128), 255);

    let c = fmt.pixel(0, 0);
    assert_eq!(c.a, 128);
    assert!(c.r.abs_diff(200) <= 1 && c.g.abs_diff(100) <= 1 && c.b.abs_diff(50) <= 1);
}

#[test]
fn sixteen_bit_formats() {
    let mut data = storage::<u16>(4);
    let mut fmt = PixFmtRgba64::new(accessor(&mut data, 4)).unwrap();
    fmt.clear(Rgba16::opaque(0, 0, 0));
    fmt.blend_hline(0, 0, 2, Rgba16::opaque(u16::MAX, 0, 0), 0x8000);
    assert_eq!(fmt.pixel(0, 0), Rgba16::opaque(0x8000, 0, 0));
    fmt.blend_hline(0, 1, 2, Rgba16::opaque(1234, 5678, 9012), u16::MAX);
    assert_eq!(fmt.pixel(1, 1), Rgba16::opaque(1234, 5678, 9012));

    let mut data = storage::<u16>(3);
    let mut fmt = PixFmtRgb48::new(accessor(&mut data, 3)).unwrap();
    fmt.copy_hline(0, 0, 10, Rgba16::new(1, 2, 3, 4));
    assert_eq!(fmt.pixel(9, 0), Rgba16::opaque(1, 2, 3));
}

#[test]
fn sixteen_bit_formats_over_bytes() {
    let mut words = storage::<u16>(4);
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut words);
    let buf = RowAccessor::<u16>::from_bytes(bytes, 10, 10, 40).unwrap();
    let mut fmt = PixFmtRgba64::new(buf).unwrap();
    fmt.copy_pixel(9, 9, Rgba16::new(1, 2, 3, 4));
    drop(fmt);
    assert_eq!(words[396..], [1, 2, 3, 4]);
}

#[test]
fn gray_formats() {
    let mut data = storage::<u8>(1);
    let mut fmt = PixFmtGray8::new(accessor(&mut data, 1)).unwrap();
    fmt.clear(Gray8::opaque(0));
    fmt.blend_solid_hspan(0, 0, Gray8::opaque(255), &[255, 128, 0]);
    assert_eq!(fmt.pixel(0, 0), Gray8::opaque(255));
    assert_eq!(fmt.pixel(1, 0), Gray8::opaque(128));
    assert_eq!(fmt.pixel(2, 0), Gray8::opaque(0));
    assert_eq!(fmt.pixel(0, -1), Gray8::new(0, 0));

    let mut data = storage::<u16>(1);
    let mut fmt = PixFmtGray16::new(accessor(&mut data, 1)).unwrap();
    fmt.copy_vline(0, 0, 10, Gray16::from(Rgba16::opaque(u16::MAX, u16::MAX, u16::MAX)));
    assert_eq!(fmt.pixel(0, 9), Gray16::opaque(u16::MAX));
}

#[test]
fn packed_formats() {
    let mut data = storage::<u16>(1);
    let mut fmt = PixFmtRgb565::new(accessor(&mut data, 1)).unwrap();
    fmt.clear(Rgba8::opaque(255, 0, 0));
    assert_eq!(fmt.pixel(3, 3), Rgba8::opaque(255, 0, 0));
    fmt.blend_pixel(0, 0, Rgba8::opaque(0, 0, 255), 0);
    assert_eq!(fmt.pixel(0, 0), Rgba8::opaque(255, 0, 0));
    drop(fmt);
    assert!(data.iter().all(|p| *p == 0xf800));

    let mut fmt = PixFmtBgr565::new(accessor(&mut data, 1)).unwrap();
    fmt.copy_pixel(0, 0, RED);
    drop(fmt);
    assert_eq!(data[0], 0x001f);

    let mut fmt = PixFmtRgb555::new(accessor(&mut data, 1)).unwrap();
    fmt.copy_pixel(0, 0, Rgba8::opaque(255, 255, 255));
    drop(fmt);
    assert_eq!(data[0], 0x7fff);
}

#[test]
fn gamma_formats_blend_linear_intensities() {
    let lut = SrgbLut::<u16>::shared();

    let mut data = storage::<u8>(3);
    let blender = RgbBlender::new(BlendGamma::new(lut));
    let mut fmt: PixFmtRgb24Gamma<_, _> =
        PixFmt::with_blender(accessor(&mut data, 3), blender).unwrap();
    fmt.clear(Rgba8::opaque(0, 0, 0));
    fmt.blend_pixel(0, 0, Rgba8::new(255, 255, 255, 128), 255);
    assert_eq!(fmt.pixel(0, 0), Rgba8::opaque(188, 188, 188));

    // Without a correction the format blends like the plain one.
    fmt.blender_mut().op_mut().set_gamma(None);
    fmt.blend_pixel(1, 0, Rgba8::new(255, 255, 255, 128), 255);
    assert_eq!(fmt.pixel(1, 0), Rgba8::opaque(128, 128, 128));
}

#[test]
fn gamma_tables_are_shared_between_formats() {
    let lut = Arc::new(GammaLut::<u8, u8>::with_gamma(2.0).unwrap());

    let mut a = storage::<u16>(1);
    let mut b = storage::<u16>(1);
    let mut fmt_a: PixFmtRgb565Gamma<_, _> = PixFmt::with_blender(
        accessor(&mut a, 1),
        PackedBlender::new(BlendGamma::new(Arc::clone(&lut))),
    )
    .unwrap();
    let mut fmt_b: PixFmtRgb565Gamma<_, _> = PixFmt::with_blender(
        accessor(&mut b, 1),
        PackedBlender::new(BlendGamma::new(Arc::clone(&lut))),
    )
    .unwrap();

    fmt_a.blend_pixel(0, 0, Rgba8::new(255, 255, 255, 128), 255);
    fmt_b.blend_pixel(0, 0, Rgba8::new(255, 255, 255, 128), 255);
    assert_eq!(fmt_a.pixel(0, 0), fmt_b.pixel(0, 0));
    assert_eq!(Arc::strong_count(&lut), 3);

    // Blending at gamma 2.0 lands above the plain midpoint.
    assert!(fmt_a.pixel(0, 0).r > 140);
}

#[test]
fn srgb_format_converts_from_linear() {
    let mut data = storage::<u8>(4);
    let mut fmt = PixFmtSrgba32::new(accessor(&mut data, 4)).unwrap();
    fmt.copy_pixel(0, 0, Rgba8::new(55, 55, 55, 255).to_srgb());
    assert_eq!(fmt.pixel(0, 0), Srgba8::new(128, 128, 128, 255));
    assert_eq!(fmt.pixel(0, 0).to_linear(), Rgba8::new(55, 55, 55, 255));
}
