// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions shared across different tests.

use bytemuck::Pod;
use vello_pixfmt::buffer::RowAccessor;
use vello_pixfmt::color::Rgba8;

pub(crate) const WIDTH: u32 = 10;
pub(crate) const HEIGHT: u32 = 10;

pub(crate) const BACKGROUND: Rgba8 = Rgba8::new(50, 100, 150, 200);
pub(crate) const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
pub(crate) const GREEN: Rgba8 = Rgba8::new(0, 255, 0, 255);
pub(crate) const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);

/// Zeroed storage for a `WIDTH` x `HEIGHT` buffer with `pix_width` elements per pixel.
pub(crate) fn storage<T: Pod>(pix_width: usize) -> Vec<T> {
    vec![T::zeroed(); WIDTH as usize * HEIGHT as usize * pix_width]
}

/// A `WIDTH` x `HEIGHT` buffer over `data`, without padding between rows.
pub(crate) fn accessor<T: Pod>(data: &mut [T], pix_width: usize) -> RowAccessor<'_, T> {
    RowAccessor::new(data, WIDTH, HEIGHT, WIDTH as usize * pix_width).unwrap()
}

/// The elements of the pixel at `(x, y)` in storage created by [`storage`].
pub(crate) fn pix<T: Pod>(data: &[T], pix_width: usize, x: u32, y: u32) -> &[T] {
    let start = (y * WIDTH + x) as usize * pix_width;
    &data[start..start + pix_width]
}
