// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-addressable pixel storage.

use crate::error::Error;
use bytemuck::Pod;

/// Storage that pixel formats read from and write to, addressed by row.
///
/// Rows are `stride` elements apart. A pixel format only ever requests rows in `0..height`,
/// and only touches the leading `width * PIX_WIDTH` elements of each row.
pub trait PixelBuffer {
    /// The storage element type.
    type Elem: Pod;

    /// The width in pixels.
    fn width(&self) -> u32;

    /// The height in pixels.
    fn height(&self) -> u32;

    /// The distance between the starts of two consecutive rows, in elements.
    fn stride(&self) -> usize;

    /// The elements of row `y`.
    ///
    /// The returned slice holds at least [`PixelBuffer::stride`] elements.
    fn row(&self, y: u32) -> &[Self::Elem];

    /// The elements of row `y`, mutably.
    ///
    /// The returned slice holds at least [`PixelBuffer::stride`] elements.
    fn row_mut(&mut self, y: u32) -> &mut [Self::Elem];
}

impl<B: PixelBuffer + ?Sized> PixelBuffer for &mut B {
    type Elem = B::Elem;

    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn stride(&self) -> usize {
        (**self).stride()
    }

    fn row(&self, y: u32) -> &[Self::Elem] {
        (**self).row(y)
    }

    fn row_mut(&mut self, y: u32) -> &mut [Self::Elem] {
        (**self).row_mut(y)
    }
}

/// A [`PixelBuffer`] over borrowed, caller-owned storage.
#[derive(Debug)]
pub struct RowAccessor<'a, T> {
    data: &'a mut [T],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a, T: Pod> RowAccessor<'a, T> {
    /// Wrap `data` as `height` rows of `stride` elements each.
    ///
    /// Fails if `data` is shorter than `stride * height`.
    pub fn new(data: &'a mut [T], width: u32, height: u32, stride: usize) -> Result<Self, Error> {
        let required = stride.checked_mul(height as usize);
        if required.is_none_or(|required| required > data.len()) {
            return Err(Error::BufferTooSmall {
                len: data.len(),
                height,
                stride,
            });
        }

        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Wrap byte storage as elements of type `T`.
    ///
    /// `stride` is given in elements of `T`. Fails with [`Error::Misaligned`] if the bytes are
    /// not aligned for `T` or their length is not a multiple of its size.
    pub fn from_bytes(
        bytes: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, Error> {
        let data = bytemuck::try_cast_slice_mut(bytes).map_err(|_| Error::Misaligned)?;
        Self::new(data, width, height, stride)
    }

    /// The underlying storage.
    pub fn data(&self) -> &[T] {
        self.data
    }

    /// The underlying storage, as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data)
    }

    /// Release the borrowed storage.
    pub fn into_inner(self) -> &'a mut [T] {
        self.data
    }
}

impl<T: Pod> PixelBuffer for RowAccessor<'_, T> {
    type Elem = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.stride]
    }

    #[inline]
    fn row_mut(&mut self, y: u32) -> &mut [T] {
        let start = y as usize * self.stride;
        &mut self.data[start..start + self.stride]
    }
}
