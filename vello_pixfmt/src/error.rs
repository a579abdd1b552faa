// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! Only constructors return errors. Drawing operations clip or skip out-of-range input instead
//! of failing.

use thiserror::Error;

/// An error raised while configuring a pixel format, buffer or lookup table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A gamma exponent that is zero, negative, infinite or NaN.
    #[error("gamma must be a finite, positive number, got {0}")]
    InvalidGamma(f64),
    /// A lookup table resolution that the table's element type cannot represent.
    #[error("table shift {shift} is outside of 1..={bits}")]
    InvalidShift {
        /// The requested shift.
        shift: u32,
        /// The number of bits of the element type.
        bits: u32,
    },
    /// Backing storage that cannot hold `height` rows of `stride` elements.
    #[error("storage of {len} elements cannot hold {height} rows with a stride of {stride}")]
    BufferTooSmall {
        /// The number of elements in the storage.
        len: usize,
        /// The number of rows.
        height: u32,
        /// The row stride in elements.
        stride: usize,
    },
    /// A row stride that is too short for a row of pixels.
    #[error("stride of {stride} elements cannot hold {width} pixels of {pix_width} elements each")]
    StrideTooSmall {
        /// The row stride in elements.
        stride: usize,
        /// The width of the buffer in pixels.
        width: u32,
        /// The number of elements per pixel.
        pix_width: usize,
    },
    /// Byte storage that cannot be viewed as the requested element type.
    #[error("byte storage is misaligned or not a multiple of the element size")]
    Misaligned,
}
