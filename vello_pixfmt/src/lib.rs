// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate implements the pixel formats a scanline renderer draws into: for every supported
//! framebuffer layout it defines how a source color is combined with the existing content under
//! a per-pixel coverage, and how colors are stored in and read from the underlying elements.
//!
//! # Usage
//!
//! Wrap caller-owned storage in a [`RowAccessor`][crate::buffer::RowAccessor] and hand it to
//! one of the format aliases in [`pixfmt`]:
//!
//! ```
//! use vello_pixfmt::buffer::RowAccessor;
//! use vello_pixfmt::color::Rgba8;
//! use vello_pixfmt::pixfmt::PixFmtRgba32;
//!
//! let mut data = vec![0_u8; 4 * 10 * 10];
//! let buf = RowAccessor::new(&mut data, 10, 10, 40).unwrap();
//! let mut fmt = PixFmtRgba32::new(buf).unwrap();
//!
//! fmt.clear(Rgba8::new(50, 100, 150, 200));
//! fmt.blend_solid_hspan(2, 5, Rgba8::opaque(255, 0, 0), &[255, 128, 0]);
//! assert_eq!(fmt.pixel(2, 5), Rgba8::opaque(255, 0, 0));
//! ```
//!
//! # Features
//!
//! - `peniko` (enabled by default): Conversions between this crate's sRGB 8-bit colors and
//!   `peniko::color::{Rgba8, PremulRgba8}`.
//!
//! # Contents
//!
//! - Fixed-point compositing arithmetic for 8-bit and 16-bit components ([`math`])
//! - Plain, premultiplied, straight and gamma-corrected blenders ([`blend`])
//! - RGBA, RGB, padded RGB, gray and packed 5-5-5 / 5-6-5 layouts ([`pixel`], [`packed`])
//! - Power-law gamma and sRGB lookup tables ([`gamma`], [`srgb`])
//! - A bounds-checked façade with pixel, line, span and rectangle operations ([`pixfmt`])
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![expect(
    clippy::cast_possible_truncation,
    reason = "Components are narrowed after fixed-point arithmetic that keeps them in range"
)]

pub mod blend;
pub mod buffer;
pub mod color;
pub mod error;
pub mod gamma;
pub mod math;
pub mod order;
pub mod packed;
pub mod pixel;
pub mod pixfmt;
pub mod srgb;

pub use error::Error;
