// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pixel-format façade.
//!
//! A [`PixFmt`] combines a [`Blender`] with a [`PixelBuffer`] and exposes the pixel, line,
//! span and rectangle operations a scanline renderer draws with. All operations clip against
//! the buffer:
//!
//! - Single-pixel operations outside of the buffer do nothing, and [`PixFmt::pixel`] returns a
//!   transparent color.
//! - Runs starting left of (or above) the buffer are clamped to its edge, and runs reaching
//!   past the far edge are truncated. The entries of a color or coverage list that belong to
//!   clipped pixels are skipped, so every visible pixel keeps its own entry.
//! - Runs whose visible length is zero do nothing.

use crate::blend::{BlendGamma, BlendPlain, BlendPremul, BlendStraight};
use crate::buffer::PixelBuffer;
use crate::color::{Linear, PixelColor, Srgb};
use crate::error::Error;
use crate::gamma::GammaCorrection;
use crate::math::Component;
use crate::order::{OrderAbgr, OrderArgb, OrderBgr, OrderBgra, OrderRgb, OrderRgba};
use crate::packed::{Bgr555, Bgr565, PackedBlender, Rgb555, Rgb565};
use crate::pixel::{Blender, Cover, GrayBlender, RgbBlender, RgbaBlender};

/// How span operations treat a color list that is shorter than the span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpanPolicy {
    /// Repeat the color list, i.e. pixel `i` of the span gets `colors[i % colors.len()]`.
    #[default]
    Cycle,
    /// End the span with the last color of the list.
    Truncate,
}

/// A pixel format over a buffer.
#[derive(Clone, Debug)]
pub struct PixFmt<B, R> {
    blender: B,
    buf: R,
    span_policy: SpanPolicy,
}

/// Clip the run `start..start + len` against `0..limit`.
///
/// Returns the first visible position, the number of leading entries that were clipped and
/// the number of visible entries.
#[inline]
fn clip_run(start: i32, len: usize, limit: u32) -> Option<(u32, usize, usize)> {
    clip_pair(start, start, len, limit, limit).map(|(pos, _, skip, n)| (pos, skip, n))
}

/// Clip a run against two buffers at once.
///
/// Returns the first visible position in each buffer, the number of clipped leading entries
/// and the number of visible entries.
#[inline]
fn clip_pair(
    a: i32,
    b: i32,
    len: usize,
    a_limit: u32,
    b_limit: u32,
) -> Option<(u32, u32, usize, usize)> {
    let (a, b) = (i64::from(a), i64::from(b));
    let len = i64::try_from(len).unwrap_or(i64::MAX);

    let skip = 0_i64.max(-a).max(-b);
    let end = len
        .min(i64::from(a_limit) - a)
        .min(i64::from(b_limit) - b);
    if end <= skip {
        return None;
    }

    Some((
        u32::try_from(a + skip).ok()?,
        u32::try_from(b + skip).ok()?,
        usize::try_from(skip).ok()?,
        usize::try_from(end - skip).ok()?,
    ))
}

#[inline]
fn in_range(v: i32, limit: u32) -> Option<u32> {
    u32::try_from(v).ok().filter(|v| *v < limit)
}

#[inline(always)]
fn copy_or_blend<B: Blender>(blender: &B, p: &mut [B::Elem], c: B::Color, cover: Cover<B>) {
    if c.is_transparent() || cover == <Cover<B> as Component>::ZERO {
        return;
    }

    if c.is_opaque() && cover == <Cover<B> as Component>::FULL {
        blender.copy_pix(p, c);
    } else {
        blender.blend_pix(p, c, cover);
    }
}

impl<B, R> PixFmt<B, R>
where
    B: Blender,
    R: PixelBuffer<Elem = B::Elem>,
{
    /// Create a pixel format over `buf` with a default-configured blender.
    pub fn new(buf: R) -> Result<Self, Error>
    where
        B: Default,
    {
        Self::with_blender(buf, B::default())
    }

    /// Create a pixel format over `buf` with the given blender.
    ///
    /// Fails if the buffer's stride cannot hold a row of pixels.
    pub fn with_blender(buf: R, blender: B) -> Result<Self, Error> {
        check_buffer::<B, R>(&buf)?;
        Ok(Self {
            blender,
            buf,
            span_policy: SpanPolicy::default(),
        })
    }

    /// Replace the buffer, keeping the blender configuration, and return the previous one.
    pub fn attach(&mut self, buf: R) -> Result<R, Error> {
        check_buffer::<B, R>(&buf)?;
        Ok(core::mem::replace(&mut self.buf, buf))
    }

    /// The blender.
    pub fn blender(&self) -> &B {
        &self.blender
    }

    /// The blender, mutably.
    pub fn blender_mut(&mut self) -> &mut B {
        &mut self.blender
    }

    /// The buffer.
    pub fn buffer(&self) -> &R {
        &self.buf
    }

    /// The buffer, mutably.
    pub fn buffer_mut(&mut self) -> &mut R {
        &mut self.buf
    }

    /// Release the buffer.
    pub fn into_inner(self) -> R {
        self.buf
    }

    /// How span operations treat color lists shorter than the span.
    pub fn span_policy(&self) -> SpanPolicy {
        self.span_policy
    }

    /// Set how span operations treat color lists shorter than the span.
    pub fn set_span_policy(&mut self, policy: SpanPolicy) {
        self.span_policy = policy;
    }

    /// The width of the buffer in pixels.
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    /// The height of the buffer in pixels.
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// The number of storage elements per pixel.
    pub fn pix_width(&self) -> usize {
        B::PIX_WIDTH
    }

    #[inline]
    fn pix_mut(&mut self, x: i32, y: i32) -> Option<(&B, &mut [B::Elem])> {
        let x = in_range(x, self.buf.width())?;
        let y = in_range(y, self.buf.height())?;
        let start = x as usize * B::PIX_WIDTH;

        let row = self.buf.row_mut(y);
        Some((&self.blender, &mut row[start..start + B::PIX_WIDTH]))
    }

    /// Call `f` with the blender, the pixel and the run index of every visible pixel of a
    /// horizontal run.
    #[inline]
    fn for_hrun(
        &mut self,
        x: i32,
        y: i32,
        len: usize,
        mut f: impl FnMut(&B, &mut [B::Elem], usize),
    ) {
        let Some(y) = in_range(y, self.buf.height()) else {
            return;
        };
        let Some((x, skip, len)) = clip_run(x, len, self.buf.width()) else {
            return;
        };

        let start = x as usize * B::PIX_WIDTH;
        let row = &mut self.buf.row_mut(y)[start..start + len * B::PIX_WIDTH];
        for (i, p) in row.chunks_exact_mut(B::PIX_WIDTH).enumerate() {
            f(&self.blender, p, skip + i);
        }
    }

    /// Call `f` with the blender, the pixel and the run index of every visible pixel of a
    /// vertical run.
    #[inline]
    fn for_vrun(
        &mut self,
        x: i32,
        y: i32,
        len: usize,
        mut f: impl FnMut(&B, &mut [B::Elem], usize),
    ) {
        let Some(x) = in_range(x, self.buf.width()) else {
            return;
        };
        let Some((y, skip, len)) = clip_run(y, len, self.buf.height()) else {
            return;
        };

        let start = x as usize * B::PIX_WIDTH;
        for (i, y) in (y..).take(len).enumerate() {
            let p = &mut self.buf.row_mut(y)[start..start + B::PIX_WIDTH];
            f(&self.blender, p, skip + i);
        }
    }

    /// The length of a span over `colors`, according to the span policy.
    #[inline]
    fn color_span_len(&self, len: usize, colors: &[B::Color]) -> usize {
        match self.span_policy {
            _ if colors.is_empty() => 0,
            SpanPolicy::Cycle => len,
            SpanPolicy::Truncate => len.min(colors.len()),
        }
    }

    /// Read the pixel at `(x, y)`, or a transparent color outside of the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> B::Color {
        let (Some(x), Some(y)) = (
            in_range(x, self.buf.width()),
            in_range(y, self.buf.height()),
        ) else {
            return B::Color::transparent();
        };

        let start = x as usize * B::PIX_WIDTH;
        self.blender
            .make_color(&self.buf.row(y)[start..start + B::PIX_WIDTH])
    }

    /// Overwrite the pixel at `(x, y)`.
    pub fn copy_pixel(&mut self, x: i32, y: i32, c: B::Color) {
        if let Some((blender, p)) = self.pix_mut(x, y) {
            blender.copy_pix(p, c);
        }
    }

    /// Blend `c` into the pixel at `(x, y)`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, c: B::Color, cover: Cover<B>) {
        if let Some((blender, p)) = self.pix_mut(x, y) {
            copy_or_blend(blender, p, c, cover);
        }
    }

    /// Overwrite `len` pixels starting at `(x, y)` and going right.
    pub fn copy_hline(&mut self, x: i32, y: i32, len: usize, c: B::Color) {
        self.for_hrun(x, y, len, |blender, p, _| blender.copy_pix(p, c));
    }

    /// Overwrite `len` pixels starting at `(x, y)` and going down.
    pub fn copy_vline(&mut self, x: i32, y: i32, len: usize, c: B::Color) {
        self.for_vrun(x, y, len, |blender, p, _| blender.copy_pix(p, c));
    }

    /// Blend `c` into `len` pixels starting at `(x, y)` and going right.
    pub fn blend_hline(&mut self, x: i32, y: i32, len: usize, c: B::Color, cover: Cover<B>) {
        self.for_hrun(x, y, len, |blender, p, _| copy_or_blend(blender, p, c, cover));
    }

    /// Blend `c` into `len` pixels starting at `(x, y)` and going down.
    pub fn blend_vline(&mut self, x: i32, y: i32, len: usize, c: B::Color, cover: Cover<B>) {
        self.for_vrun(x, y, len, |blender, p, _| copy_or_blend(blender, p, c, cover));
    }

    /// Blend `c` into a horizontal span starting at `(x, y)`, one pixel per coverage value.
    pub fn blend_solid_hspan(&mut self, x: i32, y: i32, c: B::Color, covers: &[Cover<B>]) {
        if c.is_transparent() {
            return;
        }

        self.for_hrun(x, y, covers.len(), |blender, p, i| {
            copy_or_blend(blender, p, c, covers[i]);
        });
    }

    /// Blend `c` into a vertical span starting at `(x, y)`, one pixel per coverage value.
    pub fn blend_solid_vspan(&mut self, x: i32, y: i32, c: B::Color, covers: &[Cover<B>]) {
        if c.is_transparent() {
            return;
        }

        self.for_vrun(x, y, covers.len(), |blender, p, i| {
            copy_or_blend(blender, p, c, covers[i]);
        });
    }

    /// Overwrite a horizontal span of `len` pixels starting at `(x, y)` with `colors`.
    ///
    /// See [`SpanPolicy`] for spans that are longer than `colors`.
    pub fn copy_color_hspan(&mut self, x: i32, y: i32, len: usize, colors: &[B::Color]) {
        let len = self.color_span_len(len, colors);
        self.for_hrun(x, y, len, |blender, p, i| {
            blender.copy_pix(p, colors[i % colors.len()]);
        });
    }

    /// Overwrite a vertical span of `len` pixels starting at `(x, y)` with `colors`.
    ///
    /// See [`SpanPolicy`] for spans that are longer than `colors`.
    pub fn copy_color_vspan(&mut self, x: i32, y: i32, len: usize, colors: &[B::Color]) {
        let len = self.color_span_len(len, colors);
        self.for_vrun(x, y, len, |blender, p, i| {
            blender.copy_pix(p, colors[i % colors.len()]);
        });
    }

    /// Blend a horizontal span of `len` pixels starting at `(x, y)` with `colors`.
    ///
    /// With `covers`, pixel `i` is blended with `covers[i]` and the span ends with the
    /// coverage list. Otherwise all pixels are blended with `cover`. See [`SpanPolicy`] for
    /// spans that are longer than `colors`.
    pub fn blend_color_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: usize,
        colors: &[B::Color],
        covers: Option<&[Cover<B>]>,
        cover: Cover<B>,
    ) {
        let mut len = self.color_span_len(len, colors);
        if let Some(covers) = covers {
            len = len.min(covers.len());
        }

        self.for_hrun(x, y, len, |blender, p, i| {
            let cover = covers.map_or(cover, |covers| covers[i]);
            copy_or_blend(blender, p, colors[i % colors.len()], cover);
        });
    }

    /// Blend a vertical span of `len` pixels starting at `(x, y)` with `colors`.
    ///
    /// Coverage is applied as in [`PixFmt::blend_color_hspan`].
    pub fn blend_color_vspan(
        &mut self,
        x: i32,
        y: i32,
        len: usize,
        colors: &[B::Color],
        covers: Option<&[Cover<B>]>,
        cover: Cover<B>,
    ) {
        let mut len = self.color_span_len(len, colors);
        if let Some(covers) = covers {
            len = len.min(covers.len());
        }

        self.for_vrun(x, y, len, |blender, p, i| {
            let cover = covers.map_or(cover, |covers| covers[i]);
            copy_or_blend(blender, p, colors[i % colors.len()], cover);
        });
    }

    /// Call `f` with the row and the width of every visible row of the rectangle spanned by
    /// two corners, inclusive.
    fn for_bar(
        &mut self,
        (x1, y1): (i32, i32),
        (x2, y2): (i32, i32),
        mut f: impl FnMut(&mut Self, i32, usize),
    ) {
        let (x1, x2) = (x1.min(x2), x1.max(x2));
        let (y1, y2) = (y1.min(y2), y1.max(y2));

        let width = usize::try_from(i64::from(x2) - i64::from(x1) + 1).unwrap_or(usize::MAX);
        let last = y2.min(i32::try_from(self.buf.height()).unwrap_or(i32::MAX) - 1);
        for y in y1.max(0)..=last {
            f(self, y, width);
        }
    }

    /// Overwrite the rectangle spanned by `(x1, y1)` and `(x2, y2)`, inclusive.
    pub fn copy_bar(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, c: B::Color) {
        let x = x1.min(x2);
        self.for_bar((x1, y1), (x2, y2), |fmt, y, len| fmt.copy_hline(x, y, len, c));
    }

    /// Blend `c` into the rectangle spanned by `(x1, y1)` and `(x2, y2)`, inclusive.
    pub fn blend_bar(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, c: B::Color, cover: Cover<B>) {
        let x = x1.min(x2);
        self.for_bar((x1, y1), (x2, y2), |fmt, y, len| {
            fmt.blend_hline(x, y, len, c, cover);
        });
    }

    /// Overwrite every pixel with `c`, regardless of its alpha.
    #[doc(alias = "fill")]
    pub fn clear(&mut self, c: B::Color) {
        let width = self.buf.width() as usize * B::PIX_WIDTH;
        for y in 0..self.buf.height() {
            let row = &mut self.buf.row_mut(y)[..width];
            for p in row.chunks_exact_mut(B::PIX_WIDTH) {
                self.blender.copy_pix(p, c);
            }
        }
    }

    /// Copy `len` pixels from row `src_y` of `src`, starting at `src_x`, to `(x, y)`.
    ///
    /// The pixels are copied verbatim, so `src` must share this format's layout. Source rows
    /// are clipped to the pixels that fit into its stride.
    pub fn copy_from<S: PixelBuffer<Elem = B::Elem>>(
        &mut self,
        src: &S,
        (x, y): (i32, i32),
        (src_x, src_y): (i32, i32),
        len: usize,
    ) {
        let (Some(y), Some(src_y)) = (
            in_range(y, self.buf.height()),
            in_range(src_y, src.height()),
        ) else {
            return;
        };
        // `src` is not validated on attachment, so its rows may be shorter than its width.
        let src_width = src
            .width()
            .min(u32::try_from(src.stride() / B::PIX_WIDTH).unwrap_or(u32::MAX));
        let Some((x, src_x, _, len)) = clip_pair(x, src_x, len, self.buf.width(), src_width)
        else {
            return;
        };

        let n = len * B::PIX_WIDTH;
        let src_start = src_x as usize * B::PIX_WIDTH;
        let start = x as usize * B::PIX_WIDTH;
        self.buf.row_mut(y)[start..start + n]
            .copy_from_slice(&src.row(src_y)[src_start..src_start + n]);
    }

    /// Blend `len` pixels read from row `src_y` of `src`, starting at `src_x`, into `(x, y)`.
    ///
    /// Source pixels are converted to this format's color type and blended with `cover`.
    pub fn blend_from<B2, R2>(
        &mut self,
        src: &PixFmt<B2, R2>,
        (x, y): (i32, i32),
        (src_x, src_y): (i32, i32),
        len: usize,
        cover: Cover<B>,
    ) where
        B2: Blender,
        R2: PixelBuffer<Elem = B2::Elem>,
        B2::Color: Into<B::Color>,
    {
        let (Some(y), Some(src_y)) = (
            in_range(y, self.buf.height()),
            in_range(src_y, src.height()),
        ) else {
            return;
        };
        let Some((x, src_x, _, len)) = clip_pair(x, src_x, len, self.buf.width(), src.width())
        else {
            return;
        };

        let src_start = src_x as usize * B2::PIX_WIDTH;
        let src_row = &src.buf.row(src_y)[src_start..src_start + len * B2::PIX_WIDTH];
        let start = x as usize * B::PIX_WIDTH;
        let row = &mut self.buf.row_mut(y)[start..start + len * B::PIX_WIDTH];

        for (p, s) in row
            .chunks_exact_mut(B::PIX_WIDTH)
            .zip(src_row.chunks_exact(B2::PIX_WIDTH))
        {
            copy_or_blend(&self.blender, p, src.blender.make_color(s).into(), cover);
        }
    }

    /// Apply `f` to every pixel.
    pub fn for_each_pixel(&mut self, mut f: impl FnMut(B::Color) -> B::Color) {
        let width = self.buf.width() as usize * B::PIX_WIDTH;
        for y in 0..self.buf.height() {
            let row = &mut self.buf.row_mut(y)[..width];
            for p in row.chunks_exact_mut(B::PIX_WIDTH) {
                let c = f(self.blender.make_color(p));
                self.blender.copy_pix(p, c);
            }
        }
    }

    /// Multiply the color channels of every pixel by its alpha.
    pub fn premultiply(&mut self) {
        self.for_each_pixel(PixelColor::premultiply);
    }

    /// Divide the color channels of every pixel by its alpha.
    pub fn demultiply(&mut self) {
        self.for_each_pixel(PixelColor::demultiply);
    }

    /// Convert the color channels of every pixel with [`GammaCorrection::dir`].
    pub fn apply_gamma_dir<G>(&mut self, gamma: &G)
    where
        G: GammaCorrection<Lo = Cover<B>, Hi = Cover<B>>,
    {
        self.for_each_pixel(|c| c.map_channels(|v| gamma.dir(v)));
    }

    /// Convert the color channels of every pixel with [`GammaCorrection::inv`].
    pub fn apply_gamma_inv<G>(&mut self, gamma: &G)
    where
        G: GammaCorrection<Lo = Cover<B>, Hi = Cover<B>>,
    {
        self.for_each_pixel(|c| c.map_channels(|v| gamma.inv(v)));
    }
}

fn check_buffer<B: Blender, R: PixelBuffer>(buf: &R) -> Result<(), Error> {
    let row_len = (buf.width() as usize).checked_mul(B::PIX_WIDTH);
    if row_len.is_none_or(|row_len| row_len > buf.stride()) {
        return Err(Error::StrideTooSmall {
            stride: buf.stride(),
            width: buf.width(),
            pix_width: B::PIX_WIDTH,
        });
    }

    log::debug!(
        "attaching {}x{} buffer with a stride of {} elements",
        buf.width(),
        buf.height(),
        buf.stride()
    );

    Ok(())
}

macro_rules! formats {
    ($($(#[$attr:meta])* $name:ident = $blender:ty;)*) => {
        $(
            $(#[$attr])*
            pub type $name<R> = PixFmt<$blender, R>;
        )*
    };
}

formats! {
    /// 8-bit RGBA, straight alpha.
    PixFmtRgba32 = RgbaBlender<u8, OrderRgba, Linear, BlendPlain>;
    /// 8-bit BGRA, straight alpha.
    PixFmtBgra32 = RgbaBlender<u8, OrderBgra, Linear, BlendPlain>;
    /// 8-bit ARGB, straight alpha.
    PixFmtArgb32 = RgbaBlender<u8, OrderArgb, Linear, BlendPlain>;
    /// 8-bit ABGR, straight alpha.
    PixFmtAbgr32 = RgbaBlender<u8, OrderAbgr, Linear, BlendPlain>;

    /// 8-bit RGBA, premultiplied alpha.
    PixFmtRgba32Pre = RgbaBlender<u8, OrderRgba, Linear, BlendPremul>;
    /// 8-bit BGRA, premultiplied alpha.
    PixFmtBgra32Pre = RgbaBlender<u8, OrderBgra, Linear, BlendPremul>;
    /// 8-bit ARGB, premultiplied alpha.
    PixFmtArgb32Pre = RgbaBlender<u8, OrderArgb, Linear, BlendPremul>;
    /// 8-bit ABGR, premultiplied alpha.
    PixFmtAbgr32Pre = RgbaBlender<u8, OrderAbgr, Linear, BlendPremul>;

    /// 8-bit RGBA with straight alpha in both the colors and the buffer.
    PixFmtRgba32Plain = RgbaBlender<u8, OrderRgba, Linear, BlendStraight>;
    /// 8-bit BGRA with straight alpha in both the colors and the buffer.
    PixFmtBgra32Plain = RgbaBlender<u8, OrderBgra, Linear, BlendStraight>;
    /// 8-bit ARGB with straight alpha in both the colors and the buffer.
    PixFmtArgb32Plain = RgbaBlender<u8, OrderArgb, Linear, BlendStraight>;
    /// 8-bit ABGR with straight alpha in both the colors and the buffer.
    PixFmtAbgr32Plain = RgbaBlender<u8, OrderAbgr, Linear, BlendStraight>;

    /// 8-bit sRGB-encoded RGBA, straight alpha.
    PixFmtSrgba32 = RgbaBlender<u8, OrderRgba, Srgb, BlendPlain>;
    /// 8-bit sRGB-encoded BGRA, straight alpha.
    PixFmtSbgra32 = RgbaBlender<u8, OrderBgra, Srgb, BlendPlain>;
    /// 8-bit sRGB-encoded RGBA, premultiplied alpha.
    PixFmtSrgba32Pre = RgbaBlender<u8, OrderRgba, Srgb, BlendPremul>;

    /// 16-bit RGBA, straight alpha.
    PixFmtRgba64 = RgbaBlender<u16, OrderRgba, Linear, BlendPlain>;
    /// 16-bit BGRA, straight alpha.
    PixFmtBgra64 = RgbaBlender<u16, OrderBgra, Linear, BlendPlain>;
    /// 16-bit ARGB, straight alpha.
    PixFmtArgb64 = RgbaBlender<u16, OrderArgb, Linear, BlendPlain>;
    /// 16-bit ABGR, straight alpha.
    PixFmtAbgr64 = RgbaBlender<u16, OrderAbgr, Linear, BlendPlain>;
    /// 16-bit RGBA, premultiplied alpha.
    PixFmtRgba64Pre = RgbaBlender<u16, OrderRgba, Linear, BlendPremul>;
    /// 16-bit BGRA, premultiplied alpha.
    PixFmtBgra64Pre = RgbaBlender<u16, OrderBgra, Linear, BlendPremul>;

    /// 8-bit RGB.
    PixFmtRgb24 = RgbBlender<u8, OrderRgb, Linear, BlendPlain>;
    /// 8-bit BGR.
    PixFmtBgr24 = RgbBlender<u8, OrderBgr, Linear, BlendPlain>;
    /// 8-bit RGB, blending premultiplied colors.
    PixFmtRgb24Pre = RgbBlender<u8, OrderRgb, Linear, BlendPremul>;
    /// 8-bit BGR, blending premultiplied colors.
    PixFmtBgr24Pre = RgbBlender<u8, OrderBgr, Linear, BlendPremul>;
    /// 8-bit sRGB-encoded RGB.
    PixFmtSrgb24 = RgbBlender<u8, OrderRgb, Srgb, BlendPlain>;
    /// 16-bit RGB.
    PixFmtRgb48 = RgbBlender<u16, OrderRgb, Linear, BlendPlain>;
    /// 16-bit BGR.
    PixFmtBgr48 = RgbBlender<u16, OrderBgr, Linear, BlendPlain>;
    /// 16-bit RGB, blending premultiplied colors.
    PixFmtRgb48Pre = RgbBlender<u16, OrderRgb, Linear, BlendPremul>;

    /// 8-bit RGB padded to four bytes, padding last.
    PixFmtRgbx32 = RgbBlender<u8, OrderRgba, Linear, BlendPlain>;
    /// 8-bit RGB padded to four bytes, padding first.
    PixFmtXrgb32 = RgbBlender<u8, OrderArgb, Linear, BlendPlain>;
    /// 8-bit BGR padded to four bytes, padding first.
    PixFmtXbgr32 = RgbBlender<u8, OrderAbgr, Linear, BlendPlain>;
    /// 8-bit BGR padded to four bytes, padding last.
    PixFmtBgrx32 = RgbBlender<u8, OrderBgra, Linear, BlendPlain>;
    /// 8-bit RGB padded to four bytes, padding last, blending premultiplied colors.
    PixFmtRgbx32Pre = RgbBlender<u8, OrderRgba, Linear, BlendPremul>;
    /// 8-bit BGR padded to four bytes, padding last, blending premultiplied colors.
    PixFmtBgrx32Pre = RgbBlender<u8, OrderBgra, Linear, BlendPremul>;

    /// 8-bit gray.
    PixFmtGray8 = GrayBlender<u8, Linear, BlendPlain>;
    /// 8-bit gray, blending premultiplied colors.
    PixFmtGray8Pre = GrayBlender<u8, Linear, BlendPremul>;
    /// 8-bit sRGB-encoded gray.
    PixFmtSgray8 = GrayBlender<u8, Srgb, BlendPlain>;
    /// 16-bit gray.
    PixFmtGray16 = GrayBlender<u16, Linear, BlendPlain>;
    /// 16-bit gray, blending premultiplied colors.
    PixFmtGray16Pre = GrayBlender<u16, Linear, BlendPremul>;

    /// Packed 5-5-5 RGB.
    PixFmtRgb555 = PackedBlender<Rgb555, Linear, BlendPlain>;
    /// Packed 5-6-5 RGB.
    PixFmtRgb565 = PackedBlender<Rgb565, Linear, BlendPlain>;
    /// Packed 5-5-5 BGR.
    PixFmtBgr555 = PackedBlender<Bgr555, Linear, BlendPlain>;
    /// Packed 5-6-5 BGR.
    PixFmtBgr565 = PackedBlender<Bgr565, Linear, BlendPlain>;
    /// Packed 5-5-5 RGB, blending premultiplied colors.
    PixFmtRgb555Pre = PackedBlender<Rgb555, Linear, BlendPremul>;
    /// Packed 5-6-5 RGB, blending premultiplied colors.
    PixFmtRgb565Pre = PackedBlender<Rgb565, Linear, BlendPremul>;
    /// Packed 5-5-5 BGR, blending premultiplied colors.
    PixFmtBgr555Pre = PackedBlender<Bgr555, Linear, BlendPremul>;
    /// Packed 5-6-5 BGR, blending premultiplied colors.
    PixFmtBgr565Pre = PackedBlender<Bgr565, Linear, BlendPremul>;
}

macro_rules! gamma_formats {
    ($($(#[$attr:meta])* $name:ident = $blender:ident<$($param:ty),*>;)*) => {
        $(
            $(#[$attr])*
            pub type $name<R, G> = PixFmt<$blender<$($param),*, BlendGamma<G>>, R>;
        )*
    };
}

gamma_formats! {
    /// 8-bit RGBA, straight alpha, blended through the gamma correction `G`.
    PixFmtRgba32Gamma = RgbaBlender<u8, OrderRgba, Linear>;
    /// 8-bit BGRA, straight alpha, blended through the gamma correction `G`.
    PixFmtBgra32Gamma = RgbaBlender<u8, OrderBgra, Linear>;
    /// 8-bit RGB, blended through the gamma correction `G`.
    PixFmtRgb24Gamma = RgbBlender<u8, OrderRgb, Linear>;
    /// 8-bit BGR, blended through the gamma correction `G`.
    PixFmtBgr24Gamma = RgbBlender<u8, OrderBgr, Linear>;
    /// 16-bit RGB, blended through the gamma correction `G`.
    PixFmtRgb48Gamma = RgbBlender<u16, OrderRgb, Linear>;
    /// 8-bit gray, blended through the gamma correction `G`.
    PixFmtGray8Gamma = GrayBlender<u8, Linear>;
    /// Packed 5-5-5 RGB, blended through the gamma correction `G`.
    PixFmtRgb555Gamma = PackedBlender<Rgb555, Linear>;
    /// Packed 5-6-5 RGB, blended through the gamma correction `G`.
    PixFmtRgb565Gamma = PackedBlender<Rgb565, Linear>;
    /// Packed 5-5-5 BGR, blended through the gamma correction `G`.
    PixFmtBgr555Gamma = PackedBlender<Bgr555, Linear>;
    /// Packed 5-6-5 BGR, blended through the gamma correction `G`.
    PixFmtBgr565Gamma = PackedBlender<Bgr565, Linear>;
}

#[cfg(test)]
mod tests {
    use super::{clip_pair, clip_run};

    #[test]
    fn clip_run_inside() {
        assert_eq!(clip_run(2, 5, 10), Some((2, 0, 5)));
        assert_eq!(clip_run(0, 10, 10), Some((0, 0, 10)));
    }

    #[test]
    fn clip_run_edges() {
        assert_eq!(clip_run(-3, 5, 10), Some((0, 3, 2)));
        assert_eq!(clip_run(8, 5, 10), Some((8, 0, 2)));
        assert_eq!(clip_run(-3, 20, 10), Some((0, 3, 10)));
        assert_eq!(clip_run(i32::MIN, usize::MAX, 10), Some((0, 2_147_483_648, 10)));
    }

    #[test]
    fn clip_run_invisible() {
        assert_eq!(clip_run(-5, 5, 10), None);
        assert_eq!(clip_run(10, 5, 10), None);
        assert_eq!(clip_run(3, 0, 10), None);
        assert_eq!(clip_run(0, 5, 0), None);
        assert_eq!(clip_run(i32::MAX, usize::MAX, 10), None);
    }

    #[test]
    fn clip_pair_skips_for_both() {
        assert_eq!(clip_pair(-2, 1, 6, 10, 4), Some((0, 3, 2, 1)));
        assert_eq!(clip_pair(3, -1, 4, 5, 10), Some((4, 0, 1, 1)));
        assert_eq!(clip_pair(0, 0, 4, 2, 3), Some((0, 0, 0, 2)));
    }
}
