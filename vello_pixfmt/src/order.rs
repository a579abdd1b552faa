// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Channel orders, i.e. the position of each logical channel within a pixel.

use core::fmt::Debug;

/// The position of the color channels within a pixel.
pub trait ChannelOrder: Copy + Debug + Default + Send + Sync + 'static {
    /// The number of channels in a pixel, including alpha or padding.
    const CHANNELS: usize;
    /// The offset of the red channel.
    const R: usize;
    /// The offset of the green channel.
    const G: usize;
    /// The offset of the blue channel.
    const B: usize;
}

/// A channel order with a fourth channel, holding alpha or padding.
pub trait AlphaOrder: ChannelOrder {
    /// The offset of the alpha (or padding) channel.
    const A: usize;
}

macro_rules! order {
    ($name:ident, $doc:literal, r: $r:literal, g: $g:literal, b: $b:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl ChannelOrder for $name {
            const CHANNELS: usize = 3;
            const R: usize = $r;
            const G: usize = $g;
            const B: usize = $b;
        }
    };
    ($name:ident, $doc:literal, r: $r:literal, g: $g:literal, b: $b:literal, a: $a:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl ChannelOrder for $name {
            const CHANNELS: usize = 4;
            const R: usize = $r;
            const G: usize = $g;
            const B: usize = $b;
        }

        impl AlphaOrder for $name {
            const A: usize = $a;
        }
    };
}

order!(OrderRgb, "Red, green, blue.", r: 0, g: 1, b: 2);
order!(OrderBgr, "Blue, green, red.", r: 2, g: 1, b: 0);
order!(OrderRgba, "Red, green, blue, alpha.", r: 0, g: 1, b: 2, a: 3);
order!(OrderArgb, "Alpha, red, green, blue.", r: 1, g: 2, b: 3, a: 0);
order!(OrderAbgr, "Alpha, blue, green, red.", r: 3, g: 2, b: 1, a: 0);
order!(OrderBgra, "Blue, green, red, alpha.", r: 2, g: 1, b: 0, a: 3);
