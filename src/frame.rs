//! Channel-order boundary between decoded pixel grids and color lookup.
//!
//! Decoders disagree on channel order. Everything past this module sees RGB.

extern crate alloc;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::alt::BGR8;
use rgb::{FromSlice, RGB8};

use crate::error::PickError;

/// Byte order of a packed 3-channel pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    /// Blue first, as produced by most video capture and OpenCV-style decoders.
    Bgr,
}

/// A borrowed pixel grid with a known channel order.
#[derive(Debug, Clone, Copy)]
pub enum Frame<'a> {
    Rgb(ImgRef<'a, RGB8>),
    Bgr(ImgRef<'a, BGR8>),
}

impl<'a> Frame<'a> {
    /// Wrap packed 3-byte pixels. `buf.len()` must be exactly `width * height * 3`.
    pub fn from_bytes(
        buf: &'a [u8],
        width: usize,
        height: usize,
        order: ChannelOrder,
    ) -> Result<Self, PickError> {
        if width == 0 || height == 0 {
            return Err(PickError::ZeroDimension);
        }
        if Some(buf.len()) != width.checked_mul(height).and_then(|n| n.checked_mul(3)) {
            return Err(PickError::DimensionMismatch {
                len: buf.len(),
                width,
                height,
            });
        }
        Ok(match order {
            ChannelOrder::Rgb => Self::Rgb(ImgRef::new(buf.as_rgb(), width, height)),
            ChannelOrder::Bgr => Self::Bgr(ImgRef::new(buf.as_bgr(), width, height)),
        })
    }

    pub fn channel_order(&self) -> ChannelOrder {
        match self {
            Self::Rgb(_) => ChannelOrder::Rgb,
            Self::Bgr(_) => ChannelOrder::Bgr,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Self::Rgb(img) => img.width(),
            Self::Bgr(img) => img.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Rgb(img) => img.height(),
            Self::Bgr(img) => img.height(),
        }
    }

    /// RGB value at `(row, col)`.
    pub fn sample(&self, row: usize, col: usize) -> Result<RGB8, PickError> {
        if row >= self.height() || col >= self.width() {
            return Err(PickError::OutOfBounds {
                x: col as i64,
                y: row as i64,
                width: self.width() as u32,
                height: self.height() as u32,
            });
        }
        Ok(match self {
            Self::Rgb(img) => img[(col, row)],
            Self::Bgr(img) => bgr_to_rgb(img[(col, row)]),
        })
    }

    /// Convert the whole frame to an owned RGB image.
    pub fn to_rgb(&self) -> ImgVec<RGB8> {
        let (width, height) = (self.width(), self.height());
        let buf: Vec<RGB8> = match self {
            Self::Rgb(img) => img.pixels().collect(),
            Self::Bgr(img) => img.pixels().map(bgr_to_rgb).collect(),
        };
        ImgVec::new(buf, width, height)
    }
}

impl<'a> From<ImgRef<'a, RGB8>> for Frame<'a> {
    fn from(img: ImgRef<'a, RGB8>) -> Self {
        Self::Rgb(img)
    }
}

impl<'a> From<ImgRef<'a, BGR8>> for Frame<'a> {
    fn from(img: ImgRef<'a, BGR8>) -> Self {
        Self::Bgr(img)
    }
}

#[inline]
fn bgr_to_rgb(p: BGR8) -> RGB8 {
    RGB8::new(p.r, p.g, p.b)
}
