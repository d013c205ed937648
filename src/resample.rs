//! Display-image resampling.
//!
//! Filtering is delegated to `image::imageops`; this module only maps the
//! quality setting to a filter and converts between pixel containers.

#[cfg(feature = "std")]
use image::imageops::{self, FilterType};
#[cfg(feature = "std")]
use image::RgbImage;
#[cfg(feature = "std")]
use imgref::{ImgRef, ImgVec};
#[cfg(feature = "std")]
use rgb::RGB8;

#[cfg(feature = "std")]
use crate::error::PickError;

/// Resampling quality used when producing the display image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest neighbor. Cheapest, blocky when downscaling.
    Fast,
    /// Triangle (bilinear) filter widened to the scale factor, so it averages
    /// the covered source area. Good default for downscaling.
    #[default]
    Balanced,
    /// Catmull-Rom bicubic. Sharpest.
    High,
}

impl Interpolation {
    #[cfg(feature = "std")]
    fn filter(self) -> FilterType {
        match self {
            Self::Fast => FilterType::Nearest,
            Self::Balanced => FilterType::Triangle,
            Self::High => FilterType::CatmullRom,
        }
    }
}

impl core::str::FromStr for Interpolation {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("fast") || s.eq_ignore_ascii_case("nearest") {
            Ok(Self::Fast)
        } else if s.eq_ignore_ascii_case("balanced") || s.eq_ignore_ascii_case("area") {
            Ok(Self::Balanced)
        } else if s.eq_ignore_ascii_case("high") || s.eq_ignore_ascii_case("cubic") {
            Ok(Self::High)
        } else {
            Err("expected `fast`, `balanced` or `high`")
        }
    }
}

/// Resize an RGB image to exactly `width` x `height`.
///
/// Same-size requests return a plain copy without filtering.
#[cfg(feature = "std")]
pub fn resize(
    src: ImgRef<'_, RGB8>,
    width: u32,
    height: u32,
    interpolation: Interpolation,
) -> Result<ImgVec<RGB8>, PickError> {
    if width == 0 || height == 0 || src.width() == 0 || src.height() == 0 {
        return Err(PickError::ZeroDimension);
    }

    if width as usize == src.width() && height as usize == src.height() {
        let buf: Vec<RGB8> = src.pixels().collect();
        return Ok(ImgVec::new(buf, src.width(), src.height()));
    }

    let source = to_rgb_image(src)?;
    let out = imageops::resize(&source, width, height, interpolation.filter());
    Ok(from_rgb_image(out))
}

/// Copy an `imgref` grid into an `image` buffer. Strided rows are compacted.
#[cfg(feature = "std")]
fn to_rgb_image(src: ImgRef<'_, RGB8>) -> Result<RgbImage, PickError> {
    let (width, height) = (src.width(), src.height());
    let too_large = || PickError::ImageTooLarge { width, height };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;

    let raw: Vec<u8> = src.pixels().flat_map(|p| [p.r, p.g, p.b]).collect();
    let len = raw.len();
    RgbImage::from_raw(w, h, raw).ok_or(PickError::DimensionMismatch { len, width, height })
}

#[cfg(feature = "std")]
fn from_rgb_image(img: RgbImage) -> ImgVec<RGB8> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let buf = img
        .into_raw()
        .chunks_exact(3)
        .map(|c| RGB8::new(c[0], c[1], c[2]))
        .collect();
    ImgVec::new(buf, width, height)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn gradient(w: usize, h: usize) -> ImgVec<RGB8> {
        let mut buf = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                buf.push(RGB8::new((x * 255 / w) as u8, (y * 255 / h) as u8, 64));
            }
        }
        ImgVec::new(buf, w, h)
    }

    #[test]
    fn output_has_requested_size() {
        let img = gradient(40, 30);
        for q in [Interpolation::Fast, Interpolation::Balanced, Interpolation::High] {
            let out = resize(img.as_ref(), 17, 9, q).unwrap();
            assert_eq!((out.width(), out.height()), (17, 9), "{q:?}");
            assert_eq!(out.buf().len(), 17 * 9);
            let up = resize(img.as_ref(), 81, 61, q).unwrap();
            assert_eq!((up.width(), up.height()), (81, 61), "{q:?}");
        }
    }

    #[test]
    fn constant_image_stays_constant() {
        let c = RGB8::new(12, 200, 77);
        let img = ImgVec::new(vec![c; 25 * 13], 25, 13);
        for q in [Interpolation::Fast, Interpolation::Balanced, Interpolation::High] {
            let out = resize(img.as_ref(), 7, 5, q).unwrap();
            assert!(out.buf().iter().all(|&p| p == c), "{q:?}: {:?}", out.buf()[0]);
        }
    }

    #[test]
    fn balanced_averages_halved_pairs() {
        let buf = vec![
            RGB8::new(0, 0, 0),
            RGB8::new(100, 0, 0),
            RGB8::new(0, 0, 0),
            RGB8::new(100, 0, 0),
        ];
        let img = ImgVec::new(buf, 2, 2);
        let out = resize(img.as_ref(), 1, 1, Interpolation::Balanced).unwrap();
        assert_eq!(out.buf()[0], RGB8::new(50, 0, 0));
    }

    #[test]
    fn nearest_keeps_block_colors() {
        // 2x2 blocks of four distinct colors, halved.
        let colors = [
            RGB8::new(255, 0, 0),
            RGB8::new(0, 255, 0),
            RGB8::new(0, 0, 255),
            RGB8::new(255, 255, 0),
        ];
        let mut buf = Vec::with_capacity(16);
        for y in 0..4 {
            for x in 0..4 {
                buf.push(colors[(y / 2) * 2 + x / 2]);
            }
        }
        let img = ImgVec::new(buf, 4, 4);
        let out = resize(img.as_ref(), 2, 2, Interpolation::Fast).unwrap();
        assert_eq!(out.buf(), &colors[..]);
    }

    #[test]
    fn strided_source_is_compacted() {
        // 3 visible columns out of a 4-wide buffer.
        let buf: Vec<RGB8> = (0..8u8).map(|i| RGB8::new(i, i, i)).collect();
        let img = ImgRef::new_stride(&buf, 3, 2, 4);
        let out = resize(img, 3, 1, Interpolation::Fast).unwrap();
        assert_eq!(out.width(), 3);
        let source = to_rgb_image(img).unwrap();
        assert_eq!(source.get_pixel(2, 1).0, [6, 6, 6]);
    }

    #[test]
    fn same_size_is_copy_and_zero_rejected() {
        let img = gradient(5, 4);
        let out = resize(img.as_ref(), 5, 4, Interpolation::High).unwrap();
        assert_eq!(out.buf(), img.buf());
        assert!(matches!(
            resize(img.as_ref(), 0, 4, Interpolation::Fast),
            Err(PickError::ZeroDimension)
        ));
    }

    #[test]
    fn parses_quality_names() {
        assert_eq!("fast".parse(), Ok(Interpolation::Fast));
        assert_eq!("Balanced".parse(), Ok(Interpolation::Balanced));
        assert_eq!("cubic".parse(), Ok(Interpolation::High));
        assert!("lanczos".parse::<Interpolation>().is_err());
    }
}
