//! Display sizing and display-to-original coordinate mapping.
//!
//! All arithmetic is exact integer math on `u64`, truncating toward zero.

use crate::error::PickError;
use crate::resample::Interpolation;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn validate(self) -> Result<Self, PickError> {
        if self.width == 0 || self.height == 0 {
            return Err(PickError::ZeroDimension);
        }
        Ok(self)
    }

    fn contains(self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Target display size that fits inside `max_dimension` while keeping the aspect ratio.
///
/// Images already within the limit are returned unchanged; nothing is upscaled.
/// The larger side becomes `max_dimension` and the other side is scaled by the
/// same ratio, truncated.
pub fn compute_display_size(
    original_w: u32,
    original_h: u32,
    max_dimension: u32,
) -> Result<(u32, u32), PickError> {
    if original_w == 0 || original_h == 0 {
        return Err(PickError::ZeroDimension);
    }
    if max_dimension == 0 {
        return Err(PickError::ZeroMaxDimension);
    }
    if original_w.max(original_h) <= max_dimension {
        return Ok((original_w, original_h));
    }

    let max = u64::from(max_dimension);
    let (w, h) = (u64::from(original_w), u64::from(original_h));
    // Both results are bounded by max_dimension, so the casts cannot truncate.
    if original_w > original_h {
        Ok((max_dimension, (h * max / w) as u32))
    } else {
        Ok(((w * max / h) as u32, max_dimension))
    }
}

/// Map a point in display space back to the original image.
///
/// Points outside the display rectangle, or that would land outside the
/// original image, are rejected with [`PickError::OutOfBounds`] rather than clamped.
pub fn map_display_to_original(
    x: i64,
    y: i64,
    original: Dimensions,
    display: Dimensions,
) -> Result<(u32, u32), PickError> {
    let original = original.validate()?;
    let display = display.validate()?;

    if !display.contains(x, y) {
        return Err(PickError::OutOfBounds {
            x,
            y,
            width: display.width,
            height: display.height,
        });
    }

    // x < display.width fits in u32, and the products fit in u64.
    let ox = x as u64 * u64::from(original.width) / u64::from(display.width);
    let oy = y as u64 * u64::from(original.height) / u64::from(display.height);
    let (ox, oy) = (ox as i64, oy as i64);

    if !original.contains(ox, oy) {
        return Err(PickError::OutOfBounds {
            x: ox,
            y: oy,
            width: original.width,
            height: original.height,
        });
    }
    Ok((ox as u32, oy as u32))
}

/// How an original image is presented on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTransform {
    original: Dimensions,
    display: Dimensions,
    interpolation: Interpolation,
}

impl DisplayTransform {
    pub fn new(
        original: Dimensions,
        max_dimension: u32,
        interpolation: Interpolation,
    ) -> Result<Self, PickError> {
        let (width, height) = compute_display_size(original.width, original.height, max_dimension)?;
        Ok(Self {
            original,
            display: Dimensions::new(width, height),
            interpolation,
        })
    }

    pub fn original(&self) -> Dimensions {
        self.original
    }

    pub fn display(&self) -> Dimensions {
        self.display
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// True when the display image is a straight copy of the original.
    pub fn is_identity(&self) -> bool {
        self.original == self.display
    }

    pub fn to_original(&self, x: i64, y: i64) -> Result<(u32, u32), PickError> {
        map_display_to_original(x, y, self.original, self.display)
    }
}
