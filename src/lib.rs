#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

//! Nearest named color lookup for picked pixels.
//!
//! A [`Palette`] resolves any RGB value to its closest named entry under a
//! chosen [`DistanceMetric`]. The [`rescale`] module maps clicks on a
//! downscaled display image back to original pixels, and [`ColorPicker`]
//! ties both together with a [`SelectionHistory`].
//!
//! Without the default `std` feature the crate keeps palette lookup,
//! coordinate mapping, frames and history; resampling, the picker session
//! and the detection overlay need `image` and `imageproc`.
//!
//! ```
//! use zenpick::{DistanceMetric, Palette};
//!
//! let palette = Palette::from_csv("black,#000000,0,0,0\nwhite,#ffffff,255,255,255")?;
//! let name = palette.nearest_name(rgb::RGB8::new(30, 30, 30), DistanceMetric::Euclidean);
//! assert_eq!(name, "black");
//! # Ok::<(), zenpick::PickError>(())
//! ```

extern crate alloc;

pub mod css;
pub mod error;
pub mod frame;
pub mod history;
pub mod metric;
#[cfg(feature = "std")]
pub mod overlay;
pub mod palette;
#[cfg(feature = "std")]
pub mod picker;
pub mod resample;
pub mod rescale;

pub use error::{ErrorKind, PickError};
pub use frame::{ChannelOrder, Frame};
pub use history::{HistoryRecord, SelectionHistory};
#[cfg(feature = "std")]
pub use image::RgbImage;
pub use imgref::{ImgRef, ImgVec};
pub use metric::DistanceMetric;
#[cfg(feature = "std")]
pub use overlay::{Detection, DetectionOverlay, OverlayConfig, TextDetector};
pub use palette::{query_from_components, Palette, PaletteEntry};
#[cfg(feature = "std")]
pub use picker::{ColorPicker, PickerConfig, Selection};
pub use resample::Interpolation;
pub use rescale::{compute_display_size, map_display_to_original, Dimensions, DisplayTransform};
