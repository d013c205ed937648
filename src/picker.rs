extern crate alloc;
use alloc::string::String;

use imgref::ImgVec;
use rgb::RGB8;

use crate::error::PickError;
use crate::frame::Frame;
use crate::history::SelectionHistory;
use crate::metric::DistanceMetric;
use crate::palette::{Palette, PaletteEntry};
use crate::resample::{self, Interpolation};
use crate::rescale::{Dimensions, DisplayTransform};

/// Default longest side of the display image.
pub const DEFAULT_MAX_DISPLAY_DIMENSION: u32 = 1920;

/// Configuration for a picking session.
#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Longest side of the display image. Larger images are downscaled.
    pub max_display_dimension: u32,
    /// Distance used for nearest-color lookups.
    pub metric: DistanceMetric,
    /// Resampling used to build the display image.
    pub interpolation: Interpolation,
    /// Maximum history length. `None` keeps every pick for the session.
    pub history_limit: Option<usize>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            max_display_dimension: DEFAULT_MAX_DISPLAY_DIMENSION,
            metric: DistanceMetric::Euclidean,
            interpolation: Interpolation::Balanced,
            history_limit: None,
        }
    }
}

impl PickerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_display_dimension(mut self, n: u32) -> Self {
        self.max_display_dimension = n;
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn interpolation(mut self, q: Interpolation) -> Self {
        self.interpolation = q;
        self
    }

    pub fn history_limit(mut self, n: usize) -> Self {
        self.history_limit = Some(n);
        self
    }
}

/// Result of resolving one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    /// Sampled pixel color.
    pub rgb: RGB8,
    /// The palette entry's own color.
    pub palette_rgb: RGB8,
    /// Pixel position in the original image.
    pub original_point: (u32, u32),
}

struct LoadedImage {
    original: ImgVec<RGB8>,
    display: ImgVec<RGB8>,
    transform: DisplayTransform,
}

/// A color-picking session over one palette and, once loaded, one image.
pub struct ColorPicker {
    palette: Palette,
    config: PickerConfig,
    image: Option<LoadedImage>,
    history: SelectionHistory,
}

impl ColorPicker {
    pub fn new(palette: Palette, config: PickerConfig) -> Self {
        let history = match config.history_limit {
            Some(n) => SelectionHistory::with_limit(n),
            None => SelectionHistory::new(),
        };
        Self {
            palette,
            config,
            image: None,
            history,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    /// Replace the current image. Accepts RGB or BGR frames.
    pub fn load_frame(&mut self, frame: Frame<'_>) -> Result<(), PickError> {
        self.load_image(frame.to_rgb())
    }

    /// Replace the current image and build its display copy.
    pub fn load_image(&mut self, original: ImgVec<RGB8>) -> Result<(), PickError> {
        let (width, height) = (original.width(), original.height());
        let too_large = || PickError::ImageTooLarge { width, height };
        let dims = Dimensions::new(
            u32::try_from(width).map_err(|_| too_large())?,
            u32::try_from(height).map_err(|_| too_large())?,
        );
        let (transform, display) = display_for(&original, dims, &self.config)?;
        log::debug!("loaded image {width}x{height}");
        self.image = Some(LoadedImage {
            original,
            display,
            transform,
        });
        Ok(())
    }

    /// Change the display size limit and rebuild the display image.
    pub fn set_max_display_dimension(&mut self, n: u32) -> Result<(), PickError> {
        if n == 0 {
            return Err(PickError::ZeroMaxDimension);
        }
        self.config.max_display_dimension = n;
        self.rebuild()
    }

    pub fn set_interpolation(&mut self, q: Interpolation) -> Result<(), PickError> {
        self.config.interpolation = q;
        self.rebuild()
    }

    /// Switching metric affects subsequent picks only.
    pub fn set_metric(&mut self, metric: DistanceMetric) {
        self.config.metric = metric;
    }

    pub fn transform(&self) -> Option<&DisplayTransform> {
        self.image.as_ref().map(|i| &i.transform)
    }

    pub fn display_image(&self) -> Option<&ImgVec<RGB8>> {
        self.image.as_ref().map(|i| &i.display)
    }

    pub fn original_image(&self) -> Option<&ImgVec<RGB8>> {
        self.image.as_ref().map(|i| &i.original)
    }

    /// Nearest palette entry for a color, without touching history.
    pub fn resolve(&self, rgb: RGB8) -> &PaletteEntry {
        self.palette.nearest(rgb, self.config.metric)
    }

    /// Resolve the original-image pixel under a display-space click and record it.
    pub fn pick(&mut self, x: i64, y: i64) -> Result<Selection, PickError> {
        let image = self.image.as_ref().ok_or(PickError::NoImage)?;
        let (ox, oy) = image.transform.to_original(x, y)?;
        let rgb = Frame::from(image.original.as_ref()).sample(oy as usize, ox as usize)?;

        let entry = self.palette.nearest(rgb, self.config.metric);
        let selection = Selection {
            name: entry.name.clone(),
            rgb,
            palette_rgb: entry.rgb,
            original_point: (ox, oy),
        };
        log::debug!(
            "pick ({x}, {y}) -> ({ox}, {oy}) rgb({}, {}, {}) = {}",
            rgb.r,
            rgb.g,
            rgb.b,
            selection.name
        );

        self.history.push(selection.name.clone(), rgb);
        Ok(selection)
    }

    fn rebuild(&mut self) -> Result<(), PickError> {
        let Some(image) = self.image.as_mut() else {
            return Ok(());
        };
        let dims = image.transform.original();
        let (transform, display) = display_for(&image.original, dims, &self.config)?;
        image.transform = transform;
        image.display = display;
        Ok(())
    }
}

fn display_for(
    original: &ImgVec<RGB8>,
    dims: Dimensions,
    config: &PickerConfig,
) -> Result<(DisplayTransform, ImgVec<RGB8>), PickError> {
    let transform =
        DisplayTransform::new(dims, config.max_display_dimension, config.interpolation)?;
    let shown = transform.display();
    let display = resample::resize(
        original.as_ref(),
        shown.width,
        shown.height,
        transform.interpolation(),
    )?;
    log::debug!(
        "display {}x{} -> {}x{} ({:?})",
        dims.width,
        dims.height,
        shown.width,
        shown.height,
        transform.interpolation()
    );
    Ok((transform, display))
}
