//! Bounding boxes for text found by an external detector.
//!
//! Recognition itself is out of scope: anything implementing [`TextDetector`]
//! can feed this module. Labels are returned rather than rasterized, since
//! font rendering belongs to the display sink.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use rgb::RGB8;

/// Default minimum confidence; detections at or below it are dropped.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle. Both `left..=right` and `top..=bottom` are
/// inclusive, so a rectangle with `left == right` is one pixel wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Rect {
    /// Number of pixel columns covered.
    pub fn width(&self) -> i64 {
        self.right - self.left + 1
    }

    /// Number of pixel rows covered.
    pub fn height(&self) -> i64 {
        self.bottom - self.top + 1
    }
}

/// Corner coordinates are truncated into this range before becoming pixels.
const COORD_LIMIT: f32 = i32::MAX as f32;

fn to_pixel(v: f32) -> i64 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT) as i64
}

/// One text region reported by a detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Corners as reported, usually clockwise from top-left.
    pub quad: [Point; 4],
    pub text: String,
    pub confidence: f32,
}

impl Detection {
    /// Smallest pixel rectangle containing all four corners.
    /// `None` when a corner is not finite or the quad has zero width or height.
    pub fn bounds(&self) -> Option<Rect> {
        if self.quad.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return None;
        }
        let fold = |f: fn(f32, f32) -> f32, init: f32, pick: fn(&Point) -> f32| {
            self.quad.iter().map(pick).fold(init, f)
        };
        let (min_x, max_x) = (
            fold(f32::min, f32::INFINITY, |p| p.x),
            fold(f32::max, f32::NEG_INFINITY, |p| p.x),
        );
        let (min_y, max_y) = (
            fold(f32::min, f32::INFINITY, |p| p.y),
            fold(f32::max, f32::NEG_INFINITY, |p| p.y),
        );
        if max_x <= min_x || max_y <= min_y {
            return None;
        }
        Some(Rect {
            left: to_pixel(min_x),
            top: to_pixel(min_y),
            right: to_pixel(max_x),
            bottom: to_pixel(max_y),
        })
    }
}

/// External text recognizer.
pub trait TextDetector {
    type Error;

    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>, Self::Error>;
}

/// Text to be drawn by the display sink, anchored at a box's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub anchor: (i64, i64),
}

/// Keep detections whose confidence is strictly above `threshold`.
pub fn filter_detections(detections: Vec<Detection>, threshold: f32) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|d| {
            let keep = d.confidence > threshold;
            log::trace!("{:?} confidence {:.3} keep={keep}", d.text, d.confidence);
            keep
        })
        .collect()
}

/// Draw box outlines `thickness` pixels wide, inside each detection's bounds,
/// clipped to the frame. Returns one label per drawn box.
pub fn draw_boxes(
    frame: &mut RgbImage,
    detections: &[Detection],
    color: RGB8,
    thickness: u32,
) -> Vec<Label> {
    let t = i64::from(thickness.max(1));
    let (w, h) = (i64::from(frame.width()), i64::from(frame.height()));
    let paint = Rgb([color.r, color.g, color.b]);
    let mut labels = Vec::with_capacity(detections.len());

    for d in detections {
        let Some(r) = d.bounds() else {
            log::warn!("skipping detection {:?} with degenerate box", d.text);
            continue;
        };

        // An edge more than `t` pixels outside the frame paints nothing.
        let (left, right) = (r.left.clamp(-t - 1, w + t), r.right.clamp(-t - 1, w + t));
        let (top, bottom) = (r.top.clamp(-t - 1, h + t), r.bottom.clamp(-t - 1, h + t));
        for i in 0..t {
            let ring_w = right - left + 1 - 2 * i;
            let ring_h = bottom - top + 1 - 2 * i;
            if ring_w <= 0 || ring_h <= 0 {
                break;
            }
            let (Ok(x), Ok(y), Ok(rw), Ok(rh)) = (
                i32::try_from(left + i),
                i32::try_from(top + i),
                u32::try_from(ring_w),
                u32::try_from(ring_h),
            ) else {
                break;
            };
            draw_hollow_rect_mut(frame, imageproc::rect::Rect::at(x, y).of_size(rw, rh), paint);
        }

        log::debug!(
            "text {:?} at ({}, {}) size {}x{}",
            d.text,
            r.left,
            r.top,
            r.width(),
            r.height()
        );
        labels.push(Label {
            text: d.text.clone(),
            anchor: (r.left, r.top),
        });
    }
    labels
}

#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Detections at or below this confidence are discarded.
    pub threshold: f32,
    pub box_color: RGB8,
    /// Color the display sink should use for labels.
    pub label_color: RGB8,
    /// Outline width in pixels, drawn inward from the box edge.
    pub thickness: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            box_color: RGB8::new(0, 255, 0),
            label_color: RGB8::new(255, 0, 0),
            thickness: 2,
        }
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, t: f32) -> Self {
        self.threshold = t;
        self
    }

    pub fn box_color(mut self, c: RGB8) -> Self {
        self.box_color = c;
        self
    }

    pub fn label_color(mut self, c: RGB8) -> Self {
        self.label_color = c;
        self
    }

    pub fn thickness(mut self, t: u32) -> Self {
        self.thickness = t;
        self
    }
}

/// Detections and labels produced for one frame.
#[derive(Debug, Clone, Default)]
pub struct OverlayResult {
    pub detections: Vec<Detection>,
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Default)]
pub struct DetectionOverlay {
    config: OverlayConfig,
}

impl DetectionOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Detect, filter and draw onto `frame` in place.
    pub fn process<D: TextDetector>(
        &self,
        frame: &mut RgbImage,
        detector: &mut D,
    ) -> Result<OverlayResult, D::Error> {
        let raw = detector.detect(frame)?;
        let total = raw.len();
        let detections = filter_detections(raw, self.config.threshold);
        log::debug!("kept {} of {total} detections", detections.len());

        let labels = draw_boxes(
            frame,
            &detections,
            self.config.box_color,
            self.config.thickness,
        );
        Ok(OverlayResult { detections, labels })
    }
}
