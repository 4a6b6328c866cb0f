//! Drawing surfaces
//!
//! This module contains:
//! - The operation set every surface supports (the `DrawingSurface` trait)
//! - A tiny-skia backed raster surface (pixmap.rs)
//! - A surface that only records the calls made against it (recording.rs)
//! - The source image type drawn by the renderer (source.rs)

pub mod pixmap;
pub mod recording;
pub mod source;

pub use pixmap::PixmapSurface;
pub use recording::{RecordingSurface, SurfaceCommand};
pub use source::SourceImage;

use crate::config::LineColor;
use crate::domain::ContentPoint;
use crate::transform::TransformError;

/// Stroke parameters for a single line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// Width in the current local frame (scales with zoom)
    pub width: f64,
    pub color: LineColor,
}

/// Canvas-like 2D surface addressed through a cumulative affine transform
///
/// Transform operations compose in the current local frame: a `translate`
/// after a `scale` moves by scaled units. Drawing calls take coordinates in
/// that local frame.
pub trait DrawingSurface {
    /// Width of the surface in device pixels
    fn width(&self) -> u32;
    /// Height of the surface in device pixels
    fn height(&self) -> u32;

    /// Push the drawing state (including the transform)
    fn save(&mut self);
    /// Pop the drawing state pushed by the matching `save`
    fn restore(&mut self) -> Result<(), TransformError>;

    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn rotate(&mut self, radians: f64);
    /// Multiply the current transform by the given matrix
    fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
    /// Replace the current transform with the given matrix
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);

    /// Clear a rectangle to transparent
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Draw `image` with its top-left corner at `(x, y)`, nearest-neighbor
    fn draw_image(&mut self, image: &SourceImage, x: f64, y: f64);
    fn stroke_line(&mut self, from: ContentPoint, to: ContentPoint, style: &LineStyle);
}
