//! Surface that records every call instead of rasterizing

use super::{DrawingSurface, LineStyle, SourceImage};
use crate::domain::ContentPoint;
use crate::transform::{AffineTransform, TransformError};

/// One call made against a [`RecordingSurface`]
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCommand {
    Save,
    Restore,
    Translate(f64, f64),
    Scale(f64, f64),
    Rotate(f64),
    Transform(AffineTransform),
    SetTransform(AffineTransform),
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    DrawImage {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },
    StrokeLine {
        from: ContentPoint,
        to: ContentPoint,
        style: LineStyle,
    },
}

/// Command recorder with a fixed device size
///
/// Keeps a save depth so that unmatched restores fail the same way a real
/// surface does.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    depth: usize,
    pub commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Recorded stroke calls as `(from, to, style)`
    pub fn strokes(&self) -> impl Iterator<Item = (ContentPoint, ContentPoint, LineStyle)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            SurfaceCommand::StrokeLine { from, to, style } => Some((*from, *to, *style)),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(SurfaceCommand::Save);
    }

    fn restore(&mut self) -> Result<(), TransformError> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or(TransformError::StackUnderflow)?;
        self.commands.push(SurfaceCommand::Restore);
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(SurfaceCommand::Translate(dx, dy));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.commands.push(SurfaceCommand::Scale(sx, sy));
    }

    fn rotate(&mut self, radians: f64) {
        self.commands.push(SurfaceCommand::Rotate(radians));
    }

    fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.commands
            .push(SurfaceCommand::Transform(AffineTransform::new(a, b, c, d, e, f)));
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.commands
            .push(SurfaceCommand::SetTransform(AffineTransform::new(a, b, c, d, e, f)));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(SurfaceCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_image(&mut self, image: &SourceImage, x: f64, y: f64) {
        self.commands.push(SurfaceCommand::DrawImage {
            x,
            y,
            width: image.width(),
            height: image.height(),
        });
    }

    fn stroke_line(&mut self, from: ContentPoint, to: ContentPoint, style: &LineStyle) {
        self.commands.push(SurfaceCommand::StrokeLine {
            from,
            to,
            style: *style,
        });
    }
}
