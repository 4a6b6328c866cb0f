//! Raster surface backed by a tiny-skia pixmap

use std::path::Path;

use anyhow::Context;
use tiny_skia::{
    BlendMode, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use super::{DrawingSurface, LineStyle, SourceImage};
use crate::domain::ContentPoint;
use crate::transform::{AffineTransform, TransformError};

/// Drawing surface rendering into an owned `Pixmap`
///
/// tiny-skia takes the transform per draw call instead of keeping one, so
/// this surface carries its own current transform and save stack.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Transform,
    saved: Vec<Transform>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> anyhow::Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow::anyhow!("Invalid surface size {}x{}", width, height))?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            saved: Vec::new(),
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// The transform tiny-skia will apply to the next draw call
    pub fn device_transform(&self) -> AffineTransform {
        let t = self.transform;
        AffineTransform::new(
            t.sx as f64,
            t.ky as f64,
            t.kx as f64,
            t.sy as f64,
            t.tx as f64,
            t.ty as f64,
        )
    }

    /// Encode the current contents as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.pixmap
            .save_png(path)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

fn row(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Transform {
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

impl DrawingSurface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) -> Result<(), TransformError> {
        self.transform = self.saved.pop().ok_or(TransformError::StackUnderflow)?;
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(dx as f32, dy as f32);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform.pre_scale(sx as f32, sy as f32);
    }

    fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        self.transform = self.transform.pre_concat(row(cos, sin, -sin, cos, 0.0, 0.0));
    }

    fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transform = self.transform.pre_concat(row(a, b, c, d, e, f));
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transform = row(a, b, c, d, e, f);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (left, right) = if width < 0.0 { (x + width, x) } else { (x, x + width) };
        let (top, bottom) = if height < 0.0 { (y + height, y) } else { (y, y + height) };
        let Some(rect) =
            tiny_skia::Rect::from_ltrb(left as f32, top as f32, right as f32, bottom as f32)
        else {
            return;
        };

        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, self.transform, None);
    }

    fn draw_image(&mut self, image: &SourceImage, x: f64, y: f64) {
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..Default::default()
        };
        // Fold the offset into the transform so fractional positions survive
        let transform = self.transform.pre_translate(x as f32, y as f32);
        self.pixmap
            .draw_pixmap(0, 0, image.pixmap().as_ref(), &paint, transform, None);
    }

    fn stroke_line(&mut self, from: ContentPoint, to: ContentPoint, style: &LineStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let [r, g, b, a] = style.color.to_rgba_u8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.width as f32,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform, None);
    }
}
