//! Shadow transform tracking for a drawing surface
//!
//! `TransformTracker` wraps a surface and implements the same operation set.
//! Every transform-mutating call updates a shadow matrix and is then forwarded
//! unchanged, so the cumulative transform and its inverse can be queried even
//! when the surface itself cannot report them.

use super::{AffineTransform, TransformError};
use crate::domain::{ContentPoint, SurfacePoint};
use crate::surface::{DrawingSurface, LineStyle, SourceImage};

/// Surface wrapper keeping a queryable copy of the cumulative transform
pub struct TransformTracker<S> {
    surface: S,
    current: AffineTransform,
    saved: Vec<AffineTransform>,
}

impl<S: DrawingSurface> TransformTracker<S> {
    /// Start tracking `surface`, assumed to be at the identity transform
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            current: AffineTransform::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// The live shadow matrix
    pub fn current_transform(&self) -> AffineTransform {
        self.current
    }

    pub fn inverse_transform(&self) -> Result<AffineTransform, TransformError> {
        self.current.invert().ok_or(TransformError::SingularTransform)
    }

    /// Number of saves not yet restored
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Map a surface point back into content space
    pub fn map_point(&self, p: SurfacePoint) -> Result<ContentPoint, TransformError> {
        let (x, y) = self.inverse_transform()?.apply(p.x, p.y);
        Ok(ContentPoint::new(x, y))
    }

    /// Map a content point onto the surface
    pub fn map_point_forward(&self, p: ContentPoint) -> SurfacePoint {
        let (x, y) = self.current.apply(p.x, p.y);
        SurfacePoint::new(x, y)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_inner(self) -> S {
        self.surface
    }

    fn compose(&mut self, local: AffineTransform) {
        self.current = self.current.then_local(&local);
    }
}

impl<S: DrawingSurface> DrawingSurface for TransformTracker<S> {
    fn width(&self) -> u32 {
        self.surface.width()
    }

    fn height(&self) -> u32 {
        self.surface.height()
    }

    fn save(&mut self) {
        self.saved.push(self.current);
        self.surface.save();
    }

    /// Fails without touching the surface when nothing was saved
    fn restore(&mut self) -> Result<(), TransformError> {
        let Some(previous) = self.saved.pop() else {
            log::warn!("restore without matching save; transform left unchanged");
            return Err(TransformError::StackUnderflow);
        };
        self.current = previous;
        self.surface.restore()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.compose(AffineTransform::translation(dx, dy));
        self.surface.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.compose(AffineTransform::scaling(sx, sy));
        self.surface.scale(sx, sy);
    }

    fn rotate(&mut self, radians: f64) {
        self.compose(AffineTransform::rotation(radians));
        self.surface.rotate(radians);
    }

    fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.compose(AffineTransform::new(a, b, c, d, e, f));
        self.surface.transform(a, b, c, d, e, f);
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.current = AffineTransform::new(a, b, c, d, e, f);
        if self.current.is_singular() {
            log::debug!("set_transform installed a singular matrix: {:?}", self.current);
        }
        self.surface.set_transform(a, b, c, d, e, f);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.surface.clear_rect(x, y, width, height);
    }

    fn draw_image(&mut self, image: &SourceImage, x: f64, y: f64) {
        self.surface.draw_image(image, x, y);
    }

    fn stroke_line(&mut self, from: ContentPoint, to: ContentPoint, style: &LineStyle) {
        self.surface.stroke_line(from, to, style);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::surface::{PixmapSurface, RecordingSurface, SurfaceCommand};

    fn tracker() -> TransformTracker<RecordingSurface> {
        TransformTracker::new(RecordingSurface::new(640, 480))
    }

    fn assert_close(a: SurfacePoint, b: SurfacePoint, tolerance: f64) {
        assert!(
            (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[derive(Clone, Copy)]
    enum Op {
        Translate(f64, f64),
        Scale(f64, f64),
        Rotate(f64),
        Transform([f64; 6]),
    }

    fn run<S: DrawingSurface>(t: &mut TransformTracker<S>, ops: &[Op]) {
        for op in ops {
            match *op {
                Op::Translate(dx, dy) => t.translate(dx, dy),
                Op::Scale(sx, sy) => t.scale(sx, sy),
                Op::Rotate(r) => t.rotate(r),
                Op::Transform([a, b, c, d, e, f]) => t.transform(a, b, c, d, e, f),
            }
        }
    }

    /// Mixed operation sequences used by the property-style tests
    fn scenarios() -> Vec<Vec<Op>> {
        vec![
            vec![],
            vec![Op::Translate(10.0, 5.0)],
            vec![Op::Scale(2.0, 0.5), Op::Translate(-30.0, 12.5)],
            vec![
                Op::Translate(100.0, 40.0),
                Op::Rotate(PI / 6.0),
                Op::Scale(1.2, 1.2),
            ],
            vec![
                Op::Rotate(-1.3),
                Op::Transform([1.0, 0.2, -0.4, 0.9, 7.0, -3.0]),
                Op::Scale(0.25, 3.0),
                Op::Translate(0.5, 0.5),
            ],
        ]
    }

    #[test]
    fn test_translate_then_map_point() {
        let mut t = tracker();
        t.translate(10.0, 5.0);
        let p = t.map_point(SurfacePoint::new(10.0, 5.0)).unwrap();
        assert_eq!(p, ContentPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_map_point_round_trip() {
        let probes = [
            SurfacePoint::new(0.0, 0.0),
            SurfacePoint::new(320.0, 240.0),
            SurfacePoint::new(-15.5, 999.25),
        ];
        for ops in scenarios() {
            let mut t = tracker();
            run(&mut t, &ops);
            for p in probes {
                let back = t.map_point_forward(t.map_point(p).unwrap());
                assert_close(back, p, 1e-9);
            }
        }
    }

    #[test]
    fn test_save_restore_round_trip() {
        for ops in scenarios() {
            let mut t = tracker();
            t.scale(1.5, 1.5);
            t.translate(3.0, -4.0);
            let before = t.current_transform();

            t.save();
            run(&mut t, &ops);
            t.set_transform(9.0, 0.0, 0.0, 9.0, 1.0, 1.0);
            t.restore().unwrap();

            assert_eq!(t.current_transform(), before);
            assert_eq!(t.depth(), 0);
        }
    }

    #[test]
    fn test_nested_save_restore() {
        let mut t = tracker();
        t.translate(1.0, 0.0);
        t.save();
        t.scale(2.0, 2.0);
        let inner = t.current_transform();
        t.save();
        t.rotate(0.5);
        assert_eq!(t.depth(), 2);

        t.restore().unwrap();
        assert_eq!(t.current_transform(), inner);
        t.restore().unwrap();
        assert_eq!(t.current_transform(), AffineTransform::translation(1.0, 0.0));
    }

    #[test]
    fn test_saved_snapshot_is_a_copy() {
        let mut t = tracker();
        t.save();
        t.translate(50.0, 50.0);
        t.restore().unwrap();
        assert_eq!(t.current_transform(), AffineTransform::IDENTITY);
    }

    #[test]
    fn test_restore_on_empty_stack() {
        let mut t = tracker();
        t.scale(3.0, 3.0);
        let before = t.current_transform();

        assert_eq!(t.restore(), Err(TransformError::StackUnderflow));
        assert_eq!(t.current_transform(), before);
        // The surface must not see the unmatched restore
        assert!(!t.surface().commands.contains(&SurfaceCommand::Restore));
    }

    #[test]
    fn test_set_transform_replaces_instead_of_composing() {
        let mut t = tracker();
        t.scale(4.0, 4.0);
        t.set_transform(1.0, 0.0, 0.0, 1.0, 20.0, 30.0);
        assert_eq!(
            t.current_transform(),
            AffineTransform::new(1.0, 0.0, 0.0, 1.0, 20.0, 30.0)
        );
    }

    #[test]
    fn test_singular_transform_fails_mapping() {
        let mut t = tracker();
        t.set_transform(0.0, 0.0, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            t.map_point(SurfacePoint::new(1.0, 1.0)),
            Err(TransformError::SingularTransform)
        );
        assert!(t.inverse_transform().is_err());
    }

    #[test]
    fn test_calls_are_forwarded_in_order() {
        let mut t = tracker();
        t.save();
        t.translate(1.0, 2.0);
        t.scale(3.0, 4.0);
        t.rotate(0.5);
        t.transform(1.0, 0.0, 0.0, 1.0, 5.0, 6.0);
        t.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        t.restore().unwrap();

        assert_eq!(
            t.into_inner().commands,
            vec![
                SurfaceCommand::Save,
                SurfaceCommand::Translate(1.0, 2.0),
                SurfaceCommand::Scale(3.0, 4.0),
                SurfaceCommand::Rotate(0.5),
                SurfaceCommand::Transform(AffineTransform::new(1.0, 0.0, 0.0, 1.0, 5.0, 6.0)),
                SurfaceCommand::SetTransform(AffineTransform::IDENTITY),
                SurfaceCommand::Restore,
            ]
        );
    }

    #[test]
    fn test_shadow_matches_raster_surface() {
        let mut t = TransformTracker::new(PixmapSurface::new(64, 64).unwrap());
        let check = |t: &TransformTracker<PixmapSurface>| {
            let shadow = t.current_transform();
            let device = t.surface().device_transform();
            // tiny-skia works in f32
            let tolerance = 1e-4 * shadow.coefficients().iter().fold(1.0_f64, |m, c| m.max(c.abs()));
            assert!(
                shadow.approx_eq(&device, tolerance),
                "shadow {:?} != device {:?}",
                shadow,
                device
            );
        };

        t.translate(12.0, -7.0);
        check(&t);
        t.scale(2.5, 0.75);
        check(&t);
        t.save();
        t.rotate(PI / 3.0);
        check(&t);
        t.transform(1.0, 0.1, 0.2, 1.0, -4.0, 9.0);
        check(&t);
        t.save();
        t.set_transform(0.5, 0.0, 0.0, 0.5, 3.0, 3.0);
        check(&t);
        t.translate(-1.0, 8.0);
        check(&t);
        t.restore().unwrap();
        check(&t);
        t.restore().unwrap();
        check(&t);
        assert!(t.restore().is_err());
        check(&t);
    }

    #[test]
    fn test_drawing_calls_pass_through() {
        let mut t = tracker();
        t.clear_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            t.surface().commands,
            vec![SurfaceCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0
            }]
        );
        assert_eq!((t.width(), t.height()), (640, 480));
    }
}
