//! Session state: one image, one surface, one lane form

use super::messages::{CursorReadout, Feedback, Input};
use crate::config::ViewConfig;
use crate::domain::{ContentPoint, LaneCommand, LaneForm, SurfacePoint};
use crate::render::{self, LaneStyle};
use crate::surface::{DrawingSurface, SourceImage};
use crate::transform::{TransformError, TransformTracker};
use crate::viewport::ViewportController;

/// Everything needed to view and annotate one gel image
pub struct GelSession<S> {
    tracker: TransformTracker<S>,
    viewport: ViewportController,
    image: SourceImage,
    style: LaneStyle,
    /// Lane parameters; call [`GelSession::redraw`] after editing directly
    pub form: LaneForm,
    cursor: Option<ContentPoint>,
}

/// Redraw callback shared by all gestures; failures are logged and skipped
///
/// Returns whether a frame was drawn.
fn redraw_logged<S: DrawingSurface>(
    tracker: &mut TransformTracker<S>,
    image: &SourceImage,
    form: &LaneForm,
    style: &LaneStyle,
) -> bool {
    match render::redraw(tracker, image, form, style) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Redraw skipped: {}", err);
            false
        }
    }
}

impl<S: DrawingSurface> GelSession<S> {
    /// Create a session and draw the first frame
    pub fn new(surface: S, image: SourceImage, config: &ViewConfig) -> Self {
        let center = SurfacePoint::new(surface.width() as f64 / 2.0, surface.height() as f64 / 2.0);
        let mut session = Self {
            tracker: TransformTracker::new(surface),
            viewport: ViewportController::new(config.zoom_step, config.wheel_divisor, center),
            image,
            style: LaneStyle::from_config(config),
            form: LaneForm::default(),
            cursor: None,
        };
        session.redraw_frame();
        session
    }

    pub fn tracker(&self) -> &TransformTracker<S> {
        &self.tracker
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Last cursor position in whole image pixels
    pub fn cursor(&self) -> Option<CursorReadout> {
        self.cursor.map(|p| CursorReadout {
            x: p.x as i64,
            y: p.y as i64,
        })
    }

    pub fn into_surface(self) -> S {
        self.tracker.into_inner()
    }

    pub fn redraw(&mut self) -> Result<(), TransformError> {
        render::redraw(&mut self.tracker, &self.image, &self.form, &self.style)
    }

    fn redraw_frame(&mut self) -> bool {
        redraw_logged(&mut self.tracker, &self.image, &self.form, &self.style)
    }

    /// Zoom by `clicks` steps around a surface point
    pub fn zoom_at(&mut self, at: SurfacePoint, clicks: f64) -> Result<(), TransformError> {
        let (image, form, style) = (&self.image, &self.form, &self.style);
        self.viewport
            .zoom_at(&mut self.tracker, at, clicks, |t| {
                redraw_logged(t, image, form, style);
            })
    }

    /// Route one input and report what the host should refresh
    ///
    /// Mapping failures (a singular transform) skip the input with a warning.
    pub fn handle(&mut self, input: Input) -> Feedback {
        let mut feedback = Feedback::default();
        let (image, form, style) = (&self.image, &self.form, &self.style);
        let mut redrawn = false;
        let mut redraw = |t: &mut TransformTracker<S>| {
            redrawn |= redraw_logged(t, image, form, style);
        };

        let result = match input {
            Input::PointerDown(at) => self.viewport.begin_drag(&self.tracker, at),
            Input::PointerMove(at) => self
                .viewport
                .continue_drag(&mut self.tracker, at, &mut redraw)
                .map(|under| self.cursor = Some(under.round())),
            Input::PointerUp { shift } => self
                .viewport
                .end_drag(&mut self.tracker, shift, &mut redraw)
                .map(|_| ()),
            Input::PointerLeave => {
                self.viewport.cancel_drag();
                Ok(())
            }
            Input::Wheel(delta) => self
                .viewport
                .on_wheel(&mut self.tracker, delta, &mut redraw)
                .map(|_| ()),
            Input::Lane(command) => {
                feedback.form_changed = self.apply_lane_command(command);
                feedback.redrawn = self.redraw_frame();
                return feedback;
            }
        };

        match result {
            Ok(()) if matches!(input, Input::PointerMove(_)) => feedback.cursor = self.cursor(),
            Ok(()) => {}
            Err(err) => log::warn!("Ignoring {:?}: {}", input, err),
        }
        feedback.redrawn = redrawn;
        feedback
    }

    fn apply_lane_command(&mut self, command: LaneCommand) -> bool {
        let Some(cursor) = self.cursor else {
            log::debug!("No cursor readout yet, ignoring {:?}", command);
            return false;
        };
        self.form.apply(command, cursor);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceCommand};
    use crate::viewport::WheelDelta;
    use image::RgbaImage;

    fn session() -> GelSession<RecordingSurface> {
        let image = SourceImage::from_rgba(RgbaImage::new(400, 300)).unwrap();
        GelSession::new(RecordingSurface::new(640, 480), image, &ViewConfig::default())
    }

    fn readout(x: i64, y: i64) -> Option<CursorReadout> {
        Some(CursorReadout { x, y })
    }

    #[test]
    fn test_first_frame_is_drawn() {
        let s = session();
        let commands = &s.tracker().surface().commands;
        assert!(matches!(commands[0], SurfaceCommand::ClearRect { .. }));
        assert!(matches!(commands[1], SurfaceCommand::DrawImage { .. }));
    }

    #[test]
    fn test_pointer_move_reports_rounded_content_cursor() {
        let mut s = session();
        s.zoom_at(SurfacePoint::new(0.0, 0.0), 1.0).unwrap();
        let fb = s.handle(Input::PointerMove(SurfacePoint::new(61.0, 13.0)));
        // 61 / 1.2 = 50.83, 13 / 1.2 = 10.83
        assert_eq!(fb.cursor, readout(51, 11));
        assert!(!fb.redrawn);
    }

    #[test]
    fn test_drag_pans_and_redraws() {
        let mut s = session();
        s.handle(Input::PointerDown(SurfacePoint::new(100.0, 100.0)));
        let fb = s.handle(Input::PointerMove(SurfacePoint::new(130.0, 90.0)));
        assert!(fb.redrawn);
        assert_eq!(fb.cursor, readout(100, 100));

        let fb = s.handle(Input::PointerUp { shift: false });
        assert!(!fb.redrawn);
        let t = s.tracker().current_transform();
        assert_eq!((t.e, t.f), (30.0, -10.0));
    }

    #[test]
    fn test_click_zooms() {
        let mut s = session();
        s.handle(Input::PointerMove(SurfacePoint::new(200.0, 150.0)));
        s.handle(Input::PointerDown(SurfacePoint::new(200.0, 150.0)));
        let fb = s.handle(Input::PointerUp { shift: false });
        assert!(fb.redrawn);
        assert!((s.tracker().current_transform().a - 1.2).abs() < 1e-12);

        s.handle(Input::PointerDown(SurfacePoint::new(200.0, 150.0)));
        s.handle(Input::PointerUp { shift: true });
        assert!((s.tracker().current_transform().a - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_zooms_around_cursor() {
        let mut s = session();
        s.handle(Input::PointerMove(SurfacePoint::new(320.0, 240.0)));
        let fb = s.handle(Input::Wheel(WheelDelta::Lines(-3.0)));
        assert!(fb.redrawn);
        let t = s.tracker().current_transform();
        assert!((t.a - 1.2_f64.powi(3)).abs() < 1e-12);
        let under = s.tracker().map_point(SurfacePoint::new(320.0, 240.0)).unwrap();
        assert!((under.x - 320.0).abs() < 1e-9 && (under.y - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_lane_commands_use_cursor_readout() {
        let mut s = session();
        let fb = s.handle(Input::Lane(LaneCommand::SetWellStart));
        assert!(!fb.form_changed);

        s.handle(Input::PointerMove(SurfacePoint::new(20.0, 30.0)));
        s.handle(Input::Lane(LaneCommand::SetWellStart));
        s.handle(Input::PointerMove(SurfacePoint::new(220.0, 30.0)));
        s.handle(Input::Lane(LaneCommand::SetWellEnd));
        s.handle(Input::PointerMove(SurfacePoint::new(120.0, 250.4)));
        let fb = s.handle(Input::Lane(LaneCommand::MeasureLaneLength));
        s.handle(Input::PointerMove(SurfacePoint::new(120.0, 60.0)));
        s.handle(Input::Lane(LaneCommand::MeasureLaneStart));

        assert!(fb.form_changed && fb.redrawn);
        assert_eq!(s.form.well_start(), ContentPoint::new(20.0, 30.0));
        assert_eq!(s.form.well_end(), ContentPoint::new(220.0, 30.0));
        assert_eq!(s.form.lane_length, 220.0);
        assert_eq!(s.form.lane_start, 30.0);

        // Lane box now drawn: well line, three sides, start line
        let strokes = s.tracker().surface().strokes().count();
        assert!(strokes >= 5);
    }

    #[test]
    fn test_singular_transform_skips_pointer_update() {
        let mut s = session();
        s.handle(Input::PointerMove(SurfacePoint::new(10.0, 10.0)));
        s.tracker.set_transform(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let fb = s.handle(Input::PointerMove(SurfacePoint::new(50.0, 50.0)));
        assert_eq!(fb, Feedback::default());
        assert_eq!(s.cursor(), readout(10, 10));
    }

    #[test]
    fn test_cursor_readout_rounds_halves_up() {
        let mut s = session();
        let fb = s.handle(Input::PointerMove(SurfacePoint::new(-2.5, -0.5)));
        assert_eq!(fb.cursor, readout(-2, 0));
        let fb = s.handle(Input::PointerMove(SurfacePoint::new(7.5, -3.7)));
        assert_eq!(fb.cursor, readout(8, -4));
    }

    #[test]
    fn test_lane_command_reports_skipped_redraw() {
        let mut s = session();
        s.handle(Input::PointerMove(SurfacePoint::new(20.0, 30.0)));
        s.tracker.set_transform(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let fb = s.handle(Input::Lane(LaneCommand::SetWellStart));
        assert!(fb.form_changed);
        assert!(!fb.redrawn);
        assert_eq!(s.form.well_start(), ContentPoint::new(20.0, 30.0));
    }

    #[test]
    fn test_pointer_leave_abandons_drag() {
        let mut s = session();
        s.handle(Input::PointerDown(SurfacePoint::new(5.0, 5.0)));
        s.handle(Input::PointerLeave);
        assert!(!s.viewport().is_dragging());
        let fb = s.handle(Input::PointerUp { shift: false });
        assert!(!fb.redrawn);
    }
}
