//! Pan and zoom interaction
//!
//! `ViewportController` turns pointer and wheel gestures into transform
//! changes on a [`TransformTracker`]. Each gesture step that changes the
//! transform calls the supplied redraw callback before returning.

use crate::domain::{ContentPoint, SurfacePoint};
use crate::surface::DrawingSurface;
use crate::transform::{AffineTransform, TransformError, TransformTracker};

/// Raw wheel input as delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Legacy wheel units: 120 per notch, positive when scrolling away
    Wheel(f64),
    /// Line counts: positive when scrolling towards the user
    Lines(f64),
}

/// Pan/zoom gesture state for one surface
#[derive(Debug, Clone)]
pub struct ViewportController {
    last_cursor: SurfacePoint,
    drag_anchor: Option<ContentPoint>,
    pressed: bool,
    dragged: bool,
    zoom_step: f64,
    wheel_divisor: f64,
}

impl ViewportController {
    /// `center` is where zoom gestures act before the pointer has moved
    pub fn new(zoom_step: f64, wheel_divisor: f64, center: SurfacePoint) -> Self {
        debug_assert!(zoom_step > 1.0);
        Self {
            last_cursor: center,
            drag_anchor: None,
            pressed: false,
            dragged: false,
            zoom_step,
            wheel_divisor,
        }
    }

    pub fn last_cursor(&self) -> SurfacePoint {
        self.last_cursor
    }

    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Pointer pressed: anchor the content point under the cursor
    pub fn begin_drag<S: DrawingSurface>(
        &mut self,
        tracker: &TransformTracker<S>,
        at: SurfacePoint,
    ) -> Result<(), TransformError> {
        self.last_cursor = at;
        self.pressed = true;
        self.dragged = false;
        self.drag_anchor = None;
        let anchor = tracker.map_point(at)?;
        log::debug!("Drag anchored at {:?}", anchor);
        self.drag_anchor = Some(anchor);
        Ok(())
    }

    /// Pointer moved: pan so the anchored content point follows the cursor
    ///
    /// Returns the content point now under the cursor.
    pub fn continue_drag<S, R>(
        &mut self,
        tracker: &mut TransformTracker<S>,
        at: SurfacePoint,
        mut redraw: R,
    ) -> Result<ContentPoint, TransformError>
    where
        S: DrawingSurface,
        R: FnMut(&mut TransformTracker<S>),
    {
        self.last_cursor = at;
        self.dragged = true;
        if let Some(anchor) = self.drag_anchor {
            let delta = tracker.map_point(at)? - anchor;
            tracker.translate(delta.x, delta.y);
            redraw(tracker);
        }
        tracker.map_point(at)
    }

    /// Pointer released: a press without movement zooms at the cursor
    ///
    /// Zooms in by one step, or out when `zoom_out` (shift) is held. Returns
    /// whether a zoom happened.
    pub fn end_drag<S, R>(
        &mut self,
        tracker: &mut TransformTracker<S>,
        zoom_out: bool,
        redraw: R,
    ) -> Result<bool, TransformError>
    where
        S: DrawingSurface,
        R: FnMut(&mut TransformTracker<S>),
    {
        let was_click = self.pressed && !self.dragged;
        self.drag_anchor = None;
        self.pressed = false;
        if !was_click {
            return Ok(false);
        }
        let clicks = if zoom_out { -1.0 } else { 1.0 };
        self.zoom_at(tracker, self.last_cursor, clicks, redraw)?;
        Ok(true)
    }

    /// Abandon a drag without zooming, e.g. when the pointer leaves
    pub fn cancel_drag(&mut self) {
        self.drag_anchor = None;
        self.pressed = false;
    }

    /// Scale by `zoom_step^clicks` keeping the content under `at` fixed
    ///
    /// `clicks` may be fractional or negative.
    pub fn zoom_at<S, R>(
        &self,
        tracker: &mut TransformTracker<S>,
        at: SurfacePoint,
        clicks: f64,
        mut redraw: R,
    ) -> Result<(), TransformError>
    where
        S: DrawingSurface,
        R: FnMut(&mut TransformTracker<S>),
    {
        let pt = tracker.map_point(at)?;
        let factor = self.zoom_step.powf(clicks);
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Zoom factor {} out of range, ignoring {} clicks", factor, clicks);
            return Err(TransformError::SingularTransform);
        }
        let zoomed = tracker
            .current_transform()
            .then_local(&AffineTransform::translation(pt.x, pt.y))
            .then_local(&AffineTransform::scaling(factor, factor))
            .then_local(&AffineTransform::translation(-pt.x, -pt.y));
        if zoomed.is_singular() {
            log::warn!("Zoom x{} would leave no inverse, ignoring", factor);
            return Err(TransformError::SingularTransform);
        }
        log::debug!("Zoom x{factor:.4} around {:?}", pt);

        // Move the fixed point to the local origin, scale, move it back
        tracker.translate(pt.x, pt.y);
        tracker.scale(factor, factor);
        tracker.translate(-pt.x, -pt.y);
        redraw(tracker);
        Ok(())
    }

    /// Convert a raw wheel delta into zoom clicks
    pub fn wheel_clicks(&self, delta: WheelDelta) -> f64 {
        match delta {
            WheelDelta::Wheel(units) => units / self.wheel_divisor,
            WheelDelta::Lines(lines) => -lines,
        }
    }

    /// Wheel turned: zoom at the last cursor position
    ///
    /// Returns whether a zoom happened (a zero delta is ignored).
    pub fn on_wheel<S, R>(
        &mut self,
        tracker: &mut TransformTracker<S>,
        delta: WheelDelta,
        redraw: R,
    ) -> Result<bool, TransformError>
    where
        S: DrawingSurface,
        R: FnMut(&mut TransformTracker<S>),
    {
        let clicks = self.wheel_clicks(delta);
        if clicks == 0.0 || !clicks.is_finite() {
            return Ok(false);
        }
        self.zoom_at(tracker, self.last_cursor, clicks, redraw)?;
        Ok(true)
    }
}
