//! Full-frame redraw: clear, image, lanes

use super::lanes::{LaneStyle, draw_lanes};
use crate::domain::{LaneForm, SurfacePoint};
use crate::surface::{DrawingSurface, SourceImage};
use crate::transform::{TransformError, TransformTracker};

/// Redraw the whole visible surface under the tracked transform
///
/// Clears the image-space rectangle spanned by the surface corners, draws the
/// image at the image origin and then the lane annotation on top.
pub fn redraw<S: DrawingSurface>(
    tracker: &mut TransformTracker<S>,
    image: &SourceImage,
    form: &LaneForm,
    style: &LaneStyle,
) -> Result<(), TransformError> {
    let top_left = tracker.map_point(SurfacePoint::new(0.0, 0.0))?;
    let bottom_right = tracker.map_point(SurfacePoint::new(
        tracker.width() as f64,
        tracker.height() as f64,
    ))?;

    tracker.clear_rect(
        top_left.x,
        top_left.y,
        bottom_right.x - top_left.x,
        bottom_right.y - top_left.y,
    );
    tracker.draw_image(image, 0.0, 0.0);
    draw_lanes(tracker, form, style);
    Ok(())
}
