//! Lane box geometry
//!
//! Pure math turning the lane form into the segments the renderer strokes.
//! Everything is in image coordinates.

use crate::domain::{ContentPoint, LaneForm, Segment};

/// Segments derived from the lane form
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneOutline {
    /// The well line itself
    pub wells: Segment,
    /// Present only when the wells are far enough apart
    pub lane: Option<LaneBox>,
}

/// The offset parts of the outline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneBox {
    /// Well start → offset start → offset end → well end
    pub sides: [Segment; 3],
    /// Line parallel to the wells at the lane start offset
    pub start_line: Segment,
}

/// Unscaled normal of the well line
///
/// With `d = start - end` this is `(d.y, -d.x)`. The sign fixes which side of
/// the wells the lane is drawn on.
#[inline]
pub fn well_normal(wells: &Segment) -> ContentPoint {
    ContentPoint::new(wells.start.y - wells.end.y, wells.end.x - wells.start.x)
}

/// Shift a segment by `offset`
fn offset_segment(seg: &Segment, offset: ContentPoint) -> Segment {
    Segment::new(seg.start + offset, seg.end + offset)
}

/// Compute the outline for `form`
///
/// The lane parts are omitted when the wells are `min_width` or less apart,
/// which also keeps the normalization away from zero.
pub fn lane_outline(form: &LaneForm, min_width: f64) -> LaneOutline {
    let wells = form.wells();
    let normal = well_normal(&wells);
    let len = normal.length();
    if len <= min_width {
        return LaneOutline { wells, lane: None };
    }

    let far = normal.scaled(form.lane_length / len);
    let near = normal.scaled(form.lane_start / len);
    let far_line = offset_segment(&wells, far);

    LaneOutline {
        wells,
        lane: Some(LaneBox {
            sides: [
                Segment::new(wells.start, far_line.start),
                far_line,
                Segment::new(far_line.end, wells.end),
            ],
            start_line: offset_segment(&wells, near),
        }),
    }
}
