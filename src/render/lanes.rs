//! Stroking the lane outline onto a surface

use super::geometry::{LaneOutline, lane_outline};
use crate::config::ViewConfig;
use crate::domain::{LaneForm, Segment};
use crate::surface::{DrawingSurface, LineStyle};

/// Stroke styles and threshold for the lane annotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneStyle {
    /// Well line and lane box
    pub lane: LineStyle,
    /// Lane start line
    pub start: LineStyle,
    /// Minimum well separation for drawing the lane box
    pub min_width: f64,
}

impl LaneStyle {
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            lane: LineStyle {
                width: config.line_width,
                color: config.lane_color,
            },
            start: LineStyle {
                width: config.line_width,
                color: config.start_color,
            },
            min_width: config.min_lane_width,
        }
    }
}

impl Default for LaneStyle {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

fn stroke<S: DrawingSurface + ?Sized>(surface: &mut S, seg: &Segment, style: &LineStyle) {
    surface.stroke_line(seg.start, seg.end, style);
}

/// Draw the well line and, when the wells are far enough apart, the lane box
/// and lane start line under the surface's current transform
pub fn draw_lanes<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    form: &LaneForm,
    style: &LaneStyle,
) -> LaneOutline {
    let outline = lane_outline(form, style.min_width);

    stroke(surface, &outline.wells, &style.lane);
    if let Some(lane) = &outline.lane {
        for side in &lane.sides {
            stroke(surface, side, &style.lane);
        }
        stroke(surface, &lane.start_line, &style.start);
    }
    outline
}
