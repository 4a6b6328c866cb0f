//! Lane form state: the two well endpoints and the two lane lengths
//!
//! All coordinates are image (content) coordinates. Lengths are whole pixels,
//! matching the rounded cursor readout they are measured from.

use serde::{Deserialize, Serialize};

use super::geometry::{ContentPoint, Segment};

/// Numeric lane parameters edited by the host
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LaneForm {
    pub well_x1: f64,
    pub well_y1: f64,
    pub well_x2: f64,
    pub well_y2: f64,
    /// Perpendicular distance from the wells to the end of the lane
    pub lane_length: f64,
    /// Perpendicular distance from the wells to where the lane starts
    pub lane_start: f64,
}

/// Commands that copy the cursor readout into the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneCommand {
    /// Set the first well endpoint to the cursor
    SetWellStart,
    /// Set the second well endpoint to the cursor
    SetWellEnd,
    /// Measure the lane length as the cursor's distance to the well line
    MeasureLaneLength,
    /// Measure the lane start as the cursor's distance to the well line
    MeasureLaneStart,
}

impl LaneCommand {
    /// Map the digit shortcuts `1`..`4` to commands
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(LaneCommand::SetWellStart),
            '2' => Some(LaneCommand::SetWellEnd),
            '3' => Some(LaneCommand::MeasureLaneLength),
            '4' => Some(LaneCommand::MeasureLaneStart),
            _ => None,
        }
    }
}

impl LaneForm {
    pub fn well_start(&self) -> ContentPoint {
        ContentPoint::new(self.well_x1, self.well_y1)
    }

    pub fn well_end(&self) -> ContentPoint {
        ContentPoint::new(self.well_x2, self.well_y2)
    }

    /// The reference line through both wells
    pub fn wells(&self) -> Segment {
        Segment::new(self.well_start(), self.well_end())
    }

    pub fn set_well_start(&mut self, p: ContentPoint) {
        self.well_x1 = p.x;
        self.well_y1 = p.y;
    }

    pub fn set_well_end(&mut self, p: ContentPoint) {
        self.well_x2 = p.x;
        self.well_y2 = p.y;
    }

    /// Apply a command using `cursor` (already rounded) as the measured point
    pub fn apply(&mut self, command: LaneCommand, cursor: ContentPoint) {
        match command {
            LaneCommand::SetWellStart => self.set_well_start(cursor),
            LaneCommand::SetWellEnd => self.set_well_end(cursor),
            LaneCommand::MeasureLaneLength => {
                self.lane_length = self.wells().distance_to(cursor).round();
            }
            LaneCommand::MeasureLaneStart => {
                self.lane_start = self.wells().distance_to(cursor).round();
            }
        }
        log::debug!("Lane form after {:?}: {:?}", command, self);
    }
}
