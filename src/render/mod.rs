//! Annotation rendering module
//!
//! This module contains:
//! - Lane box geometry shared by drawing and tests (geometry.rs)
//! - Stroking the lane annotation (lanes.rs)
//! - The full-frame redraw (frame.rs)

pub mod frame;
pub mod geometry;
pub mod lanes;

pub use frame::redraw;
pub use geometry::{LaneBox, LaneOutline, lane_outline};
pub use lanes::{LaneStyle, draw_lanes};
