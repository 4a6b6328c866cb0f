//! Input messages for a lane annotation session
//!
//! The host translates its raw platform events into these before handing
//! them to [`super::state::GelSession::handle`].

use crate::domain::{LaneCommand, SurfacePoint};
use crate::viewport::WheelDelta;

/// Normalized user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Primary button pressed at a surface position
    PointerDown(SurfacePoint),
    /// Pointer moved to a surface position
    PointerMove(SurfacePoint),
    /// Primary button released; `shift` selects zoom out for clicks
    PointerUp { shift: bool },
    /// Pointer left the surface mid-gesture
    PointerLeave,
    /// Wheel turned
    Wheel(WheelDelta),
    /// Lane form command (from a shortcut or a button)
    Lane(LaneCommand),
}

/// What the host should update after an input was handled
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Feedback {
    /// New cursor readout, rounded to image pixels
    pub cursor: Option<CursorReadout>,
    /// The lane form changed and its fields should be refreshed
    pub form_changed: bool,
    /// The surface was redrawn
    pub redrawn: bool,
}

/// Cursor position in image pixels, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorReadout {
    pub x: i64,
    pub y: i64,
}
