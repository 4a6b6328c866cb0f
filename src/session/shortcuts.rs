use crate::domain::LaneCommand;
use crate::session::messages::Input;

/// Map a typed character to a session input
///
/// Only the digit shortcuts `1`..`4` are bound, and only while the drawing
/// surface has focus (the host decides what counts as focus).
pub fn handle_key_event(key: char, surface_focused: bool) -> Option<Input> {
    if !surface_focused {
        return None;
    }
    LaneCommand::from_key(key).map(Input::Lane)
}
