//! Annotation session management module
//!
//! This module contains:
//! - Session state tying surface, viewport and lane form together
//! - Input and feedback message types
//! - Keyboard shortcut mapping

pub mod messages;
pub mod shortcuts;
pub mod state;

pub use messages::{CursorReadout, Feedback, Input};
pub use state::GelSession;
