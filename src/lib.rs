//! Pan, zoom and lane annotation for gel images
//!
//! The crate shadows the transform of a drawing surface so surface positions
//! can be mapped back to image pixels, and builds pan/zoom gestures and a
//! perpendicular lane annotation on top of that.

pub mod config;
pub mod domain;
pub mod render;
pub mod session;
pub mod surface;
pub mod transform;
pub mod viewport;

pub use config::ViewConfig;
pub use domain::{ContentPoint, LaneCommand, LaneForm, Segment, SurfacePoint};
pub use session::GelSession;
pub use surface::{DrawingSurface, PixmapSurface, SourceImage};
pub use transform::{AffineTransform, TransformError, TransformTracker};
pub use viewport::{ViewportController, WheelDelta};
