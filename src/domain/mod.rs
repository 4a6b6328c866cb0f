//! Pure domain types with minimal dependencies
//!
//! Geometry and lane form state. Nothing here knows about drawing surfaces.

pub mod geometry;
pub mod lanes;

pub use geometry::*;
pub use lanes::*;
