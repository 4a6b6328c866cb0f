//! Transform tracking for drawing surfaces
//!
//! This module contains:
//! - The affine matrix type and its algebra (affine.rs)
//! - The shadowing wrapper that keeps a queryable copy of a surface's
//!   cumulative transform (tracker.rs)

pub mod affine;
pub mod tracker;

pub use affine::AffineTransform;
pub use tracker::TransformTracker;

/// Failures of transform bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// `restore` called with no outstanding `save`
    StackUnderflow,
    /// The current transform has no inverse
    SingularTransform,
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::StackUnderflow => write!(f, "restore called without a matching save"),
            TransformError::SingularTransform => write!(f, "current transform is not invertible"),
        }
    }
}

impl std::error::Error for TransformError {}
