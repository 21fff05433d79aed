//! skeletum - Straight skeletons for simple polygons.
//!
//! Sweep a polygon's edges inward (or outward) at unit speed and record the
//! traces its vertices leave behind: the result is the *straight skeleton*,
//! an event-driven alternative to arc-based offsetting that yields exact
//! insets and outsets at any distance, hip-roof geometry, and medial-axis
//! approximations.

pub mod error;
pub mod polygon;
pub mod primitives;
pub mod skeleton;

pub use error::SkeletonError;
pub use polygon::Polygon;
pub use primitives::{Point2, Vec2};
pub use skeleton::{
    inset_polygon, outset_polygon, EdgeKind, SkeletonGraph, SkeletonNodeId, StraightSkeleton,
};
