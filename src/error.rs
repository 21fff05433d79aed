//! Error types for skeleton operations.

use thiserror::Error;

/// Errors raised at the boundary of the skeleton API.
///
/// These are contract violations by the caller. Numeric degeneracies that
/// arise *during* a simulation (vanishing edges, flat corners, non-finite
/// predicates) never surface as errors; they are absorbed by the wavefront's
/// degeneracy handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonError {
    /// The input polygon has fewer than three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// An infinite grow distance was requested. Only shrinking to full
    /// collapse may be unbounded; growing outward never terminates.
    #[error("cannot grow outwards to infinity")]
    InfiniteGrowth,

    /// The degeneracy tolerance is zero, negative, NaN or infinite.
    #[error("epsilon must be finite and positive")]
    InvalidEpsilon,
}
