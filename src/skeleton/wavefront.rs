//! The moving wavefront: a set of cyclic doubly-linked vertex rings.
//!
//! Each wavefront vertex travels along its angle bisector, scaled so that
//! both incident edges advance at unit orthogonal speed. Vertices live in an
//! arena owned by the context; ring links are arena indices, which keeps
//! splices cheap and gives events stable identities to hang on to.

use super::context::SkeletonContext;
use super::events::Event;
use super::graph::SkeletonNodeId;
use crate::primitives::Vec2;
use num_traits::Float;

/// Stable handle to a wavefront vertex in the context's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MovingNodeId(pub(crate) usize);

/// A wavefront vertex.
///
/// `edge_dir` and `edge_collapse_time` describe the edge to `next`; the
/// direction is stale between `leave_skeleton_node` and the next
/// `update_edge`. A collapse time of NaN marks a non-shrinking edge.
#[derive(Debug, Clone)]
pub(crate) struct MovingNode<F> {
    /// The output node this vertex currently sits on.
    pub(crate) skel: SkeletonNodeId,
    pub(crate) next: MovingNodeId,
    pub(crate) prev: MovingNodeId,
    /// Unit direction towards `next`'s output node.
    pub(crate) edge_dir: Vec2<F>,
    /// Time until the edge to `next` collapses; NaN if it never will.
    pub(crate) edge_collapse_time: F,
    /// Direction of travel scaled by speed. Points inward when shrinking,
    /// outward when growing.
    pub(crate) bisector: Vec2<F>,
    /// True at a concave corner (the bisector runs against the boundary).
    pub(crate) reflex: bool,
    pub(crate) alive: bool,
    /// Queued events that reference this vertex, kept in sync with the
    /// queue so aborts are O(degree).
    pub(crate) events: Vec<Event<F>>,
}

impl<F: Float> MovingNode<F> {
    pub(crate) fn new(id: MovingNodeId, skel: SkeletonNodeId) -> Self {
        Self {
            skel,
            next: id,
            prev: id,
            edge_dir: Vec2::zero(),
            edge_collapse_time: F::zero(),
            bisector: Vec2::zero(),
            reflex: false,
            alive: true,
            events: Vec::new(),
        }
    }
}

impl<F: Float> SkeletonContext<F> {
    /// Recomputes the bisector of `id` from its two incident edges.
    ///
    /// Returns false when the corner is degenerate: the ring is down to two
    /// vertices, a neighbour sits within epsilon, or the incident edges
    /// close an angle whose sine vanishes. A degenerate vertex gets a zeroed
    /// bisector and must be absorbed by the caller.
    pub(crate) fn calc_bisector(&mut self, id: MovingNodeId) -> bool {
        let node = &self.moving[id.0];
        let prev = node.prev;
        let next = node.next;

        if self.moving[next.0].next == id {
            // Ring of two: nothing left to bisect.
            return false;
        }

        let p = self.graph.position(node.skel);
        let v_prev = self.graph.position(self.moving[prev.0].skel) - p;
        let prev_len = v_prev.magnitude();
        if prev_len < self.epsilon {
            self.set_degenerate(id);
            return false;
        }

        let v_next = self.graph.position(self.moving[next.0].skel) - p;
        let next_len = v_next.magnitude();
        if next_len < self.epsilon {
            self.set_degenerate(id);
            return false;
        }

        let v_prev = v_prev / prev_len;
        let v_next = v_next / next_len;

        let cos = v_prev.dot(v_next);
        if cos < self.epsilon_minus_one {
            // The incident edges are anti-parallel: a flat corner moving
            // perpendicular to both at unit speed.
            let node = &mut self.moving[id.0];
            node.bisector = v_prev.perpendicular() * self.distance_sign;
            node.reflex = false;
        } else {
            // A stricter degeneracy test would also reject formerly convex
            // corners whose v_prev drifted to the left of v_next (they can
            // overshoot an approaching edge instead of collapsing), but
            // enabling it corrupts grow runs. Left off until that
            // interaction is understood.
            let b = match (v_prev + v_next).normalize() {
                Some(b) => b,
                None => {
                    self.set_degenerate(id);
                    return false;
                }
            };

            let sin = v_prev.cross(b);
            if sin.abs() < self.epsilon {
                self.set_degenerate(id);
                return false;
            }

            // Dividing by the sine scales the bisector so both incident
            // edges advance at unit orthogonal speed, whatever the angle.
            let speed = self.distance_sign / sin;
            let node = &mut self.moving[id.0];
            node.bisector = b * speed;
            node.reflex = node.bisector.dot(v_prev) < F::zero();
        }

        true
    }

    fn set_degenerate(&mut self, id: MovingNodeId) {
        let node = &mut self.moving[id.0];
        node.bisector = Vec2::zero();
        node.reflex = false;
    }

    /// Recomputes the edge direction and collapse time of the edge from
    /// `id` to its successor.
    ///
    /// Callers guarantee the edge is at least epsilon long (corners with
    /// shorter edges are absorbed as degenerate before events exist).
    pub(crate) fn update_edge(&mut self, id: MovingNodeId) {
        let node = &self.moving[id.0];
        let next = node.next;

        let edge = self.graph.position(self.moving[next.0].skel) - self.graph.position(node.skel);
        let length = edge.magnitude();
        let dir = edge / length;

        let shrink_speed = node.bisector.dot(dir) - self.moving[next.0].bisector.dot(dir);

        let node = &mut self.moving[id.0];
        node.edge_dir = dir;
        node.edge_collapse_time = if shrink_speed > F::zero() {
            length / shrink_speed
        } else {
            // Growing or parallel-advancing edge: never collapses.
            F::nan()
        };
    }

    /// Starts a new trace segment: leaves the current output node behind,
    /// creates a fresh one at the same position and links them with a
    /// mapping edge.
    ///
    /// Called whenever a vertex is about to change direction, which is what
    /// makes the output graph record the vertex's full path.
    pub(crate) fn leave_skeleton_node(&mut self, id: MovingNodeId) {
        let old = self.moving[id.0].skel;
        let new = self.graph.add_node(self.graph.position(old));
        self.graph.add_edge(old, new);
        self.moving[id.0].skel = new;
    }
}
