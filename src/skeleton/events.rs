//! Events and their handlers.
//!
//! Two things can reshape the wavefront: an edge shrinking to a point
//! (*edge-collapse*) and a reflex vertex running into a non-adjacent edge
//! (*split*). Both kinds share one lifecycle — queued with back-references
//! into their participant vertices, aborted when a participant or the
//! opposite edge is invalidated, handled when they reach the front of the
//! queue — so they are modelled as one tagged type.
//!
//! Candidate splits are validated *here, at creation*: a rejected candidate
//! never enters the queue, which keeps the queue small and avoids the
//! superfluous scaling steps (and their rounding error) that handling dead
//! events would cause.

use super::context::SkeletonContext;
use super::wavefront::MovingNodeId;
use num_traits::Float;
use std::cmp::Ordering;

/// A scheduled wavefront event.
///
/// The queue orders events by time, edge-collapses before splits on ties
/// (handling a split against an edge that is about to vanish would be
/// wrong), and finally by the per-context serial so that simultaneous
/// events of the same kind coexist in the queue deterministically.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Event<F> {
    /// Absolute simulation time; always finite once queued.
    pub(crate) time: F,
    /// Monotonically issued per-context tie-breaker; also the event's
    /// identity.
    pub(crate) serial: u64,
    pub(crate) kind: EventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    /// The edge from `n0` to `n1` collapses to a point.
    Edge { n0: MovingNodeId, n1: MovingNodeId },
    /// `reflex` meets the opposite edge from `op0` to `op1`.
    Split {
        reflex: MovingNodeId,
        op0: MovingNodeId,
        op1: MovingNodeId,
    },
}

impl EventKind {
    fn rank(&self) -> u8 {
        match self {
            EventKind::Edge { .. } => 0,
            EventKind::Split { .. } => 1,
        }
    }
}

impl<F: Float> PartialEq for Event<F> {
    fn eq(&self, other: &Self) -> bool {
        self.serial == other.serial
    }
}

impl<F: Float> Eq for Event<F> {}

impl<F: Float> PartialOrd for Event<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for Event<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Queued times are always finite (enqueue guards drop NaN), so the
        // fallback to Equal never decides an ordering on its own.
        self.time
            .partial_cmp(&other.time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.kind.rank().cmp(&other.kind.rank()))
            .then_with(|| self.serial.cmp(&other.serial))
    }
}

impl<F: Float> SkeletonContext<F> {
    /// Time until `reflex` meets the directed edge starting at `edge_start`,
    /// relative to the current simulation time. NaN when the candidate is
    /// geometrically impossible.
    pub(crate) fn split_time(&self, reflex: MovingNodeId, edge_start: MovingNodeId) -> F {
        let r = &self.moving[reflex.0];
        let e0 = &self.moving[edge_start.0];

        // Component of the reflex bisector orthogonal to the edge, plus the
        // edge's own unit-speed advance (whose sign flips with the
        // simulation direction).
        let bisector_speed = r.bisector.cross(e0.edge_dir);
        let edge_speed = -self.distance_sign;
        let approach_speed = bisector_speed + edge_speed;

        // Signed perpendicular distance of the reflex vertex to the edge.
        let reflex_relative = self.graph.position(r.skel) - self.graph.position(e0.skel);
        let side_distance = reflex_relative.cross(e0.edge_dir);
        if side_distance == F::zero() {
            // Already on the extended edge line.
            return self.can_hit(reflex, edge_start, F::zero());
        }

        // Flip the speed so it reads as the rate at which the gap closes;
        // non-positive means the two are diverging.
        let closing_speed = if side_distance > F::zero() {
            -approach_speed
        } else {
            approach_speed
        };
        if closing_speed <= F::zero() {
            return F::nan();
        }

        // One of the operands is negative; the quotient is always positive.
        let time = -side_distance / approach_speed;
        self.can_hit(reflex, edge_start, time)
    }

    /// Validates that `reflex` actually lands on the opposite edge at
    /// `time`. Returns `time` on success, NaN otherwise.
    fn can_hit(&self, reflex: MovingNodeId, edge_start: MovingNodeId, time: F) -> F {
        let e0 = &self.moving[edge_start.0];

        // The opposite edge must still exist at impact. A NaN collapse time
        // (non-shrinking edge) fails this comparison and passes the test.
        if time >= e0.edge_collapse_time {
            return F::nan();
        }

        let r = &self.moving[reflex.0];
        let future = self.graph.position(r.skel) + r.bisector * time;

        // The impact point must lie on the inside half-plane of the
        // bisectors at both ends of the edge.
        let side0 = e0.bisector.cross(future - self.graph.position(e0.skel));
        if side0 * self.distance_sign < F::zero() {
            return F::nan();
        }

        let e1 = &self.moving[e0.next.0];
        let side1 = e1.bisector.cross(future - self.graph.position(e1.skel));
        if side1 * self.distance_sign > F::zero() {
            return F::nan();
        }

        time
    }

    pub(crate) fn handle_event(&mut self, event: Event<F>) {
        match event.kind {
            EventKind::Edge { n0, n1 } => self.handle_edge_event(n0, n1),
            EventKind::Split { reflex, op0, op1 } => self.handle_split_event(reflex, op0, op1),
        }
    }

    /// The edge from `n0` to `n1` collapsed: merge the endpoints, keeping
    /// `n0`.
    fn handle_edge_event(&mut self, n0: MovingNodeId, n1: MovingNodeId) {
        debug_assert_eq!(self.moving[n0.0].next, n1);
        self.edge_events_handled += 1;

        let next = self.moving[n1.0].next;
        self.moving[n0.0].next = next;
        self.moving[next.0].prev = n0;

        if self.moving[n0.0].reflex || self.moving[n1.0].reflex {
            self.graph.mark_reflex(self.moving[n0.0].skel);
        }

        // The two converging traces continue from the shared output node.
        let old_skel = self.moving[n1.0].skel;
        let new_skel = self.moving[n0.0].skel;
        self.graph.remap_incoming(old_skel, new_skel);

        self.remove_moving_node(n1);
        self.rehandle(n0);
    }

    /// `reflex` hit the edge from `op0` to `op1`: split the ring in two at
    /// the impact point.
    fn handle_split_event(&mut self, reflex: MovingNodeId, op0: MovingNodeId, op1: MovingNodeId) {
        debug_assert_eq!(self.moving[op0.0].next, op1);
        self.split_events_handled += 1;

        self.abort_edge_events(op0, op1);
        self.graph.mark_reflex(self.moving[reflex.0].skel);

        let node0 = reflex;
        let reflex_prev = self.moving[reflex.0].prev;

        // Both halves start out on the same output node, which becomes the
        // branching vertex; each half gets its own node once rehandling
        // finds it a valid bisector.
        let node1 = self.create_moving_node(self.moving[node0.0].skel);

        // node0 keeps the original next and continues between op0 and it.
        self.moving[node0.0].prev = op0;
        self.moving[op0.0].next = node0;

        // node1 takes over the other side, between the original prev and op1.
        self.moving[node1.0].next = op1;
        self.moving[op1.0].prev = node1;
        self.moving[node1.0].prev = reflex_prev;
        self.moving[reflex_prev.0].next = node1;

        self.rehandle(node0);
        self.rehandle(node1);
    }

    /// Shared finisher after every structural change around `node`.
    ///
    /// Either settles the vertex (new bisector, new trace segment, fresh
    /// events) or keeps absorbing degenerate corners until the local ring
    /// is valid again — or gone.
    pub(crate) fn rehandle(&mut self, mut node: MovingNodeId) {
        while self.ensure_valid_ring(node) {
            if self.calc_bisector(node) {
                self.leave_skeleton_node(node);

                self.update_edge(node);
                let prev = self.moving[node.0].prev;
                self.update_edge(prev);

                self.create_events(node);
                return;
            }
            node = self.handle_degenerate_angle(node);
        }
    }

    /// Initialisation-time variant of [`Self::rehandle`]: absorbs degenerate
    /// input corners before any events exist, without touching the queue or
    /// the output graph traces.
    pub(crate) fn rehandle_init(&mut self, mut node: MovingNodeId) {
        while self.ensure_valid_ring(node) {
            if self.calc_bisector(node) {
                return;
            }
            node = self.handle_degenerate_angle(node);
        }
    }

    /// Returns true while the ring at `node` still has at least three
    /// vertices. A ring of two has degenerated to a line: connect the two
    /// traces and retire the loop.
    fn ensure_valid_ring(&mut self, node: MovingNodeId) -> bool {
        let next = self.moving[node.0].next;
        debug_assert_ne!(next, node);

        if next != self.moving[node.0].prev {
            return true;
        }

        let a = self.moving[node.0].skel;
        let b = self.moving[next.0].skel;
        self.graph.add_degeneracy_edge(a, b);

        self.remove_moving_node(node);
        self.remove_moving_node(next);
        false
    }

    /// Splices out a vertex whose corner degenerated (zero-length edge or
    /// vanishing angle), connects its trace to the nearer neighbour and
    /// returns that neighbour for continued rehandling.
    fn handle_degenerate_angle(&mut self, node: MovingNodeId) -> MovingNodeId {
        let o1 = self.moving[node.0].prev;
        let o2 = self.moving[node.0].next;
        debug_assert_eq!(self.moving[o1.0].next, node);
        debug_assert_eq!(self.moving[o2.0].prev, node);

        self.moving[o1.0].next = o2;
        self.moving[o2.0].prev = o1;

        let p = self.graph.position(self.moving[node.0].skel);
        let d1 = p.distance_squared(self.graph.position(self.moving[o1.0].skel));
        let d2 = p.distance_squared(self.graph.position(self.moving[o2.0].skel));
        let target = if d1 < d2 { o1 } else { o2 };

        self.graph
            .add_degeneracy_edge(self.moving[node.0].skel, self.moving[target.0].skel);
        self.remove_moving_node(node);
        target
    }

    /// Regenerates all events touching `node` after its bisector changed.
    fn create_events(&mut self, node: MovingNodeId) {
        self.abort_node_events(node);

        let next = self.moving[node.0].next;
        let prev = self.moving[node.0].prev;
        self.try_queue_edge_event(node, next);
        self.try_queue_edge_event(prev, node);

        self.create_all_split_events(node);
    }

    /// Walks the ring once, testing other reflex vertices against `node`'s
    /// two adjacent edges and — if `node` is itself reflex — `node` against
    /// every eligible opposite edge.
    ///
    /// Eligible pairs are separated by at least two edges along the ring:
    /// a triangle cannot be concave and a concave quadrilateral (arrowhead)
    /// needs no split, so the smallest ring with valid splits has five
    /// vertices.
    fn create_all_split_events(&mut self, node: MovingNodeId) {
        let node_next = self.moving[node.0].next;
        let node_prev = self.moving[node.0].prev;
        let mut current = self.moving[node_next.0].next;
        let end = self.moving[node_prev.0].prev;

        // Triangles and quads have no eligible pairs.
        if current == self.moving[end.0].next || current == end {
            return;
        }

        let node_is_reflex = self.moving[node.0].reflex;
        let mut nearest: Option<Event<F>> = None;

        // First step: 'current' is adjacent to node.next, so it is only
        // tested against the (prev -> node) edge.
        if self.moving[current.0].reflex {
            self.try_queue_split_event(current, node_prev, node);
        }
        if node_is_reflex {
            let current_next = self.moving[current.0].next;
            nearest = self.try_replace_nearest_split_event(node, current, current_next, nearest);
        }

        // Intermediate steps: all tests.
        current = self.moving[current.0].next;
        while current != end {
            if self.moving[current.0].reflex {
                self.try_queue_split_event(current, node, node_next);
                self.try_queue_split_event(current, node_prev, node);
            }
            if node_is_reflex {
                let current_next = self.moving[current.0].next;
                nearest =
                    self.try_replace_nearest_split_event(node, current, current_next, nearest);
            }
            current = self.moving[current.0].next;
        }

        // Last step: 'current' is adjacent to node.prev, so only the
        // (node -> next) edge remains; node itself has no eligible edge
        // here.
        if self.moving[current.0].reflex {
            self.try_queue_split_event(current, node, node_next);
        }

        if let Some(event) = nearest {
            self.enqueue(event);
        }
    }

    /// Scans all eligible opposite edges of a reflex vertex and enqueues
    /// the nearest valid split candidate, if any.
    ///
    /// Rival candidates are computed but only the minimum-time one enters
    /// the queue; if it is later aborted, the aborted-reflex recheck runs
    /// this scan again.
    pub(crate) fn create_split_events(&mut self, reflex: MovingNodeId) {
        let reflex_next = self.moving[reflex.0].next;
        let reflex_prev = self.moving[reflex.0].prev;
        let mut current = self.moving[reflex_next.0].next;
        let end = self.moving[reflex_prev.0].prev; // exclusive

        // Triangles cannot split; quads fall out of the loop condition.
        if current == self.moving[end.0].next {
            return;
        }

        let mut nearest: Option<Event<F>> = None;
        while current != end {
            let current_next = self.moving[current.0].next;
            nearest = self.try_replace_nearest_split_event(reflex, current, current_next, nearest);
            current = current_next;
        }

        if let Some(event) = nearest {
            self.enqueue(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(time: f32, kind: EventKind, serial: u64) -> Event<f32> {
        Event { time, serial, kind }
    }

    fn edge_kind() -> EventKind {
        EventKind::Edge {
            n0: MovingNodeId(0),
            n1: MovingNodeId(1),
        }
    }

    fn split_kind() -> EventKind {
        EventKind::Split {
            reflex: MovingNodeId(2),
            op0: MovingNodeId(0),
            op1: MovingNodeId(1),
        }
    }

    #[test]
    fn test_order_by_time() {
        let early = event(1.0, split_kind(), 7);
        let late = event(2.0, edge_kind(), 1);
        assert!(early < late);
    }

    #[test]
    fn test_edge_beats_split_on_time_tie() {
        let split = event(1.5, split_kind(), 0);
        let edge = event(1.5, edge_kind(), 9);
        assert!(edge < split);
    }

    #[test]
    fn test_serial_breaks_full_tie() {
        let a = event(1.5, edge_kind(), 3);
        let b = event(1.5, edge_kind(), 4);
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn test_identity_is_serial() {
        let a = event(1.0, edge_kind(), 5);
        let b = event(2.0, split_kind(), 5);
        assert_eq!(a, b);
        assert_ne!(a, event(1.0, edge_kind(), 6));
    }

    #[test]
    fn test_btreeset_pops_in_order() {
        use std::collections::BTreeSet;

        let mut queue = BTreeSet::new();
        queue.insert(event(2.0, edge_kind(), 0));
        queue.insert(event(1.0, split_kind(), 1));
        queue.insert(event(1.0, edge_kind(), 2));

        let popped: Vec<u64> = std::iter::from_fn(|| queue.pop_first())
            .map(|e| e.serial)
            .collect();
        assert_eq!(popped, vec![2, 1, 0]);
    }

    #[test]
    fn test_remove_by_identity() {
        use std::collections::BTreeSet;

        let mut queue = BTreeSet::new();
        let a = event(1.0, edge_kind(), 0);
        let b = event(1.0, edge_kind(), 1);
        queue.insert(a);
        queue.insert(b);

        assert!(queue.remove(&a));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_first().map(|e| e.serial), Some(1));
    }
}
