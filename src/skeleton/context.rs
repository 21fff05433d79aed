//! Mutable per-run state of the skeleton simulation.
//!
//! One context per invocation: the wavefront arena, the ordered event
//! queue, the aborted-reflex set and the clock. A context may be reused
//! across runs (`reset` clears everything), but never concurrently.
//!
//! The queue and the per-vertex event lists are kept in lockstep: an event
//! in the queue is referenced by each of its participants, and removing it
//! from the queue removes it from every participant. Breaking this
//! invariant would make aborts miss stale events and leave the ring open to
//! use-after-remove.

use super::events::{Event, EventKind};
use super::graph::{SkeletonGraph, SkeletonNodeId};
use super::wavefront::{MovingNode, MovingNodeId};
use num_traits::Float;
use std::collections::BTreeSet;

pub(crate) struct SkeletonContext<F> {
    pub(crate) graph: SkeletonGraph<F>,
    /// Wavefront vertex arena; retired vertices keep their slot with
    /// `alive` cleared, so handles stay stable for the whole run.
    pub(crate) moving: Vec<MovingNode<F>>,
    queue: BTreeSet<Event<F>>,
    /// Reflex vertices whose enqueued split was aborted. Only the nearest
    /// split candidate per reflex vertex is queued, so these must be
    /// rescanned against all eligible edges after every handled event.
    aborted_reflex: BTreeSet<MovingNodeId>,

    /// Current simulation time; never decreases.
    pub(crate) time: F,
    /// Absolute target offset; the simulation stops here.
    pub(crate) distance: F,
    /// +1 grows the polygon, -1 shrinks it.
    pub(crate) distance_sign: F,
    /// Degeneracy tolerance.
    pub(crate) epsilon: F,
    pub(crate) epsilon_minus_one: F,

    next_serial: u64,
    pub(crate) edge_events_queued: usize,
    pub(crate) split_events_queued: usize,
    pub(crate) edge_events_handled: usize,
    pub(crate) split_events_handled: usize,
}

impl<F: Float> SkeletonContext<F> {
    pub(crate) fn new() -> Self {
        let epsilon = F::from(1e-4).unwrap();
        Self {
            graph: SkeletonGraph::new(),
            moving: Vec::new(),
            queue: BTreeSet::new(),
            aborted_reflex: BTreeSet::new(),
            time: F::zero(),
            distance: F::infinity(),
            distance_sign: -F::one(),
            epsilon,
            epsilon_minus_one: epsilon - F::one(),
            next_serial: 0,
            edge_events_queued: 0,
            split_events_queued: 0,
            edge_events_handled: 0,
            split_events_handled: 0,
        }
    }

    /// Clears all collections and counters for a fresh run. The epsilon
    /// setting survives resets.
    pub(crate) fn reset(&mut self, distance: F, distance_sign: F) {
        self.distance = distance;
        self.distance_sign = distance_sign;
        self.time = F::zero();
        self.next_serial = 0;
        self.edge_events_queued = 0;
        self.split_events_queued = 0;
        self.edge_events_handled = 0;
        self.split_events_handled = 0;

        self.graph.clear();
        self.moving.clear();
        self.queue.clear();
        self.aborted_reflex.clear();
    }

    pub(crate) fn set_epsilon(&mut self, epsilon: F) {
        self.epsilon = epsilon;
        self.epsilon_minus_one = epsilon - F::one();
    }

    //
    // Wavefront vertices
    //

    pub(crate) fn create_moving_node(&mut self, skel: SkeletonNodeId) -> MovingNodeId {
        let id = MovingNodeId(self.moving.len());
        self.moving.push(MovingNode::new(id, skel));
        id
    }

    pub(crate) fn remove_moving_node(&mut self, id: MovingNodeId) {
        self.abort_node_events(id);
        self.moving[id.0].alive = false;
    }

    pub(crate) fn live_nodes(&self) -> impl Iterator<Item = MovingNodeId> + '_ {
        self.moving
            .iter()
            .enumerate()
            .filter(|(_, node)| node.alive)
            .map(|(i, _)| MovingNodeId(i))
    }

    //
    // Event queue
    //

    pub(crate) fn poll_queue(&mut self) -> Option<Event<F>> {
        self.queue.pop_first()
    }

    pub(crate) fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn enqueue(&mut self, event: Event<F>) {
        debug_assert!(event.time >= self.time);

        let added = self.queue.insert(event);
        debug_assert!(added);

        match event.kind {
            EventKind::Edge { n0, n1 } => {
                self.edge_events_queued += 1;
                self.moving[n0.0].events.push(event);
                self.moving[n1.0].events.push(event);
            }
            EventKind::Split { reflex, op0, op1 } => {
                self.split_events_queued += 1;
                self.moving[reflex.0].events.push(event);
                self.moving[op0.0].events.push(event);
                self.moving[op1.0].events.push(event);
            }
        }
    }

    /// Aborts every event referencing the invalidated vertex.
    ///
    /// Aborting an enqueued split flags its reflex vertex for the
    /// post-event recheck — a further-away candidate may now be the
    /// nearest.
    pub(crate) fn abort_node_events(&mut self, adjacent: MovingNodeId) {
        let events = std::mem::take(&mut self.moving[adjacent.0].events);
        for event in events {
            match event.kind {
                EventKind::Edge { n0, n1 } => {
                    let other = if n0 == adjacent { n1 } else { n0 };
                    self.remove_event_ref(other, event.serial);
                }
                EventKind::Split { reflex, op0, op1 } => {
                    self.aborted_reflex.insert(reflex);
                    for participant in [reflex, op0, op1] {
                        if participant != adjacent {
                            self.remove_event_ref(participant, event.serial);
                        }
                    }
                }
            }
            self.queue.remove(&event);
        }
    }

    /// Aborts every event attached to the invalidated edge from `e0` to
    /// `e1`, i.e. events referenced by both endpoints.
    pub(crate) fn abort_edge_events(&mut self, e0: MovingNodeId, e1: MovingNodeId) {
        let mut i = 0;
        while i < self.moving[e0.0].events.len() {
            let event = self.moving[e0.0].events[i];
            let shared = self.moving[e1.0]
                .events
                .iter()
                .any(|e| e.serial == event.serial);
            if !shared {
                i += 1;
                continue;
            }

            self.moving[e0.0].events.remove(i);
            self.remove_event_ref(e1, event.serial);
            if let EventKind::Split { reflex, .. } = event.kind {
                self.aborted_reflex.insert(reflex);
                self.remove_event_ref(reflex, event.serial);
            }
            self.queue.remove(&event);
        }
    }

    fn remove_event_ref(&mut self, node: MovingNodeId, serial: u64) {
        let events = &mut self.moving[node.0].events;
        let pos = events.iter().position(|e| e.serial == serial);
        debug_assert!(pos.is_some());
        if let Some(pos) = pos {
            events.swap_remove(pos);
        }
    }

    //
    // Event factories
    //

    fn new_event(&mut self, time: F, kind: EventKind) -> Event<F> {
        let serial = self.next_serial;
        self.next_serial += 1;
        Event { time, serial, kind }
    }

    pub(crate) fn try_queue_edge_event(&mut self, n0: MovingNodeId, n1: MovingNodeId) {
        let event_time = self.time + self.moving[n0.0].edge_collapse_time;

        // An invalid collapse time (NaN) fails this comparison, dropping
        // the unreachable event.
        if event_time <= self.distance {
            let event = self.new_event(event_time, EventKind::Edge { n0, n1 });
            self.enqueue(event);
        }
    }

    pub(crate) fn try_queue_split_event(
        &mut self,
        reflex: MovingNodeId,
        op0: MovingNodeId,
        op1: MovingNodeId,
    ) {
        debug_assert!(self.moving[reflex.0].reflex);

        let event_time = self.time + self.split_time(reflex, op0);
        if event_time <= self.distance {
            let event = self.new_event(event_time, EventKind::Split { reflex, op0, op1 });
            self.enqueue(event);
        }
    }

    /// Builds a split candidate and keeps whichever of it and `nearest`
    /// fires sooner. The returned candidate is not yet enqueued.
    pub(crate) fn try_replace_nearest_split_event(
        &mut self,
        reflex: MovingNodeId,
        op0: MovingNodeId,
        op1: MovingNodeId,
        nearest: Option<Event<F>>,
    ) -> Option<Event<F>> {
        debug_assert!(self.moving[reflex.0].reflex);

        let event_time = self.time + self.split_time(reflex, op0);
        if let Some(near) = nearest {
            if near.time <= event_time {
                return Some(near);
            }
        }

        if event_time <= self.distance {
            return Some(self.new_event(event_time, EventKind::Split { reflex, op0, op1 }));
        }
        nearest
    }

    /// Rescans reflex vertices whose enqueued split was aborted and
    /// enqueues a new nearest candidate for each.
    pub(crate) fn recheck_aborted_reflex_nodes(&mut self) {
        let aborted = std::mem::take(&mut self.aborted_reflex);
        for reflex in aborted {
            let node = &self.moving[reflex.0];
            if node.alive && node.reflex {
                self.create_split_events(reflex);
            }
        }
    }
}
