//! Event-driven straight skeleton computation.
//!
//! The polygon's edges sweep inward (or outward) at unit speed; vertices
//! ride their angle bisectors until an *edge-collapse* or *split* event
//! reshapes the wavefront. A priority queue orders the events, and the
//! traces every vertex leaves behind form the output graph. Evaluating the
//! run at a finite distance yields the inset or outset polygon; running to
//! full collapse yields the complete skeleton.
//!
//! # Example
//!
//! ```
//! use skeletum::{inset_polygon, Point2, Polygon};
//!
//! let rectangle = Polygon::new(vec![
//!     Point2::new(0.0_f32, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 3.0),
//!     Point2::new(0.0, 3.0),
//! ]);
//!
//! let loops = inset_polygon(&rectangle, 1.0).unwrap();
//! assert_eq!(loops.len(), 1);
//! assert_eq!(loops[0].len(), 4);
//! ```

mod context;
mod events;
mod graph;
mod wavefront;

pub use graph::{EdgeKind, SkeletonGraph, SkeletonNodeId};

use crate::error::SkeletonError;
use crate::polygon::Polygon;
use crate::primitives::Point2;
use context::SkeletonContext;
use num_traits::Float;
use tracing::{debug, warn};
use wavefront::MovingNodeId;

/// Straight-skeleton engine for a single boundary loop.
///
/// Configure the target offset with [`set_distance`](Self::set_distance)
/// (negative shrinks, positive grows; the default shrinks to full
/// collapse), then run [`apply`](Self::apply). The engine may be reused:
/// every run starts from a clean slate, and results stay valid until the
/// next run.
///
/// # Example
///
/// ```
/// use skeletum::{Point2, Polygon, StraightSkeleton};
///
/// let square = Polygon::new(vec![
///     Point2::new(0.0_f32, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(0.0, 4.0),
/// ]);
///
/// // The default distance shrinks to full collapse.
/// let mut skeleton = StraightSkeleton::new();
/// skeleton.apply(&square).unwrap();
///
/// // Every corner's trace ends at the centre.
/// for &start in skeleton.start_nodes() {
///     for leaf in skeleton.graph().mapping_leaves(start) {
///         let p = skeleton.position(leaf);
///         assert!((p.x - 2.0).abs() < 1e-3 && (p.y - 2.0).abs() < 1e-3);
///     }
/// }
/// ```
pub struct StraightSkeleton<F> {
    /// Absolute target offset.
    offset_distance: F,
    /// +1 grows, -1 shrinks.
    distance_sign: F,
    start_nodes: Vec<SkeletonNodeId>,
    ctx: SkeletonContext<F>,
}

impl<F: Float> StraightSkeleton<F> {
    /// Creates an engine with the default configuration: shrink to full
    /// collapse, epsilon 1e-4.
    pub fn new() -> Self {
        Self {
            offset_distance: F::infinity(),
            distance_sign: -F::one(),
            start_nodes: Vec::new(),
            ctx: SkeletonContext::new(),
        }
    }

    /// Sets the signed distance by which the edges move.
    ///
    /// Positive grows the polygon, negative shrinks it. Negative infinity
    /// requests the full skeleton (bounded internally by the bounding-box
    /// diagonal); positive infinity is rejected, since an outward sweep
    /// never terminates.
    pub fn set_distance(&mut self, distance: F) -> Result<(), SkeletonError> {
        if distance == F::infinity() {
            return Err(SkeletonError::InfiniteGrowth);
        }
        self.distance_sign = distance.signum();
        self.offset_distance = distance.abs();
        Ok(())
    }

    /// Sets the tolerance used by the degeneracy tests. Larger values can
    /// absorb more numerical noise in near-degenerate inputs.
    pub fn set_epsilon(&mut self, epsilon: F) -> Result<(), SkeletonError> {
        if !(epsilon > F::zero()) || !epsilon.is_finite() {
            return Err(SkeletonError::InvalidEpsilon);
        }
        self.ctx.set_epsilon(epsilon);
        Ok(())
    }

    /// Runs the simulation on a simple polygon.
    ///
    /// Vertices must be supplied counter-clockwise for a shrink (interior
    /// on the left of each directed edge). Runs to completion before
    /// returning; query the results afterwards.
    pub fn apply(&mut self, polygon: &Polygon<F>) -> Result<(), SkeletonError> {
        if polygon.len() < 3 {
            return Err(SkeletonError::TooFewVertices(polygon.len()));
        }
        debug!(vertices = polygon.len(), "starting skeleton run");

        self.ctx.reset(self.offset_distance, self.distance_sign);
        let diagonal = polygon
            .bounding_box()
            .map(|(min, max)| (max - min).magnitude())
            .unwrap_or_else(F::zero);

        self.create_nodes(polygon);

        // Full collapse requested: no wavefront point can travel further
        // than about half the bounding-box diagonal, so bounding the run
        // there keeps the queue free of unreachable events.
        if self.distance_sign < F::zero() && self.offset_distance == F::infinity() {
            self.ctx.distance = diagonal * F::from(0.51).unwrap();
        }

        if self.ctx.distance != F::zero() {
            self.init_bisectors();
            self.init_events();
            debug!(queued = self.ctx.queue_len(), "events initialised");
            self.run_loop();
        }
        Ok(())
    }

    fn create_nodes(&mut self, polygon: &Polygon<F>) {
        self.start_nodes.clear();

        let n = polygon.len();
        for &p in &polygon.vertices {
            let skel = self.ctx.graph.add_node(p);
            self.start_nodes.push(skel);
            self.ctx.create_moving_node(skel);
        }

        // The arena was freshly reset, so vertex i sits in slot i.
        for i in 0..n {
            self.ctx.moving[i].next = MovingNodeId((i + 1) % n);
            self.ctx.moving[i].prev = MovingNodeId((i + n - 1) % n);
        }
    }

    fn init_bisectors(&mut self) {
        let mut degenerates = Vec::new();
        let nodes: Vec<_> = self.ctx.live_nodes().collect();
        for node in nodes {
            if !self.ctx.calc_bisector(node) {
                degenerates.push(node);
            }
        }

        // Absorb degenerate corners only after every bisector had its first
        // pass; removal may already have taken a later entry with it.
        for node in degenerates {
            if self.ctx.moving[node.0].alive {
                self.ctx.rehandle_init(node);
            }
        }
    }

    fn init_events(&mut self) {
        let mut reflex_nodes = Vec::new();
        let nodes: Vec<_> = self.ctx.live_nodes().collect();
        for node in nodes {
            self.ctx.leave_skeleton_node(node);

            self.ctx.update_edge(node);
            let next = self.ctx.moving[node.0].next;
            self.ctx.try_queue_edge_event(node, next);

            if self.ctx.moving[node.0].reflex {
                reflex_nodes.push(node);
            }
        }

        // Split scans read edge directions, so every edge must be
        // initialised first.
        for reflex in reflex_nodes {
            self.ctx.create_split_events(reflex);
        }
    }

    fn run_loop(&mut self) {
        self.ctx.time = F::zero();

        while let Some(event) = self.ctx.poll_queue() {
            self.scale(event.time - self.ctx.time);
            self.ctx.time = event.time;
            self.ctx.handle_event(event);
            self.ctx.recheck_aborted_reflex_nodes();
        }

        let remaining = self.ctx.distance - self.ctx.time;
        self.scale(remaining);
        debug!(
            edge_events_queued = self.ctx.edge_events_queued,
            split_events_queued = self.ctx.split_events_queued,
            edge_events_handled = self.ctx.edge_events_handled,
            split_events_handled = self.ctx.split_events_handled,
            "skeleton run finished"
        );
    }

    /// Advances every live vertex along its bisector. The bisector carries
    /// the full speed, so a plain scaled translation is exact.
    fn scale(&mut self, dist: F) {
        if dist == F::zero() {
            return;
        }

        for i in 0..self.ctx.moving.len() {
            if !self.ctx.moving[i].alive {
                continue;
            }
            let skel = self.ctx.moving[i].skel;
            let offset = self.ctx.moving[i].bisector * dist;
            self.ctx.graph.translate(skel, offset);

            if !self.ctx.graph.position(skel).is_finite() {
                // Catastrophic precision loss; not fatal, downstream
                // consumers clamp.
                warn!(node = i, "non-finite wavefront position after advance");
            }
        }
    }

    //
    // Results
    //

    /// The output nodes corresponding 1-to-1 (order preserved) to the input
    /// vertices.
    pub fn start_nodes(&self) -> &[SkeletonNodeId] {
        &self.start_nodes
    }

    /// The output nodes currently under each surviving wavefront vertex.
    /// Empty after a full collapse.
    pub fn end_nodes(&self) -> Vec<SkeletonNodeId> {
        self.ctx
            .live_nodes()
            .map(|id| self.ctx.moving[id.0].skel)
            .collect()
    }

    /// The surviving wavefront as closed loops, each in ring order.
    pub fn node_loops(&self) -> Vec<Vec<SkeletonNodeId>> {
        let mut remaining: std::collections::BTreeSet<MovingNodeId> =
            self.ctx.live_nodes().collect();
        let mut loops = Vec::new();

        while let Some(&start) = remaining.iter().next() {
            let mut ring = Vec::new();
            let mut current = start;
            loop {
                ring.push(self.ctx.moving[current.0].skel);
                remaining.remove(&current);
                current = self.ctx.moving[current.0].next;
                if current == start {
                    break;
                }
            }
            loops.push(ring);
        }

        loops
    }

    /// The position of an output node.
    pub fn position(&self, node: SkeletonNodeId) -> Point2<F> {
        self.ctx.graph.position(node)
    }

    /// The output graph, traversable from each start node via mapping and
    /// degeneracy edges.
    pub fn graph(&self) -> &SkeletonGraph<F> {
        &self.ctx.graph
    }
}

impl<F: Float> Default for StraightSkeleton<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shrinks a polygon by `distance` and returns the resulting loops.
///
/// The wavefront may split into several loops, or vanish entirely (empty
/// result) when the distance exceeds the polygon's collapse depth.
pub fn inset_polygon<F: Float>(
    polygon: &Polygon<F>,
    distance: F,
) -> Result<Vec<Polygon<F>>, SkeletonError> {
    offset_loops(polygon, -distance)
}

/// Grows a polygon by `distance` and returns the resulting loops.
pub fn outset_polygon<F: Float>(
    polygon: &Polygon<F>,
    distance: F,
) -> Result<Vec<Polygon<F>>, SkeletonError> {
    offset_loops(polygon, distance)
}

fn offset_loops<F: Float>(
    polygon: &Polygon<F>,
    distance: F,
) -> Result<Vec<Polygon<F>>, SkeletonError> {
    let mut skeleton = StraightSkeleton::new();
    skeleton.set_distance(distance)?;
    skeleton.apply(polygon)?;

    Ok(skeleton
        .node_loops()
        .into_iter()
        .map(|ring| {
            Polygon::new(
                ring.into_iter()
                    .map(|node| skeleton.position(node))
                    .collect(),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn polygon(points: &[(f32, f32)]) -> Polygon<f32> {
        Polygon::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn assert_near(p: Point2<f32>, x: f32, y: f32, tolerance: f32) {
        assert!(
            (p.x - x).abs() < tolerance && (p.y - y).abs() < tolerance,
            "expected ({}, {}), got ({}, {})",
            x,
            y,
            p.x,
            p.y
        );
    }

    /// Every directed edge must be recorded identically on both endpoints.
    fn assert_graph_symmetry(graph: &SkeletonGraph<f32>) {
        for id in graph.ids() {
            for (target, kind) in graph.outgoing(id) {
                let back = graph
                    .incoming(target)
                    .find(|&(source, _)| source == id)
                    .map(|(_, k)| k);
                assert_eq!(back, Some(kind));
            }
            for (source, kind) in graph.incoming(id) {
                let forward = graph
                    .outgoing(source)
                    .find(|&(target, _)| target == id)
                    .map(|(_, k)| k);
                assert_eq!(forward, Some(kind));
            }
        }
    }

    #[test]
    fn test_square_full_collapse() {
        let square = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.apply(&square).unwrap();

        // Convex: the four shrinking edges are the only events.
        assert_eq!(skeleton.ctx.edge_events_queued, 4);
        assert_eq!(skeleton.ctx.split_events_queued, 0);

        // The wavefront is gone and every corner's trace ends at the
        // centre.
        assert!(skeleton.end_nodes().is_empty());
        assert_eq!(skeleton.start_nodes().len(), 4);
        for &start in skeleton.start_nodes() {
            let leaves = skeleton.graph().mapping_leaves(start);
            assert!(!leaves.is_empty());
            for leaf in leaves {
                assert_near(skeleton.position(leaf), 2.0, 2.0, 1e-3);
            }
        }

        assert_graph_symmetry(skeleton.graph());
    }

    #[test]
    fn test_rectangle_inset() {
        let rectangle = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.set_distance(-1.0).unwrap();
        skeleton.apply(&rectangle).unwrap();

        let loops = skeleton.node_loops();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);

        let expected = [(1.0, 1.0), (3.0, 1.0), (3.0, 2.0), (1.0, 2.0)];
        for (node, &(x, y)) in loops[0].iter().zip(&expected) {
            assert_near(skeleton.position(*node), x, y, 1e-3);
        }
    }

    #[test]
    fn test_l_shape_full_collapse_splits_once() {
        // One reflex vertex at (7, 8). Its wavefront trace hits the left
        // edge after travelling 3.5 units, just before the top edge
        // finishes collapsing, and the polygon separates into two loops
        // that then collapse independently.
        let l_shape = polygon(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 8.0),
            (7.0, 8.0),
            (7.0, 10.0),
            (0.0, 10.0),
        ]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.apply(&l_shape).unwrap();

        assert_eq!(skeleton.ctx.split_events_handled, 1);
        assert!(skeleton.end_nodes().is_empty());

        // The split marks the reflex vertex's output node.
        let reflex_nodes = skeleton
            .graph()
            .ids()
            .filter(|&id| skeleton.graph().is_reflex(id))
            .count();
        assert!(reflex_nodes >= 1);

        // Every initial vertex's trace terminates somewhere finite.
        for &start in skeleton.start_nodes() {
            for leaf in skeleton.graph().mapping_leaves(start) {
                assert!(skeleton.position(leaf).is_finite());
            }
        }

        assert_graph_symmetry(skeleton.graph());
    }

    #[test]
    fn test_grow_square() {
        let square = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.set_distance(1.0).unwrap();
        skeleton.apply(&square).unwrap();

        // Nothing shrinks when growing a convex polygon.
        assert_eq!(skeleton.ctx.edge_events_queued, 0);
        assert_eq!(skeleton.ctx.split_events_queued, 0);

        let loops = skeleton.node_loops();
        assert_eq!(loops.len(), 1);
        let expected = [(-1.0, -1.0), (5.0, -1.0), (5.0, 5.0), (-1.0, 5.0)];
        for (node, &(x, y)) in loops[0].iter().zip(&expected) {
            assert_near(skeleton.position(*node), x, y, 1e-3);
        }
    }

    #[test]
    fn test_arrowhead_has_no_split_events() {
        // Concave quadrilateral: the reflex vertex has no eligible
        // opposite edge, so the collapse happens through edge events
        // alone.
        let arrowhead = polygon(&[(0.0, 0.0), (4.0, 0.0), (2.0, 1.0), (2.0, 4.0)]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.apply(&arrowhead).unwrap();

        assert_eq!(skeleton.ctx.split_events_queued, 0);
        assert!(skeleton.end_nodes().is_empty());
    }

    #[test]
    fn test_sliver_terminates_through_ring_collapse() {
        // A 4 x 0.0001 sliver: one short edge collapses within the first
        // event, and the rest degenerates into a ring of two.
        let sliver = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 0.0001), (0.0, 0.0001)]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.apply(&sliver).unwrap();

        assert_eq!(skeleton.ctx.split_events_queued, 0);
        assert!(skeleton.end_nodes().is_empty());
        assert_graph_symmetry(skeleton.graph());
    }

    #[test]
    fn test_convex_polygons_never_split() {
        let hexagon = polygon(&[
            (2.0, 0.0),
            (4.0, 1.0),
            (4.0, 3.0),
            (2.0, 4.0),
            (0.0, 3.0),
            (0.0, 1.0),
        ]);
        assert!(hexagon.is_convex());

        let mut skeleton = StraightSkeleton::new();
        skeleton.apply(&hexagon).unwrap();
        assert_eq!(skeleton.ctx.split_events_queued, 0);

        let triangle = polygon(&[(0.0, 0.0), (3.0, 0.0), (1.0, 2.0)]);
        skeleton.apply(&triangle).unwrap();
        assert_eq!(skeleton.ctx.split_events_queued, 0);
    }

    #[test]
    fn test_split_creates_two_surviving_loops() {
        // A wide slab with a deep V-notch from the top. The notch tip is
        // reflex and hits the bottom edge early, cutting the wavefront in
        // two; at distance 1 both halves are still alive.
        let notched = polygon(&[
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 6.0),
            (11.0, 6.0),
            (10.0, 1.0),
            (9.0, 6.0),
            (0.0, 6.0),
        ]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.set_distance(-1.0).unwrap();
        skeleton.apply(&notched).unwrap();

        assert_eq!(skeleton.ctx.split_events_handled, 1);
        let loops = skeleton.node_loops();
        assert_eq!(loops.len(), 2);
        for ring in &loops {
            assert!(ring.len() >= 3);
        }

        // Ring invariants hold for the survivors, and no stale event
        // back-references remain after the queue drained.
        for id in skeleton.ctx.live_nodes() {
            let node = &skeleton.ctx.moving[id.0];
            assert_eq!(skeleton.ctx.moving[node.next.0].prev, id);
            assert_eq!(skeleton.ctx.moving[node.prev.0].next, id);
        }
        for node in &skeleton.ctx.moving {
            assert!(node.events.is_empty());
        }
    }

    #[test]
    fn test_inset_area_shrinks_monotonically() {
        let l_shape = polygon(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 8.0),
            (7.0, 8.0),
            (7.0, 10.0),
            (0.0, 10.0),
        ]);

        let mut previous = l_shape.area();
        for distance in [0.5, 1.0, 1.5, 2.0] {
            let loops = inset_polygon(&l_shape, distance).unwrap();
            let area: f32 = loops.iter().map(|p| p.area()).sum();
            assert!(
                area < previous,
                "area {} did not shrink below {} at distance {}",
                area,
                previous,
                distance
            );
            previous = area;
        }
    }

    #[test]
    fn test_inset_twice_matches_single_inset() {
        let rectangle = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)]);

        let once = inset_polygon(&rectangle, 1.0).unwrap();
        let halfway = inset_polygon(&rectangle, 0.5).unwrap();
        assert_eq!(halfway.len(), 1);
        let twice = inset_polygon(&halfway[0], 0.5).unwrap();

        assert_eq!(once.len(), 1);
        assert_eq!(twice.len(), 1);
        for (a, b) in once[0].vertices.iter().zip(&twice[0].vertices) {
            assert_near(*a, b.x, b.y, 1e-3);
        }
    }

    #[test]
    fn test_outset_polygon() {
        let square = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);

        let loops = outset_polygon(&square, 1.0).unwrap();
        assert_eq!(loops.len(), 1);
        assert_relative_eq!(loops[0].area(), 36.0, epsilon = 1e-3);
    }

    #[test]
    fn test_full_collapse_leaves_no_loops() {
        let square = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let loops = inset_polygon(&square, f32::INFINITY).unwrap();
        assert!(loops.is_empty());
    }

    #[test]
    fn test_zero_distance_returns_input() {
        let triangle = polygon(&[(0.0, 0.0), (3.0, 0.0), (1.0, 2.0)]);
        let loops = inset_polygon(&triangle, 0.0).unwrap();
        assert_eq!(loops.len(), 1);
        for (a, b) in loops[0].vertices.iter().zip(&triangle.vertices) {
            assert_near(*a, b.x, b.y, 1e-6);
        }
    }

    #[test]
    fn test_engine_reuse_is_deterministic() {
        let l_shape = polygon(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 8.0),
            (7.0, 8.0),
            (7.0, 10.0),
            (0.0, 10.0),
        ]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.set_distance(-2.0).unwrap();

        skeleton.apply(&l_shape).unwrap();
        let first: Vec<_> = skeleton
            .node_loops()
            .into_iter()
            .map(|ring| {
                ring.into_iter()
                    .map(|n| skeleton.position(n))
                    .collect::<Vec<_>>()
            })
            .collect();

        skeleton.apply(&l_shape).unwrap();
        let second: Vec<_> = skeleton
            .node_loops()
            .into_iter()
            .map(|ring| {
                ring.into_iter()
                    .map(|n| skeleton.position(n))
                    .collect::<Vec<_>>()
            })
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_f64_support() {
        let square: Polygon<f64> = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 3.0),
            Point2::new(0.0, 3.0),
        ]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.set_distance(-1.0).unwrap();
        skeleton.apply(&square).unwrap();

        let loops = skeleton.node_loops();
        assert_eq!(loops.len(), 1);
        let p = skeleton.position(loops[0][0]);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_too_few_vertices_rejected() {
        let degenerate = polygon(&[(0.0, 0.0), (1.0, 0.0)]);
        let mut skeleton = StraightSkeleton::new();
        assert_eq!(
            skeleton.apply(&degenerate),
            Err(SkeletonError::TooFewVertices(2))
        );
    }

    #[test]
    fn test_infinite_growth_rejected() {
        let mut skeleton: StraightSkeleton<f32> = StraightSkeleton::new();
        assert_eq!(
            skeleton.set_distance(f32::INFINITY),
            Err(SkeletonError::InfiniteGrowth)
        );
        // Negative infinity (full collapse) stays allowed.
        assert!(skeleton.set_distance(f32::NEG_INFINITY).is_ok());
    }

    #[test]
    fn test_invalid_epsilon_rejected() {
        let mut skeleton: StraightSkeleton<f32> = StraightSkeleton::new();
        assert_eq!(skeleton.set_epsilon(0.0), Err(SkeletonError::InvalidEpsilon));
        assert_eq!(
            skeleton.set_epsilon(f32::NAN),
            Err(SkeletonError::InvalidEpsilon)
        );
        assert!(skeleton.set_epsilon(1e-3).is_ok());
    }

    #[test]
    fn test_collinear_input_vertex_is_absorbed() {
        // The middle vertex of the bottom edge is flat; it moves
        // perpendicular to the edge and its trace merges into the
        // skeleton without disturbing the collapse.
        let square = polygon(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
        ]);

        let mut skeleton = StraightSkeleton::new();
        skeleton.apply(&square).unwrap();

        assert!(skeleton.end_nodes().is_empty());
        for &start in skeleton.start_nodes() {
            for leaf in skeleton.graph().mapping_leaves(start) {
                assert!(skeleton.position(leaf).is_finite());
            }
        }
    }
}
