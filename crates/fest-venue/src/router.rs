//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The conflict engine calls routing via the [`Router`] trait, so callers can
//! swap in another search (A*, a precomputed table) without touching the
//! schedule code.  The default [`DijkstraRouter`] is a plain single-source
//! search run once per query.
//!
//! # Cost units
//!
//! Edge costs and totals are whole **milliseconds** (`u64`) so that sums are
//! exact and comparisons between alternative paths never suffer float drift.
//! `Route::travel_secs` rounds up to whole seconds.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use fest_core::VenueId;

use crate::graph::VenueGraph;
use crate::{VenueError, VenueResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the venues walked through, origin first,
/// and the total walking cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Venues in walking order, from origin to destination inclusive.
    pub venues: Vec<VenueId>,
    /// Total cost in milliseconds.
    pub total_ms: u64,
}

impl Route {
    /// Total travel time in whole seconds, rounded up so nobody is planned
    /// to arrive early.
    pub fn travel_secs(&self) -> i64 {
        self.total_ms.div_ceil(1_000) as i64
    }

    /// `true` if origin and destination are the same venue.
    pub fn is_trivial(&self) -> bool {
        self.venues.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
pub trait Router: Send + Sync {
    /// Compute the cheapest walking route from `from` to `to` at
    /// `walking_speed_kmh`.
    ///
    /// `from == to` yields a one-venue route with zero cost.  An unreachable
    /// destination yields [`VenueError::NoRoute`].
    fn route(
        &self,
        graph: &VenueGraph,
        from: VenueId,
        to: VenueId,
        walking_speed_kmh: f64,
    ) -> VenueResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the venue graph.
///
/// Edge cost is `distance / speed + delay`; negative-distance edges are
/// skipped.  The frontier is ordered by `(cost, venue name)` so equal-cost
/// alternatives always resolve the same way.  Distances and predecessors
/// are scratch vectors allocated per query.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &VenueGraph,
        from: VenueId,
        to: VenueId,
        walking_speed_kmh: f64,
    ) -> VenueResult<Route> {
        dijkstra(graph, from, to, walking_speed_kmh)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(
    graph: &VenueGraph,
    from: VenueId,
    to: VenueId,
    speed_kmh: f64,
) -> VenueResult<Route> {
    let n = graph.len();
    for id in [from, to] {
        if id.index() >= n {
            return Err(VenueError::VenueNotFound(id));
        }
    }
    if from == to {
        return Ok(Route { venues: vec![from], total_ms: 0 });
    }

    let ranks = graph.name_ranks();
    // dist[v] = best known cost (ms) to reach v; None = unreached.
    let mut dist: Vec<Option<u64>> = vec![None; n];
    // prev[v] = venue that reached v; INVALID for unreached nodes and origin.
    let mut prev = vec![VenueId::INVALID; n];

    dist[from.index()] = Some(0);

    // Min-heap: (cost, name rank, venue).  The name rank breaks cost ties
    // deterministically.
    let mut heap: BinaryHeap<Reverse<(u64, u32, VenueId)>> = BinaryHeap::new();
    heap.push(Reverse((0, ranks[from.index()], from)));

    while let Some(Reverse((cost, _, venue))) = heap.pop() {
        if venue == to {
            let route = reconstruct(&prev, from, to, cost);
            debug!(from = %from, to = %to, total_ms = cost, hops = route.venues.len() - 1, "route found");
            return Ok(route);
        }

        // Skip stale heap entries.
        if dist[venue.index()].is_some_and(|best| cost > best) {
            continue;
        }

        for (neighbor, edge) in graph.out_edges(venue) {
            if !edge.is_passable() {
                continue;
            }
            let new_cost = cost.saturating_add(edge.cost_ms(speed_kmh));
            if dist[neighbor.index()].is_none_or(|best| new_cost < best) {
                dist[neighbor.index()] = Some(new_cost);
                prev[neighbor.index()] = venue;
                heap.push(Reverse((new_cost, ranks[neighbor.index()], neighbor)));
            }
        }
    }

    debug!(from = %from, to = %to, "no route");
    Err(VenueError::NoRoute { from, to })
}

fn reconstruct(prev: &[VenueId], from: VenueId, to: VenueId, total_ms: u64) -> Route {
    let mut venues = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        if cur == VenueId::INVALID {
            break;
        }
        venues.push(cur);
    }
    venues.reverse();
    Route { venues, total_ms }
}
