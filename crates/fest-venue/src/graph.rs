//! Venue graph representation.
//!
//! # Data layout
//!
//! Venues live in an arena indexed by `VenueId`; a name index maps each
//! venue name to its handle.  Every venue owns its outgoing travel edges in a
//! `BTreeMap<VenueId, TravelEdge>`, so there is at most one edge per ordered
//! pair and iteration order is stable.
//!
//! The graph is filled line by line while the state text is decoded, so
//! edges are inserted one at a time and the precedence rule (authored beats
//! phantom) is enforced on insert.
//!
//! # Phantom edges
//!
//! Authors usually enter a path once.  [`VenueGraph::generate_phantom_reverse_edges`]
//! fills in the missing reverse of each authored edge.  A one-way path is
//! expressed by authoring the unwanted direction with a negative distance;
//! that edge blocks the phantom and is itself impassable.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::info;

use fest_core::VenueId;

// ── TravelEdge ────────────────────────────────────────────────────────────────

/// A directed walking connection between two venues.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelEdge {
    /// Walking distance in metres.  Negative means impassable.
    pub distance_m: f64,
    /// Worst-case extra delay in seconds (traffic lights, stairs, crowds).
    pub delay_secs: f64,
    /// Free-text directions shown alongside the path.
    pub notes: String,
    /// `true` if synthesized as the reverse of an authored edge.
    pub phantom: bool,
}

impl TravelEdge {
    /// An authored edge.
    pub fn new(distance_m: f64, delay_secs: f64, notes: impl Into<String>) -> Self {
        Self { distance_m, delay_secs, notes: notes.into(), phantom: false }
    }

    #[inline]
    pub fn is_passable(&self) -> bool {
        self.distance_m >= 0.0
    }

    /// Walking cost in milliseconds at `speed_kmh`.
    ///
    /// One metre at `v` km/h takes `3600 / v` ms.
    #[inline]
    pub fn cost_ms(&self, speed_kmh: f64) -> u64 {
        let walk = self.distance_m * 3_600.0 / speed_kmh;
        (walk + self.delay_secs.max(0.0) * 1_000.0).round().max(0.0) as u64
    }

    fn phantom_of(&self) -> Self {
        Self { phantom: true, ..self.clone() }
    }
}

/// What [`VenueGraph::add_edge`] did with the offered edge.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EdgeInsert {
    /// No edge existed for the pair.
    Inserted,
    /// An existing edge was overwritten.
    Replaced,
    /// A phantom was offered where an authored edge exists; nothing changed.
    Kept,
}

// ── Venue ─────────────────────────────────────────────────────────────────────

/// A named place: a stage hosting events, or a street corner used only as a
/// path waypoint.
#[derive(Clone, Debug)]
pub struct Venue {
    pub name: String,
    pub url: Option<String>,
    /// Number of events held here.
    pub performance_count: u32,
    edges: BTreeMap<VenueId, TravelEdge>,
}

impl Venue {
    fn new(name: String) -> Self {
        Self { name, url: None, performance_count: 0, edges: BTreeMap::new() }
    }

    /// Outgoing edges in destination-handle order.
    pub fn edges(&self) -> impl Iterator<Item = (VenueId, &TravelEdge)> {
        self.edges.iter().map(|(to, e)| (*to, e))
    }

    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }
}

// ── VenueGraph ────────────────────────────────────────────────────────────────

/// Arena of venues plus their directed travel edges.
#[derive(Clone, Debug, Default)]
pub struct VenueGraph {
    venues:  Vec<Venue>,
    by_name: FxHashMap<String, VenueId>,
}

impl VenueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Venues ────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Handle of the venue called `name`, if any.
    pub fn find(&self, name: &str) -> Option<VenueId> {
        self.by_name.get(name).copied()
    }

    /// Handle of the venue called `name`, creating it on first reference.
    pub fn intern(&mut self, name: &str) -> VenueId {
        if let Some(id) = self.find(name) {
            return id;
        }
        let id = VenueId(self.venues.len() as u32);
        self.venues.push(Venue::new(name.to_owned()));
        self.by_name.insert(name.to_owned(), id);
        id
    }

    pub fn venue(&self, id: VenueId) -> Option<&Venue> {
        self.venues.get(id.index())
    }

    pub fn venue_mut(&mut self, id: VenueId) -> Option<&mut Venue> {
        self.venues.get_mut(id.index())
    }

    /// Name of `id`, or `""` for an unknown handle.
    pub fn name(&self, id: VenueId) -> &str {
        self.venue(id).map_or("", |v| v.name.as_str())
    }

    /// All venues with their handles, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (VenueId, &Venue)> {
        self.venues
            .iter()
            .enumerate()
            .map(|(i, v)| (VenueId(i as u32), v))
    }

    /// Position of every venue when sorted by name, indexed by `VenueId`.
    /// Used as a deterministic tie-break.
    pub fn name_ranks(&self) -> Vec<u32> {
        let mut order: Vec<usize> = (0..self.venues.len()).collect();
        order.sort_by(|&a, &b| self.venues[a].name.cmp(&self.venues[b].name));
        let mut ranks = vec![0u32; self.venues.len()];
        for (rank, idx) in order.into_iter().enumerate() {
            ranks[idx] = rank as u32;
        }
        ranks
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Insert a directed edge `from → to`.
    ///
    /// An authored edge replaces whatever was there.  A phantom only fills an
    /// empty slot or replaces another phantom.
    pub fn add_edge(&mut self, from: VenueId, to: VenueId, edge: TravelEdge) -> EdgeInsert {
        let Some(venue) = self.venues.get_mut(from.index()) else {
            return EdgeInsert::Kept;
        };
        match venue.edges.get(&to) {
            Some(existing) if edge.phantom && !existing.phantom => EdgeInsert::Kept,
            Some(_) => {
                venue.edges.insert(to, edge);
                EdgeInsert::Replaced
            }
            None => {
                venue.edges.insert(to, edge);
                EdgeInsert::Inserted
            }
        }
    }

    pub fn edge(&self, from: VenueId, to: VenueId) -> Option<&TravelEdge> {
        self.venue(from).and_then(|v| v.edges.get(&to))
    }

    /// Outgoing edges of `from`.
    pub fn out_edges(&self, from: VenueId) -> impl Iterator<Item = (VenueId, &TravelEdge)> {
        self.venue(from).into_iter().flat_map(Venue::edges)
    }

    pub fn edge_count(&self) -> usize {
        self.venues.iter().map(Venue::out_degree).sum()
    }

    /// Every authored (non-phantom) edge as `(from, to, edge)`, in venue
    /// creation order.
    pub fn authored_edges(&self) -> impl Iterator<Item = (VenueId, VenueId, &TravelEdge)> {
        self.iter().flat_map(|(from, v)| {
            v.edges()
                .filter(|(_, e)| !e.phantom)
                .map(move |(to, e)| (from, to, e))
        })
    }

    /// For every authored edge `A → B` with no `B → A`, add a phantom
    /// `B → A` carrying the same distance, delay and notes.  Phantoms are
    /// never copied.  Returns the number of phantoms created.
    pub fn generate_phantom_reverse_edges(&mut self) -> usize {
        let missing: Vec<(VenueId, VenueId, TravelEdge)> = self
            .authored_edges()
            .filter(|(from, to, _)| self.edge(*to, *from).is_none())
            .map(|(from, to, e)| (to, from, e.phantom_of()))
            .collect();

        let created = missing.len();
        for (from, to, edge) in missing {
            self.add_edge(from, to, edge);
        }
        if created > 0 {
            info!(created, "generated phantom reverse edges");
        }
        created
    }
}
