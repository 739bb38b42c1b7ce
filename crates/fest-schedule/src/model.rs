//! Core schedule types: `Show`, `Event`, `Leg`, and the owning `Model`.
//!
//! # Ownership
//!
//! The `Model` owns three arenas (shows, venues via [`VenueGraph`], events)
//! and hands out typed handles.  Nothing outside the model holds a reference
//! to an entity across a mutation; the engine passes handles instead.  The
//! whole model is rebuilt from state text on every request and dropped at
//! the end of it.
//!
//! # Event identity
//!
//! An event is identified by `(time, venue)`.  [`Model::add_event`] rejects a
//! second event with the same key so the first occurrence in the text wins.

use rustc_hash::FxHashMap;

use fest_core::{EventId, ShowId, Stamp, VenueId};
use fest_venue::VenueGraph;

use crate::{ScheduleError, ScheduleResult};

// ── Show ──────────────────────────────────────────────────────────────────────

/// A titled performance that may recur across several events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Show {
    pub name: String,
    pub url: Option<String>,
    /// Number of events of this show in the catalogue.
    pub performance_count: u32,
    pub favourite: bool,
    /// Number of this show's events the user selected.  Recomputed by the
    /// conflict engine.
    pub scheduled_count: u32,
    pub duration_secs: i64,
}

impl Show {
    fn new(name: String, duration_secs: i64) -> Self {
        Self {
            name,
            url: None,
            performance_count: 0,
            favourite: false,
            scheduled_count: 0,
            duration_secs,
        }
    }
}

// ── Leg ───────────────────────────────────────────────────────────────────────

/// The walk from one selected event to the next selected one.  Stored on the
/// earlier event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    /// Venues walked through, starting at this event's venue.  Empty when no
    /// path was found.
    pub path: Vec<VenueId>,
    pub travel_secs: i64,
    /// Slack between arriving (and queuing) and the next event's start.
    /// Negative when the next event conflicts.
    pub spare_secs: i64,
    /// `false` if no path exists and the default travel time was used.
    pub routed: bool,
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One performance of one show at one venue at one time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub at: Stamp,
    pub show: ShowId,
    pub venue: VenueId,
    pub selected: bool,
    pub conflicting: bool,
    /// Walk to the next selected event, set by the conflict engine.
    pub next: Option<Leg>,
}

// ── Model ─────────────────────────────────────────────────────────────────────

/// Everything decoded from one request's state text.
#[derive(Clone, Debug, Default)]
pub struct Model {
    shows:      Vec<Show>,
    show_index: FxHashMap<String, ShowId>,
    /// Venues and travel edges.
    pub venues: VenueGraph,
    events:     Vec<Event>,
    event_index: FxHashMap<(Stamp, VenueId), EventId>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Shows ─────────────────────────────────────────────────────────────

    pub fn find_show(&self, name: &str) -> Option<ShowId> {
        self.show_index.get(name).copied()
    }

    /// Handle of the show called `name`, creating it with `duration_secs` on
    /// first reference.
    pub fn intern_show(&mut self, name: &str, duration_secs: i64) -> ShowId {
        if let Some(id) = self.find_show(name) {
            return id;
        }
        let id = ShowId(self.shows.len() as u32);
        self.shows.push(Show::new(name.to_owned(), duration_secs));
        self.show_index.insert(name.to_owned(), id);
        id
    }

    pub fn show(&self, id: ShowId) -> Option<&Show> {
        self.shows.get(id.index())
    }

    pub fn show_mut(&mut self, id: ShowId) -> Option<&mut Show> {
        self.shows.get_mut(id.index())
    }

    /// Show looked up by name, for keyword lines that reference one.
    pub fn show_named_mut(&mut self, name: &str) -> ScheduleResult<&mut Show> {
        let id = self
            .find_show(name)
            .ok_or_else(|| ScheduleError::UnknownShow(name.to_owned()))?;
        Ok(&mut self.shows[id.index()])
    }

    pub fn shows(&self) -> impl Iterator<Item = (ShowId, &Show)> {
        self.shows
            .iter()
            .enumerate()
            .map(|(i, s)| (ShowId(i as u32), s))
    }

    pub(crate) fn shows_mut(&mut self) -> impl Iterator<Item = &mut Show> {
        self.shows.iter_mut()
    }

    pub fn show_count(&self) -> usize {
        self.shows.len()
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Add an event of `show` at `venue`.  Fails if an event already exists
    /// at the same `(at, venue)`.
    pub fn add_event(&mut self, at: Stamp, show: ShowId, venue: VenueId) -> ScheduleResult<EventId> {
        if self.event_index.contains_key(&(at, venue)) {
            return Err(ScheduleError::DuplicateEvent {
                at,
                venue: self.venues.name(venue).to_owned(),
            });
        }
        let show_entry = self
            .shows
            .get_mut(show.index())
            .ok_or_else(|| ScheduleError::UnknownShow(show.to_string()))?;
        let venue_entry = self
            .venues
            .venue_mut(venue)
            .ok_or_else(|| ScheduleError::UnknownVenue(venue.to_string()))?;
        show_entry.performance_count += 1;
        venue_entry.performance_count += 1;

        let id = EventId(self.events.len() as u32);
        self.events.push(Event {
            at,
            show,
            venue,
            selected: false,
            conflicting: false,
            next: None,
        });
        self.event_index.insert((at, venue), id);
        Ok(id)
    }

    /// The event held at `venue` at `at`, if any.
    pub fn event_at(&self, at: Stamp, venue: VenueId) -> Option<EventId> {
        self.event_index.get(&(at, venue)).copied()
    }

    /// Same as [`event_at`](Self::event_at) but by venue name, reporting
    /// which half of the key is missing.
    pub fn event_named(&self, at: Stamp, venue: &str) -> ScheduleResult<EventId> {
        let venue_id = self
            .venues
            .find(venue)
            .ok_or_else(|| ScheduleError::UnknownVenue(venue.to_owned()))?;
        self.event_at(at, venue_id)
            .ok_or_else(|| ScheduleError::UnknownEvent { at, venue: venue.to_owned() })
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.index())
    }

    pub fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.get_mut(id.index())
    }

    pub fn events(&self) -> impl Iterator<Item = (EventId, &Event)> {
        self.events
            .iter()
            .enumerate()
            .map(|(i, e)| (EventId(i as u32), e))
    }

    pub(crate) fn events_mut(&mut self) -> impl Iterator<Item = &mut Event> {
        self.events.iter_mut()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Event handles ordered by `(time, show name, venue name)`.
    pub fn chronological(&self) -> Vec<EventId> {
        let mut ids: Vec<EventId> = (0..self.events.len()).map(|i| EventId(i as u32)).collect();
        ids.sort_by(|&a, &b| {
            let (ea, eb) = (&self.events[a.index()], &self.events[b.index()]);
            ea.at
                .cmp(&eb.at)
                .then_with(|| self.show_name(ea.show).cmp(self.show_name(eb.show)))
                .then_with(|| self.venues.name(ea.venue).cmp(self.venues.name(eb.venue)))
        });
        ids
    }

    /// Selected event handles in chronological order.
    pub fn selected_chronological(&self) -> Vec<EventId> {
        self.chronological()
            .into_iter()
            .filter(|id| self.events[id.index()].selected)
            .collect()
    }

    /// Name of `id`, or `""` for an unknown handle.
    pub fn show_name(&self, id: ShowId) -> &str {
        self.show(id).map_or("", |s| s.name.as_str())
    }
}
