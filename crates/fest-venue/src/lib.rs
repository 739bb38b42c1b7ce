//! `fest-venue` — venue graph, phantom reverse edges, and routing.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`graph`]  | `VenueGraph`, `Venue`, `TravelEdge`, phantom generation     |
//! | [`router`] | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`error`]  | `VenueError`, `VenueResult<T>`                              |

pub mod error;
pub mod graph;
pub mod router;


pub use error::{VenueError, VenueResult};
pub use graph::{EdgeInsert, TravelEdge, Venue, VenueGraph};
pub use router::{DijkstraRouter, Route, Router};
