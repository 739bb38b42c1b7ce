//! `fest-codec` — the plain-text state format.
//!
//! The whole schedule lives in one line-oriented text blob that is posted
//! back and forth with every request.  [`decode`] turns it into a
//! [`Model`](fest_schedule::Model) and mutates the caller's
//! [`Settings`](fest_core::Settings); [`encode`] writes it back out in a
//! canonical order.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | `record`    | field splitting and per-line classification           |
//! | `decode`    | tolerant decoder producing a model plus diagnostics   |
//! | `encode`    | canonical encoder                                     |
//! | `escape`    | entity escaping for embedding in a page               |
//! | `itinerary` | CSV export of the selected events                     |
//! | `error`     | `LineError`, `Diagnostic`, `CodecError`               |
//!
//! # Line format
//!
//! ```text
//! Setting	WalkingSpeedKmh	5
//! 2024-06-20 Thursday
//! 19:00	Hamlet	Main Hall
//! 20:30	Lear	Studio
//! ShowDuration	Hamlet	75
//! TravelTime	Main Hall	Studio	350	30	take the side door
//! Selected	Main Hall	2024-06-20 19:00
//! ```
//!
//! Fields are separated by TAB, or by `|` as well unless the `TabOnly`
//! setting is on.  Decoding never fails as a whole: a bad line becomes a
//! [`Diagnostic`] and is skipped.

pub mod decode;
pub mod encode;
pub mod error;
pub mod escape;
pub mod itinerary;
pub mod record;


pub use decode::{DecodeOptions, Decoded, decode, decode_with};
pub use encode::{encode, encode_for_markup};
pub use error::{CodecError, CodecResult, Diagnostic, LineError};
pub use escape::{escape_markup, unescape_markup};
pub use itinerary::write_itinerary;
pub use record::{Record, classify, split_fields};
