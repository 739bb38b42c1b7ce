//! Strongly typed handles into the model's arenas.
//!
//! Shows, venues and events are stored in `Vec`s owned by the model and
//! referenced everywhere else by these handles, never by position in a live
//! container.  All handles are `Copy + Ord + Hash` so they can be used as map
//! keys without ceremony.

use std::fmt;

/// Generate a typed handle wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid handle".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a show in the model's show arena.
    pub struct ShowId(u32);
}

typed_id! {
    /// Index of a venue (or path-only waypoint) in the venue graph.
    pub struct VenueId(u32);
}

typed_id! {
    /// Index of one performance in the model's event arena.
    pub struct EventId(u32);
}
