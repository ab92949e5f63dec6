//! Selection session for the system menu.
//!
//! A [`SelectionSession`] is the thin consumer of the shared
//! [`marquee_cache::StagedCache`]: it turns the sorted list, the current
//! filter, the search text and the favorites into a list of [`MenuEntry`]
//! values and remembers which one to reselect.

mod entry;
mod favorites;
mod session;

pub use entry::{ConfigAction, FavoriteEntry, MenuEntry};
pub use favorites::Favorites;
pub use session::{SelectionSession, SessionSummary, distance_metric, is_first_start};
