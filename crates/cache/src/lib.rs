//! Staged background cache of the system list.
//!
//! [`StagedCache`] turns an immutable catalog into a display-ordered list of
//! [`SystemInfo`] entries plus auxiliary indices. A single background thread
//! runs the build and publishes its results stage by stage:
//!
//! 1. [`Stages::BIOS_COUNT`] after the first pass over the catalog.
//! 2. [`Stages::SORTED_LIST`] after the optional title overlay and the sort.
//! 3. [`Stages::FILTER_INDEX`] once manufacturer/year sets are finalized.
//! 4. One `NORMALIZED_*` stage per search field, in [`NormalizedField::ALL`] order.
//!
//! Readers needing only early stages never wait on later ones.

mod availability;
mod build;
mod cache;
mod error;
mod filter_index;
mod info;
mod machine_filter;
mod order;
mod overlay;
mod stage;

pub use availability::{AVAILABLE_LIST_VERSION, apply_included, apply_names, load_available_list, save_available_list, scan_media};
pub use cache::StagedCache;
pub use error::{AvailabilityError, Result};
pub use filter_index::{FilterIndex, manufacturer_names};
pub use info::{NormalizedField, SystemInfo};
pub use machine_filter::{FavoriteLookup, MachineFilter, NoFavorites};
pub use order::find_order_violation;
pub use stage::Stages;
