//! System catalog for the selection menu.
//!
//! The catalog is the immutable universe of emulated systems. It is built
//! once at startup and only ever read afterwards; derived views (sorted
//! lists, search keys, filter indices) live in `marquee-cache`.
//!
//! Records are addressed by their ordinal index. Implementations of
//! [`CatalogSource`] must keep records ordered by shortname (byte order) so
//! that consumers can binary search on shortname without re-sorting.

mod catalog;
mod error;
mod record;
mod source;

pub use catalog::{Catalog, PLACEHOLDER_NAME};
pub use error::{CatalogError, Result};
pub use record::{MachineFlags, RomEntry, SystemRecord};
pub use source::CatalogSource;
