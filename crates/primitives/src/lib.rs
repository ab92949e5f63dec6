//! Text primitives shared by the system list cache and search ranker.

/// Locale-style multi-level collation keys.
pub mod collate;
/// Search-key normalization (canonical decomposition with case and width folding).
pub mod normalize;

pub use collate::{CollationKey, compare};
pub use normalize::{fold_char, search_key, search_key_joined};
