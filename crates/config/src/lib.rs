//! UI options for marquee.
//!
//! Options are read from a TOML file; every key is optional and unknown keys
//! are rejected:
//!
//! ```toml
//! [paths]
//! history_path = "history;dats;."   # searched for the title file
//! system_names = "Japanese.lst"     # title file name, empty for none
//! media_path = "roms;/mnt/roms"
//! ui_path = "ui"                    # availability list location
//!
//! [search]
//! metric = "jaro-winkler"           # or "levenshtein"
//! max_visible_results = 200
//!
//! [session]
//! remember_last = true
//! last_used_machine = "pacman"
//! last_used_filter = "Manufacturer,Namco"
//! hide_romless = false
//! ```

mod error;
mod options;

pub use error::{ConfigError, Result};
pub use options::{AVAILABLE_LIST_FILE, PathsOptions, SearchMetric, SearchOptions, SessionOptions, UiOptions};
