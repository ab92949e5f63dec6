use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use marquee_cache::{MachineFilter, StagedCache, SystemInfo};
use marquee_config::{SearchMetric, SessionOptions, UiOptions};
use marquee_search::{DistanceMetric, Ranker};

use crate::entry::{ConfigAction, MenuEntry};
use crate::favorites::Favorites;

// Never cleared: every session seeds its reselect target and filter from options.
static FIRST_START: AtomicBool = AtomicBool::new(true);

/// Whether new sessions seed their state from the options they are given.
pub fn is_first_start() -> bool {
	FIRST_START.load(Ordering::Acquire)
}

/// Ranker metric for the configured search option.
pub fn distance_metric(metric: SearchMetric) -> DistanceMetric {
	match metric {
		SearchMetric::JaroWinkler => DistanceMetric::JaroWinkler,
		SearchMetric::Levenshtein => DistanceMetric::Levenshtein,
	}
}

/// State to persist when a session ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
	/// Shortname of the selected system, empty when a config item or nothing was selected.
	pub last_used_machine: String,
	pub last_used_filter: String,
}

impl SessionSummary {
	/// Writes the summary into the session options.
	pub fn apply_to(&self, options: &mut SessionOptions) {
		options.last_used_machine.clone_from(&self.last_used_machine);
		options.last_used_filter.clone_from(&self.last_used_filter);
	}
}

/// One open selection menu over a shared cache.
#[derive(Debug)]
pub struct SelectionSession {
	cache: Arc<StagedCache>,
	favorites: Arc<Favorites>,
	ranker: Ranker,
	top_level: bool,
	max_visible_results: usize,
	filter: MachineFilter,
	search: String,
	reselect: Option<String>,
	list: Option<Arc<[SystemInfo]>>,
	entries: Vec<MenuEntry>,
	selected: Option<usize>,
}

impl SelectionSession {
	/// Opens a session, starting the cache build if it is not running yet.
	///
	/// `top_level` sessions append the configuration items after the list.
	pub fn new(cache: Arc<StagedCache>, favorites: Arc<Favorites>, options: &UiOptions, top_level: bool) -> Self {
		let (title_path, title_selector) = options.title_source();
		cache.begin_build(title_path, title_selector);

		let mut reselect = None;
		let mut filter = MachineFilter::default();
		if is_first_start() {
			reselect = Some(options.session.last_used_machine.clone()).filter(|name| !name.is_empty());
			filter = parse_filter(&options.session.last_used_filter);
		}
		if !options.session.remember_last {
			reselect = None;
		}

		let metric = distance_metric(options.search.metric);
		tracing::debug!(top_level, filter = %filter.config_string(), reselect = ?reselect, ?metric, "session.open");

		Self {
			ranker: Ranker::new(Arc::clone(&cache), metric),
			cache,
			favorites,
			top_level,
			max_visible_results: options.search.max_visible_results,
			filter,
			search: String::new(),
			reselect,
			list: None,
			entries: Vec::new(),
			selected: None,
		}
	}

	pub fn cache(&self) -> &Arc<StagedCache> {
		&self.cache
	}

	pub fn favorites(&self) -> &Arc<Favorites> {
		&self.favorites
	}

	/// Rebuilds the menu entries, waiting for the sorted list.
	///
	/// Returns the index of the entry to select: the pending reselect target
	/// on the first populate, otherwise the previously selected system if it
	/// is still listed.
	pub fn populate(&mut self) -> Option<usize> {
		let list = self.cache.get_sorted_list();
		if !self.list.as_ref().is_some_and(|previous| Arc::ptr_eq(previous, &list)) {
			self.ranker.invalidate();
		}

		let target = self.reselect.take().or_else(|| {
			let previous = self.list.as_deref()?;
			self.selected_entry().and_then(|entry| entry_shortname(previous, entry)).map(str::to_string)
		});

		self.entries.clear();
		self.selected = None;
		let favorites = self.favorites.as_ref();

		if self.filter == MachineFilter::Favorites {
			self.search.clear();
			for favorite in self.favorites.sorted() {
				let position = favorite.starts_empty().then(|| position_of(&list, &favorite.shortname)).flatten();
				self.entries.push(match position {
					Some(position) => MenuEntry::System(position),
					None => MenuEntry::Software(favorite),
				});
			}
		} else if !self.search.is_empty() {
			let ranking = self.ranker.rank(&self.search);
			let ranked = ranking.list();
			let filter = &self.filter;
			self.entries.extend(
				ranking
					.candidates()
					.iter()
					.filter(|candidate| filter.apply(&ranked[candidate.position], favorites))
					.take(self.max_visible_results)
					.map(|candidate| MenuEntry::System(candidate.position)),
			);
		} else {
			let filter = &self.filter;
			self.entries.extend(
				list.iter()
					.enumerate()
					.filter(|(_, info)| filter.apply(info, favorites))
					.map(|(position, _)| MenuEntry::System(position)),
			);
		}

		if self.top_level {
			self.entries.extend(ConfigAction::ALL.map(MenuEntry::Config));
		}

		if let Some(target) = target {
			self.selected = self.entries.iter().position(|entry| entry_shortname(&list, entry) == Some(target.as_str()));
		}

		tracing::debug!(
			entries = self.entries.len(),
			search = %self.search,
			filter = %self.filter.config_string(),
			selected = ?self.selected,
			"session.populate"
		);
		self.list = Some(list);
		self.selected
	}

	/// Entries from the last [`Self::populate`].
	pub fn entries(&self) -> &[MenuEntry] {
		&self.entries
	}

	pub fn selected(&self) -> Option<usize> {
		self.selected
	}

	pub fn selected_entry(&self) -> Option<&MenuEntry> {
		self.entries.get(self.selected?)
	}

	/// Selects the entry at `index`; out-of-range indices clear the selection.
	pub fn select(&mut self, index: usize) -> Option<&MenuEntry> {
		self.selected = (index < self.entries.len()).then_some(index);
		self.selected_entry()
	}

	/// The system an entry refers to, if it is a system entry.
	pub fn system(&self, entry: &MenuEntry) -> Option<&SystemInfo> {
		match entry {
			MenuEntry::System(position) => self.list.as_deref()?.get(*position),
			MenuEntry::Config(_) | MenuEntry::Software(_) => None,
		}
	}

	/// Text shown for an entry.
	pub fn label<'a>(&'a self, entry: &'a MenuEntry) -> &'a str {
		match entry {
			MenuEntry::Config(action) => action.label(),
			MenuEntry::System(_) => self.system(entry).map(SystemInfo::description).unwrap_or_default(),
			MenuEntry::Software(favorite) => &favorite.description,
		}
	}

	pub fn filter(&self) -> &MachineFilter {
		&self.filter
	}

	pub fn set_filter(&mut self, filter: MachineFilter) {
		tracing::debug!(filter = %filter.config_string(), "session.filter");
		self.filter = filter;
	}

	/// Whether the favorites list is shown instead of the system list.
	pub fn is_showing_favorites(&self) -> bool {
		self.filter == MachineFilter::Favorites
	}

	pub fn search(&self) -> &str {
		&self.search
	}

	/// Appends a character to the search; refused while showing favorites or for control characters.
	pub fn push_search_char(&mut self, c: char) -> bool {
		if self.is_showing_favorites() || c.is_control() {
			return false;
		}
		self.search.push(c);
		true
	}

	/// Removes the last search character; returns false when the search was empty.
	pub fn pop_search_char(&mut self) -> bool {
		self.search.pop().is_some()
	}

	pub fn set_search(&mut self, search: impl Into<String>) {
		if self.is_showing_favorites() {
			return;
		}
		self.search = search.into();
	}

	pub fn clear_search(&mut self) {
		self.search.clear();
	}

	/// Ends the session, reporting what should be persisted.
	pub fn finish(self) -> SessionSummary {
		let last_used_machine = match (self.selected_entry(), self.list.as_deref()) {
			(Some(entry), Some(list)) => entry_shortname(list, entry).unwrap_or_default().to_string(),
			_ => String::new(),
		};
		let summary = SessionSummary {
			last_used_machine,
			last_used_filter: self.filter.config_string(),
		};
		tracing::debug!(machine = %summary.last_used_machine, filter = %summary.last_used_filter, "session.finish");
		summary
	}
}

fn parse_filter(text: &str) -> MachineFilter {
	if text.trim().is_empty() {
		return MachineFilter::default();
	}
	MachineFilter::from_config_string(text).unwrap_or_else(|| {
		tracing::warn!(filter = text, "session.filter.unknown");
		MachineFilter::default()
	})
}

fn position_of(list: &[SystemInfo], shortname: &str) -> Option<usize> {
	list.iter().position(|info| info.shortname() == shortname)
}

fn entry_shortname<'a>(list: &'a [SystemInfo], entry: &'a MenuEntry) -> Option<&'a str> {
	match entry {
		MenuEntry::System(position) => list.get(*position).map(SystemInfo::shortname),
		MenuEntry::Software(favorite) => Some(&favorite.shortname),
		MenuEntry::Config(_) => None,
	}
}
