use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, anyhow, bail};
use marquee_cache::{
	AVAILABLE_LIST_VERSION, MachineFilter, Stages, StagedCache, SystemInfo, apply_included, apply_names, load_available_list, save_available_list, scan_media,
};
use marquee_catalog::{Catalog, CatalogSource};
use marquee_config::UiOptions;
use marquee_search::Ranker;
use marquee_session::{SelectionSession, SessionSummary, distance_metric};
use marquee_worker::{TaskClass, panic_message, spawn_named_thread};

use crate::table::print_rows;

const STAGE_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Shared state for one command invocation.
pub(crate) struct Context {
	catalog: Arc<Catalog>,
	cache: Arc<StagedCache>,
	options: UiOptions,
	config_path: Option<PathBuf>,
}

impl Context {
	pub fn new(catalog: Catalog, options: UiOptions, config_path: Option<PathBuf>) -> Self {
		let catalog = Arc::new(catalog);
		let source: Arc<dyn CatalogSource> = catalog.clone();
		Self {
			cache: Arc::new(StagedCache::new(source)),
			catalog,
			options,
			config_path,
		}
	}

	fn begin_build(&self) {
		let (title_path, title_selector) = self.options.title_source();
		self.cache.begin_build(title_path, title_selector);
	}

	fn session(&self, top_level: bool) -> SelectionSession {
		SelectionSession::new(Arc::clone(&self.cache), Arc::default(), &self.options, top_level)
	}
}

pub(crate) fn list(context: &Context, filter: Option<&str>) -> anyhow::Result<()> {
	let mut session = context.session(false);
	if let Some(text) = filter {
		let filter = MachineFilter::from_config_string(text).with_context(|| format!("unknown filter '{text}'"))?;
		session.set_filter(filter);
	}
	apply_saved_availability(context)?;
	session.populate();

	let rows: Vec<Vec<String>> = session
		.entries()
		.iter()
		.filter_map(|entry| session.system(entry))
		.map(|info| {
			let name = if info.is_clone() { format!("  {}", info.shortname()) } else { info.shortname().to_string() };
			vec![name, info.description().to_string(), info.record().year.clone(), info.record().manufacturer.clone()]
		})
		.collect();
	print_rows(&rows);
	Ok(())
}

pub(crate) fn search(context: &Context, query: &str, limit: usize) -> anyhow::Result<()> {
	context.begin_build();
	context.cache.wait_for_stage(Stages::all());

	let mut ranker = Ranker::new(Arc::clone(&context.cache), distance_metric(context.options.search.metric));
	let ranking = ranker.rank(query);
	let rows: Vec<Vec<String>> = ranking
		.iter()
		.take(limit)
		.map(|(score, info)| vec![format!("{score:.3}"), info.shortname().to_string(), info.description().to_string()])
		.collect();
	print_rows(&rows);
	Ok(())
}

pub(crate) fn select(context: &Context, query: &str) -> anyhow::Result<()> {
	let (line, summary) = best_match(context, query)?;
	println!("{line}");

	if let Some(path) = &context.config_path {
		let mut options = context.options.clone();
		summary.apply_to(&mut options.session);
		options.save(path).with_context(|| format!("saving options to {}", path.display()))?;
	}
	Ok(())
}

/// Selects the best match for `query` once every searchable field is published.
fn best_match(context: &Context, query: &str) -> anyhow::Result<(String, SessionSummary)> {
	let mut session = context.session(true);
	session.cache().wait_for_stage(Stages::all());
	session.set_search(query);
	session.populate();

	let Some(entry) = session.select(0).cloned() else {
		bail!("no system matches '{query}'");
	};
	let Some(info) = session.system(&entry) else {
		bail!("no system matches '{query}'");
	};
	let line = format!("{}  {}", info.shortname(), info.description());
	Ok((line, session.finish()))
}

pub(crate) fn stages(context: &Context) -> anyhow::Result<()> {
	let start = Instant::now();
	context.begin_build();

	let published = watch_stages(&context.cache, |name| {
		println!("{:>10.3} ms  {name}", start.elapsed().as_secs_f64() * 1000.0);
	});
	if published != Stages::all() {
		let missing: Vec<&str> = Stages::all().difference(published).iter_names().map(|(name, _)| name).collect();
		bail!("cache build stopped before publishing {}", missing.join(", "));
	}
	println!("{} systems", context.cache.get_sorted_list().len());
	Ok(())
}

/// Reports each stage as it is published until all are, or the build thread exits.
fn watch_stages(cache: &StagedCache, mut on_publish: impl FnMut(&'static str)) -> Stages {
	let mut seen = Stages::empty();
	loop {
		let running = cache.is_build_running();
		let now = cache.available_stages();
		for (name, _) in now.difference(seen).iter_names() {
			on_publish(name);
		}
		seen = now;
		if seen == Stages::all() || !running {
			return seen;
		}
		std::thread::sleep(STAGE_POLL_INTERVAL);
	}
}

pub(crate) fn filters(context: &Context) -> anyhow::Result<()> {
	context.begin_build();
	let index = context.cache.get_filter_index();

	println!("BIOS systems: {}", context.cache.get_bios_count());
	println!("Manufacturers ({}):", index.manufacturers().len());
	for manufacturer in index.manufacturers() {
		println!("  {manufacturer}");
	}
	println!("Years ({}):", index.years().len());
	for year in index.years() {
		println!("  {year}");
	}
	Ok(())
}

pub(crate) fn avail(context: &Context, rescan: bool) -> anyhow::Result<()> {
	context.begin_build();
	let list = context.cache.get_sorted_list();

	if rescan || !apply_saved_availability(context)? {
		let included = scan(context)?;
		apply_included(&list, &included);

		let path = context.options.available_list_path();
		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
		}
		save_available_list(&path, AVAILABLE_LIST_VERSION, &list)?;
	}

	let available = list.iter().filter(|info| info.is_available()).count();
	println!("{available} of {} systems available", list.len());
	if context.cache.unavailable_systems() {
		let missing: Vec<&str> = list.iter().filter(|info| !info.is_available()).map(SystemInfo::shortname).collect();
		println!("missing media: {}", missing.join(" "));
	}
	Ok(())
}

/// Applies the saved availability list; returns false when it is missing or stale.
fn apply_saved_availability(context: &Context) -> anyhow::Result<bool> {
	let Some(names) = load_available_list(&context.options.available_list_path(), AVAILABLE_LIST_VERSION)? else {
		return Ok(false);
	};
	apply_names(&context.cache.get_sorted_list(), &names);
	Ok(true)
}

fn scan(context: &Context) -> anyhow::Result<Vec<bool>> {
	let catalog = Arc::clone(&context.catalog);
	let dirs = context.options.media_dirs();
	let hide_romless = context.options.session.hide_romless;

	let handle = spawn_named_thread(TaskClass::IoBlocking, "marquee-media-scan", move || scan_media(catalog.as_ref(), &dirs, hide_romless))
		.context("spawning media scan")?;
	handle
		.join()
		.map_err(|payload| anyhow!("media scan panicked: {}", panic_message(payload.as_ref()).unwrap_or_default()))
}
