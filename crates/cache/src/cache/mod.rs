use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;

use arc_swap::ArcSwap;
use marquee_catalog::CatalogSource;
use marquee_worker::{TaskClass, panic_message, spawn_named_thread};
use parking_lot::Mutex;

use crate::build::{BuildState, run_build};
use crate::filter_index::FilterIndex;
use crate::info::SystemInfo;
use crate::overlay::locate_titles;
use crate::stage::Stages;

const BUILD_THREAD_NAME: &str = "marquee-cache-build";

#[derive(Debug, Default)]
struct WorkerSlot {
	started: bool,
	handle: Option<JoinHandle<()>>,
}

/// Shared, staged view of the system catalog.
///
/// One background thread builds the sorted list and its indices; readers
/// poll [`Self::is_stage_available`] or block in [`Self::wait_for_stage`]
/// for just the stages they need. Construct once per UI lifetime and share
/// it behind an [`Arc`].
pub struct StagedCache {
	catalog: Arc<dyn CatalogSource>,
	state: ArcSwap<BuildState>,
	worker: Mutex<WorkerSlot>,
	builds_started: AtomicUsize,
}

impl std::fmt::Debug for StagedCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StagedCache")
			.field("systems", &self.catalog.total_count())
			.field("available", &self.available_stages())
			.field("builds_started", &self.builds_started())
			.finish()
	}
}

impl StagedCache {
	pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
		Self {
			catalog,
			state: ArcSwap::from_pointee(BuildState::default()),
			worker: Mutex::new(WorkerSlot::default()),
			builds_started: AtomicUsize::new(0),
		}
	}

	/// Catalog snapshot the cache is built from.
	pub fn catalog(&self) -> &Arc<dyn CatalogSource> {
		&self.catalog
	}

	/// Starts the background build unless one is running or has completed.
	///
	/// `title_path` is a `;`-separated list of directories searched for the
	/// title file named `title_selector`; an empty selector or a missing file
	/// builds with catalog descriptions only. Never blocks on the build.
	pub fn begin_build(&self, title_path: &str, title_selector: &str) {
		let mut slot = self.worker.lock();
		if slot.started {
			tracing::trace!("cache.build.already_started");
			return;
		}
		slot.started = true;
		self.builds_started.fetch_add(1, Ordering::Relaxed);

		let catalog = Arc::clone(&self.catalog);
		let state = self.state.load_full();
		let title_path = title_path.to_string();
		let title_selector = title_selector.to_string();
		let job = {
			let catalog = Arc::clone(&catalog);
			let state = Arc::clone(&state);
			let title_path = title_path.clone();
			let title_selector = title_selector.clone();
			move || build_with_titles(catalog.as_ref(), &title_path, &title_selector, &state)
		};

		match spawn_named_thread(TaskClass::CpuBlocking, BUILD_THREAD_NAME, job) {
			Ok(handle) => slot.handle = Some(handle),
			Err(error) => {
				tracing::error!(%error, "cache.build.spawn_failed");
				build_with_titles(catalog.as_ref(), &title_path, &title_selector, &state);
			}
		}
	}

	/// Non-blocking check that every stage in `stage` has been published.
	pub fn is_stage_available(&self, stage: Stages) -> bool {
		self.state.load().mask.is_available(stage)
	}

	/// Every stage published so far.
	pub fn available_stages(&self) -> Stages {
		self.state.load().mask.load()
	}

	/// Blocks the calling thread until every stage in `stage` is published.
	///
	/// Blocks forever if no build has been started; interactive callers should
	/// poll [`Self::is_stage_available`] instead.
	pub fn wait_for_stage(&self, stage: Stages) {
		let state = self.state.load_full();
		if state.mask.is_available(stage) {
			return;
		}
		if !self.worker.lock().started {
			tracing::warn!(?stage, "cache.wait.not_started");
		}
		state.mask.wait(stage);
	}

	/// Sorted system list, waiting for [`Stages::SORTED_LIST`].
	pub fn get_sorted_list(&self) -> Arc<[SystemInfo]> {
		let state = self.state.load_full();
		state.mask.wait(Stages::SORTED_LIST);
		state.sorted.get().cloned().unwrap_or_default()
	}

	/// Sorted system list if it has been published.
	pub fn try_sorted_list(&self) -> Option<Arc<[SystemInfo]>> {
		let state = self.state.load();
		if !state.mask.is_available(Stages::SORTED_LIST) {
			return None;
		}
		state.sorted.get().cloned()
	}

	/// Manufacturer and year index, waiting for [`Stages::FILTER_INDEX`].
	pub fn get_filter_index(&self) -> Arc<FilterIndex> {
		let state = self.state.load_full();
		state.mask.wait(Stages::FILTER_INDEX);
		state.filter.get().cloned().unwrap_or_default()
	}

	/// Number of BIOS root systems, waiting for [`Stages::BIOS_COUNT`].
	pub fn get_bios_count(&self) -> usize {
		let state = self.state.load_full();
		state.mask.wait(Stages::BIOS_COUNT);
		state.bios_count.get().copied().unwrap_or_default()
	}

	/// Whether any listed system lacks its required media.
	pub fn unavailable_systems(&self) -> bool {
		self.get_sorted_list().iter().any(|info| !info.is_available())
	}

	/// Whether a build thread has been spawned and has not exited yet.
	///
	/// A build that panicked is no longer running even though some stages
	/// were never published.
	pub fn is_build_running(&self) -> bool {
		self.worker.lock().handle.as_ref().is_some_and(|handle| !handle.is_finished())
	}

	/// Number of build threads started over the cache lifetime.
	pub fn builds_started(&self) -> usize {
		self.builds_started.load(Ordering::Relaxed)
	}

	/// Waits for any running build, then drops all derived data and stages.
	///
	/// Must not race with [`Self::begin_build`]; callers serialize the two.
	/// Lists handed out earlier stay valid but are no longer the cache's.
	pub fn reset(&self) {
		let mut slot = self.worker.lock();
		if let Some(handle) = slot.handle.take() {
			join_build(handle);
		}
		slot.started = false;
		self.state.store(Arc::new(BuildState::default()));
		tracing::debug!("cache.reset");
	}
}

impl Drop for StagedCache {
	fn drop(&mut self) {
		if let Some(handle) = self.worker.get_mut().handle.take() {
			join_build(handle);
		}
	}
}

fn build_with_titles(catalog: &dyn CatalogSource, title_path: &str, title_selector: &str, state: &BuildState) {
	let titles = locate_titles(title_path, title_selector);
	if titles.is_none() && !title_selector.is_empty() {
		tracing::debug!(title_path, title_selector, "cache.build.titles_missing");
	}
	run_build(catalog, titles, state);
}

fn join_build(handle: JoinHandle<()>) {
	if let Err(payload) = handle.join() {
		let message = panic_message(payload.as_ref()).unwrap_or_default();
		tracing::error!(%message, "cache.build.panicked");
	}
}
