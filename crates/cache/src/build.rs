use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use marquee_catalog::CatalogSource;
use marquee_primitives::{search_key, search_key_joined};

use crate::filter_index::FilterIndex;
use crate::info::{NormalizedField, SystemInfo};
use crate::order::sort_systems;
use crate::overlay::{load_titles, populate_parents};
use crate::stage::{StageMask, Stages};

/// Derived storage for one build generation.
///
/// Every slot is written exactly once by the build thread before the stage
/// that guards it is published.
#[derive(Debug, Default)]
pub(crate) struct BuildState {
	pub mask: StageMask,
	pub bios_count: OnceLock<usize>,
	pub sorted: OnceLock<Arc<[SystemInfo]>>,
	pub filter: OnceLock<Arc<FilterIndex>>,
}

/// Runs the whole build pipeline, publishing stages as they complete.
pub(crate) fn run_build(catalog: &dyn CatalogSource, titles: Option<PathBuf>, state: &BuildState) {
	let start = Instant::now();
	tracing::info!(systems = catalog.total_count(), titles = ?titles, "cache.build.start");

	let titles = titles.and_then(|path| match File::open(&path) {
		Ok(file) => Some(BufReader::new(file)),
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "cache.build.titles_unreadable");
			None
		}
	});
	let use_titles = titles.is_some();

	// initially ordered by shortname, placeholder included so positions match catalog indices
	let mut filter = FilterIndex::default();
	let (mut list, bios_count) = populate_list(catalog, !use_titles, &mut filter);
	let _ = state.bios_count.set(bios_count);
	publish(state, Stages::BIOS_COUNT);

	if let Some(reader) = titles {
		let report = load_titles(reader, &mut list);
		tracing::debug!(?report, "cache.build.titles_loaded");
		populate_parents(&mut list);
	}

	if let Some(placeholder) = catalog.placeholder_index()
		&& placeholder < list.len()
	{
		list.remove(placeholder);
	}

	let sorted: Arc<[SystemInfo]> = sort_systems(list).into();
	let _ = state.sorted.set(Arc::clone(&sorted));
	publish(state, Stages::SORTED_LIST);

	filter.finalize();
	let _ = state.filter.set(Arc::new(filter));
	publish(state, Stages::FILTER_INDEX);

	for field in NormalizedField::ALL {
		for info in sorted.iter() {
			info.set_normalized(field, normalized_value(info, field, use_titles));
		}
		publish(state, field.stage());
	}

	tracing::info!(systems = sorted.len(), bios_count, elapsed_ms = start.elapsed().as_millis() as u64, "cache.build.complete");
}

fn publish(state: &BuildState, stage: Stages) {
	state.mask.publish(stage);
	tracing::trace!(?stage, "cache.stage.published");
}

fn normalized_value(info: &SystemInfo, field: NormalizedField, use_titles: bool) -> String {
	let record = info.record();
	match field {
		NormalizedField::Shortname => search_key(&record.name),
		NormalizedField::Description => search_key(info.description()),
		NormalizedField::ManufacturerDescription => search_key_joined(&record.manufacturer, info.description()),
		// default descriptions only differ from the shown ones when an overlay replaced them
		NormalizedField::DefaultDescription if use_titles && info.description() != record.description => search_key(&record.description),
		NormalizedField::ManufacturerDefaultDescription if use_titles && info.description() != record.description => {
			search_key_joined(&record.manufacturer, &record.description)
		}
		NormalizedField::DefaultDescription | NormalizedField::ManufacturerDefaultDescription => String::new(),
	}
}

/// Creates one entry per catalog record, in catalog order.
///
/// With `copy_descriptions` the catalog descriptions and parent names are
/// filled in directly; otherwise they are left for the title overlay.
pub(crate) fn populate_list(catalog: &dyn CatalogSource, copy_descriptions: bool, filter: &mut FilterIndex) -> (Vec<SystemInfo>, usize) {
	let total = catalog.total_count();
	let placeholder = catalog.placeholder_index();
	let mut list = Vec::with_capacity(total);
	let mut bios_count = 0usize;

	for index in 0..total {
		let record = catalog.record_at(index);
		let mut info = SystemInfo::new(Arc::clone(record), index);
		if Some(index) != placeholder {
			if record.is_bios_root() {
				bios_count += 1;
			}

			if let Some(parent) = record.parent.as_deref() {
				let parent_record = catalog.find_by_shortname(parent).map(|found| catalog.record_at(found));
				info.is_clone = parent_record.is_some_and(|parent| !parent.is_bios_root());
				if copy_descriptions {
					info.parent = match parent_record {
						Some(parent) => parent.description.clone(),
						None => parent.to_string(),
					};
				}
			}

			if copy_descriptions {
				info.description = record.description.clone();
			}

			filter.add_manufacturer(&record.manufacturer);
			filter.add_year(&record.year);
		}
		list.push(info);
	}

	(list, bios_count)
}
