use std::sync::Arc;
use std::time::Instant;

use marquee_cache::{NormalizedField, StagedCache, Stages, SystemInfo};
use marquee_primitives::search_key;

use crate::metric::DistanceMetric;

/// Score of one sorted-list entry for the current query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchCandidate {
	/// Best distance over the searchable fields; `0.0` is an exact match.
	pub score: f64,
	/// Position of the entry in the sorted list.
	pub position: usize,
}

/// Per-session search state over a shared [`StagedCache`].
///
/// The candidate buffer is owned by the ranker and recomputed in full for
/// every query.
#[derive(Debug)]
pub struct Ranker {
	cache: Arc<StagedCache>,
	metric: DistanceMetric,
	list: Option<Arc<[SystemInfo]>>,
	candidates: Vec<SearchCandidate>,
}

impl Ranker {
	pub fn new(cache: Arc<StagedCache>, metric: DistanceMetric) -> Self {
		Self {
			cache,
			metric,
			list: None,
			candidates: Vec::new(),
		}
	}

	pub fn metric(&self) -> DistanceMetric {
		self.metric
	}

	/// Forgets the cached list snapshot, e.g. after the cache was reset.
	pub fn invalidate(&mut self) {
		self.list = None;
		self.candidates.clear();
	}

	/// Ranks every listed system against `query`, waiting for the sorted list.
	pub fn rank(&mut self, query: &str) -> Ranking<'_> {
		let list = match &self.list {
			Some(list) => Arc::clone(list),
			None => self.cache.get_sorted_list(),
		};
		self.rank_list(list, query)
	}

	/// Like [`Self::rank`] but returns `None` instead of waiting for the sorted list.
	pub fn try_rank(&mut self, query: &str) -> Option<Ranking<'_>> {
		let list = match &self.list {
			Some(list) => Arc::clone(list),
			None => self.cache.try_sorted_list()?,
		};
		Some(self.rank_list(list, query))
	}

	fn rank_list(&mut self, list: Arc<[SystemInfo]>, query: &str) -> Ranking<'_> {
		let stages = self.cache.available_stages();
		self.rank_with_stages(list, query, stages)
	}

	pub(crate) fn rank_with_stages(&mut self, list: Arc<[SystemInfo]>, query: &str, stages: Stages) -> Ranking<'_> {
		let start = Instant::now();
		let query = search_key(query);
		let metric = self.metric;

		self.list = Some(Arc::clone(&list));
		self.candidates.clear();
		self.candidates.extend(list.iter().enumerate().map(|(position, info)| SearchCandidate {
			score: score_entry(metric, &query, info, stages),
			position,
		}));
		// stable: equal scores keep display order
		self.candidates.sort_by(|lhs, rhs| lhs.score.total_cmp(&rhs.score));

		tracing::trace!(
			query = %query,
			candidates = self.candidates.len(),
			stages = ?stages,
			elapsed_us = start.elapsed().as_micros() as u64,
			"search.rank"
		);
		Ranking {
			list,
			candidates: &self.candidates,
		}
	}
}

/// Best distance of `query` over the fields of `info` that `stages` makes readable.
///
/// Fields are tried as shortname, reading, manufacturer + reading,
/// description, manufacturer + description, default description and
/// manufacturer + default description; an exact match ends the search.
pub(crate) fn score_entry(metric: DistanceMetric, query: &str, info: &SystemInfo, stages: Stages) -> f64 {
	let normalized = |field: NormalizedField| stages.contains(field.stage()).then(|| info.normalized(field)).flatten();
	let fields = [
		normalized(NormalizedField::Shortname),
		info.reading_key(),
		info.manufacturer_reading_key(),
		normalized(NormalizedField::Description),
		normalized(NormalizedField::ManufacturerDescription),
		normalized(NormalizedField::DefaultDescription),
		normalized(NormalizedField::ManufacturerDefaultDescription),
	];

	let mut best = 1.0_f64;
	for candidate in fields.into_iter().flatten().filter(|candidate| !candidate.is_empty()) {
		best = best.min(metric.distance(query, candidate));
		if best == 0.0 {
			break;
		}
	}
	best
}

/// Ranked view borrowed from a [`Ranker`], best match first.
#[derive(Debug)]
pub struct Ranking<'a> {
	list: Arc<[SystemInfo]>,
	candidates: &'a [SearchCandidate],
}

impl<'a> Ranking<'a> {
	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	/// Sorted list the positions refer to.
	pub fn list(&self) -> &Arc<[SystemInfo]> {
		&self.list
	}

	pub fn candidates(&self) -> &'a [SearchCandidate] {
		self.candidates
	}

	pub fn get(&self, rank: usize) -> Option<(f64, &SystemInfo)> {
		let candidate = self.candidates.get(rank)?;
		Some((candidate.score, &self.list[candidate.position]))
	}

	pub fn iter(&self) -> impl Iterator<Item = (f64, &SystemInfo)> + '_ {
		self.candidates.iter().map(|candidate| (candidate.score, &self.list[candidate.position]))
	}
}

#[cfg(test)]
mod tests;
