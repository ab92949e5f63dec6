use std::sync::Arc;

use marquee_cache::{Stages, StagedCache};
use marquee_catalog::{Catalog, SystemRecord};
use pretty_assertions::assert_eq;

use super::*;

fn built_cache() -> Arc<StagedCache> {
	let catalog = Catalog::new(vec![
		SystemRecord::new("galaga", "Galaga").with_manufacturer("Namco", "1981"),
		SystemRecord::new("galaxian", "Galaxian").with_manufacturer("Namco", "1979"),
		SystemRecord::new("pacman", "Pac-Man").with_parent("puckman").with_manufacturer("Namco (Midway license)", "1980"),
		SystemRecord::new("puckman", "Puck Man").with_manufacturer("Namco", "1980"),
		SystemRecord::new("xevious", "Xevious").with_manufacturer("Namco", "1982"),
	])
	.expect("build catalog");
	let cache = Arc::new(StagedCache::new(Arc::new(catalog)));
	cache.begin_build("", "");
	cache.wait_for_stage(Stages::all());
	cache
}

fn entry<'a>(list: &'a [SystemInfo], shortname: &str) -> &'a SystemInfo {
	list.iter().find(|info| info.shortname() == shortname).expect("entry listed")
}

#[test]
fn exact_shortname_ranks_first_with_zero() {
	let mut ranker = Ranker::new(built_cache(), DistanceMetric::JaroWinkler);
	let ranking = ranker.rank("xevious");

	let (score, info) = ranking.get(0).expect("non-empty ranking");
	assert_eq!(score, 0.0);
	assert_eq!(info.shortname(), "xevious");
	assert_eq!(ranking.len(), 5);
	assert!(ranking.iter().skip(1).all(|(score, _)| score > 0.0));
}

#[test]
fn query_is_normalized_before_scoring() {
	let mut ranker = Ranker::new(built_cache(), DistanceMetric::Levenshtein);
	let ranking = ranker.rank("ＰＡＣ-ＭＡＮ");

	let (score, info) = ranking.get(0).expect("non-empty ranking");
	assert_eq!((score, info.shortname()), (0.0, "pacman"));
}

#[test]
fn manufacturer_prefixed_fields_match() {
	let mut ranker = Ranker::new(built_cache(), DistanceMetric::JaroWinkler);
	let ranking = ranker.rank("namco puck man");

	assert_eq!(ranking.get(0).map(|(score, info)| (score, info.shortname())), Some((0.0, "puckman")));
}

#[test]
fn scores_are_non_decreasing() {
	let mut ranker = Ranker::new(built_cache(), DistanceMetric::JaroWinkler);
	let ranking = ranker.rank("gal");
	let scores: Vec<f64> = ranking.iter().map(|(score, _)| score).collect();

	assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
	let leaders: Vec<&str> = ranking.iter().take(2).map(|(_, info)| info.shortname()).collect();
	assert!(leaders.contains(&"galaga") && leaders.contains(&"galaxian"));
}

#[test]
fn unpublished_fields_are_skipped() {
	let cache = built_cache();
	let list = cache.get_sorted_list();
	let galaga = entry(&list, "galaga");
	let metric = DistanceMetric::JaroWinkler;

	assert_eq!(score_entry(metric, "galaga", galaga, Stages::SORTED_LIST), 1.0);
	assert_eq!(score_entry(metric, "galaga", galaga, Stages::SORTED_LIST | Stages::NORMALIZED_DESCRIPTION), 0.0);
	assert_eq!(score_entry(metric, "galaga", galaga, Stages::all()), 0.0);
}

#[test]
fn ranking_before_normalization_keeps_display_order() {
	let cache = built_cache();
	let list = cache.get_sorted_list();
	let mut ranker = Ranker::new(Arc::clone(&cache), DistanceMetric::JaroWinkler);

	{
		let early = ranker.rank_with_stages(Arc::clone(&list), "xevious", Stages::SORTED_LIST);
		assert!(early.iter().all(|(score, _)| score == 1.0));
		let order: Vec<&str> = early.iter().map(|(_, info)| info.shortname()).collect();
		let display: Vec<&str> = list.iter().map(SystemInfo::shortname).collect();
		assert_eq!(order, display);
	}

	let complete = ranker.rank_with_stages(list, "xevious", Stages::all());
	assert_eq!(complete.get(0).map(|(score, info)| (score, info.shortname())), Some((0.0, "xevious")));
}

#[test]
fn invalidate_rereads_after_reset() {
	let cache = built_cache();
	let mut ranker = Ranker::new(Arc::clone(&cache), DistanceMetric::JaroWinkler);
	let before = Arc::clone(ranker.rank("galaga").list());

	cache.reset();
	assert!(ranker.try_rank("galaga").is_some_and(|ranking| Arc::ptr_eq(ranking.list(), &before)));

	ranker.invalidate();
	assert!(ranker.try_rank("galaga").is_none());

	cache.begin_build("", "");
	let after = Arc::clone(ranker.rank("galaga").list());
	assert!(!Arc::ptr_eq(&before, &after));
}
