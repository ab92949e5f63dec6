//! Display ordering of the system list.
//!
//! Systems are grouped as `{parent, clones...}` and groups are interleaved
//! alphabetically by collated display name. The comparison is a four-way
//! case split on whether each side is a clone:
//!
//! | lhs | rhs | compared by |
//! |---|---|---|
//! | parent | parent | own display names |
//! | clone | clone | own names if siblings, else parent names |
//! | parent | clone | parent first if it is the clone's parent, else lhs name vs rhs parent name |
//! | clone | parent | clone last if rhs is its parent, else lhs parent name vs rhs name |
//!
//! Ties fall back to group identity (parent shortname), parents before
//! clones, own name, and finally shortname so the order is total.

use std::cmp::Ordering;

use marquee_primitives::CollationKey;

use crate::info::SystemInfo;

/// Collation keys precomputed for one entry so sorting does not renormalize.
#[derive(Debug)]
pub(crate) struct SortKeys {
	display: CollationKey,
	parent_display: CollationKey,
}

impl SortKeys {
	pub fn new(info: &SystemInfo) -> Self {
		Self {
			display: CollationKey::new(info.display_name()),
			parent_display: CollationKey::new(info.parent_display_name()),
		}
	}
}

fn parent_name(info: &SystemInfo) -> &str {
	info.record().parent.as_deref().unwrap_or_default()
}

fn group_name(info: &SystemInfo) -> &str {
	if info.is_clone() { parent_name(info) } else { info.shortname() }
}

/// Compares two entries for display order.
pub(crate) fn compare_systems(lhs: &SystemInfo, lhs_keys: &SortKeys, rhs: &SystemInfo, rhs_keys: &SortKeys) -> Ordering {
	let primary = match (lhs.is_clone(), rhs.is_clone()) {
		(false, false) => lhs_keys.display.cmp(&rhs_keys.display),
		(true, true) => {
			if parent_name(lhs) == parent_name(rhs) {
				lhs_keys.display.cmp(&rhs_keys.display)
			} else {
				lhs_keys.parent_display.cmp(&rhs_keys.parent_display)
			}
		}
		(false, true) => {
			if lhs.shortname() == parent_name(rhs) {
				return Ordering::Less;
			}
			lhs_keys.display.cmp(&rhs_keys.parent_display)
		}
		(true, false) => {
			if parent_name(lhs) == rhs.shortname() {
				return Ordering::Greater;
			}
			lhs_keys.parent_display.cmp(&rhs_keys.display)
		}
	};

	primary
		.then_with(|| group_name(lhs).cmp(group_name(rhs)))
		.then_with(|| lhs.is_clone().cmp(&rhs.is_clone()))
		.then_with(|| lhs_keys.display.cmp(&rhs_keys.display))
		.then_with(|| lhs.shortname().cmp(rhs.shortname()))
}

/// Stable-sorts `list` into display order.
pub(crate) fn sort_systems(list: Vec<SystemInfo>) -> Vec<SystemInfo> {
	let mut keyed: Vec<(SystemInfo, SortKeys)> = list
		.into_iter()
		.map(|info| {
			let keys = SortKeys::new(&info);
			(info, keys)
		})
		.collect();

	keyed.sort_by(|(lhs, lhs_keys), (rhs, rhs_keys)| compare_systems(lhs, lhs_keys, rhs, rhs_keys));
	keyed.into_iter().map(|(info, _)| info).collect()
}

/// Returns the first adjacent pair `(i, i + 1)` that is out of display order.
pub fn find_order_violation(list: &[SystemInfo]) -> Option<usize> {
	let keys: Vec<SortKeys> = list.iter().map(SortKeys::new).collect();
	(1..list.len()).find(|&i| compare_systems(&list[i], &keys[i], &list[i - 1], &keys[i - 1]) == Ordering::Less).map(|i| i - 1)
}
