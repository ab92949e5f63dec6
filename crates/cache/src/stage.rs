use std::sync::atomic::{AtomicU32, Ordering};

use bitflags::bitflags;
use parking_lot::{Condvar, Mutex};

bitflags! {
	/// Independently published increments of derived cache data.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct Stages: u32 {
		const SORTED_LIST = 1 << 0;
		const BIOS_COUNT = 1 << 1;
		const NORMALIZED_SHORTNAME = 1 << 2;
		const NORMALIZED_DESCRIPTION = 1 << 3;
		const NORMALIZED_MANUFACTURER_DESCRIPTION = 1 << 4;
		const NORMALIZED_DEFAULT_DESCRIPTION = 1 << 5;
		const NORMALIZED_MANUFACTURER_DEFAULT_DESCRIPTION = 1 << 6;
		const FILTER_INDEX = 1 << 7;
	}
}

/// Monotonic availability bit set with blocking waits.
///
/// Bits are published with release ordering after the data they guard has
/// been written, and observed with acquire ordering, so a set bit makes the
/// guarded data visible to the observing thread. The mutex only serializes
/// publication against waiters entering the condition variable; readers that
/// just poll never touch it.
#[derive(Debug, Default)]
pub(crate) struct StageMask {
	bits: AtomicU32,
	lock: Mutex<()>,
	cond: Condvar,
}

impl StageMask {
	/// Returns every stage published so far.
	pub fn load(&self) -> Stages {
		Stages::from_bits_truncate(self.bits.load(Ordering::Acquire))
	}

	/// Returns true when all of `desired` has been published.
	pub fn is_available(&self, desired: Stages) -> bool {
		self.load().contains(desired)
	}

	/// Blocks the calling thread until all of `desired` has been published.
	pub fn wait(&self, desired: Stages) {
		if self.is_available(desired) {
			return;
		}
		let mut guard = self.lock.lock();
		while !self.is_available(desired) {
			self.cond.wait(&mut guard);
		}
	}

	/// Publishes `stages` and wakes all waiters.
	pub fn publish(&self, stages: Stages) {
		let _guard = self.lock.lock();
		self.bits.fetch_or(stages.bits(), Ordering::Release);
		self.cond.notify_all();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use super::*;

	#[test]
	fn publish_is_monotonic() {
		let mask = StageMask::default();
		assert!(!mask.is_available(Stages::BIOS_COUNT));
		mask.publish(Stages::BIOS_COUNT);
		mask.publish(Stages::SORTED_LIST);
		assert!(mask.is_available(Stages::BIOS_COUNT | Stages::SORTED_LIST));
		assert!(!mask.is_available(Stages::FILTER_INDEX | Stages::SORTED_LIST));
	}

	#[test]
	fn waiter_wakes_on_publish() {
		let mask = Arc::new(StageMask::default());
		let waiter = {
			let mask = Arc::clone(&mask);
			std::thread::spawn(move || {
				mask.wait(Stages::FILTER_INDEX);
				mask.load()
			})
		};

		std::thread::sleep(Duration::from_millis(20));
		mask.publish(Stages::SORTED_LIST);
		mask.publish(Stages::FILTER_INDEX);
		let seen = waiter.join().expect("join waiter");
		assert!(seen.contains(Stages::FILTER_INDEX));
	}
}
