//! Bookkeeping for live orb instances.
//!
//! Named instances (main orb, chat header, navigation icon) are keyed so a
//! repeated create call returns the existing one. Detached instances, used as
//! per-message avatars, are tracked in creation order so dead ones can be
//! pruned and the oldest frozen once a cap is reached.

use std::collections::HashMap;
use std::collections::VecDeque;

/// Liveness of a tracked handle.
pub trait Lifecycle {
	/// Whether the instance's frame loop is still running. An orb whose
	/// canvas has not been attached yet counts as alive.
	fn is_alive(&self) -> bool;
	/// Stops the instance's frame loop.
	fn stop(&self);
}

/// Keyed and detached instance registry.
#[derive(Debug)]
pub struct OrbRegistry<H> {
	named: HashMap<String, H>,
	detached: VecDeque<H>,
	max_detached: usize,
}

impl<H: Lifecycle> OrbRegistry<H> {
	pub fn new(max_detached: usize) -> Self {
		Self {
			named: HashMap::new(),
			detached: VecDeque::new(),
			max_detached,
		}
	}

	/// Returns the live instance registered under `key`, or builds one with
	/// `factory`. A factory returning `None` registers nothing. A dead entry
	/// under `key` is replaced.
	pub fn get_or_create(&mut self, key: &str, factory: impl FnOnce() -> Option<H>) -> Option<&H> {
		let live = self.named.get(key).is_some_and(Lifecycle::is_alive);
		if !live {
			if let Some(stale) = self.named.remove(key) {
				stale.stop();
			}
			let handle = factory()?;
			self.named.insert(key.to_string(), handle);
		}
		self.named.get(key)
	}

	pub fn get(&self, key: &str) -> Option<&H> {
		self.named.get(key)
	}

	/// Stops and forgets the instance under `key`. Returns whether one existed.
	pub fn remove(&mut self, key: &str) -> bool {
		match self.named.remove(key) {
			Some(handle) => {
				handle.stop();
				true
			}
			None => false,
		}
	}

	/// Tracks a detached instance, stopping the oldest ones beyond the cap.
	pub fn push_detached(&mut self, handle: H) {
		self.prune();
		self.detached.push_back(handle);
		while self.detached.len() > self.max_detached {
			if let Some(oldest) = self.detached.pop_front() {
				oldest.stop();
			}
		}
	}

	/// Drops detached handles that are no longer alive.
	pub fn prune(&mut self) {
		self.detached.retain(Lifecycle::is_alive);
	}

	pub fn named_len(&self) -> usize {
		self.named.len()
	}

	pub fn detached_len(&self) -> usize {
		self.detached.len()
	}

	/// Stops every tracked instance and empties the registry.
	pub fn clear(&mut self) {
		for (_, handle) in self.named.drain() {
			handle.stop();
		}
		for handle in self.detached.drain(..) {
			handle.stop();
		}
	}
}
