use std::num::NonZeroUsize;

use serde::Deserialize;
use spool_queue::PanicPolicy;

/// Default worker thread name prefix.
pub const DEFAULT_THREAD_NAME: &str = "spool-worker";

/// Worker pool settings for a [`Spool`](crate::Spool).
///
/// Deserializable so host applications can embed it in their own config:
///
/// ```toml
/// workers = 4
/// thread_name = "kingdom"
/// panic_policy = "abandon"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpoolConfig {
	/// Pool size. `None` uses the available hardware parallelism.
	pub workers: Option<NonZeroUsize>,
	/// Worker threads are named `{thread_name}-{index}`.
	pub thread_name: String,
	/// What a worker does when an actor panics.
	pub panic_policy: PanicPolicy,
}

impl Default for SpoolConfig {
	fn default() -> Self {
		Self {
			workers: None,
			thread_name: DEFAULT_THREAD_NAME.to_string(),
			panic_policy: PanicPolicy::default(),
		}
	}
}

impl SpoolConfig {
	/// Sets a fixed pool size. Zero falls back to hardware parallelism.
	#[must_use]
	pub fn workers(mut self, workers: usize) -> Self {
		self.workers = NonZeroUsize::new(workers);
		self
	}

	#[must_use]
	pub fn thread_name(mut self, name: impl Into<String>) -> Self {
		self.thread_name = name.into();
		self
	}

	#[must_use]
	pub fn panic_policy(mut self, policy: PanicPolicy) -> Self {
		self.panic_policy = policy;
		self
	}

	/// Resolved pool size; always at least one.
	pub fn worker_count(&self) -> usize {
		self.workers
			.or_else(|| std::thread::available_parallelism().ok())
			.map_or(1, NonZeroUsize::get)
	}
}
