/// Shutdown phase of a work queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
	/// Alive; pushes are accepted.
	Accepting,
	/// Killed, but items are queued or a worker is still inside the consumer.
	/// Pushes are still accepted.
	Draining,
	/// Killed, empty and idle. Pushes are dropped and workers exit.
	Stopped,
}

/// Outcome of a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushOutcome {
	/// Item (or whole batch) was queued for delivery.
	Enqueued,
	/// Queue was stopped; item (or whole batch) was discarded.
	Dropped,
}

impl PushOutcome {
	pub fn is_enqueued(self) -> bool {
		self == Self::Enqueued
	}
}

/// Counters published once every worker of a queue has been joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
	/// Items whose consumer call returned normally.
	pub delivered: u64,
	/// Items whose consumer call panicked.
	pub faulted: u64,
	/// Items discarded because they were pushed after the queue stopped.
	pub dropped: u64,
	/// Items still queued when the last worker exited.
	pub pending: usize,
	/// Worker threads that exited by unwinding.
	pub workers_lost: usize,
}

impl DrainReport {
	/// Returns true when the queue drained without faults, losses or stranded items.
	///
	/// Dropped late pushes do not make a drain unclean.
	pub fn is_clean(&self) -> bool {
		self.faulted == 0 && self.workers_lost == 0 && self.pending == 0
	}
}
