use thiserror::Error;

/// Misuse of a [`WorkQueue`](crate::WorkQueue) lifecycle.
///
/// These are configuration faults reported at the offending call site; item
/// delivery itself never produces an error for the producer.
#[derive(Debug, Error)]
pub enum QueueError {
	/// `start` was called on a queue that already has workers.
	#[error("work queue already started")]
	AlreadyStarted,
	/// `start` was asked for zero workers.
	#[error("work queue needs at least one worker")]
	NoWorkers,
	/// `wait` was called before `start`.
	#[error("work queue has not been started")]
	NotStarted,
	/// `wait` was called from one of the queue's own workers, which would never return.
	#[error("cannot wait on a work queue from one of its own workers")]
	WaitFromWorker,
	/// The OS refused to spawn a worker thread.
	#[error("failed to spawn worker {index}: {source}")]
	Spawn {
		/// Index of the worker that failed to start.
		index: usize,
		/// The underlying spawn error.
		#[source]
		source: std::io::Error,
	},
}

/// Result type for work queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;
