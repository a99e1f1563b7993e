use spool_queue::QueueError;
use thiserror::Error;

/// Errors reported by [`Spool`](crate::Spool) operations.
#[derive(Debug, Error)]
pub enum SpoolError {
	/// An actor is already registered under this id.
	#[error("actor already registered: {0}")]
	DuplicateActor(String),
	/// Worker pool misuse (double run, wait before run, ...).
	#[error(transparent)]
	Queue(#[from] QueueError),
}

/// Result type for spool operations.
pub type Result<T> = std::result::Result<T, SpoolError>;
