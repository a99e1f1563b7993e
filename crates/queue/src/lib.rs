//! Generic FIFO work queue drained by a fixed pool of named worker threads.
//!
//! Producers push items from any thread; workers pop them in FIFO order and
//! hand each one to a shared consumer callback. [`WorkQueue::kill`] starts a
//! draining shutdown: items already queued, and items pushed while any worker
//! is still inside the consumer, are delivered before the workers exit.

mod error;
mod panic;
mod policy;
mod queue;
mod report;

pub use error::{QueueError, Result};
pub use policy::PanicPolicy;
pub use queue::WorkQueue;
pub use report::{DrainReport, Lifecycle, PushOutcome};
