//! Shared actors and helpers for spool scenario tests.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use spool::{Actor, ActorRef, DrainReport, Event, Spool, SpoolConfig};

/// Upper bound for any scenario that should finish promptly.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Builds a spool with `workers` workers and starts it.
pub fn running(workers: usize) -> Spool {
	let _ = tracing_subscriber::fmt::try_init();
	let spool = Spool::with_config(SpoolConfig::default().workers(workers));
	spool.run().expect("spool should start");
	spool
}

/// Records the description of every event it receives.
#[derive(Clone, Default)]
pub struct Recorder {
	seen: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
	pub fn handle(&self) -> ActorRef {
		Arc::new(self.clone())
	}

	pub fn seen(&self) -> Vec<String> {
		self.seen.lock().clone()
	}

	pub fn count(&self, description: &str) -> usize {
		self.seen.lock().iter().filter(|seen| *seen == description).count()
	}
}

impl Actor for Recorder {
	fn react(&self, event: &dyn Event, _spool: &Spool) {
		self.seen.lock().push(event.description());
	}
}

/// Waits for `spool` on a helper thread, failing the test if it hangs.
pub fn wait_within(spool: &Spool, timeout: Duration) -> DrainReport {
	let (tx, rx) = mpsc::channel();
	let waiter = spool.clone();
	thread::spawn(move || {
		let _ = tx.send(waiter.wait());
	});
	rx.recv_timeout(timeout)
		.expect("spool did not drain in time")
		.expect("wait should succeed")
}
