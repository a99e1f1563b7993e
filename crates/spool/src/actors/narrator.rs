use std::io::{self, Write};

use parking_lot::Mutex;
use spool_queue::{DrainReport, PushOutcome, QueueError, WorkQueue};

use crate::events::Say;
use crate::{Actor, Event, Spool};

/// Writes every [`Say`] message to an output stream, one line each.
///
/// The spool may deliver to the narrator on several workers at once, so lines
/// go through the narrator's own single-worker queue and are written in the
/// order they arrived.
pub struct Narrator {
	lines: WorkQueue<String>,
}

impl Narrator {
	pub fn new<W>(out: W) -> Result<Self, QueueError>
	where
		W: Write + Send + 'static,
	{
		let lines = WorkQueue::new("spool-narrator");
		let out = Mutex::new(out);
		lines.start(1, move |line: String| {
			let mut out = out.lock();
			if let Err(error) = writeln!(out, "{line}").and_then(|()| out.flush()) {
				tracing::warn!(%error, "narrator.write.failed");
			}
		})?;
		Ok(Self { lines })
	}

	pub fn stdout() -> Result<Self, QueueError> {
		Self::new(io::stdout())
	}

	/// Stops accepting lines and blocks until the backlog is written.
	///
	/// Idempotent; also runs on drop.
	pub fn close(&self) -> Result<DrainReport, QueueError> {
		self.lines.kill();
		self.lines.wait()
	}
}

impl Actor for Narrator {
	fn react(&self, event: &dyn Event, _spool: &Spool) {
		if let Some(say) = event.downcast_ref::<Say>()
			&& self.lines.push(say.message().to_owned()) == PushOutcome::Dropped
		{
			tracing::warn!(message = say.message(), "narrator.line.dropped");
		}
	}
}

impl Drop for Narrator {
	fn drop(&mut self) {
		if let Err(error) = self.close() {
			tracing::warn!(%error, "narrator.close.failed");
		}
	}
}
