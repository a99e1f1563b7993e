use std::fmt;
use std::sync::{Arc, Weak};

use spool_queue::{DrainReport, Lifecycle, PushOutcome, WorkQueue};

use crate::registry::Registry;
use crate::{ActorRef, Event, EventRef, Result, SpoolConfig};


/// One (actor, event) pair waiting for a worker.
struct Delivery {
	actor: ActorRef,
	event: EventRef,
}

/// What one submission put on the delivery queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
	/// Deliveries enqueued; zero when the batch was dropped.
	pub deliveries: usize,
	pub outcome: PushOutcome,
	/// The event was a terminate event and the queue has been killed.
	pub terminal: bool,
}

impl Submission {
	pub fn is_accepted(&self) -> bool {
		self.outcome.is_enqueued()
	}
}

struct SpoolInner {
	config: SpoolConfig,
	registry: Registry,
	queue: WorkQueue<Delivery>,
}

/// Actor registry and event broadcaster.
///
/// Cheap to clone; clones share the same registry and worker pool. The
/// registry and the delivery queue are locked independently and never
/// together.
#[derive(Clone)]
pub struct Spool {
	inner: Arc<SpoolInner>,
}

impl Default for Spool {
	fn default() -> Self {
		Self::new()
	}
}

impl Spool {
	/// Creates a spool with the default configuration.
	pub fn new() -> Self {
		Self::with_config(SpoolConfig::default())
	}

	pub fn with_config(config: SpoolConfig) -> Self {
		let queue = WorkQueue::new(config.thread_name.clone()).with_panic_policy(config.panic_policy);
		Self {
			inner: Arc::new(SpoolInner {
				config,
				registry: Registry::default(),
				queue,
			}),
		}
	}

	pub fn config(&self) -> &SpoolConfig {
		&self.inner.config
	}

	/// Starts the configured number of workers. Must be called exactly once.
	pub fn run(&self) -> Result<()> {
		self.run_with(self.inner.config.worker_count())
	}

	/// Starts `workers` workers, overriding the configured pool size.
	///
	/// Workers only hold a weak handle: dropping every `Spool` clone kills the
	/// queue, and deliveries still queued at that point are discarded.
	pub fn run_with(&self, workers: usize) -> Result<()> {
		let inner = Arc::downgrade(&self.inner);
		self.inner.queue.start(workers, move |delivery: Delivery| Self::deliver(&inner, delivery))?;
		tracing::debug!(workers, actors = self.len(), "spool.run");
		Ok(())
	}

	fn deliver(inner: &Weak<SpoolInner>, delivery: Delivery) {
		let Some(inner) = inner.upgrade() else {
			tracing::trace!(event = %delivery.event.description(), "spool.deliver.orphaned");
			return;
		};
		tracing::trace!(event = %delivery.event.description(), "spool.deliver");
		delivery.actor.react(&*delivery.event, &Self { inner });
	}

	/// Blocks until every worker has exited.
	///
	/// Returns once a terminate event has been submitted and every delivery,
	/// including those submitted by reactions, has run. Calling it from inside
	/// a reaction is rejected.
	pub fn wait(&self) -> Result<DrainReport> {
		Ok(self.inner.queue.wait()?)
	}

	/// Registers `actor` under `id`. An id that is already taken is rejected.
	pub fn register(&self, id: impl Into<String>, actor: ActorRef) -> Result<()> {
		let id = id.into();
		tracing::trace!(%id, "spool.register");
		self.inner.registry.insert(id, actor)
	}

	/// Removes the actor registered under `id`, handing it back.
	pub fn unregister(&self, id: &str) -> Option<ActorRef> {
		let removed = self.inner.registry.remove(id);
		if removed.is_some() {
			tracing::trace!(%id, "spool.unregister");
		}
		removed
	}

	/// Removes every registration of `actor`. Safe to call from the actor's own reaction.
	pub fn unregister_actor(&self, actor: &ActorRef) -> usize {
		self.inner.registry.remove_actor(actor)
	}

	/// Resolves a named peer.
	pub fn lookup(&self, id: &str) -> Option<ActorRef> {
		self.inner.registry.get(id)
	}

	/// Registered ids in ascending order.
	pub fn actor_ids(&self) -> Vec<String> {
		self.inner.registry.ids()
	}

	pub fn len(&self) -> usize {
		self.inner.registry.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Broadcasts `event` to every actor registered right now.
	pub fn submit(&self, event: impl Event) -> Submission {
		self.submit_ref(Arc::new(event))
	}

	/// Broadcasts a shared event to every actor registered right now.
	///
	/// Actors registered after this returns do not receive the event. A
	/// terminate event is enqueued for every actor before the queue is killed,
	/// so all of them see it; submissions made while the queue drains are
	/// still delivered.
	pub fn submit_ref(&self, event: EventRef) -> Submission {
		let recipients = self.inner.registry.snapshot();
		let terminal = event.is_terminal();
		let submission = self.enqueue(&event, recipients, terminal);
		if terminal {
			self.inner.queue.kill();
			tracing::debug!(reason = %event.description(), deliveries = submission.deliveries, "spool.terminate");
		}
		submission
	}

	/// Delivers `event` only to `recipients`, bypassing the registry.
	///
	/// Never kills the queue, even for a terminate event.
	pub fn submit_to<I>(&self, event: impl Event, recipients: I) -> Submission
	where
		I: IntoIterator<Item = ActorRef>,
	{
		let event: EventRef = Arc::new(event);
		self.enqueue(&event, recipients.into_iter().collect(), false)
	}

	fn enqueue(&self, event: &EventRef, recipients: Vec<ActorRef>, terminal: bool) -> Submission {
		let count = recipients.len();
		let outcome = self.inner.queue.push_batch(recipients.into_iter().map(|actor| Delivery {
			actor,
			event: Arc::clone(event),
		}));
		if outcome == PushOutcome::Dropped {
			tracing::trace!(event = %event.description(), "spool.submit.dropped");
		}
		Submission {
			deliveries: if outcome.is_enqueued() { count } else { 0 },
			outcome,
			terminal,
		}
	}

	pub fn lifecycle(&self) -> Lifecycle {
		self.inner.queue.lifecycle()
	}

	/// Deliveries queued but not yet claimed by a worker.
	pub fn pending(&self) -> usize {
		self.inner.queue.len()
	}
}

impl fmt::Debug for Spool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Spool")
			.field("actors", &self.actor_ids())
			.field("lifecycle", &self.lifecycle())
			.field("pending", &self.pending())
			.finish()
	}
}
