use std::collections::VecDeque;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

use parking_lot::{Condvar, Mutex};

use crate::panic::describe_panic;
use crate::{DrainReport, Lifecycle, PanicPolicy, PushOutcome, QueueError, Result};


struct State<T> {
	items: VecDeque<T>,
	alive: bool,
	/// Workers currently inside the consumer.
	busy: usize,
	delivered: u64,
	faulted: u64,
	dropped: u64,
}

impl<T> State<T> {
	fn lifecycle(&self) -> Lifecycle {
		if self.alive {
			Lifecycle::Accepting
		} else if self.items.is_empty() && self.busy == 0 {
			Lifecycle::Stopped
		} else {
			Lifecycle::Draining
		}
	}
}

struct Shared<T> {
	name: String,
	state: Mutex<State<T>>,
	ready: Condvar,
}

impl<T> Shared<T> {
	/// Blocks until an item is available or the queue has stopped.
	///
	/// A popped item marks the calling worker busy until its [`BusyGuard`] drops.
	fn next(&self) -> Option<T> {
		let mut state = self.state.lock();
		loop {
			if let Some(item) = state.items.pop_front() {
				state.busy += 1;
				return Some(item);
			}
			if state.lifecycle() == Lifecycle::Stopped {
				return None;
			}
			self.ready.wait(&mut state);
		}
	}
}

/// Releases a worker's busy mark, including when the consumer unwinds.
struct BusyGuard<'a, T> {
	shared: &'a Shared<T>,
	faulted: bool,
}

impl<T> Drop for BusyGuard<'_, T> {
	fn drop(&mut self) {
		let faulted = self.faulted || thread::panicking();
		let mut state = self.shared.state.lock();
		state.busy -= 1;
		if faulted {
			state.faulted += 1;
		} else {
			state.delivered += 1;
		}
		let stopped = state.lifecycle() == Lifecycle::Stopped;
		drop(state);
		if stopped {
			self.shared.ready.notify_all();
		}
	}
}

fn work<T, F>(shared: &Shared<T>, policy: PanicPolicy, consumer: &F)
where
	F: Fn(T),
{
	while let Some(item) = shared.next() {
		let mut guard = BusyGuard { shared, faulted: false };
		match policy {
			PanicPolicy::Contain => {
				if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| consumer(item))) {
					guard.faulted = true;
					tracing::error!(queue = %shared.name, panic = %describe_panic(&*payload), "queue.consumer.panicked");
				}
			}
			PanicPolicy::Abandon => consumer(item),
		}
	}
	tracing::trace!(queue = %shared.name, "queue.worker.exit");
}

/// Join coordination for the worker pool.
///
/// Only one caller joins the threads; concurrent callers park on `done`
/// until the report is published.
enum JoinPhase {
	Idle,
	Running(Vec<JoinHandle<()>>),
	Joining,
	Joined(DrainReport),
}

struct JoinSlot {
	phase: JoinPhase,
	threads: Vec<ThreadId>,
}

struct JoinCtrl {
	slot: Mutex<JoinSlot>,
	done: Condvar,
}

/// Thread-safe FIFO drained by a pool of worker threads.
///
/// Every accepted item reaches the consumer exactly once. Items are popped in
/// the order they were accepted; with more than one worker, consumer calls for
/// different items may overlap.
pub struct WorkQueue<T> {
	shared: Arc<Shared<T>>,
	policy: PanicPolicy,
	join: JoinCtrl,
}

impl<T> WorkQueue<T>
where
	T: Send + 'static,
{
	/// Creates an alive queue with no workers.
	///
	/// `name` prefixes worker thread names and tags log records.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			shared: Arc::new(Shared {
				name: name.into(),
				state: Mutex::new(State {
					items: VecDeque::new(),
					alive: true,
					busy: 0,
					delivered: 0,
					faulted: 0,
					dropped: 0,
				}),
				ready: Condvar::new(),
			}),
			policy: PanicPolicy::default(),
			join: JoinCtrl {
				slot: Mutex::new(JoinSlot {
					phase: JoinPhase::Idle,
					threads: Vec::new(),
				}),
				done: Condvar::new(),
			},
		}
	}

	/// Sets the consumer panic policy handed to the workers by [`Self::start`].
	#[must_use]
	pub fn with_panic_policy(mut self, policy: PanicPolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn name(&self) -> &str {
		&self.shared.name
	}

	pub fn panic_policy(&self) -> PanicPolicy {
		self.policy
	}

	/// Enqueues one item and wakes one worker.
	///
	/// Accepted while alive or draining; dropped once the queue has stopped.
	pub fn push(&self, item: T) -> PushOutcome {
		let mut state = self.shared.state.lock();
		if state.lifecycle() == Lifecycle::Stopped {
			state.dropped += 1;
			drop(state);
			tracing::trace!(queue = %self.shared.name, "queue.push.dropped");
			return PushOutcome::Dropped;
		}
		state.items.push_back(item);
		drop(state);
		self.shared.ready.notify_one();
		PushOutcome::Enqueued
	}

	/// Enqueues a whole batch under one lock acquisition.
	///
	/// The iterator is drained before the lock is taken, so no worker can
	/// observe a partial batch. The batch is accepted or dropped as a unit.
	pub fn push_batch<I>(&self, items: I) -> PushOutcome
	where
		I: IntoIterator<Item = T>,
	{
		let batch: Vec<T> = items.into_iter().collect();
		let count = batch.len();
		let mut state = self.shared.state.lock();
		if state.lifecycle() == Lifecycle::Stopped {
			state.dropped += count as u64;
			drop(state);
			tracing::trace!(queue = %self.shared.name, count, "queue.push.dropped");
			return PushOutcome::Dropped;
		}
		state.items.extend(batch);
		drop(state);
		match count {
			0 => {}
			1 => {
				self.shared.ready.notify_one();
			}
			_ => {
				self.shared.ready.notify_all();
			}
		}
		PushOutcome::Enqueued
	}

	/// Spawns `workers` threads that feed popped items to `consumer`.
	pub fn start<F>(&self, workers: usize, consumer: F) -> Result<()>
	where
		F: Fn(T) + Send + Sync + 'static,
	{
		if workers == 0 {
			return Err(QueueError::NoWorkers);
		}
		let mut slot = self.join.slot.lock();
		if !matches!(slot.phase, JoinPhase::Idle) {
			return Err(QueueError::AlreadyStarted);
		}

		let consumer = Arc::new(consumer);
		let policy = self.policy;
		let mut handles = Vec::with_capacity(workers);
		for index in 0..workers {
			let shared = Arc::clone(&self.shared);
			let consumer = Arc::clone(&consumer);
			let spawned = thread::Builder::new()
				.name(format!("{}-{index}", self.shared.name))
				.spawn(move || work(&shared, policy, &*consumer));
			match spawned {
				Ok(handle) => {
					slot.threads.push(handle.thread().id());
					handles.push(handle);
				}
				Err(source) => {
					// Workers that did start keep draining and are joined by `wait`.
					slot.phase = JoinPhase::Running(handles);
					return Err(QueueError::Spawn { index, source });
				}
			}
		}
		slot.phase = JoinPhase::Running(handles);
		tracing::debug!(queue = %self.shared.name, workers, policy = ?policy, "queue.start");
		Ok(())
	}

	/// Clears the liveness flag and wakes every worker. Never blocks.
	///
	/// Queued items, and items pushed while a worker is still busy, are
	/// delivered before the workers exit.
	pub fn kill(&self) {
		let mut state = self.shared.state.lock();
		let was_alive = mem::replace(&mut state.alive, false);
		let pending = state.items.len();
		drop(state);
		self.shared.ready.notify_all();
		if was_alive {
			tracing::debug!(queue = %self.shared.name, pending, "queue.kill");
		}
	}

	/// Blocks until every worker has exited, then returns the drain counters.
	///
	/// Only returns once the queue is killed and drained, or every worker died.
	/// Concurrent and repeated callers all receive the same report.
	pub fn wait(&self) -> Result<DrainReport> {
		let handles = {
			let mut slot = self.join.slot.lock();
			let current = thread::current().id();
			if slot.threads.contains(&current) {
				return Err(QueueError::WaitFromWorker);
			}
			loop {
				match mem::replace(&mut slot.phase, JoinPhase::Joining) {
					JoinPhase::Running(handles) => break handles,
					JoinPhase::Joining => self.join.done.wait(&mut slot),
					JoinPhase::Idle => {
						slot.phase = JoinPhase::Idle;
						return Err(QueueError::NotStarted);
					}
					JoinPhase::Joined(report) => {
						slot.phase = JoinPhase::Joined(report);
						return Ok(report);
					}
				}
			}
		};

		let mut workers_lost = 0;
		for handle in handles {
			if let Err(payload) = handle.join() {
				workers_lost += 1;
				tracing::error!(queue = %self.shared.name, panic = %describe_panic(&*payload), "queue.worker.lost");
			}
		}

		let report = {
			let state = self.shared.state.lock();
			DrainReport {
				delivered: state.delivered,
				faulted: state.faulted,
				dropped: state.dropped,
				pending: state.items.len(),
				workers_lost,
			}
		};
		self.join.slot.lock().phase = JoinPhase::Joined(report);
		self.join.done.notify_all();
		tracing::debug!(queue = %self.shared.name, ?report, "queue.joined");
		Ok(report)
	}

	pub fn lifecycle(&self) -> Lifecycle {
		self.shared.state.lock().lifecycle()
	}

	/// Number of queued items not yet claimed by a worker.
	pub fn len(&self) -> usize {
		self.shared.state.lock().items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T> Drop for WorkQueue<T> {
	fn drop(&mut self) {
		// Detached workers drain what is left and exit.
		self.shared.state.lock().alive = false;
		self.shared.ready.notify_all();
	}
}
