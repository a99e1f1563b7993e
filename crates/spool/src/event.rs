use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The one distinction the spool itself makes between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum EventKind {
	/// Broadcast and forgotten.
	#[default]
	Ordinary,
	/// Broadcast, then the spool starts draining towards shutdown.
	Terminate,
}

/// Something that happened, broadcast to every registered actor.
///
/// Events are immutable once submitted and shared between all deliveries.
/// Actors recognise the events they care about with [`downcast_ref`](dyn Event::downcast_ref).
pub trait Event: Any + Send + Sync {
	/// Human-readable description, for diagnostics only.
	fn description(&self) -> String;

	fn kind(&self) -> EventKind {
		EventKind::Ordinary
	}
}

/// Shared handle to a submitted event.
pub type EventRef = Arc<dyn Event>;

impl dyn Event {
	pub fn is_terminal(&self) -> bool {
		self.kind() == EventKind::Terminate
	}

	/// Returns the concrete event if it is an `E`.
	pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
		let any: &dyn Any = self;
		any.downcast_ref::<E>()
	}

	pub fn is<E: Event>(&self) -> bool {
		self.downcast_ref::<E>().is_some()
	}
}

impl fmt::Debug for dyn Event {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Event")
			.field("kind", &self.kind())
			.field("description", &self.description())
			.finish()
	}
}
