use std::sync::Arc;

use crate::{Event, Spool};

/// A participant that reacts to events broadcast through a [`Spool`].
///
/// Reactions may submit further events, register or unregister actors, and
/// look up peers through `spool`. The same actor can be invoked on several
/// workers at once; implementations guard their own state.
pub trait Actor: Send + Sync + 'static {
	/// Handles one delivered event. Events the actor does not recognise are ignored.
	fn react(&self, event: &dyn Event, spool: &Spool);
}

impl<F> Actor for F
where
	F: Fn(&dyn Event, &Spool) + Send + Sync + 'static,
{
	fn react(&self, event: &dyn Event, spool: &Spool) {
		self(event, spool)
	}
}

/// Shared handle to a registered actor.
pub type ActorRef = Arc<dyn Actor>;

/// Returns true when both handles point at the same actor allocation.
pub fn same_actor(lhs: &ActorRef, rhs: &ActorRef) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(lhs), Arc::as_ptr(rhs))
}
