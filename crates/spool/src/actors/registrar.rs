use crate::events::{Destroy, Spawn, Target};
use crate::{Actor, Event, Spool};

/// Applies [`Spawn`] and [`Destroy`] requests to the spool delivering them.
///
/// Lets actors add or remove peers at runtime by submitting an event instead
/// of holding on to the registry themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct Registrar;

impl Actor for Registrar {
	fn react(&self, event: &dyn Event, spool: &Spool) {
		if let Some(spawn) = event.downcast_ref::<Spawn>() {
			if let Err(error) = spool.register(spawn.id(), spawn.actor().clone()) {
				tracing::warn!(%error, "registrar.spawn.rejected");
			}
		} else if let Some(destroy) = event.downcast_ref::<Destroy>() {
			let removed = match destroy.target() {
				Target::Id(id) => usize::from(spool.unregister(id).is_some()),
				Target::Actor(actor) => spool.unregister_actor(actor),
			};
			tracing::trace!(removed, "registrar.destroy");
		}
	}
}
