use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use parking_lot::RwLock;

use crate::{ActorRef, Result, SpoolError, same_actor};

/// Id-keyed actor table guarded independently of the delivery queue.
///
/// Readers always copy out of the lock, so dispatch never iterates a map
/// that another thread is mutating.
#[derive(Default)]
pub(crate) struct Registry {
	actors: RwLock<BTreeMap<String, ActorRef>>,
}

impl Registry {
	/// Inserts one actor. An occupied id is left untouched.
	pub fn insert(&self, id: String, actor: ActorRef) -> Result<()> {
		match self.actors.write().entry(id) {
			Entry::Occupied(entry) => Err(SpoolError::DuplicateActor(entry.key().clone())),
			Entry::Vacant(entry) => {
				entry.insert(actor);
				Ok(())
			}
		}
	}

	pub fn remove(&self, id: &str) -> Option<ActorRef> {
		self.actors.write().remove(id)
	}

	/// Removes every registration of `actor`, returning how many were removed.
	pub fn remove_actor(&self, actor: &ActorRef) -> usize {
		let removed: Vec<ActorRef> = {
			let mut actors = self.actors.write();
			let ids: Vec<String> = actors
				.iter()
				.filter(|(_, registered)| same_actor(registered, actor))
				.map(|(id, _)| id.clone())
				.collect();
			ids.iter().filter_map(|id| actors.remove(id)).collect()
		};
		// Released outside the lock: the last handle may run an actor's Drop.
		removed.len()
	}

	pub fn get(&self, id: &str) -> Option<ActorRef> {
		self.actors.read().get(id).cloned()
	}

	/// Copies the current actors, ordered by id.
	pub fn snapshot(&self) -> Vec<ActorRef> {
		self.actors.read().values().cloned().collect()
	}

	pub fn ids(&self) -> Vec<String> {
		self.actors.read().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.actors.read().len()
	}
}
