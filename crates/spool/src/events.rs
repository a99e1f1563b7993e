//! Stock events understood by the bundled actors.

use std::fmt;

use crate::{ActorRef, Event, EventKind, same_actor};

/// Asks the spool to shut down once every reaction has drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminate {
	reason: String,
}

impl Terminate {
	pub fn new(reason: impl Into<String>) -> Self {
		Self { reason: reason.into() }
	}

	pub fn reason(&self) -> &str {
		&self.reason
	}
}

impl Event for Terminate {
	fn description(&self) -> String {
		format!("Terminating: {}", self.reason)
	}

	fn kind(&self) -> EventKind {
		EventKind::Terminate
	}
}

/// Something was said, optionally by a known actor.
#[derive(Clone)]
pub struct Say {
	speaker: Option<ActorRef>,
	message: String,
}

impl Say {
	/// An anonymous utterance.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			speaker: None,
			message: message.into(),
		}
	}

	/// An utterance attributed to `speaker`.
	pub fn spoken_by(speaker: ActorRef, message: impl Into<String>) -> Self {
		Self {
			speaker: Some(speaker),
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn speaker(&self) -> Option<&ActorRef> {
		self.speaker.as_ref()
	}

	/// Returns true when `actor` is the speaker.
	pub fn is_from(&self, actor: &ActorRef) -> bool {
		self.speaker.as_ref().is_some_and(|speaker| same_actor(speaker, actor))
	}
}

impl fmt::Debug for Say {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Say")
			.field("attributed", &self.speaker.is_some())
			.field("message", &self.message)
			.finish()
	}
}

impl Event for Say {
	fn description(&self) -> String {
		"Someone said something".to_string()
	}
}

/// Asks the [`Registrar`](crate::actors::Registrar) to register a new actor.
#[derive(Clone)]
pub struct Spawn {
	id: String,
	actor: ActorRef,
}

impl Spawn {
	pub fn new(id: impl Into<String>, actor: ActorRef) -> Self {
		Self { id: id.into(), actor }
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn actor(&self) -> &ActorRef {
		&self.actor
	}
}

impl fmt::Debug for Spawn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Spawn").field("id", &self.id).finish_non_exhaustive()
	}
}

impl Event for Spawn {
	fn description(&self) -> String {
		"Spawning an actor".to_string()
	}
}

/// Which actor a [`Destroy`] removes.
#[derive(Clone)]
pub enum Target {
	/// The actor registered under this id.
	Id(String),
	/// Every registration of this actor.
	Actor(ActorRef),
}

impl fmt::Debug for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Id(id) => f.debug_tuple("Id").field(id).finish(),
			Self::Actor(_) => f.write_str("Actor(..)"),
		}
	}
}

/// Asks the [`Registrar`](crate::actors::Registrar) to unregister an actor.
#[derive(Debug, Clone)]
pub struct Destroy {
	target: Target,
}

impl Destroy {
	pub fn id(id: impl Into<String>) -> Self {
		Self { target: Target::Id(id.into()) }
	}

	pub fn actor(actor: ActorRef) -> Self {
		Self {
			target: Target::Actor(actor),
		}
	}

	pub fn target(&self) -> &Target {
		&self.target
	}
}

impl Event for Destroy {
	fn description(&self) -> String {
		"Destroying an actor".to_string()
	}
}
