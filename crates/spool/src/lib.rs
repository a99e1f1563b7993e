#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Actor registry and event broadcaster.
//!
//! A [`Spool`] owns a set of named [`Actor`]s and a pool of worker threads.
//! Every submitted [`Event`] is fanned out to a snapshot of the registered
//! actors, one delivery per actor. Submitting an event of kind
//! [`EventKind::Terminate`] starts a draining shutdown: the terminate event
//! still reaches every actor, and anything those reactions submit is
//! delivered before [`Spool::wait`] returns.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use spool::events::{Say, Terminate};
//! use spool::{Event, Spool};
//!
//! let spool = Spool::new();
//! spool
//! 	.register("echo", Arc::new(|event: &dyn Event, spool: &Spool| {
//! 		if event.downcast_ref::<Say>().is_some_and(|say| say.message() == "hey") {
//! 			spool.submit(Say::new("hi"));
//! 		}
//! 	}))
//! 	.unwrap();
//! spool.run().unwrap();
//! spool.submit(Say::new("hey"));
//! spool.submit(Terminate::new("done"));
//! spool.wait().unwrap();
//! ```

mod actor;
pub mod actors;
mod config;
mod error;
mod event;
pub mod events;
mod registry;
mod spool;

pub use actor::{Actor, ActorRef, same_actor};
pub use config::SpoolConfig;
pub use error::{Result, SpoolError};
pub use event::{Event, EventKind, EventRef};
pub use spool::{Spool, Submission};
pub use spool_queue::{DrainReport, Lifecycle, PanicPolicy, PushOutcome, QueueError};
