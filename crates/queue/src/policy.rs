use serde::Deserialize;

/// What a worker does when the consumer panics on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanicPolicy {
	/// Catch the panic, log it, count it as faulted and keep the worker alive.
	#[default]
	Contain,
	/// Let the worker thread unwind and exit. The pool shrinks by one.
	Abandon,
}
