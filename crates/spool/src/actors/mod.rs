//! Stock actors for common chores: applying spawn/destroy requests and
//! writing speech to an output stream.

mod narrator;
mod registrar;

pub use narrator::Narrator;
pub use registrar::Registrar;
