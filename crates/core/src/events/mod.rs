//! Domain events module.
//!
//! Provides the sink traits services report outcomes through, the domain
//! event type, and sink implementations. Runtime adapters (CLI, GUI)
//! implement a sink to translate outcomes into platform-specific actions.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
