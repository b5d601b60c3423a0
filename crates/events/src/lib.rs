//! Domain events (notices) and the sinks that receive them.

pub mod event;
pub mod handler;
pub mod sink;

pub use event::Event;
pub use handler::execute;
pub use sink::{EventSink, NullSink};
