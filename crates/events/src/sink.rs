//! Notice delivery.
//!
//! A sink is where events go once an operation has decided them. The domain
//! never writes to the console; whoever owns the sink decides whether events
//! are printed, logged, collected for assertions, or dropped.

/// Receives events in the order they were emitted.
pub trait EventSink<E> {
    fn emit(&mut self, event: E);

    fn emit_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = E>,
        Self: Sized,
    {
        for event in events {
            self.emit(event);
        }
    }
}

/// Collects events; drain it to consume them.
impl<E> EventSink<E> for Vec<E> {
    fn emit(&mut self, event: E) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullSink;

impl<E> EventSink<E> for NullSink {
    fn emit(&mut self, _event: E) {}
}

impl<E, S> EventSink<E> for &mut S
where
    S: EventSink<E> + ?Sized,
{
    fn emit(&mut self, event: E) {
        (**self).emit(event)
    }
}
