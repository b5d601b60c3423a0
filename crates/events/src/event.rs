use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - **renderable**: `Display` yields the notice shown to the operator
pub trait Event: Clone + core::fmt::Debug + core::fmt::Display + 'static {
    /// Stable event name/type identifier (e.g. "products.product.purchased").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
