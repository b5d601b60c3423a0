use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::ProductId;
use stockroom_events::Event;
use stockroom_products::ProductEvent;

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductNotFound (a removal targeted a product the store does not hold).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductNotFound {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineItemPurchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemPurchased {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub total: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineItemFailed.
///
/// `label` is the product name, or its id when the store does not hold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemFailed {
    pub product_id: ProductId,
    pub label: String,
    pub quantity: i64,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    ProductAdded(ProductAdded),
    ProductRemoved(ProductRemoved),
    ProductNotFound(ProductNotFound),
    LineItemPurchased(LineItemPurchased),
    LineItemFailed(LineItemFailed),
    /// A notice raised by one of the store's products.
    Product(ProductEvent),
}

impl From<ProductEvent> for StoreEvent {
    fn from(value: ProductEvent) -> Self {
        StoreEvent::Product(value)
    }
}

impl Event for StoreEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::ProductAdded(_) => "store.product.added",
            StoreEvent::ProductRemoved(_) => "store.product.removed",
            StoreEvent::ProductNotFound(_) => "store.product.not_found",
            StoreEvent::LineItemPurchased(_) => "store.order.line_purchased",
            StoreEvent::LineItemFailed(_) => "store.order.line_failed",
            StoreEvent::Product(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            StoreEvent::Product(e) => e.version(),
            _ => 1,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StoreEvent::ProductAdded(e) => e.occurred_at,
            StoreEvent::ProductRemoved(e) => e.occurred_at,
            StoreEvent::ProductNotFound(e) => e.occurred_at,
            StoreEvent::LineItemPurchased(e) => e.occurred_at,
            StoreEvent::LineItemFailed(e) => e.occurred_at,
            StoreEvent::Product(e) => e.occurred_at(),
        }
    }
}

impl core::fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreEvent::ProductAdded(e) => write!(f, "Added {} to the store.", e.name),
            StoreEvent::ProductRemoved(e) => write!(f, "Removed {} from the store.", e.name),
            StoreEvent::ProductNotFound(e) => {
                write!(f, "Product {} not found in the store.", e.product_id)
            }
            StoreEvent::LineItemPurchased(e) => {
                write!(f, "Purchased {} of {}.", e.quantity, e.name)
            }
            StoreEvent::LineItemFailed(e) => {
                write!(f, "Order failed for {}: {}", e.label, e.reason)
            }
            StoreEvent::Product(e) => core::fmt::Display::fmt(e, f),
        }
    }
}
