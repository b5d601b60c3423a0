//! Store module: the product collection and order processing.
//!
//! Orders are processed line by line with skip-and-continue semantics: a line
//! that cannot be bought is reported and skipped, never rolled back.

pub mod event;
pub mod order;
pub mod store;

pub use event::{
    LineItemFailed, LineItemPurchased, ProductAdded, ProductNotFound, ProductRemoved, StoreEvent,
};
pub use order::{LineOutcome, OrderLine, OrderReceipt};
pub use store::Store;
