use chrono::Utc;
use tracing::{debug, info, warn};

use stockroom_core::{DomainError, DomainResult, ProductId};
use stockroom_events::{EventSink, NullSink};
use stockroom_products::Product;

use crate::event::{
    LineItemFailed, LineItemPurchased, ProductAdded, ProductNotFound, ProductRemoved, StoreEvent,
};
use crate::order::{LineOutcome, OrderLine, OrderReceipt};

/// A single store: an ordered product collection plus the sink its notices
/// are delivered to.
///
/// The collection keeps insertion order and may hold inactive products;
/// listing and ordering only ever surface active ones.
#[derive(Debug)]
pub struct Store<S = NullSink> {
    products: Vec<Product>,
    sink: S,
}

impl Store<NullSink> {
    /// Store whose notices are discarded (logs still record them).
    pub fn new(products: Vec<Product>) -> Self {
        Self::with_sink(products, NullSink)
    }
}

impl<S> Store<S>
where
    S: EventSink<StoreEvent>,
{
    pub fn with_sink(products: Vec<Product>, sink: S) -> Self {
        debug!(products = products.len(), "store opened");
        Self { products, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Every product held, active or not, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    /// Direct access to a held product. Notices returned by its operations
    /// are the caller's to deliver.
    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id_typed() == id)
    }

    pub fn add_product(&mut self, product: Product) -> ProductId {
        let product_id = product.id_typed();
        info!(product = %product.name(), %product_id, "product added");
        self.sink.emit(StoreEvent::ProductAdded(ProductAdded {
            product_id,
            name: product.name().to_string(),
            occurred_at: Utc::now(),
        }));
        self.products.push(product);
        product_id
    }

    /// Remove a product by id, returning it if the store held it.
    pub fn remove_product(&mut self, product_id: ProductId) -> Option<Product> {
        let occurred_at = Utc::now();
        match self.products.iter().position(|p| p.id_typed() == product_id) {
            Some(index) => {
                let product = self.products.remove(index);
                info!(product = %product.name(), %product_id, "product removed");
                self.sink.emit(StoreEvent::ProductRemoved(ProductRemoved {
                    product_id,
                    name: product.name().to_string(),
                    occurred_at,
                }));
                Some(product)
            }
            None => {
                warn!(%product_id, "removal requested for unknown product");
                self.sink.emit(StoreEvent::ProductNotFound(ProductNotFound {
                    product_id,
                    occurred_at,
                }));
                None
            }
        }
    }

    /// Units in stock across all products, inactive ones included.
    pub fn total_quantity(&self) -> i64 {
        self.products.iter().map(Product::quantity).sum()
    }

    /// Active products only, in insertion order.
    pub fn active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    pub fn activate_product(&mut self, product_id: ProductId) -> DomainResult<()> {
        let events = self.find_mut(product_id)?.activate()?;
        self.sink.emit_all(events.into_iter().map(StoreEvent::from));
        Ok(())
    }

    pub fn deactivate_product(&mut self, product_id: ProductId) -> DomainResult<()> {
        let events = self.find_mut(product_id)?.deactivate()?;
        self.sink.emit_all(events.into_iter().map(StoreEvent::from));
        Ok(())
    }

    pub fn set_product_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> DomainResult<()> {
        let events = self.find_mut(product_id)?.set_quantity(quantity)?;
        self.sink.emit_all(events.into_iter().map(StoreEvent::from));
        Ok(())
    }

    /// Process an order and return the total price of the lines that sold.
    ///
    /// Failed lines are reported through the sink and skipped.
    pub fn order(&mut self, shopping_list: &[OrderLine]) -> f64 {
        self.place_order(shopping_list).total()
    }

    /// Process an order line by line and report every outcome.
    ///
    /// Lines are independent: a failure never aborts the order and never
    /// undoes lines that already sold.
    pub fn place_order(&mut self, shopping_list: &[OrderLine]) -> OrderReceipt {
        let mut receipt = OrderReceipt::default();
        for line in shopping_list {
            let outcome = self.process_line(*line);
            receipt.record(outcome);
        }
        info!(
            lines = shopping_list.len(),
            total = receipt.total(),
            "order processed"
        );
        receipt
    }

    fn process_line(&mut self, line: OrderLine) -> LineOutcome {
        let Some(index) = self
            .products
            .iter()
            .position(|p| p.id_typed() == line.product_id)
        else {
            let error = DomainError::not_found(format!("Product {}", line.product_id));
            let label = line.product_id.to_string();
            return self.line_failed(line, label, error);
        };

        let product = &mut self.products[index];
        match product.buy(line.quantity) {
            Ok(purchase) => {
                let name = product.name().to_string();
                info!(
                    product = %name,
                    quantity = line.quantity,
                    total = purchase.total,
                    "line item purchased"
                );
                self.sink
                    .emit_all(purchase.events.into_iter().map(StoreEvent::from));
                self.sink.emit(StoreEvent::LineItemPurchased(LineItemPurchased {
                    product_id: line.product_id,
                    name,
                    quantity: line.quantity,
                    total: purchase.total,
                    occurred_at: Utc::now(),
                }));
                LineOutcome::Purchased {
                    line,
                    total: purchase.total,
                }
            }
            Err(error) => {
                let label = product.name().to_string();
                self.line_failed(line, label, error)
            }
        }
    }

    fn line_failed(&mut self, line: OrderLine, label: String, error: DomainError) -> LineOutcome {
        info!(product = %label, quantity = line.quantity, %error, "line item skipped");
        self.sink.emit(StoreEvent::LineItemFailed(LineItemFailed {
            product_id: line.product_id,
            label,
            quantity: line.quantity,
            reason: error.to_string(),
            occurred_at: Utc::now(),
        }));
        LineOutcome::Failed { line, error }
    }

    fn find_mut(&mut self, product_id: ProductId) -> DomainResult<&mut Product> {
        self.product_mut(product_id)
            .ok_or_else(|| DomainError::not_found(format!("Product {product_id}")))
    }
}
