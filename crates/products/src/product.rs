use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Price, ProductId};
use stockroom_events::{Event, execute};

/// Aggregate root: Product.
///
/// `active` normally tracks `quantity > 0`, but [`Product::activate`] and
/// [`Product::deactivate`] set it directly without touching stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    quantity: i64,
    active: bool,
    version: u64,
}

impl Product {
    /// Create a product with validated attributes.
    ///
    /// The product starts active only when it has stock.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> DomainResult<Self> {
        Self::with_id(ProductId::new(), name, price, quantity)
    }

    /// Same as [`Product::new`] with a caller-chosen identifier.
    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation("Product name cannot be empty."));
        }
        let price = Price::new(price)?;
        if quantity < 0 {
            return Err(DomainError::validation("Product quantity cannot be negative."));
        }

        Ok(Self {
            id,
            name,
            price,
            quantity,
            active: quantity > 0,
            version: 0,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// One-line snapshot: `name, Price: P, Quantity: Q`.
    pub fn show(&self) -> String {
        self.to_string()
    }

    /// Set the stock level. Setting it to zero also deactivates the product.
    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<Vec<ProductEvent>> {
        execute(
            self,
            &ProductCommand::SetQuantity(SetQuantity {
                quantity,
                occurred_at: Utc::now(),
            }),
        )
    }

    /// Make the product available again. Does not restock.
    pub fn activate(&mut self) -> DomainResult<Vec<ProductEvent>> {
        execute(
            self,
            &ProductCommand::Activate(Activate {
                occurred_at: Utc::now(),
            }),
        )
    }

    pub fn deactivate(&mut self) -> DomainResult<Vec<ProductEvent>> {
        execute(
            self,
            &ProductCommand::Deactivate(Deactivate {
                occurred_at: Utc::now(),
            }),
        )
    }

    /// Sell `quantity` units and return what they cost.
    pub fn buy(&mut self, quantity: i64) -> DomainResult<Purchase> {
        let events = execute(
            self,
            &ProductCommand::Buy(Buy {
                quantity,
                occurred_at: Utc::now(),
            }),
        )?;
        let total = events
            .iter()
            .filter_map(ProductEvent::purchase_total)
            .fold(0.0, |acc, total| acc + total);
        Ok(Purchase { total, events })
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}, Price: {}, Quantity: {}",
            self.name, self.price, self.quantity
        )
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Outcome of a successful [`Product::buy`].
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    /// Price paid: quantity × unit price.
    pub total: f64,
    /// Notices raised by the purchase, in order.
    pub events: Vec<ProductEvent>,
}

/// Command: SetQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Activate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activate {
    pub occurred_at: DateTime<Utc>,
}

/// Command: Deactivate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deactivate {
    pub occurred_at: DateTime<Utc>,
}

/// Command: Buy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buy {
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    SetQuantity(SetQuantity),
    Activate(Activate),
    Deactivate(Deactivate),
    Buy(Buy),
}

/// Event: QuantitySet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitySet {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductActivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductActivated {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeactivated {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductPurchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPurchased {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Price,
    pub total: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductEvent {
    QuantitySet(QuantitySet),
    ProductActivated(ProductActivated),
    ProductDeactivated(ProductDeactivated),
    ProductPurchased(ProductPurchased),
}

impl ProductEvent {
    pub fn product_id(&self) -> ProductId {
        match self {
            ProductEvent::QuantitySet(e) => e.product_id,
            ProductEvent::ProductActivated(e) => e.product_id,
            ProductEvent::ProductDeactivated(e) => e.product_id,
            ProductEvent::ProductPurchased(e) => e.product_id,
        }
    }

    fn purchase_total(&self) -> Option<f64> {
        match self {
            ProductEvent::ProductPurchased(e) => Some(e.total),
            _ => None,
        }
    }
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::QuantitySet(_) => "products.product.quantity_set",
            ProductEvent::ProductActivated(_) => "products.product.activated",
            ProductEvent::ProductDeactivated(_) => "products.product.deactivated",
            ProductEvent::ProductPurchased(_) => "products.product.purchased",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::QuantitySet(e) => e.occurred_at,
            ProductEvent::ProductActivated(e) => e.occurred_at,
            ProductEvent::ProductDeactivated(e) => e.occurred_at,
            ProductEvent::ProductPurchased(e) => e.occurred_at,
        }
    }
}

impl core::fmt::Display for ProductEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProductEvent::QuantitySet(e) => {
                write!(f, "{} quantity set to {}.", e.name, e.quantity)
            }
            ProductEvent::ProductActivated(e) => write!(f, "{} has been activated.", e.name),
            ProductEvent::ProductDeactivated(e) => write!(f, "{} has been deactivated.", e.name),
            ProductEvent::ProductPurchased(e) => write!(
                f,
                "Purchase successful! Total for {} of {}: ${:.2}",
                e.quantity, e.name, e.total
            ),
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::QuantitySet(e) => {
                self.quantity = e.quantity;
            }
            ProductEvent::ProductActivated(_) => {
                self.active = true;
            }
            ProductEvent::ProductDeactivated(_) => {
                self.active = false;
            }
            ProductEvent::ProductPurchased(e) => {
                self.quantity -= e.quantity;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            ProductCommand::Activate(cmd) => Ok(vec![self.activated(cmd.occurred_at)]),
            ProductCommand::Deactivate(cmd) => Ok(vec![self.deactivated(cmd.occurred_at)]),
            ProductCommand::Buy(cmd) => self.handle_buy(cmd),
        }
    }
}

impl Product {
    fn activated(&self, occurred_at: DateTime<Utc>) -> ProductEvent {
        ProductEvent::ProductActivated(ProductActivated {
            product_id: self.id,
            name: self.name.clone(),
            occurred_at,
        })
    }

    fn deactivated(&self, occurred_at: DateTime<Utc>) -> ProductEvent {
        ProductEvent::ProductDeactivated(ProductDeactivated {
            product_id: self.id,
            name: self.name.clone(),
            occurred_at,
        })
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> Result<Vec<ProductEvent>, DomainError> {
        if cmd.quantity < 0 {
            return Err(DomainError::validation(
                "Quantity cannot be set to a negative number.",
            ));
        }

        let mut events = vec![ProductEvent::QuantitySet(QuantitySet {
            product_id: self.id,
            name: self.name.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })];
        if cmd.quantity == 0 {
            events.push(self.deactivated(cmd.occurred_at));
        }
        Ok(events)
    }

    fn handle_buy(&self, cmd: &Buy) -> Result<Vec<ProductEvent>, DomainError> {
        if !self.active {
            return Err(DomainError::inactive(&self.name));
        }
        if cmd.quantity <= 0 {
            return Err(DomainError::InvalidPurchaseQuantity(cmd.quantity));
        }
        if cmd.quantity > self.quantity {
            return Err(DomainError::insufficient_stock(
                &self.name,
                self.quantity,
                cmd.quantity,
            ));
        }

        let mut events = vec![ProductEvent::ProductPurchased(ProductPurchased {
            product_id: self.id,
            name: self.name.clone(),
            quantity: cmd.quantity,
            unit_price: self.price,
            total: self.price.times(cmd.quantity),
            occurred_at: cmd.occurred_at,
        })];
        if cmd.quantity == self.quantity {
            events.push(self.deactivated(cmd.occurred_at));
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64, quantity: i64) -> Product {
        Product::new(name, price, quantity).unwrap()
    }

    #[test]
    fn new_product_reflects_given_values() {
        let p = product("MacBook Air M2", 1450.0, 100);
        assert_eq!(p.name(), "MacBook Air M2");
        assert_eq!(p.price().value(), 1450.0);
        assert_eq!(p.quantity(), 100);
        assert!(p.is_active());
        assert_eq!(p.version(), 0);
        assert_eq!(p.show(), "MacBook Air M2, Price: 1450.0, Quantity: 100");
    }

    #[test]
    fn new_product_without_stock_starts_inactive() {
        let p = product("Sony PlayStation 5", 499.99, 0);
        assert!(!p.is_active());
        assert_eq!(p.show(), "Sony PlayStation 5, Price: 499.99, Quantity: 0");
    }

    #[test]
    fn new_product_rejects_empty_name() {
        let err = Product::new("", 1.0, 1).unwrap_err();
        assert_eq!(err, DomainError::validation("Product name cannot be empty."));
    }

    #[test]
    fn new_product_rejects_negative_price() {
        let err = Product::new("Cable", -1.0, 1).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn new_product_rejects_negative_quantity() {
        let err = Product::new("Cable", 1.0, -1).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Product quantity cannot be negative.")
        );
    }

    #[test]
    fn buy_returns_total_and_decrements_stock() {
        let mut p = product("X", 10.0, 5);
        let purchase = p.buy(3).unwrap();
        assert_eq!(purchase.total, 30.0);
        assert_eq!(p.quantity(), 2);
        assert!(p.is_active());
        assert_eq!(purchase.events.len(), 1);
        assert_eq!(
            purchase.events[0].to_string(),
            "Purchase successful! Total for 3 of X: $30.00"
        );
    }

    #[test]
    fn buying_the_last_units_deactivates() {
        let mut p = product("X", 2.5, 4);
        let purchase = p.buy(4).unwrap();
        assert_eq!(purchase.total, 10.0);
        assert_eq!(p.quantity(), 0);
        assert!(!p.is_active());
        assert!(matches!(
            purchase.events.as_slice(),
            [ProductEvent::ProductPurchased(_), ProductEvent::ProductDeactivated(_)]
        ));
    }

    #[test]
    fn buy_rejects_zero_and_negative_quantities() {
        let mut p = product("X", 10.0, 5);
        assert_eq!(p.buy(0).unwrap_err(), DomainError::InvalidPurchaseQuantity(0));
        assert_eq!(
            p.buy(-2).unwrap_err(),
            DomainError::InvalidPurchaseQuantity(-2)
        );
        assert_eq!(p.quantity(), 5);
        assert_eq!(p.version(), 0);
    }

    #[test]
    fn buy_over_stock_leaves_quantity_unchanged() {
        let mut p = product("Google Pixel 7", 500.0, 2);
        let err = p.buy(3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not enough stock for Google Pixel 7. Available: 2, Requested: 3"
        );
        assert_eq!(p.quantity(), 2);
    }

    #[test]
    fn buy_rejects_inactive_product_before_checking_quantity() {
        let mut p = product("X", 10.0, 5);
        p.deactivate().unwrap();
        assert_eq!(p.buy(0).unwrap_err(), DomainError::inactive("X"));
        assert_eq!(p.quantity(), 5);
    }

    #[test]
    fn set_quantity_zero_deactivates_until_reactivated() {
        let mut p = product("X", 10.0, 5);
        let events = p.set_quantity(0).unwrap();
        assert_eq!(p.quantity(), 0);
        assert!(!p.is_active());
        assert_eq!(events.last().unwrap().to_string(), "X has been deactivated.");

        assert_eq!(p.buy(1).unwrap_err(), DomainError::inactive("X"));

        p.set_quantity(3).unwrap();
        assert!(!p.is_active(), "restocking alone does not reactivate");
        let events = p.activate().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].to_string(), "X has been activated.");
        assert_eq!(p.buy(1).unwrap().total, 10.0);
    }

    #[test]
    fn set_quantity_rejects_negative() {
        let mut p = product("X", 10.0, 5);
        let err = p.set_quantity(-1).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(p.quantity(), 5);
    }

    #[test]
    fn activate_does_not_restock() {
        let mut p = product("X", 10.0, 1);
        p.buy(1).unwrap();
        p.activate().unwrap();
        assert!(p.is_active());
        assert_eq!(p.quantity(), 0);
        assert_eq!(
            p.buy(1).unwrap_err(),
            DomainError::insufficient_stock("X", 0, 1)
        );
    }

    #[test]
    fn activation_is_unconditional() {
        let mut p = product("X", 10.0, 1);
        for _ in 0..2 {
            let events = p.activate().unwrap();
            assert!(matches!(
                events.as_slice(),
                [ProductEvent::ProductActivated(_)]
            ));
        }
        assert!(p.is_active());
        assert_eq!(p.version(), 2);
    }

    #[test]
    fn deactivate_runs_through_command_handling() {
        let mut p = product("X", 10.0, 5);
        let expected = p
            .handle(&ProductCommand::Deactivate(Deactivate {
                occurred_at: Utc::now(),
            }))
            .unwrap();
        let events = p.deactivate().unwrap();

        assert_eq!(events.len(), expected.len());
        assert_eq!(events[0].event_type(), expected[0].event_type());
        assert_eq!(events[0].to_string(), "X has been deactivated.");
        assert!(!p.is_active());
        assert_eq!(p.quantity(), 5);
        assert_eq!(p.version(), 1);
    }

    #[test]
    fn buy_total_starts_from_positive_zero() {
        let mut p = product("Free sample", 0.0, 3);
        let purchase = p.buy(2).unwrap();
        assert_eq!(purchase.total, 0.0);
        assert!(!purchase.total.is_sign_negative());
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let p = product("X", 10.0, 5);
        let before = p.clone();
        let events = p
            .handle(&ProductCommand::Buy(Buy {
                quantity: 5,
                occurred_at: Utc::now(),
            }))
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(p, before);
    }

    #[test]
    fn events_carry_stable_types() {
        let mut p = product("X", 1.0, 1);
        let events = p.buy(1).unwrap().events;
        let types: Vec<_> = events.iter().map(Event::event_type).collect();
        assert_eq!(
            types,
            vec!["products.product.purchased", "products.product.deactivated"]
        );
        assert!(events.iter().all(|e| e.product_id() == p.id_typed()));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: valid attributes always construct, and the snapshot reflects them.
            #[test]
            fn valid_attributes_construct(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                price in 0.0f64..100_000.0,
                quantity in 0i64..1_000_000
            ) {
                let p = Product::new(name.clone(), price, quantity).unwrap();
                prop_assert_eq!(p.is_active(), quantity > 0);
                let show = p.show();
                let expected_prefix = format!("{name}, Price: ");
                let expected_suffix = format!(", Quantity: {quantity}");
                prop_assert!(show.starts_with(&expected_prefix));
                prop_assert!(show.ends_with(&expected_suffix));
            }

            /// Property: buying within stock returns q × price and decrements by q.
            #[test]
            fn buy_within_stock(
                (stock, q) in (1i64..10_000).prop_flat_map(|stock| (Just(stock), 1..=stock)),
                price in 0.0f64..10_000.0
            ) {
                let mut p = Product::new("Item", price, stock).unwrap();
                let purchase = p.buy(q).unwrap();
                prop_assert_eq!(purchase.total, q as f64 * price);
                prop_assert_eq!(p.quantity(), stock - q);
                prop_assert_eq!(p.is_active(), stock - q > 0);
            }

            /// Property: non-positive quantities never sell, whatever the stock.
            #[test]
            fn non_positive_quantities_never_sell(
                stock in 0i64..10_000,
                q in -10_000i64..=0
            ) {
                let mut p = Product::new("Item", 1.0, stock).unwrap();
                p.activate().unwrap();
                prop_assert!(p.buy(q).is_err());
                prop_assert_eq!(p.quantity(), stock);
            }

            /// Property: asking for more than the stock fails and changes nothing.
            #[test]
            fn over_stock_fails_without_side_effects(
                stock in 0i64..10_000,
                extra in 1i64..10_000
            ) {
                let mut p = Product::new("Item", 1.0, stock).unwrap();
                p.activate().unwrap();
                let before = p.clone();
                let err = p.buy(stock + extra).unwrap_err();
                prop_assert_eq!(err, DomainError::insufficient_stock("Item", stock, stock + extra));
                prop_assert_eq!(p, before);
            }
        }
    }
}
