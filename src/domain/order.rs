use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

/// Sequential order identifier, unique for the lifetime of one manager.
pub type OrderId = u64;

/// One product entry within an order. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product: String,
    pub unit_price: BigDecimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn subtotal(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// A purchase event: a sequence of line items in insertion order.
///
/// Orders are created empty by the manager and filled through
/// [`Order::add_product`]. An order left empty is expected to be rolled back
/// by the caller via the manager; nothing here enforces that.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    created_at: DateTime<Utc>,
    items: Vec<LineItem>,
}

impl Order {
    pub(crate) fn new(id: OrderId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a line item. Price and quantity are taken as given; callers
    /// must have validated positivity already.
    pub fn add_product(
        &mut self,
        product: impl Into<String>,
        unit_price: BigDecimal,
        quantity: u32,
    ) {
        self.items.push(LineItem {
            product: product.into(),
            unit_price,
            quantity,
        });
    }

    /// Sum of `unit_price * quantity` over all items; zero for an empty order.
    pub fn total(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + item.subtotal())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self
            .items
            .iter()
            .map(|item| format!("{} x{}", item.product, item.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Order {}: {} | Total: {}", self.id, items, self.total())
    }
}
