use std::fmt;

use super::order::OrderId;

/// A named customer with contact info and the ids of the orders they own.
///
/// Clients reference orders by id; the canonical `Order` values live in the
/// manager's global list. Names are unique per manager under case-insensitive
/// comparison, enforced at insertion time by the manager.
#[derive(Debug, Clone)]
pub struct Client {
    pub name: String,
    pub phone: String,
    pub email: String,
    order_ids: Vec<OrderId>,
}

impl Client {
    pub(crate) fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            order_ids: Vec::new(),
        }
    }

    pub fn order_ids(&self) -> &[OrderId] {
        &self.order_ids
    }

    pub fn order_count(&self) -> usize {
        self.order_ids.len()
    }

    /// Exact name match, case-insensitive. Unicode lowercase, not ASCII-only;
    /// client names are not restricted to ASCII.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Case-insensitive substring match against the client name.
    pub fn name_contains(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    pub(crate) fn push_order(&mut self, id: OrderId) {
        self.order_ids.push(id);
    }

    pub(crate) fn remove_order(&mut self, id: OrderId) -> bool {
        match self.order_ids.iter().position(|&o| o == id) {
            Some(idx) => {
                self.order_ids.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Phone: {} | Email: {} | Orders: {}",
            self.name,
            self.phone,
            self.email,
            self.order_count()
        )
    }
}
