use bigdecimal::BigDecimal;

use crate::domain::client::Client;
use crate::domain::errors::StoreError;
use crate::domain::order::{Order, OrderId};

/// The in-memory registry owning every client and order for one session.
///
/// The manager holds the canonical collections; clients reference orders by
/// id only. All mutation goes through the manager, which keeps the two views
/// consistent: an order appears in its owner's id list if and only if it
/// appears in the global list.
#[derive(Debug, Default)]
pub struct StoreManager {
    clients: Vec<Client>,
    orders: Vec<Order>,
    next_order_id: OrderId,
}

impl StoreManager {
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
            orders: Vec::new(),
            next_order_id: 1,
        }
    }

    // ── Clients ──────────────────────────────────────────────────────────────

    /// Registers a new client. Fails with [`StoreError::DuplicateClient`] when
    /// a client with the same name (case-insensitive) already exists, leaving
    /// the registry unchanged. Phone and email are stored as given.
    pub fn add_client(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<&Client, StoreError> {
        let name = name.into();
        if self.clients.iter().any(|c| c.matches_name(&name)) {
            return Err(StoreError::DuplicateClient(name));
        }
        log::info!("registering client \"{}\"", name);
        self.clients.push(Client::new(name, phone, email));
        Ok(self.clients.last().expect("just pushed"))
    }

    /// Every client whose name contains `query` as a case-insensitive
    /// substring, in insertion order. An empty query matches every client.
    pub fn find_clients(&self, query: &str) -> Vec<&Client> {
        self.clients.iter().filter(|c| c.name_contains(query)).collect()
    }

    /// Exact case-insensitive lookup. At most one client can match, since
    /// `add_client` enforces name uniqueness.
    pub fn get_client_by_name(&self, name: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.matches_name(name))
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    // ── Orders ───────────────────────────────────────────────────────────────

    /// Opens an empty order for the named client: allocates the next id,
    /// appends the order to the global list and its id to the client's list.
    /// Ids are strictly increasing from 1 and never reused, including ids of
    /// orders later discarded.
    pub fn add_order(&mut self, client_name: &str) -> Result<OrderId, StoreError> {
        let client = self
            .clients
            .iter_mut()
            .find(|c| c.matches_name(client_name))
            .ok_or_else(|| StoreError::ClientNotFound(client_name.to_string()))?;

        let id = self.next_order_id;
        self.next_order_id += 1;
        client.push_order(id);
        self.orders.push(Order::new(id));
        log::info!("opened order {} for client \"{}\"", id, client.name);
        Ok(id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == id)
    }

    pub fn order_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id() == id)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Removes an order from both the global list and its owner's id list in
    /// one step. Either both removals happen or neither does; the id counter
    /// is not rewound. This is the rollback path for orders abandoned with no
    /// items, though nothing here checks emptiness.
    pub fn discard_order(&mut self, id: OrderId) -> Result<(), StoreError> {
        let idx = self
            .orders
            .iter()
            .position(|o| o.id() == id)
            .ok_or(StoreError::OrderNotFound(id))?;
        let owner = self
            .clients
            .iter_mut()
            .find(|c| c.order_ids().contains(&id))
            .ok_or(StoreError::OrderNotFound(id))?;

        owner.remove_order(id);
        self.orders.remove(idx);
        log::info!("discarded order {}", id);
        Ok(())
    }

    // ── Summaries ────────────────────────────────────────────────────────────

    /// One line per order of `client`, or a fixed message when there are none.
    pub fn orders_summary(&self, client: &Client) -> String {
        if client.order_ids().is_empty() {
            return "This client has no orders yet.".to_string();
        }
        client
            .order_ids()
            .iter()
            .filter_map(|&id| self.order(id))
            .map(|o| o.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Newline-joined client summaries, insertion order.
    pub fn list_clients(&self) -> String {
        self.clients
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Newline-joined order summaries, insertion order.
    pub fn list_orders(&self) -> String {
        self.orders
            .iter()
            .map(|o| o.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Sum of every order's total across the global list.
    pub fn total_revenue(&self) -> BigDecimal {
        self.orders
            .iter()
            .fold(BigDecimal::from(0), |acc, o| acc + o.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn price(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal literal")
    }

    #[test]
    fn add_client_rejects_case_insensitive_duplicate() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        let err = manager.add_client("ANNA", "2", "b@x.com").unwrap_err();
        assert_eq!(err, StoreError::DuplicateClient("ANNA".to_string()));
        assert_eq!(manager.clients().len(), 1);
        assert_eq!(manager.clients()[0].phone, "1");
    }

    #[test]
    fn order_ids_increase_from_one_across_clients() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        manager.add_client("Bob", "2", "b@x.com").unwrap();

        assert_eq!(manager.add_order("Anna").unwrap(), 1);
        assert_eq!(manager.add_order("Bob").unwrap(), 2);
        assert_eq!(manager.add_order("anna").unwrap(), 3);

        let anna = manager.get_client_by_name("Anna").unwrap();
        assert_eq!(anna.order_ids(), &[1, 3]);
    }

    #[test]
    fn add_order_for_unknown_client_fails() {
        let mut manager = StoreManager::new();
        let err = manager.add_order("Nobody").unwrap_err();
        assert_eq!(err, StoreError::ClientNotFound("Nobody".to_string()));
        assert!(manager.orders().is_empty());
    }

    #[test]
    fn find_clients_matches_substring_in_insertion_order() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        manager.add_client("bob", "2", "b@x.com").unwrap();
        manager.add_client("Anthony", "3", "c@x.com").unwrap();

        let found: Vec<&str> = manager
            .find_clients("an")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(found, vec!["Anna", "Anthony"]);
    }

    #[test]
    fn find_clients_with_empty_query_matches_everyone() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        manager.add_client("bob", "2", "b@x.com").unwrap();
        assert_eq!(manager.find_clients("").len(), 2);
    }

    #[test]
    fn get_client_by_name_is_exact_case_insensitive() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        assert!(manager.get_client_by_name("aNNa").is_some());
        assert!(manager.get_client_by_name("Ann").is_none());
    }

    #[test]
    fn discard_order_removes_from_both_lists_and_keeps_counter() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        let id = manager.add_order("Anna").unwrap();

        manager.discard_order(id).unwrap();

        assert!(manager.order(id).is_none());
        assert!(manager
            .get_client_by_name("Anna")
            .unwrap()
            .order_ids()
            .is_empty());
        // Ids are never reused, even after a rollback.
        assert_eq!(manager.add_order("Anna").unwrap(), 2);
    }

    #[test]
    fn discard_order_unknown_id_fails() {
        let mut manager = StoreManager::new();
        assert_eq!(
            manager.discard_order(9).unwrap_err(),
            StoreError::OrderNotFound(9)
        );
    }

    #[test]
    fn orders_summary_without_orders_uses_fixed_message() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        let anna = manager.get_client_by_name("Anna").unwrap();
        assert_eq!(manager.orders_summary(anna), "This client has no orders yet.");
    }

    #[test]
    fn orders_summary_joins_order_lines() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        let first = manager.add_order("Anna").unwrap();
        manager
            .order_mut(first)
            .unwrap()
            .add_product("Tea", price("10"), 2);
        let second = manager.add_order("Anna").unwrap();
        manager
            .order_mut(second)
            .unwrap()
            .add_product("Honey", price("5"), 1);

        let anna = manager.get_client_by_name("Anna").unwrap();
        assert_eq!(
            manager.orders_summary(anna),
            "Order 1: Tea x2 | Total: 20\nOrder 2: Honey x1 | Total: 5"
        );
    }

    #[test]
    fn total_revenue_sums_all_remaining_orders() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        let kept = manager.add_order("Anna").unwrap();
        manager
            .order_mut(kept)
            .unwrap()
            .add_product("Tea", price("9.99"), 2);
        let abandoned = manager.add_order("Anna").unwrap();
        manager.discard_order(abandoned).unwrap();

        assert_eq!(manager.total_revenue(), price("19.98"));
    }

    #[test]
    fn list_clients_and_orders_join_with_newlines() {
        let mut manager = StoreManager::new();
        manager.add_client("Anna", "1", "a@x.com").unwrap();
        manager.add_client("Bob", "2", "b@x.com").unwrap();
        manager.add_order("Anna").unwrap();
        manager.add_order("Bob").unwrap();

        assert_eq!(manager.list_clients().lines().count(), 2);
        assert_eq!(manager.list_orders().lines().count(), 2);
        assert!(manager.list_clients().starts_with("Anna | "));
    }
}
