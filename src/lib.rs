pub mod cli;
pub mod domain;
pub mod store;

pub use domain::{Client, LineItem, Order, OrderId, StoreError};
pub use store::StoreManager;
