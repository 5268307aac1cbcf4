pub mod client;
pub mod errors;
pub mod order;

pub use client::Client;
pub use errors::StoreError;
pub use order::{LineItem, Order, OrderId};
