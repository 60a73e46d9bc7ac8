pub mod models;
pub mod manager;
pub mod finance;

pub use models::OrderItem;
pub use manager::OrderItemManager;
pub use finance::{PaymentMethod, PriceSummary, SettlementError, Tender, Transaction};
