pub mod models;

pub use models::inventory::{
    AmountTable, DecrementDependency, InventoryConfig, InventoryDependency, MultiplierEntry,
};
pub use models::item::Item;
pub use models::literal::Literal;
pub use models::schema::{FieldConfig, FieldKind, PriceBy, PriceDependency, PricingConfig};
pub use models::selection::{OrderItemSelection, SelectedConfig};
