use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillpoint_catalog::PriceQuote;
use tillpoint_shared::{Item, OrderItemSelection, SelectedConfig};
use uuid::Uuid;

/// A priced item within an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub configurations: Vec<SelectedConfig>,
    pub quantity: u32,
    /// Unit price including tax
    pub price: Decimal,
    /// Unit tax
    pub tax: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderItem {
    pub fn new(id: Uuid, item: &Item, selection: &OrderItemSelection, quote: PriceQuote) -> Self {
        let now = Utc::now();
        Self {
            id,
            item_id: item.id,
            item_name: item.name.clone(),
            configurations: selection.configurations.clone(),
            quantity: selection.quantity,
            price: quote.price,
            tax: quote.tax,
            created_at: now,
            updated_at: now,
        }
    }

    /// The selection this item was created from, carrying the item's id
    pub fn selection(&self) -> OrderItemSelection {
        OrderItemSelection::new(self.item_id, self.configurations.clone())
            .with_id(self.id)
            .with_quantity(self.quantity)
    }

    /// Replace selections and price after an edit
    pub fn reprice(&mut self, configurations: Vec<SelectedConfig>, quantity: u32, quote: PriceQuote) {
        self.configurations = configurations;
        self.quantity = quantity;
        self.price = quote.price;
        self.tax = quote.tax;
        self.updated_at = Utc::now();
    }

    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn line_tax(&self) -> Decimal {
        self.tax * Decimal::from(self.quantity)
    }
}
