use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::inventory::InventoryConfig;
use super::schema::FieldConfig;

/// A sellable item as handed over by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Ordered field schema
    #[serde(default)]
    pub form_cfg: Vec<FieldConfig>,
    /// Tax rate in percent; `None` falls back to the configured default
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Bumped by the store on every committed inventory write
    #[serde(default)]
    pub inventory_version: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, form_cfg: Vec<FieldConfig>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category_id: None,
            form_cfg,
            tax_rate: None,
            inventory: InventoryConfig::default(),
            inventory_version: 0,
        }
    }

    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    pub fn with_inventory(mut self, inventory: InventoryConfig) -> Self {
        self.inventory = inventory;
        self
    }

    /// Effective tax rate in percent
    pub fn tax_rate_or(&self, default_rate: Decimal) -> Decimal {
        self.tax_rate.unwrap_or(default_rate)
    }
}
