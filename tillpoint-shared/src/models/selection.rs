use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::literal::Literal;

/// The customer's chosen value for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedConfig {
    pub label: String,
    #[serde(default)]
    pub value: Literal,
}

impl SelectedConfig {
    pub fn new(label: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An item plus the customer's selections for it.
///
/// `id` is the order item's identifier once it exists; a selection that has
/// not been persisted yet carries `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemSelection {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub item_id: Uuid,
    #[serde(default)]
    pub configurations: Vec<SelectedConfig>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl OrderItemSelection {
    pub fn new(item_id: Uuid, configurations: Vec<SelectedConfig>) -> Self {
        Self {
            id: None,
            item_id,
            configurations,
            quantity: 1,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Selected value for `label`, if the customer supplied one
    pub fn value_of(&self, label: &str) -> Option<&Literal> {
        self.configurations
            .iter()
            .find(|c| c.label == label)
            .map(|c| &c.value)
    }
}
