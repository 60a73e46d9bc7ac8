use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::literal::Literal;

/// `dependsOn.name` value meaning the stock is a single un-keyed amount
pub const NO_DEPENDENCY: &str = "none";

/// `decrementer` value meaning every order consumes exactly one unit
pub const ONE_PER_ORDER: &str = "1_per_order";

/// Key of the single amount entry used when stock is not split by option
pub const UNNAMED_AMOUNT_KEY: &str = "";

/// Remaining quantity per controlling option value, as decimal text
pub type AmountTable = BTreeMap<String, Literal>;

/// Per-item inventory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryConfig {
    #[serde(default)]
    pub manage_item_inventory: bool,

    #[serde(default)]
    pub depends_on: InventoryDependency,

    /// Label of the field whose value is the consumed amount
    #[serde(default = "default_decrementer")]
    pub decrementer: String,

    #[serde(default)]
    pub decrement_depends_on: DecrementDependency,
}

fn default_decrementer() -> String {
    ONE_PER_ORDER.to_string()
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            manage_item_inventory: false,
            depends_on: InventoryDependency::default(),
            decrementer: default_decrementer(),
            decrement_depends_on: DecrementDependency::default(),
        }
    }
}

impl InventoryConfig {
    /// Stock kept as one amount, one unit per order.
    pub fn is_single_unit(&self) -> bool {
        self.depends_on.name == NO_DEPENDENCY && self.decrementer == ONE_PER_ORDER
    }
}

/// Which field's value selects the stock entry, plus the stock itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryDependency {
    #[serde(default = "default_dependency_name")]
    pub name: String,
    #[serde(default)]
    pub amounts: AmountTable,
}

fn default_dependency_name() -> String {
    NO_DEPENDENCY.to_string()
}

impl Default for InventoryDependency {
    fn default() -> Self {
        Self {
            name: default_dependency_name(),
            amounts: AmountTable::new(),
        }
    }
}

/// Multiplier applied to the consumed amount, keyed by up to two fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecrementDependency {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub amounts: BTreeMap<String, MultiplierEntry>,
}

/// One level of the decrement multiplier table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultiplierEntry {
    Flat(Literal),
    Nested(BTreeMap<String, Literal>),
}
