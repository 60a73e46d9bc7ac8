use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::literal::Literal;

/// Pricing strategy of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceBy {
    /// Fixed amount taken from `constantValue`
    #[serde(rename = "Constant")]
    Constant,
    /// Amount looked up in `perOptionMapping` by the selected option
    #[serde(rename = "Per Option")]
    PerOption,
    /// The selected value itself is a multiplier
    #[serde(rename = "Option Value")]
    OptionValue,
    /// `constantValue` scaled by the selected value
    #[serde(rename = "Scaled Option Value")]
    ScaledOptionValue,
    /// Amount resolved through another field's selection
    #[serde(rename = "Dependency")]
    Dependency,
    /// Free-form input priced like a constant
    #[serde(rename = "Input")]
    Input,
    /// No price effect
    #[default]
    #[serde(rename = "")]
    Unpriced,
}

impl PriceBy {
    /// Whether pricing this field reads the customer's selected value.
    pub fn reads_selection(self) -> bool {
        matches!(
            self,
            PriceBy::PerOption | PriceBy::OptionValue | PriceBy::ScaledOptionValue | PriceBy::Dependency
        )
    }
}

/// Form element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Select,
    TextField,
    #[serde(other)]
    Other,
}

/// Cross-field price dependency.
///
/// `values` is keyed first by this field's own selected value, then by the
/// selected value of the field named `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceDependency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, BTreeMap<String, Literal>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    #[serde(default = "default_affects_price")]
    pub affects_price: bool,

    #[serde(default)]
    pub is_base_price: bool,

    /// `+` for additive contributions, `×` for multiplicative ones
    #[serde(default = "default_price_factor")]
    pub price_factor: String,

    #[serde(default)]
    pub price_by: PriceBy,

    #[serde(default)]
    pub constant_value: Literal,

    #[serde(default)]
    pub per_option_mapping: BTreeMap<String, Literal>,

    #[serde(default)]
    pub depends_on: Option<PriceDependency>,
}

fn default_affects_price() -> bool {
    true
}

fn default_price_factor() -> String {
    "+".to_string()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            affects_price: true,
            is_base_price: false,
            price_factor: default_price_factor(),
            price_by: PriceBy::Unpriced,
            constant_value: Literal::default(),
            per_option_mapping: BTreeMap::new(),
            depends_on: None,
        }
    }
}

impl PricingConfig {
    /// True when the field's contribution is combined additively.
    pub fn is_additive(&self) -> bool {
        self.price_factor == "+"
    }
}

/// One customizable attribute of a sellable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub label: String,

    #[serde(rename = "type", default)]
    pub kind: FieldKind,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, alias = "pricingConfig")]
    pub pricing_config: PricingConfig,
}

impl FieldConfig {
    pub fn new(label: impl Into<String>, pricing_config: PricingConfig) -> Self {
        Self {
            label: label.into(),
            kind: FieldKind::Select,
            options: Vec::new(),
            placeholder: None,
            pricing_config,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}
