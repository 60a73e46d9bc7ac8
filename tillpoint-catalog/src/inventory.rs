use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tillpoint_core::numeric::{format_amount, parse_decimal, round_money};
use tillpoint_core::{EngineError, EngineResult, Operator};
use tillpoint_shared::models::inventory::{NO_DEPENDENCY, UNNAMED_AMOUNT_KEY};
use tillpoint_shared::{
    AmountTable, DecrementDependency, InventoryConfig, Literal, MultiplierEntry,
    OrderItemSelection,
};
use tracing::debug;

/// Ledger key used for selections that have no order item yet
pub const DEFAULT_PREVIEW_KEY: &str = "new";

/// Result of running selections through the ledger.
///
/// `inventory` is the configuration after every movement; `amounts` holds the
/// amounts table as it stood right after each selection was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerOutcome {
    pub inventory: InventoryConfig,
    pub amounts: BTreeMap<String, AmountTable>,
}

/// One stock movement derived from a selection
#[derive(Debug, Clone, PartialEq)]
struct Movement {
    key: String,
    amount: Decimal,
}

/// Computes inventory movements for order-item selections.
///
/// Evaluation never touches the configuration it is given; callers decide
/// whether the returned configuration gets persisted.
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    preview_key: String,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self {
            preview_key: DEFAULT_PREVIEW_KEY.to_string(),
        }
    }

    pub fn with_preview_key(preview_key: impl Into<String>) -> Self {
        Self {
            preview_key: preview_key.into(),
        }
    }

    /// Apply `op` for every selection in order, each on top of the last.
    pub fn evaluate(
        &self,
        config: &InventoryConfig,
        selections: &[OrderItemSelection],
        op: Operator,
    ) -> EngineResult<LedgerOutcome> {
        let mut inventory = config.clone();
        let mut amounts = BTreeMap::new();

        if !inventory.manage_item_inventory {
            return Ok(LedgerOutcome { inventory, amounts });
        }

        for selection in selections {
            let movement = movement(&inventory, selection)?;

            let entry = inventory
                .depends_on
                .amounts
                .get_mut(&movement.key)
                .ok_or_else(|| EngineError::UnknownInventoryKey(movement.key.clone()))?;
            let available = parse_decimal(entry.as_str())?;
            let updated = round_money(op.apply(movement.amount, available)?);
            *entry = Literal::new(format_amount(updated));

            debug!(
                key = %movement.key,
                amount = %movement.amount,
                op = %op,
                available = %available,
                updated = %updated,
                "inventory movement"
            );

            let ledger_key = selection
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| self.preview_key.clone());
            amounts.insert(ledger_key, inventory.depends_on.amounts.clone());
        }

        Ok(LedgerOutcome { inventory, amounts })
    }
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn movement(config: &InventoryConfig, selection: &OrderItemSelection) -> EngineResult<Movement> {
    let quantity = Decimal::from(selection.quantity);

    if config.is_single_unit() {
        return Ok(Movement {
            key: UNNAMED_AMOUNT_KEY.to_string(),
            amount: quantity,
        });
    }

    let names = &config.decrement_depends_on.names;
    let mut amount = Decimal::ONE;
    let mut key = None;
    let mut multiplier_keys: [Option<&str>; 2] = [None, None];

    for field in &selection.configurations {
        if field.label == config.decrementer {
            amount = parse_decimal(field.value.as_str())?;
        }
        if field.label == config.depends_on.name {
            key = Some(field.value.as_str());
        }
        if let Some(index) = names.iter().take(2).position(|name| *name == field.label) {
            multiplier_keys[index] = Some(field.value.as_str());
        }
    }

    let key = if config.depends_on.name == NO_DEPENDENCY {
        UNNAMED_AMOUNT_KEY
    } else {
        key.ok_or_else(|| EngineError::SelectionNotFound(config.depends_on.name.clone()))?
    };

    if let Some(multiplier) = decrement_multiplier(&config.decrement_depends_on, multiplier_keys)? {
        amount = Operator::Multiply.apply(multiplier, amount)?;
    }

    Ok(Movement {
        key: key.to_string(),
        amount: Operator::Multiply.apply(quantity, amount)?,
    })
}

/// Multiplier for the consumed amount, `None` when the table has no entry.
fn decrement_multiplier(
    dependency: &DecrementDependency,
    [first, second]: [Option<&str>; 2],
) -> EngineResult<Option<Decimal>> {
    let Some(first) = first else {
        return Ok(None);
    };

    let literal = match dependency.amounts.get(first) {
        Some(MultiplierEntry::Flat(literal)) => Some(literal),
        Some(MultiplierEntry::Nested(inner)) => second.and_then(|s| inner.get(s)),
        None => None,
    };

    literal.map(|l| parse_decimal(l.as_str())).transpose()
}
