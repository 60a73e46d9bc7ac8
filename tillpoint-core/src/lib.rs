pub mod numeric;
pub mod operator;
pub mod repository;

pub use operator::Operator;

use uuid::Uuid;

/// Failures surfaced by the pricing and inventory engine.
///
/// All of these are local validation failures. None are retried internally.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Unsupported operator: {0:?}")]
    UnsupportedOperator(String),

    #[error("Invalid numeric literal: {0:?}")]
    InvalidNumericLiteral(String),

    #[error("Numeric overflow evaluating {0}")]
    NumericOverflow(String),

    #[error("Dependency pricing for field {0:?} has no dependency block")]
    MissingDependencyConfig(String),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("No selection for field {0:?}")]
    SelectionNotFound(String),

    #[error("Unknown inventory key: {0:?}")]
    UnknownInventoryKey(String),

    #[error("Inventory for item {item_id} changed concurrently: expected version {expected}, found {found}")]
    InventoryConflict {
        item_id: Uuid,
        expected: u64,
        found: u64,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
