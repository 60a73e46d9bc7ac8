pub mod pairing;
pub mod dependency;
pub mod pricing;
pub mod inventory;

pub use pairing::{pair_by_label, FieldPair};
pub use pricing::{PriceBreakdown, PriceEvaluator, PriceQuote};
pub use inventory::{InventoryLedger, LedgerOutcome};
