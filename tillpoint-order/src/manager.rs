use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tillpoint_catalog::{InventoryLedger, LedgerOutcome, PriceEvaluator, PriceQuote};
use tillpoint_core::repository::ItemRepository;
use tillpoint_core::{EngineError, EngineResult, Operator};
use tillpoint_shared::{AmountTable, Item, OrderItemSelection, SelectedConfig};
use tracing::info;
use uuid::Uuid;

use crate::models::OrderItem;

/// Runs pricing and inventory for order-item lifecycle events.
///
/// Items come from the repository as snapshots. Every committing call
/// writes inventory back at most once, guarded by the snapshot's version;
/// a concurrent writer surfaces as `EngineError::InventoryConflict` and the
/// whole call can be retried by the caller.
pub struct OrderItemManager {
    items: Arc<dyn ItemRepository>,
    ledger: InventoryLedger,
    default_tax_rate: Decimal,
}

impl OrderItemManager {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self {
            items,
            ledger: InventoryLedger::new(),
            default_tax_rate: Decimal::ZERO,
        }
    }

    /// Tax rate in percent for items that carry none
    pub fn with_default_tax_rate(mut self, rate: Decimal) -> Self {
        self.default_tax_rate = rate;
        self
    }

    pub fn with_ledger(mut self, ledger: InventoryLedger) -> Self {
        self.ledger = ledger;
        self
    }

    /// Unit price of `item_id` for the given selections.
    pub async fn quote(&self, item_id: Uuid, configurations: &[SelectedConfig]) -> EngineResult<PriceQuote> {
        let item = self.load(item_id).await?;
        self.price(&item, configurations)
    }

    /// Inventory after the selection would be taken, without committing.
    ///
    /// Returns `None` for items whose inventory is not tracked.
    pub async fn preview(&self, selection: &OrderItemSelection) -> EngineResult<Option<AmountTable>> {
        let item = self.load(selection.item_id).await?;
        let outcome = self
            .ledger
            .evaluate(&item.inventory, std::slice::from_ref(selection), Operator::DECREMENT)?;
        Ok(outcome.amounts.into_values().next())
    }

    /// Apply `op` for `selections` against one item's inventory.
    ///
    /// With `commit` the new inventory is written back; otherwise the result
    /// is only reported.
    pub async fn adjust(
        &self,
        item_id: Uuid,
        selections: &[OrderItemSelection],
        op: Operator,
        commit: bool,
    ) -> EngineResult<BTreeMap<String, AmountTable>> {
        let item = self.load(item_id).await?;
        let outcome = self.ledger.evaluate(&item.inventory, selections, op)?;
        if commit {
            self.commit(&item, &outcome).await?;
        }
        Ok(outcome.amounts)
    }

    /// Price a new order item and take its stock.
    pub async fn create(&self, selection: &OrderItemSelection) -> EngineResult<OrderItem> {
        let item = self.load(selection.item_id).await?;
        let quote = self.price(&item, &selection.configurations)?;

        let id = selection.id.unwrap_or_else(Uuid::new_v4);
        let keyed = selection.clone().with_id(id);
        let outcome = self
            .ledger
            .evaluate(&item.inventory, std::slice::from_ref(&keyed), Operator::DECREMENT)?;
        self.commit(&item, &outcome).await?;

        Ok(OrderItem::new(id, &item, &keyed, quote))
    }

    /// Re-price an edited order item, returning its old stock and taking the new.
    pub async fn update(
        &self,
        existing: &OrderItem,
        configurations: Vec<SelectedConfig>,
        quantity: u32,
    ) -> EngineResult<OrderItem> {
        let item = self.load(existing.item_id).await?;
        let quote = self.price(&item, &configurations)?;

        let mut updated = existing.clone();
        updated.reprice(configurations, quantity, quote);

        let returned = self
            .ledger
            .evaluate(&item.inventory, &[existing.selection()], Operator::INCREMENT)?;
        let outcome = self
            .ledger
            .evaluate(&returned.inventory, &[updated.selection()], Operator::DECREMENT)?;
        self.commit(&item, &outcome).await?;

        Ok(updated)
    }

    /// Put a removed order item's stock back.
    pub async fn delete(&self, existing: &OrderItem) -> EngineResult<LedgerOutcome> {
        let item = self.load(existing.item_id).await?;
        let outcome = self
            .ledger
            .evaluate(&item.inventory, &[existing.selection()], Operator::INCREMENT)?;
        self.commit(&item, &outcome).await?;
        Ok(outcome)
    }

    async fn load(&self, item_id: Uuid) -> EngineResult<Item> {
        self.items
            .get_item(item_id)
            .await?
            .ok_or(EngineError::ItemNotFound(item_id))
    }

    fn price(&self, item: &Item, configurations: &[SelectedConfig]) -> EngineResult<PriceQuote> {
        PriceEvaluator::new(&item.form_cfg)
            .evaluate(configurations, item.tax_rate_or(self.default_tax_rate))
    }

    async fn commit(&self, item: &Item, outcome: &LedgerOutcome) -> EngineResult<()> {
        if !item.inventory.manage_item_inventory {
            return Ok(());
        }
        let version = self
            .items
            .save_inventory(item.id, item.inventory_version, &outcome.inventory)
            .await?;
        info!(item_id = %item.id, version, "inventory committed");
        Ok(())
    }
}
