use async_trait::async_trait;
use tillpoint_shared::{InventoryConfig, Item};
use uuid::Uuid;

use crate::EngineResult;

/// Storage collaborator for item records and their inventory.
///
/// The engine works on snapshots handed out by `get_item`. Implementations
/// must serialize read-modify-write of one item's inventory; `save_inventory`
/// is an optimistic write that only succeeds while the stored version still
/// equals `expected_version`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn get_item(&self, id: Uuid) -> EngineResult<Option<Item>>;

    /// Returns the new inventory version, or `EngineError::InventoryConflict`.
    async fn save_inventory(
        &self,
        id: Uuid,
        expected_version: u64,
        inventory: &InventoryConfig,
    ) -> EngineResult<u64>;
}
