use async_trait::async_trait;
use std::collections::HashMap;
use tillpoint_core::repository::ItemRepository;
use tillpoint_core::{EngineError, EngineResult};
use tillpoint_shared::{InventoryConfig, Item};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Item store held in process memory.
///
/// Inventory writes are serialized by the lock and guarded by the item's
/// `inventory_version`, so a writer holding a stale snapshot is rejected.
pub struct InMemoryItemRepository {
    items: RwLock<HashMap<Uuid, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().map(|item| (item.id, item)).collect()),
        }
    }

    /// Insert or replace an item record
    pub async fn upsert(&self, item: Item) {
        self.items.write().await.insert(item.id, item);
    }

    /// All items, sorted by name
    pub async fn snapshot(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        items
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn get_item(&self, id: Uuid) -> EngineResult<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn save_inventory(
        &self,
        id: Uuid,
        expected_version: u64,
        inventory: &InventoryConfig,
    ) -> EngineResult<u64> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(EngineError::ItemNotFound(id))?;

        if item.inventory_version != expected_version {
            warn!(item_id = %id, expected_version, found = item.inventory_version, "stale inventory write rejected");
            return Err(EngineError::InventoryConflict {
                item_id: id,
                expected: expected_version,
                found: item.inventory_version,
            });
        }

        item.inventory = inventory.clone();
        item.inventory_version += 1;
        debug!(item_id = %id, version = item.inventory_version, "inventory stored");
        Ok(item.inventory_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked_item() -> Item {
        let mut inventory = InventoryConfig::default();
        inventory.manage_item_inventory = true;
        inventory.depends_on.amounts.insert(String::new(), "5".into());
        Item::new("Cookie", vec![]).with_inventory(inventory)
    }

    #[tokio::test]
    async fn test_versioned_writes() {
        let item = tracked_item();
        let repo = InMemoryItemRepository::with_items(vec![item.clone()]);

        let mut next = item.inventory.clone();
        next.depends_on.amounts.insert(String::new(), "4.0".into());

        assert_eq!(repo.save_inventory(item.id, 0, &next).await.unwrap(), 1);

        // A second writer still holding version 0 loses
        let err = repo.save_inventory(item.id, 0, &next).await.unwrap_err();
        assert!(matches!(err, EngineError::InventoryConflict { expected: 0, found: 1, .. }));

        let stored = repo.get_item(item.id).await.unwrap().unwrap();
        assert_eq!(stored.inventory.depends_on.amounts[""], "4.0");
    }

    #[tokio::test]
    async fn test_missing_item() {
        let repo = InMemoryItemRepository::new();
        let id = Uuid::new_v4();

        assert!(repo.get_item(id).await.unwrap().is_none());
        let err = repo
            .save_inventory(id, 0, &InventoryConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ItemNotFound(_)));
    }

    #[tokio::test]
    async fn test_snapshot_sorted_by_name() {
        let repo = InMemoryItemRepository::new();
        repo.upsert(Item::new("Shake", vec![])).await;
        repo.upsert(Item::new("Cone", vec![])).await;

        let names: Vec<String> = repo.snapshot().await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Cone", "Shake"]);
    }
}
