use std::fs;
use std::path::Path;
use tillpoint_shared::Item;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CatalogFileError {
    #[error("Failed to access catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read item records from a JSON array file.
pub fn load_catalog(path: &Path) -> Result<Vec<Item>, CatalogFileError> {
    let raw = fs::read_to_string(path)?;
    let items: Vec<Item> = serde_json::from_str(&raw)?;
    info!(path = %path.display(), count = items.len(), "catalog loaded");
    Ok(items)
}

/// Write item records back, replacing the file.
pub fn save_catalog(path: &Path, items: &[Item]) -> Result<(), CatalogFileError> {
    let raw = serde_json::to_string_pretty(items)?;
    fs::write(path, raw)?;
    info!(path = %path.display(), count = items.len(), "catalog saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("tillpoint-catalog-{}.json", uuid::Uuid::new_v4()));
        let items = vec![Item::new("Cone", vec![])];

        save_catalog(&path, &items).unwrap();
        let loaded = load_catalog(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, items);
    }

    #[test]
    fn test_malformed_file() {
        let path = std::env::temp_dir().join(format!("tillpoint-bad-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, "{ not json").unwrap();

        let err = load_catalog(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, CatalogFileError::Json(_)));
    }
}
