use crate::models::ListingMap;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON file holding every listing seen so far, keyed by id
pub struct ListingStore {
    path: PathBuf,
}

impl ListingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted listings; a missing file is an empty store
    pub async fn load(&self) -> Result<ListingMap> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to check {}", self.path.display()))?;
        if !exists {
            debug!("No store at {}, starting empty", self.path.display());
            return Ok(ListingMap::new());
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let listings: ListingMap = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        info!("Loaded {} persisted listings", listings.len());
        Ok(listings)
    }

    /// Replace the store with `listings`, pretty-printed.
    ///
    /// Writes a sibling temp file first and renames it into place, so readers
    /// never see a half-written store.
    pub async fn save(&self, listings: &ListingMap) -> Result<()> {
        let json = serde_json::to_string_pretty(listings)?;
        let tmp = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        info!("💾 Saved {} listings to {}", listings.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Listing, Source};
    use chrono::NaiveDate;

    fn sample() -> ListingMap {
        let listing = Listing {
            id: "duproprio-42".to_string(),
            price: 275_000,
            city: Some("Trois-Rivières".to_string()),
            address: Some("3 rue Notre-Dame".to_string()),
            description: "Jumelé".to_string(),
            image_url: "https://photos.duproprio.com/42.jpg".to_string(),
            url: "https://duproprio.com/fr/42".to_string(),
            date_scanned: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            source: Source::DuProprio,
        };
        ListingMap::from([(listing.id.clone(), listing)])
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path().join("listings.json"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saved_store_loads_back_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path().join("listings.json"));

        store.save(&sample()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), sample());
        assert!(!dir.path().join("listings.json.tmp").exists());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"duproprio-42\": {"));
        assert!(raw.contains("\"dateScanned\": \"2024-05-01\""));
    }

    #[tokio::test]
    async fn unreachable_store_is_an_error_not_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected makes the lookup itself fail
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = ListingStore::new(blocker.join("listings.json"));

        let err = store.load().await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to check"));
    }

    #[tokio::test]
    async fn corrupt_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(ListingStore::new(path).load().await.is_err());
    }
}
