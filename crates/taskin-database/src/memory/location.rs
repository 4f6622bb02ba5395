//! In-memory provider location store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use taskin_core::result::AppResult;
use taskin_entity::location::ProviderLocation;

use crate::repositories::location::LocationRepository;

/// Dashmap-backed location store, keyed by (provider, request).
#[derive(Debug, Default)]
pub struct MemoryLocationRepository {
    rows: DashMap<(Uuid, Option<Uuid>), ProviderLocation>,
}

impl MemoryLocationRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for MemoryLocationRepository {
    async fn upsert(&self, location: &ProviderLocation) -> AppResult<ProviderLocation> {
        let key = (location.provider_id, location.request_id);
        let stored = self
            .rows
            .entry(key)
            .and_modify(|row| {
                row.latitude = location.latitude;
                row.longitude = location.longitude;
                row.updated_at = location.updated_at;
            })
            .or_insert_with(|| location.clone())
            .clone();
        Ok(stored)
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<ProviderLocation>> {
        let latest = self
            .rows
            .iter()
            .filter(|row| row.request_id == Some(request_id))
            .max_by_key(|row| row.updated_at)
            .map(|row| row.clone());
        Ok(latest)
    }

    async fn delete_by_request(&self, request_id: Uuid) -> AppResult<bool> {
        let before = self.rows.len();
        self.rows.retain(|_, row| row.request_id != Some(request_id));
        Ok(self.rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskin_core::types::geo::GeoPoint;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_overwrites_in_place() {
        let repo = MemoryLocationRepository::new();
        let provider = Uuid::new_v4();
        let request = Uuid::new_v4();

        let first = ProviderLocation::new(provider, Some(request), point(12.90, 77.50));
        repo.upsert(&first).await.unwrap();

        let mut second = ProviderLocation::new(provider, Some(request), point(12.95, 77.55));
        second.updated_at = first.updated_at + chrono::Duration::seconds(5);
        repo.upsert(&second).await.unwrap();

        let latest = repo.find_by_request(request).await.unwrap().unwrap();
        assert_eq!(latest.latitude, 12.95);
        assert_eq!(repo.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_request_clears_rows() {
        let repo = MemoryLocationRepository::new();
        let request = Uuid::new_v4();
        let row = ProviderLocation::new(Uuid::new_v4(), Some(request), point(1.0, 2.0));
        repo.upsert(&row).await.unwrap();

        assert!(repo.delete_by_request(request).await.unwrap());
        assert!(repo.find_by_request(request).await.unwrap().is_none());
        assert!(!repo.delete_by_request(request).await.unwrap());
    }
}
