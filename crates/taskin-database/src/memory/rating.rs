//! In-memory rating store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::rating::Rating;

use crate::repositories::rating::RatingRepository;

/// Dashmap-backed rating store, keyed by request id (one rating each).
#[derive(Debug, Default)]
pub struct MemoryRatingRepository {
    by_request: DashMap<Uuid, Rating>,
}

impl MemoryRatingRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RatingRepository for MemoryRatingRepository {
    async fn create(&self, rating: &Rating) -> AppResult<Rating> {
        match self.by_request.entry(rating.request_id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Request {} is already rated",
                rating.request_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(rating.clone());
                Ok(rating.clone())
            }
        }
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<Rating>> {
        Ok(self.by_request.get(&request_id).map(|r| r.clone()))
    }

    async fn find_by_ratee(&self, ratee_id: Uuid) -> AppResult<Vec<Rating>> {
        let mut ratings: Vec<Rating> = self
            .by_request
            .iter()
            .filter(|r| r.ratee_id == ratee_id)
            .map(|r| r.clone())
            .collect();
        ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ratings)
    }

    async fn average_for(&self, ratee_id: Uuid) -> AppResult<Option<f64>> {
        let stars: Vec<i16> = self
            .by_request
            .iter()
            .filter(|r| r.ratee_id == ratee_id)
            .map(|r| r.stars)
            .collect();
        if stars.is_empty() {
            return Ok(None);
        }
        let sum: i64 = stars.iter().map(|s| *s as i64).sum();
        Ok(Some(sum as f64 / stars.len() as f64))
    }
}
