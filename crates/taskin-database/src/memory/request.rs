//! In-memory service request store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_core::types::pagination::{PageRequest, PageResponse};
use taskin_entity::request::{RequestStatus, ServiceRequest};

use crate::repositories::request::RequestRepository;

/// Dashmap-backed request store.
///
/// `accept` and `complete` mutate through `get_mut`, which holds the
/// entry's shard lock for the duration of the check-and-set, so the
/// single-winner guarantee matches the SQL conditional update.
#[derive(Debug, Default)]
pub struct MemoryRequestRepository {
    rows: DashMap<Uuid, ServiceRequest>,
}

impl MemoryRequestRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn page_of(
        &self,
        mut rows: Vec<ServiceRequest>,
        page: &PageRequest,
    ) -> PageResponse<ServiceRequest> {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        PageResponse::new(items, page.page, page.page_size, total)
    }
}

#[async_trait]
impl RequestRepository for MemoryRequestRepository {
    async fn create(&self, request: &ServiceRequest) -> AppResult<ServiceRequest> {
        if self.rows.contains_key(&request.id) {
            return Err(AppError::conflict(format!(
                "Request {} already exists",
                request.id
            )));
        }
        self.rows.insert(request.id, request.clone());
        Ok(request.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceRequest>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn find_by_customer(
        &self,
        customer_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>> {
        let rows = self
            .rows
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .map(|r| r.clone())
            .collect();
        Ok(self.page_of(rows, page))
    }

    async fn find_by_provider(
        &self,
        provider_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>> {
        let rows = self
            .rows
            .iter()
            .filter(|r| r.provider_id == Some(provider_id))
            .map(|r| r.clone())
            .collect();
        Ok(self.page_of(rows, page))
    }

    async fn find_pending(&self, page: &PageRequest) -> AppResult<PageResponse<ServiceRequest>> {
        let rows = self
            .rows
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .map(|r| r.clone())
            .collect();
        Ok(self.page_of(rows, page))
    }

    async fn accept(
        &self,
        request_id: Uuid,
        provider_id: Uuid,
        accepted_at: DateTime<Utc>,
    ) -> AppResult<ServiceRequest> {
        match self.rows.get_mut(&request_id) {
            Some(mut entry) => {
                if entry.status == RequestStatus::Pending && entry.provider_id.is_none() {
                    entry.provider_id = Some(provider_id);
                    entry.status = RequestStatus::Accepted;
                    entry.accepted_at = Some(accepted_at);
                    Ok(entry.clone())
                } else {
                    Err(AppError::conflict(format!(
                        "Request {request_id} is no longer available for acceptance (status: {})",
                        entry.status
                    )))
                }
            }
            None => Err(AppError::not_found(format!(
                "Request {request_id} not found"
            ))),
        }
    }

    async fn complete(
        &self,
        request_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<ServiceRequest> {
        match self.rows.get_mut(&request_id) {
            Some(mut entry) => {
                if entry.status == RequestStatus::Accepted {
                    entry.status = RequestStatus::Completed;
                    entry.completed_at = Some(completed_at);
                    Ok(entry.clone())
                } else {
                    Err(AppError::conflict(format!(
                        "Request {request_id} is no longer available for completion (status: {})",
                        entry.status
                    )))
                }
            }
            None => Err(AppError::not_found(format!(
                "Request {request_id} not found"
            ))),
        }
    }
}
