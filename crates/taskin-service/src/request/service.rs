//! Request lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_core::types::geo::GeoPoint;
use taskin_core::types::pagination::{PageRequest, PageResponse};
use taskin_database::repositories::request::RequestRepository;
use taskin_database::repositories::role::RoleRepository;
use taskin_entity::notification::NotificationCategory;
use taskin_entity::request::ServiceRequest;
use taskin_entity::user::AppRole;
use taskin_realtime::{ChangeBroadcaster, ChangeOp};

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Input for posting a new service request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestInput {
    /// Requested service category.
    pub service_type: String,
    /// Customer latitude.
    pub latitude: f64,
    /// Customer longitude.
    pub longitude: f64,
    /// Free-form address.
    pub address: Option<String>,
    /// Free-form work description.
    pub description: Option<String>,
}

/// Owns the pending → accepted → completed state machine.
///
/// Completion is driven by [`crate::payment::PaymentService`]; this
/// service handles posting and acceptance.
#[derive(Clone)]
pub struct RequestService {
    requests: Arc<dyn RequestRepository>,
    roles: Arc<dyn RoleRepository>,
    notifier: NotificationService,
    broadcaster: Arc<ChangeBroadcaster>,
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(
        requests: Arc<dyn RequestRepository>,
        roles: Arc<dyn RoleRepository>,
        notifier: NotificationService,
        broadcaster: Arc<ChangeBroadcaster>,
    ) -> Self {
        Self {
            requests,
            roles,
            notifier,
            broadcaster,
        }
    }

    /// Post a new request and fan a notification out to every provider.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateRequestInput,
    ) -> AppResult<ServiceRequest> {
        let service_type = input.service_type.trim();
        if service_type.is_empty() {
            return Err(AppError::validation("service_type must not be empty"));
        }
        let location = GeoPoint::new(input.latitude, input.longitude)?;

        let request = ServiceRequest::new(
            ctx.user_id,
            service_type.to_string(),
            location,
            input.address,
            input.description,
        );
        let stored = self.requests.create(&request).await?;
        self.broadcaster
            .publish("service_requests", ChangeOp::Insert, &stored)?;

        // every provider hears about every new request; the customer does
        // not get notified about their own posting
        let providers: Vec<Uuid> = self
            .roles
            .users_with_role(AppRole::ServiceProvider)
            .await?
            .into_iter()
            .filter(|id| *id != ctx.user_id)
            .collect();
        // the request is already stored; a failed fan-out must not undo it
        if let Err(e) = self
            .notifier
            .notify_many(
                &providers,
                NotificationCategory::Service,
                "New Service Request",
                &format!("A customer nearby needs a {}", stored.service_type),
                Some(stored.id),
            )
            .await
        {
            warn!(request_id = %stored.id, error = %e, "provider fan-out failed");
        }

        info!(request_id = %stored.id, service_type = %stored.service_type, "request posted");
        Ok(stored)
    }

    /// Claim a pending request for the calling provider.
    ///
    /// At most one caller wins; the rest get a Conflict. The customer is
    /// notified of the winner.
    pub async fn accept(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<ServiceRequest> {
        if !ctx.is_service_provider() {
            return Err(AppError::forbidden(
                "Only service providers can accept requests",
            ));
        }
        if let Some(existing) = self.requests.find_by_id(request_id).await? {
            if existing.customer_id == ctx.user_id {
                return Err(AppError::forbidden("You cannot accept your own request"));
            }
        }

        let accepted = self
            .requests
            .accept(request_id, ctx.user_id, Utc::now())
            .await?;
        self.broadcaster
            .publish("service_requests", ChangeOp::Update, &accepted)?;

        // acceptance is committed; notification delivery is best effort
        if let Err(e) = self
            .notifier
            .notify(
                accepted.customer_id,
                NotificationCategory::Service,
                "Request Accepted",
                &format!("A provider has accepted your {} request", accepted.service_type),
                Some(accepted.id),
            )
            .await
        {
            warn!(request_id = %accepted.id, error = %e, "customer notification failed");
        }

        info!(request_id = %accepted.id, provider_id = %ctx.user_id, "request accepted");
        Ok(accepted)
    }

    /// Fetch a request the caller is allowed to see: their own, one they
    /// accepted, or any still-pending request if they are a provider.
    pub async fn get(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<ServiceRequest> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;

        let visible = request.involves(ctx.user_id)
            || (request.is_pending() && ctx.is_service_provider())
            || ctx.is_admin();
        if !visible {
            return Err(AppError::forbidden("You are not a party to this request"));
        }
        Ok(request)
    }

    /// List requests the caller posted.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>> {
        self.requests.find_by_customer(ctx.user_id, &page).await
    }

    /// List requests assigned to the caller as provider.
    pub async fn list_assigned(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>> {
        self.requests.find_by_provider(ctx.user_id, &page).await
    }

    /// List open requests. Provider-only.
    pub async fn list_open(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>> {
        if !ctx.is_service_provider() {
            return Err(AppError::forbidden(
                "Only service providers can browse open requests",
            ));
        }
        self.requests.find_pending(&page).await
    }
}
