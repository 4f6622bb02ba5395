//! Location tracking service.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_core::traits::geolocation::{GeolocationSource, WatchOptions};
use taskin_core::types::geo::GeoPoint;
use taskin_database::repositories::location::LocationRepository;
use taskin_database::repositories::request::RequestRepository;
use taskin_entity::location::ProviderLocation;
use taskin_entity::request::RequestStatus;
use taskin_realtime::{ChangeBroadcaster, ChangeOp, RowFilter, Subscription};

use crate::context::RequestContext;

/// A running tracking loop for one (provider, request) pair.
///
/// Dropping the handle aborts the loop; [`TrackingHandle::stop`] also
/// removes the persisted position row.
pub struct TrackingHandle {
    request_id: Uuid,
    join: JoinHandle<()>,
    locations: Arc<dyn LocationRepository>,
}

impl std::fmt::Debug for TrackingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingHandle")
            .field("request_id", &self.request_id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl TrackingHandle {
    /// Stop the loop and clear the last-known position.
    pub async fn stop(self) -> AppResult<()> {
        self.join.abort();
        self.locations.delete_by_request(self.request_id).await?;
        info!(request_id = %self.request_id, "tracking stopped");
        Ok(())
    }

    /// Whether the loop is still running.
    pub fn is_active(&self) -> bool {
        !self.join.is_finished()
    }
}

impl Drop for TrackingHandle {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// Consumes a provider's position stream while their request is accepted
/// and republishes each sample to storage and the change feed.
#[derive(Clone)]
pub struct TrackingService {
    locations: Arc<dyn LocationRepository>,
    requests: Arc<dyn RequestRepository>,
    broadcaster: Arc<ChangeBroadcaster>,
    options: WatchOptions,
}

impl TrackingService {
    /// Creates a new tracking service.
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        requests: Arc<dyn RequestRepository>,
        broadcaster: Arc<ChangeBroadcaster>,
        options: WatchOptions,
    ) -> Self {
        Self {
            locations,
            requests,
            broadcaster,
            options,
        }
    }

    /// Start streaming the calling provider's position for a request.
    ///
    /// Only the assigned provider of an accepted request may start
    /// tracking. The loop ends on its own once the request leaves the
    /// accepted state, clearing the position row.
    pub async fn start(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        source: Arc<dyn GeolocationSource>,
    ) -> AppResult<TrackingHandle> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
        if request.provider_id != Some(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the assigned provider can report their location",
            ));
        }
        if request.status != RequestStatus::Accepted {
            return Err(AppError::conflict(format!(
                "Tracking is only available while the request is accepted (status: {})",
                request.status
            )));
        }

        let mut watch = source.watch(self.options).await?;
        let provider_id = ctx.user_id;
        let max_age = self.options.max_sample_age.as_secs();
        let locations = self.locations.clone();
        let requests = self.requests.clone();
        let broadcaster = self.broadcaster.clone();

        let join = tokio::spawn(async move {
            while let Some(sample) = watch.next().await {
                if sample.is_stale(max_age) {
                    debug!(request_id = %request_id, "discarding stale sample");
                    continue;
                }

                // the request may have completed since the last sample
                match requests.find_by_id(request_id).await {
                    Ok(Some(r)) if r.status == RequestStatus::Accepted => {}
                    Ok(_) => break,
                    Err(e) => {
                        warn!(request_id = %request_id, error = %e, "status check failed");
                        break;
                    }
                }

                let row = ProviderLocation::new(provider_id, Some(request_id), sample.point);
                match locations.upsert(&row).await {
                    Ok(stored) => {
                        if let Err(e) =
                            broadcaster.publish("provider_locations", ChangeOp::Update, &stored)
                        {
                            warn!(request_id = %request_id, error = %e, "position publish failed");
                        }
                    }
                    Err(e) => {
                        warn!(request_id = %request_id, error = %e, "position upsert failed");
                    }
                }
            }

            if let Err(e) = locations.delete_by_request(request_id).await {
                warn!(request_id = %request_id, error = %e, "position cleanup failed");
            }
            debug!(request_id = %request_id, "tracking loop ended");
        });

        info!(request_id = %request_id, provider_id = %provider_id, "tracking started");
        Ok(TrackingHandle {
            request_id,
            join,
            locations: self.locations.clone(),
        })
    }

    /// Record one position sample reported directly over the API.
    ///
    /// Same gate as [`TrackingService::start`]: assigned provider only,
    /// and only while the request is accepted.
    pub async fn report(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        point: GeoPoint,
    ) -> AppResult<ProviderLocation> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
        if request.provider_id != Some(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the assigned provider can report their location",
            ));
        }
        if request.status != RequestStatus::Accepted {
            return Err(AppError::conflict(format!(
                "Tracking is only available while the request is accepted (status: {})",
                request.status
            )));
        }

        let row = ProviderLocation::new(ctx.user_id, Some(request_id), point);
        let stored = self.locations.upsert(&row).await?;
        self.broadcaster
            .publish("provider_locations", ChangeOp::Update, &stored)?;
        Ok(stored)
    }

    /// Last reported position for a request. Party-only.
    pub async fn current(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<ProviderLocation> {
        self.authorize(ctx, request_id).await?;
        self.locations
            .find_by_request(request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("No position reported for request {request_id}"))
            })
    }

    /// Live position feed for a request. Party-only.
    pub async fn subscribe(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<Subscription> {
        self.authorize(ctx, request_id).await?;
        Ok(self.broadcaster.subscribe_filtered(
            "provider_locations",
            RowFilter::eq("request_id", request_id.to_string()),
        ))
    }

    async fn authorize(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<()> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
        if !request.involves(ctx.user_id) && !ctx.is_admin() {
            return Err(AppError::forbidden("You are not a party to this request"));
        }
        Ok(())
    }
}
