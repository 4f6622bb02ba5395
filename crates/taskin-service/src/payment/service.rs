//! Payment service.

use std::sync::Arc;

use chrono::Utc;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_database::repositories::payment::PaymentRepository;
use taskin_database::repositories::request::RequestRepository;
use taskin_entity::notification::NotificationCategory;
use taskin_entity::payment::{Payment, PaymentMethod};
use taskin_realtime::{ChangeBroadcaster, ChangeOp};

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Input for paying a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRequestInput {
    /// Amount to settle.
    pub amount: f64,
    /// Payment instrument.
    pub method: PaymentMethod,
}

/// Settles an accepted request.
///
/// Payment is what moves a request from accepted to completed: the
/// conditional completion is the single-winner gate, the payment row
/// records the settlement, and both parties are notified.
#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    requests: Arc<dyn RequestRepository>,
    notifier: NotificationService,
    broadcaster: Arc<ChangeBroadcaster>,
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        requests: Arc<dyn RequestRepository>,
        notifier: NotificationService,
        broadcaster: Arc<ChangeBroadcaster>,
    ) -> Self {
        Self {
            payments,
            requests,
            notifier,
            broadcaster,
        }
    }

    /// Pay for an accepted request, completing it.
    ///
    /// Only the customer may pay. A second payment attempt loses the
    /// completion race and gets a Conflict.
    pub async fn pay(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        input: PayRequestInput,
    ) -> AppResult<Payment> {
        if !(input.amount.is_finite() && input.amount > 0.0) {
            return Err(AppError::validation("Amount must be positive"));
        }

        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
        if request.customer_id != ctx.user_id {
            return Err(AppError::forbidden("Only the customer can pay a request"));
        }
        let payee = request
            .provider_id
            .ok_or_else(|| AppError::conflict("Request has no provider to pay"))?;

        // single-winner gate: completes only from the accepted state
        let completed = self.requests.complete(request_id, Utc::now()).await?;
        self.broadcaster
            .publish("service_requests", ChangeOp::Update, &completed)?;

        let payment = Payment::completed(
            request_id,
            ctx.user_id,
            payee,
            input.amount,
            input.method,
            generate_transaction_id(),
        );
        let stored = self.payments.create(&payment).await?;
        self.broadcaster
            .publish("payments", ChangeOp::Insert, &stored)?;

        // the settlement is recorded; receipts are best effort
        let receipts = [
            (
                ctx.user_id,
                "Payment Successful",
                format!("Your payment of {:.2} was processed", stored.amount),
            ),
            (
                payee,
                "Payment Received",
                format!("You received a payment of {:.2}", stored.amount),
            ),
        ];
        for (user_id, title, message) in receipts {
            if let Err(e) = self
                .notifier
                .notify(
                    user_id,
                    NotificationCategory::Payment,
                    title,
                    &message,
                    Some(request_id),
                )
                .await
            {
                warn!(request_id = %request_id, user_id = %user_id, error = %e, "payment receipt failed");
            }
        }

        info!(request_id = %request_id, payment_id = %stored.id, "request settled");
        Ok(stored)
    }

    /// The payment attached to a request, party-only.
    pub async fn for_request(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<Payment> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
        if !request.involves(ctx.user_id) && !ctx.is_admin() {
            return Err(AppError::forbidden("You are not a party to this request"));
        }
        self.payments
            .find_by_request(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} is unpaid")))
    }

    /// The caller's payment history, both sides.
    pub async fn history(&self, ctx: &RequestContext) -> AppResult<Vec<Payment>> {
        self.payments.find_by_user(ctx.user_id).await
    }
}

/// Processor-style transaction reference, e.g. `TXN482915306174`.
fn generate_transaction_id() -> String {
    let mut rng = rand::rng();
    let digits: String = (0..12).map(|_| rng.random_range(0..10u8).to_string()).collect();
    format!("TXN{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use taskin_core::error::ErrorKind;
    use taskin_core::types::geo::GeoPoint;
    use taskin_core::types::pagination::{PageRequest, PageResponse};
    use taskin_database::memory::{
        MemoryNotificationRepository, MemoryPaymentRepository, MemoryRequestRepository,
    };
    use taskin_database::repositories::notification::NotificationRepository;
    use taskin_entity::notification::Notification;
    use taskin_entity::request::{RequestStatus, ServiceRequest};
    use taskin_entity::user::AppRole;

    /// Notification store that rejects every write.
    struct DownNotificationRepository;

    #[async_trait]
    impl NotificationRepository for DownNotificationRepository {
        async fn create(&self, _notification: &Notification) -> AppResult<Notification> {
            Err(AppError::database("notification store unavailable"))
        }
        async fn create_many(&self, _notifications: &[Notification]) -> AppResult<u64> {
            Err(AppError::database("notification store unavailable"))
        }
        async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Notification>> {
            Ok(None)
        }
        async fn find_by_user(
            &self,
            _user_id: Uuid,
            page: &PageRequest,
        ) -> AppResult<PageResponse<Notification>> {
            Ok(PageResponse::new(Vec::new(), page.page, page.page_size, 0))
        }
        async fn unread_count(&self, _user_id: Uuid) -> AppResult<i64> {
            Ok(0)
        }
        async fn mark_read(&self, _id: Uuid, _user_id: Uuid) -> AppResult<bool> {
            Ok(false)
        }
        async fn mark_all_read(&self, _user_id: Uuid) -> AppResult<u64> {
            Ok(0)
        }
        async fn set_muted(&self, _id: Uuid, _user_id: Uuid, _muted: bool) -> AppResult<bool> {
            Ok(false)
        }
        async fn delete(&self, _id: Uuid, _user_id: Uuid) -> AppResult<bool> {
            Ok(false)
        }
    }

    struct Fixture {
        payment: PaymentService,
        requests: Arc<MemoryRequestRepository>,
        notifications: Arc<MemoryNotificationRepository>,
    }

    fn fixture() -> Fixture {
        let requests = Arc::new(MemoryRequestRepository::new());
        let notifications = Arc::new(MemoryNotificationRepository::new());
        let broadcaster = Arc::new(ChangeBroadcaster::new(16));
        let notifier = NotificationService::new(notifications.clone(), broadcaster.clone());
        let payment = PaymentService::new(
            Arc::new(MemoryPaymentRepository::new()),
            requests.clone(),
            notifier,
            broadcaster,
        );
        Fixture {
            payment,
            requests,
            notifications,
        }
    }

    async fn accepted_request(fx: &Fixture) -> (ServiceRequest, RequestContext, Uuid) {
        let customer = RequestContext::new(Uuid::new_v4(), vec![AppRole::User]);
        let provider = Uuid::new_v4();
        let request = ServiceRequest::new(
            customer.user_id,
            "Electrician".to_string(),
            GeoPoint::new(12.97, 77.59).unwrap(),
            None,
            None,
        );
        fx.requests.create(&request).await.unwrap();
        let accepted = fx
            .requests
            .accept(request.id, provider, Utc::now())
            .await
            .unwrap();
        (accepted, customer, provider)
    }

    fn input() -> PayRequestInput {
        PayRequestInput {
            amount: 450.0,
            method: PaymentMethod::Upi,
        }
    }

    #[tokio::test]
    async fn test_payment_completes_request_and_notifies_both_parties() {
        let fx = fixture();
        let (request, customer, provider) = accepted_request(&fx).await;

        let payment = fx.payment.pay(&customer, request.id, input()).await.unwrap();
        assert!(payment.transaction_id.as_deref().unwrap().starts_with("TXN"));
        assert_eq!(payment.payee_id, provider);

        let settled = fx.requests.find_by_id(request.id).await.unwrap().unwrap();
        assert_eq!(settled.status, RequestStatus::Completed);
        assert!(settled.completed_at.is_some());

        assert_eq!(fx.notifications.unread_count(customer.user_id).await.unwrap(), 1);
        assert_eq!(fx.notifications.unread_count(provider).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_double_payment_conflicts() {
        let fx = fixture();
        let (request, customer, _) = accepted_request(&fx).await;

        fx.payment.pay(&customer, request.id, input()).await.unwrap();
        let err = fx.payment.pay(&customer, request.id, input()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_only_customer_may_pay() {
        let fx = fixture();
        let (request, _, provider) = accepted_request(&fx).await;

        let provider_ctx = RequestContext::new(provider, vec![AppRole::ServiceProvider]);
        let err = fx
            .payment
            .pay(&provider_ctx, request.id, input())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_pending_request_cannot_be_paid() {
        let fx = fixture();
        let customer = RequestContext::new(Uuid::new_v4(), vec![AppRole::User]);
        let request = ServiceRequest::new(
            customer.user_id,
            "Electrician".to_string(),
            GeoPoint::new(12.97, 77.59).unwrap(),
            None,
            None,
        );
        fx.requests.create(&request).await.unwrap();

        let err = fx.payment.pay(&customer, request.id, input()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_settlement_survives_notification_outage() {
        let requests = Arc::new(MemoryRequestRepository::new());
        let broadcaster = Arc::new(ChangeBroadcaster::new(16));
        let notifier =
            NotificationService::new(Arc::new(DownNotificationRepository), broadcaster.clone());
        let payment = PaymentService::new(
            Arc::new(MemoryPaymentRepository::new()),
            requests.clone(),
            notifier,
            broadcaster,
        );

        let customer = RequestContext::new(Uuid::new_v4(), vec![AppRole::User]);
        let request = ServiceRequest::new(
            customer.user_id,
            "Electrician".to_string(),
            GeoPoint::new(12.97, 77.59).unwrap(),
            None,
            None,
        );
        requests.create(&request).await.unwrap();
        requests
            .accept(request.id, Uuid::new_v4(), Utc::now())
            .await
            .unwrap();

        // receipts fail, but the payment and the completion both stand
        let paid = payment.pay(&customer, request.id, input()).await.unwrap();
        assert_eq!(paid.request_id, request.id);
        let settled = requests.find_by_id(request.id).await.unwrap().unwrap();
        assert_eq!(settled.status, RequestStatus::Completed);
    }

    #[tokio::test]
    async fn test_nonpositive_amount_rejected() {
        let fx = fixture();
        let (request, customer, _) = accepted_request(&fx).await;

        let bad = PayRequestInput {
            amount: 0.0,
            method: PaymentMethod::Card,
        };
        let err = fx.payment.pay(&customer, request.id, bad).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
