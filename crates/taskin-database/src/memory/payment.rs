//! In-memory payment store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::payment::Payment;

use crate::repositories::payment::PaymentRepository;

/// Dashmap-backed payment store, keyed by request id so double payment
/// of one request loses at insert time.
#[derive(Debug, Default)]
pub struct MemoryPaymentRepository {
    by_request: DashMap<Uuid, Payment>,
}

impl MemoryPaymentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for MemoryPaymentRepository {
    async fn create(&self, payment: &Payment) -> AppResult<Payment> {
        match self.by_request.entry(payment.request_id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Request {} is already paid",
                payment.request_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(payment.clone());
                Ok(payment.clone())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Payment>> {
        Ok(self
            .by_request
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.clone()))
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<Payment>> {
        Ok(self.by_request.get(&request_id).map(|p| p.clone()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .by_request
            .iter()
            .filter(|p| p.payer_id == user_id || p.payee_id == user_id)
            .map(|p| p.clone())
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskin_core::error::ErrorKind;
    use taskin_entity::payment::PaymentMethod;

    #[tokio::test]
    async fn test_second_payment_for_request_conflicts() {
        let repo = MemoryPaymentRepository::new();
        let request = Uuid::new_v4();
        let (payer, payee) = (Uuid::new_v4(), Uuid::new_v4());

        let first = Payment::completed(
            request,
            payer,
            payee,
            450.0,
            PaymentMethod::Upi,
            "TXN1".into(),
        );
        repo.create(&first).await.unwrap();

        let second = Payment::completed(
            request,
            payer,
            payee,
            450.0,
            PaymentMethod::Card,
            "TXN2".into(),
        );
        let err = repo.create(&second).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}
