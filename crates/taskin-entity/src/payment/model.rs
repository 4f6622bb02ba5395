//! Payment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Submitted but not settled.
    Pending,
    /// Settled. Terminal; the record is immutable from here on.
    Completed,
    /// Rejected by the processor.
    Failed,
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit/debit card.
    Card,
    /// UPI transfer.
    Upi,
}

/// Settlement record for a completed service request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: Uuid,
    /// The request being settled.
    pub request_id: Uuid,
    /// The paying customer.
    pub payer_id: Uuid,
    /// The provider being paid.
    pub payee_id: Uuid,
    /// Amount in the platform currency's minor-free units.
    pub amount: f64,
    /// Settlement state.
    pub status: PaymentStatus,
    /// Payment instrument used.
    pub method: PaymentMethod,
    /// Processor transaction reference.
    pub transaction_id: Option<String>,
    /// When the payment was created.
    pub created_at: DateTime<Utc>,
    /// When the payment settled.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Construct a settled payment record.
    pub fn completed(
        request_id: Uuid,
        payer_id: Uuid,
        payee_id: Uuid,
        amount: f64,
        method: PaymentMethod,
        transaction_id: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            request_id,
            payer_id,
            payee_id,
            amount,
            status: PaymentStatus::Completed,
            method,
            transaction_id: Some(transaction_id),
            created_at: now,
            completed_at: Some(now),
        }
    }
}
