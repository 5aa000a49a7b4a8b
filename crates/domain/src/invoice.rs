//! Invoice document derived from a completed or billed stay.

use chrono::{DateTime, Utc};
use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Payment state of an invoice, driven by the payments collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Parses a status from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An itemized additional-service charge on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCharge {
    /// What the guest is being charged for.
    pub description: String,

    /// Charge amount.
    pub amount: Money,
}

impl ServiceCharge {
    /// Creates a new service charge.
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// Invoice document owned by the reservation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique invoice identifier.
    pub id: EntityId,

    /// Reservation this invoice bills.
    pub reservation_id: EntityId,

    /// Guest being billed.
    pub guest_id: EntityId,

    /// Room charge portion of the total.
    pub room_charges: Money,

    /// Itemized additional-service charges.
    pub services: Vec<ServiceCharge>,

    /// Grand total: room charges plus all service charges.
    pub total_amount: Money,

    /// Payment state.
    pub payment_status: PaymentStatus,

    /// When the invoice was issued.
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    /// Issues a pending invoice, computing the total from room charges and
    /// service items.
    pub fn issue(
        reservation_id: EntityId,
        guest_id: EntityId,
        room_charges: Money,
        services: Vec<ServiceCharge>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let service_total: Money = services.iter().map(|s| s.amount).sum();

        Self {
            id: EntityId::new(),
            reservation_id,
            guest_id,
            room_charges,
            total_amount: room_charges + service_total,
            services,
            payment_status: PaymentStatus::Pending,
            issued_at,
        }
    }
}
