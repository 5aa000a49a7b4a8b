//! Invoice issuance trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use common::EntityId;
use domain::{Invoice, Reservation, ServiceCharge};

use crate::error::BookingError;

/// Trait for invoice issuance.
///
/// Issuance is idempotent per reservation: repeating the call for the same
/// reservation returns the invoice already on file instead of creating a
/// duplicate, which makes checkout retries safe.
#[async_trait]
pub trait BillingService: Send + Sync {
    /// Issues a pending invoice for a reservation.
    ///
    /// Room charges are the reservation's total amount; `services` itemizes
    /// any additional charges on top.
    async fn issue(
        &self,
        reservation: &Reservation,
        services: Vec<ServiceCharge>,
    ) -> Result<Invoice, BookingError>;

    /// Voids a previously issued invoice (compensation path).
    async fn void(&self, invoice_id: EntityId) -> Result<(), BookingError>;
}

#[derive(Debug, Default)]
struct InMemoryBillingState {
    invoices: HashMap<EntityId, Invoice>,
    by_reservation: HashMap<EntityId, EntityId>,
    fail_on_issue: bool,
}

/// In-memory billing service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBillingService {
    state: Arc<RwLock<InMemoryBillingState>>,
}

impl InMemoryBillingService {
    /// Creates a new in-memory billing service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next issue call.
    pub fn set_fail_on_issue(&self, fail: bool) {
        self.state.write().unwrap().fail_on_issue = fail;
    }

    /// Returns the number of invoices on file.
    pub fn invoice_count(&self) -> usize {
        self.state.read().unwrap().invoices.len()
    }

    /// Returns the invoice on file for a reservation, if any.
    pub fn invoice_for(&self, reservation_id: EntityId) -> Option<Invoice> {
        let state = self.state.read().unwrap();
        let invoice_id = state.by_reservation.get(&reservation_id)?;
        state.invoices.get(invoice_id).cloned()
    }
}

#[async_trait]
impl BillingService for InMemoryBillingService {
    async fn issue(
        &self,
        reservation: &Reservation,
        services: Vec<ServiceCharge>,
    ) -> Result<Invoice, BookingError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_issue {
            return Err(BookingError::Billing("Billing unavailable".to_string()));
        }

        // Idempotency: one invoice per reservation
        if let Some(existing_id) = state.by_reservation.get(&reservation.id)
            && let Some(existing) = state.invoices.get(existing_id)
        {
            return Ok(existing.clone());
        }

        let invoice = Invoice::issue(
            reservation.id,
            reservation.guest_id,
            reservation.total_amount,
            services,
            Utc::now(),
        );

        state.by_reservation.insert(reservation.id, invoice.id);
        state.invoices.insert(invoice.id, invoice.clone());

        Ok(invoice)
    }

    async fn void(&self, invoice_id: EntityId) -> Result<(), BookingError> {
        let mut state = self.state.write().unwrap();
        if let Some(invoice) = state.invoices.remove(&invoice_id) {
            state.by_reservation.remove(&invoice.reservation_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{Money, StayDates};

    fn reservation() -> Reservation {
        let dates = StayDates::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        )
        .unwrap();
        Reservation::confirm(EntityId::new(), EntityId::new(), dates, Money::from_cents(20_000))
            .unwrap()
    }

    #[tokio::test]
    async fn test_issue_and_void() {
        let service = InMemoryBillingService::new();
        let r = reservation();

        let invoice = service.issue(&r, vec![]).await.unwrap();
        assert_eq!(invoice.reservation_id, r.id);
        assert_eq!(invoice.total_amount.cents(), 20_000);
        assert_eq!(service.invoice_count(), 1);

        service.void(invoice.id).await.unwrap();
        assert_eq!(service.invoice_count(), 0);
        assert!(service.invoice_for(r.id).is_none());
    }

    #[tokio::test]
    async fn test_issue_is_idempotent_per_reservation() {
        let service = InMemoryBillingService::new();
        let r = reservation();

        let first = service.issue(&r, vec![]).await.unwrap();
        let second = service.issue(&r, vec![]).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(service.invoice_count(), 1);
    }

    #[tokio::test]
    async fn test_issue_with_services_totals() {
        let service = InMemoryBillingService::new();
        let r = reservation();

        let invoice = service
            .issue(
                &r,
                vec![ServiceCharge::new("Minibar", Money::from_cents(1500))],
            )
            .await
            .unwrap();

        assert_eq!(invoice.room_charges.cents(), 20_000);
        assert_eq!(invoice.total_amount.cents(), 21_500);
    }

    #[tokio::test]
    async fn test_fail_on_issue() {
        let service = InMemoryBillingService::new();
        service.set_fail_on_issue(true);

        let r = reservation();
        let result = service.issue(&r, vec![]).await;

        assert!(result.is_err());
        assert_eq!(service.invoice_count(), 0);
    }

    #[tokio::test]
    async fn test_void_after_issue_allows_reissue() {
        let service = InMemoryBillingService::new();
        let r = reservation();

        let first = service.issue(&r, vec![]).await.unwrap();
        service.void(first.id).await.unwrap();

        let second = service.issue(&r, vec![]).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(service.invoice_count(), 1);
    }
}
