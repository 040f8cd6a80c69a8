//! In-process reservation store for local runs and tests.
//!
//! Enforces the same rule as the database's partial unique index: one
//! active reservation per `(date, from)`. The check and insert happen under
//! one write lock, so concurrent bookings for a slot get exactly one winner.

use std::collections::HashMap;

use async_trait::async_trait;
use barberbook_core::{
    errors::{BookingError, BookingResult},
    models::reservation::{NewReservation, Reservation},
    scheduling::cancellation::CancellationDenial,
    store::ReservationStore,
};
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryReservationStore {
    reservations: RwLock<HashMap<Uuid, Reservation>>,
}

impl MemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored reservation, cancelled ones included, oldest first.
    pub async fn all(&self) -> Vec<Reservation> {
        let mut all: Vec<_> = self.reservations.read().await.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        all
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn list_active_reservations(&self, date: NaiveDate) -> BookingResult<Vec<Reservation>> {
        let mut active: Vec<_> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| r.is_active() && r.date == date)
            .cloned()
            .collect();
        active.sort_by_key(|r| r.from);
        Ok(active)
    }

    async fn get_reservation(&self, id: Uuid) -> BookingResult<Option<Reservation>> {
        Ok(self.reservations.read().await.get(&id).cloned())
    }

    async fn create_reservation(&self, reservation: NewReservation) -> BookingResult<Reservation> {
        let mut reservations = self.reservations.write().await;

        let taken = reservations
            .values()
            .any(|r| r.is_active() && r.date == reservation.date && r.from == reservation.from);
        if taken {
            return Err(BookingError::Conflict(format!(
                "The {} slot on {} is already reserved. Please pick another slot.",
                reservation.from, reservation.date
            )));
        }

        let stored = Reservation {
            id: Uuid::new_v4(),
            date: reservation.date,
            from: reservation.from,
            to: reservation.to,
            customer_name: reservation.customer_name,
            customer_phone: reservation.customer_phone,
            service: reservation.service,
            price: reservation.price,
            deposit: reservation.deposit,
            payment_reference: reservation.payment_reference,
            receipt_url: reservation.receipt_url,
            user_id: reservation.user_id,
            created_at: reservation.created_at,
            cancelled_at: None,
            cancellation_reason: None,
        };
        debug!("Stored reservation {} in memory", stored.id);
        reservations.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn mark_cancelled(
        &self,
        id: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> BookingResult<Reservation> {
        let mut reservations = self.reservations.write().await;
        let reservation = reservations
            .get_mut(&id)
            .ok_or_else(|| BookingError::NotFound(format!("Reservation {} not found", id)))?;

        if !reservation.is_active() {
            return Err(BookingError::Policy(
                CancellationDenial::AlreadyCancelled.to_string(),
            ));
        }

        reservation.cancelled_at = Some(at);
        reservation.cancellation_reason = Some(reason.to_string());
        Ok(reservation.clone())
    }
}
