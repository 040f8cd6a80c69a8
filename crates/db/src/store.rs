use async_trait::async_trait;
use barberbook_core::{
    errors::{BookingError, BookingResult},
    models::reservation::{NewReservation, Reservation},
    scheduling::cancellation::CancellationDenial,
    store::ReservationStore,
};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, warn};
use uuid::Uuid;

use crate::{DbPool, repositories::reservation as repo};

/// PostgreSQL-backed reservation store.
///
/// Double-booking is refused by the `uq_appointments_active_slot` partial
/// unique index; a violation comes back as `BookingError::Conflict`.
#[derive(Clone)]
pub struct PgReservationStore {
    pool: DbPool,
}

impl PgReservationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn is_unique_violation(err: &eyre::Report) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn store_error(operation: &str, err: eyre::Report) -> BookingError {
    error!("Reservation store failed to {}: {:?}", operation, err);
    BookingError::Store(err)
}

#[async_trait]
impl ReservationStore for PgReservationStore {
    async fn list_active_reservations(&self, date: NaiveDate) -> BookingResult<Vec<Reservation>> {
        let rows = repo::get_active_reservations_by_date(&self.pool, date)
            .await
            .map_err(|e| store_error("list reservations", e))?;

        rows.into_iter()
            .map(|row| Reservation::try_from(row).map_err(BookingError::Store))
            .collect()
    }

    async fn get_reservation(&self, id: Uuid) -> BookingResult<Option<Reservation>> {
        let row = repo::get_reservation_by_id(&self.pool, id)
            .await
            .map_err(|e| store_error("load reservation", e))?;

        Ok(row.map(Reservation::try_from).transpose()?)
    }

    async fn create_reservation(&self, reservation: NewReservation) -> BookingResult<Reservation> {
        match repo::create_reservation(&self.pool, &reservation).await {
            Ok(row) => Ok(Reservation::try_from(row)?),
            Err(e) if is_unique_violation(&e) => {
                warn!(
                    "Unique slot constraint rejected {} at {}",
                    reservation.date, reservation.from
                );
                Err(BookingError::Conflict(format!(
                    "The {} slot on {} is already reserved. Please pick another slot.",
                    reservation.from, reservation.date
                )))
            }
            Err(e) => Err(store_error("create reservation", e)),
        }
    }

    async fn mark_cancelled(
        &self,
        id: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> BookingResult<Reservation> {
        let updated = repo::cancel_reservation(&self.pool, id, reason, at)
            .await
            .map_err(|e| store_error("cancel reservation", e))?;

        match updated {
            Some(row) => Ok(Reservation::try_from(row)?),
            None => match self.get_reservation(id).await? {
                Some(_) => Err(BookingError::Policy(
                    CancellationDenial::AlreadyCancelled.to_string(),
                )),
                None => Err(BookingError::NotFound(format!("Reservation {} not found", id))),
            },
        }
    }
}
