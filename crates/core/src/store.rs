use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::reservation::{NewReservation, Reservation},
};

/// Persistence boundary for reservations.
///
/// Implementations must reject a second active reservation for the same
/// `(date, from)` with [`BookingError::Conflict`](crate::errors::BookingError::Conflict).
/// That constraint, not any check made before calling `create_reservation`,
/// is what prevents double-booking.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Uncancelled reservations for `date`, ordered by start time.
    async fn list_active_reservations(&self, date: NaiveDate) -> BookingResult<Vec<Reservation>>;

    async fn get_reservation(&self, id: Uuid) -> BookingResult<Option<Reservation>>;

    async fn create_reservation(&self, reservation: NewReservation) -> BookingResult<Reservation>;

    /// Sets `cancelled_at` and the reason. Fails with `Policy` if the
    /// reservation was already cancelled and `NotFound` if it does not exist.
    async fn mark_cancelled(
        &self,
        id: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> BookingResult<Reservation>;
}
