use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{payment::PaymentStatus, service::ServiceOffering, slot_time::SlotTime};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub date: NaiveDate,
    pub from: SlotTime,
    pub to: SlotTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub service: ServiceOffering,
    pub price: i64,
    pub deposit: i64,
    pub payment_reference: Option<String>,
    pub receipt_url: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
}

/// The instant `date` + `start` denotes when read as wall-clock time in the shop's zone.
pub fn appointment_instant(date: NaiveDate, start: SlotTime, timezone: Tz) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(start.minutes()));

    // A wall-clock time skipped by a DST jump has no local instant; read it as UTC.
    match timezone.from_local_datetime(&local).earliest() {
        Some(instant) => instant.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&local),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationState {
    Active,
    Cancelled,
    Past,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.cancelled_at.is_none()
    }

    pub fn appointment_start(&self, timezone: Tz) -> DateTime<Utc> {
        appointment_instant(self.date, self.from, timezone)
    }

    pub fn state(&self, now: DateTime<Utc>, timezone: Tz) -> ReservationState {
        if !self.is_active() {
            ReservationState::Cancelled
        } else if self.appointment_start(timezone) < now {
            ReservationState::Past
        } else {
            ReservationState::Active
        }
    }

    pub fn time_range(&self) -> String {
        format!("{} - {}", self.from, self.to)
    }

    pub fn payment_status(&self, now: DateTime<Utc>) -> PaymentStatus {
        let has_proof = self.payment_reference.is_some() || self.receipt_url.is_some();
        PaymentStatus::evaluate(has_proof, self.created_at, now)
    }
}

/// A reservation together with its lifecycle and payment status at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub state: ReservationState,
    pub payment_status: PaymentStatus,
}

impl ReservationView {
    pub fn new(reservation: Reservation, now: DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            state: reservation.state(now, timezone),
            payment_status: reservation.payment_status(now),
            reservation,
        }
    }
}

/// Everything the store needs to persist a reservation; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub date: NaiveDate,
    pub from: SlotTime,
    pub to: SlotTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub service: ServiceOffering,
    pub price: i64,
    pub deposit: i64,
    pub payment_reference: Option<String>,
    pub receipt_url: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Customer-supplied part of a booking submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub service: ServiceOffering,
    pub payment_reference: Option<String>,
    pub receipt_url: Option<String>,
}
