use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reservation::Reservation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Booked,
    Cancelled,
}

/// What the surrounding system needs to template a booking or cancellation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_name: String,
    pub date: NaiveDate,
    pub time_range: String,
    pub price: i64,
    pub reason: Option<String>,
}

impl Notification {
    pub fn booked(reservation: &Reservation) -> Self {
        Self::from_reservation(NotificationKind::Booked, reservation, None)
    }

    pub fn cancelled(reservation: &Reservation) -> Self {
        Self::from_reservation(
            NotificationKind::Cancelled,
            reservation,
            reservation.cancellation_reason.clone(),
        )
    }

    fn from_reservation(kind: NotificationKind, reservation: &Reservation, reason: Option<String>) -> Self {
        Self {
            kind,
            customer_name: reservation.customer_name.clone(),
            customer_phone: reservation.customer_phone.clone(),
            service_name: reservation.service.name().to_string(),
            date: reservation.date,
            time_range: reservation.time_range(),
            price: reservation.price,
            reason,
        }
    }
}
