use barberbook_core::models::reservation::Reservation;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::{Report, WrapErr};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub date: NaiveDate,
    pub from_time: String,
    pub to_time: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service: String,
    pub price: i64,
    pub deposit: i64,
    pub payment_reference: Option<String>,
    pub receipt_url: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
}

impl TryFrom<DbReservation> for Reservation {
    type Error = Report;

    fn try_from(row: DbReservation) -> Result<Self, Self::Error> {
        Ok(Reservation {
            id: row.id,
            date: row.date,
            from: row
                .from_time
                .parse()
                .wrap_err_with(|| format!("appointment {} has a malformed start time", row.id))?,
            to: row
                .to_time
                .parse()
                .wrap_err_with(|| format!("appointment {} has a malformed end time", row.id))?,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            service: row
                .service
                .parse()
                .map_err(|e| eyre::eyre!("appointment {}: {}", row.id, e))?,
            price: row.price,
            deposit: row.deposit,
            payment_reference: row.payment_reference,
            receipt_url: row.receipt_url,
            user_id: row.user_id,
            created_at: row.created_at,
            cancelled_at: row.cancelled_at,
            cancellation_reason: row.cancellation_reason,
        })
    }
}
