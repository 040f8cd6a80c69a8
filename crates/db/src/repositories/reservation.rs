use crate::models::DbReservation;
use barberbook_core::models::reservation::NewReservation;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const RESERVATION_COLUMNS: &str = r#"
    id, date, from_time, to_time, customer_name, customer_phone, service,
    price, deposit, payment_reference, receipt_url, user_id,
    created_at, cancelled_at, cancellation_reason
"#;

pub async fn create_reservation(
    pool: &Pool<Postgres>,
    reservation: &NewReservation,
) -> Result<DbReservation> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating appointment: id={}, date={}, from={}",
        id, reservation.date, reservation.from
    );

    let row = sqlx::query_as::<_, DbReservation>(&format!(
        r#"
        INSERT INTO appointments (
            id, date, from_time, to_time, customer_name, customer_phone, service,
            price, deposit, payment_reference, receipt_url, user_id, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {}
        "#,
        RESERVATION_COLUMNS
    ))
    .bind(id)
    .bind(reservation.date)
    .bind(reservation.from.to_string())
    .bind(reservation.to.to_string())
    .bind(&reservation.customer_name)
    .bind(&reservation.customer_phone)
    .bind(reservation.service.as_str())
    .bind(reservation.price)
    .bind(reservation.deposit)
    .bind(reservation.payment_reference.as_deref())
    .bind(reservation.receipt_url.as_deref())
    .bind(reservation.user_id)
    .bind(reservation.created_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_reservation_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbReservation>> {
    let row = sqlx::query_as::<_, DbReservation>(&format!(
        r#"
        SELECT {}
        FROM appointments
        WHERE id = $1
        "#,
        RESERVATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_active_reservations_by_date(
    pool: &Pool<Postgres>,
    date: NaiveDate,
) -> Result<Vec<DbReservation>> {
    let rows = sqlx::query_as::<_, DbReservation>(&format!(
        r#"
        SELECT {}
        FROM appointments
        WHERE date = $1 AND cancelled_at IS NULL
        ORDER BY from_time ASC
        "#,
        RESERVATION_COLUMNS
    ))
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns `None` when no active appointment with this id exists.
pub async fn cancel_reservation(
    pool: &Pool<Postgres>,
    id: Uuid,
    reason: &str,
    at: DateTime<Utc>,
) -> Result<Option<DbReservation>> {
    let row = sqlx::query_as::<_, DbReservation>(&format!(
        r#"
        UPDATE appointments
        SET cancelled_at = $2, cancellation_reason = $3
        WHERE id = $1 AND cancelled_at IS NULL
        RETURNING {}
        "#,
        RESERVATION_COLUMNS
    ))
    .bind(id)
    .bind(at)
    .bind(reason)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
