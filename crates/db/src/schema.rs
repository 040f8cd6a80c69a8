use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            date DATE NOT NULL,
            from_time VARCHAR(5) NOT NULL,
            to_time VARCHAR(5) NOT NULL,
            customer_name VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(20) NOT NULL,
            service VARCHAR(64) NOT NULL,
            price BIGINT NOT NULL,
            deposit BIGINT NOT NULL,
            payment_reference VARCHAR(255) NULL,
            receipt_url TEXT NULL,
            user_id UUID NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            cancelled_at TIMESTAMP WITH TIME ZONE NULL,
            cancellation_reason TEXT NULL,
            CONSTRAINT valid_slot_range CHECK (to_time > from_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one active appointment per slot. This is what settles racing bookings.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS uq_appointments_active_slot
            ON appointments(date, from_time)
            WHERE cancelled_at IS NULL;
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date);",
        "CREATE INDEX IF NOT EXISTS idx_appointments_user_id ON appointments(user_id);",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
