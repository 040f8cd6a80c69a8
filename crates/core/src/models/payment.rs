use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

pub const DEPOSIT_PERCENTAGE: f64 = 0.5;
pub const MIN_AMOUNT: i64 = 1_000;
pub const MAX_AMOUNT: i64 = 200_000;
pub const MIN_REFERENCE_LENGTH: usize = 4;
pub const PAYMENT_PROOF_EXPIRY_HOURS: i64 = 24;

/// Up-front deposit owed for a booking, rounded to the nearest peso.
pub fn calculate_deposit(price: i64) -> i64 {
    (price as f64 * DEPOSIT_PERCENTAGE).round() as i64
}

pub fn validate_payment_amount(amount: i64) -> BookingResult<()> {
    if amount < MIN_AMOUNT {
        return Err(BookingError::Validation(format!(
            "Minimum amount is {} COP",
            MIN_AMOUNT
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(BookingError::Validation(format!(
            "Maximum amount is {} COP",
            MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Requires a receipt or a transaction reference. Neither is verified here.
pub fn validate_payment_proof(reference: Option<&str>, receipt_url: Option<&str>) -> BookingResult<()> {
    let reference = reference.map(str::trim).filter(|r| !r.is_empty());
    let receipt_url = receipt_url.map(str::trim).filter(|r| !r.is_empty());

    if reference.is_none() && receipt_url.is_none() {
        return Err(BookingError::Validation(
            "A payment receipt or transaction reference is required".to_string(),
        ));
    }

    if let Some(reference) = reference {
        if reference.chars().count() < MIN_REFERENCE_LENGTH {
            return Err(BookingError::Validation(format!(
                "Transaction reference must be at least {} characters",
                MIN_REFERENCE_LENGTH
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Confirmed,
    Pending,
    Expired,
}

impl PaymentStatus {
    pub fn evaluate(has_proof: bool, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if has_proof {
            PaymentStatus::Confirmed
        } else if now - created_at > Duration::hours(PAYMENT_PROOF_EXPIRY_HOURS) {
            PaymentStatus::Expired
        } else {
            PaymentStatus::Pending
        }
    }
}
