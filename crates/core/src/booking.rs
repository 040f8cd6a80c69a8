//! # Booking Service
//!
//! The surface the web front end drives: slot queries, booking submission
//! and cancellation. Each call is one short unit of work against the
//! reservation store. There are no locks or retries here; a failed commit is
//! returned to the caller, which re-fetches the grid and lets the customer
//! choose again.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    clock::Clock,
    errors::{BookingError, BookingResult},
    models::{
        business_hours::BusinessHours,
        notification::Notification,
        payment::{calculate_deposit, validate_payment_amount, validate_payment_proof},
        reservation::{
            BookingRequest, NewReservation, Reservation, ReservationView, appointment_instant,
        },
        session::Session,
        slot_time::SlotTime,
        time_slot::TimeSlot,
    },
    notify::{NotificationDispatcher, dispatch_detached},
    scheduling::{
        availability::resolve_availability,
        cancellation::{
            CancellationDecision, CancellationEligibility, evaluate_admin_cancellation,
            evaluate_cancellation, remaining_cancellation_minutes,
        },
        guard::{CommitCheck, can_commit_booking},
        slots::{find_slot, generate_slots, next_available_slot},
    },
    store::ReservationStore,
};

pub const CUSTOMER_CANCELLATION_REASON: &str = "Cancelled by customer";
pub const ADMIN_CANCELLATION_REASON: &str = "Cancelled by administrator";

pub struct BookingService {
    hours: BusinessHours,
    timezone: Tz,
    store: Arc<dyn ReservationStore>,
    notifier: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(
        hours: BusinessHours,
        timezone: Tz,
        store: Arc<dyn ReservationStore>,
        notifier: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            hours,
            timezone,
            store,
            notifier,
            clock,
        }
    }

    pub fn hours(&self) -> &BusinessHours {
        &self.hours
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Derives the reservation's current state and payment status from the clock.
    pub fn view(&self, reservation: Reservation) -> ReservationView {
        ReservationView::new(reservation, self.clock.now(), self.timezone)
    }

    /// The day's grid with taken slots marked.
    pub async fn get_slots_for_date(&self, date: NaiveDate) -> BookingResult<Vec<TimeSlot>> {
        let grid = generate_slots(&self.hours);
        let reservations = self.store.list_active_reservations(date).await?;
        debug!(
            "Resolving {} slots against {} reservations for {}",
            grid.len(),
            reservations.len(),
            date
        );

        Ok(resolve_availability(date, &grid, &reservations))
    }

    pub async fn next_available_slot(&self, date: NaiveDate) -> BookingResult<Option<TimeSlot>> {
        let slots = self.get_slots_for_date(date).await?;
        Ok(next_available_slot(&slots).cloned())
    }

    /// Validates, re-checks the slot, then asks the store to commit.
    ///
    /// A slot taken between display and submission comes back as
    /// `Conflict`, whether the pre-check or the store's constraint caught it.
    pub async fn attempt_booking(
        &self,
        session: &Session,
        date: NaiveDate,
        slot_start: SlotTime,
        request: BookingRequest,
    ) -> BookingResult<Reservation> {
        let request = validate_booking_request(request)?;

        let grid = generate_slots(&self.hours);
        let slot = find_slot(&grid, slot_start).ok_or_else(|| {
            BookingError::Validation(format!("{} is not a bookable slot", slot_start))
        })?;

        let now = self.clock.now();
        if appointment_instant(date, slot.start, self.timezone) <= now {
            return Err(BookingError::Validation(format!(
                "The {} slot on {} has already started",
                slot_start, date
            )));
        }

        let price = request.service.price();
        validate_payment_amount(price)?;

        if let CommitCheck::Taken { reason } =
            can_commit_booking(self.store.as_ref(), date, slot_start).await?
        {
            warn!("Booking for {} at {} rejected by conflict guard", date, slot_start);
            return Err(BookingError::Conflict(reason));
        }

        let new_reservation = NewReservation {
            date,
            from: slot.start,
            to: slot.end,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            service: request.service,
            price,
            deposit: calculate_deposit(price),
            payment_reference: request.payment_reference,
            receipt_url: request.receipt_url,
            user_id: Some(session.user_id),
            created_at: now,
        };

        let reservation = self
            .store
            .create_reservation(new_reservation)
            .await
            .inspect_err(|e| {
                if let BookingError::Conflict(_) = e {
                    warn!("Booking for {} at {} lost the race at commit", date, slot_start);
                }
            })?;

        info!(
            "Reservation {} booked for {} {} ({})",
            reservation.id,
            reservation.date,
            reservation.time_range(),
            reservation.service
        );
        dispatch_detached(self.notifier.clone(), Notification::booked(&reservation));

        Ok(reservation)
    }

    /// Cancels a reservation if the acting session is allowed to.
    ///
    /// Customers may cancel only their own reservations and only within the
    /// cancellation policy. Admins may cancel any active reservation.
    pub async fn attempt_cancellation(
        &self,
        session: &Session,
        reservation_id: Uuid,
        reason: Option<String>,
    ) -> BookingResult<Reservation> {
        let reservation = self.load(reservation_id).await?;
        let now = self.clock.now();

        let decision = if session.is_admin() {
            evaluate_admin_cancellation(&reservation)
        } else {
            ensure_owner(session, &reservation)?;
            evaluate_cancellation(&reservation, now, self.timezone)
        };

        if let CancellationDecision::Denied(denial) = decision {
            debug!("Cancellation of {} denied: {:?}", reservation_id, denial);
            return Err(BookingError::Policy(denial.to_string()));
        }

        let default_reason = if session.is_admin() {
            ADMIN_CANCELLATION_REASON
        } else {
            CUSTOMER_CANCELLATION_REASON
        };
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| default_reason.to_string());

        let cancelled = self.store.mark_cancelled(reservation_id, &reason, now).await?;

        info!("Reservation {} cancelled: {}", cancelled.id, reason);
        dispatch_detached(self.notifier.clone(), Notification::cancelled(&cancelled));

        Ok(cancelled)
    }

    /// Whether the session could cancel now, plus the countdown for display.
    pub async fn cancellation_eligibility(
        &self,
        session: &Session,
        reservation_id: Uuid,
    ) -> BookingResult<CancellationEligibility> {
        let reservation = self.load(reservation_id).await?;
        let now = self.clock.now();

        let decision = if session.is_admin() {
            evaluate_admin_cancellation(&reservation)
        } else {
            ensure_owner(session, &reservation)?;
            evaluate_cancellation(&reservation, now, self.timezone)
        };

        Ok(CancellationEligibility::new(
            decision,
            remaining_cancellation_minutes(&reservation, now),
        ))
    }

    async fn load(&self, reservation_id: Uuid) -> BookingResult<Reservation> {
        self.store
            .get_reservation(reservation_id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation {} not found", reservation_id)))
    }
}

fn ensure_owner(session: &Session, reservation: &Reservation) -> BookingResult<()> {
    if reservation.user_id != Some(session.user_id) {
        return Err(BookingError::Authorization(
            "You can only manage your own reservations".to_string(),
        ));
    }
    Ok(())
}

/// Normalizes the customer's input and rejects anything the store should never see.
pub fn validate_booking_request(request: BookingRequest) -> BookingResult<BookingRequest> {
    let customer_name = request.customer_name.trim().to_string();
    if customer_name.is_empty() {
        return Err(BookingError::Validation("Customer name is required".to_string()));
    }

    let customer_phone: String = request
        .customer_phone
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if customer_phone.len() != 10 || !customer_phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(BookingError::Validation(
            "Phone number must have exactly 10 digits".to_string(),
        ));
    }

    validate_payment_proof(
        request.payment_reference.as_deref(),
        request.receipt_url.as_deref(),
    )?;

    let payment_reference = request
        .payment_reference
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    let receipt_url = request
        .receipt_url
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    Ok(BookingRequest {
        customer_name,
        customer_phone,
        service: request.service,
        payment_reference,
        receipt_url,
    })
}
