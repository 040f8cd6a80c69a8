//! # Barberbook Core
//!
//! Appointment slot scheduling for the barbershop: the daily slot grid,
//! availability against existing reservations, the commit-time conflict
//! guard, and the cancellation policy. Persistence and message delivery are
//! reached through the [`store::ReservationStore`] and
//! [`notify::NotificationDispatcher`] traits.

pub mod booking;
pub mod clock;
pub mod errors;
pub mod models;
pub mod notify;
pub mod poll;
pub mod scheduling;
pub mod store;
