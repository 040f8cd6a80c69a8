pub mod business_hours;
pub mod notification;
pub mod payment;
pub mod reservation;
pub mod service;
pub mod session;
pub mod slot_time;
pub mod time_slot;
