pub mod booking;
pub mod services;
pub mod slots;
