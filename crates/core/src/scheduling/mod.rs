pub mod availability;
pub mod cancellation;
pub mod guard;
pub mod slots;
