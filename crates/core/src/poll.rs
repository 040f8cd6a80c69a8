//! Periodic slot refresh.
//!
//! Availability is kept fresh by re-running the slot query on a fixed
//! interval. This is an intentional poll, not push synchronization: a slot
//! taken between two ticks shows as free until the next tick, and the
//! conflict guard still has the final say at commit.

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, warn};

use crate::{booking::BookingService, models::time_slot::TimeSlot};

pub struct SlotPoller {
    service: Arc<BookingService>,
    date: NaiveDate,
    every: Duration,
}

impl SlotPoller {
    pub fn new(service: Arc<BookingService>, date: NaiveDate, every: Duration) -> Self {
        Self {
            service,
            date,
            every,
        }
    }

    /// Starts polling. The receiver sees a new value whenever the grid changes;
    /// the task ends once every receiver is dropped.
    pub fn spawn(self) -> (watch::Receiver<Vec<TimeSlot>>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(Vec::new());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = tx.closed() => break,
                }

                match self.service.get_slots_for_date(self.date).await {
                    Ok(slots) => {
                        tx.send_if_modified(|current| {
                            if *current == slots {
                                false
                            } else {
                                *current = slots;
                                true
                            }
                        });
                    }
                    Err(e) => warn!("Slot refresh for {} failed: {}", self.date, e),
                }
            }

            debug!("Slot poller for {} stopped", self.date);
        });

        (rx, handle)
    }
}
