use barberbook_core::{
    models::{
        business_hours::BusinessHours, reservation::Reservation, service::ServiceOffering,
        slot_time::SlotTime,
    },
    scheduling::{availability::resolve_availability, slots::generate_slots},
};
use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn reservation(date: NaiveDate, from: &str, to: &str, name: &str) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        date,
        from: from.parse().unwrap(),
        to: to.parse().unwrap(),
        customer_name: name.to_string(),
        customer_phone: "3001234567".to_string(),
        service: ServiceOffering::SimpleCut,
        price: 18_000,
        deposit: 9_000,
        payment_reference: Some("REF-1234".to_string()),
        receipt_url: None,
        user_id: None,
        created_at: Utc::now(),
        cancelled_at: None,
        cancellation_reason: None,
    }
}

fn june_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn test_reserved_slot_is_marked_taken() {
    let date = june_first();
    let grid = generate_slots(&BusinessHours::default());
    let reservations = vec![reservation(date, "10:45", "11:20", "Carlos")];

    let slots = resolve_availability(date, &grid, &reservations);

    assert_eq!(slots.len(), grid.len());
    for slot in &slots {
        if slot.start.to_string() == "10:45" {
            assert!(!slot.available);
            assert_eq!(slot.booked_by.as_deref(), Some("Carlos"));
        } else {
            assert!(slot.available, "{} should be free", slot.start);
            assert_eq!(slot.booked_by, None);
        }
    }
}

#[test]
fn test_cancelled_reservation_never_blocks() {
    let date = june_first();
    let grid = generate_slots(&BusinessHours::default());
    let mut cancelled = reservation(date, "10:45", "11:20", "Carlos");
    cancelled.cancelled_at = Some(Utc::now());

    let slots = resolve_availability(date, &grid, &[cancelled]);

    assert!(slots.iter().all(|s| s.available));
}

#[test]
fn test_other_dates_do_not_block() {
    let date = june_first();
    let grid = generate_slots(&BusinessHours::default());
    let next_day = date.succ_opt().unwrap();

    let slots = resolve_availability(date, &grid, &[reservation(next_day, "10:45", "11:20", "Ana")]);

    assert!(slots.iter().all(|s| s.available));
}

#[test]
fn test_matching_is_by_start_time_not_overlap() {
    // 10:15 falls inside the default grid's 10:10-10:45 slot, but only an exact start match blocks
    let date = june_first();
    let grid = generate_slots(&BusinessHours::default());
    let legacy = reservation(date, "10:15", "10:50", "Legacy");

    let slots = resolve_availability(date, &grid, &[legacy]);

    assert!(slots.iter().all(|s| s.available));
}

#[test]
fn test_only_the_held_slot_is_taken_on_a_finer_grid() {
    // 10:15 is not a start on the 35-minute grid, but is on a 15-minute one
    let date = june_first();
    let ten_fifteen: SlotTime = "10:15".parse().unwrap();
    let default_grid = generate_slots(&BusinessHours::default());
    assert!(default_grid.iter().all(|s| s.start != ten_fifteen));

    let grid = generate_slots(&BusinessHours::new(9, 12, 15).unwrap());
    let slots = resolve_availability(date, &grid, &[reservation(date, "10:15", "10:30", "Luis")]);

    let taken: Vec<_> = slots.iter().filter(|s| !s.available).collect();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].start, ten_fifteen);
    assert_eq!(taken[0].booked_by.as_deref(), Some("Luis"));
}

#[test]
fn test_inputs_are_not_mutated() {
    let date = june_first();
    let grid = generate_slots(&BusinessHours::default());
    let reservations = vec![reservation(date, "09:00", "09:35", "Ana")];
    let before = reservations.clone();

    let _ = resolve_availability(date, &grid, &reservations);

    assert_eq!(reservations, before);
    assert!(grid.iter().all(|s| s.available));
}
