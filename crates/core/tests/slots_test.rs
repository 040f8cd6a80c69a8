use barberbook_core::{
    models::{business_hours::BusinessHours, slot_time::SlotTime},
    scheduling::slots::{find_slot, generate_slots, next_available_slot},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_default_grid_matches_shop_hours() {
    let slots = generate_slots(&BusinessHours::default());

    let first = slots.first().expect("grid should not be empty");
    assert_eq!(first.start.to_string(), "09:00");
    assert_eq!(first.end.to_string(), "09:35");

    // The 35-minute step lands on 21:15; 21:50-22:00 is left unscheduled
    let last = slots.last().expect("grid should not be empty");
    assert!(last.start <= "21:25".parse::<SlotTime>().unwrap());
    assert_eq!(last.start.to_string(), "21:15");
    assert_eq!(last.end.to_string(), "21:50");

    // 13 hours of 35-minute slots
    assert_eq!(slots.len(), 22);
}

#[rstest]
#[case(9, 22, 35)]
#[case(9, 18, 40)]
#[case(8, 20, 30)]
#[case(0, 24, 45)]
#[case(10, 11, 7)]
fn test_slots_tile_without_overlap(#[case] opening: u32, #[case] closing: u32, #[case] duration: u32) {
    let hours = BusinessHours::new(opening, closing, duration).unwrap();
    let slots = generate_slots(&hours);

    assert!(!slots.is_empty());
    assert_eq!(slots[0].start_minutes, opening * 60);

    for slot in &slots {
        assert_eq!(slot.end_minutes - slot.start_minutes, duration);
        assert_eq!(slot.start.minutes(), slot.start_minutes);
        assert_eq!(slot.end.minutes(), slot.end_minutes);
        assert!(slot.end_minutes <= closing * 60);
        assert!(slot.available);
        assert_eq!(slot.booked_by, None);
    }

    for pair in slots.windows(2) {
        assert_eq!(pair[0].end_minutes, pair[1].start_minutes);
        assert!(pair[0].start_minutes < pair[1].start_minutes);
    }
}

#[test]
fn test_trailing_partial_slot_is_dropped() {
    // 60 minutes of 25-minute slots leaves a 10-minute remainder
    let hours = BusinessHours::new(10, 11, 25).unwrap();
    let slots = generate_slots(&hours);

    let starts: Vec<String> = slots.iter().map(|s| s.start.to_string()).collect();
    assert_eq!(starts, vec!["10:00", "10:25"]);
}

#[rstest]
#[case(18, 9)]
#[case(12, 12)]
fn test_empty_window_yields_no_slots(#[case] opening: u32, #[case] closing: u32) {
    let hours = BusinessHours::new(opening, closing, 30).unwrap();
    assert!(generate_slots(&hours).is_empty());
}

#[test]
fn test_zero_duration_yields_no_slots() {
    let hours = BusinessHours {
        opening_hour: 9,
        closing_hour: 22,
        slot_duration_minutes: 0,
    };
    assert!(generate_slots(&hours).is_empty());
}

#[test]
fn test_generation_is_idempotent() {
    let hours = BusinessHours::default();
    assert_eq!(generate_slots(&hours), generate_slots(&hours));
}

#[test]
fn test_slot_ending_at_midnight() {
    let hours = BusinessHours::new(23, 24, 30).unwrap();
    let slots = generate_slots(&hours);

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].end.to_string(), "24:00");
}

#[test]
fn test_next_available_respects_grid_order() {
    let hours = BusinessHours::default();
    let mut slots = generate_slots(&hours);
    slots[0].available = false;
    slots[1].available = false;

    let next = next_available_slot(&slots).unwrap();
    assert_eq!(next.start.to_string(), "10:10");

    for slot in &mut slots {
        slot.available = false;
    }
    assert!(next_available_slot(&slots).is_none());
}

#[test]
fn test_find_slot_only_matches_grid_starts() {
    let slots = generate_slots(&BusinessHours::default());

    let on_grid: SlotTime = "10:10".parse().unwrap();
    let off_grid: SlotTime = "10:00".parse().unwrap();

    assert!(find_slot(&slots, on_grid).is_some());
    assert!(find_slot(&slots, off_grid).is_none());
}

#[test]
fn test_business_hours_validation() {
    assert!(BusinessHours::new(9, 25, 30).is_err());
    assert!(BusinessHours::new(9, 22, 0).is_err());
    assert!(BusinessHours::new(9, 22, 35).is_ok());
}

#[test]
fn test_oversized_duration_is_rejected() {
    assert!(BusinessHours::new(9, 22, 24 * 60).is_ok());
    assert!(BusinessHours::new(9, 22, 24 * 60 + 1).is_err());
    assert!(BusinessHours::new(9, 22, u32::MAX).is_err());
}

#[test]
fn test_huge_duration_yields_no_slots_without_overflow() {
    // Built directly, bypassing validation
    let hours = BusinessHours {
        opening_hour: 9,
        closing_hour: 22,
        slot_duration_minutes: u32::MAX,
    };
    assert!(generate_slots(&hours).is_empty());

    let whole_day = BusinessHours::new(0, 24, 24 * 60).unwrap();
    let slots = generate_slots(&whole_day);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].end.to_string(), "24:00");
}
