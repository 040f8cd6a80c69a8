use barberbook_core::models::{
    notification::{Notification, NotificationKind},
    payment::{
        PaymentStatus, calculate_deposit, validate_payment_amount, validate_payment_proof,
    },
    reservation::{Reservation, ReservationState, ReservationView},
    service::{ServiceInfo, ServiceOffering},
    session::{Role, Session},
    time_slot::TimeSlot,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::America::Bogota;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use uuid::Uuid;

fn reservation() -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        from: "14:00".parse().unwrap(),
        to: "14:35".parse().unwrap(),
        customer_name: "Camila".to_string(),
        customer_phone: "3109876543".to_string(),
        service: ServiceOffering::FullCut,
        price: 28_000,
        deposit: 14_000,
        payment_reference: None,
        receipt_url: None,
        user_id: None,
        created_at: Utc::now(),
        cancelled_at: None,
        cancellation_reason: None,
    }
}

#[rstest]
#[case(ServiceOffering::SimpleCut, "Corte sencillo", 18_000, 35)]
#[case(ServiceOffering::CutAndEyebrows, "Corte + cejas", 20_000, 45)]
#[case(ServiceOffering::CutAndBeard, "Corte + barba", 25_000, 50)]
#[case(ServiceOffering::CutAndStyling, "Corte + peinado", 25_000, 45)]
#[case(ServiceOffering::FullCut, "Corte completo", 28_000, 60)]
fn test_service_catalog(
    #[case] service: ServiceOffering,
    #[case] name: &str,
    #[case] price: i64,
    #[case] duration: u32,
) {
    assert_eq!(service.name(), name);
    assert_eq!(service.price(), price);
    assert_eq!(service.duration_minutes(), duration);
    assert_eq!(service.as_str().parse::<ServiceOffering>().unwrap(), service);
}

#[test]
fn test_service_wire_form() {
    assert_eq!(to_value(ServiceOffering::CutAndBeard).unwrap(), json!("cut_and_beard"));
    assert!("haircut".parse::<ServiceOffering>().is_err());

    let info = ServiceInfo::from(ServiceOffering::SimpleCut);
    assert_eq!(
        to_value(&info).unwrap(),
        json!({ "key": "simple_cut", "name": "Corte sencillo", "price": 18000, "deposit": 9000, "duration_minutes": 35 })
    );
}

#[rstest]
#[case(18_000, 9_000)]
#[case(25_000, 12_500)]
#[case(1_001, 501)]
#[case(0, 0)]
fn test_deposit_is_half_rounded(#[case] price: i64, #[case] deposit: i64) {
    assert_eq!(calculate_deposit(price), deposit);
}

#[test]
fn test_payment_amount_bounds() {
    assert!(validate_payment_amount(999).is_err());
    assert!(validate_payment_amount(1_000).is_ok());
    assert!(validate_payment_amount(200_000).is_ok());
    assert!(validate_payment_amount(200_001).is_err());
}

#[test]
fn test_payment_proof_rules() {
    assert!(validate_payment_proof(None, None).is_err());
    assert!(validate_payment_proof(Some("   "), None).is_err());
    assert!(validate_payment_proof(Some("abc"), None).is_err());
    assert!(validate_payment_proof(Some("abcd"), None).is_ok());
    assert!(validate_payment_proof(None, Some("https://files.example/receipt.png")).is_ok());
}

#[test]
fn test_payment_status() {
    let mut r = reservation();
    let created = r.created_at;

    assert_eq!(r.payment_status(created + Duration::hours(2)), PaymentStatus::Pending);
    assert_eq!(r.payment_status(created + Duration::hours(25)), PaymentStatus::Expired);

    r.payment_reference = Some("NEQUI-1234".to_string());
    assert_eq!(r.payment_status(created + Duration::hours(25)), PaymentStatus::Confirmed);
}

#[test]
fn test_reservation_serializes_canonical_times() {
    let r = reservation();
    let value = to_value(&r).unwrap();

    assert_eq!(value["from"], json!("14:00"));
    assert_eq!(value["to"], json!("14:35"));
    assert_eq!(value["date"], json!("2025-06-01"));
    assert_eq!(value["service"], json!("full_cut"));
}

#[test]
fn test_reservation_view_carries_derived_status() {
    let mut r = reservation();
    r.created_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    // 14:00 in Bogota is 19:00 UTC
    let before = Utc.with_ymd_and_hms(2025, 6, 1, 13, 0, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2025, 6, 2, 13, 0, 0).unwrap();

    let view = ReservationView::new(r.clone(), before, Bogota);
    assert_eq!(view.state, ReservationState::Active);
    assert_eq!(view.payment_status, PaymentStatus::Pending);

    let value = to_value(&view).unwrap();
    assert_eq!(value["id"], json!(r.id));
    assert_eq!(value["from"], json!("14:00"));
    assert_eq!(value["state"], json!("active"));
    assert_eq!(value["payment_status"], json!("pending"));

    let view = ReservationView::new(r, after, Bogota);
    assert_eq!(view.state, ReservationState::Past);
    assert_eq!(view.payment_status, PaymentStatus::Expired);
}

#[test]
fn test_time_slot_rejects_malformed_times() {
    let bad = r#"{"start":"9:00","end":"09:35","start_minutes":540,"end_minutes":575,"available":true,"booked_by":null}"#;
    assert!(from_str::<TimeSlot>(bad).is_err());
}

#[test]
fn test_notification_from_reservation() {
    let mut r = reservation();
    r.cancelled_at = Some(Utc::now());
    r.cancellation_reason = Some("Cancelled by customer".to_string());

    let booked = Notification::booked(&r);
    assert_eq!(booked.kind, NotificationKind::Booked);
    assert_eq!(booked.service_name, "Corte completo");
    assert_eq!(booked.time_range, "14:00 - 14:35");
    assert_eq!(booked.reason, None);

    let cancelled = Notification::cancelled(&r);
    assert_eq!(cancelled.kind, NotificationKind::Cancelled);
    assert_eq!(cancelled.reason.as_deref(), Some("Cancelled by customer"));
}

#[rstest]
#[case("customer", Role::Customer)]
#[case("Admin", Role::Admin)]
#[case(" admin ", Role::Admin)]
fn test_role_parsing(#[case] raw: &str, #[case] role: Role) {
    assert_eq!(raw.parse::<Role>().unwrap(), role);
}

#[test]
fn test_session_constructors() {
    let id = Uuid::new_v4();
    assert!(Session::admin(id).is_admin());
    assert!(!Session::customer(id).is_admin());
    assert!("barber".parse::<Role>().is_err());
}
