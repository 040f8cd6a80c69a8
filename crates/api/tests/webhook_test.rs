use barberbook_api::notify::WebhookDispatcher;
use barberbook_core::{
    models::notification::{Notification, NotificationKind},
    notify::NotificationDispatcher,
};
use chrono::NaiveDate;
use fake::{Fake, faker::name::en::Name};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn notification(kind: NotificationKind, customer_name: String) -> Notification {
    Notification {
        kind,
        customer_name,
        customer_phone: "3001234567".to_string(),
        service_name: "Corte + barba".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        time_range: "14:15 - 14:50".to_string(),
        price: 25_000,
        reason: None,
    }
}

#[test_log::test(tokio::test)]
async fn test_posts_notification_as_json() {
    let mock_server = MockServer::start().await;
    let customer: String = Name().fake();

    Mock::given(method("POST"))
        .and(path("/notify"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "kind": "booked",
            "customer_name": customer,
            "time_range": "14:15 - 14:50",
            "price": 25000
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = WebhookDispatcher::new(format!("{}/notify", mock_server.uri())).unwrap();

    dispatcher
        .dispatch(&notification(NotificationKind::Booked, customer))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancellation_includes_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notify"))
        .and(body_partial_json(json!({
            "kind": "cancelled",
            "reason": "Cancelled by customer"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = WebhookDispatcher::new(format!("{}/notify", mock_server.uri())).unwrap();
    let mut cancelled = notification(NotificationKind::Cancelled, "Carlos".to_string());
    cancelled.reason = Some("Cancelled by customer".to_string());

    dispatcher.dispatch(&cancelled).await.unwrap();
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dispatcher = WebhookDispatcher::new(format!("{}/notify", mock_server.uri())).unwrap();
    let result = dispatcher
        .dispatch(&notification(NotificationKind::Booked, "Carlos".to_string()))
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_unreachable_webhook_is_an_error() {
    // Nothing listens on port 9 locally
    let dispatcher = WebhookDispatcher::new("http://127.0.0.1:9/notify").unwrap();

    let result = dispatcher
        .dispatch(&notification(NotificationKind::Booked, "Carlos".to_string()))
        .await;

    assert!(result.is_err());
}
