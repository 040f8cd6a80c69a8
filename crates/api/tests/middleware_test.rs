use axum::{
    body::to_bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use barberbook_api::middleware::error_handling::AppError;
use barberbook_core::errors::BookingError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn respond(error: BookingError) -> Response {
    AppError(error).into_response()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case::not_found(BookingError::NotFound("Reservation missing".into()), StatusCode::NOT_FOUND)]
#[case::validation(BookingError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case::conflict(BookingError::Conflict("Slot taken".into()), StatusCode::CONFLICT)]
#[case::policy(BookingError::Policy("Window elapsed".into()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case::authentication(BookingError::Authentication("Missing session".into()), StatusCode::UNAUTHORIZED)]
#[case::authorization(BookingError::Authorization("Not the owner".into()), StatusCode::FORBIDDEN)]
#[case::store(BookingError::Store(eyre::eyre!("pool timed out")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::internal(BookingError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[tokio::test]
async fn test_client_errors_carry_their_message() {
    let response = respond(BookingError::Conflict("The 14:15 slot is taken".into()));

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Slot conflict: The 14:15 slot is taken", "retryable": true })
    );
}

#[tokio::test]
async fn test_policy_errors_are_final() {
    let response = respond(BookingError::Policy("The appointment already occurred.".into()));

    let body = body_json(response).await;
    assert_eq!(body["retryable"], json!(false));
}

#[tokio::test]
async fn test_store_errors_are_generic_but_retryable() {
    let response = respond(BookingError::Store(eyre::eyre!(
        "password authentication failed for user \"barber\""
    )));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(!body["error"].as_str().unwrap().contains("password"));
    assert_eq!(body["retryable"], json!(true));
}

#[tokio::test]
async fn test_internal_errors_are_generic() {
    let response = respond(BookingError::Internal("stack overflow in template".into()));

    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Internal server error", "retryable": false }));
}

#[test]
fn test_eyre_reports_become_store_errors() {
    let error: AppError = eyre::eyre!("disk full").into();
    assert!(matches!(error.0, BookingError::Store(_)));
}
