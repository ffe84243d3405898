mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{Backend, member, serve, start};
use dispute_desk::api::{ApiClient, ApiError, PaymentScope};
use dispute_desk::fetcher::Fetcher;
use dispute_desk::notify::{RecordingNotifier, ToastLevel};
use dispute_desk::present::{EMPTY_TEXT, render};
use dispute_desk::screens;
use serde_json::json;
use tokio_util::sync::CancellationToken;

async fn client_for(router: Router) -> ApiClient {
    let base = serve(router).await;
    ApiClient::new(&base, None, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_wrong_envelope_clears_list() {
    let (api, _db) = start(Backend {
        users: vec![member(1, "Ada", "inactive")],
        ..Default::default()
    })
    .await;
    let notifier = RecordingNotifier::default();
    let cancel = CancellationToken::new();

    let mut members = screens::members(10);
    Fetcher::new(&api, &notifier)
        .members(&mut members, &cancel)
        .await
        .unwrap();
    assert_eq!(members.items().len(), 1);

    // same list state, now against a backend that renamed the collection key
    let broken = client_for(Router::new().route(
        "/api/users",
        get(|| async { Json(json!({ "data": [] })) }),
    ))
    .await;
    let err = Fetcher::new(&broken, &notifier)
        .members(&mut members, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(members.items().is_empty());
    assert!(!members.is_loading());
    assert_eq!(render(members.view(), true), EMPTY_TEXT);

    let toast = notifier.last().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "Failed to fetch members: Please try again later");
}

#[tokio::test]
async fn test_backend_message_reaches_toast() {
    let api = client_for(Router::new().route(
        "/api/payments",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Database unavailable" })),
            )
        }),
    ))
    .await;
    let notifier = RecordingNotifier::default();
    let cancel = CancellationToken::new();

    let mut payments = screens::payments(10);
    let err = Fetcher::new(&api, &notifier)
        .payments(PaymentScope::All, &mut payments, &cancel)
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, message, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message.as_deref(), Some("Database unavailable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        notifier.last().unwrap().message,
        "Failed to fetch payments: Database unavailable"
    );
}

#[tokio::test]
async fn test_cancelled_fetch_keeps_items() {
    let (api, _db) = start(Backend {
        users: vec![member(1, "Ada", "inactive"), member(2, "Grace", "active")],
        ..Default::default()
    })
    .await;
    let notifier = RecordingNotifier::default();

    let mut members = screens::members(10);
    Fetcher::new(&api, &notifier)
        .members(&mut members, &CancellationToken::new())
        .await
        .unwrap();

    let slow = client_for(Router::new().route(
        "/api/users",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "users": [] }))
        }),
    ))
    .await;
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = Fetcher::new(&slow, &notifier)
        .members(&mut members, &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(members.items().len(), 2);
    assert!(!members.is_loading());
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn test_server_paginated_schedule() {
    let api = client_for(Router::new().route(
        "/api/jobs",
        get(|| async {
            Json(json!({
                "jobs": [common::job(11, "Available", None)],
                "total": 21,
                "totalPages": 3,
            }))
        }),
    ))
    .await;
    let notifier = RecordingNotifier::default();
    let cancel = CancellationToken::new();

    let mut jobs = screens::jobs(10);
    Fetcher::new(&api, &notifier)
        .jobs_page(&mut jobs, &cancel)
        .await
        .unwrap();
    assert_eq!(jobs.current_page(), 1);

    assert_eq!(jobs.set_page(2), 2);
    Fetcher::new(&api, &notifier)
        .jobs_page(&mut jobs, &cancel)
        .await
        .unwrap();

    let view = jobs.view();
    assert_eq!(view.page.page, 2);
    assert_eq!(view.page.total_pages, 3);
    assert_eq!(view.page.total_items, 21);
    assert!(view.page.show_controls());
}
