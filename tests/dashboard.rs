mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::serve;
use dispute_desk::api::{ApiClient, ApiError};
use dispute_desk::fetcher::Fetcher;
use dispute_desk::models::JobStatus;
use dispute_desk::notify::{RecordingNotifier, ToastLevel};
use dispute_desk::present::render;
use dispute_desk::screens;
use serde_json::json;
use tokio_util::sync::CancellationToken;

async fn client_for(router: Router) -> ApiClient {
    let base = serve(router).await;
    ApiClient::new(&base, None, Duration::from_secs(5)).unwrap()
}

fn activity(id: u64, date: &str, kind: &str) -> serde_json::Value {
    json!({
        "id": id,
        "briefOverview": format!("Dispute {id}"),
        "jobDate": date,
        "resolutionField": "Mediation",
        "venue": "Sydney",
        "duration": "Full day",
        "remuneration": "1200",
        "activityType": kind,
    })
}

#[tokio::test]
async fn test_member_dashboard_and_recent_activity() {
    let api = client_for(
        Router::new()
            .route(
                "/api/user/dashboard/{id}",
                get(|| async {
                    Json(json!({
                        "dashboard": {
                            "availableJobs": { "count": 4 },
                            "totalJobsDone": { "count": 11 },
                            "pastMonthJobs": { "count": 2 },
                        }
                    }))
                }),
            )
            .route(
                "/api/user/recent-activity/{id}",
                get(|| async {
                    Json(json!({
                        "recentActivity": {
                            "activities": [
                                activity(3, "2025-03-10", "Completed"),
                                activity(8, "2025-05-02", "Aborted"),
                            ]
                        }
                    }))
                }),
            ),
    )
    .await;
    let notifier = RecordingNotifier::default();
    let cancel = CancellationToken::new();
    let fetcher = Fetcher::new(&api, &notifier);

    let dashboard = fetcher.member_dashboard(7, &cancel).await.unwrap();
    assert_eq!(dashboard.available_jobs.count, 4);
    assert_eq!(dashboard.total_jobs_done.count, 11);
    assert_eq!(dashboard.past_month_jobs.count, 2);

    let mut feed = screens::recent_activity(10);
    fetcher.recent_activity(7, &mut feed, &cancel).await.unwrap();
    let view = feed.view();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].id, 8);
    assert_eq!(view.rows[0].activity_type, JobStatus::Aborted);
    assert_eq!(view.rows[1].remuneration, 1200.0);

    let table = render(feed.view(), false);
    assert!(table.contains("Completed"));
    assert!(table.contains("Dispute 8"));
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn test_flat_dashboard_is_reported() {
    let api = client_for(Router::new().route(
        "/api/user/dashboard/{id}",
        get(|| async { Json(json!({ "availableJobs": 4, "totalJobsDone": 11 })) }),
    ))
    .await;
    let notifier = RecordingNotifier::default();

    let err = Fetcher::new(&api, &notifier)
        .member_dashboard(7, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    let toast = notifier.last().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(
        toast.message,
        "Failed to fetch member dashboard: Please try again later"
    );
}

#[tokio::test]
async fn test_stats_and_profile_failures_toast_backend_message() {
    let failing = || async {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Stats service down" })),
        )
    };
    let api = client_for(
        Router::new()
            .route("/api/stats/dashboard", get(failing))
            .route("/api/user/{id}", get(failing)),
    )
    .await;
    let notifier = RecordingNotifier::default();
    let cancel = CancellationToken::new();
    let fetcher = Fetcher::new(&api, &notifier);

    fetcher.dashboard_stats(&cancel).await.unwrap_err();
    assert_eq!(
        notifier.last().unwrap().message,
        "Failed to fetch dashboard stats: Stats service down"
    );

    fetcher.member(7, &cancel).await.unwrap_err();
    assert_eq!(
        notifier.last().unwrap().message,
        "Failed to fetch user profile: Stats service down"
    );
    assert_eq!(notifier.toasts().len(), 2);
}

#[tokio::test]
async fn test_empty_activity_feed() {
    let api = client_for(Router::new().route(
        "/api/user/recent-activity/{id}",
        get(|| async { Json(json!({ "recentActivity": { "activities": [] } })) }),
    ))
    .await;
    let notifier = RecordingNotifier::default();

    let mut feed = screens::recent_activity(10);
    Fetcher::new(&api, &notifier)
        .recent_activity(7, &mut feed, &CancellationToken::new())
        .await
        .unwrap();
    assert!(feed.items().is_empty());
    assert!(notifier.toasts().is_empty());
}
