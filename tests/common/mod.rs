#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use dispute_desk::api::ApiClient;

/// Request as seen by the mock backend
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub jobs: Vec<Value>,
    pub users: Vec<Value>,
    pub payments: Vec<Value>,
    pub requests: Vec<Recorded>,
}

impl Backend {
    fn record(&mut self, method: &'static str, path: impl Into<String>, body: Value) {
        self.requests.push(Recorded {
            method,
            path: path.into(),
            body,
        });
    }

    pub fn mutations(&self) -> Vec<Recorded> {
        self.requests
            .iter()
            .filter(|r| r.method != "GET")
            .cloned()
            .collect()
    }
}

pub type Shared = Arc<Mutex<Backend>>;

pub fn job(id: u64, status: &str, user: Option<u64>) -> Value {
    json!({
        "id": id,
        "jobDate": "2025-05-01",
        "resolutionField": "Mediation",
        "venue": "Sydney",
        "duration": "Full day",
        "remuneration": 1500,
        "briefOverview": format!("Dispute {id}"),
        "intakeDetails": "Both parties contacted",
        "status": status,
        "userId": user,
    })
}

pub fn member(id: u64, first_name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "firstName": first_name,
        "lastName": "Smith",
        "emailAddress": format!("{}@example.com", first_name.to_lowercase()),
        "status": status,
        "completedJobs": id,
    })
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

async fn schedule(State(db): State<Shared>) -> Json<Value> {
    let mut db = db.lock().unwrap();
    db.record("GET", "/jobs", Value::Null);
    let jobs: Vec<Value> = db
        .jobs
        .iter()
        .filter(|j| j["status"] == "Available")
        .cloned()
        .collect();
    Json(json!({ "jobs": jobs }))
}

async fn admin_jobs(State(db): State<Shared>) -> Json<Value> {
    let mut db = db.lock().unwrap();
    db.record("GET", "/admin/jobs/all", Value::Null);
    Json(json!({ "jobs": db.jobs }))
}

async fn jobs_by_status(
    State(db): State<Shared>,
    Path(status): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut db = db.lock().unwrap();
    db.record("GET", format!("/jobs/status/{status}"), Value::Null);
    let user: Option<u64> = query.get("userId").and_then(|u| u.parse().ok());
    let jobs: Vec<Value> = db
        .jobs
        .iter()
        .filter(|j| j["status"] == status.as_str() && j["userId"].as_u64() == user)
        .cloned()
        .collect();
    Json(json!({ "jobs": jobs }))
}

async fn update_status(
    State(db): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    db.record("PUT", format!("/jobs/{id}/status"), body.clone());
    let Some(job) = db.jobs.iter_mut().find(|j| j["id"] == id) else {
        return error(StatusCode::NOT_FOUND, "Job not found");
    };
    if job["status"] != "Available" {
        return error(StatusCode::CONFLICT, "Job already booked");
    }
    job["status"] = body["status"].clone();
    job["userId"] = body["userId"].clone();
    (StatusCode::OK, Json(json!({ "message": "Job status updated" })))
}

async fn job_action(State(db): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    db.record("POST", "/jobs/action", body.clone());
    let Some(job) = db.jobs.iter_mut().find(|j| j["id"] == body["jobId"]) else {
        return error(StatusCode::NOT_FOUND, "Job not found");
    };
    job["status"] = body["action"].clone();
    (StatusCode::OK, Json(json!({})))
}

async fn users(State(db): State<Shared>) -> Json<Value> {
    let mut db = db.lock().unwrap();
    db.record("GET", "/users", Value::Null);
    Json(json!({ "users": db.users }))
}

async fn approve_user(State(db): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    db.record("PUT", "/admin/approve-user", body.clone());
    let Some(user) = db.users.iter_mut().find(|u| u["id"] == body["userId"]) else {
        return error(StatusCode::NOT_FOUND, "User not found");
    };
    user["status"] = match body["action"].as_str() {
        Some("approve") => json!("active"),
        _ => json!("reject"),
    };
    (StatusCode::OK, Json(json!({ "message": "ok" })))
}

async fn payments(State(db): State<Shared>) -> Json<Value> {
    let mut db = db.lock().unwrap();
    db.record("GET", "/payments", Value::Null);
    Json(json!({ "payments": db.payments }))
}

async fn create_payment(State(db): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    db.record("POST", "/payments", body.clone());
    let mut payment = body;
    payment["id"] = json!(db.payments.len() as u64 + 1);
    db.payments.push(payment.clone());
    (StatusCode::CREATED, Json(payment))
}

pub fn router(db: Shared) -> Router {
    Router::new()
        .route("/api/jobs", get(schedule))
        .route("/api/admin/jobs/all", get(admin_jobs))
        .route("/api/jobs/status/{status}", get(jobs_by_status))
        .route("/api/jobs/{id}/status", put(update_status))
        .route("/api/jobs/action", post(job_action))
        .route("/api/users", get(users))
        .route("/api/admin/approve-user", put(approve_user))
        .route("/api/payments", get(payments).post(create_payment))
        .with_state(db)
}

/// Serves `router` on an ephemeral port and returns its `/api` base URL
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub async fn start(backend: Backend) -> (ApiClient, Shared) {
    let db = Arc::new(Mutex::new(backend));
    let base = serve(router(db.clone())).await;
    let api = ApiClient::new(&base, Some("test-token".into()), Duration::from_secs(5)).unwrap();
    (api, db)
}
