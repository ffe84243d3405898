//! One envelope per endpoint. A missing collection key is a decode error,
//! never an empty list.

use serde::Deserialize;

use crate::list::ServerPage;
use crate::models::{Activity, Job, Member, MemberDashboard, Payment, Prospect};

#[derive(Debug, Deserialize)]
pub struct JobsEnvelope {
    pub jobs: Vec<Job>,
}

/// `GET /jobs?page=&limit=`
#[derive(Debug, Deserialize)]
pub struct PagedJobs {
    pub jobs: Vec<Job>,
    #[serde(flatten)]
    pub page: ServerPage,
}

#[derive(Debug, Deserialize)]
pub struct UsersEnvelope {
    pub users: Vec<Member>,
}

#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: Member,
}

#[derive(Debug, Deserialize)]
pub struct PaymentsEnvelope {
    pub payments: Vec<Payment>,
}

#[derive(Debug, Deserialize)]
pub struct ProspectsEnvelope {
    pub data: Vec<Prospect>,
}

#[derive(Debug, Deserialize)]
pub struct MemberDashboardEnvelope {
    pub dashboard: MemberDashboard,
}

/// `GET /user/recent-activity/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityEnvelope {
    pub recent_activity: RecentActivity,
}

#[derive(Debug, Deserialize)]
pub struct RecentActivity {
    pub activities: Vec<Activity>,
}

/// Body of a successful mutation. Backends answer with anything from an
/// empty body to the created entity, so every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryResult {
    pub email: String,
    pub status: DeliveryStatus,
}

/// `PUT /prospects/send-email`
#[derive(Debug, Default, Deserialize)]
pub struct SendEmailReport {
    #[serde(default)]
    pub results: Vec<DeliveryResult>,
}

impl SendEmailReport {
    pub fn sent(&self) -> usize {
        self.count(DeliveryStatus::Success)
    }

    pub fn failed(&self) -> usize {
        self.count(DeliveryStatus::Failed)
    }

    fn count(&self, status: DeliveryStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}
