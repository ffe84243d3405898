use std::fmt;

use chrono::NaiveDate;
use clap::{ValueEnum, builder::PossibleValue};
use serde::{Deserialize, Deserializer, Serialize};

pub type JobId = u64;
pub type MemberId = u64;
pub type PaymentId = u64;

/// Dispute resolution method attached to jobs, member expertise and payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionField {
    Mediation,
    Arbitration,
    Negotiation,
    Conciliation,
    Legal,
    #[serde(other)]
    Other,
}

impl ResolutionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionField::Mediation => "Mediation",
            ResolutionField::Arbitration => "Arbitration",
            ResolutionField::Negotiation => "Negotiation",
            ResolutionField::Conciliation => "Conciliation",
            ResolutionField::Legal => "Legal",
            ResolutionField::Other => "Other",
        }
    }
}

impl ValueEnum for ResolutionField {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Mediation,
            Self::Arbitration,
            Self::Negotiation,
            Self::Conciliation,
            Self::Legal,
            Self::Other,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(self.as_str().into())
    }
}

impl fmt::Display for ResolutionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobDuration {
    #[serde(rename = "Full day")]
    FullDay,
    #[serde(rename = "Half day")]
    HalfDay,
}

impl JobDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobDuration::FullDay => "Full day",
            JobDuration::HalfDay => "Half day",
        }
    }
}

impl ValueEnum for JobDuration {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::FullDay, Self::HalfDay]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            JobDuration::FullDay => PossibleValue::new("full-day").alias("Full day"),
            JobDuration::HalfDay => PossibleValue::new("half-day").alias("Half day"),
        })
    }
}

/// Job lifecycle. Unknown strings fail deserialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Available,
    Booked,
    Completed,
    Aborted,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Available => "Available",
            JobStatus::Booked => "Booked",
            JobStatus::Completed => "Completed",
            JobStatus::Aborted => "Aborted",
        }
    }

    /// Target status of `action`, or `None` when the console does not expose
    /// that transition from the current status.
    pub fn transition(&self, action: JobAction) -> Option<JobStatus> {
        match (self, action) {
            (JobStatus::Available, JobAction::Book) => Some(JobStatus::Booked),
            (JobStatus::Booked, JobAction::Complete) => Some(JobStatus::Completed),
            (JobStatus::Booked, JobAction::Abort) => Some(JobStatus::Aborted),
            _ => None,
        }
    }

    pub fn available_actions(&self) -> &'static [JobAction] {
        match self {
            JobStatus::Available => &[JobAction::Book],
            JobStatus::Booked => &[JobAction::Complete, JobAction::Abort],
            JobStatus::Completed | JobStatus::Aborted => &[],
        }
    }
}

impl ValueEnum for JobStatus {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Available, Self::Booked, Self::Completed, Self::Aborted]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(self.as_str().into())
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Book,
    Complete,
    Abort,
}

impl JobAction {
    /// Command name. `POST /jobs/action` carries the target `JobStatus`
    /// instead.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobAction::Book => "book",
            JobAction::Complete => "complete",
            JobAction::Abort => "abort",
        }
    }
}

/// Member approval status. The backend has emitted `approve` for active
/// members in older revisions, accepted here as an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Inactive,
    #[serde(alias = "approve")]
    Active,
    Reject,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Inactive => "inactive",
            MemberStatus::Active => "active",
            MemberStatus::Reject => "reject",
        }
    }

    pub fn transition(&self, action: MemberAction) -> Option<MemberStatus> {
        match (self, action) {
            (MemberStatus::Inactive, MemberAction::Approve) => Some(MemberStatus::Active),
            (MemberStatus::Inactive, MemberAction::Reject) => Some(MemberStatus::Reject),
            _ => None,
        }
    }

    pub fn available_actions(&self) -> &'static [MemberAction] {
        match self {
            MemberStatus::Inactive => &[MemberAction::Approve, MemberAction::Reject],
            MemberStatus::Active | MemberStatus::Reject => &[],
        }
    }
}

impl ValueEnum for MemberStatus {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Inactive, Self::Active, Self::Reject]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(self.as_str().into())
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    Approve,
    Reject,
}

impl MemberAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberAction::Approve => "approve",
            MemberAction::Reject => "reject",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            MemberAction::Approve => "approved",
            MemberAction::Reject => "rejected",
        }
    }
}

// Amounts arrive as JSON numbers from some endpoints and as numeric strings
// from others (payments are created with a stringified amount).
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid amount {s:?}: {e}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub job_date: NaiveDate,
    pub resolution_field: ResolutionField,
    pub venue: String,
    pub duration: JobDuration,
    #[serde(deserialize_with = "deserialize_amount")]
    pub remuneration: f64,
    #[serde(default)]
    pub brief_overview: String,
    #[serde(default)]
    pub intake_details: String,
    pub status: JobStatus,
    #[serde(default)]
    pub user_id: Option<MemberId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub parties: Vec<Party>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_mobile: Option<String>,
    #[serde(default)]
    pub accredited_by: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
    pub status: MemberStatus,
    #[serde(default)]
    pub completed_jobs: u32,
}

impl Member {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email_address.clone()
        } else {
            full.to_owned()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: MemberId,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub member_email: Option<String>,
    pub job_id: JobId,
    #[serde(default)]
    pub job_description: Option<String>,
    pub category: ResolutionField,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectMessage {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// Potential member imported from a lead sheet, not yet registered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub email_sent: bool,
    #[serde(default)]
    pub message: Option<ProspectMessage>,
}

impl Prospect {
    /// Normalised address, or `None` when the sheet carried no usable email
    pub fn normalized_email(&self) -> Option<String> {
        self.email
            .as_deref()
            .map(|e| e.replace(['\r', '\n'], "").trim().to_lowercase())
            .filter(|e| !e.is_empty())
    }
}

/// Admin dashboard counters. Every counter is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub new_members: u64,
    pub total_members: u64,
    pub active_members: u64,
    pub rejected_members: u64,
    pub available_jobs: u64,
    pub booked_jobs: u64,
    pub completed_jobs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub count: u64,
}

/// Member dashboard, the `dashboard` object of `GET /user/dashboard/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDashboard {
    pub available_jobs: Counter,
    pub total_jobs_done: Counter,
    pub past_month_jobs: Counter,
}

/// A finished job in the member's recent activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: JobId,
    #[serde(default)]
    pub brief_overview: String,
    pub job_date: NaiveDate,
    pub resolution_field: ResolutionField,
    #[serde(default)]
    pub venue: String,
    pub duration: JobDuration,
    #[serde(deserialize_with = "deserialize_amount")]
    pub remuneration: f64,
    pub activity_type: JobStatus,
}
