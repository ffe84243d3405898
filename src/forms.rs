//! Client-side form checks. Every form validates into the request body it
//! produces, so nothing unvalidated reaches the backend.

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::requests::{NewJob, NewPayment, ProfileUpdate};
use crate::models::{
    Job, JobDuration, JobId, JobStatus, Member, MemberId, Party, ResolutionField,
};

pub const REQUIRED_FIELDS: &str = "Please fill in all required fields";
pub const PARTY_FIELDS: &str = "Please fill all party fields";
pub const PASSWORD_TOO_LONG: &str = "Password is too long. Please use a shorter password.";
pub const PASSWORD_CHARSET: &str =
    "Password contains invalid characters. Please use only letters, numbers, and common symbols.";

const PASSWORD_MAX_LEN: usize = 255;
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Rejected input. `fields` names the offending inputs, if any.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub fields: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    fn missing(fields: Vec<&'static str>) -> Self {
        Self {
            message: REQUIRED_FIELDS.to_owned(),
            fields,
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Admin "post job" form
#[derive(Debug, Clone, PartialEq)]
pub struct JobForm {
    pub job_date: Option<NaiveDate>,
    pub resolution_field: Option<ResolutionField>,
    pub venue: String,
    pub remuneration: Option<f64>,
    pub duration: Option<JobDuration>,
    pub status: Option<JobStatus>,
    pub brief_overview: String,
    pub intake_details: String,
    parties: Vec<Party>,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            job_date: None,
            resolution_field: None,
            venue: String::new(),
            remuneration: None,
            duration: None,
            status: Some(JobStatus::Available),
            brief_overview: String::new(),
            intake_details: String::new(),
            parties: Vec::new(),
        }
    }
}

impl JobForm {
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// All three party fields are required
    pub fn add_party(&mut self, name: &str, email: &str, phone: &str) -> Result<(), ValidationError> {
        if blank(name) || blank(email) || blank(phone) {
            return Err(ValidationError::new(PARTY_FIELDS));
        }
        self.parties.push(Party {
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            phone: phone.trim().to_owned(),
        });
        Ok(())
    }

    pub fn remove_party(&mut self, index: usize) -> Option<Party> {
        (index < self.parties.len()).then(|| self.parties.remove(index))
    }

    pub fn validate(&self) -> Result<NewJob, ValidationError> {
        let mut missing = Vec::new();
        if self.job_date.is_none() {
            missing.push("job_date");
        }
        if self.resolution_field.is_none() {
            missing.push("resolution_field");
        }
        if blank(&self.venue) {
            missing.push("venue");
        }
        if !self.remuneration.is_some_and(|r| r.is_finite() && r > 0.0) {
            missing.push("remuneration");
        }
        if self.duration.is_none() {
            missing.push("duration");
        }
        if self.status.is_none() {
            missing.push("status");
        }
        if blank(&self.brief_overview) {
            missing.push("brief_overview");
        }
        if blank(&self.intake_details) {
            missing.push("intake_details");
        }

        match (
            self.job_date,
            self.resolution_field,
            self.remuneration,
            self.duration,
            self.status,
        ) {
            (Some(job_date), Some(resolution_field), Some(remuneration), Some(duration), Some(status))
                if missing.is_empty() =>
            {
                Ok(NewJob {
                    job_date,
                    resolution_field,
                    venue: self.venue.trim().to_owned(),
                    remuneration,
                    duration,
                    status,
                    brief_overview: self.brief_overview.trim().to_owned(),
                    intake_details: self.intake_details.trim().to_owned(),
                    parties: self.parties.clone(),
                })
            }
            _ => Err(ValidationError::missing(missing)),
        }
    }
}

/// Admin "create payment" form. The category follows the selected job and
/// has no setter of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    member: Option<(MemberId, String)>,
    job: Option<(JobId, String)>,
    category: Option<ResolutionField>,
    pub amount: Option<f64>,
    pub notes: String,
    pub transaction_date: NaiveDate,
}

impl PaymentForm {
    pub fn new(transaction_date: NaiveDate) -> Self {
        Self {
            member: None,
            job: None,
            category: None,
            amount: None,
            notes: String::new(),
            transaction_date,
        }
    }

    pub fn select_member(&mut self, member: &Member) {
        self.member = Some((member.id, member.display_name()));
    }

    pub fn select_job(&mut self, job: &Job) {
        self.job = Some((job.id, job.brief_overview.clone()));
        self.category = Some(job.resolution_field);
    }

    pub fn category(&self) -> Option<ResolutionField> {
        self.category
    }

    pub fn validate(&self) -> Result<NewPayment, ValidationError> {
        let amount = self.amount.filter(|a| a.is_finite() && *a > 0.0);
        match (&self.member, &self.job, amount, self.category) {
            (Some((user_id, member_name)), Some((job_id, description)), Some(amount), Some(category)) => {
                let job_description = if blank(description) {
                    "N/A".to_owned()
                } else {
                    description.clone()
                };
                Ok(NewPayment {
                    member_name: member_name.clone(),
                    user_id: *user_id,
                    job_id: *job_id,
                    amount: amount.to_string(),
                    category,
                    job_description,
                    notes: self.notes.trim().to_owned(),
                    transaction_date: self.transaction_date,
                })
            }
            _ => {
                let mut missing = Vec::new();
                if self.member.is_none() {
                    missing.push("member");
                }
                if self.job.is_none() {
                    missing.push("job");
                }
                if amount.is_none() {
                    missing.push("amount");
                }
                if self.category.is_none() {
                    missing.push("category");
                }
                Err(ValidationError::missing(missing))
            }
        }
    }
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() > PASSWORD_MAX_LEN {
        return Err(ValidationError {
            message: PASSWORD_TOO_LONG.to_owned(),
            fields: vec!["password"],
        });
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c);
    if !password.chars().all(allowed) {
        return Err(ValidationError {
            message: PASSWORD_CHARSET.to_owned(),
            fields: vec!["password"],
        });
    }
    Ok(())
}

/// Trims every field, drops blank ones and checks the password rules
pub fn validate_profile(update: ProfileUpdate) -> Result<ProfileUpdate, ValidationError> {
    let update = ProfileUpdate {
        user_id: update.user_id,
        password: non_blank(update.password),
        first_name: non_blank(update.first_name),
        last_name: non_blank(update.last_name),
        email_address: non_blank(update.email_address),
        company_name: non_blank(update.company_name),
        address: non_blank(update.address),
        phone_mobile: non_blank(update.phone_mobile),
        expertise: non_blank(update.expertise),
        bank_name: non_blank(update.bank_name),
        bank_branch: non_blank(update.bank_branch),
        bank_account_number: non_blank(update.bank_account_number),
        bank_account_name: non_blank(update.bank_account_name),
        additional_information: non_blank(update.additional_information),
    };
    if let Some(password) = &update.password {
        check_password(password)?;
    }
    Ok(update)
}
