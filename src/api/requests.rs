use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{
    JobDuration, JobId, JobStatus, MemberAction, MemberId, Party, Prospect, ResolutionField,
};

/// `PUT /jobs/{id}/status`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub user_id: MemberId,
    pub status: JobStatus,
}

/// `POST /jobs/action`. The action travels as the target status name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobActionRequest {
    pub job_id: JobId,
    pub user_id: MemberId,
    pub action: JobStatus,
}

/// `PUT /admin/approve-user`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberReview {
    pub user_id: MemberId,
    pub action: &'static str,
    pub admin_notes: String,
}

impl MemberReview {
    pub fn new(user_id: MemberId, action: MemberAction) -> Self {
        Self {
            user_id,
            action: action.as_str(),
            admin_notes: format!("All documents verified and {}", action.past_tense()),
        }
    }
}

/// `POST /jobs`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub job_date: NaiveDate,
    pub resolution_field: ResolutionField,
    pub venue: String,
    pub remuneration: f64,
    pub duration: JobDuration,
    pub status: JobStatus,
    pub brief_overview: String,
    pub intake_details: String,
    pub parties: Vec<Party>,
}

/// `POST /payments`. The backend expects the amount as a string and the
/// date as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub member_name: String,
    pub user_id: MemberId,
    pub job_id: JobId,
    pub amount: String,
    pub category: ResolutionField,
    pub job_description: String,
    pub notes: String,
    pub transaction_date: NaiveDate,
}

/// `PUT /user/profile/update`. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub user_id: MemberId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_name: Option<String>,
    // the backend column carries this spelling
    #[serde(rename = "addionalInfornation", skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
}

/// `PUT /prospects/send-email`
#[derive(Debug, Serialize)]
pub struct SendEmailRequest<'a> {
    pub data: &'a [Prospect],
}

/// `PUT /prospects/edit/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProspectEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_review_body() {
        let body = serde_json::to_value(MemberReview::new(4, MemberAction::Reject)).unwrap();
        assert_eq!(
            body,
            json!({
                "userId": 4,
                "action": "reject",
                "adminNotes": "All documents verified and rejected"
            })
        );
    }

    #[test]
    fn test_job_action_sends_target_status() {
        let body = serde_json::to_value(JobActionRequest {
            job_id: 9,
            user_id: 2,
            action: JobStatus::Completed,
        })
        .unwrap();
        assert_eq!(body, json!({"jobId": 9, "userId": 2, "action": "Completed"}));
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let body = serde_json::to_value(ProfileUpdate {
            user_id: 3,
            first_name: Some("Ada".into()),
            additional_information: Some("Weekends only".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"userId": 3, "firstName": "Ada", "addionalInfornation": "Weekends only"})
        );
    }
}
