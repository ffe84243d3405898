use std::path::Path;

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use super::client::ApiClient;
use super::error::ApiError;
use super::requests::{
    JobActionRequest, MemberReview, NewJob, NewPayment, ProfileUpdate, ProspectEdit,
    SendEmailRequest, StatusUpdate,
};
use super::responses::{
    Ack, JobsEnvelope, MemberDashboardEnvelope, PagedJobs, PaymentsEnvelope, ProspectsEnvelope,
    RecentActivityEnvelope, SendEmailReport, UserEnvelope, UsersEnvelope,
};
use crate::models::{
    Activity, DashboardStats, Job, JobId, JobStatus, Member, MemberAction, MemberDashboard,
    MemberId, Payment, Prospect,
};

/// Multipart field both spreadsheet importers read
pub const EXCEL_FIELD: &str = "excel_file";

/// Which slice of the job collection a screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobScope {
    /// `GET /jobs`, the member-facing schedule
    Schedule,
    /// `GET /admin/jobs/all`
    Admin,
    /// `GET /jobs/completed/user/{id}`
    CompletedBy(MemberId),
    /// `GET /jobs/status/{status}?userId=`
    Status { status: JobStatus, user: MemberId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentScope {
    All,
    Member(MemberId),
}

impl ApiClient {
    pub async fn list_jobs(
        &self,
        scope: JobScope,
        cancel: &CancellationToken,
    ) -> Result<Vec<Job>, ApiError> {
        let (url, query) = match scope {
            JobScope::Schedule => (self.endpoint(["jobs"])?, vec![]),
            JobScope::Admin => (self.endpoint(["admin", "jobs", "all"])?, vec![]),
            JobScope::CompletedBy(user) => (
                self.endpoint(["jobs", "completed", "user", user.to_string().as_str()])?,
                vec![],
            ),
            JobScope::Status { status, user } => (
                self.endpoint(["jobs", "status", status.as_str()])?,
                vec![("userId", user.to_string())],
            ),
        };
        let envelope: JobsEnvelope = self.get(url, &query, cancel).await?;
        Ok(envelope.jobs)
    }

    /// Server-paginated variant of the schedule
    pub async fn list_jobs_page(
        &self,
        page: usize,
        per_page: usize,
        cancel: &CancellationToken,
    ) -> Result<PagedJobs, ApiError> {
        let url = self.endpoint(["jobs"])?;
        let query = [("page", page.to_string()), ("limit", per_page.to_string())];
        let mut paged: PagedJobs = self.get(url, &query, cancel).await?;
        // some backends omit the page echo
        paged.page.page = page;
        Ok(paged)
    }

    pub async fn create_job(&self, job: &NewJob, cancel: &CancellationToken) -> Result<Ack, ApiError> {
        let url = self.endpoint(["jobs"])?;
        self.send_json(Method::POST, url, job, cancel).await
    }

    pub async fn book_job(
        &self,
        job: JobId,
        user: MemberId,
        cancel: &CancellationToken,
    ) -> Result<Ack, ApiError> {
        let url = self.endpoint(["jobs", job.to_string().as_str(), "status"])?;
        let body = StatusUpdate {
            user_id: user,
            status: JobStatus::Booked,
        };
        self.send_json(Method::PUT, url, &body, cancel).await
    }

    /// Complete or abort a booked job
    pub async fn finish_job(
        &self,
        job: JobId,
        user: MemberId,
        outcome: JobStatus,
        cancel: &CancellationToken,
    ) -> Result<Ack, ApiError> {
        let url = self.endpoint(["jobs", "action"])?;
        let body = JobActionRequest {
            job_id: job,
            user_id: user,
            action: outcome,
        };
        self.send_json(Method::POST, url, &body, cancel).await
    }

    pub async fn import_jobs(&self, file: &Path, cancel: &CancellationToken) -> Result<Ack, ApiError> {
        let url = self.endpoint(["jobs", "import-excel"])?;
        self.upload(url, EXCEL_FIELD, file, cancel).await
    }

    pub async fn list_members(&self, cancel: &CancellationToken) -> Result<Vec<Member>, ApiError> {
        let url = self.endpoint(["users"])?;
        let envelope: UsersEnvelope = self.get(url, &[], cancel).await?;
        Ok(envelope.users)
    }

    pub async fn review_member(
        &self,
        user: MemberId,
        action: MemberAction,
        cancel: &CancellationToken,
    ) -> Result<Ack, ApiError> {
        let url = self.endpoint(["admin", "approve-user"])?;
        self.send_json(Method::PUT, url, &MemberReview::new(user, action), cancel)
            .await
    }

    pub async fn get_member(&self, user: MemberId, cancel: &CancellationToken) -> Result<Member, ApiError> {
        let url = self.endpoint(["user", user.to_string().as_str()])?;
        let envelope: UserEnvelope = self.get(url, &[], cancel).await?;
        Ok(envelope.user)
    }

    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        cancel: &CancellationToken,
    ) -> Result<Ack, ApiError> {
        let url = self.endpoint(["user", "profile", "update"])?;
        self.send_json(Method::PUT, url, update, cancel).await
    }

    pub async fn list_payments(
        &self,
        scope: PaymentScope,
        cancel: &CancellationToken,
    ) -> Result<Vec<Payment>, ApiError> {
        let url = match scope {
            PaymentScope::All => self.endpoint(["payments"])?,
            PaymentScope::Member(user) => self.endpoint(["payments", "user", user.to_string().as_str()])?,
        };
        let envelope: PaymentsEnvelope = self.get(url, &[], cancel).await?;
        Ok(envelope.payments)
    }

    pub async fn create_payment(
        &self,
        payment: &NewPayment,
        cancel: &CancellationToken,
    ) -> Result<Ack, ApiError> {
        let url = self.endpoint(["payments"])?;
        self.send_json(Method::POST, url, payment, cancel).await
    }

    pub async fn dashboard_stats(&self, cancel: &CancellationToken) -> Result<DashboardStats, ApiError> {
        let url = self.endpoint(["stats", "dashboard"])?;
        self.get(url, &[], cancel).await
    }

    pub async fn member_dashboard(
        &self,
        user: MemberId,
        cancel: &CancellationToken,
    ) -> Result<MemberDashboard, ApiError> {
        let url = self.endpoint(["user", "dashboard", user.to_string().as_str()])?;
        let envelope: MemberDashboardEnvelope = self.get(url, &[], cancel).await?;
        Ok(envelope.dashboard)
    }

    /// Jobs the member recently completed or aborted, newest first
    pub async fn recent_activity(
        &self,
        user: MemberId,
        cancel: &CancellationToken,
    ) -> Result<Vec<Activity>, ApiError> {
        let url = self.endpoint(["user", "recent-activity", user.to_string().as_str()])?;
        let envelope: RecentActivityEnvelope = self.get(url, &[], cancel).await?;
        Ok(envelope.recent_activity.activities)
    }

    pub async fn list_prospects(&self, cancel: &CancellationToken) -> Result<Vec<Prospect>, ApiError> {
        let url = self.endpoint(["prospects"])?;
        let envelope: ProspectsEnvelope = self.get(url, &[], cancel).await?;
        Ok(envelope.data)
    }

    pub async fn send_prospect_emails(
        &self,
        prospects: &[Prospect],
        cancel: &CancellationToken,
    ) -> Result<SendEmailReport, ApiError> {
        let url = self.endpoint(["prospects", "send-email"])?;
        let body = SendEmailRequest { data: prospects };
        self.send_json(Method::PUT, url, &body, cancel).await
    }

    pub async fn edit_prospect(
        &self,
        id: &str,
        edit: &ProspectEdit,
        cancel: &CancellationToken,
    ) -> Result<Ack, ApiError> {
        let url = self.endpoint(["prospects", "edit", id])?;
        self.send_json(Method::PUT, url, edit, cancel).await
    }

    pub async fn import_prospects(&self, file: &Path, cancel: &CancellationToken) -> Result<Ack, ApiError> {
        let url = self.endpoint(["prospects", "excel-upload"])?;
        self.upload(url, EXCEL_FIELD, file, cancel).await
    }
}
