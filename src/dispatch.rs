use std::future::Future;
use std::path::Path;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::api::requests::{ProfileUpdate, ProspectEdit};
use crate::api::responses::SendEmailReport;
use crate::api::{ApiClient, ApiError, JobScope, PaymentScope};
use crate::fetcher::Fetcher;
use crate::forms::{JobForm, PaymentForm, ValidationError, validate_profile};
use crate::list::ListState;
use crate::models::{Job, JobAction, JobId, JobStatus, Member, MemberAction, MemberId, Payment, Prospect};
use crate::notify::Notifier;

pub const NO_SELECTION: &str = "Please select at least one member.";

/// Gate in front of state-changing actions
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Accepts every prompt (`--yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines every prompt
#[derive(Debug, Default, Clone, Copy)]
pub struct Decline;

impl Confirm for Decline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Interactive yes/no on the terminal. A failed prompt counts as "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match inquire::Confirm::new(prompt).with_default(false).prompt() {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "Confirmation prompt failed");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The confirmation was declined and nothing was sent
    Declined,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Runs user actions against the backend: validate, confirm, send, then
/// toast and refresh the owning list. Failures leave the list untouched.
pub struct Dispatcher<'a, N, C: ?Sized> {
    api: &'a ApiClient,
    notifier: &'a N,
    confirm: &'a C,
}

impl<'a, N: Notifier, C: Confirm + ?Sized> Dispatcher<'a, N, C> {
    pub fn new(api: &'a ApiClient, notifier: &'a N, confirm: &'a C) -> Self {
        Self {
            api,
            notifier,
            confirm,
        }
    }

    fn fetcher(&self) -> Fetcher<'a, N> {
        Fetcher::new(self.api, self.notifier)
    }

    fn reject(&self, action: &'static str, err: ValidationError) -> DispatchError {
        warn!(action, error = %err, fields = ?err.fields, "Rejected before sending");
        self.notifier.error(err.message.clone());
        err.into()
    }

    async fn send<R, F>(
        &self,
        action: &'static str,
        fallback: Option<&str>,
        request: F,
    ) -> Result<R, DispatchError>
    where
        F: Future<Output = Result<R, ApiError>>,
    {
        match request.await {
            Ok(response) => {
                info!(action, "Action applied");
                Ok(response)
            }
            Err(err) => {
                error!(action, error = %err, "Action failed");
                if !err.is_cancelled() {
                    let message = match (&err, fallback) {
                        (ApiError::Status { message: Some(m), .. }, _) if !m.trim().is_empty() => {
                            m.clone()
                        }
                        (_, Some(fallback)) => fallback.to_owned(),
                        _ => err.user_message(),
                    };
                    self.notifier.error(message);
                }
                Err(err.into())
            }
        }
    }

    async fn refresh<F>(&self, refresh: F)
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        // the fetcher already reported the failure
        if let Err(err) = refresh.await {
            warn!(error = %err, "Refresh after action failed");
        }
    }

    /// Book, complete or abort one of the jobs held in `jobs`
    pub async fn job_action(
        &self,
        jobs: &mut ListState<Job>,
        scope: JobScope,
        job_id: JobId,
        action: JobAction,
        user: MemberId,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        let name = action.as_str();
        let Some(job) = jobs.items().iter().find(|j| j.id == job_id) else {
            return Err(self.reject(name, ValidationError::new(format!("Job {job_id} not found"))));
        };
        let Some(target) = job.status.transition(action) else {
            let err = ValidationError::new(format!(
                "Cannot {name} a job that is {}",
                job.status
            ));
            return Err(self.reject(name, err));
        };

        if !self
            .confirm
            .confirm(&format!("Are you sure you want to {name} this job?"))
        {
            info!(action = name, job_id, "Declined");
            return Ok(Outcome::Declined);
        }

        let request = async {
            match action {
                JobAction::Book => self.api.book_job(job_id, user, cancel).await,
                JobAction::Complete | JobAction::Abort => {
                    self.api.finish_job(job_id, user, target, cancel).await
                }
            }
        };
        self.send(name, None, request).await?;

        let toast = match target {
            JobStatus::Booked => "Booked successfully!".to_owned(),
            other => format!("Job {other}!"),
        };
        self.notifier.success(toast);
        self.refresh(self.fetcher().jobs(scope, jobs, cancel)).await;
        Ok(Outcome::Applied)
    }

    pub async fn review_member(
        &self,
        members: &mut ListState<Member>,
        member_id: MemberId,
        action: MemberAction,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        let name = action.as_str();
        let Some(member) = members.items().iter().find(|m| m.id == member_id) else {
            return Err(self.reject(
                name,
                ValidationError::new(format!("Member {member_id} not found")),
            ));
        };
        if member.status.transition(action).is_none() {
            let err = ValidationError::new(format!(
                "Cannot {name} a member that is {}",
                member.status
            ));
            return Err(self.reject(name, err));
        }

        let prompt = format!(
            "Are you sure you want to {name} {}?",
            member.display_name()
        );
        if !self.confirm.confirm(&prompt) {
            info!(action = name, member_id, "Declined");
            return Ok(Outcome::Declined);
        }

        self.send(
            name,
            None,
            self.api.review_member(member_id, action, cancel),
        )
        .await?;

        self.notifier
            .success(format!("Member {} successfully!", action.past_tense()));
        self.refresh(self.fetcher().members(members, cancel)).await;
        Ok(Outcome::Applied)
    }

    pub async fn create_payment(
        &self,
        payments: &mut ListState<Payment>,
        scope: PaymentScope,
        form: &PaymentForm,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        let payment = form
            .validate()
            .map_err(|e| self.reject("create-payment", e))?;

        self.send(
            "create-payment",
            Some("Failed to create payment. Please try again."),
            self.api.create_payment(&payment, cancel),
        )
        .await?;

        self.notifier.success("Payment created successfully!");
        self.refresh(self.fetcher().payments(scope, payments, cancel))
            .await;
        Ok(Outcome::Applied)
    }

    pub async fn create_job(
        &self,
        jobs: &mut ListState<Job>,
        scope: JobScope,
        form: &JobForm,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        let job = form.validate().map_err(|e| self.reject("create-job", e))?;

        self.send(
            "create-job",
            Some("Failed to create job. Please try again."),
            self.api.create_job(&job, cancel),
        )
        .await?;

        self.notifier.success("Job created successfully!");
        self.refresh(self.fetcher().jobs(scope, jobs, cancel)).await;
        Ok(Outcome::Applied)
    }

    /// Hands a spreadsheet to the backend importer, then reloads the jobs
    pub async fn import_jobs(
        &self,
        jobs: &mut ListState<Job>,
        scope: JobScope,
        file: &Path,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        check_upload(file).map_err(|e| self.reject("import-jobs", e))?;

        self.send(
            "import-jobs",
            Some("Upload failed. Please try again."),
            self.api.import_jobs(file, cancel),
        )
        .await?;

        self.notifier.success("Jobs imported successfully!");
        self.refresh(self.fetcher().jobs(scope, jobs, cancel)).await;
        Ok(Outcome::Applied)
    }

    pub async fn update_profile(
        &self,
        update: ProfileUpdate,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        let update = validate_profile(update).map_err(|e| self.reject("update-profile", e))?;

        self.send(
            "update-profile",
            None,
            self.api.update_profile(&update, cancel),
        )
        .await?;

        self.notifier.success("Profile updated successfully!");
        Ok(Outcome::Applied)
    }

    /// Emails the prospects whose address is in `selected`
    pub async fn send_prospect_emails(
        &self,
        prospects: &mut ListState<Prospect>,
        selected: &[String],
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        let selected: Vec<String> = selected
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        let recipients: Vec<Prospect> = prospects
            .items()
            .iter()
            .filter(|p| {
                p.normalized_email()
                    .is_some_and(|email| selected.contains(&email))
            })
            .cloned()
            .collect();
        if recipients.is_empty() {
            return Err(self.reject("send-email", ValidationError::new(NO_SELECTION)));
        }

        let prompt = format!("Send the invitation email to {} prospect(s)?", recipients.len());
        if !self.confirm.confirm(&prompt) {
            info!(recipients = recipients.len(), "Declined");
            return Ok(Outcome::Declined);
        }

        let report: SendEmailReport = self
            .send(
                "send-email",
                Some("Failed to send emails."),
                self.api.send_prospect_emails(&recipients, cancel),
            )
            .await?;

        if report.results.is_empty() {
            self.notifier.success("Emails sent successfully!");
        } else {
            self.notifier.success(format!(
                "Emails sent: {}, Failed: {}",
                report.sent(),
                report.failed()
            ));
        }
        self.refresh(self.fetcher().prospects(prospects, cancel)).await;
        Ok(Outcome::Applied)
    }

    pub async fn edit_prospect(
        &self,
        prospects: &mut ListState<Prospect>,
        id: &str,
        edit: ProspectEdit,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        let edit = ProspectEdit {
            email: edit.email.map(|e| e.trim().to_lowercase()),
            ..edit
        };
        if edit.email.is_none() && edit.subject.is_none() && edit.body.is_none() {
            return Err(self.reject("edit-prospect", ValidationError::new("Nothing to update")));
        }
        if edit.email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err(self.reject(
                "edit-prospect",
                ValidationError {
                    message: "Please enter a valid email address".to_owned(),
                    fields: vec!["email"],
                },
            ));
        }

        let (success, failure) = if edit.email.is_some() {
            ("Email updated successfully!", "Failed to update email")
        } else {
            ("Message updated successfully!", "Failed to update message")
        };
        self.send(
            "edit-prospect",
            Some(failure),
            self.api.edit_prospect(id, &edit, cancel),
        )
        .await?;

        self.notifier.success(success);
        self.refresh(self.fetcher().prospects(prospects, cancel)).await;
        Ok(Outcome::Applied)
    }

    pub async fn import_prospects(
        &self,
        prospects: &mut ListState<Prospect>,
        file: &Path,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        check_upload(file).map_err(|e| self.reject("import-prospects", e))?;

        self.send(
            "import-prospects",
            Some("Upload failed. Please try again."),
            self.api.import_prospects(file, cancel),
        )
        .await?;

        self.notifier.success("Prospects imported successfully!");
        self.refresh(self.fetcher().prospects(prospects, cancel)).await;
        Ok(Outcome::Applied)
    }
}

fn check_upload(file: &Path) -> Result<(), ValidationError> {
    if !file.is_file() {
        return Err(ValidationError {
            message: format!("{} is not a file", file.display()),
            fields: vec!["file"],
        });
    }
    Ok(())
}
