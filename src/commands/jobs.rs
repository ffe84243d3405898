use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tracing::info;

use super::{Context, ListArgs, print_list, report};
use crate::api::JobScope;
use crate::forms::JobForm;
use crate::list::ListState;
use crate::models::{Job, JobAction, JobDuration, JobId, JobStatus, ResolutionField};
use crate::notify::Notifier;
use crate::screens::{self, FIELD, STATUS};

#[derive(Subcommand, Debug)]
pub enum JobsCommand {
    /// List jobs, every job by default or the member schedule
    List(JobListArgs),
    /// Jobs the signed-in member has booked
    Mine(ListArgs),
    /// Jobs the signed-in member has completed
    Completed(ListArgs),
    /// Post a new job
    Create(CreateJobArgs),
    /// Import jobs from a spreadsheet
    Import(ImportArgs),
    /// Book an available job for the signed-in member
    Book(JobRef),
    /// Mark a booked job as completed
    Complete(JobRef),
    /// Abort a booked job
    Abort(JobRef),
}

#[derive(Args, Debug)]
pub struct JobListArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Show the member-facing schedule instead of the admin list
    #[arg(long)]
    schedule: bool,

    /// Only jobs in this status
    #[arg(long, ignore_case = true)]
    status: Option<JobStatus>,

    /// Only jobs of this resolution field
    #[arg(long, ignore_case = true)]
    field: Option<ResolutionField>,

    /// Let the backend paginate the schedule
    #[arg(long, requires = "schedule")]
    server_pages: bool,
}

#[derive(Args, Debug)]
pub struct JobRef {
    /// Job ID
    #[arg(short = 'j', long)]
    job: JobId,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Spreadsheet to upload
    #[arg(short, long)]
    file: PathBuf,
}

#[derive(Args, Debug)]
pub struct CreateJobArgs {
    /// Job date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, ignore_case = true)]
    field: Option<ResolutionField>,

    #[arg(long)]
    venue: Option<String>,

    /// Remuneration in dollars
    #[arg(long)]
    remuneration: Option<f64>,

    #[arg(long)]
    duration: Option<JobDuration>,

    #[arg(long, ignore_case = true, default_value = "Available")]
    status: JobStatus,

    /// Brief overview of the dispute
    #[arg(long)]
    overview: Option<String>,

    /// Intake details
    #[arg(long)]
    intake: Option<String>,

    /// Party as "name,email,phone"; repeat for more parties
    #[arg(long = "party")]
    parties: Vec<String>,
}

impl CreateJobArgs {
    fn into_form(self) -> JobForm {
        let mut form = JobForm::default();
        form.job_date = self.date;
        form.resolution_field = self.field;
        form.venue = self.venue.unwrap_or_default();
        form.remuneration = self.remuneration;
        form.duration = self.duration;
        form.status = Some(self.status);
        form.brief_overview = self.overview.unwrap_or_default();
        form.intake_details = self.intake.unwrap_or_default();
        form
    }
}

pub async fn run(command: JobsCommand, ctx: &Context) -> Result<()> {
    match command {
        JobsCommand::List(args) => list(args, ctx).await,
        JobsCommand::Mine(args) => {
            let user = ctx.session.require_user()?;
            let scope = JobScope::Status {
                status: JobStatus::Booked,
                user,
            };
            show(scope, &args, ctx).await
        }
        JobsCommand::Completed(args) => {
            let user = ctx.session.require_user()?;
            show(JobScope::CompletedBy(user), &args, ctx).await
        }
        JobsCommand::Create(args) => create(args, ctx).await,
        JobsCommand::Import(args) => import(args, ctx).await,
        JobsCommand::Book(job) => act(job.job, JobAction::Book, ctx).await,
        JobsCommand::Complete(job) => act(job.job, JobAction::Complete, ctx).await,
        JobsCommand::Abort(job) => act(job.job, JobAction::Abort, ctx).await,
    }
}

async fn load(scope: JobScope, ctx: &Context) -> Result<ListState<Job>> {
    let mut jobs = screens::jobs(ctx.page_size());
    ctx.fetcher()
        .jobs(scope, &mut jobs, &ctx.cancel)
        .await
        .context("Failed to fetch jobs")?;
    Ok(jobs)
}

async fn show(scope: JobScope, args: &ListArgs, ctx: &Context) -> Result<()> {
    let mut jobs = load(scope, ctx).await?;
    args.apply(&mut jobs);
    print_list(&jobs, true);
    Ok(())
}

async fn list(args: JobListArgs, ctx: &Context) -> Result<()> {
    if args.server_pages {
        let mut jobs = screens::jobs(ctx.page_size());
        jobs.set_filter(STATUS, args.status.map(|s| s.as_str()));
        jobs.set_filter(FIELD, args.field.map(|f| f.as_str()));
        jobs.set_filter(screens::SEARCH, args.list.search.as_deref());
        let fetcher = ctx.fetcher();
        fetcher
            .jobs_page(&mut jobs, &ctx.cancel)
            .await
            .context("Failed to fetch jobs")?;

        // the first response tells us how many pages exist
        if args.list.page > 1 {
            let page = jobs.set_page(args.list.page);
            if page > 1 {
                fetcher
                    .jobs_page(&mut jobs, &ctx.cancel)
                    .await
                    .context("Failed to fetch jobs")?;
            }
        }
        print_list(&jobs, true);
        return Ok(());
    }

    let scope = if args.schedule {
        JobScope::Schedule
    } else {
        JobScope::Admin
    };
    let mut jobs = load(scope, ctx).await?;
    jobs.set_filter(STATUS, args.status.map(|s| s.as_str()));
    jobs.set_filter(FIELD, args.field.map(|f| f.as_str()));
    args.list.apply(&mut jobs);
    print_list(&jobs, true);
    Ok(())
}

async fn act(job: JobId, action: JobAction, ctx: &Context) -> Result<()> {
    let user = ctx.session.require_user()?;
    // booking works off the schedule, finishing off the member's bookings
    let scope = match action {
        JobAction::Book => JobScope::Schedule,
        JobAction::Complete | JobAction::Abort => JobScope::Status {
            status: JobStatus::Booked,
            user,
        },
    };
    let mut jobs = load(scope, ctx).await?;

    info!(job, action = action.as_str(), user, "Dispatching job action");
    let outcome = ctx
        .dispatcher()
        .job_action(&mut jobs, scope, job, action, user, &ctx.cancel)
        .await?;
    report(outcome);
    print_list(&jobs, true);
    Ok(())
}

async fn create(args: CreateJobArgs, ctx: &Context) -> Result<()> {
    let parties = args.parties.clone();
    let mut form = args.into_form();
    for party in &parties {
        let mut parts = party.splitn(3, ',');
        let (name, email, phone) = (
            parts.next().unwrap_or_default(),
            parts.next().unwrap_or_default(),
            parts.next().unwrap_or_default(),
        );
        if let Err(err) = form.add_party(name, email, phone) {
            ctx.notifier.error(err.message.clone());
            return Err(err).with_context(|| format!("invalid party {party:?}"));
        }
    }

    let mut jobs = screens::jobs(ctx.page_size());
    let outcome = ctx
        .dispatcher()
        .create_job(&mut jobs, JobScope::Admin, &form, &ctx.cancel)
        .await?;
    report(outcome);
    print_list(&jobs, true);
    Ok(())
}

async fn import(args: ImportArgs, ctx: &Context) -> Result<()> {
    let mut jobs = screens::jobs(ctx.page_size());
    let outcome = ctx
        .dispatcher()
        .import_jobs(&mut jobs, JobScope::Admin, &args.file, &ctx.cancel)
        .await?;
    report(outcome);
    print_list(&jobs, true);
    Ok(())
}
