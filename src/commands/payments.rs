use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use super::{Context, ListArgs, print_list, report};
use crate::api::{JobScope, PaymentScope};
use crate::forms::PaymentForm;
use crate::list::ListState;
use crate::models::{JobId, MemberId, Payment, ResolutionField};
use crate::notify::Notifier;
use crate::present::{money, render_summary};
use crate::screens::{self, FIELD};
use crate::stats::PaymentSummary;

#[derive(Subcommand, Debug)]
pub enum PaymentsCommand {
    /// List every payment
    List(PaymentListArgs),
    /// Payments made to the signed-in member
    Mine(ListArgs),
    /// Record a payment for a completed job
    Create(CreatePaymentArgs),
}

#[derive(Args, Debug)]
pub struct PaymentListArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Only payments of this category
    #[arg(long, ignore_case = true)]
    category: Option<ResolutionField>,
}

#[derive(Args, Debug)]
pub struct CreatePaymentArgs {
    /// Member being paid
    #[arg(short, long)]
    member: Option<MemberId>,

    /// Job the payment is for; its resolution field becomes the category
    #[arg(short, long)]
    job: Option<JobId>,

    /// Amount in dollars
    #[arg(short, long)]
    amount: Option<f64>,

    #[arg(long, default_value = "")]
    notes: String,

    /// Transaction date (YYYY-MM-DD), today by default
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn run(command: PaymentsCommand, ctx: &Context) -> Result<()> {
    match command {
        PaymentsCommand::List(args) => {
            let mut payments = load(PaymentScope::All, ctx).await?;
            payments.set_filter(FIELD, args.category.map(|c| c.as_str()));
            args.list.apply(&mut payments);
            show(&payments);
            Ok(())
        }
        PaymentsCommand::Mine(args) => {
            let user = ctx.session.require_user()?;
            let mut payments = load(PaymentScope::Member(user), ctx).await?;
            args.apply(&mut payments);
            show(&payments);
            Ok(())
        }
        PaymentsCommand::Create(args) => create(args, ctx).await,
    }
}

async fn load(scope: PaymentScope, ctx: &Context) -> Result<ListState<Payment>> {
    let mut payments = screens::payments(ctx.page_size());
    ctx.fetcher()
        .payments(scope, &mut payments, &ctx.cancel)
        .await
        .context("Failed to fetch payments")?;
    Ok(payments)
}

fn show(payments: &ListState<Payment>) {
    let summary = PaymentSummary::from_payments(payments.items(), today());
    println!(
        "{}",
        render_summary(&[
            ("Total payments", summary.total_count.to_string()),
            ("Total amount", money(summary.total_amount)),
            ("This month", summary.month_count.to_string()),
            ("This month amount", money(summary.month_amount)),
        ])
    );
    print_list(payments, false);
}

async fn create(args: CreatePaymentArgs, ctx: &Context) -> Result<()> {
    let mut form = PaymentForm::new(args.date.unwrap_or_else(today));
    form.amount = args.amount;
    form.notes = args.notes;

    // resolve the selections against the live lists, as the form's pickers do
    if let Some(member_id) = args.member {
        let mut members = screens::members(ctx.page_size());
        ctx.fetcher()
            .members(&mut members, &ctx.cancel)
            .await
            .context("Failed to fetch members")?;
        match members.items().iter().find(|m| m.id == member_id) {
            Some(member) => form.select_member(member),
            None => ctx.notifier.warning(format!("Member {member_id} not found")),
        }
    }
    if let Some(job_id) = args.job {
        let mut jobs = screens::jobs(ctx.page_size());
        ctx.fetcher()
            .jobs(JobScope::Admin, &mut jobs, &ctx.cancel)
            .await
            .context("Failed to fetch jobs")?;
        match jobs.items().iter().find(|j| j.id == job_id) {
            Some(job) => form.select_job(job),
            None => ctx.notifier.warning(format!("Job {job_id} not found")),
        }
    }

    let mut payments = screens::payments(ctx.page_size());
    let outcome = ctx
        .dispatcher()
        .create_payment(&mut payments, PaymentScope::All, &form, &ctx.cancel)
        .await?;
    report(outcome);
    show(&payments);
    Ok(())
}
