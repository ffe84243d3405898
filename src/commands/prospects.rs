use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use super::{Context, ListArgs, print_list, report};
use crate::api::requests::ProspectEdit;
use crate::list::ListState;
use crate::models::Prospect;
use crate::screens::{self, FIELD};

#[derive(Subcommand, Debug)]
pub enum ProspectsCommand {
    /// List potential members
    List(ProspectListArgs),
    /// Send the invitation email to selected prospects
    SendEmail(SendEmailArgs),
    /// Change a prospect's email address or message
    Edit(EditArgs),
    /// Import prospects from a spreadsheet
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ProspectListArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Only prospects in this field
    #[arg(long)]
    field: Option<String>,
}

#[derive(Args, Debug)]
pub struct SendEmailArgs {
    /// Recipient address; repeat for more
    #[arg(short, long = "email")]
    emails: Vec<String>,

    /// Select every prospect on the listed page
    #[arg(long)]
    whole_page: bool,

    #[command(flatten)]
    list: ListArgs,

    #[arg(long)]
    field: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Prospect ID
    #[arg(long)]
    id: String,

    #[arg(long)]
    email: Option<String>,

    /// Message subject
    #[arg(long)]
    subject: Option<String>,

    /// Message body
    #[arg(long)]
    body: Option<String>,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Spreadsheet to upload
    #[arg(short, long)]
    file: PathBuf,
}

pub async fn run(command: ProspectsCommand, ctx: &Context) -> Result<()> {
    match command {
        ProspectsCommand::List(args) => {
            let mut prospects = load(ctx).await?;
            prospects.set_filter(FIELD, args.field.as_deref());
            args.list.apply(&mut prospects);
            print_list(&prospects, false);
            Ok(())
        }
        ProspectsCommand::SendEmail(args) => send_email(args, ctx).await,
        ProspectsCommand::Edit(args) => {
            let mut prospects = load(ctx).await?;
            let edit = ProspectEdit {
                email: args.email,
                subject: args.subject,
                body: args.body,
            };
            let outcome = ctx
                .dispatcher()
                .edit_prospect(&mut prospects, &args.id, edit, &ctx.cancel)
                .await?;
            report(outcome);
            print_list(&prospects, false);
            Ok(())
        }
        ProspectsCommand::Import(args) => {
            let mut prospects = screens::prospects(ctx.page_size());
            let outcome = ctx
                .dispatcher()
                .import_prospects(&mut prospects, &args.file, &ctx.cancel)
                .await?;
            report(outcome);
            print_list(&prospects, false);
            Ok(())
        }
    }
}

async fn load(ctx: &Context) -> Result<ListState<Prospect>> {
    let mut prospects = screens::prospects(ctx.page_size());
    ctx.fetcher()
        .prospects(&mut prospects, &ctx.cancel)
        .await
        .context("Failed to fetch prospects")?;
    Ok(prospects)
}

async fn send_email(args: SendEmailArgs, ctx: &Context) -> Result<()> {
    let mut prospects = load(ctx).await?;
    prospects.set_filter(FIELD, args.field.as_deref());
    args.list.apply(&mut prospects);

    let mut selected = args.emails;
    if args.whole_page {
        selected.extend(
            prospects
                .view()
                .rows
                .iter()
                .filter_map(|p| p.normalized_email()),
        );
    }

    let outcome = ctx
        .dispatcher()
        .send_prospect_emails(&mut prospects, &selected, &ctx.cancel)
        .await?;
    report(outcome);
    print_list(&prospects, false);
    Ok(())
}
