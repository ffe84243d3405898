use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use super::{Context, ListArgs, print_list, report};
use crate::list::ListState;
use crate::models::{Member, MemberAction, MemberId, MemberStatus};
use crate::present::render_summary;
use crate::screens::{self, STATUS};
use crate::stats::MemberCounts;

#[derive(Subcommand, Debug)]
pub enum MembersCommand {
    /// List registered members
    List(MemberListArgs),
    /// Approve a pending member
    Approve(MemberRef),
    /// Reject a pending member
    Reject(MemberRef),
    /// Members ranked by completed jobs
    Leaderboard(ListArgs),
}

#[derive(Args, Debug)]
pub struct MemberListArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Only members in this status
    #[arg(long, ignore_case = true)]
    status: Option<MemberStatus>,
}

#[derive(Args, Debug)]
pub struct MemberRef {
    /// Member ID
    #[arg(short, long)]
    member: MemberId,
}

pub async fn run(command: MembersCommand, ctx: &Context) -> Result<()> {
    match command {
        MembersCommand::List(args) => {
            let mut members = load(screens::members(ctx.page_size()), ctx).await?;
            print_counts(&members);
            members.set_filter(STATUS, args.status.map(|s| s.as_str()));
            args.list.apply(&mut members);
            print_list(&members, true);
            Ok(())
        }
        MembersCommand::Approve(args) => review(args.member, MemberAction::Approve, ctx).await,
        MembersCommand::Reject(args) => review(args.member, MemberAction::Reject, ctx).await,
        MembersCommand::Leaderboard(args) => {
            let mut members = load(screens::leaderboard(ctx.page_size()), ctx).await?;
            members.set_filter(STATUS, Some(MemberStatus::Active.as_str()));
            args.apply(&mut members);
            print_list(&members, false);
            Ok(())
        }
    }
}

async fn load(mut members: ListState<Member>, ctx: &Context) -> Result<ListState<Member>> {
    ctx.fetcher()
        .members(&mut members, &ctx.cancel)
        .await
        .context("Failed to fetch members")?;
    Ok(members)
}

fn print_counts(members: &ListState<Member>) {
    let counts = MemberCounts::from_members(members.items());
    println!(
        "{}",
        render_summary(&[
            ("Total", counts.total.to_string()),
            ("Pending", counts.inactive.to_string()),
            ("Active", counts.active.to_string()),
            ("Rejected", counts.rejected.to_string()),
        ])
    );
}

async fn review(member: MemberId, action: MemberAction, ctx: &Context) -> Result<()> {
    let mut members = load(screens::members(ctx.page_size()), ctx).await?;
    let outcome = ctx
        .dispatcher()
        .review_member(&mut members, member, action, &ctx.cancel)
        .await?;
    report(outcome);
    print_list(&members, true);
    Ok(())
}
