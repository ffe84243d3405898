use anyhow::{Context as _, Result};
use clap::Args;

use super::Context;
use crate::present::{render, render_summary};
use crate::screens;

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Show the signed-in member's dashboard instead of the admin one
    #[arg(long)]
    member: bool,
}

pub async fn run(args: DashboardArgs, ctx: &Context) -> Result<()> {
    let fetcher = ctx.fetcher();
    if args.member {
        let user = ctx.session.require_user()?;
        let dashboard = fetcher
            .member_dashboard(user, &ctx.cancel)
            .await
            .context("Failed to fetch member dashboard")?;
        println!(
            "{}",
            render_summary(&[
                ("Available jobs", dashboard.available_jobs.count.to_string()),
                ("Jobs done", dashboard.total_jobs_done.count.to_string()),
                ("Past month jobs", dashboard.past_month_jobs.count.to_string()),
            ])
        );

        let mut activity = screens::recent_activity(ctx.page_size());
        fetcher
            .recent_activity(user, &mut activity, &ctx.cancel)
            .await
            .context("Failed to fetch recent activity")?;
        println!("Recent activity");
        if activity.items().is_empty() {
            println!("No recent activities found");
        } else {
            println!("{}", render(activity.view(), false));
        }
        return Ok(());
    }

    let stats = fetcher
        .dashboard_stats(&ctx.cancel)
        .await
        .context("Failed to fetch dashboard stats")?;
    println!(
        "{}",
        render_summary(&[
            ("New members", stats.new_members.to_string()),
            ("Total members", stats.total_members.to_string()),
            ("Active members", stats.active_members.to_string()),
            ("Rejected members", stats.rejected_members.to_string()),
            ("Available jobs", stats.available_jobs.to_string()),
            ("Booked jobs", stats.booked_jobs.to_string()),
            ("Completed jobs", stats.completed_jobs.to_string()),
        ])
    );
    Ok(())
}
