use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use super::{Context, report};
use crate::api::requests::ProfileUpdate;
use crate::present::render_summary;

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the signed-in member's profile
    Show,
    /// Update profile details; only the given fields change
    Update(UpdateProfileArgs),
}

#[derive(Args, Debug, Default)]
pub struct UpdateProfileArgs {
    /// New password
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    expertise: Option<String>,
    #[arg(long)]
    bank_name: Option<String>,
    #[arg(long)]
    bank_branch: Option<String>,
    #[arg(long)]
    bank_account_number: Option<String>,
    #[arg(long)]
    bank_account_name: Option<String>,
    /// Anything else the admins should know
    #[arg(long)]
    additional: Option<String>,
}

pub async fn run(command: ProfileCommand, ctx: &Context) -> Result<()> {
    let user = ctx.session.require_user()?;
    match command {
        ProfileCommand::Show => {
            let member = ctx
                .fetcher()
                .member(user, &ctx.cancel)
                .await
                .context("Failed to fetch user profile")?;
            let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_owned());
            println!(
                "{}",
                render_summary(&[
                    ("ID", member.id.to_string()),
                    ("Name", member.display_name()),
                    ("Email", member.email_address.clone()),
                    ("Company", or_dash(&member.company_name)),
                    ("Address", or_dash(&member.address)),
                    ("Phone", or_dash(&member.phone_mobile)),
                    ("Accredited by", or_dash(&member.accredited_by)),
                    ("License", or_dash(&member.license_number)),
                    ("Expertise", or_dash(&member.expertise)),
                    ("Status", member.status.to_string()),
                ])
            );
            Ok(())
        }
        ProfileCommand::Update(args) => {
            let update = ProfileUpdate {
                user_id: user,
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
                email_address: args.email,
                company_name: args.company,
                address: args.address,
                phone_mobile: args.phone,
                expertise: args.expertise,
                bank_name: args.bank_name,
                bank_branch: args.bank_branch,
                bank_account_number: args.bank_account_number,
                bank_account_name: args.bank_account_name,
                additional_information: args.additional,
            };
            let outcome = ctx
                .dispatcher()
                .update_profile(update, &ctx.cancel)
                .await?;
            report(outcome);
            Ok(())
        }
    }
}
