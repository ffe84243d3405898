use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::session::{Session, SessionStore, parse_user_id};

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Sign in as a member, by id or by the sign-in redirect URL
    Set {
        /// Member id, or a URL carrying `user_id`
        value: String,
    },
    /// Print the signed-in member id
    Show,
    /// Forget the signed-in member
    Clear,
}

/// The only writer of the session file
pub fn run(command: SessionCommand, store: &SessionStore) -> Result<()> {
    match command {
        SessionCommand::Set { value } => {
            let user_id = parse_user_id(&value)?;
            store.save(&Session::new(user_id))?;
            info!(user_id, "Signed in");
        }
        SessionCommand::Show => match store.load()?.user_id() {
            Some(user_id) => println!("{user_id}"),
            None => info!(path = %store.path().display(), "No member signed in"),
        },
        SessionCommand::Clear => {
            store.clear()?;
            info!("Signed out");
        }
    }
    Ok(())
}
