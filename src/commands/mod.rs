use anyhow::{Context as _, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::ApiClient;
use crate::config::ConsoleConfig;
use crate::dispatch::{AssumeYes, Confirm, Dispatcher, Outcome, TerminalConfirm};
use crate::fetcher::Fetcher;
use crate::list::ListState;
use crate::notify::TracingNotifier;
use crate::present::{self, Presentable};
use crate::screens::SEARCH;
use crate::session::Session;

pub mod dashboard;
pub mod jobs;
pub mod members;
pub mod payments;
pub mod profile;
pub mod prospects;
pub mod session;

/// Everything a command needs, built once in `main`
pub struct Context {
    pub config: ConsoleConfig,
    pub api: ApiClient,
    pub notifier: TracingNotifier,
    pub session: Session,
    pub cancel: CancellationToken,
    confirm: Box<dyn Confirm>,
}

impl Context {
    pub fn new(
        config: ConsoleConfig,
        session: Session,
        assume_yes: bool,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let api = ApiClient::new(&config.base_url, config.token.clone(), config.timeout)
            .context("Failed to build API client")?;
        let confirm: Box<dyn Confirm> = if assume_yes {
            Box::new(AssumeYes)
        } else {
            Box::new(TerminalConfirm)
        };

        Ok(Self {
            config,
            api,
            notifier: TracingNotifier,
            session,
            cancel,
            confirm,
        })
    }

    pub fn fetcher(&self) -> Fetcher<'_, TracingNotifier> {
        Fetcher::new(&self.api, &self.notifier)
    }

    pub fn dispatcher(&self) -> Dispatcher<'_, TracingNotifier, dyn Confirm> {
        Dispatcher::new(&self.api, &self.notifier, self.confirm.as_ref())
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }
}

/// Search and page selection shared by every list command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

impl ListArgs {
    /// Applies search then page, so the page clamps against the filtered list
    pub fn apply<T>(&self, list: &mut ListState<T>) {
        list.set_filter(SEARCH, self.search.as_deref());
        list.set_page(self.page);
    }
}

pub fn print_list<T: Presentable>(list: &ListState<T>, with_actions: bool) {
    println!("{}", present::render(list.view(), with_actions));
}

pub fn report(outcome: Outcome) {
    if outcome == Outcome::Declined {
        info!("Cancelled, nothing was sent");
    }
}
