use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError, JobScope, PaymentScope};
use crate::list::ListState;
use crate::models::{
    Activity, DashboardStats, Job, Member, MemberDashboard, MemberId, Payment, Prospect,
};
use crate::notify::Notifier;

/// Loads backend collections into list state. One GET per call, no retry:
/// a failure leaves the list empty until the next explicit fetch. Every
/// failure except cancellation raises an error toast.
pub struct Fetcher<'a, N> {
    api: &'a ApiClient,
    notifier: &'a N,
}

impl<'a, N: Notifier> Fetcher<'a, N> {
    pub fn new(api: &'a ApiClient, notifier: &'a N) -> Self {
        Self { api, notifier }
    }

    async fn load<T, R, F>(
        &self,
        collection: &'static str,
        state: &mut ListState<T>,
        request: F,
        apply: impl FnOnce(&mut ListState<T>, R),
    ) -> Result<(), ApiError>
    where
        F: Future<Output = Result<R, ApiError>>,
    {
        state.begin_fetch();
        match request.await {
            Ok(response) => {
                apply(state, response);
                info!(collection, count = state.items().len(), "Fetched collection");
                Ok(())
            }
            Err(err) if err.is_cancelled() => {
                warn!(collection, "Fetch cancelled");
                state.cancel();
                Err(err)
            }
            Err(err) => {
                state.fail();
                Err(self.report(collection, err))
            }
        }
    }

    /// Single-object fetch, reported the same way as a collection
    async fn one<R, F>(&self, what: &'static str, request: F) -> Result<R, ApiError>
    where
        F: Future<Output = Result<R, ApiError>>,
    {
        match request.await {
            Ok(response) => {
                info!(what, "Fetched");
                Ok(response)
            }
            Err(err) if err.is_cancelled() => {
                warn!(what, "Fetch cancelled");
                Err(err)
            }
            Err(err) => Err(self.report(what, err)),
        }
    }

    fn report(&self, what: &'static str, err: ApiError) -> ApiError {
        error!(what, error = %err, "Fetch failed");
        self.notifier
            .error(format!("Failed to fetch {what}: {}", err.user_message()));
        err
    }

    pub async fn jobs(
        &self,
        scope: JobScope,
        state: &mut ListState<Job>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.load("jobs", state, self.api.list_jobs(scope, cancel), ListState::replace)
            .await
    }

    /// Fetches the state's current page from the server-paginated schedule
    pub async fn jobs_page(
        &self,
        state: &mut ListState<Job>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        let request = self
            .api
            .list_jobs_page(state.current_page(), state.page_size(), cancel);
        self.load("jobs", state, request, |state, paged| {
            state.replace_page(paged.jobs, paged.page)
        })
        .await
    }

    pub async fn members(
        &self,
        state: &mut ListState<Member>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.load("members", state, self.api.list_members(cancel), ListState::replace)
            .await
    }

    pub async fn payments(
        &self,
        scope: PaymentScope,
        state: &mut ListState<Payment>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.load(
            "payments",
            state,
            self.api.list_payments(scope, cancel),
            ListState::replace,
        )
        .await
    }

    pub async fn recent_activity(
        &self,
        user: MemberId,
        state: &mut ListState<Activity>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.load(
            "recent activity",
            state,
            self.api.recent_activity(user, cancel),
            ListState::replace,
        )
        .await
    }

    pub async fn member(&self, user: MemberId, cancel: &CancellationToken) -> Result<Member, ApiError> {
        self.one("user profile", self.api.get_member(user, cancel)).await
    }

    pub async fn dashboard_stats(&self, cancel: &CancellationToken) -> Result<DashboardStats, ApiError> {
        self.one("dashboard stats", self.api.dashboard_stats(cancel))
            .await
    }

    pub async fn member_dashboard(
        &self,
        user: MemberId,
        cancel: &CancellationToken,
    ) -> Result<MemberDashboard, ApiError> {
        self.one("member dashboard", self.api.member_dashboard(user, cancel))
            .await
    }

    pub async fn prospects(
        &self,
        state: &mut ListState<Prospect>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.load(
            "prospects",
            state,
            self.api.list_prospects(cancel),
            ListState::replace,
        )
        .await
    }
}
