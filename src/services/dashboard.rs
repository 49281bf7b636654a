//! Fetch lifecycle behind the dashboard page.
//!
//! A [`Dashboard`] owns the resolved token and the state of the latest fetch.
//! Every fetch is tagged with a [`FetchTicket`]; when the token changes before
//! a fetch completes, the older ticket is retired and its result is dropped,
//! so a slow stale response can never overwrite a newer one.
//!
//! The `/dashboard` handler builds one `Dashboard` per request and awaits
//! [`Dashboard::load`], so it never interleaves fetches and always renders a
//! settled state. Tickets only come into play for callers that keep a
//! `Dashboard` across token changes and drive [`Dashboard::set_token`] and
//! [`Dashboard::finish`] themselves. [`DashboardView::Loading`] is what such a
//! caller sees between the two.

use async_trait::async_trait;
use tracing::{debug, error};

use crate::models::country_metric::CountryMetricRow;
use crate::models::dashboard::{DashboardData, DashboardView, FETCH_FAILED_MESSAGE};
use crate::utils::error::ApiError;

/// Anything that can turn an access token into country rows.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn country_report(&self, access_token: &str) -> Result<Vec<CountryMetricRow>, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
enum FetchState {
    Idle,
    Loading(FetchTicket),
    Failed,
    Loaded(Vec<CountryMetricRow>),
}

#[derive(Debug)]
pub struct Dashboard {
    token: Option<String>,
    state: FetchState,
    issued: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self { token: None, state: FetchState::Idle, issued: 0 }
    }

    /// Starts a fetch for `token`. Returns `None` when the token is unchanged
    /// and a fetch for it is already in flight or done.
    pub fn set_token(&mut self, token: &str) -> Option<FetchTicket> {
        if self.token.as_deref() == Some(token) && self.state != FetchState::Idle {
            return None;
        }
        self.token = Some(token.to_string());
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        self.state = FetchState::Loading(ticket);
        Some(ticket)
    }

    /// Applies a fetch result. Returns `false` if `ticket` is no longer current.
    pub fn finish(&mut self, ticket: FetchTicket, result: Result<Vec<CountryMetricRow>, ApiError>) -> bool {
        if self.state != FetchState::Loading(ticket) {
            debug!(ticket = ticket.0, "discarding stale dashboard fetch");
            return false;
        }
        self.state = match result {
            Ok(rows) => FetchState::Loaded(rows),
            Err(e) => {
                error!(error = %e, "error fetching analytics data");
                FetchState::Failed
            }
        };
        true
    }

    /// Sets the token and runs the fetch to completion against `source`.
    pub async fn load(&mut self, token: &str, source: &dyn ReportSource) {
        if let Some(ticket) = self.set_token(token) {
            let result = source.country_report(token).await;
            self.finish(ticket, result);
        }
    }

    pub fn view(&self) -> DashboardView {
        if self.token.is_none() {
            return DashboardView::Unauthenticated;
        }
        match &self.state {
            FetchState::Idle | FetchState::Loading(_) => DashboardView::Loading,
            FetchState::Failed => DashboardView::Failed { message: FETCH_FAILED_MESSAGE.to_string() },
            FetchState::Loaded(rows) if rows.is_empty() => DashboardView::NoData,
            FetchState::Loaded(rows) => DashboardView::Ready(DashboardData::from_rows(rows)),
        }
    }
}
