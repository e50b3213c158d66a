//! Blocking client for the portal's read-only stats endpoints.

use {
    log::{debug, warn},
    std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        thread,
        time::Duration,
    },
};

use {
    tokenport_core::{Address, AprInputs, HistoryState, Loadable, RetryPolicy},
    crate::{
        error::StatsError,
        response::{HistoryPage, StakingStats, WalletApr},
    },
};

/// Shared cancellation flag, set when the owning view is torn down.
///
/// An in-flight request is allowed to finish; the flag is only checked
/// before dispatch and between retry attempts. A cancelled fetch reports
/// [`StatsError::Cancelled`] so the caller can discard the result.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Blocking client for the portal stats API.
#[derive(Debug)]
pub struct StatsClient {
    base_url: String,
    http: reqwest::blocking::Client,
    retry: RetryPolicy,
    cancel: CancelFlag,
}

impl StatsClient {
    /// `base_url` without a trailing slash, e.g. `https://api.tokenport.io`.
    pub fn new(base_url: impl Into<String>, retry: RetryPolicy) -> Result<Self, StatsError> {
        let base_url: String = base_url.into();
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            retry,
            cancel: CancelFlag::new(),
        })
    }

    /// Handle for cancelling this client's pending fetches from the view
    /// teardown path.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Network-wide staking statistics.
    pub fn get_staking_stats(&self) -> Result<StakingStats, StatsError> {
        self.get_json("/staking/stats")
    }

    /// Wallet-specific APR terms.
    pub fn get_wallet_apr(&self, wallet: &Address) -> Result<WalletApr, StatsError> {
        self.get_json(&format!("/staking/apr/{wallet}"))
    }

    /// First page of server-confirmed transaction history for a wallet.
    pub fn get_history(&self, wallet: &Address) -> Result<HistoryPage, StatsError> {
        self.get_json(&format!("/history/{wallet}"))
    }

    /// Reconcile the local optimistic store against the indexer, driven
    /// by the history poll timer. A failed poll leaves the store
    /// untouched — the optimistic entries stand until a successful
    /// refresh confirms or replaces them. Returns whether the poll
    /// succeeded.
    pub fn refresh_history(&self, wallet: &Address, state: &mut HistoryState) -> bool {
        match self.get_history(wallet) {
            Ok(page) => {
                state.apply_server_page(&page.entries);
                true
            }
            Err(err) => {
                warn!("history poll failed for {wallet}: {err}");
                false
            }
        }
    }

    /// Wallet APR for a background refresh: errors degrade to
    /// `Unavailable` (logged, never surfaced), per the read-failure
    /// policy. Callers hold `Loading` until this returns.
    pub fn fetch_wallet_apr(&self, wallet: &Address) -> Loadable<AprInputs> {
        match self.get_wallet_apr(wallet) {
            Ok(payload) => Loadable::Ready(payload.to_apr_inputs()),
            Err(err) => {
                warn!("wallet APR fetch failed for {wallet}: {err}");
                Loadable::Unavailable
            }
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, StatsError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 1u32;
        loop {
            if self.cancel.is_cancelled() {
                return Err(StatsError::Cancelled);
            }
            match self.request(&url) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff_delay(attempt);
                    warn!(
                        "GET {url} failed (attempt {attempt}/{}): {err}; retrying in {delay:?}",
                        self.retry.max_attempts
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn request<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, StatsError> {
        debug!("GET {url}");
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json()?)
    }
}
