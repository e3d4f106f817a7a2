//! Shared application state.

use crate::config::Config;
use chrono::Utc;
use followup_core::{DriveStore, OauthTokenProvider, RateGate};
use tracing::warn;

/// Shared application state.
pub struct AppState {
    pub store: DriveStore<OauthTokenProvider>,
    pub rate_gate: RateGate,
    pub config: Config,
    identity: String,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (client_id, client_secret, refresh_token) = config.oauth_credentials();
        let tokens = OauthTokenProvider::new(client_id, client_secret, refresh_token)
            .with_token_url(config.token_url.clone());

        let store = DriveStore::new(tokens, config.drive());
        let rate_gate = RateGate::new(config.rate_max_writes, config.rate_window_secs);
        let identity = config.identity();

        Self {
            store,
            rate_gate,
            config,
            identity,
        }
    }

    /// Rate-gate check for the current identity at the current instant.
    pub fn admit_write(&self) -> bool {
        let admitted = self.rate_gate.admit(&self.identity, Utc::now());
        if !admitted {
            warn!(target: "followup::rate", "write rejected for {}", self.identity);
        }
        admitted
    }
}
