pub mod action;
pub mod analytics;
pub mod auth;
pub mod config;
pub mod export;
pub mod goal;
pub mod habit;
pub mod health;
pub mod report;

use chrono::{DateTime, Utc};
use clap::Args;
use growth_garden_core::storage::SessionStore;
use growth_garden_core::time::parse_timestamp;
use growth_garden_core::{ApiClient, Clock, Config, FixedClock, ResourceCache, Session, Snapshot, SystemClock};
use std::future::Future;
use std::path::PathBuf;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Where garden data comes from and which instant counts as "now".
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Read goals/actions/habits from a JSON file instead of the API
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Evaluate as of this timestamp (RFC 3339 or YYYY-MM-DD) instead of now
    #[arg(long)]
    pub now: Option<String>,
}

impl SnapshotArgs {
    pub fn clock(&self) -> CliResult<Box<dyn Clock>> {
        match &self.now {
            None => Ok(Box::new(SystemClock)),
            Some(raw) => {
                let at: DateTime<Utc> =
                    parse_timestamp(raw).ok_or_else(|| format!("cannot parse --now value '{raw}'"))?;
                Ok(Box::new(FixedClock(at)))
            }
        }
    }

    /// Load the snapshot from `--snapshot` or fetch it through the API.
    pub fn load(&self, config: &Config) -> CliResult<Snapshot> {
        match &self.snapshot {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read snapshot {}: {e}", path.display()))?;
                let snapshot: Snapshot = serde_json::from_str(&content)?;
                tracing::debug!(
                    path = %path.display(),
                    goals = snapshot.goals.len(),
                    actions = snapshot.actions.len(),
                    "snapshot loaded from file"
                );
                Ok(snapshot)
            }
            None => {
                let client = api_client(config)?;
                Ok(block_on(client.snapshot())??)
            }
        }
    }
}

/// Session built from config and the stored token.
pub fn session(config: &Config) -> CliResult<Session> {
    let store = SessionStore::open()?;
    Ok(Session::resolve(config, &store))
}

pub fn api_client(config: &Config) -> CliResult<ApiClient> {
    let session = session(config)?;
    Ok(ApiClient::with_cache(session, ResourceCache::from_config(&config.cache))?)
}

/// Run a future to completion on a fresh current-thread runtime.
pub fn block_on<F: Future>(future: F) -> CliResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
