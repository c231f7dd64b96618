//! Persisted run ledger for the product-mining job.
//!
//! The server runs no timers of its own. An external scheduler calls the
//! trigger endpoint, and the ledger decides whether a run is due based on the
//! last recorded start time. The record survives restarts, so a reboot never
//! causes a duplicate run inside the interval.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger I/O failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ledger file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerSource {
    #[default]
    Cron,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub trigger: TriggerSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TriggerOutcome {
    Accepted {
        run: RunRecord,
    },
    Skipped {
        #[serde(rename = "lastRun")]
        last_run: RunRecord,
        #[serde(rename = "nextDueAt")]
        next_due_at: DateTime<Utc>,
    },
}

/// Ten years; longer intervals are clamped.
const MAX_INTERVAL_HOURS: i64 = 24 * 365 * 10;

pub struct RunLedger {
    path: PathBuf,
    interval: Duration,
    // Serializes read-decide-write so two concurrent triggers cannot both run.
    lock: Mutex<()>,
}

impl RunLedger {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, interval_hours: u64) -> Self {
        let hours = i64::try_from(interval_hours)
            .unwrap_or(MAX_INTERVAL_HOURS)
            .min(MAX_INTERVAL_HOURS);
        Self {
            path: path.into(),
            interval: Duration::hours(hours),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn next_due_at(&self, last_run: &RunRecord) -> DateTime<Utc> {
        last_run.started_at + self.interval
    }

    /// The most recent run, or `None` when nothing has run yet.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the file exists but cannot be read or parsed.
    pub async fn last_run(&self) -> Result<Option<RunRecord>, LedgerError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Record a new run when one is due (or `force` is set).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the ledger cannot be read or written.
    pub async fn trigger(
        &self,
        source: TriggerSource,
        force: bool,
        now: DateTime<Utc>,
    ) -> Result<TriggerOutcome, LedgerError> {
        let _guard = self.lock.lock().await;

        if let Some(last_run) = self.read().await? {
            let next_due_at = self.next_due_at(&last_run);
            if !force && now < next_due_at {
                tracing::info!(
                    last_run = %last_run.started_at,
                    next_due_at = %next_due_at,
                    "mining run skipped; interval has not elapsed"
                );
                return Ok(TriggerOutcome::Skipped {
                    last_run,
                    next_due_at,
                });
            }
        }

        let run = RunRecord {
            id: Uuid::new_v4(),
            started_at: now,
            trigger: source,
        };
        self.write(&run).await?;
        tracing::info!(run_id = %run.id, ?source, force, "mining run accepted");
        Ok(TriggerOutcome::Accepted { run })
    }

    async fn read(&self) -> Result<Option<RunRecord>, LedgerError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Writes to a sibling temp file and renames it over the ledger.
    async fn write(&self, run: &RunRecord) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_vec_pretty(run)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> LedgerError {
        LedgerError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
