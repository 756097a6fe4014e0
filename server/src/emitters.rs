//! Periodic emitters.
//!
//! Fixed-cadence background tasks that generate the synthetic log traffic.
//! Each task loops until the shutdown token is cancelled. Backend writes run
//! on their own tasks, so a slow or failing backend never delays the next tick.

use crate::logger::SeverityLogger;
use shared::models::Severity;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Line written to local output by the plain emitter.
pub const STDOUT_MESSAGE: &str = "default content outputted to stdout";

/// Synthetic error embedded in the error-level message.
#[derive(Debug, Error)]
#[error("testing error issues")]
pub struct SyntheticError;

/// Where an emitter writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The logging backend, with the given severity.
    Backend(Severity),
    /// Local process output, bypassing the backend.
    Stdout,
}

/// One periodic emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterSpec {
    /// Destination of each message.
    pub target: Target,
    /// Pause between messages.
    pub interval: Duration,
    /// Message text.
    pub message: String,
    /// Emit once at start-up instead of waiting a full interval first.
    pub immediate: bool,
}

impl EmitterSpec {
    fn new(target: Target, secs: u64, message: impl Into<String>) -> Self {
        Self {
            target,
            interval: Duration::from_secs(secs),
            message: message.into(),
            immediate: false,
        }
    }

    fn immediately(mut self) -> Self {
        self.immediate = true;
        self
    }

    fn ticker(&self) -> Interval {
        let start = if self.immediate {
            Instant::now()
        } else {
            Instant::now() + self.interval
        };
        let mut ticker = tokio::time::interval_at(start, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }

    fn fire(&self, logger: &Arc<SeverityLogger>) {
        match self.target {
            Target::Backend(severity) => {
                let logger = Arc::clone(logger);
                let message = self.message.clone();
                tokio::spawn(async move {
                    logger.emit(severity, message).await;
                });
            }
            Target::Stdout => logger.output().write_line(&self.message),
        }
    }
}

/// The emitter table.
#[must_use]
pub fn schedule() -> Vec<EmitterSpec> {
    vec![
        EmitterSpec::new(Target::Backend(Severity::Info), 5, "an informational log entry")
            .immediately(),
        EmitterSpec::new(Target::Backend(Severity::Warning), 20, "be prepared"),
        EmitterSpec::new(
            Target::Backend(Severity::Error),
            15,
            format!("error: {SyntheticError}"),
        ),
        EmitterSpec::new(
            Target::Backend(Severity::Debug),
            2,
            "small detail of interest to developer",
        ),
        EmitterSpec::new(Target::Backend(Severity::Critical), 60, "super important"),
        EmitterSpec::new(Target::Stdout, 6, STDOUT_MESSAGE),
    ]
}

/// Spawns every emitter from [`schedule`] on the current runtime.
pub fn spawn_emitters(
    logger: Arc<SeverityLogger>,
    shutdown: CancellationToken,
) -> Vec<JoinHandle<()>> {
    schedule()
        .into_iter()
        .map(|spec| {
            let logger = Arc::clone(&logger);
            let shutdown = shutdown.clone();
            tokio::spawn(run_emitter(spec, logger, shutdown))
        })
        .collect()
}

async fn run_emitter(spec: EmitterSpec, logger: Arc<SeverityLogger>, shutdown: CancellationToken) {
    tracing::debug!(emitter = ?spec.target, interval = ?spec.interval, "Emitter started");

    let mut ticker = spec.ticker();
    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            _ = ticker.tick() => spec.fire(&logger),
        }
    }

    tracing::debug!(emitter = ?spec.target, "Emitter stopped");
}
