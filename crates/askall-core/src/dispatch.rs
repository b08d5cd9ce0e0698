//! Concurrent fan-out of one prompt to the selected providers.
//!
//! Each selected provider gets one dispatch unit, spawned on a `JoinSet`:
//!
//! 1. invoke the adapter, timing only the call
//! 2. normalize the raw payload into a `ModelResponse`
//! 3. append a log entry when the run has logging enabled
//!
//! A unit that fails (or panics) is reported as a failure; its siblings
//! are unaffected. The run finishes only once every unit has.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use askall_types::config::RunOptions;
use askall_types::error::{ConfigError, ProviderError};
use askall_types::log::LogEntry;
use askall_types::provider::Provider;
use askall_types::response::ModelResponse;
use chrono::Utc;
use futures_util::FutureExt;
use tokio::task::JoinSet;
use tracing::Instrument;
use uuid::Uuid;

use crate::log::{InteractionLog, NullInteractionLog};
use crate::normalize::normalize;
use crate::provider::box_adapter::BoxProviderAdapter;
use crate::provider::registry::AdapterRegistry;
use crate::timed::{Timed, timed};

/// Lifecycle of one dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Dispatching,
    Awaiting { in_flight: usize },
    Done,
}

/// What happened to a unit's log append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogStatus {
    /// Logging was off for this run, or the call failed.
    Skipped,
    Written,
    Failed(String),
}

/// Terminal result of one dispatch unit.
#[derive(Debug)]
pub enum CallOutcome {
    Success(ModelResponse),
    Failure(ProviderError),
}

#[derive(Debug)]
pub struct ProviderReport {
    pub provider: Provider,
    pub outcome: CallOutcome,
    /// Time spent inside the adapter call.
    pub elapsed: Duration,
    pub log_status: LogStatus,
}

impl ProviderReport {
    fn failure(provider: Provider, error: ProviderError, elapsed: Duration) -> Self {
        Self {
            provider,
            outcome: CallOutcome::Failure(error),
            elapsed,
            log_status: LogStatus::Skipped,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, CallOutcome::Success(_))
    }
}

/// All unit reports of one run, in completion order.
#[derive(Debug)]
pub struct DispatchSummary {
    pub run_id: Uuid,
    pub reports: Vec<ProviderReport>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

impl DispatchSummary {
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.succeeded()
    }

    pub fn report(&self, provider: Provider) -> Option<&ProviderReport> {
        self.reports.iter().find(|r| r.provider == provider)
    }
}

/// Runs prompts against the adapters in a registry.
pub struct Dispatcher<L = NullInteractionLog> {
    registry: AdapterRegistry,
    log: Arc<L>,
    state: DispatchState,
}

impl Dispatcher<NullInteractionLog> {
    /// A dispatcher that never logs, whatever the run options say.
    pub fn without_log(registry: AdapterRegistry) -> Self {
        Self::new(registry, Arc::new(NullInteractionLog))
    }
}

impl<L: InteractionLog + 'static> Dispatcher<L> {
    pub fn new(registry: AdapterRegistry, log: Arc<L>) -> Self {
        Self {
            registry,
            log,
            state: DispatchState::Idle,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Send `prompt` to every provider in `selection` concurrently.
    ///
    /// `on_complete` is called once per unit as it finishes, so callers can
    /// render results without waiting for the slowest provider. Returns
    /// only after all units are done.
    pub async fn run<F>(
        &mut self,
        prompt: &str,
        selection: &[Provider],
        options: RunOptions,
        mut on_complete: F,
    ) -> Result<DispatchSummary, ConfigError>
    where
        F: FnMut(&ProviderReport),
    {
        let adapters = self.registry.select(selection)?;
        let run_id = Uuid::now_v7();
        let providers: Vec<String> = adapters.iter().map(|a| a.provider().to_string()).collect();
        let span = tracing::info_span!(
            "dispatch",
            run_id = %run_id,
            providers = %providers.join(","),
            mock = options.mock,
        );

        let started = Instant::now();
        self.transition(DispatchState::Dispatching);

        let prompt: Arc<str> = Arc::from(prompt);
        let mut join_set = JoinSet::new();
        for adapter in adapters {
            let prompt = Arc::clone(&prompt);
            let log = Arc::clone(&self.log);
            let provider = adapter.provider();
            let unit_span = tracing::info_span!(
                parent: &span,
                "provider_call",
                provider = %provider,
                model = adapter.model(),
            );

            join_set.spawn(
                async move {
                    let unit_started = Instant::now();
                    let unit = run_unit(adapter, prompt, options, log);
                    match AssertUnwindSafe(unit).catch_unwind().await {
                        Ok(report) => report,
                        Err(panic) => {
                            let message = panic_message(panic.as_ref());
                            tracing::error!(%provider, error = %message, "dispatch unit panicked");
                            ProviderReport::failure(
                                provider,
                                ProviderError::Panicked(message),
                                unit_started.elapsed(),
                            )
                        }
                    }
                }
                .instrument(unit_span),
            );
        }

        self.transition(DispatchState::Awaiting {
            in_flight: join_set.len(),
        });

        let mut reports = Vec::with_capacity(join_set.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(report) => {
                    on_complete(&report);
                    reports.push(report);
                }
                Err(e) => {
                    tracing::error!(parent: &span, error = %e, "dispatch unit did not complete");
                }
            }
            self.transition(DispatchState::Awaiting {
                in_flight: join_set.len(),
            });
        }

        self.transition(DispatchState::Done);
        let summary = DispatchSummary {
            run_id,
            reports,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            parent: &span,
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "dispatch finished"
        );
        Ok(summary)
    }

    fn transition(&mut self, next: DispatchState) {
        tracing::debug!(from = ?self.state, to = ?next, "dispatch state");
        self.state = next;
    }
}

/// One provider's call, normalize, and log sequence.
async fn run_unit<L: InteractionLog>(
    adapter: BoxProviderAdapter,
    prompt: Arc<str>,
    options: RunOptions,
    log: Arc<L>,
) -> ProviderReport {
    let provider = adapter.provider();
    let Timed { value, elapsed } = timed(adapter.invoke(&prompt, options.mock)).await;

    let raw = match value {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(%provider, error = %error, "provider call failed");
            return ProviderReport::failure(provider, error, elapsed);
        }
    };

    let response = normalize(raw, elapsed);
    tracing::debug!(
        %provider,
        tokens = response.total_tokens,
        finish_reason = %response.finish_reason,
        "provider call completed"
    );

    let log_status = if options.logging_enabled() {
        let entry = LogEntry::from_response(&response, &prompt, Utc::now());
        match log.append(&entry).await {
            Ok(()) => LogStatus::Written,
            Err(e) => {
                tracing::warn!(%provider, error = %e, "failed to append interaction log");
                LogStatus::Failed(e.to_string())
            }
        }
    } else {
        LogStatus::Skipped
    };

    ProviderReport {
        provider,
        outcome: CallOutcome::Success(response),
        elapsed,
        log_status,
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
