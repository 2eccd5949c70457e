//! Concurrent HTTP dispatch of payload batches.

use anyhow::{Context, Result};
use futures::{stream, StreamExt};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::TargetConfig;
use crate::error::SpamError;
use crate::payload::Payload;

/// Per-request result classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 2xx response received.
    Delivered,
    /// Non-2xx response received.
    Rejected,
    /// Transport failure: connect error, timeout, or unreadable body.
    Failed,
}

/// Counts for a completed batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub delivered: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.delivered + self.rejected + self.failed
    }

    fn record(&mut self, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::Delivered => self.delivered += 1,
            DispatchOutcome::Rejected => self.rejected += 1,
            DispatchOutcome::Failed => self.failed += 1,
        }
    }
}

/// Issues transaction POSTs through a bounded pool of in-flight requests.
#[derive(Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    transaction_url: String,
    hello_url: String,
}

impl Dispatcher {
    pub fn new(target: &TargetConfig) -> Result<Self, SpamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(target.http_timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            transaction_url: target.transaction_url(),
            hello_url: target.hello_url(),
        })
    }

    /// Sends every payload, at most `concurrency` in flight at once, and
    /// returns once all of them resolve. Completion order across workers
    /// is unspecified. Individual failures are logged and counted, never
    /// fatal; an empty batch issues no requests at all.
    pub async fn dispatch(&self, payloads: Vec<Payload>, concurrency: usize) -> BatchReport {
        let concurrency = concurrency.max(1);
        let mut outcomes = stream::iter(payloads)
            .map(|payload| self.send(payload))
            .buffer_unordered(concurrency);

        let mut report = BatchReport::default();
        while let Some(outcome) = outcomes.next().await {
            report.record(outcome);
        }
        report
    }

    async fn send(&self, payload: Payload) -> DispatchOutcome {
        let response = match self
            .client
            .post(&self.transaction_url)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, sender = %payload.sender, receiver = %payload.receiver,
                    "transaction POST failed");
                return DispatchOutcome::Failed;
            }
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => {
                if status.is_success() {
                    info!(%status, body = %body.trim_end(), "response");
                    DispatchOutcome::Delivered
                } else {
                    warn!(%status, body = %body.trim_end(), "transaction rejected");
                    DispatchOutcome::Rejected
                }
            }
            Err(err) => {
                warn!(%status, error = %err, "response body read failed");
                DispatchOutcome::Failed
            }
        }
    }

    /// Health-check GET against the hello endpoint.
    pub async fn hello(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.hello_url)
            .send()
            .await
            .context("hello request failed")?;
        let status = response.status();
        let body = response.text().await.context("hello body read failed")?;
        if !status.is_success() {
            anyhow::bail!("hello endpoint returned HTTP {status}: {body}");
        }
        Ok(body)
    }
}
