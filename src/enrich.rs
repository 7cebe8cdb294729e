//! Optional AI enrichment.
//!
//! A provider supplies narrative insights on top of the deterministic
//! report. Enrichment is strictly additive: every failure path, including
//! timeout and retry exhaustion, degrades to `AiInsights::unavailable()`
//! and the structured report ships unchanged.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use log::warn;

use crate::analysis::types::{AiInsights, AnalysisReport, JobContext};
use crate::error::EnrichmentError;

/// Upper bound on `max_retries`; anything above is clamped.
pub const RETRY_CAP: u32 = 2;

pub type InsightFuture<'a> =
    Pin<Box<dyn Future<Output = Result<AiInsights, EnrichmentError>> + Send + 'a>>;

/// An external service that can comment on a finished report. Object safe
/// so callers can hold a `Box<dyn InsightProvider>`.
pub trait InsightProvider: Send + Sync {
    fn generate<'a>(&'a self, report: &'a AnalysisReport, job: &'a JobContext)
        -> InsightFuture<'a>;
}

#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(20), max_retries: 1 }
    }
}

/// Run the provider under the configured timeout, retrying transient
/// failures. Never returns an error; the fallback is the unavailable
/// marker.
pub async fn fetch_insights(
    provider: &dyn InsightProvider,
    report: &AnalysisReport,
    job: &JobContext,
    config: &EnrichmentConfig,
) -> AiInsights {
    let attempts = config.max_retries.min(RETRY_CAP) + 1;

    for attempt in 1..=attempts {
        match tokio::time::timeout(config.timeout, provider.generate(report, job)).await {
            Ok(Ok(insights)) => return insights,
            Ok(Err(err)) => {
                warn!("insight provider failed on attempt {attempt}/{attempts}: {err}");
            }
            Err(_) => {
                let err = EnrichmentError::Timeout(config.timeout);
                warn!("insight provider gave up on attempt {attempt}/{attempts}: {err}");
            }
        }
    }

    AiInsights::unavailable()
}
