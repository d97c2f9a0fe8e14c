use crate::measurement::Measurement;
use bankload_core::{RunStatistics, ScenarioConfig};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use metrics_util::AtomicBucket;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

struct LabelAtomics {
    success: AtomicU64,
    error: AtomicU64,
    latency: AtomicBucket<Duration>,
}

impl LabelAtomics {
    fn new() -> Self {
        Self {
            success: AtomicU64::new(0),
            error: AtomicU64::new(0),
            latency: AtomicBucket::new(),
        }
    }
}

/// Shared counters every virtual user of a scenario records into.
pub(crate) struct TransactionAtomics {
    labels: RwLock<HashMap<String, Arc<LabelAtomics>>>,
}

impl TransactionAtomics {
    pub fn new() -> Self {
        Self {
            labels: RwLock::new(HashMap::new()),
        }
    }

    pub fn record(&self, label: &str, elapsed: Duration, success: bool) {
        let atomics = self.label(label);
        if success {
            atomics.success.fetch_add(1, Ordering::Relaxed);
        } else {
            atomics.error.fetch_add(1, Ordering::Relaxed);
        }
        atomics.latency.push(elapsed);
    }

    fn label(&self, label: &str) -> Arc<LabelAtomics> {
        if let Some(atomics) = self
            .labels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(label)
        {
            return atomics.clone();
        }

        self.labels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(label.to_string())
            .or_insert_with(|| Arc::new(LabelAtomics::new()))
            .clone()
    }

    /// Drains the counters into one measurement per label, sorted by label.
    pub fn collect(&self) -> Vec<Measurement> {
        let labels = self.labels.read().unwrap_or_else(PoisonError::into_inner);
        let mut measurements: Vec<_> = labels
            .iter()
            .map(|(label, atomics)| {
                let success = atomics.success.swap(0, Ordering::Relaxed);
                let error = atomics.error.swap(0, Ordering::Relaxed);
                let mut measurement = Measurement::new(label, success, error);
                atomics
                    .latency
                    .clear_with(|dur| measurement.populate_latencies(dur));
                measurement
            })
            .collect();
        measurements.sort_by(|a, b| a.label.cmp(&b.label));
        measurements
    }

    pub fn statistics(
        &self,
        config: &ScenarioConfig,
        failed_users: usize,
        elapsed: Duration,
    ) -> RunStatistics {
        let measurements = self.collect();

        let mut total = Measurement::default();
        for measurement in &measurements {
            total.merge(measurement);
        }
        total.sort();

        RunStatistics {
            name: config.name.clone(),
            users: config.users.get(),
            failed_users,
            elapsed,
            success: total.success,
            error: total.error,
            actual_tps: total.tps(elapsed),
            error_rate: total.error_rate(),
            latency_p50: total.latency(0.5),
            latency_p90: total.latency(0.9),
            latency_p99: total.latency(0.99),
            transactions: measurements
                .into_iter()
                .map(|m| m.into_statistics(elapsed))
                .collect(),
        }
    }
}

pub(crate) fn rate_limiter(tps_limit: NonZeroU32) -> DefaultDirectRateLimiter {
    RateLimiter::direct(Quota::per_second(tps_limit).allow_burst(NonZeroU32::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_across_labels() {
        let atomics = TransactionAtomics::new();
        atomics.record("b", Duration::from_millis(2), true);
        atomics.record("a", Duration::from_millis(1), true);
        atomics.record("a", Duration::from_millis(3), false);

        let mut config = ScenarioConfig::new("aggregate");
        config.users = std::num::NonZeroUsize::new(2).unwrap();
        let stats = atomics.statistics(&config, 1, Duration::from_secs(1));

        assert_eq!(stats.users, 2);
        assert_eq!(stats.failed_users, 1);
        assert_eq!((stats.success, stats.error), (2, 1));
        assert_eq!(stats.actual_tps, 3.);
        assert_eq!(stats.latency_p99, Duration::from_millis(3));
        let labels: Vec<_> = stats.transactions.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["a", "b"]);
    }

    #[test]
    fn collect_drains_counters() {
        let atomics = TransactionAtomics::new();
        atomics.record("a", Duration::from_millis(1), true);
        assert_eq!(atomics.collect()[0].success, 1);
        assert_eq!(atomics.collect()[0].total(), 0);
    }
}
