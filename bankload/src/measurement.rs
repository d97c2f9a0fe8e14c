use bankload_core::TransactionStatistics;
use std::time::Duration;

/// Outcome counts and latencies for one label over a collection window.
#[derive(Debug, Clone, Default)]
pub(crate) struct Measurement {
    pub label: String,
    pub success: u64,
    pub error: u64,
    latencies: Vec<Duration>,
    sorted: bool,
}

impl Measurement {
    pub fn new(label: &str, success: u64, error: u64) -> Self {
        Self {
            label: label.to_string(),
            success,
            error,
            latencies: Vec::new(),
            sorted: true,
        }
    }

    pub fn populate_latencies(&mut self, dur: &[Duration]) {
        self.latencies.extend_from_slice(dur);
        self.sorted = false;
    }

    pub fn merge(&mut self, other: &Measurement) {
        self.success += other.success;
        self.error += other.error;
        self.populate_latencies(&other.latencies);
    }

    pub fn total(&self) -> u64 {
        self.success + self.error
    }

    pub fn tps(&self, elapsed: Duration) -> f64 {
        if elapsed.is_zero() {
            return 0.;
        }
        self.total() as f64 / elapsed.as_secs_f64()
    }

    pub fn error_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.;
        }
        self.error as f64 / self.total() as f64
    }

    /// Nearest-rank quantile; zero when nothing was measured.
    pub fn latency(&self, quantile: f64) -> Duration {
        let n = self.latencies.len();
        if n == 0 {
            return Duration::ZERO;
        }
        let rank = (quantile.clamp(0., 1.) * n as f64).ceil() as usize;
        if self.sorted {
            self.latencies[rank.clamp(1, n) - 1]
        } else {
            let mut sorted = self.latencies.clone();
            sorted.sort_unstable();
            sorted[rank.clamp(1, n) - 1]
        }
    }

    pub fn sort(&mut self) {
        if !self.sorted {
            self.latencies.sort_unstable();
            self.sorted = true;
        }
    }

    pub fn into_statistics(mut self, elapsed: Duration) -> TransactionStatistics {
        self.sort();
        TransactionStatistics {
            tps: self.tps(elapsed),
            error_rate: self.error_rate(),
            latency_p50: self.latency(0.5),
            latency_p90: self.latency(0.9),
            latency_p99: self.latency(0.99),
            success: self.success,
            error: self.error,
            label: self.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantiles_use_nearest_rank() {
        let mut m = Measurement::new("GET /x", 10, 0);
        let latencies: Vec<_> = (1..=10).rev().map(Duration::from_millis).collect();
        m.populate_latencies(&latencies);

        assert_eq!(m.latency(0.5), Duration::from_millis(5));
        assert_eq!(m.latency(0.9), Duration::from_millis(9));
        assert_eq!(m.latency(0.99), Duration::from_millis(10));
        assert_eq!(m.latency(0.), Duration::from_millis(1));
    }

    #[test]
    fn empty_measurement_is_zeroed() {
        let m = Measurement::new("GET /x", 0, 0);
        assert_eq!(m.latency(0.5), Duration::ZERO);
        assert_eq!(m.error_rate(), 0.);
        assert_eq!(m.tps(Duration::ZERO), 0.);
    }

    #[test]
    fn converts_to_statistics() {
        let mut m = Measurement::new("POST /y", 3, 1);
        m.populate_latencies(&[Duration::from_millis(4); 4]);
        let stats = m.into_statistics(Duration::from_secs(2));
        assert_eq!(stats.tps, 2.);
        assert_eq!(stats.error_rate, 0.25);
        assert_eq!(stats.latency_p99, Duration::from_millis(4));
    }
}
