use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Measurements for a single transaction label, e.g. `POST /api/v1/users`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionStatistics {
    pub label: String,
    pub success: u64,
    pub error: u64,
    pub tps: f64,
    pub error_rate: f64,
    pub latency_p50: Duration,
    pub latency_p90: Duration,
    pub latency_p99: Duration,
}

impl TransactionStatistics {
    pub fn total(&self) -> u64 {
        self.success + self.error
    }
}

/// Run Statistics for a given Scenario
///
/// `transactions` is sorted by label. The aggregate fields cover every
/// transaction of the run.
#[derive(Clone, Debug, Serialize)]
pub struct RunStatistics {
    pub name: String,
    pub users: usize,
    /// Virtual users whose `on_start` failed.
    pub failed_users: usize,
    pub elapsed: Duration,
    pub success: u64,
    pub error: u64,
    pub actual_tps: f64,
    pub error_rate: f64,
    pub latency_p50: Duration,
    pub latency_p90: Duration,
    pub latency_p99: Duration,
    pub transactions: Vec<TransactionStatistics>,
}

impl RunStatistics {
    pub fn total(&self) -> u64 {
        self.success + self.error
    }

    pub fn transaction(&self, label: &str) -> Option<&TransactionStatistics> {
        self.transactions.iter().find(|t| t.label == label)
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Scenario `{}`: {} users ({} failed) over {}",
            self.name,
            self.users,
            self.failed_users,
            humantime::format_duration(Duration::from_millis(self.elapsed.as_millis() as u64)),
        )?;
        writeln!(
            f,
            "{:<56} {:>8} {:>8} {:>9} {:>10} {:>10} {:>10}",
            "Transaction", "Ok", "Err", "TPS", "p50", "p90", "p99"
        )?;
        for t in &self.transactions {
            writeln!(
                f,
                "{:<56} {:>8} {:>8} {:>9.2} {:>10} {:>10} {:>10}",
                t.label,
                t.success,
                t.error,
                t.tps,
                format_latency(t.latency_p50),
                format_latency(t.latency_p90),
                format_latency(t.latency_p99),
            )?;
        }
        write!(
            f,
            "{:<56} {:>8} {:>8} {:>9.2} {:>10} {:>10} {:>10}",
            "Aggregated",
            self.success,
            self.error,
            self.actual_tps,
            format_latency(self.latency_p50),
            format_latency(self.latency_p90),
            format_latency(self.latency_p99),
        )
    }
}

fn format_latency(latency: Duration) -> String {
    format!("{:.1}ms", latency.as_secs_f64() * 1_000.)
}
