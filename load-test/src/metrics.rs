//! Per-request OK/KO counters and latency statistics.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct RequestStats {
    ok: u64,
    ko: u64,
    latencies: Vec<Duration>,
}

/// Shared by every virtual user for the lifetime of a run.
#[derive(Debug)]
pub struct Metrics {
    start_time: Instant,
    requests: Mutex<BTreeMap<String, RequestStats>>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self { start_time: Instant::now(), requests: Mutex::new(BTreeMap::new()) }
    }

    pub async fn record_ok(&self, name: &str, latency: Duration) {
        let mut requests = self.requests.lock().await;
        let stats = requests.entry(name.to_string()).or_default();
        stats.ok += 1;
        stats.latencies.push(latency);
    }

    pub async fn record_ko(&self, name: &str, latency: Duration) {
        let mut requests = self.requests.lock().await;
        let stats = requests.entry(name.to_string()).or_default();
        stats.ko += 1;
        stats.latencies.push(latency);
    }

    pub async fn report(&self) -> SimulationReport {
        let requests = self.requests.lock().await;
        SimulationReport {
            duration: self.start_time.elapsed(),
            requests: requests.iter().map(|(name, stats)| RequestSummary::from_stats(name, stats)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestSummary {
    pub name: String,
    pub ok: u64,
    pub ko: u64,
    pub min: Duration,
    pub avg: Duration,
    pub max: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl RequestSummary {
    fn from_stats(name: &str, stats: &RequestStats) -> Self {
        let mut sorted = stats.latencies.clone();
        sorted.sort();

        let (min, avg, max, p95, p99) = if sorted.is_empty() {
            (Duration::ZERO, Duration::ZERO, Duration::ZERO, Duration::ZERO, Duration::ZERO)
        } else {
            let total: Duration = sorted.iter().sum();
            (
                sorted[0],
                total / sorted.len() as u32,
                sorted[sorted.len() - 1],
                percentile(&sorted, 0.95),
                percentile(&sorted, 0.99),
            )
        };

        Self { name: name.to_string(), ok: stats.ok, ko: stats.ko, min, avg, max, p95, p99 }
    }

    pub fn total(&self) -> u64 {
        self.ok + self.ko
    }
}

/// Nearest-rank percentile over an ascending, non-empty slice.
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let index = (sorted.len() as f64 * p) as usize;
    sorted[index.min(sorted.len() - 1)]
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub duration: Duration,
    /// One entry per distinct request name, sorted by name.
    pub requests: Vec<RequestSummary>,
}

impl SimulationReport {
    pub fn total_ok(&self) -> u64 {
        self.requests.iter().map(|r| r.ok).sum()
    }

    pub fn total_ko(&self) -> u64 {
        self.requests.iter().map(|r| r.ko).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.total_ko() > 0
    }

    pub fn request(&self, name: &str) -> Option<&RequestSummary> {
        self.requests.iter().find(|r| r.name == name)
    }

    /// Summaries whose rendered name starts with `prefix`.
    pub fn requests_starting_with<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a RequestSummary> {
        self.requests.iter().filter(move |r| r.name.starts_with(prefix))
    }

    pub fn print(&self) {
        let ok = self.total_ok();
        let ko = self.total_ko();
        let total = ok + ko;

        println!("\n═══════════════════════════════════════════════════════════════");
        println!("  LOAD TEST RESULTS");
        println!("═══════════════════════════════════════════════════════════════");
        println!("  Requests:       {}/{} OK ({} KO)", ok, total, ko);
        println!("  Duration:       {:.2}s", self.duration.as_secs_f64());
        println!("───────────────────────────────────────────────────────────────");
        println!(
            "  {:<40} {:>5} {:>5} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "Request", "OK", "KO", "min ms", "avg ms", "max ms", "p95 ms", "p99 ms"
        );
        for r in &self.requests {
            println!(
                "  {:<40} {:>5} {:>5} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
                r.name,
                r.ok,
                r.ko,
                millis(r.min),
                millis(r.avg),
                millis(r.max),
                millis(r.p95),
                millis(r.p99)
            );
        }
        println!("───────────────────────────────────────────────────────────────");
        let success_rate = if total > 0 { ok as f64 / total as f64 * 100.0 } else { 0.0 };
        let status = if ko == 0 { "✅ ALL OK" } else { "❌ FAILED" };
        println!("  Success Rate:   {:.2}% {}", success_rate, status);
        println!("═══════════════════════════════════════════════════════════════");
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_ok_and_ko_per_name() {
        let metrics = Metrics::new();
        metrics.record_ok("Authenticate", Duration::from_millis(10)).await;
        metrics.record_ko("Authenticate", Duration::from_millis(30)).await;
        metrics.record_ok("Get all video games", Duration::from_millis(5)).await;

        let report = metrics.report().await;
        let auth = report.request("Authenticate").unwrap();
        assert_eq!((auth.ok, auth.ko), (1, 1));
        assert_eq!(auth.min, Duration::from_millis(10));
        assert_eq!(auth.max, Duration::from_millis(30));
        assert_eq!(auth.avg, Duration::from_millis(20));
        assert_eq!(report.total_ok(), 2);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn test_percentiles_over_hundred_samples() {
        let metrics = Metrics::new();
        for ms in 1..=100 {
            metrics.record_ok("Get all video games", Duration::from_millis(ms)).await;
        }

        let report = metrics.report().await;
        let summary = report.request("Get all video games").unwrap();
        assert_eq!(summary.p95, Duration::from_millis(96));
        assert_eq!(summary.p99, Duration::from_millis(100));
        assert!(!report.has_failures());
    }

    #[tokio::test]
    async fn test_prefix_lookup_matches_rendered_names() {
        let metrics = Metrics::new();
        metrics.record_ok("Delete Game - Doom", Duration::from_millis(1)).await;
        metrics.record_ok("Delete Game - Tetris", Duration::from_millis(1)).await;
        metrics.record_ok("Authenticate", Duration::from_millis(1)).await;

        let report = metrics.report().await;
        assert_eq!(report.requests_starting_with("Delete Game - ").count(), 2);
    }

    #[test]
    fn test_percentile_of_single_sample() {
        assert_eq!(percentile(&[Duration::from_millis(7)], 0.99), Duration::from_millis(7));
    }
}
