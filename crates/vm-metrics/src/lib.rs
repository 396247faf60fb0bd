use std::env;
use std::sync::OnceLock;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const MATCH_REQUESTS_TOTAL: &str = "vm_match_requests_total";
pub const MATCH_FAILURES_TOTAL: &str = "vm_match_failures_total";
pub const MATCH_CANDIDATES_SURFACED: &str = "vm_match_candidates_surfaced";

/// Start the Prometheus exporter on `0.0.0.0:<port>`, the port coming from
/// `port_env` or `default_port`. Repeated calls return the first handle.
pub fn init_metrics(port_env: &str, default_port: u16) -> Option<&'static PrometheusHandle> {
    let port = resolve_port(env::var(port_env).ok(), default_port);

    if let Some(existing) = PROMETHEUS_HANDLE.get() {
        return Some(existing);
    }

    match PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install_recorder()
    {
        Ok(handle) => {
            let _ = PROMETHEUS_HANDLE.set(handle);
            info!(metrics_port = port, "started prometheus exporter");
            PROMETHEUS_HANDLE.get()
        }
        Err(err) => {
            warn!(error = %err, metrics_port = port, "failed to start prometheus exporter");
            PROMETHEUS_HANDLE.get()
        }
    }
}

fn resolve_port(raw: Option<String>, default_port: u16) -> u16 {
    raw.and_then(|raw| raw.trim().parse::<u16>().ok())
        .unwrap_or(default_port)
}

/// One completed candidate scan. No-op until a recorder is installed.
pub fn record_match_run(perspective: &str, demo_mode: bool, surfaced: usize) {
    let demo = if demo_mode { "true" } else { "false" };
    counter!(MATCH_REQUESTS_TOTAL, "perspective" => perspective.to_string(), "demo" => demo)
        .increment(1);
    histogram!(MATCH_CANDIDATES_SURFACED, "perspective" => perspective.to_string())
        .record(surfaced as f64);
}

pub fn record_match_failure(perspective: &str) {
    counter!(MATCH_FAILURES_TOTAL, "perspective" => perspective.to_string()).increment(1);
}
