//! Prometheus metrics
//!
//! Installed once at startup; the recorder handle is kept in a static
//! so the `/metrics` endpoint can render it.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Safe to call more than once; only
/// the first call installs.
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    let handle = PROMETHEUS_HANDLE.get_or_try_init(|| {
        PrometheusBuilder::new().install_recorder().map_err(|e| {
            tracing::error!(error = %e, "Failed to install Prometheus recorder");
            e
        })
    });
    handle.ok()
}

/// Count a handled request per endpoint.
pub fn record_request(endpoint: &'static str) {
    metrics::counter!("saarthi_requests_total", "endpoint" => endpoint).increment(1);
}

/// Render the current metrics snapshot.
pub async fn metrics_handler() -> String {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => handle.render(),
        None => String::new(),
    }
}
