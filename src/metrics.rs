//! Prometheus metrics collection for the hello service
//!
//! Two aggregates are tracked for the lifetime of the process:
//! - `hello_requests_total`: request counter labeled by method and endpoint
//! - `hello_request_duration_seconds`: request duration histogram
//!
//! Both live in a registry owned by [`Metrics`] rather than the prometheus
//! default registry, so each `Metrics` value (and each test) starts from zero.
//! Metrics are exposed via the `/metrics` endpoint in Prometheus text format.
//!
//! The request counter is rendered by hand so its labels keep declaration
//! order and its values keep a fractional part, e.g.
//! `hello_requests_total{method="GET",endpoint="/"} 1.0`. Every other family
//! goes through prometheus' `TextEncoder`.

use prometheus::proto::MetricFamily;
use prometheus::{CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::fmt::Write as _;
use std::sync::Arc;

/// Name of the request counter
pub const REQUESTS_TOTAL: &str = "hello_requests_total";

/// Help text of the request counter
pub const REQUESTS_TOTAL_HELP: &str = "Total requests";

/// Request counter labels, in exposition order
pub const REQUEST_LABELS: [&str; 2] = ["method", "endpoint"];

/// Name of the request duration histogram
pub const REQUEST_DURATION_SECONDS: &str = "hello_request_duration_seconds";

/// Default histogram bucket upper bounds, in seconds
///
/// These are the conventional Prometheus client defaults (+Inf is implicit).
pub const DEFAULT_DURATION_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Metrics collector for the hello service
///
/// Cheap to clone; clones share the same registry and collectors. All
/// collectors are atomic, so recording from concurrent requests never loses
/// an update.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    requests_total: CounterVec,
    request_duration: Histogram,
}

impl Metrics {
    /// Create a new Metrics instance with the default duration buckets
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::with_buckets(DEFAULT_DURATION_BUCKETS.to_vec())
    }

    /// Create a new Metrics instance with custom duration buckets
    ///
    /// # Errors
    ///
    /// Returns an error if `buckets` is empty, not strictly increasing, or if
    /// registration fails.
    pub fn with_buckets(buckets: Vec<f64>) -> Result<Self, prometheus::Error> {
        if buckets.is_empty() {
            return Err(prometheus::Error::Msg(
                "Histogram needs at least one bucket".to_string(),
            ));
        }

        let registry = Registry::new();

        // Cardinality: one series per distinct (method, raw path) pair
        let requests_total = CounterVec::new(
            Opts::new(REQUESTS_TOTAL, REQUESTS_TOTAL_HELP),
            &REQUEST_LABELS,
        )?;

        // prometheus rejects non-increasing bounds here
        let request_duration = Histogram::with_opts(
            HistogramOpts::new(REQUEST_DURATION_SECONDS, "Request duration").buckets(buckets),
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            request_duration,
        })
    }

    /// Record one completed request for `method` on `endpoint`
    ///
    /// `endpoint` is the raw URL path, without query string.
    pub fn record_request(&self, method: &str, endpoint: &str) -> Result<(), prometheus::Error> {
        self.requests_total
            .get_metric_with_label_values(&[method, endpoint])?
            .inc();
        Ok(())
    }

    /// Record the duration of one completed request
    ///
    /// # Errors
    ///
    /// Returns an error if `seconds` is NaN, infinite, or negative. Such values
    /// would corrupt the histogram sum for every later scrape.
    pub fn record_duration(&self, seconds: f64) -> Result<(), prometheus::Error> {
        if !seconds.is_finite() {
            return Err(prometheus::Error::Msg(format!(
                "Histogram value must be finite (not NaN or Infinity), got: {}",
                seconds
            )));
        }

        if seconds < 0.0 {
            return Err(prometheus::Error::Msg(format!(
                "Histogram value must be non-negative (duration cannot be negative), got: {}",
                seconds
            )));
        }

        self.request_duration.observe(seconds);
        Ok(())
    }

    /// Current count for a single (method, endpoint) pair
    ///
    /// Returns 0 for pairs that were never recorded.
    pub fn requests_count(&self, method: &str, endpoint: &str) -> u64 {
        self.requests_sum(|m| {
            m.get_label().iter().any(|l| l.get_name() == "method" && l.get_value() == method)
                && m.get_label()
                    .iter()
                    .any(|l| l.get_name() == "endpoint" && l.get_value() == endpoint)
        })
    }

    /// Sum of the request counter across all label combinations
    pub fn requests_total(&self) -> u64 {
        self.requests_sum(|_| true)
    }

    fn requests_sum(&self, filter: impl Fn(&prometheus::proto::Metric) -> bool) -> u64 {
        let metric_families = self.registry.gather();
        metric_families
            .iter()
            .find(|mf| mf.name() == REQUESTS_TOTAL)
            .map(|mf| {
                mf.get_metric()
                    .iter()
                    .filter(|m| filter(m))
                    .map(|m| m.counter.value.unwrap_or(0.0) as u64)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Number of samples observed by the duration histogram
    pub fn duration_sample_count(&self) -> u64 {
        self.request_duration.get_sample_count()
    }

    /// Encode every registered metric in Prometheus text format
    ///
    /// # Errors
    ///
    /// Returns an error if the text encoder fails or produces invalid UTF-8.
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();
        let metric_count = metric_families.len();

        tracing::debug!(
            metric_family_count = metric_count,
            "Encoding metrics to Prometheus text format"
        );

        let mut output = String::new();
        for mf in &metric_families {
            if mf.name() == REQUESTS_TOTAL {
                encode_requests_total(mf, &mut output).map_err(|e| {
                    prometheus::Error::Msg(format!("Failed to render {}: {}", REQUESTS_TOTAL, e))
                })?;
            } else {
                output.push_str(&encode_text(mf)?);
            }
        }

        Ok(output)
    }
}

/// Encode a single family with prometheus' text encoder
fn encode_text(mf: &MetricFamily) -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    encoder
        .encode(std::slice::from_ref(mf), &mut buffer)
        .map_err(|e| {
            tracing::error!(
                error = %e,
                metric = mf.name(),
                "Prometheus text encoder failed"
            );
            prometheus::Error::Msg(format!("Failed to encode {}: {}", mf.name(), e))
        })?;

    String::from_utf8(buffer).map_err(|e| {
        let valid_up_to = e.utf8_error().valid_up_to();
        tracing::error!(
            invalid_byte_index = valid_up_to,
            metric = mf.name(),
            "Prometheus encoder produced invalid UTF-8"
        );
        prometheus::Error::Msg(format!(
            "Failed to convert {} to UTF-8 at byte {}: {}",
            mf.name(),
            valid_up_to,
            e
        ))
    })
}

/// Render the request counter with labels in [`REQUEST_LABELS`] order
///
/// Values use `f64`'s `Debug` form, so whole counts print as `1.0`.
fn encode_requests_total(mf: &MetricFamily, out: &mut String) -> std::fmt::Result {
    writeln!(out, "# HELP {} {}", REQUESTS_TOTAL, escape_help(REQUESTS_TOTAL_HELP))?;
    writeln!(out, "# TYPE {} counter", REQUESTS_TOTAL)?;

    for m in mf.get_metric() {
        out.push_str(REQUESTS_TOTAL);
        out.push('{');
        for (i, name) in REQUEST_LABELS.iter().enumerate() {
            let value = m
                .get_label()
                .iter()
                .find(|l| l.get_name() == *name)
                .map(|l| l.get_value())
                .unwrap_or_default();
            if i > 0 {
                out.push(',');
            }
            write!(out, "{}=\"{}\"", name, escape_label_value(value))?;
        }
        writeln!(out, "}} {:?}", m.counter.value.unwrap_or(0.0))?;
    }

    Ok(())
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
