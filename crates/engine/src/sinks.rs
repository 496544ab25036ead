//! Metrics sink implementations.
//!
//! The engine emits through the [`MetricsSink`] port only; which sink is
//! wired in is an integration choice. [`FacadeMetricsSink`] forwards to the
//! `metrics` crate so any exporter the host installs picks the values up,
//! [`NoopMetricsSink`] discards everything, and [`RecordingMetricsSink`]
//! keeps emissions in memory for assertions.

use std::sync::{Arc, Mutex};

use copydesk_core::ports::MetricsSink;

/// Discards all emissions. The default for embedders that do not care.
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn increment_counter(&self, _name: &'static str, _labels: &[(&'static str, String)]) {}

    fn record_duration(&self, _name: &'static str, _seconds: f64, _labels: &[(&'static str, String)]) {
    }

    fn start_span(&self, _name: &'static str) -> tracing::Span {
        tracing::Span::none()
    }
}

/// Forwards to the `metrics` facade and opens `tracing` spans.
///
/// Exporter wiring (Prometheus, OTLP, ...) is the host application's
/// concern; this sink stays exporter-agnostic.
pub struct FacadeMetricsSink;

impl FacadeMetricsSink {
    fn labels(labels: &[(&'static str, String)]) -> Vec<metrics::Label> {
        labels
            .iter()
            .map(|(key, value)| metrics::Label::new(*key, value.clone()))
            .collect()
    }
}

impl MetricsSink for FacadeMetricsSink {
    fn increment_counter(&self, name: &'static str, labels: &[(&'static str, String)]) {
        metrics::counter!(name, Self::labels(labels)).increment(1);
    }

    fn record_duration(&self, name: &'static str, seconds: f64, labels: &[(&'static str, String)]) {
        metrics::histogram!(name, Self::labels(labels)).record(seconds);
    }

    fn start_span(&self, name: &'static str) -> tracing::Span {
        tracing::info_span!("workflow", operation = name)
    }
}

// ---------------------------------------------------------------------------
// Recording sink
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Recorded {
    counters: Vec<(String, Vec<(String, String)>)>,
    durations: Vec<(String, f64, Vec<(String, String)>)>,
}

/// Keeps every emission in memory. Meant for tests.
#[derive(Clone, Default)]
pub struct RecordingMetricsSink {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of increments recorded for `name`.
    pub fn counter_total(&self, name: &str) -> usize {
        let inner = self.inner.lock().expect("recording sink lock");
        inner.counters.iter().filter(|(n, _)| n == name).count()
    }

    /// Number of increments for `name` carrying `key=value`.
    pub fn counter_with_label(&self, name: &str, key: &str, value: &str) -> usize {
        let inner = self.inner.lock().expect("recording sink lock");
        inner
            .counters
            .iter()
            .filter(|(n, labels)| {
                n == name && labels.iter().any(|(k, v)| k == key && v == value)
            })
            .count()
    }

    /// All durations recorded for `name`.
    pub fn durations(&self, name: &str) -> Vec<f64> {
        let inner = self.inner.lock().expect("recording sink lock");
        inner
            .durations
            .iter()
            .filter(|(n, _, _)| n == name)
            .map(|(_, seconds, _)| *seconds)
            .collect()
    }
}

impl MetricsSink for RecordingMetricsSink {
    fn increment_counter(&self, name: &'static str, labels: &[(&'static str, String)]) {
        let labels = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let mut inner = self.inner.lock().expect("recording sink lock");
        inner.counters.push((name.to_string(), labels));
    }

    fn record_duration(&self, name: &'static str, seconds: f64, labels: &[(&'static str, String)]) {
        let labels = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let mut inner = self.inner.lock().expect("recording sink lock");
        inner.durations.push((name.to_string(), seconds, labels));
    }

    fn start_span(&self, _name: &'static str) -> tracing::Span {
        tracing::Span::none()
    }
}
