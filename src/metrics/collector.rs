//! Metrics collection and registry.

use prometheus::{Encoder, Gauge, IntCounter, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registering or encoding a metric failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Something worth counting happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricEvent {
    /// A random password was generated with this many entropy bits.
    Generated {
        /// Estimated entropy of the password.
        bits: f64,
    },
    /// A pronounceable password was generated.
    Pronounceable,
    /// A password was analyzed and this many variations were produced.
    Analyzed {
        /// Variations returned with the analysis.
        variations: usize,
    },
    /// A session policy was changed.
    PolicyUpdated,
}

/// Prometheus metrics registry for generator activity.
pub struct MetricsRegistry {
    registry: Registry,

    generated_total: IntCounter,
    pronounceable_total: IntCounter,
    analyzed_total: IntCounter,
    variations_total: IntCounter,
    policy_updates_total: IntCounter,
    last_entropy_bits: Gauge,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let generated_total = IntCounter::new(
            "passgen_generated_total",
            "Total random passwords generated",
        )?;
        let pronounceable_total = IntCounter::new(
            "passgen_pronounceable_total",
            "Total pronounceable passwords generated",
        )?;
        let analyzed_total =
            IntCounter::new("passgen_analyzed_total", "Total passwords analyzed")?;
        let variations_total = IntCounter::new(
            "passgen_variations_total",
            "Total password variations produced",
        )?;
        let policy_updates_total = IntCounter::new(
            "passgen_policy_updates_total",
            "Total session policy updates",
        )?;
        let last_entropy_bits = Gauge::new(
            "passgen_last_entropy_bits",
            "Estimated entropy bits of the most recent generated password",
        )?;

        registry.register(Box::new(generated_total.clone()))?;
        registry.register(Box::new(pronounceable_total.clone()))?;
        registry.register(Box::new(analyzed_total.clone()))?;
        registry.register(Box::new(variations_total.clone()))?;
        registry.register(Box::new(policy_updates_total.clone()))?;
        registry.register(Box::new(last_entropy_bits.clone()))?;

        Ok(Self {
            registry,
            generated_total,
            pronounceable_total,
            analyzed_total,
            variations_total,
            policy_updates_total,
            last_entropy_bits,
        })
    }

    /// Updates the metrics for one event.
    pub fn record(&self, event: &MetricEvent) {
        match *event {
            MetricEvent::Generated { bits } => {
                self.generated_total.inc();
                self.last_entropy_bits.set(bits);
            }
            MetricEvent::Pronounceable => self.pronounceable_total.inc(),
            MetricEvent::Analyzed { variations } => {
                self.analyzed_total.inc();
                self.variations_total.inc_by(variations as u64);
            }
            MetricEvent::PolicyUpdated => self.policy_updates_total.inc(),
        }
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
