//! Activity metrics.
//!
//! Counters are kept in a Prometheus registry. With the `server`
//! feature, the registry is served at `GET /metrics`.
//!
//! # Metrics Exposed
//!
//! - `passgen_generated_total` - Random passwords generated
//! - `passgen_pronounceable_total` - Pronounceable passwords generated
//! - `passgen_analyzed_total` - Passwords analyzed
//! - `passgen_variations_total` - Variations produced
//! - `passgen_policy_updates_total` - Policy updates
//! - `passgen_last_entropy_bits` - Entropy of the last generated password
//!
//! # Example
//!
//! ```no_run
//! use passgen::metrics::{MetricEvent, MetricsRegistry};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! registry.record(&MetricEvent::Generated { bits: 104.87 });
//! println!("{}", registry.encode().unwrap());
//! ```

mod collector;

pub use collector::{MetricEvent, MetricsError, MetricsRegistry};
