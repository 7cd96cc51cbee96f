//! Password Generation and Strength Analysis Library
//!
//! Generates random and pronounceable passwords under a configurable
//! character-class policy, scores passwords against that policy, and
//! estimates entropy and offline crack time.
//!
//! # Architecture
//!
//! The core is a set of plain functions; callers own all state:
//!
//! ```text
//! random ─→ generator ─→ analysis
//!              ↑             ↑
//!            policy ─────────┘
//!
//! session (caller-owned policy + history) drives the flows
//! server (feature `server`) holds sessions per client
//! ```
//!
//! # Design Principles
//!
//! - **Cryptographic randomness only**: generators require a `CryptoRng`
//! - **No hidden state**: policies and histories are passed in by the caller
//! - **Never an empty alphabet**: disabled classes fall back to letters
//! - **Coarse estimates**: entropy is alphabet-derived, not content-derived
//!
//! # Example
//!
//! ```no_run
//! use passgen::{
//!     analysis,
//!     generator,
//!     policy::{ClassFlags, Policy},
//!     random::SecureRandom,
//! };
//!
//! let policy = Policy::default();
//! let mut rng = SecureRandom::from_os_entropy();
//!
//! let password = generator::generate_random(16, &ClassFlags::default(), &policy, &mut rng)
//!     .unwrap();
//! let result = analysis::analyze(&password, &policy);
//! let entropy = analysis::estimate(&password, &policy);
//!
//! println!("{} scored {}/5, {} bits", password, result.score, entropy.bits);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod generator;
pub mod metrics;
pub mod policy;
pub mod random;
#[cfg(feature = "server")]
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use analysis::{AnalysisResult, EntropyEstimate};
pub use config::FileConfig;
pub use generator::GeneratorError;
pub use policy::{ClassFlags, Policy, PolicyUpdate};
pub use random::{RandomSource, SecureRandom};
pub use session::{GenerateRequest, Session};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
