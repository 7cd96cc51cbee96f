//! Password policy model.
//!
//! Policies decide which character classes a generator may use and
//! which rules the analyzer enforces.

pub mod charset;
mod model;

pub use model::{
    fallback_alphabet, ClassFlags, Policy, PolicyError, PolicyUpdate, DEFAULT_MIN_LENGTH,
};
