//! Application configuration.
//!
//! Values that would otherwise be process-wide constants (default
//! policy, history size, rotation period) are loaded here and handed to
//! sessions and the server at startup.

mod file;

pub use file::{ConfigError, FileConfig, GeneratorConfig, ServerConfig, SessionConfig};
