//! HTTP front end.
//!
//! A thin JSON layer over [`Session`](crate::session::Session) actions.
//! Sessions live in a bounded in-memory table and are addressed by the
//! `x-session-id` header; requests without a known id get a fresh
//! session whose id is echoed back.
//!
//! # Endpoints
//!
//! - `GET /policy`, `POST /policy` - Read or partially update the policy
//! - `POST /generate` - Generate, analyze and record a password
//! - `POST /analyze` - Analyze a password and suggest variations
//! - `POST /pronounceable` - Generate a pronounceable password
//! - `GET /history` - History and rotation reminder
//! - `POST /theme` - Toggle the theme preference
//! - `POST /download` - Password as a `password.txt` attachment
//! - `GET /metrics` - Prometheus metrics
//! - `GET /health` - Liveness check
//!
//! # Example
//!
//! ```no_run
//! use passgen::config::FileConfig;
//! use passgen::metrics::MetricsRegistry;
//! use passgen::server::{AppServer, ServerSettings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = MetricsRegistry::new().expect("Failed to create registry");
//!     let server = AppServer::new(ServerSettings::with_port(5000), FileConfig::default(), registry);
//!     server.run().await.expect("Server failed");
//! }
//! ```

mod app;
mod sessions;

pub use app::{router, AppServer, AppState, ServerError, ServerSettings, SESSION_HEADER};
pub use sessions::SessionStore;
