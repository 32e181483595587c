//! Multi-tenant pet care management API.
//!
//! Owners register pets and book appointments; businesses publish service
//! catalogs, confirm bookings and record completed procedures. Session
//! tokens authenticate both principal kinds, and ownership predicates
//! guard every principal-scoped route.

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod server;
pub mod services;
pub mod state;
pub mod store;

pub use config::{CliArgs, ServerConfig};
pub use error::{ApiError, RuleViolation};
pub use logging::{LogFormat, init_logging};
pub use server::{build_router, run_server};
pub use state::AppState;
