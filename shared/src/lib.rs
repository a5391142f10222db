//! Shared utilities for the blog backend services

pub mod database;
pub mod observability;

// Re-export the pieces every service binary touches at startup
pub use database::{create_connection_pool, test_connection, DatabaseConfig, DatabaseError};
pub use observability::{init_logging, LogConfig, LogFormat, LogLevel};
