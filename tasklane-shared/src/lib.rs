//! # Tasklane Shared Library
//!
//! This crate contains the types and business logic shared by the Tasklane
//! API server: database models, authentication primitives, and the
//! connection-pool lifecycle.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, tasks) and their CRUD operations
//! - `auth`: Password hashing, token issue/verify, and the ownership guard
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Tasklane shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
