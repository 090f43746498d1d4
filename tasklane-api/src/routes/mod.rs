/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Welcome and health check endpoints
/// - `auth`: Authentication endpoints (register, login)
/// - `tasks`: Task CRUD endpoints

pub mod auth;
pub mod health;
pub mod tasks;
