/// Authentication and authorization utilities
///
/// This module provides the security primitives for Tasklane:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Signed identity token issue and validation
/// - [`guard`]: Bearer-token extraction and per-user ownership enforcement
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Tokens**: HMAC-signed with configurable expiration (default 30 min)
/// - **Constant-time Comparison**: Password verification goes through the
///   hash function's own verify routine

pub mod guard;
pub mod jwt;
pub mod password;
