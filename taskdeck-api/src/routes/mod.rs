/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (signup, signin)
/// - `tasks`: Owner-scoped task CRUD endpoints

pub mod auth;
pub mod health;
pub mod tasks;
