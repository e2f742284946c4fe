/// Domain models for taskdeck
///
/// This module contains the persistent record types shared between the
/// persistence adapters and the service layer.
///
/// # Models
///
/// - `user`: User accounts (username, password hash, salt)
/// - `task`: Tasks owned by a user, with a three-state status

pub mod task;
pub mod user;
