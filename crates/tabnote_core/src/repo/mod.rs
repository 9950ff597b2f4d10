//! Persistence collaborators for editor sessions.
//!
//! # Responsibility
//! - Define the load/save contract the editor service persists through.
//! - Keep SQL and JSON encoding details out of the editing pipeline.
//!
//! # Invariants
//! - Saves store the whole session as one record (no partial updates).
//! - The UI-only delete-dialog flag is never written.

pub mod session_repo;
