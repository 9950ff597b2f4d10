//! Pure reducers over the editor session state.
//!
//! # Responsibility
//! - Compute the next session for create/delete/update/tab-switch.
//! - Rebuild and repair sessions restored from persistence.
//!
//! # Invariants
//! - Reducers never mutate their input; they return a complete next state.
//! - Failing reducers return an error without producing partial state.

pub mod note_store;
