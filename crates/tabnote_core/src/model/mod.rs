//! Session data model for the tabbed note editor.
//!
//! # Responsibility
//! - Define the note/route/selection shapes shared by the editing pipeline.
//! - Own the serialized wire shape of the whole editor session.
//!
//! # Invariants
//! - Every route key has a matching note entry.
//! - Note keys are allocated monotonically and never reused in a session.

pub mod note;
pub mod selection;
