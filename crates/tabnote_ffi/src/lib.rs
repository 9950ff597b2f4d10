//! Flutter-facing bridge over `tabnote_core`.

pub mod api;
