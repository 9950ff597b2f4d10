//! Core use-case services.
//!
//! # Responsibility
//! - Turn view notifications into committed session transitions.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod editor_service;
