//! Domain model for the plugin suite.
//!
//! # Responsibility
//! - Define the canonical task record shared by the board and its document
//!   serialization.
//! - Own creation-time validation and identifier generation.
//!
//! # Invariants
//! - Every task is identified by a stable opaque `TaskId`.
//! - Identifiers are assigned once at creation and never recomputed.

pub mod task;
