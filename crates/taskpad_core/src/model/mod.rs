//! Domain model for the to-do list core.
//!
//! # Responsibility
//! - Define the canonical task record and the view filter.
//! - Keep the serialized shape aligned with the persisted JSON layout.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - A persisted task never carries an empty title.

pub mod task;
