//! Domain model for the knowledge hub.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep derivation rules (notebook progress) next to the data they derive
//!   from.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Notebook progress/status are derived fields, recomputed on document
//!   mutation, never authored directly outside the explicit override path.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod conversation;
pub mod document;
pub mod notebook;
pub mod progress;
pub mod topic;
