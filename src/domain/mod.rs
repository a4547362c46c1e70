// src/domain/mod.rs
//
// Domain root. Declares all domain modules and re-exports their public API;
// everything else imports from `crate::domain::*`.

pub mod playlist;
pub mod program;

pub use playlist::Playlist;
pub use program::{
    validate_program, Episode, Program, ProgramDraft, ProgramStatus, ProgramType, Season,
};

use thiserror::Error;

/// Domain-level errors. These represent violations of business rules and
/// invariants, not infrastructure failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
