pub mod builder;
pub mod entity;
pub mod invariants;

pub use builder::ProgramDraft;
pub use entity::{Episode, Program, ProgramStatus, ProgramType, Season};
pub use invariants::validate_program;
