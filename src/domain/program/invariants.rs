use super::entity::{Program, ProgramType};
use crate::domain::{DomainError, DomainResult};

/// Validates all Program invariants.
///
/// The entity is a plain serializable struct, so nothing here is guaranteed
/// by construction; import in particular can produce any shape that parses.
/// Callers that care (the builder, tests) run this explicitly.
pub fn validate_program(program: &Program) -> DomainResult<()> {
    validate_identity(program)?;
    validate_title(&program.title)?;
    validate_kind_consistency(program)?;
    validate_progress(program)?;
    validate_seasons(program)?;
    Ok(())
}

fn validate_identity(program: &Program) -> DomainResult<()> {
    if program.id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Program id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Program title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// `kind` is authoritative: a movie must not carry series-only fields.
/// The legacy `category` label is display-only and never consulted here.
fn validate_kind_consistency(program: &Program) -> DomainResult<()> {
    if program.kind == ProgramType::Movie {
        if program.seasons.is_some()
            || program.total_seasons.is_some()
            || program.total_episodes.is_some()
            || program.status.is_some()
        {
            return Err(DomainError::InvariantViolation(format!(
                "Program '{}' is a movie but carries series fields",
                program.title
            )));
        }
    }
    Ok(())
}

fn validate_progress(program: &Program) -> DomainResult<()> {
    if let Some(progress) = program.progress {
        if !(0.0..=100.0).contains(&progress) {
            return Err(DomainError::InvariantViolation(format!(
                "Progress {} is outside 0-100",
                progress
            )));
        }
    }
    Ok(())
}

fn validate_seasons(program: &Program) -> DomainResult<()> {
    let Some(seasons) = &program.seasons else {
        return Ok(());
    };
    for season in seasons {
        if season.season_number == 0 {
            return Err(DomainError::InvariantViolation(format!(
                "Season '{}' has a non-positive season number",
                season.id
            )));
        }
        for episode in &season.episodes {
            if episode.duration == Some(0) {
                return Err(DomainError::InvariantViolation(format!(
                    "Episode '{}' has a zero duration",
                    episode.id
                )));
            }
        }
    }
    Ok(())
}

/// Invariants that must hold for the Program domain:
///
/// 1. Identity is an opaque non-empty string and never changes
/// 2. Title cannot be empty
/// 3. `type` discriminates the series-only fields; a movie carries none
/// 4. `category` is a legacy display label and never drives behavior
/// 5. Progress, when present, lies within 0-100
/// 6. Season numbers are positive; episode durations are positive
/// 7. `dateAdded` is set at creation and never changes
/// 8. At most one Program is featured (enforced by the catalog store)
