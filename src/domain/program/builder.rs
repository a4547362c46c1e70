// src/domain/program/builder.rs
//
// Normalizes the loosely-typed input of the add/edit dialog into a fully
// formed Program. Create mode assigns identity and timestamp and expands a
// series draft into its first season/episode; edit mode merges the form
// over an existing entity, preserving identity, timestamps, and everything
// the form does not cover.

use chrono::{Datelike, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::entity::{Episode, Program, ProgramStatus, ProgramType, Season};
use super::invariants::validate_program;
use crate::domain::DomainResult;

/// Shown wherever a program has no usable poster URL.
pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/300x450/1a1a1a/666666?text=No+Poster";

const DEFAULT_GENRE: &str = "Unknown";

/// Partial, form-shaped program input. Every field is optional in spirit;
/// empty strings mean "not provided".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramDraft {
    pub title: String,
    pub poster_url: String,
    pub category: Option<String>,
    pub genre: String,
    pub year: i32,
    pub rating: f64,
    pub description: String,
    pub link: String,
    pub video_url: String,
    #[serde(rename = "type")]
    pub kind: Option<ProgramType>,
    // Series-only form fields, used when expanding the first season
    pub season_number: u32,
    pub episode_number: u32,
    pub episode_title: String,
    pub episode_duration: Option<u32>,
    pub air_date: String,
}

impl Default for ProgramDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            poster_url: String::new(),
            category: None,
            genre: String::new(),
            year: Utc::now().year(),
            rating: 8.0,
            description: String::new(),
            link: String::new(),
            video_url: String::new(),
            kind: None,
            season_number: 1,
            episode_number: 1,
            episode_title: String::new(),
            episode_duration: Some(45),
            air_date: String::new(),
        }
    }
}

fn opt(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ProgramDraft {
    fn kind(&self) -> ProgramType {
        self.kind.unwrap_or(ProgramType::Movie)
    }

    fn poster(&self) -> String {
        if self.poster_url.trim().is_empty() {
            PLACEHOLDER_POSTER.to_string()
        } else {
            self.poster_url.clone()
        }
    }

    fn genre(&self) -> String {
        if self.genre.trim().is_empty() {
            DEFAULT_GENRE.to_string()
        } else {
            self.genre.clone()
        }
    }

    /// Create mode: produce a new Program with generated identity and
    /// creation timestamp. A series draft gets its first season and episode
    /// attached from the form's episode fields.
    pub fn build(self) -> DomainResult<Program> {
        let kind = self.kind();
        let mut program = Program {
            id: Uuid::new_v4().to_string(),
            title: self.title.clone(),
            poster: self.poster(),
            rating: self.rating,
            category: self.category.clone(),
            genre: self.genre(),
            year: self.year,
            is_favorite: false,
            description: self.description.clone(),
            date_added: Utc::now(),
            link: self.link.clone(),
            video_url: opt(self.video_url.clone()),
            progress: None,
            kind,
            seasons: None,
            total_seasons: None,
            total_episodes: None,
            status: None,
            featured: None,
        };

        if kind == ProgramType::Series {
            program.seasons = Some(vec![self.first_season()]);
            program.total_seasons = Some(1);
            program.total_episodes = Some(1);
            program.status = Some(ProgramStatus::Ongoing);
        }

        validate_program(&program)?;
        Ok(program)
    }

    /// Edit mode: merge the form over an existing Program. Identity,
    /// creation timestamp, favorite flag, featured flag, progress, and
    /// seasons are preserved; seasons are edited through whole-Program
    /// updates elsewhere.
    pub fn apply_to(self, existing: &Program) -> DomainResult<Program> {
        let mut program = existing.clone();
        program.title = self.title.clone();
        program.poster = self.poster();
        if self.category.is_some() {
            program.category = self.category.clone();
        }
        program.genre = self.genre();
        program.year = self.year;
        program.rating = self.rating;
        program.description = self.description.clone();
        program.link = self.link.clone();
        program.video_url = opt(self.video_url.clone());
        program.kind = self.kind();
        if program.kind == ProgramType::Movie {
            program.seasons = None;
            program.total_seasons = None;
            program.total_episodes = None;
            program.status = None;
        }

        validate_program(&program)?;
        Ok(program)
    }

    fn first_season(&self) -> Season {
        let episode = Episode {
            id: Uuid::new_v4().to_string(),
            title: if self.episode_title.trim().is_empty() {
                format!("Episode {}", self.episode_number)
            } else {
                self.episode_title.clone()
            },
            description: opt(self.description.clone()),
            duration: self.episode_duration,
            video_url: opt(self.video_url.clone()),
            link: opt(self.link.clone()),
            watched: false,
            air_date: opt(self.air_date.clone()),
        };

        Season {
            id: Uuid::new_v4().to_string(),
            season_number: self.season_number,
            title: Some(format!("Season {}", self.season_number)),
            description: None,
            episodes: vec![episode],
            poster: None,
            year: self.year,
        }
    }
}
