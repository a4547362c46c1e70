use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, ordered set of Program id references. Playlists are a catalog
/// of catalogs: they hold ids only, never embedded Programs, and carry no
/// referential integrity with the Program catalog; consumers skip ids
/// that no longer resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub program_ids: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Display accent, opaque to the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Playlist {
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            program_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            color: None,
        }
    }

    pub fn contains(&self, program_id: &str) -> bool {
        self.program_ids.iter().any(|id| id == program_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
