use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry: one movie or one series.
/// This is the root entity of the catalog; series carry their seasons inline.
///
/// Field names serialize in camelCase so the persisted layout and the
/// backup interchange format stay byte-compatible with existing catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Opaque immutable identifier. Generated ids are UUIDs, but imported
    /// catalogs may carry any scheme (e.g. epoch-millis tokens).
    pub id: String,

    pub title: String,

    /// Poster image URL. The builder substitutes a placeholder when the
    /// input form left it empty; consumers still handle broken URLs.
    pub poster: String,

    /// Conventionally 1-10. Not enforced as an invariant.
    pub rating: f64,

    /// Legacy display label ("Movie"/"Series" in older catalogs). `kind` is
    /// authoritative for all behavior; this is carried for round-tripping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-form genre label. The set of distinct values across the catalog
    /// drives the genre filter.
    pub genre: String,

    pub year: i32,

    #[serde(default)]
    pub is_favorite: bool,

    #[serde(default)]
    pub description: String,

    /// Set at creation, immutable thereafter.
    pub date_added: DateTime<Utc>,

    /// Primary external/video URL.
    #[serde(default)]
    pub link: String,

    /// Explicit video URL, preferred over `link` for playback when both set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Watch completion, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,

    /// Discriminates whether the series-only fields below are meaningful.
    #[serde(rename = "type")]
    pub kind: ProgramType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<Season>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_seasons: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProgramStatus>,

    /// At most one Program across the whole catalog carries `Some(true)`;
    /// enforced by the set-featured operation, not by construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// One season of a series-type Program. Episode insertion order is display
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: String,

    /// Positive, conventionally increasing; uniqueness is not required.
    pub season_number: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub episodes: Vec<Episode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    pub year: i32,
}

/// A leaf playable unit, owned by one Season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Minutes, > 0 when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default)]
    pub watched: bool,

    /// Calendar date string, carried verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramType {
    Movie,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramStatus {
    Ongoing,
    Completed,
    Cancelled,
}

impl Program {
    pub fn is_series(&self) -> bool {
        self.kind == ProgramType::Series
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// URL to hand to the player: the explicit video URL when set,
    /// otherwise the primary link. `None` when neither is playable.
    pub fn playback_url(&self) -> Option<&str> {
        match self.video_url.as_deref() {
            Some(url) if !url.is_empty() => Some(url),
            _ if !self.link.is_empty() => Some(self.link.as_str()),
            _ => None,
        }
    }
}

impl Episode {
    /// An episode is playable when it carries a video URL or a link.
    pub fn playback_url(&self) -> Option<&str> {
        match self.video_url.as_deref() {
            Some(url) if !url.is_empty() => Some(url),
            _ => self.link.as_deref().filter(|l| !l.is_empty()),
        }
    }
}

impl std::fmt::Display for ProgramType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramType::Movie => write!(f, "movie"),
            ProgramType::Series => write!(f, "series"),
        }
    }
}

impl std::fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramStatus::Ongoing => write!(f, "ongoing"),
            ProgramStatus::Completed => write!(f, "completed"),
            ProgramStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}
