// src/player/resolver.rs
//
// Video source resolution.
//
// Maps a raw URL string onto one of four mutually exclusive playback
// strategies and extracts the provider identifier needed to build an
// embed. Pure classification: same input, same result, no I/O.
//
// Provider markers are checked before the generic fallback, first match
// wins. A YouTube-looking URL that yields no 11-character video id is
// explicitly NOT YouTube: it falls through rather than producing a
// silently broken embed.

use regex::Regex;

use crate::error::{AppError, AppResult};

/// A classified playback strategy with the identifiers an embed needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    YouTube {
        video_id: String,
    },
    /// Host matched; the file id may still be absent, in which case
    /// building an embed is an error rather than a crash.
    GoogleDrive {
        file_id: Option<String>,
    },
    /// The raw URL is itself the embeddable resource.
    ArchiveOrg {
        url: String,
    },
    /// A progressive file the browser can play natively.
    Direct {
        url: String,
    },
}

impl VideoSource {
    pub fn strategy(&self) -> &'static str {
        match self {
            VideoSource::YouTube { .. } => "youtube",
            VideoSource::GoogleDrive { .. } => "google-drive",
            VideoSource::ArchiveOrg { .. } => "archive",
            VideoSource::Direct { .. } => "direct",
        }
    }

    /// Drive and Archive render through an iframe with no readiness
    /// callback; their loading state is resolved by a load event racing a
    /// timeout.
    pub fn uses_provider_iframe(&self) -> bool {
        matches!(
            self,
            VideoSource::GoogleDrive { .. } | VideoSource::ArchiveOrg { .. }
        )
    }

    /// The URL to hand to the embed element.
    pub fn embed_url(&self) -> AppResult<String> {
        match self {
            VideoSource::YouTube { video_id } => Ok(format!(
                "https://www.youtube.com/embed/{}?autoplay=1&rel=0&modestbranding=1&controls=1&showinfo=0&fs=1&iv_load_policy=3",
                video_id
            )),
            VideoSource::GoogleDrive { file_id: Some(id) } => {
                Ok(format!("https://drive.google.com/file/d/{}/preview", id))
            }
            VideoSource::GoogleDrive { file_id: None } => Err(AppError::Other(
                "Google Drive URL carries no recognizable file id".to_string(),
            )),
            VideoSource::ArchiveOrg { url } => Ok(url.clone()),
            VideoSource::Direct { url } => Ok(url.clone()),
        }
    }
}

/// Compiled classification rules.
pub struct SourceResolver {
    youtube_id: Regex,
    drive_file_id: Regex,
}

impl SourceResolver {
    pub fn new() -> Self {
        Self {
            // The common YouTube URL forms: watch?v=, youtu.be/, embed/,
            // v/, u/<char>/, and a trailing &v= parameter.
            youtube_id: Regex::new(r"(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)")
                .unwrap(),
            drive_file_id: Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").unwrap(),
        }
    }

    /// Classify a raw URL. First match wins, in provider order; anything
    /// unrecognized is a direct media URL.
    pub fn classify(&self, url: &str) -> VideoSource {
        if url.contains("youtube.com") || url.contains("youtu.be") {
            if let Some(video_id) = self.youtube_video_id(url) {
                return VideoSource::YouTube { video_id };
            }
            // Host looked like YouTube but no 11-character id was found:
            // fall through instead of misclassifying.
        }

        if url.contains("drive.google.com") {
            return VideoSource::GoogleDrive {
                file_id: self.drive_file_id(url),
            };
        }

        if url.contains("archive.org") {
            return VideoSource::ArchiveOrg {
                url: url.to_string(),
            };
        }

        VideoSource::Direct {
            url: url.to_string(),
        }
    }

    /// The 11-character video id, or `None` when no marker yields one.
    /// The last marker in the URL wins, so a `&v=` parameter overrides
    /// whatever came earlier in the path.
    pub fn youtube_video_id(&self, url: &str) -> Option<String> {
        let captures = self.youtube_id.captures_iter(url).last()?;
        let candidate = captures.get(2)?.as_str();
        if candidate.chars().count() == 11 {
            Some(candidate.to_string())
        } else {
            None
        }
    }

    pub fn drive_file_id(&self, url: &str) -> Option<String> {
        self.drive_file_id
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new()
    }
}
