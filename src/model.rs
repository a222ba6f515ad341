use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Favorited photos keyed by id, holding the full record snapshot taken at
/// favoriting time. Every key equals the `id` of its value.
pub type FavoritesMap = BTreeMap<String, PhotoRecord>;

/// One record of the picsum `/v2/list` response. Field names mirror the wire
/// format exactly; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    pub author: String,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub download_url: String,
}

impl PhotoRecord {
    /// Pixel area used for size-bucket classification.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Download URL constrained to the requested dimensions. Grid cells and
    /// carousel slides request scaled variants rather than the original.
    pub fn download_url_sized(&self, width: u32, height: u32) -> String {
        format!("{}?w={width}&h={height}", self.download_url)
    }
}

/// Area below which a photo counts as small.
pub const SMALL_MAX_AREA: u64 = 200_000;
/// Area below which a photo counts as medium; at or above it is large.
pub const MEDIUM_MAX_AREA: u64 = 600_000;

/// Coarse size filter over `width * height`. Buckets are closed-open
/// intervals except `Large`, which is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeBucket {
    #[default]
    All,
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub const ALL: &'static [Self] = &[Self::All, Self::Small, Self::Medium, Self::Large];
    const NAMES: &'static [&'static str] = &["all", "small", "medium", "large"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Whether a photo with the given pixel area passes this filter.
    pub fn admits(&self, area: u64) -> bool {
        match self {
            Self::All => true,
            Self::Small => area < SMALL_MAX_AREA,
            Self::Medium => (SMALL_MAX_AREA..MEDIUM_MAX_AREA).contains(&area),
            Self::Large => area >= MEDIUM_MAX_AREA,
        }
    }

    /// The bucket a photo of the given area belongs to. Never `All`.
    pub fn classify(area: u64) -> Self {
        if area < SMALL_MAX_AREA {
            Self::Small
        } else if area < MEDIUM_MAX_AREA {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeBucket {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        for bucket in Self::ALL {
            if raw == bucket.as_str() {
                return Ok(*bucket);
            }
        }
        Err(format!(
            "unknown size bucket '{}', expected one of: {}",
            raw,
            Self::NAMES.join(", ")
        ))
    }
}

/// The three client-side filters. They compose by logical AND; each narrows
/// the fetched list independently of the others.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub search_text: String,
    pub size_bucket: SizeBucket,
    pub favorites_only: bool,
}

impl FilterState {
    /// Case-insensitive substring match against the author. Empty search
    /// text matches everything.
    pub fn matches_author(&self, author: &str) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        author
            .to_lowercase()
            .contains(&self.search_text.to_lowercase())
    }
}
