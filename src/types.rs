// Strong typing over strings. Newtypes for entity ids, typed catalog categories.
// See DESIGN.md: Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Catalog entity id. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(id: u64) -> Self {
        EntityId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(EntityId)
    }
}

/// One movie or TV show record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Movies carry `title`, TV shows carry `name`.
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// Release window reported by now-playing and upcoming listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub maximum: String,
    pub minimum: String,
}

/// One page of entities plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult {
    #[serde(rename = "results")]
    pub items: Vec<Entity>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,
}

impl ListResult {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Which half of the catalog a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

/// Catalog listing fetched by one query and rendered as one carousel row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NowPlaying,
    TopRated,
    Upcoming,
    AiringToday,
    Popular,
    TvTopRated,
    Search,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::NowPlaying,
        Category::TopRated,
        Category::Upcoming,
        Category::AiringToday,
        Category::Popular,
        Category::TvTopRated,
        Category::Search,
    ];

    pub fn media(&self) -> MediaKind {
        match self {
            Category::NowPlaying | Category::TopRated | Category::Upcoming | Category::Search => {
                MediaKind::Movie
            }
            Category::AiringToday | Category::Popular | Category::TvTopRated => MediaKind::Tv,
        }
    }

    /// Path below the API base, without leading slash.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Category::NowPlaying => "movie/now_playing",
            Category::TopRated => "movie/top_rated",
            Category::Upcoming => "movie/upcoming",
            Category::AiringToday => "tv/airing_today",
            Category::Popular => "tv/popular",
            Category::TvTopRated => "tv/top_rated",
            Category::Search => "search/movie",
        }
    }

    /// Row heading shown above the carousel.
    pub fn label(&self) -> &'static str {
        match self {
            Category::NowPlaying => "Now Playing",
            Category::TopRated | Category::TvTopRated => "Top Rated",
            Category::Upcoming => "Upcoming",
            Category::AiringToday => "Airing Today",
            Category::Popular => "Popular",
            Category::Search => "Searched",
        }
    }

    /// Row name used across the JS boundary.
    pub fn key(&self) -> &'static str {
        match self {
            Category::NowPlaying => "now_playing",
            Category::TopRated => "top_rated",
            Category::Upcoming => "upcoming",
            Category::AiringToday => "airing_today",
            Category::Popular => "popular",
            Category::TvTopRated => "tv_top_rated",
            Category::Search => "search",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| EngineError::UnknownRow(s.to_string()))
    }
}

/// Image rendition requested from the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    /// Carousel tiles.
    W500,
    /// Banner and overlay cover.
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

impl FromStr for ImageSize {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w500" => Ok(ImageSize::W500),
            "original" | "" => Ok(ImageSize::Original),
            other => Err(EngineError::InvalidConfig(format!("unknown image size {other}"))),
        }
    }
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Tiles per carousel page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Pixels subtracted from the viewport width to get slide travel.
    #[serde(default = "default_slide_inset")]
    pub slide_inset: f64,
    /// Row slide tween duration (milliseconds).
    #[serde(default = "default_slide_duration_ms")]
    pub slide_duration_ms: u32,
}

impl EngineConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        EngineConfig {
            api_key: api_key.into(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            page_size: default_page_size(),
            slide_inset: default_slide_inset(),
            slide_duration_ms: default_slide_duration_ms(),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.api_key.trim().is_empty() {
            return Err(EngineError::InvalidConfig("api_key is empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(EngineError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build `{image_base_url}/{size}/{path}`; empty path yields an empty string.
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        match path {
            Some(p) if !p.is_empty() => format!(
                "{}/{}/{}",
                self.image_base_url.trim_end_matches('/'),
                size.as_str(),
                p.trim_start_matches('/')
            ),
            _ => String::new(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_page_size() -> usize {
    6
}

fn default_slide_inset() -> f64 {
    35.0
}

fn default_slide_duration_ms() -> u32 {
    1_000
}
