// Navigable locations: listing pages, detail overlays, and search keywords.
// The host owns history; the engine only parses and renders locations.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Overlay request embedded in a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    /// `None` when the path segment is not an integer: the overlay opens empty.
    pub id: Option<EntityId>,
}

/// Parsed location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Route {
    Movies { detail: Option<Detail> },
    Tv { detail: Option<Detail> },
    Search { keyword: String },
}

impl Default for Route {
    fn default() -> Self {
        Route::Movies { detail: None }
    }
}

impl Route {
    /// Parse `path[?query]`. Unknown paths fall back to the movies page.
    pub fn parse(location: &str) -> Self {
        let Ok(url) = Url::parse(ORIGIN).and_then(|origin| origin.join(location)) else {
            return Route::default();
        };
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["search", ..] => Route::Search {
                keyword: url
                    .query_pairs()
                    .find(|(key, _)| key == "keyword")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default(),
            },
            ["tv", ..] => Route::Tv { detail: None },
            ["tvshows", id, ..] => Route::Tv {
                detail: Some(Detail { id: id.parse().ok() }),
            },
            ["movies", id, ..] => Route::Movies {
                detail: Some(Detail { id: id.parse().ok() }),
            },
            _ => Route::Movies { detail: None },
        }
    }

    /// Canonical location for this route.
    pub fn to_location(&self) -> String {
        match self {
            Route::Movies { detail: None } => "/".to_string(),
            Route::Movies { detail: Some(d) } => format!("/movies/{}", id_segment(d)),
            Route::Tv { detail: None } => "/tv".to_string(),
            Route::Tv { detail: Some(d) } => format!("/tvshows/{}", id_segment(d)),
            Route::Search { keyword } => {
                let url = Url::parse_with_params(&format!("{ORIGIN}search"), &[("keyword", keyword)]);
                match url {
                    Ok(url) => format!("{}?{}", url.path(), url.query().unwrap_or_default()),
                    Err(_) => "/search".to_string(),
                }
            }
        }
    }

    /// Location a tile click navigates to. Every listing opens the movie overlay.
    pub fn detail_for(id: EntityId) -> Route {
        Route::Movies {
            detail: Some(Detail { id: Some(id) }),
        }
    }

    /// Location after dismissing the overlay.
    pub fn close_overlay(&self) -> Route {
        Route::Movies { detail: None }
    }

    pub fn detail(&self) -> Option<Detail> {
        match self {
            Route::Movies { detail } | Route::Tv { detail } => *detail,
            Route::Search { .. } => None,
        }
    }
}

// Locations are relative; they are resolved against a fixed origin.
const ORIGIN: &str = "http://localhost/";

fn id_segment(detail: &Detail) -> String {
    detail.id.map(|id| id.to_string()).unwrap_or_default()
}
