// View model handed to presenters. Presenters redraw from a snapshot; they never
// mutate engine state directly.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::carousel::{SlideMotion, WindowState};
use crate::query::QueryStatus;
use crate::types::{Category, EntityId};

/// Which listing page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Movies,
    Tv,
    Search,
}

impl PageKind {
    /// Rows in display order.
    pub fn rows(&self) -> &'static [Category] {
        match self {
            PageKind::Movies => &[Category::NowPlaying, Category::TopRated, Category::Upcoming],
            PageKind::Tv => &[Category::AiringToday, Category::Popular, Category::TvTopRated],
            PageKind::Search => &[Category::Search],
        }
    }

    /// Listing whose first item fills the banner.
    pub fn hero_source(&self) -> Option<Category> {
        match self {
            PageKind::Movies => Some(Category::NowPlaying),
            PageKind::Tv => Some(Category::TvTopRated),
            PageKind::Search => None,
        }
    }

    /// Listing the detail overlay looks its entity up in.
    pub fn overlay_source(&self) -> Option<Category> {
        match self {
            PageKind::Movies => Some(Category::NowPlaying),
            PageKind::Tv => Some(Category::AiringToday),
            PageKind::Search => None,
        }
    }

    /// Listing whose first load shows the page-wide loader.
    pub fn loading_gate(&self) -> Category {
        match self {
            PageKind::Movies => Category::NowPlaying,
            PageKind::Tv => Category::TvTopRated,
            PageKind::Search => Category::Search,
        }
    }
}

/// Carousel tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub id: EntityId,
    pub title: String,
    pub image_url: String,
    /// Location the tile click navigates to.
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroView {
    pub id: EntityId,
    pub title: String,
    pub overview: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    pub category: Category,
    pub title: String,
    pub status: Option<QueryStatus>,
    pub error: Option<String>,
    pub window: WindowState,
    pub motion: Option<SlideMotion>,
    pub tiles: Vec<TileView>,
}

/// Resolved overlay content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub id: EntityId,
    pub title: String,
    pub overview: String,
    pub cover_url: String,
    pub genre_ids: Vec<u32>,
}

/// Overlay is open; `detail` stays empty until the list holds the entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayView {
    pub requested: Option<EntityId>,
    pub detail: Option<DetailView>,
    pub close_location: String,
}

/// Everything a presenter needs to draw one frame of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub page: PageKind,
    pub location: String,
    pub loading: bool,
    pub hero: Option<HeroView>,
    pub rows: Vec<RowView>,
    pub overlay: Option<OverlayView>,
}

/// Subscriber redrawn on every state change.
pub trait Presenter {
    fn present(&self, view: &PageView);
}

/// Fan-out to all subscribed presenters.
#[derive(Default, Clone)]
pub struct PresenterSet {
    presenters: Vec<Rc<dyn Presenter>>,
}

impl std::fmt::Debug for PresenterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenterSet")
            .field("presenters", &self.presenters.len())
            .finish()
    }
}

impl PresenterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, presenter: Rc<dyn Presenter>) {
        self.presenters.push(presenter);
    }

    pub fn len(&self) -> usize {
        self.presenters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presenters.is_empty()
    }

    pub fn publish(&self, view: &PageView) {
        for presenter in &self.presenters {
            presenter.present(view);
        }
    }
}
