// Explicit application state: route, cached queries, and one carousel per row.
// All mutation goes through Session; presenters only ever see PageView snapshots.
// See DESIGN.md: Session

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::carousel::{self, Carousel, SlideMotion};
use crate::error::{CatalogError, EngineError};
use crate::query::{QueryStore, QueryTicket, Settled};
use crate::resolver::resolve;
use crate::route::Route;
use crate::types::{Category, EngineConfig, ImageSize, ListResult};
use crate::view::{DetailView, HeroView, OverlayView, PageKind, PageView, RowView, TileView};

/// Page instance currently mounted; remounting refetches and resets carousels.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Mounted {
    page: PageKind,
    keyword: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    route: Route,
    mounted: Option<Mounted>,
    queries: QueryStore,
    carousels: BTreeMap<Category, Carousel>,
}

impl Session {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Session {
            config,
            route: Route::default(),
            mounted: None,
            queries: QueryStore::new(),
            carousels: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn queries(&self) -> &QueryStore {
        &self.queries
    }

    pub fn page(&self) -> PageKind {
        page_of(&self.route)
    }

    /// Switch to `location` and return the fetches the page now needs.
    ///
    /// Opening or closing an overlay on the mounted page fetches nothing.
    pub fn navigate(&mut self, location: &str) -> Vec<QueryTicket> {
        self.route = Route::parse(location);
        let next = Mounted {
            page: page_of(&self.route),
            keyword: match &self.route {
                Route::Search { keyword } => Some(keyword.clone()),
                _ => None,
            },
        };

        if self.mounted.as_ref() == Some(&next) {
            debug!(location, "route changed within mounted page");
            return Vec::new();
        }

        info!(location, page = ?next.page, "mounting page");
        let tickets: Vec<QueryTicket> = next
            .page
            .rows()
            .iter()
            .map(|&category| {
                self.carousels.entry(category).or_default().reset();
                let keyword = (category == Category::Search).then(|| next.keyword.clone()).flatten();
                self.queries.begin(category, keyword)
            })
            .collect();
        self.mounted = Some(next);
        tickets
    }

    /// Store a fetch result. A replaced list puts its carousel back on page 0.
    pub fn settle(&mut self, ticket: &QueryTicket, result: Result<ListResult, CatalogError>) -> Settled {
        let settled = self.queries.settle(ticket, result);
        if settled == Settled::Replaced {
            if let Some(carousel) = self.carousels.get_mut(&ticket.category) {
                carousel.reset();
            }
        }
        settled
    }

    /// Slide `category`'s row to its next page.
    ///
    /// `viewport_width` is read per call so a resize changes the next slide's travel.
    pub fn advance(&mut self, category: Category, viewport_width: f64) -> Result<Option<SlideMotion>, EngineError> {
        self.ensure_on_page(category)?;
        let Some(item_count) = self.queries.data(category).map(ListResult::item_count) else {
            return Ok(None);
        };

        let config = &self.config;
        let motion = self.carousels.entry(category).or_default().advance(
            item_count,
            config.page_size,
            viewport_width,
            config.slide_inset,
            config.slide_duration_ms,
        );
        debug!(%category, ?motion, "carousel advance");
        Ok(motion)
    }

    /// The row's exit animation finished.
    pub fn complete_transition(&mut self, category: Category) -> Result<(), EngineError> {
        self.ensure_on_page(category)?;
        self.carousels.entry(category).or_default().complete_transition();
        Ok(())
    }

    pub fn view(&self) -> PageView {
        let page = self.page();

        let hero = page
            .hero_source()
            .and_then(|source| self.queries.data(source))
            .and_then(|list| carousel::hero(&list.items))
            .map(|entity| HeroView {
                id: entity.id,
                title: entity.title.clone(),
                overview: entity.overview.clone(),
                image_url: self
                    .config
                    .image_url(entity.backdrop_path.as_deref(), ImageSize::Original),
            });

        let rows = page.rows().iter().map(|&category| self.row_view(category)).collect();

        let overlay = self.route.detail().map(|detail| {
            let cached = page.overlay_source().and_then(|source| self.queries.data(source));
            OverlayView {
                requested: detail.id,
                detail: resolve(detail.id, cached).map(|entity| DetailView {
                    id: entity.id,
                    title: entity.title.clone(),
                    overview: entity.overview.clone(),
                    cover_url: self
                        .config
                        .image_url(entity.backdrop_path.as_deref(), ImageSize::Original),
                    genre_ids: entity.genre_ids.clone(),
                }),
                close_location: self.route.close_overlay().to_location(),
            }
        });

        PageView {
            page,
            location: self.route.to_location(),
            loading: self
                .queries
                .get(page.loading_gate())
                .map_or(true, |state| state.is_loading()),
            hero,
            rows,
            overlay,
        }
    }

    fn row_view(&self, category: Category) -> RowView {
        let state = self.queries.get(category);
        let carousel = self.carousels.get(&category).cloned().unwrap_or_default();
        let items = self
            .queries
            .data(category)
            .map(|list| list.items.as_slice())
            .unwrap_or_default();

        RowView {
            category,
            title: category.label().to_string(),
            status: state.map(|s| s.status),
            error: state.and_then(|s| s.error.clone()),
            window: carousel.state(),
            motion: carousel.motion(),
            tiles: carousel
                .visible(items, self.config.page_size)
                .iter()
                .map(|entity| TileView {
                    id: entity.id,
                    title: entity.title.clone(),
                    image_url: self
                        .config
                        .image_url(entity.backdrop_path.as_deref(), ImageSize::W500),
                    location: Route::detail_for(entity.id).to_location(),
                })
                .collect(),
        }
    }

    fn ensure_on_page(&self, category: Category) -> Result<(), EngineError> {
        if self.page().rows().contains(&category) {
            Ok(())
        } else {
            Err(EngineError::UnknownRow(category.key().to_string()))
        }
    }
}

fn page_of(route: &Route) -> PageKind {
    match route {
        Route::Movies { .. } => PageKind::Movies,
        Route::Tv { .. } => PageKind::Tv,
        Route::Search { .. } => PageKind::Search,
    }
}
