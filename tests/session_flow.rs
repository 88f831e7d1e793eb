#![cfg(not(target_arch = "wasm32"))]

use std::cell::RefCell;
use std::rc::Rc;

use flix_core::{
    dispatch, CatalogClient, Category, EngineConfig, EntityId, PageKind, PageView, Presenter,
    PresenterSet, QueryStatus, Session, Settled,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Frames {
    views: RefCell<Vec<PageView>>,
}

impl Presenter for Frames {
    fn present(&self, view: &PageView) {
        self.views.borrow_mut().push(view.clone());
    }
}

fn listing(first_id: u64, count: u64) -> serde_json::Value {
    json!({
        "page": 1,
        "results": (first_id..first_id + count).map(|id| json!({
            "id": id,
            "title": format!("Movie {id}"),
            "overview": format!("About {id}"),
            "backdrop_path": format!("/{id}.jpg"),
            "genre_ids": [18]
        })).collect::<Vec<_>>(),
        "total_pages": 1,
        "total_results": count
    })
}

async fn mount(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/3/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> EngineConfig {
    let mut config = EngineConfig::new("k");
    config.base_url = format!("{}/3", server.uri());
    config
}

/// Drive one navigation the way the wasm facade does.
async fn navigate(
    session: &RefCell<Session>,
    presenters: &PresenterSet,
    client: &CatalogClient,
    location: &str,
) {
    let tickets = session.borrow_mut().navigate(location);
    presenters.publish(&session.borrow().view());
    dispatch(client, tickets, |ticket, result| {
        let settled = session.borrow_mut().settle(&ticket, result);
        if settled != Settled::Stale {
            presenters.publish(&session.borrow().view());
        }
    })
    .await;
}

#[tokio::test]
async fn movies_page_loads_and_opens_overlay() {
    let server = MockServer::start().await;
    mount(&server, "movie/now_playing", listing(100, 20)).await;
    mount(&server, "movie/top_rated", listing(200, 20)).await;
    mount(&server, "movie/upcoming", listing(300, 20)).await;

    let config = config_for(&server);
    let client = CatalogClient::new(&config);
    let session = RefCell::new(Session::new(config).unwrap());
    let frames = Rc::new(Frames::default());
    let mut presenters = PresenterSet::new();
    presenters.subscribe(frames.clone());

    navigate(&session, &presenters, &client, "/").await;

    {
        let views = frames.views.borrow();
        // One frame for the mount, one per settled row.
        assert_eq!(views.len(), 4);
        assert!(views[0].loading);
    }

    let view = session.borrow().view();
    assert_eq!(view.page, PageKind::Movies);
    assert!(!view.loading);
    assert_eq!(view.hero.as_ref().map(|h| h.id), Some(EntityId::new(100)));
    assert!(view
        .rows
        .iter()
        .all(|row| row.status == Some(QueryStatus::Ready) && row.tiles.len() == 6));

    navigate(&session, &presenters, &client, "/movies/104").await;
    let overlay = session.borrow().view().overlay.unwrap();
    assert_eq!(overlay.detail.map(|d| d.title), Some("Movie 104".to_string()));
    assert_eq!(overlay.close_location, "/");
}

#[tokio::test]
async fn failed_row_does_not_block_others() {
    let server = MockServer::start().await;
    mount(&server, "tv/airing_today", listing(100, 8)).await;
    mount(&server, "tv/top_rated", listing(300, 8)).await;
    Mock::given(method("GET"))
        .and(path("/3/tv/popular"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = CatalogClient::new(&config);
    let session = RefCell::new(Session::new(config).unwrap());

    navigate(&session, &PresenterSet::new(), &client, "/tv").await;

    let view = session.borrow().view();
    assert_eq!(view.page, PageKind::Tv);
    assert!(!view.loading);
    assert_eq!(view.hero.map(|h| h.id), Some(EntityId::new(300)));

    let popular = view
        .rows
        .iter()
        .find(|row| row.category == Category::Popular)
        .unwrap();
    assert_eq!(popular.status, Some(QueryStatus::Failed));
    assert!(popular.error.as_deref().unwrap().contains("500"));
    assert!(popular.tiles.is_empty());
}

#[tokio::test]
async fn search_row_drops_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "alien"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(1, 4)))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = CatalogClient::new(&config);
    let session = RefCell::new(Session::new(config).unwrap());

    navigate(&session, &PresenterSet::new(), &client, "/search?keyword=alien").await;

    let view = session.borrow().view();
    assert!(view.hero.is_none());
    let ids: Vec<u64> = view.rows[0].tiles.iter().map(|t| t.id.as_u64()).collect();
    assert_eq!(ids, vec![2, 3, 4]);
}

#[tokio::test]
async fn carousel_cycles_after_load() {
    let server = MockServer::start().await;
    mount(&server, "movie/now_playing", listing(1, 13)).await;
    mount(&server, "movie/top_rated", listing(100, 13)).await;
    mount(&server, "movie/upcoming", listing(200, 13)).await;

    let config = config_for(&server);
    let client = CatalogClient::new(&config);
    let session = RefCell::new(Session::new(config).unwrap());
    navigate(&session, &PresenterSet::new(), &client, "/").await;

    let mut session = session.into_inner();
    assert!(session.advance(Category::NowPlaying, 1000.0).unwrap().is_some());
    session.complete_transition(Category::NowPlaying).unwrap();
    assert_eq!(session.view().rows[0].window.page_index, 1);

    assert!(session.advance(Category::NowPlaying, 1000.0).unwrap().is_some());
    session.complete_transition(Category::NowPlaying).unwrap();
    assert_eq!(session.view().rows[0].window.page_index, 0);
}
