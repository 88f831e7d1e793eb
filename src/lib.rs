// flix_core: Flix Rust/WASM Engine
// All state, fetching, and carousel arithmetic live here; JS renders and animates.

mod carousel;
mod client;
mod error;
mod query;
mod resolver;
mod route;
mod session;
mod types;
mod view;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub use carousel::{
    advance, complete_transition, hero, max_page_index, window_slice, Carousel, SlideMotion,
    WindowState,
};
pub use client::CatalogClient;
pub use error::{CatalogError, EngineError};
pub use query::{dispatch, QueryState, QueryStatus, QueryStore, QueryTicket, Settled};
pub use resolver::resolve;
pub use route::{Detail, Route};
pub use session::Session;
pub use types::*;
pub use view::{
    DetailView, HeroView, OverlayView, PageKind, PageView, Presenter, PresenterSet, RowView,
    TileView,
};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Presenter backed by a JS callback receiving the page view as JSON.
struct JsPresenter {
    callback: js_sys::Function,
}

impl Presenter for JsPresenter {
    fn present(&self, view: &PageView) {
        let json = match serde_json::to_string(view) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize page view");
                return;
            }
        };
        if let Err(e) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            warn!(error = ?e, "presenter callback threw");
        }
    }
}

/// Snapshot the session, then notify presenters with no borrow held.
fn publish(session: &RefCell<Session>, presenters: &RefCell<PresenterSet>) {
    let view = session.borrow().view();
    let presenters = presenters.borrow().clone();
    presenters.publish(&view);
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Main engine interface exposed to JavaScript.
#[wasm_bindgen]
pub struct Engine {
    session: Rc<RefCell<Session>>,
    presenters: Rc<RefCell<PresenterSet>>,
    client: CatalogClient,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Engine, JsValue> {
        let config: EngineConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        let client = CatalogClient::new(&config);
        let session = Session::new(config).map_err(to_js)?;
        info!("engine created");

        Ok(Engine {
            session: Rc::new(RefCell::new(session)),
            presenters: Rc::new(RefCell::new(PresenterSet::new())),
            client,
        })
    }

    /// Register a callback invoked with the page view JSON after every state change.
    pub fn subscribe(&self, callback: js_sys::Function) {
        self.presenters
            .borrow_mut()
            .subscribe(Rc::new(JsPresenter { callback }));
    }

    /// Move to `location` and fetch what the page needs.
    /// The promise resolves with the final page view JSON once every fetch has settled.
    pub fn navigate(&self, location: &str) -> js_sys::Promise {
        let tickets = self.session.borrow_mut().navigate(location);
        publish(&self.session, &self.presenters);

        let session = Rc::clone(&self.session);
        let presenters = Rc::clone(&self.presenters);
        let client = self.client.clone();

        future_to_promise(async move {
            dispatch(&client, tickets, |ticket, result| {
                let settled = session.borrow_mut().settle(&ticket, result);
                if settled != Settled::Stale {
                    publish(&session, &presenters);
                }
            })
            .await;

            let view = session.borrow().view();
            serde_json::to_string(&view)
                .map(|json| JsValue::from_str(&json))
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
        })
    }

    /// Dismiss the detail overlay.
    pub fn close_overlay(&self) -> js_sys::Promise {
        let location = self.session.borrow().route().close_overlay().to_location();
        self.navigate(&location)
    }

    /// Slide a row to its next page.
    /// Returns the slide offsets as JSON, or nothing when no slide starts.
    pub fn advance(&self, row: &str, viewport_width: f64) -> Result<Option<String>, JsValue> {
        let category: Category = row.parse().map_err(to_js)?;
        let motion = self
            .session
            .borrow_mut()
            .advance(category, viewport_width)
            .map_err(to_js)?;
        publish(&self.session, &self.presenters);

        motion
            .map(|m| serde_json::to_string(&m))
            .transpose()
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Call once when a row's exit animation finishes.
    pub fn complete_transition(&self, row: &str) -> Result<(), JsValue> {
        let category: Category = row.parse().map_err(to_js)?;
        self.session
            .borrow_mut()
            .complete_transition(category)
            .map_err(to_js)?;
        publish(&self.session, &self.presenters);
        Ok(())
    }

    /// Current page view as JSON.
    pub fn view(&self) -> Result<String, JsValue> {
        let view = self.session.borrow().view();
        serde_json::to_string(&view)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Location a tile click should push.
    pub fn detail_location(id: u64) -> String {
        Route::detail_for(EntityId::new(id)).to_location()
    }

    /// CDN URL for an image path; `size` is "w500" or "original".
    pub fn image_url(&self, path: &str, size: &str) -> Result<String, JsValue> {
        let size: ImageSize = size.parse().map_err(to_js)?;
        Ok(self.session.borrow().config().image_url(Some(path), size))
    }
}
