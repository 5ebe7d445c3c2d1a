// portal_core: Rust/WASM core for the anime portal front-end.
// Filter panel, hero slider, trending row and Most Viewed tabs keep their state
// here; the page shell only renders the JSON views and forwards events.

mod autoplay;
mod carousel;
mod catalog;
mod error;
mod feed;
mod filter;
mod home;
mod types;

use wasm_bindgen::prelude::*;

pub use autoplay::{AutoplayTimer, ImageSlider};
pub use carousel::{CarouselState, TabState, WrapMode};
pub use catalog::{catalog, find_group, wire_param, FilterGroup, FilterOption, SelectionMode};
pub use error::UiError;
pub use feed::{
    truncate_title, FeedItem, FeedState, FilmStats, HomeFeed, MostViewedCategory,
    MostViewedEntry, SliderItem, TrendingItem,
};
pub use filter::{FilterPanel, FilterPanelView, FilterQueryBuilder, Selection};
pub use home::{HomeState, HomeView};
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Current wall-clock time in microseconds, for hosts that have no clock of their own.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn now_us() -> u64 {
    (js_sys::Date::now() * 1000.0) as u64
}

/// Homepage interface exposed to JavaScript.
/// Every mutating call is followed by a `view()` on the JS side.
#[wasm_bindgen]
pub struct HomePage {
    state: HomeState,
}

#[wasm_bindgen]
impl HomePage {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<HomePage, JsValue> {
        let config = parse_config(config_json)?;
        Ok(HomePage {
            state: HomeState::new(config),
        })
    }

    /// Component mounted: autoplay starts once slides exist.
    pub fn mount(&mut self, now_us: u64) {
        self.state.mount(Timestamp::from_micros(now_us));
    }

    /// Component torn down: cancels autoplay.
    pub fn unmount(&mut self) {
        self.state.unmount();
    }

    /// Hand over the raw homepage API response.
    /// A payload that cannot be decoded puts the page in the failed state.
    pub fn load_feed(&mut self, feed_json: &str, now_us: u64) {
        self.state
            .load_feed_json(feed_json, Timestamp::from_micros(now_us));
    }

    /// The homepage request itself failed.
    pub fn feed_failed(&mut self, message: &str) {
        self.state.fail(message);
    }

    pub fn slider_go_to(&mut self, index: i32, now_us: u64) {
        self.state
            .slider_go_to(index as isize, Timestamp::from_micros(now_us));
    }

    pub fn slider_next(&mut self, now_us: u64) {
        self.state.slider_next(Timestamp::from_micros(now_us));
    }

    pub fn slider_prev(&mut self, now_us: u64) {
        self.state.slider_prev(Timestamp::from_micros(now_us));
    }

    /// Returns `false` when the button should be disabled.
    pub fn trending_next(&mut self) -> bool {
        self.state.trending_next()
    }

    pub fn trending_prev(&mut self) -> bool {
        self.state.trending_prev()
    }

    pub fn select_tab(&mut self, index: usize) {
        self.state.select_tab(index);
    }

    /// Run due autoplay work. Returns whether a re-render is needed.
    pub fn tick(&mut self, now_us: u64) -> bool {
        self.state.tick(Timestamp::from_micros(now_us))
    }

    /// When to call `tick` next, in microseconds; `undefined` when idle.
    pub fn next_wake_us(&self) -> Option<u64> {
        self.state.next_wake().map(|ts| ts.as_micros())
    }

    /// Homepage render model as JSON.
    pub fn view(&self) -> Result<String, JsValue> {
        let json = serde_json::to_string(&self.state.view()).map_err(UiError::from)?;
        Ok(json)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl HomePage {
    /// Like [`HomePage::tick`], reading the browser clock.
    pub fn tick_now(&mut self) -> bool {
        self.tick(now_us())
    }
}

fn parse_config(config_json: &str) -> Result<SiteConfig, UiError> {
    let config: SiteConfig = serde_json::from_str(config_json)
        .map_err(|e| UiError::InvalidConfig(e.to_string()))?;

    if config.autoplay_interval_us == 0 {
        return Err(UiError::InvalidConfig(
            "autoplay_interval_us must be positive".to_string(),
        ));
    }
    if config.trending_window == 0 {
        return Err(UiError::InvalidConfig(
            "trending_window must be positive".to_string(),
        ));
    }
    Ok(config)
}
