// Homepage state: feed lifecycle plus the slider, trending row and Most Viewed tabs.

use serde::Serialize;

use crate::autoplay::ImageSlider;
use crate::carousel::{CarouselState, TabState};
use crate::feed::{truncate_title, FeedItem, FeedState, FilmStats, HomeFeed};
use crate::types::{SiteConfig, Timestamp};

/// Everything the homepage keeps between events.
#[derive(Debug, Clone)]
pub struct HomeState {
    config: SiteConfig,
    feed: FeedState,
    slider: ImageSlider,
    trending: CarouselState,
    tabs: TabState,
}

impl HomeState {
    pub fn new(config: SiteConfig) -> Self {
        HomeState {
            slider: ImageSlider::new(0, config.autoplay_interval_us),
            trending: CarouselState::windowed(0, config.trending_window),
            tabs: TabState::default(),
            feed: FeedState::Loading,
            config,
        }
    }

    pub fn feed_state(&self) -> &FeedState {
        &self.feed
    }

    pub fn slider(&self) -> &ImageSlider {
        &self.slider
    }

    pub fn trending(&self) -> &CarouselState {
        &self.trending
    }

    pub fn tabs(&self) -> &TabState {
        &self.tabs
    }

    pub fn mount(&mut self, now: Timestamp) {
        self.slider.mount(now);
    }

    pub fn unmount(&mut self) {
        self.slider.unmount();
    }

    /// Take a raw API response. A payload that does not decode fails the page
    /// instead of surfacing an error.
    pub fn load_feed_json(&mut self, json: &str, now: Timestamp) {
        match HomeFeed::from_json(json) {
            Ok(feed) => self.set_feed(feed, now),
            Err(err) => {
                log::warn!("homepage feed rejected: {err}");
                self.fail(err.to_string());
            }
        }
    }

    pub fn set_feed(&mut self, feed: HomeFeed, now: Timestamp) {
        self.slider.set_len(feed.image_slider.len(), now);
        self.trending.set_len(feed.trending_anime.len());
        self.tabs.set_len(feed.most_viewed.len());
        log::debug!(
            "homepage feed loaded: {} slides, {} trending, {} most-viewed tabs",
            feed.image_slider.len(),
            feed.trending_anime.len(),
            feed.most_viewed.len()
        );
        self.feed = FeedState::Ready(feed);
    }

    /// The fetch itself failed.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.slider.clear();
        self.trending.set_len(0);
        self.tabs.set_len(0);
        self.feed = FeedState::Failed(message.into());
    }

    pub fn slider_go_to(&mut self, index: isize, now: Timestamp) {
        self.slider.go_to(index, now);
    }

    pub fn slider_next(&mut self, now: Timestamp) {
        self.slider.next(now);
    }

    pub fn slider_prev(&mut self, now: Timestamp) {
        self.slider.prev(now);
    }

    pub fn trending_next(&mut self) -> bool {
        self.trending.next()
    }

    pub fn trending_prev(&mut self) -> bool {
        self.trending.prev()
    }

    pub fn select_tab(&mut self, index: usize) {
        self.tabs.select(index);
    }

    /// Run due autoplay work. Returns whether anything visible changed.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        self.slider.tick(now)
    }

    /// When the host should call [`tick`](Self::tick) next.
    pub fn next_wake(&self) -> Option<Timestamp> {
        self.slider.next_deadline()
    }

    pub fn view(&self) -> HomeView {
        let feed = self.feed.feed();
        let error = match &self.feed {
            FeedState::Failed(message) => Some(message.clone()),
            _ => None,
        };

        HomeView {
            status: self.feed.status(),
            error,
            slider: self.slider_view(feed),
            trending: self.trending_view(feed),
            most_viewed: self.most_viewed_view(feed),
        }
    }

    fn slider_view(&self, feed: Option<&HomeFeed>) -> SliderView {
        let slide = feed
            .and_then(|f| f.image_slider.get(self.slider.index()))
            .map(|item| SlideView {
                spotlight: item.spotlight.clone(),
                title: item.title.clone(),
                poster: item.image().to_string(),
                description: item.description.clone(),
                film_stats: item.film_stats.clone(),
                watch_href: item.watch_href(),
                detail_href: item.detail_href(),
            });

        SliderView {
            index: self.slider.index(),
            len: self.slider.len(),
            slide,
        }
    }

    fn trending_view(&self, feed: Option<&HomeFeed>) -> TrendingView {
        let items = feed.map_or(&[][..], |f| f.trending_anime.as_slice());
        let cards = self
            .trending
            .visible(items)
            .iter()
            .map(|item| TrendingCard {
                number: item.number.clone(),
                title: item.title.clone(),
                short_title: truncate_title(item.title(), self.config.title_max_chars),
                poster: item.image().to_string(),
                href: item.target(),
            })
            .collect();

        TrendingView {
            window_start: self.trending.window_start(),
            can_go_next: self.trending.can_go_next(),
            can_go_prev: self.trending.can_go_prev(),
            cards,
        }
    }

    fn most_viewed_view(&self, feed: Option<&HomeFeed>) -> MostViewedView {
        let categories = feed.map_or(&[][..], |f| f.most_viewed.as_slice());
        let entries = categories
            .get(self.tabs.active())
            .map(|c| {
                c.data
                    .iter()
                    .map(|e| RankedEntry {
                        rank: e.rank.clone(),
                        title: e.title.clone(),
                        image: e.image().to_string(),
                        href: e.target(),
                        subtitles: e.subtitles.clone(),
                        dubbing: e.dubbing.clone(),
                        episodes: e.episodes.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        MostViewedView {
            tabs: categories.iter().map(|c| c.category.clone()).collect(),
            active: self.tabs.active(),
            entries,
        }
    }
}

/// Render model for the whole homepage.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub status: &'static str,
    pub error: Option<String>,
    pub slider: SliderView,
    pub trending: TrendingView,
    pub most_viewed: MostViewedView,
}

#[derive(Debug, Clone, Serialize)]
pub struct SliderView {
    pub index: usize,
    pub len: usize,
    pub slide: Option<SlideView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlideView {
    pub spotlight: String,
    pub title: String,
    pub poster: String,
    pub description: String,
    pub film_stats: FilmStats,
    pub watch_href: String,
    pub detail_href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingView {
    pub window_start: usize,
    pub can_go_next: bool,
    pub can_go_prev: bool,
    pub cards: Vec<TrendingCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingCard {
    pub number: String,
    pub title: String,
    pub short_title: String,
    pub poster: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MostViewedView {
    pub tabs: Vec<String>,
    pub active: usize,
    pub entries: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub rank: String,
    pub title: String,
    pub image: String,
    pub href: String,
    pub subtitles: String,
    pub dubbing: String,
    pub episodes: String,
}
