// Homepage payload as served by the API, plus the links and labels derived from it.
// Every field is optional on the wire; missing ones decode as empty strings.

use serde::{Deserialize, Serialize};

use crate::error::UiError;

/// What a carousel needs from any item it shows.
pub trait FeedItem {
    fn title(&self) -> &str;
    fn image(&self) -> &str;
    /// Where clicking the item goes.
    fn target(&self) -> String;
}

/// Episode counts and format shown under a slide's title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmStats {
    pub subtitles: String,
    pub dubbing: String,
    pub episodes: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub runtime: String,
}

/// Hero slider entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderItem {
    pub spotlight: String,
    pub title: String,
    pub poster: String,
    pub detail_url: String,
    pub description: String,
    pub film_stats: FilmStats,
}

impl SliderItem {
    /// "Watch now" link. Title and type travel as query parameters.
    pub fn watch_href(&self) -> String {
        format!(
            "/watch{}?title={}&anime_type={}",
            self.detail_url,
            encode_component(&self.title),
            encode_component(&self.film_stats.kind)
        )
    }

    pub fn detail_href(&self) -> String {
        detail_href(&self.detail_url)
    }
}

impl FeedItem for SliderItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn image(&self) -> &str {
        &self.poster
    }

    fn target(&self) -> String {
        self.watch_href()
    }
}

/// Trending row entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingItem {
    /// Rank as printed, e.g. "01".
    pub number: String,
    pub title: String,
    pub poster: String,
    pub url: String,
}

impl TrendingItem {
    pub fn detail_href(&self) -> String {
        detail_href(&self.url)
    }
}

impl FeedItem for TrendingItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn image(&self) -> &str {
        &self.poster
    }

    fn target(&self) -> String {
        self.detail_href()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MostViewedEntry {
    pub rank: String,
    pub image: String,
    pub title: String,
    pub url: String,
    pub subtitles: String,
    pub dubbing: String,
    pub episodes: String,
}

impl FeedItem for MostViewedEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn image(&self) -> &str {
        &self.image
    }

    fn target(&self) -> String {
        detail_href(&self.url)
    }
}

/// One Most Viewed tab ("Today", "Week", "Month").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MostViewedCategory {
    pub category: String,
    pub data: Vec<MostViewedEntry>,
}

/// The parts of the homepage payload this crate drives. Other sections are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeFeed {
    pub image_slider: Vec<SliderItem>,
    pub trending_anime: Vec<TrendingItem>,
    pub most_viewed: Vec<MostViewedCategory>,
}

impl HomeFeed {
    pub fn from_json(json: &str) -> Result<Self, UiError> {
        serde_json::from_str(json).map_err(|e| UiError::InvalidFeed(e.to_string()))
    }
}

/// Where the homepage data stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeedState {
    #[default]
    Loading,
    Ready(HomeFeed),
    Failed(String),
}

impl FeedState {
    /// The feed if loaded; loading and failed pages render as empty.
    pub fn feed(&self) -> Option<&HomeFeed> {
        match self {
            FeedState::Ready(feed) => Some(feed),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            FeedState::Loading => "loading",
            FeedState::Ready(_) => "ready",
            FeedState::Failed(_) => "failed",
        }
    }
}

fn detail_href(path: &str) -> String {
    format!("/animedetailpage{path}")
}

/// Cut `text` to `max_chars` characters and mark the cut with "...".
pub fn truncate_title(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Percent-encode like the browser's `encodeURIComponent`, which leaves
/// `!'()*` alone where `urlencoding` escapes them.
fn encode_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "image_slider": [{
            "spotlight": "#1 Spotlight",
            "title": "Solo Leveling Season 2: Arise from the Shadow",
            "poster": "https://img.example/solo.jpg",
            "detail_url": "/solo-leveling-season-2-arise-from-the-shadow-19413",
            "description": "The second season.",
            "film_stats": {"subtitles": "11", "dubbing": "9", "episodes": "13", "type": "TV", "runtime": "24m"}
        }],
        "trending_anime": [
            {"number": "01", "title": "Wind Breaker", "poster": "p1", "url": "/wind-breaker-1"},
            {"number": "02", "title": "Dandadan", "poster": "p2"}
        ],
        "most_viewed": [
            {"category": "Today", "data": [{"rank": "1", "title": "One Piece", "url": "/one-piece-100"}]},
            {"category": "Week", "data": []}
        ],
        "top_sections": [],
        "genres": [{"name": "Action", "url": "/genre/action"}]
    }"##;

    #[test]
    fn decodes_homepage_and_ignores_other_sections() {
        let feed = HomeFeed::from_json(SAMPLE).expect("sample decodes");
        assert_eq!(feed.image_slider.len(), 1);
        assert_eq!(feed.image_slider[0].film_stats.kind, "TV");
        assert_eq!(feed.trending_anime.len(), 2);
        assert_eq!(feed.trending_anime[1].url, "");
        assert_eq!(feed.most_viewed[0].data[0].title, "One Piece");
        assert!(feed.most_viewed[1].data.is_empty());
    }

    #[test]
    fn missing_sections_are_empty() {
        let feed = HomeFeed::from_json("{}").unwrap();
        assert_eq!(feed, HomeFeed::default());
    }

    #[test]
    fn malformed_feed_is_an_error() {
        let err = HomeFeed::from_json(r#"{"image_slider": 3}"#).unwrap_err();
        assert!(matches!(err, UiError::InvalidFeed(_)));
    }

    #[test]
    fn slider_links() {
        let feed = HomeFeed::from_json(SAMPLE).unwrap();
        let slide = &feed.image_slider[0];
        assert_eq!(
            slide.watch_href(),
            "/watch/solo-leveling-season-2-arise-from-the-shadow-19413\
             ?title=Solo%20Leveling%20Season%202%3A%20Arise%20from%20the%20Shadow&anime_type=TV"
        );
        assert_eq!(
            slide.detail_href(),
            "/animedetailpage/solo-leveling-season-2-arise-from-the-shadow-19413"
        );
        assert_eq!(slide.target(), slide.watch_href());
        assert_eq!(slide.image(), "https://img.example/solo.jpg");
    }

    #[test]
    fn watch_href_keeps_browser_unreserved_marks() {
        let slide = SliderItem {
            title: "Re:Zero (Season 2)! It's *new*".into(),
            detail_url: "/re-zero-2".into(),
            film_stats: FilmStats {
                kind: "TV Special".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            slide.watch_href(),
            "/watch/re-zero-2?title=Re%3AZero%20(Season%202)!%20It's%20*new*&anime_type=TV%20Special"
        );
    }

    #[test]
    fn trending_and_most_viewed_targets() {
        let feed = HomeFeed::from_json(SAMPLE).unwrap();
        assert_eq!(feed.trending_anime[0].target(), "/animedetailpage/wind-breaker-1");
        assert_eq!(
            feed.most_viewed[0].data[0].target(),
            "/animedetailpage/one-piece-100"
        );
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_title("Wind Breaker", 17), "Wind Breaker");
        assert_eq!(truncate_title("12345678901234567", 17), "12345678901234567");
        assert_eq!(
            truncate_title("That Time I Got Reincarnated as a Slime", 17),
            "That Time I Got R..."
        );
        assert_eq!(truncate_title("進撃の巨人 The Final Season", 5), "進撃の巨人...");
        assert_eq!(truncate_title("", 17), "");
    }

    #[test]
    fn feed_state_exposes_only_ready_data() {
        assert!(FeedState::Loading.feed().is_none());
        assert!(FeedState::Failed("timeout".into()).feed().is_none());
        assert_eq!(FeedState::Ready(HomeFeed::default()).status(), "ready");
    }
}
