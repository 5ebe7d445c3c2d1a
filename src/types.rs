// Shared newtypes and the page configuration passed in from JS.
// Time is a logical clock supplied by the host; nothing here reads the wall clock.

use serde::{Deserialize, Serialize};

/// Timestamp in microseconds. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_micros(us: u64) -> Self {
        Timestamp(us)
    }

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms.saturating_mul(1000))
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Advance by `us` microseconds, saturating at the end of the clock.
    pub fn add_micros(self, us: u64) -> Self {
        Timestamp(self.0.saturating_add(us))
    }
}

/// Page configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Delay between automatic slider advances (microseconds).
    #[serde(default = "default_autoplay_interval")]
    pub autoplay_interval_us: u64,
    /// Number of trending cards visible at once.
    #[serde(default = "default_trending_window")]
    pub trending_window: usize,
    /// Trending titles longer than this (in chars) are cut and suffixed with "...".
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            autoplay_interval_us: default_autoplay_interval(),
            trending_window: default_trending_window(),
            title_max_chars: default_title_max_chars(),
        }
    }
}

fn default_autoplay_interval() -> u64 {
    5_000_000 // 5s
}

fn default_trending_window() -> usize {
    6
}

fn default_title_max_chars() -> usize {
    17
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_conversions() {
        let ts = Timestamp::from_millis(1_500);
        assert_eq!(ts.as_micros(), 1_500_000);
        assert!((ts.as_millis() - 1500.0).abs() < 0.0001);
    }

    #[test]
    fn timestamp_add_saturates() {
        let ts = Timestamp::from_micros(u64::MAX - 1);
        assert_eq!(ts.add_micros(10).as_micros(), u64::MAX);
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: SiteConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.autoplay_interval_us, 5_000_000);
        assert_eq!(config.trending_window, 6);
        assert_eq!(config.title_max_chars, 17);

        let config: SiteConfig = serde_json::from_str(r#"{"trending_window":4}"#).unwrap();
        assert_eq!(config.trending_window, 4);
        assert_eq!(config.autoplay_interval_us, 5_000_000);
    }
}
