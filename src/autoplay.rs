// Slider autoplay as an explicit scheduled task on a logical clock.
// The host arms one real timer for `next_deadline()` and calls `tick(now)`.

use crate::carousel::CarouselState;
use crate::types::Timestamp;

/// A cancellable repeating deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayTimer {
    interval_us: u64,
    deadline: Option<Timestamp>,
}

impl AutoplayTimer {
    pub fn new(interval_us: u64) -> Self {
        AutoplayTimer {
            interval_us: interval_us.max(1),
            deadline: None,
        }
    }

    pub fn interval_us(&self) -> u64 {
        self.interval_us
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.deadline
    }

    /// Fire one interval after `now`, replacing any pending deadline.
    pub fn schedule(&mut self, now: Timestamp) {
        self.deadline = Some(now.add_micros(self.interval_us));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether the deadline has passed. A fire re-arms one interval after
    /// `now`, so a late poll fires once no matter how many intervals it missed.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.schedule(now);
                true
            }
            _ => false,
        }
    }
}

/// Hero slider: one item at a time, wraps, advances on its own.
#[derive(Debug, Clone)]
pub struct ImageSlider {
    carousel: CarouselState,
    timer: AutoplayTimer,
    mounted: bool,
}

impl ImageSlider {
    pub fn new(len: usize, interval_us: u64) -> Self {
        ImageSlider {
            carousel: CarouselState::single(len),
            timer: AutoplayTimer::new(interval_us),
            mounted: false,
        }
    }

    pub fn index(&self) -> usize {
        self.carousel.window_start()
    }

    pub fn len(&self) -> usize {
        self.carousel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousel.is_empty()
    }

    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timer.next_deadline()
    }

    /// Start autoplay. An empty slider stays idle.
    pub fn mount(&mut self, now: Timestamp) {
        self.mounted = true;
        self.arm(now);
    }

    /// Stop autoplay for good; no tick fires after this.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.timer.cancel();
    }

    /// Jump to a slide. Restarts the autoplay countdown from `now`.
    pub fn go_to(&mut self, index: isize, now: Timestamp) {
        self.carousel.go_to(index);
        self.arm(now);
    }

    pub fn next(&mut self, now: Timestamp) {
        self.go_to(self.index() as isize + 1, now);
    }

    pub fn prev(&mut self, now: Timestamp) {
        self.go_to(self.index() as isize - 1, now);
    }

    /// Replace the item count (new feed). Keeps the index if still valid;
    /// a reset index restarts the countdown like any other index change.
    pub fn set_len(&mut self, len: usize, now: Timestamp) {
        let before = self.index();
        self.carousel.set_len(len);
        if len == 0 {
            self.timer.cancel();
        } else if !self.timer.is_armed() || self.index() != before {
            self.arm(now);
        }
    }

    /// Drop all items (feed failed) and stop the countdown.
    pub fn clear(&mut self) {
        self.carousel.set_len(0);
        self.timer.cancel();
    }

    /// Advance one slide if the countdown ran out by `now`, then count down
    /// again from `now`. Returns whether the index moved.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        if self.carousel.is_empty() || !self.timer.poll(now) {
            return false;
        }

        let before = self.index();
        self.carousel.go_to(before as isize + 1);
        log::debug!("slider autoplay: {before} -> {}", self.index());
        self.index() != before
    }

    fn arm(&mut self, now: Timestamp) {
        if self.mounted && !self.carousel.is_empty() {
            self.timer.schedule(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const INTERVAL: u64 = 5_000_000;

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_micros(secs * 1_000_000)
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let mut timer = AutoplayTimer::new(INTERVAL);
        timer.schedule(at(0));
        assert!(!timer.poll(at(4)));
        assert!(timer.poll(at(5)));
        assert_eq!(timer.next_deadline(), Some(at(10)));
        assert!(!timer.poll(at(9)));
    }

    #[test]
    fn late_poll_fires_once_and_rearms_from_now() {
        let mut timer = AutoplayTimer::new(INTERVAL);
        timer.schedule(at(0));
        assert!(timer.poll(at(17)));
        assert_eq!(timer.next_deadline(), Some(at(22)));
        assert!(!timer.poll(at(21)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = AutoplayTimer::new(INTERVAL);
        timer.schedule(at(0));
        timer.cancel();
        assert!(!timer.poll(at(100)));
    }

    #[test]
    fn autoplay_advances_by_one_and_wraps() {
        let mut slider = ImageSlider::new(3, INTERVAL);
        slider.mount(at(0));

        assert!(!slider.tick(at(4)));
        assert_eq!(slider.index(), 0);
        assert!(slider.tick(at(5)));
        assert_eq!(slider.index(), 1);
        assert!(slider.tick(at(10)));
        assert!(slider.tick(at(15)));
        assert_eq!(slider.index(), 0);
    }

    #[test]
    fn manual_navigation_resets_the_countdown() {
        let mut slider = ImageSlider::new(5, INTERVAL);
        slider.mount(at(0));

        slider.go_to(3, at(4));
        assert_eq!(slider.next_deadline(), Some(at(9)));
        assert!(!slider.tick(at(5)));
        assert_eq!(slider.index(), 3);
        assert!(slider.tick(at(9)));
        assert_eq!(slider.index(), 4);
    }

    #[test]
    fn late_tick_moves_a_single_slide() {
        let mut slider = ImageSlider::new(5, INTERVAL);
        slider.mount(at(0));

        assert!(slider.tick(at(17)));
        assert_eq!(slider.index(), 1);
        assert_eq!(slider.next_deadline(), Some(at(22)));
        assert!(!slider.tick(at(20)));
        assert_eq!(slider.index(), 1);
    }

    #[test]
    fn manual_wraparound() {
        let mut slider = ImageSlider::new(5, INTERVAL);
        slider.mount(at(0));
        slider.go_to(-1, at(1));
        assert_eq!(slider.index(), 4);
        slider.next(at(2));
        assert_eq!(slider.index(), 0);
        slider.prev(at(3));
        assert_eq!(slider.index(), 4);
    }

    #[test]
    fn unmount_cancels_autoplay() {
        let mut slider = ImageSlider::new(4, INTERVAL);
        slider.mount(at(0));
        slider.unmount();
        assert_eq!(slider.next_deadline(), None);
        assert!(!slider.tick(at(60)));
        assert_eq!(slider.index(), 0);

        // Navigation after unmount does not re-arm.
        slider.next(at(61));
        assert_eq!(slider.next_deadline(), None);
    }

    #[test]
    fn empty_slider_never_schedules() {
        let mut slider = ImageSlider::new(0, INTERVAL);
        slider.mount(at(0));
        slider.go_to(-1, at(1));
        assert_eq!(slider.next_deadline(), None);
        assert!(!slider.tick(at(30)));
        assert!(slider.is_empty());
    }

    #[test]
    fn feed_arrival_arms_a_mounted_slider() {
        let mut slider = ImageSlider::new(0, INTERVAL);
        slider.mount(at(0));
        slider.set_len(3, at(2));
        assert_eq!(slider.next_deadline(), Some(at(7)));
        slider.set_len(0, at(3));
        assert_eq!(slider.next_deadline(), None);
    }

    #[test]
    fn shorter_feed_resetting_the_index_restarts_the_countdown() {
        let mut slider = ImageSlider::new(4, INTERVAL);
        slider.mount(at(0));
        slider.go_to(3, at(4));
        assert_eq!(slider.next_deadline(), Some(at(9)));

        slider.set_len(2, at(8));
        assert_eq!(slider.index(), 0);
        assert_eq!(slider.next_deadline(), Some(at(13)));
        assert!(!slider.tick(at(9)));
        assert_eq!(slider.index(), 0);

        // Index still valid: the pending countdown is left alone.
        slider.go_to(1, at(10));
        slider.set_len(3, at(11));
        assert_eq!(slider.index(), 1);
        assert_eq!(slider.next_deadline(), Some(at(15)));
    }

    proptest! {
        /// Without interaction, each tick at or past the deadline moves exactly
        /// one slide and the next deadline is one interval after that tick.
        #[test]
        fn autoplay_moves_one_slide_per_due_tick(len in 1usize..12, polls in proptest::collection::vec(1u64..20, 1..10)) {
            let mut slider = ImageSlider::new(len, INTERVAL);
            slider.mount(at(0));
            let mut now = 0;
            let mut deadline = 5;
            let mut expected = 0;
            for step in polls {
                now += step;
                slider.tick(at(now));
                if now >= deadline {
                    expected = (expected + 1) % len;
                    deadline = now + 5;
                }
                prop_assert_eq!(slider.index(), expected);
                prop_assert_eq!(slider.next_deadline(), Some(at(deadline)));
            }
        }
    }
}
