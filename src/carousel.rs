// Bounded-window index state shared by the hero slider and the trending row.
// Items live with the caller; this only tracks how many there are.

use std::ops::Range;

use serde::Serialize;

/// Boundary behaviour at either end of the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WrapMode {
    /// Stepping past an end jumps to the other end.
    Wrap,
    /// Stepping past an end does nothing.
    Clamp,
}

/// Window position over an externally owned list of `len` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    window_start: usize,
    window_size: usize,
    wrap: WrapMode,
}

impl CarouselState {
    pub fn new(len: usize, window_size: usize, wrap: WrapMode) -> Self {
        CarouselState {
            len,
            window_start: 0,
            window_size: window_size.max(1),
            wrap,
        }
    }

    /// One item visible, wraps at both ends.
    pub fn single(len: usize) -> Self {
        Self::new(len, 1, WrapMode::Wrap)
    }

    /// `window_size` items visible, clamped at both ends.
    pub fn windowed(len: usize, window_size: usize) -> Self {
        Self::new(len, window_size, WrapMode::Clamp)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap
    }

    /// Largest valid window start.
    fn max_start(&self) -> usize {
        match self.wrap {
            WrapMode::Wrap => self.len.saturating_sub(1),
            WrapMode::Clamp => self.len.saturating_sub(self.window_size),
        }
    }

    /// A new item list arrived. Keeps the position when it is still valid.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.window_start > self.max_start() {
            self.window_start = match self.wrap {
                WrapMode::Wrap => 0,
                WrapMode::Clamp => self.max_start(),
            };
        }
    }

    /// Move the window to `index`. Out-of-range requests wrap to the opposite
    /// end or clamp to the nearest end depending on the mode. No-op when empty.
    pub fn go_to(&mut self, index: isize) {
        if self.len == 0 {
            return;
        }

        let target = match self.wrap {
            WrapMode::Wrap => {
                if index < 0 {
                    self.len - 1
                } else if index as usize >= self.len {
                    0
                } else {
                    index as usize
                }
            }
            WrapMode::Clamp => (index.max(0) as usize).min(self.max_start()),
        };

        if target != self.window_start {
            log::debug!(
                "carousel window {} -> {} (len={}, size={})",
                self.window_start,
                target,
                self.len,
                self.window_size
            );
        }
        self.window_start = target;
    }

    pub fn can_go_next(&self) -> bool {
        match self.wrap {
            WrapMode::Wrap => self.len > 0,
            WrapMode::Clamp => self.window_start + self.window_size < self.len,
        }
    }

    pub fn can_go_prev(&self) -> bool {
        match self.wrap {
            WrapMode::Wrap => self.len > 0,
            WrapMode::Clamp => self.window_start > 0,
        }
    }

    /// Step forward by one. Returns whether the position changed.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        let before = self.window_start;
        self.go_to(before as isize + 1);
        self.window_start != before
    }

    /// Step back by one. Returns whether the position changed.
    pub fn prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        let before = self.window_start;
        self.go_to(before as isize - 1);
        self.window_start != before
    }

    /// Indices currently on screen, cut short at the tail.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.window_start.min(self.len);
        let end = (self.window_start + self.window_size).min(self.len);
        start..end
    }

    /// The on-screen slice of `items`. `items` should have `len()` entries;
    /// anything shorter just yields fewer items.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }
}

/// Index state for the "Most Viewed" Today / Week / Month tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabState {
    active: usize,
    len: usize,
}

impl TabState {
    pub fn new(len: usize) -> Self {
        TabState { active: 0, len }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Switch tabs. Indices past the last tab are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.active = index;
        }
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.active >= len {
            self.active = 0;
        }
    }
}
