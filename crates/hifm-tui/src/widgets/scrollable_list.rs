//! Generic scrollable list state: selection + scroll offset over owned items.
//!
//! Rows are abstract; callers that render multi-line entries pass the number
//! of entries that fit rather than a terminal height.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl<T> ScrollableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Replace the items, clamping selection into range.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    /// Select the first item matching `pred`. Returns whether one matched.
    pub fn select_where(&mut self, pred: impl Fn(&T) -> bool) -> bool {
        match self.items.iter().position(pred) {
            Some(pos) => {
                self.selected = pos;
                true
            }
            None => false,
        }
    }

    pub fn select_up(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.items.len().saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Returns (index, &item) pairs visible in `height` rows.
    /// Call ensure_visible first to update scroll_offset.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.items.is_empty() {
            return Vec::new();
        }
        let end = (self.scroll_offset + height).min(self.items.len());
        (self.scroll_offset..end).map(|i| (i, &self.items[i])).collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if selection changed.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.items.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ScrollableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> ScrollableList<usize> {
        let mut l = ScrollableList::new();
        l.set_items((0..n).collect());
        l
    }

    #[test]
    fn selection_is_clamped() {
        let mut l = list(3);
        l.select_down(10);
        assert_eq!(l.selected, 2);
        l.select_up(10);
        assert_eq!(l.selected, 0);

        l.select_last();
        l.set_items(vec![7]);
        assert_eq!(l.selected_item(), Some(&7));
    }

    #[test]
    fn ensure_visible_scrolls_window() {
        let mut l = list(10);
        l.select_down(6);
        l.ensure_visible(3);
        assert_eq!(l.scroll_offset, 4);
        let shown: Vec<usize> = l.visible_items(3).into_iter().map(|(i, _)| i).collect();
        assert_eq!(shown, vec![4, 5, 6]);

        assert!(l.handle_click(1));
        assert_eq!(l.selected, 5);
        assert!(!l.handle_click(9));
    }

    #[test]
    fn select_where_finds_item() {
        let mut l = list(5);
        assert!(l.select_where(|&x| x == 3));
        assert_eq!(l.selected, 3);
        assert!(!l.select_where(|&x| x == 42));
        assert_eq!(l.selected, 3);
    }
}
