//! FocusRing — manages keyboard focus cycling between components.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    /// Replace the ring contents, keeping the focused id if it survives.
    pub fn set_items(&mut self, items: Vec<ComponentId>) {
        let old = self.current();
        self.items = items;
        if let Some(id) = old {
            if let Some(pos) = self.items.iter().position(|&x| x == id) {
                self.current = pos;
                return;
            }
        }
        self.current = 0;
    }

}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_both_ways() {
        let mut ring = FocusRing::new(vec![
            ComponentId::TopicList,
            ComponentId::Generator,
            ComponentId::Feed,
        ]);
        assert_eq!(ring.current(), Some(ComponentId::TopicList));
        assert_eq!(ring.next(), Some(ComponentId::Generator));
        assert_eq!(ring.next(), Some(ComponentId::Feed));
        assert_eq!(ring.next(), Some(ComponentId::TopicList));
        assert_eq!(ring.prev(), Some(ComponentId::Feed));
    }

    #[test]
    fn set_items_keeps_focus_when_possible() {
        let mut ring = FocusRing::new(vec![ComponentId::TopicList, ComponentId::Feed]);
        ring.set(ComponentId::Feed);
        ring.set_items(vec![
            ComponentId::TopicList,
            ComponentId::Feed,
            ComponentId::LogPanel,
        ]);
        assert_eq!(ring.current(), Some(ComponentId::Feed));
        ring.set_items(vec![ComponentId::Generator]);
        assert_eq!(ring.current(), Some(ComponentId::Generator));
    }

    #[test]
    fn empty_ring_has_no_focus() {
        let mut ring = FocusRing::default();
        assert_eq!(ring.next(), None);
        assert_eq!(ring.prev(), None);
    }
}
