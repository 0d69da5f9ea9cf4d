//! WorkspaceManager — panel visibility and the focus ring.
//!
//! Tracks:
//! - Whether the log panel, help overlay and keys bar are shown
//! - The FocusRing over the visible panes (the log panel joins while open)

use crate::action::ComponentId;
use crate::focus::FocusRing;

pub struct WorkspaceManager {
    pub show_log_panel: bool,
    pub show_help: bool,
    pub show_keys_bar: bool, // footer keybindings bar

    pub focus: FocusRing,
}

impl WorkspaceManager {
    pub fn new() -> Self {
        let mut wm = Self {
            show_log_panel: false,
            show_help: false,
            show_keys_bar: true,
            focus: FocusRing::new(Vec::new()),
        };
        wm.rebuild_focus_ring();
        wm
    }

    /// Rebuild the FocusRing for the panes currently on screen.
    pub fn rebuild_focus_ring(&mut self) {
        let mut items = vec![
            ComponentId::TopicList,
            ComponentId::Generator,
            ComponentId::Feed,
        ];
        if self.show_log_panel {
            items.push(ComponentId::LogPanel);
        }
        self.focus.set_items(items);
    }

    pub fn toggle_log_panel(&mut self) {
        self.show_log_panel = !self.show_log_panel;
        self.rebuild_focus_ring();
        if self.show_log_panel {
            self.focus.set(ComponentId::LogPanel);
        }
    }

    /// Convenience: current focused component.
    pub fn focused(&self) -> Option<ComponentId> {
        self.focus.current()
    }

    pub fn focus_next(&mut self) -> Option<ComponentId> {
        self.focus.next()
    }

    pub fn focus_prev(&mut self) -> Option<ComponentId> {
        self.focus.prev()
    }

    pub fn focus_set(&mut self, id: ComponentId) {
        self.focus.set(id);
    }

}

impl Default for WorkspaceManager {
    fn default() -> Self {
        Self::new()
    }
}
