use std::collections::HashSet;

use crate::category::CategoryId;
use crate::channel::{Channel, ChannelId};
use crate::collapse::CollapseInputs;
use crate::drag::{self, DragFeedback, DragSnapshot};

/// Everything the parent list supplies to one row for a single render.
///
/// The element-handle callbacks stay at the UI layer; this bundle carries only
/// data so every derivation below stays a pure function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProps {
    pub channel: Channel,
    /// Position of the row within its category, used to key the drag source.
    pub index: usize,
    pub team_name: String,
    pub category_id: CategoryId,
    pub mention_count: u32,
    pub unread: bool,
    pub focused: bool,
    pub category_collapsed: bool,
    pub category_dragged: bool,
    pub draggable: bool,
    pub drop_disabled: bool,
    pub selected: bool,
    pub selected_channels: HashSet<ChannelId>,
    pub auto_sorted_categories: HashSet<CategoryId>,
    pub drag: DragSnapshot,
}

impl RowProps {
    pub fn new(
        channel: Channel,
        index: usize,
        team_name: impl Into<String>,
        category_id: CategoryId,
    ) -> Self {
        Self {
            channel,
            index,
            team_name: team_name.into(),
            category_id,
            mention_count: 0,
            unread: false,
            focused: false,
            category_collapsed: false,
            category_dragged: false,
            draggable: false,
            drop_disabled: false,
            selected: false,
            selected_channels: HashSet::new(),
            auto_sorted_categories: HashSet::new(),
            drag: DragSnapshot::idle(),
        }
    }

    pub fn collapse_inputs(&self) -> CollapseInputs {
        CollapseInputs {
            category_dragged: self.category_dragged,
            category_collapsed: self.category_collapsed,
            unread: self.unread,
            focused: self.focused,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapse_inputs().is_collapsed()
    }

    /// Drag registration is suppressed entirely while drops are disabled.
    pub fn drag_enabled(&self) -> bool {
        self.draggable && !self.drop_disabled
    }

    pub fn style(&self) -> RowStyle {
        RowStyle {
            collapsed: self.is_collapsed(),
            unread: self.unread,
            active: self.focused,
            drag: DragFeedback::derive(
                self.channel.id,
                self.category_id,
                self.selected,
                &self.drag,
                &self.auto_sorted_categories,
            ),
        }
    }

    pub fn shows_selected_count(&self) -> bool {
        drag::shows_selected_count(
            self.draggable,
            self.selected,
            &self.drag,
            self.channel.id,
            self.selected_channels.len(),
        )
    }

    pub fn selected_count_label(&self) -> String {
        drag::selected_count_label(self.selected_channels.len())
    }
}

/// Visual treatment flags for one row, the moral equivalent of the row's
/// conditional class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowStyle {
    /// Collapsed and expanded are mutually exclusive: `!collapsed` is
    /// expanded.
    pub collapsed: bool,
    pub unread: bool,
    pub active: bool,
    pub drag: DragFeedback,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelKind;

    fn props() -> RowProps {
        RowProps::new(
            Channel::new(ChannelId::new(3), ChannelKind::Standard, "general"),
            0,
            "acme",
            CategoryId::new(1),
        )
    }

    #[test]
    fn style_mirrors_the_collapse_derivation() {
        let mut expanded = props();
        expanded.category_collapsed = true;
        expanded.unread = true;
        assert!(!expanded.style().collapsed);

        let mut collapsed = props();
        collapsed.category_dragged = true;
        assert!(collapsed.style().collapsed);
    }

    #[test]
    fn unread_and_active_flags_pass_through() {
        let mut row = props();
        row.unread = true;
        row.focused = true;
        let style = row.style();
        assert!(style.unread);
        assert!(style.active);
    }

    #[test]
    fn drop_disabled_suppresses_drag_registration() {
        let mut row = props();
        row.draggable = true;
        assert!(row.drag_enabled());

        row.drop_disabled = true;
        assert!(!row.drag_enabled());
    }

    #[test]
    fn hidden_rows_suppress_the_body_but_not_the_badge() {
        use crate::visibility::{AnimationEvent, RowVisibility};

        let mut row = props();
        row.category_collapsed = true;
        row.draggable = true;
        row.selected = true;
        row.drag.active = Some(row.channel.id);
        row.selected_channels = HashSet::from([row.channel.id, ChannelId::new(11)]);

        let mut visibility = RowVisibility::default();
        visibility.apply(AnimationEvent::collapse_exit_finished(), row.is_collapsed());

        assert!(!visibility.renders_body());
        // The badge predicate ignores the visibility gate.
        assert!(row.shows_selected_count());
    }

    #[test]
    fn badge_predicate_uses_the_batch_size_from_the_selected_set() {
        let mut row = props();
        row.draggable = true;
        row.selected = true;
        row.drag.active = Some(row.channel.id);
        row.selected_channels = HashSet::from([row.channel.id, ChannelId::new(9)]);

        assert!(row.shows_selected_count());
        assert_eq!(row.selected_count_label(), "2 selected");

        row.selected_channels.remove(&ChannelId::new(9));
        assert!(!row.shows_selected_count());
    }
}
