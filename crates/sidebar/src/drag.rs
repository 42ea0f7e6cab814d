use std::collections::HashSet;

use crate::category::CategoryId;
use crate::channel::ChannelId;

/// Read-only view of the drag engine's current state.
///
/// Rows only consume this context; drag mechanics live entirely outside the
/// sidebar domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragSnapshot {
    /// Channel currently being dragged, if any. This is the drag anchor even
    /// when a multi-select batch moves with it.
    pub active: Option<ChannelId>,
    /// A drop animation is currently settling.
    pub drop_animating: bool,
    /// Category the drop animation is settling over.
    pub drop_target_category: Option<CategoryId>,
}

impl DragSnapshot {
    pub const fn idle() -> Self {
        Self {
            active: None,
            drop_animating: false,
            drop_target_category: None,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// True when the given channel is the drag anchor.
    pub fn is_dragging(&self, channel: ChannelId) -> bool {
        self.active == Some(channel)
    }
}

/// Visual drag-feedback flags for one row, derived per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragFeedback {
    /// This row is the drag anchor.
    pub dragging: bool,
    /// This row rides along in a multi-select batch behind another anchor.
    pub selected_dragging: bool,
    /// A drop is settling over an auto-sorted category, so fade instead of
    /// floating into place.
    pub fade_on_drop: bool,
    /// The row sits in an auto-sorted category and is not the anchor, so
    /// floating/shadow visuals are suppressed.
    pub no_float: bool,
}

impl DragFeedback {
    pub fn derive(
        channel: ChannelId,
        category: CategoryId,
        selected: bool,
        snapshot: &DragSnapshot,
        auto_sorted: &HashSet<CategoryId>,
    ) -> Self {
        let dragging = snapshot.is_dragging(channel);

        Self {
            dragging,
            selected_dragging: selected && snapshot.is_active() && !dragging,
            fade_on_drop: snapshot.drop_animating
                && snapshot
                    .drop_target_category
                    .is_some_and(|target| auto_sorted.contains(&target)),
            no_float: auto_sorted.contains(&category) && !dragging,
        }
    }
}

/// Whether the anchor row shows the batch-size badge.
///
/// Requires: row draggable, row selected, a drag in flight anchored to this
/// row, and more than one channel in the batch.
pub fn shows_selected_count(
    draggable: bool,
    selected: bool,
    snapshot: &DragSnapshot,
    channel: ChannelId,
    selected_count: usize,
) -> bool {
    draggable && selected && snapshot.is_dragging(channel) && selected_count > 1
}

/// Badge caption for a multi-select batch drag.
pub fn selected_count_label(selected_count: usize) -> String {
    format!("{selected_count} selected")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: ChannelId = ChannelId::new(7);
    const OTHER: ChannelId = ChannelId::new(8);
    const MANUAL: CategoryId = CategoryId::new(1);
    const AUTO: CategoryId = CategoryId::new(2);

    fn auto_sorted() -> HashSet<CategoryId> {
        HashSet::from([AUTO])
    }

    fn dragging(anchor: ChannelId) -> DragSnapshot {
        DragSnapshot {
            active: Some(anchor),
            drop_animating: false,
            drop_target_category: None,
        }
    }

    #[test]
    fn anchor_row_reports_dragging_only() {
        let feedback = DragFeedback::derive(ROW, MANUAL, true, &dragging(ROW), &auto_sorted());
        assert!(feedback.dragging);
        assert!(!feedback.selected_dragging);
    }

    #[test]
    fn selected_row_behind_another_anchor_reports_selected_dragging() {
        let feedback = DragFeedback::derive(ROW, MANUAL, true, &dragging(OTHER), &auto_sorted());
        assert!(!feedback.dragging);
        assert!(feedback.selected_dragging);
    }

    #[test]
    fn unselected_row_never_reports_selected_dragging() {
        let feedback = DragFeedback::derive(ROW, MANUAL, false, &dragging(OTHER), &auto_sorted());
        assert!(!feedback.selected_dragging);
    }

    #[test]
    fn idle_snapshot_derives_no_drag_feedback_in_manual_category() {
        let feedback =
            DragFeedback::derive(ROW, MANUAL, true, &DragSnapshot::idle(), &auto_sorted());
        assert_eq!(feedback, DragFeedback::default());
    }

    #[test]
    fn fade_on_drop_requires_auto_sorted_drop_target() {
        let over_auto = DragSnapshot {
            active: None,
            drop_animating: true,
            drop_target_category: Some(AUTO),
        };
        assert!(DragFeedback::derive(ROW, MANUAL, false, &over_auto, &auto_sorted()).fade_on_drop);

        let over_manual = DragSnapshot {
            drop_target_category: Some(MANUAL),
            ..over_auto
        };
        assert!(
            !DragFeedback::derive(ROW, MANUAL, false, &over_manual, &auto_sorted()).fade_on_drop
        );

        let no_target = DragSnapshot {
            drop_target_category: None,
            ..over_auto
        };
        assert!(!DragFeedback::derive(ROW, MANUAL, false, &no_target, &auto_sorted()).fade_on_drop);
    }

    #[test]
    fn no_float_marks_auto_sorted_rows_except_the_anchor() {
        assert!(
            DragFeedback::derive(ROW, AUTO, false, &DragSnapshot::idle(), &auto_sorted()).no_float
        );
        assert!(!DragFeedback::derive(ROW, AUTO, false, &dragging(ROW), &auto_sorted()).no_float);
        assert!(
            !DragFeedback::derive(ROW, MANUAL, false, &DragSnapshot::idle(), &auto_sorted())
                .no_float
        );
    }

    #[test]
    fn badge_shows_only_for_the_selected_anchor_of_a_multi_select_drag() {
        let snapshot = dragging(ROW);
        assert!(shows_selected_count(true, true, &snapshot, ROW, 3));

        // Each precondition is individually necessary.
        assert!(!shows_selected_count(false, true, &snapshot, ROW, 3));
        assert!(!shows_selected_count(true, false, &snapshot, ROW, 3));
        assert!(!shows_selected_count(true, true, &DragSnapshot::idle(), ROW, 3));
        assert!(!shows_selected_count(true, true, &dragging(OTHER), ROW, 3));
        assert!(!shows_selected_count(true, true, &snapshot, ROW, 1));
    }

    #[test]
    fn badge_caption_includes_the_batch_size() {
        assert_eq!(selected_count_label(2), "2 selected");
        assert_eq!(selected_count_label(14), "14 selected");
    }
}
