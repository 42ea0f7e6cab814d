/// Which row animation an event refers to.
///
/// Animation identity is enumerated instead of matching engine-specific
/// animation names, so only the two semantic events exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// The shrink-away animation a row plays when it collapses.
    CollapseExit,
    /// The grow-back animation a row plays when it expands.
    ExpandEntry,
}

/// Lifecycle phase reported by the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    Started,
    Finished,
}

/// One animation lifecycle notification delivered to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationEvent {
    pub kind: AnimationKind,
    pub phase: AnimationPhase,
}

impl AnimationEvent {
    pub const fn new(kind: AnimationKind, phase: AnimationPhase) -> Self {
        Self { kind, phase }
    }

    /// The exit animation of a collapsing row has completed.
    pub const fn collapse_exit_finished() -> Self {
        Self::new(AnimationKind::CollapseExit, AnimationPhase::Finished)
    }

    /// The entry animation of an expanding row has begun.
    pub const fn expand_entry_started() -> Self {
        Self::new(AnimationKind::ExpandEntry, AnimationPhase::Started)
    }
}

/// Whether a row currently renders its inner body.
///
/// Rows start visible and only hide after the collapse-exit animation has
/// finished, so the body stays mounted for the full animation. The outer
/// container keeps rendering either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowVisibility {
    #[default]
    Visible,
    Hidden,
}

impl RowVisibility {
    /// Applies one animation event against the current collapse derivation.
    ///
    /// Only two transitions exist: collapse-exit-finished hides a logically
    /// collapsed row, and expand-entry-started reveals a logically expanded
    /// one. Every other event/guard combination is an idempotent no-op.
    ///
    /// Returns true when the state changed.
    pub fn apply(&mut self, event: AnimationEvent, collapsed: bool) -> bool {
        let next = match (*self, event.kind, event.phase, collapsed) {
            (
                RowVisibility::Visible,
                AnimationKind::CollapseExit,
                AnimationPhase::Finished,
                true,
            ) => RowVisibility::Hidden,
            (
                RowVisibility::Hidden,
                AnimationKind::ExpandEntry,
                AnimationPhase::Started,
                false,
            ) => RowVisibility::Visible,
            _ => {
                tracing::trace!(?event, collapsed, state = ?*self, "animation event has no matching transition");
                return false;
            }
        };

        *self = next;
        true
    }

    /// True while the inner body should be part of the render tree.
    pub const fn renders_body(self) -> bool {
        matches!(self, RowVisibility::Visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_start_visible() {
        assert_eq!(RowVisibility::default(), RowVisibility::Visible);
        assert!(RowVisibility::default().renders_body());
    }

    #[test]
    fn collapse_exit_finished_hides_a_collapsed_row() {
        let mut visibility = RowVisibility::Visible;
        assert!(visibility.apply(AnimationEvent::collapse_exit_finished(), true));
        assert_eq!(visibility, RowVisibility::Hidden);
        assert!(!visibility.renders_body());
    }

    #[test]
    fn collapse_exit_finished_is_ignored_while_expanded() {
        let mut visibility = RowVisibility::Visible;
        assert!(!visibility.apply(AnimationEvent::collapse_exit_finished(), false));
        assert_eq!(visibility, RowVisibility::Visible);
    }

    #[test]
    fn expand_entry_started_reveals_an_expanded_row() {
        let mut visibility = RowVisibility::Hidden;
        assert!(visibility.apply(AnimationEvent::expand_entry_started(), false));
        assert_eq!(visibility, RowVisibility::Visible);
    }

    #[test]
    fn expand_entry_started_is_ignored_while_collapsed() {
        let mut visibility = RowVisibility::Hidden;
        assert!(!visibility.apply(AnimationEvent::expand_entry_started(), true));
        assert_eq!(visibility, RowVisibility::Hidden);
    }

    #[test]
    fn mismatched_animation_identity_never_changes_state() {
        let mismatched = [
            AnimationEvent::new(AnimationKind::CollapseExit, AnimationPhase::Started),
            AnimationEvent::new(AnimationKind::ExpandEntry, AnimationPhase::Finished),
        ];

        for event in mismatched {
            for collapsed in [false, true] {
                let mut visible = RowVisibility::Visible;
                assert!(!visible.apply(event, collapsed), "{event:?}");
                assert_eq!(visible, RowVisibility::Visible);

                let mut hidden = RowVisibility::Hidden;
                assert!(!hidden.apply(event, collapsed), "{event:?}");
                assert_eq!(hidden, RowVisibility::Hidden);
            }
        }
    }

    #[test]
    fn hide_then_reveal_round_trips() {
        let mut visibility = RowVisibility::default();
        assert!(visibility.apply(AnimationEvent::collapse_exit_finished(), true));
        // Repeats are idempotent.
        assert!(!visibility.apply(AnimationEvent::collapse_exit_finished(), true));
        assert!(visibility.apply(AnimationEvent::expand_entry_started(), false));
        assert_eq!(visibility, RowVisibility::Visible);
    }
}
