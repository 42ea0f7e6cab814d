/// Per-render flags deciding whether a row draws collapsed.
///
/// This is derived fresh on every render and never stored; the stored value is
/// [`crate::RowVisibility`], which trails this derivation by one animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollapseInputs {
    /// The row's whole category is currently being dragged.
    pub category_dragged: bool,
    /// The row's category header is toggled closed.
    pub category_collapsed: bool,
    /// The channel has unread messages.
    pub unread: bool,
    /// The channel is the current selection.
    pub focused: bool,
}

impl CollapseInputs {
    /// A row collapses with its category unless it is unread or focused, so
    /// important channels never disappear; a dragged category collapses every
    /// member regardless to keep the drag preview compact.
    pub const fn is_collapsed(self) -> bool {
        self.category_dragged || (self.category_collapsed && !self.unread && !self.focused)
    }
}
