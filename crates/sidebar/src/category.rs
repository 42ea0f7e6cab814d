/// Stable identifier for one sidebar category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub u64);

impl CategoryId {
    /// Creates a typed category identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// How a category orders its member channels.
///
/// Automatic orders suppress some drop visuals because a dropped row snaps to
/// its computed position instead of floating where the user released it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategorySorting {
    /// Members keep the order the user arranged by hand.
    #[default]
    Manual,
    /// Members are sorted by display name.
    Alphabetical,
    /// Members are sorted by most recent activity.
    Recency,
}

impl CategorySorting {
    /// True when member order is computed rather than user-arranged.
    pub const fn is_auto(self) -> bool {
        !matches!(self, CategorySorting::Manual)
    }
}
