use murmur_sidebar::{CategoryId, ChannelId};

/// Emitted when sidebar selection changes the active channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelSelected {
    pub channel_id: ChannelId,
}

/// Emitted when the sidebar footer asks the shell to collapse the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarToggleClicked;

/// Emitted after a drop changed the member order of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelsReordered {
    pub category_id: CategoryId,
}
