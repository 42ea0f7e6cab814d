/// Per-kind channel body renderers.
pub mod channel_views;
/// Event contracts for chat module wiring.
pub mod events;
/// Parent-owned row handle registry.
pub mod registry;
pub mod sidebar;
pub mod sidebar_row;

pub use events::{ChannelSelected, ChannelsReordered, SidebarToggleClicked};
pub use registry::RowRegistry;
pub use sidebar::{ChatSidebar, SidebarCategory};
pub use sidebar_row::{DraggedChannel, RowClicked, SidebarChannelRow};
