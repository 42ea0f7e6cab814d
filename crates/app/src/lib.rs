#![deny(unsafe_code)]

/// Desktop chat client built with GPUI and gpui-component.
///
/// The interesting surface is the channel sidebar: collapsible categories,
/// per-row collapse animation tracking, and drag-and-drop reordering.
pub mod app;
/// Sidebar components and their event contracts.
pub mod chat;
/// Settings persistence.
pub mod settings;

/// Returns a stable marker used by integration smoke tests.
pub fn smoke_marker() -> &'static str {
    "murmur"
}
