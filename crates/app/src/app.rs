use std::path::PathBuf;
use std::time::Duration;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};

use murmur_sidebar::{ChannelId, ChannelKind};

use crate::chat::channel_views::{direct_channel_label, group_channel_label, standard_channel_label};
use crate::chat::{ChannelSelected, ChatSidebar, SidebarToggleClicked};
use crate::settings::SettingsStore;

/// Returns the default themes directory path.
/// This is a pure function to allow deterministic testing of path resolution.
pub fn default_themes_path() -> PathBuf {
    PathBuf::from("./themes")
}

/// Default sidebar width when expanded.
pub const SIDEBAR_DEFAULT_WIDTH: f32 = 260.0;
/// Minimum allowed sidebar width.
pub const SIDEBAR_MIN_WIDTH: f32 = 200.0;
/// Maximum allowed sidebar width.
pub const SIDEBAR_MAX_WIDTH: f32 = 400.0;
/// Duration of the sidebar collapse/expand animation.
const SIDEBAR_ANIMATION_DURATION: Duration = Duration::from_millis(150);

/// Compile-time validation of sidebar layout constraints.
const _: () = {
    assert!(SIDEBAR_MIN_WIDTH < SIDEBAR_DEFAULT_WIDTH);
    assert!(SIDEBAR_DEFAULT_WIDTH < SIDEBAR_MAX_WIDTH);
    assert!(SIDEBAR_MIN_WIDTH > 0.0);
};

/// Computes the effective sidebar width given a drag position.
/// The result is clamped to [SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH].
pub fn compute_sidebar_width(drag_x: f32) -> f32 {
    drag_x.clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH)
}

gpui::actions!(shell, [ToggleSidebar, Quit,]);

/// Marker type for sidebar resize drag operations.
#[derive(Clone)]
struct SidebarResizeDrag;

/// Empty drag visual used during sidebar resize; only the cursor changes.
struct EmptyDragView;

impl Render for EmptyDragView {
    fn render(&mut self, _: &mut Window, _: &mut Context<Self>) -> impl IntoElement {
        div()
    }
}

/// Main application shell: collapsible channel sidebar plus the content pane
/// for the selected channel.
pub struct ChatAppShell {
    sidebar: Entity<ChatSidebar>,
    settings: SettingsStore,
    sidebar_collapsed: bool,
    sidebar_width: f32,
    /// Animation trigger counter incremented on each toggle to reset animation state.
    animation_trigger: usize,
    active_channel: Option<ChannelId>,
}

impl ChatAppShell {
    pub fn new(_window: &mut Window, cx: &mut Context<Self>) -> Self {
        let settings = SettingsStore::load();
        let sidebar_width = compute_sidebar_width(settings.settings().sidebar_width);
        let sidebar = cx.new(|cx| ChatSidebar::new(&settings.settings(), cx));

        cx.subscribe(&sidebar, |this, _, event: &ChannelSelected, cx| {
            this.active_channel = Some(event.channel_id);
            cx.notify();
        })
        .detach();

        cx.subscribe(&sidebar, |this, _, _event: &SidebarToggleClicked, cx| {
            this.toggle_sidebar(cx);
        })
        .detach();

        Self {
            sidebar,
            settings,
            sidebar_collapsed: false,
            sidebar_width,
            animation_trigger: 0,
            active_channel: None,
        }
    }

    /// Toggles the sidebar between collapsed and expanded states and persists
    /// the current layout.
    fn toggle_sidebar(&mut self, cx: &mut Context<Self>) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.animation_trigger += 1;

        let mut settings = (*self.settings.settings()).clone();
        settings.sidebar_width = self.sidebar_width;
        if let Err(error) = self.settings.update(settings) {
            tracing::warn!("failed to persist sidebar layout: {error}");
        }

        cx.notify();
    }

    /// Resizes the sidebar to the specified width, clamped to min/max bounds.
    fn resize_sidebar(&mut self, new_width: f32, cx: &mut Context<Self>) {
        self.sidebar_width = compute_sidebar_width(new_width);
        cx.notify();
    }

    fn active_channel_caption(&self, cx: &App) -> Option<String> {
        let channel_id = self.active_channel?;
        let channel = self.sidebar.read(cx).channel(channel_id)?;

        Some(match channel.kind {
            ChannelKind::Direct => direct_channel_label(channel),
            ChannelKind::Group => group_channel_label(channel),
            ChannelKind::Standard => standard_channel_label(channel),
        })
    }
}

impl Render for ChatAppShell {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let caption = self.active_channel_caption(cx);
        let theme = cx.theme();
        let collapsed = self.sidebar_collapsed;

        div()
            .size_full()
            .relative()
            .bg(theme.background)
            .on_action(cx.listener(|this, _: &ToggleSidebar, _window, cx| {
                this.toggle_sidebar(cx);
            }))
            // Main horizontal layout: sidebar + resize handle + content pane
            .child(
                h_flex()
                    .size_full()
                    .child(self.render_sidebar(cx))
                    // Resize handle only visible when sidebar is expanded
                    .when(!collapsed, |el| el.child(self.render_resize_handle(cx)))
                    .child(
                        v_flex()
                            .id("main-content")
                            .flex_1()
                            .h_full()
                            .min_w_0()
                            .min_h_0()
                            .items_center()
                            .justify_center()
                            .overflow_hidden()
                            .child(match caption {
                                Some(caption) => Label::new(caption).text_sm(),
                                None => Label::new("Select a channel")
                                    .text_sm()
                                    .text_color(theme.foreground.opacity(0.55)),
                            }),
                    ),
            )
            // Toolbar button positioned in the top-left (after traffic lights on macOS)
            .child(
                h_flex()
                    .absolute()
                    .top(px(8.))
                    .left(px(80.))
                    .gap_2()
                    .child(
                        Button::new("toggle-sidebar")
                            .ghost()
                            .small()
                            .icon(IconName::PanelLeft)
                            .child("Sidebar")
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.toggle_sidebar(cx);
                            })),
                    ),
            )
    }
}

impl ChatAppShell {
    /// Renders the sidebar with collapse/expand animation.
    fn render_sidebar(&self, _cx: &Context<Self>) -> impl IntoElement {
        let collapsed = self.sidebar_collapsed;
        let expanded_width = self.sidebar_width;
        let animation_trigger = self.animation_trigger;

        let (start_width, end_width) = if collapsed {
            (expanded_width, 0.0)
        } else {
            (0.0, expanded_width)
        };

        div()
            .id("sidebar-container")
            .h_full()
            .flex_shrink_0()
            .overflow_hidden()
            .child(self.sidebar.clone())
            .with_animation(
                ("sidebar-anim", animation_trigger),
                Animation::new(SIDEBAR_ANIMATION_DURATION).with_easing(ease_in_out),
                move |el, delta| {
                    let width = start_width + (end_width - start_width) * delta;
                    el.w(px(width))
                },
            )
    }

    /// Renders the resize handle for adjusting sidebar width.
    fn render_resize_handle(&self, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .id("sidebar-resize-handle")
            .w(px(1.0))
            .h_full()
            .flex_shrink_0()
            .cursor(CursorStyle::ResizeLeftRight)
            .bg(theme.border)
            .hover(|el| el.bg(theme.primary))
            .on_drag(SidebarResizeDrag, |_, _, _, cx| cx.new(|_| EmptyDragView))
            .on_drag_move::<SidebarResizeDrag>(cx.listener(
                |this, event: &DragMoveEvent<SidebarResizeDrag>, _window, cx| {
                    let new_width: f32 = event.event.position.x.into();
                    this.resize_sidebar(new_width, cx);
                },
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        PathBuf, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH, compute_sidebar_width, default_themes_path,
    };

    #[test]
    fn sidebar_width_clamps_to_layout_bounds() {
        assert_eq!(compute_sidebar_width(10.0), SIDEBAR_MIN_WIDTH);
        assert_eq!(compute_sidebar_width(9_999.0), SIDEBAR_MAX_WIDTH);
        assert_eq!(compute_sidebar_width(300.0), 300.0);
    }

    #[test]
    fn themes_path_stays_relative_to_the_working_directory() {
        assert_eq!(default_themes_path(), PathBuf::from("./themes"));
    }
}
