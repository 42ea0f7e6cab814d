use std::time::Duration;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{ActiveTheme, h_flex, label::Label};

use murmur_sidebar::{AnimationEvent, CategoryId, ChannelId, RowProps, RowVisibility};

use crate::chat::channel_views::render_channel_body;
use crate::chat::registry::RowRegistry;

pub const ROW_HEIGHT: f32 = 32.0;
/// Duration of the per-row collapse/expand animation.
pub const ROW_ANIMATION_DURATION: Duration = Duration::from_millis(160);

/// Registry alias used by the sidebar and its rows.
pub type ChannelRowRegistry = RowRegistry<Entity<SidebarChannelRow>>;

/// Drag payload identifying the source row for drop targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraggedChannel {
    pub channel_id: ChannelId,
    pub category_id: CategoryId,
    pub index: usize,
}

/// Emitted when the row is clicked; the parent list owns selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowClicked {
    pub channel_id: ChannelId,
    /// True for modifier clicks, which toggle multi-select membership
    /// instead of moving focus.
    pub extend_selection: bool,
}

/// Preview element shown under the cursor while a row drag is in flight.
struct DragPreview {
    caption: SharedString,
}

impl Render for DragPreview {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .px_2()
            .py_1()
            .rounded_md()
            .bg(theme.background)
            .border_1()
            .border_color(theme.border)
            .child(Label::new(self.caption.clone()).text_sm())
    }
}

/// True when a freshly mounted row must schedule its own collapse-exit
/// signal. A row created inside an already collapsed category receives no
/// later collapse flip, so without this the visibility machine never leaves
/// `Visible`.
fn mount_requires_exit_signal(collapsed: bool, visibility: RowVisibility) -> bool {
    collapsed && visibility.renders_body()
}

/// One row in the channel sidebar.
///
/// The row derives everything from the props pushed by the parent list except
/// [`RowVisibility`], which deliberately trails the collapse derivation by one
/// animation cycle: the body stays mounted until the exit animation finishes
/// and comes back the moment the entry animation starts.
pub struct SidebarChannelRow {
    props: RowProps,
    visibility: RowVisibility,
    last_collapsed: bool,
    /// Bumped on every collapse flip so the height animation restarts.
    animation_trigger: usize,
    exit_signal_task: Option<Task<()>>,
    _registry: ChannelRowRegistry,
}

impl EventEmitter<RowClicked> for SidebarChannelRow {}

impl SidebarChannelRow {
    pub fn new(props: RowProps, registry: ChannelRowRegistry, cx: &mut Context<Self>) -> Self {
        // One-way registration: the parent owns the map, the row only adds
        // its own entry.
        registry.register(props.channel.id, cx.entity());

        let last_collapsed = props.is_collapsed();
        let mut row = Self {
            props,
            visibility: RowVisibility::default(),
            last_collapsed,
            animation_trigger: 0,
            exit_signal_task: None,
            _registry: registry,
        };

        // A row can mount into an already collapsed category. Nothing will
        // flip the collapse state later, so the exit signal has to be
        // scheduled here or visibility would stay `Visible` forever.
        if mount_requires_exit_signal(row.last_collapsed, row.visibility) {
            row.schedule_collapse_exit(cx);
        }

        row
    }

    pub fn channel_id(&self) -> ChannelId {
        self.props.channel.id
    }

    pub fn visibility(&self) -> RowVisibility {
        self.visibility
    }

    pub fn props(&self) -> &RowProps {
        &self.props
    }

    /// Receives the per-render inputs pushed by the parent list.
    ///
    /// A flip of the collapse derivation restarts the height animation and
    /// schedules the matching semantic signal: expand-entry-started fires
    /// synchronously with the render that begins the animation, while
    /// collapse-exit-finished fires once the animation duration has elapsed.
    pub fn update_props(&mut self, props: RowProps, cx: &mut Context<Self>) {
        self.props = props;

        let collapsed = self.props.is_collapsed();
        if collapsed != self.last_collapsed {
            self.last_collapsed = collapsed;
            self.animation_trigger += 1;

            if collapsed {
                self.schedule_collapse_exit(cx);
            } else {
                // Dropping the task cancels a stale exit signal from a
                // superseded collapse.
                self.exit_signal_task = None;
                self.handle_animation_event(AnimationEvent::expand_entry_started(), cx);
            }
        }

        cx.notify();
    }

    /// Applies one animation lifecycle signal against the current collapse
    /// derivation. Signals without a matching transition are no-ops.
    pub fn handle_animation_event(&mut self, event: AnimationEvent, cx: &mut Context<Self>) {
        if self.visibility.apply(event, self.props.is_collapsed()) {
            cx.notify();
        }
    }

    fn schedule_collapse_exit(&mut self, cx: &mut Context<Self>) {
        let task = cx.spawn(async move |row, cx| {
            cx.background_executor().timer(ROW_ANIMATION_DURATION).await;
            row.update(cx, |row, cx| {
                row.handle_animation_event(AnimationEvent::collapse_exit_finished(), cx);
            })
            .ok();
        });
        self.exit_signal_task = Some(task);
    }

    fn drag_preview_caption(&self) -> SharedString {
        if self.props.selected && self.props.selected_channels.len() > 1 {
            SharedString::from(self.props.selected_count_label())
        } else {
            SharedString::from(self.props.channel.name.clone())
        }
    }
}

impl Render for SidebarChannelRow {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let body = self
            .visibility
            .renders_body()
            .then(|| render_channel_body(&self.props.channel, &self.props.team_name, cx));

        let theme = cx.theme();
        let style = self.props.style();
        let channel_id = self.props.channel.id;
        let mention_count = self.props.mention_count;
        let show_badge = self.props.shows_selected_count();
        let badge_caption = self.props.selected_count_label();
        let preview_caption = self.drag_preview_caption();
        let drag_payload = DraggedChannel {
            channel_id,
            category_id: self.props.category_id,
            index: self.props.index,
        };

        let (start_height, end_height) = if style.collapsed {
            (ROW_HEIGHT, 0.0)
        } else {
            (0.0, ROW_HEIGHT)
        };

        h_flex()
            .id(("channel-row", channel_id.0))
            .relative()
            .w_full()
            .px_2()
            .items_center()
            .gap_2()
            .overflow_hidden()
            .rounded_md()
            .text_color(theme.foreground.opacity(0.8))
            .when(style.unread, |el| {
                el.text_color(theme.foreground)
                    .border_l_2()
                    .border_color(theme.primary)
            })
            .when(style.active, |el| el.bg(theme.muted))
            .when(style.drag.dragging, |el| {
                el.bg(theme.primary.opacity(0.12)).shadow_md()
            })
            .when(style.drag.selected_dragging, |el| {
                el.text_color(theme.foreground.opacity(0.4))
            })
            .when(style.drag.fade_on_drop, |el| {
                el.text_color(theme.foreground.opacity(0.3))
            })
            .when(style.drag.no_float, |el| el.shadow_none())
            .on_click(cx.listener(move |_this, event: &ClickEvent, _window, cx| {
                cx.emit(RowClicked {
                    channel_id,
                    extend_selection: event.modifiers().secondary(),
                });
            }))
            .when(self.props.drag_enabled(), |el| {
                el.on_drag(drag_payload, move |_, _, _, cx| {
                    let caption = preview_caption.clone();
                    cx.new(|_| DragPreview { caption })
                })
            })
            .when_some(body, |el, body| el.child(body))
            .when(mention_count > 0, |el| {
                el.child(
                    div()
                        .flex_shrink_0()
                        .px_1()
                        .rounded_full()
                        .bg(theme.primary)
                        .child(
                            Label::new(mention_count.to_string())
                                .text_xs()
                                .text_color(theme.background),
                        ),
                )
            })
            .when(show_badge, |el| {
                el.child(
                    div()
                        .absolute()
                        .top(px(2.))
                        .right(px(4.))
                        .px_1()
                        .rounded_sm()
                        .bg(theme.primary)
                        .child(
                            Label::new(badge_caption)
                                .text_xs()
                                .text_color(theme.background),
                        ),
                )
            })
            .with_animation(
                ("row-collapse", self.animation_trigger),
                Animation::new(ROW_ANIMATION_DURATION).with_easing(ease_in_out),
                move |el, delta| {
                    let height = start_height + (end_height - start_height) * delta;
                    el.h(px(height))
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use core::prelude::v1::test;
    use super::*;

    #[test]
    fn rows_mounted_collapsed_schedule_their_own_exit_signal() {
        assert!(mount_requires_exit_signal(true, RowVisibility::Visible));
        assert!(!mount_requires_exit_signal(false, RowVisibility::Visible));
        assert!(!mount_requires_exit_signal(true, RowVisibility::Hidden));
    }

    #[test]
    fn mounted_collapsed_row_converges_once_the_signal_lands() {
        let mut visibility = RowVisibility::default();
        assert!(mount_requires_exit_signal(true, visibility));

        visibility.apply(AnimationEvent::collapse_exit_finished(), true);
        assert!(!visibility.renders_body());
        assert!(!mount_requires_exit_signal(true, visibility));
    }
}
