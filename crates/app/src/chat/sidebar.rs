use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{
    ActiveTheme, Icon, IconName, Sizable, VirtualListScrollHandle,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex, v_virtual_list,
};

use murmur_sidebar::{
    CategoryId, CategorySorting, Channel, ChannelId, ChannelKind, DragSnapshot, RowProps,
};

use crate::chat::events::{ChannelSelected, ChannelsReordered, SidebarToggleClicked};
use crate::chat::sidebar_row::{ChannelRowRegistry, DraggedChannel, ROW_HEIGHT, RowClicked, SidebarChannelRow};
use crate::settings::SidebarSettings;

const CATEGORY_HEADER_HEIGHT: f32 = 26.0;
/// How long a finished drop keeps its settle animation visible.
const DROP_SETTLE_DURATION: Duration = Duration::from_millis(240);

/// One named, collapsible grouping of channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarCategory {
    pub id: CategoryId,
    pub name: String,
    pub collapsed: bool,
    pub sorting: CategorySorting,
    pub channels: Vec<Channel>,
}

/// Drag payload for category reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DraggedCategory {
    category_id: CategoryId,
}

/// Flattened render entry for the virtual list.
#[derive(Debug, Clone)]
enum SidebarEntry {
    CategoryHeader {
        category_id: CategoryId,
        name: SharedString,
        collapsed: bool,
    },
    Channel {
        channel_id: ChannelId,
        category_id: CategoryId,
        index: usize,
    },
}

/// The channel sidebar: categories, rows, selection, and the drag snapshot
/// every row consumes.
pub struct ChatSidebar {
    team_name: String,
    categories: Vec<SidebarCategory>,
    focused: Option<ChannelId>,
    unread: HashSet<ChannelId>,
    mentions: HashMap<ChannelId, u32>,
    last_activity: HashMap<ChannelId, u64>,
    multi_selected: HashSet<ChannelId>,
    auto_sorted: HashSet<CategoryId>,
    drop_disabled: bool,
    drag: DragSnapshot,
    dragged_category: Option<CategoryId>,
    registry: ChannelRowRegistry,
    flat_items: Vec<SidebarEntry>,
    item_sizes: Rc<Vec<Size<Pixels>>>,
    scroll_handle: VirtualListScrollHandle,
    drop_settle_task: Option<Task<()>>,
}

impl EventEmitter<ChannelSelected> for ChatSidebar {}
impl EventEmitter<SidebarToggleClicked> for ChatSidebar {}
impl EventEmitter<ChannelsReordered> for ChatSidebar {}

impl ChatSidebar {
    pub fn new(settings: &SidebarSettings, cx: &mut Context<Self>) -> Self {
        let categories = seed_categories();
        let auto_sorted = categories
            .iter()
            .filter(|category| {
                category.sorting.is_auto()
                    || settings
                        .auto_sorted_categories
                        .iter()
                        .any(|name| name.eq_ignore_ascii_case(&category.name))
            })
            .map(|category| category.id)
            .collect();

        let mut sidebar = Self {
            team_name: settings.team_name.clone(),
            categories,
            focused: None,
            unread: HashSet::from([ChannelId::new(1), ChannelId::new(5)]),
            mentions: HashMap::from([(ChannelId::new(5), 3)]),
            last_activity: seed_activity(),
            multi_selected: HashSet::new(),
            auto_sorted,
            drop_disabled: settings.drop_disabled,
            drag: DragSnapshot::idle(),
            dragged_category: None,
            registry: ChannelRowRegistry::new(),
            flat_items: Vec::new(),
            item_sizes: Rc::new(Vec::new()),
            scroll_handle: VirtualListScrollHandle::new(),
            drop_settle_task: None,
        };
        sidebar.sync_rows(cx);
        sidebar
    }

    pub fn focused_channel(&self) -> Option<ChannelId> {
        self.focused
    }

    pub fn channel(&self, channel_id: ChannelId) -> Option<&Channel> {
        self.categories
            .iter()
            .flat_map(|category| category.channels.iter())
            .find(|channel| channel.id == channel_id)
    }

    pub fn select_channel(&mut self, channel_id: ChannelId, cx: &mut Context<Self>) {
        self.focused = Some(channel_id);
        self.unread.remove(&channel_id);
        self.mentions.remove(&channel_id);
        cx.emit(ChannelSelected { channel_id });
        self.sync_rows(cx);
        cx.notify();
    }

    pub fn toggle_category(&mut self, category_id: CategoryId, cx: &mut Context<Self>) {
        if let Some(category) = self
            .categories
            .iter_mut()
            .find(|category| category.id == category_id)
        {
            category.collapsed = !category.collapsed;
            self.sync_rows(cx);
            cx.notify();
        }
    }

    /// Adds or removes a channel from the multi-select batch.
    pub fn toggle_channel_selection(&mut self, channel_id: ChannelId, cx: &mut Context<Self>) {
        apply_row_click(&mut self.multi_selected, channel_id, true);
        self.sync_rows(cx);
        cx.notify();
    }

    fn on_row_clicked(
        &mut self,
        _row: Entity<SidebarChannelRow>,
        event: &RowClicked,
        cx: &mut Context<Self>,
    ) {
        match apply_row_click(&mut self.multi_selected, event.channel_id, event.extend_selection) {
            ClickOutcome::Focus => self.select_channel(event.channel_id, cx),
            ClickOutcome::SelectionChanged => {
                self.sync_rows(cx);
                cx.notify();
            }
        }
    }

    fn note_channel_drag(&mut self, channel_id: ChannelId, cx: &mut Context<Self>) {
        if self.drag.active != Some(channel_id) {
            self.drag.active = Some(channel_id);
            self.drag.drop_animating = false;
            self.drag.drop_target_category = None;
            self.sync_rows(cx);
            cx.notify();
        }
    }

    fn note_category_drag(&mut self, category_id: CategoryId, cx: &mut Context<Self>) {
        if self.dragged_category != Some(category_id) {
            self.dragged_category = Some(category_id);
            self.sync_rows(cx);
            cx.notify();
        }
    }

    fn handle_channel_drop(
        &mut self,
        dragged: DraggedChannel,
        target_category: CategoryId,
        target_index: usize,
        cx: &mut Context<Self>,
    ) {
        if self.drop_disabled {
            tracing::debug!(?dragged, "drop ignored while drops are disabled");
            return;
        }

        // A selected anchor drags its whole multi-select batch along.
        let batch: Vec<ChannelId> = if self.multi_selected.contains(&dragged.channel_id) {
            let mut batch = vec![dragged.channel_id];
            batch.extend(
                channel_order(&self.categories)
                    .into_iter()
                    .filter(|id| *id != dragged.channel_id && self.multi_selected.contains(id)),
            );
            batch
        } else {
            vec![dragged.channel_id]
        };

        // Resolve the slot against the survivors first: removing batch
        // members above the slot would otherwise shift the drop downward.
        let insertion_index = self
            .categories
            .iter()
            .find(|category| category.id == target_category)
            .map(|category| insertion_index_after_removal(&category.channels, target_index, &batch))
            .unwrap_or(0);

        let moved = remove_channels(&mut self.categories, &batch);
        if moved.is_empty() {
            tracing::warn!(?dragged, "dropped channel is no longer in the sidebar");
            return;
        }

        if let Some(category) = self
            .categories
            .iter_mut()
            .find(|category| category.id == target_category)
        {
            insert_channels(category, insertion_index, moved);
            sort_category(category, &self.last_activity);
        }

        self.drag = DragSnapshot {
            active: None,
            drop_animating: true,
            drop_target_category: Some(target_category),
        };
        self.schedule_drop_settle(cx);

        cx.emit(ChannelsReordered {
            category_id: target_category,
        });
        self.sync_rows(cx);
        cx.notify();
    }

    fn handle_category_drop(
        &mut self,
        dragged: DraggedCategory,
        target: CategoryId,
        cx: &mut Context<Self>,
    ) {
        self.dragged_category = None;

        if dragged.category_id != target {
            move_category_before(&mut self.categories, dragged.category_id, target);
        }

        self.sync_rows(cx);
        cx.notify();
    }

    /// Fallback when a drag ends over the sidebar but outside any slot; the
    /// slot handlers run first, so an in-flight settle means this is a bubble.
    fn clear_stale_drag(&mut self, cx: &mut Context<Self>) {
        if self.drag.drop_animating {
            return;
        }

        if self.drag.active.is_some() || self.dragged_category.is_some() {
            self.drag = DragSnapshot::idle();
            self.dragged_category = None;
            self.sync_rows(cx);
            cx.notify();
        }
    }

    fn schedule_drop_settle(&mut self, cx: &mut Context<Self>) {
        let task = cx.spawn(async move |sidebar, cx| {
            cx.background_executor().timer(DROP_SETTLE_DURATION).await;
            sidebar
                .update(cx, |sidebar, cx| {
                    sidebar.drag = DragSnapshot::idle();
                    sidebar.sync_rows(cx);
                    cx.notify();
                })
                .ok();
        });
        self.drop_settle_task = Some(task);
    }

    fn row_props(&self, channel: &Channel, category: &SidebarCategory, index: usize) -> RowProps {
        let mut props = RowProps::new(
            channel.clone(),
            index,
            self.team_name.clone(),
            category.id,
        );
        props.mention_count = self.mentions.get(&channel.id).copied().unwrap_or(0);
        props.unread = self.unread.contains(&channel.id);
        props.focused = self.focused == Some(channel.id);
        props.category_collapsed = category.collapsed;
        props.category_dragged = self.dragged_category == Some(category.id);
        props.draggable = true;
        props.drop_disabled = self.drop_disabled;
        props.selected = self.multi_selected.contains(&channel.id);
        props.selected_channels = self.multi_selected.clone();
        props.auto_sorted_categories = self.auto_sorted.clone();
        props.drag = self.drag;
        props
    }

    /// Pushes fresh props into every row, creating rows for new channels and
    /// pruning registrations for removed ones, then rebuilds the flat list.
    fn sync_rows(&mut self, cx: &mut Context<Self>) {
        for category in &mut self.categories {
            sort_category(category, &self.last_activity);
        }

        let mut live_ids = HashSet::new();
        let mut flat_items = Vec::new();
        let mut item_sizes = Vec::new();

        let categories = self.categories.clone();
        for category in &categories {
            flat_items.push(SidebarEntry::CategoryHeader {
                category_id: category.id,
                name: SharedString::from(category.name.clone()),
                collapsed: category.collapsed,
            });
            item_sizes.push(size(px(0.), px(CATEGORY_HEADER_HEIGHT)));

            for (index, channel) in category.channels.iter().enumerate() {
                live_ids.insert(channel.id);
                let props = self.row_props(channel, category, index);
                let height = if props.is_collapsed() { 0.0 } else { ROW_HEIGHT };

                match self.registry.lookup(channel.id) {
                    Some(row) => {
                        row.update(cx, |row, cx| row.update_props(props, cx));
                    }
                    None => {
                        let registry = self.registry.clone();
                        let row = cx.new(|cx| SidebarChannelRow::new(props, registry, cx));
                        cx.subscribe(&row, Self::on_row_clicked).detach();
                    }
                }

                flat_items.push(SidebarEntry::Channel {
                    channel_id: channel.id,
                    category_id: category.id,
                    index,
                });
                item_sizes.push(size(px(0.), px(height)));
            }
        }

        for stale in self.registry.registered_ids() {
            if !live_ids.contains(&stale) {
                self.registry.deregister(stale);
            }
        }

        self.flat_items = flat_items;
        self.item_sizes = Rc::new(item_sizes);
    }

    fn render_header(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .w_full()
            .min_w_0()
            .items_center()
            .px_3()
            .pt(px(8.))
            .pb_2()
            .child(
                Label::new(self.team_name.clone())
                    .text_sm()
                    .text_color(theme.foreground.opacity(0.8)),
            )
    }

    fn render_channel_list(&mut self, cx: &mut Context<Self>) -> AnyElement {
        let items = self.flat_items.clone();
        let item_sizes = self.item_sizes.clone();
        let registry = self.registry.clone();

        v_flex()
            .flex_1()
            .min_h_0()
            .child(
                v_virtual_list(
                    cx.entity().clone(),
                    "channel-list",
                    item_sizes,
                    move |_this, visible_range, _scroll_handle, cx| {
                        let theme = cx.theme();

                        visible_range
                            .map(|index| match &items[index] {
                                SidebarEntry::CategoryHeader {
                                    category_id,
                                    name,
                                    collapsed,
                                } => {
                                    let category_id = *category_id;
                                    let chevron = if *collapsed {
                                        IconName::ChevronRight
                                    } else {
                                        IconName::ChevronDown
                                    };

                                    h_flex()
                                        .id(("category", category_id.0))
                                        .w_full()
                                        .h(px(CATEGORY_HEADER_HEIGHT))
                                        .px_3()
                                        .items_center()
                                        .gap_1()
                                        .child(
                                            Icon::new(chevron)
                                                .size(px(12.))
                                                .text_color(theme.foreground.opacity(0.5)),
                                        )
                                        .child(
                                            Label::new(name.clone())
                                                .text_xs()
                                                .text_color(theme.foreground.opacity(0.5)),
                                        )
                                        .on_click(cx.listener(
                                            move |this, _event: &ClickEvent, _window, cx| {
                                                this.toggle_category(category_id, cx);
                                            },
                                        ))
                                        .on_drag(
                                            DraggedCategory { category_id },
                                            |_, _, _, cx| cx.new(|_| EmptyDragPreview),
                                        )
                                        .on_drag_move::<DraggedCategory>(cx.listener(
                                            move |this,
                                                  event: &DragMoveEvent<DraggedCategory>,
                                                  _window,
                                                  cx| {
                                                let dragged = *event.drag(cx);
                                                this.note_category_drag(dragged.category_id, cx);
                                            },
                                        ))
                                        .on_drop(cx.listener(
                                            move |this, dragged: &DraggedCategory, _window, cx| {
                                                this.handle_category_drop(
                                                    *dragged,
                                                    category_id,
                                                    cx,
                                                );
                                            },
                                        ))
                                        .into_any_element()
                                }
                                SidebarEntry::Channel {
                                    channel_id,
                                    category_id,
                                    index,
                                } => {
                                    let channel_id = *channel_id;
                                    let category_id = *category_id;
                                    let slot_index = *index;

                                    div()
                                        .id(("channel-slot", channel_id.0))
                                        .w_full()
                                        .px_2()
                                        .drag_over::<DraggedChannel>(|style, _, _, cx| {
                                            style.bg(cx.theme().muted.opacity(0.5))
                                        })
                                        .on_drag_move::<DraggedChannel>(cx.listener(
                                            move |this,
                                                  event: &DragMoveEvent<DraggedChannel>,
                                                  _window,
                                                  cx| {
                                                let dragged = *event.drag(cx);
                                                this.note_channel_drag(dragged.channel_id, cx);
                                            },
                                        ))
                                        .on_drop(cx.listener(
                                            move |this, dragged: &DraggedChannel, _window, cx| {
                                                this.handle_channel_drop(
                                                    *dragged,
                                                    category_id,
                                                    slot_index,
                                                    cx,
                                                );
                                            },
                                        ))
                                        // A missing row handle is skipped, not an error.
                                        .when_some(registry.lookup(channel_id), |el, row| {
                                            el.child(row)
                                        })
                                        .into_any_element()
                                }
                            })
                            .collect()
                    },
                )
                .w_full()
                .flex_1()
                .track_scroll(&self.scroll_handle),
            )
            .into_any_element()
    }

    fn render_footer(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .w_full()
            .min_w_0()
            .items_center()
            .justify_between()
            .px_3()
            .py_2()
            .border_t_1()
            .border_color(theme.border)
            .child(
                Icon::new(IconName::CircleUser)
                    .size(px(18.))
                    .text_color(theme.foreground),
            )
            .child(
                Button::new("sidebar-toggle")
                    .ghost()
                    .small()
                    .icon(IconName::PanelLeftClose)
                    .on_click(cx.listener(|_, _, _, cx| {
                        cx.emit(SidebarToggleClicked);
                    })),
            )
    }
}

impl Render for ChatSidebar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .size_full()
            .min_w_0()
            .overflow_hidden()
            .bg(theme.background)
            .on_drag_move::<DraggedChannel>(cx.listener(
                |this, event: &DragMoveEvent<DraggedChannel>, _window, cx| {
                    let dragged = *event.drag(cx);
                    this.note_channel_drag(dragged.channel_id, cx);
                },
            ))
            .on_drop(cx.listener(|this, _dragged: &DraggedChannel, _window, cx| {
                this.clear_stale_drag(cx);
            }))
            .on_drop(cx.listener(|this, _dragged: &DraggedCategory, _window, cx| {
                this.clear_stale_drag(cx);
            }))
            .child(self.render_header(cx))
            .child(self.render_channel_list(cx))
            .child(self.render_footer(cx))
    }
}

/// Invisible drag preview for category drags; only the cursor changes.
struct EmptyDragPreview;

impl Render for EmptyDragPreview {
    fn render(&mut self, _: &mut Window, _: &mut Context<Self>) -> impl IntoElement {
        div()
    }
}

fn seed_categories() -> Vec<SidebarCategory> {
    vec![
        SidebarCategory {
            id: CategoryId::new(1),
            name: "Favorites".to_string(),
            collapsed: false,
            sorting: CategorySorting::Manual,
            channels: vec![
                Channel::new(ChannelId::new(1), ChannelKind::Standard, "town-square"),
                Channel::new(ChannelId::new(2), ChannelKind::Standard, "random"),
            ],
        },
        SidebarCategory {
            id: CategoryId::new(2),
            name: "Channels".to_string(),
            collapsed: false,
            sorting: CategorySorting::Alphabetical,
            channels: vec![
                Channel::new(ChannelId::new(3), ChannelKind::Standard, "dev"),
                Channel::new(ChannelId::new(4), ChannelKind::Standard, "design"),
                Channel::new(ChannelId::new(5), ChannelKind::Standard, "support"),
            ],
        },
        SidebarCategory {
            id: CategoryId::new(3),
            name: "Direct Messages".to_string(),
            collapsed: false,
            sorting: CategorySorting::Recency,
            channels: vec![
                Channel::new(ChannelId::new(6), ChannelKind::Direct, "alice")
                    .with_companion_user("Alice Park"),
                Channel::new(ChannelId::new(7), ChannelKind::Direct, "bob")
                    .with_companion_user("Bob Tran"),
                Channel::new(ChannelId::new(8), ChannelKind::Group, "alice, bob, carol"),
            ],
        },
    ]
}

fn seed_activity() -> HashMap<ChannelId, u64> {
    HashMap::from([
        (ChannelId::new(6), 1_000),
        (ChannelId::new(7), 3_000),
        (ChannelId::new(8), 2_000),
    ])
}

/// Selection outcome of one row click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickOutcome {
    Focus,
    SelectionChanged,
}

/// Applies one row click to the multi-select batch. Plain clicks never touch
/// the batch; modifier clicks toggle membership without moving focus.
fn apply_row_click(
    batch: &mut HashSet<ChannelId>,
    channel_id: ChannelId,
    extend_selection: bool,
) -> ClickOutcome {
    if !extend_selection {
        return ClickOutcome::Focus;
    }

    if !batch.remove(&channel_id) {
        batch.insert(channel_id);
    }
    ClickOutcome::SelectionChanged
}

/// Insertion index that keeps a drop at the slot the cursor indicated once
/// the moving channels have been removed from the target category.
fn insertion_index_after_removal(
    channels: &[Channel],
    target_index: usize,
    moving: &[ChannelId],
) -> usize {
    channels
        .iter()
        .take(target_index.min(channels.len()))
        .filter(|channel| !moving.contains(&channel.id))
        .count()
}

/// Channel ids in current visual order, category by category.
fn channel_order(categories: &[SidebarCategory]) -> Vec<ChannelId> {
    categories
        .iter()
        .flat_map(|category| category.channels.iter().map(|channel| channel.id))
        .collect()
}

/// Removes the given channels from whichever categories hold them, returning
/// them in the order `ids` lists.
fn remove_channels(categories: &mut [SidebarCategory], ids: &[ChannelId]) -> Vec<Channel> {
    let mut extracted: Vec<Channel> = Vec::with_capacity(ids.len());

    for category in categories.iter_mut() {
        category.channels.retain(|channel| {
            if ids.contains(&channel.id) {
                extracted.push(channel.clone());
                false
            } else {
                true
            }
        });
    }

    extracted.sort_by_key(|channel| ids.iter().position(|id| *id == channel.id));
    extracted
}

fn insert_channels(category: &mut SidebarCategory, index: usize, channels: Vec<Channel>) {
    let index = index.min(category.channels.len());
    for (offset, channel) in channels.into_iter().enumerate() {
        category.channels.insert(index + offset, channel);
    }
}

/// Reapplies the category's computed order, if it has one.
fn sort_category(category: &mut SidebarCategory, last_activity: &HashMap<ChannelId, u64>) {
    match category.sorting {
        CategorySorting::Manual => {}
        CategorySorting::Alphabetical => {
            category
                .channels
                .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        CategorySorting::Recency => {
            category.channels.sort_by_key(|channel| {
                std::cmp::Reverse(last_activity.get(&channel.id).copied().unwrap_or(0))
            });
        }
    }
}

fn move_category_before(
    categories: &mut Vec<SidebarCategory>,
    dragged: CategoryId,
    target: CategoryId,
) {
    let Some(from) = categories.iter().position(|category| category.id == dragged) else {
        return;
    };
    let moved = categories.remove(from);
    let to = categories
        .iter()
        .position(|category| category.id == target)
        .unwrap_or(categories.len());
    categories.insert(to, moved);
}

#[cfg(test)]
mod tests {
    use core::prelude::v1::test;
    use super::*;

    fn category(id: u64, sorting: CategorySorting, names: &[(u64, &str)]) -> SidebarCategory {
        SidebarCategory {
            id: CategoryId::new(id),
            name: format!("category-{id}"),
            collapsed: false,
            sorting,
            channels: names
                .iter()
                .map(|(raw, name)| Channel::new(ChannelId::new(*raw), ChannelKind::Standard, *name))
                .collect(),
        }
    }

    #[test]
    fn removing_a_batch_preserves_the_requested_order() {
        let mut categories = vec![
            category(1, CategorySorting::Manual, &[(1, "a"), (2, "b")]),
            category(2, CategorySorting::Manual, &[(3, "c"), (4, "d")]),
        ];

        let moved = remove_channels(
            &mut categories,
            &[ChannelId::new(4), ChannelId::new(1)],
        );

        let moved_ids: Vec<ChannelId> = moved.iter().map(|channel| channel.id).collect();
        assert_eq!(moved_ids, vec![ChannelId::new(4), ChannelId::new(1)]);
        assert_eq!(channel_order(&categories), vec![ChannelId::new(2), ChannelId::new(3)]);
    }

    #[test]
    fn modifier_clicks_toggle_batch_membership_without_moving_focus() {
        let mut batch = HashSet::new();

        assert_eq!(
            apply_row_click(&mut batch, ChannelId::new(1), true),
            ClickOutcome::SelectionChanged
        );
        assert!(batch.contains(&ChannelId::new(1)));

        assert_eq!(
            apply_row_click(&mut batch, ChannelId::new(1), true),
            ClickOutcome::SelectionChanged
        );
        assert!(batch.is_empty());
    }

    #[test]
    fn plain_clicks_focus_and_leave_the_batch_untouched() {
        let mut batch = HashSet::from([ChannelId::new(2)]);

        assert_eq!(
            apply_row_click(&mut batch, ChannelId::new(1), false),
            ClickOutcome::Focus
        );
        assert_eq!(batch, HashSet::from([ChannelId::new(2)]));
    }

    #[test]
    fn dropping_below_the_original_position_lands_at_the_cursor_slot() {
        let mut categories = vec![category(
            1,
            CategorySorting::Manual,
            &[(1, "a"), (2, "b"), (3, "c"), (4, "d")],
        )];
        let moving = vec![ChannelId::new(1)];

        // The cursor sits on the slot before "d" in the pre-removal order.
        let index = insertion_index_after_removal(&categories[0].channels, 3, &moving);
        assert_eq!(index, 2);

        let moved = remove_channels(&mut categories, &moving);
        insert_channels(&mut categories[0], index, moved);
        assert_eq!(
            channel_order(&categories),
            vec![
                ChannelId::new(2),
                ChannelId::new(3),
                ChannelId::new(1),
                ChannelId::new(4)
            ]
        );
    }

    #[test]
    fn batch_drops_account_for_every_removed_member_above_the_slot() {
        let target = category(
            1,
            CategorySorting::Manual,
            &[(1, "a"), (2, "b"), (3, "c"), (4, "d")],
        );
        let moving = vec![ChannelId::new(1), ChannelId::new(2)];

        assert_eq!(insertion_index_after_removal(&target.channels, 4, &moving), 2);
    }

    #[test]
    fn cross_category_drops_keep_the_raw_slot_index() {
        let target = category(2, CategorySorting::Manual, &[(5, "e"), (6, "f")]);

        assert_eq!(
            insertion_index_after_removal(&target.channels, 1, &[ChannelId::new(1)]),
            1
        );
    }

    #[test]
    fn inserting_clamps_out_of_range_indices() {
        let mut target = category(1, CategorySorting::Manual, &[(1, "a")]);
        insert_channels(
            &mut target,
            99,
            vec![Channel::new(ChannelId::new(2), ChannelKind::Standard, "b")],
        );

        assert_eq!(
            target.channels.last().map(|channel| channel.id),
            Some(ChannelId::new(2))
        );
    }

    #[test]
    fn alphabetical_categories_resort_after_mutation() {
        let mut target = category(
            1,
            CategorySorting::Alphabetical,
            &[(1, "zeta"), (2, "Alpha"), (3, "midway")],
        );
        sort_category(&mut target, &HashMap::new());

        let names: Vec<&str> = target
            .channels
            .iter()
            .map(|channel| channel.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "midway", "zeta"]);
    }

    #[test]
    fn recency_categories_order_by_latest_activity() {
        let mut target = category(1, CategorySorting::Recency, &[(1, "a"), (2, "b"), (3, "c")]);
        let activity = HashMap::from([
            (ChannelId::new(1), 10),
            (ChannelId::new(2), 30),
            (ChannelId::new(3), 20),
        ]);
        sort_category(&mut target, &activity);

        let ids: Vec<ChannelId> = target.channels.iter().map(|channel| channel.id).collect();
        assert_eq!(ids, vec![ChannelId::new(2), ChannelId::new(3), ChannelId::new(1)]);
    }

    #[test]
    fn manual_categories_keep_user_order() {
        let mut target = category(1, CategorySorting::Manual, &[(2, "b"), (1, "a")]);
        sort_category(&mut target, &HashMap::new());

        let ids: Vec<ChannelId> = target.channels.iter().map(|channel| channel.id).collect();
        assert_eq!(ids, vec![ChannelId::new(2), ChannelId::new(1)]);
    }

    #[test]
    fn dragged_category_lands_before_its_target() {
        let mut categories = vec![
            category(1, CategorySorting::Manual, &[]),
            category(2, CategorySorting::Manual, &[]),
            category(3, CategorySorting::Manual, &[]),
        ];

        move_category_before(&mut categories, CategoryId::new(3), CategoryId::new(1));

        let ids: Vec<CategoryId> = categories.iter().map(|category| category.id).collect();
        assert_eq!(
            ids,
            vec![CategoryId::new(3), CategoryId::new(1), CategoryId::new(2)]
        );
    }
}
