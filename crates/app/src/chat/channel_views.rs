use gpui::*;
use gpui_component::{ActiveTheme, Icon, IconName, h_flex, label::Label};

use murmur_sidebar::{Channel, ChannelKind};

/// The three mutually exclusive body renderers a row can delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRenderer {
    Direct,
    Group,
    Standard,
}

/// Maps a channel kind to its body renderer. Direct and group kinds get their
/// dedicated renderers; everything else renders as a standard channel.
pub fn renderer_for(kind: ChannelKind) -> BodyRenderer {
    match kind {
        ChannelKind::Direct => BodyRenderer::Direct,
        ChannelKind::Group => BodyRenderer::Group,
        ChannelKind::Standard => BodyRenderer::Standard,
    }
}

/// Renders the inner body for one channel row.
pub fn render_channel_body(channel: &Channel, team_name: &str, cx: &mut App) -> AnyElement {
    match renderer_for(channel.kind) {
        BodyRenderer::Direct => render_direct_channel(channel, team_name, cx),
        BodyRenderer::Group => render_group_channel(channel, team_name, cx),
        BodyRenderer::Standard => render_standard_channel(channel, team_name, cx),
    }
}

/// Label for a direct channel: the companion user when known, otherwise the
/// raw channel name.
pub fn direct_channel_label(channel: &Channel) -> String {
    channel
        .companion_user
        .clone()
        .unwrap_or_else(|| channel.name.clone())
}

pub fn group_channel_label(channel: &Channel) -> String {
    channel.name.clone()
}

pub fn standard_channel_label(channel: &Channel) -> String {
    format!("#{}", channel.name)
}

fn render_direct_channel(channel: &Channel, _team_name: &str, cx: &mut App) -> AnyElement {
    let label = direct_channel_label(channel);
    let theme = cx.theme();

    h_flex()
        .flex_1()
        .min_w_0()
        .items_center()
        .gap_2()
        .child(
            Icon::new(IconName::CircleUser)
                .size(px(14.))
                .text_color(theme.foreground.opacity(0.7)),
        )
        .child(
            div()
                .flex_1()
                .min_w_0()
                .truncate()
                .child(Label::new(label).text_sm()),
        )
        .into_any_element()
}

fn render_group_channel(channel: &Channel, _team_name: &str, cx: &mut App) -> AnyElement {
    let label = group_channel_label(channel);
    let theme = cx.theme();

    h_flex()
        .flex_1()
        .min_w_0()
        .items_center()
        .gap_2()
        .child(
            Label::new("G")
                .text_xs()
                .text_color(theme.foreground.opacity(0.6)),
        )
        .child(
            div()
                .flex_1()
                .min_w_0()
                .truncate()
                .child(Label::new(label).text_sm()),
        )
        .into_any_element()
}

fn render_standard_channel(channel: &Channel, team_name: &str, cx: &mut App) -> AnyElement {
    let label = standard_channel_label(channel);
    let theme = cx.theme();

    h_flex()
        .flex_1()
        .min_w_0()
        .items_center()
        .gap_2()
        .child(
            div()
                .flex_1()
                .min_w_0()
                .truncate()
                .child(Label::new(label).text_sm()),
        )
        .child(
            Label::new(team_name.to_string())
                .text_xs()
                .text_color(theme.foreground.opacity(0.45)),
        )
        .into_any_element()
}

#[cfg(test)]
mod tests {
    use core::prelude::v1::test;
    use super::*;
    use murmur_sidebar::ChannelId;

    fn channel(kind: ChannelKind) -> Channel {
        Channel::new(ChannelId::new(1), kind, "town-square")
    }

    #[test]
    fn kind_routing_is_exhaustive_and_exclusive() {
        assert_eq!(renderer_for(ChannelKind::Direct), BodyRenderer::Direct);
        assert_eq!(renderer_for(ChannelKind::Group), BodyRenderer::Group);
        assert_eq!(renderer_for(ChannelKind::Standard), BodyRenderer::Standard);
    }

    #[test]
    fn direct_label_prefers_the_companion_user() {
        let with_companion = channel(ChannelKind::Direct).with_companion_user("Alice Park");
        assert_eq!(direct_channel_label(&with_companion), "Alice Park");

        // Missing companion name degrades to the raw channel name.
        assert_eq!(direct_channel_label(&channel(ChannelKind::Direct)), "town-square");
    }

    #[test]
    fn standard_label_carries_the_hash_prefix() {
        assert_eq!(standard_channel_label(&channel(ChannelKind::Standard)), "#town-square");
        assert_eq!(group_channel_label(&channel(ChannelKind::Group)), "town-square");
    }
}
