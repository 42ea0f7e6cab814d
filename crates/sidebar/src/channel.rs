/// Stable identifier for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u64);

impl ChannelId {
    /// Creates a typed channel identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Channel flavor, deciding which body renderer a sidebar row delegates to.
///
/// Routing is exhaustive: anything that is not direct or group renders as a
/// standard team channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// One-to-one conversation with a single companion user.
    Direct,
    /// Multi-party conversation without a named channel.
    Group,
    /// Named, team-scoped channel.
    Standard,
}

/// Read-only channel descriptor supplied by the parent list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub kind: ChannelKind,
    pub name: String,
    /// Display name of the other participant for direct channels.
    /// Absent names simply omit the companion label downstream.
    pub companion_user: Option<String>,
}

impl Channel {
    pub fn new(id: ChannelId, kind: ChannelKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            companion_user: None,
        }
    }

    pub fn with_companion_user(mut self, companion_user: impl Into<String>) -> Self {
        self.companion_user = Some(companion_user.into());
        self
    }
}
