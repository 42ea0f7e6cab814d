use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use murmur_sidebar::ChannelId;

/// Parent-owned registry of rendered row handles keyed by channel id.
///
/// Rows hold a clone but only ever look up or register entries; the parent
/// list is the sole owner and the only code that prunes or iterates the map.
/// All access happens synchronously on the UI thread, hence `Rc<RefCell<_>>`.
pub struct RowRegistry<T> {
    rows: Rc<RefCell<HashMap<ChannelId, T>>>,
}

impl<T> Clone for RowRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Rc::clone(&self.rows),
        }
    }
}

impl<T> Default for RowRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RowRegistry<T> {
    pub fn new() -> Self {
        Self {
            rows: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn register(&self, channel_id: ChannelId, handle: T) {
        if self.rows.borrow_mut().insert(channel_id, handle).is_some() {
            tracing::debug!(?channel_id, "replaced an existing row registration");
        }
    }

    pub fn deregister(&self, channel_id: ChannelId) -> Option<T> {
        self.rows.borrow_mut().remove(&channel_id)
    }

    pub fn registered_ids(&self) -> Vec<ChannelId> {
        self.rows.borrow().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl<T: Clone> RowRegistry<T> {
    pub fn lookup(&self, channel_id: ChannelId) -> Option<T> {
        self.rows.borrow().get(&channel_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ChannelId = ChannelId::new(1);
    const B: ChannelId = ChannelId::new(2);

    #[test]
    fn lookup_returns_only_registered_handles() {
        let registry = RowRegistry::new();
        registry.register(A, "row-a");

        assert_eq!(registry.lookup(A), Some("row-a"));
        assert_eq!(registry.lookup(B), None);
    }

    #[test]
    fn registration_replaces_and_deregistration_removes() {
        let registry = RowRegistry::new();
        registry.register(A, "old");
        registry.register(A, "new");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(A), Some("new"));

        assert_eq!(registry.deregister(A), Some("new"));
        assert!(registry.is_empty());
        assert_eq!(registry.deregister(A), None);
    }

    #[test]
    fn clones_share_one_underlying_map() {
        let registry = RowRegistry::new();
        let handle_for_row = registry.clone();
        handle_for_row.register(B, 42u32);

        assert_eq!(registry.lookup(B), Some(42));
    }
}
