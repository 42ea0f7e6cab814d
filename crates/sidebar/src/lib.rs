//! Sidebar-row domain logic, intentionally free of any UI framework types.
//!
//! Everything here is a pure function of per-render inputs except
//! [`RowVisibility`], which deliberately lags the collapse derivation by one
//! animation cycle.

pub mod category;
pub mod channel;
pub mod collapse;
pub mod drag;
pub mod style;
pub mod visibility;

pub use category::{CategoryId, CategorySorting};
pub use channel::{Channel, ChannelId, ChannelKind};
pub use collapse::CollapseInputs;
pub use drag::{DragFeedback, DragSnapshot, selected_count_label};
pub use style::{RowProps, RowStyle};
pub use visibility::{AnimationEvent, AnimationKind, AnimationPhase, RowVisibility};
