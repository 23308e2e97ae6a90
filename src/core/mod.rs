//! Core scroll logic – the coordinator, the timeline ball, sidebar sync and
//! the page model they operate on.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Hosts
//! plug in through [`host::ScrollHost`].

pub mod coordinator;
pub mod geometry;
pub mod host;
pub mod page;
pub mod sidebar;
pub mod timeline_ball;

pub use coordinator::{
    CoordinatorConfig, ScrollCoordinator, ScrollMode, ScrollOutcome, ScrollSnapshot, ScrollToOptions,
};
pub use geometry::Rect;
pub use host::{ScrollBehavior, ScrollHost};
pub use timeline_ball::{BallConfig, BallState, Interpolation, TimelineBall};
