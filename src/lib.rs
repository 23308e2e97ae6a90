//! Scroll coordination for a single-page portfolio.
//!
//! [`core`] holds the host-agnostic pieces: the [`ScrollCoordinator`] that
//! tracks the active section and drives programmatic scrolls, and the
//! [`TimelineBall`] animator.  [`app`] and [`ui`] wire them to a terminal
//! front end.
//!
//! [`ScrollCoordinator`]: core::coordinator::ScrollCoordinator
//! [`TimelineBall`]: core::timeline_ball::TimelineBall

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
