//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No scroll state is decided here.

pub mod bars;
pub mod layout;
pub mod navbar;
pub mod page_widget;
pub mod smooth_scroll;
pub mod theme;
pub mod timeline;
