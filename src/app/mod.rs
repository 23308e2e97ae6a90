//! Application orchestration: state, the terminal scroll host, and input
//! handling.

pub mod event;
pub mod handler;
pub mod state;
pub mod viewport;
