//! # centro-console
//!
//! The agent-facing presentation layer. Everything here is a pure
//! function of a [`centro_client::SessionSnapshot`]: the status line,
//! the presence badge, control gating, and the call-history rows carry
//! no state of their own and make no decisions the controller has not
//! already made.
//!
//! The crate also holds the static page shells the server renders for
//! its browser routes.

pub mod pages;
pub mod status;
pub mod view;

pub use status::status_line;
pub use view::{
    CallCenterView, Controls, HistoryRow, PresenceBadge, format_duration, presence_badge,
    stage_banner,
};
