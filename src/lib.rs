// SPDX-License-Identifier: GPL-3.0

//! Core of a media player's main interface: UI-wide state and persistence,
//! engine callback bridging, the system tray, drag and drop, bookmarks,
//! player control filtering and interface scaling.

pub mod bridge;
pub mod constants;
pub mod dnd;
pub mod engine;
pub mod error;
pub mod interface;
pub mod key_bind;
pub mod library;
pub mod main_ctx;
pub mod models;
pub mod platform;
pub mod playback_state;
pub mod player;
pub mod scale;
pub mod settings;
pub mod signal;
pub mod systray;

#[cfg(test)]
mod testing;

pub use error::{IntfError, Result};
pub use interface::Interface;
pub use main_ctx::{Collaborators, CtxEvent, MainCtx, Property};
