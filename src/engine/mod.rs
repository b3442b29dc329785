// SPDX-License-Identifier: GPL-3.0

//! The seam to the playback engine.
//!
//! Everything here may be called from, or call back into, arbitrary engine
//! threads, hence `Send + Sync` throughout.

pub mod memory;
pub mod options;

use crate::playback_state::PlayerState;
use std::fmt;
use std::sync::Arc;

pub use options::OptionReader;

/// A value held by an engine option or variable.
#[derive(Clone, Debug, PartialEq)]
pub enum VarValue {
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl VarValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VarValue::Bool(b) => Some(*b),
            VarValue::Int(i) => Some(*i != 0),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            VarValue::Int(i) => Some(*i),
            VarValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            VarValue::Float(f) => Some(*f),
            VarValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VarValue::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Invoked by the engine, on its own thread, with the variable's new value.
pub type VarCallback = Arc<dyn Fn(&VarValue) + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    UnknownVariable(String),
    Registration(String),
    Closed,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownVariable(name) => write!(f, "unknown variable {name:?}"),
            EngineError::Registration(reason) => write!(f, "registration refused: {reason}"),
            EngineError::Closed => write!(f, "engine is shutting down"),
        }
    }
}

impl std::error::Error for EngineError {}

pub trait Engine: Send + Sync {
    /// Inherited configuration value, `None` when the engine has no such option.
    fn option(&self, name: &str) -> Option<VarValue>;

    /// Publish a value on an engine variable. Callbacks run before this returns.
    fn set_variable(&self, name: &str, value: VarValue);

    fn add_callback(&self, variable: &str, callback: VarCallback)
    -> Result<CallbackId, EngineError>;

    fn del_callback(&self, variable: &str, id: CallbackId);
}

/// A playable item held by the engine. Shared between the engine thread
/// and the GUI thread; it lives as long as its longest holder.
#[derive(Debug, PartialEq, Eq)]
pub struct MediaItem {
    pub uri: String,
    pub name: String,
}

impl MediaItem {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            uri: uri.into(),
            name: name.into(),
        })
    }
}

/// Player events as delivered on engine threads.
pub trait PlayerListener: Send + Sync {
    fn on_current_media_changed(&self, media: Option<Arc<MediaItem>>);
    fn on_state_changed(&self, state: PlayerState);
}

/// The engine-level player.
pub trait EnginePlayer: Send + Sync {
    fn add_listener(&self, listener: Arc<dyn PlayerListener>) -> Result<ListenerId, EngineError>;
    fn remove_listener(&self, id: ListenerId);
    fn current_media(&self) -> Option<Arc<MediaItem>>;
    /// Current playback time in milliseconds, `None` when nothing plays.
    fn time_ms(&self) -> Option<i64>;
    fn seek_ms(&self, time_ms: i64);
}
