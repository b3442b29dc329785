// SPDX-License-Identifier: GPL-3.0

use crate::engine::EngineError;
use crate::library::LibraryError;
use std::fmt;

/// Errors surfaced by the interface core.
#[derive(Debug)]
pub enum IntfError {
    /// An engine callback could not be registered. Fatal at startup.
    CallbackRegistration {
        variable: String,
        source: EngineError,
    },
    /// A system tray was requested but the platform has none.
    SystrayUnavailable,
    /// The media library could not map a URI to a media id.
    MediaResolution(String),
    /// A dropped URL could not be turned into a media reference.
    DropIngest(String),
    /// An engine option is not known to the engine.
    ConfigurationMissing(String),
    Library(LibraryError),
}

impl fmt::Display for IntfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntfError::CallbackRegistration { variable, source } => {
                write!(f, "cannot register callback on {variable:?}: {source}")
            }
            IntfError::SystrayUnavailable => write!(f, "system tray is not available"),
            IntfError::MediaResolution(uri) => write!(f, "no media id for {uri:?}"),
            IntfError::DropIngest(url) => write!(f, "cannot ingest dropped url {url:?}"),
            IntfError::ConfigurationMissing(name) => write!(f, "option {name:?} is not set"),
            IntfError::Library(e) => write!(f, "media library error: {e}"),
        }
    }
}

impl std::error::Error for IntfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntfError::CallbackRegistration { source, .. } => Some(source),
            IntfError::Library(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibraryError> for IntfError {
    fn from(err: LibraryError) -> Self {
        IntfError::Library(err)
    }
}

pub type Result<T> = std::result::Result<T, IntfError>;
