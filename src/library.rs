// SPDX-License-Identifier: GPL-3.0

use std::fmt;

/// A named timestamp within a media, as stored by the media library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bookmark {
    pub media_id: u64,
    pub time_ms: i64,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BookmarkSort {
    #[default]
    InsertionDate,
    Alpha,
    Time,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    NotFound(String),
    Backend(String),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::NotFound(s) => write!(f, "not found: {}", s),
            LibraryError::Backend(s) => write!(f, "backend error: {}", s),
        }
    }
}

impl std::error::Error for LibraryError {}

/// Reply to a media id lookup; may be invoked on any thread.
pub type MediaIdReply = Box<dyn FnOnce(Option<u64>) + Send>;
/// Reply to a bookmark listing; may be invoked on any thread. Dropping it
/// unanswered counts as a failed listing.
pub type BookmarksReply = Box<dyn FnOnce(Result<Vec<Bookmark>, LibraryError>) + Send>;

/// The media library as used by the bookmark model.
///
/// Lookups are asynchronous: the implementation may run them on its own
/// worker and invoke the reply later. Mutations are quick writes.
pub trait MediaLibrary {
    fn resolve_media_id(&self, uri: &str, reply: MediaIdReply);
    fn list_bookmarks(&self, media_id: u64, sort: BookmarkSort, descending: bool, reply: BookmarksReply);

    fn add_bookmark(&self, media_id: u64, time_ms: i64) -> Result<(), LibraryError>;
    fn update_bookmark(
        &self,
        media_id: u64,
        time_ms: i64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), LibraryError>;
    fn remove_bookmark(&self, media_id: u64, time_ms: i64) -> Result<(), LibraryError>;
    fn remove_all_bookmarks(&self, media_id: u64) -> Result<(), LibraryError>;
}
