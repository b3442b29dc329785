// SPDX-License-Identifier: GPL-3.0

//! Bookmarks of the media currently played.
//!
//! The player notifies media changes on its own thread. The listener bumps a
//! revision under the mutex and posts the new URI to the GUI queue; every
//! later step checks that revision so only the latest media ever reaches the
//! rows.

use super::{ModelEvent, SortOrder};
use crate::bridge::{GuiQueue, Message, PlayerRegistration};
use crate::engine::{EnginePlayer, MediaItem, PlayerListener};
use crate::error::IntfError;
use crate::library::{Bookmark, BookmarkSort, LibraryError, MediaLibrary};
use crate::playback_state::PlayerState;
use crate::signal::Signal;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Identifies a model instance in queued messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelId(u64);

impl ModelId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ModelId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Debug)]
pub enum BookmarkMessage {
    UpdateMediaId {
        revision: u64,
        uri: Option<String>,
    },
    MediaIdResolved {
        revision: u64,
        media_id: Option<u64>,
    },
    BookmarksFetched {
        serial: u64,
        media_id: u64,
        bookmarks: Result<Vec<Bookmark>, LibraryError>,
    },
    PlayingStateChanged(PlayerState),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookmarkColumn {
    Name = 0,
    Description = 1,
    Time = 2,
}

impl BookmarkColumn {
    pub const COUNT: usize = 3;

    pub fn from_index(column: usize) -> Option<Self> {
        match column {
            0 => Some(BookmarkColumn::Name),
            1 => Some(BookmarkColumn::Description),
            2 => Some(BookmarkColumn::Time),
            _ => None,
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            BookmarkColumn::Name => "Name",
            BookmarkColumn::Description => "Description",
            BookmarkColumn::Time => "Time",
        }
    }

    pub fn is_editable(self) -> bool {
        !matches!(self, BookmarkColumn::Time)
    }

    fn sort(self) -> BookmarkSort {
        match self {
            BookmarkColumn::Name => BookmarkSort::Alpha,
            BookmarkColumn::Time => BookmarkSort::Time,
            BookmarkColumn::Description => BookmarkSort::InsertionDate,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookmarkEntry {
    pub index: usize,
    pub time_ms: i64,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RefreshOperation {
    Refresh,
    Clear,
}

#[derive(Default)]
struct Tracked {
    current_item: Option<Arc<MediaItem>>,
    revision: u64,
}

fn lock(tracked: &Mutex<Tracked>) -> MutexGuard<'_, Tracked> {
    tracked.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Listener {
    model: ModelId,
    tracked: Arc<Mutex<Tracked>>,
    queue: GuiQueue,
}

impl Listener {
    fn track(&self, item: Option<Arc<MediaItem>>) {
        let (revision, uri) = {
            let mut tracked = lock(&self.tracked);
            let uri = item.as_ref().map(|item| item.uri.clone());
            tracked.current_item = item;
            tracked.revision += 1;
            (tracked.revision, uri)
        };
        self.queue.post(Message::Bookmarks(
            self.model,
            BookmarkMessage::UpdateMediaId { revision, uri },
        ));
    }
}

impl PlayerListener for Listener {
    fn on_current_media_changed(&self, media: Option<Arc<MediaItem>>) {
        self.track(media);
    }

    fn on_state_changed(&self, state: PlayerState) {
        if matches!(state, PlayerState::Playing | PlayerState::Stopped) {
            self.queue.post(Message::Bookmarks(
                self.model,
                BookmarkMessage::PlayingStateChanged(state),
            ));
        }
    }
}

pub struct BookmarkModel {
    id: ModelId,
    player: Arc<dyn EnginePlayer>,
    library: Rc<dyn MediaLibrary>,
    queue: GuiQueue,
    tracked: Arc<Mutex<Tracked>>,
    _registration: PlayerRegistration,

    current_media_id: u64,
    rows: Vec<BookmarkEntry>,
    pending_reset_count: u32,
    fetch_serial: u64,
    sort: BookmarkSort,
    descending: bool,
    events: Signal<ModelEvent>,
}

impl BookmarkModel {
    pub fn new(
        player: Arc<dyn EnginePlayer>,
        library: Rc<dyn MediaLibrary>,
        queue: GuiQueue,
    ) -> Result<Self, IntfError> {
        let id = ModelId::next();
        let tracked = Arc::new(Mutex::new(Tracked::default()));
        let listener = Arc::new(Listener {
            model: id,
            tracked: tracked.clone(),
            queue: queue.clone(),
        });
        let registration = PlayerRegistration::register(player.clone(), listener.clone())?;

        if let Some(media) = player.current_media() {
            listener.track(Some(media));
        }

        Ok(Self {
            id,
            player,
            library,
            queue,
            tracked,
            _registration: registration,
            current_media_id: 0,
            rows: Vec::new(),
            pending_reset_count: 0,
            fetch_serial: 0,
            sort: BookmarkSort::default(),
            descending: false,
            events: Signal::new(),
        })
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn events(&self) -> &Signal<ModelEvent> {
        &self.events
    }

    pub fn current_media_id(&self) -> u64 {
        self.current_media_id
    }

    pub fn pending_reset_count(&self) -> u32 {
        self.pending_reset_count
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        BookmarkColumn::COUNT
    }

    pub fn rows(&self) -> &[BookmarkEntry] {
        &self.rows
    }

    pub fn sort_criterion(&self) -> (BookmarkSort, bool) {
        (self.sort, self.descending)
    }

    pub fn data(&self, row: usize, column: BookmarkColumn) -> Option<String> {
        let entry = self.rows.get(row)?;
        Some(match column {
            BookmarkColumn::Name => entry.name.clone(),
            BookmarkColumn::Description => entry.description.clone(),
            BookmarkColumn::Time => format_time(entry.time_ms),
        })
    }

    pub fn handle(&mut self, message: BookmarkMessage) {
        match message {
            BookmarkMessage::UpdateMediaId { revision, uri } => self.update_media_id(revision, uri),
            BookmarkMessage::MediaIdResolved { revision, media_id } => {
                self.media_id_resolved(revision, media_id)
            }
            BookmarkMessage::BookmarksFetched {
                serial,
                media_id,
                bookmarks,
            } => self.bookmarks_fetched(serial, media_id, bookmarks),
            BookmarkMessage::PlayingStateChanged(PlayerState::Playing) => {
                self.refresh(RefreshOperation::Refresh)
            }
            BookmarkMessage::PlayingStateChanged(PlayerState::Stopped) => {
                self.refresh(RefreshOperation::Clear)
            }
            BookmarkMessage::PlayingStateChanged(_) => {}
        }
    }

    fn is_current(&self, revision: u64) -> bool {
        lock(&self.tracked).revision == revision
    }

    fn update_media_id(&mut self, revision: u64, uri: Option<String>) {
        if !self.is_current(revision) {
            return;
        }

        let Some(uri) = uri else {
            self.current_media_id = 0;
            self.refresh(RefreshOperation::Clear);
            return;
        };

        let queue = self.queue.clone();
        let model = self.id;
        self.library.resolve_media_id(
            &uri,
            Box::new(move |media_id| {
                queue.post(Message::Bookmarks(
                    model,
                    BookmarkMessage::MediaIdResolved { revision, media_id },
                ));
            }),
        );
    }

    fn media_id_resolved(&mut self, revision: u64, media_id: Option<u64>) {
        if !self.is_current(revision) {
            log::debug!("dropping media id of superseded revision {revision}");
            return;
        }

        match media_id {
            Some(media_id) => {
                self.current_media_id = media_id;
                self.refresh(RefreshOperation::Refresh);
            }
            None => {
                let uri = lock(&self.tracked)
                    .current_item
                    .as_ref()
                    .map(|item| item.uri.clone())
                    .unwrap_or_default();
                log::warn!("{}", IntfError::MediaResolution(uri));
                self.current_media_id = 0;
                self.refresh(RefreshOperation::Clear);
            }
        }
    }

    fn refresh(&mut self, operation: RefreshOperation) {
        // Any fetch still in flight is now stale.
        self.fetch_serial += 1;

        if operation == RefreshOperation::Clear || self.current_media_id == 0 {
            self.begin_reset();
            self.rows.clear();
            self.end_reset();
            return;
        }

        self.begin_reset();
        let mut reply = FetchReply {
            queue: self.queue.clone(),
            model: self.id,
            serial: self.fetch_serial,
            media_id: self.current_media_id,
            answered: false,
        };
        self.library.list_bookmarks(
            self.current_media_id,
            self.sort,
            self.descending,
            Box::new(move |bookmarks| reply.send(bookmarks)),
        );
    }

    fn bookmarks_fetched(
        &mut self,
        serial: u64,
        media_id: u64,
        bookmarks: Result<Vec<Bookmark>, LibraryError>,
    ) {
        let current = serial == self.fetch_serial && media_id == self.current_media_id;
        match bookmarks {
            Ok(bookmarks) if current => self.apply_rows(bookmarks),
            Ok(_) => log::debug!("dropping stale bookmark listing {serial}"),
            Err(err) => log::warn!("cannot list bookmarks of media {media_id}: {err}"),
        }
        self.end_reset();
    }

    fn apply_rows(&mut self, bookmarks: Vec<Bookmark>) {
        self.rows = bookmarks
                .into_iter()
                .enumerate()
                .map(|(index, bookmark)| BookmarkEntry {
                    index,
                    time_ms: bookmark.time_ms,
                    name: bookmark.name,
                    description: bookmark.description,
                })
                .collect();
    }

    fn begin_reset(&mut self) {
        if self.pending_reset_count == 0 {
            self.events.emit(&ModelEvent::BeginReset);
        }
        self.pending_reset_count += 1;
    }

    fn end_reset(&mut self) {
        let Some(count) = self.pending_reset_count.checked_sub(1) else {
            log::warn!("unbalanced bookmark model reset");
            return;
        };
        self.pending_reset_count = count;
        if count == 0 {
            self.events.emit(&ModelEvent::EndReset);
        }
    }

    /// Bookmark the current playback time.
    pub fn add(&mut self) -> Result<(), IntfError> {
        if self.current_media_id == 0 {
            return Ok(());
        }
        let Some(time_ms) = self.player.time_ms() else {
            log::debug!("no playback time to bookmark");
            return Ok(());
        };

        let name = format!("Bookmark {}", self.rows.len() + 1);
        self.library.add_bookmark(self.current_media_id, time_ms)?;
        let named = self
            .library
            .update_bookmark(self.current_media_id, time_ms, Some(&name), None);
        self.refresh(RefreshOperation::Refresh);
        named.map_err(IntfError::from)
    }

    pub fn remove(&mut self, rows: &[usize]) -> Result<(), IntfError> {
        if self.current_media_id == 0 {
            return Ok(());
        }
        let times: Vec<i64> = rows
            .iter()
            .filter_map(|row| self.rows.get(*row).map(|entry| entry.time_ms))
            .collect();
        let result = times
            .into_iter()
            .try_for_each(|time_ms| self.library.remove_bookmark(self.current_media_id, time_ms));
        self.refresh(RefreshOperation::Refresh);
        result.map_err(IntfError::from)
    }

    pub fn clear(&mut self) -> Result<(), IntfError> {
        if self.current_media_id == 0 {
            return Ok(());
        }
        let result = self.library.remove_all_bookmarks(self.current_media_id);
        self.refresh(RefreshOperation::Refresh);
        result.map_err(IntfError::from)
    }

    /// Seek the player to the bookmark at `row`.
    pub fn select(&self, row: usize) {
        if let Some(entry) = self.rows.get(row) {
            self.player.seek_ms(entry.time_ms);
        }
    }

    /// Edit a name or description. The time column is read-only.
    pub fn set_data(&mut self, row: usize, column: BookmarkColumn, value: &str) -> bool {
        if !column.is_editable() {
            return false;
        }
        let Some(entry) = self.rows.get(row) else {
            return false;
        };

        let (name, description) = match column {
            BookmarkColumn::Name => (Some(value), None),
            _ => (None, Some(value)),
        };
        if let Err(err) =
            self.library
                .update_bookmark(self.current_media_id, entry.time_ms, name, description)
        {
            log::warn!("cannot update bookmark: {err}");
            return false;
        }

        let entry = &mut self.rows[row];
        match column {
            BookmarkColumn::Name => entry.name = value.to_string(),
            _ => entry.description = value.to_string(),
        }
        self.events.emit(&ModelEvent::DataChanged {
            row,
            column: column as usize,
        });
        true
    }

    pub fn sort(&mut self, column: BookmarkColumn, order: SortOrder) {
        self.sort = column.sort();
        self.descending = order == SortOrder::Descending;
        self.refresh(RefreshOperation::Refresh);
    }
}

/// Posts a bookmark listing back to its model. Dropped unanswered, it posts a
/// failure so the pending reset still ends.
struct FetchReply {
    queue: GuiQueue,
    model: ModelId,
    serial: u64,
    media_id: u64,
    answered: bool,
}

impl FetchReply {
    fn send(&mut self, bookmarks: Result<Vec<Bookmark>, LibraryError>) {
        self.answered = true;
        self.queue.post(Message::Bookmarks(
            self.model,
            BookmarkMessage::BookmarksFetched {
                serial: self.serial,
                media_id: self.media_id,
                bookmarks,
            },
        ));
    }
}

impl Drop for FetchReply {
    fn drop(&mut self) {
        if !self.answered {
            self.send(Err(LibraryError::Backend(
                "bookmark listing abandoned".to_string(),
            )));
        }
    }
}

/// `H:MM:SS`, or `MM:SS` under an hour.
fn format_time(time_ms: i64) -> String {
    let total = time_ms.max(0) / 1000;
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
