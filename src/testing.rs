// SPDX-License-Identifier: GPL-3.0

//! In-process stand-ins for the interface's collaborators.

use crate::bridge::{GuiQueue, Message};
use crate::engine::memory::MemoryEngine;
use crate::error::IntfError;
use crate::library::{
    Bookmark, BookmarkSort, BookmarksReply, LibraryError, MediaIdReply, MediaLibrary,
};
use crate::main_ctx::{Collaborators, MainCtx};
use crate::models::control_list_filter::ControlListSource;
use crate::platform::Platform;
use crate::playback_state::PlayerState;
use crate::player::{
    DialogsProvider, EsCategory, Media, PlayerController, PlayerError, PlayerEvent,
    PlaylistController, VideoSurfaceProvider,
};
use crate::settings::Settings;
use crate::signal::Signal;
use crate::systray::{
    ActivationReason, BalloonIcon, SystrayAction, SystrayMenu, TrayBackend, TrayHandle, TrayIcon,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("intf-core-{}-{name}", std::process::id()))
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn drain(rx: &mut UnboundedReceiver<Message>) -> Vec<Message> {
    let mut messages = Vec::new();
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    messages
}

#[derive(Default)]
pub struct FakePlayer {
    has_input: Cell<bool>,
    has_video_output: Cell<bool>,
    teletext: Cell<bool>,
    has_menu: Cell<bool>,
    state: Cell<PlayerState>,
    refuse_associated: Cell<bool>,
    associated: RefCell<Vec<String>>,
    events: Signal<PlayerEvent>,
}

impl FakePlayer {
    pub fn set_has_input(&self, has_input: bool) {
        self.has_input.set(has_input);
    }

    pub fn set_has_video_output(&self, has_video_output: bool) {
        self.has_video_output.set(has_video_output);
    }

    pub fn set_teletext_available(&self, available: bool) {
        self.teletext.set(available);
        self.events.emit(&PlayerEvent::TeletextAvailableChanged(available));
    }

    pub fn set_has_menu(&self, has_menu: bool) {
        self.has_menu.set(has_menu);
        self.events.emit(&PlayerEvent::HasMenuChanged(has_menu));
    }

    pub fn refuse_associated_media(&self) {
        self.refuse_associated.set(true);
    }

    pub fn associated(&self) -> Vec<String> {
        self.associated.borrow().clone()
    }

    pub fn emit(&self, event: PlayerEvent) {
        match &event {
            PlayerEvent::InputChanged(has_input) => self.has_input.set(*has_input),
            PlayerEvent::PlayingStateChanged(state) => self.state.set(*state),
            _ => {}
        }
        self.events.emit(&event);
    }
}

impl PlayerController for FakePlayer {
    fn has_input(&self) -> bool {
        self.has_input.get()
    }

    fn has_video_output(&self) -> bool {
        self.has_video_output.get()
    }

    fn playing_state(&self) -> PlayerState {
        self.state.get()
    }

    fn is_teletext_available(&self) -> bool {
        self.teletext.get()
    }

    fn has_menu(&self) -> bool {
        self.has_menu.get()
    }

    fn add_associated_media(
        &self,
        category: EsCategory,
        uri: &str,
        _select: bool,
        _notify: bool,
        _check_extension: bool,
    ) -> Result<(), PlayerError> {
        if self.refuse_associated.get() || category != EsCategory::Subtitle {
            return Err(PlayerError(format!("cannot add {uri}")));
        }
        self.associated.borrow_mut().push(uri.to_string());
        Ok(())
    }

    fn events(&self) -> &Signal<PlayerEvent> {
        &self.events
    }
}

#[derive(Default)]
pub struct FakePlaylist {
    appended: RefCell<Vec<(Vec<Media>, bool)>>,
    stops: Cell<usize>,
    toggles: Cell<usize>,
    nexts: Cell<usize>,
    prevs: Cell<usize>,
}

impl FakePlaylist {
    pub fn appended(&self) -> Vec<(Vec<Media>, bool)> {
        self.appended.borrow().clone()
    }

    pub fn stops(&self) -> usize {
        self.stops.get()
    }

    pub fn nexts(&self) -> usize {
        self.nexts.get()
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl PlaylistController for FakePlaylist {
    fn append(&self, medias: Vec<Media>, start_playing: bool) {
        self.appended.borrow_mut().push((medias, start_playing));
    }

    fn stop(&self) {
        bump(&self.stops);
    }

    fn toggle_play_pause(&self) {
        bump(&self.toggles);
    }

    fn next(&self) {
        bump(&self.nexts);
    }

    fn prev(&self) {
        bump(&self.prevs);
    }
}

#[derive(Default)]
pub struct FakeDialogs {
    quits: Cell<usize>,
    first_runs: Cell<usize>,
    open_files: Cell<usize>,
}

impl FakeDialogs {
    pub fn quits(&self) -> usize {
        self.quits.get()
    }
}

impl DialogsProvider for FakeDialogs {
    fn quit(&self) {
        bump(&self.quits);
    }

    fn first_run_dialog(&self) {
        bump(&self.first_runs);
    }

    fn open_file_dialog(&self) {
        bump(&self.open_files);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrayCall {
    Tooltip(String),
    Menu(SystrayMenu),
    Show,
    Message {
        body: String,
        icon: BalloonIcon,
        timeout_ms: u64,
    },
}

pub struct FakeTray {
    available: bool,
    refuse_creation: Cell<bool>,
    created: Cell<usize>,
    last_icon: Cell<Option<TrayIcon>>,
    calls: Rc<RefCell<Vec<TrayCall>>>,
    queue: RefCell<Option<GuiQueue>>,
}

impl FakeTray {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            refuse_creation: Cell::new(false),
            created: Cell::new(0),
            last_icon: Cell::new(None),
            calls: Rc::new(RefCell::new(Vec::new())),
            queue: RefCell::new(None),
        }
    }

    /// Report the tray as available but fail every creation attempt.
    pub fn refuse_creation(&self) {
        self.refuse_creation.set(true);
    }

    pub fn created(&self) -> usize {
        self.created.get()
    }

    pub fn last_icon(&self) -> Option<TrayIcon> {
        self.last_icon.get()
    }

    pub fn calls(&self) -> Vec<TrayCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn message_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, TrayCall::Message { .. }))
            .count()
    }

    fn post(&self, message: Message) {
        if let Some(queue) = self.queue.borrow().as_ref() {
            queue.post(message);
        }
    }

    pub fn activate(&self, reason: ActivationReason) {
        self.post(Message::SystrayActivated(reason));
    }

    pub fn pick(&self, action: SystrayAction) {
        self.post(Message::SystrayMenu(action));
    }
}

struct FakeTrayHandle {
    calls: Rc<RefCell<Vec<TrayCall>>>,
}

impl TrayHandle for FakeTrayHandle {
    fn set_tooltip(&mut self, tooltip: &str) {
        self.calls
            .borrow_mut()
            .push(TrayCall::Tooltip(tooltip.to_string()));
    }

    fn set_menu(&mut self, menu: SystrayMenu) {
        self.calls.borrow_mut().push(TrayCall::Menu(menu));
    }

    fn show(&mut self) {
        self.calls.borrow_mut().push(TrayCall::Show);
    }

    fn show_message(&mut self, _title: &str, body: &str, icon: BalloonIcon, timeout: Duration) {
        self.calls.borrow_mut().push(TrayCall::Message {
            body: body.to_string(),
            icon,
            timeout_ms: timeout.as_millis() as u64,
        });
    }
}

impl TrayBackend for FakeTray {
    fn is_available(&self) -> bool {
        self.available
    }

    fn create(&self, icon: TrayIcon, queue: GuiQueue) -> Result<Box<dyn TrayHandle>, IntfError> {
        if !self.available || self.refuse_creation.get() {
            return Err(IntfError::SystrayUnavailable);
        }
        bump(&self.created);
        self.last_icon.set(Some(icon));
        *self.queue.borrow_mut() = Some(queue);
        Ok(Box::new(FakeTrayHandle {
            calls: self.calls.clone(),
        }))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FakePlatform {
    pub rebuild_only: bool,
    pub resolve_links: bool,
    pub wayland: bool,
}

impl Platform for FakePlatform {
    fn tray_click_rebuilds_menu_only(&self) -> bool {
        self.rebuild_only
    }

    fn resolves_dropped_links(&self) -> bool {
        self.resolve_links
    }

    fn is_wayland(&self) -> bool {
        self.wayland
    }
}

/// Media library answering lookups immediately, or on demand when deferred.
#[derive(Default)]
pub struct FakeLibrary {
    ids: RefCell<HashMap<String, u64>>,
    bookmarks: RefCell<Vec<Bookmark>>,
    deferred: Cell<bool>,
    pending: RefCell<Vec<(String, MediaIdReply)>>,
    listing: Cell<Listing>,
    refuse_updates: Cell<bool>,
}

/// How `FakeLibrary` answers bookmark listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Listing {
    #[default]
    Answer,
    Fail,
    Abandon,
}

impl FakeLibrary {
    pub fn add_media(&self, uri: &str, media_id: u64) {
        self.ids.borrow_mut().insert(uri.to_string(), media_id);
    }

    pub fn insert(&self, media_id: u64, time_ms: i64, name: &str) {
        self.bookmarks.borrow_mut().push(Bookmark {
            media_id,
            time_ms,
            name: name.to_string(),
            description: String::new(),
        });
    }

    pub fn set_listing(&self, listing: Listing) {
        self.listing.set(listing);
    }

    pub fn refuse_updates(&self) {
        self.refuse_updates.set(true);
    }

    pub fn defer_resolution(&self, deferred: bool) {
        self.deferred.set(deferred);
    }

    pub fn pending_resolutions(&self) -> Vec<String> {
        self.pending.borrow().iter().map(|(uri, _)| uri.clone()).collect()
    }

    pub fn resolve_next(&self) {
        let next = {
            let mut pending = self.pending.borrow_mut();
            (!pending.is_empty()).then(|| pending.remove(0))
        };
        if let Some((uri, reply)) = next {
            let id = self.ids.borrow().get(&uri).copied();
            reply(id);
        }
    }

    pub fn resolve_all(&self) {
        while !self.pending.borrow().is_empty() {
            self.resolve_next();
        }
    }

    pub fn bookmarks_of(&self, media_id: u64) -> Vec<Bookmark> {
        self.bookmarks
            .borrow()
            .iter()
            .filter(|b| b.media_id == media_id)
            .cloned()
            .collect()
    }
}

impl MediaLibrary for FakeLibrary {
    fn resolve_media_id(&self, uri: &str, reply: MediaIdReply) {
        if self.deferred.get() {
            self.pending.borrow_mut().push((uri.to_string(), reply));
        } else {
            let id = self.ids.borrow().get(uri).copied();
            reply(id);
        }
    }

    fn list_bookmarks(
        &self,
        media_id: u64,
        sort: BookmarkSort,
        descending: bool,
        reply: BookmarksReply,
    ) {
        let mut bookmarks = self.bookmarks_of(media_id);
        match sort {
            BookmarkSort::InsertionDate => {}
            BookmarkSort::Alpha => bookmarks.sort_by(|a, b| a.name.cmp(&b.name)),
            BookmarkSort::Time => bookmarks.sort_by_key(|b| b.time_ms),
        }
        if descending {
            bookmarks.reverse();
        }
        match self.listing.get() {
            Listing::Answer => reply(Ok(bookmarks)),
            Listing::Fail => reply(Err(LibraryError::Backend("listing failed".to_string()))),
            Listing::Abandon => drop(reply),
        }
    }

    fn add_bookmark(&self, media_id: u64, time_ms: i64) -> Result<(), LibraryError> {
        if self
            .bookmarks
            .borrow()
            .iter()
            .any(|b| b.media_id == media_id && b.time_ms == time_ms)
        {
            return Err(LibraryError::Backend(format!("bookmark at {time_ms} exists")));
        }
        self.insert(media_id, time_ms, "");
        Ok(())
    }

    fn update_bookmark(
        &self,
        media_id: u64,
        time_ms: i64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), LibraryError> {
        if self.refuse_updates.get() {
            return Err(LibraryError::Backend("read-only library".to_string()));
        }
        let mut bookmarks = self.bookmarks.borrow_mut();
        let bookmark = bookmarks
            .iter_mut()
            .find(|b| b.media_id == media_id && b.time_ms == time_ms)
            .ok_or_else(|| LibraryError::NotFound(format!("bookmark at {time_ms}")))?;
        if let Some(name) = name {
            bookmark.name = name.to_string();
        }
        if let Some(description) = description {
            bookmark.description = description.to_string();
        }
        Ok(())
    }

    fn remove_bookmark(&self, media_id: u64, time_ms: i64) -> Result<(), LibraryError> {
        self.bookmarks
            .borrow_mut()
            .retain(|b| !(b.media_id == media_id && b.time_ms == time_ms));
        Ok(())
    }

    fn remove_all_bookmarks(&self, media_id: u64) -> Result<(), LibraryError> {
        self.bookmarks.borrow_mut().retain(|b| b.media_id != media_id);
        Ok(())
    }
}

pub struct FakeControlSource(pub Vec<Option<i32>>);

impl ControlListSource for FakeControlSource {
    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn control_id(&self, row: usize) -> Option<i32> {
        self.0.get(row).copied().flatten()
    }
}

pub struct FakeVideoSurface {
    embedded: Cell<bool>,
    closed: Cell<usize>,
    changed: Signal<bool>,
}

impl FakeVideoSurface {
    pub fn new(embedded: bool) -> Self {
        Self {
            embedded: Cell::new(embedded),
            closed: Cell::new(0),
            changed: Signal::new(),
        }
    }

    pub fn set_embedded(&self, embedded: bool) {
        self.embedded.set(embedded);
        self.changed.emit(&embedded);
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

impl VideoSurfaceProvider for FakeVideoSurface {
    fn has_video_embed(&self) -> bool {
        self.embedded.get()
    }

    fn on_window_closed(&self) {
        bump(&self.closed);
    }

    fn video_embed_changed(&self) -> &Signal<bool> {
        &self.changed
    }
}

/// A full set of collaborators around an in-memory engine.
pub struct Rig {
    pub engine: Arc<MemoryEngine>,
    pub player: Rc<FakePlayer>,
    pub playlist: Rc<FakePlaylist>,
    pub dialogs: Rc<FakeDialogs>,
    pub tray: Rc<FakeTray>,
    pub platform: Rc<FakePlatform>,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_tray(true)
    }

    pub fn with_tray(available: bool) -> Self {
        init_logger();
        Self {
            engine: Arc::new(MemoryEngine::new()),
            player: Rc::new(FakePlayer::default()),
            playlist: Rc::new(FakePlaylist::default()),
            dialogs: Rc::new(FakeDialogs::default()),
            tray: Rc::new(FakeTray::new(available)),
            platform: Rc::new(FakePlatform::default()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            engine: self.engine.clone(),
            player: self.player.clone(),
            playlist: self.playlist.clone(),
            dialogs: self.dialogs.clone(),
            tray: self.tray.clone(),
            platform: self.platform.clone(),
        }
    }

    pub fn main_ctx(&self, settings: Settings) -> (MainCtx, UnboundedReceiver<Message>) {
        let (queue, rx) = GuiQueue::channel();
        let ctx = MainCtx::new(self.collaborators(), settings, queue).unwrap();
        (ctx, rx)
    }
}
