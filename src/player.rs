// SPDX-License-Identifier: GPL-3.0

//! GUI-thread collaborators of the main context.

use crate::playback_state::PlayerState;
use crate::signal::Signal;
use std::fmt;

/// Events mirrored from the engine player onto the GUI thread.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    InputChanged(bool),
    NameChanged(String),
    PlayingStateChanged(PlayerState),
    TeletextAvailableChanged(bool),
    HasMenuChanged(bool),
}

/// Elementary stream category of an associated media.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EsCategory {
    Video,
    Audio,
    Subtitle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerError(pub String);

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player error: {}", self.0)
    }
}

impl std::error::Error for PlayerError {}

/// Player state as seen from the GUI thread.
pub trait PlayerController {
    fn has_input(&self) -> bool;
    fn has_video_output(&self) -> bool;
    fn playing_state(&self) -> PlayerState;
    fn is_teletext_available(&self) -> bool;
    fn has_menu(&self) -> bool;

    fn add_associated_media(
        &self,
        category: EsCategory,
        uri: &str,
        select: bool,
        notify: bool,
        check_extension: bool,
    ) -> Result<(), PlayerError>;

    fn events(&self) -> &Signal<PlayerEvent>;
}

/// A playlist entry to append.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Media {
    pub mrl: String,
    pub title: Option<String>,
}

impl Media {
    pub fn new(mrl: impl Into<String>) -> Self {
        Self {
            mrl: mrl.into(),
            title: None,
        }
    }
}

pub trait PlaylistController {
    fn append(&self, medias: Vec<Media>, start_playing: bool);
    fn stop(&self);
    fn toggle_play_pause(&self);
    fn next(&self);
    fn prev(&self);
}

pub trait DialogsProvider {
    fn quit(&self);
    fn first_run_dialog(&self);
    fn open_file_dialog(&self);
}

/// Owner of the embedded video surface.
pub trait VideoSurfaceProvider {
    fn has_video_embed(&self) -> bool;
    fn on_window_closed(&self);
    fn video_embed_changed(&self) -> &Signal<bool>;
}
