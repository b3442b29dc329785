// SPDX-License-Identifier: GPL-3.0

//! Engine callback to GUI thread bridging.
//!
//! Engine callbacks run on engine threads. They only capture their payload
//! and post a [`Message`] on the GUI queue; the GUI thread drains the queue
//! in posting order.

use crate::constants::*;
use crate::engine::{
    CallbackId, Engine, EnginePlayer, ListenerId, PlayerListener, VarCallback, VarValue,
};
use crate::error::IntfError;
use crate::models::bookmark_model::{BookmarkMessage, ModelId};
use crate::playback_state::PlayerState;
use crate::systray::{ActivationReason, SystrayAction};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Tasks executed on the GUI thread.
#[derive(Debug, Clone)]
pub enum Message {
    PopupMenu(bool),
    Show,
    Raise,
    Boss,
    InitSystray,
    FirstRunDialog,
    Quit,
    InputChanged(bool),
    MediaNameChanged(String),
    PlayingStateChanged(PlayerState),
    SystrayActivated(ActivationReason),
    SystrayMenu(SystrayAction),
    /// The player's playing state moved while the tray exists.
    SystrayStateChanged,
    ScreenChanged(Option<f64>),
    VideoEmbedChanged(bool),
    Bookmarks(ModelId, BookmarkMessage),
}

/// Sending half of the GUI task queue. Cheap to clone, usable from any thread.
#[derive(Clone, Debug)]
pub struct GuiQueue {
    tx: UnboundedSender<Message>,
}

impl GuiQueue {
    pub fn channel() -> (Self, UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns `false` when the GUI side is gone.
    pub fn post(&self, message: Message) -> bool {
        match self.tx.send(message) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("GUI queue closed, dropping {:?}", err.0);
                false
            }
        }
    }
}

/// The engine-facing capability of the interface.
pub trait IntfCallbacks: Send + Sync {
    fn post_popup_menu(&self, show: bool);
    fn post_boss(&self);
    fn post_show(&self);
    fn post_raise(&self);
}

impl IntfCallbacks for GuiQueue {
    fn post_popup_menu(&self, show: bool) {
        self.post(Message::PopupMenu(show));
    }

    fn post_boss(&self) {
        self.post(Message::Boss);
    }

    fn post_show(&self) {
        self.post(Message::Show);
    }

    fn post_raise(&self) {
        self.post(Message::Raise);
    }
}

/// Interface callbacks registered on engine variables.
///
/// Every successful registration is undone when the bridge is dropped,
/// including after a failed `register`.
pub struct EventBridge {
    engine: Arc<dyn Engine>,
    registrations: Vec<(&'static str, CallbackId)>,
}

impl EventBridge {
    pub fn register(
        engine: Arc<dyn Engine>,
        callbacks: Arc<dyn IntfCallbacks>,
    ) -> Result<Self, IntfError> {
        let mut bridge = Self {
            engine,
            registrations: Vec::with_capacity(4),
        };

        let cb = callbacks.clone();
        bridge.add(VAR_TOGGLE_FSCONTROL, Arc::new(move |_: &VarValue| cb.post_show()))?;

        let cb = callbacks.clone();
        bridge.add(VAR_BOSS, Arc::new(move |_: &VarValue| cb.post_boss()))?;

        let cb = callbacks.clone();
        bridge.add(VAR_SHOW, Arc::new(move |_: &VarValue| cb.post_raise()))?;

        let cb = callbacks;
        bridge.add(
            VAR_POPUP_MENU,
            Arc::new(move |value: &VarValue| cb.post_popup_menu(value.as_bool().unwrap_or(false))),
        )?;

        Ok(bridge)
    }

    fn add(&mut self, variable: &'static str, callback: VarCallback) -> Result<(), IntfError> {
        match self.engine.add_callback(variable, callback) {
            Ok(id) => {
                self.registrations.push((variable, id));
                Ok(())
            }
            Err(source) => {
                log::error!("cannot register {variable:?} callback: {source}");
                Err(IntfError::CallbackRegistration {
                    variable: variable.to_string(),
                    source,
                })
            }
        }
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }
}

impl Drop for EventBridge {
    fn drop(&mut self) {
        while let Some((variable, id)) = self.registrations.pop() {
            self.engine.del_callback(variable, id);
        }
    }
}

/// A player listener registration, removed on drop.
pub struct PlayerRegistration {
    player: Arc<dyn EnginePlayer>,
    id: ListenerId,
}

impl PlayerRegistration {
    pub fn register(
        player: Arc<dyn EnginePlayer>,
        listener: Arc<dyn PlayerListener>,
    ) -> Result<Self, IntfError> {
        let id = player.add_listener(listener).map_err(|source| {
            log::error!("cannot register player listener: {source}");
            IntfError::CallbackRegistration {
                variable: "player-listener".to_string(),
                source,
            }
        })?;
        Ok(Self { player, id })
    }
}

impl Drop for PlayerRegistration {
    fn drop(&mut self) {
        self.player.remove_listener(self.id);
    }
}
