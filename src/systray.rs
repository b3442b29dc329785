// SPDX-License-Identifier: GPL-3.0

//! System tray icon lifecycle, tooltip, menu and click routing.

use crate::bridge::{GuiQueue, Message};
use crate::constants::*;
use crate::error::IntfError;
use crate::main_ctx::state::{NotificationMode, WindowVisibility};
use crate::platform::Platform;
use crate::playback_state::PlayerState;
use crate::player::{PlayerController, PlayerEvent};
use crate::signal::ConnectionId;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationReason {
    Trigger,
    DoubleClick,
    MiddleClick,
    Context,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayIcon {
    Regular,
    Holiday,
}

impl TrayIcon {
    pub fn for_day(day_of_year: u32, icon_change: bool) -> Self {
        if day_of_year >= HOLIDAY_DAY && icon_change {
            TrayIcon::Holiday
        } else {
            TrayIcon::Regular
        }
    }

    pub fn theme_name(self) -> &'static str {
        match self {
            TrayIcon::Regular => "vlc",
            TrayIcon::Holiday => "vlc-xmas",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalloonIcon {
    None,
    Information,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystrayAction {
    ShowInterface,
    HideInterface,
    PlayPause,
    Stop,
    Previous,
    Next,
    OpenMedia,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SystrayMenuEntry {
    Action { action: SystrayAction, label: String },
    Separator,
}

/// The tray's context menu, described as data for the platform backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystrayMenu {
    pub title: String,
    pub entries: Vec<SystrayMenuEntry>,
}

impl SystrayMenu {
    pub fn build(interface_visible: bool, state: PlayerState) -> Self {
        let entry = |action, label: &str| SystrayMenuEntry::Action {
            action,
            label: label.to_string(),
        };

        let visibility = if interface_visible {
            entry(SystrayAction::HideInterface, "Hide VLC media player in taskbar")
        } else {
            entry(SystrayAction::ShowInterface, "Show VLC media player")
        };
        let play_pause = if state.is_playing() {
            entry(SystrayAction::PlayPause, "Pause")
        } else {
            entry(SystrayAction::PlayPause, "Play")
        };

        Self {
            title: PRODUCT_NAME.to_string(),
            entries: vec![
                visibility,
                SystrayMenuEntry::Separator,
                play_pause,
                entry(SystrayAction::Stop, "Stop"),
                entry(SystrayAction::Previous, "Previous"),
                entry(SystrayAction::Next, "Next"),
                SystrayMenuEntry::Separator,
                entry(SystrayAction::OpenMedia, "Open Media"),
                SystrayMenuEntry::Separator,
                entry(SystrayAction::Quit, "Quit"),
            ],
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = SystrayAction> + '_ {
        self.entries.iter().filter_map(|e| match e {
            SystrayMenuEntry::Action { action, .. } => Some(*action),
            SystrayMenuEntry::Separator => None,
        })
    }
}

/// Platform tray service.
pub trait TrayBackend {
    fn is_available(&self) -> bool;
    /// Create an icon. Activations are posted as [`Message::SystrayActivated`]
    /// and menu picks as [`Message::SystrayMenu`].
    fn create(&self, icon: TrayIcon, queue: GuiQueue) -> Result<Box<dyn TrayHandle>, IntfError>;
}

/// A live tray icon. Dropping it removes the icon.
pub trait TrayHandle {
    fn set_tooltip(&mut self, tooltip: &str);
    fn set_menu(&mut self, menu: SystrayMenu);
    fn show(&mut self);
    /// Balloons expire on their own after `timeout`.
    fn show_message(&mut self, title: &str, body: &str, icon: BalloonIcon, timeout: Duration);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystrayOptions {
    pub wanted: bool,
    pub start_minimized: bool,
    pub icon_change: bool,
}

/// What the main context has to do after a tray click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    ToggleWindow,
    RebuildMenu,
    Ignored,
}

pub struct SystrayController {
    backend: Rc<dyn TrayBackend>,
    player: Rc<dyn PlayerController>,
    platform: Rc<dyn Platform>,
    queue: GuiQueue,
    tray: Option<Box<dyn TrayHandle>>,
    connection: Option<ConnectionId>,
    hide_after_creation: bool,
}

impl SystrayController {
    pub fn new(
        backend: Rc<dyn TrayBackend>,
        player: Rc<dyn PlayerController>,
        platform: Rc<dyn Platform>,
        queue: GuiQueue,
    ) -> Self {
        Self {
            backend,
            player,
            platform,
            queue,
            tray: None,
            connection: None,
            hide_after_creation: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn exists(&self) -> bool {
        self.tray.is_some()
    }

    /// The window should start hidden because the tray was requested minimized.
    pub fn hide_after_creation(&self) -> bool {
        self.hide_after_creation
    }

    /// Deferred startup logic.
    pub fn init(&mut self, options: SystrayOptions, menu: SystrayMenu, day_of_year: u32) {
        let available = self.is_available();
        let minimized = options.start_minimized && available;
        if options.start_minimized && !available {
            log::error!("cannot start minimized: {}", IntfError::SystrayUnavailable);
        }

        if available && (options.wanted || minimized) {
            let created = self.create(TrayIcon::for_day(day_of_year, options.icon_change), menu);
            if minimized && !created {
                log::error!("cannot start minimized: system tray creation failed");
            }
            self.hide_after_creation = minimized && created;
        }
    }

    /// Create or destroy the icon so that it exists iff it is available and wanted.
    pub fn apply(&mut self, wanted: bool, icon: TrayIcon, menu: SystrayMenu) {
        match (self.is_available() && wanted, self.exists()) {
            (true, false) => {
                self.create(icon, menu);
            }
            (false, true) => self.destroy(),
            _ => {}
        }
    }

    pub fn create(&mut self, icon: TrayIcon, menu: SystrayMenu) -> bool {
        if self.exists() {
            return true;
        }

        let mut tray = match self.backend.create(icon, self.queue.clone()) {
            Ok(tray) => tray,
            Err(err) => {
                log::error!("failed to create system tray: {err}");
                return false;
            }
        };
        tray.set_tooltip(PRODUCT_NAME);
        tray.set_menu(menu);
        tray.show();
        self.tray = Some(tray);

        let queue = self.queue.clone();
        self.connection = Some(self.player.events().connect(move |event| match event {
            PlayerEvent::NameChanged(name) => {
                queue.post(Message::MediaNameChanged(name.clone()));
            }
            PlayerEvent::PlayingStateChanged(_) => {
                queue.post(Message::SystrayStateChanged);
            }
            _ => {}
        }));

        log::info!("system tray created ({})", icon.theme_name());
        true
    }

    pub fn destroy(&mut self) {
        if let Some(connection) = self.connection.take() {
            self.player.events().disconnect(connection);
        }
        if self.tray.take().is_some() {
            log::info!("system tray removed");
        }
    }

    pub fn handle_activation(&mut self, reason: ActivationReason) -> ClickOutcome {
        if !self.exists() {
            return ClickOutcome::Ignored;
        }
        match reason {
            ActivationReason::Trigger | ActivationReason::DoubleClick => {
                if self.platform.tray_click_rebuilds_menu_only() {
                    ClickOutcome::RebuildMenu
                } else {
                    ClickOutcome::ToggleWindow
                }
            }
            ActivationReason::MiddleClick => {
                self.show_message(CONTROL_MENU_MESSAGE, BalloonIcon::Information);
                ClickOutcome::Ignored
            }
            ActivationReason::Context | ActivationReason::Unknown => ClickOutcome::Ignored,
        }
    }

    pub fn update_tooltip_name(
        &mut self,
        name: &str,
        mode: NotificationMode,
        visibility: WindowVisibility,
    ) {
        let Some(tray) = self.tray.as_mut() else {
            return;
        };

        if name.is_empty() {
            tray.set_tooltip(PRODUCT_NAME);
            return;
        }

        tray.set_tooltip(name);
        let notify = match mode {
            NotificationMode::Always => true,
            NotificationMode::Minimized => visibility.is_hidden_or_minimized(),
            NotificationMode::Never => false,
        };
        if notify {
            self.show_message(name, BalloonIcon::None);
        }
    }

    pub fn update_menu(&mut self, menu: SystrayMenu) {
        if let Some(tray) = self.tray.as_mut() {
            tray.set_menu(menu);
        }
    }

    fn show_message(&mut self, body: &str, icon: BalloonIcon) {
        if let Some(tray) = self.tray.as_mut() {
            tray.show_message(
                PRODUCT_NAME,
                body,
                icon,
                Duration::from_millis(BALLOON_TIMEOUT_MS),
            );
        }
    }
}

impl Drop for SystrayController {
    fn drop(&mut self) {
        self.destroy();
    }
}
