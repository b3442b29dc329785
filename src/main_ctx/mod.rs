// SPDX-License-Identifier: GPL-3.0

//! The main interface context: UI-wide state, its persistence and the
//! requests the view has to act on.

pub mod state;

use crate::bridge::{EventBridge, GuiQueue, Message};
use crate::constants::*;
use crate::dnd::{DropHandler, DropOutcome, DropPayload};
use crate::engine::{Engine, OptionReader, VarValue};
use crate::error::IntfError;
use crate::key_bind::{self, Key, Modifiers};
use crate::platform::Platform;
use crate::playback_state::PlayerState;
use crate::player::{DialogsProvider, PlayerController, PlayerEvent, PlaylistController, VideoSurfaceProvider};
use crate::scale::ScaleManager;
use crate::settings::Settings;
use crate::signal::{ConnectionId, Signal};
use crate::systray::{
    ActivationReason, ClickOutcome, SystrayAction, SystrayController, SystrayMenu,
    SystrayOptions, TrayBackend, TrayIcon,
};
use chrono::Datelike;
use serde::Serialize;
use serde::de::DeserializeOwned;
use state::{AutoRaise, ColorScheme, Grouping, MainContextState, NotificationMode, WindowVisibility};
use std::rc::Rc;
use std::sync::Arc;

/// External services the interface is built on.
#[derive(Clone)]
pub struct Collaborators {
    pub engine: Arc<dyn Engine>,
    pub player: Rc<dyn PlayerController>,
    pub playlist: Rc<dyn PlaylistController>,
    pub dialogs: Rc<dyn DialogsProvider>,
    pub tray: Rc<dyn TrayBackend>,
    pub platform: Rc<dyn Platform>,
}

/// Everything the main context tells the view.
#[derive(Clone, Debug, PartialEq)]
pub enum CtxEvent {
    PlaylistDockedChanged(bool),
    PlaylistVisibleChanged(bool),
    PlaylistWidthFactorChanged(f64),
    ShowRemainingTimeChanged(bool),
    PinVideoControlsChanged(bool),
    GridViewChanged(bool),
    GroupingChanged(Grouping),
    ColorSchemeChanged(ColorScheme),
    MinimalViewChanged(bool),
    NotificationModeChanged(NotificationMode),
    InterfaceOnTopChanged(bool),
    HasToolbarMenuChanged(bool),
    /// Also changes `use_client_side_decoration`.
    WindowTitlebarChanged(bool),
    SmoothScrollChanged(bool),
    DialogFilepathChanged(String),
    WindowVisibilityChanged(WindowVisibility),
    HasAcrylicSurfaceChanged(bool),
    AcrylicActiveChanged(bool),
    PreferHotkeysChanged(bool),
    IntfUserScaleFactorChanged(f64),
    IntfScaleFactorChanged(f64),
    HasEmbeddedVideoChanged(bool),

    AskToQuit,
    AskBoss,
    AskShow,
    AskRaise,
    AskPopupMenu(bool),
    SetInterfaceVisible(bool),
    SetInterfaceFullScreen(bool),
    ToggleWindowVisibility,
}

macro_rules! properties {
    ($($field:ident: $ty:ty => $name:ident),* $(,)?) => {
        paste::paste! {
            /// Observable fields of the main context.
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub enum Property {
                $($name,)*
                PlaylistWidthFactor,
                IntfUserScaleFactor,
                IntfScaleFactor,
                HasEmbeddedVideo,
            }

            impl CtxEvent {
                /// The field this event reports a change of.
                pub fn property(&self) -> Option<Property> {
                    match self {
                        $(CtxEvent::[<$name Changed>](_) => Some(Property::$name),)*
                        CtxEvent::PlaylistWidthFactorChanged(_) => Some(Property::PlaylistWidthFactor),
                        CtxEvent::IntfUserScaleFactorChanged(_) => Some(Property::IntfUserScaleFactor),
                        CtxEvent::IntfScaleFactorChanged(_) => Some(Property::IntfScaleFactor),
                        CtxEvent::HasEmbeddedVideoChanged(_) => Some(Property::HasEmbeddedVideo),
                        _ => None,
                    }
                }
            }

            impl MainCtx {
                $(
                    pub fn $field(&self) -> $ty {
                        self.state.$field.clone()
                    }

                    pub fn [<set_ $field>](&mut self, value: $ty) {
                        self.[<update_ $field>](value, true);
                    }

                    fn [<update_ $field>](&mut self, value: $ty, notify: bool) {
                        if self.state.$field == value {
                            return;
                        }
                        self.state.$field = value;
                        if notify {
                            self.events.emit(&CtxEvent::[<$name Changed>](self.state.$field.clone()));
                        }
                    }
                )*
            }
        }
    };
}

properties! {
    playlist_docked: bool => PlaylistDocked,
    playlist_visible: bool => PlaylistVisible,
    show_remaining_time: bool => ShowRemainingTime,
    pin_video_controls: bool => PinVideoControls,
    grid_view: bool => GridView,
    grouping: Grouping => Grouping,
    color_scheme: ColorScheme => ColorScheme,
    minimal_view: bool => MinimalView,
    notification_mode: NotificationMode => NotificationMode,
    interface_on_top: bool => InterfaceOnTop,
    has_toolbar_menu: bool => HasToolbarMenu,
    window_titlebar: bool => WindowTitlebar,
    smooth_scroll: bool => SmoothScroll,
    dialog_filepath: String => DialogFilepath,
    window_visibility: WindowVisibility => WindowVisibility,
    has_acrylic_surface: bool => HasAcrylicSurface,
    acrylic_active: bool => AcrylicActive,
    prefer_hotkeys: bool => PreferHotkeys,
}

/// Values read from the `MainWindow` group.
struct Persisted {
    playlist_docked: bool,
    playlist_visible: bool,
    playlist_width_factor: f64,
    show_remaining_time: bool,
    pin_video_controls: bool,
    grid_view: bool,
    grouping: Grouping,
    color_scheme: ColorScheme,
    user_scale: f64,
    dialog_filepath: String,
}

struct VideoSurface {
    provider: Rc<dyn VideoSurfaceProvider>,
    connection: ConnectionId,
}

pub struct MainCtx {
    state: MainContextState,
    scale: ScaleManager,
    settings: Settings,
    events: Signal<CtxEvent>,
    queue: GuiQueue,

    engine: Arc<dyn Engine>,
    player: Rc<dyn PlayerController>,
    playlist: Rc<dyn PlaylistController>,
    dialogs: Rc<dyn DialogsProvider>,
    platform: Rc<dyn Platform>,
    systray: SystrayController,
    _bridge: EventBridge,

    player_connection: ConnectionId,
    close_connection: Option<ConnectionId>,
    video_surface: Option<VideoSurface>,
    has_embedded_video: bool,
    has_firstrun: bool,
}

impl MainCtx {
    /// Build the context. Systray setup and the first-run dialog are
    /// deferred to the first GUI tasks.
    pub fn new(
        collaborators: Collaborators,
        settings: Settings,
        queue: GuiQueue,
    ) -> Result<Self, IntfError> {
        let Collaborators {
            engine,
            player,
            playlist,
            dialogs,
            tray,
            platform,
        } = collaborators;

        let bridge = EventBridge::register(engine.clone(), Arc::new(queue.clone()))?;
        let has_firstrun =
            OptionReader::new(engine.as_ref()).read_bool(OPT_PRIVACY_ASK, DEFAULT_PRIVACY_ASK);

        let player_queue = queue.clone();
        let player_connection = player.events().connect(move |event| {
            if let PlayerEvent::InputChanged(has_input) = event {
                player_queue.post(Message::InputChanged(*has_input));
            }
        });

        let events: Signal<CtxEvent> = Signal::new();
        let quit_queue = queue.clone();
        events.connect(move |event| {
            if *event == CtxEvent::AskToQuit {
                quit_queue.post(Message::Quit);
            }
        });

        let systray =
            SystrayController::new(tray, player.clone(), platform.clone(), queue.clone());

        let mut ctx = Self {
            state: MainContextState::default(),
            scale: ScaleManager::default(),
            settings,
            events,
            queue,
            engine,
            player,
            playlist,
            dialogs,
            platform,
            systray,
            _bridge: bridge,
            player_connection,
            close_connection: None,
            video_surface: None,
            has_embedded_video: false,
            has_firstrun,
        };

        ctx.load_from_engine_options(false);
        ctx.load_from_persisted(false);

        ctx.queue.post(Message::InitSystray);
        if ctx.has_firstrun {
            ctx.queue.post(Message::FirstRunDialog);
        }

        Ok(ctx)
    }

    pub fn events(&self) -> &Signal<CtxEvent> {
        &self.events
    }

    /// Subscribe to the changes of a single field.
    pub fn connect_property(
        &self,
        property: Property,
        slot: impl Fn(&CtxEvent) + 'static,
    ) -> ConnectionId {
        self.events.connect(move |event| {
            if event.property() == Some(property) {
                slot(event);
            }
        })
    }

    fn reader(&self) -> OptionReader<'_> {
        OptionReader::new(self.engine.as_ref())
    }

    pub fn load_from_engine_options(&mut self, call_signals: bool) {
        let reader = self.reader();
        let minimal_view = reader.read_bool(OPT_MINIMAL_VIEW, DEFAULT_MINIMAL_VIEW);
        let notification_mode =
            NotificationMode::from_int(reader.read_int(OPT_NOTIFICATION, DEFAULT_NOTIFICATION));
        let interface_on_top = reader.read_bool(OPT_VIDEO_ON_TOP, DEFAULT_VIDEO_ON_TOP);
        let has_toolbar_menu = reader.read_bool(OPT_MENUBAR, DEFAULT_MENUBAR);
        let window_titlebar = reader.read_bool(OPT_TITLEBAR, DEFAULT_TITLEBAR);
        let smooth_scroll = reader.read_bool(OPT_SMOOTH_SCROLLING, DEFAULT_SMOOTH_SCROLLING);

        self.update_minimal_view(minimal_view, call_signals);
        self.update_notification_mode(notification_mode, call_signals);
        self.update_interface_on_top(interface_on_top, call_signals);
        self.update_has_toolbar_menu(has_toolbar_menu, call_signals);
        self.update_window_titlebar(window_titlebar, call_signals);
        self.update_smooth_scroll(smooth_scroll, call_signals);
    }

    fn read_persisted(&mut self) -> Persisted {
        let engine_scale = self
            .reader()
            .read_float(OPT_INTERFACE_SCALE, INTERFACE_SCALE_UNSET);

        let settings = &mut self.settings;
        settings.begin_group(GROUP_MAIN_WINDOW);
        let persisted = Persisted {
            playlist_docked: settings.value(KEY_PL_DOCK_STATUS, DEFAULT_PLAYLIST_DOCKED),
            playlist_visible: settings.value(KEY_PLAYLIST_VISIBLE, DEFAULT_PLAYLIST_VISIBLE),
            playlist_width_factor: settings
                .value(KEY_PLAYLIST_WIDTH_FACTOR, DEFAULT_PLAYLIST_WIDTH_FACTOR),
            show_remaining_time: settings
                .value(KEY_SHOW_REMAINING_TIME, DEFAULT_SHOW_REMAINING_TIME),
            pin_video_controls: settings.value(KEY_PIN_VIDEO_CONTROLS, DEFAULT_PIN_VIDEO_CONTROLS),
            grid_view: settings.value(KEY_GRID_VIEW, DEFAULT_GRID_VIEW),
            grouping: Grouping::from_int(settings.value(KEY_GROUPING, Grouping::None.to_int()))
                .unwrap_or_default(),
            color_scheme: ColorScheme::from_int(
                settings.value(KEY_COLOR_SCHEME, ColorScheme::System.to_int()),
            )
            .unwrap_or_default(),
            user_scale: if engine_scale > 0.0 {
                engine_scale
            } else {
                settings.value(KEY_INTERFACE_SCALE, DEFAULT_USER_SCALE_FACTOR)
            },
            dialog_filepath: String::new(),
        };
        settings.end_group();

        Persisted {
            dialog_filepath: settings.value(KEY_FILEDIALOG_PATH, String::new()),
            ..persisted
        }
    }

    pub fn load_from_persisted(&mut self, call_signals: bool) {
        let persisted = self.read_persisted();

        self.update_playlist_docked(persisted.playlist_docked, call_signals);
        self.update_playlist_visible(persisted.playlist_visible, call_signals);
        self.update_playlist_width_factor(persisted.playlist_width_factor, call_signals);
        self.update_show_remaining_time(persisted.show_remaining_time, call_signals);
        self.update_pin_video_controls(persisted.pin_video_controls, call_signals);
        self.update_grid_view(persisted.grid_view, call_signals);
        self.update_grouping(persisted.grouping, call_signals);
        self.update_color_scheme(persisted.color_scheme, call_signals);
        self.update_intf_user_scale_factor(persisted.user_scale, call_signals);
        self.update_dialog_filepath(persisted.dialog_filepath, call_signals);
    }

    /// Re-read every preference and re-evaluate the systray.
    pub fn reload_prefs(&mut self) {
        self.load_from_engine_options(true);
        self.load_from_persisted(true);

        let wanted = self.reader().read_bool(OPT_SYSTEM_TRAY, DEFAULT_SYSTEM_TRAY);
        let icon = self.tray_icon();
        let menu = self.systray_menu();
        self.systray.apply(wanted, icon, menu);
    }

    /// Write every persisted field. Runs on drop.
    pub fn save(&mut self) {
        let save_recent = self
            .reader()
            .read_bool(OPT_SAVE_RECENT_PLAY, DEFAULT_SAVE_RECENT_PLAY);
        let state = &self.state;
        let settings = &mut self.settings;

        settings.begin_group(GROUP_MAIN_WINDOW);
        settings.set_value(KEY_PL_DOCK_STATUS, state.playlist_docked);
        settings.set_value(KEY_SHOW_REMAINING_TIME, state.show_remaining_time);
        settings.set_value(KEY_INTERFACE_SCALE, self.scale.user_scale());
        settings.set_value(KEY_PIN_VIDEO_CONTROLS, state.pin_video_controls);
        settings.set_value(KEY_PLAYLIST_VISIBLE, state.playlist_visible);
        settings.set_value(KEY_PLAYLIST_WIDTH_FACTOR, state.playlist_width_factor);
        settings.set_value(KEY_GRID_VIEW, state.grid_view);
        settings.set_value(KEY_GROUPING, state.grouping.to_int());
        settings.set_value(KEY_COLOR_SCHEME, state.color_scheme.to_int());
        settings.end_group();

        if save_recent {
            settings.set_value(KEY_FILEDIALOG_PATH, &state.dialog_filepath);
        } else {
            settings.remove(KEY_FILEDIALOG_PATH);
        }

        if let Err(err) = settings.sync() {
            log::error!("failed to save settings: {err:#}");
        }
    }

    pub fn playlist_width_factor(&self) -> f64 {
        self.state.playlist_width_factor
    }

    /// Non-positive factors are ignored.
    pub fn set_playlist_width_factor(&mut self, value: f64) {
        self.update_playlist_width_factor(value, true);
    }

    fn update_playlist_width_factor(&mut self, value: f64, notify: bool) {
        if !(value.is_finite() && value > 0.0) {
            log::warn!("ignoring playlist width factor {value}");
            return;
        }
        if self.state.playlist_width_factor == value {
            return;
        }
        self.state.playlist_width_factor = value;
        if notify {
            self.events.emit(&CtxEvent::PlaylistWidthFactorChanged(value));
        }
    }

    pub fn intf_user_scale_factor(&self) -> f64 {
        self.scale.user_scale()
    }

    pub fn intf_scale_factor(&self) -> f64 {
        self.scale.effective_scale()
    }

    pub fn set_intf_user_scale_factor(&mut self, value: f64) {
        self.update_intf_user_scale_factor(value, true);
    }

    fn update_intf_user_scale_factor(&mut self, value: f64, notify: bool) {
        if self.scale.set_user_scale(value) && notify {
            self.events
                .emit(&CtxEvent::IntfUserScaleFactorChanged(self.scale.user_scale()));
        }
        self.update_scale_factor(notify);
    }

    pub fn increment_intf_user_scale_factor(&mut self, up: bool) {
        if self.scale.increment(up) {
            self.events
                .emit(&CtxEvent::IntfUserScaleFactorChanged(self.scale.user_scale()));
        }
        self.update_scale_factor(true);
    }

    /// The window moved to a screen with `dpi` logical DPI.
    pub fn on_screen_changed(&mut self, dpi: Option<f64>) {
        self.scale.set_screen_dpi(dpi);
        self.update_scale_factor(true);
    }

    fn update_scale_factor(&mut self, notify: bool) {
        if let Some(effective) = self.scale.recompute()
            && notify
        {
            self.events.emit(&CtxEvent::IntfScaleFactorChanged(effective));
        }
    }

    pub fn use_client_side_decoration(&self) -> bool {
        !self.state.window_titlebar
    }

    pub fn has_firstrun(&self) -> bool {
        self.has_firstrun
    }

    pub fn has_wayland(&self) -> bool {
        self.platform.is_wayland()
    }

    pub fn has_embedded_video(&self) -> bool {
        self.has_embedded_video
    }

    pub fn hide_after_creation(&self) -> bool {
        self.systray.hide_after_creation()
    }

    pub fn systray_exists(&self) -> bool {
        self.systray.exists()
    }

    pub fn setting_value<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.settings.value(key, default)
    }

    pub fn set_setting_value<T: Serialize>(&mut self, key: &str, value: T) {
        self.settings.set_value(key, value);
    }

    pub fn set_video_surface_provider(&mut self, provider: Option<Rc<dyn VideoSurfaceProvider>>) {
        if let Some(old) = self.video_surface.take() {
            old.provider.video_embed_changed().disconnect(old.connection);
        }

        let has_embed = provider.as_ref().is_some_and(|p| p.has_video_embed());
        if let Some(provider) = provider {
            let queue = self.queue.clone();
            let connection = provider
                .video_embed_changed()
                .connect(move |embedded| {
                    queue.post(Message::VideoEmbedChanged(*embedded));
                });
            self.video_surface = Some(VideoSurface {
                provider,
                connection,
            });
        }
        self.on_video_embed_changed(has_embed);
    }

    fn on_video_embed_changed(&mut self, embedded: bool) {
        if self.has_embedded_video != embedded {
            self.has_embedded_video = embedded;
            self.events.emit(&CtxEvent::HasEmbeddedVideoChanged(embedded));
        }
    }

    pub fn on_window_visibility_changed(&mut self, visibility: WindowVisibility) {
        self.set_window_visibility(visibility);
    }

    pub fn toggle_interface_full_screen(&self) {
        let full_screen = self.state.window_visibility != WindowVisibility::FullScreen;
        self.events.emit(&CtxEvent::SetInterfaceFullScreen(full_screen));
    }

    pub fn emit_boss(&self) {
        self.events.emit(&CtxEvent::AskBoss);
    }

    pub fn emit_show(&self) {
        self.events.emit(&CtxEvent::AskShow);
    }

    pub fn emit_raise(&self) {
        self.events.emit(&CtxEvent::AskRaise);
    }

    /// Raise the window for a new input when the auto-raise policy asks for it.
    pub fn on_input_changed(&self, has_input: bool) {
        if !has_input {
            return;
        }
        let policy = AutoRaise::from_bits(self.reader().read_int(OPT_AUTO_RAISE, DEFAULT_AUTO_RAISE));
        if policy.should_raise(self.player.has_video_output()) {
            self.emit_raise();
        }
    }

    /// Forward a key press to the engine's hotkey handling.
    pub fn send_hotkey(&self, key: Key, modifiers: Modifiers) {
        match key_bind::engine_key_code(key, modifiers) {
            Some(code) => self.engine.set_variable(VAR_KEY_PRESSED, VarValue::Int(code)),
            None => log::debug!("no engine key for {key:?}"),
        }
    }

    /// Returns `false` when the close has to wait for the video output to stop.
    pub fn on_window_close(&mut self) -> bool {
        if let Some(surface) = &self.video_surface {
            surface.provider.on_window_closed();
        }

        if self.player.has_video_output() {
            if self.close_connection.is_none() {
                let queue = self.queue.clone();
                self.close_connection = Some(self.player.events().connect(move |event| {
                    if let PlayerEvent::PlayingStateChanged(state) = event {
                        queue.post(Message::PlayingStateChanged(*state));
                    }
                }));
            }
            self.playlist.stop();
            false
        } else {
            self.events.emit(&CtxEvent::AskToQuit);
            true
        }
    }

    fn on_playing_state_changed(&mut self, state: PlayerState) {
        if state != PlayerState::Stopped {
            return;
        }
        if let Some(connection) = self.close_connection.take() {
            self.player.events().disconnect(connection);
            self.events.emit(&CtxEvent::AskToQuit);
        }
    }

    pub fn drop_event_play(&self, payload: &DropPayload, start_playing: bool) -> DropOutcome {
        DropHandler {
            player: self.player.as_ref(),
            playlist: self.playlist.as_ref(),
            platform: self.platform.as_ref(),
        }
        .drop_event_play(payload, start_playing)
    }

    fn tray_icon(&self) -> TrayIcon {
        let icon_change = self.reader().read_bool(OPT_ICON_CHANGE, DEFAULT_ICON_CHANGE);
        TrayIcon::for_day(chrono::Local::now().ordinal(), icon_change)
    }

    fn systray_menu(&self) -> SystrayMenu {
        SystrayMenu::build(
            !self.state.window_visibility.is_hidden_or_minimized(),
            self.player.playing_state(),
        )
    }

    fn init_systray(&mut self) {
        let reader = self.reader();
        let options = SystrayOptions {
            wanted: reader.read_bool(OPT_SYSTEM_TRAY, DEFAULT_SYSTEM_TRAY),
            start_minimized: reader.read_bool(OPT_START_MINIMIZED, DEFAULT_START_MINIMIZED),
            icon_change: reader.read_bool(OPT_ICON_CHANGE, DEFAULT_ICON_CHANGE),
        };
        let menu = self.systray_menu();
        self.systray
            .init(options, menu, chrono::Local::now().ordinal());

        if self.systray.hide_after_creation() {
            self.events.emit(&CtxEvent::SetInterfaceVisible(false));
        }
    }

    fn rebuild_systray_menu(&mut self) {
        let menu = self.systray_menu();
        self.systray.update_menu(menu);
    }

    fn on_systray_activated(&mut self, reason: ActivationReason) {
        match self.systray.handle_activation(reason) {
            ClickOutcome::ToggleWindow => {
                self.events.emit(&CtxEvent::ToggleWindowVisibility);
                self.rebuild_systray_menu();
            }
            ClickOutcome::RebuildMenu => self.rebuild_systray_menu(),
            ClickOutcome::Ignored => {}
        }
    }

    fn on_systray_action(&mut self, action: SystrayAction) {
        match action {
            SystrayAction::ShowInterface => {
                self.events.emit(&CtxEvent::SetInterfaceVisible(true));
                self.rebuild_systray_menu();
            }
            SystrayAction::HideInterface => {
                self.events.emit(&CtxEvent::SetInterfaceVisible(false));
                self.rebuild_systray_menu();
            }
            SystrayAction::PlayPause => self.playlist.toggle_play_pause(),
            SystrayAction::Stop => self.playlist.stop(),
            SystrayAction::Previous => self.playlist.prev(),
            SystrayAction::Next => self.playlist.next(),
            SystrayAction::OpenMedia => self.dialogs.open_file_dialog(),
            SystrayAction::Quit => self.events.emit(&CtxEvent::AskToQuit),
        }
    }

    /// Run a GUI task. Bookmark tasks belong to the bookmark model.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::PopupMenu(show) => self.events.emit(&CtxEvent::AskPopupMenu(show)),
            Message::Show => self.emit_show(),
            Message::Raise => self.emit_raise(),
            Message::Boss => self.emit_boss(),
            Message::InitSystray => self.init_systray(),
            Message::FirstRunDialog => self.dialogs.first_run_dialog(),
            Message::Quit => self.dialogs.quit(),
            Message::InputChanged(has_input) => self.on_input_changed(has_input),
            Message::MediaNameChanged(name) => {
                let mode = self.state.notification_mode;
                let visibility = self.state.window_visibility;
                self.systray.update_tooltip_name(&name, mode, visibility);
                self.rebuild_systray_menu();
            }
            Message::PlayingStateChanged(state) => self.on_playing_state_changed(state),
            Message::SystrayStateChanged => self.rebuild_systray_menu(),
            Message::SystrayActivated(reason) => self.on_systray_activated(reason),
            Message::SystrayMenu(action) => self.on_systray_action(action),
            Message::ScreenChanged(dpi) => self.on_screen_changed(dpi),
            Message::VideoEmbedChanged(embedded) => self.on_video_embed_changed(embedded),
            Message::Bookmarks(..) => log::debug!("bookmark task without a bookmark model"),
        }
    }
}

impl Drop for MainCtx {
    fn drop(&mut self) {
        self.save();
        self.player.events().disconnect(self.player_connection);
        if let Some(connection) = self.close_connection.take() {
            self.player.events().disconnect(connection);
        }
        if let Some(surface) = self.video_surface.take() {
            surface
                .provider
                .video_embed_changed()
                .disconnect(surface.connection);
        }
        self.systray.destroy();
    }
}
