// SPDX-License-Identifier: GPL-3.0

use crate::constants::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Grouping {
    #[default]
    None,
    ByName,
    ByFolder,
}

impl Grouping {
    pub fn to_int(self) -> i64 {
        match self {
            Grouping::None => 0,
            Grouping::ByName => 1,
            Grouping::ByFolder => 2,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Grouping::None),
            1 => Some(Grouping::ByName),
            2 => Some(Grouping::ByFolder),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    System,
    Day,
    Night,
}

impl ColorScheme {
    pub fn to_int(self) -> i64 {
        match self {
            ColorScheme::System => 0,
            ColorScheme::Day => 1,
            ColorScheme::Night => 2,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(ColorScheme::System),
            1 => Some(ColorScheme::Day),
            2 => Some(ColorScheme::Night),
            _ => None,
        }
    }
}

/// When the tray shows a balloon for a new media name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationMode {
    Never,
    #[default]
    Minimized,
    Always,
}

impl NotificationMode {
    pub fn from_int(value: i64) -> Self {
        match value {
            0 => NotificationMode::Never,
            2 => NotificationMode::Always,
            _ => NotificationMode::Minimized,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowVisibility {
    Hidden,
    Minimized,
    #[default]
    Normal,
    Maximized,
    FullScreen,
}

impl WindowVisibility {
    pub fn is_hidden_or_minimized(self) -> bool {
        matches!(self, WindowVisibility::Hidden | WindowVisibility::Minimized)
    }
}

/// `qt-auto-raise` bitfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoRaise(u8);

impl AutoRaise {
    pub const NEVER: AutoRaise = AutoRaise(0);
    pub const VIDEO: AutoRaise = AutoRaise(1);
    pub const AUDIO: AutoRaise = AutoRaise(2);
    pub const ALWAYS: AutoRaise = AutoRaise(3);

    pub fn from_bits(bits: i64) -> Self {
        AutoRaise((bits & 0b11) as u8)
    }

    pub fn contains(self, other: AutoRaise) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether a new input should raise the window.
    pub fn should_raise(self, has_video_output: bool) -> bool {
        if self == AutoRaise::NEVER {
            return false;
        }
        if has_video_output {
            self.contains(AutoRaise::VIDEO)
        } else {
            self.contains(AutoRaise::AUDIO)
        }
    }
}

/// UI-wide state owned by the main context. GUI thread only.
#[derive(Clone, Debug, PartialEq)]
pub struct MainContextState {
    pub playlist_docked: bool,
    pub playlist_visible: bool,
    pub playlist_width_factor: f64,
    pub show_remaining_time: bool,
    pub pin_video_controls: bool,
    pub grid_view: bool,
    pub grouping: Grouping,
    pub color_scheme: ColorScheme,
    pub minimal_view: bool,
    pub notification_mode: NotificationMode,
    pub interface_on_top: bool,
    pub has_toolbar_menu: bool,
    pub window_titlebar: bool,
    pub smooth_scroll: bool,
    pub dialog_filepath: String,
    pub window_visibility: WindowVisibility,
    pub has_acrylic_surface: bool,
    pub acrylic_active: bool,
    pub prefer_hotkeys: bool,
}

impl Default for MainContextState {
    fn default() -> Self {
        Self {
            playlist_docked: DEFAULT_PLAYLIST_DOCKED,
            playlist_visible: DEFAULT_PLAYLIST_VISIBLE,
            playlist_width_factor: DEFAULT_PLAYLIST_WIDTH_FACTOR,
            show_remaining_time: DEFAULT_SHOW_REMAINING_TIME,
            pin_video_controls: DEFAULT_PIN_VIDEO_CONTROLS,
            grid_view: DEFAULT_GRID_VIEW,
            grouping: Grouping::None,
            color_scheme: ColorScheme::System,
            minimal_view: DEFAULT_MINIMAL_VIEW,
            notification_mode: NotificationMode::from_int(DEFAULT_NOTIFICATION),
            interface_on_top: DEFAULT_VIDEO_ON_TOP,
            has_toolbar_menu: DEFAULT_MENUBAR,
            window_titlebar: DEFAULT_TITLEBAR,
            smooth_scroll: DEFAULT_SMOOTH_SCROLLING,
            dialog_filepath: String::new(),
            window_visibility: WindowVisibility::Normal,
            has_acrylic_surface: false,
            acrylic_active: false,
            prefer_hotkeys: false,
        }
    }
}
