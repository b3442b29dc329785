// SPDX-License-Identifier: GPL-3.0

/// Product name shown in the tray tooltip and balloons
pub const PRODUCT_NAME: &str = "VLC media player";
pub const CONTROL_MENU_MESSAGE: &str = "Control menu for the player";

/// Engine options feeding the main context
pub const OPT_MINIMAL_VIEW: &str = "qt-minimal-view";
pub const OPT_NOTIFICATION: &str = "qt-notification";
pub const OPT_VIDEO_ON_TOP: &str = "video-on-top";
pub const OPT_MENUBAR: &str = "qt-menubar";
pub const OPT_TITLEBAR: &str = "qt-titlebar";
pub const OPT_SMOOTH_SCROLLING: &str = "qt-smooth-scrolling";
pub const OPT_PRIVACY_ASK: &str = "qt-privacy-ask";
pub const OPT_SYSTEM_TRAY: &str = "qt-system-tray";
pub const OPT_START_MINIMIZED: &str = "qt-start-minimized";
pub const OPT_ICON_CHANGE: &str = "qt-icon-change";
pub const OPT_AUTO_RAISE: &str = "qt-auto-raise";
pub const OPT_INTERFACE_SCALE: &str = "qt-interface-scale";
pub const OPT_SAVE_RECENT_PLAY: &str = "save-recent-play";

/// Engine variables
pub const VAR_POPUP_MENU: &str = "intf-popupmenu";
pub const VAR_TOGGLE_FSCONTROL: &str = "intf-toggle-fscontrol";
pub const VAR_BOSS: &str = "intf-boss";
pub const VAR_SHOW: &str = "intf-show";
pub const VAR_KEY_PRESSED: &str = "key-pressed";

/// Persisted settings
pub const GROUP_MAIN_WINDOW: &str = "MainWindow";
pub const KEY_PL_DOCK_STATUS: &str = "pl-dock-status";
pub const KEY_SHOW_REMAINING_TIME: &str = "ShowRemainingTime";
pub const KEY_INTERFACE_SCALE: &str = "interface-scale";
pub const KEY_PIN_VIDEO_CONTROLS: &str = "pin-video-controls";
pub const KEY_PLAYLIST_VISIBLE: &str = "playlist-visible";
pub const KEY_PLAYLIST_WIDTH_FACTOR: &str = "playlist-width-factor";
pub const KEY_GRID_VIEW: &str = "grid-view";
pub const KEY_GROUPING: &str = "grouping";
pub const KEY_COLOR_SCHEME: &str = "color-scheme";
pub const KEY_FILEDIALOG_PATH: &str = "filedialog-path";

pub const SETTINGS_FILENAME: &str = "settings.json";
pub const XDG_PREFIX: &str = "intf-core";

/// Interface scale
pub const MIN_INTF_USER_SCALE_FACTOR: f64 = 0.3;
pub const MAX_INTF_USER_SCALE_FACTOR: f64 = 3.0;
pub const INTF_SCALE_STEP: f64 = 0.1;
pub const REFERENCE_DPI: f64 = 96.0;
pub const SCALE_EPSILON: f64 = 1e-6;
/// Engine value meaning "use the persisted scale"
pub const INTERFACE_SCALE_UNSET: f64 = -1.0;

/// Persisted defaults
pub const DEFAULT_PLAYLIST_DOCKED: bool = true;
pub const DEFAULT_PLAYLIST_VISIBLE: bool = false;
pub const DEFAULT_PLAYLIST_WIDTH_FACTOR: f64 = 4.0;
pub const DEFAULT_GRID_VIEW: bool = true;
pub const DEFAULT_SHOW_REMAINING_TIME: bool = false;
pub const DEFAULT_PIN_VIDEO_CONTROLS: bool = false;
pub const DEFAULT_USER_SCALE_FACTOR: f64 = 1.0;

/// Engine option defaults, used when the engine does not know an option
pub const DEFAULT_MINIMAL_VIEW: bool = false;
pub const DEFAULT_NOTIFICATION: i64 = 1;
pub const DEFAULT_VIDEO_ON_TOP: bool = false;
pub const DEFAULT_MENUBAR: bool = false;
pub const DEFAULT_TITLEBAR: bool = true;
pub const DEFAULT_SMOOTH_SCROLLING: bool = true;
pub const DEFAULT_AUTO_RAISE: i64 = 1;
pub const DEFAULT_PRIVACY_ASK: bool = false;
pub const DEFAULT_SYSTEM_TRAY: bool = true;
pub const DEFAULT_START_MINIMIZED: bool = false;
pub const DEFAULT_ICON_CHANGE: bool = true;
pub const DEFAULT_SAVE_RECENT_PLAY: bool = true;

/// Systray
pub const HOLIDAY_DAY: u32 = 354;
pub const BALLOON_TIMEOUT_MS: u64 = 3000;
