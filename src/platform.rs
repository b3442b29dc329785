// SPDX-License-Identifier: GPL-3.0

/// Platform capabilities queried by the systray and drop handling.
pub trait Platform {
    /// A tray click only rebuilds the tray menu instead of toggling the window.
    fn tray_click_rebuilds_menu_only(&self) -> bool;
    /// Dropped files that are links are resolved one hop before ingestion.
    fn resolves_dropped_links(&self) -> bool;
    fn is_wayland(&self) -> bool;
}

/// Capabilities of the platform this process runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn tray_click_rebuilds_menu_only(&self) -> bool {
        cfg!(target_os = "macos")
    }

    fn resolves_dropped_links(&self) -> bool {
        cfg!(target_os = "windows")
    }

    fn is_wayland(&self) -> bool {
        std::env::var("XDG_SESSION_TYPE").is_ok_and(|s| s.eq_ignore_ascii_case("wayland"))
            || std::env::var_os("WAYLAND_DISPLAY").is_some()
    }
}
