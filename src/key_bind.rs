// SPDX-License-Identifier: GPL-3.0

//! Translation of GUI key presses into engine key codes.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Backspace,
    Tab,
    Enter,
    Escape,
    Space,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Insert,
    Menu,
    PageUp,
    PageDown,
    MediaPlayPause,
    MediaStop,
    MediaTrackNext,
    MediaTrackPrevious,
    AudioVolumeUp,
    AudioVolumeDown,
    AudioVolumeMute,
    F(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),
    Named(NamedKey),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    fn mask(self) -> i64 {
        let mut mask = 0;
        if self.alt {
            mask |= KEY_MODIFIER_ALT;
        }
        if self.shift {
            mask |= KEY_MODIFIER_SHIFT;
        }
        if self.ctrl {
            mask |= KEY_MODIFIER_CTRL;
        }
        if self.meta {
            mask |= KEY_MODIFIER_META;
        }
        mask
    }
}

pub const KEY_MODIFIER_ALT: i64 = 0x0100_0000;
pub const KEY_MODIFIER_SHIFT: i64 = 0x0200_0000;
pub const KEY_MODIFIER_CTRL: i64 = 0x0400_0000;
pub const KEY_MODIFIER_META: i64 = 0x0800_0000;

fn named_code(key: NamedKey) -> Option<i64> {
    macro_rules! codes {
        ($($named:ident => $code:expr),* $(,)?) => {
            match key {
                $(NamedKey::$named => Some($code),)*
                NamedKey::F(n @ 1..=12) => Some(0x0026_0000 + (i64::from(n) << 16)),
                NamedKey::F(_) => None,
            }
        };
    }

    codes!(
        Backspace => 0x08,
        Tab => 0x09,
        Enter => 0x0D,
        Escape => 0x1B,
        Space => 0x20,
        Delete => 0x7F,
        ArrowLeft => 0x0021_0000,
        ArrowRight => 0x0022_0000,
        ArrowUp => 0x0023_0000,
        ArrowDown => 0x0024_0000,
        Home => 0x0033_0000,
        End => 0x0034_0000,
        Insert => 0x0035_0000,
        Menu => 0x0036_0000,
        PageUp => 0x0039_0000,
        PageDown => 0x003A_0000,
        MediaPlayPause => 0x0069_0000,
        MediaStop => 0x0068_0000,
        MediaTrackNext => 0x0066_0000,
        MediaTrackPrevious => 0x0067_0000,
        AudioVolumeUp => 0x0060_0000,
        AudioVolumeDown => 0x0061_0000,
        AudioVolumeMute => 0x0062_0000,
    )
}

/// Engine key code for a key press, or `None` for keys the engine does
/// not know.
pub fn engine_key_code(key: Key, modifiers: Modifiers) -> Option<i64> {
    let code = match key {
        Key::Character(c) => {
            let c = c.to_lowercase().next().unwrap_or(c);
            if c.is_control() {
                return None;
            }
            i64::from(u32::from(c))
        }
        Key::Named(named) => named_code(named)?,
    };
    Some(code | modifiers.mask())
}
