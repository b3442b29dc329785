// SPDX-License-Identifier: GPL-3.0

/// Player state as reported by the engine and mirrored by the player controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Stopped,
    Started,
    Playing,
    Paused,
    Stopping,
}

impl PlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerState::Stopped => "Stopped",
            PlayerState::Started => "Started",
            PlayerState::Playing => "Playing",
            PlayerState::Paused => "Paused",
            PlayerState::Stopping => "Stopping",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlayerState::Playing | PlayerState::Started)
    }
}
