// SPDX-License-Identifier: GPL-3.0

//! Hides player controls the current media cannot use.

use crate::player::{PlayerController, PlayerEvent};
use crate::signal::{ConnectionId, Signal};
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlType {
    PlayButton,
    StopButton,
    PreviousButton,
    NextButton,
    SlowerButton,
    FasterButton,
    FullscreenButton,
    RecordButton,
    SnapshotButton,
    LoopButton,
    RandomButton,
    InfoButton,
    LangButton,
    MenuButton,
    PlaylistButton,
    TeletextButtons,
    DvdMenusButton,
    VolumeWidget,
    TimeLabel,
    Spacer,
    ExpandingSpacer,
}

impl TryFrom<i32> for ControlType {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use ControlType::*;
        const ALL: [ControlType; 21] = [
            PlayButton,
            StopButton,
            PreviousButton,
            NextButton,
            SlowerButton,
            FasterButton,
            FullscreenButton,
            RecordButton,
            SnapshotButton,
            LoopButton,
            RandomButton,
            InfoButton,
            LangButton,
            MenuButton,
            PlaylistButton,
            TeletextButtons,
            DvdMenusButton,
            VolumeWidget,
            TimeLabel,
            Spacer,
            ExpandingSpacer,
        ];
        usize::try_from(value)
            .ok()
            .and_then(|i| ALL.get(i).copied())
            .ok_or(value)
    }
}

impl From<ControlType> for i32 {
    fn from(control: ControlType) -> Self {
        control as i32
    }
}

/// The unfiltered control list.
pub trait ControlListSource {
    fn row_count(&self) -> usize;
    /// The control identifier of `row`, if it carries one.
    fn control_id(&self, row: usize) -> Option<i32>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterEvent {
    Invalidated,
    PlayerChanged,
}

pub struct ControlListFilter {
    source: Rc<dyn ControlListSource>,
    player: Option<Rc<dyn PlayerController>>,
    connection: Option<ConnectionId>,
    events: Rc<Signal<FilterEvent>>,
}

impl ControlListFilter {
    pub fn new(source: Rc<dyn ControlListSource>) -> Self {
        Self {
            source,
            player: None,
            connection: None,
            events: Rc::new(Signal::new()),
        }
    }

    pub fn events(&self) -> &Signal<FilterEvent> {
        &self.events
    }

    pub fn player(&self) -> Option<&Rc<dyn PlayerController>> {
        self.player.as_ref()
    }

    pub fn set_player(&mut self, player: Option<Rc<dyn PlayerController>>) {
        let same = match (&self.player, &player) {
            (Some(old), Some(new)) => std::ptr::addr_eq(Rc::as_ptr(old), Rc::as_ptr(new)),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }

        self.unbind();
        if let Some(player) = &player {
            let events: Weak<Signal<FilterEvent>> = Rc::downgrade(&self.events);
            self.connection = Some(player.events().connect(move |event| {
                if matches!(
                    event,
                    PlayerEvent::TeletextAvailableChanged(_) | PlayerEvent::HasMenuChanged(_)
                ) && let Some(events) = events.upgrade()
                {
                    events.emit(&FilterEvent::Invalidated);
                }
            }));
        }
        self.player = player;

        self.events.emit(&FilterEvent::Invalidated);
        self.events.emit(&FilterEvent::PlayerChanged);
    }

    fn unbind(&mut self) {
        if let (Some(player), Some(connection)) = (&self.player, self.connection.take()) {
            player.events().disconnect(connection);
        }
    }

    pub fn accepts_row(&self, source_row: usize) -> bool {
        let Some(player) = &self.player else {
            return true;
        };
        let Some(id) = self.source.control_id(source_row) else {
            return true;
        };

        match ControlType::try_from(id) {
            Ok(ControlType::TeletextButtons) => player.is_teletext_available(),
            Ok(ControlType::DvdMenusButton) => player.has_menu(),
            _ => true,
        }
    }

    /// Source rows currently shown.
    pub fn visible_rows(&self) -> Vec<usize> {
        (0..self.source.row_count())
            .filter(|row| self.accepts_row(*row))
            .collect()
    }
}

impl Drop for ControlListFilter {
    fn drop(&mut self) {
        self.unbind();
    }
}
