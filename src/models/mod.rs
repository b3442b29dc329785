// SPDX-License-Identifier: GPL-3.0

//! List models observed by the view.

pub mod bookmark_model;
pub mod control_list_filter;

/// Change notifications of a list model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelEvent {
    BeginReset,
    EndReset,
    DataChanged { row: usize, column: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}
