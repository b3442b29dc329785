// SPDX-License-Identifier: GPL-3.0

//! In-process engine used for headless runs.
//!
//! Callbacks run synchronously on whichever thread sets the variable, the
//! way a real engine dispatches them on its own threads. No lock is held
//! while a callback runs.

use super::{
    CallbackId, Engine, EngineError, EnginePlayer, ListenerId, MediaItem, PlayerListener,
    VarCallback, VarValue,
};
use crate::playback_state::PlayerState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct MemoryEngine {
    options: Mutex<HashMap<String, VarValue>>,
    variables: Mutex<HashMap<String, VarValue>>,
    callbacks: Mutex<HashMap<String, Vec<(CallbackId, VarCallback)>>>,
    refused: Mutex<Vec<String>>,
    next_id: AtomicU64,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_option(&self, name: &str, value: VarValue) {
        lock(&self.options).insert(name.to_string(), value);
    }

    pub fn variable(&self, name: &str) -> Option<VarValue> {
        lock(&self.variables).get(name).cloned()
    }

    /// Number of callbacks currently registered on `variable`.
    pub fn callback_count(&self, variable: &str) -> usize {
        lock(&self.callbacks).get(variable).map_or(0, Vec::len)
    }

    /// Make future registrations on `variable` fail.
    pub fn refuse_callbacks_on(&self, variable: &str) {
        lock(&self.refused).push(variable.to_string());
    }
}

impl Engine for MemoryEngine {
    fn option(&self, name: &str) -> Option<VarValue> {
        lock(&self.options).get(name).cloned()
    }

    fn set_variable(&self, name: &str, value: VarValue) {
        lock(&self.variables).insert(name.to_string(), value.clone());

        let callbacks: Vec<VarCallback> = lock(&self.callbacks)
            .get(name)
            .map(|cbs| cbs.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();

        for callback in callbacks {
            callback(&value);
        }
    }

    fn add_callback(
        &self,
        variable: &str,
        callback: VarCallback,
    ) -> Result<CallbackId, EngineError> {
        if lock(&self.refused).iter().any(|v| v == variable) {
            return Err(EngineError::Registration(format!(
                "callbacks on {variable:?} are refused"
            )));
        }
        let id = CallbackId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.callbacks)
            .entry(variable.to_string())
            .or_default()
            .push((id, callback));
        Ok(id)
    }

    fn del_callback(&self, variable: &str, id: CallbackId) {
        let mut callbacks = lock(&self.callbacks);
        let removed = callbacks.get_mut(variable).is_some_and(|cbs| {
            let before = cbs.len();
            cbs.retain(|(cb_id, _)| *cb_id != id);
            cbs.len() != before
        });
        if !removed {
            log::warn!("no callback {id:?} registered on {variable:?}");
        }
    }
}

struct PlayerInner {
    current: Option<Arc<MediaItem>>,
    state: PlayerState,
    time_ms: Option<i64>,
    seeks: Vec<i64>,
    listeners: Vec<(ListenerId, Arc<dyn PlayerListener>)>,
}

/// In-process player. `set_media` and `set_state` notify listeners on the
/// calling thread.
pub struct MemoryPlayer {
    inner: Mutex<PlayerInner>,
    next_id: AtomicU64,
}

impl Default for MemoryPlayer {
    fn default() -> Self {
        Self {
            inner: Mutex::new(PlayerInner {
                current: None,
                state: PlayerState::Stopped,
                time_ms: None,
                seeks: Vec::new(),
                listeners: Vec::new(),
            }),
            next_id: AtomicU64::new(1),
        }
    }
}

impl MemoryPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self) -> Vec<Arc<dyn PlayerListener>> {
        lock(&self.inner)
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect()
    }

    pub fn set_media(&self, media: Option<Arc<MediaItem>>) {
        lock(&self.inner).current = media.clone();
        for listener in self.listeners() {
            listener.on_current_media_changed(media.clone());
        }
    }

    pub fn set_state(&self, state: PlayerState) {
        lock(&self.inner).state = state;
        for listener in self.listeners() {
            listener.on_state_changed(state);
        }
    }

    pub fn state(&self) -> PlayerState {
        lock(&self.inner).state
    }

    pub fn set_time_ms(&self, time_ms: Option<i64>) {
        lock(&self.inner).time_ms = time_ms;
    }

    pub fn seeks(&self) -> Vec<i64> {
        lock(&self.inner).seeks.clone()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

impl EnginePlayer for MemoryPlayer {
    fn add_listener(&self, listener: Arc<dyn PlayerListener>) -> Result<ListenerId, EngineError> {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.inner).listeners.push((id, listener));
        Ok(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        lock(&self.inner).listeners.retain(|(l, _)| *l != id);
    }

    fn current_media(&self) -> Option<Arc<MediaItem>> {
        lock(&self.inner).current.clone()
    }

    fn time_ms(&self) -> Option<i64> {
        lock(&self.inner).time_ms
    }

    fn seek_ms(&self, time_ms: i64) {
        let mut inner = lock(&self.inner);
        inner.seeks.push(time_ms);
        inner.time_ms = Some(time_ms);
    }
}
