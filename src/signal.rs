// SPDX-License-Identifier: GPL-3.0

//! GUI-thread observer primitive.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

type Slot<E> = Rc<dyn Fn(&E)>;

struct Slots<E> {
    next_id: u64,
    slots: Vec<(ConnectionId, Slot<E>)>,
}

/// A list of subscribers notified synchronously, in connection order.
///
/// Cloning yields another handle to the same subscriber list. Slots may
/// connect or disconnect while an emission is in progress; such changes
/// take effect from the next emission.
pub struct Signal<E> {
    inner: Rc<RefCell<Slots<E>>>,
}

impl<E> Clone for Signal<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Slots {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }
}

impl<E> Signal<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, slot: impl Fn(&E) + 'static) -> ConnectionId {
        let mut inner = self.inner.borrow_mut();
        let id = ConnectionId(inner.next_id);
        inner.next_id += 1;
        inner.slots.push((id, Rc::new(slot)));
        id
    }

    /// Returns `false` if `id` was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.slots.len();
        inner.slots.retain(|(slot_id, _)| *slot_id != id);
        inner.slots.len() != before
    }

    pub fn disconnect_all(&self) {
        self.inner.borrow_mut().slots.clear();
    }

    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.inner.borrow().slots.iter().any(|(slot_id, _)| *slot_id == id)
    }

    pub fn receiver_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    pub fn emit(&self, event: &E) {
        let slots: Vec<Slot<E>> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|(_, slot)| slot.clone())
            .collect();
        for slot in slots {
            slot(event);
        }
    }
}
