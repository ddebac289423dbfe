//! The hosting window's key chord stream and its listeners.

use super::events::KeyChord;
use log::debug;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug)]
struct Listener {
    id: u64,
    pending: VecDeque<KeyChord>,
}

#[derive(Debug, Default)]
struct HubState {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// The window-level key event source.
///
/// Components register while they are mounted and hold the returned
/// [`ListenerGuard`]. Every dispatched chord is queued once for each live
/// registration and the owner drains its queue through the guard. Dropping
/// the guard removes the registration together with any undelivered
/// chords. Clones share the same stream.
#[derive(Debug, Clone, Default)]
pub struct KeyboardHub {
    state: Rc<RefCell<HubState>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener and returns the guard that owns it.
    pub fn register(&self) -> ListenerGuard {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push(Listener {
            id,
            pending: VecDeque::new(),
        });
        debug!(
            "Registered key listener #{} ({} active)",
            id,
            state.listeners.len()
        );
        ListenerGuard {
            id,
            state: Rc::clone(&self.state),
        }
    }

    /// Queues `chord` for every registered listener.
    ///
    /// Returns how many listeners received it; zero means nobody is
    /// listening and the chord belongs to the host.
    pub fn dispatch(&self, chord: &KeyChord) -> usize {
        let mut state = self.state.borrow_mut();
        for listener in &mut state.listeners {
            listener.pending.push_back(chord.clone());
        }
        state.listeners.len()
    }

    /// Number of live registrations.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

/// Keeps one key listener registered on a [`KeyboardHub`] until dropped.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    state: Rc<RefCell<HubState>>,
}

impl ListenerGuard {
    /// Whether this guard's registration is still present on its hub.
    pub fn is_registered(&self) -> bool {
        self.state
            .borrow()
            .listeners
            .iter()
            .any(|listener| listener.id == self.id)
    }

    /// Takes the oldest chord dispatched to this listener.
    pub fn next_chord(&self) -> Option<KeyChord> {
        self.state
            .borrow_mut()
            .listeners
            .iter_mut()
            .find(|listener| listener.id == self.id)
            .and_then(|listener| listener.pending.pop_front())
    }

    /// Whether this guard was issued by `hub`.
    pub fn belongs_to(&self, hub: &KeyboardHub) -> bool {
        Rc::ptr_eq(&self.state, &hub.state)
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.listeners.retain(|listener| listener.id != self.id);
        debug!(
            "Removed key listener #{} ({} active)",
            self.id,
            state.listeners.len()
        );
    }
}
