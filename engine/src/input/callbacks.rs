//! Action Callbacks
//!
//! Callbacks are registered per action and fire in registration order. Each
//! registration gets an ID from a per-registry counter; IDs are never reused
//! and zero is never issued.

use std::collections::HashMap;
use std::num::NonZeroU64;

use log::debug;

use super::actions::{InputAction, InputLayer};

/// Handle returned by callback registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(NonZeroU64);

impl CallbackId {
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

/// A callback's return value is reported back to the dispatcher's caller;
/// it does not stop later callbacks from running.
pub type ActionCallback = Box<dyn FnMut() -> bool>;

struct Registered {
    id: CallbackId,
    callback: ActionCallback,
}

/// Result of firing one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFired {
    pub action: InputAction,
    pub layer: InputLayer,
    /// Every invoked callback with its return value, in invocation order.
    pub results: Vec<(CallbackId, bool)>,
}

impl ActionFired {
    /// `true` if any callback returned `true`.
    pub fn consumed(&self) -> bool {
        self.results.iter().any(|&(_, handled)| handled)
    }
}

/// Per-action callback lists.
pub struct CallbackRegistry {
    next_id: NonZeroU64,
    by_action: HashMap<InputAction, Vec<Registered>>,
    action_of: HashMap<CallbackId, InputAction>,
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self {
            next_id: NonZeroU64::MIN,
            by_action: HashMap::new(),
            action_of: HashMap::new(),
        }
    }

    /// Register `callback` for `action`.
    pub fn register(&mut self, action: InputAction, callback: ActionCallback) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        self.by_action
            .entry(action)
            .or_default()
            .push(Registered { id, callback });
        self.action_of.insert(id, action);
        debug!("callback {} registered for {action}", id.get());
        id
    }

    /// Remove a callback. Returns `false` if the ID is unknown.
    pub fn unregister(&mut self, id: CallbackId) -> bool {
        let Some(action) = self.action_of.remove(&id) else {
            return false;
        };
        if let Some(list) = self.by_action.get_mut(&action) {
            list.retain(|r| r.id != id);
        }
        debug!("callback {} unregistered from {action}", id.get());
        true
    }

    /// Invoke every callback registered for `action`, in registration order.
    pub fn fire(&mut self, action: InputAction, layer: InputLayer) -> ActionFired {
        let results = self
            .by_action
            .get_mut(&action)
            .map(|list| {
                list.iter_mut()
                    .map(|r| (r.id, (r.callback)()))
                    .collect()
            })
            .unwrap_or_default();
        ActionFired {
            action,
            layer,
            results,
        }
    }

    pub fn count(&self, action: InputAction) -> usize {
        self.by_action.get(&action).map_or(0, Vec::len)
    }

    pub fn is_registered(&self, id: CallbackId) -> bool {
        self.action_of.contains_key(&id)
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("next_id", &self.next_id)
            .field("registered", &self.action_of.len())
            .finish()
    }
}
