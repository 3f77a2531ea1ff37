//! Keybind Registry
//!
//! Owns every registered keybind together with the indices used to resolve
//! them:
//!
//! - `(hash, layer) -> action`: which action a chord produces on each layer
//! - `action -> hash`: the single chord polled for an action
//! - `key -> [hash]`: the chords a key participates in, for event dispatch

use std::collections::HashMap;

use log::debug;

use super::actions::{InputAction, InputLayer};
use super::key_set::KeySet;
use super::keybind::{Keybind, KeybindHash};
use super::keys::{KEY_COUNT, KeyCode};

type LayerActions = [Option<InputAction>; InputLayer::COUNT];

/// Registered keybinds and their action mappings.
#[derive(Debug)]
pub struct KeybindRegistry {
    keybinds: Vec<Keybind>,
    index_of: HashMap<KeybindHash, usize>,
    layer_actions: HashMap<KeybindHash, LayerActions>,
    action_to_hash: [Option<KeybindHash>; InputAction::COUNT],
    key_to_binds: Vec<Vec<KeybindHash>>,
    key_mask: KeySet,
}

impl Default for KeybindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindRegistry {
    pub fn new() -> Self {
        Self {
            keybinds: Vec::new(),
            index_of: HashMap::new(),
            layer_actions: HashMap::new(),
            action_to_hash: [None; InputAction::COUNT],
            key_to_binds: vec![Vec::new(); KEY_COUNT],
            key_mask: KeySet::new(),
        }
    }

    /// Bind an ordered chord to `action` on `layer`.
    ///
    /// The first registration of a chord creates its record; later ones only
    /// update the mappings. Last write wins for both the chord's action on
    /// `layer` and the chord polled for `action`. Returns `None` for an empty
    /// chord or one that repeats a key.
    pub fn add_keybind(
        &mut self,
        keys: &[KeyCode],
        action: InputAction,
        layer: InputLayer,
    ) -> Option<KeybindHash> {
        let hash = KeybindHash::of(keys);

        if !self.index_of.contains_key(&hash) {
            let keybind = Keybind::new(keys)?;
            for key in keybind.all_keys().iter() {
                self.key_to_binds[key.index()].push(hash);
                self.key_mask.insert(key);
            }
            self.index_of.insert(hash, self.keybinds.len());
            self.keybinds.push(keybind);
            debug!("registered keybind {hash} {keys:?}");
        }

        let slot = &mut self.layer_actions.entry(hash).or_insert([None; InputLayer::COUNT])
            [layer.index()];
        if let Some(previous) = slot.replace(action) {
            if previous != action {
                debug!("keybind {hash} on {layer}: {previous} replaced by {action}");
            }
        }

        if let Some(previous) = self.action_to_hash[action.index()].replace(hash) {
            if previous != hash {
                debug!("{action} moved from keybind {previous} to {hash}");
            }
        }

        Some(hash)
    }

    /// Remove a keybind and every mapping that references it. Unknown hashes
    /// are ignored.
    pub fn remove_keybind(&mut self, hash: KeybindHash) {
        self.layer_actions.remove(&hash);
        for slot in self.action_to_hash.iter_mut() {
            if *slot == Some(hash) {
                *slot = None;
            }
        }

        let Some(index) = self.index_of.remove(&hash) else {
            return;
        };
        let removed = self.keybinds.swap_remove(index);
        if let Some(moved) = self.keybinds.get(index) {
            self.index_of.insert(moved.hash(), index);
        }

        for key in removed.all_keys().iter() {
            let binds = &mut self.key_to_binds[key.index()];
            binds.retain(|h| *h != hash);
            if binds.is_empty() {
                self.key_mask.remove(key);
            }
        }
        debug!("removed keybind {hash} {:?}", removed.keys());
    }

    pub fn get(&self, hash: KeybindHash) -> Option<&Keybind> {
        self.index_of.get(&hash).map(|&i| &self.keybinds[i])
    }

    pub(crate) fn get_mut(&mut self, hash: KeybindHash) -> Option<&mut Keybind> {
        let index = *self.index_of.get(&hash)?;
        self.keybinds.get_mut(index)
    }

    /// The chord currently polled for `action`.
    pub fn hash_for_action(&self, action: InputAction) -> Option<KeybindHash> {
        self.action_to_hash[action.index()]
    }

    /// The action a chord produces on `layer`.
    pub fn action_for(&self, hash: KeybindHash, layer: InputLayer) -> Option<InputAction> {
        self.layer_actions.get(&hash)?[layer.index()]
    }

    /// Chords that `key` participates in.
    pub fn keybinds_for_key(&self, key: KeyCode) -> &[KeybindHash] {
        &self.key_to_binds[key.index()]
    }

    /// Every key used by at least one keybind.
    pub fn key_mask(&self) -> &KeySet {
        &self.key_mask
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keybind> {
        self.keybinds.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Keybind> {
        self.keybinds.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.keybinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keybinds.is_empty()
    }
}
