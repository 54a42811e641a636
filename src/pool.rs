//! Per-kind entity storage with a two-phase removal protocol.
//!
//! During a tick entities only ever get appended, so an index handed out by
//! [`EntityPool::push`] stays valid until [`EntityPool::compact`] runs at the
//! end of the tick. Marking records the index in a pending set; compaction
//! then drops everything pending in one pass, keeping survivors in order.

use std::collections::BTreeSet;

use log::trace;

use crate::entities::{Entity, WorldView};
use crate::surface::Surface;

#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    items: Vec<T>,
    pending_removal: BTreeSet<usize>,
    cap: Option<usize>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pending_removal: BTreeSet::new(),
            cap: None,
        }
    }
}

impl<T: Entity> EntityPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool that keeps at most `cap` entities, dropping the newest beyond it
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap: Some(cap),
            ..Self::default()
        }
    }

    /// Appends an entity and returns its index for the rest of the tick
    pub fn push(&mut self, entity: T) -> usize {
        self.items.push(entity);
        self.items.len() - 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Marks the entity at `index` for removal at the next compaction
    pub fn mark(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(entity) => {
                entity.mark_for_deletion();
                self.pending_removal.insert(index);
                true
            }
            None => false,
        }
    }

    /// Number of entities waiting for compaction
    pub fn pending(&self) -> usize {
        self.pending_removal.len()
    }

    /// Updates every entity in insertion order and records the ones that
    /// marked themselves. Nothing is removed here.
    pub fn update_all(&mut self, delta_ms: f64, world: &WorldView) {
        for (index, entity) in self.items.iter_mut().enumerate() {
            entity.update(delta_ms, world);
            if entity.is_marked_for_deletion() {
                self.pending_removal.insert(index);
            }
        }
    }

    /// Drops the newest entities beyond the cap. Returns how many were dropped.
    pub fn enforce_cap(&mut self) -> usize {
        let Some(cap) = self.cap else {
            return 0;
        };
        if self.items.len() <= cap {
            return 0;
        }

        let dropped = self.items.len() - cap;
        self.items.truncate(cap);
        self.pending_removal.retain(|&index| index < cap);
        trace!("Dropped {dropped} entities over the cap of {cap}");
        dropped
    }

    /// Removes every marked entity, preserving the order of the rest.
    /// Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        // Pick up anything marked directly through iter_mut
        for (index, entity) in self.items.iter().enumerate() {
            if entity.is_marked_for_deletion() {
                self.pending_removal.insert(index);
            }
        }
        if self.pending_removal.is_empty() {
            return 0;
        }

        let removed = self.pending_removal.len();
        let mut index = 0;
        self.items.retain(|_| {
            let keep = !self.pending_removal.contains(&index);
            index += 1;
            keep
        });
        self.pending_removal.clear();
        removed
    }

    pub fn draw_all(&self, surface: &mut dyn Surface) {
        for entity in &self.items {
            entity.draw(surface);
        }
    }
}
