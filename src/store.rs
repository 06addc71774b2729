//! Insertion-ordered, in-memory collection of entities.
//!
//! The store is a plain synchronous structure; concurrent access is handled by
//! the [`ResourceActor`](crate::actor_framework::ResourceActor) that owns it.

use std::collections::HashSet;

use crate::actor_framework::{Entity, EntityId, FrameworkError};

#[derive(Debug, Clone)]
pub struct Store<T: Entity> {
    items: Vec<T>,
    /// Highest id ever held by the store. Deleted ids are never handed out again.
    last_id: EntityId,
}

impl<T: Entity> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Store<T> {
    pub fn new() -> Self {
        Self { items: Vec::new(), last_id: 0 }
    }

    /// Builds a store from existing records, keeping their order.
    ///
    /// # Errors
    /// Fails on duplicate ids or on a record its entity type refuses.
    pub fn with_items(items: Vec<T>) -> Result<Self, FrameworkError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(FrameworkError::DuplicateId(item.id()));
            }
            item.validate().map_err(FrameworkError::Rejected)?;
        }
        let last_id = items.iter().map(|item| item.id()).max().unwrap_or(0).max(0);
        Ok(Self { items, last_id })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn find_by_id(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Assigns the next id, runs the creation hooks and appends the record.
    pub fn insert(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let id = self.last_id + 1;
        let mut item = T::from_create(id, payload).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.last_id = id;
        self.items.push(item.clone());
        Ok(item)
    }

    pub fn replace(&mut self, id: EntityId, replace: T::Replace) -> Result<T, FrameworkError> {
        self.modify(id, |item| item.on_replace(replace))
    }

    pub fn patch_fields(&mut self, id: EntityId, patch: T::Patch) -> Result<T, FrameworkError> {
        self.modify(id, |item| item.on_update(patch))
    }

    pub fn remove(&mut self, id: EntityId) -> Result<T, FrameworkError> {
        let index = self.position(id)?;
        self.items[index].on_delete().map_err(FrameworkError::Rejected)?;
        Ok(self.items.remove(index))
    }

    fn position(&self, id: EntityId) -> Result<usize, FrameworkError> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(FrameworkError::NotFound(id))
    }

    // Hooks run against a copy; the stored record changes only when they succeed.
    fn modify(
        &mut self,
        id: EntityId,
        apply: impl FnOnce(&mut T) -> Result<(), String>,
    ) -> Result<T, FrameworkError> {
        let index = self.position(id)?;
        let mut updated = self.items[index].clone();
        apply(&mut updated).map_err(FrameworkError::Rejected)?;
        self.items[index] = updated.clone();
        Ok(updated)
    }
}
