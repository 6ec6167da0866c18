use std::collections::{HashMap, VecDeque};

use crate::scene::entity::{Entity, EntityId, EntityKind};

/// Live entity counts per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Population {
    pub particles: usize,
    pub sparks: usize,
}

impl Population {
    pub fn total(&self) -> usize {
        self.particles + self.sparks
    }
}

/// One kind's entities: hashed by id, iterated in insertion order.
///
/// Removal only touches the map. Ids left behind in `order` are skipped on iteration and
/// compacted away once they outnumber the live entries. Ids are never reused, so a stale entry
/// can never resurface.
#[derive(Debug, Default)]
struct Partition {
    entities: HashMap<EntityId, Entity>,
    order: VecDeque<EntityId>,
}

impl Partition {
    fn insert(&mut self, entity: Entity) -> Option<Entity> {
        let id = entity.id();
        let prev = self.entities.insert(id, entity);
        if prev.is_none() {
            self.order.push_back(id);
        }
        prev
    }

    fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(&id)?;
        while self
            .order
            .front()
            .is_some_and(|front| !self.entities.contains_key(front))
        {
            self.order.pop_front();
        }
        if self.order.len() > 2 * self.entities.len() + 16 {
            let entities = &self.entities;
            self.order.retain(|id| entities.contains_key(id));
        }
        Some(removed)
    }

    fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    fn clear(&mut self) {
        self.entities.clear();
        self.order.clear();
    }
}

/// The set of live entities, partitioned by kind.
///
/// Insert and remove are O(1) expected. Each partition iterates in insertion (draw) order.
#[derive(Debug, Default)]
pub struct Registry {
    particles: Partition,
    sparks: Partition,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity. Returns the previous entity with the same id, which callers never
    /// expect to exist.
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        self.partition_mut(entity.kind()).insert(entity)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.particles
            .remove(id)
            .or_else(|| self.sparks.remove(id))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.particles
            .entities
            .get(&id)
            .or_else(|| self.sparks.entities.get(&id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.particles.entities.get_mut(&id) {
            Some(e) => Some(e),
            None => self.sparks.entities.get_mut(&id),
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.particles.entities.contains_key(&id) || self.sparks.entities.contains_key(&id)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Entity> {
        self.particles.iter()
    }

    pub fn sparks(&self) -> impl Iterator<Item = &Entity> {
        self.sparks.iter()
    }

    /// All entities in draw order: particles first, then sparks.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.particles().chain(self.sparks())
    }

    pub fn len(&self) -> usize {
        self.particles.entities.len() + self.sparks.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn population(&self) -> Population {
        Population {
            particles: self.particles.entities.len(),
            sparks: self.sparks.entities.len(),
        }
    }

    /// Drop every entity. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.len();
        self.particles.clear();
        self.sparks.clear();
        n
    }

    fn partition_mut(&mut self, kind: EntityKind) -> &mut Partition {
        match kind {
            EntityKind::Particle => &mut self.particles,
            EntityKind::Spark => &mut self.sparks,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
