// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Body ownership
//!
//! The `World` plays the owning-scene role around a `Simulator`: it owns the
//! bodies, hands out generational handles, and removes bodies once they are
//! marked deleted. Bodies live in a dense vector in simulation order; the
//! order pass permutes that vector, so the handle-to-position table is
//! rebuilt after every step.

use crate::body::RigidBody;
use crate::error::PhysicsError;
use crate::simulator::Simulator;
use crate::world::BodyHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    dense: Option<usize>,
}

/// Container owning every body of a scene
///
/// # Examples
///
/// ```
/// use rigid2d::{RigidBody, Simulator, World};
/// use rigid2d::math::Vector2D;
///
/// let mut world = World::new();
/// let ball = world.insert(RigidBody::ellipse(2.0, 2.0).with_velocity(Vector2D::new(1.0, 0.0)));
///
/// let simulator = Simulator::default();
/// world.step(&simulator);
///
/// assert_eq!(world.get(ball).unwrap().position(), Vector2D::new(1.0, 0.0));
/// ```
#[derive(Debug, Default)]
pub struct World {
    bodies: Vec<RigidBody>,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        World {
            bodies: Vec::new(),
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Add a body and return its handle
    pub fn insert(&mut self, mut body: RigidBody) -> BodyHandle {
        let dense = self.bodies.len();
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.dense = Some(dense);
                BodyHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    dense: Some(dense),
                });
                BodyHandle::new(index, 0)
            }
        };

        body.set_handle(Some(handle));
        self.bodies.push(body);
        handle
    }

    /// Remove a body immediately and return it
    pub fn remove(&mut self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        let dense = self
            .dense_index(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?;

        let mut body = self.bodies.swap_remove(dense);
        if let Some(moved) = self.bodies.get(dense).and_then(RigidBody::handle) {
            self.slots[moved.index() as usize].dense = Some(dense);
        }
        self.release(handle);
        body.set_handle(None);
        Ok(body)
    }

    /// Get a body by handle
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.dense_index(handle).map(|dense| &self.bodies[dense])
    }

    /// Get a mutable body by handle
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.dense_index(handle).map(move |dense| &mut self.bodies[dense])
    }

    /// Get a body by handle, failing with `UnknownBody`
    pub fn try_get(&self, handle: BodyHandle) -> Result<&RigidBody, PhysicsError> {
        self.get(handle).ok_or(PhysicsError::UnknownBody(handle))
    }

    /// Get a mutable body by handle, failing with `UnknownBody`
    pub fn try_get_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.get_mut(handle).ok_or(PhysicsError::UnknownBody(handle))
    }

    /// Check whether a handle refers to a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.dense_index(handle).is_some()
    }

    /// Number of bodies, including ones marked deleted but not yet purged
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check if the world holds no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies in simulation order
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Iterate over bodies in simulation order
    pub fn iter(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter()
    }

    /// Iterate mutably over bodies in simulation order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RigidBody> {
        self.bodies.iter_mut()
    }

    /// Remove every body, invalidating all outstanding handles
    pub fn clear(&mut self) {
        let handles: Vec<BodyHandle> = self.bodies.drain(..).filter_map(|b| b.handle()).collect();
        for handle in handles {
            self.release(handle);
        }
    }

    /// Drop bodies marked deleted, returning how many were removed
    pub fn purge_deleted(&mut self) -> usize {
        let before = self.bodies.len();
        let mut released = Vec::new();
        self.bodies.retain(|body| {
            if body.is_deleted() {
                if let Some(handle) = body.handle() {
                    released.push(handle);
                }
                false
            } else {
                true
            }
        });

        for handle in released {
            self.release(handle);
        }

        let removed = before - self.bodies.len();
        if removed > 0 {
            debug!(removed, remaining = self.bodies.len(), "purged deleted bodies");
            self.reindex();
        }
        removed
    }

    /// Advance the world by one tick
    ///
    /// Purges deleted bodies, runs the simulator over the rest, then rebuilds
    /// the handle table since the order pass may have permuted storage.
    /// Bodies deleted by collision handlers during the tick stay in the world
    /// until the next step.
    pub fn step(&mut self, simulator: &Simulator) {
        self.purge_deleted();
        simulator.simulate(&mut self.bodies);
        self.reindex();
    }

    fn dense_index(&self, handle: BodyHandle) -> Option<usize> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.dense
    }

    fn release(&mut self, handle: BodyHandle) {
        let slot = &mut self.slots[handle.index() as usize];
        slot.dense = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index());
    }

    fn reindex(&mut self) {
        for (dense, body) in self.bodies.iter().enumerate() {
            if let Some(handle) = body.handle() {
                self.slots[handle.index() as usize].dense = Some(dense);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2D;

    #[test]
    fn test_world_body_lifecycle() {
        let mut world = World::new();

        let b1 = world.insert(RigidBody::rectangle(1.0, 1.0));
        let b2 = world.insert(RigidBody::ellipse(1.0, 1.0));

        assert_eq!(world.len(), 2);
        assert!(world.contains(b1));
        assert!(world.contains(b2));
        assert_eq!(world.get(b1).unwrap().handle(), Some(b1));

        let removed = world.remove(b1).unwrap();
        assert!(removed.handle().is_none());
        assert_eq!(world.len(), 1);
        assert!(!world.contains(b1));
        assert!(world.contains(b2));
        assert_eq!(world.get(b2).unwrap().handle(), Some(b2));
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut world = World::new();
        let b1 = world.insert(RigidBody::new());
        world.remove(b1).unwrap();

        let b2 = world.insert(RigidBody::new());
        assert_eq!(b2.index(), b1.index());
        assert_ne!(b2.generation(), b1.generation());
        assert!(world.get(b1).is_none());
        assert!(world.get(b2).is_some());
    }

    #[test]
    fn test_remove_unknown_handle() {
        let mut world = World::new();
        let result = world.remove(BodyHandle::new(9, 0));
        assert!(matches!(result, Err(PhysicsError::UnknownBody(_))));
        assert!(world.try_get(BodyHandle::new(9, 0)).is_err());
    }

    #[test]
    fn test_purge_deleted() {
        let mut world = World::new();
        let keep = world.insert(RigidBody::new());
        let drop = world.insert(RigidBody::new());
        world.get_mut(drop).unwrap().mark_deleted();

        assert_eq!(world.purge_deleted(), 1);
        assert_eq!(world.len(), 1);
        assert!(world.contains(keep));
        assert!(!world.contains(drop));
        assert_eq!(world.purge_deleted(), 0);
    }

    #[test]
    fn test_handles_survive_reordering() {
        let mut world = World::new();
        let low = world.insert(RigidBody::rectangle(1.0, 1.0).with_position(Vector2D::new(0.0, 0.0)));
        let high = world.insert(RigidBody::rectangle(1.0, 1.0).with_position(Vector2D::new(50.0, 100.0)));

        world.step(&Simulator::default());

        // descending y puts `high` first
        assert_eq!(world.bodies()[0].handle(), Some(high));
        assert_eq!(world.get(low).unwrap().position(), Vector2D::new(0.0, 0.0));
        assert_eq!(world.get(high).unwrap().position(), Vector2D::new(50.0, 100.0));
    }

    #[test]
    fn test_world_clear() {
        let mut world = World::new();
        let first = world.insert(RigidBody::new());
        world.insert(RigidBody::new());

        assert_eq!(world.len(), 2);
        world.clear();
        assert!(world.is_empty());

        let fresh = world.insert(RigidBody::new());
        assert!(!world.contains(first));
        assert!(world.contains(fresh));
    }
}
