//=========================================================================
// Flat World
//=========================================================================
//
// Minimal physics world: explicit Euler integration, constant gravity,
// and an infinite floor plane. Enough for a character to stand, walk and
// fall back down; collisions between bodies are not resolved.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec3;
use log::trace;

//=== Internal Dependencies ===============================================

use super::{
    BodyType, ColliderDesc, ColliderHandle, PhysicsWorld, RigidBodyDesc, RigidBodyHandle,
};

//=== Constants ===========================================================

const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;
const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

//=== Body ================================================================

#[derive(Debug, Clone)]
struct Body {
    body_type: BodyType,
    translation: Vec3,
    velocity: Vec3,
    /// Center height above the floor when resting.
    rest_height: f32,
    colliders: Vec<ColliderHandle>,
}

//=== FlatWorld ===========================================================

#[derive(Debug, Clone)]
pub struct FlatWorld {
    gravity: Vec3,
    timestep: f32,
    floor: f32,
    bodies: HashMap<RigidBodyHandle, Body>,
    colliders: HashMap<ColliderHandle, Option<RigidBodyHandle>>,
    next_id: u64,
    steps: u64,
}

impl FlatWorld {
    pub fn new() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            timestep: DEFAULT_TIMESTEP,
            floor: 0.0,
            bodies: HashMap::new(),
            colliders: HashMap::new(),
            next_id: 0,
            steps: 0,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep.max(f32::EPSILON);
        self
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Number of `step()` calls so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn next_raw(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Default for FlatWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for FlatWorld {
    fn create_rigid_body(&mut self, desc: &RigidBodyDesc) -> RigidBodyHandle {
        let handle = RigidBodyHandle::from_raw(self.next_raw());
        self.bodies.insert(
            handle,
            Body {
                body_type: desc.body_type,
                translation: desc.translation,
                velocity: Vec3::ZERO,
                rest_height: 0.0,
                colliders: Vec::new(),
            },
        );
        trace!(target: "physics", "Created {:?} body {:?}", desc.body_type, handle);
        handle
    }

    fn create_collider(&mut self, desc: &ColliderDesc, parent: Option<RigidBodyHandle>) -> ColliderHandle {
        let handle = ColliderHandle::from_raw(self.next_raw());
        let parent = parent.filter(|body| self.bodies.contains_key(body));

        if let Some(body) = parent.and_then(|body| self.bodies.get_mut(&body)) {
            let lowest = desc.shape.half_height() - desc.translation.y;
            body.rest_height = body.rest_height.max(lowest);
            body.colliders.push(handle);
        }

        self.colliders.insert(handle, parent);
        handle
    }

    fn remove_rigid_body(&mut self, body: RigidBodyHandle) -> bool {
        match self.bodies.remove(&body) {
            Some(removed) => {
                for collider in removed.colliders {
                    self.colliders.remove(&collider);
                }
                true
            }
            None => false,
        }
    }

    fn step(&mut self) {
        let dt = self.timestep;
        for body in self.bodies.values_mut() {
            match body.body_type {
                BodyType::Fixed => continue,
                BodyType::Dynamic => body.velocity += self.gravity * dt,
                BodyType::Kinematic => {}
            }

            body.translation += body.velocity * dt;

            let rest = self.floor + body.rest_height;
            if body.body_type == BodyType::Dynamic && body.translation.y <= rest {
                body.translation.y = rest;
                body.velocity.y = body.velocity.y.max(0.0);
            }
        }
        self.steps += 1;
    }

    fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.velocity)
    }

    fn set_linear_velocity(&mut self, body: RigidBodyHandle, velocity: Vec3) {
        if let Some(b) = self.bodies.get_mut(&body) {
            if b.body_type != BodyType::Fixed {
                b.velocity = velocity;
            }
        }
    }

    fn translation(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.translation)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn character(world: &mut FlatWorld, at: Vec3) -> RigidBodyHandle {
        let body = world.create_rigid_body(&RigidBodyDesc::dynamic(at));
        world.create_collider(&ColliderDesc::capsule(0.5, 0.3), Some(body));
        body
    }

    #[test]
    fn dynamic_body_falls_and_rests_on_floor() {
        let mut world = FlatWorld::new();
        let body = character(&mut world, Vec3::new(0.0, 3.0, 0.0));

        for _ in 0..240 {
            world.step();
        }

        let y = world.translation(body).map(|t| t.y).unwrap_or_default();
        assert!((y - 0.8).abs() < 1e-6);
        assert_eq!(world.linear_velocity(body).map(|v| v.y), Some(0.0));
    }

    #[test]
    fn horizontal_velocity_moves_body() {
        let mut world = FlatWorld::new().with_gravity(Vec3::ZERO);
        let body = character(&mut world, Vec3::new(0.0, 0.8, 0.0));
        world.set_linear_velocity(body, Vec3::new(6.0, 0.0, 0.0));

        for _ in 0..60 {
            world.step();
        }

        let x = world.translation(body).map(|t| t.x).unwrap_or_default();
        assert!((x - 6.0).abs() < 1e-3);
    }

    #[test]
    fn fixed_body_ignores_commands() {
        let mut world = FlatWorld::new();
        let body = world.create_rigid_body(&RigidBodyDesc::fixed(Vec3::ONE));
        world.set_linear_velocity(body, Vec3::X);
        world.step();
        assert_eq!(world.translation(body), Some(Vec3::ONE));
    }

    #[test]
    fn removal_drops_body_and_colliders() {
        let mut world = FlatWorld::new();
        let body = character(&mut world, Vec3::ZERO);
        assert_eq!(world.collider_count(), 1);

        assert!(world.remove_rigid_body(body));
        assert!(!world.remove_rigid_body(body));
        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.translation(body), None);
    }

    #[test]
    fn step_counter_tracks_calls() {
        let mut world = FlatWorld::new();
        world.step();
        world.step();
        assert_eq!(world.steps(), 2);
    }
}
