//=========================================================================
// Physics Seam
//=========================================================================
//
// The core never integrates bodies itself. It talks to a physics world
// through opaque handles, once per frame:
//
//   Player::update            → set_linear_velocity(body, v)
//   Game::update              → step()            (exactly once per frame)
//   Player::after_physics_step → translation(body)
//
// `FlatWorld` is a small reference world (gravity + a flat floor) for
// headless runs and tests.
//
//=========================================================================

//=== Module Declarations =================================================

mod flat_world;

pub use flat_world::FlatWorld;

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Handles =============================================================

/// Opaque rigid-body reference issued by a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RigidBodyHandle(u64);

impl RigidBodyHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque collider reference issued by a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(u64);

impl ColliderHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

//=== Descriptors =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Moved by forces, gravity and velocity commands.
    Dynamic,
    /// Never moves.
    Fixed,
    /// Moved only by velocity commands.
    Kinematic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyDesc {
    pub body_type: BodyType,
    pub translation: Vec3,
    /// Keep the body upright (character bodies).
    pub lock_rotations: bool,
}

impl RigidBodyDesc {
    pub fn dynamic(translation: Vec3) -> Self {
        Self { body_type: BodyType::Dynamic, translation, lock_rotations: true }
    }

    pub fn fixed(translation: Vec3) -> Self {
        Self { body_type: BodyType::Fixed, translation, lock_rotations: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Capsule { half_height: f32, radius: f32 },
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
}

impl ColliderShape {
    /// Distance from the shape's center to its lowest point.
    pub fn half_height(&self) -> f32 {
        match *self {
            ColliderShape::Capsule { half_height, radius } => half_height + radius,
            ColliderShape::Cuboid { half_extents } => half_extents.y,
            ColliderShape::Ball { radius } => radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderDesc {
    pub shape: ColliderShape,
    /// Offset from the parent body, or world position when unattached.
    pub translation: Vec3,
}

impl ColliderDesc {
    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self {
            shape: ColliderShape::Capsule { half_height, radius },
            translation: Vec3::ZERO,
        }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self {
            shape: ColliderShape::Cuboid { half_extents },
            translation: Vec3::ZERO,
        }
    }
}

//=== PhysicsWorld ========================================================

/// Host physics engine as seen by the core.
///
/// Queries on a removed or unknown handle return `None` / do nothing.
pub trait PhysicsWorld {
    fn create_rigid_body(&mut self, desc: &RigidBodyDesc) -> RigidBodyHandle;
    fn create_collider(&mut self, desc: &ColliderDesc, parent: Option<RigidBodyHandle>) -> ColliderHandle;
    /// Removes the body and its attached colliders.
    fn remove_rigid_body(&mut self, body: RigidBodyHandle) -> bool;
    /// Advances the simulation by its own fixed timestep.
    fn step(&mut self);
    fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec3>;
    fn set_linear_velocity(&mut self, body: RigidBodyHandle, velocity: Vec3);
    fn translation(&self, body: RigidBodyHandle) -> Option<Vec3>;
}
