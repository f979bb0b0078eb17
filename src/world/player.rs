//=========================================================================
// Player
//=========================================================================
//
// Input-driven avatar on a dynamic rigid body.
//
// Frame pipeline:
//
//   update (before physics.step)
//     1. interaction edge → nearest in-range interactable
//     2. in-range check   → HUD prompt
//     3. input axes       → horizontal velocity (vertical kept)
//     4. walk / idle clip → animator → footsteps on Walk Loop/Half
//     5. fade-in          → node opacity
//
//   after_physics_step
//     6. body translation → transform, facing eased toward input angle
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::{PI, TAU};

use crossbeam_channel::{unbounded, Receiver};
use glam::{Quat, Vec3};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::context::GameContext;
use super::fade::FadeIn;
use super::interactive::{nearest_in_range, SharedInteractive};
use crate::config::PlayerConfig;
use crate::core::animation::{Animator, ClipEvent};
use crate::core::assets::ClipInfo;
use crate::core::physics::{ColliderDesc, RigidBodyDesc, RigidBodyHandle};
use crate::core::scene_graph::{NodeHandle, SceneNode, Transform};
use crate::core::state::GameState;

//=== Player ==============================================================

pub struct Player {
    transform: Transform,
    node: Option<NodeHandle>,
    body: Option<RigidBodyHandle>,
    animator: Animator,

    //--- Tuning ----------------------------------------------------------
    idle_clip: String,
    walk_clip: String,
    speed: f32,
    turn_rate: f32,
    input_rotation: f32,

    //--- Interaction -----------------------------------------------------
    interactables: Vec<SharedInteractive>,
    in_range: bool,

    //--- Cosmetics -------------------------------------------------------
    footstep_key: String,
    footsteps: Receiver<ClipEvent>,
    fade: FadeIn,
}

impl Player {
    //--- Construction -----------------------------------------------------

    pub fn spawn(config: &PlayerConfig, clips: &[ClipInfo], ctx: &mut GameContext) -> Self {
        let transform = Transform::from_translation(config.start_position());

        let node = ctx.scene.add(SceneNode::model("player", &config.model, transform));
        ctx.scene.set_opacity(node, 0.0, true);

        let body = ctx.physics.create_rigid_body(&RigidBodyDesc::dynamic(transform.translation));
        ctx.physics.create_collider(
            &ColliderDesc::capsule(config.capsule_half_height, config.capsule_radius),
            Some(body),
        );

        let mut animator = Animator::new(clips);
        animator.load(&config.idle_clip, config.idle_duration, false);
        animator.load(&config.walk_clip, config.walk_duration, false);

        // Footfalls land twice per walk cycle.
        let (steps, footsteps) = unbounded();
        for event in [ClipEvent::Loop, ClipEvent::Half] {
            let steps = steps.clone();
            animator.on(&config.walk_clip, event, move |event| {
                let _ = steps.send(event);
            });
        }

        ctx.audio.load(&config.footstep_key, &config.footstep_sounds);

        info!(target: "world", "Spawned player at {}", transform.translation);

        Self {
            transform,
            node: Some(node),
            body: Some(body),
            animator,
            idle_clip: config.idle_clip.clone(),
            walk_clip: config.walk_clip.clone(),
            speed: config.speed,
            turn_rate: config.turn_rate,
            input_rotation: config.input_rotation_deg.to_radians(),
            interactables: Vec::new(),
            in_range: false,
            footstep_key: config.footstep_key.clone(),
            footsteps,
            fade: FadeIn::new(config.fade_delay, config.fade_duration),
        }
    }

    /// Makes `target` reachable through the interaction key.
    pub fn add_interactable(&mut self, target: SharedInteractive) {
        self.interactables.push(target);
    }

    //--- Frame ------------------------------------------------------------

    /// Everything that must happen before the physics step.
    pub fn update(&mut self, dt: f32, ctx: &mut GameContext) {
        let position = self.transform.translation;
        let playing = ctx.states.is(GameState::Playing);

        //--- 1. Interaction ----------------------------------------------
        if ctx.input.take_interaction() && playing {
            if let Some(index) = nearest_in_range(&self.interactables, position) {
                let target = self.interactables[index].clone();
                debug!(target: "world", "Interacting with target #{}", index);
                target.borrow_mut().interact(ctx);
            }
        }

        //--- 2. Prompt ---------------------------------------------------
        self.in_range = self
            .interactables
            .iter()
            .any(|target| target.borrow().can_interact(position));
        ctx.hud.set_prompt_visible(self.in_range);

        //--- 3. Velocity -------------------------------------------------
        let moving = playing && ctx.input.is_moving();
        if let Some(body) = self.body {
            let vertical = ctx.physics.linear_velocity(body).map_or(0.0, |v| v.y);
            let horizontal = if moving {
                self.world_direction(ctx.input.x(), ctx.input.z()) * self.speed
            } else {
                Vec3::ZERO
            };
            ctx.physics
                .set_linear_velocity(body, Vec3::new(horizontal.x, vertical, horizontal.z));
        }

        //--- 4. Animation ------------------------------------------------
        let clip = if moving { &self.walk_clip } else { &self.idle_clip };
        self.animator.play(clip);
        self.animator.update(dt);

        for _ in self.footsteps.try_iter() {
            ctx.audio.play(&self.footstep_key);
        }

        //--- 5. Fade-in --------------------------------------------------
        if let (Some(node), Some(opacity)) = (self.node, self.fade.advance(dt)) {
            ctx.scene.set_opacity(node, opacity, opacity < 1.0);
        }
    }

    /// Pulls the simulated position back and turns toward the input.
    pub fn after_physics_step(&mut self, dt: f32, ctx: &mut GameContext) {
        if let Some(translation) = self.body.and_then(|body| ctx.physics.translation(body)) {
            self.transform.translation = translation;
        }

        if ctx.states.is(GameState::Playing) && ctx.input.is_moving() {
            let target = ctx.input.angle() + self.input_rotation;
            let yaw = turn_toward(self.transform.yaw(), target, self.turn_rate * dt);
            self.transform.set_yaw(yaw);
        }

        if let Some(node) = self.node {
            ctx.scene.set_transform(node, &self.transform);
        }
    }

    /// Releases the physics body and scene node.
    pub fn destroy(&mut self, ctx: &mut GameContext) {
        if let Some(body) = self.body.take() {
            ctx.physics.remove_rigid_body(body);
        }
        if let Some(node) = self.node.take() {
            ctx.scene.remove(node);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn body(&self) -> Option<RigidBodyHandle> {
        self.body
    }

    pub fn node(&self) -> Option<NodeHandle> {
        self.node
    }

    pub fn is_near_interactable(&self) -> bool {
        self.in_range
    }

    pub fn interactable_count(&self) -> usize {
        self.interactables.len()
    }

    //--- Internal Helpers -------------------------------------------------

    /// Input-space (x, z) rotated into world space, unit length or less.
    fn world_direction(&self, x: f32, z: f32) -> Vec3 {
        let input = Vec3::new(x, 0.0, z);
        let input = if input.length_squared() > 1.0 { input.normalize() } else { input };
        Quat::from_rotation_y(self.input_rotation) * input
    }
}

//=== Facing ==============================================================

/// Steps `current` toward `target` by at most `max_step` radians along the
/// shorter arc.
pub fn turn_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = (target - current + PI).rem_euclid(TAU) - PI;
    if delta.abs() <= max_step {
        target
    } else {
        current + delta.signum() * max_step
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
