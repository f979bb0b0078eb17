//=========================================================================
// NPC
//=========================================================================
//
// Static, idle-animated character that opens a dialogue when used.
//
// Lifecycle:
//   spawn   → scene node + fixed body/collider + idle clip looping
//   update  → animator only (never moves)
//   interact (player in range, no dialogue running)
//           → pending_view = view, Playing → Dialogue, start session
//   destroy → body and node released
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use glam::Vec3;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::context::GameContext;
use super::dialogue::{DialogueEntry, DialogueSpeaker};
use super::interactive::Interactive;
use crate::config::NpcConfig;
use crate::core::animation::Animator;
use crate::core::assets::ClipInfo;
use crate::core::physics::{ColliderDesc, RigidBodyDesc, RigidBodyHandle};
use crate::core::scene_graph::{NodeHandle, SceneNode, Transform};
use crate::core::state::{GameState, ViewKind};

//=== Constants ===========================================================

const CAPSULE_HALF_HEIGHT: f32 = 0.5;
const CAPSULE_RADIUS: f32 = 0.3;

//=== Npc =================================================================

pub struct Npc {
    name: String,
    transform: Transform,
    node: Option<NodeHandle>,
    body: Option<RigidBodyHandle>,
    animator: Animator,
    view: ViewKind,
    interactive_distance: f32,
    entries: Arc<[DialogueEntry]>,
}

impl Npc {
    //--- Construction -----------------------------------------------------

    /// Places the NPC and starts its idle loop.
    pub fn spawn(config: &NpcConfig, clips: &[ClipInfo], ctx: &mut GameContext) -> Self {
        let transform = Transform::from_translation(config.position());

        let node = ctx.scene.add(SceneNode::model(&config.name, &config.model, transform));

        let body = ctx.physics.create_rigid_body(&RigidBodyDesc::fixed(transform.translation));
        ctx.physics
            .create_collider(&ColliderDesc::capsule(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS), Some(body));

        let mut animator = Animator::new(clips);
        if animator.load(&config.idle_clip, config.idle_duration, false) {
            animator.play(&config.idle_clip);
        }

        info!(target: "world", "Spawned NPC '{}' at {}", config.name, transform.translation);

        Self {
            name: config.name.clone(),
            transform,
            node: Some(node),
            body: Some(body),
            animator,
            view: config.view,
            interactive_distance: config.interactive_distance,
            entries: config.dialogue.iter().cloned().collect(),
        }
    }

    //--- Frame ------------------------------------------------------------

    pub fn update(&mut self, dt: f32) {
        self.animator.update(dt);
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn body(&self) -> Option<RigidBodyHandle> {
        self.body
    }

    pub fn entries(&self) -> &Arc<[DialogueEntry]> {
        &self.entries
    }

    fn speaker(&self) -> DialogueSpeaker {
        DialogueSpeaker {
            name: self.name.clone(),
            position: self.transform.translation,
            entries: Arc::clone(&self.entries),
        }
    }
}

//=== Interactive =========================================================

impl Interactive for Npc {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn can_interact(&self, from: Vec3) -> bool {
        from.distance(self.transform.translation) < self.interactive_distance
    }

    fn interact(&mut self, ctx: &mut GameContext) {
        if ctx.dialogue.is_active() {
            debug!(target: "world", "'{}' ignored: dialogue already running", self.name);
            return;
        }

        ctx.pending_view = self.view;
        if !ctx.states.set_state(GameState::Dialogue) {
            return;
        }
        ctx.dialogue.start_dialogue(self.speaker(), &mut ctx.audio);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
