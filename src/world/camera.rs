//=========================================================================
// Camera Controller
//=========================================================================
//
// Follow camera with tweened pans into and out of the overlay views.
//
// States:
//   Following  lerp toward player + follow_offset, look at the player
//   PanIn      Enter(CameraTransitionEnter): original pose → pose + pan
//              offset; done → PortfolioView / EducationView (pending view)
//   PanOut     Enter(CameraTransitionExit): current pose → original;
//              done → Playing
//
// Following is suspended for the whole pan and while an overlay is open.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::debug;

//=== Internal Dependencies ===============================================

use super::context::GameContext;
use super::tween::{lerp_vec3, Easing, Tween};
use crate::config::CameraConfig;
use crate::core::scene_graph::CameraView;
use crate::core::state::{GameState, GameStateManager, Phase, StateInbox};

//=== Pan =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanKind {
    In,
    Out,
}

#[derive(Debug, Clone)]
struct Pan {
    kind: PanKind,
    tween: Tween,
    from: CameraView,
    to: CameraView,
}

//=== CameraController ====================================================

pub struct CameraController {
    view: CameraView,
    config: CameraConfig,
    easing: Easing,
    inbox: StateInbox,
    pan: Option<Pan>,
    original: Option<CameraView>,
}

impl CameraController {
    pub fn new(config: &CameraConfig, states: &mut GameStateManager, focus: Vec3) -> Self {
        Self {
            view: CameraView {
                position: focus + config.follow_offset(),
                target: focus,
            },
            config: config.clone(),
            easing: Easing::BackOut { overshoot: config.back_overshoot },
            inbox: states.subscribe(
                Phase::Enter,
                &[GameState::CameraTransitionEnter, GameState::CameraTransitionExit],
            ),
            pan: None,
            original: None,
        }
    }

    //--- Frame ------------------------------------------------------------

    pub fn update(&mut self, dt: f32, focus: Vec3, ctx: &mut GameContext) {
        let entered: Vec<GameState> = self.inbox.drain().map(|event| event.new_state).collect();
        for state in entered {
            match state {
                GameState::CameraTransitionEnter => self.begin_pan_in(),
                GameState::CameraTransitionExit => self.begin_pan_out(),
                _ => {}
            }
        }

        if let Some(pan) = self.pan.as_mut() {
            let t = pan.tween.advance(dt);
            self.view = CameraView {
                position: lerp_vec3(pan.from.position, pan.to.position, t),
                target: lerp_vec3(pan.from.target, pan.to.target, t),
            };

            if pan.tween.is_finished() {
                let kind = pan.kind;
                self.pan = None;
                self.finish_pan(kind, ctx);
            }
        } else if Self::follows_in(ctx.states.current()) {
            let goal = focus + self.config.follow_offset();
            let blend = (self.config.follow_speed * dt).clamp(0.0, 1.0);
            self.view.position = lerp_vec3(self.view.position, goal, blend);
            self.view.target = focus;
        }

        ctx.scene.set_camera(&self.view);
    }

    //--- Queries ----------------------------------------------------------

    pub fn view(&self) -> &CameraView {
        &self.view
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Pose captured when the last pan in began.
    pub fn original(&self) -> Option<&CameraView> {
        self.original.as_ref()
    }

    //--- Internal Helpers -------------------------------------------------

    fn follows_in(state: GameState) -> bool {
        !matches!(
            state,
            GameState::CameraTransitionEnter
                | GameState::CameraTransitionExit
                | GameState::PortfolioView
                | GameState::EducationView
        )
    }

    fn begin_pan_in(&mut self) {
        let from = self.view;
        let offset = self.config.pan_offset();
        let to = CameraView {
            position: from.position + offset,
            target: from.target + offset,
        };

        debug!(target: "camera", "Panning to overlay");
        self.original = Some(from);
        self.start(PanKind::In, from, to);
    }

    fn begin_pan_out(&mut self) {
        let Some(to) = self.original else {
            self.start(PanKind::Out, self.view, self.view);
            return;
        };

        debug!(target: "camera", "Panning back to player");
        self.start(PanKind::Out, self.view, to);
    }

    fn start(&mut self, kind: PanKind, from: CameraView, to: CameraView) {
        self.pan = Some(Pan {
            kind,
            tween: Tween::new(self.config.pan_duration(), self.easing),
            from,
            to,
        });
    }

    fn finish_pan(&mut self, kind: PanKind, ctx: &mut GameContext) {
        let target = match kind {
            PanKind::In => ctx.pending_view.state(),
            PanKind::Out => GameState::Playing,
        };
        debug!(target: "camera", "Pan finished, requesting {}", target);
        ctx.states.set_state(target);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
