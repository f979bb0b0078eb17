//=========================================================================
// Follow Light
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::scene_graph::{NodeHandle, SceneGraph, SceneNode, Transform};

//=== FollowLight =========================================================

/// Light node kept at a fixed offset from a target.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowLight {
    node: NodeHandle,
    offset: Vec3,
    transform: Transform,
}

impl FollowLight {
    pub const INTENSITY: f32 = 1.5;

    pub fn new(scene: &mut dyn SceneGraph, offset: Vec3, target: Vec3) -> Self {
        let transform = Transform::from_translation(target + offset);
        let node = scene.add(SceneNode::light("follow_light", Self::INTENSITY, transform));
        Self { node, offset, transform }
    }

    pub fn update(&mut self, target: Vec3, scene: &mut dyn SceneGraph) {
        self.transform.translation = target + self.offset;
        scene.set_transform(self.node, &self.transform);
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn node(&self) -> NodeHandle {
        self.node
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene_graph::HeadlessScene;

    #[test]
    fn light_tracks_target_with_offset() {
        let mut scene = HeadlessScene::new();
        let mut light = FollowLight::new(&mut scene, Vec3::new(1.0, 4.0, 4.0), Vec3::ZERO);

        light.update(Vec3::new(2.0, 0.0, 0.0), &mut scene);

        let record = scene.node(light.node()).map(|r| r.node.transform.translation);
        assert_eq!(record, Some(Vec3::new(3.0, 4.0, 4.0)));
    }
}
