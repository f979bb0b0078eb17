//=========================================================================
// Scene Graph Seam
//=========================================================================
//
// Write-only view of the host renderer.
//
// Entities own a `Transform` and a `NodeHandle`; they push state into the
// scene graph each frame and never read it back. Rendering itself is the
// host's business.
//
// `HeadlessScene` keeps the last value written per node so runs without
// a renderer (and tests) can inspect what would be drawn.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::{Quat, Vec3};
use log::trace;

//=== Transform ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, rotation: Quat::IDENTITY }
    }

    /// Rotation about the vertical axis, in radians.
    pub fn yaw(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(glam::EulerRot::YXZ);
        yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.rotation = Quat::from_rotation_y(yaw);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

//=== Nodes ===============================================================

/// Opaque node reference issued by a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u64);

impl NodeHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Loaded model, drawn with its own materials.
    Model { path: String },
    /// Point light.
    Light { intensity: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
}

impl SceneNode {
    pub fn model(name: impl Into<String>, path: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Model { path: path.into() },
            transform,
        }
    }

    pub fn light(name: impl Into<String>, intensity: f32, transform: Transform) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Light { intensity },
            transform,
        }
    }
}

//=== CameraView ==========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub target: Vec3,
}

//=== SceneGraph ==========================================================

/// Host renderer as seen by the core.
///
/// Writes to unknown handles are ignored.
pub trait SceneGraph {
    fn add(&mut self, node: SceneNode) -> NodeHandle;
    fn remove(&mut self, node: NodeHandle) -> bool;
    fn set_transform(&mut self, node: NodeHandle, transform: &Transform);
    /// `transparent = false` lets the renderer drop blending once opaque.
    fn set_opacity(&mut self, node: NodeHandle, opacity: f32, transparent: bool);
    fn set_visible(&mut self, node: NodeHandle, visible: bool);
    fn set_camera(&mut self, view: &CameraView);
}

//=== HeadlessScene =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub node: SceneNode,
    pub visible: bool,
    pub opacity: f32,
    pub transparent: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessScene {
    nodes: HashMap<NodeHandle, NodeRecord>,
    camera: Option<CameraView>,
    next_id: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&NodeRecord> {
        self.nodes.get(&handle)
    }

    /// First node added under `name`.
    pub fn find(&self, name: &str) -> Option<&NodeRecord> {
        self.nodes
            .iter()
            .filter(|(_, record)| record.node.name == name)
            .min_by_key(|(handle, _)| handle.raw())
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn camera(&self) -> Option<&CameraView> {
        self.camera.as_ref()
    }
}

impl SceneGraph for HeadlessScene {
    fn add(&mut self, node: SceneNode) -> NodeHandle {
        self.next_id += 1;
        let handle = NodeHandle::from_raw(self.next_id);
        trace!(target: "scene", "Added node '{}' as {:?}", node.name, handle);
        self.nodes.insert(
            handle,
            NodeRecord { node, visible: true, opacity: 1.0, transparent: false },
        );
        handle
    }

    fn remove(&mut self, node: NodeHandle) -> bool {
        self.nodes.remove(&node).is_some()
    }

    fn set_transform(&mut self, node: NodeHandle, transform: &Transform) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.node.transform = *transform;
        }
    }

    fn set_opacity(&mut self, node: NodeHandle, opacity: f32, transparent: bool) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.opacity = opacity.clamp(0.0, 1.0);
            record.transparent = transparent;
        }
    }

    fn set_visible(&mut self, node: NodeHandle, visible: bool) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.visible = visible;
        }
    }

    fn set_camera(&mut self, view: &CameraView) {
        self.camera = Some(*view);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
