/// Node types for the scene graph.
///
/// A Node is one element of the scene tree. Nodes live in the Scene's
/// arena and reference each other by `NodeKey`: children are owned edges,
/// the parent is a non-owning back-reference.

use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use bitflags::bitflags;
use super::desc::LightDesc;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Node within a Scene.
    ///
    /// Keys stay valid when other nodes are removed and become invalid
    /// only when the scene is cleared.
    pub struct NodeKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-node behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        /// Node can be picked up by a tracked hand
        const GRABBABLE = 1 << 0;
    }
}

// ===== LIGHTS =====

/// A light attached to a node.
///
/// `number` is the light slot assigned at scene instantiation (0, 1, 2...
/// in traversal order).
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub number: u32,
    pub desc: LightDesc,
}

// ===== NODE =====

/// What a node is, decided when it is created.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform node with no render output
    Group,
    /// Renderable geometry (drawn through the render context)
    Mesh,
    /// Light source, rendered before every mesh
    Light(Light),
}

/// A scene graph element.
///
/// Transform, scale, flags and bounding radius can be edited through
/// `Scene::node_mut`. Parent/children links are owned by the Scene and
/// only change through `Scene::add_child` / `Scene::remove_child`.
#[derive(Debug, Clone)]
pub struct Node {
    id: u32,
    name: String,
    transform: Mat4,
    scale: f32,
    flags: NodeFlags,
    bounding_radius: f32,
    kind: NodeKind,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl Node {
    pub(crate) fn new(id: u32, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            transform: Mat4::IDENTITY,
            scale: 1.0,
            flags: NodeFlags::empty(),
            bounding_radius: 0.0,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    // ===== ACCESSORS =====

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local transform (relative to the parent)
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn is_grabbable(&self) -> bool {
        self.flags.contains(NodeFlags::GRABBABLE)
    }

    /// Bounding-sphere radius used for frustum culling (not scaled)
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_light(&self) -> bool {
        matches!(self.kind, NodeKind::Light(_))
    }

    pub fn light(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Child at `index`, `None` when out of range
    pub fn child_at(&self, index: usize) -> Option<NodeKey> {
        self.children.get(index).copied()
    }

    // ===== SETTERS =====

    /// Replace the local transform. Children are not touched; they
    /// compose their world transform on demand.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn set_grabbable(&mut self, grabbable: bool) {
        self.flags.set(NodeFlags::GRABBABLE, grabbable);
    }

    pub fn set_bounding_radius(&mut self, radius: f32) {
        self.bounding_radius = radius;
    }

    /// Overwrite the translation column of the local transform.
    ///
    /// Only equals a world-space placement when every ancestor has an
    /// identity transform.
    pub fn set_world_position(&mut self, position: Vec3) {
        self.transform.w_axis = position.extend(1.0);
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
