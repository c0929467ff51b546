/// Scene - arena of nodes forming the scene graph.
///
/// Uses a SlotMap for stable keys. Children are owned edges stored on the
/// parent, the parent link is a plain key back-reference. Node ids and
/// light numbers come from counters owned by the scene.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::error::Result;
use crate::engine_bail;
use crate::utils::IdAllocator;
use super::desc::{NodeDesc, NodeDescKind};
use super::node::{Light, Node, NodeKey, NodeKind};

/// Scene graph arena.
pub struct Scene {
    /// Nodes stored in a slot map
    nodes: SlotMap<NodeKey, Node>,
    /// First node created with a given name
    names: FxHashMap<String, NodeKey>,
    /// Node id -> key
    ids: FxHashMap<u32, NodeKey>,
    /// Node ids, starting at 1
    node_ids: IdAllocator,
    /// Light numbers, starting at 0
    light_numbers: IdAllocator,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            names: FxHashMap::default(),
            ids: FxHashMap::default(),
            node_ids: IdAllocator::starting_at(1),
            light_numbers: IdAllocator::new(),
        }
    }

    // ===== CREATION =====

    /// Create a detached node. Lights receive the next light number.
    pub fn create_node(&mut self, name: impl Into<String>, kind: NodeDescKind) -> NodeKey {
        let kind = match kind {
            NodeDescKind::Group => NodeKind::Group,
            NodeDescKind::Mesh => NodeKind::Mesh,
            NodeDescKind::Light(desc) => NodeKind::Light(Light {
                number: self.light_numbers.alloc(),
                desc,
            }),
        };
        let id = self.node_ids.alloc();
        let node = Node::new(id, name, kind);
        let name = node.name().to_string();

        let key = self.nodes.insert(node);
        self.names.entry(name).or_insert(key);
        self.ids.insert(id, key);
        key
    }

    /// Instantiate a description tree. Returns the key of its root.
    ///
    /// Ids and light numbers are assigned in depth-first pre-order.
    pub fn instantiate(&mut self, desc: &NodeDesc) -> NodeKey {
        let key = self.create_node(desc.name.clone(), desc.kind.clone());
        if let Some(node) = self.nodes.get_mut(key) {
            node.set_transform(desc.transform);
            node.set_scale(desc.scale);
            node.set_bounding_radius(desc.bounding_radius);
            node.set_grabbable(desc.grabbable);
        }

        for child_desc in &desc.children {
            let child = self.instantiate(child_desc);
            self.link(key, child);
        }
        key
    }

    // ===== HIERARCHY =====

    /// Attach `child` under `parent`, detaching it from its previous parent.
    ///
    /// # Errors
    ///
    /// `Error::InvalidNode` if a key is unknown, or if `child` is `parent`
    /// or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(InvalidNode, "chess3d::Scene", "parent {:?} not found", parent);
        }
        if !self.nodes.contains_key(child) {
            engine_bail!(InvalidNode, "chess3d::Scene", "child {:?} not found", child);
        }
        if parent == child || self.is_ancestor(child, parent) {
            engine_bail!(
                InvalidNode, "chess3d::Scene",
                "attaching {:?} under {:?} would create a cycle", child, parent
            );
        }

        if let Some(previous) = self.nodes[child].parent {
            self.detach(previous, child);
        }
        self.link(parent, child);
        Ok(())
    }

    /// Detach `child` from `parent`. Returns `false` if it was not a child.
    ///
    /// The detached node stays in the arena as a root.
    pub fn remove_child(&mut self, parent: NodeKey, child: NodeKey) -> bool {
        let removed = self.detach(parent, child);
        if !removed {
            crate::engine_trace!("chess3d::Scene", "{:?} is not a child of {:?}", child, parent);
        }
        removed
    }

    fn link(&mut self, parent: NodeKey, child: NodeKey) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    fn detach(&mut self, parent: NodeKey, child: NodeKey) -> bool {
        let Some(node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = node.children.iter().position(|&k| k == child) else {
            return false;
        };
        node.children.remove(index);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        true
    }

    /// Whether `ancestor` appears on the parent chain of `key`.
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = self.nodes.get(key).and_then(|n| n.parent);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.nodes.get(k).and_then(|n| n.parent);
        }
        false
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|n| n.parent)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(Node::children).unwrap_or(&[])
    }

    pub fn child_count(&self, key: NodeKey) -> usize {
        self.children(key).len()
    }

    pub fn child_at(&self, key: NodeKey, index: usize) -> Option<NodeKey> {
        self.children(key).get(index).copied()
    }

    // ===== TRANSFORMS =====

    /// World transform: ancestors' local transforms, farthest first, times
    /// the node's own. Recomputed on every call.
    pub fn final_matrix(&self, key: NodeKey) -> Option<Mat4> {
        let node = self.nodes.get(key)?;

        let mut ancestors = Vec::new();
        let mut current = node.parent;
        while let Some(k) = current {
            let ancestor = self.nodes.get(k)?;
            ancestors.push(ancestor.transform());
            current = ancestor.parent;
        }

        let mut matrix = Mat4::IDENTITY;
        for transform in ancestors.iter().rev() {
            matrix *= **transform;
        }
        Some(matrix * *node.transform())
    }

    /// Translation column of the world transform
    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        self.final_matrix(key).map(|m| m.w_axis.truncate())
    }

    /// Replace the local transform of a node. Returns `false` for unknown keys.
    pub fn set_transform(&mut self, key: NodeKey, transform: Mat4) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.set_transform(transform);
                true
            }
            None => false,
        }
    }

    /// See [`Node::set_world_position`]. Returns `false` for unknown keys.
    pub fn set_world_position(&mut self, key: NodeKey, position: Vec3) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.set_world_position(position);
                true
            }
            None => false,
        }
    }

    // ===== ACCESS =====

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// First node created with this name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.names.get(name).copied()
    }

    pub fn find_by_id(&self, id: u32) -> Option<NodeKey> {
        self.ids.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }

    /// Number of lights created since the last clear
    pub fn light_count(&self) -> u32 {
        self.light_numbers.issued()
    }

    /// Drop every node and restart id and light numbering.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.names.clear();
        self.ids.clear();
        self.node_ids.reset();
        self.light_numbers.reset();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
