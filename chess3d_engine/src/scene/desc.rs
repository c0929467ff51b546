/// Scene descriptions produced by a scene loader.
///
/// A loader turns some external format into a `NodeDesc` tree; the Scene
/// instantiates it into arena nodes, assigning ids and light numbers.

use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::engine_bail;

/// Light emission model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightType {
    /// Point light radiating in every direction
    Omni,
    /// Infinitely distant light, only the orientation matters
    Directional,
    /// Cone light with a cutoff angle (degrees) along `direction`
    Spot { cutoff: f32, direction: Vec3 },
}

/// Light parameters, shared by the scene description and the live node.
#[derive(Debug, Clone, PartialEq)]
pub struct LightDesc {
    pub light_type: LightType,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
    pub intensity: f32,
}

impl Default for LightDesc {
    fn default() -> Self {
        Self {
            light_type: LightType::Omni,
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            constant_attenuation: 1.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
            intensity: 7.0,
        }
    }
}

/// Kind of node to create.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeDescKind {
    Group,
    Mesh,
    Light(LightDesc),
}

/// Description of a node and its subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDesc {
    pub name: String,
    pub kind: NodeDescKind,
    /// Local transform (relative to the parent)
    pub transform: Mat4,
    pub scale: f32,
    pub bounding_radius: f32,
    pub grabbable: bool,
    pub children: Vec<NodeDesc>,
}

impl NodeDesc {
    /// Group node with an identity transform and no children.
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeDescKind::Group)
    }

    /// Mesh node with an identity transform and no children.
    pub fn mesh(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeDescKind::Mesh)
    }

    /// Light node with an identity transform and no children.
    pub fn light(name: impl Into<String>, desc: LightDesc) -> Self {
        Self::with_kind(name, NodeDescKind::Light(desc))
    }

    fn with_kind(name: impl Into<String>, kind: NodeDescKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Mat4::IDENTITY,
            scale: 1.0,
            bounding_radius: 0.0,
            grabbable: false,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform = Mat4::from_translation(translation);
        self
    }

    pub fn with_bounding_radius(mut self, radius: f32) -> Self {
        self.bounding_radius = radius;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn grabbable(mut self) -> Self {
        self.grabbable = true;
        self
    }

    pub fn with_child(mut self, child: NodeDesc) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeDesc>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeDesc::node_count).sum::<usize>()
    }

    /// Check the whole subtree before instantiation.
    ///
    /// # Errors
    ///
    /// `Error::InvalidScene` naming the first offending node: empty name,
    /// non-finite transform, scale not finite and positive, or bounding
    /// radius not finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            engine_bail!(InvalidScene, "chess3d::Scene", "node with an empty name");
        }
        if !self.transform.is_finite() {
            engine_bail!(InvalidScene, "chess3d::Scene", "node '{}' has a non-finite transform", self.name);
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            engine_bail!(InvalidScene, "chess3d::Scene", "node '{}' has scale {}", self.name, self.scale);
        }
        if !self.bounding_radius.is_finite() || self.bounding_radius < 0.0 {
            engine_bail!(
                InvalidScene, "chess3d::Scene",
                "node '{}' has bounding radius {}", self.name, self.bounding_radius
            );
        }
        self.children.iter().try_for_each(NodeDesc::validate)
    }
}

/// Source of scene descriptions (file parser, procedural builder...).
///
/// Loader errors are reported as `Error::LoadFailed` by the engine; a
/// description that loads but fails [`NodeDesc::validate`] is
/// `Error::InvalidScene`.
pub trait SceneLoader {
    fn load(&mut self) -> Result<NodeDesc>;
}

#[cfg(test)]
#[path = "desc_tests.rs"]
mod tests;
