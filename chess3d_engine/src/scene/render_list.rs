/// Render list - light-first partition of a scene for per-frame drawing.
///
/// `add_entry` flattens a subtree into three views: lights (in traversal
/// order), generic renderables, and pickables (grabbable renderables, an
/// overlay on the renderables). `render` processes every light in order
/// and, for each one, frustum-tests and draws every renderable.

use glam::Mat4;
use crate::camera::Frustum;
use super::node::{Node, NodeKey};
use super::scene::Scene;

/// Drawing backend invoked by `RenderList::render`.
///
/// Shader binding and draw calls live behind this trait. Hooks are
/// fire-and-forget: a `false` return is counted and logged, never
/// propagated.
pub trait RenderContext {
    /// Draw (or, for lights, upload) `node` with its model-view matrix.
    fn render_node(&mut self, node: &Node, model_view: Mat4) -> bool;

    /// Toggle additive blending (one/one) so light passes accumulate.
    fn set_additive_blending(&mut self, enabled: bool);
}

/// Counters for one `render` call.
///
/// `drawn`, `culled` and `failed` are summed over every light pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lights: usize,
    pub drawn: usize,
    pub culled: usize,
    pub failed: usize,
}

/// Lights, renderables and pickables of a loaded scene.
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    lights: Vec<NodeKey>,
    objects: Vec<NodeKey>,
    pickables: Vec<NodeKey>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every node below `root` (the root itself is skipped).
    ///
    /// Lights go to the light list, everything else to the renderables;
    /// grabbable non-light nodes are also listed as pickable.
    pub fn add_entry(&mut self, scene: &Scene, root: NodeKey) {
        for &child in scene.children(root) {
            let Some(node) = scene.node(child) else {
                continue;
            };

            if node.is_light() {
                self.lights.push(child);
            } else {
                if node.is_grabbable() {
                    self.pickables.push(child);
                }
                self.objects.push(child);
            }

            if node.child_count() > 0 {
                self.add_entry(scene, child);
            }
        }
    }

    /// Remove the last renderable. Pickables are left as they are.
    pub fn pop_entry(&mut self) -> Option<NodeKey> {
        self.objects.pop()
    }

    /// Renderable at `index` in insertion order
    pub fn object(&self, index: usize) -> Option<NodeKey> {
        self.objects.get(index).copied()
    }

    /// First renderable whose node id is `id`
    pub fn object_by_id(&self, scene: &Scene, id: u32) -> Option<NodeKey> {
        self.objects
            .iter()
            .copied()
            .find(|&key| scene.node(key).is_some_and(|n| n.id() == id))
    }

    /// Number of renderables
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn lights(&self) -> &[NodeKey] {
        &self.lights
    }

    pub fn objects(&self) -> &[NodeKey] {
        &self.objects
    }

    pub fn pickables(&self) -> &[NodeKey] {
        &self.pickables
    }

    pub fn clear(&mut self) {
        self.lights.clear();
        self.objects.clear();
        self.pickables.clear();
    }

    /// Render one frame.
    ///
    /// For each light in order: from the second light on, additive
    /// blending is enabled; the light hook runs with
    /// `view_inverse * light_world`; the frustum is rebuilt from
    /// `projection * view_inverse`; every renderable whose world bounding
    /// sphere passes the frustum test is drawn with
    /// `view_inverse * node_world`. Blending is disabled again after the
    /// last light when there was more than one. Without lights nothing is
    /// drawn.
    pub fn render(
        &self,
        scene: &Scene,
        view_inverse: Mat4,
        projection: Mat4,
        ctx: &mut dyn RenderContext,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        for (index, &light_key) in self.lights.iter().enumerate() {
            if index == 1 {
                ctx.set_additive_blending(true);
            }

            if let (Some(light), Some(world)) = (scene.node(light_key), scene.final_matrix(light_key)) {
                if !ctx.render_node(light, view_inverse * world) {
                    stats.failed += 1;
                    crate::engine_warn!("chess3d::RenderList", "render hook failed for light '{}'", light.name());
                }
            }
            stats.lights += 1;

            let frustum = Frustum::from_view_projection(&(projection * view_inverse));

            for &key in &self.objects {
                let (Some(node), Some(world)) = (scene.node(key), scene.final_matrix(key)) else {
                    continue;
                };

                let center = world.w_axis.truncate();
                if !frustum.intersects_sphere(center, node.bounding_radius()) {
                    stats.culled += 1;
                    continue;
                }

                if ctx.render_node(node, view_inverse * world) {
                    stats.drawn += 1;
                } else {
                    stats.failed += 1;
                    crate::engine_warn!("chess3d::RenderList", "render hook failed for '{}'", node.name());
                }
            }
        }

        if self.lights.len() > 1 {
            ctx.set_additive_blending(false);
        }

        stats
    }
}

#[cfg(test)]
#[path = "render_list_tests.rs"]
mod tests;
