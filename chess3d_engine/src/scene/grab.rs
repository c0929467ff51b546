/// Device poses and hand grabbing.
///
/// A `PoseProvider` (headset, hand tracker, scripted input) is polled once
/// per frame. The `GrabController` turns hand poses into transform
/// overwrites on pickable nodes: a grabbing hand inside a node's reach
/// picks it up, the node follows the hand, and letting go drops it back
/// to the height it was lifted from.

use glam::{Mat4, Vec3};
use super::node::NodeKey;
use super::scene::Scene;

/// One tracked hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    /// Pinch point in world space
    pub position: Vec3,
    /// Grab gesture currently held
    pub grabbing: bool,
}

/// Everything a device reports for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DevicePose {
    /// Head (or eye) transform in world space, when tracked
    pub head: Option<Mat4>,
    pub hands: Vec<HandPose>,
}

/// Source of device poses. `None` means no fresh sample this frame.
pub trait PoseProvider {
    fn poll(&mut self) -> Option<DevicePose>;
}

/// Grab tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabDesc {
    /// A hand reaches a node when closer than `radius * reach_scale`
    /// to its world center
    pub reach_scale: f32,
}

impl Default for GrabDesc {
    fn default() -> Self {
        Self { reach_scale: 10.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    node: NodeKey,
    offset: Vec3,
    origin: Vec3,
}

/// Drop-zone test; positions outside send the node back where it was grabbed.
pub type DropZone = Box<dyn Fn(Vec3) -> bool + Send + Sync>;

/// Tracks which node each hand holds.
pub struct GrabController {
    desc: GrabDesc,
    held: Vec<Option<Grab>>,
    drop_zone: Option<DropZone>,
}

impl GrabController {
    pub fn new(desc: GrabDesc) -> Self {
        Self {
            desc,
            held: Vec::new(),
            drop_zone: None,
        }
    }

    /// Restrict where a released node may stay.
    pub fn set_drop_zone(&mut self, zone: impl Fn(Vec3) -> bool + Send + Sync + 'static) {
        self.drop_zone = Some(Box::new(zone));
    }

    /// Node held by hand `hand`, if any
    pub fn held_by(&self, hand: usize) -> Option<NodeKey> {
        self.held.get(hand).copied().flatten().map(|g| g.node)
    }

    pub fn is_held(&self, key: NodeKey) -> bool {
        self.held.iter().flatten().any(|g| g.node == key)
    }

    /// Forget every grab without moving anything.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Apply one frame of hand input.
    ///
    /// Per hand: a released grab drops its node; a grabbing hand with
    /// nothing held takes the first free pickable within reach, recording
    /// the offset between hand and node center; a held node is moved to
    /// `hand - offset` (translation plus the node's current axis scale).
    /// Grabs of hands no longer reported are dropped as if released.
    pub fn update(&mut self, scene: &mut Scene, pickables: &[NodeKey], hands: &[HandPose]) {
        if self.held.len() > hands.len() {
            for grab in self.held.split_off(hands.len()).into_iter().flatten() {
                self.drop_node(scene, grab);
            }
        }
        self.held.resize(hands.len(), None);

        for (index, hand) in hands.iter().enumerate() {
            if !hand.grabbing {
                if let Some(grab) = self.held[index].take() {
                    self.drop_node(scene, grab);
                }
                continue;
            }

            if self.held[index].is_none() {
                let picked = self.pick(scene, pickables, hand.position);
                self.held[index] = picked;
                if let Some(grab) = picked {
                    crate::engine_debug!("chess3d::GrabController", "hand {} grabbed {:?}", index, grab.node);
                }
            }

            if let Some(grab) = self.held[index] {
                place(scene, grab.node, hand.position - grab.offset);
            }
        }
    }

    fn pick(&self, scene: &Scene, pickables: &[NodeKey], hand: Vec3) -> Option<Grab> {
        pickables
            .iter()
            .copied()
            .filter(|&key| !self.is_held(key))
            .find_map(|key| {
                let node = scene.node(key)?;
                let center = scene.world_position(key)?;
                let reach = node.bounding_radius() * self.desc.reach_scale;
                (hand.distance(center) <= reach).then_some(Grab {
                    node: key,
                    offset: hand - center,
                    origin: center,
                })
            })
    }

    fn drop_node(&self, scene: &mut Scene, grab: Grab) {
        let Some(current) = scene.world_position(grab.node) else {
            return;
        };
        let allowed = self.drop_zone.as_ref().map_or(true, |zone| zone(current));
        let position = if allowed {
            Vec3::new(current.x, grab.origin.y, current.z)
        } else {
            grab.origin
        };
        place(scene, grab.node, position);
        crate::engine_debug!("chess3d::GrabController", "released {:?} at {:?}", grab.node, position);
    }
}

impl Default for GrabController {
    fn default() -> Self {
        Self::new(GrabDesc::default())
    }
}

/// Rebuild a node transform as translation * axis scale, then write the
/// translation column.
fn place(scene: &mut Scene, key: NodeKey, position: Vec3) {
    let Some(node) = scene.node_mut(key) else {
        return;
    };
    let current = *node.transform();
    let scale = Vec3::new(
        current.x_axis.truncate().length(),
        current.y_axis.truncate().length(),
        current.z_axis.truncate().length(),
    );
    node.set_transform(Mat4::from_translation(position) * Mat4::from_scale(scale));
    node.set_world_position(position);
}

#[cfg(test)]
#[path = "grab_tests.rs"]
mod tests;
