//! Scene graph module
//!
//! Provides the node arena, scene descriptions, the light-first render
//! list and hand grabbing of pickable nodes.

mod node;
mod desc;
mod scene;
mod render_list;
mod grab;

pub use node::{Node, NodeKey, NodeKind, NodeFlags, Light};
pub use desc::{NodeDesc, NodeDescKind, LightDesc, LightType, SceneLoader};
pub use scene::Scene;
pub use render_list::{RenderList, RenderContext, FrameStats};
pub use grab::{GrabController, GrabDesc, DevicePose, HandPose, PoseProvider, DropZone};
