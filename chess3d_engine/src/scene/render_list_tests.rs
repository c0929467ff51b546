/// Tests for RenderList
///
/// These tests validate scene partitioning, list accessors and the
/// light-first render order with frustum culling.

use super::*;
use crate::scene::desc::{LightDesc, NodeDesc};
use glam::{Mat4, Vec3};

// ============================================================================
// Helper Functions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Draw(String, Mat4),
    Blend(bool),
}

#[derive(Default)]
struct RecordingContext {
    events: Vec<Event>,
    fail_on: Option<String>,
}

impl RecordingContext {
    fn drawn_names(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Draw(name, _) => Some(name.clone()),
                Event::Blend(_) => None,
            })
            .collect()
    }
}

impl RenderContext for RecordingContext {
    fn render_node(&mut self, node: &Node, model_view: Mat4) -> bool {
        self.events.push(Event::Draw(node.name().to_string(), model_view));
        self.fail_on.as_deref() != Some(node.name())
    }

    fn set_additive_blending(&mut self, enabled: bool) {
        self.events.push(Event::Blend(enabled));
    }
}

/// Camera at +5 on Z looking at the origin.
fn camera() -> (Mat4, Mat4) {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let projection = Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0);
    (view, projection)
}

fn build(desc: &NodeDesc) -> (Scene, NodeKey, RenderList) {
    let mut scene = Scene::new();
    let root = scene.instantiate(desc);
    let mut list = RenderList::new();
    list.add_entry(&scene, root);
    (scene, root, list)
}

fn names(scene: &Scene, keys: &[NodeKey]) -> Vec<String> {
    keys.iter().map(|&k| scene.node(k).unwrap().name().to_string()).collect()
}

fn board_scene(light_count: usize) -> NodeDesc {
    let lights = (0..light_count).map(|i| NodeDesc::light(format!("light{}", i), LightDesc::default()));
    NodeDesc::group("[root]")
        .with_children(lights)
        .with_child(
            NodeDesc::mesh("board")
                .with_bounding_radius(1.0)
                .with_child(NodeDesc::mesh("pawn").with_bounding_radius(0.1).grabbable()),
        )
        .with_child(
            NodeDesc::mesh("behind")
                .with_translation(Vec3::new(0.0, 0.0, 50.0))
                .with_bounding_radius(1.0),
        )
}

// ============================================================================
// Partitioning
// ============================================================================

#[test]
fn test_add_entry_skips_root_and_partitions() {
    let (scene, root, list) = build(&board_scene(2));

    assert_eq!(names(&scene, list.lights()), vec!["light0", "light1"]);
    assert_eq!(names(&scene, list.objects()), vec!["board", "pawn", "behind"]);
    assert_eq!(names(&scene, list.pickables()), vec!["pawn"]);
    assert!(!list.objects().contains(&root));
    assert_eq!(list.len(), 3);
}

#[test]
fn test_every_non_root_node_is_listed_once() {
    let (scene, root, list) = build(&board_scene(3));

    for (key, _) in scene.iter().filter(|(k, _)| *k != root) {
        let in_lights = list.lights().contains(&key) as usize;
        let in_objects = list.objects().contains(&key) as usize;
        assert_eq!(in_lights + in_objects, 1);
    }
}

#[test]
fn test_grabbable_light_is_not_pickable() {
    let mut light = NodeDesc::light("lamp", LightDesc::default());
    light.grabbable = true;
    let (_, _, list) = build(&NodeDesc::group("[root]").with_child(light));

    assert_eq!(list.lights().len(), 1);
    assert!(list.pickables().is_empty());
}

#[test]
fn test_group_nodes_are_renderables() {
    let desc = NodeDesc::group("[root]")
        .with_child(NodeDesc::group("pieces").with_child(NodeDesc::mesh("rook")));
    let (scene, _, list) = build(&desc);
    assert_eq!(names(&scene, list.objects()), vec!["pieces", "rook"]);
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_object_accessors() {
    let (scene, _, mut list) = build(&board_scene(1));

    let pawn = scene.find_by_name("pawn").unwrap();
    let pawn_id = scene.node(pawn).unwrap().id();
    assert_eq!(list.object(1), Some(pawn));
    assert_eq!(list.object(3), None);
    assert_eq!(list.object_by_id(&scene, pawn_id), Some(pawn));
    assert_eq!(list.object_by_id(&scene, 999), None);

    let behind = scene.find_by_name("behind").unwrap();
    assert_eq!(list.pop_entry(), Some(behind));
    assert_eq!(list.len(), 2);
    // Pickables are an independent view
    assert_eq!(list.pickables().len(), 1);

    list.clear();
    assert!(list.is_empty());
    assert!(list.lights().is_empty());
    assert!(list.pickables().is_empty());
    assert_eq!(list.pop_entry(), None);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_without_lights_draws_nothing() {
    let (scene, _, list) = build(&board_scene(0));
    let (view, projection) = camera();
    let mut ctx = RecordingContext::default();

    let stats = list.render(&scene, view, projection, &mut ctx);

    assert!(ctx.events.is_empty());
    assert_eq!(stats, FrameStats::default());
}

#[test]
fn test_single_light_never_blends() {
    let (scene, _, list) = build(&board_scene(1));
    let (view, projection) = camera();
    let mut ctx = RecordingContext::default();

    let stats = list.render(&scene, view, projection, &mut ctx);

    assert!(!ctx.events.iter().any(|e| matches!(e, Event::Blend(_))));
    assert_eq!(ctx.drawn_names(), vec!["light0", "board", "pawn"]);
    assert_eq!(stats, FrameStats { lights: 1, drawn: 2, culled: 1, failed: 0 });
}

#[test]
fn test_multiple_lights_accumulate_with_blending() {
    let (scene, _, list) = build(&board_scene(3));
    let (view, projection) = camera();
    let mut ctx = RecordingContext::default();

    let stats = list.render(&scene, view, projection, &mut ctx);

    let order: Vec<String> = ctx
        .events
        .iter()
        .map(|e| match e {
            Event::Draw(name, _) => name.clone(),
            Event::Blend(on) => format!("blend:{}", on),
        })
        .collect();
    assert_eq!(
        order,
        vec![
            "light0", "board", "pawn",
            "blend:true", "light1", "board", "pawn",
            "light2", "board", "pawn",
            "blend:false",
        ]
    );
    assert_eq!(stats.lights, 3);
    assert_eq!(stats.drawn, 6);
    assert_eq!(stats.culled, 3);
}

#[test]
fn test_render_passes_model_view() {
    let desc = NodeDesc::group("[root]")
        .with_child(NodeDesc::light("sun", LightDesc::default()).with_translation(Vec3::Y))
        .with_child(
            NodeDesc::group("table")
                .with_translation(Vec3::new(0.5, 0.0, 0.0))
                .with_child(NodeDesc::mesh("cup").with_translation(Vec3::new(0.0, 0.0, -1.0))),
        );
    let (scene, _, list) = build(&desc);
    let (view, projection) = camera();
    let mut ctx = RecordingContext::default();

    list.render(&scene, view, projection, &mut ctx);

    let cup_world = Mat4::from_translation(Vec3::new(0.5, 0.0, -1.0));
    let sun_world = Mat4::from_translation(Vec3::Y);
    assert!(ctx.events.contains(&Event::Draw("sun".to_string(), view * sun_world)));
    let cup = ctx.events.iter().find_map(|e| match e {
        Event::Draw(name, m) if name == "cup" => Some(*m),
        _ => None,
    });
    assert!(cup.unwrap().abs_diff_eq(view * cup_world, 1e-6));
}

#[test]
fn test_failed_hook_is_counted_not_fatal() {
    let (scene, _, list) = build(&board_scene(1));
    let (view, projection) = camera();
    let mut ctx = RecordingContext { fail_on: Some("board".to_string()), ..Default::default() };

    let stats = list.render(&scene, view, projection, &mut ctx);

    assert_eq!(ctx.drawn_names(), vec!["light0", "board", "pawn"]);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.drawn, 1);
}
