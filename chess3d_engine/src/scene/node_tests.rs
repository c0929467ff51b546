use glam::{Mat4, Vec3};
use super::*;
use crate::scene::desc::{LightDesc, LightType};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_node_defaults() {
    let node = Node::new(4, "board", NodeKind::Group);

    assert_eq!(node.id(), 4);
    assert_eq!(node.name(), "board");
    assert_eq!(*node.transform(), Mat4::IDENTITY);
    assert_eq!(node.scale(), 1.0);
    assert_eq!(node.bounding_radius(), 0.0);
    assert!(!node.is_grabbable());
    assert!(node.parent().is_none());
    assert_eq!(node.child_count(), 0);
    assert!(node.child_at(0).is_none());
}

#[test]
fn test_light_kind_is_detected() {
    let light = Light { number: 2, desc: LightDesc::default() };
    let node = Node::new(1, "sun", NodeKind::Light(light));

    assert!(node.is_light());
    assert_eq!(node.light().map(|l| l.number), Some(2));

    let mesh = Node::new(2, "pawn", NodeKind::Mesh);
    assert!(!mesh.is_light());
    assert!(mesh.light().is_none());
}

#[test]
fn test_light_desc_defaults() {
    let desc = LightDesc::default();
    assert_eq!(desc.light_type, LightType::Omni);
    assert_eq!(desc.constant_attenuation, 1.0);
    assert_eq!(desc.linear_attenuation, 0.0);
    assert_eq!(desc.quadratic_attenuation, 0.0);
    assert_eq!(desc.intensity, 7.0);
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_grabbable_flag_toggles() {
    let mut node = Node::new(1, "knight", NodeKind::Mesh);
    node.set_grabbable(true);
    assert!(node.is_grabbable());
    assert!(node.flags().contains(NodeFlags::GRABBABLE));

    node.set_grabbable(false);
    assert!(!node.is_grabbable());
    assert_eq!(node.flags(), NodeFlags::empty());
}

#[test]
fn test_set_world_position_overwrites_translation_only() {
    let mut node = Node::new(1, "rook", NodeKind::Mesh);
    let rotation = Mat4::from_rotation_y(0.5);
    node.set_transform(rotation * Mat4::from_translation(Vec3::new(9.0, 9.0, 9.0)));

    node.set_world_position(Vec3::new(1.0, 2.0, 3.0));

    assert_eq!(node.transform().w_axis, glam::Vec4::new(1.0, 2.0, 3.0, 1.0));
    assert_eq!(node.transform().x_axis, rotation.x_axis);
    assert_eq!(node.transform().z_axis, rotation.z_axis);
}

#[test]
fn test_scale_and_radius_setters() {
    let mut node = Node::new(1, "queen", NodeKind::Mesh);
    node.set_scale(2.5);
    node.set_bounding_radius(0.04);

    assert_eq!(node.scale(), 2.5);
    assert_eq!(node.bounding_radius(), 0.04);
}
