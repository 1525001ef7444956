//! Hinge pivot synthesis on bounding-box faces
//!
//! Panel meshes rotate around their own origin by default, which is almost
//! never where the real hinge sits. Since models carry no hinge metadata, a
//! plausible pivot is inferred from the mesh's bounding box: the pivot sits
//! at the box center with one axis snapped to the face named by the edge.
//! A synthetic parent node is inserted at that point and the mesh reparented
//! under it, leaving its world placement untouched.

use crate::scene::{NodeId, SceneGraph};
use glam::Vec3;

/// Which bounding-box face carries the hinge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HingeEdge {
    Left,
    Right,
    Top,
    Bottom,
    Front,
    Rear,
}

impl HingeEdge {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(HingeEdge::Left),
            "right" => Some(HingeEdge::Right),
            "top" => Some(HingeEdge::Top),
            "bottom" => Some(HingeEdge::Bottom),
            "front" => Some(HingeEdge::Front),
            "rear" => Some(HingeEdge::Rear),
            _ => None,
        }
    }
}

/// Insert a pivot node above `mesh` on the requested bounding-box edge.
///
/// Returns None when no mesh was classified for the panel, or when the mesh
/// carries no vertices to derive a box from. The pivot becomes a sibling of
/// the mesh under its current parent, the mesh is reparented under the pivot,
/// and the mesh's local position is reduced by the pivot position so its
/// world placement is unchanged at the moment of synthesis.
pub fn synthesize_hinge(
    scene: &mut SceneGraph,
    mesh: Option<NodeId>,
    edge: HingeEdge,
) -> Option<NodeId> {
    let mesh = mesh?;
    let bounds = scene.world_aabb(mesh)?;

    let mut pivot_pos = bounds.center();
    match edge {
        HingeEdge::Left => pivot_pos.x = bounds.max.x,
        HingeEdge::Right => pivot_pos.x = bounds.min.x,
        HingeEdge::Top => pivot_pos.y = bounds.max.y,
        HingeEdge::Front => pivot_pos.z = bounds.min.z,
        HingeEdge::Rear => pivot_pos.z = bounds.max.z,
        // No face snap for bottom; the pivot stays at the box center
        HingeEdge::Bottom => {}
    }

    Some(create_pivot(scene, mesh, pivot_pos))
}

/// Insert an empty parent at `position` and hang `mesh` under it
fn create_pivot(scene: &mut SceneGraph, mesh: NodeId, position: Vec3) -> NodeId {
    let name = format!("{}_pivot", scene.node(mesh).name);
    let parent = scene.parent(mesh);
    let pivot = scene.add_node(&name, parent);
    scene.node_mut(pivot).position = position;
    scene.attach(mesh, pivot);
    scene.node_mut(mesh).position -= position;
    pivot
}
