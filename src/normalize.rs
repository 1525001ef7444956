//! Model normalization: uniform rescale, recenter, floor-rest
//!
//! Loaded models arrive at arbitrary sizes and offsets. Normalization puts
//! every car into the same frame before classification and hinge math run:
//! longest side scaled to the target length, centered on X/Z, lowest point
//! resting on the Y=0 ground plane.

use crate::error::{Error, Result};
use crate::scene::{NodeId, SceneGraph};
use glam::Vec3;

/// Result of a normalization pass, for diagnostics
#[derive(Debug, Clone, Copy)]
pub struct Normalization {
    /// Uniform scale applied to the root
    pub scale: f32,
    /// Bounding-box center before scaling
    pub center: Vec3,
}

/// Rescale and recenter `root` in place so its longest side measures
/// `target_length` and its lowest point sits at world Y=0.
///
/// The bounding box is measured in the root's own frame, so repeated calls
/// settle on the same transform instead of compounding. Fails with
/// [`Error::DegenerateBounds`] when the subtree has no extent on any axis;
/// callers recover by keeping the default scale of 1.0.
pub fn normalize(scene: &mut SceneGraph, root: NodeId, target_length: f32) -> Result<Normalization> {
    let bounds = scene.content_aabb(root).ok_or(Error::DegenerateBounds)?;
    if bounds.is_degenerate() {
        return Err(Error::DegenerateBounds);
    }

    let size = bounds.size();
    let scale = target_length / bounds.max_dimension();
    let center = bounds.center();

    let node = scene.node_mut(root);
    node.scale = Vec3::splat(scale);
    node.position = -center * scale;
    // Rest the model on the ground plane
    node.position.y += (size.y * scale) / 2.0;

    Ok(Normalization { scale, center })
}
