//! Role-based mesh classification from name patterns
//!
//! Car models arrive with no semantic metadata; the only signal is naming.
//! A mesh belongs to a role when its node name or any of its material names
//! contains one of the role's patterns, case-insensitively. Roles are not
//! exclusive and missing matches are a normal outcome, not an error.

use crate::scene::{NodeId, SceneGraph, SceneNode};
use serde::Deserialize;

/// Name-substring patterns per semantic role. Supplied per car in the
/// catalog; every unspecified role falls back to the built-in patterns.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMapping {
    #[serde(default = "default_body_paint")]
    pub body_paint_meshes: Vec<String>,
    #[serde(default = "default_rims")]
    pub rim_meshes: Vec<String>,
    #[serde(default = "default_calipers")]
    pub caliper_meshes: Vec<String>,
    #[serde(default = "default_headlights")]
    pub headlights: Vec<String>,
    #[serde(default = "default_door_left")]
    pub door_left: Vec<String>,
    #[serde(default = "default_door_right")]
    pub door_right: Vec<String>,
    #[serde(default = "default_hood")]
    pub hood: Vec<String>,
    #[serde(default = "default_trunk")]
    pub trunk: Vec<String>,
}

fn default_body_paint() -> Vec<String> {
    vec!["body".into(), "paint".into(), "shell".into()]
}

fn default_rims() -> Vec<String> {
    vec!["rim".into(), "wheel_metal".into()]
}

fn default_calipers() -> Vec<String> {
    vec!["caliper".into(), "brake".into()]
}

fn default_headlights() -> Vec<String> {
    vec!["headlight_glass".into(), "headlight_emission".into()]
}

fn default_door_left() -> Vec<String> {
    vec!["door_L".into(), "doorL".into()]
}

fn default_door_right() -> Vec<String> {
    vec!["door_R".into(), "doorR".into()]
}

fn default_hood() -> Vec<String> {
    vec!["hood".into(), "bonnet".into()]
}

fn default_trunk() -> Vec<String> {
    vec!["trunk".into(), "boot".into()]
}

impl Default for RoleMapping {
    fn default() -> Self {
        RoleMapping {
            body_paint_meshes: default_body_paint(),
            rim_meshes: default_rims(),
            caliper_meshes: default_calipers(),
            headlights: default_headlights(),
            door_left: default_door_left(),
            door_right: default_door_right(),
            hood: default_hood(),
            trunk: default_trunk(),
        }
    }
}

/// Mesh nodes matched per role, in traversal order. Doors, hood, and trunk
/// are best-effort single-panel roles: callers take the first match and
/// ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedParts {
    pub body: Vec<NodeId>,
    pub rims: Vec<NodeId>,
    pub calipers: Vec<NodeId>,
    pub headlights: Vec<NodeId>,
    pub door_left: Vec<NodeId>,
    pub door_right: Vec<NodeId>,
    pub hood: Vec<NodeId>,
    pub trunk: Vec<NodeId>,
}

fn node_matches(node: &SceneNode, patterns: &[String]) -> bool {
    let name = node.name.to_lowercase();
    if patterns.iter().any(|p| name.contains(&p.to_lowercase())) {
        return true;
    }
    node.material_names.iter().any(|mat| {
        let mat = mat.to_lowercase();
        patterns.iter().any(|p| mat.contains(&p.to_lowercase()))
    })
}

/// Mesh nodes under `root` whose node name or material name contains any of
/// the given patterns, case-insensitively
pub fn find_meshes_by_name(scene: &SceneGraph, root: NodeId, patterns: &[String]) -> Vec<NodeId> {
    scene
        .mesh_nodes(root)
        .into_iter()
        .filter(|&id| node_matches(scene.node(id), patterns))
        .collect()
}

/// Classify every mesh under `root` against all roles in one traversal.
/// A mesh may land in several roles; conflict resolution is the caller's
/// concern (material assignment is last-applied-wins in processing order).
pub fn classify(scene: &SceneGraph, root: NodeId, mapping: &RoleMapping) -> ClassifiedParts {
    let mut parts = ClassifiedParts::default();
    for id in scene.mesh_nodes(root) {
        let node = scene.node(id);
        if node_matches(node, &mapping.body_paint_meshes) {
            parts.body.push(id);
        }
        if node_matches(node, &mapping.rim_meshes) {
            parts.rims.push(id);
        }
        if node_matches(node, &mapping.caliper_meshes) {
            parts.calipers.push(id);
        }
        if node_matches(node, &mapping.headlights) {
            parts.headlights.push(id);
        }
        if node_matches(node, &mapping.door_left) {
            parts.door_left.push(id);
        }
        if node_matches(node, &mapping.door_right) {
            parts.door_right.push(id);
        }
        if node_matches(node, &mapping.hood) {
            parts.hood.push(id);
        }
        if node_matches(node, &mapping.trunk) {
            parts.trunk.push(id);
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_car_model;

    fn scene_with_meshes(names: &[&str]) -> SceneGraph {
        let nodes: Vec<String> = names
            .iter()
            .map(|n| {
                format!(
                    r#"{{ "name": "{}", "mesh": {{ "positions": [{{"x": 0, "y": 0, "z": 0}}] }} }}"#,
                    n
                )
            })
            .collect();
        let json = format!(r#"{{ "nodes": [{}] }}"#, nodes.join(","));
        SceneGraph::from_model(&parse_car_model(&json).unwrap())
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let scene = scene_with_meshes(&["Door_L_Panel"]);
        let mapping = RoleMapping::default();

        let parts = classify(&scene, scene.root(), &mapping);
        assert_eq!(parts.door_left.len(), 1);
        assert_eq!(scene.node(parts.door_left[0]).name, "Door_L_Panel");
    }

    #[test]
    fn test_match_on_material_name() {
        let json = r#"
        {
            "nodes": [
                {
                    "name": "mesh_017",
                    "materials": ["CarPaint_Shell"],
                    "mesh": { "positions": [{"x": 0, "y": 0, "z": 0}] }
                }
            ]
        }
        "#;
        let scene = SceneGraph::from_model(&parse_car_model(json).unwrap());

        let parts = classify(&scene, scene.root(), &RoleMapping::default());
        assert_eq!(parts.body.len(), 1);
    }

    #[test]
    fn test_non_mesh_nodes_are_skipped() {
        let json = r#"
        {
            "nodes": [
                { "name": "hood_group", "children": [
                    { "name": "hood_top", "mesh": { "positions": [{"x": 0, "y": 0, "z": 0}] } }
                ] }
            ]
        }
        "#;
        let scene = SceneGraph::from_model(&parse_car_model(json).unwrap());

        let parts = classify(&scene, scene.root(), &RoleMapping::default());
        // Only the mesh leaf matches, not the empty group
        assert_eq!(parts.hood.len(), 1);
        assert_eq!(scene.node(parts.hood[0]).name, "hood_top");
    }

    #[test]
    fn test_node_can_match_multiple_roles() {
        // "brake_rim" hits both rims and calipers; no exclusivity
        let scene = scene_with_meshes(&["brake_rim"]);
        let parts = classify(&scene, scene.root(), &RoleMapping::default());
        assert_eq!(parts.rims.len(), 1);
        assert_eq!(parts.calipers.len(), 1);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let scene = scene_with_meshes(&["body_a", "body_b", "rim_fl", "rim_fr"]);
        let mapping = RoleMapping::default();

        let first = classify(&scene, scene.root(), &mapping);
        let second = classify(&scene, scene.root(), &mapping);
        assert_eq!(first.body, second.body);
        assert_eq!(first.rims, second.rims);
    }

    #[test]
    fn test_missing_roles_are_empty() {
        let scene = scene_with_meshes(&["body_shell"]);
        let parts = classify(&scene, scene.root(), &RoleMapping::default());
        assert!(parts.trunk.is_empty());
        assert!(parts.headlights.is_empty());
        assert!(parts.door_right.is_empty());
    }

    #[test]
    fn test_scenario_mixed_model() {
        let scene = scene_with_meshes(&[
            "body_shell",
            "wheel_metal_L",
            "wheel_metal_R",
            "door_L",
            "hood_top",
        ]);
        let parts = classify(&scene, scene.root(), &RoleMapping::default());

        assert_eq!(parts.body.len(), 1);
        assert_eq!(parts.rims.len(), 2);
        assert_eq!(parts.door_left.len(), 1);
        assert_eq!(parts.hood.len(), 1);
        assert!(parts.door_right.is_empty());
        assert!(parts.trunk.is_empty());
    }

    #[test]
    fn test_custom_mapping_overrides_patterns() {
        let scene = scene_with_meshes(&["front_lid"]);
        let mapping = RoleMapping {
            hood: vec!["front_lid".into()],
            ..Default::default()
        };

        let parts = classify(&scene, scene.root(), &mapping);
        assert_eq!(parts.hood.len(), 1);
    }

    #[test]
    fn test_default_mapping_keys_deserialize() {
        let json = r#"{ "rimMeshes": ["alloy"], "doorLeft": ["left_door"] }"#;
        let mapping: RoleMapping = serde_json::from_str(json).unwrap();
        assert_eq!(mapping.rim_meshes, vec!["alloy".to_string()]);
        assert_eq!(mapping.door_left, vec!["left_door".to_string()]);
        assert_eq!(
            mapping.body_paint_meshes,
            vec!["body".to_string(), "paint".to_string(), "shell".to_string()]
        );
    }
}
