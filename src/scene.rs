//! Scene tree storage and world-space queries
//!
//! Nodes live in an index arena so pivots can be inserted and meshes
//! reparented without fighting ownership. Each loaded car gets its own graph;
//! replacing the car drops the whole arena, which is how prior classification
//! results and pivots are discarded.

use crate::math::{build_transform, vec3_from_model, Aabb};
use crate::models::{CarModelDoc, ModelNode};
use glam::{Mat4, Vec3};

/// Handle into a [`SceneGraph`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Mesh vertex positions in node-local space
#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
}

impl Mesh {
    /// Corner vertices of an axis-aligned cuboid centered at `offset`
    pub fn cuboid(size: Vec3, offset: Vec3) -> Self {
        let half = size * 0.5;
        let mut positions = Vec::with_capacity(8);
        for &x in &[-half.x, half.x] {
            for &y in &[-half.y, half.y] {
                for &z in &[-half.z, half.z] {
                    positions.push(offset + Vec3::new(x, y, z));
                }
            }
        }
        Mesh { positions }
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub position: Vec3,
    /// Euler rotation in radians, XYZ order
    pub rotation: Vec3,
    pub scale: Vec3,
    pub material_names: Vec<String>,
    pub mesh: Option<Mesh>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    fn empty(name: String) -> Self {
        SceneNode {
            name,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            material_names: Vec::new(),
            mesh: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_mesh(&self) -> bool {
        self.mesh.is_some()
    }
}

/// Arena-backed scene tree with a single root
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new(root_name: &str) -> Self {
        SceneGraph {
            nodes: vec![SceneNode::empty(root_name.to_string())],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Build a graph from a parsed model document; top-level model nodes
    /// become children of a fresh root
    pub fn from_model(doc: &CarModelDoc) -> Self {
        let mut scene = SceneGraph::new("car");
        let root = scene.root();
        for node in &doc.nodes {
            scene.build_node(node, root);
        }
        scene
    }

    fn build_node(&mut self, model: &ModelNode, parent: NodeId) {
        let id = self.add_node(&model.name, Some(parent));
        let node = self.node_mut(id);
        node.position = vec3_from_model(model.position);
        node.rotation = vec3_from_model(model.rotation);
        node.scale = vec3_from_model(model.scale);
        node.material_names = model.materials.clone();
        node.mesh = model.mesh.as_ref().map(|m| Mesh {
            positions: m.positions.iter().map(|&v| vec3_from_model(v)).collect(),
        });
        for child in &model.children {
            self.build_node(child, id);
        }
    }

    pub fn add_node(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = SceneNode::empty(name.to_string());
        node.parent = parent;
        self.nodes.push(node);
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Move `child` under `new_parent`, removing it from its current parent's
    /// child list
    pub fn attach(&mut self, child: NodeId, new_parent: NodeId) {
        if let Some(old) = self.nodes[child.0].parent {
            self.nodes[old.0].children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(child);
    }

    /// Pre-order traversal of `root` and everything below it
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(root, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in &self.nodes[id.0].children {
            self.collect_descendants(child, out);
        }
    }

    /// Mesh nodes below (and including) `root`, in traversal order
    pub fn mesh_nodes(&self, root: NodeId) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.node(id).is_mesh())
            .collect()
    }

    pub fn local_transform(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        build_transform(node.position, node.rotation, node.scale)
    }

    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let local = self.local_transform(id);
        match self.nodes[id.0].parent {
            Some(parent) => self.world_transform(parent) * local,
            None => local,
        }
    }

    /// World-space bounding box of a node and all its descendants; None when
    /// the subtree carries no vertices
    pub fn world_aabb(&self, id: NodeId) -> Option<Aabb> {
        let mut bounds = None;
        self.subtree_aabb(id, self.world_transform(id), &mut bounds);
        bounds
    }

    /// Bounding box of a node's content in the node's own frame: the node's
    /// transform is excluded, so the result is stable across re-normalization
    pub fn content_aabb(&self, id: NodeId) -> Option<Aabb> {
        let mut bounds = None;
        self.subtree_aabb(id, Mat4::IDENTITY, &mut bounds);
        bounds
    }

    fn subtree_aabb(&self, id: NodeId, transform: Mat4, bounds: &mut Option<Aabb>) {
        let node = &self.nodes[id.0];
        if let Some(ref mesh) = node.mesh {
            for &p in &mesh.positions {
                let wp = transform.transform_point3(p);
                match bounds {
                    Some(b) => b.expand(wp),
                    None => *bounds = Some(Aabb::from_point(wp)),
                }
            }
        }
        for &child in &node.children {
            self.subtree_aabb(child, transform * self.local_transform(child), bounds);
        }
    }
}
