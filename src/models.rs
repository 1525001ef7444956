//! Car definition data structures and parsing
//!
//! Two JSON documents are consumed: the car catalog (which cars exist, where
//! their model files live, and optional per-car role mappings) and the car
//! model itself (a node tree with transforms, material names, and mesh
//! vertex data).

use crate::classify::RoleMapping;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Catalog of available cars (cars.json)
#[derive(Debug, Clone, Deserialize)]
pub struct CarCatalog {
    pub cars: Vec<CarEntry>,
}

/// One selectable car in the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CarEntry {
    pub id: String,
    pub name: String,
    /// Model location, resolved by the host's loader; empty for the
    /// procedural placeholder
    #[serde(default)]
    pub url: String,
    /// Per-car role mapping overrides; built-in patterns apply when absent
    #[serde(default)]
    pub mapping: Option<RoleMapping>,
}

/// A loaded car model document
#[derive(Debug, Clone, Deserialize)]
pub struct CarModelDoc {
    pub nodes: Vec<ModelNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelNode {
    #[serde(default)]
    pub name: String,
    #[serde(default = "Vector3::zero")]
    pub position: Vector3,
    /// Euler rotation in radians, XYZ order
    #[serde(default = "Vector3::zero")]
    pub rotation: Vector3,
    #[serde(default = "default_scale")]
    pub scale: Vector3,
    /// Names of the materials bound to this node's mesh, in slot order
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub mesh: Option<MeshData>,
    #[serde(default)]
    pub children: Vec<ModelNode>,
}

/// Mesh vertex data; positions are all the core needs for bounding volumes
#[derive(Debug, Clone, Deserialize)]
pub struct MeshData {
    pub positions: Vec<Vector3>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn zero() -> Self {
        Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

fn default_scale() -> Vector3 {
    Vector3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    }
}

/// Parse a car model document from a JSON string
pub fn parse_car_model(json: &str) -> Result<CarModelDoc> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a car model document from a file
pub fn parse_car_model_from_file(path: &Path) -> Result<CarModelDoc> {
    let content = std::fs::read_to_string(path)?;
    parse_car_model(&content)
}

/// Parse a car catalog from a JSON string
pub fn parse_car_catalog(json: &str) -> Result<CarCatalog> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a car catalog from a file
pub fn parse_car_catalog_from_file(path: &Path) -> Result<CarCatalog> {
    let content = std::fs::read_to_string(path)?;
    parse_car_catalog(&content)
}
