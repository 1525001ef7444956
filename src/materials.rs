//! Car material settings and per-kind capability descriptors
//!
//! Materials here are render-agnostic parameter sets the host renderer maps
//! onto its own material system. Each settings block carries an explicit
//! [`MaterialKind`] declaring which properties it supports, so callers never
//! probe for property presence at runtime: a Standard material simply rejects
//! clearcoat writes.

use crate::error::{Error, Result};

/// Material capability tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Basic PBR: color, metalness, roughness
    Standard,
    /// PBR with a clearcoat layer on top
    Physical,
}

impl MaterialKind {
    pub fn supports(self, property: MaterialProperty) -> bool {
        match property {
            MaterialProperty::Clearcoat => matches!(self, MaterialKind::Physical),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialProperty {
    Color,
    Metalness,
    Roughness,
    Clearcoat,
}

impl MaterialProperty {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "color" => Some(MaterialProperty::Color),
            "metalness" => Some(MaterialProperty::Metalness),
            "roughness" => Some(MaterialProperty::Roughness),
            "clearcoat" => Some(MaterialProperty::Clearcoat),
            _ => None,
        }
    }
}

/// Which paint slot a classified mesh was assigned to. Assignment is
/// last-applied-wins in the car manager's processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialRole {
    Body,
    Rims,
    Calipers,
}

impl MaterialRole {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "body" => Some(MaterialRole::Body),
            "rims" => Some(MaterialRole::Rims),
            "calipers" => Some(MaterialRole::Calipers),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaterialSettings {
    pub kind: MaterialKind,
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub env_map_intensity: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
}

impl MaterialSettings {
    /// Glossy body paint: red physical material with full clearcoat
    pub fn body() -> Self {
        MaterialSettings {
            kind: MaterialKind::Physical,
            color: [1.0, 0.0, 0.0],
            metalness: 0.9,
            roughness: 0.1,
            env_map_intensity: 2.0,
            clearcoat: 1.0,
            clearcoat_roughness: 0.05,
        }
    }

    /// Brushed-metal rims
    pub fn rims() -> Self {
        MaterialSettings {
            kind: MaterialKind::Standard,
            color: [0.8, 0.8, 0.8],
            metalness: 0.8,
            roughness: 0.2,
            env_map_intensity: 1.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
        }
    }

    /// Painted brake calipers
    pub fn calipers() -> Self {
        MaterialSettings {
            kind: MaterialKind::Standard,
            color: [1.0, 1.0, 0.0],
            metalness: 0.3,
            roughness: 0.5,
            env_map_intensity: 1.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
        }
    }

    /// Write a scalar property; false when this material kind does not
    /// support it, leaving the settings untouched
    pub fn set_scalar(&mut self, property: MaterialProperty, value: f32) -> bool {
        if !self.kind.supports(property) {
            return false;
        }
        match property {
            MaterialProperty::Metalness => self.metalness = value,
            MaterialProperty::Roughness => self.roughness = value,
            MaterialProperty::Clearcoat => self.clearcoat = value,
            MaterialProperty::Color => return false,
        }
        true
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }
}

/// The three shared paint slots applied to classified meshes. These persist
/// across car loads so a chosen color carries over to the next model.
#[derive(Debug, Clone)]
pub struct CarPaintMaterials {
    pub body: MaterialSettings,
    pub rims: MaterialSettings,
    pub calipers: MaterialSettings,
}

impl Default for CarPaintMaterials {
    fn default() -> Self {
        CarPaintMaterials {
            body: MaterialSettings::body(),
            rims: MaterialSettings::rims(),
            calipers: MaterialSettings::calipers(),
        }
    }
}

impl CarPaintMaterials {
    pub fn get(&self, role: MaterialRole) -> &MaterialSettings {
        match role {
            MaterialRole::Body => &self.body,
            MaterialRole::Rims => &self.rims,
            MaterialRole::Calipers => &self.calipers,
        }
    }

    pub fn get_mut(&mut self, role: MaterialRole) -> &mut MaterialSettings {
        match role {
            MaterialRole::Body => &mut self.body,
            MaterialRole::Rims => &mut self.rims,
            MaterialRole::Calipers => &mut self.calipers,
        }
    }

    /// Capability-gated scalar write on one paint slot
    pub fn set_scalar(&mut self, role: MaterialRole, property: MaterialProperty, value: f32) -> bool {
        self.get_mut(role).set_scalar(property, value)
    }
}

/// Parse a `#rrggbb` hex color into linear-ish [0,1] RGB components
pub fn parse_hex_color(s: &str) -> Result<[f32; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return Err(Error::Parse(format!("Invalid hex color: {}", s)));
    }
    let channel = |range: std::ops::Range<usize>| -> Result<f32> {
        u8::from_str_radix(&hex[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| Error::Parse(format!("Invalid hex color: {}", s)))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
