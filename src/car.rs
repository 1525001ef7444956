//! Car loading, part mapping, and per-frame car state
//!
//! The manager owns the current car's scene tree and everything derived from
//! it: classified parts, paint-slot assignments, synthesized panel rigs, and
//! light overrides. Loads go through an explicit {Idle, Loading, Ready}
//! state machine so a completion can never race a teardown: a second load
//! request while one is in flight is rejected, and all derived state is
//! rebuilt from scratch on every completed load.

use crate::classify::{classify, ClassifiedParts, RoleMapping};
use crate::error::{Error, Result};
use crate::hinge::{synthesize_hinge, HingeEdge};
use crate::log_warn;
use crate::materials::{CarPaintMaterials, MaterialProperty, MaterialRole};
use crate::models::{CarEntry, CarModelDoc};
use crate::normalize::{normalize, Normalization};
use crate::panels::{PanelKind, PanelSet};
use crate::scene::{Mesh, NodeId, SceneGraph};
use glam::Vec3;
use std::collections::HashMap;

/// Longest side of a normalized car, in world units
pub const CAR_TARGET_LENGTH: f32 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
}

/// Emissive override applied to a headlight mesh. An entry is created the
/// first time headlights are toggled and then only rewritten, mirroring a
/// renderer that clones the material once and keeps the clone.
#[derive(Debug, Clone, Copy)]
pub struct HeadlightOverride {
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

/// Rectangular area light under the car
#[derive(Debug, Clone, Copy)]
pub struct UnderglowLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl Default for UnderglowLight {
    fn default() -> Self {
        UnderglowLight {
            color: [0.0, 1.0, 1.0],
            intensity: 0.0,
            width: 4.0,
            depth: 2.0,
            height: 0.1,
        }
    }
}

pub struct CarManager {
    scene: Option<SceneGraph>,
    state: LoadState,
    pending: Option<CarEntry>,
    pub materials: CarPaintMaterials,
    parts: ClassifiedParts,
    role_assignments: HashMap<NodeId, MaterialRole>,
    panels: PanelSet,
    headlight_overrides: HashMap<NodeId, HeadlightOverride>,
    headlights_on: bool,
    pub float_enabled: bool,
    pub underglow: UnderglowLight,
    normalization: Option<Normalization>,
    /// Root height set by normalization; bobbing oscillates around it
    base_height: f32,
}

impl CarManager {
    pub fn new() -> Self {
        CarManager {
            scene: None,
            state: LoadState::Idle,
            pending: None,
            materials: CarPaintMaterials::default(),
            parts: ClassifiedParts::default(),
            role_assignments: HashMap::new(),
            panels: PanelSet::default(),
            headlight_overrides: HashMap::new(),
            headlights_on: false,
            float_enabled: true,
            underglow: UnderglowLight::default(),
            normalization: None,
            base_height: 0.0,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn scene(&self) -> Option<&SceneGraph> {
        self.scene.as_ref()
    }

    pub fn parts(&self) -> &ClassifiedParts {
        &self.parts
    }

    pub fn panels(&self) -> &PanelSet {
        &self.panels
    }

    pub fn normalization(&self) -> Option<Normalization> {
        self.normalization
    }

    pub fn headlights_on(&self) -> bool {
        self.headlights_on
    }

    pub fn headlight_override(&self, id: NodeId) -> Option<&HeadlightOverride> {
        self.headlight_overrides.get(&id)
    }

    /// Paint slot a mesh was assigned to, if any
    pub fn material_role_of(&self, id: NodeId) -> Option<MaterialRole> {
        self.role_assignments.get(&id).copied()
    }

    /// Start loading a car. The actual model fetch is the host's job; the
    /// result comes back through [`CarManager::complete_load`].
    pub fn begin_load(&mut self, entry: CarEntry) -> Result<()> {
        if self.state == LoadState::Loading {
            return Err(Error::LoadInProgress);
        }
        self.pending = Some(entry);
        self.state = LoadState::Loading;
        Ok(())
    }

    /// Finish an in-flight load. The previous car is torn down first; on a
    /// load error a procedural placeholder box is substituted and part
    /// classification is skipped entirely.
    pub fn complete_load(&mut self, result: Result<CarModelDoc>) -> Result<()> {
        if self.state != LoadState::Loading {
            return Err(Error::InvalidData(
                "complete_load without a load in flight".to_string(),
            ));
        }
        let entry = self.pending.take();
        self.teardown();

        match result {
            Ok(doc) => {
                let mut scene = SceneGraph::from_model(&doc);
                let root = scene.root();

                self.normalization = match normalize(&mut scene, root, CAR_TARGET_LENGTH) {
                    Ok(n) => Some(n),
                    Err(_) => {
                        log_warn!("Degenerate model bounds, keeping unit scale");
                        None
                    }
                };
                self.base_height = scene.node(root).position.y;

                let mapping = entry.and_then(|e| e.mapping).unwrap_or_default();
                self.process_model(&mut scene, &mapping);
                self.scene = Some(scene);
            }
            Err(e) => {
                log_warn!("Failed to load model ({}), substituting placeholder box", e);
                self.install_fallback();
            }
        }

        self.state = LoadState::Ready;
        Ok(())
    }

    fn teardown(&mut self) {
        self.scene = None;
        self.parts = ClassifiedParts::default();
        self.role_assignments.clear();
        self.panels.clear();
        self.headlight_overrides.clear();
        self.normalization = None;
        self.base_height = 0.0;
    }

    /// Map classified meshes onto paint slots and synthesize panel hinges.
    /// Paint assignment order is body, rims, calipers: a mesh matching
    /// several roles keeps the last one applied.
    fn process_model(&mut self, scene: &mut SceneGraph, mapping: &RoleMapping) {
        let parts = classify(scene, scene.root(), mapping);

        for &id in &parts.body {
            self.role_assignments.insert(id, MaterialRole::Body);
        }
        for &id in &parts.rims {
            self.role_assignments.insert(id, MaterialRole::Rims);
        }
        for &id in &parts.calipers {
            self.role_assignments.insert(id, MaterialRole::Calipers);
        }

        let door_left = parts.door_left.first().copied();
        if let Some(pivot) = synthesize_hinge(scene, door_left, HingeEdge::Front) {
            self.panels.install(PanelKind::DoorLeft, pivot);
        }
        let door_right = parts.door_right.first().copied();
        if let Some(pivot) = synthesize_hinge(scene, door_right, HingeEdge::Front) {
            self.panels.install(PanelKind::DoorRight, pivot);
        }
        let hood = parts.hood.first().copied();
        if let Some(pivot) = synthesize_hinge(scene, hood, HingeEdge::Rear) {
            self.panels.install(PanelKind::Hood, pivot);
        }
        let trunk = parts.trunk.first().copied();
        if let Some(pivot) = synthesize_hinge(scene, trunk, HingeEdge::Front) {
            self.panels.install(PanelKind::Trunk, pivot);
        }

        self.parts = parts;
    }

    /// Procedural stand-in when a model cannot be loaded: a box the size of
    /// a car, resting on the floor, painted with the body slot
    fn install_fallback(&mut self) {
        let mut scene = SceneGraph::new("car");
        let root = scene.root();
        let body = scene.add_node("fallback_body", Some(root));
        scene.node_mut(body).mesh = Some(Mesh::cuboid(
            Vec3::new(2.0, 1.0, 4.0),
            Vec3::new(0.0, 0.5, 0.0),
        ));

        self.parts.body.push(body);
        self.role_assignments.insert(body, MaterialRole::Body);
        self.scene = Some(scene);
    }

    /// Flip a panel's open/closed state; false when the panel was never
    /// recognized on this car
    pub fn toggle_panel(&mut self, kind: PanelKind) -> bool {
        self.panels.toggle(kind)
    }

    pub fn toggle_headlights(&mut self, on: bool) {
        self.headlights_on = on;
        for &id in &self.parts.headlights {
            let entry = self
                .headlight_overrides
                .entry(id)
                .or_insert(HeadlightOverride {
                    emissive: [0.0, 0.0, 0.0],
                    emissive_intensity: 0.0,
                });
            *entry = if on {
                HeadlightOverride {
                    emissive: [1.0, 1.0, 1.0],
                    emissive_intensity: 5.0,
                }
            } else {
                HeadlightOverride {
                    emissive: [0.0, 0.0, 0.0],
                    emissive_intensity: 0.0,
                }
            };
        }
    }

    pub fn set_underglow(&mut self, on: bool, color: Option<[f32; 3]>) {
        if let Some(c) = color {
            self.underglow.color = c;
        }
        self.underglow.intensity = if on { 5.0 } else { 0.0 };
    }

    pub fn set_material_color(&mut self, role: MaterialRole, color: [f32; 3]) {
        self.materials.get_mut(role).set_color(color);
    }

    /// Capability-gated scalar write on a paint slot
    pub fn set_material_scalar(
        &mut self,
        role: MaterialRole,
        property: MaterialProperty,
        value: f32,
    ) -> bool {
        self.materials.set_scalar(role, property, value)
    }

    /// Per-frame update: float bobbing plus panel easing
    pub fn update(&mut self, time: f32) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let root = scene.root();
        let bob = if self.float_enabled {
            (time * 2.0).sin() * 0.05
        } else {
            0.0
        };
        scene.node_mut(root).position.y = self.base_height + bob;

        self.panels.advance(scene);
    }
}

impl Default for CarManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_car_model;

    fn entry(id: &str) -> CarEntry {
        CarEntry {
            id: id.to_string(),
            name: id.to_string(),
            url: String::new(),
            mapping: None,
        }
    }

    fn sample_model() -> CarModelDoc {
        // Named meshes with enough vertices for bounding boxes
        let json = r#"
        {
            "nodes": [
                {
                    "name": "body_shell",
                    "mesh": { "positions": [
                        {"x": -10, "y": 0, "z": -22}, {"x": 10, "y": 10, "z": 22}
                    ] }
                },
                {
                    "name": "wheel_metal_L",
                    "position": {"x": -9, "y": 2, "z": 14},
                    "mesh": { "positions": [
                        {"x": -1, "y": -2, "z": -2}, {"x": 1, "y": 2, "z": 2}
                    ] }
                },
                {
                    "name": "wheel_metal_R",
                    "position": {"x": 9, "y": 2, "z": 14},
                    "mesh": { "positions": [
                        {"x": -1, "y": -2, "z": -2}, {"x": 1, "y": 2, "z": 2}
                    ] }
                },
                {
                    "name": "door_L",
                    "position": {"x": -10, "y": 3, "z": 0},
                    "mesh": { "positions": [
                        {"x": -0.5, "y": -3, "z": -5}, {"x": 0.5, "y": 3, "z": 5}
                    ] }
                },
                {
                    "name": "hood_top",
                    "position": {"x": 0, "y": 8, "z": -15},
                    "mesh": { "positions": [
                        {"x": -8, "y": -1, "z": -6}, {"x": 8, "y": 1, "z": 6}
                    ] }
                }
            ]
        }
        "#;
        parse_car_model(json).unwrap()
    }

    fn loaded_manager() -> CarManager {
        let mut car = CarManager::new();
        car.begin_load(entry("gt")).unwrap();
        car.complete_load(Ok(sample_model())).unwrap();
        car
    }

    #[test]
    fn test_load_state_machine() {
        let mut car = CarManager::new();
        assert_eq!(car.state(), LoadState::Idle);

        car.begin_load(entry("gt")).unwrap();
        assert_eq!(car.state(), LoadState::Loading);

        // Second request while in flight is rejected
        assert!(matches!(
            car.begin_load(entry("other")),
            Err(Error::LoadInProgress)
        ));

        car.complete_load(Ok(sample_model())).unwrap();
        assert_eq!(car.state(), LoadState::Ready);

        // A fresh load is allowed once ready
        assert!(car.begin_load(entry("other")).is_ok());
    }

    #[test]
    fn test_complete_without_begin_is_rejected() {
        let mut car = CarManager::new();
        assert!(car.complete_load(Ok(sample_model())).is_err());
    }

    #[test]
    fn test_scenario_classification_and_hinges() {
        let car = loaded_manager();
        let parts = car.parts();

        assert_eq!(parts.body.len(), 1);
        assert_eq!(parts.rims.len(), 2);
        assert_eq!(parts.door_left.len(), 1);
        assert_eq!(parts.hood.len(), 1);
        assert!(parts.door_right.is_empty());
        assert!(parts.trunk.is_empty());

        assert!(car.panels().rig(PanelKind::DoorLeft).is_some());
        assert!(car.panels().rig(PanelKind::Hood).is_some());
        assert!(car.panels().rig(PanelKind::DoorRight).is_none());
        assert!(car.panels().rig(PanelKind::Trunk).is_none());
    }

    #[test]
    fn test_toggle_missing_panels_reports_false() {
        let mut car = loaded_manager();
        assert!(!car.toggle_panel(PanelKind::DoorRight));
        assert!(!car.toggle_panel(PanelKind::Trunk));
        assert!(car.toggle_panel(PanelKind::DoorLeft));
        assert!(car.toggle_panel(PanelKind::Hood));
    }

    #[test]
    fn test_car_is_normalized_on_load() {
        let car = loaded_manager();
        let scene = car.scene().unwrap();
        let bounds = scene.world_aabb(scene.root()).unwrap();

        assert!((bounds.max_dimension() - CAR_TARGET_LENGTH).abs() < 0.01);
        assert!(bounds.min.y.abs() < 0.01);
        assert!(car.normalization().is_some());
    }

    #[test]
    fn test_load_failure_substitutes_fallback_box() {
        let mut car = CarManager::new();
        car.begin_load(entry("broken")).unwrap();
        car.complete_load(Err(Error::Parse("bad gltf".to_string())))
            .unwrap();

        assert_eq!(car.state(), LoadState::Ready);
        let scene = car.scene().unwrap();
        let bounds = scene.world_aabb(scene.root()).unwrap();
        assert!((bounds.size().x - 2.0).abs() < 0.001);
        assert!((bounds.size().y - 1.0).abs() < 0.001);
        assert!((bounds.size().z - 4.0).abs() < 0.001);
        assert!(bounds.min.y.abs() < 0.001);

        // No named parts on a primitive box: panels stay disabled
        assert_eq!(car.parts().body.len(), 1);
        assert!(!car.panels().any_installed());
        for kind in PanelKind::ALL {
            assert!(!car.toggle_panel(kind));
        }
    }

    #[test]
    fn test_reload_discards_previous_parts() {
        let mut car = loaded_manager();
        assert!(car.toggle_panel(PanelKind::DoorLeft));

        car.begin_load(entry("second")).unwrap();
        let minimal = parse_car_model(
            r#"{ "nodes": [ { "name": "blob", "mesh": { "positions": [
                {"x": -1, "y": 0, "z": -1}, {"x": 1, "y": 1, "z": 1}
            ] } } ] }"#,
        )
        .unwrap();
        car.complete_load(Ok(minimal)).unwrap();

        assert!(car.parts().body.is_empty());
        assert!(!car.panels().any_installed());
        assert!(!car.toggle_panel(PanelKind::DoorLeft));
    }

    #[test]
    fn test_material_assignment_last_applied_wins() {
        let mut car = CarManager::new();
        car.begin_load(entry("gt")).unwrap();
        // "body_brake" matches both body and calipers; calipers applied later
        let doc = parse_car_model(
            r#"{ "nodes": [ { "name": "body_brake", "mesh": { "positions": [
                {"x": -1, "y": 0, "z": -1}, {"x": 1, "y": 1, "z": 1}
            ] } } ] }"#,
        )
        .unwrap();
        car.complete_load(Ok(doc)).unwrap();

        let id = car.parts().body[0];
        assert_eq!(car.material_role_of(id), Some(MaterialRole::Calipers));
    }

    #[test]
    fn test_headlight_override_memoization() {
        let mut car = CarManager::new();
        car.begin_load(entry("gt")).unwrap();
        let doc = parse_car_model(
            r#"{ "nodes": [ { "name": "headlight_glass_L", "mesh": { "positions": [
                {"x": -1, "y": 0, "z": -1}, {"x": 1, "y": 1, "z": 1}
            ] } } ] }"#,
        )
        .unwrap();
        car.complete_load(Ok(doc)).unwrap();

        let id = car.parts().headlights[0];
        assert!(car.headlight_override(id).is_none());

        car.toggle_headlights(true);
        let on = car.headlight_override(id).unwrap();
        assert!((on.emissive_intensity - 5.0).abs() < 0.0001);

        car.toggle_headlights(false);
        // The override entry persists, dimmed back to black
        let off = car.headlight_override(id).unwrap();
        assert!(off.emissive_intensity.abs() < 0.0001);
    }

    #[test]
    fn test_underglow_settings() {
        let mut car = CarManager::new();
        car.set_underglow(true, Some([1.0, 0.0, 1.0]));
        assert!((car.underglow.intensity - 5.0).abs() < 0.0001);
        assert_eq!(car.underglow.color, [1.0, 0.0, 1.0]);

        car.set_underglow(false, None);
        assert!(car.underglow.intensity.abs() < 0.0001);
        assert_eq!(car.underglow.color, [1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_float_bobbing_offsets_base_height() {
        let mut car = loaded_manager();
        let base = {
            let scene = car.scene().unwrap();
            scene.node(scene.root()).position.y
        };

        car.update(std::f32::consts::FRAC_PI_4); // sin(pi/2) = 1
        let scene = car.scene().unwrap();
        let bobbed = scene.node(scene.root()).position.y;
        assert!((bobbed - (base + 0.05)).abs() < 0.001);

        car.float_enabled = false;
        car.update(std::f32::consts::FRAC_PI_4);
        let scene = car.scene().unwrap();
        assert!((scene.node(scene.root()).position.y - base).abs() < 0.001);
    }

    #[test]
    fn test_update_advances_panels() {
        let mut car = loaded_manager();
        car.toggle_panel(PanelKind::Hood);
        car.update(0.0);

        let rig = car.panels().rig(PanelKind::Hood).unwrap();
        assert!(rig.angle > 0.0);
        let scene = car.scene().unwrap();
        assert!((scene.node(rig.pivot).rotation.x - rig.angle).abs() < 0.0001);
    }

    #[test]
    fn test_material_capability_gating_through_manager() {
        let mut car = CarManager::new();
        assert!(car.set_material_scalar(MaterialRole::Body, MaterialProperty::Clearcoat, 0.5));
        assert!(!car.set_material_scalar(MaterialRole::Rims, MaterialProperty::Clearcoat, 0.5));
    }
}
