//! WASM bindings for browser integration
//!
//! A JavaScript-friendly facade over [`Showroom`]: the host fetches model
//! and catalog JSON itself, feeds them in here, and reads back the posed
//! node transforms, star buffer, and environment texture to drive its
//! renderer each frame.

use wasm_bindgen::prelude::*;

use crate::camera::CameraPreset;
use crate::materials::{parse_hex_color, MaterialProperty, MaterialRole};
use crate::models;
use crate::panels::PanelKind;
use crate::showroom::Showroom;

/// Local transform of one car node, ready for the JS renderer to apply
#[derive(serde::Serialize)]
struct NodePose {
    name: String,
    position: [f32; 3],
    rotation: [f32; 3],
    scale: [f32; 3],
    has_mesh: bool,
}

#[wasm_bindgen]
pub struct WasmShowroom {
    inner: Showroom,
}

#[wasm_bindgen]
impl WasmShowroom {
    /// Build a showroom from catalog JSON; a malformed catalog falls back
    /// to the placeholder entry
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> WasmShowroom {
        WasmShowroom {
            inner: Showroom::from_catalog_json(catalog_json),
        }
    }

    /// Ids of all catalog cars, for the selection dropdown
    pub fn car_ids(&self) -> Vec<String> {
        self.inner.catalog.cars.iter().map(|c| c.id.clone()).collect()
    }

    /// URL the host should fetch for a car id
    pub fn car_url(&self, id: &str) -> Option<String> {
        self.inner.entry(id).map(|e| e.url.clone())
    }

    pub fn begin_load_car(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner
            .begin_load_car(id)
            .map_err(|e| JsValue::from_str(&format!("Load error: {}", e)))
    }

    /// Complete an in-flight load with fetched model JSON. Parse failures
    /// substitute the placeholder box rather than erroring.
    pub fn complete_load_car(&mut self, model_json: &str) -> Result<(), JsValue> {
        self.inner
            .complete_load_car(models::parse_car_model(model_json))
            .map_err(|e| JsValue::from_str(&format!("Load error: {}", e)))
    }

    /// Report a failed model fetch; substitutes the placeholder box
    pub fn fail_load_car(&mut self, reason: &str) -> Result<(), JsValue> {
        self.inner
            .complete_load_car(Err(crate::error::Error::InvalidData(reason.to_string())))
            .map_err(|e| JsValue::from_str(&format!("Load error: {}", e)))
    }

    /// Register an uploaded model file and load it in one step
    pub fn load_custom_car(
        &mut self,
        file_name: &str,
        url: &str,
        model_json: &str,
    ) -> Result<(), JsValue> {
        let entry = self.inner.add_custom_car(file_name, url);
        self.inner
            .load_car(&entry.id, models::parse_car_model(model_json))
            .map_err(|e| JsValue::from_str(&format!("Load error: {}", e)))
    }

    pub fn toggle_panel(&mut self, name: &str) -> bool {
        self.inner.toggle_panel(name)
    }

    /// Whether a panel was recognized on the current car (drives button state)
    pub fn panel_available(&self, name: &str) -> bool {
        match PanelKind::parse(name) {
            Some(kind) => self.inner.car.panels().rig(kind).is_some(),
            None => false,
        }
    }

    pub fn toggle_headlights(&mut self, on: bool) {
        self.inner.car.toggle_headlights(on);
    }

    pub fn set_underglow(&mut self, on: bool, color_hex: Option<String>) -> Result<(), JsValue> {
        let color = match color_hex {
            Some(hex) => Some(
                parse_hex_color(&hex)
                    .map_err(|e| JsValue::from_str(&format!("Color error: {}", e)))?,
            ),
            None => None,
        };
        self.inner.car.set_underglow(on, color);
        Ok(())
    }

    pub fn set_material_color(&mut self, role: &str, color_hex: &str) -> Result<(), JsValue> {
        let role = MaterialRole::parse(role)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown material role: {}", role)))?;
        let color = parse_hex_color(color_hex)
            .map_err(|e| JsValue::from_str(&format!("Color error: {}", e)))?;
        self.inner.car.set_material_color(role, color);
        Ok(())
    }

    /// Capability-gated scalar write; false when the role is unknown, the
    /// property is unknown, or the material kind does not support it
    pub fn set_material_scalar(&mut self, role: &str, property: &str, value: f32) -> bool {
        let (Some(role), Some(property)) =
            (MaterialRole::parse(role), MaterialProperty::parse(property))
        else {
            return false;
        };
        self.inner.car.set_material_scalar(role, property, value)
    }

    pub fn set_float_enabled(&mut self, on: bool) {
        self.inner.car.float_enabled = on;
    }

    pub fn apply_camera_preset(&mut self, name: &str) -> bool {
        match CameraPreset::parse(name) {
            Some(preset) => {
                self.inner.camera.apply_preset(preset);
                true
            }
            None => false,
        }
    }

    pub fn set_camera_fov(&mut self, fov: f32) {
        self.inner.camera.set_fov(fov);
    }

    pub fn reset_camera(&mut self) {
        self.inner.camera.reset();
    }

    pub fn set_station_visible(&mut self, visible: bool) {
        self.inner.backdrop.station.visible = visible;
    }

    pub fn set_station_scale(&mut self, scale: f32) {
        self.inner.backdrop.station.scale = scale;
    }

    pub fn set_station_speed(&mut self, speed: f32) {
        self.inner.settings.station_spin_speed = speed;
    }

    pub fn set_station_color(&mut self, color_hex: &str) -> Result<(), JsValue> {
        let color = parse_hex_color(color_hex)
            .map_err(|e| JsValue::from_str(&format!("Color error: {}", e)))?;
        self.inner.backdrop.set_station_color(color);
        Ok(())
    }

    pub fn set_star_density(&mut self, count: u32) {
        self.inner.backdrop.set_star_density(count as usize);
    }

    pub fn set_bloom_strength(&mut self, strength: f32) {
        self.inner.post.set_bloom_strength(strength);
    }

    pub fn set_performance_mode(&mut self, on: bool) {
        self.inner.post.set_performance_mode(on);
    }

    pub fn composer_enabled(&self) -> bool {
        self.inner.post.composer_enabled()
    }

    /// One frame tick
    pub fn update(&mut self, time: f32) {
        self.inner.update(time);
    }

    /// Local transforms of every car node in traversal order, as an array of
    /// {name, position, rotation, scale, has_mesh} objects
    pub fn car_pose(&self) -> Result<JsValue, JsValue> {
        let poses: Vec<NodePose> = match self.inner.car.scene() {
            Some(scene) => scene
                .descendants(scene.root())
                .into_iter()
                .map(|id| {
                    let node = scene.node(id);
                    NodePose {
                        name: node.name.clone(),
                        position: node.position.to_array(),
                        rotation: node.rotation.to_array(),
                        scale: node.scale.to_array(),
                        has_mesh: node.is_mesh(),
                    }
                })
                .collect(),
            None => Vec::new(),
        };
        serde_wasm_bindgen::to_value(&poses)
            .map_err(|e| JsValue::from_str(&format!("Serialize error: {}", e)))
    }

    /// Flat xyz star positions for a points geometry
    pub fn star_positions(&self) -> Vec<f32> {
        self.inner
            .backdrop
            .stars
            .positions
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    /// Current environment texture encoded as PNG bytes
    pub fn environment_png(&self) -> Result<Vec<u8>, JsValue> {
        let mut bytes: Vec<u8> = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut bytes);
        image::DynamicImage::ImageRgba8(self.inner.backdrop.environment.clone())
            .write_to(&mut cursor, image::ImageFormat::Png)
            .map_err(|e| JsValue::from_str(&format!("Export error: {}", e)))?;
        Ok(bytes)
    }
}
