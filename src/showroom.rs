//! Top-level showroom controller
//!
//! Ties the car manager, backdrop, camera, and post settings together and
//! owns the shared per-frame tunables. Anything the UI adjusts and the frame
//! loop reads lives in [`ShowroomSettings`] and is passed into updates
//! explicitly; there is no ambient global state.

use crate::backdrop::Backdrop;
use crate::camera::CameraRig;
use crate::car::CarManager;
use crate::error::Result;
use crate::log_warn;
use crate::models::{parse_car_catalog, CarCatalog, CarEntry, CarModelDoc};
use crate::panels::PanelKind;
use crate::post::PostSettings;

/// Shared frame-loop tunables owned by the showroom
#[derive(Debug, Clone, Copy)]
pub struct ShowroomSettings {
    pub station_spin_speed: f32,
}

impl Default for ShowroomSettings {
    fn default() -> Self {
        ShowroomSettings {
            station_spin_speed: 0.2,
        }
    }
}

pub struct Showroom {
    pub catalog: CarCatalog,
    pub car: CarManager,
    pub backdrop: Backdrop,
    pub camera: CameraRig,
    pub post: PostSettings,
    pub settings: ShowroomSettings,
}

impl Showroom {
    pub fn new(catalog: CarCatalog) -> Self {
        Showroom {
            catalog,
            car: CarManager::new(),
            backdrop: Backdrop::default(),
            camera: CameraRig::default(),
            post: PostSettings::default(),
            settings: ShowroomSettings::default(),
        }
    }

    /// Build a showroom from catalog JSON, falling back to the placeholder
    /// catalog when the document cannot be parsed
    pub fn from_catalog_json(json: &str) -> Self {
        let catalog = match parse_car_catalog(json) {
            Ok(catalog) => catalog,
            Err(e) => {
                log_warn!("Failed to parse car catalog ({}), using placeholder", e);
                Self::placeholder_catalog()
            }
        };
        Self::new(catalog)
    }

    /// Single-entry catalog used when no real one is available
    pub fn placeholder_catalog() -> CarCatalog {
        CarCatalog {
            cars: vec![CarEntry {
                id: "placeholder".to_string(),
                name: "Placeholder Box".to_string(),
                url: String::new(),
                mapping: None,
            }],
        }
    }

    pub fn entry(&self, id: &str) -> Option<&CarEntry> {
        self.catalog.cars.iter().find(|c| c.id == id)
    }

    /// Start loading a catalog car; the host fetches `entry.url` and reports
    /// back through [`Showroom::complete_load_car`]
    pub fn begin_load_car(&mut self, id: &str) -> Result<()> {
        let entry = self
            .entry(id)
            .cloned()
            .ok_or_else(|| crate::error::Error::InvalidData(format!("Unknown car id: {}", id)))?;
        self.car.begin_load(entry)
    }

    pub fn complete_load_car(&mut self, result: Result<CarModelDoc>) -> Result<()> {
        self.car.complete_load(result)
    }

    /// Begin and complete in one call, for hosts that load synchronously
    pub fn load_car(&mut self, id: &str, result: Result<CarModelDoc>) -> Result<()> {
        self.begin_load_car(id)?;
        self.complete_load_car(result)
    }

    /// Register an uploaded model file as a catalog entry and return it for
    /// loading
    pub fn add_custom_car(&mut self, file_name: &str, url: &str) -> CarEntry {
        let entry = CarEntry {
            id: file_name.to_string(),
            name: format!("{} (Custom)", file_name),
            url: url.to_string(),
            mapping: None,
        };
        self.catalog.cars.push(entry.clone());
        entry
    }

    /// UI-facing panel toggle by name ("doorL", "doorR", "hood", "trunk")
    pub fn toggle_panel(&mut self, name: &str) -> bool {
        match PanelKind::parse(name) {
            Some(kind) => self.car.toggle_panel(kind),
            None => false,
        }
    }

    /// One frame tick for everything animated
    pub fn update(&mut self, time: f32) {
        self.car.update(time);
        self.backdrop
            .update(time, self.settings.station_spin_speed);
    }
}
