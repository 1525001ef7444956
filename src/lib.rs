//! Car Showroom
//!
//! Core of a browser-based 3D car configurator: classifies an unlabeled
//! model's meshes into semantic car parts, synthesizes hinge pivots for
//! doors, hood, and trunk, and drives material, lighting, and backdrop
//! state for a host renderer.

pub mod backdrop;
pub mod camera;
pub mod car;
pub mod classify;
pub mod error;
pub mod hinge;
pub mod materials;
pub mod math;
pub mod models;
pub mod normalize;
pub mod panels;
pub mod post;
pub mod scene;
pub mod showroom;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::Error;
pub use error::Result;

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            println!("[INFO] {}", format!($($arg)*));
        }
    }
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            println!("[WARN] {}", format!($($arg)*));
        }
    }
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        eprintln!("[ERROR] {}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            println!("[DEBUG] {}", format!($($arg)*));
        }
    }
}

/// High-level API: build a showroom from catalog JSON and load one car
///
/// Convenience for hosts that already fetched both documents. A catalog that
/// fails to parse falls back to the placeholder catalog; a model that fails
/// to parse falls back to the procedural placeholder box.
pub fn load_showroom(
    catalog_json: &str,
    car_id: &str,
    model_json: &str,
) -> Result<showroom::Showroom> {
    let mut showroom = showroom::Showroom::from_catalog_json(catalog_json);
    showroom.begin_load_car(car_id)?;
    showroom.complete_load_car(models::parse_car_model(model_json))?;
    Ok(showroom)
}
