//! Backdrop scene state: lighting rig, starfield, space station, environment
//!
//! Everything here is data the host renderer consumes: light parameters,
//! star positions, station settings, and a generated equirectangular
//! environment texture used for reflections. The station model itself is
//! either a loaded scene tree or a procedural descriptor (wireframe core
//! plus glowing ring) when no model is available.

use crate::error::Result;
use crate::models::CarModelDoc;
use crate::scene::SceneGraph;
use glam::Vec3;
use image::{Rgba, RgbaImage};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Default accent color (#00e5ff) shared by the rim light, ring glow, and
/// environment texture
pub const DEFAULT_ACCENT: [f32; 3] = [0.0, 0.898, 1.0];

/// Station model target size in world units after auto-scaling
const STATION_TARGET_SIZE: f32 = 50.0;

pub const ENVIRONMENT_WIDTH: u32 = 512;
pub const ENVIRONMENT_HEIGHT: u32 = 256;

#[derive(Debug, Clone, Copy)]
pub struct LightSettings {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub cast_shadow: bool,
}

/// Three-point rig: soft ambient fill, warm shadow-casting key, cool rim
#[derive(Debug, Clone, Copy)]
pub struct LightRig {
    pub ambient: LightSettings,
    pub key: DirectionalLight,
    pub rim: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        LightRig {
            ambient: LightSettings {
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
            },
            key: DirectionalLight {
                color: [1.0, 0.941, 0.867],
                intensity: 2.0,
                position: Vec3::new(5.0, 5.0, -5.0),
                cast_shadow: true,
            },
            rim: DirectionalLight {
                color: DEFAULT_ACCENT,
                intensity: 1.0,
                position: Vec3::new(-5.0, 3.0, 5.0),
                cast_shadow: false,
            },
        }
    }
}

/// Shadow-catching floor plane under the car
#[derive(Debug, Clone, Copy)]
pub struct FloorSettings {
    pub size: f32,
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
}

impl Default for FloorSettings {
    fn default() -> Self {
        FloorSettings {
            size: 100.0,
            color: [0.02, 0.02, 0.031],
            roughness: 0.1,
            metalness: 0.5,
            opacity: 0.8,
        }
    }
}

/// Point cloud of background stars, regenerated when density changes
#[derive(Debug, Clone)]
pub struct Starfield {
    pub positions: Vec<Vec3>,
    pub rotation_y: f32,
    seed: u64,
}

impl Starfield {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 100.0,
                    (rng.gen::<f32>() - 0.5) * 100.0,
                    (rng.gen::<f32>() - 0.5) * 100.0,
                )
            })
            .collect();
        Starfield {
            positions,
            rotation_y: 0.0,
            seed,
        }
    }

    pub fn set_density(&mut self, count: usize) {
        *self = Starfield::generate(count, self.seed);
    }

    pub fn update(&mut self, time: f32) {
        self.rotation_y = time * 0.01;
    }
}

/// Procedural station stand-in: wireframe core sphere plus an emissive ring
#[derive(Debug, Clone, Copy)]
pub struct ProceduralStation {
    pub core_radius: f32,
    pub core_color: [f32; 3],
    pub wireframe: bool,
    pub ring_radius: f32,
    pub ring_tube: f32,
    pub ring_color: [f32; 3],
    pub ring_emissive: [f32; 3],
    pub ring_emissive_intensity: f32,
    pub ring_tilt: f32,
}

impl Default for ProceduralStation {
    fn default() -> Self {
        ProceduralStation {
            core_radius: 15.0,
            core_color: [0.133, 0.133, 0.133],
            wireframe: true,
            ring_radius: 20.0,
            ring_tube: 0.5,
            ring_color: [0.267, 0.267, 0.267],
            ring_emissive: DEFAULT_ACCENT,
            ring_emissive_intensity: 0.2,
            ring_tilt: std::f32::consts::FRAC_PI_2 - 0.2,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StationSource {
    Procedural(ProceduralStation),
    /// Loaded station model plus an optional tint over its base colors
    Loaded {
        scene: SceneGraph,
        tint: Option<[f32; 3]>,
    },
}

/// Space station parked behind the car
#[derive(Debug, Clone)]
pub struct Station {
    pub source: StationSource,
    pub visible: bool,
    pub position: Vec3,
    pub scale: f32,
    pub angle: f32,
}

impl Default for Station {
    fn default() -> Self {
        Station {
            source: StationSource::Procedural(ProceduralStation::default()),
            visible: true,
            position: Vec3::new(-30.0, 10.0, -40.0),
            scale: 1.0,
            angle: 0.0,
        }
    }
}

impl Station {
    /// Swap in a loaded station model, auto-scaled so its longest side is
    /// around 50 units; models with no measurable extent keep unit scale
    pub fn load_model(&mut self, doc: &CarModelDoc) {
        let mut scene = SceneGraph::from_model(doc);
        let root = scene.root();
        if let Some(bounds) = scene.content_aabb(root) {
            let max_dim = bounds.max_dimension();
            if max_dim > 0.0 {
                scene.node_mut(root).scale = Vec3::splat(STATION_TARGET_SIZE / max_dim);
            }
        }
        self.source = StationSource::Loaded { scene, tint: None };
    }

    /// Tint the station: the procedural ring takes the color on its emissive
    /// channel and the core on its base color; loaded models get a base-color
    /// tint the renderer applies while traversing
    pub fn set_color(&mut self, color: [f32; 3]) {
        match &mut self.source {
            StationSource::Procedural(station) => {
                station.ring_emissive = color;
                station.core_color = color;
            }
            StationSource::Loaded { tint, .. } => *tint = Some(color),
        }
    }
}

/// Exponential fog matching the void between the stars
#[derive(Debug, Clone, Copy)]
pub struct FogSettings {
    pub color: [f32; 3],
    pub density: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        FogSettings {
            color: [0.02, 0.02, 0.031],
            density: 0.02,
        }
    }
}

/// Generate the equirectangular environment texture: a dark vertical
/// gradient with three glow spots (white sun, accent, magenta) that give
/// the paint something to reflect
pub fn environment_texture(accent: [f32; 3]) -> RgbaImage {
    let mut img = RgbaImage::new(ENVIRONMENT_WIDTH, ENVIRONMENT_HEIGHT);

    let top = [0.0_f32, 0.0, 0.0];
    let mid = [0.133_f32, 0.133, 0.2];
    for y in 0..ENVIRONMENT_HEIGHT {
        let t = y as f32 / (ENVIRONMENT_HEIGHT - 1) as f32;
        // Piecewise black -> dark blue-grey -> black
        let (a, b, f) = if t < 0.5 {
            (top, mid, t * 2.0)
        } else {
            (mid, top, (t - 0.5) * 2.0)
        };
        let row = [
            a[0] + (b[0] - a[0]) * f,
            a[1] + (b[1] - a[1]) * f,
            a[2] + (b[2] - a[2]) * f,
        ];
        let pixel = to_rgba(row);
        for x in 0..ENVIRONMENT_WIDTH {
            img.put_pixel(x, y, pixel);
        }
    }

    fill_circle(&mut img, 256, 128, 20.0, [1.0, 1.0, 1.0]);
    fill_circle(&mut img, 100, 100, 15.0, accent);
    fill_circle(&mut img, 400, 150, 15.0, [1.0, 0.0, 0.333]);

    img
}

fn to_rgba(c: [f32; 3]) -> Rgba<u8> {
    Rgba([
        (c[0].clamp(0.0, 1.0) * 255.0) as u8,
        (c[1].clamp(0.0, 1.0) * 255.0) as u8,
        (c[2].clamp(0.0, 1.0) * 255.0) as u8,
        255,
    ])
}

fn fill_circle(img: &mut RgbaImage, cx: i32, cy: i32, radius: f32, color: [f32; 3]) {
    let pixel = to_rgba(color);
    let r = radius.ceil() as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            if ((dx * dx + dy * dy) as f32) > radius * radius {
                continue;
            }
            let x = cx + dx;
            let y = cy + dy;
            if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                img.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }
}

/// All backdrop state in one place
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub lights: LightRig,
    pub floor: FloorSettings,
    pub stars: Starfield,
    pub station: Station,
    pub fog: FogSettings,
    pub background: [f32; 3],
    pub environment: RgbaImage,
}

impl Backdrop {
    pub fn new(star_seed: u64) -> Self {
        Backdrop {
            lights: LightRig::default(),
            floor: FloorSettings::default(),
            stars: Starfield::generate(1500, star_seed),
            station: Station::default(),
            fog: FogSettings::default(),
            background: [0.02, 0.02, 0.031],
            environment: environment_texture(DEFAULT_ACCENT),
        }
    }

    /// Recolor the backdrop accent: rim light, station tint, and the
    /// environment reflections all follow
    pub fn set_station_color(&mut self, color: [f32; 3]) {
        self.lights.rim.color = color;
        self.station.set_color(color);
        self.environment = environment_texture(color);
    }

    pub fn set_star_density(&mut self, count: usize) {
        self.stars.set_density(count);
    }

    /// Write the current environment texture as a PNG file
    pub fn save_environment(&self, path: &Path) -> Result<()> {
        self.environment.save(path)?;
        Ok(())
    }

    /// Per-frame update; the station spin speed comes from the shared
    /// showroom settings rather than ambient state
    pub fn update(&mut self, time: f32, station_spin_speed: f32) {
        self.stars.update(time);
        if self.station.visible {
            self.station.angle += station_spin_speed * 0.01;
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new(0)
    }
}
