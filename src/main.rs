//! CLI inspection tool: classify a car model and report what the showroom
//! would recognize on it

use car_showroom::*;

use car_showroom::classify::{classify, RoleMapping};
use car_showroom::hinge::{synthesize_hinge, HingeEdge};
use car_showroom::normalize::normalize;
use car_showroom::panels::PanelKind;
use car_showroom::scene::{NodeId, SceneGraph};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "showroom-inspect",
    about = "Normalize a car model, classify its parts, and synthesize panel hinges"
)]
struct Args {
    /// Car model JSON file
    model: PathBuf,

    /// Role-mapping JSON file; built-in patterns when omitted
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Normalized length of the car's longest side
    #[arg(long, default_value_t = car::CAR_TARGET_LENGTH)]
    target_length: f32,

    /// Write the generated environment texture to this PNG path
    #[arg(long)]
    env_map: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    log_info!("Loading car model from: {:?}", args.model);
    let doc = match models::parse_car_model_from_file(&args.model) {
        Ok(doc) => doc,
        Err(e) => {
            log_error!("Error parsing car model: {}", e);
            std::process::exit(1);
        }
    };

    let mapping = match &args.mapping {
        Some(path) => {
            let content = match std::fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    log_error!("Error reading mapping file: {}", e);
                    std::process::exit(1);
                }
            };
            match serde_json::from_str::<RoleMapping>(&content) {
                Ok(m) => m,
                Err(e) => {
                    log_error!("Error parsing mapping file: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => RoleMapping::default(),
    };

    let mut scene = SceneGraph::from_model(&doc);
    let root = scene.root();
    log_info!("Scene has {} nodes", scene.descendants(root).len());

    match normalize(&mut scene, root, args.target_length) {
        Ok(n) => log_info!(
            "Normalized: scale {:.4}, center ({:.2}, {:.2}, {:.2})",
            n.scale,
            n.center.x,
            n.center.y,
            n.center.z
        ),
        Err(e) => log_warn!("Normalization skipped ({}), keeping unit scale", e),
    }

    let parts = classify(&scene, root, &mapping);
    report_role(&scene, "body", &parts.body);
    report_role(&scene, "rims", &parts.rims);
    report_role(&scene, "calipers", &parts.calipers);
    report_role(&scene, "headlights", &parts.headlights);
    report_role(&scene, "doorLeft", &parts.door_left);
    report_role(&scene, "doorRight", &parts.door_right);
    report_role(&scene, "hood", &parts.hood);
    report_role(&scene, "trunk", &parts.trunk);

    let panels = [
        (PanelKind::DoorLeft, parts.door_left.first().copied(), HingeEdge::Front),
        (PanelKind::DoorRight, parts.door_right.first().copied(), HingeEdge::Front),
        (PanelKind::Hood, parts.hood.first().copied(), HingeEdge::Rear),
        (PanelKind::Trunk, parts.trunk.first().copied(), HingeEdge::Front),
    ];
    for (kind, mesh, edge) in panels {
        match synthesize_hinge(&mut scene, mesh, edge) {
            Some(pivot) => {
                let pos = scene.node(pivot).position;
                println!(
                    "{}: pivot at ({:.3}, {:.3}, {:.3})",
                    kind.label(),
                    pos.x,
                    pos.y,
                    pos.z
                );
            }
            None => println!("{}: no panel recognized", kind.label()),
        }
    }

    if let Some(path) = &args.env_map {
        let texture = backdrop::environment_texture(backdrop::DEFAULT_ACCENT);
        match texture.save(path) {
            Ok(_) => log_info!("Environment texture written to {:?}", path),
            Err(e) => {
                log_error!("Error writing environment texture: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn report_role(scene: &SceneGraph, role: &str, ids: &[NodeId]) {
    let names: Vec<&str> = ids.iter().map(|&id| scene.node(id).name.as_str()).collect();
    println!("{}: {} match(es) {:?}", role, ids.len(), names);
}
