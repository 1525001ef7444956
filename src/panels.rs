//! Panel open/close state and eased pivot animation
//!
//! Each hinged panel is a two-state machine (closed/open) whose pivot
//! rotation eases toward the target angle every tick. The smoothing is
//! frame-counted, not time-normalized: `angle += (target - angle) * 0.1`
//! per tick, matching the showroom's fixed-step update loop. The angle
//! approaches its target asymptotically and never lands exactly on it.

use crate::scene::{NodeId, SceneGraph};

/// Per-tick smoothing factor for panel rotation
pub const PANEL_LERP_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    DoorLeft,
    DoorRight,
    Hood,
    Trunk,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::DoorLeft,
        PanelKind::DoorRight,
        PanelKind::Hood,
        PanelKind::Trunk,
    ];

    /// Rotation when fully open, in radians. Doors swing outward around the
    /// vertical axis with opposite signs; hood and trunk tilt around the
    /// lateral axis in opposite directions.
    pub fn open_angle(self) -> f32 {
        match self {
            PanelKind::DoorLeft => std::f32::consts::FRAC_PI_3,
            PanelKind::DoorRight => -std::f32::consts::FRAC_PI_3,
            PanelKind::Hood => std::f32::consts::FRAC_PI_4,
            PanelKind::Trunk => -std::f32::consts::FRAC_PI_4,
        }
    }

    /// Panel identifier used in catalog-facing APIs and the UI layer
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "doorL" => Some(PanelKind::DoorLeft),
            "doorR" => Some(PanelKind::DoorRight),
            "hood" => Some(PanelKind::Hood),
            "trunk" => Some(PanelKind::Trunk),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelKind::DoorLeft => "doorL",
            PanelKind::DoorRight => "doorR",
            PanelKind::Hood => "hood",
            PanelKind::Trunk => "trunk",
        }
    }

    fn rotates_about_vertical(self) -> bool {
        matches!(self, PanelKind::DoorLeft | PanelKind::DoorRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

impl PanelState {
    fn toggled(self) -> Self {
        match self {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        }
    }
}

/// A synthesized panel: non-owning pivot handle plus animation state
#[derive(Debug, Clone)]
pub struct PanelRig {
    pub pivot: NodeId,
    pub state: PanelState,
    pub angle: f32,
}

impl PanelRig {
    fn new(pivot: NodeId) -> Self {
        PanelRig {
            pivot,
            state: PanelState::Closed,
            angle: 0.0,
        }
    }
}

/// All panels recognized on the current car
#[derive(Debug, Clone, Default)]
pub struct PanelSet {
    door_left: Option<PanelRig>,
    door_right: Option<PanelRig>,
    hood: Option<PanelRig>,
    trunk: Option<PanelRig>,
}

impl PanelSet {
    /// Register a synthesized pivot for a panel
    pub fn install(&mut self, kind: PanelKind, pivot: NodeId) {
        *self.slot_mut(kind) = Some(PanelRig::new(pivot));
    }

    /// Drop all rigs; called on car teardown
    pub fn clear(&mut self) {
        self.door_left = None;
        self.door_right = None;
        self.hood = None;
        self.trunk = None;
    }

    pub fn rig(&self, kind: PanelKind) -> Option<&PanelRig> {
        self.slot(kind).as_ref()
    }

    /// True when at least one panel was recognized; drives the UI hint
    pub fn any_installed(&self) -> bool {
        PanelKind::ALL.iter().any(|&k| self.rig(k).is_some())
    }

    /// Flip a panel between open and closed. Returns false and changes
    /// nothing when the panel was never synthesized.
    pub fn toggle(&mut self, kind: PanelKind) -> bool {
        match self.slot_mut(kind) {
            Some(rig) => {
                rig.state = rig.state.toggled();
                true
            }
            None => false,
        }
    }

    /// One animation tick: ease every panel's angle toward its target and
    /// write it into the pivot's rotation component
    pub fn advance(&mut self, scene: &mut SceneGraph) {
        for kind in PanelKind::ALL {
            if let Some(rig) = self.slot_mut(kind).as_mut() {
                let target = match rig.state {
                    PanelState::Closed => 0.0,
                    PanelState::Open => kind.open_angle(),
                };
                rig.angle += (target - rig.angle) * PANEL_LERP_SPEED;

                let rotation = &mut scene.node_mut(rig.pivot).rotation;
                if kind.rotates_about_vertical() {
                    rotation.y = rig.angle;
                } else {
                    rotation.x = rig.angle;
                }
            }
        }
    }

    fn slot(&self, kind: PanelKind) -> &Option<PanelRig> {
        match kind {
            PanelKind::DoorLeft => &self.door_left,
            PanelKind::DoorRight => &self.door_right,
            PanelKind::Hood => &self.hood,
            PanelKind::Trunk => &self.trunk,
        }
    }

    fn slot_mut(&mut self, kind: PanelKind) -> &mut Option<PanelRig> {
        match kind {
            PanelKind::DoorLeft => &mut self.door_left,
            PanelKind::DoorRight => &mut self.door_right,
            PanelKind::Hood => &mut self.hood,
            PanelKind::Trunk => &mut self.trunk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_3, FRAC_PI_4};

    fn scene_with_pivot() -> (SceneGraph, NodeId) {
        let mut scene = SceneGraph::new("car");
        let root = scene.root();
        let pivot = scene.add_node("hood_pivot", Some(root));
        (scene, pivot)
    }

    #[test]
    fn test_toggle_unknown_panel_is_noop() {
        let mut panels = PanelSet::default();
        assert!(!panels.toggle(PanelKind::Hood));
        assert!(!panels.any_installed());
    }

    #[test]
    fn test_toggle_flips_state() {
        let (_, pivot) = scene_with_pivot();
        let mut panels = PanelSet::default();
        panels.install(PanelKind::Hood, pivot);

        assert!(panels.toggle(PanelKind::Hood));
        assert_eq!(panels.rig(PanelKind::Hood).unwrap().state, PanelState::Open);
        assert!(panels.toggle(PanelKind::Hood));
        assert_eq!(panels.rig(PanelKind::Hood).unwrap().state, PanelState::Closed);
    }

    #[test]
    fn test_advance_eases_toward_target() {
        let (mut scene, pivot) = scene_with_pivot();
        let mut panels = PanelSet::default();
        panels.install(PanelKind::Hood, pivot);
        panels.toggle(PanelKind::Hood);

        panels.advance(&mut scene);
        let after_one = panels.rig(PanelKind::Hood).unwrap().angle;
        assert!((after_one - FRAC_PI_4 * 0.1).abs() < 0.0001);

        panels.advance(&mut scene);
        let after_two = panels.rig(PanelKind::Hood).unwrap().angle;
        assert!(after_two > after_one);
        assert!(after_two < FRAC_PI_4);
    }

    #[test]
    fn test_angle_approaches_but_never_reaches_target() {
        let (mut scene, pivot) = scene_with_pivot();
        let mut panels = PanelSet::default();
        panels.install(PanelKind::Hood, pivot);
        panels.toggle(PanelKind::Hood);

        for _ in 0..50 {
            panels.advance(&mut scene);
            assert!(panels.rig(PanelKind::Hood).unwrap().angle < FRAC_PI_4);
        }
        // 0.9^50 of the gap remains after 50 ticks, about 4e-3 radians
        let after_50 = panels.rig(PanelKind::Hood).unwrap().angle;
        assert!((FRAC_PI_4 - after_50).abs() < 1e-2);

        for _ in 0..50 {
            panels.advance(&mut scene);
        }
        let after_100 = panels.rig(PanelKind::Hood).unwrap().angle;
        assert!((FRAC_PI_4 - after_100).abs() < 1e-4);
        assert!(after_100 != FRAC_PI_4);
    }

    #[test]
    fn test_advance_writes_pivot_rotation_axis() {
        let mut scene = SceneGraph::new("car");
        let root = scene.root();
        let door_pivot = scene.add_node("door_L_pivot", Some(root));
        let hood_pivot = scene.add_node("hood_pivot", Some(root));

        let mut panels = PanelSet::default();
        panels.install(PanelKind::DoorLeft, door_pivot);
        panels.install(PanelKind::Hood, hood_pivot);
        panels.toggle(PanelKind::DoorLeft);
        panels.toggle(PanelKind::Hood);

        panels.advance(&mut scene);

        // Doors swing about Y, hood tilts about X
        assert!(scene.node(door_pivot).rotation.y > 0.0);
        assert!(scene.node(door_pivot).rotation.x.abs() < 0.0001);
        assert!(scene.node(hood_pivot).rotation.x > 0.0);
        assert!(scene.node(hood_pivot).rotation.y.abs() < 0.0001);
    }

    #[test]
    fn test_door_signs_are_opposite() {
        assert!((PanelKind::DoorLeft.open_angle() - FRAC_PI_3).abs() < 0.0001);
        assert!((PanelKind::DoorRight.open_angle() + FRAC_PI_3).abs() < 0.0001);
        assert!((PanelKind::Hood.open_angle() - FRAC_PI_4).abs() < 0.0001);
        assert!((PanelKind::Trunk.open_angle() + FRAC_PI_4).abs() < 0.0001);
    }

    #[test]
    fn test_closing_eases_back_down() {
        let (mut scene, pivot) = scene_with_pivot();
        let mut panels = PanelSet::default();
        panels.install(PanelKind::Trunk, pivot);

        panels.toggle(PanelKind::Trunk);
        for _ in 0..100 {
            panels.advance(&mut scene);
        }
        panels.toggle(PanelKind::Trunk);
        for _ in 0..100 {
            panels.advance(&mut scene);
        }
        assert!(panels.rig(PanelKind::Trunk).unwrap().angle.abs() < 1e-4);
    }

    #[test]
    fn test_kind_parse_round_trip() {
        for kind in PanelKind::ALL {
            assert_eq!(PanelKind::parse(kind.label()), Some(kind));
        }
        assert_eq!(PanelKind::parse("sunroof"), None);
    }
}
