use tracing::info;

use super::effects::ScreenEffects;
use super::input::HostInputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKey {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    SwitchTo(SceneKey),
}

/// Axis-aligned square drawn by the renderer on behalf of a host scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x_px: i32,
    pub y_px: i32,
    pub half_size_px: i32,
    pub color: [u8; 4],
}

/// Everything the renderer needs from the active host scene this frame.
#[derive(Debug, Clone)]
pub struct HostView {
    pub clear_color: [u8; 4],
    pub markers: Vec<Marker>,
    pub health_fraction: f32,
    pub scene_label: &'static str,
}

/// The surrounding game. The overlay only sees it through this trait plus
/// the input-field focus flag; everything else stays on the host side.
pub trait HostScene {
    fn load(&mut self);
    fn update(
        &mut self,
        sim_dt_seconds: f32,
        input: &HostInputSnapshot,
        effects: &mut ScreenEffects,
    ) -> SceneCommand;
    fn view(&self, viewport: (u32, u32)) -> HostView;
}

struct SceneRuntime {
    scene: Box<dyn HostScene>,
    is_loaded: bool,
}

pub(crate) struct SceneMachine {
    scene_a: SceneRuntime,
    scene_b: SceneRuntime,
    active: SceneKey,
}

impl SceneMachine {
    pub(crate) fn new(scene_a: Box<dyn HostScene>, scene_b: Box<dyn HostScene>) -> Self {
        Self {
            scene_a: SceneRuntime {
                scene: scene_a,
                is_loaded: false,
            },
            scene_b: SceneRuntime {
                scene: scene_b,
                is_loaded: false,
            },
            active: SceneKey::A,
        }
    }

    pub(crate) fn active_scene(&self) -> SceneKey {
        self.active
    }

    pub(crate) fn load_active(&mut self) {
        let runtime = self.runtime_mut(self.active);
        if !runtime.is_loaded {
            runtime.scene.load();
            runtime.is_loaded = true;
        }
    }

    pub(crate) fn update_active(
        &mut self,
        sim_dt_seconds: f32,
        input: &HostInputSnapshot,
        effects: &mut ScreenEffects,
    ) -> SceneCommand {
        let runtime = self.runtime_mut(self.active);
        runtime.scene.update(sim_dt_seconds, input, effects)
    }

    pub(crate) fn view_active(&self, viewport: (u32, u32)) -> HostView {
        match self.active {
            SceneKey::A => self.scene_a.scene.view(viewport),
            SceneKey::B => self.scene_b.scene.view(viewport),
        }
    }

    pub(crate) fn switch_to(&mut self, next: SceneKey) -> bool {
        if self.active == next {
            return false;
        }
        let runtime = self.runtime_mut(next);
        if !runtime.is_loaded {
            runtime.scene.load();
            runtime.is_loaded = true;
        }
        self.active = next;
        info!(scene = ?next, "scene_switched");
        true
    }

    fn runtime_mut(&mut self, key: SceneKey) -> &mut SceneRuntime {
        match key {
            SceneKey::A => &mut self.scene_a,
            SceneKey::B => &mut self.scene_b,
        }
    }
}
