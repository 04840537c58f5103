use overlay::{
    HostInputSnapshot, HostScene, HostView, Marker, SceneCommand, SceneKey, ScreenEffects,
    DAMAGE_FLASH_COLOR,
};
use tracing::{debug, info};

const MAX_HEALTH: u32 = 10;
const MARKER_HALF_SIZE_PX: i32 = 10;
const MARKER_SPEED_X_PER_SECOND: f32 = 0.23;
const MARKER_SPEED_Y_PER_SECOND: f32 = 0.17;

pub(crate) fn build_scene_pair() -> (Box<dyn HostScene>, Box<dyn HostScene>) {
    let meadow = DriftScene::new(
        "meadow",
        SceneKey::B,
        [20, 26, 22, 255],
        [210, 230, 180, 255],
    );
    let cavern = DriftScene::new(
        "cavern",
        SceneKey::A,
        [16, 16, 24, 255],
        [150, 190, 235, 255],
    );
    (Box::new(meadow), Box::new(cavern))
}

/// Demo host scene: a marker drifting on simulation time (so the pause
/// toggle is visible), integer health on the damage/heal keys, and a Tab
/// handoff to the sibling scene. Every hotkey here is already suppressed
/// upstream while the chat field has focus.
struct DriftScene {
    label: &'static str,
    switch_target: SceneKey,
    clear_color: [u8; 4],
    marker_color: [u8; 4],
    position: (f32, f32),
    velocity: (f32, f32),
    health: u32,
}

impl DriftScene {
    fn new(
        label: &'static str,
        switch_target: SceneKey,
        clear_color: [u8; 4],
        marker_color: [u8; 4],
    ) -> Self {
        Self {
            label,
            switch_target,
            clear_color,
            marker_color,
            position: (0.5, 0.5),
            velocity: (MARKER_SPEED_X_PER_SECOND, MARKER_SPEED_Y_PER_SECOND),
            health: MAX_HEALTH,
        }
    }

    fn apply_damage(&mut self, effects: &mut ScreenEffects) {
        if self.health == 0 {
            return;
        }
        self.health -= 1;
        effects.trigger_flash(DAMAGE_FLASH_COLOR);
        debug!(scene = self.label, health = self.health, "damage_applied");
    }

    fn apply_heal(&mut self) {
        if self.health >= MAX_HEALTH {
            return;
        }
        self.health += 1;
        debug!(scene = self.label, health = self.health, "heal_applied");
    }

    fn advance_marker(&mut self, dt_seconds: f32) {
        self.position.0 += self.velocity.0 * dt_seconds;
        self.position.1 += self.velocity.1 * dt_seconds;

        if self.position.0 <= 0.0 || self.position.0 >= 1.0 {
            self.velocity.0 = -self.velocity.0;
            self.position.0 = self.position.0.clamp(0.0, 1.0);
        }
        if self.position.1 <= 0.0 || self.position.1 >= 1.0 {
            self.velocity.1 = -self.velocity.1;
            self.position.1 = self.position.1.clamp(0.0, 1.0);
        }
    }

    fn health_fraction(&self) -> f32 {
        self.health as f32 / MAX_HEALTH as f32
    }
}

impl HostScene for DriftScene {
    fn load(&mut self) {
        self.position = (0.5, 0.5);
        self.health = MAX_HEALTH;
        info!(scene = self.label, "scene_loaded");
    }

    fn update(
        &mut self,
        sim_dt_seconds: f32,
        input: &HostInputSnapshot,
        effects: &mut ScreenEffects,
    ) -> SceneCommand {
        self.advance_marker(sim_dt_seconds);

        if input.damage_pressed() {
            self.apply_damage(effects);
        }
        if input.heal_pressed() {
            self.apply_heal();
        }

        if input.switch_scene_pressed() {
            return SceneCommand::SwitchTo(self.switch_target);
        }
        SceneCommand::None
    }

    fn view(&self, viewport: (u32, u32)) -> HostView {
        let (width, height) = viewport;
        let marker = Marker {
            x_px: (self.position.0 * width as f32).round() as i32,
            y_px: (self.position.1 * height as f32).round() as i32,
            half_size_px: MARKER_HALF_SIZE_PX,
            color: self.marker_color,
        };
        HostView {
            clear_color: self.clear_color,
            markers: vec![marker],
            health_fraction: self.health_fraction(),
            scene_label: self.label,
        }
    }
}
