use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Per-tick view of the host-side keys. Every press is edge-triggered:
/// it shows up in exactly one snapshot, however long the key is held.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostInputSnapshot {
    quit_requested: bool,
    switch_scene_pressed: bool,
    pause_pressed: bool,
    damage_pressed: bool,
    heal_pressed: bool,
}

impl HostInputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn switch_scene_pressed(&self) -> bool {
        self.switch_scene_pressed
    }

    pub fn pause_pressed(&self) -> bool {
        self.pause_pressed
    }

    pub fn damage_pressed(&self) -> bool {
        self.damage_pressed
    }

    pub fn heal_pressed(&self) -> bool {
        self.heal_pressed
    }

    pub fn with_switch_scene_pressed(mut self, pressed: bool) -> Self {
        self.switch_scene_pressed = pressed;
        self
    }

    pub fn with_pause_pressed(mut self, pressed: bool) -> Self {
        self.pause_pressed = pressed;
        self
    }

    pub fn with_damage_pressed(mut self, pressed: bool) -> Self {
        self.damage_pressed = pressed;
        self
    }

    pub fn with_heal_pressed(mut self, pressed: bool) -> Self {
        self.heal_pressed = pressed;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct EdgeKey {
    is_down: bool,
    pressed_edge: bool,
}

impl EdgeKey {
    fn note(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.is_down {
                    self.pressed_edge = true;
                }
                self.is_down = true;
            }
            ElementState::Released => self.is_down = false,
        }
    }

    fn take_edge(&mut self) -> bool {
        let pressed = self.pressed_edge;
        self.pressed_edge = false;
        pressed
    }
}

/// Collects host key events between ticks. The loop withholds events from
/// this collector while the chat input field holds focus, which is what
/// keeps gameplay hotkeys dead during typing.
#[derive(Debug, Default)]
pub(crate) struct InputCollector {
    quit_requested: bool,
    switch_scene: EdgeKey,
    pause: EdgeKey,
    damage: EdgeKey,
    heal: EdgeKey,
}

impl InputCollector {
    pub(crate) fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    pub(crate) fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return;
        };
        match code {
            KeyCode::Tab => self.switch_scene.note(key_event.state),
            KeyCode::Space => self.pause.note(key_event.state),
            KeyCode::KeyO => self.damage.note(key_event.state),
            KeyCode::KeyP => self.heal.note(key_event.state),
            KeyCode::Escape => {
                if key_event.state == ElementState::Pressed {
                    self.mark_quit_requested();
                }
            }
            _ => {}
        }
    }

    pub(crate) fn snapshot_for_tick(&mut self) -> HostInputSnapshot {
        HostInputSnapshot {
            quit_requested: self.quit_requested,
            switch_scene_pressed: self.switch_scene.take_edge(),
            pause_pressed: self.pause.take_edge(),
            damage_pressed: self.damage.take_edge(),
            heal_pressed: self.heal.take_edge(),
        }
    }
}
