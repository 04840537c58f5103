use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::chat::{ChatOverlay, InputField, OPEN_PLACEHOLDER};
use crate::config::ChatConfig;

use super::effects::ScreenEffects;
use super::input::InputCollector;
use super::metrics::MetricsAccumulator;
use super::rendering::Renderer;
use super::scene::{HostScene, SceneCommand, SceneMachine};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub chat: ChatConfig,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Chatterbox".to_string(),
            window_width: 1280,
            window_height: 720,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
            chat: ChatConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Drives the host scenes at a fixed timestep and the chat overlay at the
/// raw frame rate. The chat idle timer and screen-effect reverts consume
/// the unscaled frame delta, so auto-hide keeps working while the host
/// simulation is paused.
pub fn run_app(
    config: LoopConfig,
    scene_a: Box<dyn HostScene>,
    scene_b: Box<dyn HostScene>,
) -> Result<(), AppError> {
    let mut scenes = SceneMachine::new(scene_a, scene_b);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer =
        Renderer::new(Arc::clone(&window), &config.chat).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();

    let mut chat = ChatOverlay::new(&config.chat);
    let mut field = InputField::new(OPEN_PLACEHOLDER);
    let mut effects = ScreenEffects::new();
    let mut input_collector = InputCollector::default();
    let mut paused = false;

    scenes.load_active();
    info!(scene = ?scenes.active_scene(), "scene_loaded");
    info!(
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        idle_hide_seconds = config.chat.idle_hide_seconds,
        max_messages = config.chat.max_messages,
        reply_lines = config.chat.reply_script.len(),
        "loop_config"
    );

    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut metrics = MetricsAccumulator::new(metrics_log_interval);

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::KeyboardInput { event: key_event, .. } => {
                    // The overlay sees every key first; host hotkeys stay
                    // dead while the input field holds focus.
                    let field_had_focus = field.is_focused();
                    chat.handle_key_event(&key_event, &mut field);
                    chat.handle_text_input(&key_event, &mut field);

                    if !field_had_focus {
                        input_collector.handle_keyboard_input(&key_event);
                        if input_collector.quit_requested() {
                            info!(reason = "escape_key", "shutdown_requested");
                            window_target.exit();
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);

                    chat.tick(clamped_frame_dt, &mut field);
                    effects.tick(clamped_frame_dt);

                    accumulator = accumulator.saturating_add(clamped_frame_dt);
                    let step_plan = plan_host_ticks(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        let snapshot = input_collector.snapshot_for_tick();
                        if snapshot.pause_pressed() {
                            paused = !paused;
                            info!(paused, "sim_pause_toggled");
                        }
                        if !paused {
                            let command =
                                scenes.update_active(fixed_dt_seconds, &snapshot, &mut effects);
                            if let SceneCommand::SwitchTo(next) = command {
                                scenes.switch_to(next);
                            }
                            metrics.record_host_tick();
                        }
                    }
                    accumulator = step_plan.remaining_accumulator;

                    if step_plan.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame, "sim_clamp_triggered"
                        );
                    }

                    let size = window.inner_size();
                    let view = scenes.view_active((size.width, size.height));
                    if let Err(error) =
                        renderer.render(&view, &chat, &field, effects.tint(), paused)
                    {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }

                    metrics.record_frame(raw_frame_dt);
                    if let Some(snapshot) = metrics.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            avg_frame_ms = snapshot.avg_frame_ms,
                            worst_frame_ms = snapshot.worst_frame_ms,
                            chat_open = chat.is_open(),
                            chat_lines = chat.log_len(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_host_ticks(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;
    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_frame_delta_caps_large_deltas() {
        let max_frame_delta = Duration::from_millis(250);
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(900), max_frame_delta),
            max_frame_delta
        );
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(16), max_frame_delta),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn plan_runs_expected_ticks_without_drop() {
        let fixed_dt = Duration::from_millis(16);
        let plan = plan_host_ticks(Duration::from_millis(48), fixed_dt, 5);

        assert_eq!(plan.ticks_to_run, 3);
        assert_eq!(plan.remaining_accumulator, Duration::ZERO);
        assert_eq!(plan.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_carries_partial_tick_forward() {
        let fixed_dt = Duration::from_millis(16);
        let plan = plan_host_ticks(Duration::from_millis(40), fixed_dt, 5);

        assert_eq!(plan.ticks_to_run, 2);
        assert_eq!(plan.remaining_accumulator, Duration::from_millis(8));
    }

    #[test]
    fn plan_drops_backlog_when_tick_cap_is_hit() {
        let fixed_dt = Duration::from_millis(16);
        let plan = plan_host_ticks(Duration::from_millis(120), fixed_dt, 3);

        assert_eq!(plan.ticks_to_run, 3);
        assert_eq!(plan.remaining_accumulator, Duration::ZERO);
        assert_eq!(plan.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn zero_durations_fall_back_to_defaults() {
        let fallback = Duration::from_secs(1);
        assert_eq!(normalize_non_zero_duration(Duration::ZERO, fallback), fallback);
        assert_eq!(
            normalize_non_zero_duration(Duration::from_millis(5), fallback),
            Duration::from_millis(5)
        );
    }
}
