use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::scene::HostView;
use crate::chat::{ChatOverlay, InputField, MessageKind};
use crate::config::ChatConfig;

use super::draw::{
    draw_filled_rect, draw_rect_outline, draw_text, text_width_px, tint_frame, LINE_HEIGHT,
};

const PANEL_MARGIN_PX: i32 = 12;
const PANEL_WIDTH_PX: i32 = 420;
const PANEL_INSET_PX: i32 = 8;
const PANEL_GAP_PX: i32 = 4;
const INPUT_BOX_HEIGHT_PX: i32 = LINE_HEIGHT + 2 * PANEL_INSET_PX;

const PANEL_BG_COLOR: [u8; 4] = [12, 14, 20, 255];
const PANEL_BORDER_COLOR: [u8; 4] = [88, 100, 122, 255];
const INPUT_TEXT_COLOR: [u8; 4] = [235, 240, 245, 255];
const PLACEHOLDER_COLOR: [u8; 4] = [130, 140, 155, 255];
const LOCAL_TEXT_COLOR: [u8; 4] = [130, 170, 255, 255];
const REMOTE_TEXT_COLOR: [u8; 4] = [255, 165, 70, 255];

const HEALTH_BAR_X_PX: i32 = 12;
const HEALTH_BAR_Y_PX: i32 = 12;
const HEALTH_BAR_WIDTH_PX: i32 = 180;
const HEALTH_BAR_HEIGHT_PX: i32 = 12;
const HEALTH_BAR_BORDER_COLOR: [u8; 4] = [88, 100, 122, 255];
const HEALTH_FILL_COLOR: [u8; 4] = [90, 200, 110, 255];
const HEALTH_EMPTY_COLOR: [u8; 4] = [40, 44, 52, 255];

const SCENE_LABEL_COLOR: [u8; 4] = [176, 198, 220, 255];
const PAUSED_BANNER: &str = "PAUSED";
const PAUSED_BANNER_COLOR: [u8; 4] = [255, 220, 120, 255];

#[derive(Debug, Clone, Copy)]
struct ChatPanelLayout {
    slot_height_px: i32,
    shift_px: i32,
    max_messages: i32,
}

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    width: u32,
    height: u32,
    layout: ChatPanelLayout,
}

impl Renderer {
    pub fn new(window: Arc<Window>, chat_config: &ChatConfig) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            width: size.width,
            height: size.height,
            layout: ChatPanelLayout {
                slot_height_px: chat_config.slot_height_px,
                shift_px: chat_config.shift_px(),
                max_messages: chat_config.max_messages as i32,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render(
        &mut self,
        host: &HostView,
        chat: &ChatOverlay,
        field: &InputField,
        flash_tint: Option<[u8; 4]>,
        paused: bool,
    ) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let (width, height) = (self.width, self.height);
        let layout = self.layout;
        let frame = self.pixels.frame_mut();

        for chunk in frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&host.clear_color);
        }

        for marker in &host.markers {
            draw_filled_rect(
                frame,
                width,
                height,
                marker.x_px - marker.half_size_px,
                marker.y_px - marker.half_size_px,
                marker.half_size_px * 2,
                marker.half_size_px * 2,
                marker.color,
            );
        }

        draw_health_bar(frame, width, height, host.health_fraction);
        draw_text(
            frame,
            width,
            height,
            HEALTH_BAR_X_PX,
            HEALTH_BAR_Y_PX + HEALTH_BAR_HEIGHT_PX + PANEL_GAP_PX,
            host.scene_label,
            SCENE_LABEL_COLOR,
        );

        if paused {
            let banner_x = (width as i32 - text_width_px(PAUSED_BANNER)) / 2;
            draw_text(
                frame,
                width,
                height,
                banner_x,
                HEALTH_BAR_Y_PX,
                PAUSED_BANNER,
                PAUSED_BANNER_COLOR,
            );
        }

        draw_chat_panel(frame, width, height, layout, chat, field);

        if let Some(tint) = flash_tint {
            tint_frame(frame, tint);
        }

        self.pixels.render()
    }
}

fn draw_health_bar(frame: &mut [u8], width: u32, height: u32, fraction: f32) {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    draw_filled_rect(
        frame,
        width,
        height,
        HEALTH_BAR_X_PX,
        HEALTH_BAR_Y_PX,
        HEALTH_BAR_WIDTH_PX,
        HEALTH_BAR_HEIGHT_PX,
        HEALTH_EMPTY_COLOR,
    );
    let fill_width = (HEALTH_BAR_WIDTH_PX as f32 * fraction).round() as i32;
    draw_filled_rect(
        frame,
        width,
        height,
        HEALTH_BAR_X_PX,
        HEALTH_BAR_Y_PX,
        fill_width,
        HEALTH_BAR_HEIGHT_PX,
        HEALTH_FILL_COLOR,
    );
    draw_rect_outline(
        frame,
        width,
        height,
        HEALTH_BAR_X_PX,
        HEALTH_BAR_Y_PX,
        HEALTH_BAR_WIDTH_PX,
        HEALTH_BAR_HEIGHT_PX,
        HEALTH_BAR_BORDER_COLOR,
    );
}

fn draw_chat_panel(
    frame: &mut [u8],
    width: u32,
    height: u32,
    layout: ChatPanelLayout,
    chat: &ChatOverlay,
    field: &InputField,
) {
    let input_top = height as i32 - PANEL_MARGIN_PX - INPUT_BOX_HEIGHT_PX;

    if chat.is_open() {
        let messages_height = layout.max_messages * layout.shift_px + PANEL_GAP_PX;
        let panel_top = input_top - messages_height;
        draw_filled_rect(
            frame,
            width,
            height,
            PANEL_MARGIN_PX,
            panel_top,
            PANEL_WIDTH_PX,
            messages_height,
            PANEL_BG_COLOR,
        );
        draw_rect_outline(
            frame,
            width,
            height,
            PANEL_MARGIN_PX,
            panel_top,
            PANEL_WIDTH_PX,
            messages_height,
            PANEL_BORDER_COLOR,
        );

        let anchor_y = input_top - PANEL_GAP_PX - layout.slot_height_px;
        let text_inset_y = (layout.slot_height_px - LINE_HEIGHT) / 2;
        for record in chat.entries() {
            let slot_top = anchor_y - record.offset_px();
            if slot_top + layout.slot_height_px <= panel_top {
                continue;
            }
            draw_text(
                frame,
                width,
                height,
                PANEL_MARGIN_PX + PANEL_INSET_PX,
                slot_top + text_inset_y,
                record.text(),
                message_color(record.kind()),
            );
        }
    }

    draw_filled_rect(
        frame,
        width,
        height,
        PANEL_MARGIN_PX,
        input_top,
        PANEL_WIDTH_PX,
        INPUT_BOX_HEIGHT_PX,
        PANEL_BG_COLOR,
    );
    draw_rect_outline(
        frame,
        width,
        height,
        PANEL_MARGIN_PX,
        input_top,
        PANEL_WIDTH_PX,
        INPUT_BOX_HEIGHT_PX,
        PANEL_BORDER_COLOR,
    );

    let text_x = PANEL_MARGIN_PX + PANEL_INSET_PX;
    let text_y = input_top + PANEL_INSET_PX;
    if field.text().is_empty() {
        draw_text(frame, width, height, text_x, text_y, field.placeholder(), PLACEHOLDER_COLOR);
    } else {
        let line = if field.is_focused() {
            format!("{}_", field.text())
        } else {
            field.text().to_string()
        };
        draw_text(frame, width, height, text_x, text_y, &line, INPUT_TEXT_COLOR);
    }
}

fn message_color(kind: MessageKind) -> [u8; 4] {
    match kind {
        MessageKind::Local => LOCAL_TEXT_COLOR,
        MessageKind::Remote => REMOTE_TEXT_COLOR,
    }
}
