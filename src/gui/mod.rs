mod display;
mod glyphs;

use display::{Glyph, GlyphSlot};
use glyphs::GlyphSet;

use crate::{
    app::{RunState, TimerController},
    util::Clock,
};

use eframe::egui::{
    self, load::SizedTexture, pos2, vec2, Color32, Pos2, Rect, RichText, Sense, TextureHandle,
    Ui, Vec2,
};
use log::debug;

use std::path::Path;

const DIGIT_HEIGHT: f32 = 64.0;
const DIGIT_SPACING: f32 = 6.0;
const TITLE_HEIGHT: f32 = 32.0;
const BUTTON_SIZE: f32 = 60.0;
const BUTTON_SPACING: f32 = 30.0;
const EDGE_PADDING: f32 = 50.0;

#[derive(Debug, PartialEq, Eq)]
enum ControlAction {
    Toggle,
    Reset,
    None,
}

pub struct Gui<C: Clock> {
    controller: TimerController<C>,
    glyphs: GlyphSet,
    show_controls: bool,
}

impl<C: Clock> Gui<C> {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: TimerController<C>,
        assets: &Path,
    ) -> Gui<C> {
        Gui::with_context(&cc.egui_ctx, controller, assets)
    }

    fn with_context(ctx: &egui::Context, controller: TimerController<C>, assets: &Path) -> Gui<C> {
        ctx.set_visuals(egui::Visuals::dark());

        Gui {
            controller,
            glyphs: GlyphSet::load(ctx, assets),
            show_controls: true,
        }
    }

    fn handle_control_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::Toggle => {
                self.controller.play_click();
                self.controller.toggle();
            }
            ControlAction::Reset => {
                self.controller.play_click();
                self.controller.reset();
            }
            ControlAction::None => (),
        }
    }

    fn show(&mut self, ui: &mut Ui) -> ControlAction {
        let rect = ui.max_rect();

        render_background(ui, rect, self.glyphs.background.as_ref());
        render_title(ui, rect, self.glyphs.title.as_ref());

        let view = self.controller.view();
        render_digits(ui, rect.center(), &self.glyphs, &display::layout(&view));

        let controls = control_rects(rect);
        let mut action = ControlAction::None;
        if self.show_controls {
            action = render_controls(ui, controls, &self.glyphs, view.run_state);
        }

        // Taps are read from raw input rather than a full screen widget, which would steal the
        // press from the buttons
        let tap_pos = ui.input(|i| {
            if i.pointer.primary_clicked() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });

        if let Some(pos) = tap_pos {
            let on_control = self.show_controls && controls.iter().any(|r| r.contains(pos));
            if action == ControlAction::None && !on_control && rect.contains(pos) {
                self.show_controls = !self.show_controls;
                debug!("Controls visible: {}", self.show_controls);
            }
        }

        action
    }

    fn run_frame(&mut self, ctx: &egui::Context) {
        self.controller.poll();

        let action = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| self.show(ui))
            .inner;

        self.handle_control_action(action);

        if let Some(wait) = self.controller.time_until_next_effect() {
            ctx.request_repaint_after(wait);
        }
    }
}

impl<C: Clock> eframe::App for Gui<C> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_frame(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.teardown();
    }
}

fn render_background(ui: &mut Ui, rect: Rect, texture: Option<&TextureHandle>) {
    let Some(texture) = texture else {
        return;
    };

    egui::Image::new(SizedTexture::from_handle(texture))
        .uv(cover_uv(texture_size(texture), rect.size()))
        .paint_at(ui, rect);
}

fn render_title(ui: &mut Ui, rect: Rect, texture: Option<&TextureHandle>) {
    let Some(texture) = texture else {
        return;
    };

    let width = scaled_width(texture_size(texture), TITLE_HEIGHT);
    let title_rect = Rect::from_center_size(
        pos2(rect.center().x, rect.top() + EDGE_PADDING + TITLE_HEIGHT / 2.0),
        vec2(width, TITLE_HEIGHT),
    );

    egui::Image::new(SizedTexture::from_handle(texture)).paint_at(ui, title_rect);
}

fn render_digits(ui: &mut Ui, center: Pos2, glyphs: &GlyphSet, slots: &[GlyphSlot]) {
    let widths: Vec<f32> = slots
        .iter()
        .map(|slot| glyph_width(slot.glyph, glyphs.glyph(slot.glyph)))
        .collect();

    for (slot, rect) in slots
        .iter()
        .zip(row_rects(center, &widths, DIGIT_HEIGHT, DIGIT_SPACING))
    {
        // Hidden glyphs keep their slot so the row does not shift while blinking
        if !slot.visible {
            continue;
        }

        match glyphs.glyph(slot.glyph) {
            Some(texture) => {
                ui.put(
                    rect,
                    egui::Image::new(SizedTexture::from_handle(texture))
                        .fit_to_exact_size(rect.size()),
                );
            }
            None => {
                ui.put(
                    rect,
                    egui::Label::new(
                        RichText::new(fallback_text(slot.glyph))
                            .monospace()
                            .size(DIGIT_HEIGHT * 0.8)
                            .color(Color32::WHITE),
                    ),
                );
            }
        }
    }
}

fn control_rects(rect: Rect) -> [Rect; 2] {
    let center = pos2(
        rect.center().x,
        rect.bottom() - EDGE_PADDING - BUTTON_SIZE / 2.0,
    );
    let rects = row_rects(center, &[BUTTON_SIZE, BUTTON_SIZE], BUTTON_SIZE, BUTTON_SPACING);
    [rects[0], rects[1]]
}

fn render_controls(
    ui: &mut Ui,
    rects: [Rect; 2],
    glyphs: &GlyphSet,
    run_state: RunState,
) -> ControlAction {
    let (primary_texture, primary_text) = match run_state {
        RunState::Running => (glyphs.pause.as_ref(), "⏸"),
        RunState::Stopped => (glyphs.play.as_ref(), "▶"),
    };

    let toggle = control_button(ui, rects[0], primary_texture, primary_text);
    let reset = control_button(ui, rects[1], glyphs.reset.as_ref(), "⟲");

    if toggle {
        ControlAction::Toggle
    } else if reset {
        ControlAction::Reset
    } else {
        ControlAction::None
    }
}

fn control_button(ui: &mut Ui, rect: Rect, texture: Option<&TextureHandle>, text: &str) -> bool {
    let response = match texture {
        Some(texture) => ui.put(
            rect,
            egui::Image::new(SizedTexture::from_handle(texture))
                .fit_to_exact_size(rect.size())
                .sense(Sense::click()),
        ),
        None => ui.put(
            rect,
            egui::Button::new(RichText::new(text).size(BUTTON_SIZE / 2.0)),
        ),
    };

    response.clicked()
}

fn fallback_text(glyph: Glyph) -> String {
    match glyph {
        Glyph::Digit(v) => v.to_string(),
        Glyph::Colon => ":".to_string(),
    }
}

fn texture_size(texture: &TextureHandle) -> Vec2 {
    let [w, h] = texture.size();
    vec2(w as f32, h as f32)
}

fn scaled_width(size: Vec2, height: f32) -> f32 {
    if size.y <= 0.0 {
        return height;
    }
    height * size.x / size.y
}

fn glyph_width(glyph: Glyph, texture: Option<&TextureHandle>) -> f32 {
    match (texture, glyph) {
        (Some(texture), _) => scaled_width(texture_size(texture), DIGIT_HEIGHT),
        (None, Glyph::Digit(_)) => DIGIT_HEIGHT * 0.6,
        (None, Glyph::Colon) => DIGIT_HEIGHT * 0.3,
    }
}

/// Rects for a horizontal row of items centred on `center`
fn row_rects(center: Pos2, widths: &[f32], height: f32, spacing: f32) -> Vec<Rect> {
    let gaps = widths.len().saturating_sub(1) as f32;
    let total: f32 = widths.iter().sum::<f32>() + gaps * spacing;

    let mut x = center.x - total / 2.0;
    let top = center.y - height / 2.0;

    widths
        .iter()
        .map(|w| {
            let rect = Rect::from_min_size(pos2(x, top), vec2(*w, height));
            x += w + spacing;
            rect
        })
        .collect()
}

/// Crops an image so it covers `target` without distortion
fn cover_uv(image: Vec2, target: Vec2) -> Rect {
    let full = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }

    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;

    if image_aspect > target_aspect {
        let margin = (1.0 - target_aspect / image_aspect) / 2.0;
        Rect::from_min_max(pos2(margin, 0.0), pos2(1.0 - margin, 1.0))
    } else {
        let margin = (1.0 - image_aspect / target_aspect) / 2.0;
        Rect::from_min_max(pos2(0.0, margin), pos2(1.0, 1.0 - margin))
    }
}
