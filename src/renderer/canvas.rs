//! Canvas 2D drawing of the bow, arrows and targets
//!
//! Reads the simulation state after each tick; never mutates it.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{HIGHLIGHT_TICKS, MAX_PULL};
use crate::sim::{Launcher, Projectile, SimState, Target};

/// Bow limb radius
const BOW_RADIUS: f64 = 46.0;
/// Drawn arrow length
const ARROW_LENGTH: f64 = 42.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Target icons by source path
    icons: HashMap<String, HtmlImageElement>,
}

impl CanvasRenderer {
    /// Returns None if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            icons: HashMap::new(),
        })
    }

    /// Start loading target icons. Targets draw as rings until theirs is ready.
    pub fn load_icons<'a>(&mut self, sources: impl IntoIterator<Item = &'a str>) {
        for src in sources {
            if self.icons.contains_key(src) {
                continue;
            }
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(src);
                    self.icons.insert(src.to_string(), img);
                }
                Err(e) => log::warn!("Could not create image for {}: {:?}", src, e),
            }
        }
    }

    fn icon(&self, src: &str) -> Option<&HtmlImageElement> {
        self.icons
            .get(src)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    /// Match the backing store to the CSS size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Clear and draw one frame
    pub fn draw(&self, state: &SimState) {
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        self.draw_launcher(&state.launcher, state.pull);
        for target in &state.targets {
            self.draw_target(target);
        }
        for arrow in &state.projectiles {
            self.draw_arrow(arrow);
        }
    }

    fn draw_launcher(&self, launcher: &Launcher, pull: f32) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(launcher.pos.x as f64, launcher.pos.y as f64).ok();
        ctx.rotate(launcher.angle as f64).ok();

        // Limbs bulge toward the aim direction (+x after rotation)
        ctx.begin_path();
        ctx.arc(0.0, 0.0, BOW_RADIUS, -FRAC_PI_2, FRAC_PI_2).ok();
        ctx.set_stroke_style_str("#c89b5a");
        ctx.set_line_width(5.0);
        ctx.stroke();

        // String, pulled back by the current draw
        let nock = -(pull as f64 / MAX_PULL as f64) * BOW_RADIUS;
        let gradient = ctx.create_linear_gradient(0.0, -BOW_RADIUS, 0.0, BOW_RADIUS);
        gradient.add_color_stop(0.0, "#4A6CF7").ok();
        gradient.add_color_stop(0.5, "#21E6E6").ok();
        gradient.add_color_stop(1.0, "#4A6CF7").ok();
        ctx.set_stroke_style_canvas_gradient(&gradient);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(0.0, -BOW_RADIUS);
        ctx.line_to(nock, 0.0);
        ctx.line_to(0.0, BOW_RADIUS);
        ctx.stroke();

        ctx.restore();
    }

    fn draw_arrow(&self, arrow: &Projectile) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(arrow.pos.x as f64, arrow.pos.y as f64).ok();
        ctx.rotate(arrow.angle as f64).ok();

        ctx.set_shadow_color("gold");
        ctx.set_shadow_blur(10.0);

        // Shaft ends at the tip (origin)
        ctx.set_stroke_style_str("#f5e6c4");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(-ARROW_LENGTH, 0.0);
        ctx.line_to(0.0, 0.0);
        ctx.stroke();

        // Head
        ctx.set_fill_style_str("#e0e0e0");
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.line_to(-8.0, -4.0);
        ctx.line_to(-8.0, 4.0);
        ctx.fill();

        ctx.restore();
    }

    fn draw_target(&self, target: &Target) {
        let ctx = &self.ctx;
        let c = target.center();
        let (cx, cy) = (c.x as f64, c.y as f64);
        let r = (target.size.x.min(target.size.y) / 2.0) as f64;

        if let Some(img) = self.icon(&target.icon) {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                target.pos.x as f64,
                target.pos.y as f64,
                target.size.x as f64,
                target.size.y as f64,
            )
            .ok();
        } else {
            // Rings stand in until the icon loads
            for (i, color) in ["#d93b3b", "#f4f4f4", "#d93b3b"].iter().enumerate() {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.arc(cx, cy, r * (1.0 - i as f64 * 0.3), 0.0, TAU).ok();
                ctx.fill();
            }
        }

        // Hit pulse: grows and fades over the highlight window
        if target.highlight_ticks > 0 {
            let t = target.highlight_ticks as f64 / HIGHLIGHT_TICKS as f64;
            ctx.save();
            ctx.set_global_alpha(t);
            ctx.set_stroke_style_str("gold");
            ctx.set_line_width(2.0);
            ctx.begin_path();
            ctx.arc(cx, cy, r * (1.0 + (1.0 - t) * 0.5), 0.0, 2.0 * PI).ok();
            ctx.stroke();
            ctx.restore();
        }

        // Orbiting tooltip
        let tip = target.tooltip_pos();
        ctx.set_font("12px sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str("#ffffff");
        ctx.fill_text(&target.label, tip.x as f64, tip.y as f64).ok();
    }
}
