//! Full-scene repaint of the puzzle surface. Scene composition lives in
//! `paint_scene` against the `Painter` trait; `CanvasPainter` maps it onto a
//! 2D canvas context.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::puzzle::{Piece, Point, Rect, Scene};

const BACKGROUND: &str = "#f8f9fa";
const OUTLINE: Stroke = Stroke { color: "#666", width: 2.0, dashed: true };
const PIECE_BORDER: Stroke = Stroke { color: "#333", width: 1.0, dashed: false };
const CONNECTED_BORDER: Stroke = Stroke { color: "#4CAF50", width: 2.0, dashed: false };
const HINT_FILL: &str = "rgba(76, 175, 80, 0.3)";
const HINT_BORDER: Stroke = Stroke { color: "#4CAF50", width: 2.0, dashed: false };
const RESTING_SHADOW: Shadow = Shadow { color: "rgba(0, 0, 0, 0.2)", blur: 8.0, offset: 2.0 };
const DRAGGING_SHADOW: Shadow = Shadow { color: "rgba(0, 0, 0, 0.2)", blur: 15.0, offset: 3.0 };
const DASH: [f64; 2] = [5.0, 5.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    pub dashed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: &'static str,
    pub blur: f64,
    pub offset: f64,
}

/// Drawing primitives in play-surface (logical) units.
pub trait Painter {
    fn clear(&mut self, area: Rect);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);
    /// Copies `src` (source image pixels) onto `dst`.
    fn image(&mut self, src: Rect, dst: Rect, shadow: Option<Shadow>);
}

pub fn paint_scene<P: Painter>(painter: &mut P, scene: &Scene<'_>) {
    let area = Rect::new(0.0, 0.0, scene.surface.width, scene.surface.height);
    painter.clear(area);
    painter.fill_rect(area, BACKGROUND);
    if scene.show_outline {
        paint_outline(painter, scene);
    }
    for piece in scene.pieces {
        paint_piece(painter, scene, piece);
    }
    if scene.show_hint {
        paint_hint(painter, scene);
    }
}

fn paint_outline<P: Painter>(painter: &mut P, scene: &Scene<'_>) {
    let region = scene.layout.region;
    painter.stroke_rect(region, OUTLINE);
    for i in 1..scene.layout.grid_size {
        let offset = i as f64 * scene.layout.piece_size;
        painter.line(
            Point::new(region.x + offset, region.y),
            Point::new(region.x + offset, region.bottom()),
            OUTLINE,
        );
        painter.line(
            Point::new(region.x, region.y + offset),
            Point::new(region.right(), region.y + offset),
            OUTLINE,
        );
    }
}

fn paint_piece<P: Painter>(painter: &mut P, scene: &Scene<'_>, piece: &Piece) {
    let src = scene.image.cell(piece.row, piece.col, scene.layout.grid_size);
    let shadow = match (piece.is_connected, piece.is_dragging) {
        (true, _) => None,
        (false, true) => Some(DRAGGING_SHADOW),
        (false, false) => Some(RESTING_SHADOW),
    };
    let dst = piece.bounds();
    painter.image(src, dst, shadow);
    let border = if piece.is_connected { CONNECTED_BORDER } else { PIECE_BORDER };
    painter.stroke_rect(dst, border);
}

/// Marks where each loose piece belongs, without moving anything.
fn paint_hint<P: Painter>(painter: &mut P, scene: &Scene<'_>) {
    for piece in scene.pieces.iter().filter(|p| !p.is_connected) {
        let target = piece.target();
        painter.fill_rect(target, HINT_FILL);
        painter.stroke_rect(target, HINT_BORDER);
    }
}

pub struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
    image: &'a HtmlImageElement,
}

impl<'a> CanvasPainter<'a> {
    /// Maps logical units onto the backing store and turns on high quality
    /// resampling.
    pub fn new(
        ctx: &'a CanvasRenderingContext2d,
        image: &'a HtmlImageElement,
        device_pixel_ratio: f64,
    ) -> Self {
        ctx.set_transform(device_pixel_ratio, 0.0, 0.0, device_pixel_ratio, 0.0, 0.0).ok();
        ctx.set_image_smoothing_enabled(true);
        // not exposed by web-sys
        js_sys::Reflect::set(ctx, &JsValue::from_str("imageSmoothingQuality"), &JsValue::from_str("high"))
            .ok();
        Self { ctx, image }
    }

    fn apply_stroke(&self, stroke: Stroke) {
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        let dash = if stroke.dashed {
            js_sys::Array::of2(&JsValue::from_f64(DASH[0]), &JsValue::from_f64(DASH[1]))
        } else {
            js_sys::Array::new()
        };
        self.ctx.set_line_dash(&dash).ok();
    }
}

impl Painter for CanvasPainter<'_> {
    fn clear(&mut self, area: Rect) {
        self.ctx.clear_rect(area.x, area.y, area.width, area.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.ctx.save();
        self.apply_stroke(stroke);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        self.ctx.restore();
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.ctx.save();
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        self.ctx.restore();
    }

    fn image(&mut self, src: Rect, dst: Rect, shadow: Option<Shadow>) {
        self.ctx.save();
        if let Some(s) = shadow {
            self.ctx.set_shadow_color(s.color);
            self.ctx.set_shadow_blur(s.blur);
            self.ctx.set_shadow_offset_x(s.offset);
            self.ctx.set_shadow_offset_y(s.offset);
        }
        self.ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                self.image, src.x, src.y, src.width, src.height, dst.x, dst.y, dst.width,
                dst.height,
            )
            .ok();
        self.ctx.restore();
    }
}
