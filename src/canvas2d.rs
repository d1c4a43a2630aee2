//! Browser backend: replays a display list onto a 2D canvas context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`;
//! the caller ([`crate::engine::Engine::render`]) converts the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::render::{DrawCommand, Paint, PathSegment, Shape, Stroke};

/// Paint `commands` in order.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand]) -> Result<(), JsValue> {
    for cmd in commands {
        match cmd {
            DrawCommand::Clear { width, height } => {
                ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
                ctx.clear_rect(0.0, 0.0, *width, *height);
            }
            DrawCommand::PushTransform(vp) => {
                ctx.save();
                ctx.translate(vp.offset_x, vp.offset_y)?;
                ctx.scale(vp.scale, vp.scale)?;
            }
            DrawCommand::PushAlpha(alpha) => {
                ctx.save();
                ctx.set_global_alpha(*alpha);
            }
            DrawCommand::Pop => ctx.restore(),
            DrawCommand::Fill { shape, paint } => fill(ctx, shape, *paint)?,
            DrawCommand::Stroke { shape, stroke } => stroke_shape(ctx, shape, *stroke)?,
            DrawCommand::Text { text, at, font, align, color } => {
                ctx.set_font(font);
                ctx.set_text_align(align.as_css());
                ctx.set_fill_style_str(color);
                ctx.fill_text(text, at.x, at.y)?;
            }
        }
    }
    Ok(())
}

fn fill(ctx: &CanvasRenderingContext2d, shape: &Shape, paint: Paint) -> Result<(), JsValue> {
    match paint {
        Paint::Solid(color) => ctx.set_fill_style_str(color),
        Paint::VerticalGradient { top, bottom, y0, y1 } => {
            let gradient = ctx.create_linear_gradient(0.0, y0, 0.0, y1);
            gradient.add_color_stop(0.0, top)?;
            gradient.add_color_stop(1.0, bottom)?;
            ctx.set_fill_style_canvas_gradient(&gradient);
        }
    }

    if let Shape::Rect { x, y, width, height } = shape {
        ctx.fill_rect(*x, *y, *width, *height);
        return Ok(());
    }
    trace(ctx, shape)?;
    ctx.fill();
    Ok(())
}

fn stroke_shape(ctx: &CanvasRenderingContext2d, shape: &Shape, stroke: Stroke) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(stroke.color);
    ctx.set_line_width(stroke.width);
    let dash = js_sys::Array::new();
    if let Some(len) = stroke.dash {
        dash.push(&len.into());
        dash.push(&len.into());
    }
    ctx.set_line_dash(&dash)?;

    if let Shape::Rect { x, y, width, height } = shape {
        ctx.stroke_rect(*x, *y, *width, *height);
    } else {
        trace(ctx, shape)?;
        ctx.stroke();
    }

    if stroke.dash.is_some() {
        ctx.set_line_dash(&js_sys::Array::new())?;
    }
    Ok(())
}

/// Build the current path for a non-rect shape.
fn trace(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    ctx.begin_path();
    match shape {
        Shape::Rect { x, y, width, height } => ctx.rect(*x, *y, *width, *height),
        Shape::Circle { center, radius } => ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI)?,
        Shape::Ellipse { center, rx, ry } => ctx.ellipse(center.x, center.y, *rx, *ry, 0.0, 0.0, 2.0 * PI)?,
        Shape::Path(segments) => {
            for seg in segments {
                match *seg {
                    PathSegment::MoveTo(p) => ctx.move_to(p.x, p.y),
                    PathSegment::LineTo(p) => ctx.line_to(p.x, p.y),
                    PathSegment::Arc { center, radius, start, end } => {
                        ctx.arc(center.x, center.y, radius, start, end)?;
                    }
                }
            }
        }
    }
    Ok(())
}
