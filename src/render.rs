//! Rendering: turns a read-only [`Scene`] into a display list.
//!
//! [`draw`] is a pure function. It never touches the browser, so every
//! visual rule (ghost pass, trail, connectors, labels) can be tested natively
//! by inspecting the returned [`DrawCommand`]s. [`crate::canvas2d`] replays
//! the list onto a real 2D context.
//!
//! Coordinates inside the `PushTransform` / `Pop` pair are world units.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::BoardConfig;
use crate::consts::{BALL_RADIUS, TOKEN_RADIUS};
use crate::input::UiState;
use crate::roster::{RosterBinding, TARGET_LABEL, TeamNames};
use crate::scenario::{Entity, EntityKind};
use crate::viewport::{Point, Viewport};

/// A CSS color string.
pub type Color = &'static str;

const PITCH_TOP: Color = "#15803d";
const PITCH_BOTTOM: Color = "#166534";
const LINE_COLOR: Color = "rgba(255,255,255,0.7)";
const GRID_COLOR: Color = "rgba(255,255,255,0.05)";
const WATERMARK_COLOR: Color = "rgba(255,255,255,0.15)";
const SELECT_COLOR: Color = "#FACC15";
const SELECT_HALO_COLOR: Color = "rgba(250, 204, 21, 0.3)";
const TRAIL_COLOR: Color = "rgba(250, 204, 21, 0.4)";
const TRAIL_MARKER_COLOR: Color = "rgba(250, 204, 21, 0.6)";
const LINK_COLOR: Color = "rgba(255, 255, 255, 0.3)";
const LINK_MARKER_COLOR: Color = "rgba(0,0,0,0.5)";
const SHADOW_COLOR: Color = "rgba(0,0,0,0.3)";
const ZONE_FILL: Color = "rgba(255, 0, 0, 0.15)";
const ZONE_FILL_SELECTED: Color = "rgba(239, 68, 68, 0.3)";
const ZONE_STROKE: Color = "rgba(255, 0, 0, 0.5)";
const SUBTITLE_COLOR: Color = "rgba(255,255,255,0.7)";
const WHITE: Color = "#fff";
const BLACK: Color = "#000";

/// Goal mouth width and the goal-area arc radius, in world units.
const GOAL_WIDTH: f64 = 60.0;
const GOAL_DEPTH: f64 = 10.0;
const GOAL_AREA_RADIUS: f64 = 80.0;
const CENTER_CIRCLE_RADIUS: f64 = 40.0;
const CORNER_ARC_RADIUS: f64 = 15.0;

/// Ring radius used for selection when an entity has no `radius`.
const SELECT_BASE_RADIUS: f64 = 10.0;
const LINK_DASH: f64 = 5.0;
const TRAIL_DASH: f64 = 4.0;
const TRAIL_MARKER_HALF: f64 = 2.0;

/// Fill paint for a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient from `top` at `y0` to `bottom` at `y1`.
    VerticalGradient { top: Color, bottom: Color, y0: f64, y1: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Equal dash and gap length; `None` for a solid line.
    pub dash: Option<f64>,
}

impl Stroke {
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    #[must_use]
    pub fn dashed(color: Color, width: f64, dash: f64) -> Self {
        Self { color, width, dash: Some(dash) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Clockwise arc; angles in radians.
    Arc { center: Point, radius: f64, start: f64, end: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, rx: f64, ry: f64 },
    Path(Vec<PathSegment>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Reset the transform and clear the whole surface (surface pixels).
    Clear { width: f64, height: f64 },
    /// Save state, then map world units to surface pixels.
    PushTransform(Viewport),
    /// Save state, then draw subsequent commands at this opacity.
    PushAlpha(f64),
    /// Restore the state saved by the matching push.
    Pop,
    Fill { shape: Shape, paint: Paint },
    Stroke { shape: Shape, stroke: Stroke },
    Text { text: String, at: Point, font: &'static str, align: TextAlign, color: Color },
}

/// Everything the renderer reads for one frame.
pub struct Scene<'a> {
    pub config: &'a BoardConfig,
    /// Drawing surface size in pixels.
    pub surface_width: f64,
    pub surface_height: f64,
    pub viewport: Viewport,
    /// Entities for this frame (a step snapshot or an interpolation).
    pub entities: &'a [Entity],
    /// Previous step, drawn faded beneath `entities`.
    pub ghost: Option<&'a [Entity]>,
    /// Path of the selected entity through every step.
    pub trail: &'a [Point],
    pub ui: &'a UiState,
    pub roster: &'a RosterBinding,
    pub teams: &'a TeamNames,
}

/// Build the display list for one frame.
#[must_use]
pub fn draw(scene: &Scene<'_>) -> Vec<DrawCommand> {
    let mut out = Vec::new();

    // Layer 1: clear and enter world space.
    out.push(DrawCommand::Clear { width: scene.surface_width, height: scene.surface_height });
    out.push(DrawCommand::PushTransform(scene.viewport));

    // Layer 2: pitch.
    draw_pitch(&mut out, scene);

    // Layer 3: edit-mode overlays beneath the live tokens.
    if let Some(ghost) = scene.ghost {
        out.push(DrawCommand::PushAlpha(scene.config.ghost_alpha));
        draw_entities(&mut out, scene, ghost, true);
        out.push(DrawCommand::Pop);
    }
    draw_trail(&mut out, scene.trail);

    // Layer 4: tokens in list order.
    draw_entities(&mut out, scene, scene.entities, false);

    out.push(DrawCommand::Pop);
    out
}

// =============================================================
// Pitch
// =============================================================

fn draw_pitch(out: &mut Vec<DrawCommand>, scene: &Scene<'_>) {
    let w = scene.config.pitch_width;
    let h = scene.config.pitch_height;
    let cx = w * 0.5;

    out.push(DrawCommand::Fill {
        shape: Shape::Rect { x: 0.0, y: 0.0, width: w, height: h },
        paint: Paint::VerticalGradient { top: PITCH_TOP, bottom: PITCH_BOTTOM, y0: 0.0, y1: h },
    });

    if scene.ui.editing {
        out.push(DrawCommand::Stroke { shape: grid_path(w, h, scene.config.grid_spacing), stroke: Stroke::solid(GRID_COLOR, 1.0) });
    }

    let line = Stroke::solid(LINE_COLOR, 2.0);

    // Boundary.
    out.push(DrawCommand::Stroke { shape: Shape::Rect { x: 0.0, y: 0.0, width: w, height: h }, stroke: line });

    // Goal.
    out.push(DrawCommand::Stroke {
        shape: Shape::Rect { x: cx - GOAL_WIDTH * 0.5, y: -GOAL_DEPTH * 0.5, width: GOAL_WIDTH, height: GOAL_DEPTH },
        stroke: line,
    });

    // Goal area: two quarter arcs joined by a straight edge.
    let left = Point::new(cx - GOAL_WIDTH * 0.5, 0.0);
    let right = Point::new(cx + GOAL_WIDTH * 0.5, 0.0);
    out.push(DrawCommand::Stroke {
        shape: Shape::Path(vec![
            PathSegment::Arc { center: left, radius: GOAL_AREA_RADIUS, start: 0.0, end: FRAC_PI_2 },
            PathSegment::MoveTo(Point::new(left.x, GOAL_AREA_RADIUS)),
            PathSegment::LineTo(Point::new(right.x, GOAL_AREA_RADIUS)),
            PathSegment::Arc { center: right, radius: GOAL_AREA_RADIUS, start: FRAC_PI_2, end: PI },
        ]),
        stroke: line,
    });

    // Centre circle, cut by the halfway line at the bottom edge.
    out.push(DrawCommand::Stroke {
        shape: Shape::Path(vec![PathSegment::Arc {
            center: Point::new(cx, h),
            radius: CENTER_CIRCLE_RADIUS,
            start: PI,
            end: 2.0 * PI,
        }]),
        stroke: line,
    });

    // Corner arcs.
    for (center, start) in [(Point::new(0.0, 0.0), 0.0), (Point::new(w, 0.0), FRAC_PI_2)] {
        out.push(DrawCommand::Stroke {
            shape: Shape::Path(vec![PathSegment::Arc { center, radius: CORNER_ARC_RADIUS, start, end: start + FRAC_PI_2 }]),
            stroke: line,
        });
    }

    if !scene.ui.editing {
        draw_watermarks(out, scene.teams, w, h);
    }
}

/// Grid lines every `spacing` units; empty unless `spacing` is positive and finite.
fn grid_path(w: f64, h: f64, spacing: f64) -> Shape {
    let mut segs = Vec::new();
    if !(spacing.is_finite() && spacing > 0.0) {
        return Shape::Path(segs);
    }
    let mut x = 0.0;
    while x < w {
        segs.push(PathSegment::MoveTo(Point::new(x, 0.0)));
        segs.push(PathSegment::LineTo(Point::new(x, h)));
        x += spacing;
    }
    let mut y = 0.0;
    while y < h {
        segs.push(PathSegment::MoveTo(Point::new(0.0, y)));
        segs.push(PathSegment::LineTo(Point::new(w, y)));
        y += spacing;
    }
    Shape::Path(segs)
}

fn draw_watermarks(out: &mut Vec<DrawCommand>, teams: &TeamNames, w: f64, h: f64) {
    let baseline = h - 20.0;
    for (name, x, align) in [(&teams.attack, 10.0, TextAlign::Left), (&teams.defend, w - 10.0, TextAlign::Right)] {
        if name.is_empty() {
            continue;
        }
        out.push(DrawCommand::Text {
            text: name.to_uppercase(),
            at: Point::new(x, baseline),
            font: "bold 20px sans-serif",
            align,
            color: WATERMARK_COLOR,
        });
    }
}

// =============================================================
// Trail
// =============================================================

fn draw_trail(out: &mut Vec<DrawCommand>, trail: &[Point]) {
    if trail.is_empty() {
        return;
    }
    for p in trail {
        out.push(DrawCommand::Fill {
            shape: Shape::Rect {
                x: p.x - TRAIL_MARKER_HALF,
                y: p.y - TRAIL_MARKER_HALF,
                width: TRAIL_MARKER_HALF * 2.0,
                height: TRAIL_MARKER_HALF * 2.0,
            },
            paint: Paint::Solid(TRAIL_MARKER_COLOR),
        });
    }
    let segs = trail
        .iter()
        .enumerate()
        .map(|(i, p)| if i == 0 { PathSegment::MoveTo(*p) } else { PathSegment::LineTo(*p) })
        .collect();
    out.push(DrawCommand::Stroke { shape: Shape::Path(segs), stroke: Stroke::dashed(TRAIL_COLOR, 1.0, TRAIL_DASH) });
}

// =============================================================
// Entities
// =============================================================

fn draw_entities(out: &mut Vec<DrawCommand>, scene: &Scene<'_>, entities: &[Entity], preview: bool) {
    for ent in entities {
        if scene.ui.editing && !preview {
            draw_link(out, ent, entities);
        }

        let selected = scene.ui.selected_id.as_deref() == Some(ent.id.as_str());
        if selected && !preview {
            draw_selection(out, ent, scene.ui.editing);
        }

        match ent.kind {
            EntityKind::Ball => draw_ball(out, ent),
            EntityKind::TargetZone => draw_zone(out, ent, selected, scene.config.default_zone_radius),
            EntityKind::Attacker | EntityKind::Defender | EntityKind::Goalkeeper => {
                draw_token(out, ent, scene.roster, preview);
            }
        }
    }
}

/// Dashed connector from a follower to the entity it is attached to.
fn draw_link(out: &mut Vec<DrawCommand>, ent: &Entity, entities: &[Entity]) {
    let Some(leader_id) = ent.attached_to.as_deref() else {
        return;
    };
    let Some(leader) = entities.iter().find(|e| e.id == leader_id) else {
        return;
    };
    let from = ent.position();
    let to = leader.position();
    out.push(DrawCommand::Stroke {
        shape: Shape::Path(vec![PathSegment::MoveTo(from), PathSegment::LineTo(to)]),
        stroke: Stroke::dashed(LINK_COLOR, 1.0, LINK_DASH),
    });
    out.push(DrawCommand::Fill {
        shape: Shape::Circle { center: from.midpoint(to), radius: 2.0 },
        paint: Paint::Solid(LINK_MARKER_COLOR),
    });
}

fn draw_selection(out: &mut Vec<DrawCommand>, ent: &Entity, editing: bool) {
    let base = ent.radius.unwrap_or(SELECT_BASE_RADIUS);
    out.push(DrawCommand::Stroke {
        shape: Shape::Circle { center: ent.position(), radius: base + 8.0 },
        stroke: Stroke::solid(SELECT_COLOR, 2.0),
    });
    if editing {
        out.push(DrawCommand::Stroke {
            shape: Shape::Circle { center: ent.position(), radius: base + 12.0 },
            stroke: Stroke::solid(SELECT_HALO_COLOR, 1.0),
        });
    }
}

fn draw_ball(out: &mut Vec<DrawCommand>, ent: &Entity) {
    let center = ent.position();
    out.push(DrawCommand::Fill { shape: Shape::Circle { center, radius: BALL_RADIUS }, paint: Paint::Solid(WHITE) });
    out.push(DrawCommand::Stroke { shape: Shape::Circle { center, radius: BALL_RADIUS }, stroke: Stroke::solid(BLACK, 1.0) });
    out.push(DrawCommand::Fill { shape: Shape::Circle { center, radius: 2.0 }, paint: Paint::Solid(BLACK) });
}

fn draw_zone(out: &mut Vec<DrawCommand>, ent: &Entity, selected: bool, default_radius: f64) {
    let center = ent.position();
    let radius = ent.radius.unwrap_or(default_radius);
    let fill = if selected { ZONE_FILL_SELECTED } else { ZONE_FILL };
    out.push(DrawCommand::Fill { shape: Shape::Circle { center, radius }, paint: Paint::Solid(fill) });
    out.push(DrawCommand::Stroke {
        shape: Shape::Circle { center, radius },
        stroke: Stroke::dashed(ZONE_STROKE, 1.0, LINK_DASH),
    });
    out.push(DrawCommand::Text {
        text: TARGET_LABEL.to_owned(),
        at: Point::new(center.x, center.y + 4.0),
        font: "10px sans-serif",
        align: TextAlign::Center,
        color: WHITE,
    });
}

fn draw_token(out: &mut Vec<DrawCommand>, ent: &Entity, roster: &RosterBinding, preview: bool) {
    let center = ent.position();
    out.push(DrawCommand::Fill {
        shape: Shape::Ellipse { center: Point::new(center.x, center.y + 6.0), rx: 7.0, ry: 2.5 },
        paint: Paint::Solid(SHADOW_COLOR),
    });
    out.push(DrawCommand::Fill {
        shape: Shape::Circle { center, radius: TOKEN_RADIUS },
        paint: Paint::Solid(token_color(ent.kind)),
    });
    out.push(DrawCommand::Stroke {
        shape: Shape::Circle { center, radius: TOKEN_RADIUS },
        stroke: Stroke::solid(WHITE, 1.5),
    });

    let label = roster.label_for(ent);
    out.push(DrawCommand::Text {
        text: label.name,
        at: Point::new(center.x, center.y - 12.0),
        font: "bold 10px sans-serif",
        align: TextAlign::Center,
        color: WHITE,
    });
    if !preview && !label.subtitle.is_empty() {
        out.push(DrawCommand::Text {
            text: label.subtitle,
            at: Point::new(center.x, center.y + 20.0),
            font: "8px sans-serif",
            align: TextAlign::Center,
            color: SUBTITLE_COLOR,
        });
    }
}

/// Body color of a player token.
#[must_use]
pub fn token_color(kind: EntityKind) -> Color {
    match kind {
        EntityKind::Defender => "#EF4444",
        EntityKind::Goalkeeper => "#10B981",
        EntityKind::Attacker | EntityKind::Ball | EntityKind::TargetZone => "#3B82F6",
    }
}
