//! Shared numeric constants for the tactics board.
//!
//! These are the defaults behind [`crate::config::BoardConfig`]; the engine
//! reads tunables from the config, never from here directly.

// ── Pitch ───────────────────────────────────────────────────────

/// Logical pitch width in world units.
pub const PITCH_WIDTH: f64 = 400.0;

/// Logical pitch height in world units.
pub const PITCH_HEIGHT: f64 = 300.0;

/// Spacing of the edit-mode coordinate grid, in world units.
pub const GRID_SPACING: f64 = 40.0;

// ── Viewport ────────────────────────────────────────────────────

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;

/// Scale added or removed by one zoom button press.
pub const ZOOM_STEP: f64 = 0.2;

// ── Playback ────────────────────────────────────────────────────

/// Nominal animation-frame interval in milliseconds.
pub const FRAME_INTERVAL_MS: f64 = 16.0;

/// Longest frame interval fed to playback; longer gaps (tab in background) are capped.
pub const MAX_FRAME_INTERVAL_MS: f64 = 250.0;

/// Effective lower bound on a step's transition duration.
pub const MIN_TRANSITION_MS: f64 = 500.0;

/// Playback speeds at or below zero are replaced with this.
pub const MIN_SPEED: f64 = 0.05;

// ── Hit-testing ─────────────────────────────────────────────────

/// Distance within which the selected entity is re-grabbed before any other hit test.
pub const REGRAB_RADIUS: f64 = 40.0;

/// Hit radius for entities without an explicit `radius`.
pub const DEFAULT_HIT_RADIUS: f64 = 20.0;

// ── Zones ───────────────────────────────────────────────────────

pub const DEFAULT_ZONE_RADIUS: f64 = 20.0;
pub const MIN_ZONE_RADIUS: f64 = 10.0;

// ── Rendering ───────────────────────────────────────────────────

/// Opacity of the previous-step ghost pass in edit mode.
pub const GHOST_ALPHA: f64 = 0.4;

/// Radius of a player token in world units.
pub const TOKEN_RADIUS: f64 = 8.0;

/// Radius of the ball in world units.
pub const BALL_RADIUS: f64 = 6.0;
