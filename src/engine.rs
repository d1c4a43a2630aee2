use tracing::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas2d;
use crate::config::BoardConfig;
use crate::consts::MIN_SPEED;
use crate::error::BoardError;
use crate::hit::{HitRadii, hit_test};
use crate::input::{Button, InputState, UiState};
use crate::propagate::{propagate_drag, resize_zone};
use crate::render::{self, DrawCommand, Scene};
use crate::roster::{RosterBinding, Side, TeamNames, side_of};
use crate::scenario::{Entity, EntityId, EntityKind, Fingerprint, Scenario, Step};
use crate::timeline::{PlaybackEvent, Timeline};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Status reported when playback runs off the last step.
pub const FINISHED_STATUS: &str = "Finished";

/// Title shown for a step that has none.
pub const UNTITLED_STEP: &str = "Start";

const CURSOR_EDIT: &str = "crosshair";
const CURSOR_VIEW: &str = "default";

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A committed edit; the host should treat this as the new authoritative step list.
    StepsChanged(Vec<Step>),
    /// Human-readable status line.
    StatusChanged(String),
    /// Playback started or stopped from inside the engine.
    PlayStateChanged(bool),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: BoardConfig,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    timeline: Option<Timeline>,
    fingerprint: Option<Fingerprint>,
    reset_signal: Option<u64>,
    speed: f64,
    roster: RosterBinding,
    teams: TeamNames,
    /// Drawing surface size in pixels.
    pub surface_width: f64,
    pub surface_height: f64,
    /// Surface pixels per CSS pixel of pointer input.
    pub pointer_scale: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::build(BoardConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine around a host-supplied config.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(config: BoardConfig) -> Result<Self, BoardError> {
        config.validate().inspect_err(|e| warn!(%e, "rejected engine config"))?;
        Ok(Self::build(config))
    }

    fn build(config: BoardConfig) -> Self {
        Self {
            viewport: Viewport::default(),
            ui: UiState::default(),
            input: InputState::default(),
            timeline: None,
            fingerprint: None,
            reset_signal: None,
            speed: 1.0,
            roster: RosterBinding::default(),
            teams: TeamNames::default(),
            surface_width: config.pitch_width,
            surface_height: config.pitch_height,
            pointer_scale: 1.0,
            config,
        }
    }

    // --- Data inputs ---

    /// Take a local copy of `scenario`'s steps if it is structurally new.
    ///
    /// A scenario with the same step count and first-step id as the current
    /// copy is ignored so that the host echoing back an edited scenario does
    /// not clobber edits in progress.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyScenario`] if the scenario has no steps.
    pub fn load_scenario(&mut self, scenario: &Scenario) -> Result<Vec<Action>, BoardError> {
        let incoming = Fingerprint::of(&scenario.steps);
        if self.fingerprint == Some(incoming) {
            debug!(scenario_id = scenario.id, "scenario unchanged structurally; keeping local edits");
            return Ok(Vec::new());
        }

        let timeline = Timeline::new(scenario.steps.clone()).inspect_err(|_| {
            warn!(scenario_id = scenario.id, "rejected scenario without steps");
        })?;
        info!(scenario_id = scenario.id, steps = timeline.len(), "loaded scenario");

        let status = step_status(0, &timeline.active_step().title);
        self.timeline = Some(timeline);
        self.fingerprint = Some(incoming);
        self.ui = UiState::default();
        self.input = InputState::Idle;

        Ok(vec![
            Action::PlayStateChanged(false),
            Action::StatusChanged(status),
            Action::SetCursor(CURSOR_VIEW.to_owned()),
            Action::RenderNeeded,
        ])
    }

    /// Observe the host's replay counter. A change restarts from step 0
    /// without re-copying steps; the first value seen is only recorded.
    pub fn set_reset_signal(&mut self, signal: u64) -> Vec<Action> {
        let previous = self.reset_signal.replace(signal);
        if previous.is_none() || previous == Some(signal) {
            return Vec::new();
        }
        let Some(timeline) = self.timeline.as_mut() else {
            return Vec::new();
        };
        timeline.rewind();
        info!(signal, "replay reset");
        vec![Action::StatusChanged(step_status(0, &timeline.active_step().title)), Action::RenderNeeded]
    }

    /// Follow the host's play/stop state. Starting always plays from step 0.
    pub fn set_playing(&mut self, playing: bool) -> Vec<Action> {
        if self.timeline.as_ref().is_none_or(|t| t.is_playing() == playing) {
            return Vec::new();
        }
        let mut actions: Vec<Action> = Vec::new();
        if playing {
            actions.extend(self.finish_drag());
            self.input = InputState::Idle;
        }
        let Some(timeline) = self.timeline.as_mut() else {
            return actions;
        };
        if playing {
            timeline.play();
            info!(steps = timeline.len(), speed = self.speed, "playback started");
        } else {
            timeline.stop();
            info!(step = timeline.play_index(), "playback stopped");
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Flip playback, reporting the new state to the host.
    pub fn toggle_playback(&mut self) -> Vec<Action> {
        let playing = !self.is_playing();
        let mut actions = self.set_playing(playing);
        if !actions.is_empty() {
            actions.insert(0, Action::PlayStateChanged(playing));
        }
        actions
    }

    /// Set the playback rate multiplier. Non-finite or non-positive values fall back to a small positive rate.
    pub fn set_speed(&mut self, speed: f64) {
        if !speed.is_finite() || speed <= 0.0 {
            warn!(speed, "invalid playback speed; clamping");
            self.speed = MIN_SPEED;
            return;
        }
        self.speed = speed;
    }

    pub fn set_roster(&mut self, roster: RosterBinding) -> Vec<Action> {
        self.roster = roster;
        vec![Action::RenderNeeded]
    }

    pub fn set_team_names(&mut self, teams: TeamNames) -> Vec<Action> {
        self.teams = teams;
        vec![Action::RenderNeeded]
    }

    // --- Modes and timeline navigation ---

    pub fn set_editing(&mut self, editing: bool) -> Vec<Action> {
        if self.ui.editing == editing {
            return Vec::new();
        }
        self.ui.editing = editing;
        let mut actions: Vec<Action> = self.finish_drag().into_iter().collect();
        actions.push(Action::SetCursor(self.mode_cursor().to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn toggle_editing(&mut self) -> Vec<Action> {
        self.set_editing(!self.ui.editing)
    }

    /// Make step `index` the active step, stopping playback.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StepOutOfRange`] for a bad index, or
    /// [`BoardError::EmptyScenario`] if nothing is loaded.
    pub fn select_step(&mut self, index: usize) -> Result<Vec<Action>, BoardError> {
        let timeline = self.timeline.as_mut().ok_or(BoardError::EmptyScenario)?;
        let step = timeline.select(index).inspect_err(|e| warn!(%e, "step selection rejected"))?;
        let status = step_status(index, &step.title);
        let mut actions = vec![Action::PlayStateChanged(false)];
        actions.extend(self.finish_drag());
        actions.push(Action::StatusChanged(status));
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Append a copy of the last step (edit mode only) and commit.
    pub fn insert_step(&mut self) -> Vec<Action> {
        if !self.ui.editing {
            return Vec::new();
        }
        let Some(timeline) = self.timeline.as_mut() else {
            return Vec::new();
        };
        let id = timeline.insert_step().id;
        debug!(step_id = id, steps = timeline.len(), "inserted step");
        vec![Action::StepsChanged(timeline.steps().to_vec()), Action::RenderNeeded]
    }

    /// Grow or shrink the selected target zone on the active step only, and commit.
    pub fn resize_selected(&mut self, delta: f64) -> Vec<Action> {
        if !self.ui.editing {
            return Vec::new();
        }
        let (Some(timeline), Some(id)) = (self.timeline.as_mut(), self.ui.selected_id.as_deref()) else {
            return Vec::new();
        };
        let Some(radius) = resize_zone(
            timeline.active_step_mut(),
            id,
            delta,
            self.config.default_zone_radius,
            self.config.min_zone_radius,
        ) else {
            return Vec::new();
        };
        debug!(id, radius, step = timeline.active_index(), "resized zone");
        vec![Action::StepsChanged(timeline.steps().to_vec()), Action::RenderNeeded]
    }

    // --- Viewport ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.viewport.zoom_by(self.config.zoom_step, self.config.min_scale, self.config.max_scale);
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.viewport.zoom_by(-self.config.zoom_step, self.config.min_scale, self.config.max_scale);
        vec![Action::RenderNeeded]
    }

    pub fn reset_zoom(&mut self) -> Vec<Action> {
        self.viewport.reset();
        vec![Action::RenderNeeded]
    }

    /// Select entity `id` and centre the view on it.
    pub fn focus_entity(&mut self, id: &str) -> Vec<Action> {
        let Some(timeline) = self.timeline.as_ref() else {
            return Vec::new();
        };
        self.ui.selected_id = Some(id.to_owned());
        if let Some(ent) = timeline.active_step().entity(id) {
            let anchor = Point::new(self.surface_width * 0.5, self.surface_height * 0.5);
            self.viewport.focus(ent.position(), anchor);
        }
        vec![Action::RenderNeeded]
    }

    /// Record the drawing surface size in pixels.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface_width = width;
        self.surface_height = height;
    }

    /// Record the on-screen (CSS) width of the surface so pointer input can be scaled.
    pub fn set_display_width(&mut self, css_width: f64) {
        if css_width > 0.0 && css_width.is_finite() {
            self.pointer_scale = self.surface_width / css_width;
        }
    }

    // --- Input events ---

    /// Begin a gesture. `css_pt` is the pointer position relative to the surface's top-left, in CSS pixels.
    pub fn on_pointer_down(&mut self, css_pt: Point, button: Button) -> Vec<Action> {
        if button == Button::Secondary {
            return Vec::new();
        }
        let screen = self.to_surface(css_pt);
        let mut actions = Vec::new();

        if let Some(id) = self.grab(screen, button) {
            if self.ui.selected_id.as_deref() != Some(id.as_str()) {
                self.ui.selected_id = Some(id.clone());
                actions.push(Action::RenderNeeded);
            }
            self.input = InputState::DraggingEntity { id, last_screen: screen, moved: false };
        } else {
            self.input = InputState::Panning { last_screen: screen };
        }

        if let Some(cursor) = self.input.cursor() {
            actions.push(Action::SetCursor(cursor.to_owned()));
        }
        actions
    }

    pub fn on_pointer_move(&mut self, css_pt: Point) -> Vec<Action> {
        let screen = self.to_surface(css_pt);
        let Some(last) = self.input.last_screen() else {
            return Vec::new();
        };
        let delta_px = Point::new(screen.x - last.x, screen.y - last.y);

        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                *last_screen = screen;
                self.viewport.pan(delta_px);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingEntity { id, last_screen, moved } => {
                *last_screen = screen;
                let Some(timeline) = self.timeline.as_mut() else {
                    return Vec::new();
                };
                let delta = self.viewport.screen_delta_to_world(delta_px);
                let from = timeline.active_index();
                propagate_drag(timeline.steps_mut(), from, id, delta);
                *moved = true;
                vec![Action::RenderNeeded]
            }
        }
    }

    /// End the current gesture. A finished entity drag commits the step list.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let had_cursor = self.input.cursor().is_some();
        let mut actions: Vec<Action> = self.finish_drag().into_iter().collect();
        self.input = InputState::Idle;
        if had_cursor {
            actions.push(Action::SetCursor(self.mode_cursor().to_owned()));
        }
        actions
    }

    /// Pointer left the surface; same as releasing it.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Frame ---

    /// Advance playback by one frame interval.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<Action> {
        let Some(timeline) = self.timeline.as_mut() else {
            return Vec::new();
        };
        if !timeline.is_playing() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        for event in timeline.advance(dt_ms, self.speed, self.config.min_transition_ms) {
            match event {
                PlaybackEvent::StepReached { index, title } => {
                    debug!(index, %title, "playback reached step");
                    actions.push(Action::StatusChanged(title));
                }
                PlaybackEvent::Finished => {
                    info!(step = timeline.play_index(), "playback finished");
                    actions.push(Action::PlayStateChanged(false));
                    actions.push(Action::StatusChanged(FINISHED_STATUS.to_owned()));
                }
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Build this frame's display list.
    #[must_use]
    pub fn display_list(&self) -> Vec<DrawCommand> {
        let empty: &[Entity] = &[];
        let Some(timeline) = self.timeline.as_ref() else {
            return render::draw(&self.scene(empty, None, &[]));
        };

        let entities = timeline.current_entities();
        let overlays = self.ui.editing && !timeline.is_playing();
        let ghost = timeline
            .previous_step()
            .filter(|_| overlays)
            .map(|s| s.entities.as_slice());
        let trail = match self.ui.selected_id.as_deref() {
            Some(id) if overlays => timeline.trail(id),
            _ => Vec::new(),
        };
        render::draw(&self.scene(&entities, ghost, &trail))
    }

    fn scene<'a>(&'a self, entities: &'a [Entity], ghost: Option<&'a [Entity]>, trail: &'a [Point]) -> Scene<'a> {
        Scene {
            config: &self.config,
            surface_width: self.surface_width,
            surface_height: self.surface_height,
            viewport: self.viewport,
            entities,
            ghost,
            trail,
            ui: &self.ui,
            roster: &self.roster,
            teams: &self.teams,
        }
    }

    // --- Queries ---

    /// The currently selected entity id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The local (possibly edited) step list.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        self.timeline.as_ref().map_or(&[], Timeline::steps)
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.timeline.as_ref().is_some_and(Timeline::is_playing)
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.ui.editing
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether the resize control applies: edit mode with a target zone selected.
    #[must_use]
    pub fn can_resize_selected(&self) -> bool {
        self.ui.editing
            && self
                .selected_entity()
                .is_some_and(|e| e.kind == EntityKind::TargetZone)
    }

    /// The selected entity as it appears on the active step.
    #[must_use]
    pub fn selected_entity(&self) -> Option<&Entity> {
        let id = self.ui.selected_id.as_deref()?;
        self.timeline.as_ref()?.active_step().entity(id)
    }

    /// Active-step entities listed under `side`; `None` lists the ball and zones.
    /// A goalkeeper with no side marker in its id is not listed at all.
    #[must_use]
    pub fn entities_on_side(&self, side: Option<Side>) -> Vec<&Entity> {
        let Some(timeline) = self.timeline.as_ref() else {
            return Vec::new();
        };
        timeline
            .active_step()
            .entities
            .iter()
            .filter(|e| side_of(e) == side && (side.is_some() || !e.kind.is_player()))
            .collect()
    }

    // --- Helpers ---

    fn to_surface(&self, css_pt: Point) -> Point {
        Point::new(css_pt.x * self.pointer_scale, css_pt.y * self.pointer_scale)
    }

    /// End an entity drag in progress. Returns the commit if it moved anything.
    fn finish_drag(&mut self) -> Option<Action> {
        if !matches!(self.input, InputState::DraggingEntity { .. }) {
            return None;
        }
        let InputState::DraggingEntity { id, moved: true, .. } = std::mem::take(&mut self.input) else {
            return None;
        };
        let timeline = self.timeline.as_ref()?;
        debug!(%id, step = timeline.active_index(), "drag committed");
        Some(Action::StepsChanged(timeline.steps().to_vec()))
    }

    fn mode_cursor(&self) -> &'static str {
        if self.ui.editing { CURSOR_EDIT } else { CURSOR_VIEW }
    }

    /// Entity to drag for a pointer-down at `screen`, if any.
    fn grab(&self, screen: Point, button: Button) -> Option<EntityId> {
        if button != Button::Primary || !self.ui.editing {
            return None;
        }
        let timeline = self.timeline.as_ref().filter(|t| !t.is_playing())?;
        let radii = HitRadii { regrab: self.config.regrab_radius, default: self.config.default_hit_radius };
        let world = self.viewport.to_world(screen);
        let hit = hit_test(world, &timeline.active_step().entities, self.ui.selected_id.as_deref(), radii)?;
        Some(hit.id().to_owned())
    }
}

fn step_status(index: usize, title: &str) -> String {
    let title = if title.is_empty() { UNTITLED_STEP } else { title };
    format!("Step {}: {title}", index + 1)
}

/// The full board engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`, sized to its backing store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] for a bad config, or
    /// [`BoardError::Js`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: BoardConfig) -> Result<Self, BoardError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| BoardError::Js("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BoardError::Js("2d context has unexpected type".into()))?;
        let mut core = EngineCore::with_config(config)?;
        core.set_surface_size(f64::from(canvas.width()), f64::from(canvas.height()));
        core.set_display_width(f64::from(canvas.client_width()));
        Ok(Self { canvas, ctx, core })
    }

    /// Re-read the canvas size after a layout change.
    pub fn sync_size(&mut self) {
        self.core
            .set_surface_size(f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.core.set_display_width(f64::from(self.canvas.client_width()));
    }

    // --- Delegated inputs ---

    /// # Errors
    ///
    /// See [`EngineCore::load_scenario`].
    pub fn load_scenario(&mut self, scenario: &Scenario) -> Result<Vec<Action>, BoardError> {
        self.core.load_scenario(scenario)
    }

    pub fn on_pointer_down(&mut self, css_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(css_pt, button)
    }

    pub fn on_pointer_move(&mut self, css_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(css_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Js`] if a canvas call fails.
    pub fn render(&self) -> Result<(), BoardError> {
        canvas2d::paint(&self.ctx, &self.core.display_list())?;
        Ok(())
    }

    /// One animation frame: advance playback by `dt_ms`, then draw.
    pub fn frame(&mut self, dt_ms: f64) -> Vec<Action> {
        let actions = self.core.tick(dt_ms);
        if let Err(e) = self.render() {
            error!(%e, "render failed");
        }
        actions
    }
}
