//! Timeline: the editable step list plus the edit/playback state machine.
//!
//! In edit mode `active_index` is authoritative and the board shows that step
//! verbatim. In play mode the board shows an interpolation between
//! `play_index` and its successor at `progress ∈ [0, 1)`.
//!
//! Playback always starts from step 0, regardless of which step is being
//! edited. When the last step is reached playback stops on its own and the
//! active step follows it, so the board rests on the final position.

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

use std::borrow::Cow;

use crate::consts::MIN_SPEED;
use crate::error::BoardError;
use crate::interpolate::interpolate;
use crate::scenario::{Entity, Step, StepId};
use crate::viewport::Point;

/// Title given to steps created by [`Timeline::insert_step`].
pub const NEW_STEP_TITLE: &str = "New";

/// Something the host should hear about after a playback tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Playback moved onto step `index`.
    StepReached { index: usize, title: String },
    /// Playback ran out of steps and stopped.
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    steps: Vec<Step>,
    active_index: usize,
    playing: bool,
    play_index: usize,
    progress: f64,
}

impl Timeline {
    /// Build a timeline over a local copy of `steps`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyScenario`] if `steps` is empty.
    pub fn new(steps: Vec<Step>) -> Result<Self, BoardError> {
        if steps.is_empty() {
            return Err(BoardError::EmptyScenario);
        }
        Ok(Self { steps, active_index: 0, playing: false, play_index: 0, progress: 0.0 })
    }

    // --- Queries ---

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; a timeline holds at least one step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[must_use]
    pub fn active_step(&self) -> &Step {
        &self.steps[self.active_index]
    }

    /// The step before the active one, drawn as the edit-mode ghost.
    #[must_use]
    pub fn previous_step(&self) -> Option<&Step> {
        self.active_index.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn play_index(&self) -> usize {
        self.play_index
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Entities as they should appear this frame.
    #[must_use]
    pub fn current_entities(&self) -> Cow<'_, [Entity]> {
        if !self.playing {
            return Cow::Borrowed(&self.active_step().entities);
        }
        let from = &self.steps[self.play_index];
        match self.steps.get(self.play_index + 1) {
            Some(to) => Cow::Owned(interpolate(from, to, self.progress)),
            None => Cow::Borrowed(&from.entities),
        }
    }

    /// Position of entity `id` in every step that contains it, in step order.
    #[must_use]
    pub fn trail(&self, id: &str) -> Vec<Point> {
        self.steps
            .iter()
            .filter_map(|s| s.entity(id).map(Entity::position))
            .collect()
    }

    // --- Edit-mode navigation ---

    /// Make step `index` active, stopping any playback.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StepOutOfRange`] if `index` is past the end.
    pub fn select(&mut self, index: usize) -> Result<&Step, BoardError> {
        if index >= self.steps.len() {
            return Err(BoardError::StepOutOfRange { index, len: self.steps.len() });
        }
        self.playing = false;
        self.active_index = index;
        self.play_index = index;
        self.progress = 0.0;
        Ok(&self.steps[index])
    }

    /// Return to step 0 without touching the step data.
    pub fn rewind(&mut self) {
        self.active_index = 0;
        self.play_index = 0;
        self.progress = 0.0;
    }

    /// Append a copy of the last step and make it active.
    ///
    /// The copy gets id `len + 1` and the title [`NEW_STEP_TITLE`].
    pub fn insert_step(&mut self) -> &Step {
        let mut step = self.steps[self.steps.len() - 1].clone();
        step.id = StepId::try_from(self.steps.len() + 1).unwrap_or(StepId::MAX);
        step.title = NEW_STEP_TITLE.to_owned();
        self.steps.push(step);
        self.active_index = self.steps.len() - 1;
        &self.steps[self.active_index]
    }

    /// Mutable access for the edit propagator. Callers keep entity ids stable.
    pub fn steps_mut(&mut self) -> &mut [Step] {
        &mut self.steps
    }

    pub fn active_step_mut(&mut self) -> &mut Step {
        &mut self.steps[self.active_index]
    }

    // --- Playback ---

    /// Start playing from step 0.
    pub fn play(&mut self) {
        self.playing = true;
        self.play_index = 0;
        self.progress = 0.0;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Advance playback by `dt_ms` of wall-clock time.
    ///
    /// The transition into step `i + 1` takes that step's duration, floored
    /// at `min_transition_ms` and divided by `speed`. Reaching the final step
    /// stops playback in the same tick.
    pub fn advance(&mut self, dt_ms: f64, speed: f64, min_transition_ms: f64) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        if !self.playing {
            return events;
        }
        let Some(next) = self.steps.get(self.play_index + 1) else {
            self.finish(&mut events);
            return events;
        };

        let duration = next.duration_ms.max(min_transition_ms) / speed.max(MIN_SPEED);
        self.progress += dt_ms.max(0.0) / duration;
        if self.progress >= 1.0 {
            self.progress = 0.0;
            self.play_index += 1;
            events.push(PlaybackEvent::StepReached { index: self.play_index, title: next.title.clone() });
            if self.play_index + 1 >= self.steps.len() {
                self.finish(&mut events);
            }
        }
        events
    }

    fn finish(&mut self, events: &mut Vec<PlaybackEvent>) {
        self.playing = false;
        self.progress = 0.0;
        self.active_index = self.play_index;
        events.push(PlaybackEvent::Finished);
    }
}
