//! Input model: mouse buttons, UI mode, and the gesture state machine.
//!
//! `UiState` is the persistent interaction state visible to the renderer
//! (edit mode, selection). `InputState` is the gesture being tracked between
//! pointer-down and pointer-up, carrying the previous pointer position so
//! each move can be turned into an incremental delta.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::scenario::EntityId;
use crate::viewport::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Edit mode: dragging, ghost, trail and grid are enabled.
    pub editing: bool,
    /// The id of the currently selected entity, if any.
    pub selected_id: Option<EntityId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the viewport.
    Panning {
        /// Surface-pixel position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is dragging an entity in edit mode.
    DraggingEntity {
        /// Id of the entity being dragged.
        id: EntityId,
        /// Surface-pixel position of the previous pointer event.
        last_screen: Point,
        /// Whether any move has changed the step list since pointer-down.
        moved: bool,
    },
}

impl InputState {
    /// Surface-pixel position of the previous pointer event, if a gesture is active.
    #[must_use]
    pub fn last_screen(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Panning { last_screen } | Self::DraggingEntity { last_screen, .. } => Some(*last_screen),
        }
    }

    /// Id of the entity being dragged, if any.
    #[must_use]
    pub fn dragged_id(&self) -> Option<&str> {
        match self {
            Self::DraggingEntity { id, .. } => Some(id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }

    /// Cursor the host should show for this gesture, or `None` to use the mode default.
    #[must_use]
    pub fn cursor(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Panning { .. } => Some("grabbing"),
            Self::DraggingEntity { .. } => Some("move"),
        }
    }
}
