//! Interactive 2D tactics board: playback and editing of multi-step football
//! scenarios on a canvas.
//!
//! The crate compiles to WebAssembly and runs in the browser. A scenario is an
//! ordered list of steps, each placing players, the ball and target zones on
//! a fixed pitch. In view mode the engine animates between steps; in edit mode
//! the user drags entities, and each drag carries forward through every later
//! step. The host layer feeds scenario data and DOM events in, and reacts to
//! the [`engine::Action`]s that come back (committed step lists, status
//! text, play state, cursor).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scenario`] | Scenario, step and entity types as the host supplies them |
//! | [`timeline`] | Editable step list and the edit/playback state machine |
//! | [`interpolate`] | Linear entity interpolation between two steps |
//! | [`propagate`] | Forward propagation of drags and zone resizing |
//! | [`viewport`] | Pan/zoom viewport and coordinate conversions |
//! | [`input`] | Input types and the gesture state machine |
//! | [`hit`] | Hit-testing against entities |
//! | [`roster`] | Player name bindings and label resolution |
//! | [`render`] | Scene to display-list rendering |
//! | [`canvas2d`] | Display-list replay onto a browser 2D context |
//! | [`frame_loop`] | `requestAnimationFrame` driver |
//! | [`config`] | Host-supplied tunables |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (pitch size, zoom limits, radii, etc.) |

pub mod canvas2d;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod frame_loop;
pub mod hit;
pub mod input;
pub mod interpolate;
pub mod propagate;
pub mod render;
pub mod roster;
pub mod scenario;
pub mod timeline;
pub mod viewport;
