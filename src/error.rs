//! Error type for host-facing engine calls.
//!
//! Data-consistency gaps inside a scenario (missing ids, dangling attachments,
//! zero durations) never surface here; they degrade to no-ops. `BoardError`
//! covers caller misuse and failures reported by the browser.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("step index {index} out of range (scenario has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },
    #[error("scenario has no steps")]
    EmptyScenario,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for BoardError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
