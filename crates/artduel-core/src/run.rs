use serde::{Deserialize, Serialize};

use crate::animal::Animal;
use crate::sanitize::guess_matches;
use crate::stage::Stage;

/// Everything observable about the current run. Owned by the workflow
/// controller; the rendering layer only ever sees cloned snapshots.
///
/// Fields from a failed or superseded run are never treated as valid:
/// entering a new run clears them, and any failure resets to `Idle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub stage: Stage,
    pub animal: Option<Animal>,
    pub art: Option<String>,
    pub guess: Option<String>,
    pub elapsed_secs: Option<f64>,
    pub error: Option<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            animal: None,
            art: None,
            guess: None,
            elapsed_secs: None,
            error: None,
        }
    }

    /// Clear all per-run fields and drop back to Idle.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether the guess identified the animal. None until both sides of
    /// the comparison exist.
    pub fn matched(&self) -> Option<bool> {
        let animal = self.animal?;
        let guess = self.guess.as_deref()?;
        Some(guess_matches(animal.as_str(), guess))
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
