use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a run currently is. Strictly sequential: Idle → Generating →
/// Guessing → Complete, with any failure dropping back to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Generating,
    Guessing,
    Complete,
}

impl Stage {
    pub const ALL: &[Stage] = &[
        Stage::Idle,
        Stage::Generating,
        Stage::Guessing,
        Stage::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Generating => "generating",
            Stage::Guessing => "guessing",
            Stage::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Idle => "Idle",
            Stage::Generating => "Generating ASCII art...",
            Stage::Guessing => "Guesser is analyzing the art...",
            Stage::Complete => "Competition complete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Stage::Idle),
            "generating" => Some(Stage::Generating),
            "guessing" => Some(Stage::Guessing),
            "complete" => Some(Stage::Complete),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_str(stage.as_str()), Some(*stage));
        }
        assert_eq!(Stage::from_str("done"), None);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Stage::Generating).unwrap();
        assert_eq!(json, "\"generating\"");
    }
}
