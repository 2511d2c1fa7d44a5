//! Execution parameters: workflow loop control.
//!
//! These are application-layer concerns (how long the loop may run), not
//! domain policy (what the capabilities do).

use serde::{Deserialize, Serialize};

/// Loop control parameters for one workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum number of model invocations in one run. Reaching the ceiling
    /// while the model is still requesting tools ends the run as timed out.
    pub max_turns: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self { max_turns: 8 }
    }
}

impl ExecutionParams {
    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bounded() {
        assert!(ExecutionParams::default().max_turns >= 1);
    }

    #[test]
    fn test_builder() {
        assert_eq!(ExecutionParams::default().with_max_turns(3).max_turns, 3);
    }
}
