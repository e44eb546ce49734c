// AI Systems module - contains game-specific AI system implementations

pub mod ai_execution;
pub mod decision_making;

// Re-export game-specific systems
pub use ai_execution::*;
pub use decision_making::*;

// Re-export toolkit systems for backward compatibility
pub use bevy_ai_toolkit::prelude::*;
