use thiserror::Error;

/// Why a goal could not be planned or followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("start ({x}, {y}) is not a valid position")]
    InvalidStart { x: i32, y: i32 },

    #[error("goal ({x}, {y}) is not a valid position")]
    InvalidGoal { x: i32, y: i32 },

    #[error("no path found")]
    Unreachable,

    #[error("search exceeded {limit} expansions")]
    ExpansionLimit { limit: usize },

    #[error("agent blocked for {ticks} consecutive ticks")]
    Stalled { ticks: u32 },

    #[error("no goal has been set")]
    NoGoal,
}
