pub mod decider;
pub mod levels;
pub mod trade_plan;

pub use decider::decide;
pub use levels::{normalize, LevelPair};
pub use trade_plan::build_plan;
