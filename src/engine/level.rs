//! Scoring & difficulty rules
use crate::consts;
use std::time::Duration;

/// Points awarded for eating one piece of food while on `level`
pub(crate) fn food_points(level: u32) -> u32 {
    consts::FOOD_POINTS_PER_LEVEL.saturating_mul(level)
}

/// The score at which `level` is complete
pub(crate) fn level_threshold(level: u32) -> u32 {
    consts::LEVEL_SCORE_STEP.saturating_mul(level)
}

/// Time between ticks while playing on `level`.  Shrinks by
/// [`TICK_STEP`][consts::TICK_STEP] per level, never dropping below
/// [`MIN_TICK_PERIOD`][consts::MIN_TICK_PERIOD].
pub(crate) fn tick_interval(level: u32) -> Duration {
    let speedup = consts::TICK_STEP
        .saturating_mul(level)
        .min(consts::MAX_TICK_SPEEDUP);
    consts::BASE_TICK_PERIOD
        .saturating_sub(speedup)
        .max(consts::MIN_TICK_PERIOD)
}
