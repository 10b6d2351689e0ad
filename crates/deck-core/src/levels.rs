//! Bounded arithmetic for the two clamped scalar levels the host owns.
//!
//! Volume is a scalar in `[0.0, 1.0]` mutated only through fixed-step
//! increments; brightness is an integer percentage in `[0, 100]` mutated by a
//! client-supplied signed delta.  Neither level is ever set directly from a
//! client-supplied absolute value.

/// Fixed step applied by one volume-up or volume-down operation.
pub const VOLUME_STEP: f32 = 0.05;

/// Lowest legal brightness percentage.
pub const BRIGHTNESS_MIN: i64 = 0;
/// Highest legal brightness percentage.
pub const BRIGHTNESS_MAX: i64 = 100;

/// One volume step up from `current`, clamped to `1.0`.
pub fn volume_step_up(current: f32) -> f32 {
    (current + VOLUME_STEP).clamp(0.0, 1.0)
}

/// One volume step down from `current`, clamped to `0.0`.
pub fn volume_step_down(current: f32) -> f32 {
    (current - VOLUME_STEP).clamp(0.0, 1.0)
}

/// Applies a signed brightness delta and clamps the result to `[0, 100]`.
pub fn apply_brightness_delta(current: u8, change: i64) -> u8 {
    (i64::from(current) + change).clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX) as u8
}
