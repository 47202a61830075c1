// src/utilities/easing.rs
//
// Frame-delta aware easing helpers used by the point animations.

/// Moves `current` toward `target` by a fraction of the gap.
/// The fraction is `dt * rate`, capped so a long frame cannot overshoot.
pub fn ease_toward(current: f32, target: f32, dt: f32, rate: f32, cap: f32) -> f32 {
    let t = (dt * rate).clamp(0.0, cap.min(1.0));
    current + (target - current) * t
}

/// Linear ramp from 0 to 1 over `duration`.
pub fn ramp(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}
