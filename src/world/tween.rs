//=========================================================================
// Tween
//=========================================================================
//
// Time-based progress with an easing curve. The tween only produces the
// eased fraction; callers interpolate whatever value they animate.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec3;

//=== Easing ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Overshoots the target, then settles back onto it.
    BackOut { overshoot: f32 },
}

impl Easing {
    /// Maps linear progress `t` in [0, 1] onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::BackOut { overshoot } => {
                let c3 = overshoot + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + overshoot * u * u
            }
        }
    }
}

//=== Tween ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration: duration.as_secs_f32(),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advances by `dt` seconds and returns the eased progress.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    /// Eased progress; exactly 1.0 once finished.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return 1.0;
        }
        self.easing.apply(self.elapsed / self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Interpolates without clamping, so overshooting curves overshoot.
pub fn lerp_vec3(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from + (to - from) * t
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_out_overshoots_then_lands() {
        let easing = Easing::BackOut { overshoot: 1.70158 };
        assert!(easing.apply(0.0).abs() < 1e-6);
        assert!(easing.apply(0.7) > 1.0);
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn tween_finishes_after_duration() {
        let mut tween = Tween::new(Duration::from_millis(2000), Easing::Linear);
        assert!((tween.advance(1.0) - 0.5).abs() < 1e-6);
        assert!(!tween.is_finished());

        assert_eq!(tween.advance(1.5), 1.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn zero_duration_is_finished_immediately() {
        let tween = Tween::new(Duration::ZERO, Easing::BackOut { overshoot: 1.2 });
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 1.0);
    }
}
