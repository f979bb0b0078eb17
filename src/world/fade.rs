//=========================================================================
// Fade-In
//=========================================================================

/// Cosmetic opacity ramp 0 → 1 after an initial delay.
///
/// While ramping the material must be drawn transparent; once finished
/// the owner switches it back to opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeIn {
    delay: f32,
    duration: f32,
    elapsed: f32,
    done: bool,
}

impl FadeIn {
    pub fn new(delay: f32, duration: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            duration: duration.max(0.0),
            elapsed: 0.0,
            done: false,
        }
    }

    /// Advances the ramp. Returns the opacity to apply, or `None` once the
    /// final opaque value has already been reported.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if self.done {
            return None;
        }

        self.elapsed += dt.max(0.0);
        let opacity = self.opacity();
        if opacity >= 1.0 {
            self.done = true;
        }
        Some(opacity)
    }

    pub fn opacity(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.done
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_zero_during_delay_then_ramps() {
        let mut fade = FadeIn::new(0.5, 1.5);
        assert_eq!(fade.advance(0.4), Some(0.0));
        let mid = fade.advance(0.85).unwrap_or_default();
        assert!((mid - 0.5).abs() < 1e-5);
        assert_eq!(fade.advance(1.0), Some(1.0));
        assert!(fade.is_complete());
        assert_eq!(fade.advance(1.0), None);
    }
}
