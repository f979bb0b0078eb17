//=========================================================================
// Clip Actions
//=========================================================================
//
// Playback state of one configured animation clip.
//
// A `ClipAction` only knows its own clock. It advances when told to and
// reports lifecycle crossings as `ClipEvent`s; dispatching those to
// listeners is the `Animator`'s job.
//
//   time 0 ──────── duration/2 ──────── duration
//                      Half                Loop (Repeat) / Finished (Once)
//
//=========================================================================

//=== LoopMode ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Play one cycle, then hold the last frame.
    Once,
    /// Wrap forever.
    Repeat,
}

//=== ClipEvent ===========================================================

/// Lifecycle signal emitted while a clip plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipEvent {
    /// A repeating clip wrapped around to its start.
    Loop,
    /// Playback crossed 50 % of the current cycle.
    Half,
    /// A play-once clip reached its end.
    Finished,
}

//=== ClipAction ==========================================================

/// Shortest cycle accepted, in seconds.
const MIN_DURATION: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct ClipAction {
    loop_mode: LoopMode,
    duration: f32,
    time_scale: f32,
    time: f32,
    running: bool,
    half_reached: bool,
    stops: u32,
}

impl ClipAction {
    pub fn new(duration: f32, loop_mode: LoopMode) -> Self {
        Self {
            loop_mode,
            duration: duration.max(MIN_DURATION),
            time_scale: 1.0,
            time: 0.0,
            running: false,
            half_reached: false,
            stops: 0,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Local time within the current cycle, in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// How many times this action has been stopped.
    pub fn stop_count(&self) -> u32 {
        self.stops
    }

    //--- Control ----------------------------------------------------------

    /// Starts from the first frame.
    pub fn play(&mut self) {
        self.time = 0.0;
        self.half_reached = false;
        self.running = true;
    }

    /// Stops and rewinds.
    pub fn stop(&mut self) {
        self.running = false;
        self.time = 0.0;
        self.half_reached = false;
        self.stops += 1;
    }

    //--- Advancement ------------------------------------------------------

    /// Advances by `dt` seconds, appending crossed lifecycle events in
    /// the order they happened.
    pub fn advance(&mut self, dt: f32, events: &mut Vec<ClipEvent>) {
        if !self.running || dt <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;
        let half = self.duration * 0.5;

        match self.loop_mode {
            LoopMode::Repeat => loop {
                if !self.half_reached && self.time >= half {
                    self.half_reached = true;
                    events.push(ClipEvent::Half);
                }
                if self.time < self.duration {
                    break;
                }
                self.time -= self.duration;
                self.half_reached = false;
                events.push(ClipEvent::Loop);
            },

            LoopMode::Once => {
                if !self.half_reached && self.time >= half {
                    self.half_reached = true;
                    events.push(ClipEvent::Half);
                }
                if self.time >= self.duration {
                    // Clamp on the last frame
                    self.time = self.duration;
                    self.running = false;
                    events.push(ClipEvent::Finished);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(action: &mut ClipAction, dt: f32) -> Vec<ClipEvent> {
        let mut events = Vec::new();
        action.advance(dt, &mut events);
        events
    }

    #[test]
    fn idle_action_does_not_advance() {
        let mut action = ClipAction::new(1.0, LoopMode::Repeat);
        assert!(advance(&mut action, 5.0).is_empty());
        assert_eq!(action.time(), 0.0);
    }

    #[test]
    fn repeat_emits_half_then_loop() {
        let mut action = ClipAction::new(1.0, LoopMode::Repeat);
        action.play();

        assert!(advance(&mut action, 0.25).is_empty());
        assert_eq!(advance(&mut action, 0.5), vec![ClipEvent::Half]);
        assert_eq!(advance(&mut action, 0.5), vec![ClipEvent::Loop]);
        assert!(action.is_running());
        assert!((action.time() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn large_step_reports_every_cycle() {
        let mut action = ClipAction::new(0.5, LoopMode::Repeat);
        action.play();

        let events = advance(&mut action, 1.3);
        assert_eq!(
            events,
            vec![ClipEvent::Half, ClipEvent::Loop, ClipEvent::Half, ClipEvent::Loop, ClipEvent::Half]
        );
    }

    #[test]
    fn once_clamps_on_last_frame() {
        let mut action = ClipAction::new(1.0, LoopMode::Once);
        action.play();

        let events = advance(&mut action, 3.0);
        assert_eq!(events, vec![ClipEvent::Half, ClipEvent::Finished]);
        assert!(!action.is_running());
        assert_eq!(action.time(), 1.0);

        assert!(advance(&mut action, 1.0).is_empty());
    }

    #[test]
    fn stop_rewinds_and_counts() {
        let mut action = ClipAction::new(1.0, LoopMode::Repeat);
        action.play();
        advance(&mut action, 0.4);

        action.stop();
        assert!(!action.is_running());
        assert_eq!(action.time(), 0.0);
        assert_eq!(action.stop_count(), 1);
    }

    #[test]
    fn zero_duration_is_clamped() {
        let mut action = ClipAction::new(0.0, LoopMode::Repeat);
        action.play();
        let events = advance(&mut action, 0.0105);
        assert_eq!(events.iter().filter(|e| **e == ClipEvent::Loop).count(), 10);
    }
}
